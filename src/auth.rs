//! Auth-domain values: permission scopes, the method resolver, and issued tokens.

pub mod scope;
pub mod token;

pub use scope::*;
pub use token::{secret::*, *};
