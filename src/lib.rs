//! Scoped OAuth 2.0 client provisioning: exchange long-lived Basic credentials for Bearer tokens
//! once per permission scope and share one pre-authenticated HTTP client per scope for the
//! lifetime of a test run.
//!
//! ```no_run
//! # async fn demo() -> scoped_oauth2::error::Result<()> {
//! use scoped_oauth2::{auth::Scope, config::Credentials, registry::ClientRegistry};
//!
//! let credentials = Credentials::from_env()?;
//! let registry = ClientRegistry::new(credentials);
//! let readers = registry.client(Scope::Read).await?;
//! let response = readers.get("users").await?;
//!
//! assert!(response.status().is_success());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod registry;

#[cfg(test)] mod _test;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
