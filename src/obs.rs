//! Optional observability helpers for token exchanges and registry construction.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `scoped_oauth2.op` with the `op` (operation)
//!   and `scope` fields.
//! - Enable `metrics` to increment the `scoped_oauth2_op_total` counter for every
//!   attempt/success/failure, labeled by `op`, `scope`, and `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// A single Basic-to-Bearer token exchange.
	AcquireToken,
	/// First-time construction of a scope's shared client.
	BuildClient,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::AcquireToken => "acquire_token",
			OpKind::BuildClient => "build_client",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}

	/// Maps a finished operation's result to an outcome label.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => OpOutcome::Success,
			Err(_) => OpOutcome::Failure,
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
