// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::auth::Scope;

/// Thread-safe per-scope counters for token exchanges started by a registry.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
	token_requests: [AtomicU64; 2],
	success: [AtomicU64; 2],
	failure: [AtomicU64; 2],
}
impl RegistryMetrics {
	/// Returns the number of token exchanges started for `scope`.
	pub fn token_requests(&self, scope: Scope) -> u64 {
		self.token_requests[scope.index()].load(Ordering::Relaxed)
	}

	/// Returns the number of exchanges for `scope` that produced a client.
	pub fn successes(&self, scope: Scope) -> u64 {
		self.success[scope.index()].load(Ordering::Relaxed)
	}

	/// Returns the number of exchanges for `scope` that failed.
	pub fn failures(&self, scope: Scope) -> u64 {
		self.failure[scope.index()].load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self, scope: Scope) {
		self.token_requests[scope.index()].fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self, scope: Scope) {
		self.success[scope.index()].fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self, scope: Scope) {
		self.failure[scope.index()].fetch_add(1, Ordering::Relaxed);
	}
}
