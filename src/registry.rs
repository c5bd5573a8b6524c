//! Lazily initialized registry that shares one authenticated client per scope.
//!
//! The registry replaces process-wide singletons: test-session setup constructs it once from the
//! configured [`Credentials`], hands out references (typically an `Arc<ClientRegistry<_>>`), and
//! drops it at teardown. Each scope owns an independent slot guarded by its own async mutex, so
//! `read` and `write` initialize concurrently while callers racing on the same scope queue behind
//! the first one and observe the client it published.

mod metrics;

pub use self::metrics::*;

// self
use crate::{
	_prelude::*,
	auth::Scope,
	client::AuthenticatedClient,
	config::Credentials,
	http::HttpTransport,
	oauth::TokenAcquirer,
	obs::{self, OpKind, OpOutcome, OpSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Shared handle to a scope's client.
pub type SharedClient<C> = Arc<AuthenticatedClient<C>>;

#[cfg(feature = "reqwest")]
/// Registry specialized for the crate's default reqwest transport.
pub type ReqwestClientRegistry = ClientRegistry<ReqwestHttpClient>;

/// Observable lifecycle of one scope's slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
	/// No client exists and no construction is in flight.
	Unconstructed,
	/// A caller holds the scope's lock and is exchanging credentials.
	Constructing,
	/// The client is published and will be returned to every caller.
	Ready,
}

struct ScopeSlot<C>
where
	C: HttpTransport,
{
	construction: AsyncMutex<()>,
	client: RwLock<Option<SharedClient<C>>>,
}
impl<C> ScopeSlot<C>
where
	C: HttpTransport,
{
	fn new() -> Self {
		Self { construction: AsyncMutex::new(()), client: RwLock::new(None) }
	}

	fn ready(&self) -> Option<SharedClient<C>> {
		self.client.read().clone()
	}

	fn publish(&self, client: SharedClient<C>) {
		*self.client.write() = Some(client);
	}
}

/// One-client-per-scope cache of ready-to-use [`AuthenticatedClient`]s.
///
/// For every scope at most one token exchange succeeds, and once it does every caller receives
/// the same [`SharedClient`]. A failed exchange leaves the slot [`SlotState::Unconstructed`] and
/// surfaces the error; the next call tries again. Dropping a [`client`](Self::client) future
/// mid-exchange releases the scope's lock with the slot still unconstructed.
pub struct ClientRegistry<C>
where
	C: HttpTransport,
{
	credentials: Credentials,
	acquirer: TokenAcquirer<C>,
	read: ScopeSlot<C>,
	write: ScopeSlot<C>,
	metrics: RegistryMetrics,
}
impl<C> ClientRegistry<C>
where
	C: HttpTransport,
{
	/// Creates a registry that exchanges `credentials` through the caller-provided transport.
	pub fn with_http_client(credentials: Credentials, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			credentials,
			acquirer: TokenAcquirer::new(http_client),
			read: ScopeSlot::new(),
			write: ScopeSlot::new(),
			metrics: RegistryMetrics::default(),
		}
	}

	/// Read-only configuration the registry was built with.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Transport shared by the token exchange and every issued client.
	pub fn http_client(&self) -> &Arc<C> {
		self.acquirer.transport()
	}

	/// Per-scope exchange counters.
	pub fn metrics(&self) -> &RegistryMetrics {
		&self.metrics
	}

	/// Returns the shared client for `scope`, exchanging credentials on first use.
	pub async fn client(&self, scope: Scope) -> Result<SharedClient<C>> {
		const KIND: OpKind = OpKind::BuildClient;

		let slot = self.slot(scope);

		if let Some(client) = slot.ready() {
			return Ok(client);
		}

		let span = OpSpan::new(KIND, scope);

		span.instrument(async move {
			let _construction = slot.construction.lock().await;

			// Published while this caller waited on the lock.
			if let Some(client) = slot.ready() {
				return Ok(client);
			}

			obs::record_op_outcome(KIND, scope, OpOutcome::Attempt);
			self.metrics.record_attempt(scope);

			let result = self.build(scope).await;

			obs::record_op_outcome(KIND, scope, OpOutcome::of(&result));

			match &result {
				Ok(client) => {
					self.metrics.record_success(scope);
					slot.publish(Arc::clone(client));
				},
				Err(_) => self.metrics.record_failure(scope),
			}

			result
		})
		.await
	}

	/// Resolves `method` to a scope and returns that scope's client.
	pub async fn client_for_method(&self, method: &str) -> Result<SharedClient<C>> {
		self.client(Scope::for_method(method)?).await
	}

	/// Returns the client for `scope` only if it is already published.
	pub fn cached(&self, scope: Scope) -> Option<SharedClient<C>> {
		self.slot(scope).ready()
	}

	/// Snapshot of the slot lifecycle for `scope`.
	pub fn state(&self, scope: Scope) -> SlotState {
		let slot = self.slot(scope);

		if slot.ready().is_some() {
			return SlotState::Ready;
		}

		match slot.construction.try_lock() {
			Some(_idle) if slot.ready().is_some() => SlotState::Ready,
			Some(_idle) => SlotState::Unconstructed,
			None => SlotState::Constructing,
		}
	}

	async fn build(&self, scope: Scope) -> Result<SharedClient<C>> {
		let token = self.acquirer.acquire(&self.credentials, scope).await?;
		let client = AuthenticatedClient::new(
			self.acquirer.transport().as_ref(),
			self.credentials.base_url().clone(),
			token,
		)?;

		debug_assert_eq!(client.scope(), scope);

		Ok(Arc::new(client))
	}

	fn slot(&self, scope: Scope) -> &ScopeSlot<C> {
		match scope {
			Scope::Read => &self.read,
			Scope::Write => &self.write,
		}
	}
}
#[cfg(feature = "reqwest")]
impl ClientRegistry<ReqwestHttpClient> {
	/// Creates a registry backed by its own default reqwest transport.
	pub fn new(credentials: Credentials) -> Self {
		Self::with_http_client(credentials, ReqwestHttpClient::default())
	}
}
impl<C> Debug for ClientRegistry<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientRegistry")
			.field("credentials", &self.credentials)
			.field("read", &self.state(Scope::Read))
			.field("write", &self.state(Scope::Write))
			.finish()
	}
}
