//! Tokens issued by the client-credentials exchange.

pub mod secret;

// self
use crate::{_prelude::*, auth::Scope};
use secret::Secret;

/// Access token issued for exactly one [`Scope`].
///
/// Tokens are never mutated after the exchange; expiry is not tracked.
#[derive(Clone, Debug)]
pub struct Token {
	/// Token type exactly as returned by the endpoint (e.g. `Bearer`).
	pub token_type: String,
	/// Opaque access token; callers must avoid logging it.
	pub access_token: Secret,
	/// Scope the token was issued for.
	pub scope: Scope,
	/// Instant the exchange completed.
	pub acquired_at: OffsetDateTime,
}
impl Token {
	/// Creates a token stamped with the current UTC instant.
	pub fn new(token_type: impl Into<String>, access_token: impl Into<String>, scope: Scope) -> Self {
		Self {
			token_type: token_type.into(),
			access_token: Secret::new(access_token),
			scope,
			acquired_at: OffsetDateTime::now_utc(),
		}
	}

	/// Returns the `Authorization` header value, `"<token_type> <access_token>"`.
	///
	/// The token type is not re-cased; whatever the endpoint returned is used verbatim.
	pub fn authorization_value(&self) -> String {
		format!("{} {}", self.token_type, self.access_token.expose())
	}
}
