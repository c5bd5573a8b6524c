//! Client-credentials exchange that turns Basic credentials into a scoped [`Token`].
//!
//! [`TokenAcquirer`] performs exactly one round trip per call and keeps no state besides the
//! transport, so concurrent exchanges for different scopes never contend. Caching belongs to
//! [`ClientRegistry`](crate::registry::ClientRegistry).

pub use oauth2;

// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	auth::{Scope, Token},
	config::Credentials,
	error::ConfigError,
	http::{self, AsyncHttpClient, HttpRequest, HttpResponse, HttpTransport},
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Success payload of the token endpoint; unknown fields (e.g. `expires_in`) are ignored.
#[derive(Debug, Deserialize)]
struct TokenResponseBody {
	token_type: String,
	access_token: String,
}

/// Performs the Basic-to-Bearer exchange against `{base_url}/oauth/token`.
pub struct TokenAcquirer<C>
where
	C: HttpTransport,
{
	transport: Arc<C>,
}
impl<C> TokenAcquirer<C>
where
	C: HttpTransport,
{
	/// Creates an acquirer that dispatches through `transport`.
	pub fn new(transport: impl Into<Arc<C>>) -> Self {
		Self { transport: transport.into() }
	}

	/// Transport used for the exchange.
	pub fn transport(&self) -> &Arc<C> {
		&self.transport
	}

	/// Requests a token for `scope`.
	///
	/// Non-2xx answers fail with [`Error::AuthenticationFailure`]; transport failures fail with
	/// [`Error::NetworkFailure`]. Nothing is retried.
	pub async fn acquire(&self, credentials: &Credentials, scope: Scope) -> Result<Token> {
		const KIND: OpKind = OpKind::AcquireToken;

		let span = OpSpan::new(KIND, scope);

		obs::record_op_outcome(KIND, scope, OpOutcome::Attempt);

		let result = span.instrument(self.exchange(credentials, scope)).await;

		obs::record_op_outcome(KIND, scope, OpOutcome::of(&result));

		result
	}

	async fn exchange(&self, credentials: &Credentials, scope: Scope) -> Result<Token> {
		let request = token_request(credentials, scope)?;
		let handle = self.transport.handle();
		let response = handle.call(request).await.map_err(Error::network)?;

		parse_token_response(scope, &response)
	}
}
impl<C> Clone for TokenAcquirer<C>
where
	C: HttpTransport,
{
	fn clone(&self) -> Self {
		Self { transport: Arc::clone(&self.transport) }
	}
}
impl<C> Debug for TokenAcquirer<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenAcquirer(..)")
	}
}

/// Builds `POST oauth/token?grant_type=client_credentials&scope=<scope>` with Basic auth.
pub(crate) fn token_request(credentials: &Credentials, scope: Scope) -> Result<HttpRequest> {
	let url = credentials.token_endpoint(scope)?;
	let request = Request::builder()
		.method(Method::POST)
		.uri(http::to_uri(&url)?)
		.header(AUTHORIZATION, credentials.basic_authorization())
		.header(ACCEPT, "application/json")
		.body(Vec::new())
		.map_err(ConfigError::from)?;

	Ok(request)
}

fn parse_token_response(scope: Scope, response: &HttpResponse) -> Result<Token> {
	let status = response.status();

	if !status.is_success() {
		return Err(Error::AuthenticationFailure { status: status.as_u16(), scope });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(response.body());
	let body: TokenResponseBody = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::MalformedTokenResponse { scope, source })?;

	Ok(Token::new(body.token_type, body.access_token, scope))
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::Response;
	// self
	use super::*;

	fn credentials() -> Credentials {
		Credentials::new("https://api.example.com/v1", "user", "pass")
			.expect("Test credentials should build.")
	}

	fn response(status: u16, body: &str) -> HttpResponse {
		Response::builder()
			.status(status)
			.header("content-type", "application/json")
			.body(body.as_bytes().to_vec())
			.expect("Test response should build.")
	}

	#[test]
	fn token_request_matches_the_wire_format() {
		let request =
			token_request(&credentials(), Scope::Read).expect("Token request should build.");

		assert_eq!(request.method(), &Method::POST);
		assert_eq!(
			request.uri().to_string(),
			"https://api.example.com/v1/oauth/token?grant_type=client_credentials&scope=read"
		);
		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Basic dXNlcjpwYXNz")
		);
		assert!(request.body().is_empty());
	}

	#[test]
	fn success_response_keeps_fields_verbatim() {
		let token = parse_token_response(
			Scope::Write,
			&response(200, r#"{"token_type":"Bearer","access_token":"abc123","expires_in":3600}"#),
		)
		.expect("A 200 response should parse.");

		assert_eq!(token.token_type, "Bearer");
		assert_eq!(token.access_token.expose(), "abc123");
		assert_eq!(token.scope, Scope::Write);
		assert_eq!(token.authorization_value(), "Bearer abc123");
	}

	#[test]
	fn non_success_status_is_an_authentication_failure() {
		for status in [400, 401, 403, 500] {
			let err = parse_token_response(Scope::Write, &response(status, "{}"))
				.expect_err("Non-2xx responses must fail.");

			assert!(
				matches!(
					err,
					Error::AuthenticationFailure { status: got, scope: Scope::Write } if got == status
				),
				"Unexpected error for HTTP {status}: {err:?}."
			);
		}
	}

	#[test]
	fn malformed_body_reports_the_missing_field() {
		let err = parse_token_response(Scope::Read, &response(200, r#"{"token_type":"Bearer"}"#))
			.expect_err("A body without access_token must fail.");

		match err {
			Error::MalformedTokenResponse { scope, source } => {
				assert_eq!(scope, Scope::Read);
				assert!(source.to_string().contains("access_token"), "Unexpected error: {source}.");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
