//! HTTP client bound to one scope that signs every request with that scope's token.

// crates.io
use oauth2::http::{HeaderValue, Method, Request, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{Scope, Token},
	config,
	error::ConfigError,
	http::{self, AsyncHttpClient, HttpRequest, HttpResponse, HttpTransport},
};

/// Pre-authenticated transport handle for one [`Scope`].
///
/// The client is read-only after construction, so a single instance is shared (behind [`Arc`])
/// by every caller that needs the scope. Every request it sends carries
/// `Authorization: <token_type> <access_token>`; a caller-supplied `Authorization` header is
/// replaced. Requests whose URI has no scheme are resolved against the base URL.
pub struct AuthenticatedClient<C>
where
	C: HttpTransport,
{
	token: Token,
	base_url: Url,
	authorization: HeaderValue,
	handle: C::Handle,
}
impl<C> AuthenticatedClient<C>
where
	C: HttpTransport,
{
	/// Binds `token` to a fresh handle from `transport`.
	pub fn new(transport: &C, base_url: Url, token: Token) -> Result<Self> {
		let mut authorization = HeaderValue::from_str(&token.authorization_value())
			.map_err(|source| ConfigError::InvalidTokenHeader { scope: token.scope, source })?;

		authorization.set_sensitive(true);

		Ok(Self { token, base_url, authorization, handle: transport.handle() })
	}

	/// Scope this client operates under.
	pub fn scope(&self) -> Scope {
		self.token.scope
	}

	/// Token attached to every request.
	pub fn token(&self) -> &Token {
		&self.token
	}

	/// Base URL used for relative request paths.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Builds a request for `path` relative to the base URL.
	pub fn request(
		&self,
		method: Method,
		path: &str,
		body: impl Into<Vec<u8>>,
	) -> Result<HttpRequest> {
		let url = config::join_relative(&self.base_url, path)?;
		let request = Request::builder()
			.method(method)
			.uri(http::to_uri(&url)?)
			.body(body.into())
			.map_err(ConfigError::from)?;

		Ok(request)
	}

	/// Sends `request` with this scope's `Authorization` header.
	///
	/// Non-2xx responses are returned as-is; only transport failures become errors.
	pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse> {
		if request.uri().scheme().is_none() {
			let url = config::join_relative(&self.base_url, &request.uri().to_string())?;

			*request.uri_mut() = http::to_uri(&url)?;
		}

		request.headers_mut().insert(AUTHORIZATION, self.authorization.clone());

		self.handle.call(request).await.map_err(Error::network)
	}

	/// Sends `GET {base_url}/{path}`.
	pub async fn get(&self, path: &str) -> Result<HttpResponse> {
		let request = self.request(Method::GET, path, Vec::new())?;

		self.send(request).await
	}
}
impl<C> Debug for AuthenticatedClient<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthenticatedClient")
			.field("scope", &self.token.scope)
			.field("base_url", &self.base_url.as_str())
			.field("token", &self.token)
			.finish()
	}
}
