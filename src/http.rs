//! Transport primitives shared by the token exchange and authenticated clients.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. The token acquirer asks it
//! for a short-lived handle per exchange, while each authenticated client keeps one handle for
//! its whole lifetime. Handles speak the `oauth2` crate's [`AsyncHttpClient`] contract so any
//! transport already written for `oauth2` (or a call-counting mock) plugs in unchanged.

pub use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http};

// std
#[cfg(feature = "reqwest")] use std::time::Duration as StdDuration;
// self
use crate::_prelude::*;

/// Boxed future returned by [`HttpTransport::Handle`] implementations.
pub type TransportFuture<'c, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'c + Send + Sync>>;

/// Abstraction over HTTP transports that can execute the token exchange and API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back a registry shared
/// across test workers, and the handles they return must own whatever state their request
/// futures need so those futures remain `Send` across executor threads.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle issued by the transport.
	///
	/// The request future returned by [`AsyncHttpClient::call`] must be `Send`.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle that dispatches requests through this transport.
	fn handle(&self) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The token endpoint is expected to answer directly, so a custom [`ReqwestClient`] should keep
/// redirect following disabled for it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests (token exchange included) fail after `timeout`.
	///
	/// A timed-out exchange surfaces as [`Error::NetworkFailure`] and leaves the scope retryable.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self, crate::error::ConfigError> {
		Ok(Self(ReqwestClient::builder().timeout(timeout).build()?))
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(Arc::new(self.0.clone()))
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`HttpTransport`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(Arc<ReqwestClient>);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future = TransportFuture<'c, ReqwestError>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Converts a resolved URL into the URI type carried by [`HttpRequest`].
pub(crate) fn to_uri(url: &Url) -> Result<http::Uri, crate::error::ConfigError> {
	http::Uri::try_from(url.as_str())
		.map_err(|source| crate::error::ConfigError::InvalidRequestUri { source })
}
