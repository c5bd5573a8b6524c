//! Call-counting fake transport shared by unit tests.

// std
use std::{
	collections::{HashMap, VecDeque},
	sync::atomic::{AtomicUsize, Ordering},
	time::Duration as StdDuration,
};
// crates.io
use oauth2::http::{Method, Response, header::AUTHORIZATION};
use parking_lot::Mutex;
// self
use crate::{
	_prelude::*,
	auth::Scope,
	http::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, HttpTransport},
};

type FakeFuture<'c> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<FakeError>>> + 'c + Send>>;

#[derive(Debug)]
pub(crate) struct FakeError;
impl Display for FakeError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Fake connection refused.")
	}
}
impl StdError for FakeError {}

/// Scripted outcome for the next token request of a scope.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FakeFailure {
	Status(u16),
	Network,
}

/// API request observed by the fake.
#[derive(Clone, Debug)]
pub(crate) struct SentRequest {
	pub(crate) method: Method,
	pub(crate) uri: String,
	pub(crate) authorization: Option<String>,
}

#[derive(Default)]
struct FakeState {
	token_calls: [AtomicUsize; 2],
	token_delay: Option<StdDuration>,
	failures: Mutex<HashMap<Scope, VecDeque<FakeFailure>>>,
	api_requests: Mutex<Vec<SentRequest>>,
}

/// Answers `oauth/token` with `{"token_type":"Bearer","access_token":"<scope>-token-<n>"}` and
/// every other request with an empty 200.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport(Arc<FakeState>);
impl FakeTransport {
	pub(crate) fn with_token_delay(delay: StdDuration) -> Self {
		Self(Arc::new(FakeState { token_delay: Some(delay), ..Default::default() }))
	}

	pub(crate) fn fail_next(&self, scope: Scope, failure: FakeFailure) {
		self.0.failures.lock().entry(scope).or_default().push_back(failure);
	}

	pub(crate) fn token_calls(&self, scope: Scope) -> usize {
		self.0.token_calls[scope.index()].load(Ordering::SeqCst)
	}

	pub(crate) fn api_requests(&self) -> Vec<SentRequest> {
		self.0.api_requests.lock().clone()
	}
}
impl HttpTransport for FakeTransport {
	type Handle = FakeHandle;
	type TransportError = FakeError;

	fn handle(&self) -> Self::Handle {
		FakeHandle(Arc::clone(&self.0))
	}
}

pub(crate) struct FakeHandle(Arc<FakeState>);
impl<'c> AsyncHttpClient<'c> for FakeHandle {
	type Error = HttpClientError<FakeError>;
	type Future = FakeFuture<'c>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let state = Arc::clone(&self.0);

		Box::pin(async move {
			if !request.uri().path().ends_with("/oauth/token") {
				state.api_requests.lock().push(SentRequest {
					method: request.method().clone(),
					uri: request.uri().to_string(),
					authorization: request
						.headers()
						.get(AUTHORIZATION)
						.and_then(|value| value.to_str().ok())
						.map(str::to_owned),
				});

				return Ok(response(200, String::new()));
			}

			let scope = if request.uri().query().unwrap_or_default().contains("scope=write") {
				Scope::Write
			} else {
				Scope::Read
			};
			let call = state.token_calls[scope.index()].fetch_add(1, Ordering::SeqCst) + 1;
			let failure = state.failures.lock().get_mut(&scope).and_then(VecDeque::pop_front);

			if let Some(delay) = state.token_delay {
				tokio::time::sleep(delay).await;
			}

			match failure {
				Some(FakeFailure::Status(status)) =>
					Ok(response(status, "{\"error\":\"invalid_client\"}".into())),
				Some(FakeFailure::Network) => Err(HttpClientError::Other(FakeError.to_string())),
				None => Ok(response(
					200,
					format!(
						"{{\"token_type\":\"Bearer\",\"access_token\":\"{scope}-token-{call}\"}}"
					),
				)),
			}
		})
	}
}

fn response(status: u16, body: String) -> HttpResponse {
	Response::builder()
		.status(status)
		.header("content-type", "application/json")
		.body(body.into_bytes())
		.expect("Fake response should build.")
}
