//! Demonstrates a test session sharing one registry: the first `read`/`write` requests exchange
//! credentials, every later request reuses the cached client for its scope.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use scoped_oauth2::{config::Credentials, registry::ClientRegistry};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\"}");
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;

	let credentials = Credentials::new(server.base_url(), "demo-client", "super-secret")?;
	let registry = Arc::new(ClientRegistry::new(credentials));

	for method in ["GET", "GET", "DELETE"] {
		let client = registry.client_for_method(method).await?;

		println!("{method} uses the {} client: {client:?}.", client.scope());
	}

	let readers = registry.client_for_method("GET").await?;
	let response = readers.get("users").await?;

	println!("GET /users answered HTTP {}.", response.status());

	// One exchange for `read`, one for `write`.
	token_mock.assert_calls_async(2).await;

	Ok(())
}
