mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::{build_reqwest_test_registry, token_body};
use scoped_oauth2::{auth::Scope, http::http::Method};

#[tokio::test]
async fn every_request_carries_the_issued_bearer_header() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").query_param("scope", "write");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("Bearer", "abc123"));
		})
		.await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/users").header("authorization", "Bearer abc123");
			then.status(201);
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/users").header("authorization", "Bearer abc123");
			then.status(200);
		})
		.await;
	let registry = build_reqwest_test_registry(&server);
	let client = registry.client(Scope::Write).await.expect("Write client should build.");

	for _ in 0..2 {
		let request = client
			.request(Method::POST, "users", br#"{"name":"alice"}"#.to_vec())
			.expect("POST request should build.");
		let response = client.send(request).await.expect("POST should succeed.");

		assert_eq!(response.status().as_u16(), 201);
	}

	let request =
		client.request(Method::PATCH, "/users", Vec::new()).expect("PATCH request should build.");
	let response = client.send(request).await.expect("PATCH should succeed.");

	assert_eq!(response.status().as_u16(), 200);

	token.assert_calls_async(1).await;
	create.assert_calls_async(2).await;
	update.assert_async().await;
}

#[tokio::test]
async fn token_type_is_forwarded_without_recasing() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("bearer", "lower-case"));
		})
		.await;

	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/zip-codes").header("authorization", "bearer lower-case");
			then.status(200).body("[\"12345\"]");
		})
		.await;
	let registry = build_reqwest_test_registry(&server);
	let client = registry.client(Scope::Read).await.expect("Read client should build.");
	let response = client.get("zip-codes").await.expect("GET should succeed.");

	assert_eq!(response.body().as_slice(), b"[\"12345\"]");

	api.assert_async().await;
}

#[tokio::test]
async fn non_success_api_responses_are_returned() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("Bearer", "abc123"));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/404");
			then.status(404);
		})
		.await;

	let registry = build_reqwest_test_registry(&server);
	let client = registry.client(Scope::Read).await.expect("Read client should build.");
	let response = client.get("users/404").await.expect("A 404 is a response, not an error.");

	assert_eq!(response.status().as_u16(), 404);
}
