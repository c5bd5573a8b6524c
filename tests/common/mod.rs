#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use scoped_oauth2::{
	config::Credentials, http::ReqwestHttpClient, registry::ReqwestClientRegistry,
};

pub const USERNAME: &str = "svc-automation";
pub const PASSWORD: &str = "s3cret:pass";
/// `base64("svc-automation:s3cret:pass")`.
pub const BASIC: &str = "Basic c3ZjLWF1dG9tYXRpb246czNjcmV0OnBhc3M=";

pub fn credentials(server: &MockServer) -> Credentials {
	Credentials::new(server.base_url(), USERNAME, PASSWORD)
		.expect("Mock server credentials should be valid.")
}

pub fn token_body(token_type: &str, access_token: &str) -> String {
	format!(
		"{{\"token_type\":\"{token_type}\",\"access_token\":\"{access_token}\",\"expires_in\":3600}}"
	)
}

pub fn build_reqwest_test_registry(server: &MockServer) -> Arc<ReqwestClientRegistry> {
	Arc::new(ReqwestClientRegistry::with_http_client(
		credentials(server),
		ReqwestHttpClient::default(),
	))
}
