//! Read-only client configuration supplied once at session setup.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{Scope, Secret},
	error::ConfigError,
};

/// Path of the token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "oauth/token";
/// Environment variable holding the base URL for [`Credentials::from_env`].
pub const ENV_BASE_URL: &str = "SCOPED_OAUTH2_BASE_URL";
/// Environment variable holding the client username for [`Credentials::from_env`].
pub const ENV_USERNAME: &str = "SCOPED_OAUTH2_USERNAME";
/// Environment variable holding the client password for [`Credentials::from_env`].
pub const ENV_PASSWORD: &str = "SCOPED_OAUTH2_PASSWORD";

/// Long-lived Basic credentials paired with the service base URL.
///
/// Values are validated on construction and never change afterwards. The base URL path is
/// normalized to end with `/` so [`TOKEN_PATH`] and relative API paths append to it instead of
/// replacing its last segment.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
	base_url: Url,
	username: String,
	password: Secret,
}
impl Credentials {
	/// Validates and builds a credential set.
	///
	/// The password may be empty; the username may not.
	pub fn new(
		base_url: impl AsRef<str>,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let base_url = normalize_base_url(base_url.as_ref())?;
		let username = username.into();

		if username.is_empty() {
			return Err(ConfigError::MissingUsername);
		}

		Ok(Self { base_url, username, password: Secret::new(password) })
	}

	/// Loads credentials from the `SCOPED_OAUTH2_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads credentials through an arbitrary variable lookup (e.g. test-runner parameters).
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let require = |name| lookup(name).ok_or(ConfigError::MissingEnv { name });

		Self::new(require(ENV_BASE_URL)?, require(ENV_USERNAME)?, require(ENV_PASSWORD)?)
	}

	/// Normalized base URL (always ends with `/`).
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Client username.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// Client password; callers must avoid logging it.
	pub fn password(&self) -> &Secret {
		&self.password
	}

	/// Returns `Basic base64("<username>:<password>")`.
	///
	/// The pair is encoded as-is with standard padded base64; no URL-encoding is applied.
	pub fn basic_authorization(&self) -> String {
		let pair = format!("{}:{}", self.username, self.password.expose());

		format!("Basic {}", STANDARD.encode(pair))
	}

	/// Builds the token endpoint URL carrying the client-credentials parameters for `scope`.
	pub fn token_endpoint(&self, scope: Scope) -> Result<Url, ConfigError> {
		let mut url = join_relative(&self.base_url, TOKEN_PATH)?;

		url.query_pairs_mut()
			.append_pair("grant_type", "client_credentials")
			.append_pair("scope", scope.as_str());

		Ok(url)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("base_url", &self.base_url.as_str())
			.field("username", &self.username)
			.field("password", &self.password)
			.finish()
	}
}
impl TryFrom<RawCredentials> for Credentials {
	type Error = ConfigError;

	fn try_from(raw: RawCredentials) -> Result<Self, Self::Error> {
		Self::new(raw.base_url, raw.username, raw.password)
	}
}

#[derive(Deserialize)]
struct RawCredentials {
	base_url: String,
	username: String,
	password: String,
}

/// Resolves `path` against `base`, keeping the base path and any query carried by `path`.
pub(crate) fn join_relative(base: &Url, path: &str) -> Result<Url, ConfigError> {
	base.join(path.trim_start_matches('/'))
		.map_err(|source| ConfigError::InvalidBaseUrl { source })
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	match url.scheme() {
		"http" | "https" => {},
		other => return Err(ConfigError::UnsupportedScheme { scheme: other.to_owned() }),
	}

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}
