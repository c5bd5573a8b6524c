//! Permission scopes and the HTTP-method resolver that selects them.

// crates.io
use oauth2::http::Method;
// self
use crate::_prelude::*;

/// Error emitted when a textual scope is neither `read` nor `write`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown scope `{value}`; expected `read` or `write`.")]
pub struct ScopeParseError {
	/// The rejected input.
	pub value: String,
}

/// Permission class a client operates under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// Read-only access; selected by `GET`.
	Read,
	/// Mutating access; selected by `POST`, `PUT`, `PATCH`, and `DELETE`.
	Write,
}
impl Scope {
	/// Every scope, in declaration order.
	pub const ALL: [Scope; 2] = [Scope::Read, Scope::Write];

	/// Textual name sent as the `scope` parameter of the token request.
	pub const fn as_str(self) -> &'static str {
		match self {
			Scope::Read => "read",
			Scope::Write => "write",
		}
	}

	/// Maps an HTTP verb to the scope required to call it.
	///
	/// Matching is exact: HTTP methods are case-sensitive tokens, so `"get"` is rejected.
	pub fn for_method(method: &str) -> Result<Self> {
		match method {
			"GET" => Ok(Scope::Read),
			"POST" | "PUT" | "PATCH" | "DELETE" => Ok(Scope::Write),
			other => Err(Error::InvalidMethod { method: other.to_owned() }),
		}
	}

	pub(crate) const fn index(self) -> usize {
		match self {
			Scope::Read => 0,
			Scope::Write => 1,
		}
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Scope {
	type Err = ScopeParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"read" => Ok(Scope::Read),
			"write" => Ok(Scope::Write),
			other => Err(ScopeParseError { value: other.to_owned() }),
		}
	}
}
impl TryFrom<&Method> for Scope {
	type Error = Error;

	fn try_from(method: &Method) -> Result<Self, Self::Error> {
		Self::for_method(method.as_str())
	}
}

/// Resolves the scope required by an HTTP verb; see [`Scope::for_method`].
pub fn resolve(method: &str) -> Result<Scope> {
	Scope::for_method(method)
}
