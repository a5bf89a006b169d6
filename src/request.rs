//! Request-side contracts: what the manager needs to know about the incoming request.

// self
use crate::_prelude::*;

/// Name of the request parameter (and hidden form field) that carries the token.
pub const TOKEN_PARAM: &str = "csrf";

/// Which bag of request parameters a value is read from.
///
/// The verb policy works on parameter sources rather than the request line: a token that
/// arrived in the body is POST-like regardless of how the framework labels the verb, mirroring
/// the split between query-string and body parameters that every framework exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSource {
	/// GET-like source: the query string.
	Query,
	/// POST-like source: the request body / form data.
	Form,
}

/// View of the incoming request consumed by [`TokenManager`].
///
/// Implementations adapt whatever request object the host framework provides. The clock lives
/// here as well: freshness checks use the instant the request was received, not an instant the
/// library samples on its own.
///
/// [`TokenManager`]: crate::manager::TokenManager
pub trait RequestContext {
	/// Client address of the request.
	fn remote_address(&self) -> String;

	/// Unix seconds at which the request is being processed.
	fn current_time(&self) -> i64;

	/// Returns the named parameter from the given source, if present.
	fn param(&self, source: ParamSource, name: &str) -> Option<String>;
}

/// Owned, buildable [`RequestContext`] for glue code and deterministic tests.
#[derive(Clone, Debug, Default)]
pub struct StaticRequest {
	remote_address: String,
	current_time: i64,
	query: HashMap<String, String>,
	form: HashMap<String, String>,
}
impl StaticRequest {
	/// Creates a request view with the provided address and clock value.
	pub fn new(remote_address: impl Into<String>, current_time: i64) -> Self {
		Self { remote_address: remote_address.into(), current_time, ..Default::default() }
	}

	/// Overrides the clock value.
	pub fn at(mut self, current_time: i64) -> Self {
		self.current_time = current_time;

		self
	}

	/// Adds a query-string (GET-like) parameter.
	pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(name.into(), value.into());

		self
	}

	/// Adds a form-body (POST-like) parameter.
	pub fn with_form_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.form.insert(name.into(), value.into());

		self
	}
}
impl RequestContext for StaticRequest {
	fn remote_address(&self) -> String {
		self.remote_address.clone()
	}

	fn current_time(&self) -> i64 {
		self.current_time
	}

	fn param(&self, source: ParamSource, name: &str) -> Option<String> {
		let bag = match source {
			ParamSource::Query => &self.query,
			ParamSource::Form => &self.form,
		};

		bag.get(name).cloned()
	}
}
