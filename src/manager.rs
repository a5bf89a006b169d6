//! Token lifecycle orchestration: issuance, hidden-field rendering, and validation policy.

// crates.io
use tracing::debug;
// self
use crate::{
	_prelude::*,
	markup,
	request::{ParamSource, RequestContext, TOKEN_PARAM},
	session::{MATERIAL_KEY, SessionStore},
	token::{EncodedToken, TokenMaterial},
};

/// Default freshness window in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 300;

/// Issues and validates session-bound anti-forgery tokens.
///
/// One manager serves one configured policy; it holds no per-request state and can be shared
/// across requests. All session state lives behind the injected [`SessionStore`].
pub struct TokenManager {
	store: Arc<dyn SessionStore>,
	timeout: i64,
	accept_get: bool,
}
impl TokenManager {
	/// Creates a manager with the default policy: 300-second timeout, POST-like sources only.
	///
	/// Fails with [`Error::NoSession`] when the store reports no active session; callers must
	/// establish a session before constructing a manager. The store is not written to here.
	pub fn new(store: Arc<dyn SessionStore>) -> Result<Self> {
		if store.session_id().is_none() {
			return Err(Error::NoSession);
		}

		Ok(Self { store, timeout: DEFAULT_TIMEOUT_SECS, accept_get: false })
	}

	/// Overrides the freshness window. Equality with the window counts as expired.
	pub fn with_timeout(mut self, seconds: i64) -> Self {
		self.timeout = seconds;

		self
	}

	/// Allows tokens submitted via the GET-like (query string) source.
	///
	/// POST-like submissions are always accepted; this only widens the policy. For multi-page
	/// flows prefer widening [`with_timeout`](Self::with_timeout) instead.
	pub fn with_accept_get(mut self, accept: bool) -> Self {
		self.accept_get = accept;

		self
	}

	/// Issues a fresh token for the current session.
	///
	/// Unconditionally replaces any material already stored for the session, so an earlier
	/// token stops validating the moment this returns. Calling this right before checking an
	/// in-flight request will therefore invalidate that request.
	pub fn generate(&self, request: &dyn RequestContext) -> Result<EncodedToken> {
		let session = self.store.session_id().ok_or(Error::NoSession)?;
		let material =
			TokenMaterial::issue(request.current_time(), session.clone(), request.remote_address());
		let token = material.token();

		self.store.set(&session, MATERIAL_KEY, material)?;

		debug!(session = %session, "Issued fresh token material.");

		Ok(token)
	}

	/// Issues a fresh token and renders it as a hidden form field.
	///
	/// Convenience wrapper over [`generate`](Self::generate); the markup shape is fixed, use
	/// `generate` directly for custom embedding.
	pub fn hidden_field(&self, request: &dyn RequestContext) -> Result<String> {
		Ok(markup::hidden_field(&self.generate(request)?))
	}

	/// Checks the incoming request for a valid token.
	///
	/// Returns `true` only when material exists for the current session, is fresh, a candidate
	/// token arrived through an accepted source, and the candidate matches the recomputed
	/// digest. Every rejection collapses to `false` so the result cannot be used as a failure
	/// oracle; the reasons are only visible as `tracing` debug events.
	///
	/// `timeout_override` replaces the configured window for this check, e.g. for long forms.
	///
	/// Successful validation does not consume the material: the same token keeps validating
	/// until it expires or is overwritten by the next [`generate`](Self::generate).
	pub fn validate(&self, request: &dyn RequestContext, timeout_override: Option<i64>) -> bool {
		let Some(session) = self.store.session_id() else {
			debug!("Rejected token: no active session id.");

			return false;
		};
		let material = match self.store.get(&session, MATERIAL_KEY) {
			Ok(Some(material)) => material,
			Ok(None) => {
				debug!(session = %session, "Rejected token: no material issued for the session.");

				return false;
			},
			Err(error) => {
				debug!(session = %session, %error, "Rejected token: session store read failed.");

				return false;
			},
		};
		let timeout = timeout_override.unwrap_or(self.timeout);

		if request.current_time() - material.issued_at >= timeout {
			debug!(session = %session, "Rejected token: material expired.");

			return false;
		}

		let Some(candidate) = self.candidate(request) else {
			debug!(session = %session, "Rejected token: no token in an accepted source.");

			return false;
		};

		if material.verify(&candidate) {
			true
		} else {
			debug!(session = %session, "Rejected token: digest mismatch.");

			false
		}
	}

	// POST-like source wins; the query string is consulted only when the form value is absent
	// and the policy allows GET-like submissions.
	fn candidate(&self, request: &dyn RequestContext) -> Option<String> {
		request.param(ParamSource::Form, TOKEN_PARAM).or_else(|| {
			if self.accept_get { request.param(ParamSource::Query, TOKEN_PARAM) } else { None }
		})
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("timeout", &self.timeout)
			.field("accept_get", &self.accept_get)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{request::StaticRequest, session::MemorySessionStore};

	fn manager_with_session() -> TokenManager {
		let store = MemorySessionStore::new();

		store.attach("sess-abc".parse().expect("Session id fixture should be valid."));

		TokenManager::new(Arc::new(store)).expect("Manager should build with an active session.")
	}

	#[test]
	fn form_source_wins_over_query() {
		let manager = manager_with_session().with_accept_get(true);
		let request = StaticRequest::new("203.0.113.7", 0)
			.with_form_param(TOKEN_PARAM, "from-form")
			.with_query_param(TOKEN_PARAM, "from-query");

		assert_eq!(manager.candidate(&request).as_deref(), Some("from-form"));
	}

	#[test]
	fn query_source_needs_the_policy() {
		let request =
			StaticRequest::new("203.0.113.7", 0).with_query_param(TOKEN_PARAM, "from-query");

		assert_eq!(manager_with_session().candidate(&request), None);
		assert_eq!(
			manager_with_session().with_accept_get(true).candidate(&request).as_deref(),
			Some("from-query")
		);
	}
}
