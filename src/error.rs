//! Crate-level error types shared across the manager and session stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
///
/// Validation failures are deliberately NOT represented here; [`validate`] collapses every
/// rejection into a plain `false` so callers cannot turn the result into a failure oracle.
///
/// [`validate`]: crate::manager::TokenManager::validate
#[derive(Debug, ThisError)]
pub enum Error {
	/// No active session id was available.
	///
	/// Raised at construction time, and again by [`generate`] if the session disappears between
	/// construction and issuance. Callers must establish a session first.
	///
	/// [`generate`]: crate::manager::TokenManager::generate
	#[error("Could not find an active session id.")]
	NoSession,
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::session::StoreError,
	),
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::session::StoreError;
	use std::error::Error as StdError;

	#[test]
	fn store_error_converts_with_source() {
		let store_error = StoreError::Backend { message: "session backend unreachable".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert!(error.to_string().contains("session backend unreachable"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn no_session_message_is_stable() {
		assert_eq!(Error::NoSession.to_string(), "Could not find an active session id.");
	}
}
