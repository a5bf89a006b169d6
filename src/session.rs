//! Session storage contracts plus the built-in in-memory store.

pub mod memory;

pub use memory::MemorySessionStore;

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, token::TokenMaterial};

/// Reserved per-session key under which the token material record is stored.
pub const MATERIAL_KEY: &str = "csrf";

const SESSION_ID_MAX_LEN: usize = 128;

/// Session-scoped key-value contract consumed by [`TokenManager`].
///
/// Implementations map onto whatever session subsystem the host application already runs; the
/// manager only ever reads and writes one opaque [`TokenMaterial`] record per session under
/// [`MATERIAL_KEY`]. Within a single session the store must provide read-after-write
/// consistency; racing writers on one session may resolve last-writer-wins.
///
/// [`TokenManager`]: crate::manager::TokenManager
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the currently active session id, if a session has been established.
	fn session_id(&self) -> Option<SessionId>;

	/// Fetches the material record stored for the session under `key`, if present.
	fn get(&self, session: &SessionId, key: &str) -> Result<Option<TokenMaterial>, StoreError>;

	/// Persists or replaces the material record for the session under `key`.
	fn set(&self, session: &SessionId, key: &str, material: TokenMaterial)
	-> Result<(), StoreError>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Validated session identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);
impl SessionId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, SessionIdError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for SessionId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SessionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for SessionId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<SessionId> for String {
	fn from(value: SessionId) -> Self {
		value.0
	}
}
impl TryFrom<String> for SessionId {
	type Error = SessionIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for SessionId {
	type Err = SessionIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for SessionId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Session({})", self.0)
	}
}
impl Display for SessionId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Error returned when session id validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum SessionIdError {
	/// The identifier was empty.
	#[error("Session identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Session identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Session identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

fn validate_view(view: &str) -> Result<(), SessionIdError> {
	if view.is_empty() {
		return Err(SessionIdError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(SessionIdError::ContainsWhitespace);
	}
	if view.len() > SESSION_ID_MAX_LEN {
		return Err(SessionIdError::TooLong { max: SESSION_ID_MAX_LEN });
	}

	Ok(())
}
