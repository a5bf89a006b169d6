//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	session::{SessionId, SessionStore, StoreError},
	token::TokenMaterial,
};

type EntryMap = Arc<RwLock<HashMap<(SessionId, String), TokenMaterial>>>;

/// Thread-safe storage backend that keeps session entries in-process.
///
/// Real deployments adapt their own session subsystem; this store exists for demos and for
/// deterministic tests, including the no-session paths. The "current" session is whatever was
/// last passed to [`attach`](Self::attach).
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
	active: Arc<RwLock<Option<SessionId>>>,
	entries: EntryMap,
}
impl MemorySessionStore {
	/// Creates an empty store with no active session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks the provided session as the currently active one.
	pub fn attach(&self, session: SessionId) {
		*self.active.write() = Some(session);
	}

	/// Clears the active session; [`SessionStore::session_id`] returns `None` afterwards.
	///
	/// Stored entries are kept, matching a session cookie going missing while the backend still
	/// holds the session data.
	pub fn detach(&self) {
		*self.active.write() = None;
	}
}
impl SessionStore for MemorySessionStore {
	fn session_id(&self) -> Option<SessionId> {
		self.active.read().clone()
	}

	fn get(&self, session: &SessionId, key: &str) -> Result<Option<TokenMaterial>, StoreError> {
		Ok(self.entries.read().get(&(session.clone(), key.to_owned())).cloned())
	}

	fn set(
		&self,
		session: &SessionId,
		key: &str,
		material: TokenMaterial,
	) -> Result<(), StoreError> {
		self.entries.write().insert((session.clone(), key.to_owned()), material);

		Ok(())
	}
}
