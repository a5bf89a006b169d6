//! Synchronizer-token CSRF protection - session-bound token material, timed validation, and
//! constant-time verification in one embeddable crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod manager;
pub mod markup;
pub mod request;
pub mod session;
pub mod token;

pub use manager::{DEFAULT_TIMEOUT_SECS, TokenManager};
pub use request::{ParamSource, RequestContext, StaticRequest, TOKEN_PARAM};
pub use session::{MATERIAL_KEY, MemorySessionStore, SessionId, SessionStore};
pub use token::EncodedToken;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;

	pub use crate::error::{Error, Result};
}
