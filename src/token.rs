//! Token material records, salt generation, and digest/verification primitives.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::Rng;
use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;
// self
use crate::{_prelude::*, session::SessionId};

/// Length of the random salt drawn for every material record.
pub const SALT_LEN: usize = 32;

// Characters that may look like other characters in common fonts are omitted.
const SALT_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Per-session token material.
///
/// One record is active per session at a time; [`TokenManager::generate`] fully replaces it on
/// every call. The encoded token is never stored - it is recomputed from this record whenever a
/// request needs to be checked.
///
/// [`TokenManager::generate`]: crate::manager::TokenManager::generate
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMaterial {
	/// Unix seconds at issuance, as reported by the request context.
	pub issued_at: i64,
	/// Random salt drawn from the restricted alphabet.
	pub salt: String,
	/// Session identifier at issuance time.
	pub session_id: SessionId,
	/// Client address at issuance time.
	pub remote_address: String,
}
impl TokenMaterial {
	/// Builds a fresh record with a newly drawn salt.
	pub fn issue(issued_at: i64, session_id: SessionId, remote_address: String) -> Self {
		Self { issued_at, salt: random_salt(), session_id, remote_address }
	}

	/// Encodes this record into the token handed to the client.
	///
	/// The token is the standard base64 of the hex digest, reproducing the wire shape of the
	/// original deployment this crate stays drop-in compatible with.
	pub fn token(&self) -> EncodedToken {
		EncodedToken(STANDARD.encode(self.digest()))
	}

	/// Checks a client-supplied candidate token against this record.
	///
	/// The candidate must base64-decode, and the decoded bytes must equal the freshly recomputed
	/// digest. The comparison is constant-time with respect to token content.
	pub fn verify(&self, candidate: &str) -> bool {
		let Ok(decoded) = STANDARD.decode(candidate) else {
			return false;
		};
		let digest = self.digest();

		if decoded.is_empty() || digest.is_empty() {
			return false;
		}

		decoded.ct_eq(digest.as_bytes()).into()
	}

	/// SHA-1 hex digest over the material fields in fixed order.
	fn digest(&self) -> String {
		let mut hasher = Sha1::new();

		hasher.update(self.issued_at.to_string().as_bytes());
		hasher.update(self.salt.as_bytes());
		hasher.update(self.session_id.as_bytes());
		hasher.update(self.remote_address.as_bytes());

		hasher.finalize().iter().map(|byte| format!("{byte:02x}")).collect()
	}
}
impl Debug for TokenMaterial {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenMaterial")
			.field("issued_at", &self.issued_at)
			.field("salt", &"<redacted>")
			.field("session_id", &self.session_id)
			.field("remote_address", &self.remote_address)
			.finish()
	}
}

/// Text-safe encoded token returned by [`TokenManager::generate`].
///
/// [`TokenManager::generate`]: crate::manager::TokenManager::generate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedToken(String);
impl EncodedToken {
	/// Returns the token text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
#[cfg(test)]
impl EncodedToken {
	pub(crate) fn from_raw(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}
impl AsRef<str> for EncodedToken {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<EncodedToken> for String {
	fn from(value: EncodedToken) -> Self {
		value.0
	}
}
impl Display for EncodedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn random_salt() -> String {
	let mut rng = rand::rng();

	(0..SALT_LEN)
		.map(|_| char::from(SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())]))
		.collect()
}
