//! Hidden-field markup rendering for the encoded token.

// self
use crate::{request::TOKEN_PARAM, token::EncodedToken};

/// Renders the XHTML-compliant hidden input carrying the token.
///
/// The fragment shape is fixed for drop-in compatibility; the token value is attribute-escaped
/// before embedding.
pub fn hidden_field(token: &EncodedToken) -> String {
	format!(
		"<input type=\"hidden\" name=\"{TOKEN_PARAM}\" value=\"{}\" />",
		escape_attribute(token.as_str())
	)
}

fn escape_attribute(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());

	for ch in value.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(ch),
		}
	}

	escaped
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn fragment_shape_is_stable() {
		let token = EncodedToken::from_raw("abc123==");

		assert_eq!(
			hidden_field(&token),
			"<input type=\"hidden\" name=\"csrf\" value=\"abc123==\" />"
		);
	}

	#[test]
	fn attribute_values_are_escaped() {
		assert_eq!(escape_attribute("a&b"), "a&amp;b");
		assert_eq!(escape_attribute("\"><script>"), "&quot;&gt;&lt;script&gt;");
		assert_eq!(escape_attribute("it's"), "it&#39;s");
		assert_eq!(escape_attribute("abc123=="), "abc123==");
	}
}
