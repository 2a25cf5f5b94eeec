//! Error type shared by the data loader and the clipboard bridge.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that surface to the user as a banner or notice.
#[derive(Debug, Error)]
pub enum Error {
	/// The coordinate service could not be reached or answered with a bad status.
	#[error("fetch failed: {0}")]
	Fetch(String),

	/// The response body was not the expected JSON array.
	#[error("could not decode response: {0}")]
	Decode(#[from] serde_json::Error),

	/// A record decoded but cannot be turned into a point.
	#[error("invalid record {index} ({name}): {reason}")]
	InvalidRecord {
		/// Position of the record in the response array.
		index: usize,
		/// Song name, for the log line.
		name: String,
		/// What was wrong with it.
		reason: String,
	},

	/// The browser refused or lacks the clipboard API.
	#[error("clipboard write failed: {0}")]
	Clipboard(String),
}

impl From<gloo_net::Error> for Error {
	fn from(err: gloo_net::Error) -> Self {
		Error::Fetch(err.to_string())
	}
}

/// Renders a rejected promise value as readable text.
pub fn js_error_text(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			js_sys::Reflect::get(value, &JsValue::from_str("message"))
				.ok()
				.and_then(|m| m.as_string())
		})
		.unwrap_or_else(|| format!("{value:?}"))
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_record_names_the_song() {
		let err = Error::InvalidRecord {
			index: 3,
			name: "Blue Train".into(),
			reason: "expected 3 coordinates, got 2".into(),
		};
		assert_eq!(
			err.to_string(),
			"invalid record 3 (Blue Train): expected 3 coordinates, got 2"
		);
	}

	#[test]
	fn decode_errors_convert() {
		let parse: std::result::Result<Vec<u8>, _> = serde_json::from_str("not json");
		let err: Error = parse.unwrap_err().into();
		assert!(matches!(err, Error::Decode(_)));
	}
}
