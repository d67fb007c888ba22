//! Decoding of contents-API file payloads.
//!
//! The contents endpoint returns file bodies base64-encoded, wrapped with
//! newlines every 60 columns. Decoding strips the wrapping, then requires the
//! result to be valid UTF-8; binary files are reported as a distinct error
//! kind rather than corrupted text.

use base64::prelude::{BASE64_STANDARD, Engine as _};
use thiserror::Error;

/// Errors decoding a fetched file body.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The `content` field is not valid base64.
    #[error("file content is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not valid UTF-8 (binary file).
    #[error("decoded file content is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Decodes a base64 `content` field into UTF-8 text.
pub fn decode_content(encoded: &str) -> Result<String, ContentError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64_STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_base64() {
        // base64("function f(){}\n")
        let decoded = decode_content("ZnVuY3Rpb24gZigpe30K").unwrap();
        assert_eq!(decoded, "function f(){}\n");
    }

    #[test]
    fn tolerates_line_wrapped_base64() {
        let decoded = decode_content("ZnVuY3Rpb24g\nZigpe30K\n").unwrap();
        assert_eq!(decoded, "function f(){}\n");
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = decode_content("!!not base64!!");
        assert!(matches!(result, Err(ContentError::Base64(_))));
    }

    #[test]
    fn rejects_binary_content() {
        // base64 of [0xff, 0xfe], which is not valid UTF-8
        let encoded = BASE64_STANDARD.encode([0xffu8, 0xfe]);
        let result = decode_content(&encoded);
        assert!(matches!(result, Err(ContentError::NotUtf8(_))));
    }

    #[test]
    fn empty_input_decodes_to_empty_string() {
        assert_eq!(decode_content("").unwrap(), "");
    }
}
