use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::CodecError;

/// Base64-encode the UTF-8 bytes of `text` (standard alphabet, padded).
pub fn encode_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode standard base64 back into a UTF-8 string.
pub fn decode_base64(encoded: &str) -> Result<String, CodecError> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}
