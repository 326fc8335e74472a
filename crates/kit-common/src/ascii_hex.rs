//! ASCII hex conversion for Kit Protocol payloads.

pub use hex::FromHexError;

/// Encode bytes as uppercase ASCII hex, the form used on the wire.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode ASCII hex (either case) into bytes.
///
/// Odd-length input and non-hex characters are rejected rather than
/// truncated.
pub fn hex_decode(text: &[u8]) -> Result<Vec<u8>, FromHexError> {
    hex::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_case() {
        assert_eq!(hex_decode(b"aAbB").unwrap(), vec![0xAA, 0xBB]);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert_eq!(hex_decode(b"ABC"), Err(FromHexError::OddLength));
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert!(matches!(
            hex_decode(b"0G"),
            Err(FromHexError::InvalidHexCharacter { c: 'G', index: 1 })
        ));
    }

    #[test]
    fn test_encode_then_decode_is_identity_for_uppercase_hex() {
        for text in ["", "00", "0102030405", "DEADBEEF", "FF00FF00AA"] {
            let bytes = hex_decode(text.as_bytes()).unwrap();
            assert_eq!(hex_encode(&bytes), text);
        }
    }
}
