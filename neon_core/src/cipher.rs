//! XOR obfuscation.
//!
//! **This is not encryption.** A repeating static key XORed over the input
//! hides text from a casual glance and nothing more; anyone holding one
//! plaintext/ciphertext pair recovers the key. Do not use it to protect data.

use crate::error::MatrixError;

/// XORs `data` against `key`, repeating the key as needed.
///
/// Applying it twice with the same key returns the original bytes. An empty
/// key leaves the data unchanged.
pub fn xor_with_key(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }

    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect()
}

/// XORs the UTF-8 bytes of `text` and returns them as lowercase hex.
pub fn obfuscate(text: &str, key: &str) -> String {
    hex::encode(xor_with_key(text.as_bytes(), key.as_bytes()))
}

/// Inverse of [`obfuscate`].
pub fn reveal(encoded: &str, key: &str) -> Result<String, MatrixError> {
    let bytes = hex::decode(encoded)?;
    let plain = xor_with_key(&bytes, key.as_bytes());
    Ok(String::from_utf8(plain)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        // 'a' ^ 'c' = 0x02, 'b' ^ 'y' = 0x1b
        assert_eq!(obfuscate("ab", "cy"), "021b");
    }

    #[test]
    fn test_key_repeats() {
        let out = xor_with_key(&[0u8; 5], b"ab");
        assert_eq!(out, b"ababa".to_vec());
    }

    #[test]
    fn test_empty_key_is_identity() {
        assert_eq!(xor_with_key(b"neon", b""), b"neon".to_vec());
    }

    #[test]
    fn test_reveal_rejects_bad_hex() {
        assert!(matches!(
            reveal("zz", "cyberpunk2077"),
            Err(MatrixError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_reveal_rejects_non_utf8() {
        // 0xff ^ 'c' is not a valid UTF-8 start byte once decoded
        let encoded = hex::encode(xor_with_key(&[0xff], b"c"));
        assert!(matches!(
            reveal(&encoded, "c"),
            Err(MatrixError::InvalidUtf8(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_xor_is_involution(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let key = b"cyberpunk2077";
            let twice = xor_with_key(&xor_with_key(&data, key), key);
            prop_assert_eq!(twice, data);
        }

        #[test]
        fn prop_reveal_inverts_obfuscate(text in ".*") {
            let encoded = obfuscate(&text, "cyberpunk2077");
            prop_assert_eq!(reveal(&encoded, "cyberpunk2077").unwrap(), text);
        }
    }
}
