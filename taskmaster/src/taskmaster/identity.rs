//! Identity obscuring for storage addressing.
//!
//! Guild and user IDs never touch the disk in raw form; the store addresses
//! its directories and files by the SHA-256 digest of the ID instead, so the
//! owners of persisted task lists cannot be determined from the database.

use sha2::{Digest, Sha256};

/// Maps a raw Discord ID to an opaque, fixed-length token.
///
/// The mapping is deterministic, so the same ID always resolves to the same
/// storage location, and one-way, so the ID cannot be recovered from the token.
///
/// # Returns
///
/// The lowercase hex digest of the ID's decimal representation, 64 characters.
pub fn obscure(raw_id: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_id.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obscure_is_deterministic() {
        // Arrange
        let raw_id = 123456789;

        // Act
        let first = obscure(raw_id);
        let second = obscure(raw_id);

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_obscure_produces_fixed_length_hex() {
        // Act
        let token = obscure(987654321);

        // Assert
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(token, token.to_lowercase());
    }

    #[test]
    fn test_obscure_distinguishes_different_ids() {
        // Act
        let first = obscure(1);
        let second = obscure(2);

        // Assert
        assert_ne!(first, second);
    }

    #[test]
    fn test_obscure_distinguishes_adjacent_large_ids() {
        // Arrange: realistic Discord snowflakes differ in their low bits
        let snowflake = 175928847299117063;

        // Act
        let first = obscure(snowflake);
        let second = obscure(snowflake + 1);

        // Assert
        assert_ne!(first, second);
    }
}
