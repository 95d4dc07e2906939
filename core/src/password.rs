//! Salted one-way password hashing.
//!
//! Hashes are SHA-256 over `salt ‖ password`, iterated a fixed number of
//! times (work factor 2^10), with a 16-byte random salt. The encoded form
//! is self-describing (`v1$<rounds>$<salt>$<digest>`, URL-safe unpadded
//! base64 fields) so the work factor can change without invalidating
//! stored hashes.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Encoding version tag.
const VERSION: &str = "v1";

/// Fixed work factor: 2^10 digest iterations.
const ROUNDS: u32 = 1 << 10;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt.
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let digest = derive(&salt, password, ROUNDS);
    format!(
        "{VERSION}${ROUNDS}${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

/// Verify a password against an encoded hash.
///
/// Any malformed encoding verifies as `false`; callers never need to
/// distinguish "bad hash on disk" from "wrong password".
pub fn verify(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (version, rounds, salt, expected) = match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (Some(v), Some(r), Some(s), Some(d), None) => (v, r, s, d),
        _ => return false,
    };
    if version != VERSION {
        return false;
    }
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    let Ok(salt) = URL_SAFE_NO_PAD.decode(salt) else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(expected) else {
        return false;
    };

    let digest = derive(&salt, password, rounds);
    constant_time_eq(&digest, &expected)
}

/// Iterated SHA-256 over `salt ‖ password`.
fn derive(salt: &[u8], password: &str, rounds: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut digest: [u8; 32] = hasher.finalize().into();
    for _ in 1..rounds {
        digest = Sha256::digest(digest).into();
    }
    digest
}

/// Compare digests without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_with_same_password() {
        let encoded = hash("pw123");
        assert!(verify("pw123", &encoded));
    }

    #[test]
    fn hash_rejects_wrong_password() {
        let encoded = hash("pw123");
        assert!(!verify("pw124", &encoded));
        assert!(!verify("", &encoded));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash("pw123");
        let b = hash("pw123");
        assert_ne!(a, b);
        assert!(verify("pw123", &a));
        assert!(verify("pw123", &b));
    }

    #[test]
    fn encoded_form_is_versioned() {
        let encoded = hash("secret");
        assert!(encoded.starts_with("v1$1024$"));
        assert_eq!(encoded.split('$').count(), 4);
    }

    #[test]
    fn malformed_encodings_never_verify() {
        assert!(!verify("pw", ""));
        assert!(!verify("pw", "plaintext"));
        assert!(!verify("pw", "v1$notanumber$AAAA$BBBB"));
        assert!(!verify("pw", "v2$1024$AAAA$BBBB"));
        assert!(!verify("pw", "v1$1024$!!$!!"));
    }
}
