//! FNV-1a hash function for effect key lookups
//!
//! CommunityDragon stores effect values whose names were stripped from the
//! game files under a hashed alias such as `{59e94c40}`. The alias is the
//! 32-bit FNV-1a hash of the ASCII-lowercased name.

/// FNV-1a 32-bit offset basis
pub const FNV1A_OFFSET_BASIS: u32 = 0x811c9dc5;

/// FNV-1a 32-bit prime
pub const FNV1A_PRIME: u32 = 0x01000193;

/// Compute the lowercase FNV-1a 32-bit hash of a name
///
/// Only ASCII letters are folded; every other byte (whitespace included)
/// is hashed as-is.
///
/// # Example
///
/// ```
/// use tft_meta::fnv1a_hash;
///
/// assert_eq!(fnv1a_hash("MagicResist"), 0xb6f318ee);
/// ```
pub fn fnv1a_hash(name: &str) -> u32 {
    let mut hash = FNV1A_OFFSET_BASIS;
    for byte in name.bytes() {
        hash ^= byte.to_ascii_lowercase() as u32;
        hash = hash.wrapping_mul(FNV1A_PRIME);
    }
    hash
}

/// Format the hashed alias for a name: `{` + 8 lowercase hex digits + `}`
pub fn hashed_key(name: &str) -> String {
    format!("{{{:08x}}}", fnv1a_hash(name))
}

/// Check whether a key has the shape of a hashed alias
pub fn is_hashed_key(key: &str) -> bool {
    let Some(inner) = key.strip_prefix('{').and_then(|k| k.strip_suffix('}')) else {
        return false;
    };
    inner.len() == 8 && inner.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_empty() {
        assert_eq!(fnv1a_hash(""), FNV1A_OFFSET_BASIS);
    }

    #[test]
    fn test_fnv1a_known_values() {
        // Regression fixtures, must match externally hashed keys
        assert_eq!(fnv1a_hash("magicresist"), 0xb6f318ee);
        assert_eq!(fnv1a_hash("damage"), 0x59e94c40);
        assert_eq!(fnv1a_hash("shield"), 0x337519b0);
        assert_eq!(fnv1a_hash("abilitypower"), 0x7f1304b2);
        assert_eq!(fnv1a_hash("a"), 0xe40c292c);
    }

    #[test]
    fn test_fnv1a_case_insensitive() {
        for name in ["magicresist", "Damage", "ShieldAmount", "AP"] {
            assert_eq!(fnv1a_hash(name), fnv1a_hash(&name.to_uppercase()));
            assert_eq!(fnv1a_hash(name), fnv1a_hash(&name.to_lowercase()));
        }
    }

    #[test]
    fn test_fnv1a_whitespace_significant() {
        assert_ne!(fnv1a_hash("damage"), fnv1a_hash(" damage"));
        assert_eq!(fnv1a_hash(" damage"), 0x3924f94e);
    }

    #[test]
    fn test_hashed_key_format() {
        assert_eq!(hashed_key("Damage"), "{59e94c40}");
        assert_eq!(hashed_key(""), "{811c9dc5}");
    }

    #[test]
    fn test_is_hashed_key() {
        assert!(is_hashed_key("{59e94c40}"));
        assert!(is_hashed_key(&hashed_key("anything")));
        assert!(!is_hashed_key("{59E94C40}"));
        assert!(!is_hashed_key("{59e94c4}"));
        assert!(!is_hashed_key("59e94c40"));
        assert!(!is_hashed_key("Damage"));
    }
}
