use blake3::Hasher;

/// Hex characters kept from the blake3 digest when labelling a snapshot.
pub const DIGEST_HEX_LEN: usize = 16;

pub fn hash_text(prefix: &str, text: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("{}_{}", prefix, &hex[..DIGEST_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_prefixed() {
        let a = hash_text("ss", "- heading \"Hello\"");
        let b = hash_text("ss", "- heading \"Hello\"");
        assert_eq!(a, b);
        assert!(a.starts_with("ss_"));
        assert_eq!(a.len(), 3 + DIGEST_HEX_LEN);
        assert_ne!(a, hash_text("ss", "- heading \"Bye\""));
    }
}
