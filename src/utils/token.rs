use rand::{rngs::OsRng, RngCore};

/// Opaque credential for a candidate link: `bytes` random bytes, hex encoded.
pub fn generate_access_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_hex_and_distinct() {
        let tokens: HashSet<String> = (0..256).map(|_| generate_access_token(16)).collect();
        assert_eq!(tokens.len(), 256);
        for t in &tokens {
            assert_eq!(t.len(), 32);
            assert!(t.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
