//! Referral code generation

use rand::rngs::OsRng;
use rand::Rng;

/// Prefix applied to every referral code
pub const REFERRAL_PREFIX: &str = "CHESS-";

/// Number of random characters after the prefix
pub const REFERRAL_SUFFIX_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a referral code of the shape `CHESS-XXXXXX`
///
/// X is drawn from the uppercase alphanumeric alphabet. Collisions are not
/// impossible in a 36^6 space, so callers check uniqueness against the user
/// store and regenerate on a hit.
pub fn generate_referral_code() -> String {
    let mut rng = OsRng;
    let suffix: String = (0..REFERRAL_SUFFIX_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", REFERRAL_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use c2e_shared::utils::validation::is_valid_referral_code;

    #[test]
    fn test_referral_code_shape() {
        for _ in 0..100 {
            let code = generate_referral_code();
            assert!(is_valid_referral_code(&code), "bad code: {}", code);
        }
    }

    #[test]
    fn test_referral_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_referral_code()).collect();
        assert!(codes.len() > 1);
    }
}
