use rand::{distributions::Uniform, Rng};

pub const REFERENCE_PREFIX: &str = "BK-";
pub const REFERENCE_LEN: usize = 12;
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a booking reference such as `BK-7Q2M0XK4ZP1D`.
///
/// Only the format is guaranteed here. Uniqueness is enforced by the unique
/// index on `booking_reference` and the retry loop in `BookingService::create`.
pub fn generate_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(Uniform::from(0..REFERENCE_ALPHABET.len()))
        .take(REFERENCE_LEN)
        .map(|idx| REFERENCE_ALPHABET[idx] as char)
        .collect();

    format!("{}{}", REFERENCE_PREFIX, suffix)
}

pub fn is_valid_reference(reference: &str) -> bool {
    match reference.strip_prefix(REFERENCE_PREFIX) {
        Some(suffix) => {
            suffix.len() == REFERENCE_LEN
                && suffix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_references_match_format() {
        for _ in 0..500 {
            let reference = generate_reference();
            assert_eq!(reference.len(), REFERENCE_PREFIX.len() + REFERENCE_LEN);
            assert!(is_valid_reference(&reference), "bad reference {}", reference);
        }
    }

    #[test]
    fn test_generated_references_are_distinct() {
        let refs: HashSet<String> = (0..1000).map(|_| generate_reference()).collect();
        assert_eq!(refs.len(), 1000);
    }

    #[test]
    fn test_reference_format_check() {
        assert!(is_valid_reference("BK-ABC123XYZ456"));
        assert!(!is_valid_reference("BK-abc123xyz456"));
        assert!(!is_valid_reference("BK-ABC123XYZ45"));
        assert!(!is_valid_reference("XX-ABC123XYZ456"));
        assert!(!is_valid_reference("BK-ABC123XYZ45!"));
    }
}
