use soroban_sdk::{Env, String};

/// Longest accepted identifier after trimming, in bytes.
pub const MAX_ID_LEN: usize = 32;

/// Width the trailing digit run is zero-padded to.
pub const PAD_WIDTH: usize = 4;

/// Largest canonical form: padding grows an identifier by at most
/// `PAD_WIDTH - 1` bytes.
pub const MAX_CANONICAL_LEN: usize = MAX_ID_LEN + PAD_WIDTH - 1;

const MAX_RAW_LEN: usize = 64;

/// Ways a raw identifier can fail canonicalization.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IdError {
    Empty,
    TooLong,
    InvalidChar,
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}

/// Canonicalize a user-entered account identifier.
///
/// Surrounding ASCII whitespace is trimmed and the identifier uppercased.
/// When the result is exactly a run of letters followed by a run of digits,
/// the digit run is left-padded with zeros to [`PAD_WIDTH`]:
/// `"p9"` -> `"P0009"`, `"P009"` -> `"P0009"`, `"P0042"` -> `"P0042"`.
/// Identifiers that do not decompose that way are returned uppercased and
/// otherwise unchanged. The function is idempotent.
///
/// Pure byte-level form with no environment dependency. `out` must hold at
/// least [`MAX_CANONICAL_LEN`] bytes; the canonical length is returned.
pub fn normalize_bytes(raw: &[u8], out: &mut [u8]) -> Result<usize, IdError> {
    let trimmed = trim_ascii(raw);
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(IdError::TooLong);
    }
    if !trimmed.iter().all(|b| b.is_ascii_alphanumeric()) {
        return Err(IdError::InvalidChar);
    }

    let prefix_len = trimmed
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    let digits_len = trimmed
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();

    let mut n = 0;
    // Pad only when the identifier is exactly letters-then-digits; anything
    // else passes through uppercased so no characters are dropped.
    if digits_len > 0 && prefix_len + digits_len == trimmed.len() {
        for &b in &trimmed[..prefix_len] {
            out[n] = b.to_ascii_uppercase();
            n += 1;
        }
        for _ in digits_len..PAD_WIDTH {
            out[n] = b'0';
            n += 1;
        }
        for &b in &trimmed[prefix_len..] {
            out[n] = b;
            n += 1;
        }
    } else {
        for &b in trimmed {
            out[n] = b.to_ascii_uppercase();
            n += 1;
        }
    }

    Ok(n)
}

/// Canonicalize a Soroban [`String`] identifier.
///
/// Thin wrapper over [`normalize_bytes`]; every entry point that accepts a
/// patient identifier as free text goes through this so the same patient
/// resolves to the same key regardless of how the identifier was typed.
pub fn normalize(env: &Env, raw: &String) -> Result<String, IdError> {
    let len = raw.len() as usize;
    if len == 0 {
        return Err(IdError::Empty);
    }
    if len > MAX_RAW_LEN {
        return Err(IdError::TooLong);
    }

    let mut buf = [0u8; MAX_RAW_LEN];
    raw.copy_into_slice(&mut buf[..len]);

    let mut out = [0u8; MAX_CANONICAL_LEN];
    let n = normalize_bytes(&buf[..len], &mut out)?;

    let canonical = core::str::from_utf8(&out[..n]).map_err(|_| IdError::InvalidChar)?;
    Ok(String::from_str(env, canonical))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// The byte-level tests have no Soroban environment dependency.

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::String as StdString;
    use std::vec::Vec as StdVec;

    use proptest::prelude::*;
    use soroban_sdk::Env;

    use super::*;

    fn canonical(raw: &[u8]) -> Result<StdVec<u8>, IdError> {
        let mut out = [0u8; MAX_CANONICAL_LEN];
        let n = normalize_bytes(raw, &mut out)?;
        Ok(out[..n].to_vec())
    }

    #[test]
    fn pads_trailing_digits_to_four() {
        assert_eq!(canonical(b"p9"), Ok(b"P0009".to_vec()));
        assert_eq!(canonical(b"P009"), Ok(b"P0009".to_vec()));
        assert_eq!(canonical(b"p0042"), Ok(b"P0042".to_vec()));
        assert_eq!(canonical(b"d1"), Ok(b"D0001".to_vec()));
    }

    #[test]
    fn longer_digit_runs_are_kept() {
        assert_eq!(canonical(b"p00009"), Ok(b"P00009".to_vec()));
        assert_eq!(canonical(b"p12345"), Ok(b"P12345".to_vec()));
    }

    #[test]
    fn no_trailing_digits_only_uppercases() {
        assert_eq!(canonical(b"admin"), Ok(b"ADMIN".to_vec()));
        assert_eq!(canonical(b"Px"), Ok(b"PX".to_vec()));
    }

    #[test]
    fn digits_only_are_padded() {
        assert_eq!(canonical(b"42"), Ok(b"0042".to_vec()));
        assert_eq!(canonical(b"0042"), Ok(b"0042".to_vec()));
    }

    #[test]
    fn mixed_forms_pass_through_uppercased() {
        // An interior digit run stops the letters-then-digits decomposition.
        assert_eq!(canonical(b"ab12c9"), Ok(b"AB12C9".to_vec()));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(canonical(b"  p9 "), Ok(b"P0009".to_vec()));
        assert_eq!(canonical(b"\tP0009\n"), Ok(b"P0009".to_vec()));
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert_eq!(canonical(b""), Err(IdError::Empty));
        assert_eq!(canonical(b"   "), Err(IdError::Empty));
        assert_eq!(canonical(b"p-9"), Err(IdError::InvalidChar));
        assert_eq!(canonical(b"p 9"), Err(IdError::InvalidChar));
        let long = [b'a'; MAX_ID_LEN + 1];
        assert_eq!(canonical(&long), Err(IdError::TooLong));
    }

    #[test]
    fn normalize_string_round_trip() {
        let env = Env::default();

        let canonical = normalize(&env, &String::from_str(&env, " p9 ")).unwrap();
        assert_eq!(canonical, String::from_str(&env, "P0009"));

        assert_eq!(
            normalize(&env, &String::from_str(&env, "")),
            Err(IdError::Empty)
        );
        assert_eq!(
            normalize(&env, &String::from_str(&env, "p_9")),
            Err(IdError::InvalidChar)
        );
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "[ \t]{0,2}[a-zA-Z]{0,6}[0-9]{0,6}[ \t]{0,2}") {
            if let Ok(once) = canonical(raw.as_bytes()) {
                let twice = canonical(&once).unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn normalization_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..80)) {
            let mut out = [0u8; MAX_CANONICAL_LEN];
            let _ = normalize_bytes(&raw, &mut out);
        }

        #[test]
        fn canonical_form_is_uppercase_alphanumeric(raw in "[a-zA-Z]{0,8}[0-9]{0,8}") {
            if let Ok(id) = canonical(raw.as_bytes()) {
                prop_assert!(id.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
                prop_assert!(StdString::from_utf8(id).is_ok());
            }
        }
    }
}
