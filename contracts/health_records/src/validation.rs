use soroban_sdk::String;

use crate::RecordsError;

const MIN_TITLE_LEN: u32 = 1;
const MAX_TITLE_LEN: u32 = 80;

const MIN_HASH_LEN: u32 = 32;
const MAX_HASH_LEN: u32 = 64;

/// Validate a record title: short, printable ASCII.
pub fn validate_title(title: &String) -> Result<(), RecordsError> {
    let len = title.len();
    if !(MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) {
        return Err(RecordsError::InvalidInput);
    }

    let mut buf = [0u8; MAX_TITLE_LEN as usize];
    title.copy_into_slice(&mut buf[..len as usize]);

    for &b in &buf[..len as usize] {
        if !(32..=126).contains(&b) {
            return Err(RecordsError::InvalidInput);
        }
    }

    Ok(())
}

/// Validate a record's content pointer.
/// Hashes (IPFS CID, SHA256 hex, etc.) must be of a reasonable length and
/// restricted to [A-Za-z0-9_-].
pub fn validate_data_hash(hash: &String) -> Result<(), RecordsError> {
    let len = hash.len();
    if !(MIN_HASH_LEN..=MAX_HASH_LEN).contains(&len) {
        return Err(RecordsError::InvalidInput);
    }

    let mut buf = [0u8; MAX_HASH_LEN as usize];
    hash.copy_into_slice(&mut buf[..len as usize]);

    for &b in &buf[..len as usize] {
        if !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
            return Err(RecordsError::InvalidInput);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_validate_title() {
        let env = Env::default();

        assert_eq!(
            validate_title(&String::from_str(&env, "Amoxicillin 500mg")),
            Ok(())
        );

        assert_eq!(
            validate_title(&String::from_str(&env, "")),
            Err(RecordsError::InvalidInput)
        );

        let long_title = "t".repeat(81);
        assert_eq!(
            validate_title(&String::from_str(&env, &long_title)),
            Err(RecordsError::InvalidInput)
        );

        assert_eq!(
            validate_title(&String::from_str(&env, "bad\ttitle")),
            Err(RecordsError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_data_hash() {
        let env = Env::default();

        let sha256_hex = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(
            validate_data_hash(&String::from_str(&env, sha256_hex)),
            Ok(())
        );

        let ipfs_cid = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
        assert_eq!(validate_data_hash(&String::from_str(&env, ipfs_cid)), Ok(()));

        assert_eq!(
            validate_data_hash(&String::from_str(&env, "short")),
            Err(RecordsError::InvalidInput)
        );

        let long_hash = "a".repeat(65);
        assert_eq!(
            validate_data_hash(&String::from_str(&env, &long_hash)),
            Err(RecordsError::InvalidInput)
        );

        assert_eq!(
            validate_data_hash(&String::from_str(
                &env,
                "e3b0c44298fc1c149afbf4c8996fb924 27ae41e4649b934ca495991b7852b85"
            )),
            Err(RecordsError::InvalidInput)
        );
    }
}
