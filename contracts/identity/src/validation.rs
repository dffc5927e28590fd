use soroban_sdk::String;

use crate::IdentityError;

const MIN_NAME_LEN: u32 = 2;
const MAX_NAME_LEN: u32 = 64;

/// Validate an account display name.
/// Names must be between MIN_NAME_LEN and MAX_NAME_LEN bytes of printable
/// ASCII.
pub fn validate_name(name: &String) -> Result<(), IdentityError> {
    let len = name.len();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(IdentityError::InvalidInput);
    }

    let mut buf = [0u8; MAX_NAME_LEN as usize];
    name.copy_into_slice(&mut buf[..len as usize]);

    // Printable ASCII only (space ' ' to tilde '~').
    for &b in &buf[..len as usize] {
        if !(32..=126).contains(&b) {
            return Err(IdentityError::InvalidInput);
        }
    }

    Ok(())
}
