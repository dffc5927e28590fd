use soroban_sdk::String;

use crate::ContractError;

const MAX_MESSAGE_LEN: u32 = 256;

/// Validate the doctor's request note.
/// The note is optional (empty is fine) but bounded and printable ASCII.
pub fn validate_message(message: &String) -> Result<(), ContractError> {
    let len = message.len();
    if len > MAX_MESSAGE_LEN {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_MESSAGE_LEN as usize];
    message.copy_into_slice(&mut buf[..len as usize]);

    // Printable ASCII only (space ' ' to tilde '~').
    for &b in &buf[..len as usize] {
        if !(32..=126).contains(&b) {
            return Err(ContractError::InvalidInput);
        }
    }

    Ok(())
}
