#![no_main]

use common::patient_id::{normalize_bytes, MAX_CANONICAL_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut out = [0u8; MAX_CANONICAL_LEN];
    if let Ok(n) = normalize_bytes(data, &mut out) {
        let canonical = out[..n].to_vec();

        // The canonical form must survive a second pass unchanged.
        let mut again = [0u8; MAX_CANONICAL_LEN];
        let m = normalize_bytes(&canonical, &mut again).expect("canonical form rejected");
        assert_eq!(&canonical[..], &again[..m]);

        assert!(canonical
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }
});
