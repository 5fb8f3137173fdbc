#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleform::{segment, OperatorTable};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut operators = OperatorTable::new();

        let _ = segment(s, &mut operators);
    }
});
