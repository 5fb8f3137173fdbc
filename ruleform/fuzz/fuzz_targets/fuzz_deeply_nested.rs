#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleform::{Engine, Record};

fuzz_target!(|depth: u8| {
    let mut engine = Engine::new();

    let depth = depth as usize + 1;

    let mut expr = String::from("[x]");
    for _ in 0..depth {
        expr = format!("({} + 1)", expr);
    }

    // Past the nesting limit compilation must fail cleanly
    if engine.parse("nested", &expr).is_ok() {
        let mut record = Record::new();
        record.insert("x".to_string(), 1_i64.into());
        let _ = engine.execute("nested", &record);
    }
});
