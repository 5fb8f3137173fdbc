#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleform::{Engine, Record};

fuzz_target!(|data: (&str, &str)| {
    let (rule, field) = data;
    let mut engine = Engine::new();

    if engine.parse("fuzz", rule).is_ok() {
        let variables = engine.variables("fuzz").unwrap_or_default();
        let record: Record = variables
            .into_iter()
            .map(|name| (name, field.into()))
            .collect();
        let _ = engine.execute("fuzz", &record);
    }
});
