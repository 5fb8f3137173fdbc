mod json;

pub use json::{record_from_json, record_from_json_str, value_to_json};
