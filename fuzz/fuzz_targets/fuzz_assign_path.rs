#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value, json};

fuzz_target!(|paths: Vec<&str>| {
    let mut root = Map::new();
    for (i, path) in paths.iter().enumerate() {
        let result = esqb::utils::assign_at_path(&mut root, path, json!(i));
        // Only the empty path may be rejected.
        assert_eq!(result.is_err(), path.is_empty());
    }
    // The tree must stay a valid JSON object.
    let _ = serde_json::to_string(&Value::Object(root)).unwrap();
});
