#![no_main]

use libfuzzer_sys::fuzz_target;
use esqb::{ClauseKind, QueryBuilder};
use serde_json::json;

fuzz_target!(|input: Vec<(u8, &str, &str)>| {
    let mut builder = QueryBuilder::new();
    for (kind, field, value) in &input {
        let kind = ClauseKind::ALL[(*kind as usize) % ClauseKind::ALL.len()];
        builder = match kind {
            ClauseKind::Must => builder.must("match", field, *value),
            ClauseKind::Should => builder.should("match", field, *value),
            ClauseKind::Filter => builder.filter("match", field, *value),
            ClauseKind::MustNot => builder.must_not("match", field, *value),
        };
        builder = builder.filtered_aggs(json!({ "field": field }));
    }
    // Compilation is a pure projection; two builds must agree.
    assert_eq!(builder.build(), builder.build());
});
