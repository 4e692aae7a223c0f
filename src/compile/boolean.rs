//! Assembly of compiled descriptors into a `bool` container.

use serde_json::{Map, Value};

use crate::ops::ClauseKind;

/// Compiled form of one clause registration: its boolean role, the derived
/// field name when one exists, and the finished query fragment.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub kind: ClauseKind,
    pub field: Option<String>,
    pub fragment: Value,
}

/// Group fragments by clause kind, preserving arrival order.
///
/// A kind with a single fragment contributes the fragment directly, never a
/// one-element array; two or more contribute the ordered array. Kinds with
/// no fragments are omitted.
pub fn bucket_by_kind(descriptors: &[Descriptor]) -> Map<String, Value> {
    let mut container = Map::new();
    for kind in ClauseKind::ALL {
        let mut fragments: Vec<Value> = descriptors
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.fragment.clone())
            .collect();
        match fragments.len() {
            0 => {}
            1 => {
                container.insert(kind.as_str().to_string(), fragments.remove(0));
            }
            _ => {
                container.insert(kind.as_str().to_string(), Value::Array(fragments));
            }
        }
    }
    container
}

/// Assemble descriptors into a boolean query document.
///
/// When exactly one descriptor exists, its kind is MUST, and every other
/// kind is empty, the bare fragment is returned with no `bool` envelope;
/// simple single-condition queries stay flat.
pub fn prepare_bool_query(descriptors: &[Descriptor]) -> Value {
    if descriptors.len() == 1 && descriptors[0].kind == ClauseKind::Must {
        return descriptors[0].fragment.clone();
    }
    let mut query = Map::new();
    query.insert(
        "bool".to_string(),
        Value::Object(bucket_by_kind(descriptors)),
    );
    Value::Object(query)
}
