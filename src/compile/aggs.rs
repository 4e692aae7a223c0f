//! Name-keyed aggregation tree with merge-on-insert.

use serde_json::{Map, Value};

/// Accumulated aggregation nodes, keyed by derived output name.
///
/// The tree is append-only during the build phase; [`AggMap::snapshot`] is a
/// pure projection and never mutates the entries.
#[derive(Debug, Clone, Default)]
pub struct AggMap {
    entries: Map<String, Value>,
}

impl AggMap {
    pub fn new() -> Self {
        AggMap::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a compiled node under `name`.
    ///
    /// When an entry with the same name already exists and both sides carry
    /// a nested `aggs` object, the incoming sub-aggregations are unioned into
    /// the existing node's `aggs` (the first-registered sub-aggregation wins
    /// per key) and the existing node is otherwise untouched. In every other
    /// case the incoming node replaces or creates the entry. The asymmetry
    /// lets two independent registrations against the same nesting path
    /// compose instead of clobbering each other.
    pub fn insert(&mut self, name: &str, node: Value) {
        if let Some(existing) = self.entries.get_mut(name) {
            if let (Some(current), Some(incoming)) = (nested_aggs_mut(existing), nested_aggs(&node))
            {
                for (key, value) in incoming {
                    current.entry(key.clone()).or_insert_with(|| value.clone());
                }
                return;
            }
        }
        self.entries.insert(name.to_string(), node);
    }

    /// The accumulated mapping as a document fragment.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

fn nested_aggs(node: &Value) -> Option<&Map<String, Value>> {
    node.get("aggs")?.as_object()
}

fn nested_aggs_mut(node: &mut Value) -> Option<&mut Map<String, Value>> {
    node.get_mut("aggs")?.as_object_mut()
}
