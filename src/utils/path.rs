//! Dotted-path assignment into JSON object trees.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Assign `value` at a dotted `path` inside `root`, creating intermediate
/// object nodes for every segment but the last.
///
/// The leaf is overwritten unconditionally, so falsy values (`0`, `false`,
/// `""`, `null`) land like any other; an existing non-object intermediate is
/// replaced by a fresh object. Fails only when `path` is empty.
pub fn assign_at_path(root: &mut Map<String, Value>, path: &str, value: Value) -> Result<()> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }
    assign_segments(root, path, value);
    Ok(())
}

/// Core walk, shared with build paths whose inputs were validated earlier.
pub(crate) fn assign_segments(root: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            root.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let node = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                assign_segments(map, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_path_rejected() {
        let mut root = Map::new();
        assert_eq!(
            assign_at_path(&mut root, "", json!(1)),
            Err(Error::EmptyPath)
        );
    }

    #[test]
    fn test_top_level_assignment() {
        let mut root = Map::new();
        assign_at_path(&mut root, "state", json!("Colorado")).unwrap();
        assert_eq!(root.get("state"), Some(&json!("Colorado")));
    }

    #[test]
    fn test_nested_assignment_into_existing_node() {
        let mut root = Map::new();
        root.insert("best".to_string(), json!({}));
        assign_at_path(&mut root, "best.chicken", json!("KFC")).unwrap();
        assert_eq!(Value::Object(root), json!({ "best": { "chicken": "KFC" } }));
    }

    #[test]
    fn test_creates_missing_intermediate_nodes() {
        let mut root = Map::new();
        assign_at_path(&mut root, "club.rivals", json!(["Bill", "Benedict"])).unwrap();
        assert_eq!(
            Value::Object(root),
            json!({ "club": { "rivals": ["Bill", "Benedict"] } })
        );
    }

    #[test]
    fn test_falsy_values_are_still_values() {
        let mut root = Map::new();
        assign_at_path(&mut root, "min_score", json!(0)).unwrap();
        assign_at_path(&mut root, "track_scores", json!(false)).unwrap();
        assert_eq!(root.get("min_score"), Some(&json!(0)));
        assert_eq!(root.get("track_scores"), Some(&json!(false)));
    }

    #[test]
    fn test_non_object_intermediate_is_replaced() {
        let mut root = Map::new();
        root.insert("query".to_string(), json!("scalar"));
        assign_at_path(&mut root, "query.boost", json!(1.2)).unwrap();
        assert_eq!(Value::Object(root), json!({ "query": { "boost": 1.2 } }));
    }

    #[test]
    fn test_leaf_overwrites_unconditionally() {
        let mut root = Map::new();
        assign_at_path(&mut root, "a.b", json!(1)).unwrap();
        assign_at_path(&mut root, "a.b", json!(2)).unwrap();
        assert_eq!(Value::Object(root), json!({ "a": { "b": 2 } }));
    }
}
