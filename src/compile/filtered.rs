//! Filtered ("global scope plus per-bucket filter") aggregation assembly,
//! used for accurate facet counts alongside active filters.

use serde_json::{Map, Value};

use super::boolean::{Descriptor, bucket_by_kind};

/// Wrap each aggregation subtree with a filter derived from every descriptor
/// except those targeting the aggregation's own field, so a facet never
/// filters out the very dimension it counts.
///
/// Per-name wrappers are collected under `container`, next to a fixed
/// `global: {}` marker that scopes the whole set to the unfiltered matches.
/// The per-bucket filter always carries a `bool` envelope, even for a single
/// remaining descriptor; the single-MUST simplification does not apply here.
pub fn filtered_aggregation(
    aggs: &Map<String, Value>,
    descriptors: &[Descriptor],
    container: &str,
) -> Value {
    let mut wrappers = Map::new();
    for (name, subtree) in aggs {
        let others: Vec<Descriptor> = descriptors
            .iter()
            .filter(|d| d.field.as_deref() != Some(name.as_str()))
            .cloned()
            .collect();

        let mut nested = Map::new();
        nested.insert(name.clone(), subtree.clone());

        let mut wrapper = Map::new();
        wrapper.insert(
            "filter".to_string(),
            Value::Object(Map::from_iter([(
                "bool".to_string(),
                Value::Object(bucket_by_kind(&others)),
            )])),
        );
        wrapper.insert("aggs".to_string(), Value::Object(nested));
        wrappers.insert(name.clone(), Value::Object(wrapper));
    }

    let mut scope = Map::new();
    scope.insert("global".to_string(), Value::Object(Map::new()));
    scope.insert("aggs".to_string(), Value::Object(wrappers));

    let mut doc = Map::new();
    doc.insert(container.to_string(), Value::Object(scope));
    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::ClauseKind;
    use serde_json::json;

    fn descriptor(kind: ClauseKind, field: &str, fragment: Value) -> Descriptor {
        Descriptor {
            kind,
            field: Some(field.to_string()),
            fragment,
        }
    }

    fn grade_facet() -> Map<String, Value> {
        Map::from_iter([(
            "grade".to_string(),
            json!({ "terms": { "field": "grade", "size": 20 } }),
        )])
    }

    #[test]
    fn test_excludes_own_dimension_from_filter() {
        let descriptors = vec![
            descriptor(
                ClauseKind::Must,
                "school",
                json!({ "match": { "school": "South Park Elementary" } }),
            ),
            descriptor(ClauseKind::Must, "grade", json!({ "match": { "grade": "4th" } })),
            descriptor(ClauseKind::Must, "enemy", json!({ "match": { "enemy": "Cartman" } })),
            descriptor(
                ClauseKind::Should,
                "gender",
                json!({ "match": { "gender": "female" } }),
            ),
        ];

        let result = filtered_aggregation(&grade_facet(), &descriptors, "south_park_aggs");
        assert_eq!(
            result,
            json!({
                "south_park_aggs": {
                    "global": {},
                    "aggs": {
                        "grade": {
                            "aggs": {
                                "grade": { "terms": { "field": "grade", "size": 20 } }
                            },
                            "filter": {
                                "bool": {
                                    "must": [
                                        { "match": { "school": "South Park Elementary" } },
                                        { "match": { "enemy": "Cartman" } }
                                    ],
                                    "should": { "match": { "gender": "female" } }
                                }
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_single_remaining_descriptor_keeps_bool_envelope() {
        let descriptors = vec![descriptor(
            ClauseKind::Should,
            "alias",
            json!({ "match": { "alias": "Professor Chaos" } }),
        )];

        let result = filtered_aggregation(&grade_facet(), &descriptors, "all");
        assert_eq!(
            result["all"]["aggs"]["grade"]["filter"],
            json!({
                "bool": {
                    "should": { "match": { "alias": "Professor Chaos" } }
                }
            })
        );
    }

    #[test]
    fn test_no_descriptors_yields_empty_bool() {
        let result = filtered_aggregation(&grade_facet(), &[], "all");
        assert_eq!(result["all"]["aggs"]["grade"]["filter"], json!({ "bool": {} }));
        assert_eq!(result["all"]["global"], json!({}));
    }
}
