//! Descriptor payloads and the single-fragment compiler.
//!
//! A [`Clause`] or [`Agg`] captures one registration call: the operation
//! name, an operand, extra options, and an optionally compiled sub-builder
//! result. Fragments are compiled eagerly when a descriptor is pushed, so
//! every later assembly stage is a pure projection over finished JSON.

use serde_json::{Map, Value};

use crate::builder::BoolQuery;

/// Operand of a clause or aggregation.
///
/// The three interpretations are mutually exclusive and each maps to its own
/// body-construction rule.
#[derive(Debug, Clone, Default)]
pub enum Operand {
    /// No operand; the body is the options alone.
    #[default]
    None,
    /// A field name, optionally paired with a value.
    Field {
        name: String,
        value: Option<Value>,
    },
    /// A fully-formed object used verbatim as the body.
    Object(Map<String, Value>),
}

impl Operand {
    /// Field name this operand resolves to, used for aggregation naming and
    /// filtered-aggregation self-exclusion. Object operands resolve through
    /// their `field` property, then `path`.
    pub(crate) fn field_name(&self) -> Option<String> {
        match self {
            Operand::None => None,
            Operand::Field { name, .. } => Some(name.clone()),
            Operand::Object(map) => map
                .get("field")
                .or_else(|| map.get("path"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Compile the operand into a body, merging `options` on top.
    ///
    /// Options win on overlapping keys. Rules, in order: an object operand
    /// *is* the body; a field with a value becomes `{ field: value }`; a
    /// field alone becomes `{ "field": name }` (the type-only clause and
    /// aggregation-on-field shape); no operand degrades to the options
    /// alone, possibly empty. Nothing fails at this layer.
    fn body(&self, options: &Map<String, Value>) -> Map<String, Value> {
        let mut body = match self {
            Operand::None => Map::new(),
            Operand::Field {
                name,
                value: Some(value),
            } => {
                let mut map = Map::new();
                map.insert(name.clone(), value.clone());
                map
            }
            Operand::Field { name, value: None } => {
                let mut map = Map::new();
                map.insert("field".to_string(), Value::String(name.clone()));
                map
            }
            Operand::Object(map) => map.clone(),
        };
        for (key, value) in options {
            body.insert(key.clone(), value.clone());
        }
        body
    }
}

/// One boolean-clause registration, assembled explicitly at the call site.
#[derive(Debug, Clone, Default)]
pub struct Clause {
    op: Option<String>,
    operand: Operand,
    options: Map<String, Value>,
    subquery: Option<Value>,
}

impl Clause {
    /// Clause for the given operation (`match`, `range`, `nested`, ...).
    pub fn new(op: impl Into<String>) -> Self {
        Clause {
            op: Some(op.into()),
            ..Clause::default()
        }
    }

    /// Clause with no operation of its own; its fragment is the compiled
    /// sub-query, unwrapped.
    pub fn compound() -> Self {
        Clause::default()
    }

    /// Target field name.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.operand = Operand::Field {
            name: name.into(),
            value: None,
        };
        self
    }

    /// Value for the target field; only meaningful after [`Clause::field`].
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        if let Operand::Field { value: slot, .. } = &mut self.operand {
            *slot = Some(value.into());
        }
        self
    }

    /// Use a fully-formed object as the operand, replacing any field/value.
    /// Non-object input is ignored.
    pub fn object(mut self, operand: Value) -> Self {
        if let Value::Object(map) = operand {
            self.operand = Operand::Object(map);
        }
        self
    }

    /// Extra options merged on top of the computed body (boost, fuzziness,
    /// ...); options win on overlapping keys.
    pub fn options(mut self, options: Value) -> Self {
        if let Value::Object(map) = options {
            self.options.extend(map);
        }
        self
    }

    /// Populate a nested sub-query with a fresh sub-builder. The compiled
    /// result merges into the fragment under `query`; the sub-builder shares
    /// no state with the parent.
    pub fn subquery(mut self, nest: impl FnOnce(BoolQuery) -> BoolQuery) -> Self {
        self.subquery = Some(nest(BoolQuery::new()).build());
        self
    }

    pub(crate) fn field_name(&self) -> Option<String> {
        self.operand.field_name()
    }

    /// Compile this clause into its query fragment.
    pub(crate) fn compile(&self) -> Value {
        let Some(op) = &self.op else {
            // A clause that exists solely to introduce a sub-query is the
            // sub-query itself, with no extra wrapping.
            return self
                .subquery
                .clone()
                .unwrap_or_else(|| Value::Object(Map::new()));
        };
        let mut body = self.operand.body(&self.options);
        if let Some(sub) = &self.subquery {
            body.insert("query".to_string(), sub.clone());
        }
        let mut fragment = Map::new();
        fragment.insert(op.clone(), Value::Object(body));
        Value::Object(fragment)
    }
}

/// One aggregation registration.
#[derive(Debug, Clone)]
pub struct Agg {
    op: String,
    operand: Operand,
    options: Map<String, Value>,
    sub: Option<Value>,
}

impl Agg {
    /// Aggregation of the given operation (`terms`, `avg`, `nested`, ...).
    pub fn new(op: impl Into<String>) -> Self {
        Agg {
            op: op.into(),
            operand: Operand::None,
            options: Map::new(),
            sub: None,
        }
    }

    /// Field to aggregate on.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.operand = Operand::Field {
            name: name.into(),
            value: None,
        };
        self
    }

    /// Fully-formed aggregation body (e.g. `{ "path": "locations" }`).
    /// Non-object input is ignored.
    pub fn object(mut self, operand: Value) -> Self {
        if let Value::Object(map) = operand {
            self.operand = Operand::Object(map);
        }
        self
    }

    /// Extra options merged on top of the computed body.
    pub fn options(mut self, options: Value) -> Self {
        if let Value::Object(map) = options {
            self.options.extend(map);
        }
        self
    }

    /// Populate nested sub-aggregations with a fresh sub-builder; the
    /// snapshot merges into the node under `aggs`.
    pub fn subaggs(mut self, nest: impl FnOnce(BoolQuery) -> BoolQuery) -> Self {
        self.sub = Some(nest(BoolQuery::new()).build_aggs());
        self
    }

    /// Output name for this aggregation: the field name itself, the object
    /// operand's `field`/`path` property, or a synthesized `agg_<op>`
    /// fallback. A missing name is not an error.
    pub fn name(&self) -> String {
        self.operand
            .field_name()
            .unwrap_or_else(|| format!("agg_{}", self.op))
    }

    /// Compile into an aggregation node `{ op: body }`, with non-empty
    /// sub-aggregations added under `aggs`.
    pub(crate) fn compile(&self) -> Value {
        let mut node = Map::new();
        node.insert(
            self.op.clone(),
            Value::Object(self.operand.body(&self.options)),
        );
        if let Some(sub) = &self.sub {
            if sub.as_object().is_some_and(|aggs| !aggs.is_empty()) {
                node.insert("aggs".to_string(), sub.clone());
            }
        }
        Value::Object(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_and_value_body() {
        let fragment = Clause::new("match").field("stans_dad").value("randy").compile();
        assert_eq!(fragment, json!({ "match": { "stans_dad": "randy" } }));
    }

    #[test]
    fn test_object_operand_is_the_body() {
        let fragment = Clause::new("nested")
            .object(json!({ "path": "locations", "score_mode": "avg" }))
            .compile();
        assert_eq!(
            fragment,
            json!({ "nested": { "path": "locations", "score_mode": "avg" } })
        );
    }

    #[test]
    fn test_options_win_on_conflicts() {
        let fragment = Clause::new("match")
            .object(json!({ "boost": 1.0 }))
            .options(json!({ "boost": 2.4, "fuzziness": "auto" }))
            .compile();
        assert_eq!(
            fragment,
            json!({ "match": { "boost": 2.4, "fuzziness": "auto" } })
        );
    }

    #[test]
    fn test_field_alone_becomes_field_property() {
        let fragment = Clause::new("exists").field("user").compile();
        assert_eq!(fragment, json!({ "exists": { "field": "user" } }));
    }

    #[test]
    fn test_no_operand_degrades_to_options() {
        assert_eq!(Clause::new("match_all").compile(), json!({ "match_all": {} }));
        let fragment = Clause::new("match_all").options(json!({ "boost": 2.4 })).compile();
        assert_eq!(fragment, json!({ "match_all": { "boost": 2.4 } }));
    }

    #[test]
    fn test_value_without_field_is_ignored() {
        let fragment = Clause::new("match").value("orphan").compile();
        assert_eq!(fragment, json!({ "match": {} }));
    }

    #[test]
    fn test_subquery_merges_additively() {
        let fragment = Clause::new("nested")
            .object(json!({ "path": "locations" }))
            .subquery(|b| b.must("match", "locations.city", "South Park"))
            .compile();
        assert_eq!(
            fragment,
            json!({
                "nested": {
                    "path": "locations",
                    "query": { "match": { "locations.city": "South Park" } }
                }
            })
        );
    }

    #[test]
    fn test_compound_clause_is_the_subquery() {
        let fragment = Clause::compound()
            .subquery(|b| {
                b.should("match", "preference_1", "Apples")
                    .should("match", "preference_2", "Bananas")
            })
            .compile();
        assert_eq!(
            fragment,
            json!({
                "bool": {
                    "should": [
                        { "match": { "preference_1": "Apples" } },
                        { "match": { "preference_2": "Bananas" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_agg_names() {
        assert_eq!(Agg::new("terms").field("hanky").name(), "hanky");
        assert_eq!(
            Agg::new("terms").object(json!({ "field": "the_christmas_poo" })).name(),
            "the_christmas_poo"
        );
        assert_eq!(
            Agg::new("nested").object(json!({ "path": "imagination_land" })).name(),
            "imagination_land"
        );
        assert_eq!(Agg::new("max").object(json!({})).name(), "agg_max");
        assert_eq!(Agg::new("max").name(), "agg_max");
    }

    #[test]
    fn test_agg_node_on_field() {
        let node = Agg::new("avg").field("count").compile();
        assert_eq!(node, json!({ "avg": { "field": "count" } }));
    }

    #[test]
    fn test_agg_node_with_subaggs() {
        let node = Agg::new("nested")
            .object(json!({ "path": "locations" }))
            .subaggs(|b| b.aggs("terms", "locations.city"))
            .compile();
        assert_eq!(
            node,
            json!({
                "nested": { "path": "locations" },
                "aggs": {
                    "locations.city": { "terms": { "field": "locations.city" } }
                }
            })
        );
    }

    #[test]
    fn test_agg_empty_subaggs_are_dropped() {
        let node = Agg::new("nested")
            .object(json!({ "path": "locations" }))
            .subaggs(|b| b)
            .compile();
        assert_eq!(node, json!({ "nested": { "path": "locations" } }));
    }
}
