//! Clause and aggregation accumulation for one query scope.

use serde_json::{Map, Value};

use crate::compile::aggs::AggMap;
use crate::compile::boolean::{Descriptor, prepare_bool_query};
use crate::compile::clause::{Agg, Clause};
use crate::ops::ClauseKind;

/// Accumulates clause descriptors and aggregation nodes for one query scope.
///
/// This is also the sub-builder handed to nesting closures: each closure
/// receives a fresh instance, so no state is shared between parent and
/// child; the only communication channel is the closure's return value.
/// Registration is append-only and both build methods are pure projections
/// over the accumulated state, safe to call any number of times.
#[derive(Debug, Clone, Default)]
pub struct BoolQuery {
    descriptors: Vec<Descriptor>,
    aggs: AggMap,
}

impl BoolQuery {
    pub fn new() -> Self {
        BoolQuery::default()
    }

    /// General clause registration; the sugar methods below cover the
    /// common field/value shape.
    pub fn clause(mut self, kind: ClauseKind, clause: Clause) -> Self {
        self.descriptors.push(Descriptor {
            kind,
            field: clause.field_name(),
            fragment: clause.compile(),
        });
        self
    }

    /// Add a must clause on a field.
    pub fn must(self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.clause(ClauseKind::Must, Clause::new(op).field(field).value(value))
    }

    /// Add a should clause on a field.
    pub fn should(self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.clause(ClauseKind::Should, Clause::new(op).field(field).value(value))
    }

    /// Add a filter clause on a field.
    pub fn filter(self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.clause(ClauseKind::Filter, Clause::new(op).field(field).value(value))
    }

    /// Add a must_not clause on a field.
    pub fn must_not(self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.clause(ClauseKind::MustNot, Clause::new(op).field(field).value(value))
    }

    /// Register an aggregation on a field.
    pub fn aggs(self, op: &str, field: &str) -> Self {
        self.agg(Agg::new(op).field(field))
    }

    /// Register an aggregation from a full [`Agg`] payload.
    pub fn agg(mut self, agg: Agg) -> Self {
        self.aggs.insert(&agg.name(), agg.compile());
        self
    }

    /// Compile the accumulated clauses into a boolean query document, or an
    /// empty object when nothing was registered.
    pub fn build(&self) -> Value {
        if self.descriptors.is_empty() {
            return Value::Object(Map::new());
        }
        prepare_bool_query(&self.descriptors)
    }

    /// The aggregations accumulated so far.
    pub fn build_aggs(&self) -> Value {
        self.aggs.snapshot()
    }

    pub(crate) fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub(crate) fn agg_map(&self) -> &AggMap {
        &self.aggs
    }

    pub(crate) fn has_kind(&self, kind: ClauseKind) -> bool {
        self.descriptors.iter().any(|d| d.kind == kind)
    }
}
