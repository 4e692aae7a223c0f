//! Top-level document builder: pagination, sorting, raw overrides, and the
//! assembled query and aggregation bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::builder::BoolQuery;
use crate::compile::clause::{Agg, Clause};
use crate::compile::filtered::filtered_aggregation;
use crate::error::{Error, Result};
use crate::ops::{self, ClauseKind, DEFAULT_FROM, DEFAULT_SIZE};
use crate::utils::path::assign_segments;

/// Construction-time options for [`QueryBuilder`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Starting offset for pagination.
    pub from: u64,
    /// Page size.
    pub size: u64,
    /// Place the compiled bool body at `query.bool.filter` instead of
    /// `query` whenever any should clause exists, for query flavors where
    /// should clauses act as optional-but-scored filters rather than
    /// top-level matches. Off by default.
    pub should_in_filter: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        BuilderOptions {
            from: DEFAULT_FROM,
            size: DEFAULT_SIZE,
            should_in_filter: false,
        }
    }
}

/// Builder for a complete Elasticsearch query document.
///
/// Clauses, aggregations, sorts, and raw overrides accumulate append-only;
/// every build method is a pure projection, so building twice over the same
/// state yields deep-equal documents.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: BoolQuery,
    from: u64,
    size: u64,
    should_in_filter: bool,
    filtered: Map<String, Value>,
    sorts: Vec<Value>,
    raws: Vec<(String, Value)>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        QueryBuilder::with_options(BuilderOptions::default())
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder::default()
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        QueryBuilder {
            base: BoolQuery::new(),
            from: options.from,
            size: options.size,
            should_in_filter: options.should_in_filter,
            filtered: Map::new(),
            sorts: Vec::new(),
            raws: Vec::new(),
        }
    }

    /// Update the pagination offset; a `None` argument leaves it untouched.
    pub fn from(mut self, from: impl Into<Option<u64>>) -> Self {
        if let Some(from) = from.into() {
            self.from = from;
        }
        self
    }

    /// Update the page size; a `None` argument leaves it untouched.
    pub fn size(mut self, size: impl Into<Option<u64>>) -> Self {
        if let Some(size) = size.into() {
            self.size = size;
        }
        self
    }

    /// General clause registration on the underlying scope.
    pub fn clause(mut self, kind: ClauseKind, clause: Clause) -> Self {
        self.base = self.base.clause(kind, clause);
        self
    }

    /// Add a must clause on a field.
    pub fn must(mut self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.base = self.base.must(op, field, value);
        self
    }

    /// Add a should clause on a field.
    pub fn should(mut self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.base = self.base.should(op, field, value);
        self
    }

    /// Add a filter clause on a field.
    pub fn filter(mut self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.base = self.base.filter(op, field, value);
        self
    }

    /// Add a must_not clause on a field.
    pub fn must_not(mut self, op: &str, field: &str, value: impl Into<Value>) -> Self {
        self.base = self.base.must_not(op, field, value);
        self
    }

    /// Register an aggregation on a field.
    pub fn aggs(mut self, op: &str, field: &str) -> Self {
        self.base = self.base.aggs(op, field);
        self
    }

    /// Register an aggregation from a full [`Agg`] payload.
    pub fn agg(mut self, agg: Agg) -> Self {
        self.base = self.base.agg(agg);
        self
    }

    /// Register a filtered (facet) terms aggregation described by `options`
    /// (`field`, plus `size`/`include`/`exclude` as needed). The facet is
    /// keyed by the derived name of `options`, and its per-bucket filter is
    /// computed at build time from all other active clauses; use this for
    /// accurate facet counts alongside active filters.
    pub fn filtered_aggs(mut self, options: Value) -> Self {
        let facet = Agg::new(ops::TERMS).object(options);
        self.filtered.insert(facet.name(), facet.compile());
        self
    }

    /// Append a sort specification; `spec` may be an order string or an
    /// options object.
    pub fn sort(mut self, field: &str, spec: impl Into<Value>) -> Self {
        let mut entry = Map::new();
        entry.insert(field.to_string(), spec.into());
        self.sorts.push(Value::Object(entry));
        self
    }

    /// Queue a raw override applied verbatim at the dotted `path`, after
    /// everything computed, in call order. Fails fast on an empty path; any
    /// defined value is accepted, including `0`, `false`, `""`, and `null`.
    pub fn raw(mut self, path: &str, value: impl Into<Value>) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::InvalidRawParameter);
        }
        self.raws.push((path.to_string(), value.into()));
        Ok(self)
    }

    /// Compile the full document, collecting any filtered aggregations under
    /// the default `all` container.
    pub fn build(&self) -> Value {
        self.build_named("all")
    }

    /// Compile the full document, collecting filtered aggregations under
    /// `container`.
    pub fn build_named(&self, container: &str) -> Value {
        let mut doc = self.paged();

        let body = self.base.build();
        if self.should_in_filter && self.base.has_kind(ClauseKind::Should) {
            assign_segments(&mut doc, "query.bool.filter", body);
        } else {
            doc.insert("query".to_string(), body);
        }

        if !self.filtered.is_empty() {
            doc.insert(
                "aggs".to_string(),
                filtered_aggregation(&self.filtered, self.base.descriptors(), container),
            );
        } else if !self.base.agg_map().is_empty() {
            doc.insert("aggs".to_string(), self.base.build_aggs());
        }

        if !self.sorts.is_empty() {
            doc.insert("sort".to_string(), Value::Array(self.sorts.clone()));
        }

        self.apply_raws(doc)
    }

    /// Compile a document carrying only pagination, the plain aggregation
    /// snapshot, and raw overrides.
    pub fn build_aggregation(&self) -> Value {
        let mut doc = self.paged();
        doc.insert("aggs".to_string(), self.base.build_aggs());
        self.apply_raws(doc)
    }

    /// Compile a dis_max document from `options`, which must carry a
    /// `queries` array; everything else in `options` passes through
    /// unchanged.
    pub fn build_dis_max(&self, options: Value) -> Result<Value> {
        if !options.get("queries").is_some_and(Value::is_array) {
            return Err(Error::NotAnArray);
        }
        let mut doc = self.paged();
        assign_segments(&mut doc, "query.dis_max", options);
        Ok(self.apply_raws(doc))
    }

    /// Compile a multi_match document from `options`, which must carry a
    /// `query` value and a `fields` array; everything else in `options`
    /// passes through unchanged.
    pub fn build_multi_match(&self, options: Value) -> Result<Value> {
        if options.get("query").is_none() || !options.get("fields").is_some_and(Value::is_array) {
            return Err(Error::MissingRequiredField);
        }
        let mut doc = self.paged();
        assign_segments(&mut doc, "query.multi_match", options);
        Ok(self.apply_raws(doc))
    }

    fn paged(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        doc.insert("from".to_string(), Value::from(self.from));
        doc.insert("size".to_string(), Value::from(self.size));
        doc
    }

    fn apply_raws(&self, mut doc: Map<String, Value>) -> Value {
        // Paths were validated non-empty when queued.
        for (path, value) in &self.raws {
            assign_segments(&mut doc, path, value.clone());
        }
        Value::Object(doc)
    }
}
