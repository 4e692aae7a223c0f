//! # esqb - Elasticsearch Query Builder
//!
//! esqb compiles an ordered sequence of clause and aggregation descriptors
//! into a nested JSON document conforming to the Elasticsearch query DSL:
//! boolean clauses, nested sub-queries, and faceted aggregations.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`builder`] - Accumulation surface (`QueryBuilder`, `BoolQuery`)
//! - [`compile`] - Descriptor-to-document compilation engine
//! - [`ops`] - Clause kinds and operation-name constants
//! - [`utils`] - Dotted-path assignment
//!
//! ## Quick Start
//!
//! ```
//! use esqb::QueryBuilder;
//! use serde_json::json;
//!
//! let query = QueryBuilder::new()
//!     .must("match", "material", "cotton")
//!     .should("match", "color", "red")
//!     .raw("query.bool.boost", 1.2)
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(
//!     query["query"]["bool"]["must"],
//!     json!({ "match": { "material": "cotton" } })
//! );
//! assert_eq!(query["query"]["bool"]["boost"], json!(1.2));
//! ```
//!
//! ## Compilation model
//!
//! Registration calls compile their descriptor eagerly and append it to
//! builder-owned state; the `build*` methods are pure, repeatable
//! projections from that state to a finished `serde_json::Value`. A lone
//! must clause compiles to a bare fragment with no `bool` envelope, same-name
//! aggregations merge their sub-aggregation trees, and filtered aggregations
//! exclude each facet's own filter from its bucket computation.

pub mod builder;
pub mod compile;
pub mod error;
pub mod ops;
pub mod utils;

pub use builder::{BoolQuery, BuilderOptions, QueryBuilder};
pub use compile::{Agg, Clause};
pub use error::{Error, Result};
pub use ops::ClauseKind;
