pub mod aggs;
pub mod boolean;
pub mod clause;
pub mod filtered;

pub use aggs::AggMap;
pub use boolean::{Descriptor, bucket_by_kind, prepare_bool_query};
pub use clause::{Agg, Clause, Operand};
pub use filtered::filtered_aggregation;
