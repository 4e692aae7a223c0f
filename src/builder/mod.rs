pub mod base;
pub mod query;

pub use base::BoolQuery;
pub use query::{BuilderOptions, QueryBuilder};
