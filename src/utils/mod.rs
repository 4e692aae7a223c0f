//! Shared utilities.
//!
//! ## Modules
//!
//! - [`path`] - dotted-path assignment into JSON object trees

pub mod path;

pub use path::assign_at_path;
