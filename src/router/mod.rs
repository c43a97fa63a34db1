#![deny(missing_docs)]

//! # Route Resolution
//!
//! - **service**: per-specification operation lookup and body upcasting.
//! - **multi**: priority-ordered resolution across overlapping specifications.

pub mod multi;
pub mod service;

pub use multi::MultiService;
pub use service::ServiceIndex;
