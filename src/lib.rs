#![deny(missing_docs)]

//! # apispec-validation
//!
//! Validates loosely-typed JSON payloads against the typed schemas of a
//! service specification, coercing values into the exact shapes the schema
//! demands, and resolves which operation a method+path pair matches across
//! one or several overlapping specifications.
//!
//! Every component is immutable after construction and performs no I/O;
//! failures are returned as ordered lists of field-path-qualified messages,
//! never raised. Parsing of specification documents and HTTP transport are
//! collaborators, not part of this crate.
//!
//! ```
//! use apispec_validation::{
//!     Field, Method, MultiService, Operation, Registry, ServiceIndex,
//!     TypeDescriptor,
//! };
//! use serde_json::json;
//!
//! let registry = Registry::new(vec![TypeDescriptor::Model {
//!     name: "webhook_form".to_string(),
//!     fields: vec![
//!         Field::required("url", "string"),
//!         Field::required("events", "[string]"),
//!     ],
//! }])?;
//! let index = ServiceIndex::new(
//!     registry,
//!     vec![Operation::new(Method::Post, "/webhooks").with_body("webhook_form")],
//! );
//! let multi = MultiService::new(vec![index]);
//!
//! let normalized = multi.upcast(
//!     Method::Post,
//!     "/webhooks",
//!     &json!({"url": "https://example.org", "events": "*"}),
//! );
//! assert_eq!(
//!     normalized,
//!     Ok(json!({"url": "https://example.org", "events": ["*"]}))
//! );
//! # Ok::<(), apispec_validation::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// Specification data model and type registry.
pub mod spec;

/// The recursive type-coercion engine.
pub mod coerce;

/// Single- and multi-specification route resolution.
pub mod router;

pub use coerce::{TypeCoercer, ValidationResult};
pub use error::{AppError, AppResult};
pub use router::{MultiService, ServiceIndex};
pub use spec::{
    Field, Method, Operation, Parameter, ParameterLocation, PathTemplate, PrimitiveKind,
    Registry, ResolvedType, Response, ResponseCode, Segment, TypeDescriptor,
};
