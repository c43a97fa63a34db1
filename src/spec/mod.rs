#![deny(missing_docs)]

//! # Specification Model
//!
//! - **types**: declared type descriptors (primitives, enums, models, unions).
//! - **path**: path-template tokenization and matching.
//! - **operations**: methods, parameters, responses, operations.
//! - **registry**: name-indexed type lookup shared by all validation calls.

pub mod operations;
pub mod path;
pub mod registry;
pub mod types;

pub use operations::{
    Method, Operation, Parameter, ParameterLocation, Response, ResponseCode,
};
pub use path::{PathTemplate, Segment};
pub use registry::{Registry, ResolvedType};
pub use types::{Field, PrimitiveKind, TypeDescriptor};
