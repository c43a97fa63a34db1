#![deny(missing_docs)]

//! # Multi-Service Resolver
//!
//! Route resolution across several, possibly overlapping specifications.
//! The service list is an explicit, priority-ordered configuration value
//! (earlier wins ties); independent resolvers with different specification
//! sets coexist freely.

use crate::coerce::ValidationResult;
use crate::router::service::ServiceIndex;
use crate::spec::operations::{Method, Operation, Parameter, Response};
use serde_json::Value as JsonValue;

/// A priority-ordered collection of service indexes.
#[derive(Debug, Clone, Default)]
pub struct MultiService {
    services: Vec<ServiceIndex>,
}

impl MultiService {
    /// Creates a resolver over services in priority order.
    pub fn new(services: Vec<ServiceIndex>) -> Self {
        Self { services }
    }

    /// The indexed services, in priority order.
    pub fn services(&self) -> &[ServiceIndex] {
        &self.services
    }

    /// Resolves the service owning `method` + `path`.
    ///
    /// When several services define the route, the first whose resolved
    /// operation has a fully static path wins: a literal route is a more
    /// specific, intentional match than a templated one, regardless of
    /// declaration order across specifications. With no static candidate
    /// the first matching service in priority order wins.
    pub fn resolve_service(&self, method: Method, path: &str) -> Result<&ServiceIndex, String> {
        let candidates: Vec<&ServiceIndex> = self
            .services
            .iter()
            .filter(|s| s.is_defined_at(method, path))
            .collect();

        if let Some(first) = candidates.first().copied() {
            let static_match = candidates.iter().copied().find(|s| {
                s.find_operation(method, path)
                    .is_some_and(|op| op.path.is_static())
            });
            return Ok(static_match.unwrap_or(first));
        }

        // No service supports the method. If some service knows the path,
        // let it phrase the method-not-supported error.
        if let Some(index) = self.services.iter().find(|s| s.is_path_defined_at(path)) {
            return match index.validate(method, path) {
                Err(message) => Err(message),
                // Unreachable: the index was excluded from candidates.
                Ok(_) => Err(format!("HTTP path '{}' is not defined", path)),
            };
        }
        Err(format!("HTTP path '{}' is not defined", path))
    }

    /// Resolves `method` + `path` to an operation across all services.
    pub fn validate(&self, method: Method, path: &str) -> Result<&Operation, String> {
        self.resolve_service(method, path)?.validate(method, path)
    }

    /// The declared body type of the resolved operation, if any.
    pub fn body_type_from_path(&self, method: Method, path: &str) -> Option<&str> {
        self.resolve_service(method, path)
            .ok()?
            .body_type_from_path(method, path)
    }

    /// The declared parameters of the resolved operation, if any.
    pub fn parameters_from_path(&self, method: Method, path: &str) -> Option<&[Parameter]> {
        self.resolve_service(method, path)
            .ok()?
            .parameters_from_path(method, path)
    }

    /// Validates and coerces a request body through the owning service.
    pub fn upcast(&self, method: Method, path: &str, value: &JsonValue) -> ValidationResult {
        self.resolve_service(method, path)
            .map_err(|message| vec![message])?
            .upcast(method, path, value)
    }

    /// The declared response covering `code` on a resolved operation.
    pub fn response<'op>(&self, operation: &'op Operation, code: u16) -> Option<&'op Response> {
        operation.response(code)
    }

    /// Like [`MultiService::response`], with the formatted routing error
    /// when nothing covers `code`.
    pub fn validate_response_code<'op>(
        &self,
        operation: &'op Operation,
        code: u16,
    ) -> Result<&'op Response, String> {
        operation.validate_response_code(code)
    }
}
