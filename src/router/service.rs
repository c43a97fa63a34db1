#![deny(missing_docs)]

//! # Service Index
//!
//! Route lookup over a single specification: which operation a method+path
//! pair resolves to, what body type and parameters that operation declares,
//! and `upcast` — body validation through the type coercion engine.

use crate::coerce::{TypeCoercer, ValidationResult};
use crate::spec::operations::{Method, Operation, Parameter};
use crate::spec::registry::Registry;
use serde_json::Value as JsonValue;

/// One specification's registry plus its operations. Immutable after
/// construction; shared freely across concurrent callers.
#[derive(Debug, Clone)]
pub struct ServiceIndex {
    registry: Registry,
    operations: Vec<Operation>,
}

impl ServiceIndex {
    /// Creates an index. Path templates were tokenized when the operations
    /// were constructed; no further preparation is needed.
    pub fn new(registry: Registry, operations: Vec<Operation>) -> Self {
        Self {
            registry,
            operations,
        }
    }

    /// The type registry backing this specification.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Every declared operation, in declaration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    // Collected so the returned operations borrow only from `self`, not
    // from the request path.
    fn matching<'s>(&'s self, path: &str) -> impl Iterator<Item = &'s Operation> + 's {
        self.operations
            .iter()
            .filter(|op| op.path.matches(path))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Whether any operation's template matches the path, regardless of
    /// method.
    pub fn is_path_defined_at(&self, path: &str) -> bool {
        self.matching(path).next().is_some()
    }

    /// Whether an operation with this method matches the path.
    pub fn is_defined_at(&self, method: Method, path: &str) -> bool {
        self.matching(path).any(|op| op.method == method)
    }

    /// The operation serving `method` + `path`, if any. When a static and a
    /// templated route overlap within the specification, the static route
    /// wins; otherwise the first declared match does.
    pub fn find_operation(&self, method: Method, path: &str) -> Option<&Operation> {
        let mut first = None;
        for op in self.matching(path).filter(|op| op.method == method) {
            if op.path.is_static() {
                return Some(op);
            }
            first.get_or_insert(op);
        }
        first
    }

    /// Resolves `method` + `path` to an operation, or a routing error that
    /// distinguishes an unknown path from an unsupported method (listing
    /// the methods the path does support).
    pub fn validate(&self, method: Method, path: &str) -> Result<&Operation, String> {
        if let Some(op) = self.find_operation(method, path) {
            return Ok(op);
        }
        let mut available: Vec<&str> = Vec::new();
        for op in self.matching(path) {
            let name = op.method.as_str();
            if !available.contains(&name) {
                available.push(name);
            }
        }
        if available.is_empty() {
            Err(format!("HTTP path '{}' is not defined", path))
        } else {
            Err(format!(
                "HTTP method '{}' not defined for path '{}' - Available methods: {}",
                method,
                path,
                available.join(", ")
            ))
        }
    }

    /// The declared body type of the operation serving `method` + `path`.
    pub fn body_type_from_path(&self, method: Method, path: &str) -> Option<&str> {
        self.find_operation(method, path)
            .and_then(|op| op.body.as_deref())
    }

    /// The declared parameters of the operation serving `method` + `path`.
    pub fn parameters_from_path(&self, method: Method, path: &str) -> Option<&[Parameter]> {
        self.find_operation(method, path)
            .map(|op| op.parameters.as_slice())
    }

    /// Resolves the operation and coerces `value` against its declared body
    /// type, with the field path rooted at the type name. Operations with
    /// no body pass the value through unchanged; routing failures surface
    /// as a one-element error list.
    pub fn upcast(&self, method: Method, path: &str, value: &JsonValue) -> ValidationResult {
        let op = self
            .validate(method, path)
            .map_err(|message| vec![message])?;
        match &op.body {
            None => Ok(value.clone()),
            Some(body_type) => {
                TypeCoercer::new(&self.registry).coerce(body_type, value, body_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::operations::{ParameterLocation, Response};
    use crate::spec::types::{Field, TypeDescriptor};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn index() -> ServiceIndex {
        let registry = Registry::new(vec![TypeDescriptor::Model {
            name: "webhook_form".to_string(),
            fields: vec![
                Field::required("url", "string"),
                Field::required("events", "[string]"),
            ],
        }])
        .unwrap();
        ServiceIndex::new(
            registry,
            vec![
                Operation::new(Method::Get, "/:organization/webhooks").with_parameter(
                    Parameter {
                        name: "limit".to_string(),
                        typ: "integer".to_string(),
                        location: ParameterLocation::Query,
                        required: false,
                        default: Some(json!(25)),
                    },
                ),
                Operation::new(Method::Post, "/:organization/webhooks")
                    .with_body("webhook_form")
                    .with_response(Response::status(201, "webhook")),
                Operation::new(Method::Get, "/:organization/webhooks/:id"),
            ],
        )
    }

    #[test]
    fn defined_at_checks_method_and_path() {
        let index = index();
        assert!(index.is_path_defined_at("/flow/webhooks"));
        assert!(index.is_defined_at(Method::Post, "/flow/webhooks"));
        assert!(!index.is_defined_at(Method::Delete, "/flow/webhooks"));
        assert!(!index.is_path_defined_at("/flow/catalog/items"));
    }

    #[test]
    fn validate_distinguishes_path_from_method_errors() {
        let index = index();
        assert!(index.validate(Method::Get, "/flow/webhooks").is_ok());
        assert_eq!(
            index.validate(Method::Delete, "/flow/webhooks").unwrap_err(),
            "HTTP method 'DELETE' not defined for path '/flow/webhooks' - \
             Available methods: GET, POST"
        );
        assert_eq!(
            index.validate(Method::Get, "/flow").unwrap_err(),
            "HTTP path '/flow' is not defined"
        );
    }

    #[test]
    fn resolved_operation_outlives_the_path_borrow() {
        let index = index();
        let op = {
            let path = String::from("/flow/webhooks");
            index.find_operation(Method::Get, &path).unwrap()
        };
        assert_eq!(op.path.raw(), "/:organization/webhooks");
    }

    #[test]
    fn static_route_wins_within_one_specification() {
        let index = ServiceIndex::new(
            Registry::default(),
            vec![
                Operation::new(Method::Get, "/:organization/tokens"),
                Operation::new(Method::Get, "/users/tokens"),
            ],
        );
        let op = index.find_operation(Method::Get, "/users/tokens").unwrap();
        assert_eq!(op.path.raw(), "/users/tokens");
    }

    #[test]
    fn body_type_and_parameters_follow_the_operation() {
        let index = index();
        assert_eq!(
            index.body_type_from_path(Method::Post, "/flow/webhooks"),
            Some("webhook_form")
        );
        assert_eq!(index.body_type_from_path(Method::Get, "/flow/webhooks"), None);
        let params = index
            .parameters_from_path(Method::Get, "/flow/webhooks")
            .unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "limit");
        assert_eq!(params[0].location, ParameterLocation::Query);
        assert_eq!(index.parameters_from_path(Method::Post, "/nope"), None);
    }

    #[test]
    fn upcast_validates_the_body() {
        let index = index();
        assert_eq!(
            index.upcast(
                Method::Post,
                "/flow/webhooks",
                &json!({"url": "https://x", "events": "*"})
            ),
            Ok(json!({"url": "https://x", "events": ["*"]}))
        );
        assert_eq!(
            index.upcast(Method::Post, "/flow/webhooks", &json!({})),
            Err(vec![
                "Missing required fields for webhook_form: url, events".to_string()
            ])
        );
    }

    #[test]
    fn upcast_without_a_body_passes_through() {
        let index = index();
        assert_eq!(
            index.upcast(Method::Get, "/flow/webhooks", &json!({"any": 1})),
            Ok(json!({"any": 1}))
        );
    }

    #[test]
    fn upcast_surfaces_routing_errors() {
        let index = index();
        assert_eq!(
            index.upcast(Method::Post, "/nope", &json!({})),
            Err(vec!["HTTP path '/nope' is not defined".to_string()])
        );
    }
}
