#![deny(missing_docs)]

//! # Type Coercion Engine
//!
//! Recursive validation and coercion of loosely-typed JSON values against
//! declared types. Every call either produces a normalized value or an
//! ordered list of field-path-qualified messages; sibling failures never
//! stop the descent, so one pass reports every problem in the payload.
//!
//! - **primitives**: the scalar coercion matrix.
//! - **booleans**: the shared true/false literal sets.

pub mod booleans;
mod primitives;

use crate::spec::registry::{Registry, ResolvedType};
use crate::spec::types::{Field, TypeDescriptor};
use primitives::{coerce_primitive, type_mismatch};
use serde_json::{Map, Value as JsonValue};

/// Normalized JSON on success, ordered error messages on failure.
pub type ValidationResult = Result<JsonValue, Vec<String>>;

/// Validates and coerces JSON values against types resolved through a
/// shared registry. Stateless; any number of callers may share one.
#[derive(Debug, Clone, Copy)]
pub struct TypeCoercer<'a> {
    registry: &'a Registry,
}

impl<'a> TypeCoercer<'a> {
    /// Creates a coercer over a registry.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Coerces `value` into the shape of `type_name`. `path` prefixes every
    /// message this call and its recursive descendants produce.
    ///
    /// Recursion is bounded by the depth of the input value, never by the
    /// schema graph, so self-referential models always terminate.
    pub fn coerce(&self, type_name: &str, value: &JsonValue, path: &str) -> ValidationResult {
        match self.registry.resolve(type_name) {
            None => Err(vec![format!(
                "{} references unknown type '{}'",
                path, type_name
            )]),
            Some(ResolvedType::Array(element)) => self.coerce_array(element, value, path),
            Some(ResolvedType::Map(element)) => self.coerce_map(element, value, path),
            Some(ResolvedType::Primitive(kind)) => {
                self.scalar(value, |value| coerce_primitive(kind, value, path))
            }
            Some(ResolvedType::Declared(descriptor)) => match descriptor {
                TypeDescriptor::Enum { name, values } => {
                    self.scalar(value, |value| coerce_enum(name, values, value, path))
                }
                TypeDescriptor::Model { name, fields } => {
                    self.coerce_model(name, fields, value, path)
                }
                TypeDescriptor::Union {
                    name,
                    discriminator,
                    types,
                } => self.coerce_union(name, discriminator, types, value, path),
            },
        }
    }

    /// Scalar entry point with the downcast rule: a one-element array
    /// presented where a scalar is declared unwraps to its sole element.
    /// Arrays of any other length fall through to the scalar's own
    /// mismatch message, which names `array` as the runtime kind.
    fn scalar(
        &self,
        value: &JsonValue,
        coerce: impl Fn(&JsonValue) -> Result<JsonValue, String>,
    ) -> ValidationResult {
        let value = match value {
            JsonValue::Array(items) if items.len() == 1 => &items[0],
            other => other,
        };
        coerce(value).map_err(|message| vec![message])
    }

    fn coerce_array(&self, element_type: &str, value: &JsonValue, path: &str) -> ValidationResult {
        match value {
            JsonValue::Array(items) => {
                let mut normalized = Vec::with_capacity(items.len());
                let mut errors = Vec::new();
                for (position, item) in items.iter().enumerate() {
                    let element_path = format!(
                        "{} of type '[{}]': element in position[{}]",
                        path, element_type, position
                    );
                    match self.coerce(element_type, item, &element_path) {
                        Ok(v) => normalized.push(v),
                        Err(messages) => errors.extend(messages),
                    }
                }
                if errors.is_empty() {
                    Ok(JsonValue::Array(normalized))
                } else {
                    Err(errors)
                }
            }
            JsonValue::Null => Err(vec![format!("{} must be an array and not null", path)]),
            // Upcast a lone value (object included; the element type may be
            // a model) into a one-element array.
            single => self
                .coerce(element_type, single, path)
                .map(|v| JsonValue::Array(vec![v])),
        }
    }

    fn coerce_map(&self, value_type: &str, value: &JsonValue, path: &str) -> ValidationResult {
        match value {
            JsonValue::Object(entries) => {
                let mut normalized = Map::with_capacity(entries.len());
                let mut errors = Vec::new();
                for (key, entry) in entries {
                    let entry_path =
                        format!("{} of type 'map[{}]': element[{}]", path, value_type, key);
                    match self.coerce(value_type, entry, &entry_path) {
                        // Keys pass through unchanged.
                        Ok(v) => {
                            normalized.insert(key.clone(), v);
                        }
                        Err(messages) => errors.extend(messages),
                    }
                }
                if errors.is_empty() {
                    Ok(JsonValue::Object(normalized))
                } else {
                    Err(errors)
                }
            }
            other => Err(vec![type_mismatch(path, "object", other)]),
        }
    }

    fn coerce_model(
        &self,
        name: &str,
        fields: &[Field],
        value: &JsonValue,
        path: &str,
    ) -> ValidationResult {
        let JsonValue::Object(supplied) = value else {
            return Err(vec![type_mismatch(path, "object", value)]);
        };

        // Undeclared keys are preserved untouched.
        let mut normalized = supplied.clone();
        let mut errors = Vec::new();

        // Pass 1: one combined message for every missing required field,
        // in declaration order. A declared default excuses absence.
        let missing: Vec<&str> = fields
            .iter()
            .filter(|f| f.required && f.default.is_none() && !supplied.contains_key(&f.name))
            .map(|f| f.name.as_str())
            .collect();
        match missing.as_slice() {
            [] => {}
            [only] => errors.push(format!("Missing required field for {}: {}", name, only)),
            many => errors.push(format!(
                "Missing required fields for {}: {}",
                name,
                many.join(", ")
            )),
        }

        // Pass 2: coerce every present (or defaulted) field, collecting all
        // errors instead of stopping at the first failing sibling.
        for field in fields {
            let supplied_value = supplied.get(&field.name).or(field.default.as_ref());
            let Some(supplied_value) = supplied_value else {
                continue;
            };
            if supplied_value.is_null() && !field.required {
                // Null for a non-required field means absent.
                normalized.shift_remove(&field.name);
                continue;
            }
            let field_path = format!("{}.{}", path, field.name);
            match self.coerce(&field.typ, supplied_value, &field_path) {
                Ok(v) => {
                    normalized.insert(field.name.clone(), v);
                }
                Err(messages) => errors.extend(messages),
            }
        }

        if errors.is_empty() {
            Ok(JsonValue::Object(normalized))
        } else {
            Err(errors)
        }
    }

    /// Members are attempted in declaration order; the first that coerces
    /// cleanly wins and, when it yields an object, is tagged with the
    /// discriminator. On total failure the best-ranked member failure (the
    /// one with the fewest messages, earliest on ties) is reported.
    fn coerce_union(
        &self,
        name: &str,
        discriminator: &str,
        types: &[String],
        value: &JsonValue,
        path: &str,
    ) -> ValidationResult {
        let mut failures: Vec<Vec<String>> = Vec::new();
        for member in types {
            match self.coerce(member, value, path) {
                Ok(mut normalized) => {
                    if let Some(object) = normalized.as_object_mut() {
                        object.insert(
                            discriminator.to_string(),
                            JsonValue::String(member.clone()),
                        );
                    }
                    return Ok(normalized);
                }
                Err(messages) => failures.push(messages),
            }
        }
        // min_by_key keeps the first of equally-ranked failures, so ties
        // resolve to the earliest member.
        failures
            .into_iter()
            .min_by_key(|messages| messages.len())
            .map(Err)
            .unwrap_or_else(|| {
                Err(vec![format!(
                    "{} is not convertible to the union '{}'",
                    path, name
                )])
            })
    }
}

fn coerce_enum(
    name: &str,
    values: &[String],
    value: &JsonValue,
    path: &str,
) -> Result<JsonValue, String> {
    let candidate = match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        other => return Err(type_mismatch(path, "string", other)),
    };
    if values.iter().any(|v| *v == candidate) {
        Ok(JsonValue::String(candidate))
    } else {
        let listed = values
            .iter()
            .map(|v| format!("'{}'", v))
            .collect::<Vec<_>>()
            .join(", ");
        Err(format!(
            "{} invalid value '{}'. Valid values for the enum '{}' are: {}",
            path, candidate, name, listed
        ))
    }
}
