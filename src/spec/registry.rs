#![deny(missing_docs)]

//! # Type Registry
//!
//! Immutable, name-indexed lookup of declared type descriptors, built once
//! from an already-parsed specification and shared read-only by every
//! validation call.
//!
//! Resolution also classifies the two *syntactic* type families: `[T]`
//! resolves to an array of `T` and `map[T]` to a string-keyed map of `T`.
//! Declared names shadow primitive names; bracket syntax is checked first
//! because declared names can never contain brackets.

use crate::error::{AppError, AppResult};
use crate::spec::types::{PrimitiveKind, TypeDescriptor};
use indexmap::IndexMap;

/// The classification of a type-name string against a registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedType<'a> {
    /// A built-in scalar or opaque type.
    Primitive(PrimitiveKind),
    /// A declared enum, model, or union.
    Declared(&'a TypeDescriptor),
    /// `[T]`; the payload is the element type name `T`.
    Array(&'a str),
    /// `map[T]`; the payload is the value type name `T`.
    Map(&'a str),
}

/// Name-indexed lookup of declared types. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, TypeDescriptor>,
}

impl Registry {
    /// Builds a registry from declared types, rejecting duplicate names.
    pub fn new(declared: Vec<TypeDescriptor>) -> AppResult<Self> {
        let mut types = IndexMap::with_capacity(declared.len());
        for descriptor in declared {
            let name = descriptor.name().to_string();
            if types.insert(name.clone(), descriptor).is_some() {
                return Err(AppError::Spec(format!(
                    "Duplicate type name '{}' detected",
                    name
                )));
            }
        }
        Ok(Self { types })
    }

    /// Looks up a declared type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Classifies a type-name string: array syntax, map syntax, declared
    /// type, or primitive. `None` means the name references nothing known.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<ResolvedType<'a>> {
        if let Some(element) = array_element(name) {
            return Some(ResolvedType::Array(element));
        }
        if let Some(value) = map_value(name) {
            return Some(ResolvedType::Map(value));
        }
        if let Some(descriptor) = self.types.get(name) {
            return Some(ResolvedType::Declared(descriptor));
        }
        PrimitiveKind::from_name(name).map(ResolvedType::Primitive)
    }
}

/// Extracts `T` from `[T]`.
pub(crate) fn array_element(name: &str) -> Option<&str> {
    name.strip_prefix('[')?.strip_suffix(']')
}

/// Extracts `T` from `map[T]`.
pub(crate) fn map_value(name: &str) -> Option<&str> {
    name.strip_prefix("map[")?.strip_suffix(']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::types::Field;

    fn registry() -> Registry {
        Registry::new(vec![
            TypeDescriptor::Model {
                name: "user".to_string(),
                fields: vec![Field::required("id", "long")],
            },
            TypeDescriptor::Enum {
                name: "visibility".to_string(),
                values: vec!["public".to_string(), "private".to_string()],
            },
        ])
        .unwrap()
    }

    #[test]
    fn resolves_syntax_then_declared_then_primitive() {
        let registry = registry();
        assert_eq!(registry.resolve("[user]"), Some(ResolvedType::Array("user")));
        assert_eq!(
            registry.resolve("map[[string]]"),
            Some(ResolvedType::Map("[string]"))
        );
        assert!(matches!(
            registry.resolve("user"),
            Some(ResolvedType::Declared(TypeDescriptor::Model { .. }))
        ));
        assert_eq!(
            registry.resolve("long"),
            Some(ResolvedType::Primitive(PrimitiveKind::Long))
        );
        assert_eq!(registry.resolve("nope"), None);
    }

    #[test]
    fn declared_names_shadow_primitives() {
        let registry = Registry::new(vec![TypeDescriptor::Enum {
            name: "string".to_string(),
            values: vec!["a".to_string()],
        }])
        .unwrap();
        assert!(matches!(
            registry.resolve("string"),
            Some(ResolvedType::Declared(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Registry::new(vec![
            TypeDescriptor::Enum {
                name: "visibility".to_string(),
                values: vec![],
            },
            TypeDescriptor::Enum {
                name: "visibility".to_string(),
                values: vec![],
            },
        ]);
        assert!(result.is_err());
    }
}
