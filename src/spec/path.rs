#![deny(missing_docs)]

//! # Path Templates
//!
//! Tokenization and matching of operation path templates.
//!
//! A template is split into segments once at construction; a segment
//! beginning with `:` is dynamic and matches any request segment of the same
//! position. Matching ignores the HTTP method entirely.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One component of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// A route variable; matches any single request segment.
    Dynamic(String),
}

/// A tokenized operation path, e.g. `/:organization/webhooks/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Tokenizes a raw template. Empty segments (doubled or trailing
    /// slashes) are dropped, so `/users/` and `/users` are equivalent.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = split(&raw)
            .map(|part| match part.strip_prefix(':') {
                Some(name) => Segment::Dynamic(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    /// The template exactly as declared.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The tokenized segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the template contains no dynamic segment.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Whether a concrete request path matches this template: same segment
    /// count, literal segments equal, dynamic segments match anything.
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split(path);
        let mut segments = self.segments.iter();
        loop {
            match (segments.next(), parts.next()) {
                (None, None) => return true,
                (Some(Segment::Literal(text)), Some(part)) if text == part => {}
                (Some(Segment::Dynamic(_)), Some(_)) => {}
                _ => return false,
            }
        }
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|part| !part.is_empty())
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for PathTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PathTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_dynamic_segments() {
        let template = PathTemplate::parse("/:organization/webhooks/:id");
        assert_eq!(
            template.segments(),
            &[
                Segment::Dynamic("organization".to_string()),
                Segment::Literal("webhooks".to_string()),
                Segment::Dynamic("id".to_string()),
            ]
        );
        assert!(!template.is_static());
        assert!(PathTemplate::parse("/users/tokens").is_static());
    }

    #[test]
    fn matches_by_segment() {
        let template = PathTemplate::parse("/:organization/webhooks/:id");
        assert!(template.matches("/flow/webhooks/w-123"));
        assert!(!template.matches("/flow/webhooks"));
        assert!(!template.matches("/flow/catalog/w-123"));
        assert!(!template.matches("/flow/webhooks/w-123/events"));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let template = PathTemplate::parse("/users/tokens");
        assert!(template.matches("/users/tokens/"));
        assert!(PathTemplate::parse("/users/tokens/").matches("/users/tokens"));
    }
}
