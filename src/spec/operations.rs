#![deny(missing_docs)]

//! # Operations
//!
//! The routable surface of a specification: HTTP method, path template,
//! declared parameters, optional body type, and declared responses.

use crate::error::AppError;
use crate::spec::path::PathTemplate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// An HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Connect,
    Trace,
}

impl Method {
    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
        }
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "CONNECT" => Ok(Self::Connect),
            "TRACE" => Ok(Self::Trace),
            other => Err(AppError::Spec(format!("Unknown HTTP method '{}'", other))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a declared parameter is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ParameterLocation {
    Path,
    Query,
    Form,
    Header,
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type name.
    #[serde(rename = "type")]
    pub typ: String,
    /// Where the parameter is carried.
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Value assumed when the parameter is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

/// The status-code selector of a declared response.
///
/// `Undefined` preserves unparseable selectors from the source document;
/// it never matches a request and is never listed as an expected code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// A concrete status code.
    Int(u16),
    /// Matches any code not explicitly declared.
    Default,
    /// An unrecognized selector, preserved verbatim.
    Undefined(String),
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(code) => serializer.serialize_u16(*code),
            Self::Default => serializer.serialize_str("default"),
            Self::Undefined(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        match value {
            JsonValue::Number(n) => n
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .map(Self::Int)
                .ok_or_else(|| D::Error::custom("response code out of range")),
            JsonValue::String(s) => match s.as_str() {
                "default" | "*" => Ok(Self::Default),
                _ => match s.parse::<u16>() {
                    Ok(code) => Ok(Self::Int(code)),
                    Err(_) => Ok(Self::Undefined(s)),
                },
            },
            other => Err(D::Error::custom(format!(
                "response code must be a number or string, not {}",
                other
            ))),
        }
    }
}

/// A declared response: status-code selector plus body type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Which status codes this response covers.
    pub code: ResponseCode,
    /// Declared body type name (`unit` for empty bodies).
    #[serde(rename = "type")]
    pub typ: String,
}

impl Response {
    /// Creates a response for a concrete status code.
    pub fn status(code: u16, typ: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Int(code),
            typ: typ.into(),
        }
    }

    /// Creates the wildcard response.
    pub fn default_response(typ: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Default,
            typ: typ.into(),
        }
    }
}

/// A single routable operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// HTTP method.
    pub method: Method,
    /// Tokenized path template.
    pub path: PathTemplate,
    /// Declared request body type name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared responses, in declaration order.
    #[serde(default)]
    pub responses: Vec<Response>,
}

impl Operation {
    /// Creates an operation with no body, parameters, or responses.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: PathTemplate::parse(path.into()),
            body: None,
            parameters: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Declares the request body type, returning the updated operation.
    pub fn with_body(mut self, typ: impl Into<String>) -> Self {
        self.body = Some(typ.into());
        self
    }

    /// Appends a declared parameter, returning the updated operation.
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Appends a declared response, returning the updated operation.
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// Finds the declared response covering `code`: an exact status match
    /// first, then the first wildcard response if one is declared.
    pub fn response(&self, code: u16) -> Option<&Response> {
        self.responses
            .iter()
            .find(|r| r.code == ResponseCode::Int(code))
            .or_else(|| {
                self.responses
                    .iter()
                    .find(|r| r.code == ResponseCode::Default)
            })
    }

    /// Like [`Operation::response`], but renders an error naming every
    /// declared code when nothing covers `code`. A declared wildcard
    /// short-circuits the listing to `*`.
    pub fn validate_response_code(&self, code: u16) -> Result<&Response, String> {
        self.response(code).ok_or_else(|| {
            let declared = if self
                .responses
                .iter()
                .any(|r| r.code == ResponseCode::Default)
            {
                "*".to_string()
            } else {
                self.responses
                    .iter()
                    .filter_map(|r| match &r.code {
                        ResponseCode::Int(n) => Some(n.to_string()),
                        ResponseCode::Default | ResponseCode::Undefined(_) => None,
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!(
                "Unexpected response code[{}] for operation[{} {}]. Declared response codes: {}",
                code, self.method, self.path, declared
            )
        })
    }
}
