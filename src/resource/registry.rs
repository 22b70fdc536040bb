//! Operation Registry - Load operation descriptors from JSON
//!
//! Every API operation is described once in an embedded JSON file under
//! `src/resources/`: its verb, path template, accepted parameters and, for
//! list operations, the key holding the page items. The generic request
//! pipeline looks descriptors up here by name.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded operation JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/persons.json"),
    include_str!("../resources/organizations.json"),
    include_str!("../resources/opportunities.json"),
    include_str!("../resources/lists.json"),
    include_str!("../resources/fields.json"),
    include_str!("../resources/field_values.json"),
    include_str!("../resources/notes.json"),
    include_str!("../resources/interactions.json"),
    include_str!("../resources/webhooks.json"),
    include_str!("../resources/utility.json"),
];

/// HTTP verb of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Where a parameter travels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Path,
    Query,
    Body,
}

/// Accepted value kind of a parameter
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    /// JSON integer only, no float or string coercion
    Integer,
    /// Any JSON number
    Number,
    String,
    Boolean,
    /// String holding a syntactically valid email address
    Email,
    /// RFC 3339 timestamp string
    #[serde(rename = "datetime")]
    DateTime,
    /// Absolute http(s) URL string
    Url,
    /// Any non-null JSON value
    Any,
    /// One of a fixed set of JSON values
    Enum { values: Vec<Value> },
    /// Homogeneous JSON array
    Array { items: Box<ParamKind> },
}

/// Schema entry for one parameter
#[derive(Debug, Clone, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: Location,
    #[serde(default)]
    pub required: bool,
    pub kind: ParamKind,
}

/// Operation descriptor from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct OperationDef {
    pub method: Verb,
    /// Path template, placeholders written as `{name}`
    pub path: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// Key of the item array in a list response
    #[serde(default)]
    pub items_key: Option<String>,
    /// Exactly one of these parameters must be supplied
    #[serde(default)]
    pub exactly_one_of: Vec<String>,
    /// At most one of these parameters may be supplied
    #[serde(default)]
    pub at_most_one_of: Vec<String>,
}

impl OperationDef {
    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// True when the operation takes a cursor and returns a page of items
    pub fn is_paginated(&self) -> bool {
        self.items_key.is_some() && self.param("page_token").is_some()
    }

    /// True when the request carries a JSON body
    pub fn has_body(&self) -> bool {
        self.params.iter().any(|p| p.location == Location::Body)
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
struct ResourceFile {
    #[allow(dead_code)]
    resource: String,
    #[serde(default)]
    operations: HashMap<String, OperationDef>,
}

/// All registered operations, keyed by name
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    pub operations: HashMap<String, OperationDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<OperationRegistry> = OnceLock::new();

/// Get the operation registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static OperationRegistry {
    REGISTRY.get_or_init(|| {
        let mut registry = OperationRegistry::default();

        for content in RESOURCE_FILES {
            // Embedded at build time; a parse failure is a packaging bug
            let partial: ResourceFile = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded operation JSON: {}", e));
            registry.operations.extend(partial.operations);
        }

        registry
    })
}

/// Get an operation descriptor by name
pub fn get_operation(name: &str) -> Option<&'static OperationDef> {
    get_registry().operations.get(name)
}

/// Get all operation names, sorted
pub fn get_all_operation_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = get_registry()
        .operations
        .keys()
        .map(|s| s.as_str())
        .collect();
    names.sort_unstable();
    names
}

/// Placeholder names in a path template, in order
#[cfg(test)]
fn path_placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        names.push(&rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }
    names
}
