//! Discovery document parsing and the schema model.
//!
//! This module provides functionality for loading discovery documents and
//! building the typed service model the generator consumes. Loading supports
//! files and URLs; the model builder itself is synchronous and pure.
//!
//! # Examples
//!
//! ```no_run
//! use discogen_core::discovery::DiscoveryContext;
//! use discogen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Load a discovery document from a file
//! let doc = DiscoveryContext::from_file("calendar.json").await?;
//!
//! // Access common fields
//! if let Some(name) = doc.name() {
//!     println!("API name: {}", name);
//! }
//! let (service, _issues) = doc.build_model()?;
//! println!("{} top-level resources", service.resources.len());
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;

/// A method or schema the generator had to skip, with the reason.
///
/// Issues are collected per run and surfaced as a batch so one bad method
/// never blocks generation of its siblings.
#[derive(Debug)]
pub struct GenerationIssue {
    /// Dotted path of the affected unit (e.g. `"events.list"`)
    pub unit: String,
    /// The error that caused the skip
    pub error: Error,
}

/// Represents a parsed discovery document
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DiscoveryContext {
    /// The raw JSON value of the discovery document
    pub json: JsonValue,
}

impl DiscoveryContext {
    /// Create a new DiscoveryContext from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> Result<Self> {
        let location = location.as_ref();

        // Check if the input looks like a URL
        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        // Otherwise treat as a file path
        Self::from_file(location).await
    }

    /// Create a new DiscoveryContext from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::malformed(format!(
                "Failed to parse discovery document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Create a new DiscoveryContext from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::malformed(format!(
                "Failed to fetch discovery document from {}: {}",
                url, e
            ))
        })?;

        if !response.status().is_success() {
            return Err(Error::malformed(format!(
                "Failed to fetch discovery document from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::malformed(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_content(&content)
            .map_err(|e| Error::malformed(format!("Failed to parse document from {}: {}", url, e)))
    }

    /// Parse content as either JSON or YAML
    fn parse_content(content: &str) -> std::result::Result<Self, String> {
        // Try to parse as JSON first
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        // If JSON parsing fails, try YAML
        if let Ok(json) = serde_yaml::from_str(content) {
            return Ok(Self { json });
        }

        // If both parsers fail, return an error
        Err("content is neither valid JSON nor YAML".to_string())
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the name of the API
    pub fn name(&self) -> Option<&str> {
        self.json.get("name").and_then(JsonValue::as_str)
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("version").and_then(JsonValue::as_str)
    }

    /// Get the base URI of the API
    pub fn base_uri(&self) -> Option<String> {
        // Newer documents carry a full baseUrl
        if let Some(url) = self.json.get("baseUrl").and_then(JsonValue::as_str) {
            return Some(url.to_string());
        }

        // Fall back to rootUrl + servicePath
        if let Some(root) = self.json.get("rootUrl").and_then(JsonValue::as_str) {
            let service_path = self
                .json
                .get("servicePath")
                .and_then(JsonValue::as_str)
                .unwrap_or("");
            return Some(format!("{}{}", root, service_path));
        }

        None
    }

    /// Build the typed service model from the raw document.
    ///
    /// Per-method malformation (a missing HTTP verb, an unknown parameter
    /// location, a `parameterOrder` entry with no matching parameter) skips
    /// the affected method and records an issue; sibling methods still parse.
    /// Only a document without a `name` is fatal.
    pub fn build_model(&self) -> Result<(Service, Vec<GenerationIssue>)> {
        let name = self
            .name()
            .ok_or_else(|| Error::malformed("document has no 'name'"))?
            .to_string();

        let mut issues = Vec::new();

        let mut resources = Vec::new();
        if let Some(map) = self.json.get("resources").and_then(JsonValue::as_object) {
            for (rname, rjson) in map {
                resources.push(parse_resource(rname, rjson, &mut issues));
            }
        }

        let mut schemas = BTreeMap::new();
        if let Some(map) = self.json.get("schemas").and_then(JsonValue::as_object) {
            for (sname, sjson) in map {
                schemas.insert(sname.clone(), parse_schema(sname, sjson));
            }
        }

        let service = Service {
            name,
            version: self.version().map(String::from),
            base_uri: self.base_uri().unwrap_or_default(),
            description: self
                .json
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
            resources,
            schemas,
        };
        Ok((service, issues))
    }
}

/// A parsed API service: the root of the schema model
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    /// Name of the API (e.g. "calendar")
    pub name: String,
    /// Version of the API (e.g. "v3")
    pub version: Option<String>,
    /// Base URI requests are made against
    pub base_uri: String,
    /// Description of the API, used for doc comments
    pub description: Option<String>,
    /// Top-level resources
    pub resources: Vec<Resource>,
    /// Schemas by name; the lookup table schema references resolve through
    pub schemas: BTreeMap<String, Schema>,
}

impl Service {
    /// Resolve a schema reference by name.
    ///
    /// References stay names in the model, so forward references and cycles
    /// never fail and never recurse.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }
}

/// A resource: a named group of methods with optional nested sub-resources
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// Name of the resource as declared in the document
    pub name: String,
    /// Methods of this resource, in document order
    pub methods: Vec<Method>,
    /// Nested sub-resources
    pub resources: Vec<Resource>,
}

/// A single API method
#[derive(Debug, Clone, Serialize)]
pub struct Method {
    /// Name of the method as declared in the document
    pub name: String,
    /// HTTP verb (e.g. "GET")
    pub http_method: String,
    /// REST path template, may contain `{parameter}` placeholders
    pub rest_path: String,
    /// Description of the method, used for doc comments
    pub description: Option<String>,
    /// Parameters in declaration order (`parameterOrder` first, then the rest
    /// in document order)
    pub parameters: Vec<Parameter>,
    /// Schema reference of the request body, if any
    pub request_ref: Option<String>,
    /// Schema reference of the response body, if any
    pub response_ref: Option<String>,
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

/// A single method parameter
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    /// Name of the parameter as declared in the document
    pub name: String,
    /// Declared type, verbatim from the document (e.g. "string")
    pub param_type: String,
    /// Whether the parameter is mandatory, verbatim from the document
    pub required: bool,
    /// Location of the parameter, verbatim from the document
    pub location: ParamLocation,
    /// Default value, if declared
    pub default: Option<String>,
    /// Description of the parameter, used for doc comments
    pub description: Option<String>,
}

/// A named schema: a set of named, typed fields
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    /// Name of the schema
    pub name: String,
    /// Description of the schema, used for doc comments
    pub description: Option<String>,
    /// Fields in document order
    pub fields: Vec<SchemaField>,
}

/// A single schema field
#[derive(Debug, Clone, Serialize)]
pub struct SchemaField {
    /// Name of the field as declared in the document
    pub name: String,
    /// Declared type of the field
    pub field_type: FieldType,
    /// Description of the field, used for doc comments
    pub description: Option<String>,
}

/// Declared type of a schema field or parameter.
///
/// Schema references are kept as names and resolved lazily through
/// [`Service::schema`], so self-referential and mutually-referential schemas
/// are representable without cycles in the model itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Any,
    Array(Box<FieldType>),
    Ref(String),
}

fn parse_resource(name: &str, json: &JsonValue, issues: &mut Vec<GenerationIssue>) -> Resource {
    let mut methods = Vec::new();
    if let Some(map) = json.get("methods").and_then(JsonValue::as_object) {
        for (mname, mjson) in map {
            match parse_method(mname, mjson) {
                Ok(method) => methods.push(method),
                Err(error) => {
                    tracing::warn!(resource = name, method = %mname, %error, "skipping method");
                    issues.push(GenerationIssue {
                        unit: format!("{}.{}", name, mname),
                        error,
                    });
                }
            }
        }
    }

    let mut resources = Vec::new();
    if let Some(map) = json.get("resources").and_then(JsonValue::as_object) {
        for (rname, rjson) in map {
            resources.push(parse_resource(rname, rjson, issues));
        }
    }

    Resource {
        name: name.to_string(),
        methods,
        resources,
    }
}

fn parse_method(name: &str, json: &JsonValue) -> Result<Method> {
    let http_method = json
        .get("httpMethod")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::malformed(format!("method '{}' has no httpMethod", name)))?
        .to_string();

    let rest_path = json
        .get("path")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::malformed(format!("method '{}' has no path", name)))?
        .to_string();

    let empty = serde_json::Map::new();
    let params_map = json
        .get("parameters")
        .and_then(JsonValue::as_object)
        .unwrap_or(&empty);

    // parameterOrder entries come first; each must name a declared parameter.
    let order: Vec<&str> = json
        .get("parameterOrder")
        .and_then(JsonValue::as_array)
        .map(|arr| arr.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default();

    let mut parameters = Vec::new();
    for (index, pname) in order.iter().enumerate() {
        if order[..index].contains(pname) {
            return Err(Error::malformed(format!(
                "method '{}' orders parameter '{}' more than once",
                name, pname
            )));
        }
        let pjson = params_map.get(*pname).ok_or_else(|| {
            Error::malformed(format!(
                "method '{}' orders unknown parameter '{}'",
                name, pname
            ))
        })?;
        parameters.push(parse_parameter(name, pname, pjson)?);
    }
    for (pname, pjson) in params_map {
        if !order.contains(&pname.as_str()) {
            parameters.push(parse_parameter(name, pname, pjson)?);
        }
    }

    Ok(Method {
        name: name.to_string(),
        http_method,
        rest_path,
        description: json
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from),
        parameters,
        request_ref: schema_ref(json.get("request")),
        response_ref: schema_ref(json.get("response")),
    })
}

fn parse_parameter(method: &str, name: &str, json: &JsonValue) -> Result<Parameter> {
    // Location is taken verbatim; a missing or unknown value is malformed,
    // not guessed.
    let location = match json.get("location").and_then(JsonValue::as_str) {
        Some("path") => ParamLocation::Path,
        Some("query") => ParamLocation::Query,
        Some("body") => ParamLocation::Body,
        Some(other) => {
            return Err(Error::malformed(format!(
                "method '{}' parameter '{}' has unknown location '{}'",
                method, name, other
            )));
        }
        None => {
            return Err(Error::malformed(format!(
                "method '{}' parameter '{}' has no location",
                method, name
            )));
        }
    };

    Ok(Parameter {
        name: name.to_string(),
        param_type: json
            .get("type")
            .and_then(JsonValue::as_str)
            .unwrap_or("string")
            .to_string(),
        required: json
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false),
        location,
        default: json
            .get("default")
            .and_then(JsonValue::as_str)
            .map(String::from),
        description: json
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from),
    })
}

fn parse_schema(name: &str, json: &JsonValue) -> Schema {
    let mut fields = Vec::new();
    if let Some(props) = json.get("properties").and_then(JsonValue::as_object) {
        for (fname, fjson) in props {
            fields.push(SchemaField {
                name: fname.clone(),
                field_type: parse_field_type(fjson),
                description: fjson
                    .get("description")
                    .and_then(JsonValue::as_str)
                    .map(String::from),
            });
        }
    }
    Schema {
        name: name.to_string(),
        description: json
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from),
        fields,
    }
}

fn parse_field_type(json: &JsonValue) -> FieldType {
    if let Some(r) = json.get("$ref").and_then(JsonValue::as_str) {
        return FieldType::Ref(r.to_string());
    }
    match json.get("type").and_then(JsonValue::as_str) {
        Some("string") => FieldType::String,
        Some("integer") => FieldType::Integer,
        Some("number") => FieldType::Number,
        Some("boolean") => FieldType::Boolean,
        Some("array") => {
            let items = json
                .get("items")
                .map(parse_field_type)
                .unwrap_or(FieldType::Any);
            FieldType::Array(Box::new(items))
        }
        _ => FieldType::Any,
    }
}

fn schema_ref(json: Option<&JsonValue>) -> Option<String> {
    json?
        .get("$ref")
        .and_then(JsonValue::as_str)
        .map(String::from)
}
