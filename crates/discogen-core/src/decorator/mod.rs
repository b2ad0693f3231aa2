//! Decorator pipeline for populating the code model.
//!
//! Each decorator is an independent unit that appends members to a
//! declaration it is handed. Decorators do not know about each other and
//! never remove or rename another decorator's members; the pipeline runs them
//! in a fixed configured order so member insertion order, and therefore the
//! rendered source, is stable.

pub mod request;
pub mod schema;
pub mod service;

pub use request::{
    RequestBodyDecorator, RequestFieldDecorator, RequestParameterDecorator,
    ResourceFactoryDecorator,
};
pub use schema::SchemaFieldDecorator;
pub use service::{ServiceAuthDecorator, ServiceConstantDecorator};

use crate::codemodel::{CodeArena, DeclId};
use crate::discovery::{FieldType, Method, Resource, Schema, Service};
use crate::error::Result;
use crate::ident;

/// Closed set of decorators applied per method.
#[derive(Debug, Clone, Copy)]
pub enum MethodDecorator {
    RequestFields(RequestFieldDecorator),
    RequestParameters(RequestParameterDecorator),
    RequestBody(RequestBodyDecorator),
    ResourceFactory(ResourceFactoryDecorator),
}

impl MethodDecorator {
    /// Contribute members for `method` to the request and resource declarations.
    pub fn decorate_class(
        &self,
        resource: &Resource,
        method: &Method,
        arena: &mut CodeArena,
        request_decl: DeclId,
        resource_decl: DeclId,
    ) -> Result<()> {
        match self {
            Self::RequestFields(d) => {
                d.decorate_class(resource, method, arena, request_decl, resource_decl)
            }
            Self::RequestParameters(d) => {
                d.decorate_class(resource, method, arena, request_decl, resource_decl)
            }
            Self::RequestBody(d) => {
                d.decorate_class(resource, method, arena, request_decl, resource_decl)
            }
            Self::ResourceFactory(d) => {
                d.decorate_class(resource, method, arena, request_decl, resource_decl)
            }
        }
    }
}

/// Closed set of decorators applied per schema.
#[derive(Debug, Clone, Copy)]
pub enum SchemaDecorator {
    FieldProperties(SchemaFieldDecorator),
}

impl SchemaDecorator {
    /// Contribute members for `schema` to its class declaration.
    pub fn decorate_class(
        &self,
        schema: &Schema,
        arena: &mut CodeArena,
        decl: DeclId,
    ) -> Result<()> {
        match self {
            Self::FieldProperties(d) => d.decorate_class(schema, arena, decl),
        }
    }
}

/// Closed set of decorators applied to the service class.
#[derive(Debug, Clone, Copy)]
pub enum ServiceDecorator {
    Constants(ServiceConstantDecorator),
    Authenticator(ServiceAuthDecorator),
}

impl ServiceDecorator {
    /// Contribute members for `service` to its class declaration.
    pub fn decorate_class(
        &self,
        service: &Service,
        arena: &mut CodeArena,
        decl: DeclId,
    ) -> Result<()> {
        match self {
            Self::Constants(d) => d.decorate_class(service, arena, decl),
            Self::Authenticator(d) => d.decorate_class(service, arena, decl),
        }
    }
}

/// The configured decorator sequence of a generation run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub method_decorators: Vec<MethodDecorator>,
    pub schema_decorators: Vec<SchemaDecorator>,
    pub service_decorators: Vec<ServiceDecorator>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            method_decorators: vec![
                MethodDecorator::RequestFields(RequestFieldDecorator),
                MethodDecorator::RequestParameters(RequestParameterDecorator),
                MethodDecorator::RequestBody(RequestBodyDecorator),
                MethodDecorator::ResourceFactory(ResourceFactoryDecorator),
            ],
            schema_decorators: vec![SchemaDecorator::FieldProperties(SchemaFieldDecorator)],
            service_decorators: vec![
                ServiceDecorator::Constants(ServiceConstantDecorator),
                ServiceDecorator::Authenticator(ServiceAuthDecorator),
            ],
        }
    }
}

/// Map a declared field type to its target-grammar type.
///
/// Schema references resolve by name only; the referenced schema's own
/// declaration is produced exactly once elsewhere, so cycles cost nothing.
pub fn target_type(field_type: &FieldType) -> String {
    match field_type {
        FieldType::String => "string".to_string(),
        FieldType::Integer => "long".to_string(),
        FieldType::Number => "double".to_string(),
        FieldType::Boolean => "bool".to_string(),
        FieldType::Any => "object".to_string(),
        FieldType::Array(inner) => format!("IList<{}>", target_type(inner)),
        FieldType::Ref(name) => ident::safe_class_name(name, "Schema"),
    }
}

/// Sanitize `candidate` into a member name unique within `decl`.
///
/// The reserved set is the target keywords plus the declaration's existing
/// members; `ordinal` supplies the unique suffix when disambiguation is
/// needed.
pub(crate) fn unique_member_name(
    arena: &CodeArena,
    decl: DeclId,
    candidate: &str,
    ordinal: usize,
) -> String {
    let suffix = ordinal.to_string();
    let existing = arena.member_names(decl);
    let reserved = ident::CSHARP_KEYWORDS
        .iter()
        .copied()
        .chain(existing.iter().copied());
    ident::upper_first(&ident::make_safe_identifier(candidate, &suffix, reserved))
}
