//! Decorators for generated request classes and their resource factories.

use crate::codemodel::{generate_constant_property, CodeArena, DeclId, Expr, Statement};
use crate::discovery::{Method, Parameter, Resource};
use crate::error::Result;
use crate::ident;

use super::unique_member_name;

/// Appends the request's identity fields: method name, HTTP verb, and REST
/// path, in that fixed order, as read-only constant properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFieldDecorator;

impl RequestFieldDecorator {
    pub fn decorate_class(
        &self,
        _resource: &Resource,
        method: &Method,
        arena: &mut CodeArena,
        request_decl: DeclId,
        _resource_decl: DeclId,
    ) -> Result<()> {
        let name = generate_constant_property(arena, "MethodName", &method.name);
        arena.push_member(request_decl, name)?;

        let verb = generate_constant_property(arena, "HttpMethod", &method.http_method);
        arena.push_member(request_decl, verb)?;

        let path = generate_constant_property(arena, "RestPath", &method.rest_path);
        arena.push_member(request_decl, path)?;
        Ok(())
    }
}

/// Appends one settable property per method parameter, in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParameterDecorator;

impl RequestParameterDecorator {
    pub fn decorate_class(
        &self,
        _resource: &Resource,
        method: &Method,
        arena: &mut CodeArena,
        request_decl: DeclId,
        _resource_decl: DeclId,
    ) -> Result<()> {
        for (ordinal, param) in method.parameters.iter().enumerate() {
            let name = unique_member_name(arena, request_decl, &param.name, ordinal);
            let prop = arena.new_property(name, parameter_type(param), true, true);
            if let Some(desc) = &param.description {
                arena.set_doc(prop, Some(ident::sanitize_doc(desc)));
            }
            arena.push_member(request_decl, prop)?;
        }
        Ok(())
    }
}

/// Appends a `Body` property typed by the method's request schema.
///
/// A method without a request schema gets no member; that is not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBodyDecorator;

impl RequestBodyDecorator {
    pub fn decorate_class(
        &self,
        _resource: &Resource,
        method: &Method,
        arena: &mut CodeArena,
        request_decl: DeclId,
        _resource_decl: DeclId,
    ) -> Result<()> {
        let Some(schema_name) = &method.request_ref else {
            return Ok(());
        };
        let ty = ident::safe_class_name(schema_name, "Schema");
        let ordinal = arena.decl(request_decl).members.len();
        let name = unique_member_name(arena, request_decl, "body", ordinal);
        let prop = arena.new_property(name, ty, true, true);
        arena.push_member(request_decl, prop)?;
        Ok(())
    }
}

/// Appends a factory method for the request class to the resource class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceFactoryDecorator;

impl ResourceFactoryDecorator {
    pub fn decorate_class(
        &self,
        _resource: &Resource,
        method: &Method,
        arena: &mut CodeArena,
        request_decl: DeclId,
        resource_decl: DeclId,
    ) -> Result<()> {
        let request_class = arena.decl(request_decl).name.clone();
        let ordinal = arena.decl(resource_decl).members.len();
        let name = unique_member_name(arena, resource_decl, &method.name, ordinal);
        let factory = arena.new_method(
            name,
            request_class.clone(),
            vec![Statement::Return(Expr::New(request_class))],
        );
        if let Some(desc) = &method.description {
            arena.set_doc(factory, Some(ident::sanitize_doc(desc)));
        }
        arena.push_member(resource_decl, factory)?;
        Ok(())
    }
}

// Value types become nullable when the parameter is optional; reference types
// already admit absence.
fn parameter_type(param: &Parameter) -> String {
    let base = match param.param_type.as_str() {
        "integer" => "long",
        "number" => "double",
        "boolean" => "bool",
        _ => "string",
    };
    if base != "string" && !param.required {
        format!("{}?", base)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::ParamLocation;

    fn method_fixture() -> Method {
        Method {
            name: "Method".to_string(),
            http_method: "GET".to_string(),
            rest_path: "/x".to_string(),
            description: None,
            parameters: vec![Parameter {
                name: "Param".to_string(),
                param_type: "string".to_string(),
                required: false,
                location: ParamLocation::Query,
                default: None,
                description: None,
            }],
            request_ref: None,
            response_ref: None,
        }
    }

    fn resource_fixture(method: Method) -> Resource {
        Resource {
            name: "r".to_string(),
            methods: vec![method],
            resources: Vec::new(),
        }
    }

    #[test]
    fn test_request_fields_three_properties_in_order() {
        let method = method_fixture();
        let resource = resource_fixture(method.clone());
        let mut arena = CodeArena::new();
        let request = arena.new_class("MethodRequest");
        let resource_decl = arena.new_class("R");

        RequestFieldDecorator
            .decorate_class(&resource, &method, &mut arena, request, resource_decl)
            .unwrap();

        assert_eq!(
            arena.member_names(request),
            vec!["MethodName", "HttpMethod", "RestPath"]
        );
        for (member, literal) in arena
            .decl(request)
            .members
            .clone()
            .into_iter()
            .zip(["Method", "GET", "/x"])
        {
            let decl = arena.decl(member);
            assert_eq!(decl.visibility, crate::codemodel::Visibility::Public);
            match &decl.kind {
                crate::codemodel::DeclKind::Property {
                    has_get,
                    has_set,
                    get_statements,
                    ..
                } => {
                    assert!(*has_get);
                    assert!(!*has_set);
                    assert_eq!(
                        get_statements,
                        &vec![Statement::Return(Expr::StringLiteral(literal.to_string()))]
                    );
                }
                other => panic!("expected property, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_request_parameters_follow_declaration_order() {
        let mut method = method_fixture();
        method.parameters.push(Parameter {
            name: "alpha".to_string(),
            param_type: "integer".to_string(),
            required: false,
            location: ParamLocation::Query,
            default: None,
            description: Some("how many".to_string()),
        });
        let resource = resource_fixture(method.clone());
        let mut arena = CodeArena::new();
        let request = arena.new_class("MethodRequest");
        let resource_decl = arena.new_class("R");

        RequestParameterDecorator
            .decorate_class(&resource, &method, &mut arena, request, resource_decl)
            .unwrap();

        // "Param" declared first stays first even though "alpha" sorts earlier.
        assert_eq!(arena.member_names(request), vec!["Param", "Alpha"]);
        let alpha = arena.decl(request).members[1];
        match &arena.decl(alpha).kind {
            crate::codemodel::DeclKind::Property { ty, .. } => assert_eq!(ty, "long?"),
            other => panic!("expected property, got {:?}", other),
        }
        assert_eq!(arena.decl(alpha).doc.as_deref(), Some("how many"));
    }

    #[test]
    fn test_request_body_skipped_when_absent() {
        let method = method_fixture();
        let resource = resource_fixture(method.clone());
        let mut arena = CodeArena::new();
        let request = arena.new_class("MethodRequest");
        let resource_decl = arena.new_class("R");

        RequestBodyDecorator
            .decorate_class(&resource, &method, &mut arena, request, resource_decl)
            .unwrap();
        assert!(arena.member_names(request).is_empty());

        let mut with_body = method;
        with_body.request_ref = Some("Event".to_string());
        RequestBodyDecorator
            .decorate_class(&resource, &with_body, &mut arena, request, resource_decl)
            .unwrap();
        assert_eq!(arena.member_names(request), vec!["Body"]);
    }

    #[test]
    fn test_resource_factory_returns_new_request() {
        let method = method_fixture();
        let resource = resource_fixture(method.clone());
        let mut arena = CodeArena::new();
        let request = arena.new_class("MethodRequest");
        let resource_decl = arena.new_class("R");

        ResourceFactoryDecorator
            .decorate_class(&resource, &method, &mut arena, request, resource_decl)
            .unwrap();

        assert_eq!(arena.member_names(resource_decl), vec!["Method"]);
        let factory = arena.decl(resource_decl).members[0];
        match &arena.decl(factory).kind {
            crate::codemodel::DeclKind::Method {
                return_ty,
                statements,
            } => {
                assert_eq!(return_ty, "MethodRequest");
                assert_eq!(
                    statements,
                    &vec![Statement::Return(Expr::New("MethodRequest".to_string()))]
                );
            }
            other => panic!("expected method, got {:?}", other),
        }
    }
}
