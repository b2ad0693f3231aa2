//! Generation orchestration: discovery document in, source units out.
//!
//! One synchronous pass per document. Each top-level declaration gets its own
//! arena, is populated by the configured decorator pipeline, and is rendered
//! into a [`SourceUnit`]. Failures are collected per unit and reported as a
//! batch; a single bad method never blocks its siblings.

use crate::codemodel::CodeArena;
use crate::config::Config;
use crate::decorator::Pipeline;
use crate::discovery::{DiscoveryContext, GenerationIssue, Method, Resource, Service};
use crate::error::{Error, Result};
use crate::ident;
use crate::render;

/// A rendered source unit with its suggested file name
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Suggested file name, derived through the identifier sanitizer
    pub file_name: String,
    /// Rendered source text
    pub text: String,
}

/// The outcome of one generation run
#[derive(Debug)]
pub struct GenerationReport {
    /// Rendered units, in deterministic order
    pub units: Vec<SourceUnit>,
    /// Units or methods that were skipped, with the reason
    pub issues: Vec<GenerationIssue>,
}

impl GenerationReport {
    /// Whether nothing at all could be generated
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Main entry point for code generation
pub fn generate(ctx: &DiscoveryContext, config: &Config) -> Result<GenerationReport> {
    generate_with_pipeline(ctx, config, &Pipeline::default())
}

/// Generate with an explicit decorator pipeline.
///
/// Decorators run in the order the pipeline configures; member insertion
/// order, and therefore the rendered text, follows from it.
pub fn generate_with_pipeline(
    ctx: &DiscoveryContext,
    config: &Config,
    pipeline: &Pipeline,
) -> Result<GenerationReport> {
    let (mut service, mut issues) = ctx.build_model()?;
    if let Some(base) = &config.base_url {
        service.base_uri = base.to_string();
    }

    let mut units = Vec::new();

    generate_service_unit(&service, pipeline, &mut units, &mut issues);
    generate_schema_units(&service, pipeline, &mut units, &mut issues);
    for resource in &service.resources {
        if !config.selects(&resource.name) {
            tracing::debug!(resource = %resource.name, "resource not selected, skipping");
            continue;
        }
        generate_resource_units(&service, resource, "", pipeline, &mut units, &mut issues);
    }

    Ok(GenerationReport { units, issues })
}

fn generate_service_unit(
    service: &Service,
    pipeline: &Pipeline,
    units: &mut Vec<SourceUnit>,
    issues: &mut Vec<GenerationIssue>,
) {
    let base = format!("{}Service", ident::safe_class_name(&service.name, "Api"));
    let mut arena = CodeArena::new();
    let decl = arena.new_class(&base);
    arena.set_doc(decl, service.description.as_deref().map(ident::sanitize_doc));

    for decorator in &pipeline.service_decorators {
        if let Err(error) = decorator.decorate_class(service, &mut arena, decl) {
            issues.push(GenerationIssue {
                unit: base.clone(),
                error,
            });
            return;
        }
    }
    finish_unit(&arena, decl, &base, units, issues);
}

fn generate_schema_units(
    service: &Service,
    pipeline: &Pipeline,
    units: &mut Vec<SourceUnit>,
    issues: &mut Vec<GenerationIssue>,
) {
    // schemas is a BTreeMap: sorted name order keeps output deterministic,
    // and one declaration per distinct schema name keeps cycles finite.
    for (name, schema) in &service.schemas {
        let class_name = ident::safe_class_name(name, "Schema");
        let mut arena = CodeArena::new();
        let decl = arena.new_class(&class_name);
        arena.set_doc(decl, schema.description.as_deref().map(ident::sanitize_doc));

        let mut failed = false;
        for decorator in &pipeline.schema_decorators {
            if let Err(error) = decorator.decorate_class(schema, &mut arena, decl) {
                issues.push(GenerationIssue {
                    unit: class_name.clone(),
                    error,
                });
                failed = true;
                break;
            }
        }
        if !failed {
            finish_unit(&arena, decl, &class_name, units, issues);
        }
    }
}

fn generate_resource_units(
    service: &Service,
    resource: &Resource,
    prefix: &str,
    pipeline: &Pipeline,
    units: &mut Vec<SourceUnit>,
    issues: &mut Vec<GenerationIssue>,
) {
    let base = format!("{}{}", prefix, ident::safe_class_name(&resource.name, "Res"));
    let class_name = format!("{}Resource", base);
    let mut arena = CodeArena::new();
    let resource_decl = arena.new_class(&class_name);

    for (ordinal, method) in resource.methods.iter().enumerate() {
        if let Err(error) = check_schema_refs(service, method) {
            tracing::warn!(resource = %resource.name, method = %method.name, %error, "skipping method");
            issues.push(GenerationIssue {
                unit: format!("{}.{}", resource.name, method.name),
                error,
            });
            continue;
        }

        let request_name = format!(
            "{}{}Request",
            base,
            ident::safe_class_name(&method.name, &ordinal.to_string())
        );
        let request_decl = arena.new_class(&request_name);
        arena.set_doc(
            request_decl,
            method.description.as_deref().map(ident::sanitize_doc),
        );

        let decorated = pipeline.method_decorators.iter().try_for_each(|decorator| {
            decorator.decorate_class(resource, method, &mut arena, request_decl, resource_decl)
        });
        let nested = decorated.and_then(|_| arena.push_member(resource_decl, request_decl));
        if let Err(error) = nested {
            issues.push(GenerationIssue {
                unit: format!("{}.{}", resource.name, method.name),
                error,
            });
        }
    }

    finish_unit(&arena, resource_decl, &class_name, units, issues);

    for sub in &resource.resources {
        generate_resource_units(service, sub, &base, pipeline, units, issues);
    }
}

fn check_schema_refs(service: &Service, method: &Method) -> Result<()> {
    for reference in [&method.request_ref, &method.response_ref]
        .into_iter()
        .flatten()
    {
        if service.schema(reference).is_none() {
            return Err(Error::malformed(format!(
                "method '{}' references unknown schema '{}'",
                method.name, reference
            )));
        }
    }
    Ok(())
}

fn finish_unit(
    arena: &CodeArena,
    decl: crate::codemodel::DeclId,
    name: &str,
    units: &mut Vec<SourceUnit>,
    issues: &mut Vec<GenerationIssue>,
) {
    match render::render(arena, decl) {
        Ok(text) => units.push(SourceUnit {
            file_name: ident::safe_file_name(name, "Unit"),
            text,
        }),
        Err(error) => issues.push(GenerationIssue {
            unit: name.to_string(),
            error,
        }),
    }
}
