//! Decorator for the generated service class.

use crate::codemodel::{CodeArena, DeclId};
use crate::discovery::Service;
use crate::error::Result;

/// Appends the service identity constants: name, version, and base URI.
///
/// A document without a version simply gets no `Version` constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceConstantDecorator;

impl ServiceConstantDecorator {
    pub fn decorate_class(
        &self,
        service: &Service,
        arena: &mut CodeArena,
        decl: DeclId,
    ) -> Result<()> {
        let name = arena.new_constant("ServiceName", &service.name);
        arena.push_member(decl, name)?;

        if let Some(version) = &service.version {
            let version = arena.new_constant("Version", version);
            arena.push_member(decl, version)?;
        }

        let base = arena.new_constant("BaseUri", &service.base_uri);
        arena.push_member(decl, base)?;
        Ok(())
    }
}

/// Appends an `Authenticator` property referencing the external
/// authorization surface.
///
/// The authorization subsystem itself is an opaque collaborator; generated
/// code only holds a reference to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceAuthDecorator;

impl ServiceAuthDecorator {
    pub fn decorate_class(
        &self,
        _service: &Service,
        arena: &mut CodeArena,
        decl: DeclId,
    ) -> Result<()> {
        let prop = arena.new_property("Authenticator", "IAuthenticator", true, true);
        arena.push_member(decl, prop)?;
        Ok(())
    }
}
