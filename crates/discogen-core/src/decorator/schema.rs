//! Decorator for generated schema classes.

use crate::codemodel::{CodeArena, DeclId};
use crate::discovery::Schema;
use crate::error::Result;
use crate::ident;

use super::{target_type, unique_member_name};

/// Appends one get/set property per schema field, in document order.
///
/// Field types that reference other schemas resolve to the referenced class
/// name only; nothing is expanded inline, so self-referential and cyclic
/// schemas terminate like any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaFieldDecorator;

impl SchemaFieldDecorator {
    pub fn decorate_class(
        &self,
        schema: &Schema,
        arena: &mut CodeArena,
        decl: DeclId,
    ) -> Result<()> {
        for (ordinal, field) in schema.fields.iter().enumerate() {
            let name = unique_member_name(arena, decl, &field.name, ordinal);
            let prop = arena.new_property(name, target_type(&field.field_type), true, true);
            if let Some(desc) = &field.description {
                arena.set_doc(prop, Some(ident::sanitize_doc(desc)));
            }
            arena.push_member(decl, prop)?;
        }
        Ok(())
    }
}
