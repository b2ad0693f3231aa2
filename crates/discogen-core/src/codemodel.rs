//! The language-agnostic code model (IR).
//!
//! Declarations live in a [`CodeArena`] and are addressed by [`DeclId`].
//! Decorators append members by id rather than through shared mutable
//! references, which keeps the single-writer rule of a generation pass
//! explicit. Once a pass finishes, the arena is handed to the renderer by
//! shared reference and is no longer mutated.

use crate::error::{Error, Result};
use serde::Serialize;

/// Index of a declaration in its [`CodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeclId(usize);

/// Visibility of a declaration in the target grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    Internal,
}

/// An expression in a member body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    /// A string literal
    StringLiteral(String),
    /// Construction of a new instance of the named type
    New(String),
}

/// A statement in a member body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    Return(Expr),
}

/// What a declaration is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DeclKind {
    /// A class: a named, ordered collection of members
    Class,
    /// A property with optional getter body
    Property {
        /// Target-grammar type of the property
        ty: String,
        /// Whether the property has a getter
        has_get: bool,
        /// Whether the property has a setter
        has_set: bool,
        /// Getter body; empty means an auto-implemented accessor
        get_statements: Vec<Statement>,
    },
    /// A method with a body
    Method {
        /// Target-grammar return type
        return_ty: String,
        /// Method body
        statements: Vec<Statement>,
    },
    /// A string constant
    Constant {
        /// Literal value
        value: String,
    },
}

/// A single declaration in the code model
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    /// Identifier of the declaration, already sanitized by the caller
    pub name: String,
    /// Visibility in the target grammar
    pub visibility: Visibility,
    /// Doc comment text, already sanitized by the caller
    pub doc: Option<String>,
    /// What the declaration is
    pub kind: DeclKind,
    /// Members in insertion order
    pub members: Vec<DeclId>,
}

/// Arena owning every declaration of one generation session
#[derive(Debug, Default, Serialize)]
pub struct CodeArena {
    decls: Vec<Declaration>,
}

impl CodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a declaration by id
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0]
    }

    /// Names of a declaration's members, in insertion order
    pub fn member_names(&self, id: DeclId) -> Vec<&str> {
        self.decl(id)
            .members
            .iter()
            .map(|m| self.decl(*m).name.as_str())
            .collect()
    }

    /// Create a new public class declaration
    pub fn new_class(&mut self, name: impl Into<String>) -> DeclId {
        self.push(Declaration {
            name: name.into(),
            visibility: Visibility::Public,
            doc: None,
            kind: DeclKind::Class,
            members: Vec::new(),
        })
    }

    /// Create a new public property declaration
    pub fn new_property(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        has_get: bool,
        has_set: bool,
    ) -> DeclId {
        self.push(Declaration {
            name: name.into(),
            visibility: Visibility::Public,
            doc: None,
            kind: DeclKind::Property {
                ty: ty.into(),
                has_get,
                has_set,
                get_statements: Vec::new(),
            },
            members: Vec::new(),
        })
    }

    /// Create a new public method declaration
    pub fn new_method(
        &mut self,
        name: impl Into<String>,
        return_ty: impl Into<String>,
        statements: Vec<Statement>,
    ) -> DeclId {
        self.push(Declaration {
            name: name.into(),
            visibility: Visibility::Public,
            doc: None,
            kind: DeclKind::Method {
                return_ty: return_ty.into(),
                statements,
            },
            members: Vec::new(),
        })
    }

    /// Create a new public string constant declaration
    pub fn new_constant(&mut self, name: impl Into<String>, value: impl Into<String>) -> DeclId {
        self.push(Declaration {
            name: name.into(),
            visibility: Visibility::Public,
            doc: None,
            kind: DeclKind::Constant {
                value: value.into(),
            },
            members: Vec::new(),
        })
    }

    /// Attach a doc comment to a declaration
    pub fn set_doc(&mut self, id: DeclId, doc: Option<String>) {
        self.decls[id.0].doc = doc;
    }

    /// Append `member` to `parent`'s member collection.
    ///
    /// Member names must be unique within a declaration, case-sensitively.
    /// Collisions are expected to have been resolved by the identifier
    /// sanitizer before insertion; a duplicate here is an error.
    pub fn push_member(&mut self, parent: DeclId, member: DeclId) -> Result<()> {
        let name = self.decls[member.0].name.clone();
        if self
            .decl(parent)
            .members
            .iter()
            .any(|m| self.decl(*m).name == name)
        {
            return Err(Error::collision(format!(
                "member '{}' already exists in '{}'",
                name,
                self.decl(parent).name
            )));
        }
        self.decls[parent.0].members.push(member);
        Ok(())
    }

    fn push(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len());
        self.decls.push(decl);
        id
    }
}

/// Build a literal-valued read-only property.
///
/// This is the single place such properties are constructed: public, a getter
/// with exactly one return statement yielding the literal, and no setter.
/// Every decorator that synthesizes a public-facing constant property goes
/// through here so the generated shape stays consistent.
pub fn generate_constant_property(arena: &mut CodeArena, name: &str, value: &str) -> DeclId {
    arena.push(Declaration {
        name: name.to_string(),
        visibility: Visibility::Public,
        doc: None,
        kind: DeclKind::Property {
            ty: "string".to_string(),
            has_get: true,
            has_set: false,
            get_statements: vec![Statement::Return(Expr::StringLiteral(value.to_string()))],
        },
        members: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_constant_property_shape() {
        let mut arena = CodeArena::new();
        let id = generate_constant_property(&mut arena, "Name", "Value");
        let decl = arena.decl(id);

        assert_eq!(decl.name, "Name");
        assert_eq!(decl.visibility, Visibility::Public);
        match &decl.kind {
            DeclKind::Property {
                has_get,
                has_set,
                get_statements,
                ..
            } => {
                assert!(*has_get);
                assert!(!*has_set);
                assert_eq!(get_statements.len(), 1);
                assert_eq!(
                    get_statements[0],
                    Statement::Return(Expr::StringLiteral("Value".to_string()))
                );
            }
            other => panic!("expected property, got {:?}", other),
        }
    }

    #[test]
    fn test_push_member_preserves_insertion_order() {
        let mut arena = CodeArena::new();
        let class = arena.new_class("Request");
        let b = arena.new_constant("B", "1");
        let a = arena.new_constant("A", "2");
        arena.push_member(class, b).unwrap();
        arena.push_member(class, a).unwrap();
        assert_eq!(arena.member_names(class), vec!["B", "A"]);
    }

    #[test]
    fn test_push_member_rejects_duplicates() {
        let mut arena = CodeArena::new();
        let class = arena.new_class("Request");
        let first = arena.new_constant("Name", "1");
        let second = arena.new_constant("Name", "2");
        arena.push_member(class, first).unwrap();
        let err = arena.push_member(class, second).unwrap_err();
        assert!(matches!(err, Error::IdentifierCollision(_)));
        // Case matters: "name" and "Name" may coexist.
        let lower = arena.new_constant("name", "3");
        arena.push_member(class, lower).unwrap();
    }
}
