//! Rendering of the code model into target-language (C#) source text.
//!
//! `render` is a pure function of the arena: the same code model always
//! yields byte-identical text. Formatting is fixed at four-space indents with
//! one blank line between members.

use std::fmt::Write;

use crate::codemodel::{CodeArena, DeclId, DeclKind, Expr, Statement, Visibility};
use crate::error::{Error, Result};

const INDENT: &str = "    ";

/// Render a declaration (usually a class) into source text.
///
/// Fails with [`Error::UnsupportedConstruct`] when a member combination the
/// target grammar cannot express is encountered, such as a setter-only
/// property. That is a generation-time configuration error; nothing about the
/// arena is mutated.
pub fn render(arena: &CodeArena, id: DeclId) -> Result<String> {
    let mut out = String::new();
    render_decl(arena, id, 0, &mut out)?;
    Ok(out)
}

fn render_decl(arena: &CodeArena, id: DeclId, level: usize, out: &mut String) -> Result<()> {
    let decl = arena.decl(id);
    let pad = INDENT.repeat(level);

    if let Some(doc) = &decl.doc {
        let _ = writeln!(out, "{}/// <summary>{}</summary>", pad, doc);
    }

    match &decl.kind {
        DeclKind::Class => {
            let _ = writeln!(out, "{}{} class {}", pad, keyword(decl.visibility), decl.name);
            let _ = writeln!(out, "{}{{", pad);
            for (i, member) in decl.members.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_decl(arena, *member, level + 1, out)?;
            }
            let _ = writeln!(out, "{}}}", pad);
        }
        DeclKind::Property {
            ty,
            has_get,
            has_set,
            get_statements,
        } => {
            render_property(decl, ty, *has_get, *has_set, get_statements, &pad, out)?;
        }
        DeclKind::Method {
            return_ty,
            statements,
        } => {
            let _ = writeln!(
                out,
                "{}{} {} {}()",
                pad,
                keyword(decl.visibility),
                return_ty,
                decl.name
            );
            let _ = writeln!(out, "{}{{", pad);
            for statement in statements {
                let _ = writeln!(out, "{}{}{}", pad, INDENT, render_statement(statement));
            }
            let _ = writeln!(out, "{}}}", pad);
        }
        DeclKind::Constant { value } => {
            let _ = writeln!(
                out,
                "{}{} const string {} = \"{}\";",
                pad,
                keyword(decl.visibility),
                decl.name,
                escape(value)
            );
        }
    }
    Ok(())
}

fn render_property(
    decl: &crate::codemodel::Declaration,
    ty: &str,
    has_get: bool,
    has_set: bool,
    get_statements: &[Statement],
    pad: &str,
    out: &mut String,
) -> Result<()> {
    if !has_get {
        // The target grammar has no setter-only or accessor-less properties.
        return Err(Error::unsupported(format!(
            "property '{}' has no getter",
            decl.name
        )));
    }

    let head = format!("{}{} {} {}", pad, keyword(decl.visibility), ty, decl.name);

    if get_statements.is_empty() {
        let accessors = if has_set { "{ get; set; }" } else { "{ get; }" };
        let _ = writeln!(out, "{} {}", head, accessors);
        return Ok(());
    }

    if has_set {
        // A bodied getter cannot be paired with an auto-implemented setter.
        return Err(Error::unsupported(format!(
            "property '{}' mixes a getter body with a setter",
            decl.name
        )));
    }

    let _ = writeln!(out, "{}", head);
    let _ = writeln!(out, "{}{{", pad);
    let body = get_statements
        .iter()
        .map(render_statement)
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{}{}get {{ {} }}", pad, INDENT, body);
    let _ = writeln!(out, "{}}}", pad);
    Ok(())
}

fn render_statement(statement: &Statement) -> String {
    match statement {
        Statement::Return(Expr::StringLiteral(value)) => {
            format!("return \"{}\";", escape(value))
        }
        Statement::Return(Expr::New(ty)) => format!("return new {}();", ty),
    }
}

fn keyword(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public",
        Visibility::Internal => "internal",
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codemodel::generate_constant_property;

    #[test]
    fn test_render_constant_property() {
        let mut arena = CodeArena::new();
        let prop = generate_constant_property(&mut arena, "RestPath", "a/{b}/c");
        let text = render(&arena, prop).unwrap();
        assert_eq!(
            text,
            "public string RestPath\n{\n    get { return \"a/{b}/c\"; }\n}\n"
        );
    }

    #[test]
    fn test_render_class_with_members() {
        let mut arena = CodeArena::new();
        let class = arena.new_class("MethodRequest");
        let constant = generate_constant_property(&mut arena, "HttpMethod", "GET");
        let auto = arena.new_property("MaxResults", "long?", true, true);
        arena.push_member(class, constant).unwrap();
        arena.push_member(class, auto).unwrap();

        let text = render(&arena, class).unwrap();
        assert_eq!(
            text,
            "public class MethodRequest\n\
             {\n\
             \x20   public string HttpMethod\n\
             \x20   {\n\
             \x20       get { return \"GET\"; }\n\
             \x20   }\n\
             \n\
             \x20   public long? MaxResults { get; set; }\n\
             }\n"
        );
    }

    #[test]
    fn test_render_method_and_constant() {
        let mut arena = CodeArena::new();
        let class = arena.new_class("Service");
        let constant = arena.new_constant("ServiceName", "calendar");
        let method = arena.new_method(
            "List",
            "ListRequest",
            vec![Statement::Return(Expr::New("ListRequest".to_string()))],
        );
        arena.push_member(class, constant).unwrap();
        arena.push_member(class, method).unwrap();

        let text = render(&arena, class).unwrap();
        assert!(text.contains("public const string ServiceName = \"calendar\";"));
        assert!(text.contains("public ListRequest List()\n    {\n        return new ListRequest();\n    }"));
    }

    #[test]
    fn test_setter_only_property_is_unsupported() {
        let mut arena = CodeArena::new();
        let prop = arena.new_property("Broken", "string", false, true);
        let err = render(&arena, prop).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstruct(_)));
    }

    #[test]
    fn test_doc_comment_emitted() {
        let mut arena = CodeArena::new();
        let prop = arena.new_property("Summary", "string", true, true);
        arena.set_doc(prop, Some("Title of the event".to_string()));
        let text = render(&arena, prop).unwrap();
        assert_eq!(
            text,
            "/// <summary>Title of the event</summary>\npublic string Summary { get; set; }\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut arena = CodeArena::new();
        let class = arena.new_class("X");
        let member = generate_constant_property(&mut arena, "MethodName", "m");
        arena.push_member(class, member).unwrap();
        assert_eq!(render(&arena, class).unwrap(), render(&arena, class).unwrap());
    }
}
