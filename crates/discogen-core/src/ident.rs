//! Identifier sanitization for generated code.
//!
//! Discovery documents name resources, methods, and parameters freely; the
//! target grammar does not. This module maps arbitrary document names to
//! valid, non-reserved identifiers, and cleans description text for use in
//! doc comments. All character classification is ASCII-only so sanitization
//! never depends on the process locale.

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved words of the target grammar (C# keywords).
///
/// A sanitized identifier that collides with one of these case-insensitively
/// gets the caller's unique suffix appended.
pub static CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Whether `c` may start an identifier: ASCII letters only.
pub fn is_valid_first_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Whether `c` may appear after the first position: ASCII letters and digits.
pub fn is_valid_body_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Upper-case only the first character of `s`.
///
/// Empty input passes through unchanged. Callers holding an `Option<&str>`
/// get the matching absent-input pass-through from `Option::map` for free.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

/// Lower-case only the first character of `s`.
///
/// Empty input passes through unchanged, as with [`upper_first`].
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}

/// Map an arbitrary document name to a valid, non-reserved identifier.
///
/// Characters are dropped until one that may lead an identifier is found,
/// then every non-body character is stripped. If nothing survives,
/// `unique_suffix` is returned verbatim. A case-insensitive collision with a
/// word in `reserved` appends `unique_suffix` to disambiguate; anything else
/// is returned unmodified, so already-safe names are stable.
pub fn make_safe_identifier<'a, I>(candidate: &str, unique_suffix: &str, reserved: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sanitized = String::new();
    for c in candidate.chars() {
        if sanitized.is_empty() {
            if is_valid_first_char(c) {
                sanitized.push(c);
            }
        } else if is_valid_body_char(c) {
            sanitized.push(c);
        }
    }

    if sanitized.is_empty() {
        return unique_suffix.to_string();
    }

    if reserved
        .into_iter()
        .any(|w| w.eq_ignore_ascii_case(&sanitized))
    {
        sanitized.push_str(unique_suffix);
    }
    sanitized
}

/// Sanitize a document name into a PascalCase class name.
pub fn safe_class_name(candidate: &str, unique_suffix: &str) -> String {
    upper_first(&make_safe_identifier(
        candidate,
        unique_suffix,
        CSHARP_KEYWORDS.iter().copied(),
    ))
}

/// Derive a source-unit file name from a document name.
pub fn safe_file_name(candidate: &str, unique_suffix: &str) -> String {
    format!("{}.cs", safe_class_name(candidate, unique_suffix))
}

// Problematic Unicode (smart quotes, em-dash) that turns up in discovery
// document descriptions.
static UNICODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[‘’“”—]").expect("valid regex"));
// Collapses any whitespace sequence into a single space.
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Sanitize description text for emission inside an XML doc comment.
///
/// Collapses whitespace, replaces smart quotes and em-dashes with their ASCII
/// forms, and escapes the XML-significant characters.
pub fn sanitize_doc(input: &str) -> String {
    let replaced = UNICODE_RE.replace_all(input, |caps: &regex::Captures| match &caps[0] {
        "\u{2018}" | "\u{2019}" => "'",
        "\u{201C}" | "\u{201D}" => "\"",
        "\u{2014}" => "-",
        _ => "",
    });
    let collapsed = WS_RE.replace_all(replaced.trim(), " ");
    collapsed
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
