//! Declaration tree produced by the scanner.

use std::ops::Range;

/// The declarations of one Go file that the generator cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    /// Name from the package clause, if the file has one.
    pub package: Option<String>,
    /// Top-level type declarations in source order, including those inside
    /// `type ( ... )` groups.
    pub types: Vec<TypeDecl>,
}

impl SourceFile {
    /// Struct declarations with their field lists.
    pub fn structs(&self) -> impl Iterator<Item = (&TypeDecl, &[FieldDecl])> {
        self.types.iter().filter_map(|decl| match &decl.kind {
            TypeKind::Struct(fields) => Some((decl, fields.as_slice())),
            TypeKind::Other => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Struct(Vec<FieldDecl>),
    /// Any non-struct type; its body is not interpreted.
    Other,
}

/// One line of a struct field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Declared names; empty for an embedded field.
    pub names: Vec<String>,
    /// The type expression exactly as written in the source.
    pub type_text: String,
    /// The tag literal including its quotes or backticks.
    pub tag: Option<String>,
    pub span: Range<usize>,
}

impl FieldDecl {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// Tag contents with the literal's quoting removed.
    ///
    /// Interpreted literals are unescaped first; every remaining quote or
    /// backtick is then dropped, so `` `signal:"clicked"` `` reads as
    /// `signal:clicked`.
    pub fn tag_text(&self) -> Option<String> {
        let raw = self.tag.as_deref()?;
        let unquoted = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            unescape(&raw[1..raw.len() - 1])
        } else {
            raw.to_string()
        };
        Some(unquoted.chars().filter(|c| *c != '"' && *c != '`').collect())
    }
}

fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some(c) => result.push(c),
                None => break,
            }
        } else {
            result.push(c);
        }
    }

    result
}
