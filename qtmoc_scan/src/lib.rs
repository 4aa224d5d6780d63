//! Go declaration scanner.
//!
//! Only the parts of a Go file the generator needs are interpreted: the
//! package clause, top-level type declarations, struct field lists and field
//! tags. Everything else is tokenized and skipped, with delimiters kept
//! balanced so that malformed files are still rejected.

pub mod decl;
mod error;
pub mod lexer;
mod parser;

pub use decl::{FieldDecl, SourceFile, TypeDecl, TypeKind};
pub use error::ScanError;
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::scan_source;
