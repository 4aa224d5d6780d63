//! Lexer for Go source files.
//!
//! This module implements the tokenizer using the logos library. Tokens
//! carry byte spans only; text is sliced from the source on demand so that
//! type expressions can be reproduced exactly as written.

use std::ops::Range;

use logos::Logos;

use crate::error::ScanError;

/// Token kinds relevant to declaration scanning.
///
/// Keywords the scanner never branches on are lexed as identifiers.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Whitespace (skip)
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    /// Block comment; `true` when it spans a line break.
    #[token("/*", lex_block_comment)]
    BlockComment(bool),

    #[token("\n")]
    Newline,

    // Keywords (must come before identifiers)
    #[token("package")]
    Package,

    #[token("type")]
    Type,

    #[token("struct")]
    Struct,

    #[token("interface")]
    Interface,

    #[token("func")]
    Func,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Rune,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,

    #[token("*")]
    Star,

    /// Any other operator character; the scanner never needs to tell them apart.
    #[regex(r"[+\-/%&|^<>=!:~]")]
    Op,
}

impl TokenKind {
    pub fn is_string_literal(self) -> bool {
        matches!(self, TokenKind::String | TokenKind::RawString)
    }

    /// The closing delimiter matching an opening one.
    pub fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::LeftParen => Some(TokenKind::RightParen),
            TokenKind::LeftBrace => Some(TokenKind::RightBrace),
            TokenKind::LeftBracket => Some(TokenKind::RightBracket),
            _ => None,
        }
    }

    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::RightParen | TokenKind::RightBrace | TokenKind::RightBracket
        )
    }
}

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> Option<bool> {
    // We've already consumed "/*", now find "*/"
    let remainder = lex.remainder();
    let end = remainder.find("*/")?;
    let spans_lines = remainder[..end].contains('\n');
    lex.bump(end + 2);
    Some(spans_lines)
}

/// A token and its byte range in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Tokenizes a whole file.
///
/// Comments are dropped; a block comment containing a line break is
/// replaced by a [`TokenKind::Newline`] so it still separates fields.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(TokenKind::BlockComment(true)) => tokens.push(Token {
                kind: TokenKind::Newline,
                span,
            }),
            Ok(TokenKind::BlockComment(false)) => {}
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => return Err(lex_error(source, span)),
        }
    }

    Ok(tokens)
}

fn lex_error(source: &str, span: Range<usize>) -> ScanError {
    let rest = &source[span.start..];
    let message = if rest.starts_with("/*") {
        "unterminated block comment".to_string()
    } else if rest.starts_with('"') {
        "unterminated string literal".to_string()
    } else if rest.starts_with('`') {
        "unterminated raw string literal".to_string()
    } else if rest.starts_with('\'') {
        "malformed rune literal".to_string()
    } else {
        let ch = rest.chars().next().unwrap_or('\0');
        format!("unexpected character {ch:?}")
    };
    ScanError::lex(source, span.start, message)
}
