//! Declaration parser.
//!
//! Walks the token stream once. At brace depth zero it interprets the
//! package clause and `type` declarations; every other token is skipped
//! while keeping a delimiter stack, so unbalanced input is rejected.

use crate::decl::{FieldDecl, SourceFile, TypeDecl, TypeKind};
use crate::error::ScanError;
use crate::lexer::{Token, TokenKind, tokenize};

type ParseResult<T> = Result<T, ScanError>;

/// Scans one Go source file.
pub fn scan_source(source: &str) -> Result<SourceFile, ScanError> {
    let tokens = tokenize(source)?;
    let file = Parser::new(source, tokens).parse_file()?;
    tracing::event!(
        tracing::Level::TRACE,
        "Scanned package {:?}: {} type declarations",
        file.package,
        file.types.len()
    );
    Ok(file)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn bump(&mut self) -> ParseResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| self.error_here("token"))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.at(kind) {
            self.bump()
        } else {
            Err(self.error_here(expected))
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.peek_kind(),
            Some(TokenKind::Newline | TokenKind::Semicolon)
        ) {
            self.pos += 1;
        }
    }

    fn error_here(&self, expected: &str) -> ScanError {
        match self.peek() {
            Some(token) => ScanError::parse(
                self.source,
                token.span.start,
                expected,
                describe(token, self.source),
            ),
            None => ScanError::parse(self.source, self.source.len(), expected, "end of file"),
        }
    }

    fn parse_file(mut self) -> ParseResult<SourceFile> {
        let mut file = SourceFile::default();
        let mut open: Vec<Token> = Vec::new();

        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Package if open.is_empty() && file.package.is_none() => {
                    self.bump()?;
                    let name = self.expect(TokenKind::Ident, "package name")?;
                    file.package = Some(name.text(self.source).to_string());
                }
                TokenKind::Type if open.is_empty() => {
                    self.bump()?;
                    self.parse_type_decl(&mut file.types)?;
                }
                _ => self.track_delimiter(&mut open)?,
            }
        }

        if let Some(unclosed) = open.last() {
            let expected = closer_text(unclosed.kind);
            return Err(ScanError::parse(
                self.source,
                self.source.len(),
                expected,
                "end of file",
            ));
        }

        Ok(file)
    }

    /// Consumes one token, pushing or popping the delimiter stack.
    fn track_delimiter(&mut self, open: &mut Vec<Token>) -> ParseResult<()> {
        let token = self.bump()?;
        if token.kind.closer().is_some() {
            open.push(token);
        } else if token.kind.is_closer() {
            match open.pop() {
                Some(opener) if opener.kind.closer() == Some(token.kind) => {}
                Some(opener) => {
                    return Err(ScanError::parse(
                        self.source,
                        token.span.start,
                        closer_text(opener.kind),
                        describe(&token, self.source),
                    ));
                }
                None => {
                    return Err(ScanError::parse(
                        self.source,
                        token.span.start,
                        "declaration",
                        describe(&token, self.source),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Parses what follows the `type` keyword: a single spec or a group.
    fn parse_type_decl(&mut self, out: &mut Vec<TypeDecl>) -> ParseResult<()> {
        if self.at(TokenKind::LeftParen) {
            self.bump()?;
            loop {
                self.skip_separators();
                match self.peek_kind() {
                    Some(TokenKind::RightParen) => {
                        self.bump()?;
                        return Ok(());
                    }
                    Some(_) => out.push(self.parse_type_spec()?),
                    None => return Err(self.error_here("')'")),
                }
            }
        }

        out.push(self.parse_type_spec()?);
        Ok(())
    }

    fn parse_type_spec(&mut self) -> ParseResult<TypeDecl> {
        let name = self.expect(TokenKind::Ident, "type name")?;
        let start = name.span.start;

        if self.at(TokenKind::LeftBracket) && self.has_type_params() {
            self.skip_balanced()?;
        }
        if self.peek_kind() == Some(TokenKind::Op)
            && self.peek().map(|t| t.text(self.source)) == Some("=")
        {
            self.bump()?;
        }

        let kind = if self.at(TokenKind::Struct) {
            self.bump()?;
            self.expect(TokenKind::LeftBrace, "'{'")?;
            TypeKind::Struct(self.parse_struct_body()?)
        } else {
            self.skip_type()?;
            TypeKind::Other
        };

        let end = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map_or(start, |t| t.span.end);

        Ok(TypeDecl {
            name: name.text(self.source).to_string(),
            kind,
            span: start..end,
        })
    }

    /// `type T[P any] ...` versus the array type in `type T [N]int`.
    fn has_type_params(&self) -> bool {
        self.peek_nth_kind(1) == Some(TokenKind::Ident)
            && self.peek_nth_kind(2) != Some(TokenKind::RightBracket)
    }

    /// Skips a non-struct type up to the end of its spec.
    fn skip_type(&mut self) -> ParseResult<()> {
        let mut open = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if open.is_empty()
                && matches!(
                    kind,
                    TokenKind::Newline | TokenKind::Semicolon | TokenKind::RightParen
                )
            {
                break;
            }
            self.track_delimiter(&mut open)?;
        }
        if open.is_empty() {
            Ok(())
        } else {
            Err(self.error_here("closing delimiter"))
        }
    }

    /// Skips one delimited group, the current token being its opener.
    fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut open = Vec::new();
        self.track_delimiter(&mut open)?;
        while !open.is_empty() {
            if self.peek().is_none() {
                return Err(self.error_here("closing delimiter"));
            }
            self.track_delimiter(&mut open)?;
        }
        Ok(())
    }

    /// Parses fields up to and including the struct's closing brace.
    fn parse_struct_body(&mut self) -> ParseResult<Vec<FieldDecl>> {
        let mut fields = Vec::new();
        loop {
            self.skip_separators();
            match self.peek_kind() {
                Some(TokenKind::RightBrace) => {
                    self.bump()?;
                    return Ok(fields);
                }
                Some(_) => fields.push(self.parse_field()?),
                None => return Err(self.error_here("'}'")),
            }
        }
    }

    fn parse_field(&mut self) -> ParseResult<FieldDecl> {
        let mut tokens = Vec::new();
        let mut open = Vec::new();

        while let Some(kind) = self.peek_kind() {
            if open.is_empty()
                && matches!(
                    kind,
                    TokenKind::Newline | TokenKind::Semicolon | TokenKind::RightBrace
                )
            {
                break;
            }
            let before = self.pos;
            self.track_delimiter(&mut open)?;
            let token = &self.tokens[before];
            if token.kind != TokenKind::Newline {
                tokens.push(token.clone());
            }
        }
        if !open.is_empty() {
            return Err(self.error_here("closing delimiter"));
        }

        self.field_from_tokens(tokens)
    }

    fn field_from_tokens(&self, mut tokens: Vec<Token>) -> ParseResult<FieldDecl> {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(self.error_here("field"));
        };
        let span = first.span.start..last.span.end;

        let tag = if tokens.len() > 1 && last.kind.is_string_literal() {
            tokens.pop().map(|t| t.text(self.source).to_string())
        } else {
            None
        };

        let mut names = Vec::new();
        let mut type_start = 0;
        if tokens.len() > 1
            && tokens[0].kind == TokenKind::Ident
            && tokens[1].kind != TokenKind::Dot
        {
            // IdentifierList Type
            let mut i = 0;
            loop {
                names.push(tokens[i].text(self.source).to_string());
                i += 1;
                if tokens.get(i).map(|t| t.kind) == Some(TokenKind::Comma) {
                    i += 1;
                    match tokens.get(i) {
                        Some(t) if t.kind == TokenKind::Ident => continue,
                        Some(t) => {
                            return Err(ScanError::parse(
                                self.source,
                                t.span.start,
                                "field name",
                                describe(t, self.source),
                            ));
                        }
                        None => return Err(self.error_here("field name")),
                    }
                }
                break;
            }
            type_start = i;
        }

        let type_tokens = &tokens[type_start..];
        let (Some(type_first), Some(type_last)) = (type_tokens.first(), type_tokens.last()) else {
            return Err(self.error_here("field type"));
        };
        let type_text = self.source[type_first.span.start..type_last.span.end].to_string();

        Ok(FieldDecl {
            names,
            type_text,
            tag,
            span,
        })
    }
}

fn describe(token: &Token, source: &str) -> String {
    match token.kind {
        TokenKind::Newline => "newline".to_string(),
        _ => format!("'{}'", token.text(source)),
    }
}

fn closer_text(opener: TokenKind) -> &'static str {
    match opener {
        TokenKind::LeftParen => "')'",
        TokenKind::LeftBracket => "']'",
        _ => "'}'",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_struct() {
        let file = scan_source("package main\n\ntype A struct {\n\tx int\n}\n").unwrap();
        assert_eq!(file.package.as_deref(), Some("main"));
        assert_eq!(file.types.len(), 1);
        let TypeKind::Struct(fields) = &file.types[0].kind else {
            panic!("expected struct");
        };
        assert_eq!(fields[0].names, vec!["x"]);
        assert_eq!(fields[0].type_text, "int");
    }

    #[test]
    fn local_types_are_ignored() {
        let file = scan_source("package main\nfunc f() {\n\ttype local struct{}\n}\n").unwrap();
        assert!(file.types.is_empty());
    }

    #[test]
    fn array_type_is_not_generic() {
        let file = scan_source("package main\ntype Buf [N]int\ntype B struct{}\n").unwrap();
        assert_eq!(file.types.len(), 2);
        assert_eq!(file.types[0].kind, TypeKind::Other);
    }
}
