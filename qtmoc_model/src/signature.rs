//! The function-type mini-language carried by signal and slot fields.
//!
//! A field such as `Clicked func(x, y int, label string) bool` declares its
//! signature through its type. Grammar, over the type text:
//!
//! ```text
//! signature := ["func"] "(" [param ("," param)*] ")" [result]
//! param     := name type | token
//! ```
//!
//! Commas and whitespace only separate at nesting depth zero, so
//! `f func(int) string` or `m map[string]int` stay whole.

use crate::class::ParameterRecord;
use crate::registry::Registry;
use crate::types::is_type_name;

/// One comma-separated entry of a parameter list, before carry-back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParam {
    Named { name: String, ty: String },
    /// A lone token: either a type or a name sharing the next type.
    Single(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub params: Vec<RawParam>,
    /// Text after the closing parenthesis, if any.
    pub result: Option<String>,
}

/// Parses a field type as a signature; `None` when it has no parameter list.
pub fn parse_signature(type_text: &str) -> Option<Signature> {
    let text = type_text.trim();
    let text = text.strip_prefix("func").unwrap_or(text).trim_start();
    let inner = text.strip_prefix('(')?;

    let mut depth = 0usize;
    let mut close = None;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => {
                close = Some(i);
                break;
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    let (list, result) = match close {
        Some(i) => (&inner[..i], inner[i + 1..].trim()),
        None => (inner, ""),
    };

    let params = split_top_level(list, |c| c == ',')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(raw_param)
        .collect();

    Some(Signature {
        params,
        result: (!result.is_empty()).then(|| result.to_string()),
    })
}

fn raw_param(piece: &str) -> RawParam {
    match split_once_top_level(piece, char::is_whitespace) {
        Some((name, ty)) if !ty.trim().is_empty() => RawParam::Named {
            name: name.to_string(),
            ty: ty.trim().to_string(),
        },
        _ => RawParam::Single(piece.to_string()),
    }
}

fn split_top_level(text: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some((head, tail)) = split_once_top_level(rest, &is_sep) {
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    parts
}

fn split_once_top_level(text: &str, is_sep: impl Fn(char) -> bool) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if depth == 0 && is_sep(c) => return Some((&text[..i], &text[i + c.len_utf8()..])),
            _ => {}
        }
    }
    None
}

/// Turns raw parameters into records using the carry-back rule.
///
/// Walks right to left remembering the last explicit type. A lone token
/// that is a type becomes parameter `v{index}` of that type; a lone token
/// that is not a type is a name reusing the remembered type. With nothing
/// remembered yet the token is kept as a type.
pub fn resolve_parameters(params: &[RawParam], registry: &Registry) -> Vec<ParameterRecord> {
    let mut carried: Option<&str> = None;
    let mut out = Vec::with_capacity(params.len());

    for (i, param) in params.iter().enumerate().rev() {
        match param {
            RawParam::Named { name, ty } => {
                carried = Some(ty.as_str());
                out.push(ParameterRecord::new(name.as_str(), ty.as_str()));
            }
            RawParam::Single(token) => match carried {
                Some(ty) if !is_type_name(registry, token) => {
                    out.push(ParameterRecord::new(token.as_str(), ty));
                }
                _ => out.push(ParameterRecord::new(format!("v{i}"), token.as_str())),
            },
        }
    }

    out.reverse();
    out
}
