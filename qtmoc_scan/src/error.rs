use thiserror::Error;

/// A file that could not be tokenized or whose declarations are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("{line}:{column}: {message}")]
    Lex {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{line}:{column}: expected {expected}, found {found}")]
    Parse {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },
}

impl ScanError {
    pub(crate) fn lex(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_col(source, offset);
        ScanError::Lex {
            line,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn parse(
        source: &str,
        offset: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        let (line, column) = line_col(source, offset);
        ScanError::Parse {
            line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ScanError::Lex { line, .. } | ScanError::Parse { line, .. } => *line,
        }
    }
}

/// 1-based line and column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        assert_eq!(line_col("abc", 0), (1, 1));
        assert_eq!(line_col("abc\ndef", 5), (2, 2));
        assert_eq!(line_col("a\n", 2), (2, 1));
    }
}
