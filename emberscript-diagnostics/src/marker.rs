use std::collections::{btree_map::Entry, BTreeMap};

use emberscript_lexer::Token;

/// A syntax or semantic error the compiler reports against a single token.
#[derive(Debug, Clone)]
pub struct ParserError {
    pub token: Token,
    pub message: String,
}

impl ParserError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }
}

/// One highlighted stretch of characters within a marker's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpan {
    pub column: u32,
    pub length: u32,
}

/// A per-line diagnostic record the editor renders as underlines.
///
/// Every source line with at least one error gets exactly one marker;
/// multiple errors on the same line fold into its description and spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMarker {
    pub line: u32,
    pub description: String,
    pub spans: Vec<MarkerSpan>,
}

/// The full marker state for a document, keyed by line.
pub type MarkerSet = BTreeMap<u32, DiagnosticMarker>;

/// Folds compiler errors into per-line markers, in the order received.
///
/// Span lengths are measured in characters of the offending token's text.
/// Messages for the same line are appended to the existing description.
pub fn aggregate(errors: impl IntoIterator<Item = ParserError>) -> MarkerSet {
    let mut markers = MarkerSet::new();
    for error in errors {
        let span = MarkerSpan {
            column: error.token.column,
            length: error.token.char_len(),
        };
        match markers.entry(error.token.line) {
            Entry::Occupied(entry) => {
                let marker = entry.into_mut();
                marker.description.push_str(&error.message);
                marker.spans.push(span);
            }
            Entry::Vacant(entry) => {
                entry.insert(DiagnosticMarker {
                    line: error.token.line,
                    description: error.message,
                    spans: vec![span],
                });
            }
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use emberscript_lexer::TokenKind;

    use super::*;

    fn error_at(line: u32, column: u32, text: &str, message: &str) -> ParserError {
        ParserError::new(
            Token {
                kind: TokenKind::Identifier,
                text: text.to_owned(),
                line,
                column,
            },
            message,
        )
    }

    #[test]
    fn same_line_errors_fold_into_one_marker() {
        let markers = aggregate([
            error_at(4, 2, "foo", "unknown function `foo`"),
            error_at(4, 9, "barbaz", "missing argument"),
        ]);
        assert_eq!(markers.len(), 1);

        let marker = &markers[&4];
        assert_eq!(
            marker.spans,
            [
                MarkerSpan { column: 2, length: 3 },
                MarkerSpan { column: 9, length: 6 },
            ]
        );
        assert!(marker.description.contains("unknown function `foo`"));
        assert!(marker.description.contains("missing argument"));
    }

    #[test]
    fn distinct_lines_get_distinct_markers() {
        let markers = aggregate([
            error_at(4, 2, "a", "first"),
            error_at(4, 9, "b", "second"),
            error_at(7, 0, "c", "third"),
        ]);
        assert_eq!(markers.keys().copied().collect::<Vec<_>>(), [4, 7]);
        assert_eq!(markers[&4].spans.len(), 2);
        assert_eq!(markers[&7].spans.len(), 1);
    }

    #[test]
    fn no_errors_mean_no_markers() {
        assert!(aggregate([]).is_empty());
    }

    #[test]
    fn span_length_counts_characters_not_bytes() {
        let markers = aggregate([error_at(0, 3, "żółw", "not a verb")]);
        assert_eq!(markers[&0].spans, [MarkerSpan { column: 3, length: 4 }]);
    }
}
