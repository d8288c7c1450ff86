use tracing::{debug, error, warn};

use crate::{
    language::LanguageDefinition,
    token::{Token, TokenKind},
};

/// Scans `source` into an ordered token sequence.
///
/// The scan is total: malformed input never aborts it. Unrecognized
/// characters and lone `!` are logged and skipped, an unterminated string or
/// block comment ends the scan at end of input, and everything else becomes
/// a token. Each revision of the text needs a fresh call; there is no
/// incremental mode.
pub fn tokenize(source: &str, lang: &LanguageDefinition) -> Vec<Token> {
    Lexer::new(source, lang).scan()
}

struct Lexer<'a> {
    input: &'a str,
    lang: &'a LanguageDefinition,
    position: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, lang: &'a LanguageDefinition) -> Self {
        Self {
            input,
            lang,
            position: 0,
            line: 0,
            column: 0,
            tokens: vec![],
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_char(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn advance_char(&mut self) {
        if let Some(char) = self.current_char() {
            self.position += char.len_utf8();
            match char {
                '\n' => {
                    self.line += 1;
                    self.column = 0;
                }
                // \r never counts toward column or line.
                '\r' => (),
                _ => self.column += 1,
            }
        }
    }

    /// Emits the token whose text started at byte offset `start`. The column
    /// is computed retroactively: the cursor's column minus the buffered
    /// length.
    fn emit(&mut self, kind: TokenKind, start: usize) {
        let text = &self.input[start..self.position];
        let char_len = text.chars().count() as u32;
        self.tokens.push(Token {
            kind,
            text: text.to_owned(),
            line: self.line,
            column: self.column.saturating_sub(char_len),
        });
    }

    fn scan(mut self) -> Vec<Token> {
        while let Some(char) = self.current_char() {
            match char {
                ' ' | '\t' | '\r' | '\n' => self.advance_char(),
                'a'..='z' | 'A'..='Z' | '_' => self.identifier_like(),
                '0'..='9' => self.number(),
                '"' => self.string(),
                '/' => self.comment_or_slash(),
                '=' => self.single_or_double_char_token(TokenKind::Assign, '=', TokenKind::Equal),
                '<' => {
                    self.single_or_double_char_token(TokenKind::LessThan, '=', TokenKind::LessOrEqual)
                }
                '>' => self.single_or_double_char_token(
                    TokenKind::GreaterThan,
                    '=',
                    TokenKind::GreaterOrEqual,
                ),
                '!' => self.not_equal(),
                ':' => self.namespace_resolver(),
                '+' => self.single_char_token(TokenKind::Plus),
                '-' => self.single_char_token(TokenKind::Minus),
                '*' => self.single_char_token(TokenKind::Star),
                ';' => self.single_char_token(TokenKind::Semicolon),
                ',' => self.single_char_token(TokenKind::Comma),
                '(' => self.single_char_token(TokenKind::OpenParen),
                ')' => self.single_char_token(TokenKind::CloseParen),
                '{' => self.single_char_token(TokenKind::OpenBrace),
                '}' => self.single_char_token(TokenKind::CloseBrace),
                unknown => {
                    error!(
                        line = self.line,
                        column = self.column,
                        "could not identify token: {unknown:?}"
                    );
                    self.advance_char();
                }
            }
        }
        self.tokens
    }

    fn identifier_like(&mut self) {
        let start = self.position;
        while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = self.current_char() {
            self.advance_char();
        }
        let text = &self.input[start..self.position];
        // Keywords shadow everything, so a catalogue that accidentally lists
        // a keyword as a type name still lexes it as a keyword.
        let kind = if self.lang.is_keyword(text) {
            TokenKind::Keyword
        } else if text == "true" || text == "false" {
            TokenKind::BooleanLiteral
        } else if self.lang.is_primitive_type(text) {
            TokenKind::PrimitiveType
        } else {
            TokenKind::Identifier
        };
        self.emit(kind, start);
    }

    fn number(&mut self) {
        let start = self.position;
        while let Some('0'..='9') = self.current_char() {
            self.advance_char();
        }
        // `1.` with no fractional digit is an int followed by whatever the
        // dot turns out to be, not a float.
        if self.current_char() == Some('.') && matches!(self.peek_char(), Some('0'..='9')) {
            self.advance_char();
            while let Some('0'..='9') = self.current_char() {
                self.advance_char();
            }
            if self.current_char() == Some('f') {
                self.advance_char();
            }
            self.emit(TokenKind::FloatLiteral, start);
        } else {
            self.emit(TokenKind::IntegerLiteral, start);
        }
    }

    fn string(&mut self) {
        let start = self.position;
        self.advance_char();
        while self.current_char() != Some('"') {
            if self.current_char().is_none() {
                debug!(
                    line = self.line,
                    "string literal not terminated before end of input"
                );
                return;
            }
            self.advance_char();
        }
        self.advance_char();
        // The quotes are part of the token text.
        self.emit(TokenKind::StringLiteral, start);
    }

    fn comment_or_slash(&mut self) {
        match self.peek_char() {
            Some('/') => {
                while !matches!(self.current_char(), None | Some('\n')) {
                    self.advance_char();
                }
            }
            Some('*') => {
                let opening_line = self.line;
                self.advance_char();
                self.advance_char();
                loop {
                    match self.current_char() {
                        Some('*') if self.peek_char() == Some('/') => {
                            self.advance_char();
                            self.advance_char();
                            break;
                        }
                        None => {
                            debug!(
                                line = opening_line,
                                "block comment not terminated before end of input"
                            );
                            break;
                        }
                        _ => self.advance_char(),
                    }
                }
            }
            _ => self.single_char_token(TokenKind::Slash),
        }
    }

    fn not_equal(&mut self) {
        if self.peek_char() == Some('=') {
            let start = self.position;
            self.advance_char();
            self.advance_char();
            self.emit(TokenKind::NotEqual, start);
        } else {
            warn!(
                line = self.line,
                column = self.column,
                "invalid token: `!` must be followed by `=`"
            );
            self.advance_char();
        }
    }

    fn namespace_resolver(&mut self) {
        if self.peek_char() == Some(':') {
            let start = self.position;
            self.advance_char();
            self.advance_char();
            self.emit(TokenKind::NamespaceResolver, start);
        } else {
            error!(
                line = self.line,
                column = self.column,
                "could not identify token: a single `:` is not valid syntax"
            );
            self.advance_char();
        }
    }

    fn single_char_token(&mut self, kind: TokenKind) {
        let start = self.position;
        self.advance_char();
        self.emit(kind, start);
    }

    fn single_or_double_char_token(&mut self, kind: TokenKind, second: char, second_kind: TokenKind) {
        let start = self.position;
        self.advance_char();
        if self.current_char() == Some(second) {
            self.advance_char();
            self.emit(second_kind, start);
        } else {
            self.emit(kind, start);
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn lang() -> LanguageDefinition {
        LanguageDefinition::new(
            ["if", "else", "while", "return"],
            ["int", "float", "bool", "string"],
        )
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|token| token.kind).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn declaration() {
        let tokens = tokenize("int x = 5;", &lang());
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::PrimitiveType,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntegerLiteral,
                TokenKind::Semicolon,
            ]
        );
        assert_eq!(texts(&tokens), ["int", "x", "=", "5", ";"]);
    }

    #[test]
    fn condition_with_float() {
        let tokens = tokenize("if (x >= 3.5f) {}", &lang());
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Keyword,
                TokenKind::OpenParen,
                TokenKind::Identifier,
                TokenKind::GreaterOrEqual,
                TokenKind::FloatLiteral,
                TokenKind::CloseParen,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
            ]
        );
        assert_eq!(tokens[4].text, "3.5f");
    }

    #[test]
    fn line_comment_is_skipped() {
        let tokens = tokenize("// comment\nx", &lang());
        assert_eq!(kinds(&tokens), [TokenKind::Identifier]);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].column, 0);
    }

    #[test]
    fn block_comment_is_skipped() {
        let tokens = tokenize("a /* b\nc */ d", &lang());
        assert_eq!(texts(&tokens), ["a", "d"]);
        assert_eq!(tokens[1].line, 1);
    }

    #[test]
    fn unterminated_block_comment_ends_scan() {
        let tokens = tokenize("a /* never closed", &lang());
        assert_eq!(texts(&tokens), ["a"]);
    }

    #[test]
    fn string_literal_keeps_quotes() {
        let tokens = tokenize(r#"name = "Ember";"#, &lang());
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].text, r#""Ember""#);
    }

    #[test]
    fn unterminated_string_emits_no_token() {
        let tokens = tokenize(r#"x = "oops"#, &lang());
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Identifier, TokenKind::Assign]
        );
    }

    #[test]
    fn operator_maximal_munch() {
        assert_eq!(kinds(&tokenize("==", &lang())), [TokenKind::Equal]);
        assert_eq!(
            kinds(&tokenize("= =", &lang())),
            [TokenKind::Assign, TokenKind::Assign]
        );
        assert_eq!(
            kinds(&tokenize("a<=b<c", &lang())),
            [
                TokenKind::Identifier,
                TokenKind::LessOrEqual,
                TokenKind::Identifier,
                TokenKind::LessThan,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn namespace_resolver() {
        let tokens = tokenize("Audio::play", &lang());
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Identifier,
                TokenKind::NamespaceResolver,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn lone_colon_is_skipped() {
        let tokens = tokenize("a : b", &lang());
        assert_eq!(texts(&tokens), ["a", "b"]);
    }

    #[test]
    fn lone_bang_is_skipped() {
        assert_eq!(kinds(&tokenize("!x", &lang())), [TokenKind::Identifier]);
        assert_eq!(kinds(&tokenize("x !=y", &lang())).len(), 3);
        assert!(tokenize("!", &lang()).is_empty());
    }

    #[test]
    fn unrecognized_character_is_skipped() {
        let tokens = tokenize("a @ b", &lang());
        assert_eq!(texts(&tokens), ["a", "b"]);
    }

    #[test]
    fn keyword_beats_boolean_beats_type() {
        let overlapping = LanguageDefinition::new(["vec", "true"], ["vec", "truth"]);
        let tokens = tokenize("vec true truth maybe", &overlapping);
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::PrimitiveType,
                TokenKind::Identifier,
            ]
        );

        let tokens = tokenize("true false", &lang());
        assert_eq!(
            kinds(&tokens),
            [TokenKind::BooleanLiteral, TokenKind::BooleanLiteral]
        );
    }

    #[test]
    fn integer_then_dot_is_not_a_float() {
        let tokens = tokenize("3.x 3. 4", &lang());
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::IntegerLiteral,
                TokenKind::Identifier,
                TokenKind::IntegerLiteral,
                TokenKind::IntegerLiteral,
            ]
        );
    }

    #[test]
    fn float_without_suffix() {
        let tokens = tokenize("0.25", &lang());
        assert_eq!(kinds(&tokens), [TokenKind::FloatLiteral]);
        assert_eq!(tokens[0].text, "0.25");
    }

    #[test]
    fn carriage_returns_are_invisible_to_positions() {
        let tokens = tokenize("a\r\nbc", &lang());
        assert_eq!(tokens[0].line, 0);
        assert_eq!(tokens[0].column, 0);
        assert_eq!(tokens[1].line, 1);
        assert_eq!(tokens[1].column, 0);
    }

    #[test]
    fn positions_across_lines() {
        let source = indoc! {r#"
            int health = 100;
            if (health <= 0) {
                respawn();
            }
        "#};
        let tokens = tokenize(source, &lang());

        let semicolon = tokens.iter().find(|t| t.kind == TokenKind::Semicolon).unwrap();
        assert_eq!((semicolon.line, semicolon.column), (0, 16));

        let respawn = tokens.iter().find(|t| t.text == "respawn").unwrap();
        assert_eq!((respawn.line, respawn.column), (2, 4));
    }

    #[test]
    fn position_monotonicity() {
        let source = indoc! {r#"
            while (alive == true) {
                score = score + 10;
                // tick
                wait(0.5f);
            }
        "#};
        let tokens = tokenize(source, &lang());
        for pair in tokens.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                b.line > a.line || (b.line == a.line && b.column >= a.column + a.char_len()),
                "token {b} does not come after {a}"
            );
        }
    }

    #[test]
    fn total_coverage_of_non_whitespace_input() {
        let source = "int x = 5; /* gone */ x = x + 1; // gone too";
        let tokens = tokenize(source, &lang());
        let reconstructed: String = tokens.iter().map(|t| t.text.as_str()).collect();
        let expected: String = "int x = 5; x = x + 1;"
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(reconstructed, expected);
    }

    #[test]
    fn determinism() {
        let source = "if (x != 3) { y = \"a\"; } else { z::w(1.0f, 2); }";
        let first = tokenize(source, &lang());
        let second = tokenize(source, &lang());
        assert_eq!(first, second);
    }
}
