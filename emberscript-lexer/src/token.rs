use std::fmt;

/// Passes all the token kinds as a sequence of `Kind = "name",` into the provided macro.
#[macro_export]
macro_rules! expand_token_kinds {
    ($x:path) => {
        $x! {
            Keyword       = "keyword",
            PrimitiveType = "primitive type",
            Identifier    = "identifier",

            BooleanLiteral = "boolean literal",
            IntegerLiteral = "int literal",
            FloatLiteral   = "float literal",
            StringLiteral  = "string literal",

            Assign            = "`=`",
            Equal             = "`==`",
            NotEqual          = "`!=`",
            LessThan          = "`<`",
            LessOrEqual       = "`<=`",
            GreaterThan       = "`>`",
            GreaterOrEqual    = "`>=`",
            Plus              = "`+`",
            Minus             = "`-`",
            Star              = "`*`",
            Slash             = "`/`",
            NamespaceResolver = "`::`",

            OpenParen  = "`(`",
            CloseParen = "`)`",
            OpenBrace  = "`{`",
            CloseBrace = "`}`",
            Comma      = "`,`",
            Semicolon  = "`;`",
        }
    };
}

macro_rules! token_kind_enum {
    ($($name:tt = $pretty_name:tt),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub enum TokenKind {
            $($name),*
        }

        impl TokenKind {
            /// The name shown to script authors in diagnostics and logs.
            pub fn pretty_name(&self) -> &'static str {
                match self {
                    $(TokenKind::$name => $pretty_name),*
                }
            }
        }
    }
}

expand_token_kinds!(token_kind_enum);

/// A classified, positioned fragment of source text.
///
/// `line` and `column` are both 0-based; `column` indexes the token's first
/// character within its line. Carriage returns are invisible to both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    /// Length of the token's text in characters. This is what highlight
    /// spans are measured in, not bytes.
    pub fn char_len(&self) -> u32 {
        self.text.chars().count() as u32
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {:?}",
            self.line,
            self.column,
            self.kind.pretty_name(),
            self.text
        )
    }
}
