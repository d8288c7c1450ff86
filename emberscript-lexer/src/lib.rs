//! Lexical analysis for Emberscript, the scripting language embedded in the
//! editor for gameplay logic.

pub mod language;
pub mod lexer;
pub mod token;

pub use language::LanguageDefinition;
pub use lexer::tokenize;
pub use token::{Token, TokenKind};
