use emberscript_lexer::Token;

use crate::marker::ParserError;

/// The parser and semantic compiler that consumes the token stream.
///
/// Lives outside this crate. The contract assumes it is total: problems come
/// back as [`ParserError`] values and the call itself never fails. A
/// panicking implementation is a contract violation at this boundary, not
/// something the scheduler retries.
pub trait SyntaxCompiler {
    fn check(&mut self, tokens: &[Token]) -> Vec<ParserError>;
}

impl<T> SyntaxCompiler for &mut T
where
    T: SyntaxCompiler,
{
    fn check(&mut self, tokens: &[Token]) -> Vec<ParserError> {
        <T as SyntaxCompiler>::check(self, tokens)
    }
}
