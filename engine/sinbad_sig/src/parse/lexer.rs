//! Lexer for signature literals using logos.

use logos::Logos;
use sinbad_diagnostic::Span;

#[derive(Logos, Copy, Clone, Debug, Eq, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(super) enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("_")]
    Underscore,

    /// Primitive kind names are identifiers too; the parser tells them apart.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)*")]
    Ident,

    /// Backtick-quoted name, for names that aren't identifiers or that
    /// collide with a primitive kind.
    #[regex(r"`([^`\\]|\\[`\\])*`")]
    QuotedIdent,
}

/// A token with its location in the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) struct Lexeme {
    pub token: Token,
    pub span: Span,
}

/// Tokenize the whole input, failing on the first unrecognised character.
///
/// On failure, returns the span of the offending input.
pub(super) fn tokenize(source: &str) -> Result<Vec<Lexeme>, Span> {
    let mut lexemes = Vec::new();

    for (result, range) in Token::lexer(source).spanned() {
        let span = Span::from_range(range);
        match result {
            Ok(token) => lexemes.push(Lexeme { token, span }),
            Err(()) => return Err(span),
        }
    }

    Ok(lexemes)
}
