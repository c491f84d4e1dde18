//! Signature literal syntax.
//!
//! ```text
//! sig  := PRIM | '[' sig ']' | '_' | IDENT '(' [ arg { ',' arg } [ ',' ] ] ')'
//! sig  := ... | QUOTED '(' [ arg { ',' arg } [ ',' ] ] ')'
//! arg  := [ (IDENT | QUOTED) ':' ] sig
//! ```
//!
//! `PRIM` is one of the primitive kind names (`int`, `string`, ...). Any
//! other identifier names a composite target type and must be followed by
//! its argument list, so `Point()` is a zero-argument composite.
//!
//! `QUOTED` is a name in backticks with `` \` `` and `\\` escapes. It is
//! never a primitive, so `` `int`(v: int) `` is a composite of a type named
//! `int`.
//!
//! The [`Display`](std::fmt::Display) form of a [`Signature`] is valid input.

mod lexer;

use std::str::FromStr;

use sinbad_diagnostic::{Diagnostic, ErrorCode, Span};
use sinbad_stack::ensure_sufficient_stack;

use crate::name::unquote;
use crate::{ArgSpec, CompositeSig, PrimKind, Signature};
use lexer::{tokenize, Lexeme, Token};

/// Error from parsing a signature literal.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected `{found}`, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        span: Span,
    },

    #[error("unexpected end of signature, expected {expected}")]
    UnexpectedEnd { expected: &'static str, span: Span },

    #[error("unrecognised character `{text}`")]
    UnrecognisedChar { text: String, span: Span },

    #[error("unexpected `{found}` after the end of the signature")]
    TrailingInput { found: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEnd { span, .. }
            | ParseError::UnrecognisedChar { span, .. }
            | ParseError::TrailingInput { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::UnexpectedToken { .. } => ErrorCode::E0001,
            ParseError::UnexpectedEnd { .. } => ErrorCode::E0002,
            ParseError::UnrecognisedChar { .. } => ErrorCode::E0003,
            ParseError::TrailingInput { .. } => ErrorCode::E0004,
        }
    }

    /// Convert to a diagnostic labeled against the signature literal.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEnd { expected, .. } => {
                diag.with_label(self.span(), format!("expected {expected}"))
            }
            ParseError::UnrecognisedChar { .. } => diag
                .with_label(self.span(), "not valid in a signature")
                .with_note("signatures use primitive names, `[..]`, `_` and `Type(name: sig, ..)`"),
            ParseError::TrailingInput { .. } => diag
                .with_label(self.span(), "signature already ended")
                .with_suggestion("wrap several arguments in a composite: `Type(a: int, b: int)`"),
        }
    }
}

impl Signature {
    /// Parse a signature literal such as `ClassA(name: string, tags: [string])`.
    pub fn parse(source: &str) -> Result<Signature, ParseError> {
        let tokens = tokenize(source).map_err(|span| ParseError::UnrecognisedChar {
            text: source.get(span.to_range()).unwrap_or_default().to_owned(),
            span,
        })?;

        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
        };
        let signature = parser.signature()?;

        match parser.peek() {
            None => Ok(signature),
            Some(lexeme) => Err(ParseError::TrailingInput {
                found: parser.text(lexeme).to_owned(),
                span: lexeme.span,
            }),
        }
    }
}

impl FromStr for Signature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signature::parse(s)
    }
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Lexeme>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<Lexeme> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_token(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.pos + offset).map(|lexeme| lexeme.token)
    }

    fn text(&self, lexeme: Lexeme) -> &'src str {
        self.source.get(lexeme.span.to_range()).unwrap_or_default()
    }

    fn end_span(&self) -> Span {
        let end = Span::from_range(self.source.len()..self.source.len());
        self.tokens.last().map_or(end, |last| Span::new(last.span.end, last.span.end))
    }

    /// Consume the next lexeme, or fail with "expected `expected`" at end of input.
    fn bump(&mut self, expected: &'static str) -> Result<Lexeme, ParseError> {
        let lexeme = self.peek().ok_or_else(|| ParseError::UnexpectedEnd {
            expected,
            span: self.end_span(),
        })?;
        self.pos += 1;
        Ok(lexeme)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek_token(0) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<Lexeme, ParseError> {
        let lexeme = self.bump(expected)?;
        if lexeme.token == token {
            Ok(lexeme)
        } else {
            Err(self.unexpected(lexeme, expected))
        }
    }

    fn unexpected(&self, lexeme: Lexeme, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.text(lexeme).to_owned(),
            expected,
            span: lexeme.span,
        }
    }

    fn signature(&mut self) -> Result<Signature, ParseError> {
        ensure_sufficient_stack(|| {
            let lexeme = self.bump("a signature")?;
            match lexeme.token {
                Token::Underscore => Ok(Signature::Wildcard),
                Token::LBracket => {
                    let element = self.signature()?;
                    self.expect(Token::RBracket, "`]`")?;
                    Ok(Signature::list(element))
                }
                Token::Ident => {
                    let name = self.text(lexeme);
                    if let Some(kind) = PrimKind::from_name(name) {
                        return Ok(Signature::Prim(kind));
                    }
                    self.composite(name.to_owned())
                }
                Token::QuotedIdent => {
                    let name = unquote(self.text(lexeme));
                    self.composite(name)
                }
                Token::LParen
                | Token::RParen
                | Token::RBracket
                | Token::Comma
                | Token::Colon => Err(self.unexpected(lexeme, "a signature")),
            }
        })
    }

    fn composite(&mut self, target: String) -> Result<Signature, ParseError> {
        self.expect(Token::LParen, "`(` after a type name")?;
        let args = self.args()?;
        Ok(Signature::Composite(CompositeSig::from_args(target, args)))
    }

    /// Arguments after the opening parenthesis, through the closing one.
    fn args(&mut self) -> Result<Vec<ArgSpec>, ParseError> {
        let mut args = Vec::new();
        loop {
            if self.eat(Token::RParen) {
                return Ok(args);
            }
            args.push(self.arg()?);
            if self.eat(Token::Comma) {
                continue;
            }
            self.expect(Token::RParen, "`,` or `)`")?;
            return Ok(args);
        }
    }

    fn arg(&mut self) -> Result<ArgSpec, ParseError> {
        let named = matches!(self.peek_token(0), Some(Token::Ident | Token::QuotedIdent))
            && self.peek_token(1) == Some(Token::Colon);

        let name = if named {
            let lexeme = self.bump("an argument name")?;
            self.pos += 1;
            match lexeme.token {
                Token::QuotedIdent => unquote(self.text(lexeme)),
                _ => self.text(lexeme).to_owned(),
            }
        } else {
            String::new()
        };

        Ok(ArgSpec::new(name, self.signature()?))
    }
}
