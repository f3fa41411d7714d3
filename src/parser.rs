use miette::{Diagnostic, SourceSpan};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Expr, Op},
    lexer::{Token, TokenKind},
};

#[derive(Diagnostic, Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    #[diagnostic(
        code(plang::parse::eof),
        help("every operator must be followed by a number")
    )]
    UnexpectedEof {
        #[label("expected a number here")]
        span: SourceSpan,
    },

    #[error("expected a number, found `{found}`")]
    #[diagnostic(code(plang::parse::expected_literal))]
    ExpectedLiteral {
        found: String,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("unexpected `{found}` after the end of the expression")]
    #[diagnostic(
        code(plang::parse::trailing_input),
        help("an expression is numbers joined by `+`, `-`, `*` and `/`")
    )]
    TrailingInput {
        found: String,
        #[label("expected an operator or the end of input")]
        span: SourceSpan,
    },
}

/// How much the parser checks beyond the grammar.
///
/// The default is strict. [`ParseOptions::permissive`] accepts any token
/// where a literal is expected and ignores whatever follows the first
/// complete expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject literals that are not `Number` tokens.
    pub numeric_literals: bool,
    /// Reject tokens left over after the expression.
    pub require_eof: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            numeric_literals: true,
            require_eof: true,
        }
    }

    pub fn permissive() -> Self {
        Self {
            numeric_literals: false,
            require_eof: false,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Recursive-descent parser over a token slice.
///
/// ```text
/// expr    = term (("+" | "-") term)*
/// term    = literal (("*" | "/") literal)*
/// literal = Number
/// ```
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    options: ParseOptions,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: &'t [Token<'a>], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
        }
    }

    pub fn parse(&mut self) -> Result<Expr<'a>, ParseError> {
        let expr = self.parse_expr()?;

        if let Some(token) = self.tokens.get(self.pos) {
            if self.options.require_eof {
                return Err(ParseError::TrailingInput {
                    found: token.slice.to_string(),
                    span: token.span().into(),
                });
            }
            debug!(
                ignored = self.tokens.len() - self.pos,
                "ignoring tokens after expression"
            );
        }

        debug!(nodes = expr.node_count(), "parsed expression");
        Ok(expr)
    }

    fn parse_expr(&mut self) -> Result<Expr<'a>, ParseError> {
        let mut expr = self.parse_term()?;
        while let Some((operator, offset)) = self.eat_operator(&[Op::Plus, Op::Minus]) {
            let right = self.parse_term()?;
            expr = Expr::binary(operator, expr, right, offset);
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr<'a>, ParseError> {
        let mut expr = self.parse_literal()?;
        while let Some((operator, offset)) = self.eat_operator(&[Op::Star, Op::Slash]) {
            let right = self.parse_literal()?;
            expr = Expr::binary(operator, expr, right, offset);
        }
        Ok(expr)
    }

    fn parse_literal(&mut self) -> Result<Expr<'a>, ParseError> {
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEof {
                span: self.eof_span(),
            });
        };

        if self.options.numeric_literals && token.kind != TokenKind::Number {
            return Err(ParseError::ExpectedLiteral {
                found: token.slice.to_string(),
                span: token.span().into(),
            });
        }

        trace!(offset = token.offset, value = token.slice, "literal");
        Ok(Expr::literal(token.slice, token.offset))
    }

    /// Consumes the next token if it is one of `ops`.
    fn eat_operator(&mut self, ops: &[Op]) -> Option<(Op, usize)> {
        let token = self.tokens.get(self.pos)?;
        let op = Op::from_kind(token.kind).filter(|op| ops.contains(op))?;
        self.pos += 1;
        trace!(offset = token.offset, %op, "operator");
        Some((op, token.offset))
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn eof_span(&self) -> SourceSpan {
        let end = self.tokens.last().map_or(0, |token| token.span().end);
        (end, 0).into()
    }
}

/// Parses `tokens` with the default (strict) options.
pub fn parse<'a>(tokens: &[Token<'a>]) -> Result<Expr<'a>, ParseError> {
    Parser::new(tokens).parse()
}
