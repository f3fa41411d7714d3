//! Lexer, parser and evaluator for integer arithmetic with `+`, `-`, `*` and
//! `/`.
//!
//! Source text goes through [`lex`], [`parse`] and [`evaluate`] in that
//! order; [`run`] chains all three.

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;

use miette::Diagnostic;
use thiserror::Error;

pub use ast::{Expr, Op};
pub use evaluator::{evaluate, EvalError, Number};
pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{parse, ParseError, ParseOptions, Parser};

/// Any failure of [`run`].
#[derive(Diagnostic, Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}

/// Lexes, parses and evaluates `source`, returning the tree alongside its
/// value.
pub fn run(source: &str, options: ParseOptions) -> Result<(Expr<'_>, Number), Error> {
    let tokens = lex(source);
    let expr = Parser::with_options(&tokens, options).parse()?;
    let value = evaluate(&expr)?;
    Ok((expr, value))
}
