use std::ops::Range;

use miette::{Diagnostic, SourceSpan};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{Expr, Op};

#[derive(Diagnostic, Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unable to evaluate a lone literal")]
    #[diagnostic(
        code(plang::eval::unable_to_evaluate),
        help("only expressions with at least one operator are evaluated")
    )]
    UnableToEvaluate {
        #[label("no operator to apply")]
        span: SourceSpan,
    },

    #[error("invalid literal `{value}`")]
    #[diagnostic(code(plang::eval::invalid_literal))]
    InvalidLiteral {
        value: String,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("division by zero")]
    #[diagnostic(code(plang::eval::division_by_zero))]
    DivisionByZero {
        #[label("right operand is zero")]
        span: SourceSpan,
    },

    #[error("quotient too large for a float")]
    #[diagnostic(code(plang::eval::quotient_too_large))]
    QuotientTooLarge {
        #[label("this division")]
        span: SourceSpan,
    },
}

/// Result of an evaluation.
///
/// `+`, `-` and `*` yield an unbounded `Int`; `/` always yields `Float`, even
/// when the quotient is whole.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    /// Integer used when this value is an operand: floats truncate toward zero.
    fn as_operand(&self) -> BigInt {
        match self {
            Number::Int(n) => n.clone(),
            // Floats are finite, so the conversion cannot fail.
            Number::Float(x) => BigInt::from_f64(x.trunc()).unwrap_or_default(),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n.into())
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            // `{:?}` keeps the trailing `.0` on whole floats.
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Evaluates an expression tree.
///
/// The root must be an operation; a tree that is a single literal is
/// rejected with [`EvalError::UnableToEvaluate`].
pub fn evaluate(expr: &Expr<'_>) -> Result<Number, EvalError> {
    if let Expr::Literal { .. } = expr {
        return Err(EvalError::UnableToEvaluate {
            span: expr.span().into(),
        });
    }

    let value = eval_node(expr)?;
    debug!(%value, "evaluated expression");
    Ok(value)
}

fn eval_node(expr: &Expr<'_>) -> Result<Number, EvalError> {
    match expr {
        Expr::Literal { value, .. } => eval_literal(value, expr.span()).map(Number::Int),
        Expr::BinaryOp {
            operator,
            left,
            right,
            ..
        } => {
            let lhs = eval_node(left)?.as_operand();
            let rhs = eval_node(right)?.as_operand();
            trace!(%operator, %lhs, %rhs, "apply");
            apply(*operator, lhs, rhs, expr.span())
        }
    }
}

fn eval_literal(value: &str, span: Range<usize>) -> Result<BigInt, EvalError> {
    let digits = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    match BigInt::parse_bytes(value.as_bytes(), 10) {
        Some(n) if digits => Ok(n),
        _ => Err(EvalError::InvalidLiteral {
            value: value.to_string(),
            span: span.into(),
        }),
    }
}

fn apply(op: Op, left: BigInt, right: BigInt, span: Range<usize>) -> Result<Number, EvalError> {
    match op {
        Op::Plus => Ok(Number::Int(left + right)),
        Op::Minus => Ok(Number::Int(left - right)),
        Op::Star => Ok(Number::Int(left * right)),
        Op::Slash if right.is_zero() => Err(EvalError::DivisionByZero { span: span.into() }),
        // Exact quotient, rounded once.
        Op::Slash => BigRational::new(left, right)
            .to_f64()
            .filter(|q| q.is_finite())
            .map(Number::Float)
            .ok_or(EvalError::QuotientTooLarge { span: span.into() }),
    }
}
