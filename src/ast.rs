use serde::Serialize;

use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Op {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "/")]
    Slash,
}

impl Op {
    /// Operator spelled by a token of this kind, if any.
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Op::Plus),
            TokenKind::Minus => Some(Op::Minus),
            TokenKind::Star => Some(Op::Star),
            TokenKind::Slash => Some(Op::Slash),
            TokenKind::Number | TokenKind::Other(_) => None,
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Op::Plus => "+",
                Op::Minus => "-",
                Op::Star => "*",
                Op::Slash => "/",
            }
        )
    }
}

/// Expression tree produced by the parser.
///
/// Serializes to `{"type": "Literal", "value": ...}` and
/// `{"type": "BinOp", "operator": ..., "left": ..., "right": ...}`. Offsets are
/// byte positions in the source of the literal or the operator and are only
/// kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr<'a> {
    Literal {
        value: &'a str,
        #[serde(skip)]
        offset: usize,
    },
    #[serde(rename = "BinOp")]
    BinaryOp {
        operator: Op,
        left: Box<Expr<'a>>,
        right: Box<Expr<'a>>,
        #[serde(skip)]
        offset: usize,
    },
}

impl<'a> Expr<'a> {
    pub fn literal(value: &'a str, offset: usize) -> Self {
        Expr::Literal { value, offset }
    }

    pub fn binary(operator: Op, left: Expr<'a>, right: Expr<'a>, offset: usize) -> Self {
        Expr::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            offset,
        }
    }

    /// Source range of the literal, or of the operator symbol of a binary node.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            Expr::Literal { value, offset } => *offset..*offset + value.len(),
            Expr::BinaryOp { offset, .. } => *offset..*offset + 1,
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Literal { .. } => 1,
            Expr::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }
}

/// Prefix form, `(+ 12 (* 7 2))`.
impl std::fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{value}"),
            Expr::BinaryOp {
                operator,
                left,
                right,
                ..
            } => write!(f, "({operator} {left} {right})"),
        }
    }
}
