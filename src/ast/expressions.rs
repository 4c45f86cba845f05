use serde::Serialize;

use crate::{lexer::tokens::TokenKind, Span};

use super::ast::Node;

/// Expressions
///
/// Every expression form is a variant here, including the `Error`
/// placeholder the parser leaves behind when it cannot build a real node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Identifier(IdentifierExpr),
    Literal(LiteralExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    MemberAccess(MemberAccessExpr),
    List(ListExpr),
    Dict(DictExpr),
    /// `()`
    Empty(EmptyExpr),
    /// Not produced by the parser yet
    InterpolatedString(InterpolatedStringExpr),
    /// Not produced by the parser yet
    Index(IndexExpr),
    Error(ErrorExpr),
}

impl Expr {
    pub fn error(span: Span) -> Self {
        Expr::Error(ErrorExpr { span })
    }
}

impl Node for Expr {
    fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(e) => &e.span,
            Expr::Literal(e) => &e.span,
            Expr::Unary(e) => &e.span,
            Expr::Binary(e) => &e.span,
            Expr::Call(e) => &e.span,
            Expr::MemberAccess(e) => &e.span,
            Expr::List(e) => &e.span,
            Expr::Dict(e) => &e.span,
            Expr::Empty(e) => &e.span,
            Expr::InterpolatedString(e) => &e.span,
            Expr::Index(e) => &e.span,
            Expr::Error(e) => &e.span,
        }
    }

    fn contains_error(&self) -> bool {
        match self {
            Expr::Identifier(_) | Expr::Literal(_) | Expr::Empty(_) => false,
            Expr::Unary(e) => e.right_expr.contains_error(),
            Expr::Binary(e) => e.left.contains_error() || e.right.contains_error(),
            Expr::Call(e) => e.contains_error(),
            Expr::MemberAccess(e) => e.object.contains_error(),
            Expr::List(e) => e.elements.iter().any(|element| element.contains_error()),
            Expr::Dict(e) => e
                .entries
                .iter()
                .any(|entry| entry.key.contains_error() || entry.value.contains_error()),
            Expr::InterpolatedString(e) => e.parts.iter().any(|part| part.contains_error()),
            Expr::Index(e) => e.object.contains_error() || e.index.contains_error(),
            Expr::Error(_) => true,
        }
    }
}

/// Identifier Expression
/// A bare name, including names of procedures being called.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierExpr {
    pub value: String,
    pub span: Span,
}

/// The value of a literal, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub span: Span,
}

/// Unary Expression
/// `!x` or `-x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub operator: TokenKind,
    pub right_expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: TokenKind,
    pub right: Box<Expr>,
    pub span: Span,
}

/// A call argument, either by position or `name = value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Argument {
    Positional { value: Expr },
    Named { name: String, value: Expr, span: Span },
}

impl Argument {
    pub fn value(&self) -> &Expr {
        match self {
            Argument::Positional { value } | Argument::Named { value, .. } => value,
        }
    }
}

/// Call Expression
/// `callee(arguments...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

impl CallExpr {
    pub fn contains_error(&self) -> bool {
        self.callee.contains_error()
            || self
                .arguments
                .iter()
                .any(|argument| argument.value().contains_error())
    }
}

/// Member Access Expression
/// `object.property`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberAccessExpr {
    pub object: Box<Expr>,
    pub property: IdentifierExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictEntry {
    pub key: Expr,
    pub value: Expr,
}

/// Dict Expression
/// Entries keep their source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictExpr {
    pub entries: Vec<DictEntry>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyExpr {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolatedStringExpr {
    pub parts: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorExpr {
    pub span: Span,
}
