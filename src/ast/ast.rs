use std::fmt::Debug;

use serde::Serialize;

use crate::{lexer::tokens::TokenKind, Span};

use super::statements::Stmt;

/// Node Trait
///
/// Shared behaviour of statements, expressions and type annotations.
pub trait Node: Debug {
    /// Returns the span of the node.
    fn get_span(&self) -> &Span;
    /// Whether this node or any node below it is an error placeholder.
    fn contains_error(&self) -> bool;
}

/// A comment the lexer kept, exposed alongside the tree rather than attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

/// Root of the tree: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    /// Comments in source order, to be correlated with nodes by position
    pub comments: Vec<Comment>,
    pub span: Span,
}

impl Node for Program {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn contains_error(&self) -> bool {
        self.body.iter().any(|stmt| stmt.contains_error())
    }
}
