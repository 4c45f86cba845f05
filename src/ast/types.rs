//! Type annotations as written in the source.
//!
//! The grammar is deliberately small: a named type with optional generic
//! arguments, or a union of two annotations. Longer unions nest to the left,
//! so `A | B | C` is `Union(Union(A, B), C)`.

use serde::Serialize;

use crate::Span;

use super::ast::Node;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TypeNode {
    Named {
        name: String,
        generics: Vec<TypeNode>,
        span: Span,
    },
    Union {
        left: Box<TypeNode>,
        right: Box<TypeNode>,
        span: Span,
    },
    Error {
        span: Span,
    },
}

impl TypeNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeNode::Named { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl Node for TypeNode {
    fn get_span(&self) -> &Span {
        match self {
            TypeNode::Named { span, .. }
            | TypeNode::Union { span, .. }
            | TypeNode::Error { span } => span,
        }
    }
    fn contains_error(&self) -> bool {
        match self {
            TypeNode::Named { generics, .. } => generics.iter().any(|g| g.contains_error()),
            TypeNode::Union { left, right, .. } => left.contains_error() || right.contains_error(),
            TypeNode::Error { .. } => true,
        }
    }
}
