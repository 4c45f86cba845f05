use serde::Serialize;

use crate::Span;

use super::{
    ast::Node,
    expressions::{CallExpr, Expr},
    types::TypeNode,
};

/// Statements
///
/// `If`, `While` and `TupleDestructure` exist in the tree model but no
/// grammar produces them yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Expression(ExpressionStmt),
    VariableDeclaration(VarDeclStmt),
    HandlerDeclaration(HandlerDeclStmt),
    ProcedureDeclaration(ProcDeclStmt),
    EnumDeclaration(EnumDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    TupleDestructure(TupleDestructureStmt),
    Error(ErrorStmt),
}

impl Stmt {
    pub fn error(span: Span) -> Self {
        Stmt::Error(ErrorStmt { span })
    }
}

impl Node for Stmt {
    fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(s) => &s.span,
            Stmt::VariableDeclaration(s) => &s.span,
            Stmt::HandlerDeclaration(s) => &s.span,
            Stmt::ProcedureDeclaration(s) => &s.span,
            Stmt::EnumDeclaration(s) => &s.span,
            Stmt::If(s) => &s.span,
            Stmt::While(s) => &s.span,
            Stmt::TupleDestructure(s) => &s.span,
            Stmt::Error(s) => &s.span,
        }
    }

    fn contains_error(&self) -> bool {
        match self {
            Stmt::Expression(s) => s.expression.contains_error(),
            Stmt::VariableDeclaration(s) => {
                s.declared_type.contains_error()
                    || s.assigned_value.as_ref().is_some_and(|v| v.contains_error())
            }
            Stmt::HandlerDeclaration(s) => s.call.contains_error() || s.body.contains_error(),
            Stmt::ProcedureDeclaration(s) => s.contains_error(),
            Stmt::EnumDeclaration(_) => false,
            Stmt::If(s) => {
                s.condition.contains_error()
                    || s.then_body.contains_error()
                    || s.else_body.as_ref().is_some_and(|b| b.contains_error())
            }
            Stmt::While(s) => s.condition.contains_error() || s.body.contains_error(),
            Stmt::TupleDestructure(s) => s.value.contains_error(),
            Stmt::Error(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessQualifier {
    Private,
    Public,
    Temp,
}

/// Variable Declaration Statement
/// `private name: Type = value;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclStmt {
    pub access: AccessQualifier,
    pub identifier: String,
    pub declared_type: TypeNode,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

/// Handler Declaration Statement
/// A call directly followed by a block, e.g. `on_click(button) { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerDeclStmt {
    pub call: CallExpr,
    pub body: BlockStmt,
    pub span: Span,
}

/// `@name` or `@name=value` inside a parameter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decorator {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub declared_type: TypeNode,
    pub default_value: Option<Expr>,
    pub span: Span,
}

/// Procedure Declaration Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcDeclStmt {
    pub identifier: String,
    pub decorators: Vec<Decorator>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeNode,
    pub body: BlockStmt,
    pub span: Span,
}

impl ProcDeclStmt {
    pub fn contains_error(&self) -> bool {
        self.decorators.iter().any(|d| d.value.contains_error())
            || self.parameters.iter().any(|p| {
                p.declared_type.contains_error()
                    || p.default_value.as_ref().is_some_and(|v| v.contains_error())
            })
            || self.return_type.contains_error()
            || self.body.contains_error()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDeclStmt {
    pub name: String,
    pub members: Vec<String>,
    pub span: Span,
}

/// `{ statements... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn contains_error(&self) -> bool {
        self.body.iter().any(|stmt| stmt.contains_error())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleDestructureStmt {
    pub names: Vec<String>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorStmt {
    pub span: Span,
}
