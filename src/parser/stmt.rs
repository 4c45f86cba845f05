use tracing::trace;

use crate::{
    ast::{
        expressions::{Expr, LiteralExpr, LiteralValue},
        statements::{
            AccessQualifier, BlockStmt, Decorator, EnumDeclStmt, ExpressionStmt, HandlerDeclStmt,
            Parameter, ProcDeclStmt, Stmt, VarDeclStmt,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::expect_expr, lookups::STMT_LOOKUP, parser::Parser, types::parse_type};

fn token_value(token: &Token) -> String {
    token.value().unwrap_or_default().to_string()
}

/// Parses a single statement at the cursor.
///
/// Keywords are dispatched through `STMT_LOOKUP`, identifiers start an
/// expression statement (or a handler declaration). Any other token is
/// reported, skipped, and becomes an error statement.
pub fn parse_stmt(parser: &mut Parser) -> Stmt {
    let kind = parser.current_token_kind();
    trace!(?kind, "parse_stmt");

    if let Some(handler) = STMT_LOOKUP.get(&kind).copied() {
        return handler(parser);
    }

    if kind == TokenKind::Identifier {
        return parse_expression_stmt(parser);
    }

    let token = parser.peek().clone();
    parser.report_at_current(
        ErrorImpl::UnexpectedToken {
            token: token.text(),
        },
        token.span().start,
    );
    parser.advance();
    Stmt::error(*token.span())
}

/// `expr ;` or, when the expression is a call directly followed by `{`,
/// a handler declaration `call { ... }`.
pub fn parse_expression_stmt(parser: &mut Parser) -> Stmt {
    let start = parser.get_position();
    let expression = expect_expr(parser, 0, "expected expression");

    match expression {
        Expr::Call(call) if parser.check(TokenKind::OpenCurly) => {
            let body = parse_block_stmt(parser);
            Stmt::HandlerDeclaration(HandlerDeclStmt {
                span: parser.span_from(start),
                call,
                body,
            })
        }
        expression => {
            parser.consume(TokenKind::Semicolon, "expected ';' after expression");
            Stmt::Expression(ExpressionStmt {
                expression,
                span: parser.span_from(start),
            })
        }
    }
}

/// `{ statements... }`
///
/// A missing `{` yields an empty block without touching the statements
/// that follow. A block nested too deeply is skipped as a whole.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let start = parser.get_position();
    if parser.check(TokenKind::OpenCurly) && !parser.enter_nesting() {
        parser.skip_group();
        return BlockStmt {
            body: vec![],
            span: parser.span_from(start),
        };
    }

    let open = parser.consume(TokenKind::OpenCurly, "expected '{' to open block");
    if open.kind() == TokenKind::Error {
        return BlockStmt {
            body: vec![],
            span: *open.span(),
        };
    }

    let mut body = vec![];

    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        body.push(parse_stmt(parser));
    }

    parser.consume(TokenKind::CloseCurly, "expected '}' to close block");
    parser.exit_nesting();

    BlockStmt {
        body,
        span: parser.span_from(start),
    }
}

/// `ACCESS NAME : TYPE = EXPR ;`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Stmt {
    let qualifier = parser.advance().clone();
    let start = qualifier.span().start;
    let access = match qualifier.kind() {
        TokenKind::Private => AccessQualifier::Private,
        TokenKind::Public => AccessQualifier::Public,
        _ => AccessQualifier::Temp,
    };

    let identifier = parser.consume(TokenKind::Identifier, "expected variable name");
    parser.consume(TokenKind::Colon, "expected ':' after variable name");
    let declared_type = parse_type(parser);

    let assigned_value = match parser.try_consume(TokenKind::Assignment) {
        Some(_) => Some(expect_expr(parser, 0, "expected value after '='")),
        None => {
            parser.report_expected("expected '=' after variable type");
            parser.synchronize(&[TokenKind::Semicolon]);
            None
        }
    };

    parser.consume(TokenKind::Semicolon, "expected ';' after variable declaration");

    // A declaration without a name is kept out of the tree
    if identifier.kind() == TokenKind::Error {
        return Stmt::error(parser.span_from(start));
    }

    Stmt::VariableDeclaration(VarDeclStmt {
        access,
        identifier: token_value(&identifier),
        declared_type,
        assigned_value,
        span: parser.span_from(start),
    })
}

/// `@name` or `@name=value`. A decorator without a value is `true`.
fn parse_decorator(parser: &mut Parser) -> Decorator {
    let start = parser.advance().span().start;
    let name = parser.consume(TokenKind::Identifier, "expected decorator name after '@'");

    let value = if parser.try_consume(TokenKind::Assignment).is_some() {
        expect_expr(parser, 0, "expected decorator value after '='")
    } else {
        Expr::Literal(LiteralExpr {
            value: LiteralValue::Boolean(true),
            span: *name.span(),
        })
    };

    Decorator {
        name: token_value(&name),
        value,
        span: parser.span_from(start),
    }
}

/// `name: Type` or `name: Type = default`
fn parse_parameter(parser: &mut Parser) -> Parameter {
    let name = parser.advance().clone();
    let start = name.span().start;

    parser.consume(TokenKind::Colon, "expected ':' after parameter name");
    let declared_type = parse_type(parser);
    let default_value = parser
        .try_consume(TokenKind::Assignment)
        .map(|_| expect_expr(parser, 0, "expected default value after '='"));

    Parameter {
        name: token_value(&name),
        declared_type,
        default_value,
        span: parser.span_from(start),
    }
}

/// `proc NAME ( DECORATORS PARAMETERS ) -> TYPE { BODY }`
///
/// Decorators are only recognised before the first parameter. Every item is
/// followed by `,` or the closing `)`; a missing comma is reported once and
/// parsing continues with the next item.
pub fn parse_proc_decl_stmt(parser: &mut Parser) -> Stmt {
    let start = parser.advance().span().start;
    let identifier = parser.consume(TokenKind::Identifier, "expected procedure name");
    parser.consume(TokenKind::OpenParen, "expected '(' after procedure name");

    let mut decorators = vec![];
    let mut parameters = vec![];
    let mut in_parameters = false;

    while !parser.check(TokenKind::CloseParen) && parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::At if !in_parameters => decorators.push(parse_decorator(parser)),
            TokenKind::Identifier => {
                in_parameters = true;
                parameters.push(parse_parameter(parser));
            }
            _ => {
                let message = if in_parameters {
                    "expected parameter name"
                } else {
                    "expected decorator or parameter name"
                };
                parser.report_expected(message);
                parser.synchronize(&[TokenKind::Comma, TokenKind::CloseParen]);
            }
        }

        if parser.try_consume(TokenKind::Comma).is_none()
            && !parser.check(TokenKind::CloseParen)
            && parser.has_tokens()
        {
            parser.report_expected("expected ',' or ')'");
        }
    }

    parser.consume(TokenKind::CloseParen, "expected ')' after parameters");
    parser.consume(TokenKind::Arrow, "expected '->' before return type");
    let return_type = parse_type(parser);
    let body = parse_block_stmt(parser);

    if identifier.kind() == TokenKind::Error {
        return Stmt::error(parser.span_from(start));
    }

    let stmt = ProcDeclStmt {
        identifier: token_value(&identifier),
        decorators,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    };
    trace!(name = %stmt.identifier, has_error = stmt.contains_error(), "parsed procedure");

    Stmt::ProcedureDeclaration(stmt)
}

/// `enum NAME { MEMBER (, MEMBER)* }`
pub fn parse_enum_decl_stmt(parser: &mut Parser) -> Stmt {
    let start = parser.advance().span().start;
    let name = parser.consume(TokenKind::Identifier, "expected enum name");
    parser.consume(TokenKind::OpenCurly, "expected '{' after enum name");

    let mut members = vec![];
    loop {
        let member = parser.consume(TokenKind::Identifier, "expected enum member name");
        if member.kind() == TokenKind::Identifier {
            members.push(token_value(&member));
        }

        if parser.try_consume(TokenKind::Comma).is_none() {
            break;
        }
    }

    if !parser.check(TokenKind::CloseCurly) {
        parser.report_expected("expected ',' or '}' after enum member");
        parser.synchronize(&[TokenKind::CloseCurly]);
    }
    parser.consume(TokenKind::CloseCurly, "expected '}' after enum members");

    let span = parser.span_from(start);
    if members.is_empty() || name.kind() == TokenKind::Error {
        return Stmt::error(span);
    }

    Stmt::EnumDeclaration(EnumDeclStmt {
        name: token_value(&name),
        members,
        span,
    })
}
