use tracing::trace;

use crate::{
    ast::{
        ast::Node,
        expressions::{
            Argument, BinaryExpr, CallExpr, DictEntry, DictExpr, EmptyExpr, Expr, IdentifierExpr,
            ListExpr, LiteralExpr, LiteralValue, MemberAccessExpr, UnaryExpr,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{binding_power, prefix_binding_power, BindingPower, LED_LOOKUP, NUD_LOOKUP},
    parser::Parser,
};

/// Tokens that end an expression when they show up in operator position.
fn is_terminator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eof
            | TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::OpenCurly
            | TokenKind::CloseCurly
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
    )
}

/// Pratt loop.
///
/// Parses a prefix form, then keeps folding infix and postfix operators into
/// it while their left binding power is greater than `min_bp`. Past
/// `MAX_NESTING_DEPTH` the rest of the expression is skipped and an error
/// node returned.
pub fn parse_expr(parser: &mut Parser, min_bp: u8) -> Expr {
    if !parser.enter_nesting() {
        let start = parser.get_position();
        parser.skip_expression();
        return Expr::error(parser.span_from(start));
    }

    let expr = parse_nested_expr(parser, min_bp);
    parser.exit_nesting();
    expr
}

fn parse_nested_expr(parser: &mut Parser, min_bp: u8) -> Expr {
    let token_kind = parser.current_token_kind();

    let mut left = match NUD_LOOKUP.get(&token_kind).copied() {
        Some(nud) => nud(parser),
        None => return parse_missing_prefix(parser),
    };

    loop {
        let kind = parser.current_token_kind();
        if is_terminator(kind) {
            break;
        }

        let bp = binding_power(kind);
        if bp.left <= min_bp {
            break;
        }

        let Some(led) = LED_LOOKUP.get(&kind).copied() else {
            break;
        };
        trace!(?kind, min_bp, "led");
        left = led(parser, left, bp);
    }

    left
}

/// Like `parse_expr`, but guarantees a diagnostic when the result holds an
/// error node that nothing has reported yet.
pub fn expect_expr(parser: &mut Parser, min_bp: u8, message: &str) -> Expr {
    let errors_before = parser.error_count();
    let expr = parse_expr(parser, min_bp);

    if expr.contains_error() && parser.error_count() == errors_before {
        parser.report_expected(message);
    }

    expr
}

/// No prefix handler for the current token.
///
/// At a terminator the error node is returned silently and the caller
/// decides what to report. Anything else is reported and skipped.
fn parse_missing_prefix(parser: &mut Parser) -> Expr {
    let kind = parser.current_token_kind();
    if is_terminator(kind) {
        return Expr::error(Span::at(parser.get_position()));
    }

    let token = parser.advance().clone();
    parser.report(
        ErrorImpl::UnexpectedTokenInExpression {
            token: token.text(),
        },
        token.span().start,
    );
    Expr::error(*token.span())
}

fn radix_of(text: &str) -> Option<u32> {
    match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0b") | Some("0B") => Some(2),
        Some("0o") | Some("0O") => Some(8),
        _ => None,
    }
}

/// Parses a number lexeme, honouring `0x`, `0b` and `0o` prefixes.
pub fn parse_number(text: &str) -> Option<f64> {
    match radix_of(text) {
        Some(radix) => u64::from_str_radix(&text[2..], radix)
            .ok()
            .map(|value| value as f64),
        None => text.parse::<f64>().ok(),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Expr {
    let token = parser.advance().clone();
    let span = *token.span();
    let text = token.value().unwrap_or_default();

    let value = match token.kind() {
        TokenKind::Identifier => {
            return Expr::Identifier(IdentifierExpr {
                value: text.to_string(),
                span,
            })
        }
        TokenKind::String => LiteralValue::String(text.to_string()),
        TokenKind::Number => match parse_number(text) {
            Some(number) => LiteralValue::Number(number),
            // A prefix without digits was already reported by the lexer
            None if text.len() == 2 && radix_of(text).is_some() => return Expr::error(span),
            None => {
                parser.report(
                    ErrorImpl::NumberParseError {
                        token: text.to_string(),
                    },
                    span.start,
                );
                return Expr::error(span);
            }
        },
        TokenKind::True => LiteralValue::Boolean(true),
        TokenKind::False => LiteralValue::Boolean(false),
        _ => LiteralValue::Null,
    };

    Expr::Literal(LiteralExpr { value, span })
}

/// `!expr` or `-expr`
pub fn parse_prefix_expr(parser: &mut Parser) -> Expr {
    let operator = parser.advance().clone();
    let bp = prefix_binding_power(operator.kind());
    let right = expect_expr(parser, bp.right, "expected expression after unary operator");

    Expr::Unary(UnaryExpr {
        operator: operator.kind(),
        right_expr: Box::new(right),
        span: parser.span_from(operator.span().start),
    })
}

/// `( expr )`, or `()` for the empty expression.
pub fn parse_grouping_expr(parser: &mut Parser) -> Expr {
    let start = parser.advance().span().start;

    if parser.try_consume(TokenKind::CloseParen).is_some() {
        return Expr::Empty(EmptyExpr {
            span: parser.span_from(start),
        });
    }

    let expr = expect_expr(parser, 0, "expected expression after '('");
    parser.consume(TokenKind::CloseParen, "expected ')' to close group");
    expr
}

/// `[ a, b, ]`, a trailing comma is allowed.
pub fn parse_list_expr(parser: &mut Parser) -> Expr {
    let start = parser.advance().span().start;
    let mut elements = vec![];

    while !parser.check(TokenKind::CloseBracket) && parser.has_tokens() {
        elements.push(expect_expr(parser, 0, "expected list element"));
        if parser.try_consume(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.consume(TokenKind::CloseBracket, "expected ']' to close list");

    Expr::List(ListExpr {
        elements,
        span: parser.span_from(start),
    })
}

/// `{ key: value, }`, a trailing comma is allowed.
pub fn parse_dict_expr(parser: &mut Parser) -> Expr {
    let start = parser.advance().span().start;
    let mut entries = vec![];

    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        let key = expect_expr(parser, 0, "expected dictionary key");
        parser.consume(TokenKind::Colon, "expected ':' after dictionary key");
        let value = expect_expr(parser, 0, "expected dictionary value");
        entries.push(DictEntry { key, value });

        if parser.try_consume(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.consume(TokenKind::CloseCurly, "expected '}' to close dictionary");

    Expr::Dict(DictExpr {
        entries,
        span: parser.span_from(start),
    })
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Expr {
    let operator = parser.advance().kind();
    let right = expect_expr(parser, bp.right, "expected expression after operator");

    Expr::Binary(BinaryExpr {
        span: parser.span_from(left.get_span().start),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

/// `NAME = expr` when an identifier is directly followed by `=`, otherwise
/// a positional argument.
fn parse_argument(parser: &mut Parser) -> Argument {
    if parser.check(TokenKind::Identifier) && parser.peek_next().kind() == TokenKind::Assignment {
        let name = parser.advance().clone();
        parser.advance();
        let value = expect_expr(parser, 0, "expected value for named argument");

        return Argument::Named {
            name: name.value().unwrap_or_default().to_string(),
            value,
            span: parser.span_from(name.span().start),
        };
    }

    Argument::Positional {
        value: expect_expr(parser, 0, "expected argument"),
    }
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Expr {
    parser.advance();
    let mut arguments = vec![];

    if !parser.check(TokenKind::CloseParen) {
        loop {
            arguments.push(parse_argument(parser));
            if parser.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
    }

    parser.consume(TokenKind::CloseParen, "expected ')' after arguments");

    Expr::Call(CallExpr {
        span: parser.span_from(left.get_span().start),
        callee: Box::new(left),
        arguments,
    })
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Expr {
    parser.advance();
    let property = parser.consume(TokenKind::Identifier, "expected property name after '.'");
    let span = parser.span_from(left.get_span().start);

    if property.kind() == TokenKind::Error {
        return Expr::error(span);
    }

    Expr::MemberAccess(MemberAccessExpr {
        object: Box::new(left),
        property: IdentifierExpr {
            value: property.value().unwrap_or_default().to_string(),
            span: *property.span(),
        },
        span,
    })
}
