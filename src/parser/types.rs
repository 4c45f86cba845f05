//! Type annotation parsing.
//!
//! `Name`, `Name<T, U>` and unions `A | B`. Unions fold to the left.

use crate::{
    ast::{ast::Node, types::TypeNode},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> TypeNode {
    let start = parser.get_position();
    if !parser.enter_nesting() {
        skip_type(parser);
        return TypeNode::Error {
            span: parser.span_from(start),
        };
    }

    let mut left = parse_named_type(parser);

    while parser.try_consume(TokenKind::Pipe).is_some() {
        let right = parse_named_type(parser);
        let span = left.get_span().to(right.get_span());
        left = TypeNode::Union {
            left: Box::new(left),
            right: Box::new(right),
            span,
        };
    }

    parser.exit_nesting();
    left
}

/// Skips a type annotation, balancing `<` against `>`.
///
/// A `>` with no matching `<` belongs to the enclosing generic list and is
/// left in place.
fn skip_type(parser: &mut Parser) {
    let mut open = 0usize;

    loop {
        match parser.current_token_kind() {
            TokenKind::Identifier | TokenKind::Pipe => {}
            TokenKind::Comma if open > 0 => {}
            TokenKind::Less => open += 1,
            TokenKind::Greater if open > 0 => open -= 1,
            TokenKind::GreaterEquals if open > 0 => {
                parser.split_greater_equals();
                return;
            }
            _ => return,
        }
        parser.advance();
    }
}

fn parse_named_type(parser: &mut Parser) -> TypeNode {
    if !parser.check(TokenKind::Identifier) {
        let position = parser.report_expected("expected type name");
        return TypeNode::Error {
            span: Span::at(position),
        };
    }

    let name = parser.advance().clone();
    let mut generics = vec![];

    if parser.try_consume(TokenKind::Less).is_some() {
        loop {
            generics.push(parse_type(parser));
            if parser.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        // `List<Number>= [1]` lexes its closing bracket as `>=`
        if !parser.split_greater_equals() {
            parser.consume(TokenKind::Greater, "expected '>' after generic arguments");
        }
    }

    TypeNode::Named {
        name: name.value().unwrap_or_default().to_string(),
        generics,
        span: parser.span_from(name.span().start),
    }
}
