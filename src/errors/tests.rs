//! Unit tests for error handling.
//!
//! This module contains tests for error types and the diagnostic reporter.

use pretty_assertions::assert_eq;

use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Stage};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: 'é' },
        Position::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
    assert_eq!(error.get_stage(), Stage::Lexer);
    assert_eq!(error.get_length(), 1);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position::new(4, 2),
    );

    assert_eq!(error.get_position().line, 4);
    assert_eq!(error.get_position().column, 2);
    assert_eq!(error.get_stage(), Stage::Parser);
}

#[test]
fn test_error_length_never_zero() {
    let error = Error::new(ErrorImpl::UnterminatedString, Position::start()).with_length(0);
    assert_eq!(error.get_length(), 1);

    let error = Error::new(
        ErrorImpl::InvalidOperator {
            token: "&".to_string(),
        },
        Position::start(),
    )
    .with_length(3);
    assert_eq!(error.get_length(), 3);
}

#[test]
fn test_expected_token_message() {
    let error = Error::new(
        ErrorImpl::ExpectedToken {
            message: "expected ',' or ')'".to_string(),
            found: "b".to_string(),
        },
        Position::new(1, 18),
    );

    assert_eq!(error.get_error().to_string(), "expected ',' or ')', found \"b\"");
    assert_eq!(error.to_string(), "1:18: expected ',' or ')', found \"b\"");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '\u{7}' },
        Position::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position::start(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostics_collects_in_order() {
    let mut diagnostics = Diagnostics::new();
    assert!(!diagnostics.has_errors());

    diagnostics.add(Error::new(ErrorImpl::UnterminatedString, Position::new(2, 1)));
    diagnostics.add(Error::new(
        ErrorImpl::UnexpectedEndOfInput {
            message: "expected '}'".to_string(),
        },
        Position::new(3, 1),
    ));

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics
            .iter()
            .map(|e| e.get_error_name())
            .collect::<Vec<_>>(),
        vec!["UnterminatedString", "UnexpectedEndOfInput"]
    );
    assert_eq!(diagnostics.from_stage(Stage::Lexer).count(), 1);
    assert_eq!(diagnostics.from_stage(Stage::Parser).count(), 1);
}

#[test]
fn test_render_underlines_column() {
    let source = "temp x: Number = 1;\ntemp y: Number = $;\n";
    let mut diagnostics = Diagnostics::new();
    diagnostics.add(
        Error::new(
            ErrorImpl::InvalidOperator {
                token: "$".to_string(),
            },
            Position::new(2, 18),
        )
        .with_length(1),
    );

    let rendered = diagnostics.render(source, "main.proc");
    let expected = [
        "Error[lexer]: invalid operator: \"$\"",
        "-> main.proc:2:18",
        "  |",
        "2 | temp y: Number = $;",
        "  |                  ^",
        "",
    ]
    .join("\n");

    assert_eq!(rendered, expected);
}

#[test]
fn test_render_without_source_line() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add(Error::new(ErrorImpl::UnterminatedString, Position::new(7, 1)));

    let rendered = diagnostics.render("\"abc", "main.proc");
    assert!(rendered.starts_with("Error[lexer]: unterminated string\n-> main.proc:7:1\n"));
    assert!(rendered.contains("= Close the string"));
    assert!(!rendered.contains('|'));
}
