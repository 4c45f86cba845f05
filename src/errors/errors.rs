use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::Position;

/// Which front-end stage reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Lexer,
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    length: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            length: 1,
        }
    }

    /// Widens the caret underline to `length` characters.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_length(&self) -> usize {
        self.length
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> Stage {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::InvalidUnicodeEscape { .. }
            | ErrorImpl::MalformedNumber { .. }
            | ErrorImpl::InvalidOperator { .. } => Stage::Lexer,
            ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenInExpression { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NestingTooDeep { .. } => Stage::Parser,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InvalidUnicodeEscape { .. } => "InvalidUnicodeEscape",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenInExpression { .. } => "UnexpectedTokenInExpression",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "Close the string with the same quote character that opened it",
            )),
            ErrorImpl::UnterminatedComment => ErrorTip::Suggestion(String::from(
                "Multi-line comments end with `>#`, `<#` or `]#` matching how they were opened",
            )),
            ErrorImpl::InvalidUnicodeEscape { .. } => ErrorTip::Suggestion(String::from(
                "Unicode escapes take exactly four hex digits, e.g. `\\u0041`",
            )),
            ErrorImpl::MalformedNumber { .. } => ErrorTip::Suggestion(String::from(
                "A number may contain at most one `.` and one exponent marker",
            )),
            ErrorImpl::InvalidOperator { .. } => ErrorTip::None,
            ErrorImpl::ExpectedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenInExpression { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                token
            )),
            ErrorImpl::UnexpectedEndOfInput { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the construct up, for example by naming intermediate values",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.position.line, self.position.column, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected character {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid unicode escape: {sequence:?}")]
    InvalidUnicodeEscape { sequence: String },
    #[error("malformed number {token:?}: {reason}")]
    MalformedNumber { token: String, reason: String },
    #[error("invalid operator: {token:?}")]
    InvalidOperator { token: String },
    #[error("{message}, found {found:?}")]
    ExpectedToken { message: String, found: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token in expression: {token:?}")]
    UnexpectedTokenInExpression { token: String },
    #[error("unexpected end of input: {message}")]
    UnexpectedEndOfInput { message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
