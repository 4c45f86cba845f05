#![allow(clippy::module_inception)]

use serde::Serialize;

pub mod ast;
pub mod cli;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

pub use errors::diagnostics::Diagnostics;
pub use lexer::lexer::tokenize;
pub use parser::parser::parse;

/// A 1-based line/column pair into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// The position of the first character of a file.
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// A zero-width span sitting at `position`.
    pub fn at(position: Position) -> Self {
        Span {
            start: position,
            end: position,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Returns the text of the 1-based `line` in `source`, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::{get_line_at_position, Position, Span};

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";

        assert_eq!(get_line_at_position(source, 1), Some("Hello, world!"));
        assert_eq!(get_line_at_position(source, 2), Some("second"));
        assert_eq!(get_line_at_position(source, 3), Some(""));
        assert_eq!(get_line_at_position(source, 4), Some("Testing { }"));
        assert_eq!(get_line_at_position(source, 0), None);
        assert_eq!(get_line_at_position(source, 9), None);
    }

    #[test]
    fn test_span_to_covers_both() {
        let a = Span::new(Position::new(1, 5), Position::new(1, 8));
        let b = Span::new(Position::new(2, 1), Position::new(2, 3));

        assert_eq!(a.to(&b), Span::new(Position::new(1, 5), Position::new(2, 3)));
        assert_eq!(b.to(&a), Span::new(Position::new(1, 5), Position::new(2, 3)));
    }
}
