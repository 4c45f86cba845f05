//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance, valued or unit
//!
//! The lexer and the parser's synthetic error tokens both build tokens
//! through this macro.

/// Creates a Token instance.
///
/// With three arguments a `Token::Valued` is built, with two a `Token::Unit`.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's text payload (valued tokens only)
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let number = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// let plus = MK_TOKEN!(TokenKind::Plus, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token::Valued {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
    ($kind:expr, $span:expr) => {
        $crate::lexer::tokens::Token::Unit {
            kind: $kind,
            span: $span,
        }
    };
}
