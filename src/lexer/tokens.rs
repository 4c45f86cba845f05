use lazy_static::lazy_static;
use serde::Serialize;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("proc", TokenKind::Proc);
        map.insert("enum", TokenKind::Enum);
        map.insert("private", TokenKind::Private);
        map.insert("public", TokenKind::Public);
        map.insert("temp", TokenKind::Temp);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map
    };

    /// Every operator and punctuation lexeme the lexer recognises.
    ///
    /// Order carries no meaning, the operator trie resolves overlaps by length.
    pub static ref OPERATOR_LOOKUP: Vec<(&'static str, TokenKind)> = vec![
        ("[", TokenKind::OpenBracket),
        ("]", TokenKind::CloseBracket),
        ("{", TokenKind::OpenCurly),
        ("}", TokenKind::CloseCurly),
        ("(", TokenKind::OpenParen),
        (")", TokenKind::CloseParen),
        ("=", TokenKind::Assignment),
        ("==", TokenKind::Equals),
        ("!", TokenKind::Not),
        ("!=", TokenKind::NotEquals),
        ("<", TokenKind::Less),
        ("<=", TokenKind::LessEquals),
        (">", TokenKind::Greater),
        (">=", TokenKind::GreaterEquals),
        ("||", TokenKind::Or),
        ("&&", TokenKind::And),
        ("|", TokenKind::Pipe),
        (".", TokenKind::Dot),
        ("...", TokenKind::Ellipsis),
        (";", TokenKind::Semicolon),
        (":", TokenKind::Colon),
        ("?", TokenKind::Question),
        (",", TokenKind::Comma),
        ("@", TokenKind::At),
        ("->", TokenKind::Arrow),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Dash),
        ("/", TokenKind::Slash),
        ("*", TokenKind::Star),
        ("**", TokenKind::StarStar),
        ("%", TokenKind::Percent),
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    Eof,
    Number,
    String,
    Identifier,
    /// Never lexed. Stands in for a token the parser expected but did not find.
    Error,

    // Comments, `#`, `#*`, `#< >#` and `#> <#`
    SingleLineExpandedComment,
    SingleLineCollapsedComment,
    MultiLineExpandedComment,
    MultiLineCollapsedComment,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Pipe,

    Dot,
    Ellipsis,
    Semicolon,
    Colon,
    Question,
    Comma,
    At,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,
    StarStar,
    Percent,

    // Reserved
    Proc,
    Enum,
    Private,
    Public,
    Temp,
    True,
    False,
    Null,
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            TokenKind::SingleLineExpandedComment
                | TokenKind::SingleLineCollapsedComment
                | TokenKind::MultiLineExpandedComment
                | TokenKind::MultiLineCollapsedComment
        )
    }

    /// The source text of a unit token, used when reporting it back to the user.
    pub fn lexeme(&self) -> Option<&'static str> {
        OPERATOR_LOOKUP
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(lexeme, _)| *lexeme)
            .or_else(|| {
                RESERVED_LOOKUP
                    .iter()
                    .find(|(_, kind)| *kind == self)
                    .map(|(word, _)| *word)
            })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// Identifiers, numbers, strings and comment bodies.
    Valued {
        kind: TokenKind,
        value: String,
        span: Span,
    },
    /// Keywords, operators, punctuation and end of input.
    Unit { kind: TokenKind, span: Span },
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Valued { kind, value, .. } => write!(f, "{} ({})", kind, value),
            Token::Unit { kind, .. } => write!(f, "{} ()", kind),
        }
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Valued { kind, .. } | Token::Unit { kind, .. } => *kind,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Token::Valued { span, .. } | Token::Unit { span, .. } => span,
        }
    }

    /// The payload of a valued token, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Token::Valued { value, .. } => Some(value),
            Token::Unit { .. } => None,
        }
    }

    /// How the token reads in a diagnostic.
    pub fn text(&self) -> String {
        match self {
            Token::Valued { value, .. } => value.clone(),
            Token::Unit {
                kind: TokenKind::Eof,
                ..
            } => String::from("end of input"),
            Token::Unit { kind, .. } => kind
                .lexeme()
                .map(String::from)
                .unwrap_or_else(|| kind.to_string()),
        }
    }
}
