use tracing::trace;

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
    trie::OPERATOR_TRIE,
};

/// Appended to every source so the state machine always has a character to look at.
const SENTINEL: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    SingleLineExpanded,
    SingleLineCollapsed,
    SingleLineIgnored,
    MultiLineExpanded,
    MultiLineCollapsed,
    MultiLineIgnored,
}

impl CommentKind {
    /// Picks the variant from the character right after `#`. The flag tells
    /// whether that character is a variant marker and belongs to the opener.
    fn from_marker(marker: char) -> (CommentKind, bool) {
        match marker {
            '*' => (CommentKind::SingleLineCollapsed, true),
            '!' => (CommentKind::SingleLineIgnored, true),
            '<' => (CommentKind::MultiLineExpanded, true),
            '>' => (CommentKind::MultiLineCollapsed, true),
            '[' => (CommentKind::MultiLineIgnored, true),
            _ => (CommentKind::SingleLineExpanded, false),
        }
    }

    /// Closing pair for multi-line variants; single-line ones end at a newline.
    fn terminator(&self) -> Option<(char, char)> {
        match self {
            CommentKind::MultiLineExpanded => Some(('>', '#')),
            CommentKind::MultiLineCollapsed => Some(('<', '#')),
            CommentKind::MultiLineIgnored => Some((']', '#')),
            _ => None,
        }
    }

    /// `None` for the ignored variants, which are never emitted.
    fn token_kind(&self) -> Option<TokenKind> {
        match self {
            CommentKind::SingleLineExpanded => Some(TokenKind::SingleLineExpandedComment),
            CommentKind::SingleLineCollapsed => Some(TokenKind::SingleLineCollapsedComment),
            CommentKind::MultiLineExpanded => Some(TokenKind::MultiLineExpandedComment),
            CommentKind::MultiLineCollapsed => Some(TokenKind::MultiLineCollapsedComment),
            CommentKind::SingleLineIgnored | CommentKind::MultiLineIgnored => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Start,
    Identifier,
    String { quote: char },
    EscapedString { quote: char },
    Number,
    Operator,
    Comment(CommentKind),
}

#[derive(Debug, Default, Clone, Copy)]
struct NumberShape {
    seen_dot: bool,
    seen_exponent: bool,
    radix: Option<u32>,
}

/// One tokenization session. Built fresh for every `tokenize` call.
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    state: LexState,
    /// Characters collected since the current state was entered
    buffer: String,
    /// Where the token being collected started
    start: Position,
    number: NumberShape,
    tokens: Vec<Token>,
    errors: Vec<Error>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let mut chars: Vec<char> = source.chars().collect();
        chars.push(SENTINEL);

        Lexer {
            source: chars,
            pos: 0,
            line: 1,
            column: 1,
            state: LexState::Start,
            buffer: String::new(),
            start: Position::start(),
            number: NumberShape::default(),
            tokens: vec![],
            errors: vec![],
            finished: false,
        }
    }

    pub fn at(&self) -> char {
        self.source[self.pos]
    }

    pub fn peek(&self, distance: usize) -> char {
        self.source
            .get(self.pos + distance)
            .copied()
            .unwrap_or(SENTINEL)
    }

    pub fn at_eof(&self) -> bool {
        self.pos + 1 >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn advance(&mut self) {
        if self.at_eof() {
            return;
        }

        if self.at() == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn begin(&mut self, state: LexState) {
        self.start = self.position();
        self.buffer.clear();
        self.state = state;
    }

    fn accept(&mut self, c: char) {
        self.buffer.push(c);
        self.advance();
    }

    fn span(&self) -> Span {
        Span::new(self.start, self.position())
    }

    fn push(&mut self, token: Token) {
        trace!(
            kind = %token.kind(),
            line = token.span().start.line,
            column = token.span().start.column,
            "emit"
        );
        self.tokens.push(token);
        self.buffer.clear();
        self.state = LexState::Start;
    }

    fn emit(&mut self, kind: TokenKind) {
        let value = self.buffer.trim().to_string();
        let span = self.span();
        self.push(MK_TOKEN!(kind, value, span));
    }

    fn emit_unit(&mut self, kind: TokenKind) {
        let span = self.span();
        self.push(MK_TOKEN!(kind, span));
    }

    /// String contents are emitted untrimmed, whitespace inside quotes is content.
    fn emit_string(&mut self) {
        let value = std::mem::take(&mut self.buffer);
        let span = self.span();
        self.push(MK_TOKEN!(TokenKind::String, value, span));
    }

    fn error(&mut self, error: ErrorImpl, position: Position, length: usize) {
        self.errors
            .push(Error::new(error, position).with_length(length));
    }

    pub fn run(mut self) -> (Vec<Token>, Vec<Error>) {
        while !self.finished {
            let c = self.at();
            match self.state {
                LexState::Start => self.lex_start(c),
                LexState::Identifier => self.lex_identifier(c),
                LexState::Number => self.lex_number(c),
                LexState::String { quote } => self.lex_string(c, quote),
                LexState::EscapedString { quote } => self.lex_escape(c, quote),
                LexState::Operator => self.lex_operator(),
                LexState::Comment(kind) => self.lex_comment(c, kind),
            }
        }

        (self.tokens, self.errors)
    }

    fn lex_start(&mut self, c: char) {
        if self.at_eof() {
            self.begin(LexState::Start);
            self.emit_unit(TokenKind::Eof);
            self.finished = true;
            return;
        }

        match c {
            c if c.is_whitespace() => self.advance(),
            c if c.is_ascii_alphabetic() || c == '_' => self.begin(LexState::Identifier),
            c if c.is_ascii_digit() => {
                self.number = NumberShape::default();
                self.begin(LexState::Number);
            }
            '"' | '\'' => {
                self.begin(LexState::String { quote: c });
                self.advance();
            }
            '#' => {
                self.begin(LexState::Start);
                self.advance();
                let (kind, has_marker) = CommentKind::from_marker(self.at());
                if has_marker {
                    self.advance();
                }
                self.state = LexState::Comment(kind);
            }
            c if c.is_ascii_punctuation() => self.begin(LexState::Operator),
            c => {
                let position = self.position();
                self.error(ErrorImpl::UnexpectedCharacter { character: c }, position, 1);
                self.advance();
            }
        }
    }

    fn lex_identifier(&mut self, c: char) {
        if c.is_ascii_alphanumeric() || c == '_' {
            self.accept(c);
            return;
        }

        match RESERVED_LOOKUP.get(self.buffer.as_str()) {
            Some(kind) => self.emit_unit(*kind),
            None => self.emit(TokenKind::Identifier),
        }
    }

    fn lex_number(&mut self, c: char) {
        if let Some(radix) = self.number.radix {
            if c.is_digit(radix) {
                self.accept(c);
            } else {
                if self.buffer.len() == 2 {
                    let position = self.position();
                    self.malformed_number("missing digits after radix prefix", position);
                }
                self.emit(TokenKind::Number);
            }
            return;
        }

        match c {
            '0'..='9' => self.accept(c),
            // a dot not followed by a digit is member access on the literal
            '.' if self.peek(1).is_ascii_digit() => {
                if self.number.seen_dot || self.number.seen_exponent {
                    let position = self.position();
                    self.malformed_number("unexpected second decimal point", position);
                    self.emit(TokenKind::Number);
                } else {
                    self.number.seen_dot = true;
                    self.accept(c);
                }
            }
            'e' | 'E' => {
                if self.number.seen_exponent {
                    let position = self.position();
                    self.malformed_number("unexpected second exponent marker", position);
                    self.emit(TokenKind::Number);
                } else {
                    self.number.seen_exponent = true;
                    self.accept(c);
                }
            }
            '+' | '-' if self.buffer.ends_with(|ch| ch == 'e' || ch == 'E') => self.accept(c),
            'x' | 'b' | 'o' if self.buffer == "0" => {
                self.number.radix = Some(match c {
                    'x' => 16,
                    'b' => 2,
                    _ => 8,
                });
                self.accept(c);
            }
            _ => self.emit(TokenKind::Number),
        }
    }

    fn malformed_number(&mut self, reason: &str, position: Position) {
        let token = self.buffer.clone();
        self.error(
            ErrorImpl::MalformedNumber {
                token,
                reason: reason.to_string(),
            },
            position,
            1,
        );
    }

    fn unterminated_string(&mut self) {
        let start = self.start;
        let length = self.buffer.chars().count() + 1;
        self.error(ErrorImpl::UnterminatedString, start, length);
        self.emit_string();
    }

    fn lex_string(&mut self, c: char, quote: char) {
        if self.at_eof() {
            self.unterminated_string();
            return;
        }

        if c == quote {
            self.advance();
            self.emit_string();
        } else if c == '\\' {
            self.advance();
            self.state = LexState::EscapedString { quote };
        } else {
            self.accept(c);
        }
    }

    fn lex_escape(&mut self, c: char, quote: char) {
        if self.at_eof() {
            self.unterminated_string();
            return;
        }

        match c {
            'n' => self.escaped('\n'),
            't' => self.escaped('\t'),
            'r' => self.escaped('\r'),
            'u' => {
                // the backslash sits right before the `u`
                let escape_start = Position::new(self.line, self.column - 1);
                self.advance();

                let mut hex = String::new();
                while hex.len() < 4 && self.at().is_ascii_hexdigit() {
                    hex.push(self.at());
                    self.advance();
                }

                let decoded = if hex.len() == 4 {
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };

                match decoded {
                    Some(ch) => self.buffer.push(ch),
                    None => self.error(
                        ErrorImpl::InvalidUnicodeEscape {
                            sequence: format!("\\u{}", hex),
                        },
                        escape_start,
                        hex.len() + 2,
                    ),
                }
            }
            // unknown escapes keep the escaped character as is
            _ => self.accept(c),
        }

        self.state = LexState::String { quote };
    }

    fn escaped(&mut self, decoded: char) {
        self.buffer.push(decoded);
        self.advance();
    }

    fn lex_operator(&mut self) {
        let munch = OPERATOR_TRIE.longest_match(self.source[self.pos..].iter().copied());

        match munch.matched {
            Some((kind, length)) => {
                for _ in 0..length {
                    self.advance();
                }
                self.emit_unit(kind);
            }
            None => {
                let walked = munch.walked.max(1);
                let token: String = self.source[self.pos..self.pos + walked].iter().collect();
                let position = self.position();
                self.error(ErrorImpl::InvalidOperator { token }, position, walked);
                self.advance();
                self.state = LexState::Start;
            }
        }
    }

    fn lex_comment(&mut self, c: char, kind: CommentKind) {
        match kind.terminator() {
            None => {
                if self.at_eof() || c == '\n' {
                    self.finish_comment(kind);
                } else {
                    self.accept(c);
                }
            }
            Some((first, second)) => {
                if self.at_eof() {
                    let start = self.start;
                    self.error(ErrorImpl::UnterminatedComment, start, 2);
                    self.finish_comment(kind);
                } else if c == first && self.peek(1) == second {
                    self.advance();
                    self.advance();
                    self.finish_comment(kind);
                } else {
                    self.accept(c);
                }
            }
        }
    }

    fn finish_comment(&mut self, kind: CommentKind) {
        match kind.token_kind() {
            Some(token_kind) => self.emit(token_kind),
            None => {
                trace!(?kind, line = self.start.line, "skip comment");
                self.buffer.clear();
                self.state = LexState::Start;
            }
        }
    }
}

/// Converts source text into tokens, always ending with a single `Eof` token.
///
/// Malformed input never stops the lexer: every problem is recorded in
/// `diagnostics` and lexing carries on from the next character.
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let (tokens, errors) = Lexer::new(source).run();
    diagnostics.extend(errors);
    tokens
}
