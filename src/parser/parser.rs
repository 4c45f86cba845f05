//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the `Parser` cursor and the `parse` entry point.
//! Statements are parsed by recursive descent, expressions with a Pratt
//! loop driven by the NUD/LED tables in `lookups`.
//!
//! The parser never stops at the first problem. A failed expectation is
//! recorded as a diagnostic and a synthetic token takes the place of the
//! missing one, so the caller can carry on building a (partly erroneous) tree.

use tracing::{debug, trace};

use crate::{
    ast::ast::{Comment, Program},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::stmt::parse_stmt;

/// How deep expressions, blocks and types may nest before the parser gives up
/// on the construct instead of recursing further.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The parsing session.
///
/// Owns the token stream with comments already moved aside, the cursor,
/// and everything reported so far.
pub struct Parser {
    /// Significant tokens, always terminated by an `Eof` token
    tokens: Vec<Token>,
    /// Index of the current token, never past the `Eof` token
    pos: usize,
    comments: Vec<Comment>,
    errors: Vec<Error>,
    /// Token index of the most recent deduplicated report
    last_error_at: Option<usize>,
    /// Current nesting of expressions, blocks and types
    depth: usize,
}

impl Parser {
    /// Creates a new Parser over `tokens`.
    ///
    /// Comment tokens are partitioned out into the comment side channel here,
    /// and a trailing `Eof` is added if the stream does not already end in one.
    pub fn new(tokens: Vec<Token>) -> Self {
        let (comment_tokens, mut tokens): (Vec<Token>, Vec<Token>) =
            tokens.into_iter().partition(|token| token.kind().is_comment());

        let comments = comment_tokens
            .into_iter()
            .map(|token| Comment {
                kind: token.kind(),
                text: token.value().unwrap_or_default().to_string(),
                span: *token.span(),
            })
            .collect();

        if tokens.last().map(Token::kind) != Some(TokenKind::Eof) {
            let end = tokens
                .last()
                .map(|token| token.span().end)
                .unwrap_or_else(Position::start);
            tokens.push(MK_TOKEN!(TokenKind::Eof, Span::at(end)));
        }

        Parser {
            tokens,
            pos: 0,
            comments,
            errors: vec![],
            last_error_at: None,
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the token after the current one, or `Eof` when there is none.
    pub fn peek_next(&self) -> &Token {
        let index = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Returns the most recently consumed token, or the first token if
    /// nothing has been consumed yet.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.peek().kind()
    }

    /// Advances to the next token and returns the consumed one.
    ///
    /// At end of input the cursor stays on `Eof`, which is returned again.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if !self.is_at_end() {
            self.pos += 1;
        }

        let token = &self.tokens[index];
        trace!(kind = ?token.kind(), line = token.span().start.line, "advance");
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.current_token_kind() == TokenKind::Eof
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        !self.is_at_end()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    pub fn check_value(&self, kind: TokenKind, value: &str) -> bool {
        self.check(kind) && self.peek().value() == Some(value)
    }

    /// Consumes the current token if it is of `kind`.
    pub fn try_consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// On a mismatch the cursor does not move, a diagnostic carrying
    /// `message` is recorded and a zero-width `TokenKind::Error` token is
    /// returned in place of the missing one.
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> Token {
        if let Some(token) = self.try_consume(kind) {
            return token;
        }

        let position = self.report_expected(message);
        MK_TOKEN!(TokenKind::Error, String::new(), Span::at(position))
    }

    /// Records that `message` was expected at the current token.
    ///
    /// Returns where the diagnostic was placed.
    pub fn report_expected(&mut self, message: &str) -> Position {
        if self.is_at_end() {
            let position = self.previous().span().end;
            self.report_at_current(
                ErrorImpl::UnexpectedEndOfInput {
                    message: message.to_string(),
                },
                position,
            );
            position
        } else {
            let found = self.peek().clone();
            let position = found.span().start;
            self.report_at_current(
                ErrorImpl::ExpectedToken {
                    message: message.to_string(),
                    found: found.text(),
                },
                position,
            );
            position
        }
    }

    /// Skips tokens until the current one is in `kinds`.
    ///
    /// Returns `false` when end of input is reached first, in which case one
    /// more diagnostic is recorded at the position where skipping began.
    pub fn synchronize(&mut self, kinds: &[TokenKind]) -> bool {
        let start = self.peek().span().start;
        let mut skipped = 0;

        while !self.is_at_end() {
            if kinds.contains(&self.current_token_kind()) {
                debug!(skipped, ?kinds, "synchronized");
                return true;
            }
            self.advance();
            skipped += 1;
        }

        let expected = kinds
            .iter()
            .map(|kind| format!("'{}'", kind.lexeme().unwrap_or("?")))
            .collect::<Vec<_>>()
            .join(" or ");
        self.report(
            ErrorImpl::UnexpectedEndOfInput {
                message: format!("looking for {}", expected),
            },
            start,
        );
        self.last_error_at = Some(self.pos);
        false
    }

    /// Records a diagnostic unconditionally.
    pub fn report(&mut self, error: ErrorImpl, position: Position) {
        debug!(%error, line = position.line, column = position.column, "parse error");
        self.errors.push(Error::new(error, position));
    }

    /// Records a diagnostic about the current token.
    ///
    /// A token that already has a diagnostic does not get a second one, so a
    /// single missing token does not produce one report per expectation.
    pub fn report_at_current(&mut self, error: ErrorImpl, position: Position) {
        if self.last_error_at == Some(self.pos) {
            trace!(%error, "suppressed repeated error");
            return;
        }

        self.last_error_at = Some(self.pos);
        self.report(error, position);
    }

    /// Enters one level of nesting.
    ///
    /// Returns `false`, with a diagnostic at the current token, once
    /// `MAX_NESTING_DEPTH` is reached. The level is only entered on success.
    pub fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            let position = self.get_position();
            self.report_at_current(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                position,
            );
            return false;
        }

        self.depth += 1;
        true
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Skips the rest of an expression without recursing into it.
    ///
    /// Brackets are balanced along the way. Stops at end of input or at a
    /// `;`, `,` or closing bracket that belongs to the enclosing construct.
    pub fn skip_expression(&mut self) {
        let mut open = 0usize;

        while !self.is_at_end() {
            match self.current_token_kind() {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenCurly => open += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly => {
                    if open == 0 {
                        return;
                    }
                    open -= 1;
                }
                TokenKind::Semicolon | TokenKind::Comma if open == 0 => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skips one bracketed group starting at the cursor, closing bracket included.
    pub fn skip_group(&mut self) {
        let mut open = 0usize;

        while !self.is_at_end() {
            match self.current_token_kind() {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenCurly => open += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly => {
                    open = open.saturating_sub(1);
                }
                _ => {}
            }
            self.advance();

            if open == 0 {
                return;
            }
        }
    }

    /// Treats a `>=` at the cursor as `>` followed by `=` and consumes the `>`.
    ///
    /// Used where a generic argument list closes right before an initializer,
    /// as in `List<Number>= [1]`.
    pub fn split_greater_equals(&mut self) -> bool {
        if !self.check(TokenKind::GreaterEquals) {
            return false;
        }

        let span = *self.peek().span();
        let middle = Position::new(span.start.line, span.start.column + 1);
        self.tokens[self.pos] = MK_TOKEN!(TokenKind::Greater, Span::new(span.start, middle));
        self.tokens.insert(
            self.pos + 1,
            MK_TOKEN!(TokenKind::Assignment, Span::new(middle, span.end)),
        );
        self.advance();
        true
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Start of the current token.
    pub fn get_position(&self) -> Position {
        self.peek().span().start
    }

    /// End of the last consumed token, used to close node spans.
    pub fn last_end(&self) -> Position {
        if self.pos == 0 {
            self.get_position()
        } else {
            self.previous().span().end
        }
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.last_end().max(start))
    }

    fn finish(self) -> (Vec<Error>, Vec<Comment>) {
        (self.errors, self.comments)
    }
}

/// Parses a stream of tokens into a `Program`.
///
/// Always returns a tree. Problems are added to `diagnostics` in the order
/// they were found, and the tree holds error nodes where they occurred.
pub fn parse(tokens: Vec<Token>, diagnostics: &mut Diagnostics) -> Program {
    let mut parser = Parser::new(tokens);
    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser));
    }

    let span = Span::new(Position::start(), parser.peek().span().end);
    debug!(
        statements = body.len(),
        errors = parser.error_count(),
        "parsed program"
    );

    let (errors, comments) = parser.finish();
    diagnostics.extend(errors);

    Program {
        body,
        comments,
        span,
    }
}
