//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization driven by an explicit state machine
//! - Longest-match operator recognition through a prefix trie
//! - Keywords, identifiers, numbers, strings and escapes
//! - The six comment forms, kept or discarded
//! - Line/column tracking for error reporting

pub mod lexer;
pub mod tokens;
pub mod trie;
