//! Prefix trie over the operator lexeme table.
//!
//! The lexer walks this trie character by character to find the longest
//! operator starting at the cursor (maximal munch), falling back to the
//! last node that terminated a lexeme.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::tokens::{TokenKind, OPERATOR_LOOKUP};

lazy_static! {
    pub static ref OPERATOR_TRIE: OperatorTrie = OperatorTrie::from_lexemes(OPERATOR_LOOKUP.iter().copied());
}

#[derive(Debug, Default)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: Option<TokenKind>,
}

impl TrieNode {
    pub fn terminal(&self) -> Option<TokenKind> {
        self.terminal
    }
}

/// Result of walking the trie from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Munch {
    /// Longest lexeme found, with its length in characters.
    pub matched: Option<(TokenKind, usize)>,
    /// How many characters the walk consumed before running out of children.
    pub walked: usize,
}

#[derive(Debug, Default)]
pub struct OperatorTrie {
    root: TrieNode,
}

impl OperatorTrie {
    pub fn from_lexemes<'a>(lexemes: impl IntoIterator<Item = (&'a str, TokenKind)>) -> Self {
        let mut trie = OperatorTrie::default();

        for (lexeme, kind) in lexemes {
            let mut node = &mut trie.root;
            for c in lexeme.chars() {
                node = node.children.entry(c).or_default();
            }
            node.terminal = Some(kind);
        }

        trie
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn step<'t>(&self, node: &'t TrieNode, c: char) -> Option<&'t TrieNode> {
        node.children.get(&c)
    }

    pub fn longest_match(&self, chars: impl IntoIterator<Item = char>) -> Munch {
        let mut node = &self.root;
        let mut munch = Munch {
            matched: None,
            walked: 0,
        };

        for c in chars {
            match self.step(node, c) {
                Some(next) => {
                    node = next;
                    munch.walked += 1;
                    if let Some(kind) = node.terminal {
                        munch.matched = Some((kind, munch.walked));
                    }
                }
                None => break,
            }
        }

        munch
    }
}
