//! Node position metadata.

use std::fmt;

use crate::token::{Token, TokenType};

/// Where a node came from: its first token and the offset one past its
/// last byte.
///
/// Positions are copied by value and never recomputed once a node exists;
/// rewritten nodes carry the position of the node they replace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    token: Token,
    finish: u32,
}

impl Position {
    /// Create a position from a token and a finish offset.
    #[inline]
    pub fn new(token: Token, finish: u32) -> Self {
        Self { token, finish }
    }

    /// A position spanning `start..finish`, classified as `kind`.
    pub fn spanning(kind: TokenType, start: u32, finish: u32) -> Self {
        Self::new(Token::new(kind, start, finish.saturating_sub(start)), finish)
    }

    /// The packed first token.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /// The token type of the first token.
    #[inline]
    pub fn token_type(&self) -> TokenType {
        self.token.kind()
    }

    /// Start offset in the source text.
    #[inline]
    pub fn start(&self) -> u32 {
        self.token.position()
    }

    /// Offset one past the last byte of the node.
    #[inline]
    pub fn finish(&self) -> u32 {
        self.finish
    }

    /// Number of bytes between start and finish.
    #[inline]
    pub fn len(&self) -> u32 {
        self.finish.saturating_sub(self.start())
    }

    /// Whether the node covers no source text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{}", self.token, self.finish)
    }
}
