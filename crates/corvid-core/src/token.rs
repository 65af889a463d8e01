//! Packed lexical tokens.
//!
//! A [`Token`] is the compact form the parser attaches to every node: the
//! start offset, the token length, and the [`TokenType`] that classified
//! it, all packed into a single `u64`.
//!
//! ```text
//!  63            32 31              8 7      0
//! +----------------+-----------------+--------+
//! |    position    |     length      |  type  |
//! +----------------+-----------------+--------+
//! ```

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::TokenError;

/// Lexical classification of a token.
///
/// Only the token types that IR nodes are built from are listed; the
/// discriminants are part of the packed [`Token`] encoding and must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum TokenType {
    // =========================================
    // Special
    // =========================================
    /// End of input.
    Eof = 0,

    // =========================================
    // Identifiers and literals
    // =========================================
    /// User-defined identifier
    Ident,
    /// `null`
    Null,
    /// `true`
    True,
    /// `false`
    False,
    /// Numeric literal: `42`, `3.5`
    Decimal,
    /// String literal: `"hello"`
    String,

    // =========================================
    // Keywords
    // =========================================
    /// `var`
    Var,
    /// `return`
    Return,
    /// `throw`
    Throw,
    /// `if`
    If,
    /// `else`
    Else,
    /// `try`
    Try,
    /// `catch`
    Catch,
    /// `finally`
    Finally,

    // =========================================
    // Punctuation
    // =========================================
    /// `{`
    LBrace,
    /// `;`
    Semicolon,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    EqStrict,
    /// `!==`
    NeStrict,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `!`
    Not,
    /// `~`
    BitNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
    /// `delete`
    Delete,
    /// `instanceof`
    InstanceOf,
    /// `in`
    In,
}

impl TokenType {
    /// The source spelling of this token type, or a descriptive name for
    /// token types without a fixed spelling.
    pub fn name(self) -> &'static str {
        use TokenType::*;
        match self {
            Eof => "<eof>",
            Ident => "<ident>",
            Null => "null",
            True => "true",
            False => "false",
            Decimal => "<decimal>",
            String => "<string>",
            Var => "var",
            Return => "return",
            Throw => "throw",
            If => "if",
            Else => "else",
            Try => "try",
            Catch => "catch",
            Finally => "finally",
            LBrace => "{",
            Semicolon => ";",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Eq => "==",
            Ne => "!=",
            EqStrict => "===",
            NeStrict => "!==",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            And => "&&",
            Or => "||",
            Not => "!",
            BitNot => "~",
            Typeof => "typeof",
            Void => "void",
            Delete => "delete",
            InstanceOf => "instanceof",
            In => "in",
        }
    }

    /// Whether this token type is spelled as a word (and therefore needs
    /// surrounding whitespace when rendered as an operator).
    pub fn is_word(self) -> bool {
        self.name().chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A packed token: start position, length and [`TokenType`].
///
/// Tokens are plain values. Ordering follows the raw encoding, so tokens
/// order by start position first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u64);

impl Token {
    /// Largest length representable in a token. Longer lengths saturate.
    pub const MAX_LENGTH: u32 = (1 << 24) - 1;

    const TYPE_MASK: u64 = 0xFF;
    const LENGTH_SHIFT: u32 = 8;
    const POSITION_SHIFT: u32 = 32;

    /// Pack a token.
    #[inline]
    pub fn new(kind: TokenType, position: u32, length: u32) -> Self {
        let length = length.min(Self::MAX_LENGTH);
        Self(
            (u64::from(position) << Self::POSITION_SHIFT)
                | (u64::from(length) << Self::LENGTH_SHIFT)
                | u64::from(u8::from(kind)),
        )
    }

    /// Rebuild a token from its raw encoding.
    ///
    /// Fails if the low byte does not name a known [`TokenType`].
    pub fn from_raw(raw: u64) -> Result<Self, TokenError> {
        let tag = (raw & Self::TYPE_MASK) as u8;
        TokenType::try_from(tag).map_err(|_| TokenError::UnknownType { raw, tag })?;
        Ok(Self(raw))
    }

    /// The raw packed encoding.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Start offset in the source text.
    #[inline]
    pub fn position(self) -> u32 {
        (self.0 >> Self::POSITION_SHIFT) as u32
    }

    /// Token length in bytes.
    #[inline]
    pub fn length(self) -> u32 {
        ((self.0 >> Self::LENGTH_SHIFT) as u32) & Self::MAX_LENGTH
    }

    /// The token's lexical classification.
    #[inline]
    pub fn kind(self) -> TokenType {
        match TokenType::try_from((self.0 & Self::TYPE_MASK) as u8) {
            Ok(kind) => kind,
            // Both constructors only admit known tags.
            Err(_) => unreachable!("token {:#x} carries an unknown type tag", self.0),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}+{}", self.kind(), self.position(), self.length())
    }
}
