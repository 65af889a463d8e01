//! Operator definitions for unary and binary IR nodes.
//!
//! Provides enums for binary and unary operators along with the precedence
//! information the renderer uses to place parentheses.

use corvid_core::TokenType;
use std::fmt;

/// Binary operators.
///
/// Organized by precedence from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical OR (precedence 4)
    /// `||`
    Or,

    // Logical AND (precedence 5)
    /// `&&`
    And,

    // Equality (precedence 9)
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    EqStrict,
    /// `!==`
    NeStrict,

    // Relational (precedence 10)
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `instanceof`
    InstanceOf,
    /// `in`
    In,

    // Additive (precedence 12)
    /// `+`
    Add,
    /// `-`
    Sub,

    // Multiplicative (precedence 13)
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl BinaryOp {
    /// Precedence of this operator. Higher values bind more tightly.
    /// All binary operators here are left-associative.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Or => 4,
            And => 5,
            Eq | Ne | EqStrict | NeStrict => 9,
            Lt | Le | Gt | Ge | InstanceOf | In => 10,
            Add | Sub => 12,
            Mul | Div | Mod => 13,
        }
    }

    /// The token type this operator is spelled with.
    pub fn token(&self) -> TokenType {
        use BinaryOp::*;
        match self {
            Or => TokenType::Or,
            And => TokenType::And,
            Eq => TokenType::Eq,
            Ne => TokenType::Ne,
            EqStrict => TokenType::EqStrict,
            NeStrict => TokenType::NeStrict,
            Lt => TokenType::Lt,
            Le => TokenType::Le,
            Gt => TokenType::Gt,
            Ge => TokenType::Ge,
            InstanceOf => TokenType::InstanceOf,
            In => TokenType::In,
            Add => TokenType::Add,
            Sub => TokenType::Sub,
            Mul => TokenType::Mul,
            Div => TokenType::Div,
            Mod => TokenType::Mod,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().name())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-` negation
    Neg,
    /// `+` plus (unary)
    Plus,
    /// `!` logical NOT
    Not,
    /// `~` bitwise NOT
    BitNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

impl UnaryOp {
    /// Precedence for prefix operators, higher than every binary operator.
    pub fn precedence() -> u8 {
        15
    }

    /// The token type this operator is spelled with.
    pub fn token(&self) -> TokenType {
        match self {
            UnaryOp::Neg => TokenType::Sub,
            UnaryOp::Plus => TokenType::Add,
            UnaryOp::Not => TokenType::Not,
            UnaryOp::BitNot => TokenType::BitNot,
            UnaryOp::Typeof => TokenType::Typeof,
            UnaryOp::Void => TokenType::Void,
            UnaryOp::Delete => TokenType::Delete,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().name())
    }
}
