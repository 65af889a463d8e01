//! Constant folding.
//!
//! Operators whose operands are all literals are replaced by the literal
//! they evaluate to. The replacement takes over the position metadata of
//! the operator node, so diagnostics still point at the original
//! expression. Folding runs bottom-up in the leave hooks, which lets
//! nested constant expressions collapse in a single traversal.
//!
//! Operators whose result depends on runtime state (`delete`,
//! `instanceof`, `in`) and loose comparisons between different types are
//! left alone. So are prefixed numeric strings too large to convert
//! exactly.

use std::cmp::Ordering;

use crate::arena::IrArena;
use crate::error::IrResult;
use crate::expr::{BinaryNode, LiteralNode, LiteralValue, UnaryNode};
use crate::node::Node;
use crate::ops::{BinaryOp, UnaryOp};
use crate::render;
use crate::visitor::Visitor;

/// Rewriting pass replacing constant operator nodes by literals.
pub struct ConstantFolder<'ir> {
    arena: IrArena<'ir>,
    folded: usize,
}

impl<'ir> ConstantFolder<'ir> {
    pub fn new(arena: IrArena<'ir>) -> Self {
        Self { arena, folded: 0 }
    }

    /// Fold `root`, returning the new root and the number of replaced nodes.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, root: Node<'ir>) -> IrResult<(Node<'ir>, usize)> {
        let root = root.accept(self.arena, &mut self)?;
        Ok((root, self.folded))
    }

    fn replace(&mut self, original: Node<'ir>, value: LiteralValue<'ir>) -> Node<'ir> {
        self.folded += 1;
        Node::Literal(LiteralNode::from_meta(self.arena, original.meta(), value))
    }

    fn fold_unary(&self, op: UnaryOp, operand: LiteralValue<'ir>) -> Option<LiteralValue<'ir>> {
        let value = match op {
            UnaryOp::Neg => LiteralValue::Number(-to_number(operand)?),
            UnaryOp::Plus => LiteralValue::Number(to_number(operand)?),
            UnaryOp::Not => LiteralValue::Bool(!operand.is_truthy()),
            UnaryOp::BitNot => LiteralValue::Number(f64::from(!to_int32(to_number(operand)?))),
            UnaryOp::Typeof => LiteralValue::String(operand.type_name()),
            UnaryOp::Void => LiteralValue::Undefined,
            UnaryOp::Delete => return None,
        };
        Some(value)
    }

    fn fold_binary(
        &self,
        op: BinaryOp,
        lhs: LiteralValue<'ir>,
        rhs: LiteralValue<'ir>,
    ) -> Option<LiteralValue<'ir>> {
        use LiteralValue::{Bool, Number};

        let value = match op {
            BinaryOp::Add => match (lhs, rhs) {
                (LiteralValue::String(_), _) | (_, LiteralValue::String(_)) => {
                    let mut joined = String::new();
                    to_display(&mut joined, lhs);
                    to_display(&mut joined, rhs);
                    LiteralValue::String(self.arena.alloc_str(&joined))
                }
                _ => Number(to_number(lhs)? + to_number(rhs)?),
            },
            BinaryOp::Sub => Number(to_number(lhs)? - to_number(rhs)?),
            BinaryOp::Mul => Number(to_number(lhs)? * to_number(rhs)?),
            BinaryOp::Div => Number(to_number(lhs)? / to_number(rhs)?),
            BinaryOp::Mod => Number(to_number(lhs)? % to_number(rhs)?),
            BinaryOp::EqStrict => Bool(lhs.strict_equals(&rhs)),
            BinaryOp::NeStrict => Bool(!lhs.strict_equals(&rhs)),
            BinaryOp::Eq => Bool(loose_equals(lhs, rhs)?),
            BinaryOp::Ne => Bool(!loose_equals(lhs, rhs)?),
            BinaryOp::Lt => Bool(compare(lhs, rhs)? == Some(Ordering::Less)),
            BinaryOp::Gt => Bool(compare(lhs, rhs)? == Some(Ordering::Greater)),
            BinaryOp::Le => Bool(matches!(
                compare(lhs, rhs)?,
                Some(Ordering::Less | Ordering::Equal)
            )),
            BinaryOp::Ge => Bool(matches!(
                compare(lhs, rhs)?,
                Some(Ordering::Greater | Ordering::Equal)
            )),
            BinaryOp::And => {
                if lhs.is_truthy() {
                    rhs
                } else {
                    lhs
                }
            }
            BinaryOp::Or => {
                if lhs.is_truthy() {
                    lhs
                } else {
                    rhs
                }
            }
            BinaryOp::InstanceOf | BinaryOp::In => return None,
        };
        Some(value)
    }
}

impl<'ir> Visitor<'ir> for ConstantFolder<'ir> {
    fn leave_unary(&mut self, node: &'ir UnaryNode<'ir>) -> Node<'ir> {
        let folded = node
            .operand()
            .as_literal()
            .and_then(|operand| self.fold_unary(node.op(), operand.value()));

        match folded {
            Some(value) => self.replace(Node::Unary(node), value),
            None => Node::Unary(node),
        }
    }

    fn leave_binary(&mut self, node: &'ir BinaryNode<'ir>) -> Node<'ir> {
        let folded = match (node.lhs().as_literal(), node.rhs().as_literal()) {
            (Some(lhs), Some(rhs)) => self.fold_binary(node.op(), lhs.value(), rhs.value()),
            _ => None,
        };

        match folded {
            Some(value) => self.replace(Node::Binary(node), value),
            None => Node::Binary(node),
        }
    }
}

/// Numeric value of a literal, or `None` when it cannot be computed
/// exactly at compile time.
fn to_number(value: LiteralValue<'_>) -> Option<f64> {
    match value {
        LiteralValue::Null => Some(0.0),
        LiteralValue::Undefined => Some(f64::NAN),
        LiteralValue::Bool(b) => Some(f64::from(u8::from(b))),
        LiteralValue::Number(n) => Some(n),
        LiteralValue::String(s) => string_to_number(s),
    }
}

/// String to number conversion. Surrounding whitespace is ignored and an
/// empty string is zero. The rest must be a decimal literal with an
/// optional sign, a signed `Infinity`, or an unsigned `0x`/`0o`/`0b`
/// integer; anything else is NaN.
fn string_to_number(s: &str) -> Option<f64> {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_integer(&s[2..], radix);
    }

    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else if is_decimal_literal(unsigned) {
        unsigned.parse().unwrap_or(f64::NAN)
    } else {
        return Some(f64::NAN);
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Digits of a prefixed integer. `None` once the value leaves the range
/// where accumulating in an `f64` is exact.
fn radix_integer(digits: &str, radix: u32) -> Option<f64> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut value = 0.0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return Some(f64::NAN);
        };
        value = value * f64::from(radix) + f64::from(digit);
        if value > EXACT_LIMIT {
            return None;
        }
    }
    Some(value)
}

/// `digits [. digits] [e [sign] digits]`, where either side of the point
/// may be empty but not both.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while bytes.get(*i).is_some_and(u8::is_ascii_digit) {
            *i += 1;
        }
        *i - start
    };

    let mut mantissa = digits(&mut i);
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        mantissa += digits(&mut i);
    }
    if mantissa == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

/// Modular conversion to a 32-bit signed integer, as the bitwise operators
/// require.
fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let modulo = n.trunc().rem_euclid(4_294_967_296.0);
    (modulo as u32) as i32
}

fn to_display(sink: &mut String, value: LiteralValue<'_>) {
    match value {
        LiteralValue::Null => sink.push_str("null"),
        LiteralValue::Undefined => sink.push_str("undefined"),
        LiteralValue::Bool(b) => sink.push_str(if b { "true" } else { "false" }),
        LiteralValue::Number(n) => render::number(sink, n),
        LiteralValue::String(s) => sink.push_str(s),
    }
}

/// `==` when it can be decided without coercing between types; `None`
/// otherwise.
fn loose_equals(lhs: LiteralValue<'_>, rhs: LiteralValue<'_>) -> Option<bool> {
    use LiteralValue::{Null, Undefined};

    match (lhs, rhs) {
        (Null | Undefined, Null | Undefined) => Some(true),
        (Null | Undefined, _) | (_, Null | Undefined) => Some(false),
        _ if std::mem::discriminant(&lhs) == std::mem::discriminant(&rhs) => {
            Some(lhs.strict_equals(&rhs))
        }
        _ => None,
    }
}

/// Relational comparison between two numbers or two strings. Strings
/// order by UTF-16 code unit. The inner `None` is the unordered result of
/// comparing with NaN.
fn compare(lhs: LiteralValue<'_>, rhs: LiteralValue<'_>) -> Option<Option<Ordering>> {
    match (lhs, rhs) {
        (LiteralValue::Number(a), LiteralValue::Number(b)) => Some(a.partial_cmp(&b)),
        (LiteralValue::String(a), LiteralValue::String(b)) => {
            Some(Some(a.encode_utf16().cmp(b.encode_utf16())))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IrBuilder;
    use bumpalo::Bump;
    use corvid_core::Source;

    fn fold<'ir>(arena: IrArena<'ir>, root: Node<'ir>) -> (Node<'ir>, usize) {
        ConstantFolder::new(arena).run(root).unwrap()
    }

    #[test]
    fn arithmetic() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        // (1 + 2) * 4
        let sum = Node::Binary(b.binary(
            BinaryOp::Add,
            Node::Literal(b.number(1.0)),
            Node::Literal(b.number(2.0)),
        ));
        let product = Node::Binary(b.binary(BinaryOp::Mul, sum, Node::Literal(b.number(4.0))));

        let (root, folded) = fold(arena, product);
        assert_eq!(folded, 2);
        assert_eq!(root.to_string(), "12");
        assert_eq!(root.meta(), product.meta());
    }

    #[test]
    fn string_concatenation() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let root = Node::Binary(b.binary(
            BinaryOp::Add,
            Node::Literal(b.string("n=")),
            Node::Literal(b.number(3.0)),
        ));
        assert_eq!(fold(arena, root).0.to_string(), "\"n=3\"");
    }

    #[test]
    fn unary_operators() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let cases = [
            (UnaryOp::Neg, Node::Literal(b.number(5.0)), "-5"),
            (UnaryOp::Not, Node::Literal(b.string("")), "true"),
            (UnaryOp::BitNot, Node::Literal(b.number(0.0)), "-1"),
            (UnaryOp::Typeof, Node::Literal(b.null()), "\"object\""),
            (UnaryOp::Void, Node::Literal(b.number(0.0)), "undefined"),
            (UnaryOp::Plus, Node::Literal(b.boolean(true)), "1"),
        ];
        for (op, operand, expected) in cases {
            let root = Node::Unary(b.unary(op, operand));
            assert_eq!(fold(arena, root).0.to_string(), expected, "{op}");
        }
    }

    #[test]
    fn comparisons() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let lt = Node::Binary(b.binary(
            BinaryOp::Lt,
            Node::Literal(b.number(1.0)),
            Node::Literal(b.number(2.0)),
        ));
        assert_eq!(fold(arena, lt).0.to_string(), "true");

        let nan = Node::Binary(b.binary(
            BinaryOp::Ge,
            Node::Literal(b.number(f64::NAN)),
            Node::Literal(b.number(2.0)),
        ));
        assert_eq!(fold(arena, nan).0.to_string(), "false");

        let null_eq = Node::Binary(b.binary(
            BinaryOp::Eq,
            Node::Literal(b.null()),
            Node::Literal(b.undefined()),
        ));
        assert_eq!(fold(arena, null_eq).0.to_string(), "true");
    }

    #[test]
    fn leaves_dynamic_operators() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let mixed = Node::Binary(b.binary(
            BinaryOp::Eq,
            Node::Literal(b.number(1.0)),
            Node::Literal(b.string("1")),
        ));
        let (root, folded) = fold(arena, mixed);
        assert!(root.same(mixed));
        assert_eq!(folded, 0);

        let free = Node::Binary(b.binary(
            BinaryOp::Add,
            Node::Ident(b.ident("x")),
            Node::Literal(b.number(1.0)),
        ));
        assert!(fold(arena, free).0.same(free));
    }

    #[test]
    fn folds_inside_catch_guard() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let guard = Node::Binary(b.binary(
            BinaryOp::EqStrict,
            Node::Literal(b.number(1.0)),
            Node::Literal(b.number(1.0)),
        ));
        let body = b.block(&[]);
        let clause = b.catch(b.ident("e"), Some(guard), body);

        let (root, _) = fold(arena, Node::Catch(clause));
        let rewritten = root.as_catch().unwrap();
        assert!(!std::ptr::eq(rewritten, clause));
        assert!(std::ptr::eq(rewritten.exception(), clause.exception()));
        assert!(std::ptr::eq(rewritten.body(), body));
        assert_eq!(root.to_string(), " catch (e if true)");
    }

    #[test]
    fn string_to_number_grammar() {
        let num = |s| to_number(LiteralValue::String(s)).unwrap();

        assert_eq!(num(""), 0.0);
        assert_eq!(num(" \t\n "), 0.0);
        assert_eq!(num(" 12.5 "), 12.5);
        assert_eq!(num("-3"), -3.0);
        assert_eq!(num("+.5"), 0.5);
        assert_eq!(num("5."), 5.0);
        assert_eq!(num("1e3"), 1000.0);
        assert_eq!(num("2E-2"), 0.02);
        assert_eq!(num("0x10"), 16.0);
        assert_eq!(num("0XfF"), 255.0);
        assert_eq!(num("0o17"), 15.0);
        assert_eq!(num("0b101"), 5.0);
        assert_eq!(num("Infinity"), f64::INFINITY);
        assert_eq!(num("-Infinity"), f64::NEG_INFINITY);

        let malformed = [
            "inf", "nan", "NaN", "infinity", "-0x10", "0x", "0b2", "1_000", ".", "e5", "1e",
        ];
        for text in malformed {
            assert!(num(text).is_nan(), "{text:?}");
        }
    }

    #[test]
    fn large_prefixed_integers_are_not_folded() {
        assert_eq!(
            to_number(LiteralValue::String("0x1fffffffffffff")),
            Some(9_007_199_254_740_991.0)
        );
        assert_eq!(to_number(LiteralValue::String("0x20000000000001")), None);

        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let large = Node::Literal(b.string("0x20000000000001"));
        let root = Node::Unary(b.unary(UnaryOp::Plus, large));
        let (folded, count) = fold(arena, root);
        assert!(folded.same(root));
        assert_eq!(count, 0);
    }

    #[test]
    fn numeric_strings_fold_by_language_rules() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let cases = [
            ("inf", "NaN"),
            ("0x10", "16"),
            ("  -1e2 ", "-100"),
            ("Infinity", "Infinity"),
        ];
        for (text, expected) in cases {
            let root = Node::Unary(b.unary(UnaryOp::Plus, Node::Literal(b.string(text))));
            assert_eq!(fold(arena, root).0.to_string(), expected, "{text:?}");
        }

        let difference = Node::Binary(b.binary(
            BinaryOp::Sub,
            Node::Literal(b.string("0b11")),
            Node::Literal(b.number(1.0)),
        ));
        assert_eq!(fold(arena, difference).0.to_string(), "2");
    }

    #[test]
    fn concatenation_uses_exponent_form() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let cases = [
            (1e21, "\"1e+21\""),
            (1e-7, "\"1e-7\""),
            (0.000001, "\"0.000001\""),
            (1e20, "\"100000000000000000000\""),
        ];
        for (n, expected) in cases {
            let root = Node::Binary(b.binary(
                BinaryOp::Add,
                Node::Literal(b.string("")),
                Node::Literal(b.number(n)),
            ));
            assert_eq!(fold(arena, root).0.to_string(), expected);
        }
    }

    #[test]
    fn strings_compare_by_utf16_code_units() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        // U+FF61 is one code unit above the surrogates U+10000 encodes to,
        // though its UTF-8 bytes sort first.
        let halfwidth = Node::Literal(b.string("\u{FF61}"));
        let supplementary = Node::Literal(b.string("\u{10000}"));

        let lt = Node::Binary(b.binary(BinaryOp::Lt, halfwidth, supplementary));
        assert_eq!(fold(arena, lt).0.to_string(), "false");

        let gt = Node::Binary(b.binary(BinaryOp::Gt, halfwidth, supplementary));
        assert_eq!(fold(arena, gt).0.to_string(), "true");

        let ascii = Node::Binary(b.binary(
            BinaryOp::Le,
            Node::Literal(b.string("abc")),
            Node::Literal(b.string("abd")),
        ));
        assert_eq!(fold(arena, ascii).0.to_string(), "true");
    }

    #[test]
    fn int32_wraps() {
        assert_eq!(to_int32(4_294_967_296.0), 0);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(-1.5), -1);
        assert_eq!(to_int32(f64::INFINITY), 0);
    }
}
