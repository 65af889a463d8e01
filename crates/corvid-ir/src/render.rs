//! Shared helpers for rendering nodes as text.
//!
//! Rendering is for diagnostics and debug dumps. The output is canonical
//! and deterministic but is not meant to be parsed back.

use crate::node::Node;
use crate::ops::UnaryOp;

/// Render a whole tree into a fresh string.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn dump(node: Node<'_>) -> String {
    let mut sink = String::new();
    node.render(&mut sink);
    sink
}

/// Binding strength of a rendered node. Non-operators never need parens.
fn precedence(node: Node<'_>) -> u8 {
    match node {
        Node::Binary(n) => n.op().precedence(),
        Node::Unary(_) => UnaryOp::precedence(),
        _ => u8::MAX,
    }
}

/// Render an operand of a binary operator with precedence `parent`.
///
/// Operators are left-associative, so a right operand of equal precedence
/// is parenthesized too.
pub(crate) fn operand(sink: &mut String, node: Node<'_>, parent: u8, is_rhs: bool) {
    let prec = precedence(node);
    let wrap = prec < parent || (is_rhs && prec == parent);
    parenthesized(sink, node, wrap);
}

/// Render the operand of a prefix operator.
pub(crate) fn unary_operand(sink: &mut String, op: UnaryOp, node: Node<'_>) {
    // `- -x` must not render as `--x`.
    let sign = |op: UnaryOp| matches!(op, UnaryOp::Neg | UnaryOp::Plus);
    let wrap = precedence(node) < UnaryOp::precedence()
        || matches!(node, Node::Unary(inner) if sign(op) && sign(inner.op()));
    parenthesized(sink, node, wrap);
}

fn parenthesized(sink: &mut String, node: Node<'_>, wrap: bool) {
    if wrap {
        sink.push('(');
    }
    node.render(sink);
    if wrap {
        sink.push(')');
    }
}

/// Render a number the way the scripting language converts it to a string.
///
/// Uses the shortest digit string that reads back as the same value, and
/// switches to exponent form at or above `1e21` and below `1e-6`.
pub(crate) fn number(sink: &mut String, n: f64) {
    if n.is_nan() {
        sink.push_str("NaN");
        return;
    }
    if n == 0.0 {
        sink.push('0');
        return;
    }
    if n < 0.0 {
        sink.push('-');
    }
    if n.is_infinite() {
        sink.push_str("Infinity");
        return;
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddde[-]x`.
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|&c| c != '.').collect();
    let count = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    if count <= point && point <= 21 {
        sink.push_str(&digits);
        sink.extend(std::iter::repeat_n('0', (point - count) as usize));
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        sink.push_str(whole);
        sink.push('.');
        sink.push_str(fraction);
    } else if -6 < point && point <= 0 {
        sink.push_str("0.");
        sink.extend(std::iter::repeat_n('0', point.unsigned_abs() as usize));
        sink.push_str(&digits);
    } else {
        let (lead, rest) = digits.split_at(1);
        sink.push_str(lead);
        if !rest.is_empty() {
            sink.push('.');
            sink.push_str(rest);
        }
        let exponent = point - 1;
        sink.push('e');
        if exponent >= 0 {
            sink.push('+');
        }
        sink.push_str(&exponent.to_string());
    }
}

/// Render a string literal in double quotes.
pub(crate) fn quoted(sink: &mut String, s: &str) {
    sink.push('"');
    for c in s.chars() {
        match c {
            '"' => sink.push_str("\\\""),
            '\\' => sink.push_str("\\\\"),
            '\n' => sink.push_str("\\n"),
            '\t' => sink.push_str("\\t"),
            c => sink.push(c),
        }
    }
    sink.push('"');
}
