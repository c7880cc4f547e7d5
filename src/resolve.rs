use std::ops::Range;

use crate::flow::{FlowKind, Isa};
use crate::listing::Instruction;

/// How the destination was written in the operand text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `0x` hex literal taken as-is
    Absolute,
    /// signed offset added to the instruction's own address
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub kind: FlowKind,
    pub mode: Addressing,
    /// May fall outside the 32-bit address space; callers range-check.
    pub address: i64,
}

/// Byte range of the final comma-separated operand inside `operands`,
/// whitespace excluded. `None` for empty operand text.
pub fn last_operand(operands: &str) -> Option<Range<usize>> {
    if operands.is_empty() {
        return None;
    }
    let part_at = operands.rfind(',').map_or(0, |i| i + 1);
    let part = &operands[part_at..];
    let start = part_at + (part.len() - part.trim_start().len());
    Some(start..start + part.trim().len())
}

/// Classifies a literal operand token. Absolute wins over relative, so
/// `0x10` is an address while `-0x10` and `16` are offsets.
pub fn classify_literal(token: &str) -> Option<(Addressing, i64)> {
    if let Some(hex) = token.strip_prefix("0x") {
        return parse_hex(hex).map(|v| (Addressing::Absolute, v));
    }
    let (negative, magnitude) = match token.strip_prefix('-') {
        Some(m) => (true, m),
        None => (false, token),
    };
    let value = match magnitude.strip_prefix("0x") {
        Some(hex) => parse_hex(hex)?,
        None if !magnitude.is_empty() && magnitude.bytes().all(|b| b.is_ascii_digit()) => {
            magnitude.parse::<i64>().ok()?
        }
        None => return None,
    };
    Some((Addressing::Relative, if negative { -value } else { value }))
}

fn parse_hex(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    i64::from_str_radix(digits, 16).ok()
}

/// Destination of a control-flow instruction, or `None` when the mnemonic is
/// not a transfer or the last operand is not a literal (register, symbol).
pub fn resolve<I: Isa + ?Sized>(isa: &I, inst: &Instruction) -> Option<Target> {
    let kind = isa.flow_kind(&inst.mnemonic)?;
    let span = last_operand(&inst.operands)?;
    let (mode, value) = classify_literal(&inst.operands[span])?;
    let address = match mode {
        Addressing::Absolute => value,
        Addressing::Relative => i64::from(inst.address).checked_add(value)?,
    };
    Some(Target { kind, mode, address })
}
