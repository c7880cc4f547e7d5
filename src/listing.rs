use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// One decoded instruction line: `0x<addr>:<ws><hex bytes><ws><mnemonic>[<ws><operands>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u32,
    pub raw_bytes: String,
    pub mnemonic: String,
    /// Operand text with surrounding whitespace trimmed, possibly empty.
    pub operands: String,
    /// The source line, verbatim.
    pub original: String,
    /// 1-based line number in the input.
    pub line: usize,
    operand_offset: usize,
}

impl Instruction {
    /// Parses one line. `Ok(None)` means the line does not have the shape of
    /// an instruction; a line that has the shape but carries an address that
    /// is not a valid 32-bit hex literal is an error.
    pub fn parse(line: usize, text: &str) -> Result<Option<Self>> {
        let Some((head, rest)) = text.split_once(':') else { return Ok(None) };
        let Some(digits) = head.strip_prefix("0x").or_else(|| head.strip_prefix("0X")) else {
            return Ok(None);
        };
        if digits.is_empty() || digits.chars().any(char::is_whitespace) {
            return Ok(None);
        }

        let rest_at = head.len() + 1;
        let bytes_at = rest_at + leading_ws(rest);
        let bytes_len = token_len(&text[bytes_at..]);
        let raw_bytes = &text[bytes_at..bytes_at + bytes_len];
        if raw_bytes.is_empty() || !raw_bytes.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(None);
        }

        let after_bytes = &text[bytes_at + bytes_len..];
        let gap = leading_ws(after_bytes);
        if gap == 0 {
            return Ok(None);
        }
        let mn_at = bytes_at + bytes_len + gap;
        let mn_len = token_len(&text[mn_at..]);
        if mn_len == 0 {
            return Ok(None);
        }
        let mnemonic = &text[mn_at..mn_at + mn_len];

        let tail = &text[mn_at + mn_len..];
        let operand_offset = mn_at + mn_len + leading_ws(tail);
        let operands = tail.trim();

        let address = digits
            .bytes()
            .all(|b| b.is_ascii_hexdigit())
            .then(|| u32::from_str_radix(digits, 16).ok())
            .flatten()
            .ok_or_else(|| Error::Format {
                line,
                token: head.to_string(),
                expected: "a 32-bit hexadecimal address",
            })?;

        Ok(Some(Self {
            address,
            raw_bytes: raw_bytes.to_string(),
            mnemonic: mnemonic.to_string(),
            operands: operands.to_string(),
            original: text.to_string(),
            line,
            operand_offset,
        }))
    }

    /// Byte offset of `operands` inside `original`.
    pub fn operand_offset(&self) -> usize {
        self.operand_offset
    }
}

fn leading_ws(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

fn token_len(s: &str) -> usize {
    s.find(char::is_whitespace).unwrap_or(s.len())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDocument {
    /// Lines before the first instruction.
    pub header: Vec<String>,
    pub instructions: Vec<Instruction>,
    /// Every non-instruction line seen after the first instruction.
    pub trailer: Vec<String>,
}

impl ListingDocument {
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(text.lines())
    }

    pub fn from_lines<'a, I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut doc = Self::default();
        for (idx, line) in lines.into_iter().enumerate() {
            match Instruction::parse(idx + 1, line)? {
                Some(inst) => doc.instructions.push(inst),
                None if doc.instructions.is_empty() => doc.header.push(line.to_string()),
                None => doc.trailer.push(line.to_string()),
            }
        }
        tracing::debug!(
            header = doc.header.len(),
            instructions = doc.instructions.len(),
            trailer = doc.trailer.len(),
            "parsed listing"
        );
        Ok(doc)
    }

    /// `; key=value` comment lines from header and trailer, as written by the
    /// disassembler (`; base=0x00000000`, `; instructions=42`, ...).
    pub fn metadata(&self) -> BTreeMap<String, String> {
        self.header
            .iter()
            .chain(&self.trailer)
            .filter_map(|line| {
                let body = line.trim().strip_prefix(';')?;
                let (key, value) = body.split_once('=')?;
                let key = key.trim();
                if key.is_empty() || key.contains(char::is_whitespace) {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect()
    }
}
