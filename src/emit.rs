use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Write as _;

use crate::config::PrettyConfig;
use crate::flow::Isa;
use crate::labels::LabelTable;
use crate::listing::{Instruction, ListingDocument};
use crate::resolve::{last_operand, resolve};

pub const BANNER: &str = "; ===== Pretty View =====";

/// The instruction's source line with its final operand replaced by a label
/// when the operand resolves to a labeled address. Everything else,
/// separators and spacing included, is left untouched.
pub fn rewrite_line<'a, I: Isa + ?Sized>(
    isa: &I,
    inst: &'a Instruction,
    labels: &LabelTable,
) -> Cow<'a, str> {
    let label = resolve(isa, inst)
        .and_then(|t| u32::try_from(t.address).ok())
        .and_then(|addr| labels.get(addr));
    let (Some(label), Some(span)) = (label, last_operand(&inst.operands)) else {
        return Cow::Borrowed(inst.original.as_str());
    };

    let start = inst.operand_offset() + span.start;
    let end = inst.operand_offset() + span.end;
    let mut line = String::with_capacity(inst.original.len() + label.len());
    line.push_str(&inst.original[..start]);
    line.push_str(label);
    line.push_str(&inst.original[end..]);
    Cow::Owned(line)
}

/// Renders the whole listing into one buffer: header, label summary,
/// instructions with label declarations, trailer.
pub fn emit<I: Isa + ?Sized>(
    isa: &I,
    doc: &ListingDocument,
    labels: &LabelTable,
    cfg: &PrettyConfig,
) -> String {
    let mut out = String::new();
    for line in &doc.header {
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "; labels={}", labels.len());
    let _ = writeln!(out);

    let mut declared: HashSet<u32> = HashSet::new();
    for inst in &doc.instructions {
        if let Some(name) = labels.get(inst.address) {
            if declared.insert(inst.address) {
                if cfg.label_spacing {
                    let _ = writeln!(out);
                }
                let _ = writeln!(out, "{name}:");
            }
        }
        let _ = writeln!(out, "{}", rewrite_line(isa, inst, labels));
    }

    for line in &doc.trailer {
        let _ = writeln!(out, "{line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::rv32::Rv32;

    fn inst(line: &str) -> Instruction {
        Instruction::parse(1, line).unwrap().unwrap()
    }

    #[test]
    fn splices_only_the_last_token() {
        let target = inst("0x0: 13000000 nop");
        let branch = inst("0x10:\t63940500\tbne\ta0,  a1 ,   -16   ");
        let labels = LabelTable::build(&Rv32, &[target, branch.clone()], "loc_");
        assert_eq!(
            rewrite_line(&Rv32, &branch, &labels),
            "0x10:\t63940500\tbne\ta0,  a1 ,   loc_00000000   "
        );
    }

    #[test]
    fn unlabeled_lines_are_borrowed() {
        let i = inst("0x0: 67800000 jalr ra");
        let out = rewrite_line(&Rv32, &i, &LabelTable::default());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn duplicate_address_declares_once() {
        let doc = ListingDocument::parse("0x0: 6f000000 j 0x0\n0x0: 13000000 nop\n").unwrap();
        let labels = LabelTable::build(&Rv32, &doc.instructions, "loc_");
        let out = emit(&Rv32, &doc, &labels, &PrettyConfig::default());
        assert_eq!(out.matches("loc_00000000:").count(), 1);
    }
}
