use crate::flow::{FlowKind, Isa};

use FlowKind::*;

/// RV32I/RV32C control-flow mnemonics as printed by common disassemblers,
/// including the compressed `c.*` forms and the assembler pseudo-ops.
const CONTROL_FLOW: &[(&str, FlowKind)] = &[
    ("j", Jump),
    ("jr", Jump),
    ("tail", Jump),
    ("c.j", Jump),
    ("c.jr", Jump),
    ("jal", Call),
    ("jalr", Call),
    ("call", Call),
    ("c.jal", Call),
    ("c.jalr", Call),
    ("ret", Return),
    ("beq", Branch),
    ("bne", Branch),
    ("blt", Branch),
    ("bge", Branch),
    ("bltu", Branch),
    ("bgeu", Branch),
    ("bgt", Branch),
    ("ble", Branch),
    ("bgtu", Branch),
    ("bleu", Branch),
    ("beqz", Branch),
    ("bnez", Branch),
    ("blez", Branch),
    ("bgez", Branch),
    ("bltz", Branch),
    ("bgtz", Branch),
    ("c.beqz", Branch),
    ("c.bnez", Branch),
];

/// RISC-V 32-bit with the compressed extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rv32;

impl Rv32 {
    pub fn new() -> Self {
        Self
    }
}

impl Isa for Rv32 {
    fn flow_kind(&self, mnemonic: &str) -> Option<FlowKind> {
        CONTROL_FLOW
            .iter()
            .find(|(m, _)| *m == mnemonic)
            .map(|&(_, kind)| kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicates() {
        let mut names: Vec<&str> = CONTROL_FLOW.iter().map(|(m, _)| *m).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn classifies_jumps_branches_and_compressed_forms() {
        let isa = Rv32::new();
        assert_eq!(isa.flow_kind("j"), Some(Jump));
        assert_eq!(isa.flow_kind("jal"), Some(Call));
        assert_eq!(isa.flow_kind("bgeu"), Some(Branch));
        assert_eq!(isa.flow_kind("c.bnez"), Some(Branch));
        assert_eq!(isa.flow_kind("ret"), Some(Return));
        assert_eq!(isa.flow_kind("addi"), None);
        assert_eq!(isa.flow_kind("lw"), None);
        // exact spelling only
        assert_eq!(isa.flow_kind("J"), None);
        assert_eq!(isa.flow_kind("c.addi"), None);
    }
}
