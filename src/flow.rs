use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    /// Unconditional jump
    Jump,
    /// Conditional branch
    Branch,
    Call,
    /// Return-style branch through a register
    Return,
}

/// Classifies mnemonics of one instruction set. Anything that is not a
/// control-flow transfer maps to `None`.
pub trait Isa {
    fn flow_kind(&self, mnemonic: &str) -> Option<FlowKind>;

    fn is_control_flow(&self, mnemonic: &str) -> bool {
        self.flow_kind(mnemonic).is_some()
    }
}
