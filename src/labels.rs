use std::collections::{BTreeMap, HashSet};

use crate::flow::Isa;
use crate::listing::Instruction;
use crate::resolve::resolve;

/// Canonical label for an address: prefix plus eight lowercase hex digits.
pub fn label_name(prefix: &str, address: u32) -> String {
    format!("{prefix}{address:08x}")
}

/// Instruction-aligned branch destinations and their names, in address order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    names: BTreeMap<u32, String>,
}

impl LabelTable {
    /// Collects every resolved target that lies in `0..=max address` and
    /// lands exactly on some instruction's address.
    pub fn build<I: Isa + ?Sized>(isa: &I, instructions: &[Instruction], prefix: &str) -> Self {
        let addresses: HashSet<u32> = instructions.iter().map(|i| i.address).collect();
        let Some(max) = addresses.iter().copied().max() else { return Self::default() };

        let mut names = BTreeMap::new();
        for inst in instructions {
            let Some(target) = resolve(isa, inst) else { continue };
            let aligned = u32::try_from(target.address)
                .ok()
                .filter(|&a| a <= max && addresses.contains(&a));
            match aligned {
                Some(addr) => {
                    names
                        .entry(addr)
                        .or_insert_with(|| label_name(prefix, addr));
                }
                None => tracing::debug!(
                    line = inst.line,
                    target = target.address,
                    "target is out of range or not instruction-aligned"
                ),
            }
        }
        Self { names }
    }

    pub fn get(&self, address: u32) -> Option<&str> {
        self.names.get(&address).map(String::as_str)
    }

    pub fn contains(&self, address: u32) -> bool {
        self.names.contains_key(&address)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.names.iter().map(|(&a, n)| (a, n.as_str()))
    }
}
