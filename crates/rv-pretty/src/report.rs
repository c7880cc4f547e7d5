use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rvlisting::resolve::resolve;
use rvlisting::{FlowKind, Isa, LabelTable, Pretty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelKV {
    pub addr: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub instructions: usize,
    pub header_lines: usize,
    pub trailer_lines: usize,
    /// Control-flow operands with a literal target, by kind.
    pub targets: BTreeMap<FlowKind, usize>,
    /// Operands replaced by a label.
    pub rewritten: usize,
    pub labels: Vec<LabelKV>,
}

pub fn label_list(labels: &LabelTable) -> Vec<LabelKV> {
    labels
        .iter()
        .map(|(addr, name)| LabelKV { addr, name: name.to_string() })
        .collect()
}

impl Report {
    pub fn new<I: Isa + ?Sized>(isa: &I, pretty: &Pretty) -> Self {
        let doc = &pretty.document;
        let mut targets = BTreeMap::new();
        let mut rewritten = 0;
        for inst in &doc.instructions {
            let Some(t) = resolve(isa, inst) else { continue };
            *targets.entry(t.kind).or_insert(0) += 1;
            if u32::try_from(t.address).is_ok_and(|a| pretty.labels.contains(a)) {
                rewritten += 1;
            }
        }
        Self {
            instructions: doc.instructions.len(),
            header_lines: doc.header.len(),
            trailer_lines: doc.trailer.len(),
            targets,
            rewritten,
            labels: label_list(&pretty.labels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rvlisting::isa::rv32::Rv32;
    use rvlisting::{prettify, PrettyConfig};

    #[test]
    fn counts_targets_and_rewrites() {
        let text = "; base=0x0\n\
                    0x0: 6f008000 j 0x8\n\
                    0x4: ef00c0ff jal -4\n\
                    0x8: 63000500 beqz a0, 0x40\n\
                    0xc: 67800000 ret\n";
        let pretty = prettify(text, &PrettyConfig::default(), &Rv32).unwrap();
        let r = Report::new(&Rv32, &pretty);
        assert_eq!(r.instructions, 4);
        assert_eq!(r.header_lines, 1);
        assert_eq!(r.targets.get(&FlowKind::Jump), Some(&1));
        assert_eq!(r.targets.get(&FlowKind::Call), Some(&1));
        assert_eq!(r.targets.get(&FlowKind::Branch), Some(&1));
        assert_eq!(r.targets.get(&FlowKind::Return), None);
        assert_eq!(r.rewritten, 2);
        assert_eq!(
            r.labels,
            vec![
                LabelKV { addr: 0, name: "loc_00000000".into() },
                LabelKV { addr: 8, name: "loc_00000008".into() },
            ]
        );
    }
}
