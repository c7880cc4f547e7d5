pub mod config;
pub mod emit;
pub mod error;
pub mod flow;
pub mod io;
pub mod labels;
pub mod listing;
pub mod resolve;

pub mod isa {
    pub mod rv32; // RV32I + compressed
}

pub use config::PrettyConfig;
pub use error::{Error, Result};
pub use flow::{FlowKind, Isa};
pub use labels::LabelTable;
pub use listing::{Instruction, ListingDocument};

/// Result of one in-memory run.
#[derive(Debug, Clone)]
pub struct Pretty {
    pub document: ListingDocument,
    pub labels: LabelTable,
    pub text: String,
}

/// Parse, discover labels over the complete instruction list, then render.
pub fn prettify<I: Isa + ?Sized>(text: &str, cfg: &PrettyConfig, isa: &I) -> Result<Pretty> {
    cfg.validate()?;
    let document = ListingDocument::parse(text)?;

    if let Some(declared) = document.metadata().get("instructions") {
        if declared.parse::<usize>().ok() != Some(document.instructions.len()) {
            tracing::warn!(
                declared = %declared,
                parsed = document.instructions.len(),
                "instruction count differs from listing metadata"
            );
        }
    }

    let labels = LabelTable::build(isa, &document.instructions, &cfg.label_prefix);
    let text = emit::emit(isa, &document, &labels, cfg);
    tracing::info!(
        instructions = document.instructions.len(),
        labels = labels.len(),
        "listing rewritten"
    );
    Ok(Pretty { document, labels, text })
}
