use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyConfig {
    pub label_prefix: String,
    /// Blank line before every label declaration.
    pub label_spacing: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            label_prefix: "loc_".into(),
            label_spacing: true,
        }
    }
}

impl PrettyConfig {
    /// A prefix must survive a round trip through the listing grammar: no
    /// whitespace, none of the characters that delimit operands, addresses
    /// or comments, and no leading digit or sign, which would make
    /// `<prefix><hex>` read as a numeric operand again.
    pub fn validate(&self) -> Result<()> {
        let p = &self.label_prefix;
        let numeric_start = p.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+'));
        if p.is_empty()
            || numeric_start
            || p.chars().any(|c| c.is_whitespace() || matches!(c, ',' | ':' | ';'))
        {
            return Err(Error::InvalidLabelPrefix(p.clone()));
        }
        Ok(())
    }
}
