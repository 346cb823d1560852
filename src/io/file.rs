use anyhow::{Context, Result};
use std::path::Path;

use crate::model::Portfolio;

/// Save a portfolio to a JSON dataset file.
pub fn save_portfolio(portfolio: &Portfolio, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(portfolio)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Load a portfolio from a JSON dataset file.
pub fn load_portfolio(path: &Path) -> Result<Portfolio> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}
