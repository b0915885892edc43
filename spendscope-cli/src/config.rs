use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use spendscope_core::SourceRegistry;

/// Load the source registry from a TOML file, or fall back to the built-in
/// defaults when no path is given. Patterns are compiled here so a bad
/// config fails before any file is touched.
pub fn load_registry(path: Option<&Path>) -> Result<SourceRegistry> {
    let registry = match path {
        Some(p) => {
            let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
            toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?
        }
        None => SourceRegistry::default(),
    };
    registry
        .validate()
        .context("invalid filename_pattern in sources config")?;
    Ok(registry)
}
