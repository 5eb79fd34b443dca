//! Category and contributor definition file loading
//!
//! Categories are a flat list of whitespace-separated label tokens
//! (multi-word categories use underscores). Contributors are a TOML table
//! mapping author display names to contributor group names:
//!
//! ```toml
//! "Jimbo Weasle" = "Pooh Bear"
//! "Ada Lovelace" = "Compilers"
//! ```

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Parse category labels from whitespace-separated tokens, preserving first
/// occurrence order and dropping duplicates
pub fn parse_categories(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}

pub fn load_categories(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read categories file '{}'", path.display()))?;
    Ok(parse_categories(&text))
}

/// Parse an author → contributor-group table from TOML
pub fn parse_contributors(text: &str) -> Result<HashMap<String, String>> {
    toml::from_str(text).context("contributors file is not a flat author = \"group\" table")
}

pub fn load_contributors(path: &Path) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read contributors file '{}'", path.display()))?;
    parse_contributors(&text)
}
