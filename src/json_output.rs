//! JSON output format for attribution reports

use crate::attribution_set::AttributionDocument;
use serde::{Deserialize, Serialize};

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// One document per analyzed node, in visit order
    pub nodes: Vec<AttributionDocument>,
}

impl JsonReport {
    /// Create a new JSON report structure
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "atribuir-json-v1".to_string(),
            nodes: Vec::new(),
        }
    }

    /// Add a node's document to the report
    pub fn add_document(&mut self, document: AttributionDocument) {
        self.nodes.push(document);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonReport {
    fn default() -> Self {
        Self::new()
    }
}
