//! Data models for the repo-to-MVP pipeline.
//!
//! Field names on the wire follow the dashboard's JSON contract exactly,
//! so every struct carries explicit serde renames where Rust naming and
//! the contract diverge.

use serde::{Deserialize, Serialize};

/// A single file captured during repository collection.
///
/// Immutable once collected; downstream stages only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scanned root
    pub name: String,
    /// Raw UTF-8 contents, untruncated
    pub content: String,
    /// Extension tag (".ts", ".md", ...) used as a lightweight type marker
    #[serde(rename = "type")]
    pub kind: String,
}

/// One technology entry in the synthesized stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,
    /// One-line description of the technology's role in this product
    pub role: String,
}

/// The structured MVP synthesis returned by the model.
///
/// Every field is required; a response missing any of them fails
/// deserialization and the invocation as a whole. Valuations are
/// model-generated estimates passed through verbatim, never recomputed
/// locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpReport {
    pub project_name: String,
    pub tagline: String,
    pub overview: String,
    pub tech_stack: Vec<TechItem>,
    pub features: Vec<String>,
    pub roadmap: Vec<String>,
    pub suggested_mvp_version: String,
    #[serde(rename = "valuationUSD")]
    pub valuation_usd: f64,
    #[serde(rename = "valuationMYR")]
    pub valuation_myr: f64,
}
