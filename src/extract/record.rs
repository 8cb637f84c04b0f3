use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured result of mining one report page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportRecord {
    pub report_title: Option<String>,
    pub scope: ScopeRecord,
    pub issues: Vec<IssueRecord>,
}

/// What the report declares it reviewed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScopeRecord {
    /// Canonical code-423n4 mirror of the audited code, if the scope
    /// section links one.
    pub repository: Option<String>,

    /// Declared contract count; 0 when the prose never states one.
    #[serde(default)]
    pub contracts: u32,

    /// Declared lines of Solidity under review; 0 when undetected.
    #[serde(default)]
    pub lines_solidity: u32,
}

/// One disclosed finding.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IssueRecord {
    /// `H-03`-style id from the report, or a synthesized `L-NN`.
    /// Unique only best-effort: legacy layouts can collide across sections.
    pub issue_id: String,

    pub title: String,

    pub severity: Severity,

    #[serde(default)]
    pub description: String,

    /// Deduplicated; membership matters, order does not.
    #[serde(default, rename = "vulnerable_code_links")]
    pub code_links: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Severity {
    High,
    Medium,
    Low,
    #[serde(rename = "Non-Critical")]
    NonCritical,
    Gas,
    Info,
}

impl Severity {
    /// Maps the one-letter code from a `[X-nn]` heading tag.
    pub fn from_code(code: &str) -> Self {
        match code {
            "H" => Severity::High,
            "M" => Severity::Medium,
            "L" => Severity::Low,
            "N" => Severity::NonCritical,
            "G" => Severity::Gas,
            _ => Severity::Info,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
            Severity::NonCritical => write!(f, "Non-Critical"),
            Severity::Gas => write!(f, "Gas"),
            Severity::Info => write!(f, "Info"),
        }
    }
}
