//! Report models for the audit pipeline
//!
//! These types are the only structural contract the surrounding transport
//! layer has to serialize, so every field keeps the wire casing of the
//! public API (`totalIssues`, `queryIndex`, `type`, ...).

use serde::{Deserialize, Serialize};

/// Severity level of a detected issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational suggestion for optimization
    Info,
    /// Warning that may impact performance
    Warn,
    /// Critical issue that should be addressed immediately
    Error,
}

impl Severity {
    /// Returns true if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns true if this is at least a warning
    pub fn is_warning_or_above(&self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }

    /// Returns the severity level as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A single detected issue in a SQL query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Issue code (`R001`..`R010`, or `PARSE_ERROR`)
    pub code: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable issue message
    pub message: String,
    /// Relevant SQL snippet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Line number in the query, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Name of the rule that detected this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Index of the query in the input list
    pub query_index: usize,
}

/// Optimized SQL rewrite proposed by the external rewrite collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewrite {
    /// Original SQL query
    pub original: String,
    /// Optimized SQL query
    pub optimized: String,
    /// Explanation of the changes
    pub rationale: String,
    /// Index of the query in the input list
    pub query_index: usize,
}

/// Index recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSuggestion {
    /// Table name
    pub table: String,
    /// Column names for the index, leftmost first
    pub columns: Vec<String>,
    /// Index type (btree, gin, ...)
    #[serde(rename = "type")]
    pub index_type: String,
    /// Why this index helps
    pub rationale: String,
    /// Expected performance improvement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_improvement: Option<String>,
}

impl IndexSuggestion {
    /// Creates a btree suggestion, the default index type
    pub fn btree(
        table: impl Into<String>,
        columns: Vec<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            columns,
            index_type: "btree".to_string(),
            rationale: rationale.into(),
            expected_improvement: None,
        }
    }

    /// Sets the expected improvement text
    pub fn with_improvement(mut self, improvement: impl Into<String>) -> Self {
        self.expected_improvement = Some(improvement.into());
        self
    }
}

/// Heuristic cost estimate for a single query
///
/// The score is a relative proxy, never a measured speedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// 0-100, higher = more expensive
    pub score: u8,
    /// Templated summary naming the worst contributing issues
    pub improvement_estimate: String,
}

/// Audit summary statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_issues: usize,
    pub high_severity: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_improvement: Option<String>,
}

/// Aggregated result of one audit request
///
/// `issues`, `rewrites`, and `indexes` are ordered by the input query
/// sequence regardless of how the pipeline was scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub summary: Summary,
    pub issues: Vec<Issue>,
    pub rewrites: Vec<Rewrite>,
    #[serde(default)]
    pub indexes: Vec<IndexSuggestion>,
}

impl AuditReport {
    /// Returns true if any issue is error severity
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity.is_error())
    }
}
