//! Heuristic cost scoring
//!
//! The score is a relative 0-100 badness measure, not a cost model. Each
//! detected issue contributes a fixed weight, except full scans of large
//! tables which scale with the row-count hint. The sum is clamped and
//! bucketed into a human-readable improvement estimate.

use sqlaudit_core::{AuditConfig, CostEstimate, Issue};
use sqlaudit_schema::SchemaModel;

use crate::classify::QueryFacts;

/// Cap on the dynamic full-scan weight
const SCAN_WEIGHT_CAP: u32 = 40;

/// Fixed weight per rule code. Parse failures score zero; the issue
/// itself is the signal there.
fn weight_of(code: &str) -> u32 {
    match code {
        "R001" => 5,
        "R002" => 8,
        "R003" => 30,
        "R004" => 15,
        "R006" => 3,
        "R007" => 4,
        "R008" => 20,
        "R009" => 10,
        "R010" => 4,
        _ => 0,
    }
}

/// Short label used in the improvement text's issue listing
fn label_of(issue: &Issue, scan_table: Option<&str>) -> String {
    match issue.code.as_str() {
        "R001" => "SELECT * increases data transfer".to_string(),
        "R002" => "Unused joined table".to_string(),
        "R003" => "Potential cartesian product".to_string(),
        "R004" => "Non-SARGable function in WHERE clause".to_string(),
        "R005" => match scan_table {
            Some(table) => format!("Full scan on large table '{table}'"),
            None => "Full scan on large table".to_string(),
        },
        "R006" => "ORDER BY without index".to_string(),
        "R007" => "DISTINCT over join output".to_string(),
        "R008" => "Correlated subquery detected".to_string(),
        "R009" => "LIKE with leading wildcard".to_string(),
        "R010" => "GROUP BY without index".to_string(),
        _ => issue.message.clone(),
    }
}

/// Scores one query from its detected issues.
///
/// Deterministic: same issues and schema always give the same score.
pub fn estimate_cost(
    issues: &[Issue],
    facts: &QueryFacts,
    schema: &SchemaModel,
    config: &AuditConfig,
) -> CostEstimate {
    // R005 issues are emitted in sorted-table order, so recomputing the
    // trigger tables here lines up one-to-one
    let scan_tables: Vec<&String> = facts
        .referenced_tables
        .iter()
        .filter(|t| {
            issues
                .iter()
                .any(|i| i.code == "R005" && i.message.contains(&format!("'{t}'")))
        })
        .collect();
    let mut scan_iter = scan_tables.iter();

    let mut total: u32 = 0;
    // (weight, label) per contributing issue, for the top-two listing
    let mut contributions: Vec<(u32, String)> = Vec::new();

    for issue in issues {
        let (weight, label) = if issue.code == "R005" {
            let table = scan_iter.next().map(|t| t.as_str());
            let rows = table.map(|t| schema.row_hint(t)).unwrap_or(0);
            let weight = if rows >= config.scan_warn_rows {
                scan_weight(rows)
            } else {
                0
            };
            (weight, label_of(issue, table))
        } else {
            (weight_of(&issue.code), label_of(issue, None))
        };
        if weight > 0 {
            total += weight;
            contributions.push((weight, label));
        }
    }

    let score = total.min(100) as u8;
    let mut estimate = bucket(score).to_string();

    contributions.sort_by(|a, b| b.0.cmp(&a.0));
    let top: Vec<&str> = contributions.iter().take(2).map(|(_, l)| l.as_str()).collect();
    if !top.is_empty() {
        estimate.push_str(&format!(" - Issues: {}", top.join(", ")));
    }

    CostEstimate {
        score,
        improvement_estimate: estimate,
    }
}

/// Dynamic weight for a full scan: grows with the log of the row count
fn scan_weight(rows: u64) -> u32 {
    if rows == 0 {
        return 0;
    }
    let weight = ((rows as f64).log10() * 8.0).round() as u32;
    weight.min(SCAN_WEIGHT_CAP)
}

fn bucket(score: u8) -> &'static str {
    match score {
        0..=19 => "Query looks well-optimized",
        20..=39 => "Minor optimizations possible (1.2-2x speedup)",
        40..=59 => "Moderate improvements available (2-4x speedup)",
        60..=79 => "Significant optimization opportunities (4-10x speedup)",
        _ => "Major performance issues detected (10x+ speedup possible)",
    }
}

#[cfg(test)]
mod tests;
