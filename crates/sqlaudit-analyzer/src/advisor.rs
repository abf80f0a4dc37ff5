//! Index advisor
//!
//! Derives btree candidates from predicate structure: equality columns
//! first, then one range or sort column as the trailing component. One
//! suggestion per table at most, ranked by table size so the advice
//! starts where it pays off.

use itertools::Itertools;

use sqlaudit_core::{AuditConfig, IndexSuggestion};
use sqlaudit_schema::SchemaModel;

use crate::classify::{ColumnRef, QueryFacts};

/// Why a candidate was built, drives the rationale wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateSource {
    FilterAndSort,
    Filter,
    Join,
    Sort,
    Group,
}

#[derive(Debug)]
struct Candidate {
    table: String,
    columns: Vec<String>,
    source: CandidateSource,
}

/// Proposes index candidates for one query's facts.
///
/// Output order is by row-count hint descending, then table name, so the
/// largest tables lead. Candidates already covered by an existing index
/// (exact or as a prefix) are dropped.
pub fn recommend_indexes(
    facts: &QueryFacts,
    schema: &SchemaModel,
    config: &AuditConfig,
) -> Vec<IndexSuggestion> {
    let mut candidates: Vec<Candidate> = facts
        .referenced_tables
        .iter()
        .filter_map(|table| build_candidate(table, facts, config))
        .filter(|c| !is_covered(c, schema))
        .collect();

    candidates.sort_by(|a, b| {
        let rows_a = schema.row_hint(&a.table);
        let rows_b = schema.row_hint(&b.table);
        rows_b.cmp(&rows_a).then_with(|| a.table.cmp(&b.table))
    });

    candidates.into_iter().map(into_suggestion).collect()
}

/// Builds the single best candidate for one table, or nothing when the
/// query gives no column signal for it.
fn build_candidate(table: &str, facts: &QueryFacts, config: &AuditConfig) -> Option<Candidate> {
    let eq_cols: Vec<String> = facts
        .equality_predicates
        .iter()
        .filter(|p| !p.non_sargable)
        .filter(|p| p.table.as_deref() == Some(table))
        .map(|p| p.column.clone())
        .unique_by(|c| c.to_lowercase())
        .collect();

    let range_col = facts
        .range_predicates
        .iter()
        .filter(|p| !p.non_sargable)
        .find(|p| p.table.as_deref() == Some(table))
        .map(|p| p.column.clone());

    let order_col = first_on_table(&facts.order_by_columns, table);
    let group_cols: Vec<String> = facts
        .group_by_columns
        .iter()
        .filter(|c| c.on_table(table))
        .map(|c| c.column.clone())
        .unique_by(|c| c.to_lowercase())
        .collect();
    let join_cols: Vec<String> = facts
        .join_edges
        .iter()
        .flat_map(|e| e.columns_on(table))
        .map(|c| c.column.clone())
        .unique_by(|c| c.to_lowercase())
        .collect();

    let (mut columns, source) = if !eq_cols.is_empty() {
        // Equality columns lead; one range or sort column may trail
        let mut cols = eq_cols;
        let trailing = range_col.or(order_col.clone());
        let source = match &trailing {
            Some(_) if order_col.is_some() && cols.len() < config.max_index_columns => {
                CandidateSource::FilterAndSort
            }
            _ => CandidateSource::Filter,
        };
        if let Some(t) = trailing {
            if !cols.iter().any(|c| c.eq_ignore_ascii_case(&t)) {
                cols.push(t);
            }
        }
        (cols, source)
    } else if !join_cols.is_empty() {
        (join_cols, CandidateSource::Join)
    } else if let Some(range) = range_col {
        (vec![range], CandidateSource::Filter)
    } else if !group_cols.is_empty() {
        (group_cols, CandidateSource::Group)
    } else if let Some(order) = order_col {
        (vec![order], CandidateSource::Sort)
    } else {
        return None;
    };

    columns.truncate(config.max_index_columns);
    Some(Candidate {
        table: table.to_string(),
        columns,
        source,
    })
}

fn first_on_table(columns: &[ColumnRef], table: &str) -> Option<String> {
    columns
        .iter()
        .find(|c| c.on_table(table))
        .map(|c| c.column.clone())
}

fn is_covered(candidate: &Candidate, schema: &SchemaModel) -> bool {
    schema
        .table(&candidate.table)
        .is_some_and(|t| t.has_index_covering(&candidate.columns))
}

fn into_suggestion(candidate: Candidate) -> IndexSuggestion {
    let column_list = candidate.columns.join(", ");
    let (rationale, improvement) = match candidate.source {
        CandidateSource::FilterAndSort => (
            format!("Composite index for WHERE filtering and ORDER BY on {column_list}"),
            "Avoids filesort and speeds up filtering",
        ),
        CandidateSource::Filter => (
            format!("Supports WHERE clause filtering on {column_list}"),
            "Faster predicate evaluation",
        ),
        CandidateSource::Join => (
            format!("Optimizes JOIN performance on {column_list}"),
            "Faster join execution",
        ),
        CandidateSource::Sort => (
            format!("Improves ORDER BY performance on {column_list}"),
            "Avoids sort operation",
        ),
        CandidateSource::Group => (
            format!("Speeds up GROUP BY on {column_list}"),
            "Faster aggregation",
        ),
    };

    IndexSuggestion::btree(candidate.table, candidate.columns, rationale)
        .with_improvement(improvement)
}
