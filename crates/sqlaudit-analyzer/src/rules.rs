//! Issue detection rules
//!
//! The catalog is a closed set evaluated in a fixed order, so issue
//! output is deterministic for a given query. Every rule is a pure
//! function of the query facts, the schema model, and the config.

use std::collections::BTreeSet;

use sqlaudit_core::{AuditConfig, Issue, Severity};
use sqlaudit_schema::SchemaModel;

use crate::advisor::recommend_indexes;
use crate::classify::QueryFacts;
use crate::parse::snippet_of;

/// Issue code used when a query fails to parse. Not part of the catalog;
/// it is emitted by the aggregator, never by `evaluate_rules`.
pub const PARSE_ERROR: &str = "PARSE_ERROR";

/// The closed rule catalog. Codes are stable wire identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCode {
    /// SELECT * projection
    R001,
    /// Joined table never consumed
    R002,
    /// Cartesian product
    R003,
    /// Non-SARGable predicate
    R004,
    /// Unfiltered scan of a large table
    R005,
    /// ORDER BY with no index support
    R006,
    /// DISTINCT over a join
    R007,
    /// Correlated subquery (N+1 shape)
    R008,
    /// LIKE with a leading wildcard
    R009,
    /// GROUP BY with no index support
    R010,
}

/// Evaluation order of the catalog
pub const CATALOG: [RuleCode; 10] = [
    RuleCode::R001,
    RuleCode::R002,
    RuleCode::R003,
    RuleCode::R004,
    RuleCode::R005,
    RuleCode::R006,
    RuleCode::R007,
    RuleCode::R008,
    RuleCode::R009,
    RuleCode::R010,
];

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::R001 => "R001",
            RuleCode::R002 => "R002",
            RuleCode::R003 => "R003",
            RuleCode::R004 => "R004",
            RuleCode::R005 => "R005",
            RuleCode::R006 => "R006",
            RuleCode::R007 => "R007",
            RuleCode::R008 => "R008",
            RuleCode::R009 => "R009",
            RuleCode::R010 => "R010",
        }
    }

    /// Human-readable rule name
    pub fn name(&self) -> &'static str {
        match self {
            RuleCode::R001 => "SELECT_STAR",
            RuleCode::R002 => "UNUSED_JOIN",
            RuleCode::R003 => "CARTESIAN_JOIN",
            RuleCode::R004 => "NON_SARGABLE",
            RuleCode::R005 => "MISSING_PREDICATE",
            RuleCode::R006 => "ORDER_BY_NO_INDEX",
            RuleCode::R007 => "DISTINCT_MISUSE",
            RuleCode::R008 => "N_PLUS_ONE_PATTERN",
            RuleCode::R009 => "LIKE_PREFIX_WILDCARD",
            RuleCode::R010 => "AGG_NO_GROUPING_INDEX",
        }
    }

    /// Fixed severity per rule. Only cartesian products reach `Error`.
    pub fn severity(&self) -> Severity {
        match self {
            RuleCode::R003 => Severity::Error,
            RuleCode::R001
            | RuleCode::R002
            | RuleCode::R004
            | RuleCode::R005
            | RuleCode::R008
            | RuleCode::R009 => Severity::Warn,
            RuleCode::R006 | RuleCode::R007 | RuleCode::R010 => Severity::Info,
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the full catalog against one query's facts.
///
/// Issues come out grouped by rule in catalog order; within a rule that
/// fires per table, tables are visited in sorted order.
pub fn evaluate_rules(
    facts: &QueryFacts,
    schema: &SchemaModel,
    config: &AuditConfig,
    sql: &str,
    query_index: usize,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let snippet = snippet_of(sql);

    for rule in CATALOG {
        match rule {
            RuleCode::R001 => check_select_star(facts, &mut issues, &snippet, query_index),
            RuleCode::R002 => check_unused_join(facts, &mut issues, &snippet, query_index),
            RuleCode::R003 => check_cartesian_join(facts, &mut issues, &snippet, query_index),
            RuleCode::R004 => check_non_sargable(facts, &mut issues, &snippet, query_index),
            RuleCode::R005 => {
                check_missing_predicate(facts, schema, config, &mut issues, &snippet, query_index)
            }
            RuleCode::R006 => {
                check_order_by_no_index(facts, schema, config, &mut issues, &snippet, query_index)
            }
            RuleCode::R007 => check_distinct_misuse(facts, &mut issues, &snippet, query_index),
            RuleCode::R008 => check_n_plus_one(facts, &mut issues, &snippet, query_index),
            RuleCode::R009 => check_like_prefix(facts, &mut issues, &snippet, query_index),
            RuleCode::R010 => {
                check_agg_no_grouping_index(facts, schema, &mut issues, &snippet, query_index)
            }
        }
    }

    issues
}

fn issue(rule: RuleCode, message: String, snippet: &str, query_index: usize) -> Issue {
    Issue {
        code: rule.as_str().to_string(),
        severity: rule.severity(),
        message,
        snippet: Some(snippet.to_string()),
        line: None,
        rule: Some(rule.name().to_string()),
        query_index,
    }
}

fn check_select_star(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    if facts.projects_star {
        issues.push(issue(
            RuleCode::R001,
            "SELECT * fetches all columns; list only the columns you need".to_string(),
            snippet,
            qi,
        ));
    }
}

fn check_unused_join(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    // SELECT * consumes every table, so there is nothing unused to report
    for table in &facts.joined_tables {
        if !facts.consumed_tables.contains(table) {
            issues.push(issue(
                RuleCode::R002,
                format!(
                    "Table '{table}' is joined but none of its columns are used; \
                     remove the join or use its columns"
                ),
                snippet,
                qi,
            ));
        }
    }
}

fn check_cartesian_join(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    for edge in &facts.join_edges {
        if edge.is_cross() {
            issues.push(issue(
                RuleCode::R003,
                "Cartesian product: tables are combined without a join condition, \
                 producing every row combination"
                    .to_string(),
                snippet,
                qi,
            ));
        }
    }
}

fn check_non_sargable(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    if facts.has_non_sargable_predicate() {
        issues.push(issue(
            RuleCode::R004,
            "Function applied to a column in WHERE prevents index use; \
             rewrite the predicate to compare the bare column"
                .to_string(),
            snippet,
            qi,
        ));
    }
}

fn check_missing_predicate(
    facts: &QueryFacts,
    schema: &SchemaModel,
    config: &AuditConfig,
    issues: &mut Vec<Issue>,
    snippet: &str,
    qi: usize,
) {
    for table in &facts.referenced_tables {
        let rows = schema.row_hint(table);
        if rows >= config.large_table_rows && !facts.is_filtered(table) {
            issues.push(issue(
                RuleCode::R005,
                format!(
                    "Full scan on large table '{table}' (~{rows} rows) with no \
                     filtering predicate"
                ),
                snippet,
                qi,
            ));
        }
    }
}

fn check_order_by_no_index(
    facts: &QueryFacts,
    schema: &SchemaModel,
    config: &AuditConfig,
    issues: &mut Vec<Issue>,
    snippet: &str,
    qi: usize,
) {
    if facts.order_by_columns.is_empty() {
        return;
    }
    // An index the advisor is about to suggest counts as support too,
    // but only when the report will actually carry the suggestion
    let suggested = if config.suggest_indexes {
        recommend_indexes(facts, schema, config)
    } else {
        Vec::new()
    };

    let mut flagged: BTreeSet<&str> = BTreeSet::new();
    for col in &facts.order_by_columns {
        let Some(table_name) = &col.table else {
            continue;
        };
        if flagged.contains(table_name.as_str()) {
            continue;
        }
        if let Some(table) = schema.table(table_name) {
            if table.has_index_leading_with(&col.column) {
                continue;
            }
        }
        let covered = suggested.iter().any(|s| {
            s.table.eq_ignore_ascii_case(table_name)
                && s.columns
                    .first()
                    .is_some_and(|c| c.eq_ignore_ascii_case(&col.column))
        });
        if covered {
            continue;
        }

        flagged.insert(table_name);
        issues.push(issue(
            RuleCode::R006,
            format!(
                "ORDER BY on '{}.{}' has no supporting index; the sort will \
                 materialize and sort the full result",
                table_name, col.column
            ),
            snippet,
            qi,
        ));
    }
}

fn check_distinct_misuse(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    if facts.has_distinct && !facts.join_edges.is_empty() {
        issues.push(issue(
            RuleCode::R007,
            "DISTINCT over a join often papers over row multiplication; \
             check the join conditions before deduplicating"
                .to_string(),
            snippet,
            qi,
        ));
    }
}

fn check_n_plus_one(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    if facts.has_correlated_subquery {
        issues.push(issue(
            RuleCode::R008,
            "Correlated subquery re-executes per outer row; \
             rewrite as a join or a grouped subquery"
                .to_string(),
            snippet,
            qi,
        ));
    }
}

fn check_like_prefix(facts: &QueryFacts, issues: &mut Vec<Issue>, snippet: &str, qi: usize) {
    if let Some(col) = facts.like_prefix_wildcard.first() {
        issues.push(issue(
            RuleCode::R009,
            format!(
                "LIKE pattern on '{}' starts with a wildcard, so no btree \
                 index can narrow the scan",
                col.qualified()
            ),
            snippet,
            qi,
        ));
    }
}

fn check_agg_no_grouping_index(
    facts: &QueryFacts,
    schema: &SchemaModel,
    issues: &mut Vec<Issue>,
    snippet: &str,
    qi: usize,
) {
    if !facts.has_aggregate || facts.group_by_columns.is_empty() {
        return;
    }
    let Some(first) = facts.group_by_columns.first() else {
        return;
    };
    let Some(table_name) = &first.table else {
        return;
    };

    let group_cols: Vec<String> = facts
        .group_by_columns
        .iter()
        .filter(|c| c.on_table(table_name))
        .map(|c| c.column.clone())
        .collect();

    let covered = schema
        .table(table_name)
        .is_some_and(|t| t.has_index_covering(&group_cols));
    if covered {
        return;
    }

    issues.push(issue(
        RuleCode::R010,
        format!(
            "GROUP BY on '{}' has no supporting index; aggregation will \
             hash or sort the full input",
            group_cols.join(", ")
        ),
        snippet,
        qi,
    ));
}
