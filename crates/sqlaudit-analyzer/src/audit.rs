//! Audit aggregation
//!
//! Builds the schema model once, analyzes every query independently, and
//! merges per-query results in input order. Queries are isolated: one
//! failing query becomes a `PARSE_ERROR` issue and never aborts the
//! batch.

use rayon::prelude::*;
use tracing::{debug, info};

use sqlaudit_core::{
    AuditConfig, AuditReport, CostEstimate, IndexSuggestion, Issue, Result, Rewrite,
    RewriteGenerator, Severity, SqlDialect, Summary, rewrite_warranted,
};
use sqlaudit_schema::SchemaModel;

use crate::advisor::recommend_indexes;
use crate::classify::classify;
use crate::cost::estimate_cost;
use crate::parse::{ParsedQuery, snippet_of};
use crate::rules::{PARSE_ERROR, evaluate_rules};

/// Everything produced for one query, before merging
#[derive(Debug)]
struct QueryResult {
    issues: Vec<Issue>,
    indexes: Vec<IndexSuggestion>,
    cost: CostEstimate,
}

/// Runs the full audit over a schema and a batch of queries.
pub fn run_audit(
    schema_ddl: &str,
    queries: &[String],
    dialect: SqlDialect,
    config: &AuditConfig,
) -> Result<AuditReport> {
    run_audit_with_rewrites(schema_ddl, queries, dialect, config, None)
}

/// Same as [`run_audit`], additionally proposing rewrites for queries
/// whose issues warrant one.
pub fn run_audit_with_rewrites(
    schema_ddl: &str,
    queries: &[String],
    dialect: SqlDialect,
    config: &AuditConfig,
    rewriter: Option<&dyn RewriteGenerator>,
) -> Result<AuditReport> {
    let schema = SchemaModel::from_ddl(schema_ddl, dialect)?;
    info!(
        tables = schema.tables.len(),
        queries = queries.len(),
        dialect = %dialect,
        "starting audit"
    );

    // Indexed parallel map keeps results aligned with input order
    let results: Vec<QueryResult> = queries
        .par_iter()
        .enumerate()
        .map(|(index, sql)| analyze_one(sql, index, dialect, &schema, config))
        .collect();

    let mut issues = Vec::new();
    let mut indexes = Vec::new();
    let mut est_improvement = None;
    for result in results {
        if est_improvement.is_none() {
            est_improvement = Some(result.cost.improvement_estimate.clone());
        }
        issues.extend(result.issues);
        indexes.extend(result.indexes);
    }

    let mut rewrites = Vec::new();
    if let Some(rewriter) = rewriter {
        for (index, sql) in queries.iter().enumerate() {
            let query_issues: Vec<Issue> = issues
                .iter()
                .filter(|i| i.query_index == index)
                .cloned()
                .collect();
            if !query_issues.iter().any(|i| rewrite_warranted(&i.code)) {
                continue;
            }
            if let Some(rewrite) = rewriter.propose_rewrite(sql, &query_issues) {
                rewrites.push(Rewrite {
                    query_index: index,
                    ..rewrite
                });
            }
        }
    }

    let summary = Summary {
        total_issues: issues.len(),
        high_severity: issues.iter().filter(|i| i.severity.is_error()).count(),
        est_improvement,
    };
    debug!(
        total = summary.total_issues,
        high = summary.high_severity,
        "audit complete"
    );

    Ok(AuditReport {
        summary,
        issues,
        rewrites,
        indexes,
    })
}

/// Analyzes a single query in isolation.
fn analyze_one(
    sql: &str,
    index: usize,
    dialect: SqlDialect,
    schema: &SchemaModel,
    config: &AuditConfig,
) -> QueryResult {
    let parsed = match ParsedQuery::parse(sql, dialect) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(query = index, error = %e, "query failed to parse");
            return parse_failure(sql, index, &e.to_string());
        }
    };

    let facts = match classify(&parsed) {
        Ok(facts) => facts,
        Err(e) => {
            debug!(query = index, error = %e, "query failed to classify");
            return parse_failure(sql, index, &e.to_string());
        }
    };

    let issues = evaluate_rules(&facts, schema, config, sql, index);
    let indexes = if config.suggest_indexes {
        recommend_indexes(&facts, schema, config)
    } else {
        Vec::new()
    };
    let cost = estimate_cost(&issues, &facts, schema, config);

    QueryResult {
        issues,
        indexes,
        cost,
    }
}

/// A query that cannot be analyzed yields exactly one issue and nothing
/// else: no cost contribution, no index suggestions.
fn parse_failure(sql: &str, index: usize, error: &str) -> QueryResult {
    QueryResult {
        issues: vec![Issue {
            code: PARSE_ERROR.to_string(),
            severity: Severity::Error,
            message: format!("Failed to parse query: {error}"),
            snippet: Some(snippet_of(sql)),
            line: None,
            rule: None,
            query_index: index,
        }],
        indexes: Vec::new(),
        cost: CostEstimate {
            score: 0,
            improvement_estimate: "Query could not be analyzed".to_string(),
        },
    }
}
