use pretty_assertions::assert_eq;

use sqlaudit_core::{AuditConfig, SqlDialect};
use sqlaudit_schema::SchemaModel;

use super::*;
use crate::classify::classify;
use crate::parse::ParsedQuery;
use crate::rules::evaluate_rules;

fn score(ddl: &str, sql: &str) -> CostEstimate {
    let schema = SchemaModel::from_ddl(ddl, SqlDialect::Postgres).unwrap();
    let parsed = ParsedQuery::parse(sql, SqlDialect::Postgres).unwrap();
    let facts = classify(&parsed).unwrap();
    let config = AuditConfig::default();
    let issues = evaluate_rules(&facts, &schema, &config, sql, 0);
    estimate_cost(&issues, &facts, &schema, &config)
}

mod weight_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_clean_query_scores_zero() {
        let est = score(
            "CREATE TABLE users (id INT PRIMARY KEY, email TEXT);",
            "SELECT id, email FROM users WHERE id = 1",
        );
        assert_eq!(est.score, 0);
        assert_eq!(est.improvement_estimate, "Query looks well-optimized");
    }

    #[test]
    fn test_select_star_alone_is_minor() {
        let est = score(
            "CREATE TABLE users (id INT, email TEXT);",
            "SELECT * FROM users",
        );
        assert_eq!(est.score, 5);
        assert!(est.improvement_estimate.starts_with("Query looks well-optimized"));
        assert!(est
            .improvement_estimate
            .contains("SELECT * increases data transfer"));
    }

    #[test]
    fn test_cartesian_join_dominates() {
        let est = score(
            "CREATE TABLE a (id INT); CREATE TABLE b (id INT);",
            "SELECT a.id, b.id FROM a, b",
        );
        // R003 = 30
        assert_eq!(est.score, 30);
        assert!(est
            .improvement_estimate
            .contains("Potential cartesian product"));
    }

    #[test]
    fn test_scan_weight_scales_with_rows() {
        // log10(100000) * 8 = 40
        let est = score(
            "CREATE TABLE users (id INT, email TEXT); -- @rows=100000",
            "SELECT id FROM users",
        );
        assert_eq!(est.score, 40);
        assert!(est
            .improvement_estimate
            .contains("Full scan on large table 'users'"));
    }

    #[test]
    fn test_scan_weight_is_capped() {
        assert_eq!(scan_weight(10_u64.pow(12)), SCAN_WEIGHT_CAP);
        assert_eq!(scan_weight(0), 0);
    }

    #[test]
    fn test_score_is_clamped_at_100() {
        let ddl = "
            CREATE TABLE a (id INT, x TEXT); -- @rows=1000000
            CREATE TABLE b (id INT, y TEXT); -- @rows=1000000
            CREATE TABLE c (id INT, z TEXT); -- @rows=1000000
        ";
        // Star + three full scans + two cartesian edges
        let est = score(ddl, "SELECT * FROM a, b, c");
        assert_eq!(est.score, 100);
        assert!(est
            .improvement_estimate
            .starts_with("Major performance issues detected"));
    }
}

mod bucket_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket(0), "Query looks well-optimized");
        assert_eq!(bucket(19), "Query looks well-optimized");
        assert_eq!(bucket(20), "Minor optimizations possible (1.2-2x speedup)");
        assert_eq!(bucket(40), "Moderate improvements available (2-4x speedup)");
        assert_eq!(
            bucket(60),
            "Significant optimization opportunities (4-10x speedup)"
        );
        assert_eq!(
            bucket(80),
            "Major performance issues detected (10x+ speedup possible)"
        );
        assert_eq!(
            bucket(100),
            "Major performance issues detected (10x+ speedup possible)"
        );
    }

    #[test]
    fn test_top_two_issues_listed() {
        let est = score(
            "CREATE TABLE users (id INT, email TEXT); -- @rows=100000",
            "SELECT * FROM users",
        );
        // Scan (40) outweighs star (5), so it is listed first
        let suffix = est
            .improvement_estimate
            .split(" - Issues: ")
            .nth(1)
            .unwrap();
        assert_eq!(
            suffix,
            "Full scan on large table 'users', SELECT * increases data transfer"
        );
    }

    #[test]
    fn test_more_issues_never_score_lower() {
        let ddl = "CREATE TABLE users (id INT, email TEXT); -- @rows=100000";
        let filtered = score(ddl, "SELECT id FROM users WHERE id = 1");
        let scan = score(ddl, "SELECT id FROM users");
        let scan_and_star = score(ddl, "SELECT * FROM users");
        assert!(filtered.score <= scan.score);
        assert!(scan.score <= scan_and_star.score);
    }

    #[test]
    fn test_determinism() {
        let ddl = "CREATE TABLE users (id INT, email TEXT); -- @rows=100000";
        let sql = "SELECT * FROM users";
        assert_eq!(score(ddl, sql), score(ddl, sql));
    }
}
