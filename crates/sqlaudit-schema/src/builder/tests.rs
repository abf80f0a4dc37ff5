//! Tests for best-effort schema construction

use super::*;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn build(ddl: &str) -> SchemaModel {
    SchemaModel::from_ddl(ddl, SqlDialect::Postgres).unwrap()
}

mod split_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_splits_on_top_level_semicolons() {
        let stmts = split_statements("CREATE TABLE a(id INT); CREATE TABLE b(id INT);");
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].starts_with("CREATE TABLE a"));
    }

    #[test]
    fn test_semicolon_inside_string_literal() {
        let stmts = split_statements("CREATE TABLE a(x TEXT DEFAULT 'a;b'); CREATE TABLE b(id INT)");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_semicolon_inside_comments() {
        let stmts = split_statements(indoc! {"
            -- not a split; point
            CREATE TABLE a(id INT);
            /* also; not */ CREATE TABLE b(id INT);
        "});
        assert_eq!(stmts.len(), 2);
    }
}

mod build_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_columns_and_nullability() {
        let model = build("CREATE TABLE users (id INT PRIMARY KEY, email TEXT NOT NULL, bio TEXT)");
        let users = model.table("users").unwrap();
        assert_eq!(users.columns.len(), 3);
        assert!(!users.columns[0].nullable);
        assert!(!users.columns[1].nullable);
        assert!(users.columns[2].nullable);
        assert_eq!(users.columns[1].data_type, "TEXT");
    }

    #[test]
    fn test_primary_key_becomes_existing_index() {
        let model = build("CREATE TABLE users (id INT PRIMARY KEY, email TEXT)");
        let users = model.table("users").unwrap();
        assert_eq!(users.existing_indexes.len(), 1);
        assert_eq!(users.existing_indexes[0].columns, vec!["id"]);
        assert!(users.existing_indexes[0].unique);
    }

    #[test]
    fn test_table_level_constraints_become_indexes() {
        let model = build(indoc! {"
            CREATE TABLE events (
                tenant_id INT,
                occurred_at TIMESTAMP,
                kind TEXT,
                PRIMARY KEY (tenant_id, occurred_at),
                UNIQUE (kind)
            )
        "});
        let events = model.table("events").unwrap();
        assert_eq!(events.existing_indexes.len(), 2);
        assert_eq!(
            events.existing_indexes[0].columns,
            vec!["tenant_id", "occurred_at"]
        );
    }

    #[test]
    fn test_create_index_attaches_to_table() {
        let model = build(indoc! {"
            CREATE TABLE orders (id INT, user_id INT, created_at TIMESTAMP);
            CREATE INDEX idx_orders_user ON orders (user_id, created_at);
            CREATE UNIQUE INDEX idx_orders_id ON orders (id);
        "});
        let orders = model.table("orders").unwrap();
        assert_eq!(orders.existing_indexes.len(), 2);
        assert_eq!(orders.existing_indexes[0].columns, vec!["user_id", "created_at"]);
        assert!(!orders.existing_indexes[0].unique);
        assert!(orders.existing_indexes[1].unique);
    }

    #[test]
    fn test_index_on_undeclared_table_is_warning() {
        let model = build("CREATE INDEX idx ON ghost (id)");
        assert!(model.tables.is_empty());
        assert_eq!(model.warnings.len(), 1);
        assert!(model.warnings[0].contains("ghost"));
    }

    #[test]
    fn test_unparsable_statement_is_skipped() {
        let model = build(indoc! {"
            CREATE TABLE good (id INT);
            CREATE GARBAGE nonsense;
            CREATE TABLE also_good (id INT);
        "});
        assert_eq!(model.tables.len(), 2);
        assert_eq!(model.warnings.len(), 1);
        assert!(model.warnings[0].contains("Skipped unparsable"));
    }

    #[test]
    fn test_unresolved_foreign_key_is_recorded() {
        let model = build(indoc! {"
            CREATE TABLE orders (
                id INT PRIMARY KEY,
                user_id INT REFERENCES users(id)
            )
        "});
        assert_eq!(model.unresolved_refs.len(), 1);
        assert_eq!(model.unresolved_refs[0].table, "orders");
        assert_eq!(model.unresolved_refs[0].references, "users");
    }

    #[test]
    fn test_resolved_foreign_key_is_not_recorded() {
        let model = build(indoc! {"
            CREATE TABLE users (id INT PRIMARY KEY);
            CREATE TABLE orders (
                id INT PRIMARY KEY,
                user_id INT,
                FOREIGN KEY (user_id) REFERENCES users(id)
            );
        "});
        assert!(model.unresolved_refs.is_empty());
    }
}

mod row_hint_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_trailing_comment_on_same_line() {
        let model = build("CREATE TABLE users(id INT, email TEXT); -- @rows=100000");
        assert_eq!(model.table("users").unwrap().row_count_hint, Some(100_000));
    }

    #[test]
    fn test_comment_below_create_table() {
        let model = build(indoc! {"
            CREATE TABLE big_table (id INT);
            -- @rows=5000000
            CREATE TABLE small_table (id INT);
        "});
        assert_eq!(
            model.table("big_table").unwrap().row_count_hint,
            Some(5_000_000)
        );
        assert_eq!(model.table("small_table").unwrap().row_count_hint, None);
    }

    #[test]
    fn test_trailing_comment_on_multi_line_create_table() {
        let model = build(indoc! {"
            CREATE TABLE orders (
                id INT PRIMARY KEY,
                user_id INT,
                total NUMERIC,
                status TEXT,
                created_at TIMESTAMP
            ); -- @rows=500000
        "});
        assert_eq!(
            model.table("orders").unwrap().row_count_hint,
            Some(500_000)
        );
    }

    #[test]
    fn test_hint_does_not_bind_across_statement_boundary() {
        let model = build(indoc! {"
            CREATE TABLE earlier (id INT);
            CREATE INDEX idx_earlier ON earlier (id);
            -- @rows=900
        "});
        assert_eq!(model.table("earlier").unwrap().row_count_hint, None);
    }

    #[test]
    fn test_case_insensitive_annotation() {
        let model = build("CREATE TABLE t(id INT); -- @ROWS = 42");
        assert_eq!(model.table("t").unwrap().row_count_hint, Some(42));
    }

    #[test]
    fn test_absent_hint_defaults_to_unknown() {
        let model = build("CREATE TABLE t(id INT)");
        assert_eq!(model.table("t").unwrap().row_count_hint, None);
        assert_eq!(model.table("t").unwrap().row_hint(), 0);
    }
}
