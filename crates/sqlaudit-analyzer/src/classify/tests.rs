use pretty_assertions::assert_eq;

use sqlaudit_core::SqlDialect;

use super::*;
use crate::parse::ParsedQuery;

fn facts(sql: &str) -> QueryFacts {
    let parsed = ParsedQuery::parse(sql, SqlDialect::Postgres).unwrap();
    classify(&parsed).unwrap()
}

fn tables(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

mod projection_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_select_star_sets_flag() {
        let f = facts("SELECT * FROM users");
        assert!(f.projects_star);
        assert_eq!(f.referenced_tables, tables(&["users"]));
    }

    #[test]
    fn test_qualified_wildcard_sets_flag_and_consumes() {
        let f = facts("SELECT u.* FROM users u JOIN orders o ON o.user_id = u.id");
        assert!(f.projects_star);
        assert!(f.consumed_tables.contains("users"));
    }

    #[test]
    fn test_explicit_columns_do_not_set_flag() {
        let f = facts("SELECT id, email FROM users");
        assert!(!f.projects_star);
        assert_eq!(f.consumed_tables, tables(&["users"]));
    }

    #[test]
    fn test_table_names_are_lowercased() {
        let f = facts("SELECT * FROM Users");
        assert_eq!(f.referenced_tables, tables(&["users"]));
    }
}

mod predicate_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_equality_predicate() {
        let f = facts("SELECT id FROM users WHERE email = 'a@b.c'");
        assert_eq!(f.equality_predicates.len(), 1);
        let p = &f.equality_predicates[0];
        assert_eq!(p.column, "email");
        assert_eq!(p.table.as_deref(), Some("users"));
        assert!(!p.non_sargable);
        assert!(f.filtered_tables.contains("users"));
    }

    #[test]
    fn test_range_predicates() {
        let f = facts("SELECT id FROM orders WHERE total > 100 AND created_at <= '2024-01-01'");
        assert_eq!(f.range_predicates.len(), 2);
        assert_eq!(f.range_predicates[0].column, "total");
        assert_eq!(f.range_predicates[1].column, "created_at");
    }

    #[test]
    fn test_between_is_a_range_predicate() {
        let f = facts("SELECT id FROM orders WHERE total BETWEEN 10 AND 20");
        assert_eq!(f.range_predicates.len(), 1);
        assert_eq!(f.range_predicates[0].column, "total");
    }

    #[test]
    fn test_in_list_counts_as_equality() {
        let f = facts("SELECT id FROM orders WHERE status IN ('open', 'paid')");
        assert_eq!(f.equality_predicates.len(), 1);
        assert_eq!(f.equality_predicates[0].column, "status");
    }

    #[test]
    fn test_function_wrapped_column_is_non_sargable() {
        let f = facts("SELECT id FROM users WHERE LOWER(email) = 'a@b.c'");
        assert_eq!(f.equality_predicates.len(), 1);
        assert!(f.equality_predicates[0].non_sargable);
        assert_eq!(f.equality_predicates[0].column, "email");
        assert!(f.has_non_sargable_predicate());
    }

    #[test]
    fn test_cast_column_is_non_sargable() {
        let f = facts("SELECT id FROM users WHERE CAST(id AS TEXT) = '5'");
        assert_eq!(f.equality_predicates.len(), 1);
        assert!(f.equality_predicates[0].non_sargable);
    }

    #[test]
    fn test_reversed_comparison_still_records_column() {
        let f = facts("SELECT id FROM orders WHERE 100 < total");
        assert_eq!(f.range_predicates.len(), 1);
        assert_eq!(f.range_predicates[0].column, "total");
    }

    #[test]
    fn test_qualified_column_resolves_alias() {
        let f = facts("SELECT u.id FROM users u WHERE u.email = 'x'");
        assert_eq!(
            f.equality_predicates[0].table.as_deref(),
            Some("users")
        );
    }

    #[test]
    fn test_not_equal_filters_without_predicate_entry() {
        let f = facts("SELECT id FROM users WHERE status <> 'deleted'");
        assert!(f.equality_predicates.is_empty());
        assert!(f.range_predicates.is_empty());
        assert!(f.filtered_tables.contains("users"));
    }
}

mod join_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_inner_join_records_edge() {
        let f = facts("SELECT u.id FROM users u JOIN orders o ON o.user_id = u.id");
        assert_eq!(f.join_edges.len(), 1);
        let edge = &f.join_edges[0];
        assert_eq!(edge.kind, JoinKind::Inner);
        assert!(f.joined_tables.contains("orders"));
    }

    #[test]
    fn test_left_join_is_outer() {
        let f = facts("SELECT u.id FROM users u LEFT JOIN orders o ON o.user_id = u.id");
        assert_eq!(f.join_edges[0].kind, JoinKind::Outer);
    }

    #[test]
    fn test_comma_join_is_cross() {
        let f = facts("SELECT * FROM a, b");
        assert_eq!(f.join_edges.len(), 1);
        assert!(f.join_edges[0].is_cross());
        assert!(f.has_cross_join());
    }

    #[test]
    fn test_explicit_cross_join() {
        let f = facts("SELECT * FROM a CROSS JOIN b");
        assert!(f.has_cross_join());
    }

    #[test]
    fn test_comma_join_with_where_equality_is_still_cross() {
        // The edge classification keys on the FROM shape; a WHERE join
        // condition records predicates but does not undo the cross edge
        let f = facts("SELECT * FROM a, b WHERE a.id = b.a_id");
        assert!(f.has_cross_join());
        assert_eq!(f.equality_predicates.len(), 2);
    }

    #[test]
    fn test_join_constraint_columns_are_not_consumed() {
        let f = facts("SELECT u.name FROM users u JOIN orders o ON o.user_id = u.id");
        assert!(f.consumed_tables.contains("users"));
        assert!(!f.consumed_tables.contains("orders"));
    }

    #[test]
    fn test_using_constraint_records_edge() {
        let f = facts("SELECT u.name FROM users u JOIN orders o USING (user_id)");
        assert_eq!(f.join_edges.len(), 1);
        assert_eq!(
            f.join_edges[0].left.as_ref().map(|c| c.column.as_str()),
            Some("user_id")
        );
    }

    #[test]
    fn test_three_way_comma_join_yields_two_edges() {
        let f = facts("SELECT * FROM a, b, c");
        assert_eq!(f.join_edges.iter().filter(|e| e.is_cross()).count(), 2);
    }
}

mod shape_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_distinct_flag() {
        let f = facts("SELECT DISTINCT email FROM users");
        assert!(f.has_distinct);
    }

    #[test]
    fn test_aggregate_flag() {
        let f = facts("SELECT COUNT(*) FROM orders");
        assert!(f.has_aggregate);
    }

    #[test]
    fn test_having_aggregate_is_not_a_predicate() {
        let f = facts(
            "SELECT status, COUNT(id) FROM orders GROUP BY status HAVING COUNT(id) > 5",
        );
        assert!(f.has_aggregate);
        assert!(f.range_predicates.is_empty());
        assert!(!f.has_non_sargable_predicate());
    }

    #[test]
    fn test_aggregate_only_in_having_sets_flag() {
        let f = facts("SELECT status FROM orders GROUP BY status HAVING MIN(total) > 5");
        assert!(f.has_aggregate);
        assert!(f.range_predicates.is_empty());
    }

    #[test]
    fn test_group_by_columns() {
        let f = facts("SELECT status, COUNT(*) FROM orders GROUP BY status");
        assert_eq!(f.group_by_columns.len(), 1);
        assert_eq!(f.group_by_columns[0].column, "status");
        assert!(f.has_aggregate);
    }

    #[test]
    fn test_order_by_columns() {
        let f = facts("SELECT id FROM orders ORDER BY created_at DESC, id");
        assert_eq!(f.order_by_columns.len(), 2);
        assert_eq!(f.order_by_columns[0].column, "created_at");
        assert_eq!(
            f.order_by_columns[0].table.as_deref(),
            Some("orders")
        );
    }

    #[test]
    fn test_like_prefix_wildcard() {
        let f = facts("SELECT id FROM users WHERE email LIKE '%@gmail.com'");
        assert_eq!(f.like_prefix_wildcard.len(), 1);
        assert_eq!(f.like_prefix_wildcard[0].column, "email");
    }

    #[test]
    fn test_like_trailing_wildcard_is_fine() {
        let f = facts("SELECT id FROM users WHERE email LIKE 'al%'");
        assert!(f.like_prefix_wildcard.is_empty());
        assert!(f.filtered_tables.contains("users"));
    }

    #[test]
    fn test_underscore_prefix_counts_as_wildcard() {
        let f = facts("SELECT id FROM users WHERE name LIKE '_lice'");
        assert_eq!(f.like_prefix_wildcard.len(), 1);
    }
}

mod subquery_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_correlated_subquery_detected() {
        let f = facts(
            "SELECT u.id, (SELECT COUNT(*) FROM orders o WHERE o.user_id = u.id) FROM users u",
        );
        assert!(f.has_correlated_subquery);
        assert!(f.referenced_tables.contains("orders"));
    }

    #[test]
    fn test_uncorrelated_subquery_not_flagged() {
        let f = facts("SELECT id FROM users WHERE id IN (SELECT user_id FROM orders)");
        assert!(!f.has_correlated_subquery);
        assert!(f.referenced_tables.contains("orders"));
    }

    #[test]
    fn test_correlated_exists() {
        let f = facts(
            "SELECT u.id FROM users u WHERE EXISTS (SELECT 1 FROM orders o WHERE o.user_id = u.id)",
        );
        assert!(f.has_correlated_subquery);
    }

    #[test]
    fn test_cte_is_not_a_base_table() {
        let f = facts(
            "WITH recent AS (SELECT * FROM orders WHERE created_at > '2024-01-01') \
             SELECT * FROM recent",
        );
        assert_eq!(f.referenced_tables, tables(&["orders"]));
        assert!(!f.joined_tables.contains("recent"));
    }

    #[test]
    fn test_derived_table_alias_is_opaque() {
        let f = facts("SELECT t.n FROM (SELECT COUNT(*) AS n FROM orders) t");
        assert_eq!(f.referenced_tables, tables(&["orders"]));
        // t.n cannot be attributed to a base table
        assert!(!f.consumed_tables.contains("t"));
    }
}

mod statement_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_non_query_statement_yields_no_facts() {
        let parsed =
            ParsedQuery::parse("INSERT INTO users (id) VALUES (1)", SqlDialect::Postgres).unwrap();
        let f = classify(&parsed).unwrap();
        assert_eq!(f, QueryFacts::default());
    }

    #[test]
    fn test_union_branches_both_classified() {
        let f = facts("SELECT id FROM users UNION SELECT user_id FROM orders");
        assert_eq!(f.referenced_tables, tables(&["orders", "users"]));
    }

    #[test]
    fn test_undeclared_table_is_still_referenced() {
        // Schema knowledge is not the classifier's concern
        let f = facts("SELECT * FROM ghost_table WHERE x = 1");
        assert_eq!(f.referenced_tables, tables(&["ghost_table"]));
    }
}
