//! Single-pass query classification
//!
//! One depth-first traversal of the AST produces flat `QueryFacts`; every
//! downstream component (rules, cost, advisor) reads those facts instead
//! of re-walking the tree. Facts are attributed to base tables only: CTE
//! and derived-table aliases never show up as tables, so index and join
//! analysis always resolves to something physical.

use std::collections::{BTreeSet, HashMap, HashSet};

use sqlparser::ast::{
    BinaryOperator, Expr, FunctionArg, FunctionArgExpr, FunctionArguments, GroupByExpr,
    JoinConstraint, JoinOperator, ObjectName, OrderBy, Query, Select, SelectItem, SetExpr,
    Statement, TableFactor, TableWithJoins, UnaryOperator, Value,
};

use sqlaudit_core::Result;

use crate::parse::ParsedQuery;

/// Aggregate function names recognized for `has_aggregate`
const AGGREGATE_FUNCTIONS: &[&str] = &[
    "count",
    "sum",
    "avg",
    "min",
    "max",
    "total",
    "group_concat",
    "string_agg",
    "array_agg",
];

/// A column reference attributed to a base table where resolvable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Base table (lowercased); `None` when the column could not be
    /// attributed (ambiguous scope, CTE output, unaliased expression)
    pub table: Option<String>,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: Option<String>, column: impl Into<String>) -> Self {
        Self {
            table,
            column: column.into(),
        }
    }

    /// `table.column` or bare `column` display form
    pub fn qualified(&self) -> String {
        match &self.table {
            Some(t) => format!("{t}.{}", self.column),
            None => self.column.clone(),
        }
    }

    /// Returns true if this reference is attributed to the given table
    pub fn on_table(&self, table: &str) -> bool {
        self.table.as_deref().is_some_and(|t| t.eq_ignore_ascii_case(table))
    }
}

/// Equality or range predicate on a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub table: Option<String>,
    pub column: String,
    /// The column is wrapped in a function/cast, so an index cannot seek it
    pub non_sargable: bool,
}

impl Predicate {
    pub fn column_ref(&self) -> ColumnRef {
        ColumnRef::new(self.table.clone(), self.column.clone())
    }
}

/// Join classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Outer,
    /// Comma-join or JOIN with no ON/USING clause
    Cross,
}

/// One edge of the join graph. Plain pairs, no graph structure: the
/// advisor only needs edge membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinEdge {
    pub left: Option<ColumnRef>,
    pub right: Option<ColumnRef>,
    pub kind: JoinKind,
}

impl JoinEdge {
    pub fn is_cross(&self) -> bool {
        self.kind == JoinKind::Cross
    }

    /// Columns of this edge attributed to the given table
    pub fn columns_on(&self, table: &str) -> impl Iterator<Item = &ColumnRef> {
        self.left
            .iter()
            .chain(self.right.iter())
            .filter(move |c| c.on_table(table))
    }
}

/// Normalized facts extracted from one query, immutable once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFacts {
    /// Base tables touched anywhere in the query (lowercased)
    pub referenced_tables: BTreeSet<String>,
    /// `col = ...` predicates in source order
    pub equality_predicates: Vec<Predicate>,
    /// `<, >, <=, >=, BETWEEN` predicates in source order
    pub range_predicates: Vec<Predicate>,
    pub join_edges: Vec<JoinEdge>,
    pub order_by_columns: Vec<ColumnRef>,
    pub group_by_columns: Vec<ColumnRef>,
    pub projects_star: bool,
    pub has_distinct: bool,
    pub has_aggregate: bool,
    pub has_correlated_subquery: bool,
    /// Columns matched with a LIKE pattern starting with `%` or `_`
    pub like_prefix_wildcard: Vec<ColumnRef>,
    /// Tables brought in via an explicit JOIN clause
    pub joined_tables: BTreeSet<String>,
    /// Tables contributing a column to projection, predicates, sort, or
    /// grouping (join constraints excluded - that is what R002 keys on)
    pub consumed_tables: BTreeSet<String>,
    /// Tables with at least one equality/range/LIKE predicate attributed
    pub filtered_tables: BTreeSet<String>,
}

impl QueryFacts {
    pub fn has_cross_join(&self) -> bool {
        self.join_edges.iter().any(|e| e.is_cross())
    }

    pub fn has_non_sargable_predicate(&self) -> bool {
        self.equality_predicates
            .iter()
            .chain(&self.range_predicates)
            .any(|p| p.non_sargable)
    }

    /// Returns true if the table has any filter predicate applied
    pub fn is_filtered(&self, table: &str) -> bool {
        self.filtered_tables.contains(&table.to_lowercase())
    }
}

/// Classifies every statement of a parsed query into one `QueryFacts`.
pub fn classify(parsed: &ParsedQuery) -> Result<QueryFacts> {
    let mut classifier = Classifier::default();
    for statement in &parsed.statements {
        if let Statement::Query(query) = statement {
            classifier.walk_query(query);
        }
    }
    Ok(classifier.facts)
}

/// One name-resolution scope (a SELECT's FROM clause)
#[derive(Debug, Default)]
struct Scope {
    /// alias or bare table name (lowercased) -> base table, or `None`
    /// when the name refers to a CTE or derived table
    aliases: HashMap<String, Option<String>>,
    /// Distinct base tables registered in this scope
    base_tables: Vec<String>,
}

#[derive(Debug, Default)]
struct Classifier {
    facts: QueryFacts,
    /// CTE names visible to the query (lowercased)
    cte_names: HashSet<String>,
    scopes: Vec<Scope>,
    /// Scope-stack depth at each subquery entry; a qualified column that
    /// resolves below the last boundary is a correlated reference
    subquery_boundaries: Vec<usize>,
}

impl Classifier {
    fn walk_query(&mut self, query: &Query) {
        if let Some(with) = &query.with {
            for cte in &with.cte_tables {
                self.cte_names.insert(cte.alias.name.value.to_lowercase());
                self.walk_query(&cte.query);
            }
        }
        self.walk_set_expr(query.body.as_ref(), query.order_by.as_ref());
    }

    fn walk_set_expr(&mut self, body: &SetExpr, order_by: Option<&OrderBy>) {
        match body {
            SetExpr::Select(select) => self.walk_select(select, order_by),
            SetExpr::Query(query) => self.walk_query(query),
            SetExpr::SetOperation { left, right, .. } => {
                self.walk_set_expr(left, order_by);
                self.walk_set_expr(right, None);
            }
            _ => {}
        }
    }

    fn walk_select(&mut self, select: &Select, order_by: Option<&OrderBy>) {
        let mut scope = Scope::default();
        for table_with_joins in &select.from {
            self.register_from_item(table_with_joins, &mut scope);
        }
        self.scopes.push(scope);

        // Comma-joins: every FROM item past the first is a cartesian edge
        for _ in 1..select.from.len() {
            self.facts.join_edges.push(JoinEdge {
                left: None,
                right: None,
                kind: JoinKind::Cross,
            });
        }

        for table_with_joins in &select.from {
            for join in &table_with_joins.joins {
                self.classify_join(&join.join_operator, base_table_of(&join.relation));
            }
        }

        if select.distinct.is_some() {
            self.facts.has_distinct = true;
        }

        for item in &select.projection {
            match item {
                SelectItem::Wildcard(_) => {
                    self.facts.projects_star = true;
                    let tables: Vec<String> = self
                        .scopes
                        .last()
                        .map(|s| s.base_tables.clone())
                        .unwrap_or_default();
                    self.facts.consumed_tables.extend(tables);
                }
                SelectItem::QualifiedWildcard(name, _) => {
                    self.facts.projects_star = true;
                    if let Some(qualifier) = name.0.last() {
                        let resolved = self.resolve_qualifier(&qualifier.value);
                        if let Some(table) = resolved {
                            self.facts.consumed_tables.insert(table);
                        }
                    }
                }
                SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                    self.walk_value_expr(expr);
                }
            }
        }

        if let Some(selection) = &select.selection {
            self.walk_predicate(selection);
        }

        if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
            for expr in exprs {
                if let Some(col) = self.column_of(expr) {
                    self.consume(&col);
                    self.facts.group_by_columns.push(col);
                }
            }
        }

        if let Some(having) = &select.having {
            self.walk_predicate(having);
        }

        if let Some(order_by) = order_by {
            for order_expr in &order_by.exprs {
                if let Some(col) = self.column_of(&order_expr.expr) {
                    self.consume(&col);
                    self.facts.order_by_columns.push(col);
                }
            }
        }

        self.scopes.pop();
    }

    /// Registers every table factor of a FROM item into the scope being
    /// built. Derived tables are walked immediately (they may be
    /// correlated) and contribute an opaque alias.
    fn register_from_item(&mut self, table_with_joins: &TableWithJoins, scope: &mut Scope) {
        self.register_table_factor(&table_with_joins.relation, scope);
        for join in &table_with_joins.joins {
            self.register_table_factor(&join.relation, scope);
        }
    }

    fn register_table_factor(&mut self, factor: &TableFactor, scope: &mut Scope) {
        match factor {
            TableFactor::Table { name, alias, .. } => {
                let table_name = object_name(name).to_lowercase();
                if self.cte_names.contains(&table_name) {
                    scope.aliases.insert(table_name.clone(), None);
                    if let Some(alias) = alias {
                        scope.aliases.insert(alias.name.value.to_lowercase(), None);
                    }
                } else {
                    self.facts.referenced_tables.insert(table_name.clone());
                    if !scope.base_tables.contains(&table_name) {
                        scope.base_tables.push(table_name.clone());
                    }
                    scope
                        .aliases
                        .insert(table_name.clone(), Some(table_name.clone()));
                    if let Some(alias) = alias {
                        scope
                            .aliases
                            .insert(alias.name.value.to_lowercase(), Some(table_name));
                    }
                }
            }
            TableFactor::Derived {
                subquery, alias, ..
            } => {
                self.walk_subquery(subquery);
                if let Some(alias) = alias {
                    scope.aliases.insert(alias.name.value.to_lowercase(), None);
                }
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => {
                self.register_from_item(table_with_joins, scope);
            }
            _ => {}
        }
    }

    fn classify_join(&mut self, operator: &JoinOperator, joined_table: Option<String>) {
        if let Some(table) = &joined_table {
            if !self.cte_names.contains(table) {
                self.facts.joined_tables.insert(table.clone());
            }
        }
        match operator {
            JoinOperator::Inner(constraint) => self.classify_constraint(constraint, JoinKind::Inner),
            JoinOperator::LeftOuter(constraint)
            | JoinOperator::RightOuter(constraint)
            | JoinOperator::FullOuter(constraint) => {
                self.classify_constraint(constraint, JoinKind::Outer)
            }
            JoinOperator::LeftSemi(constraint)
            | JoinOperator::RightSemi(constraint)
            | JoinOperator::LeftAnti(constraint)
            | JoinOperator::RightAnti(constraint) => {
                self.classify_constraint(constraint, JoinKind::Inner)
            }
            JoinOperator::CrossJoin => self.push_cross_edge(),
            _ => {}
        }
    }

    fn classify_constraint(&mut self, constraint: &JoinConstraint, kind: JoinKind) {
        match constraint {
            JoinConstraint::On(expr) => {
                let pairs = self.equality_pairs(expr);
                if pairs.is_empty() {
                    self.facts.join_edges.push(JoinEdge {
                        left: None,
                        right: None,
                        kind,
                    });
                } else {
                    for (left, right) in pairs {
                        self.facts.join_edges.push(JoinEdge {
                            left: Some(left),
                            right: Some(right),
                            kind,
                        });
                    }
                }
            }
            JoinConstraint::Using(columns) => {
                for ident in columns {
                    self.facts.join_edges.push(JoinEdge {
                        left: Some(ColumnRef::new(None, ident.value.clone())),
                        right: None,
                        kind,
                    });
                }
            }
            JoinConstraint::Natural => self.facts.join_edges.push(JoinEdge {
                left: None,
                right: None,
                kind,
            }),
            JoinConstraint::None => self.push_cross_edge(),
        }
    }

    fn push_cross_edge(&mut self) {
        self.facts.join_edges.push(JoinEdge {
            left: None,
            right: None,
            kind: JoinKind::Cross,
        });
    }

    /// Collects `col = col` pairs from a join constraint expression.
    fn equality_pairs(&mut self, expr: &Expr) -> Vec<(ColumnRef, ColumnRef)> {
        let mut pairs = Vec::new();
        self.collect_equality_pairs(expr, &mut pairs);
        pairs
    }

    fn collect_equality_pairs(&mut self, expr: &Expr, pairs: &mut Vec<(ColumnRef, ColumnRef)>) {
        match expr {
            Expr::BinaryOp { left, op, right } => match op {
                BinaryOperator::And | BinaryOperator::Or => {
                    self.collect_equality_pairs(left, pairs);
                    self.collect_equality_pairs(right, pairs);
                }
                BinaryOperator::Eq => {
                    if let (Some(l), Some(r)) = (self.column_of(left), self.column_of(right)) {
                        pairs.push((l, r));
                    }
                }
                _ => {}
            },
            Expr::Nested(inner) => self.collect_equality_pairs(inner, pairs),
            _ => {}
        }
    }

    /// Classifies a WHERE/HAVING expression tree into predicates.
    fn walk_predicate(&mut self, expr: &Expr) {
        match expr {
            Expr::BinaryOp { left, op, right } => match op {
                BinaryOperator::And | BinaryOperator::Or => {
                    self.walk_predicate(left);
                    self.walk_predicate(right);
                }
                BinaryOperator::Eq => self.record_comparison(left, right, Comparison::Equality),
                BinaryOperator::Lt
                | BinaryOperator::Gt
                | BinaryOperator::LtEq
                | BinaryOperator::GtEq => self.record_comparison(left, right, Comparison::Range),
                BinaryOperator::NotEq => self.record_comparison(left, right, Comparison::Other),
                _ => {
                    self.walk_value_expr(left);
                    self.walk_value_expr(right);
                }
            },
            Expr::Between {
                expr, low, high, ..
            } => {
                if let Some((col, non_sargable)) = self.sargable_column(expr) {
                    self.record_predicate(col, non_sargable, Comparison::Range);
                } else {
                    self.walk_value_expr(expr);
                }
                self.walk_value_expr(low);
                self.walk_value_expr(high);
            }
            Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
                self.record_like(expr, pattern);
            }
            Expr::InList { expr, list, .. } => {
                // IN over literals behaves like a multi-point equality
                if let Some((col, non_sargable)) = self.sargable_column(expr) {
                    self.record_predicate(col, non_sargable, Comparison::Equality);
                } else {
                    self.walk_value_expr(expr);
                }
                for item in list {
                    self.walk_value_expr(item);
                }
            }
            Expr::InSubquery { expr, subquery, .. } => {
                if let Some((col, non_sargable)) = self.sargable_column(expr) {
                    self.record_predicate(col, non_sargable, Comparison::Equality);
                }
                self.walk_subquery(subquery);
            }
            Expr::Exists { subquery, .. } => self.walk_subquery(subquery),
            Expr::Subquery(subquery) => self.walk_subquery(subquery),
            Expr::IsNull(inner) | Expr::IsNotNull(inner) => {
                if let Some((col, _)) = self.sargable_column(inner) {
                    self.mark_filtered(&col);
                    self.consume(&col);
                } else {
                    self.walk_value_expr(inner);
                }
            }
            Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr,
            } => self.walk_predicate(expr),
            Expr::Nested(inner) => self.walk_predicate(inner),
            other => self.walk_value_expr(other),
        }
    }

    fn record_comparison(&mut self, left: &Expr, right: &Expr, comparison: Comparison) {
        let left_col = self.sargable_column(left);
        let right_col = self.sargable_column(right);
        match (left_col, right_col) {
            (Some((col, non_sargable)), None) | (None, Some((col, non_sargable))) => {
                self.record_predicate(col, non_sargable, comparison);
                // Walk the value side for subqueries and nested columns
                match comparison {
                    Comparison::Equality | Comparison::Range | Comparison::Other => {
                        if self.sargable_column(left).is_some() {
                            self.walk_value_expr(right);
                        } else {
                            self.walk_value_expr(left);
                        }
                    }
                }
            }
            (Some((l, ns_l)), Some((r, ns_r))) => {
                // column = column: equality on both sides
                self.record_predicate(l, ns_l, comparison);
                self.record_predicate(r, ns_r, comparison);
            }
            (None, None) => {
                self.walk_value_expr(left);
                self.walk_value_expr(right);
            }
        }
    }

    fn record_predicate(&mut self, col: ColumnRef, non_sargable: bool, comparison: Comparison) {
        self.mark_filtered(&col);
        self.consume(&col);
        let predicate = Predicate {
            table: col.table,
            column: col.column,
            non_sargable,
        };
        match comparison {
            Comparison::Equality => self.facts.equality_predicates.push(predicate),
            Comparison::Range => self.facts.range_predicates.push(predicate),
            Comparison::Other => {}
        }
    }

    fn record_like(&mut self, expr: &Expr, pattern: &Expr) {
        let Some((col, _)) = self.sargable_column(expr) else {
            self.walk_value_expr(expr);
            return;
        };
        self.mark_filtered(&col);
        self.consume(&col);
        if let Expr::Value(Value::SingleQuotedString(s)) = pattern {
            if s.starts_with(['%', '_']) {
                self.facts.like_prefix_wildcard.push(col);
            }
        }
    }

    /// Extracts the column a comparison can seek on. A column wrapped in
    /// a function call or cast is returned with the non-sargable tag.
    fn sargable_column(&mut self, expr: &Expr) -> Option<(ColumnRef, bool)> {
        match expr {
            Expr::Identifier(_) | Expr::CompoundIdentifier(_) => {
                self.column_of(expr).map(|c| (c, false))
            }
            Expr::Nested(inner) => self.sargable_column(inner),
            Expr::Function(func) => {
                // Aggregates compare computed values, not stored columns
                let name = func.name.to_string().to_lowercase();
                if AGGREGATE_FUNCTIONS.contains(&name.as_str()) {
                    self.facts.has_aggregate = true;
                    return None;
                }
                first_column_arg(func).and_then(|e| self.column_of(&e)).map(|c| (c, true))
            }
            Expr::Cast { expr, .. } => self.column_of(expr).map(|c| (c, true)),
            _ => None,
        }
    }

    /// Walks a value-position expression: collects column consumption,
    /// aggregate usage, and nested subqueries.
    fn walk_value_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(_) | Expr::CompoundIdentifier(_) => {
                if let Some(col) = self.column_of(expr) {
                    self.consume(&col);
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                self.walk_value_expr(left);
                self.walk_value_expr(right);
            }
            Expr::UnaryOp { expr, .. } => self.walk_value_expr(expr),
            Expr::Nested(inner) => self.walk_value_expr(inner),
            Expr::Cast { expr, .. } => self.walk_value_expr(expr),
            Expr::IsNull(inner) | Expr::IsNotNull(inner) => self.walk_value_expr(inner),
            Expr::Function(func) => {
                let name = func.name.to_string().to_lowercase();
                if AGGREGATE_FUNCTIONS.contains(&name.as_str()) {
                    self.facts.has_aggregate = true;
                }
                match &func.args {
                    FunctionArguments::List(list) => {
                        for arg in &list.args {
                            let expr = match arg {
                                FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => Some(e),
                                FunctionArg::Named {
                                    arg: FunctionArgExpr::Expr(e),
                                    ..
                                } => Some(e),
                                _ => None,
                            };
                            if let Some(e) = expr {
                                self.walk_value_expr(e);
                            }
                        }
                    }
                    FunctionArguments::Subquery(subquery) => self.walk_subquery(subquery),
                    FunctionArguments::None => {}
                }
            }
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
                ..
            } => {
                if let Some(op) = operand {
                    self.walk_value_expr(op);
                }
                for cond in conditions {
                    self.walk_predicate(cond);
                }
                for result in results {
                    self.walk_value_expr(result);
                }
                if let Some(else_expr) = else_result {
                    self.walk_value_expr(else_expr);
                }
            }
            Expr::Between {
                expr, low, high, ..
            } => {
                self.walk_value_expr(expr);
                self.walk_value_expr(low);
                self.walk_value_expr(high);
            }
            Expr::InList { expr, list, .. } => {
                self.walk_value_expr(expr);
                for item in list {
                    self.walk_value_expr(item);
                }
            }
            Expr::InSubquery { expr, subquery, .. } => {
                self.walk_value_expr(expr);
                self.walk_subquery(subquery);
            }
            Expr::Exists { subquery, .. } | Expr::Subquery(subquery) => {
                self.walk_subquery(subquery);
            }
            Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
                self.walk_value_expr(expr);
                self.walk_value_expr(pattern);
            }
            _ => {}
        }
    }

    fn walk_subquery(&mut self, query: &Query) {
        self.subquery_boundaries.push(self.scopes.len());
        self.walk_query(query);
        self.subquery_boundaries.pop();
    }

    /// Resolves an identifier expression to an attributed column.
    fn column_of(&mut self, expr: &Expr) -> Option<ColumnRef> {
        match expr {
            Expr::Identifier(ident) => {
                let table = self.sole_table_in_scope();
                Some(ColumnRef::new(table, ident.value.clone()))
            }
            Expr::CompoundIdentifier(parts) if parts.len() >= 2 => {
                let column = parts.last()?.value.clone();
                let qualifier = parts[parts.len() - 2].value.to_lowercase();
                let table = self.resolve_qualifier_tracking_correlation(&qualifier);
                Some(ColumnRef::new(table, column))
            }
            Expr::Nested(inner) => self.column_of(inner),
            _ => None,
        }
    }

    /// Resolves a qualifier against the innermost scope that knows it,
    /// flagging correlation when the match lives outside the current
    /// subquery boundary.
    fn resolve_qualifier_tracking_correlation(&mut self, qualifier: &str) -> Option<String> {
        for (depth, scope) in self.scopes.iter().enumerate().rev() {
            if let Some(base) = scope.aliases.get(qualifier) {
                if let Some(boundary) = self.subquery_boundaries.last() {
                    if depth < *boundary {
                        self.facts.has_correlated_subquery = true;
                    }
                }
                return base.clone();
            }
        }
        None
    }

    /// Same resolution without correlation tracking (projection wildcards)
    fn resolve_qualifier(&self, qualifier: &str) -> Option<String> {
        let qualifier = qualifier.to_lowercase();
        for scope in self.scopes.iter().rev() {
            if let Some(base) = scope.aliases.get(&qualifier) {
                return base.clone();
            }
        }
        None
    }

    /// Unqualified columns attribute to the scope's only base table, if
    /// there is exactly one; otherwise they stay unattributed.
    fn sole_table_in_scope(&self) -> Option<String> {
        let scope = self.scopes.last()?;
        if scope.base_tables.len() == 1 {
            scope.base_tables.first().cloned()
        } else {
            None
        }
    }

    fn consume(&mut self, col: &ColumnRef) {
        if let Some(table) = &col.table {
            self.facts.consumed_tables.insert(table.clone());
        }
    }

    fn mark_filtered(&mut self, col: &ColumnRef) {
        if let Some(table) = &col.table {
            self.facts.filtered_tables.insert(table.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Equality,
    Range,
    /// Predicates that filter but are neither equality nor range (`<>`)
    Other,
}

fn base_table_of(factor: &TableFactor) -> Option<String> {
    match factor {
        TableFactor::Table { name, .. } => Some(object_name(name).to_lowercase()),
        _ => None,
    }
}

fn object_name(name: &ObjectName) -> String {
    name.0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// First column-shaped argument of a function call, for sargability
/// classification of e.g. `LOWER(email) = 'x'`.
fn first_column_arg(func: &sqlparser::ast::Function) -> Option<Expr> {
    if let FunctionArguments::List(list) = &func.args {
        for arg in &list.args {
            let expr = match arg {
                FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => e,
                FunctionArg::Named {
                    arg: FunctionArgExpr::Expr(e),
                    ..
                } => e,
                _ => continue,
            };
            if matches!(expr, Expr::Identifier(_) | Expr::CompoundIdentifier(_)) {
                return Some(expr.clone());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests;
