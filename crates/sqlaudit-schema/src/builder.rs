//! Best-effort schema model construction from DDL text
//!
//! The DDL is split into individual statements so that one unparsable
//! statement only costs a warning instead of the whole model. Row-count
//! hints come from `-- @rows=N` comments attached to CREATE TABLE
//! statements.

use once_cell::sync::Lazy;
use regex::Regex;
use sqlparser::ast::{ColumnOption, ObjectName, Statement, TableConstraint};
use tracing::{debug, warn};

use sqlaudit_core::{Result, SqlDialect};

use crate::{ColumnInfo, IndexDef, SchemaModel, TableInfo, UnresolvedRef};

static ROWS_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)--\s*@rows\s*=\s*(\d+)").expect("valid regex"));
static CREATE_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)create\s+table\s+(?:if\s+not\s+exists\s+)?["'`]?([A-Za-z_][A-Za-z0-9_]*)"#)
        .expect("valid regex")
});

impl SchemaModel {
    /// Builds a schema model from raw DDL.
    ///
    /// Unknown or unparsable statements are skipped and recorded as
    /// warnings; foreign keys referencing undeclared tables are recorded
    /// as unresolved. This never fails on malformed schema input.
    pub fn from_ddl(ddl: &str, dialect: SqlDialect) -> Result<SchemaModel> {
        let mut model = SchemaModel::default();
        // (declaring table, referenced table) pairs, resolved at the end
        // once every table has been seen
        let mut foreign_refs: Vec<(String, String)> = Vec::new();

        for statement_sql in split_statements(ddl) {
            let statements = match dialect.parse_sql(&statement_sql) {
                Ok(stmts) => stmts,
                Err(e) => {
                    warn!(error = %e, "skipping unparsable DDL statement");
                    model
                        .warnings
                        .push(format!("Skipped unparsable statement: {e}"));
                    continue;
                }
            };

            for statement in statements {
                match statement {
                    Statement::CreateTable(create) => {
                        let table = build_table(&create, &mut foreign_refs);
                        debug!(table = %table.name, columns = table.columns.len(), "declared table");
                        model.tables.insert(table.name.to_lowercase(), table);
                    }
                    Statement::CreateIndex(create) => {
                        attach_index(&mut model, &create);
                    }
                    other => {
                        debug!(statement = %statement_kind(&other), "ignoring non-DDL statement");
                    }
                }
            }
        }

        apply_row_hints(&mut model, ddl);

        for (table, referenced) in foreign_refs {
            if model.table(&referenced).is_none() {
                model.unresolved_refs.push(UnresolvedRef {
                    table,
                    references: referenced,
                });
            }
        }

        Ok(model)
    }
}

fn build_table(
    create: &sqlparser::ast::CreateTable,
    foreign_refs: &mut Vec<(String, String)>,
) -> TableInfo {
    let name = object_name(&create.name);
    let mut table = TableInfo::new(name.clone());

    for column in &create.columns {
        let mut nullable = true;
        for opt in &column.options {
            match &opt.option {
                ColumnOption::NotNull => nullable = false,
                ColumnOption::Unique { is_primary, .. } => {
                    if *is_primary {
                        nullable = false;
                    }
                    table
                        .existing_indexes
                        .push(IndexDef::new(vec![column.name.value.clone()], true));
                }
                ColumnOption::ForeignKey { foreign_table, .. } => {
                    foreign_refs.push((name.clone(), object_name(foreign_table)));
                }
                _ => {}
            }
        }
        table.columns.push(ColumnInfo {
            name: column.name.value.clone(),
            data_type: column.data_type.to_string(),
            nullable,
        });
    }

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey { columns, .. }
            | TableConstraint::Unique { columns, .. } => {
                let cols: Vec<String> = columns.iter().map(|c| c.value.clone()).collect();
                if !cols.is_empty() {
                    table.existing_indexes.push(IndexDef::new(cols, true));
                }
            }
            TableConstraint::ForeignKey { foreign_table, .. } => {
                foreign_refs.push((name.clone(), object_name(foreign_table)));
            }
            _ => {}
        }
    }

    table
}

fn attach_index(model: &mut SchemaModel, create: &sqlparser::ast::CreateIndex) {
    let table_name = object_name(&create.table_name);
    let columns: Vec<String> = create
        .columns
        .iter()
        .filter_map(|order_expr| match &order_expr.expr {
            sqlparser::ast::Expr::Identifier(ident) => Some(ident.value.clone()),
            sqlparser::ast::Expr::CompoundIdentifier(parts) => {
                parts.last().map(|i| i.value.clone())
            }
            // Expression indexes (e.g. LOWER(email)) have no plain column
            _ => None,
        })
        .collect();

    if columns.is_empty() {
        return;
    }

    match model.tables.get_mut(&table_name.to_lowercase()) {
        Some(table) => {
            table
                .existing_indexes
                .push(IndexDef::new(columns, create.unique));
        }
        None => {
            warn!(table = %table_name, "CREATE INDEX references undeclared table");
            model.warnings.push(format!(
                "CREATE INDEX references undeclared table '{table_name}'"
            ));
        }
    }
}

/// Binds `-- @rows=N` annotations to the nearest CREATE TABLE, checking
/// the same line first and then scanning back to the start of the
/// enclosing statement. A semicolon line above ends an earlier statement
/// and bounds the scan, so a hint never binds across statements.
fn apply_row_hints(model: &mut SchemaModel, ddl: &str) {
    let lines: Vec<&str> = ddl.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let Some(hint) = ROWS_HINT.captures(line) else {
            continue;
        };
        let Ok(rows) = hint[1].parse::<u64>() else {
            continue;
        };

        if bind_hint(model, line, rows) {
            continue;
        }
        for candidate in lines[..i].iter().rev() {
            if bind_hint(model, candidate, rows) {
                break;
            }
            if candidate.contains(';') {
                break;
            }
        }
    }
}

/// Applies a row hint when the line declares a table. Returns true when
/// a CREATE TABLE was found, even for a table the model does not know.
fn bind_hint(model: &mut SchemaModel, line: &str, rows: u64) -> bool {
    let Some(cap) = CREATE_TABLE.captures(line) else {
        return false;
    };
    if let Some(table) = model.tables.get_mut(&cap[1].to_lowercase()) {
        table.row_count_hint = Some(rows);
    }
    true
}

fn object_name(name: &ObjectName) -> String {
    name.0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn statement_kind(statement: &Statement) -> &'static str {
    match statement {
        Statement::Query(_) => "query",
        Statement::Insert(_) => "insert",
        Statement::AlterTable { .. } => "alter-table",
        Statement::CreateView { .. } => "create-view",
        _ => "other",
    }
}

/// Splits DDL text into statements at top-level semicolons, respecting
/// string literals, quoted identifiers, and both comment styles.
pub fn split_statements(ddl: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = ddl.chars().peekable();
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(c) = chars.next() {
        if in_line_comment {
            current.push(c);
            if c == '\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_block_comment {
            current.push(c);
            if c == '*' && chars.peek() == Some(&'/') {
                if let Some(slash) = chars.next() {
                    current.push(slash);
                }
                in_block_comment = false;
            }
            continue;
        }
        if let Some(quote) = in_string {
            current.push(c);
            if c == quote {
                in_string = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                in_string = Some(c);
                current.push(c);
            }
            '-' if chars.peek() == Some(&'-') => {
                in_line_comment = true;
                current.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                in_block_comment = true;
                current.push(c);
            }
            ';' => {
                if !current.trim().is_empty() {
                    statements.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.trim().is_empty() {
        statements.push(current.trim().to_string());
    }
    statements
}

#[cfg(test)]
mod tests;
