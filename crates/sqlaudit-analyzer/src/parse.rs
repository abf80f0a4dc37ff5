//! Thin facade over the external SQL parser
//!
//! The engine never owns a grammar; `sqlparser` supplies the AST and this
//! wrapper pairs it with the dialect tag and the original text.

use sqlparser::ast::Statement;

use sqlaudit_core::{Result, SqlDialect};

/// Maximum snippet length attached to issues
const SNIPPET_LEN: usize = 200;

/// A parsed query plus its dialect tag. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub statements: Vec<Statement>,
    pub sql: String,
    pub dialect: SqlDialect,
}

impl ParsedQuery {
    /// Parses a single query string.
    ///
    /// Failures are per-query; the aggregator converts them into a
    /// `PARSE_ERROR` issue rather than failing the batch.
    pub fn parse(sql: &str, dialect: SqlDialect) -> Result<Self> {
        let statements = dialect.parse_sql(sql)?;
        Ok(Self {
            statements,
            sql: sql.to_string(),
            dialect,
        })
    }

    /// First 200 characters of the query, for issue snippets
    pub fn snippet(&self) -> String {
        snippet_of(&self.sql)
    }
}

/// Truncates SQL text for display in an issue
pub fn snippet_of(sql: &str) -> String {
    sql.chars().take(SNIPPET_LEN).collect()
}
