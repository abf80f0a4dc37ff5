//! SQL dialect selection
//!
//! The engine analyzes PostgreSQL- and SQLite-flavored SQL. Parsing is
//! delegated to `sqlparser`; this module only picks the grammar and
//! rejects anything else before processing begins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlparser::ast::Statement;
use sqlparser::dialect::{PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use crate::{AuditError, Result};

/// SQL dialect tag carried alongside every parsed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Returns the dialect as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses SQL text with the matching `sqlparser` grammar.
    ///
    /// Errors are surfaced as `AuditError::Other`; callers attach the
    /// query index where one applies.
    pub fn parse_sql(&self, sql: &str) -> Result<Vec<Statement>> {
        let parsed = match self {
            Self::Postgres => Parser::parse_sql(&PostgreSqlDialect {}, sql),
            Self::Sqlite => Parser::parse_sql(&SQLiteDialect {}, sql),
        };
        parsed.map_err(|e| AuditError::Other(e.to_string()))
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(AuditError::UnsupportedDialect(other.to_string())),
        }
    }
}
