//! Schema catalog types
//!
//! A `SchemaModel` is built once per audit request and is read-only for
//! the remainder; every analysis component shares it by reference.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column declared in a CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type, uninterpreted beyond presence
    pub data_type: String,
    pub nullable: bool,
}

/// An index already declared in the schema
///
/// Two `IndexDef`s are equal iff their column sequences are identical;
/// `is_prefix_of` is the weaker relation used to dedup suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Ordered column names, leftmost first
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDef {
    pub fn new(columns: Vec<String>, unique: bool) -> Self {
        Self { columns, unique }
    }

    /// Returns true if `self`'s column sequence is a prefix of (or equal
    /// to) `other`'s. Comparison is case-insensitive like the rest of
    /// the catalog.
    pub fn is_prefix_of(&self, other: &[String]) -> bool {
        self.columns.len() <= other.len()
            && self
                .columns
                .iter()
                .zip(other)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Returns true if this index starts with the given column.
    pub fn leads_with(&self, column: &str) -> bool {
        self.columns
            .first()
            .is_some_and(|c| c.eq_ignore_ascii_case(column))
    }
}

/// A foreign-key reference that did not resolve to a declared table.
/// Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRef {
    /// Table declaring the foreign key
    pub table: String,
    /// Referenced table that is not in the schema
    pub references: String,
}

/// Table declared in the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnInfo>,
    /// Cardinality hint from a `-- @rows=N` annotation
    pub row_count_hint: Option<u64>,
    /// Indexes already declared (including PRIMARY KEY / UNIQUE)
    pub existing_indexes: Vec<IndexDef>,
}

impl TableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            row_count_hint: None,
            existing_indexes: Vec::new(),
        }
    }

    /// Row-count hint with the unknown/small sentinel applied
    pub fn row_hint(&self) -> u64 {
        self.row_count_hint.unwrap_or(0)
    }

    /// Returns true if an existing index starts with the given column
    pub fn has_index_leading_with(&self, column: &str) -> bool {
        self.existing_indexes.iter().any(|i| i.leads_with(column))
    }

    /// Returns true if an existing index covers the given column sequence
    /// as a prefix (the sequence is a prefix of, or equal to, the index).
    pub fn has_index_covering(&self, columns: &[String]) -> bool {
        self.existing_indexes.iter().any(|idx| {
            columns.len() <= idx.columns.len()
                && columns
                    .iter()
                    .zip(&idx.columns)
                    .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
    }
}

/// Catalog of all declared tables for one audit request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Tables keyed by lowercased name, insertion order preserved
    pub tables: IndexMap<String, TableInfo>,
    /// Non-fatal problems encountered during construction
    pub warnings: Vec<String>,
    /// Foreign keys pointing at undeclared tables
    pub unresolved_refs: Vec<UnresolvedRef>,
}

impl SchemaModel {
    /// Case-insensitive table lookup
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(&name.to_lowercase())
    }

    /// Row-count hint for a table; undeclared tables get the
    /// unknown/small sentinel rather than an error.
    pub fn row_hint(&self, name: &str) -> u64 {
        self.table(name).map(|t| t.row_hint()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
