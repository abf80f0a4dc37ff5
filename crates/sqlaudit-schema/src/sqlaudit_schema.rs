//! SQLAUDIT Schema - Catalog model built from declared DDL
//!
//! This crate turns CREATE TABLE / CREATE INDEX statements into an
//! immutable `SchemaModel`: tables, columns, existing indexes, and
//! `@rows=N` row-count hints. Construction is best-effort; statements
//! that fail to parse become warnings, never failures.

mod builder;
mod model;

pub use builder::*;
pub use model::*;
