//! SQLAUDIT Core - Shared types for the static SQL analysis engine
//!
//! This crate provides the fundamental types that all other SQLAUDIT
//! crates depend on. It defines:
//!
//! - `SqlDialect` - The supported SQL dialects (postgres, sqlite)
//! - `AuditError` - The error taxonomy for the whole pipeline
//! - Report models like `Issue`, `IndexSuggestion`, `AuditReport`
//! - `AuditConfig` - Explicitly-passed, immutable analysis configuration
//! - `RewriteGenerator` - Seam for the external rewrite collaborator

mod config;
mod dialect;
mod error;
mod models;
mod rewrite;

pub use config::*;
pub use dialect::*;
pub use error::*;
pub use models::*;
pub use rewrite::*;
