//! SQLAUDIT Analyzer - Static analysis of SQL queries against a schema
//!
//! This crate provides the analysis engine:
//! - A single-pass classifier turning a query AST into flat `QueryFacts`
//! - A fixed catalog of issue detectors (R001-R010)
//! - A heuristic cost estimator (0-100 relative score)
//! - An index advisor deriving btree candidates from predicate structure
//! - The audit aggregator that runs the pipeline per query and merges
//!   results in input order
//!
//! No query is ever executed; everything operates on the parsed AST and
//! the immutable schema model.

pub mod advisor;
pub mod audit;
pub mod classify;
pub mod cost;
pub mod parse;
pub mod rules;

pub use advisor::*;
pub use audit::*;
pub use classify::*;
pub use cost::*;
pub use parse::*;
pub use rules::*;
