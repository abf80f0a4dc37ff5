//! Seam for the external rewrite collaborator
//!
//! The engine decides *whether* a rewrite is warranted for a query; the
//! rewrite text itself comes from outside (typically an LLM service). The
//! pipeline is complete without any generator installed.

use crate::{Issue, Rewrite};

/// Produces optimized query text for queries the engine flagged.
///
/// Implementations receive the original SQL plus the issues detected for
/// it and may decline by returning `None`.
pub trait RewriteGenerator: Send + Sync {
    fn propose_rewrite(&self, original: &str, issues: &[Issue]) -> Option<Rewrite>;
}

/// Issue codes that make a rewrite worth requesting.
///
/// Star projection, cartesian joins, non-sargable predicates, and
/// correlated subqueries all have well-known mechanical rewrites; the
/// remaining rules are index or schema concerns.
pub fn rewrite_warranted(code: &str) -> bool {
    matches!(code, "R001" | "R003" | "R004" | "R008")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_warranted_codes() {
        assert!(rewrite_warranted("R001"));
        assert!(rewrite_warranted("R003"));
        assert!(rewrite_warranted("R004"));
        assert!(rewrite_warranted("R008"));
        assert!(!rewrite_warranted("R002"));
        assert!(!rewrite_warranted("R006"));
        assert!(!rewrite_warranted("PARSE_ERROR"));
    }
}
