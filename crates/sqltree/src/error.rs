//! Error types for sqltree

use crate::component::FragmentKind;
use thiserror::Error;

/// Result type alias for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors raised while lowering a query tree into tokens.
///
/// Compilation is pure: the same input fails the same way every time, so none
/// of these are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A fragment appeared in a position that cannot hold it
    /// (e.g. a `limit` fragment used as a WHERE filter).
    #[error("Malformed query tree: {found} fragment is not allowed as {context}")]
    Malformed {
        context: &'static str,
        found: FragmentKind,
    },

    /// `AND` / `OR` group without children.
    #[error("Empty {0} group")]
    EmptyGroup(&'static str),

    /// A clause that needs at least one entry (SELECT list, GROUP BY list).
    #[error("Empty {0} list")]
    EmptyList(&'static str),

    /// Tree nesting exceeded the configured limit.
    #[error("Query tree nesting exceeds the limit of {0}")]
    TooDeep(usize),
}

impl CompileError {
    /// Create a malformed-tree error
    pub fn malformed(context: &'static str, found: FragmentKind) -> Self {
        Self::Malformed { context, found }
    }

    /// Check if this is a malformed-tree error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
