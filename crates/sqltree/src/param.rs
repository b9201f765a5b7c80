//! Bound parameter storage.

use crate::value::SqlValue;

#[cfg(feature = "postgres")]
use tokio_postgres::types::ToSql;

/// Parameters collected in traversal order, one per emitted placeholder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    params: Vec<SqlValue>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push(&mut self, value: SqlValue) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Borrow the collected values.
    pub fn values(&self) -> &[SqlValue] {
        &self.params
    }

    /// Take the collected values.
    pub fn into_values(self) -> Vec<SqlValue> {
        self.params
    }

    /// Get all parameters as references for tokio-postgres.
    #[cfg(feature = "postgres")]
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}
