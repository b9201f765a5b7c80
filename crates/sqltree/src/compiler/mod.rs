//! Recursive-descent compiler from query trees to SQL tokens.
//!
//! Compilation walks the tree depth-first, left to right, and produces two
//! aligned outputs:
//! - an ordered token list (join with single spaces to get SQL text)
//! - the bound values, one per placeholder token, in the same order
//!
//! The compiler holds no state between calls and never mutates its input, so a
//! single [`Compiler`] can be shared across threads.
//!
//! # Example
//!
//! ```
//! use sqltree::{Compiler, CompilerConfig, DeclaredField, Join, PlaceholderStyle, QueryComponent, Select};
//!
//! let user_id = DeclaredField::qualified("users", "id");
//! let order_user = DeclaredField::qualified("orders", "user_id");
//!
//! let select = Select::new(
//!     vec![user_id.column(true), DeclaredField::qualified("orders", "total").column(true)],
//!     QueryComponent::table("users"),
//! )
//! .with_join(Join::left(QueryComponent::table("orders"), &user_id, &order_user))
//! .with_filter(user_id.equals(5));
//!
//! let compiler = Compiler::new(CompilerConfig::new().with_placeholder(PlaceholderStyle::Numbered));
//! let compiled = compiler.compile(&select.into()).unwrap();
//! assert_eq!(
//!     compiled.to_sql(),
//!     "SELECT users.id AS users__id , orders.total AS orders__total FROM users \
//!      LEFT JOIN orders ON users.id = orders.user_id WHERE users.id = $1"
//! );
//! ```

mod config;
mod emit;
mod fragment;
mod predicate;


pub use config::{CompilerConfig, DEFAULT_MAX_DEPTH, PlaceholderStyle};

use crate::component::QueryComponent;
use crate::condition::Condition;
use crate::error::CompileResult;
use crate::param::ParamList;
use crate::value::SqlValue;
use emit::Emitter;
use std::fmt;

#[cfg(feature = "postgres")]
use tokio_postgres::types::ToSql;

/// Output of a compilation: SQL tokens plus positionally aligned bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    tokens: Vec<String>,
    params: ParamList,
}

impl CompiledQuery {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &[SqlValue] {
        self.params.values()
    }

    /// SQL text: tokens joined by single spaces.
    pub fn to_sql(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<SqlValue>) {
        (self.tokens, self.params.into_values())
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// Query tree compiler.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Lower a fragment tree into tokens and bound values.
    pub fn compile(&self, component: &QueryComponent) -> CompileResult<CompiledQuery> {
        let mut emitter = Emitter::new(&self.config);
        emitter.component(component).inspect_err(|err| {
            tracing::debug!(
                target: "sqltree.compile",
                root = %component.kind(),
                error = %err,
                "query tree rejected"
            );
        })?;
        Ok(self.finish(emitter))
    }

    /// Lower a condition tree on its own (e.g. for a hand-written WHERE clause).
    pub fn compile_condition(&self, condition: &Condition) -> CompileResult<CompiledQuery> {
        let mut emitter = Emitter::new(&self.config);
        emitter.condition(condition).inspect_err(|err| {
            tracing::debug!(
                target: "sqltree.compile",
                root = "condition",
                error = %err,
                "condition tree rejected"
            );
        })?;
        Ok(self.finish(emitter))
    }

    fn finish(&self, emitter: Emitter<'_>) -> CompiledQuery {
        let compiled = emitter.finish();
        tracing::debug!(
            target: "sqltree.compile",
            tokens = compiled.tokens.len(),
            params = compiled.params.len(),
            placeholder = ?self.config.placeholder,
            "compiled query tree"
        );
        tracing::trace!(target: "sqltree.compile", sql = %compiled, "rendered sql");
        compiled
    }
}

/// Compile with the default configuration (`?` placeholders).
pub fn compile(component: &QueryComponent) -> CompileResult<CompiledQuery> {
    Compiler::default().compile(component)
}

/// Compile a condition with the default configuration.
pub fn compile_condition(condition: &Condition) -> CompileResult<CompiledQuery> {
    Compiler::default().compile_condition(condition)
}
