//! Convenient imports for typical `sqltree` usage.
//!
//! ```ignore
//! use sqltree::prelude::*;
//! ```

pub use crate::{
    CompileError, CompileResult, CompiledQuery, Compiler, CompilerConfig, Condition,
    DeclaredField, Join, JoinKind, Operand, Order, PlaceholderStyle, QueryComponent, Select,
    SqlValue, Table, compile, compile_condition, select_list,
};
