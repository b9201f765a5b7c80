//! # sqltree
//!
//! A compiler from strongly-typed SQL query trees to SQL tokens plus bound
//! parameters.
//!
//! ## Features
//!
//! - **Closed tree types**: [`QueryComponent`] and [`Condition`] are plain enums,
//!   so every fragment shape is handled by an exhaustive match
//! - **Parameter-safe**: literal values become placeholders; values are returned
//!   separately, in placeholder order
//! - **Fixed clause order**: `SELECT, FROM, JOIN*, WHERE, GROUP BY, HAVING,
//!   ORDER BY, LIMIT, OFFSET`, whatever order the tree was assembled in
//! - **Explicit failures**: misplaced fragments and empty groups are errors,
//!   never silently dropped output
//!
//! ## Trust boundary
//!
//! Identifiers and [`QueryComponent::Sql`] fragments are emitted verbatim.
//! Only values routed through condition operands are bound as parameters.
//!
//! ## Example
//!
//! ```
//! use sqltree::{Condition, DeclaredField, Join, Order, QueryComponent, Select, compile};
//!
//! let user_id = DeclaredField::qualified("users", "id");
//! let name = DeclaredField::qualified("users", "name");
//! let order_user = DeclaredField::qualified("orders", "user_id");
//!
//! let select = Select::new(vec![user_id.column(false), name.column(false)], QueryComponent::table("users"))
//!     .with_join(Join::left(QueryComponent::table("orders"), &user_id, &order_user))
//!     .with_filter(Condition::and(vec![
//!         name.like("a%"),
//!         Condition::or(vec![user_id.equals(1), user_id.equals(2)]),
//!     ]))
//!     .with_order(Order::asc(&name))
//!     .with_limit(10);
//!
//! let compiled = compile(&select.into())?;
//! assert_eq!(
//!     compiled.to_sql(),
//!     "SELECT users.id , users.name FROM users LEFT JOIN orders ON users.id = orders.user_id \
//!      WHERE ( users.name LIKE ? AND ( users.id = ? OR users.id = ? ) ) \
//!      ORDER BY users.name ASC LIMIT 10"
//! );
//! assert_eq!(compiled.params().len(), 3);
//! # Ok::<(), sqltree::CompileError>(())
//! ```

pub mod compiler;
pub mod component;
pub mod condition;
pub mod error;
pub mod field;
pub mod param;
pub mod prelude;
pub mod value;

pub use compiler::{
    CompiledQuery, Compiler, CompilerConfig, PlaceholderStyle, compile, compile_condition,
};
pub use component::{FragmentKind, Join, JoinKind, Order, QueryComponent, Select};
pub use condition::{Condition, Operand};
pub use error::{CompileError, CompileResult};
pub use field::{DeclaredField, Table, select_list};
pub use param::ParamList;
pub use value::SqlValue;
