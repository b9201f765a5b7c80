//! Query fragment tree.
//!
//! [`QueryComponent`] is the closed set of compilable pieces. Builders assemble
//! a tree bottom-up; the compiler only ever reads it.
//!
//! # Example
//!
//! ```
//! use sqltree::{DeclaredField, QueryComponent, Select, compile};
//!
//! let id = DeclaredField::qualified("users", "id");
//! let select = Select::new(vec![id.column(false)], QueryComponent::table("users"))
//!     .with_filter(id.equals(5))
//!     .with_limit(1);
//!
//! let compiled = compile(&select.into()).unwrap();
//! assert_eq!(compiled.to_sql(), "SELECT users.id FROM users WHERE users.id = ? LIMIT 1");
//! ```

use crate::condition::Condition;
use crate::field::DeclaredField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the query expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryComponent {
    /// Raw SQL, emitted verbatim.
    ///
    /// # Safety
    /// Nothing here is escaped or validated. Only values routed through
    /// condition operands are protected by parameter binding.
    Sql(String),
    /// Child fragments concatenated without separators.
    Parts(Vec<QueryComponent>),
    Select(Box<Select>),
    Column {
        name: String,
        #[serde(default)]
        table: Option<String>,
        #[serde(default)]
        alias: Option<String>,
    },
    Table {
        name: String,
        #[serde(default)]
        alias: Option<String>,
    },
    /// Always rendered inside parentheses.
    Subquery {
        query: Box<QueryComponent>,
        #[serde(default)]
        alias: Option<String>,
    },
    GroupBy(Vec<QueryComponent>),
    Join(Box<Join>),
    Condition(Condition),
    Limit(u64),
    Offset(u64),
}

impl QueryComponent {
    /// Raw SQL fragment.
    pub fn sql(sql: impl Into<String>) -> Self {
        Self::Sql(sql.into())
    }

    pub fn parts(parts: Vec<QueryComponent>) -> Self {
        Self::Parts(parts)
    }

    /// Column reference, optionally qualified by table.
    pub fn column(name: impl Into<String>, table: Option<&str>) -> Self {
        Self::Column {
            name: name.into(),
            table: table.map(str::to_string),
            alias: None,
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn table_as(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn subquery(query: impl Into<QueryComponent>, alias: Option<&str>) -> Self {
        Self::Subquery {
            query: Box::new(query.into()),
            alias: alias.map(str::to_string),
        }
    }

    pub fn group_by(fields: Vec<QueryComponent>) -> Self {
        Self::GroupBy(fields)
    }

    pub fn limit(count: u64) -> Self {
        Self::Limit(count)
    }

    pub fn offset(count: u64) -> Self {
        Self::Offset(count)
    }

    /// The variant tag, used in diagnostics.
    pub fn kind(&self) -> FragmentKind {
        match self {
            Self::Sql(_) => FragmentKind::Sql,
            Self::Parts(_) => FragmentKind::Parts,
            Self::Select(_) => FragmentKind::Select,
            Self::Column { .. } => FragmentKind::Column,
            Self::Table { .. } => FragmentKind::Table,
            Self::Subquery { .. } => FragmentKind::Subquery,
            Self::GroupBy(_) => FragmentKind::GroupBy,
            Self::Join(_) => FragmentKind::Join,
            Self::Condition(_) => FragmentKind::Condition,
            Self::Limit(_) => FragmentKind::Limit,
            Self::Offset(_) => FragmentKind::Offset,
        }
    }
}

impl From<Select> for QueryComponent {
    fn from(select: Select) -> Self {
        Self::Select(Box::new(select))
    }
}

impl From<Join> for QueryComponent {
    fn from(join: Join) -> Self {
        Self::Join(Box::new(join))
    }
}

impl From<Condition> for QueryComponent {
    fn from(condition: Condition) -> Self {
        Self::Condition(condition)
    }
}

impl From<DeclaredField> for QueryComponent {
    fn from(field: DeclaredField) -> Self {
        field.column(false)
    }
}

impl From<&DeclaredField> for QueryComponent {
    fn from(field: &DeclaredField) -> Self {
        field.column(false)
    }
}

/// Variant tag of a [`QueryComponent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Sql,
    Parts,
    Select,
    Column,
    Table,
    Subquery,
    GroupBy,
    Join,
    Condition,
    Limit,
    Offset,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sql => "sql",
            Self::Parts => "parts",
            Self::Select => "select",
            Self::Column => "column",
            Self::Table => "table",
            Self::Subquery => "subquery",
            Self::GroupBy => "group_by",
            Self::Join => "join",
            Self::Condition => "condition",
            Self::Limit => "limit",
            Self::Offset => "offset",
        };
        f.write_str(name)
    }
}

/// A SELECT statement.
///
/// Clause order in the output is fixed regardless of how the fields were set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub fields: Vec<QueryComponent>,
    /// `table`, `subquery` or raw `sql`.
    pub from: QueryComponent,
    /// `join` fragments, emitted in order.
    #[serde(default)]
    pub joins: Vec<QueryComponent>,
    #[serde(default)]
    pub filter: Option<QueryComponent>,
    #[serde(default)]
    pub order_by: Vec<Order>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub group_by: Option<QueryComponent>,
    #[serde(default)]
    pub having: Option<QueryComponent>,
}

impl Select {
    /// Create a SELECT over `from` with no optional clauses.
    pub fn new(fields: Vec<QueryComponent>, from: QueryComponent) -> Self {
        Self {
            fields,
            from,
            joins: Vec::new(),
            filter: None,
            order_by: Vec::new(),
            offset: None,
            limit: None,
            group_by: None,
            having: None,
        }
    }

    /// Append a JOIN clause.
    pub fn with_join(mut self, join: impl Into<QueryComponent>) -> Self {
        self.joins.push(join.into());
        self
    }

    /// Set the WHERE filter.
    pub fn with_filter(mut self, filter: impl Into<QueryComponent>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Append an ORDER BY entry.
    pub fn with_order(mut self, order: Order) -> Self {
        self.order_by.push(order);
        self
    }

    /// Set the GROUP BY field list.
    pub fn with_group_by(mut self, fields: Vec<QueryComponent>) -> Self {
        self.group_by = Some(QueryComponent::GroupBy(fields));
        self
    }

    /// Set the HAVING filter.
    pub fn with_having(mut self, having: impl Into<QueryComponent>) -> Self {
        self.having = Some(having.into());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// JOIN modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Outer,
    Right,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Outer => "OUTER",
            Self::Right => "RIGHT",
        }
    }
}

/// `<kinds> JOIN <target> ON <left_key> = <right_key>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    /// Emitted in order before `JOIN`, e.g. `[Left, Outer]` gives `LEFT OUTER JOIN`.
    #[serde(default)]
    pub kinds: Vec<JoinKind>,
    pub target: QueryComponent,
    pub left_key: QueryComponent,
    pub right_key: QueryComponent,
}

impl Join {
    pub fn new(
        kinds: Vec<JoinKind>,
        target: impl Into<QueryComponent>,
        left_key: impl Into<QueryComponent>,
        right_key: impl Into<QueryComponent>,
    ) -> Self {
        Self {
            kinds,
            target: target.into(),
            left_key: left_key.into(),
            right_key: right_key.into(),
        }
    }

    pub fn inner(
        target: impl Into<QueryComponent>,
        left_key: impl Into<QueryComponent>,
        right_key: impl Into<QueryComponent>,
    ) -> Self {
        Self::new(vec![JoinKind::Inner], target, left_key, right_key)
    }

    pub fn left(
        target: impl Into<QueryComponent>,
        left_key: impl Into<QueryComponent>,
        right_key: impl Into<QueryComponent>,
    ) -> Self {
        Self::new(vec![JoinKind::Left], target, left_key, right_key)
    }
}

/// ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Asc(QueryComponent),
    Desc(QueryComponent),
}

impl Order {
    pub fn asc(by: impl Into<QueryComponent>) -> Self {
        Self::Asc(by.into())
    }

    pub fn desc(by: impl Into<QueryComponent>) -> Self {
        Self::Desc(by.into())
    }
}
