//! Lowering of [`QueryComponent`] trees.

use super::emit::Emitter;
use crate::component::{FragmentKind, Join, Order, QueryComponent, Select};
use crate::error::{CompileError, CompileResult};

const FROM_TARGETS: &[FragmentKind] = &[FragmentKind::Table, FragmentKind::Subquery];
const SELECT_ITEMS: &[FragmentKind] = &[
    FragmentKind::Column,
    FragmentKind::Subquery,
    FragmentKind::Condition,
];
const PREDICATES: &[FragmentKind] = &[FragmentKind::Condition];
const JOIN_KEYS: &[FragmentKind] = &[FragmentKind::Column];
const ORDER_KEYS: &[FragmentKind] = &[
    FragmentKind::Column,
    FragmentKind::Subquery,
    FragmentKind::Condition,
];

impl Emitter<'_> {
    pub(super) fn component(&mut self, component: &QueryComponent) -> CompileResult<()> {
        self.descend()?;
        match component {
            QueryComponent::Sql(sql) => self.push(sql.as_str()),
            QueryComponent::Parts(parts) => {
                for part in parts {
                    self.component(part)?;
                }
            }
            QueryComponent::Select(select) => self.select(select)?,
            QueryComponent::Column { name, table, alias } => {
                match table {
                    Some(table) => self.push(format!("{table}.{name}")),
                    None => self.push(name.as_str()),
                }
                self.alias(alias.as_deref());
            }
            QueryComponent::Table { name, alias } => {
                self.push(name.as_str());
                self.alias(alias.as_deref());
            }
            QueryComponent::Subquery { query, alias } => {
                self.push("(");
                self.component(query)?;
                self.push(")");
                self.alias(alias.as_deref());
            }
            QueryComponent::GroupBy(fields) => self.group_by(fields)?,
            QueryComponent::Join(join) => self.join(join)?,
            QueryComponent::Condition(condition) => self.condition(condition)?,
            QueryComponent::Limit(count) => self.push(format!("LIMIT {count}")),
            QueryComponent::Offset(count) => self.push(format!("OFFSET {count}")),
        }
        self.ascend();
        Ok(())
    }

    /// SELECT, FROM, JOIN*, WHERE, GROUP BY, HAVING, ORDER BY, LIMIT, OFFSET.
    fn select(&mut self, select: &Select) -> CompileResult<()> {
        if select.fields.is_empty() {
            return Err(CompileError::EmptyList("SELECT"));
        }
        self.push("SELECT");
        self.separated(&select.fields, ",", |e, field| {
            e.expect(field, "a SELECT list item", SELECT_ITEMS)?;
            e.component(field)
        })?;

        self.expect(&select.from, "a FROM target", FROM_TARGETS)?;
        self.push("FROM");
        self.component(&select.from)?;

        for join in &select.joins {
            self.expect(join, "a JOIN clause", &[FragmentKind::Join])?;
            self.component(join)?;
        }

        if let Some(filter) = &select.filter {
            self.expect(filter, "a WHERE filter", PREDICATES)?;
            self.push("WHERE");
            self.component(filter)?;
        }

        if let Some(group_by) = &select.group_by {
            self.expect(group_by, "a GROUP BY clause", &[FragmentKind::GroupBy])?;
            self.component(group_by)?;
        }

        if let Some(having) = &select.having {
            self.expect(having, "a HAVING filter", PREDICATES)?;
            self.push("HAVING");
            self.component(having)?;
        }

        if !select.order_by.is_empty() {
            self.push("ORDER BY");
            self.separated(&select.order_by, ",", Self::order)?;
        }

        if let Some(limit) = select.limit {
            self.push(format!("LIMIT {limit}"));
        }
        if let Some(offset) = select.offset {
            self.push(format!("OFFSET {offset}"));
        }
        Ok(())
    }

    fn group_by(&mut self, fields: &[QueryComponent]) -> CompileResult<()> {
        if fields.is_empty() {
            return Err(CompileError::EmptyList("GROUP BY"));
        }
        self.push("GROUP BY");
        self.separated(fields, ",", |e, field| {
            e.expect(field, "a GROUP BY item", &[FragmentKind::Column])?;
            e.component(field)
        })
    }

    fn join(&mut self, join: &Join) -> CompileResult<()> {
        self.expect(&join.target, "a JOIN target", FROM_TARGETS)?;
        self.expect(&join.left_key, "a JOIN key", JOIN_KEYS)?;
        self.expect(&join.right_key, "a JOIN key", JOIN_KEYS)?;

        for kind in &join.kinds {
            self.push(kind.keyword());
        }
        self.push("JOIN");
        self.component(&join.target)?;
        self.push("ON");
        self.component(&join.left_key)?;
        self.push("=");
        self.component(&join.right_key)
    }

    fn order(&mut self, order: &Order) -> CompileResult<()> {
        let (key, direction) = match order {
            Order::Asc(key) => (key, "ASC"),
            Order::Desc(key) => (key, "DESC"),
        };
        self.expect(key, "an ORDER BY key", ORDER_KEYS)?;
        self.component(key)?;
        self.push(direction);
        Ok(())
    }
}
