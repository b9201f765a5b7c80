//! Column references with table qualification and aliasing.
//!
//! Names are taken verbatim. No identifier validation or quoting happens here;
//! callers that accept identifiers from untrusted input must validate them
//! before building a tree.

use crate::component::QueryComponent;
use crate::condition::{Condition, Operand};
use crate::value::SqlValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A column, optionally owned by a table.
///
/// Two fields are equal when their qualified names are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredField {
    name: String,
    #[serde(default)]
    table: Option<String>,
}

impl DeclaredField {
    /// Unqualified field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
        }
    }

    /// Field owned by `table`.
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: Some(table.into()),
        }
    }

    /// Same field attached to another table.
    pub fn with_table(&self, table: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            table: Some(table.into()),
        }
    }

    pub fn unqualified_name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// `table.name`, or `name` when unqualified.
    pub fn qualified_name(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// `table__name`, or `name` when unqualified.
    pub fn alias(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}__{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Render as a `column` fragment.
    ///
    /// With `aliased`, qualified fields get `AS table__name`. An unqualified
    /// field's alias equals its name, so it is never aliased.
    pub fn column(&self, aliased: bool) -> QueryComponent {
        let alias = match &self.table {
            Some(_) if aliased => Some(self.alias()),
            _ => None,
        };
        QueryComponent::Column {
            name: self.name.clone(),
            table: self.table.clone(),
            alias,
        }
    }

    // ==================== Condition constructors ====================

    /// `self = value`
    pub fn equals(&self, value: impl Into<SqlValue>) -> Condition {
        Condition::Equals(self.clone(), Operand::value(value))
    }

    /// `self = other`
    pub fn equals_field(&self, other: &DeclaredField) -> Condition {
        Condition::Equals(self.clone(), Operand::Property(other.clone()))
    }

    /// `self != value`
    pub fn not_equals(&self, value: impl Into<SqlValue>) -> Condition {
        Condition::NotEquals(self.clone(), Operand::value(value))
    }

    /// `self > value`
    pub fn greater_than(&self, value: impl Into<SqlValue>) -> Condition {
        Condition::GreaterThan(self.clone(), Operand::value(value))
    }

    /// `self > other`
    pub fn greater_than_field(&self, other: &DeclaredField) -> Condition {
        Condition::GreaterThan(self.clone(), Operand::Property(other.clone()))
    }

    /// `self >= value`
    pub fn greater_than_or_equals(&self, value: impl Into<SqlValue>) -> Condition {
        Condition::GreaterThanOrEquals(self.clone(), Operand::value(value))
    }

    /// `self >= other`
    pub fn greater_than_or_equals_field(&self, other: &DeclaredField) -> Condition {
        Condition::GreaterThanOrEquals(self.clone(), Operand::Property(other.clone()))
    }

    /// `self < value`
    pub fn less_than(&self, value: impl Into<SqlValue>) -> Condition {
        Condition::LessThan(self.clone(), Operand::value(value))
    }

    /// `self < other`
    pub fn less_than_field(&self, other: &DeclaredField) -> Condition {
        Condition::LessThan(self.clone(), Operand::Property(other.clone()))
    }

    /// `self <= value`
    pub fn less_than_or_equals(&self, value: impl Into<SqlValue>) -> Condition {
        Condition::LessThanOrEquals(self.clone(), Operand::value(value))
    }

    /// `self <= other`
    pub fn less_than_or_equals_field(&self, other: &DeclaredField) -> Condition {
        Condition::LessThanOrEquals(self.clone(), Operand::Property(other.clone()))
    }

    /// `self LIKE pattern`
    pub fn like(&self, pattern: impl Into<SqlValue>) -> Condition {
        Condition::Like(self.clone(), Operand::value(pattern))
    }

    /// `self IN (values...)`
    pub fn contained_in<T: Into<SqlValue>>(&self, values: impl IntoIterator<Item = T>) -> Condition {
        Condition::In(self.clone(), values.into_iter().map(Into::into).collect())
    }

    /// `self NOT IN (values...)`
    pub fn not_contained_in<T: Into<SqlValue>>(
        &self,
        values: impl IntoIterator<Item = T>,
    ) -> Condition {
        Condition::NotIn(self.clone(), values.into_iter().map(Into::into).collect())
    }

    /// `self IS NULL`
    pub fn is_null(&self) -> Condition {
        Condition::IsNull(self.clone())
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(&self) -> Condition {
        Condition::IsNotNull(self.clone())
    }
}

impl PartialEq for DeclaredField {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name() == other.qualified_name()
    }
}

impl Eq for DeclaredField {}

impl Hash for DeclaredField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name().hash(state);
    }
}

impl fmt::Display for DeclaredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Table metadata used to mint qualified fields.
///
/// # Example
///
/// ```
/// use sqltree::Table;
///
/// struct Users;
///
/// impl Table for Users {
///     const NAME: &'static str = "users";
///     const PRIMARY_KEY: &'static str = "id";
/// }
///
/// assert_eq!(Users::field("email").qualified_name(), "users.email");
/// assert_eq!(Users::primary_key_field().alias(), "users__id");
/// ```
pub trait Table {
    const NAME: &'static str;
    const PRIMARY_KEY: &'static str;

    fn field(name: &str) -> DeclaredField {
        DeclaredField::qualified(Self::NAME, name)
    }

    fn primary_key_field() -> DeclaredField {
        Self::field(Self::PRIMARY_KEY)
    }

    fn table_component(alias: Option<&str>) -> QueryComponent {
        QueryComponent::Table {
            name: Self::NAME.to_string(),
            alias: alias.map(str::to_string),
        }
    }
}

/// Column fragments for a SELECT list.
///
/// `qualified` picks `table.name` over `name`; `aliased` appends
/// `AS table__name` wherever the alias differs from the qualified name.
pub fn select_list<'a>(
    fields: impl IntoIterator<Item = &'a DeclaredField>,
    qualified: bool,
    aliased: bool,
) -> Vec<QueryComponent> {
    fields
        .into_iter()
        .map(|field| {
            if qualified {
                field.column(aliased)
            } else {
                let alias = (aliased && field.table.is_some()).then(|| field.alias());
                QueryComponent::Column {
                    name: field.name.clone(),
                    table: None,
                    alias,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn qualified_name_and_alias() {
        let f = DeclaredField::qualified("users", "id");
        assert_eq!(f.qualified_name(), "users.id");
        assert_eq!(f.alias(), "users__id");
        assert_eq!(f.to_string(), "users.id");
    }

    #[test]
    fn unqualified_name_is_its_own_alias() {
        let f = DeclaredField::new("id");
        assert_eq!(f.qualified_name(), "id");
        assert_eq!(f.alias(), "id");
        assert_eq!(
            f.column(true),
            QueryComponent::Column {
                name: "id".into(),
                table: None,
                alias: None
            }
        );
    }

    #[test]
    fn equality_follows_qualified_name() {
        let a = DeclaredField::qualified("users", "id");
        let b = DeclaredField::new("id").with_table("users");
        assert_eq!(a, b);
        assert_ne!(a, DeclaredField::new("id"));

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn with_table_leaves_original_untouched() {
        let f = DeclaredField::new("id");
        let bound = f.with_table("orders");
        assert_eq!(f.table_name(), None);
        assert_eq!(bound.table_name(), Some("orders"));
    }

    #[test]
    fn select_list_unqualified_keeps_alias() {
        let fields = [
            DeclaredField::qualified("users", "id"),
            DeclaredField::new("total"),
        ];
        let list = select_list(&fields, false, true);
        assert_eq!(
            list[0],
            QueryComponent::Column {
                name: "id".into(),
                table: None,
                alias: Some("users__id".into())
            }
        );
        assert_eq!(list[1], QueryComponent::column("total", None));
    }
}
