//! Boolean condition trees.
//!
//! This module provides [`Condition`], a recursive predicate over field
//! comparisons, and [`Operand`], the right-hand side of a comparison.
//!
//! # Example
//! ```
//! use sqltree::{Condition, DeclaredField, compile_condition};
//!
//! let a = DeclaredField::new("a");
//! let b = DeclaredField::new("b");
//! let cond = Condition::and(vec![
//!     a.equals(1),
//!     Condition::or(vec![b.equals(2), b.equals(3)]),
//! ]);
//!
//! let compiled = compile_condition(&cond).unwrap();
//! assert_eq!(compiled.to_sql(), "( a = ? AND ( b = ? OR b = ? ) )");
//! assert_eq!(compiled.params().len(), 3);
//! ```

use crate::field::DeclaredField;
use crate::value::SqlValue;
use serde::{Deserialize, Serialize};

/// Right-hand side of a comparison: a bound value or another column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Bound as a parameter. `SqlValue::Null` binds NULL.
    Value(SqlValue),
    /// Compared against another column, rendered by qualified name.
    Property(DeclaredField),
}

impl Operand {
    pub fn value(value: impl Into<SqlValue>) -> Self {
        Operand::Value(value.into())
    }

    pub fn property(field: &DeclaredField) -> Self {
        Operand::Property(field.clone())
    }
}

impl From<DeclaredField> for Operand {
    fn from(field: DeclaredField) -> Self {
        Operand::Property(field)
    }
}

impl From<SqlValue> for Operand {
    fn from(value: SqlValue) -> Self {
        Operand::Value(value)
    }
}

/// A boolean SQL expression.
///
/// Each child is owned by exactly one parent, so a tree is always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// `field = operand`
    Equals(DeclaredField, Operand),
    /// `field != operand`
    NotEquals(DeclaredField, Operand),
    /// `field > operand`
    GreaterThan(DeclaredField, Operand),
    /// `field >= operand`
    GreaterThanOrEquals(DeclaredField, Operand),
    /// `field < operand`
    LessThan(DeclaredField, Operand),
    /// `field <= operand`
    LessThanOrEquals(DeclaredField, Operand),
    /// `field LIKE operand`
    Like(DeclaredField, Operand),
    /// `field IN ( ?, ?, ... )`, one placeholder per value.
    In(DeclaredField, Vec<SqlValue>),
    /// `field NOT IN ( ?, ?, ... )`
    NotIn(DeclaredField, Vec<SqlValue>),
    /// `field IS NULL`
    IsNull(DeclaredField),
    /// `field IS NOT NULL`
    IsNotNull(DeclaredField),
    /// All children must hold.
    And(Vec<Condition>),
    /// At least one child must hold.
    Or(Vec<Condition>),
    /// Negation of the inner condition.
    Not(Box<Condition>),
}

impl Condition {
    /// Create an AND group.
    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And(conditions)
    }

    /// Create an OR group.
    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(conditions)
    }

    /// AND `other` onto this condition, extending an existing AND group
    /// instead of nesting a new one.
    pub fn and_also(self, other: Condition) -> Self {
        match self {
            Condition::And(mut conditions) => {
                conditions.push(other);
                Condition::And(conditions)
            }
            this => Condition::And(vec![this, other]),
        }
    }

    /// OR `other` onto this condition, extending an existing OR group.
    pub fn or_else(self, other: Condition) -> Self {
        match self {
            Condition::Or(mut conditions) => {
                conditions.push(other);
                Condition::Or(conditions)
            }
            this => Condition::Or(vec![this, other]),
        }
    }
}

/// `!condition` wraps the condition in a negation.
impl std::ops::Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_also_flattens() {
        let a = DeclaredField::new("a");
        let cond = a.equals(1).and_also(a.equals(2)).and_also(a.equals(3));
        match cond {
            Condition::And(children) => assert_eq!(children.len(), 3),
            other => panic!("expected AND group, got {other:?}"),
        }
    }

    #[test]
    fn or_else_wraps_non_group() {
        let a = DeclaredField::new("a");
        let cond = Condition::and(vec![a.equals(1)]).or_else(a.is_null());
        match cond {
            Condition::Or(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0], Condition::And(_)));
            }
            other => panic!("expected OR group, got {other:?}"),
        }
    }

    #[test]
    fn not_operator_boxes() {
        let a = DeclaredField::new("a");
        assert_eq!(!a.is_null(), Condition::Not(Box::new(a.is_null())));
    }

    #[test]
    fn field_operand_is_property() {
        let a = DeclaredField::qualified("users", "id");
        let b = DeclaredField::qualified("orders", "user_id");
        assert_eq!(
            a.equals_field(&b),
            Condition::Equals(a.clone(), Operand::Property(b.clone()))
        );
    }
}
