//! Lowering of [`Condition`] trees.

use super::emit::Emitter;
use crate::condition::{Condition, Operand};
use crate::error::{CompileError, CompileResult};
use crate::field::DeclaredField;
use crate::value::SqlValue;

impl Emitter<'_> {
    pub(super) fn condition(&mut self, condition: &Condition) -> CompileResult<()> {
        self.descend()?;
        match condition {
            Condition::Equals(field, operand) => self.comparison(field, "=", operand),
            Condition::NotEquals(field, operand) => self.comparison(field, "!=", operand),
            Condition::GreaterThan(field, operand) => self.comparison(field, ">", operand),
            Condition::GreaterThanOrEquals(field, operand) => {
                self.comparison(field, ">=", operand)
            }
            Condition::LessThan(field, operand) => self.comparison(field, "<", operand),
            Condition::LessThanOrEquals(field, operand) => self.comparison(field, "<=", operand),
            Condition::Like(field, operand) => self.comparison(field, "LIKE", operand),
            // An empty list has no valid `IN ( )` form; emit the constant outcome.
            Condition::In(field, values) => self.membership(field, "IN", values, "1=0"),
            Condition::NotIn(field, values) => self.membership(field, "NOT IN", values, "1=1"),
            Condition::IsNull(field) => {
                self.field(field);
                self.push("IS NULL");
            }
            Condition::IsNotNull(field) => {
                self.field(field);
                self.push("IS NOT NULL");
            }
            Condition::And(children) => self.group(children, "AND")?,
            Condition::Or(children) => self.group(children, "OR")?,
            Condition::Not(inner) => {
                self.push("NOT");
                self.push("(");
                self.condition(inner)?;
                self.push(")");
            }
        }
        self.ascend();
        Ok(())
    }

    fn field(&mut self, field: &DeclaredField) {
        self.push(field.qualified_name());
    }

    fn comparison(&mut self, field: &DeclaredField, op: &'static str, operand: &Operand) {
        self.field(field);
        self.push(op);
        match operand {
            Operand::Value(value) => self.bind(value),
            Operand::Property(other) => self.field(other),
        }
    }

    fn membership(
        &mut self,
        field: &DeclaredField,
        op: &'static str,
        values: &[SqlValue],
        when_empty: &'static str,
    ) {
        if values.is_empty() {
            self.push(when_empty);
            return;
        }
        self.field(field);
        self.push(op);
        self.push("(");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.push(",");
            }
            self.bind(value);
        }
        self.push(")");
    }

    /// `( c1 OP c2 OP ... )`, parenthesized even for a single child.
    fn group(&mut self, children: &[Condition], op: &'static str) -> CompileResult<()> {
        if children.is_empty() {
            return Err(CompileError::EmptyGroup(op));
        }
        self.push("(");
        self.separated(children, op, Self::condition)?;
        self.push(")");
        Ok(())
    }
}
