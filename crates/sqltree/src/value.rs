//! Portable scalar values bound as query parameters.
//!
//! [`SqlValue`] is the nullable value representation carried by condition
//! operands. The compiler never inlines these into SQL text; each one becomes a
//! placeholder token plus an entry in the bound-parameter list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A nullable scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Json(serde_json::Value),
}

impl SqlValue {
    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::SqlValue;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    // The concrete parameter type is only known per value, so `accepts` is
    // permissive and `to_sql_checked` defers to the wrapped type's own check.
    impl ToSql for SqlValue {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                SqlValue::Null => Ok(IsNull::Yes),
                SqlValue::Bool(v) => v.to_sql(ty, out),
                SqlValue::Int(v) => match *ty {
                    Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                    Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                    _ => v.to_sql(ty, out),
                },
                SqlValue::Float(v) => match *ty {
                    Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                    _ => v.to_sql(ty, out),
                },
                SqlValue::Text(v) => v.to_sql(ty, out),
                SqlValue::Bytes(v) => v.to_sql(ty, out),
                SqlValue::Uuid(v) => v.to_sql(ty, out),
                SqlValue::Timestamp(v) => v.to_sql(ty, out),
                SqlValue::Date(v) => v.to_sql(ty, out),
                SqlValue::Json(v) => v.to_sql(ty, out),
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        fn to_sql_checked(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                SqlValue::Null => Ok(IsNull::Yes),
                SqlValue::Bool(v) => v.to_sql_checked(ty, out),
                SqlValue::Int(v) => match *ty {
                    Type::INT2 => i16::try_from(*v)?.to_sql_checked(ty, out),
                    Type::INT4 => i32::try_from(*v)?.to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                SqlValue::Float(v) => match *ty {
                    Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                SqlValue::Text(v) => v.to_sql_checked(ty, out),
                SqlValue::Bytes(v) => v.to_sql_checked(ty, out),
                SqlValue::Uuid(v) => v.to_sql_checked(ty, out),
                SqlValue::Timestamp(v) => v.to_sql_checked(ty, out),
                SqlValue::Date(v) => v.to_sql_checked(ty, out),
                SqlValue::Json(v) => v.to_sql_checked(ty, out),
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_is_null() {
        let v: SqlValue = Option::<i32>::None.into();
        assert!(v.is_null());
        assert_eq!(SqlValue::from(Some(5_i32)), SqlValue::Int(5));
    }

    #[test]
    fn serde_shape_is_externally_tagged() {
        let json = serde_json::to_value(SqlValue::Int(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "Int": 5 }));
        let back: SqlValue = serde_json::from_value(serde_json::json!("Null")).unwrap();
        assert_eq!(back, SqlValue::Null);
    }
}
