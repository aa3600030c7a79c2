//! Convert serde_json::Value to types that sqlx can bind.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value that can be bound to a PostgreSQL query. Converts from serde_json::Value.
/// Placeholders carry an explicit cast (`$n::uuid`, `$n::timestamptz`), so strings are always sent
/// as text and the column type decides how they are read.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
}

impl From<&Value> for PgBindValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => PgBindValue::Null,
            Value::Bool(b) => PgBindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PgBindValue::I64(i)
                } else {
                    PgBindValue::F64(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => PgBindValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => PgBindValue::String(v.to_string()),
        }
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null => IsNull::Yes,
            PgBindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::String(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            PgBindValue::Null | PgBindValue::String(_) => <String as Type<Postgres>>::type_info(),
            PgBindValue::Bool(_) => <bool as Type<Postgres>>::type_info(),
            PgBindValue::I64(_) => <i64 as Type<Postgres>>::type_info(),
            PgBindValue::F64(_) => <f64 as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_json_scalars() {
        assert_eq!(PgBindValue::from(&json!(null)), PgBindValue::Null);
        assert_eq!(PgBindValue::from(&json!(true)), PgBindValue::Bool(true));
        assert_eq!(PgBindValue::from(&json!(12)), PgBindValue::I64(12));
        assert_eq!(PgBindValue::from(&json!(10.5)), PgBindValue::F64(10.5));
        assert_eq!(
            PgBindValue::from(&json!("warehouse")),
            PgBindValue::String("warehouse".into())
        );
    }

    #[test]
    fn uuid_shaped_strings_stay_text() {
        for s in [
            "C81018EDF0C54B7D8B03454612CEE356",
            "{c81018ed-f0c5-4b7d-8b03-454612cee356}",
            "c81018ed-f0c5-4b7d-8b03-454612cee356",
        ] {
            assert_eq!(PgBindValue::from(&json!(s)), PgBindValue::String(s.into()));
        }
    }

    #[test]
    fn nested_values_bind_as_json_text() {
        assert_eq!(
            PgBindValue::from(&json!({"a": [1]})),
            PgBindValue::String("{\"a\":[1]}".into())
        );
    }
}
