//! Data access: one parameterized statement per call, rows mapped to resource schemas.

mod links;
mod resource;

pub use links::LinkRepository;
pub use resource::ResourceRepository;

use crate::sql::{PgBindValue, QueryBuf};
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::FromRow;

fn bind_as<'q, O>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<Postgres, O>(&q.sql);
    for p in &q.params {
        query = query.bind(PgBindValue::from(p));
    }
    query
}

fn bind_scalar<'q, O>(q: &'q QueryBuf) -> QueryScalar<'q, Postgres, O, PgArguments>
where
    (O,): for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_scalar::<Postgres, O>(&q.sql);
    for p in &q.params {
        query = query.bind(PgBindValue::from(p));
    }
    query
}
