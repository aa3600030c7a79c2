//! Generic CRUD statements for any [`Resource`].

use super::{bind_as, bind_scalar};
use crate::resources::Resource;
use crate::sql::{delete, insert, order_clause, select_by_id, select_list, update};
use serde_json::{Map, Value};
use sqlx::PgPool;
use std::marker::PhantomData;
use uuid::Uuid;

pub struct ResourceRepository<'a, R> {
    pool: &'a PgPool,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceRepository<'a, R> {
    pub fn new(pool: &'a PgPool) -> Self {
        ResourceRepository {
            pool,
            _resource: PhantomData,
        }
    }

    /// Insert the given column values. Returns the stored row, or None if nothing was returned.
    pub async fn create(&self, values: &Map<String, Value>) -> Result<Option<R::Row>, sqlx::Error> {
        let q = insert(R::TABLE, values);
        bind_as::<R::Row>(&q).fetch_optional(self.pool).await
    }

    /// All rows matching `search` on the name column, audit users shown by full name.
    pub async fn list(
        &self,
        search: Option<&str>,
        order: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<R::Row>, sqlx::Error> {
        let clause = order_clause(R::TABLE, order, direction);
        let q = select_list(R::TABLE, search, &clause);
        bind_as::<R::Row>(&q).fetch_all(self.pool).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<R::Row>, sqlx::Error> {
        let q = select_by_id(R::TABLE, id);
        bind_as::<R::Row>(&q).fetch_optional(self.pool).await
    }

    /// Write `values` to the row. Returns the id when the row exists.
    pub async fn update(&self, id: Uuid, values: &Map<String, Value>) -> Result<Option<Uuid>, sqlx::Error> {
        let q = update(R::TABLE, id, values);
        bind_scalar::<Uuid>(&q).fetch_optional(self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        let q = delete(R::TABLE, id);
        bind_scalar::<Uuid>(&q).fetch_optional(self.pool).await
    }
}
