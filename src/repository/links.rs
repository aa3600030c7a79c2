//! Statements for the product/raw-material and order/product join tables.

use super::{bind_as, bind_scalar};
use crate::resources::links::LinkRow;
use crate::sql::{delete_link, exists, insert_link, select_link, select_links, LinkDef};
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LinkRepository<'a> {
    pool: &'a PgPool,
    link: &'static LinkDef,
}

impl<'a> LinkRepository<'a> {
    pub fn new(pool: &'a PgPool, link: &'static LinkDef) -> Self {
        LinkRepository { pool, link }
    }

    pub async fn owner_exists(&self, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let q = exists(self.link.owner, owner_id);
        bind_scalar::<bool>(&q).fetch_one(self.pool).await
    }

    pub async fn item_exists(&self, item_id: Uuid) -> Result<bool, sqlx::Error> {
        let q = exists(self.link.item, item_id);
        bind_scalar::<bool>(&q).fetch_one(self.pool).await
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<LinkRow>, sqlx::Error> {
        let q = select_links(self.link, owner_id);
        bind_as::<LinkRow>(&q).fetch_all(self.pool).await
    }

    /// Insert a link and read it back joined to the item name.
    pub async fn create(&self, values: &Map<String, Value>) -> Result<Option<LinkRow>, sqlx::Error> {
        let q = insert_link(self.link, values);
        let Some(id) = bind_scalar::<Uuid>(&q).fetch_optional(self.pool).await? else {
            return Ok(None);
        };
        let q = select_link(self.link, id);
        bind_as::<LinkRow>(&q).fetch_optional(self.pool).await
    }

    pub async fn delete(&self, owner_id: Uuid, link_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        let q = delete_link(self.link, owner_id, link_id);
        bind_scalar::<Uuid>(&q).fetch_optional(self.pool).await
    }
}
