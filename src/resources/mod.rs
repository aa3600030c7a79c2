//! Resource declarations: each resource names its table, permissions, body keys and schemas;
//! the generic repository, service and handlers do the rest.

pub mod inventory;
pub mod links;
pub mod orders;
pub mod product;
pub mod raw_material;

pub use inventory::Inventory;
pub use links::{Link, OrderProducts, ProductMaterials};
pub use orders::Orders;
pub use product::Product;
pub use raw_material::RawMaterial;

use crate::service::validation::Validate;
use crate::sql::TableDef;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// Permission strings guarding the five CRUD operations.
#[derive(Debug, Clone, Copy)]
pub struct ResourcePermissions {
    pub create: &'static str,
    pub list: &'static str,
    pub get: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

pub trait Resource: Send + Sync + 'static {
    const TABLE: &'static TableDef;
    const PERMISSIONS: ResourcePermissions;
    /// Key embedding the create payload, e.g. `{"inventory": {...}}`.
    const CREATE_KEY: &'static str;
    /// Key embedding the update payload, e.g. `{"inventory_update": {...}}`.
    const UPDATE_KEY: &'static str;

    type Create: DeserializeOwned + Serialize + Validate + Send;
    /// All fields optional; absent fields are left untouched. Must skip `None` when serialized.
    type Update: DeserializeOwned + Serialize + Validate + Send;
    type Row: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static;
}

/// Every resource table, in dependency order for migrations.
pub fn tables() -> [&'static TableDef; 4] {
    [
        Inventory::TABLE,
        RawMaterial::TABLE,
        Product::TABLE,
        Orders::TABLE,
    ]
}
