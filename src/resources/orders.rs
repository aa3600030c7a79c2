//! Customer orders.

use super::{Resource, ResourcePermissions};
use crate::error::AppError;
use crate::service::validation::{min_chars, min_chars_opt, Validate, MIN_NAME_CHARS};
use crate::sql::{ColumnDef, SqlType, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct Orders;

const TABLE_DEF: TableDef = TableDef {
    table: "orders",
    segment: "orders",
    name_column: "orders_name",
    attributes: &[
        ColumnDef::required("orders_name", SqlType::Text).unique(),
        ColumnDef::required("state", SqlType::Text),
        ColumnDef::optional("date", SqlType::Timestamptz),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersCreate {
    pub orders_name: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrdersRow {
    pub id: Uuid,
    pub orders_name: String,
    pub state: String,
    pub date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for OrdersCreate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars("orders_name", &self.orders_name, MIN_NAME_CHARS)
    }
}

impl Validate for OrdersUpdate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars_opt("orders_name", self.orders_name.as_deref(), MIN_NAME_CHARS)
    }
}

impl Resource for Orders {
    const TABLE: &'static TableDef = &TABLE_DEF;
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        create: "orders:create-orders",
        list: "orders:get_orders_list",
        get: "orders:get-orders-by-id",
        update: "orders:update-orders-by-id",
        delete: "orders:delete-orders-by-id",
    };
    const CREATE_KEY: &'static str = "orders";
    const UPDATE_KEY: &'static str = "orders_update";

    type Create = OrdersCreate;
    type Update = OrdersUpdate;
    type Row = OrdersRow;
}
