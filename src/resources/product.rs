//! Products manufactured from raw materials.

use super::{Resource, ResourcePermissions};
use crate::error::AppError;
use crate::service::validation::{min_chars, min_chars_opt, Validate, MIN_NAME_CHARS};
use crate::sql::{ColumnDef, SqlType, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct Product;

const TABLE_DEF: TableDef = TableDef {
    table: "product",
    segment: "product",
    name_column: "product_name",
    attributes: &[
        ColumnDef::required("product_name", SqlType::Text).unique(),
        ColumnDef::optional("type", SqlType::Text),
        ColumnDef::required("description", SqlType::Text),
        ColumnDef::required("price", SqlType::Double),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub product_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub product_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub description: String,
    pub price: f64,
    pub is_active: Option<bool>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for ProductCreate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars("product_name", &self.product_name, MIN_NAME_CHARS)
    }
}

impl Validate for ProductUpdate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars_opt("product_name", self.product_name.as_deref(), MIN_NAME_CHARS)
    }
}

impl Resource for Product {
    const TABLE: &'static TableDef = &TABLE_DEF;
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        create: "product:create-product",
        list: "product:get_product_list",
        get: "product:get-product-by-id",
        update: "product:update-product-by-id",
        delete: "product:delete-product-by-id",
    };
    const CREATE_KEY: &'static str = "product";
    const UPDATE_KEY: &'static str = "product_update";

    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Row = ProductRow;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_accepts_integers_and_decimals() {
        for price in [json!(10), json!(10.1)] {
            let c: ProductCreate = serde_json::from_value(json!({
                "product_name": "test_product",
                "description": "test_description",
                "price": price
            }))
            .unwrap();
            assert!(c.validate().is_ok());
        }
    }

    #[test]
    fn missing_description_fails_to_parse() {
        let r: Result<ProductCreate, _> =
            serde_json::from_value(json!({"product_name": "chair", "price": 3.5}));
        assert!(r.is_err());
    }
}
