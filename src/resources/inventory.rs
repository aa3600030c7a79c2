//! Inventory locations.

use super::{Resource, ResourcePermissions};
use crate::error::AppError;
use crate::service::validation::{min_chars, min_chars_opt, Validate, MIN_NAME_CHARS};
use crate::sql::{ColumnDef, SqlType, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct Inventory;

const TABLE_DEF: TableDef = TableDef {
    table: "inventory",
    segment: "inventory",
    name_column: "inventory_name",
    attributes: &[
        ColumnDef::required("inventory_name", SqlType::Text).unique(),
        ColumnDef::required("location_stock", SqlType::Text).indexed(),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryCreate {
    pub inventory_name: String,
    pub location_stock: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_stock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryRow {
    pub id: Uuid,
    pub inventory_name: String,
    pub location_stock: String,
    pub is_active: Option<bool>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for InventoryCreate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars("inventory_name", &self.inventory_name, MIN_NAME_CHARS)
    }
}

impl Validate for InventoryUpdate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars_opt("inventory_name", self.inventory_name.as_deref(), MIN_NAME_CHARS)
    }
}

impl Resource for Inventory {
    const TABLE: &'static TableDef = &TABLE_DEF;
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        create: "inventory:create-inventory",
        list: "inventory:get_inventory_list",
        get: "inventory:get-inventory-by-id",
        update: "inventory:update-inventory-by-id",
        delete: "inventory:delete-inventory-by-id",
    };
    const CREATE_KEY: &'static str = "inventory";
    const UPDATE_KEY: &'static str = "inventory_update";

    type Create = InventoryCreate;
    type Update = InventoryUpdate;
    type Row = InventoryRow;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_permission;
    use crate::service::validation::embedded;
    use serde_json::json;

    #[test]
    fn short_names_are_rejected() {
        let c = InventoryCreate {
            inventory_name: "ab".into(),
            location_stock: "A-1".into(),
        };
        assert!(c.validate().is_err());
        let u = InventoryUpdate {
            inventory_name: Some("ab".into()),
            ..Default::default()
        };
        assert!(u.validate().is_err());
        assert!(InventoryUpdate::default().validate().is_ok());
    }

    #[test]
    fn missing_location_fails_to_parse() {
        let r: Result<InventoryCreate, _> =
            embedded(json!({"inventory": {"inventory_name": "main"}}), Inventory::CREATE_KEY);
        assert!(r.is_err());
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let u = InventoryUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&u).unwrap(), json!({"is_active": false}));
    }

    #[test]
    fn permissions_are_in_the_catalog() {
        let p = Inventory::PERMISSIONS;
        for perm in [p.create, p.list, p.get, p.update, p.delete] {
            assert!(verify_permission(perm), "{perm}");
        }
    }
}
