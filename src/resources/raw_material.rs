//! Raw materials bought from providers.

use super::{Resource, ResourcePermissions};
use crate::error::AppError;
use crate::service::validation::{min_chars, min_chars_opt, Validate, MIN_NAME_CHARS};
use crate::sql::{ColumnDef, SqlType, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct RawMaterial;

const TABLE_DEF: TableDef = TableDef {
    table: "raw_material",
    segment: "raw_material",
    name_column: "raw_material_name",
    attributes: &[
        ColumnDef::required("raw_material_name", SqlType::Text).unique(),
        ColumnDef::optional("type", SqlType::Text),
        ColumnDef::required("provider", SqlType::Text),
        ColumnDef::required("quantity", SqlType::Integer),
        ColumnDef::optional("acquisition_date", SqlType::Timestamptz),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMaterialCreate {
    pub raw_material_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub provider: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMaterialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_material_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RawMaterialRow {
    pub id: Uuid,
    pub raw_material_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub provider: String,
    pub quantity: i32,
    pub acquisition_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for RawMaterialCreate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars("raw_material_name", &self.raw_material_name, MIN_NAME_CHARS)
    }
}

impl Validate for RawMaterialUpdate {
    fn validate(&self) -> Result<(), AppError> {
        min_chars_opt(
            "raw_material_name",
            self.raw_material_name.as_deref(),
            MIN_NAME_CHARS,
        )
    }
}

impl Resource for RawMaterial {
    const TABLE: &'static TableDef = &TABLE_DEF;
    const PERMISSIONS: ResourcePermissions = ResourcePermissions {
        create: "raw_material:create-raw_material",
        list: "raw_material:get_raw_material_list",
        get: "raw_material:get-raw_material-by-id",
        update: "raw_material:update-raw_material-by-id",
        delete: "raw_material:delete-raw_material-by-id",
    };
    const CREATE_KEY: &'static str = "raw_material";
    const UPDATE_KEY: &'static str = "raw_material_update";

    type Create = RawMaterialCreate;
    type Update = RawMaterialUpdate;
    type Row = RawMaterialRow;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_field_maps_to_the_type_column() {
        let c: RawMaterialCreate = serde_json::from_value(json!({
            "raw_material_name": "steel",
            "type": "metal",
            "provider": "Acme",
            "quantity": 40
        }))
        .unwrap();
        assert_eq!(c.kind.as_deref(), Some("metal"));
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["type"], json!("metal"));
        assert!(v.get("acquisition_date").is_none());
        assert!(RawMaterial::TABLE.column("type").is_some());
    }

    #[test]
    fn quantity_must_be_an_integer() {
        let r: Result<RawMaterialCreate, _> = serde_json::from_value(json!({
            "raw_material_name": "steel",
            "provider": "Acme",
            "quantity": "lots"
        }));
        assert!(r.is_err());
    }

    #[test]
    fn name_rule_applies_to_create_and_update() {
        let c = RawMaterialCreate {
            raw_material_name: "ab".into(),
            kind: None,
            provider: "Acme".into(),
            quantity: 1,
            acquisition_date: None,
        };
        assert!(c.validate().is_err());
        let u = RawMaterialUpdate {
            quantity: Some(7),
            ..Default::default()
        };
        assert!(u.validate().is_ok());
    }
}
