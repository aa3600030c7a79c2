//! Join tables: raw materials required by a product (`m_p`), products required by an order (`p_p`).

use super::{Orders, Product, RawMaterial, Resource};
use crate::error::AppError;
use crate::service::validation::Validate;
use crate::sql::LinkDef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body key of the link payload: `{"link": {"item_id": ..., "required_quantity": ...}}`.
pub const LINK_KEY: &str = "link";

pub trait Link: Send + Sync + 'static {
    const DEF: &'static LinkDef;
}

pub struct ProductMaterials;
pub struct OrderProducts;

const PRODUCT_MATERIALS: LinkDef = LinkDef {
    table: "m_p",
    owner: Product::TABLE,
    owner_column: "product_id",
    item: RawMaterial::TABLE,
    item_column: "raw_material_id",
    read_permission: Product::PERMISSIONS.get,
    write_permission: Product::PERMISSIONS.update,
};

const ORDER_PRODUCTS: LinkDef = LinkDef {
    table: "p_p",
    owner: Orders::TABLE,
    owner_column: "order_id",
    item: Product::TABLE,
    item_column: "product_id",
    read_permission: Orders::PERMISSIONS.get,
    write_permission: Orders::PERMISSIONS.update,
};

impl Link for ProductMaterials {
    const DEF: &'static LinkDef = &PRODUCT_MATERIALS;
}

impl Link for OrderProducts {
    const DEF: &'static LinkDef = &ORDER_PRODUCTS;
}

/// Every link table, after the resource tables they reference.
pub fn link_tables() -> [&'static LinkDef; 2] {
    [ProductMaterials::DEF, OrderProducts::DEF]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCreate {
    pub item_id: Uuid,
    pub required_quantity: i32,
}

impl Validate for LinkCreate {
    fn validate(&self) -> Result<(), AppError> {
        if self.required_quantity < 1 {
            return Err(AppError::Validation(
                "required_quantity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LinkRow {
    pub id: Uuid,
    pub required_quantity: i32,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub item_id: Uuid,
    pub item_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_point_at_their_owner_and_item() {
        assert_eq!(ProductMaterials::DEF.owner.table, "product");
        assert_eq!(ProductMaterials::DEF.item.table, "raw_material");
        assert_eq!(OrderProducts::DEF.owner.table, "orders");
        assert_eq!(OrderProducts::DEF.item.table, "product");
        assert_eq!(
            OrderProducts::DEF.write_permission,
            "orders:update-orders-by-id"
        );
    }

    #[test]
    fn quantity_must_be_positive() {
        let item_id = Uuid::new_v4();
        assert!(LinkCreate { item_id, required_quantity: 0 }.validate().is_err());
        assert!(LinkCreate { item_id, required_quantity: 2 }.validate().is_ok());
    }
}
