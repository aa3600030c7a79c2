//! Static permission catalog and the authorization check applied by every service call.

use super::CurrentUser;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PermissionGroup {
    pub functionality: &'static str,
    pub routes: &'static [Permission],
}

#[derive(Debug, Serialize)]
pub struct Permission {
    pub permission: &'static str,
    pub description: &'static str,
}

const fn p(permission: &'static str, description: &'static str) -> Permission {
    Permission {
        permission,
        description,
    }
}

pub const LIST_PERMISSIONS: &str = "permissions:list-permissions";

static CATALOG: &[PermissionGroup] = &[
    PermissionGroup {
        functionality: "USUARIOS",
        routes: &[
            p(LIST_PERMISSIONS, "Listar permisos"),
            p("roles:create-role", "Crear rol"),
            p("roles:roles_list", "Listar roles"),
            p("roles:get-role-by-id", "Obtener un rol por su id"),
            p("roles:update-role-by-id", "Actualizar un rol por su id"),
            p("roles:update-activate-role-by-id", "Activar / Desactivar un rol por su id"),
            p("roles:delete-role-by-id", "Eliminar un rol por su id"),
            p("users:create-user", "Crear usuario"),
            p("users:users_list", "Listar usuarios"),
            p("users:get-user-by-id", "Obtener un usuario por su id"),
            p("users:activate-user-by-id", "Activar / Desactivar un usuario por su id"),
            p("users:update-user-by-id", "Actualizar un usuario por su id"),
            p("users:delete-user-by-id", "Eliminar un usuario por su id"),
            p("users:change-password-by-id", "Actualizar password por el propio usuario"),
        ],
    },
    PermissionGroup {
        functionality: "INVENTARIO",
        routes: &[
            p("inventory:create-inventory", "Crear inventario"),
            p("inventory:get_inventory_list", "Listar inventario"),
            p("inventory:get-inventory-by-id", "Obtener una inventario por su ID"),
            p("inventory:update-inventory-by-id", "Actualizar una inventario por su ID"),
            p("inventory:delete-inventory-by-id", "Eliminar una inventario por su ID"),
        ],
    },
    PermissionGroup {
        functionality: "RAW_MATERIAL",
        routes: &[
            p("raw_material:create-raw_material", "Crear materia prima"),
            p("raw_material:get_raw_material_list", "Listar materia prima"),
            p("raw_material:get-raw_material-by-id", "Obtener una materia prima por su ID"),
            p("raw_material:update-raw_material-by-id", "Actualizar una materia prima por su ID"),
            p("raw_material:delete-raw_material-by-id", "Eliminar una materia prima por su ID"),
        ],
    },
    PermissionGroup {
        functionality: "PRODUCT",
        routes: &[
            p("product:create-product", "Crear producto"),
            p("product:get_product_list", "Listar producto"),
            p("product:get-product-by-id", "Obtener producto por su ID"),
            p("product:update-product-by-id", "Actualizar producto por su ID"),
            p("product:delete-product-by-id", "Eliminar producto por su ID"),
        ],
    },
    PermissionGroup {
        functionality: "ORDERS",
        routes: &[
            p("orders:create-orders", "Crear pedido"),
            p("orders:get_orders_list", "Listar pedidos"),
            p("orders:get-orders-by-id", "Obtener pedido por su ID"),
            p("orders:update-orders-by-id", "Actualizar pedido por su ID"),
            p("orders:delete-orders-by-id", "Eliminar pedido por su ID"),
        ],
    },
];

pub fn catalog() -> &'static [PermissionGroup] {
    CATALOG
}

/// True when `permission` is a known catalog entry.
pub fn verify_permission(permission: &str) -> bool {
    CATALOG
        .iter()
        .flat_map(|g| g.routes.iter())
        .any(|r| r.permission == permission)
}

/// Active user, known permission, and either superuser or an explicit grant.
pub fn is_authorized(user: &CurrentUser, permission: &str) -> bool {
    if !user.is_active || !verify_permission(permission) {
        return false;
    }
    user.is_superuser || user.permissions.contains(permission)
}
