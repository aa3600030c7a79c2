//! Resource, link and permission routes. Paths are built from the table definitions.

use crate::handlers::{links, permissions, resource};
use crate::resources::{Inventory, Link, OrderProducts, Orders, Product, ProductMaterials, RawMaterial, Resource};
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/{segment}` (list, create) and `/{segment}/:id` (read, update, delete).
pub fn resource_routes<R: Resource>(state: AppState) -> Router {
    let collection = format!("/{}", R::TABLE.segment);
    let member = format!("/{}/:id", R::TABLE.segment);
    Router::new()
        .route(&collection, get(resource::list::<R>).post(resource::create::<R>))
        .route(
            &member,
            get(resource::read::<R>)
                .put(resource::update::<R>)
                .delete(resource::delete::<R>),
        )
        .with_state(state)
}

/// `/{owner}/:id/{item}` (list, add) and `/{owner}/:id/{item}/:link_id` (remove).
pub fn link_routes<L: Link>(state: AppState) -> Router {
    let collection = format!("/{}/:id/{}", L::DEF.owner.segment, L::DEF.item.segment);
    let member = format!("{}/:link_id", collection);
    Router::new()
        .route(&collection, get(links::list::<L>).post(links::create::<L>))
        .route(&member, axum::routing::delete(links::delete::<L>))
        .with_state(state)
}

pub fn permission_routes(state: AppState) -> Router {
    Router::new()
        .route("/permissions", get(permissions::list_permissions))
        .with_state(state)
}

/// Every authenticated route, unprefixed.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<Inventory>(state.clone()))
        .merge(resource_routes::<RawMaterial>(state.clone()))
        .merge(resource_routes::<Product>(state.clone()))
        .merge(resource_routes::<Orders>(state.clone()))
        .merge(link_routes::<ProductMaterials>(state.clone()))
        .merge(link_routes::<OrderProducts>(state.clone()))
        .merge(permission_routes(state))
}
