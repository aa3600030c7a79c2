//! HTTP handlers for resource CRUD, join-table links and the permission catalog.

pub mod links;
pub mod permissions;
pub mod resource;
