//! Shared application state for all routes.

use crate::auth::TokenVerifier;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenVerifier>,
    /// Public mount point of the resource routes; pagination links are built from it.
    pub api_prefix: Arc<str>,
}

impl AppState {
    pub fn new(pool: PgPool, tokens: TokenVerifier, api_prefix: &str) -> Self {
        AppState {
            pool,
            tokens: Arc::new(tokens),
            api_prefix: Arc::from(api_prefix),
        }
    }

    /// Public route of a resource collection, e.g. `/api/inventory`.
    pub fn route_for(&self, segment: &str) -> String {
        format!("{}/{}", self.api_prefix, segment)
    }
}
