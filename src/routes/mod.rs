mod common;
mod resources;

pub use common::{common_routes, common_routes_with_ready};
pub use resources::{api_routes, link_routes, permission_routes, resource_routes};

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// The full application: common routes at the root, API routes under the configured prefix.
pub fn app(state: AppState) -> Router {
    let api = api_routes(state.clone());
    let prefix = state.api_prefix.to_string();
    let router = common_routes_with_ready(state);
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&prefix, api)
    };
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT)),
    )
}
