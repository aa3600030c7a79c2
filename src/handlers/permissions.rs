use crate::auth::permissions::LIST_PERMISSIONS;
use crate::auth::{catalog, CurrentUser, PermissionGroup};
use crate::error::AppError;
use crate::service::authorize;
use axum::Json;

/// The full permission catalog, grouped by functionality.
pub async fn list_permissions(user: CurrentUser) -> Result<Json<&'static [PermissionGroup]>, AppError> {
    authorize(&user, LIST_PERMISSIONS)?;
    Ok(Json(catalog()))
}
