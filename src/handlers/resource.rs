//! Generic resource handlers; one instantiation per `Resource`.
//! Body and query rejections are surfaced only after the permission check.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::resources::Resource;
use crate::service::{authorize, DeletedId, ListParams, ResourceService};
use crate::state::AppState;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R::Row>), AppError> {
    authorize(&user, R::PERMISSIONS.create)?;
    let Json(body) = body?;
    let row = ResourceService::<R>::create(&state, &user, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// 204 with no body when nothing matches.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    user: CurrentUser,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, AppError> {
    authorize(&user, R::PERMISSIONS.list)?;
    let Query(params) = params?;
    let page = ResourceService::<R>::list(&state, &user, params).await?;
    if page.total == 0 {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(page).into_response())
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<R::Row>, AppError> {
    ResourceService::<R>::get(&state, &user, &id).await.map(Json)
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<R::Row>, AppError> {
    authorize(&user, R::PERMISSIONS.update)?;
    let Json(body) = body?;
    ResourceService::<R>::update(&state, &user, &id, body)
        .await
        .map(Json)
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedId>, AppError> {
    ResourceService::<R>::delete(&state, &user, &id).await.map(Json)
}
