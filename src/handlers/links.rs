//! Handlers for the join tables nested under their owner resource.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::resources::links::LinkRow;
use crate::resources::Link;
use crate::service::{authorize, DeletedId, LinkService};
use crate::state::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn list<L: Link>(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<LinkRow>>, AppError> {
    LinkService::<L>::list(&state, &user, &owner_id).await.map(Json)
}

pub async fn create<L: Link>(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(owner_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkRow>), AppError> {
    authorize(&user, L::DEF.write_permission)?;
    let Json(body) = body?;
    let row = LinkService::<L>::create(&state, &user, &owner_id, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn delete<L: Link>(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((owner_id, link_id)): Path<(String, String)>,
) -> Result<Json<DeletedId>, AppError> {
    LinkService::<L>::delete(&state, &user, &owner_id, &link_id)
        .await
        .map(Json)
}
