//! Generic resource service: authorization, validation, audit stamping, error mapping.

use crate::auth::{is_authorized, CurrentUser};
use crate::error::{is_unique_violation, AppError};
use crate::pagination::{paginate, Page, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::repository::ResourceRepository;
use crate::resources::Resource;
use crate::service::validation::{embedded, parse_id, Validate};
use crate::state::AppState;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use uuid::Uuid;

/// Query parameters of a list call.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub order: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedId {
    pub id: Uuid,
}

pub fn authorize(user: &CurrentUser, permission: &str) -> Result<(), AppError> {
    if is_authorized(user, permission) {
        Ok(())
    } else {
        tracing::warn!(user = %user.id, fullname = %user.fullname, permission, "permission denied");
        Err(AppError::Forbidden(format!("missing permission {}", permission)))
    }
}

/// Serialize a schema into a column map.
fn to_map<T: Serialize>(value: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(AppError::Internal("schema did not serialize to an object".into())),
        Err(e) => Err(AppError::Internal(format!("serialize: {}", e))),
    }
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

pub struct ResourceService<R>(PhantomData<R>);

impl<R: Resource> ResourceService<R> {
    pub async fn create(
        state: &AppState,
        user: &CurrentUser,
        body: Value,
    ) -> Result<R::Row, AppError> {
        authorize(user, R::PERMISSIONS.create)?;
        let input: R::Create = embedded(body, R::CREATE_KEY)?;
        input.validate()?;

        let mut values = to_map(&input)?;
        let user_id = Value::String(user.id.to_string());
        let stamp = now();
        values.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        values.insert("is_active".into(), Value::Bool(true));
        values.insert("created_by".into(), user_id.clone());
        values.insert("created_at".into(), stamp.clone());
        values.insert("updated_by".into(), user_id);
        values.insert("updated_at".into(), stamp);

        let table = R::TABLE.table;
        match ResourceRepository::<R>::new(&state.pool).create(&values).await {
            Ok(Some(row)) => Ok(row),
            Ok(None) => {
                tracing::error!(table, "insert returned no row");
                Err(AppError::CreateFailed(format!("error creating {}", table)))
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::info!(table, error = %e, "duplicate name on create");
                Err(AppError::Conflict(format!(
                    "{} with that {} already exists",
                    table,
                    R::TABLE.name_column
                )))
            }
            Err(e) => {
                tracing::error!(table, error = %e, "error creating row");
                Err(AppError::CreateFailed(format!("error creating {}", table)))
            }
        }
    }

    pub async fn list(
        state: &AppState,
        user: &CurrentUser,
        params: ListParams,
    ) -> Result<Page<R::Row>, AppError> {
        authorize(user, R::PERMISSIONS.list)?;
        let page_number = params.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_number < 1 || page_size < 1 {
            return Err(AppError::Validation(
                "page_number and page_size must be at least 1".into(),
            ));
        }

        let rows = ResourceRepository::<R>::new(&state.pool)
            .list(
                params.search.as_deref(),
                params.order.as_deref(),
                params.direction.as_deref(),
            )
            .await?;
        paginate(rows, page_number, page_size, &state.route_for(R::TABLE.segment))
    }

    pub async fn get(state: &AppState, user: &CurrentUser, raw_id: &str) -> Result<R::Row, AppError> {
        authorize(user, R::PERMISSIONS.get)?;
        let id = parse_id(raw_id)?;
        Self::fetch(state, id).await
    }

    /// Overlay the fields present in the update payload on the stored row and write it back.
    pub async fn update(
        state: &AppState,
        user: &CurrentUser,
        raw_id: &str,
        body: Value,
    ) -> Result<R::Row, AppError> {
        authorize(user, R::PERMISSIONS.update)?;
        let id = parse_id(raw_id)?;
        let input: R::Update = embedded(body, R::UPDATE_KEY)?;
        input.validate()?;

        let current = Self::fetch(state, id).await?;
        let mut values = to_map(&current)?;
        for (k, v) in to_map(&input)? {
            values.insert(k, v);
        }
        values.insert("updated_by".into(), Value::String(user.id.to_string()));
        values.insert("updated_at".into(), now());

        let table = R::TABLE.table;
        match ResourceRepository::<R>::new(&state.pool).update(id, &values).await {
            Ok(Some(updated)) => Self::fetch(state, updated).await,
            Ok(None) => {
                tracing::info!(table, %id, "row vanished before update");
                Err(AppError::NotFound(format!("{} {}", table, id)))
            }
            Err(e) => {
                tracing::error!(table, %id, error = %e, "update rejected");
                Err(AppError::InvalidUpdate(e.to_string()))
            }
        }
    }

    pub async fn delete(state: &AppState, user: &CurrentUser, raw_id: &str) -> Result<DeletedId, AppError> {
        authorize(user, R::PERMISSIONS.delete)?;
        let id = parse_id(raw_id)?;
        match ResourceRepository::<R>::new(&state.pool).delete(id).await? {
            Some(id) => Ok(DeletedId { id }),
            None => {
                tracing::info!(table = R::TABLE.table, %id, "delete target not found");
                Err(AppError::NotFound(format!("{} {}", R::TABLE.table, id)))
            }
        }
    }

    async fn fetch(state: &AppState, id: Uuid) -> Result<R::Row, AppError> {
        ResourceRepository::<R>::new(&state.pool)
            .get(id)
            .await?
            .ok_or_else(|| {
                tracing::info!(table = R::TABLE.table, %id, "row not found");
                AppError::NotFound(format!("{} {}", R::TABLE.table, id))
            })
    }
}
