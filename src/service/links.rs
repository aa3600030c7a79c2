//! Link service: attach and detach items (raw materials, products) to an owner row.

use super::resource::{authorize, DeletedId};
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::repository::LinkRepository;
use crate::resources::links::{LinkCreate, LinkRow, LINK_KEY};
use crate::resources::Link;
use crate::service::validation::{embedded, parse_id, Validate};
use crate::state::AppState;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::marker::PhantomData;
use uuid::Uuid;

pub struct LinkService<L>(PhantomData<L>);

impl<L: Link> LinkService<L> {
    fn repo(state: &AppState) -> LinkRepository<'_> {
        LinkRepository::new(&state.pool, L::DEF)
    }

    async fn require_owner(state: &AppState, owner_id: Uuid) -> Result<(), AppError> {
        if Self::repo(state).owner_exists(owner_id).await? {
            return Ok(());
        }
        tracing::info!(table = L::DEF.owner.table, id = %owner_id, "link owner not found");
        Err(AppError::NotFound(format!("{} {}", L::DEF.owner.table, owner_id)))
    }

    pub async fn list(state: &AppState, user: &CurrentUser, raw_owner: &str) -> Result<Vec<LinkRow>, AppError> {
        authorize(user, L::DEF.read_permission)?;
        let owner_id = parse_id(raw_owner)?;
        Self::require_owner(state, owner_id).await?;
        Ok(Self::repo(state).list(owner_id).await?)
    }

    pub async fn create(
        state: &AppState,
        user: &CurrentUser,
        raw_owner: &str,
        body: Value,
    ) -> Result<LinkRow, AppError> {
        authorize(user, L::DEF.write_permission)?;
        let owner_id = parse_id(raw_owner)?;
        let input: LinkCreate = embedded(body, LINK_KEY)?;
        input.validate()?;
        Self::require_owner(state, owner_id).await?;

        let repo = Self::repo(state);
        if !repo.item_exists(input.item_id).await? {
            tracing::info!(table = L::DEF.item.table, id = %input.item_id, "link item not found");
            return Err(AppError::NotFound(format!("{} {}", L::DEF.item.table, input.item_id)));
        }

        let user_id = json!(user.id.to_string());
        let stamp = json!(Utc::now().to_rfc3339());
        let mut values = Map::new();
        values.insert("id".into(), json!(Uuid::new_v4().to_string()));
        values.insert("required_quantity".into(), json!(input.required_quantity));
        values.insert(L::DEF.item_column.into(), json!(input.item_id.to_string()));
        values.insert(L::DEF.owner_column.into(), json!(owner_id.to_string()));
        values.insert("is_active".into(), Value::Bool(true));
        values.insert("created_by".into(), user_id.clone());
        values.insert("created_at".into(), stamp.clone());
        values.insert("updated_by".into(), user_id);
        values.insert("updated_at".into(), stamp);

        match repo.create(&values).await {
            Ok(Some(row)) => Ok(row),
            Ok(None) => {
                tracing::error!(table = L::DEF.table, "link insert returned no row");
                Err(AppError::CreateFailed(format!("error creating {}", L::DEF.table)))
            }
            Err(e) => {
                tracing::error!(table = L::DEF.table, error = %e, "error creating link");
                Err(AppError::CreateFailed(format!("error creating {}", L::DEF.table)))
            }
        }
    }

    pub async fn delete(
        state: &AppState,
        user: &CurrentUser,
        raw_owner: &str,
        raw_link: &str,
    ) -> Result<DeletedId, AppError> {
        authorize(user, L::DEF.write_permission)?;
        let owner_id = parse_id(raw_owner)?;
        let link_id = parse_id(raw_link)?;
        match Self::repo(state).delete(owner_id, link_id).await? {
            Some(id) => Ok(DeletedId { id }),
            None => {
                tracing::info!(table = L::DEF.table, id = %link_id, "link not found");
                Err(AppError::NotFound(format!("{} {}", L::DEF.table, link_id)))
            }
        }
    }
}
