//! Entity CRUD handlers: list, create, update, delete. Generic over the resource; the router
//! instantiates one set per table.

use crate::error::AppError;
use crate::extractors::{parse_id, JsonBody};
use crate::models::Resource;
use crate::response::Message;
use crate::state::AppState;
use crate::store::{Repository, Store};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list<E>(State(state): State<AppState>) -> Result<Json<Vec<E>>, AppError>
where
    E: Resource,
    dyn Store: Repository<E>,
{
    let rows = Repository::<E>::list(state.store.as_ref()).await?;
    Ok(Json(rows))
}

pub async fn create<E>(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<E::Create>,
) -> Result<(StatusCode, Json<E>), AppError>
where
    E: Resource,
    dyn Store: Repository<E>,
{
    let row = Repository::<E>::create(state.store.as_ref(), input).await?;
    tracing::info!(resource = E::NAME, "created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update<E>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(input): JsonBody<E::Update>,
) -> Result<Json<Message>, AppError>
where
    E: Resource,
    dyn Store: Repository<E>,
{
    let id = parse_id(&id_str, E::NAME)?;
    Repository::<E>::update(state.store.as_ref(), id, input).await?;
    Ok(Json(Message::updated(E::LABEL)))
}

pub async fn delete<E>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Message>, AppError>
where
    E: Resource,
    dyn Store: Repository<E>,
{
    let id = parse_id(&id_str, E::NAME)?;
    Repository::<E>::delete(state.store.as_ref(), id).await?;
    Ok(Json(Message::deleted(E::LABEL)))
}
