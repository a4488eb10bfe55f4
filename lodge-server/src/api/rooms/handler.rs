//! Room API Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::db::repository::RoomRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

/// GET /api/rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Room>>>> {
    let repo = RoomRepository::new(state.get_db());
    let rooms = repo.find_all().await?;
    Ok(ok(rooms))
}

/// GET /api/rooms/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Room>>> {
    let repo = RoomRepository::new(state.get_db());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;
    Ok(ok(room))
}

/// GET /api/rooms/slug/{slug} - public page lookup
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<Room>>> {
    let repo = RoomRepository::new(state.get_db());
    let room = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room '{}' not found", slug)))?;
    Ok(ok(room))
}

/// POST /api/rooms
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<AppResponse<Room>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = RoomRepository::new(state.get_db());
    let room = repo.create(payload).await?;
    Ok(ok(room))
}

/// PUT /api/rooms/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<AppResponse<Room>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = RoomRepository::new(state.get_db());
    let room = repo.update(&id, payload).await?;
    Ok(ok(room))
}

/// DELETE /api/rooms/{id} - refused while promotions target the room
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = RoomRepository::new(state.get_db());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
