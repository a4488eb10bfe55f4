//! Hotel Service API Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{HotelService, HotelServiceCreate, HotelServiceUpdate};
use crate::db::repository::HotelServiceRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

/// GET /api/hotel-services
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<HotelService>>>> {
    let repo = HotelServiceRepository::new(state.get_db());
    let services = repo.find_all().await?;
    Ok(ok(services))
}

/// GET /api/hotel-services/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<HotelService>>> {
    let repo = HotelServiceRepository::new(state.get_db());
    let service = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel service {} not found", id)))?;
    Ok(ok(service))
}

/// GET /api/hotel-services/slug/{slug} - public page lookup
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<HotelService>>> {
    let repo = HotelServiceRepository::new(state.get_db());
    let service = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel service '{}' not found", slug)))?;
    Ok(ok(service))
}

/// POST /api/hotel-services
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HotelServiceCreate>,
) -> AppResult<Json<AppResponse<HotelService>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = HotelServiceRepository::new(state.get_db());
    let service = repo.create(payload).await?;
    Ok(ok(service))
}

/// PUT /api/hotel-services/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<HotelServiceUpdate>,
) -> AppResult<Json<AppResponse<HotelService>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = HotelServiceRepository::new(state.get_db());
    let service = repo.update(&id, payload).await?;
    Ok(ok(service))
}

/// DELETE /api/hotel-services/{id} - refused while promotions target it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = HotelServiceRepository::new(state.get_db());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
