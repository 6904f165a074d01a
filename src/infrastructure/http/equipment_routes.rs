//! Equipment API routes
//!
//! Mirrors the ability routes: the store publishes an event to the owning
//! character's channel as part of every successful mutation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CreateEquipmentRequestDto, EquipmentResponseDto, UpdateEquipmentRequestDto,
};
use crate::application::services::EquipmentUpdate;
use crate::domain::value_objects::{CharacterId, EquipmentId};
use crate::infrastructure::http::{store_error_response, ApiError};
use crate::infrastructure::state::AppState;

/// List a character's equipment in creation order
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<EquipmentResponseDto>>, ApiError> {
    let equipment = state
        .store
        .list_equipment(CharacterId::from(id))
        .await
        .map_err(store_error_response)?;

    Ok(Json(equipment.into_iter().map(Into::into).collect()))
}

/// Add an equipment item to a character
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<CreateEquipmentRequestDto>,
) -> Result<(StatusCode, Json<EquipmentResponseDto>), ApiError> {
    let equipment = state
        .store
        .create_equipment(
            CharacterId::from(id),
            req.name.as_deref().unwrap_or(""),
            req.quantity,
        )
        .await
        .map_err(store_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(EquipmentResponseDto::from(equipment)),
    ))
}

/// Get one equipment item
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path((id, equip_id)): Path<(u64, u64)>,
) -> Result<Json<EquipmentResponseDto>, ApiError> {
    let equipment = state
        .store
        .get_equipment(CharacterId::from(id), EquipmentId::from(equip_id))
        .await
        .map_err(store_error_response)?;

    Ok(Json(EquipmentResponseDto::from(equipment)))
}

/// Update an equipment item's name and/or quantity
pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    Path((id, equip_id)): Path<(u64, u64)>,
    Json(req): Json<UpdateEquipmentRequestDto>,
) -> Result<Json<EquipmentResponseDto>, ApiError> {
    let update = EquipmentUpdate {
        name: req.name,
        quantity: req.quantity,
    };

    let equipment = state
        .store
        .update_equipment(CharacterId::from(id), EquipmentId::from(equip_id), update)
        .await
        .map_err(store_error_response)?;

    Ok(Json(EquipmentResponseDto::from(equipment)))
}

/// Remove an equipment item
pub async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    Path((id, equip_id)): Path<(u64, u64)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_equipment(CharacterId::from(id), EquipmentId::from(equip_id))
        .await
        .map_err(store_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
