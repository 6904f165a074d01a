//! Character API routes
//!
//! Character-level field updates and deletes deliberately do not broadcast;
//! only ability/equipment mutations push channel events.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CharacterResponseDto, CreateCharacterRequestDto, UpdateCharacterRequestDto,
};
use crate::application::services::CharacterUpdate;
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::http::{store_error_response, ApiError};
use crate::infrastructure::state::AppState;

/// List all characters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<CharacterResponseDto>> {
    let characters = state.store.list_characters().await;
    Json(characters.into_iter().map(CharacterResponseDto::from).collect())
}

/// Create a character
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCharacterRequestDto>,
) -> (StatusCode, Json<CharacterResponseDto>) {
    let character = state
        .store
        .create_character(
            req.name.unwrap_or_else(|| "Unnamed".to_string()),
            req.race.unwrap_or_default(),
            req.character_class.unwrap_or_default(),
        )
        .await;

    (StatusCode::CREATED, Json(CharacterResponseDto::from(character)))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<CharacterResponseDto>, ApiError> {
    let character = state
        .store
        .get_character(CharacterId::from(id))
        .await
        .map_err(store_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Apply a partial update to a character's top-level fields
pub async fn update_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateCharacterRequestDto>,
) -> Result<Json<CharacterResponseDto>, ApiError> {
    let update = CharacterUpdate {
        name: req.name,
        race: req.race,
        character_class: req.character_class,
        level: req.level,
    };

    let character = state
        .store
        .update_character(CharacterId::from(id), update)
        .await
        .map_err(store_error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Delete a character and everything it owns
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_character(CharacterId::from(id))
        .await
        .map_err(store_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
