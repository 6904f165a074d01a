//! HTTP REST API routes

mod ability_routes;
mod character_routes;
mod equipment_routes;

use axum::{http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

use crate::application::services::StoreError;
use crate::infrastructure::state::AppState;

/// Error response shape shared by every route: status plus `{"error": ...}`.
pub(crate) type ApiError = (StatusCode, Json<serde_json::Value>);

/// Map a store error to its HTTP status and body.
pub(crate) fn store_error_response(err: StoreError) -> ApiError {
    let (status, message) = match err {
        StoreError::CharacterNotFound(_) => (StatusCode::NOT_FOUND, "Character not found"),
        StoreError::AbilityNotFound(_) => (StatusCode::NOT_FOUND, "Ability not found"),
        StoreError::EquipmentNotFound(_) => (StatusCode::NOT_FOUND, "Equipment not found"),
        StoreError::InvalidAbilityName(_) => (StatusCode::BAD_REQUEST, "Invalid ability name"),
        StoreError::InvalidEquipmentName => {
            (StatusCode::BAD_REQUEST, "Equipment name is required")
        }
    };
    (status, Json(serde_json::json!({ "error": message })))
}

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character routes
        .route(
            "/characters",
            get(character_routes::list_characters).post(character_routes::create_character),
        )
        .route(
            "/characters/{id}",
            get(character_routes::get_character)
                .put(character_routes::update_character)
                .patch(character_routes::update_character)
                .delete(character_routes::delete_character),
        )
        // Ability sub-resources
        .route(
            "/characters/{id}/abilities",
            get(ability_routes::list_abilities).post(ability_routes::create_ability),
        )
        .route(
            "/characters/{id}/abilities/{ability_id}",
            get(ability_routes::get_ability)
                .put(ability_routes::update_ability)
                .patch(ability_routes::update_ability)
                .delete(ability_routes::delete_ability),
        )
        // Equipment sub-resources
        .route(
            "/characters/{id}/equipment",
            get(equipment_routes::list_equipment).post(equipment_routes::create_equipment),
        )
        .route(
            "/characters/{id}/equipment/{equip_id}",
            get(equipment_routes::get_equipment)
                .put(equipment_routes::update_equipment)
                .patch(equipment_routes::update_equipment)
                .delete(equipment_routes::delete_equipment),
        )
}
