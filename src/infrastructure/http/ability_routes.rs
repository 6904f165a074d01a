//! Ability score API routes
//!
//! The store publishes an event to the owning character's channel as part of
//! every successful create/update/delete; the HTTP response never waits on
//! delivery.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    AbilityResponseDto, CreateAbilityRequestDto, UpdateAbilityRequestDto,
};
use crate::domain::value_objects::{AbilityId, CharacterId};
use crate::infrastructure::http::{store_error_response, ApiError};
use crate::infrastructure::state::AppState;

/// List a character's abilities in creation order
pub async fn list_abilities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<AbilityResponseDto>>, ApiError> {
    let abilities = state
        .store
        .list_abilities(CharacterId::from(id))
        .await
        .map_err(store_error_response)?;

    Ok(Json(abilities.into_iter().map(Into::into).collect()))
}

/// Add an ability score to a character
pub async fn create_ability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<CreateAbilityRequestDto>,
) -> Result<(StatusCode, Json<AbilityResponseDto>), ApiError> {
    let ability = state
        .store
        .create_ability(
            CharacterId::from(id),
            req.name.as_deref().unwrap_or(""),
            req.score,
        )
        .await
        .map_err(store_error_response)?;

    Ok((StatusCode::CREATED, Json(AbilityResponseDto::from(ability))))
}

/// Get one ability score
pub async fn get_ability(
    State(state): State<Arc<AppState>>,
    Path((id, ability_id)): Path<(u64, u64)>,
) -> Result<Json<AbilityResponseDto>, ApiError> {
    let ability = state
        .store
        .get_ability(CharacterId::from(id), AbilityId::from(ability_id))
        .await
        .map_err(store_error_response)?;

    Ok(Json(AbilityResponseDto::from(ability)))
}

/// Update an ability's score (the name is immutable)
pub async fn update_ability(
    State(state): State<Arc<AppState>>,
    Path((id, ability_id)): Path<(u64, u64)>,
    Json(req): Json<UpdateAbilityRequestDto>,
) -> Result<Json<AbilityResponseDto>, ApiError> {
    let ability = state
        .store
        .update_ability(CharacterId::from(id), AbilityId::from(ability_id), req.score)
        .await
        .map_err(store_error_response)?;

    Ok(Json(AbilityResponseDto::from(ability)))
}

/// Remove an ability score
pub async fn delete_ability(
    State(state): State<Arc<AppState>>,
    Path((id, ability_id)): Path<(u64, u64)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_ability(CharacterId::from(id), AbilityId::from(ability_id))
        .await
        .map_err(store_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::UpdateCharacterRequestDto;
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::http::character_routes;
    use crate::infrastructure::subscriptions::ClientId;
    use crate::infrastructure::websocket::ServerMessage;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(AppConfig { server_port: 0 }))
    }

    async fn subscribe(state: &AppState, character_id: u64) -> UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        state
            .subscriptions
            .write()
            .await
            .subscribe(CharacterId::from(character_id), ClientId::new(), tx);
        rx
    }

    #[tokio::test]
    async fn test_create_ability_notifies_only_that_characters_channel() {
        let state = test_state();
        let aria = state.store.create_character("Aria", "", "").await;
        let borin = state.store.create_character("Borin", "", "").await;

        let mut rx_aria = subscribe(&state, aria.id.as_u64()).await;
        let mut rx_borin = subscribe(&state, borin.id.as_u64()).await;

        let (status, Json(dto)) = create_ability(
            State(Arc::clone(&state)),
            Path(aria.id.as_u64()),
            Json(CreateAbilityRequestDto {
                name: Some("STR".to_string()),
                score: Some(12),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        match rx_aria.try_recv().unwrap() {
            ServerMessage::AbilityCreated {
                character_id,
                ability,
            } => {
                assert_eq!(character_id, aria.id.as_u64());
                assert_eq!(ability.id, dto.id);
                assert_eq!(ability.score, 12);
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(rx_aria.try_recv().is_err(), "exactly one event expected");
        assert!(
            rx_borin.try_recv().is_err(),
            "other characters' subscribers must receive nothing"
        );
    }

    #[tokio::test]
    async fn test_invalid_ability_name_maps_to_bad_request() {
        let state = test_state();
        let aria = state.store.create_character("Aria", "", "").await;
        let mut rx = subscribe(&state, aria.id.as_u64()).await;

        let (status, Json(body)) = create_ability(
            State(Arc::clone(&state)),
            Path(aria.id.as_u64()),
            Json(CreateAbilityRequestDto {
                name: Some("LUCK".to_string()),
                score: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid ability name");
        assert!(rx.try_recv().is_err(), "rejected creates must not broadcast");
    }

    #[tokio::test]
    async fn test_character_field_update_does_not_broadcast() {
        let state = test_state();
        let aria = state.store.create_character("Aria", "", "").await;
        let mut rx = subscribe(&state, aria.id.as_u64()).await;

        character_routes::update_character(
            State(Arc::clone(&state)),
            Path(aria.id.as_u64()),
            Json(UpdateCharacterRequestDto {
                level: Some(5),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert!(
            rx.try_recv().is_err(),
            "character-level updates are not mirrored"
        );
    }

    #[tokio::test]
    async fn test_unsubscribed_client_receives_no_further_events() {
        let state = test_state();
        let aria = state.store.create_character("Aria", "", "").await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let client_id = ClientId::new();
        state
            .subscriptions
            .write()
            .await
            .subscribe(aria.id, client_id, tx);

        let (_, Json(dto)) = create_ability(
            State(Arc::clone(&state)),
            Path(aria.id.as_u64()),
            Json(CreateAbilityRequestDto {
                name: Some("DEX".to_string()),
                score: Some(14),
            }),
        )
        .await
        .unwrap();
        assert!(rx.try_recv().is_ok());

        state
            .subscriptions
            .write()
            .await
            .unsubscribe(aria.id, client_id);

        update_ability(
            State(Arc::clone(&state)),
            Path((aria.id.as_u64(), dto.id)),
            Json(UpdateAbilityRequestDto { score: Some(16) }),
        )
        .await
        .unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_ability_broadcasts_the_removed_id() {
        let state = test_state();
        let aria = state.store.create_character("Aria", "", "").await;
        let ability = state
            .store
            .create_ability(aria.id, "CON", None)
            .await
            .unwrap();
        let mut rx = subscribe(&state, aria.id.as_u64()).await;

        let status = delete_ability(
            State(Arc::clone(&state)),
            Path((aria.id.as_u64(), ability.id.as_u64())),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        match rx.try_recv().unwrap() {
            ServerMessage::AbilityDeleted {
                character_id,
                ability_id,
            } => {
                assert_eq!(character_id, aria.id.as_u64());
                assert_eq!(ability_id, ability.id.as_u64());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
