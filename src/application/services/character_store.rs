//! Character store - owns every character sheet aggregate
//!
//! All mutations go through this store. Each character aggregate sits behind
//! its own `RwLock`, so operations on different characters run concurrently
//! while operations on the same character are serialized. Lookups return
//! cloned snapshots; callers never observe a partially-applied mutation.
//!
//! Validation runs before id allocation, so a rejected create never consumes
//! an id and the allocator sequence stays dense for successful creates.
//!
//! Successful ability/equipment mutations push an event to the owning
//! character's channel. The event is enqueued while the aggregate's write
//! guard is still held, so per-channel delivery order always matches commit
//! order; sends are non-blocking, so no observer can stall a mutation.
//! Character-level field updates and character deletion do not push events.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::dto::{AbilityResponseDto, EquipmentResponseDto};
use crate::domain::entities::{AbilityName, AbilityScore, Character, Equipment};
use crate::domain::value_objects::{AbilityId, CharacterId, EquipmentId, IdAllocator};
use crate::infrastructure::subscriptions::SubscriptionManager;
use crate::infrastructure::websocket::ServerMessage;

/// Error types for store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Ability not found: {0}")]
    AbilityNotFound(AbilityId),

    #[error("Equipment not found: {0}")]
    EquipmentNotFound(EquipmentId),

    #[error("Invalid ability name: {0:?}")]
    InvalidAbilityName(String),

    #[error("Equipment name is required")]
    InvalidEquipmentName,
}

/// Partial update for character-level fields. Absent fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct CharacterUpdate {
    pub name: Option<String>,
    pub race: Option<String>,
    pub character_class: Option<String>,
    pub level: Option<i32>,
}

/// Partial update for an equipment item.
#[derive(Debug, Clone, Default)]
pub struct EquipmentUpdate {
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

struct CharacterSlot {
    id: CharacterId,
    character: Arc<RwLock<Character>>,
}

/// In-memory store for character sheets.
///
/// Single-process and memory-resident: state lives exactly as long as the
/// process. Ids are issued by per-kind allocators and survive deletions
/// (they are never reissued). Ability and equipment ids are drawn from one
/// global counter each, not per character.
pub struct CharacterStore {
    /// Aggregates in creation order
    characters: RwLock<Vec<CharacterSlot>>,
    character_ids: IdAllocator,
    ability_ids: IdAllocator,
    equipment_ids: IdAllocator,
    /// Channels to notify of committed ability/equipment mutations
    subscriptions: Arc<RwLock<SubscriptionManager>>,
}

impl CharacterStore {
    pub fn new(subscriptions: Arc<RwLock<SubscriptionManager>>) -> Self {
        Self {
            characters: RwLock::new(Vec::new()),
            character_ids: IdAllocator::new(),
            ability_ids: IdAllocator::new(),
            equipment_ids: IdAllocator::new(),
            subscriptions,
        }
    }

    /// Find a character's aggregate handle without holding the collection
    /// lock across the caller's inner-lock acquisition.
    async fn aggregate(&self, id: CharacterId) -> Result<Arc<RwLock<Character>>, StoreError> {
        let characters = self.characters.read().await;
        characters
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| Arc::clone(&slot.character))
            .ok_or(StoreError::CharacterNotFound(id))
    }

    /// Deliver an event to the owning character's channel.
    ///
    /// Callers invoke this while still holding the aggregate's write guard,
    /// which pins per-channel delivery order to commit order. Sends are
    /// fire-and-forget, so the guard is not held for longer than the enqueue.
    async fn publish(&self, character_id: CharacterId, message: ServerMessage) {
        let subscriptions = self.subscriptions.read().await;
        subscriptions.broadcast_to_channel(character_id, &message);
    }

    // === Characters ===

    /// Create a character sheet. Never fails; ids are sequential per process.
    pub async fn create_character(
        &self,
        name: impl Into<String>,
        race: impl Into<String>,
        character_class: impl Into<String>,
    ) -> Character {
        let id = CharacterId::from(self.character_ids.next());
        let character = Character::new(id, name, race, character_class);
        let snapshot = character.clone();

        let mut characters = self.characters.write().await;
        characters.push(CharacterSlot {
            id,
            character: Arc::new(RwLock::new(character)),
        });

        tracing::info!("Created character {} ({})", snapshot.name, id);
        snapshot
    }

    /// List all characters in creation order.
    pub async fn list_characters(&self) -> Vec<Character> {
        let handles: Vec<Arc<RwLock<Character>>> = {
            let characters = self.characters.read().await;
            characters
                .iter()
                .map(|slot| Arc::clone(&slot.character))
                .collect()
        };

        let mut snapshots = Vec::with_capacity(handles.len());
        for handle in handles {
            snapshots.push(handle.read().await.clone());
        }
        snapshots
    }

    pub async fn get_character(&self, id: CharacterId) -> Result<Character, StoreError> {
        let aggregate = self.aggregate(id).await?;
        let character = aggregate.read().await;
        Ok(character.clone())
    }

    /// Apply a partial update to character-level fields. Does not push an
    /// event; only nested ability/equipment mutations are mirrored.
    pub async fn update_character(
        &self,
        id: CharacterId,
        update: CharacterUpdate,
    ) -> Result<Character, StoreError> {
        let aggregate = self.aggregate(id).await?;
        let mut character = aggregate.write().await;

        if let Some(name) = update.name {
            character.name = name;
        }
        if let Some(race) = update.race {
            character.race = race;
        }
        if let Some(character_class) = update.character_class {
            character.character_class = character_class;
        }
        if let Some(level) = update.level {
            character.level = level;
        }

        Ok(character.clone())
    }

    /// Delete a character and everything it owns. Does not push an event.
    pub async fn delete_character(&self, id: CharacterId) -> Result<(), StoreError> {
        let mut characters = self.characters.write().await;
        let pos = characters
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(StoreError::CharacterNotFound(id))?;
        // Nested abilities/equipment go with the aggregate
        characters.remove(pos);

        tracing::info!("Deleted character {}", id);
        Ok(())
    }

    // === Abilities ===

    pub async fn list_abilities(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AbilityScore>, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let character = aggregate.read().await;
        Ok(character.abilities.clone())
    }

    /// Add an ability score to a character.
    ///
    /// The name must be one of the six fixed abilities; it is validated
    /// before an id is allocated. Duplicate names per character are allowed.
    pub async fn create_ability(
        &self,
        character_id: CharacterId,
        name: &str,
        score: Option<i32>,
    ) -> Result<AbilityScore, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let name =
            AbilityName::parse(name).ok_or_else(|| StoreError::InvalidAbilityName(name.into()))?;

        let mut character = aggregate.write().await;
        let ability = AbilityScore {
            id: AbilityId::from(self.ability_ids.next()),
            name,
            score: score.unwrap_or(10),
        };
        character.abilities.push(ability.clone());

        self.publish(
            character_id,
            ServerMessage::AbilityCreated {
                character_id: character_id.as_u64(),
                ability: AbilityResponseDto::from(ability.clone()),
            },
        )
        .await;

        tracing::debug!(
            "Created ability {} ({}) on character {}",
            ability.name,
            ability.id,
            character_id
        );
        Ok(ability)
    }

    pub async fn get_ability(
        &self,
        character_id: CharacterId,
        ability_id: AbilityId,
    ) -> Result<AbilityScore, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let character = aggregate.read().await;
        character
            .ability(ability_id)
            .cloned()
            .ok_or(StoreError::AbilityNotFound(ability_id))
    }

    /// Update an ability's score. The name is immutable after creation.
    pub async fn update_ability(
        &self,
        character_id: CharacterId,
        ability_id: AbilityId,
        score: Option<i32>,
    ) -> Result<AbilityScore, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let mut character = aggregate.write().await;
        let updated = {
            let ability = character
                .ability_mut(ability_id)
                .ok_or(StoreError::AbilityNotFound(ability_id))?;
            if let Some(score) = score {
                ability.score = score;
            }
            ability.clone()
        };

        self.publish(
            character_id,
            ServerMessage::AbilityUpdated {
                character_id: character_id.as_u64(),
                ability: AbilityResponseDto::from(updated.clone()),
            },
        )
        .await;

        Ok(updated)
    }

    /// Remove an ability, returning the removed entity.
    pub async fn delete_ability(
        &self,
        character_id: CharacterId,
        ability_id: AbilityId,
    ) -> Result<AbilityScore, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let mut character = aggregate.write().await;
        let removed = character
            .remove_ability(ability_id)
            .ok_or(StoreError::AbilityNotFound(ability_id))?;

        self.publish(
            character_id,
            ServerMessage::AbilityDeleted {
                character_id: character_id.as_u64(),
                ability_id: ability_id.as_u64(),
            },
        )
        .await;

        Ok(removed)
    }

    // === Equipment ===

    pub async fn list_equipment(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<Equipment>, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let character = aggregate.read().await;
        Ok(character.equipment.clone())
    }

    /// Add an equipment item. The name must be non-empty; validated before
    /// an id is allocated.
    pub async fn create_equipment(
        &self,
        character_id: CharacterId,
        name: &str,
        quantity: Option<i32>,
    ) -> Result<Equipment, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        if name.is_empty() {
            return Err(StoreError::InvalidEquipmentName);
        }

        let mut character = aggregate.write().await;
        let equipment = Equipment {
            id: EquipmentId::from(self.equipment_ids.next()),
            name: name.to_string(),
            quantity: quantity.unwrap_or(1),
        };
        character.equipment.push(equipment.clone());

        self.publish(
            character_id,
            ServerMessage::EquipmentCreated {
                character_id: character_id.as_u64(),
                equipment: EquipmentResponseDto::from(equipment.clone()),
            },
        )
        .await;

        tracing::debug!(
            "Created equipment {:?} ({}) on character {}",
            equipment.name,
            equipment.id,
            character_id
        );
        Ok(equipment)
    }

    pub async fn get_equipment(
        &self,
        character_id: CharacterId,
        equipment_id: EquipmentId,
    ) -> Result<Equipment, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let character = aggregate.read().await;
        character
            .equipment_item(equipment_id)
            .cloned()
            .ok_or(StoreError::EquipmentNotFound(equipment_id))
    }

    /// Update an equipment item's name and/or quantity independently.
    pub async fn update_equipment(
        &self,
        character_id: CharacterId,
        equipment_id: EquipmentId,
        update: EquipmentUpdate,
    ) -> Result<Equipment, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let mut character = aggregate.write().await;
        let updated = {
            let equipment = character
                .equipment_item_mut(equipment_id)
                .ok_or(StoreError::EquipmentNotFound(equipment_id))?;
            if let Some(name) = update.name {
                equipment.name = name;
            }
            if let Some(quantity) = update.quantity {
                equipment.quantity = quantity;
            }
            equipment.clone()
        };

        self.publish(
            character_id,
            ServerMessage::EquipmentUpdated {
                character_id: character_id.as_u64(),
                equipment: EquipmentResponseDto::from(updated.clone()),
            },
        )
        .await;

        Ok(updated)
    }

    /// Remove an equipment item, returning the removed entity.
    pub async fn delete_equipment(
        &self,
        character_id: CharacterId,
        equipment_id: EquipmentId,
    ) -> Result<Equipment, StoreError> {
        let aggregate = self.aggregate(character_id).await?;
        let mut character = aggregate.write().await;
        let removed = character
            .remove_equipment(equipment_id)
            .ok_or(StoreError::EquipmentNotFound(equipment_id))?;

        self.publish(
            character_id,
            ServerMessage::EquipmentDeleted {
                character_id: character_id.as_u64(),
                equipment_id: equipment_id.as_u64(),
            },
        )
        .await;

        Ok(removed)
    }
}
