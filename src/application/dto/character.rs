//! Character sheet DTOs shared by the REST and WebSocket boundaries

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AbilityScore, Character, Equipment};

/// Full character sheet as returned by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterResponseDto {
    pub id: u64,
    pub name: String,
    pub race: String,
    pub character_class: String,
    pub level: i32,
    pub abilities: Vec<AbilityResponseDto>,
    pub equipment: Vec<EquipmentResponseDto>,
}

impl From<Character> for CharacterResponseDto {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.as_u64(),
            name: character.name,
            race: character.race,
            character_class: character.character_class,
            level: character.level,
            abilities: character.abilities.into_iter().map(Into::into).collect(),
            equipment: character.equipment.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityResponseDto {
    pub id: u64,
    pub name: String,
    pub score: i32,
}

impl From<AbilityScore> for AbilityResponseDto {
    fn from(ability: AbilityScore) -> Self {
        Self {
            id: ability.id.as_u64(),
            name: ability.name.as_str().to_string(),
            score: ability.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentResponseDto {
    pub id: u64,
    pub name: String,
    pub quantity: i32,
}

impl From<Equipment> for EquipmentResponseDto {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id.as_u64(),
            name: equipment.name,
            quantity: equipment.quantity,
        }
    }
}

/// Body for `POST /characters`. A missing name falls back to "Unnamed".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacterRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub character_class: Option<String>,
}

/// Body for `PUT/PATCH /characters/{id}`. Absent fields are left untouched;
/// unknown fields are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharacterRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub character_class: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAbilityRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<i32>,
}

/// Ability updates only ever touch the score; the name is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAbilityRequestDto {
    #[serde(default)]
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEquipmentRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEquipmentRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
}
