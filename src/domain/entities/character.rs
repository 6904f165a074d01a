//! Character entity - a character sheet and its owned sub-resources
//!
//! A [`Character`] is the aggregate root: it exclusively owns its ability and
//! equipment collections, and both vanish with it when it is deleted. Nested
//! collections keep insertion order, which is the order listings report.

use crate::domain::value_objects::{AbilityId, CharacterId, EquipmentId};

/// The fixed set of ability names a sheet may carry.
///
/// Duplicate names on one character are allowed; only membership in this set
/// is validated at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityName {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl AbilityName {
    /// Parse the wire form ("STR", "DEX", ...). Returns `None` for anything
    /// outside the fixed set, including lowercase spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STR" => Some(Self::Str),
            "DEX" => Some(Self::Dex),
            "CON" => Some(Self::Con),
            "INT" => Some(Self::Int),
            "WIS" => Some(Self::Wis),
            "CHA" => Some(Self::Cha),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Dex => "DEX",
            Self::Con => "CON",
            Self::Int => "INT",
            Self::Wis => "WIS",
            Self::Cha => "CHA",
        }
    }
}

impl std::fmt::Display for AbilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ability score owned by exactly one character.
#[derive(Debug, Clone)]
pub struct AbilityScore {
    pub id: AbilityId,
    /// Immutable after creation; the update path only touches `score`.
    pub name: AbilityName,
    pub score: i32,
}

/// A piece of equipment owned by exactly one character.
#[derive(Debug, Clone)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub quantity: i32,
}

/// A character sheet
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub race: String,
    pub character_class: String,
    pub level: i32,
    pub abilities: Vec<AbilityScore>,
    pub equipment: Vec<Equipment>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        race: impl Into<String>,
        character_class: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            race: race.into(),
            character_class: character_class.into(),
            level: 1,
            abilities: Vec::new(),
            equipment: Vec::new(),
        }
    }

    pub fn ability(&self, id: AbilityId) -> Option<&AbilityScore> {
        self.abilities.iter().find(|a| a.id == id)
    }

    pub fn ability_mut(&mut self, id: AbilityId) -> Option<&mut AbilityScore> {
        self.abilities.iter_mut().find(|a| a.id == id)
    }

    pub fn remove_ability(&mut self, id: AbilityId) -> Option<AbilityScore> {
        let pos = self.abilities.iter().position(|a| a.id == id)?;
        Some(self.abilities.remove(pos))
    }

    pub fn equipment_item(&self, id: EquipmentId) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn equipment_item_mut(&mut self, id: EquipmentId) -> Option<&mut Equipment> {
        self.equipment.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_equipment(&mut self, id: EquipmentId) -> Option<Equipment> {
        let pos = self.equipment.iter().position(|e| e.id == id)?;
        Some(self.equipment.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_name_parse() {
        assert_eq!(AbilityName::parse("STR"), Some(AbilityName::Str));
        assert_eq!(AbilityName::parse("CHA"), Some(AbilityName::Cha));
        assert_eq!(AbilityName::parse("str"), None);
        assert_eq!(AbilityName::parse("LUCK"), None);
        assert_eq!(AbilityName::parse(""), None);
    }

    #[test]
    fn test_new_character_defaults() {
        let character = Character::new(CharacterId::from(1), "Aria", "", "");
        assert_eq!(character.level, 1);
        assert!(character.abilities.is_empty());
        assert!(character.equipment.is_empty());
    }

    #[test]
    fn test_remove_ability_keeps_order() {
        let mut character = Character::new(CharacterId::from(1), "Aria", "", "");
        for (i, name) in [AbilityName::Str, AbilityName::Dex, AbilityName::Con]
            .into_iter()
            .enumerate()
        {
            character.abilities.push(AbilityScore {
                id: AbilityId::from(i as u64 + 1),
                name,
                score: 10,
            });
        }

        let removed = character.remove_ability(AbilityId::from(2));
        assert_eq!(removed.map(|a| a.name), Some(AbilityName::Dex));
        let remaining: Vec<_> = character.abilities.iter().map(|a| a.name).collect();
        assert_eq!(remaining, vec![AbilityName::Str, AbilityName::Con]);
    }
}
