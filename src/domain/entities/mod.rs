//! Domain entities

mod character;

pub use character::{AbilityName, AbilityScore, Character, Equipment};
