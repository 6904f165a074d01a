//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Character and its owned AbilityScore/Equipment collections
//! - Value Objects: Typed identifiers and the id allocator

pub mod entities;
pub mod value_objects;
