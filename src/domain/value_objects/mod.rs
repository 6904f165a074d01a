//! Value objects - Typed identifiers and id allocation

mod ids;

pub use ids::{AbilityId, CharacterId, EquipmentId, IdAllocator};
