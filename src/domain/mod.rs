//! Domain layer: entities, value objects and pure decoding logic.

pub mod directory;
pub mod foundation;
pub mod identity;
pub mod role;
