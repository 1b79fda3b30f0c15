//! Entity records shared by every simulation system.
//!
//! Entities are plain mutable records. Identity and ordering go through a
//! small [`EntityKey`] value instead of per-type comparison impls, so any two
//! entities can be compared or deduplicated without knowing their concrete
//! type.

use serde::{Deserialize, Serialize};

pub mod item;
pub mod party;
pub mod person;
pub mod vehicle;

pub use item::{Inventory, Item, SupplyKind};
pub use party::Party;
pub use person::{Affliction, AfflictionKind, AfflictionTick, HealthStatus, Person, Profession};
pub use vehicle::{Pace, Rations, Vehicle, VehicleStatus, WagonPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Person,
    Vehicle,
    Item,
    Location,
}

/// Equality and ordering contract for entities, passed by value.
///
/// Names are folded to ASCII lowercase on construction, so "Ann" and "ANN"
/// are the same entity and keys sort by category, then folded name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    category: EntityCategory,
    name: String,
}

impl EntityKey {
    #[must_use]
    pub fn new(category: EntityCategory, name: &str) -> Self {
        Self {
            category,
            name: name.trim().to_ascii_lowercase(),
        }
    }

    #[must_use]
    pub const fn category(&self) -> EntityCategory {
        self.category
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub trait Entity {
    fn name(&self) -> &str;

    fn category(&self) -> EntityCategory;

    fn key(&self) -> EntityKey {
        EntityKey::new(self.category(), self.name())
    }
}
