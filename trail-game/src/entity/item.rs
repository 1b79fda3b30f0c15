use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Entity, EntityCategory};
use crate::numbers::format_cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    Oxen,
    Food,
    Clothing,
    Ammunition,
    Wheel,
    Axle,
    Tongue,
    Cash,
}

impl SupplyKind {
    pub const ALL: [Self; 8] = [
        Self::Oxen,
        Self::Food,
        Self::Clothing,
        Self::Ammunition,
        Self::Wheel,
        Self::Axle,
        Self::Tongue,
        Self::Cash,
    ];

    /// Everything except cash.
    pub const GOODS: [Self; 7] = [
        Self::Oxen,
        Self::Food,
        Self::Clothing,
        Self::Ammunition,
        Self::Wheel,
        Self::Axle,
        Self::Tongue,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Oxen => "oxen",
            Self::Food => "food",
            Self::Clothing => "clothing",
            Self::Ammunition => "ammunition",
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
            Self::Cash => "cash",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oxen => "Oxen",
            Self::Food => "Food",
            Self::Clothing => "Clothing",
            Self::Ammunition => "Ammunition",
            Self::Wheel => "Wagon wheels",
            Self::Axle => "Wagon axles",
            Self::Tongue => "Wagon tongues",
            Self::Cash => "Money",
        }
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Oxen => "oxen",
            Self::Food => "pounds",
            Self::Clothing => "sets",
            Self::Ammunition => "bullets",
            Self::Wheel | Self::Axle | Self::Tongue => "spares",
            Self::Cash => "cents",
        }
    }

    #[must_use]
    pub const fn is_spare_part(self) -> bool {
        matches!(self, Self::Wheel | Self::Axle | Self::Tongue)
    }

    /// Render an amount of this supply the way the console shows it.
    #[must_use]
    pub fn describe(self, amount: u32) -> String {
        match self {
            Self::Cash => format_cents(amount),
            _ => format!("{amount} {}", self.unit()),
        }
    }
}

impl fmt::Display for SupplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A quantity of one supply, viewed as an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: SupplyKind,
    pub quantity: u32,
}

impl Item {
    #[must_use]
    pub const fn new(kind: SupplyKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

impl Entity for Item {
    fn name(&self) -> &str {
        self.kind.label()
    }

    fn category(&self) -> EntityCategory {
        EntityCategory::Item
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    pub oxen: u32,
    pub food_lbs: u32,
    pub clothing: u32,
    pub bullets: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
    pub cash_cents: u32,
}

impl Inventory {
    #[must_use]
    pub const fn quantity(&self, kind: SupplyKind) -> u32 {
        match kind {
            SupplyKind::Oxen => self.oxen,
            SupplyKind::Food => self.food_lbs,
            SupplyKind::Clothing => self.clothing,
            SupplyKind::Ammunition => self.bullets,
            SupplyKind::Wheel => self.wheels,
            SupplyKind::Axle => self.axles,
            SupplyKind::Tongue => self.tongues,
            SupplyKind::Cash => self.cash_cents,
        }
    }

    const fn slot(&mut self, kind: SupplyKind) -> &mut u32 {
        match kind {
            SupplyKind::Oxen => &mut self.oxen,
            SupplyKind::Food => &mut self.food_lbs,
            SupplyKind::Clothing => &mut self.clothing,
            SupplyKind::Ammunition => &mut self.bullets,
            SupplyKind::Wheel => &mut self.wheels,
            SupplyKind::Axle => &mut self.axles,
            SupplyKind::Tongue => &mut self.tongues,
            SupplyKind::Cash => &mut self.cash_cents,
        }
    }

    /// Add up to `cap` total, returning how much was actually added.
    pub fn add_capped(&mut self, kind: SupplyKind, amount: u32, cap: u32) -> u32 {
        let slot = self.slot(kind);
        let before = *slot;
        *slot = before.saturating_add(amount).min(cap.max(before));
        *slot - before
    }

    pub fn add(&mut self, kind: SupplyKind, amount: u32) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Remove up to `amount`, returning how much was actually removed.
    pub fn take(&mut self, kind: SupplyKind, amount: u32) -> u32 {
        let slot = self.slot(kind);
        let removed = amount.min(*slot);
        *slot -= removed;
        removed
    }

    pub fn set(&mut self, kind: SupplyKind, amount: u32) {
        *self.slot(kind) = amount;
    }

    #[must_use]
    pub const fn spare_parts(&self) -> u32 {
        self.wheels + self.axles + self.tongues
    }

    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        SupplyKind::ALL
            .iter()
            .map(|kind| Item::new(*kind, self.quantity(*kind)))
            .collect()
    }
}
