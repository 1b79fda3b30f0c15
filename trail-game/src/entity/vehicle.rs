use serde::{Deserialize, Serialize};
use std::fmt;

use super::item::{Inventory, SupplyKind};
use super::{Entity, EntityCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    #[default]
    Steady,
    Strenuous,
    Grueling,
}

impl Pace {
    pub const ALL: [Self; 3] = [Self::Steady, Self::Strenuous, Self::Grueling];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Steady => 0,
            Self::Strenuous => 1,
            Self::Grueling => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Strenuous => "strenuous",
            Self::Grueling => "grueling",
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rations {
    #[default]
    Filling,
    Meager,
    BareBones,
}

impl Rations {
    pub const ALL: [Self; 3] = [Self::Filling, Self::Meager, Self::BareBones];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Filling => 0,
            Self::Meager => 1,
            Self::BareBones => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Meager => "meager",
            Self::BareBones => "bare bones",
        }
    }
}

impl fmt::Display for Rations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagonPart {
    Wheel,
    Axle,
    Tongue,
}

impl WagonPart {
    pub const ALL: [Self; 3] = [Self::Wheel, Self::Axle, Self::Tongue];

    #[must_use]
    pub const fn supply_kind(self) -> SupplyKind {
        match self {
            Self::Wheel => SupplyKind::Wheel,
            Self::Axle => SupplyKind::Axle,
            Self::Tongue => SupplyKind::Tongue,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wheel => "wagon wheel",
            Self::Axle => "wagon axle",
            Self::Tongue => "wagon tongue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Moving,
    #[default]
    Stopped,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub inventory: Inventory,
    pub pace: Pace,
    pub rations: Rations,
    /// Miles travelled since departure.
    pub odometer: u32,
    pub status: VehicleStatus,
    #[serde(default)]
    pub broken_part: Option<WagonPart>,
    /// Days the wagon must sit out before moving again.
    #[serde(default)]
    pub delay_days: u8,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            name: "Wagon".to_string(),
            inventory: Inventory::default(),
            pace: Pace::Steady,
            rations: Rations::Filling,
            odometer: 0,
            status: VehicleStatus::Stopped,
            broken_part: None,
            delay_days: 0,
        }
    }
}

impl Vehicle {
    /// Break a part, disabling the wagon until it is replaced.
    pub const fn break_part(&mut self, part: WagonPart) {
        self.broken_part = Some(part);
        self.status = VehicleStatus::Disabled;
    }

    /// Replace the broken part from inventory if a spare is carried.
    pub fn repair_with_spare(&mut self) -> bool {
        let Some(part) = self.broken_part else {
            return true;
        };
        if self.inventory.take(part.supply_kind(), 1) == 0 {
            return false;
        }
        self.broken_part = None;
        self.status = VehicleStatus::Stopped;
        true
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self.status, VehicleStatus::Disabled)
    }

    #[must_use]
    pub const fn can_move(&self, min_oxen: u32) -> bool {
        !self.is_disabled() && self.delay_days == 0 && self.inventory.oxen >= min_oxen
    }
}

impl Entity for Vehicle {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> EntityCategory {
        EntityCategory::Vehicle
    }
}
