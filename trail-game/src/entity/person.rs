use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Entity, EntityCategory};

pub const HEALTH_MAX: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Banker,
    Carpenter,
    Farmer,
}

impl Profession {
    pub const ALL: [Self; 3] = [Self::Banker, Self::Carpenter, Self::Farmer];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Banker => "banker from Boston",
            Self::Carpenter => "carpenter from Ohio",
            Self::Farmer => "farmer from Illinois",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Health tier derived from a member's numeric health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Good,
    Fair,
    Poor,
    VeryPoor,
    Dead,
}

impl HealthStatus {
    #[must_use]
    pub const fn from_value(health: u16) -> Self {
        if health >= 400 {
            Self::Good
        } else if health >= 300 {
            Self::Fair
        } else if health >= 200 {
            Self::Poor
        } else if health > 0 {
            Self::VeryPoor
        } else {
            Self::Dead
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very poor",
            Self::Dead => "dead",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfflictionKind {
    Dysentery,
    Cholera,
    Measles,
    Typhoid,
    Exhaustion,
    Fever,
    BrokenArm,
    BrokenLeg,
    Snakebite,
}

impl AfflictionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dysentery => "dysentery",
            Self::Cholera => "cholera",
            Self::Measles => "measles",
            Self::Typhoid => "typhoid fever",
            Self::Exhaustion => "exhaustion",
            Self::Fever => "a fever",
            Self::BrokenArm => "a broken arm",
            Self::BrokenLeg => "a broken leg",
            Self::Snakebite => "a snakebite",
        }
    }

    /// Health lost per day while afflicted.
    #[must_use]
    pub const fn daily_damage(self) -> u16 {
        match self {
            Self::Cholera | Self::Typhoid => 35,
            Self::Dysentery | Self::Snakebite => 30,
            Self::Measles | Self::BrokenLeg => 20,
            Self::Fever => 15,
            Self::Exhaustion | Self::BrokenArm => 10,
        }
    }

    #[must_use]
    pub const fn is_injury(self) -> bool {
        matches!(self, Self::BrokenArm | Self::BrokenLeg | Self::Snakebite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affliction {
    pub kind: AfflictionKind,
    pub days_remaining: u8,
}

/// Result of advancing a member's affliction by one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfflictionTick {
    Healthy,
    Suffering(AfflictionKind),
    Recovered(AfflictionKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub leader: bool,
    #[serde(default)]
    pub profession: Option<Profession>,
    pub health: u16,
    #[serde(default)]
    pub affliction: Option<Affliction>,
}

impl Person {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leader: false,
            profession: None,
            health: HEALTH_MAX,
            affliction: None,
        }
    }

    #[must_use]
    pub fn leader(name: impl Into<String>, profession: Profession) -> Self {
        Self {
            leader: true,
            profession: Some(profession),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub const fn is_afflicted(&self) -> bool {
        self.affliction.is_some()
    }

    #[must_use]
    pub const fn status(&self) -> HealthStatus {
        HealthStatus::from_value(self.health)
    }

    pub fn damage(&mut self, amount: u16) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.affliction = None;
        }
    }

    pub fn heal(&mut self, amount: u16) {
        if self.is_alive() {
            self.health = self.health.saturating_add(amount).min(HEALTH_MAX);
        }
    }

    /// Apply a health delta where positive values heal and negative values harm.
    pub fn adjust(&mut self, delta: i32) {
        let magnitude = u16::try_from(delta.unsigned_abs()).unwrap_or(u16::MAX);
        if delta >= 0 {
            self.heal(magnitude);
        } else {
            self.damage(magnitude);
        }
    }

    /// Afflict the member unless dead or already suffering something.
    pub fn afflict(&mut self, kind: AfflictionKind, days: u8) -> bool {
        if !self.is_alive() || self.affliction.is_some() {
            return false;
        }
        self.affliction = Some(Affliction {
            kind,
            days_remaining: days.max(1),
        });
        true
    }

    pub fn tick_affliction(&mut self) -> AfflictionTick {
        let Some(mut affliction) = self.affliction else {
            return AfflictionTick::Healthy;
        };
        self.damage(affliction.kind.daily_damage());
        if !self.is_alive() {
            return AfflictionTick::Suffering(affliction.kind);
        }
        affliction.days_remaining = affliction.days_remaining.saturating_sub(1);
        if affliction.days_remaining == 0 {
            self.affliction = None;
            AfflictionTick::Recovered(affliction.kind)
        } else {
            self.affliction = Some(affliction);
            AfflictionTick::Suffering(affliction.kind)
        }
    }
}

impl Entity for Person {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> EntityCategory {
        EntityCategory::Person
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_tiers_follow_thresholds() {
        assert_eq!(HealthStatus::from_value(500), HealthStatus::Good);
        assert_eq!(HealthStatus::from_value(399), HealthStatus::Fair);
        assert_eq!(HealthStatus::from_value(250), HealthStatus::Poor);
        assert_eq!(HealthStatus::from_value(1), HealthStatus::VeryPoor);
        assert_eq!(HealthStatus::from_value(0), HealthStatus::Dead);
    }

    #[test]
    fn damage_and_heal_saturate() {
        let mut member = Person::new("Ezra");
        member.heal(100);
        assert_eq!(member.health, HEALTH_MAX);
        member.adjust(-600);
        assert!(!member.is_alive());
        member.heal(50);
        assert_eq!(member.health, 0, "the dead stay dead");
    }

    #[test]
    fn affliction_runs_its_course() {
        let mut member = Person::new("Mary");
        assert!(member.afflict(AfflictionKind::Fever, 2));
        assert!(!member.afflict(AfflictionKind::Cholera, 5));
        assert_eq!(
            member.tick_affliction(),
            AfflictionTick::Suffering(AfflictionKind::Fever)
        );
        assert_eq!(
            member.tick_affliction(),
            AfflictionTick::Recovered(AfflictionKind::Fever)
        );
        assert_eq!(member.tick_affliction(), AfflictionTick::Healthy);
        assert_eq!(member.health, HEALTH_MAX - 30);
    }

    #[test]
    fn fatal_affliction_clears_on_death() {
        let mut member = Person::new("Jed");
        member.health = 20;
        member.afflict(AfflictionKind::Cholera, 4);
        member.tick_affliction();
        assert!(!member.is_alive());
        assert!(member.affliction.is_none());
    }
}
