//! Static catalog of random trail events.

use serde::{Deserialize, Serialize};

use crate::calendar::Season;
use crate::entity::{AfflictionKind, WagonPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Illness,
    Injury,
    Vehicle,
    Weather,
    Fortune,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Dysentery,
    Cholera,
    Measles,
    Typhoid,
    Exhaustion,
    Fever,
    BrokenArm,
    BrokenLeg,
    Snakebite,
    BrokenWheel,
    BrokenAxle,
    BrokenTongue,
    Thief,
    OxWanderedOff,
    LostTrail,
    HeavyFog,
    HailStorm,
    Blizzard,
    WildFruit,
    AbandonedWagon,
    GoodWater,
}

impl EventKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Dysentery => "dysentery",
            Self::Cholera => "cholera",
            Self::Measles => "measles",
            Self::Typhoid => "typhoid",
            Self::Exhaustion => "exhaustion",
            Self::Fever => "fever",
            Self::BrokenArm => "broken_arm",
            Self::BrokenLeg => "broken_leg",
            Self::Snakebite => "snakebite",
            Self::BrokenWheel => "broken_wheel",
            Self::BrokenAxle => "broken_axle",
            Self::BrokenTongue => "broken_tongue",
            Self::Thief => "thief",
            Self::OxWanderedOff => "ox_wandered_off",
            Self::LostTrail => "lost_trail",
            Self::HeavyFog => "heavy_fog",
            Self::HailStorm => "hail_storm",
            Self::Blizzard => "blizzard",
            Self::WildFruit => "wild_fruit",
            Self::AbandonedWagon => "abandoned_wagon",
            Self::GoodWater => "good_water",
        }
    }

    #[must_use]
    pub const fn category(self) -> EventCategory {
        match self {
            Self::Dysentery
            | Self::Cholera
            | Self::Measles
            | Self::Typhoid
            | Self::Exhaustion
            | Self::Fever => EventCategory::Illness,
            Self::BrokenArm | Self::BrokenLeg | Self::Snakebite => EventCategory::Injury,
            Self::BrokenWheel
            | Self::BrokenAxle
            | Self::BrokenTongue
            | Self::Thief
            | Self::OxWanderedOff
            | Self::LostTrail => EventCategory::Vehicle,
            Self::HeavyFog | Self::HailStorm | Self::Blizzard => EventCategory::Weather,
            Self::WildFruit | Self::AbandonedWagon | Self::GoodWater => EventCategory::Fortune,
        }
    }

    /// Affliction inflicted by illness and injury events.
    #[must_use]
    pub const fn affliction(self) -> Option<AfflictionKind> {
        match self {
            Self::Dysentery => Some(AfflictionKind::Dysentery),
            Self::Cholera => Some(AfflictionKind::Cholera),
            Self::Measles => Some(AfflictionKind::Measles),
            Self::Typhoid => Some(AfflictionKind::Typhoid),
            Self::Exhaustion => Some(AfflictionKind::Exhaustion),
            Self::Fever => Some(AfflictionKind::Fever),
            Self::BrokenArm => Some(AfflictionKind::BrokenArm),
            Self::BrokenLeg => Some(AfflictionKind::BrokenLeg),
            Self::Snakebite => Some(AfflictionKind::Snakebite),
            _ => None,
        }
    }

    #[must_use]
    pub const fn broken_part(self) -> Option<WagonPart> {
        match self {
            Self::BrokenWheel => Some(WagonPart::Wheel),
            Self::BrokenAxle => Some(WagonPart::Axle),
            Self::BrokenTongue => Some(WagonPart::Tongue),
            _ => None,
        }
    }
}

/// When an event may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    Always,
    Seasons(&'static [Season]),
    ColdWeather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDef {
    pub kind: EventKind,
    pub weight: u32,
    pub filter: EventFilter,
    /// Inclusive range of days an affliction lasts or the wagon is delayed.
    pub days: (u8, u8),
}

const fn def(kind: EventKind, weight: u32, filter: EventFilter, days: (u8, u8)) -> EventDef {
    EventDef {
        kind,
        weight,
        filter,
        days,
    }
}

const WARM_SEASONS: &[Season] = &[Season::Spring, Season::Summer];
const HARVEST_SEASONS: &[Season] = &[Season::Summer, Season::Fall];
const DAMP_SEASONS: &[Season] = &[Season::Spring, Season::Fall, Season::Winter];

pub const EVENT_CATALOG: [EventDef; 21] = [
    def(EventKind::Dysentery, 4, EventFilter::Always, (4, 8)),
    def(EventKind::Cholera, 2, EventFilter::Seasons(WARM_SEASONS), (3, 6)),
    def(EventKind::Measles, 2, EventFilter::Always, (5, 9)),
    def(EventKind::Typhoid, 2, EventFilter::Always, (5, 10)),
    def(EventKind::Exhaustion, 4, EventFilter::Always, (2, 4)),
    def(EventKind::Fever, 4, EventFilter::Always, (3, 6)),
    def(EventKind::BrokenArm, 2, EventFilter::Always, (6, 10)),
    def(EventKind::BrokenLeg, 2, EventFilter::Always, (8, 14)),
    def(EventKind::Snakebite, 3, EventFilter::Seasons(WARM_SEASONS), (3, 6)),
    def(EventKind::BrokenWheel, 4, EventFilter::Always, (0, 0)),
    def(EventKind::BrokenAxle, 3, EventFilter::Always, (0, 0)),
    def(EventKind::BrokenTongue, 3, EventFilter::Always, (0, 0)),
    def(EventKind::Thief, 3, EventFilter::Always, (0, 0)),
    def(EventKind::OxWanderedOff, 3, EventFilter::Always, (0, 0)),
    def(EventKind::LostTrail, 4, EventFilter::Always, (1, 3)),
    def(EventKind::HeavyFog, 3, EventFilter::Seasons(DAMP_SEASONS), (1, 1)),
    def(EventKind::HailStorm, 2, EventFilter::Seasons(WARM_SEASONS), (1, 1)),
    def(EventKind::Blizzard, 3, EventFilter::ColdWeather, (2, 3)),
    def(EventKind::WildFruit, 4, EventFilter::Seasons(HARVEST_SEASONS), (0, 0)),
    def(EventKind::AbandonedWagon, 2, EventFilter::Always, (0, 0)),
    def(EventKind::GoodWater, 3, EventFilter::Always, (0, 0)),
];

#[must_use]
pub fn event_def(kind: EventKind) -> Option<&'static EventDef> {
    EVENT_CATALOG.iter().find(|def| def.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_each_kind_once() {
        for (idx, def) in EVENT_CATALOG.iter().enumerate() {
            assert!(def.weight > 0, "{} has no weight", def.kind.key());
            assert!(def.days.0 <= def.days.1);
            assert!(
                EVENT_CATALOG[idx + 1..].iter().all(|other| other.kind != def.kind),
                "{} listed twice",
                def.kind.key()
            );
        }
    }

    #[test]
    fn afflictions_follow_categories() {
        for def in EVENT_CATALOG {
            let has_affliction = def.kind.affliction().is_some();
            let is_health = matches!(
                def.kind.category(),
                EventCategory::Illness | EventCategory::Injury
            );
            assert_eq!(has_affliction, is_health, "{}", def.kind.key());
            if let Some(kind) = def.kind.affliction() {
                assert_eq!(
                    kind.is_injury(),
                    def.kind.category() == EventCategory::Injury
                );
            }
        }
        assert_eq!(EventKind::BrokenAxle.broken_part(), Some(WagonPart::Axle));
    }
}
