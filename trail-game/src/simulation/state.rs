use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::calendar::Date;
use crate::climate::{ClimateKind, WeatherReport};
use crate::entity::{Party, Vehicle};
use crate::river::RiverState;
use crate::trail::{Location, TrailProgress};

/// Messages kept in the rolling journal.
pub const LOG_CAPACITY: usize = 50;

const DEFAULT_YEAR: u16 = 1848;
const DEFAULT_MONTH: u8 = 3;

/// How a journey ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Arrived,
    PartyDied,
    NoOxen,
    Snowbound,
}

impl GameOutcome {
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Arrived)
    }

    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Arrived => "You have reached the Willamette Valley.",
            Self::PartyDied => "Everyone in your party has died.",
            Self::NoOxen => "You have no oxen left to pull the wagon.",
            Self::Snowbound => "Winter has closed the mountain passes. Your party is snowbound.",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Everything that changes during a journey. Serialized as the save game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub seed: u64,
    pub party: Party,
    pub vehicle: Vehicle,
    pub progress: TrailProgress,
    pub date: Date,
    pub weather: WeatherReport,
    pub days_elapsed: u32,
    /// True while the wagon stands at a location rather than between two.
    pub at_location: bool,
    pub last_trade_day: Option<u32>,
    pub outcome: Option<GameOutcome>,
    /// Conditions of the river the party is waiting to cross.
    pub river: Option<RiverState>,
    pub log: VecDeque<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            seed: 0,
            party: Party::default(),
            vehicle: Vehicle::default(),
            progress: TrailProgress::start(),
            date: Date::start_of(DEFAULT_YEAR, DEFAULT_MONTH),
            weather: WeatherReport::default(),
            days_elapsed: 0,
            at_location: true,
            last_trade_day: None,
            outcome: None,
            river: None,
            log: VecDeque::new(),
        }
    }
}

impl GameState {
    /// Append to the journal, dropping the oldest entries past capacity.
    pub fn push_log(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(message);
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Last location reached.
    #[must_use]
    pub fn location(&self) -> Option<&'static Location> {
        self.progress.current_location()
    }

    /// The location the wagon is standing at, if it is not between stops.
    #[must_use]
    pub fn standing_at(&self) -> Option<&'static Location> {
        if self.at_location {
            self.location()
        } else {
            None
        }
    }

    #[must_use]
    pub fn climate(&self) -> ClimateKind {
        self.location().map_or(ClimateKind::Moderate, |loc| loc.climate)
    }

    #[must_use]
    pub const fn mile_marker(&self) -> u32 {
        self.vehicle.odometer
    }

    #[must_use]
    pub const fn awaiting_crossing(&self) -> bool {
        self.river.is_some()
    }
}
