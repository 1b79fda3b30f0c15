//! The simulation context passed explicitly to every mode and system.
//!
//! [`SimulationContext`] owns the journey's [`GameState`] together with the
//! tunables, the seeded RNG streams, the event director and the persistent
//! tables (graveyard, top ten). Systems never write files themselves: they
//! queue a [`PersistRequest`] that the host drains after each input.

use chrono::NaiveDate;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

pub mod state;

pub use state::{GameOutcome, GameState, LOG_CAPACITY};

use crate::calendar::{DEPARTURE_MONTHS, Date};
use crate::climate::roll_weather;
use crate::director::EventDirector;
use crate::entity::{Inventory, Party, Profession, Vehicle};
use crate::highscores::{HighScore, HighScoreTable};
use crate::policy::TrailPolicy;
use crate::rng::{CountingRng, RngBundle, RngDomain};
use crate::score::ScoreBreakdown;
use crate::tombstone::{Graveyard, Tombstone};
use crate::trade::{TradeOffer, generate_offer};
use crate::trail::TrailProgress;

/// A write the host should perform through its storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistRequest {
    SaveGame,
    ClearSave,
    Graveyard,
    HighScores,
}

/// Result of asking for a trader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAttempt {
    Offer(TradeOffer),
    AlreadyTried,
    NoOffer,
}

#[derive(Debug)]
pub struct SimulationContext {
    pub state: GameState,
    pub policy: TrailPolicy,
    pub rng: RngBundle,
    pub director: EventDirector,
    pub graveyard: Graveyard,
    pub high_scores: HighScoreTable,
    pub saved_game: Option<GameState>,
    pub system_ticks: u64,
    pub game_ticks: u64,
    persist: Vec<PersistRequest>,
    notices: Vec<String>,
}

impl SimulationContext {
    #[must_use]
    pub fn new(seed: u64, policy: TrailPolicy) -> Self {
        let high_scores = HighScoreTable::historical(&policy.score);
        let state = GameState {
            seed,
            date: Date::start_of(policy.start_year, DEPARTURE_MONTHS[0]),
            ..GameState::default()
        };
        Self {
            state,
            director: EventDirector::new(&policy),
            policy,
            rng: RngBundle::from_user_seed(seed),
            graveyard: Graveyard::default(),
            high_scores,
            saved_game: None,
            system_ticks: 0,
            game_ticks: 0,
            persist: Vec::new(),
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub const fn rng(&mut self, domain: RngDomain) -> &mut CountingRng<ChaCha20Rng> {
        self.rng.stream(domain)
    }

    /// Start a fresh journey from Independence in the given month.
    pub fn new_game<I, S>(&mut self, leader: &str, profession: Profession, companions: I, month: u8)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let month = if DEPARTURE_MONTHS.contains(&month) {
            month
        } else {
            DEPARTURE_MONTHS[0]
        };
        let spec = self.policy.profession(profession);
        let vehicle = Vehicle {
            inventory: Inventory {
                cash_cents: spec.starting_cash_cents,
                ..Inventory::default()
            },
            ..Vehicle::default()
        };
        let date = Date::start_of(self.policy.start_year, month);
        let mut state = GameState {
            seed: self.seed(),
            party: Party::from_names(leader, profession, companions),
            vehicle,
            progress: TrailProgress::start(),
            date,
            ..GameState::default()
        };
        state.weather = roll_weather(state.climate(), date, self.rng.stream(RngDomain::Climate));
        state.push_log(format!("{leader} sets out from Independence on {date}."));
        log::debug!(
            "new game: {leader} ({profession:?}) with {} members leaving {date}",
            state.party.members.len()
        );
        self.state = state;
        self.notices.clear();
    }

    /// Queue a message for the next acknowledgement screen and the journal.
    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.state.push_log(message.clone());
        self.notices.push(message);
    }

    #[must_use]
    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn request(&mut self, request: PersistRequest) {
        if !self.persist.contains(&request) {
            self.persist.push(request);
        }
    }

    pub fn take_persist_requests(&mut self) -> Vec<PersistRequest> {
        std::mem::take(&mut self.persist)
    }

    /// Snapshot the journey into the save slot.
    pub fn save_game(&mut self) {
        self.saved_game = Some(self.state.clone());
        self.request(PersistRequest::SaveGame);
    }

    pub fn clear_save(&mut self) {
        self.saved_game = None;
        self.request(PersistRequest::ClearSave);
    }

    /// Resume the saved journey. Streams are reseeded from the save's seed
    /// and day count so a resumed game stays reproducible.
    pub fn restore_saved(&mut self) -> bool {
        let Some(saved) = self.saved_game.clone() else {
            return false;
        };
        let reseed = saved.seed.wrapping_add(u64::from(saved.days_elapsed));
        self.rng = RngBundle::from_user_seed(reseed);
        self.state = saved;
        self.notices.clear();
        log::debug!("restored save from day {}", self.state.days_elapsed);
        true
    }

    /// Look for a trader. Only one attempt is allowed per day.
    pub fn attempt_trade(&mut self) -> TradeAttempt {
        let today = self.state.days_elapsed;
        if self.state.last_trade_day == Some(today) {
            return TradeAttempt::AlreadyTried;
        }
        self.state.last_trade_day = Some(today);
        generate_offer(&self.state.vehicle.inventory, self.rng.stream(RngDomain::Trade))
            .map_or(TradeAttempt::NoOffer, TradeAttempt::Offer)
    }

    /// Leave a tombstone at the wagon's current mile marker.
    pub fn bury(&mut self, name: &str, epitaph: &str) -> bool {
        let placed = self
            .graveyard
            .add(Tombstone::new(self.state.mile_marker(), name, epitaph));
        if placed {
            self.request(PersistRequest::Graveyard);
        }
        placed
    }

    pub fn clear_graveyard(&mut self) {
        self.graveyard.clear();
        self.request(PersistRequest::Graveyard);
    }

    /// Record a finished journey on the top ten.
    pub fn record_high_score(
        &mut self,
        name: &str,
        breakdown: &ScoreBreakdown,
        recorded_on: Option<NaiveDate>,
    ) -> Option<usize> {
        let rank = self.high_scores.insert(HighScore {
            name: name.to_string(),
            points: breakdown.total,
            rating: breakdown.rating,
            recorded_on,
        });
        if rank.is_some() {
            self.request(PersistRequest::HighScores);
        }
        rank
    }

    pub fn reset_high_scores(&mut self) {
        self.high_scores.reset(&self.policy.score);
        self.request(PersistRequest::HighScores);
    }
}
