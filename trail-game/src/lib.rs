//! Westward Game Engine
//!
//! Platform-agnostic core for Westward, a console journey along the Oregon
//! Trail. The crate owns the simulation (party, wagon, trail, rivers, hunting,
//! trading, random events, scoring) and the mode stack that drives it. Hosts
//! supply a [`DataLoader`] for tunables and a [`GameStorage`] for the save
//! slot, the top ten and the graveyard.

pub mod calendar;
pub mod climate;
pub mod director;
pub mod entity;
pub mod highscores;
pub mod hunt;
pub mod mode;
pub mod numbers;
pub mod policy;
pub mod river;
pub mod rng;
pub mod score;
pub mod simulation;
pub mod store;
pub mod tombstone;
pub mod trade;
pub mod trail;
pub mod travel;

// Re-export commonly used types
pub use calendar::{Date, Season};
pub use climate::{ClimateKind, Weather, WeatherReport};
pub use director::{EventDirector, EventKind, EventOutcome};
pub use entity::{
    Entity, EntityCategory, EntityKey, HealthStatus, Inventory, Party, Person, Profession,
    SupplyKind, Vehicle,
};
pub use highscores::{HIGH_SCORE_SLOTS, HighScore, HighScoreTable};
pub use mode::{
    Input, Mode, ModeKind, ModeRegistry, ModeStack, Navigator, NavigatorError, Screen, TickKind,
    Transition,
};
pub use policy::{PolicyError, TrailPolicy};
pub use river::{CrossingMethod, RiverKind, RiverState};
pub use rng::{RngBundle, RngDomain};
pub use score::{ScoreBreakdown, ScoreRating, compute_score};
pub use simulation::{GameOutcome, GameState, PersistRequest, SimulationContext};
pub use store::StoreError;
pub use tombstone::{Graveyard, Tombstone};
pub use trail::{Location, LocationKind, TrailProgress};
pub use travel::{Activity, DayReport, DayTag, advance_day};

/// Name of the single save slot used by the console.
pub const DEFAULT_SAVE: &str = "journey";

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a policy override. `None` means play with the default tunables.
    ///
    /// # Errors
    ///
    /// Returns an error if the override exists but cannot be read or parsed.
    fn load_policy(&self) -> Result<Option<TrailPolicy>, Self::Error>;
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save game state
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be saved.
    fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), Self::Error>;

    /// Load game state
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<GameState>, Self::Error>;

    /// Delete saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if a stored table exists but cannot be read.
    fn load_high_scores(&self) -> Result<Option<HighScoreTable>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the table cannot be written.
    fn save_high_scores(&self, table: &HighScoreTable) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if a stored graveyard exists but cannot be read.
    fn load_graveyard(&self) -> Result<Option<Graveyard>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the graveyard cannot be written.
    fn save_graveyard(&self, graveyard: &Graveyard) -> Result<(), Self::Error>;
}

/// Main game engine wiring a loader and a storage backend to simulations
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Build a simulation context with the loaded policy, the persisted top
    /// ten and graveyard, and the saved journey (if any) in its save slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is invalid or stored data cannot be read.
    pub fn create_context(&self, seed: u64) -> Result<SimulationContext, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let policy = match self.data_loader.load_policy().map_err(Into::into)? {
            Some(policy) => {
                policy.validate()?;
                policy
            }
            None => TrailPolicy::default(),
        };
        let mut ctx = SimulationContext::new(seed, policy);
        if let Some(mut table) = self.storage.load_high_scores().map_err(Into::into)? {
            table.normalize();
            ctx.high_scores = table;
        }
        if let Some(graveyard) = self.storage.load_graveyard().map_err(Into::into)? {
            ctx.graveyard = graveyard;
        }
        ctx.saved_game = self.storage.load_game(DEFAULT_SAVE).map_err(Into::into)?;
        log::debug!(
            "context ready: seed {seed}, {} tombstones, save present: {}",
            ctx.graveyard.len(),
            ctx.saved_game.is_some()
        );
        Ok(ctx)
    }

    /// Start the mode stack at the main menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the main menu is not registered.
    pub fn start(&self, ctx: &mut SimulationContext) -> Result<Navigator, NavigatorError> {
        Navigator::new(ModeRegistry::standard(), ModeKind::MainMenu, ctx)
    }

    /// Perform every write the simulation queued since the last flush.
    ///
    /// # Errors
    ///
    /// Returns the first storage error; remaining requests are dropped.
    pub fn flush(&self, ctx: &mut SimulationContext) -> Result<usize, S::Error> {
        let requests = ctx.take_persist_requests();
        for request in &requests {
            match request {
                PersistRequest::SaveGame => {
                    if let Some(saved) = &ctx.saved_game {
                        self.storage.save_game(DEFAULT_SAVE, saved)?;
                    }
                }
                PersistRequest::ClearSave => self.storage.delete_save(DEFAULT_SAVE)?,
                PersistRequest::Graveyard => self.storage.save_graveyard(&ctx.graveyard)?,
                PersistRequest::HighScores => self.storage.save_high_scores(&ctx.high_scores)?,
            }
        }
        Ok(requests.len())
    }
}
