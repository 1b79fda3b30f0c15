use std::collections::HashMap;

use super::navigator::NavigatorError;
use super::{Mode, ModeKind};
use super::{
    ending, game_over, high_scores, hunt, location, main_menu, new_game, options, random_event,
    river_crossing, store, trade, travel,
};
use crate::simulation::SimulationContext;

/// Builds a mode, reading whatever it needs from the context.
pub type ModeCtor = fn(&mut SimulationContext) -> Box<dyn Mode>;

/// Lookup from mode tags to constructors.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    ctors: HashMap<ModeKind, ModeCtor>,
}

impl ModeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in mode.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(ModeKind::MainMenu, main_menu::create);
        registry.register(ModeKind::NewGame, new_game::create);
        registry.register(ModeKind::Store, store::create);
        registry.register(ModeKind::Travel, travel::create);
        registry.register(ModeKind::Location, location::create);
        registry.register(ModeKind::RiverCrossing, river_crossing::create);
        registry.register(ModeKind::Hunt, hunt::create);
        registry.register(ModeKind::Trade, trade::create);
        registry.register(ModeKind::RandomEvent, random_event::create);
        registry.register(ModeKind::GameOver, game_over::create);
        registry.register(ModeKind::HighScores, high_scores::create);
        registry.register(ModeKind::Options, options::create);
        registry.register(ModeKind::Ending, ending::create);
        registry
    }

    /// Register or replace the constructor for `kind`.
    pub fn register(&mut self, kind: ModeKind, ctor: ModeCtor) -> Option<ModeCtor> {
        self.ctors.insert(kind, ctor)
    }

    #[must_use]
    pub fn contains(&self, kind: ModeKind) -> bool {
        self.ctors.contains_key(&kind)
    }

    /// # Errors
    ///
    /// Returns [`NavigatorError::Unregistered`] when no constructor is known
    /// for `kind`.
    pub fn create(
        &self,
        kind: ModeKind,
        ctx: &mut SimulationContext,
    ) -> Result<Box<dyn Mode>, NavigatorError> {
        let ctor = self
            .ctors
            .get(&kind)
            .ok_or(NavigatorError::Unregistered(kind))?;
        Ok(ctor(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;

    #[test]
    fn standard_registry_covers_every_kind() {
        let registry = ModeRegistry::standard();
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        for kind in ModeKind::ALL {
            assert!(registry.contains(kind));
            let mode = registry.create(kind, &mut ctx).expect("registered");
            assert_eq!(mode.kind(), kind);
        }
    }

    #[test]
    fn unknown_kinds_are_errors() {
        let registry = ModeRegistry::new();
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        assert!(matches!(
            registry.create(ModeKind::Hunt, &mut ctx),
            Err(NavigatorError::Unregistered(ModeKind::Hunt))
        ));
    }
}
