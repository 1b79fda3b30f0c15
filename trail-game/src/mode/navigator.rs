use thiserror::Error;

use super::{Input, ModeKind, ModeRegistry, ModeStack, Screen, TickKind, Transition};
use crate::simulation::SimulationContext;

/// Focus handlers may chain transitions; stop following them after this many.
const MAX_CHAINED_TRANSITIONS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigatorError {
    #[error("no mode is registered for {0}")]
    Unregistered(ModeKind),
    #[error("the simulation has ended")]
    Stopped,
}

/// Routes input and ticks to the top of the mode stack.
#[derive(Debug)]
pub struct Navigator {
    registry: ModeRegistry,
    stack: ModeStack,
    running: bool,
}

impl Navigator {
    /// Build a navigator with `initial` as the only mode.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::Unregistered`] if `initial` has no constructor.
    pub fn new(
        registry: ModeRegistry,
        initial: ModeKind,
        ctx: &mut SimulationContext,
    ) -> Result<Self, NavigatorError> {
        let mut navigator = Self {
            registry,
            stack: ModeStack::new(),
            running: true,
        };
        navigator.apply(ctx, Transition::Reset(initial))?;
        Ok(navigator)
    }

    /// Hand one console line to the top mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation already ended or the mode asks for
    /// an unregistered mode.
    pub fn dispatch(
        &mut self,
        ctx: &mut SimulationContext,
        input: impl Into<Input>,
    ) -> Result<(), NavigatorError> {
        if !self.running {
            return Err(NavigatorError::Stopped);
        }
        let input = input.into();
        let Some(top) = self.stack.top_mut() else {
            self.running = false;
            return Err(NavigatorError::Stopped);
        };
        let transition = top.on_input(ctx, &input);
        self.apply(ctx, transition)
    }

    /// # Errors
    ///
    /// Same as [`Navigator::dispatch`].
    pub fn tick(
        &mut self,
        ctx: &mut SimulationContext,
        tick: TickKind,
    ) -> Result<(), NavigatorError> {
        if !self.running {
            return Err(NavigatorError::Stopped);
        }
        match tick {
            TickKind::System => ctx.system_ticks = ctx.system_ticks.saturating_add(1),
            TickKind::Game => ctx.game_ticks = ctx.game_ticks.saturating_add(1),
        }
        let Some(top) = self.stack.top_mut() else {
            self.running = false;
            return Err(NavigatorError::Stopped);
        };
        let transition = top.on_tick(ctx, tick);
        self.apply(ctx, transition)
    }

    #[must_use]
    pub fn screen(&self, ctx: &SimulationContext) -> Option<Screen> {
        self.stack.top().map(|mode| mode.render(ctx))
    }

    /// Text of the top mode: screen followed by prompt.
    #[must_use]
    pub fn render(&self, ctx: &SimulationContext) -> String {
        self.screen(ctx).map(|screen| screen.to_string()).unwrap_or_default()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn current(&self) -> Option<ModeKind> {
        self.stack.top().map(|mode| mode.kind())
    }

    #[must_use]
    pub fn wants_game_ticks(&self) -> bool {
        self.running && self.stack.top().is_some_and(|mode| mode.wants_game_ticks())
    }

    #[must_use]
    pub const fn stack(&self) -> &ModeStack {
        &self.stack
    }

    fn apply(
        &mut self,
        ctx: &mut SimulationContext,
        transition: Transition,
    ) -> Result<(), NavigatorError> {
        let mut next = transition;
        for _ in 0..MAX_CHAINED_TRANSITIONS {
            match next {
                Transition::Stay => return Ok(()),
                Transition::Exit => {
                    log::debug!("exit requested from {:?}", self.current());
                    self.running = false;
                    return Ok(());
                }
                Transition::Push(kind) => {
                    let mode = self.registry.create(kind, ctx)?;
                    self.stack.push(mode);
                }
                Transition::Replace(kind) => {
                    let mode = self.registry.create(kind, ctx)?;
                    self.stack.replace(mode);
                }
                Transition::Reset(kind) => {
                    let mode = self.registry.create(kind, ctx)?;
                    self.stack.reset(mode);
                }
                Transition::Pop => {
                    self.stack.pop();
                    if self.stack.is_empty() {
                        log::debug!("last mode popped");
                        self.running = false;
                        return Ok(());
                    }
                }
            }
            log::debug!("{next:?}: stack is now {:?}", self.stack.kinds());
            next = match self.stack.top_mut() {
                Some(top) => top.on_focus(ctx),
                None => Transition::Stay,
            };
        }
        log::warn!("stopped following focus transitions at {next:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{Mode, ModeCtor};
    use crate::policy::TrailPolicy;

    struct Scripted {
        kind: ModeKind,
        ticks: u32,
        focused: u32,
    }

    impl Mode for Scripted {
        fn kind(&self) -> ModeKind {
            self.kind
        }

        fn render(&self, _ctx: &SimulationContext) -> Screen {
            Screen::new(format!("{} focused {}", self.kind, self.focused)).prompt("?")
        }

        fn on_input(&mut self, _ctx: &mut SimulationContext, input: &Input) -> Transition {
            match input.trimmed() {
                "push" => Transition::Push(ModeKind::Travel),
                "replace" => Transition::Replace(ModeKind::Store),
                "reset" => Transition::Reset(ModeKind::MainMenu),
                "pop" => Transition::Pop,
                "exit" => Transition::Exit,
                "missing" => Transition::Push(ModeKind::Hunt),
                _ => Transition::Stay,
            }
        }

        fn on_tick(&mut self, _ctx: &mut SimulationContext, tick: TickKind) -> Transition {
            if tick == TickKind::Game {
                self.ticks += 1;
            }
            Transition::Stay
        }

        fn on_focus(&mut self, _ctx: &mut SimulationContext) -> Transition {
            self.focused += 1;
            Transition::Stay
        }
    }

    fn scripted(kind: ModeKind) -> Box<dyn Mode> {
        Box::new(Scripted {
            kind,
            ticks: 0,
            focused: 0,
        })
    }

    fn registry() -> ModeRegistry {
        let mut registry = ModeRegistry::new();
        let ctors: [(ModeKind, ModeCtor); 3] = [
            (ModeKind::MainMenu, |_| scripted(ModeKind::MainMenu)),
            (ModeKind::Travel, |_| scripted(ModeKind::Travel)),
            (ModeKind::Store, |_| scripted(ModeKind::Store)),
        ];
        for (kind, ctor) in ctors {
            registry.register(kind, ctor);
        }
        registry
    }

    fn start() -> (Navigator, SimulationContext) {
        let mut ctx = SimulationContext::new(3, TrailPolicy::default());
        let navigator =
            Navigator::new(registry(), ModeKind::MainMenu, &mut ctx).expect("main menu registered");
        (navigator, ctx)
    }

    #[test]
    fn transitions_reshape_the_stack() {
        let (mut nav, mut ctx) = start();
        nav.dispatch(&mut ctx, "push").expect("push");
        assert_eq!(nav.stack().kinds(), vec![ModeKind::MainMenu, ModeKind::Travel]);
        nav.dispatch(&mut ctx, "replace").expect("replace");
        assert_eq!(nav.stack().kinds(), vec![ModeKind::MainMenu, ModeKind::Store]);
        nav.dispatch(&mut ctx, "pop").expect("pop");
        assert_eq!(nav.current(), Some(ModeKind::MainMenu));
        assert!(nav.render(&ctx).starts_with("MainMenu focused 2"));
        nav.dispatch(&mut ctx, "push").expect("push");
        nav.dispatch(&mut ctx, "reset").expect("reset");
        assert_eq!(nav.stack().kinds(), vec![ModeKind::MainMenu]);
    }

    #[test]
    fn popping_the_last_mode_stops() {
        let (mut nav, mut ctx) = start();
        nav.dispatch(&mut ctx, "pop").expect("pop");
        assert!(!nav.is_running());
        assert_eq!(nav.dispatch(&mut ctx, "push"), Err(NavigatorError::Stopped));
        assert_eq!(nav.render(&ctx), "");
    }

    #[test]
    fn exit_stops_without_clearing() {
        let (mut nav, mut ctx) = start();
        nav.dispatch(&mut ctx, "exit").expect("exit");
        assert!(!nav.is_running());
        assert_eq!(
            nav.tick(&mut ctx, TickKind::System),
            Err(NavigatorError::Stopped)
        );
    }

    #[test]
    fn unregistered_modes_are_reported() {
        let (mut nav, mut ctx) = start();
        assert_eq!(
            nav.dispatch(&mut ctx, "missing"),
            Err(NavigatorError::Unregistered(ModeKind::Hunt))
        );
        assert_eq!(nav.current(), Some(ModeKind::MainMenu));
        assert!(nav.is_running());
    }

    #[test]
    fn ticks_are_counted() {
        let (mut nav, mut ctx) = start();
        nav.tick(&mut ctx, TickKind::System).expect("tick");
        nav.tick(&mut ctx, TickKind::Game).expect("tick");
        nav.tick(&mut ctx, TickKind::Game).expect("tick");
        assert_eq!(ctx.system_ticks, 1);
        assert_eq!(ctx.game_ticks, 2);
        assert!(!nav.wants_game_ticks());
    }

    #[test]
    fn invalid_input_keeps_the_mode() {
        let (mut nav, mut ctx) = start();
        nav.dispatch(&mut ctx, "banana").expect("stay");
        assert_eq!(nav.stack().len(), 1);
    }
}
