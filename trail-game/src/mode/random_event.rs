use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, Transition};
use crate::simulation::SimulationContext;

/// Acknowledgement screen for whatever happened on the trail.
#[derive(Debug)]
pub struct RandomEvent {
    messages: Vec<String>,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(RandomEvent {
        messages: ctx.take_notices(),
    })
}

impl Mode for RandomEvent {
    fn kind(&self) -> ModeKind {
        ModeKind::RandomEvent
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        Screen::new(ctx.state.date.to_string())
            .lines(self.messages.iter().cloned())
            .prompt(PRESS_ENTER)
    }

    fn on_input(&mut self, _ctx: &mut SimulationContext, _input: &Input) -> Transition {
        Transition::Pop
    }

    fn on_focus(&mut self, _ctx: &mut SimulationContext) -> Transition {
        if self.messages.is_empty() {
            Transition::Pop
        } else {
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;

    #[test]
    fn shows_and_consumes_notices() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        ctx.notify("Jed has a broken arm.");
        ctx.notify("You find wild fruit.");
        let mut mode = create(&mut ctx);
        assert!(!ctx.has_notices());
        assert_eq!(mode.on_focus(&mut ctx), Transition::Stay);
        let screen = mode.render(&ctx);
        assert_eq!(screen.body, vec!["Jed has a broken arm.", "You find wild fruit."]);
        assert_eq!(mode.on_input(&mut ctx, &"".into()), Transition::Pop);
    }

    #[test]
    fn nothing_to_say_pops_at_once() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        let mut mode = create(&mut ctx);
        assert_eq!(mode.on_focus(&mut ctx), Transition::Pop);
    }
}
