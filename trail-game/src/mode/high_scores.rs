use super::{Input, Mode, ModeKind, Screen, Transition};
use crate::simulation::SimulationContext;

#[derive(Debug)]
pub struct HighScores;

pub fn create(_ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(HighScores)
}

impl Mode for HighScores {
    fn kind(&self) -> ModeKind {
        ModeKind::HighScores
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let rows = ctx.high_scores.entries().iter().map(|entry| {
            format!("{:<20}{:>8}  {}", entry.name, entry.points, entry.rating)
        });
        Screen::new("The Oregon Top Ten")
            .line(format!("{:<20}{:>8}  {}", "Name", "Points", "Rating"))
            .lines(rows)
            .prompt("Press ENTER to return to the main menu.")
    }

    fn on_input(&mut self, _ctx: &mut SimulationContext, _input: &Input) -> Transition {
        Transition::Reset(ModeKind::MainMenu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;

    #[test]
    fn table_lists_every_entry() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        let mut mode = create(&mut ctx);
        let screen = mode.render(&ctx);
        assert_eq!(screen.body.len(), 1 + ctx.high_scores.entries().len());
        assert!(screen.body[1].starts_with("Stephen Meek"));
        assert_eq!(mode.on_input(&mut ctx, &"".into()), Transition::Reset(ModeKind::MainMenu));
    }
}
