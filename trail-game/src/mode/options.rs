use super::command::menu_command;
use super::{Input, MenuCommand, Mode, ModeKind, Screen, Transition};
use crate::simulation::SimulationContext;

menu_command! {
    pub enum OptionsCommand {
        ResetTopTen = 1 => "Erase the current Oregon Top Ten",
        EraseTombstones = 2 => "Erase the tombstones",
        Return = 3 => "Return to the main menu",
    }
}

/// Management options for the saved data shared between journeys.
#[derive(Debug)]
pub struct Options {
    message: Option<&'static str>,
}

pub fn create(_ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(Options { message: None })
}

impl Mode for Options {
    fn kind(&self) -> ModeKind {
        ModeKind::Options
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let mut screen = Screen::new("Management options")
            .line(format!("Tombstones on the trail: {}", ctx.graveyard.len()))
            .blank()
            .line("You may:")
            .lines(OptionsCommand::menu());
        if let Some(message) = self.message {
            screen = screen.blank().line(message);
        }
        screen.prompt("What is your choice?")
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        let Some(command) = OptionsCommand::parse(input.trimmed()) else {
            return Transition::Stay;
        };
        match command {
            OptionsCommand::ResetTopTen => {
                ctx.reset_high_scores();
                self.message = Some("The Oregon Top Ten has been reset.");
            }
            OptionsCommand::EraseTombstones => {
                ctx.clear_graveyard();
                self.message = Some("The tombstones have been erased.");
            }
            OptionsCommand::Return => return Transition::Pop,
        }
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TrailPolicy;
    use crate::simulation::PersistRequest;

    #[test]
    fn erasing_data_requests_persistence() {
        let mut ctx = SimulationContext::new(1, TrailPolicy::default());
        ctx.bury("Abe", "");
        ctx.take_persist_requests();
        let mut mode = create(&mut ctx);
        assert_eq!(mode.on_input(&mut ctx, &"2".into()), Transition::Stay);
        assert!(ctx.graveyard.is_empty());
        assert!(mode.render(&ctx).body.iter().any(|l| l.contains("erased")));
        assert_eq!(mode.on_input(&mut ctx, &"1".into()), Transition::Stay);
        assert_eq!(
            ctx.take_persist_requests(),
            vec![PersistRequest::Graveyard, PersistRequest::HighScores]
        );
        assert_eq!(mode.on_input(&mut ctx, &"3".into()), Transition::Pop);
    }
}
