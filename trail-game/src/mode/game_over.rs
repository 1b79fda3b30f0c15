use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, Transition};
use crate::simulation::{GameOutcome, SimulationContext};
use crate::tombstone::EPITAPH_MAX_CHARS;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Form {
    Epitaph,
    Buried(String),
}

/// The journey failed. The leader gets a tombstone at the wagon's last marker.
#[derive(Debug)]
pub struct GameOver {
    form: Form,
    outcome: GameOutcome,
    leader: String,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    let leader = ctx
        .state
        .party
        .leader()
        .map_or_else(|| "a traveler".to_string(), |leader| leader.name.clone());
    Box::new(GameOver {
        form: Form::Epitaph,
        outcome: ctx.state.outcome.unwrap_or(GameOutcome::PartyDied),
        leader,
    })
}

impl Mode for GameOver {
    fn kind(&self) -> ModeKind {
        ModeKind::GameOver
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let screen = Screen::new("Your journey has ended")
            .line(self.outcome.describe())
            .line(format!(
                "{} miles from Independence on {}.",
                ctx.state.mile_marker(),
                ctx.state.date
            ));
        match &self.form {
            Form::Epitaph => screen
                .blank()
                .line(format!("Here lies {}.", self.leader))
                .prompt(format!(
                    "Write an epitaph (up to {EPITAPH_MAX_CHARS} letters), or press ENTER:"
                )),
            Form::Buried(inscription) => {
                screen.blank().line(inscription.clone()).prompt(PRESS_ENTER)
            }
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        if matches!(self.form, Form::Buried(_)) {
            return Transition::Reset(ModeKind::MainMenu);
        }
        let marker = ctx.state.mile_marker();
        let inscription = if ctx.bury(&self.leader, input.trimmed()) {
            ctx.graveyard
                .at(marker)
                .map(|stone| stone.inscription())
                .unwrap_or_default()
        } else {
            "Another traveler already rests here, so you mark the spot with stones.".to_string()
        };
        ctx.clear_save();
        log::debug!("game over ({:?}) at mile {marker}", self.outcome);
        self.form = Form::Buried(inscription);
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Profession;
    use crate::policy::TrailPolicy;
    use crate::simulation::PersistRequest;

    fn lost_party() -> SimulationContext {
        let mut ctx = SimulationContext::new(6, TrailPolicy::default());
        ctx.new_game("Ezra", Profession::Carpenter, ["Mary"], 6);
        ctx.state.vehicle.odometer = 640;
        ctx.state.outcome = Some(GameOutcome::Snowbound);
        ctx
    }

    #[test]
    fn epitaph_is_carved_and_save_cleared() {
        let mut ctx = lost_party();
        ctx.save_game();
        ctx.take_persist_requests();
        let mut mode = create(&mut ctx);
        assert!(mode.render(&ctx).body[0].contains("snowbound"));
        assert_eq!(mode.on_input(&mut ctx, &"Pepperoni and cheese".into()), Transition::Stay);
        let stone = ctx.graveyard.at(640).expect("tombstone placed");
        assert_eq!(stone.name, "Ezra");
        assert_eq!(stone.epitaph, "Pepperoni and cheese");
        assert!(ctx.saved_game.is_none());
        assert_eq!(
            ctx.take_persist_requests(),
            vec![PersistRequest::Graveyard, PersistRequest::ClearSave]
        );
        assert_eq!(mode.on_input(&mut ctx, &"".into()), Transition::Reset(ModeKind::MainMenu));
    }

    #[test]
    fn occupied_markers_keep_their_stone() {
        let mut ctx = lost_party();
        ctx.bury("Abe", "First here");
        let mut mode = create(&mut ctx);
        mode.on_input(&mut ctx, &"".into());
        assert_eq!(ctx.graveyard.at(640).map(|s| s.name.as_str()), Some("Abe"));
        assert!(mode.render(&ctx).body.iter().any(|l| l.contains("already rests")));
    }
}
