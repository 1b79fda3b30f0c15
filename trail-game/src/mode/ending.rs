use super::new_game::is_valid_name;
use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, Transition};
use crate::score::{ScoreBreakdown, compute_score};
use crate::simulation::SimulationContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Score,
    Name,
    Ranked(Option<usize>),
}

/// Arrival in the Willamette Valley and the final tally.
#[derive(Debug)]
pub struct Ending {
    form: Form,
    breakdown: ScoreBreakdown,
    rejected: Option<String>,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(Ending {
        form: Form::Score,
        breakdown: compute_score(&ctx.state, &ctx.policy),
        rejected: None,
    })
}

impl Ending {
    fn qualifies(&self, ctx: &SimulationContext) -> bool {
        ctx.high_scores.qualifies(self.breakdown.total)
    }
}

impl Mode for Ending {
    fn kind(&self) -> ModeKind {
        ModeKind::Ending
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let screen = Screen::new("Congratulations!")
            .line("You have made it to Oregon!")
            .line(format!("You arrived on {}.", ctx.state.date))
            .blank();
        match self.form {
            Form::Score => {
                let breakdown = &self.breakdown;
                let mut screen = screen.lines(breakdown.lines.iter().map(|line| {
                    format!("{:>6} {:<28}{:>6}", line.quantity, line.label, line.points)
                }));
                screen = screen
                    .line(format!("{:<35}{:>6}", "Subtotal", breakdown.subtotal))
                    .line(format!(
                        "{:<35}{:>6}",
                        format!("Bonus for being a {}", profession_label(breakdown)),
                        format!("x{}", breakdown.multiplier)
                    ))
                    .line(format!("{:<35}{:>6}", "Total", breakdown.total))
                    .blank()
                    .line(format!("You are rated a {}.", breakdown.rating));
                screen.prompt(PRESS_ENTER)
            }
            Form::Name => {
                let screen = screen.line(format!(
                    "Your score of {} earns a place on the Oregon Top Ten.",
                    self.breakdown.total
                ));
                let screen = match &self.rejected {
                    Some(message) => screen.line(message.clone()),
                    None => screen,
                };
                screen.prompt("What name should be recorded? (ENTER for the party leader)")
            }
            Form::Ranked(rank) => {
                let line = rank.map_or_else(
                    || "Your score did not make the Oregon Top Ten.".to_string(),
                    |rank| format!("You are number {} on the Oregon Top Ten.", rank + 1),
                );
                screen.line(line).prompt(PRESS_ENTER)
            }
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        match self.form {
            Form::Score => {
                self.form = if self.qualifies(ctx) {
                    Form::Name
                } else {
                    ctx.clear_save();
                    Form::Ranked(None)
                };
                Transition::Stay
            }
            Form::Name => {
                let leader = ctx
                    .state
                    .party
                    .leader()
                    .map_or("A traveler", |leader| leader.name.as_str())
                    .to_string();
                let name = match input.trimmed() {
                    "" => leader,
                    typed if is_valid_name(typed) => typed.to_string(),
                    typed => {
                        self.rejected = Some(format!("\"{typed}\" is not a name we can record."));
                        return Transition::Stay;
                    }
                };
                self.rejected = None;
                let today = chrono::Local::now().date_naive();
                let rank = ctx.record_high_score(&name, &self.breakdown, Some(today));
                ctx.clear_save();
                self.form = Form::Ranked(rank);
                Transition::Stay
            }
            Form::Ranked(_) => Transition::Reset(ModeKind::HighScores),
        }
    }
}

fn profession_label(breakdown: &ScoreBreakdown) -> &'static str {
    breakdown
        .profession
        .map_or("traveler", |profession| profession.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Profession;
    use crate::highscores::HighScore;
    use crate::policy::TrailPolicy;
    use crate::simulation::{GameOutcome, PersistRequest};

    fn arrived() -> SimulationContext {
        let mut ctx = SimulationContext::new(9, TrailPolicy::default());
        ctx.new_game("Ezra", Profession::Farmer, ["Mary", "Jed", "Sara", "Zeke"], 4);
        let inventory = &mut ctx.state.vehicle.inventory;
        inventory.oxen = 6;
        inventory.food_lbs = 400;
        inventory.clothing = 8;
        ctx.state.outcome = Some(GameOutcome::Arrived);
        ctx
    }

    #[test]
    fn winning_score_is_recorded_under_the_leader() {
        let mut ctx = arrived();
        ctx.save_game();
        ctx.take_persist_requests();
        let mut ending = create(&mut ctx);
        let screen = ending.render(&ctx);
        assert!(screen.body.iter().any(|l| l.contains("farmer from Illinois") && l.contains("x3")));
        assert_eq!(ending.on_input(&mut ctx, &"".into()), Transition::Stay);
        assert!(ending.render(&ctx).prompt.contains("What name"));
        assert_eq!(ending.on_input(&mut ctx, &"".into()), Transition::Stay);
        assert!(ctx.high_scores.entries().iter().any(|e| e.name == "Ezra"));
        assert!(ctx.saved_game.is_none());
        assert_eq!(
            ctx.take_persist_requests(),
            vec![PersistRequest::HighScores, PersistRequest::ClearSave]
        );
        assert!(ending.render(&ctx).body.iter().any(|l| l.contains("You are number")));
        assert_eq!(
            ending.on_input(&mut ctx, &"".into()),
            Transition::Reset(ModeKind::HighScores)
        );
    }

    #[test]
    fn top_ten_names_are_validated() {
        let mut ctx = arrived();
        let mut ending = create(&mut ctx);
        ending.on_input(&mut ctx, &"".into());
        assert_eq!(ending.on_input(&mut ctx, &"<script>".into()), Transition::Stay);
        assert!(ending.render(&ctx).body.iter().any(|l| l.contains("not a name")));
        assert!(ending.render(&ctx).prompt.contains("What name"));
        assert!(ctx.high_scores.entries().iter().all(|e| e.name != "<script>"));
        ending.on_input(&mut ctx, &"Hattie".into());
        assert!(ctx.high_scores.entries().iter().any(|e| e.name == "Hattie"));
        assert!(ending.render(&ctx).body.iter().any(|l| l.contains("You are number")));
    }

    #[test]
    fn low_scores_skip_the_name_prompt() {
        let mut ctx = arrived();
        for idx in 0..10 {
            ctx.high_scores.insert(HighScore {
                name: format!("Legend {idx}"),
                points: 1_000_000,
                rating: crate::score::ScoreRating::TrailGuide,
                recorded_on: None,
            });
        }
        let mut ending = create(&mut ctx);
        ending.on_input(&mut ctx, &"".into());
        assert!(ending.render(&ctx).body.iter().any(|l| l.contains("did not make")));
        assert!(ctx.high_scores.entries().iter().all(|e| e.name != "Ezra"));
    }
}
