use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, Transition, menu_lines, parse_choice};
use crate::numbers::format_cents;
use crate::simulation::SimulationContext;
use crate::trail::{LocationKind, location};
use crate::travel::{BranchChoice, choose_branch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Branch(u8),
    ApproachRiver,
    VisitStore,
    Leave,
}

/// Arrival screen for a landmark, fort, river or fork.
#[derive(Debug)]
pub struct LocationMode {
    message: Option<String>,
}

pub fn create(_ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(LocationMode { message: None })
}

fn choices(ctx: &SimulationContext) -> Vec<Choice> {
    let state = &ctx.state;
    let mut choices: Vec<Choice> = state
        .progress
        .pending_branches()
        .into_iter()
        .map(|route| Choice::Branch(route.to))
        .collect();
    if state.awaiting_crossing() {
        choices.push(Choice::ApproachRiver);
    }
    if state.location().is_some_and(|loc| loc.has_store()) {
        choices.push(Choice::VisitStore);
    }
    if choices.iter().all(|choice| matches!(choice, Choice::VisitStore)) {
        choices.push(Choice::Leave);
    }
    choices
}

fn choice_label(ctx: &SimulationContext, choice: Choice) -> String {
    match choice {
        Choice::Branch(to) => {
            let Some(dest) = location(to) else {
                return format!("Head for location {to}");
            };
            let miles = ctx
                .state
                .progress
                .pending_branches()
                .into_iter()
                .find(|route| route.to == to)
                .map_or(0, |route| route.miles);
            match dest.kind {
                LocationKind::TollRoad { toll_cents } => format!(
                    "Take the {} ({miles} miles, toll {})",
                    dest.name,
                    format_cents(toll_cents)
                ),
                _ => format!("Head for {} ({miles} miles)", dest.name),
            }
        }
        Choice::ApproachRiver => "Approach the river".to_string(),
        Choice::VisitStore => "Visit the store".to_string(),
        Choice::Leave => "Return to the wagon".to_string(),
    }
}

impl Mode for LocationMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Location
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let state = &ctx.state;
        let Some(here) = state.location() else {
            return Screen::new("Somewhere on the trail").prompt(PRESS_ENTER);
        };
        let labels: Vec<String> = choices(ctx)
            .into_iter()
            .map(|choice| choice_label(ctx, choice))
            .collect();
        let mut screen = Screen::new(here.name)
            .line(state.date.to_string())
            .line(here.description);
        if let Some(stone) = ctx.graveyard.at(state.mile_marker()) {
            screen = screen.blank().line(stone.inscription());
        }
        if let Some(message) = &self.message {
            screen = screen.blank().line(message.clone());
        }
        screen
            .blank()
            .line("You may:")
            .lines(menu_lines(&labels))
            .prompt("What is your choice?")
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        if ctx.state.location().is_none() {
            return Transition::Pop;
        }
        let choices = choices(ctx);
        let Some(choice) = parse_choice(input.trimmed(), choices.len()).map(|idx| choices[idx])
        else {
            return Transition::Stay;
        };
        match choice {
            Choice::Branch(to) => match choose_branch(ctx, to) {
                BranchChoice::Chosen => {
                    let name = location(to).map_or("the west", |loc| loc.name);
                    ctx.state.push_log(format!("The party heads for {name}."));
                    Transition::Pop
                }
                BranchChoice::TollUnpaid { toll_cents } => {
                    self.message = Some(format!(
                        "The toll is {}. You don't have enough money.",
                        format_cents(toll_cents)
                    ));
                    Transition::Stay
                }
                BranchChoice::Invalid => Transition::Stay,
            },
            Choice::ApproachRiver => Transition::Replace(ModeKind::RiverCrossing),
            Choice::VisitStore => Transition::Push(ModeKind::Store),
            Choice::Leave => Transition::Pop,
        }
    }
}
