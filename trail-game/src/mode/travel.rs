//! The trail screen: status, daily travel and the party's decisions.

use super::command::menu_command;
use super::{
    Input, MenuCommand, Mode, ModeKind, PRESS_ENTER, Screen, Transition, menu_lines, parse_choice,
};
use crate::entity::{Pace, Rations, SupplyKind};
use crate::simulation::{GameOutcome, SimulationContext};
use crate::trail::{START_LOCATION, locations};
use crate::travel::{Activity, DayReport, DayTag, advance_day, daily_miles, rest};

const MAX_REST_DAYS: u8 = 9;

/// Tags that stop a multi-day push so the player can react.
const HALTING_TAGS: [DayTag; 6] = [
    DayTag::Starving,
    DayTag::Broken,
    DayTag::NoOxen,
    DayTag::AwaitingBranch,
    DayTag::AwaitingCrossing,
    DayTag::Arrived,
];

menu_command! {
    pub enum TravelCommand {
        Continue = 1 => "Continue on trail",
        CheckSupplies = 2 => "Check supplies",
        LookAtMap = 3 => "Look at map",
        ChangePace = 4 => "Change pace",
        ChangeRations = 5 => "Change food rations",
        StopToRest = 6 => "Stop to rest",
        AttemptToTrade = 7 => "Attempt to trade",
        HuntForFood = 8 => "Hunt for food",
        SaveGame = 9 => "Save the journey",
        VisitStore = 10 => "Visit the store",
        ReturnToMainMenu = 11 => "Return to main menu",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Status,
    Supplies,
    Map,
    Pace,
    Rations,
    Rest,
}

#[derive(Debug)]
pub struct Travel {
    form: Form,
    outfitted: bool,
    arrival_pending: bool,
    summary: Vec<String>,
}

pub fn create(_ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(Travel {
        form: Form::Status,
        outfitted: false,
        arrival_pending: false,
        summary: Vec::new(),
    })
}

impl Travel {
    /// Screens owed to the player after time has passed, most urgent first.
    fn next_step(&mut self, ctx: &mut SimulationContext) -> Transition {
        if ctx.has_notices() {
            return Transition::Push(ModeKind::RandomEvent);
        }
        if let Some(outcome) = ctx.state.outcome {
            self.arrival_pending = false;
            return Transition::Replace(match outcome {
                GameOutcome::Arrived => ModeKind::Ending,
                _ => ModeKind::GameOver,
            });
        }
        if self.arrival_pending {
            self.arrival_pending = false;
            return Transition::Push(ModeKind::Location);
        }
        Transition::Stay
    }

    fn absorb(&mut self, reports: &[DayReport]) {
        let miles: u32 = reports.iter().map(|report| report.miles).sum();
        let food: u32 = reports.iter().map(|report| report.food_eaten_lbs).sum();
        self.summary.clear();
        if let Some(last) = reports.last() {
            let days = reports.len();
            let noun = if days == 1 { "day" } else { "days" };
            self.summary.push(format!(
                "{days} {noun} passed: {miles} miles travelled, {food} lbs of food eaten."
            ));
            if last.has_tag(DayTag::Starving) {
                self.summary.push("You have run out of food.".to_string());
            }
            if last.has_tag(DayTag::Broken) {
                self.summary
                    .push("The wagon is broken. Find a spare part to repair it.".to_string());
            }
            if last.has_tag(DayTag::NoOxen) {
                self.summary.push("You have no oxen to pull the wagon.".to_string());
            }
            if last.has_tag(DayTag::Delayed) {
                self.summary.push("You lose a day.".to_string());
            }
        }
        self.arrival_pending = reports.iter().any(|report| report.arrived.is_some());
    }

    fn continue_on(&mut self, ctx: &mut SimulationContext) -> Transition {
        if ctx.state.awaiting_crossing() {
            return Transition::Push(ModeKind::RiverCrossing);
        }
        if ctx.state.progress.needs_branch_choice() {
            return Transition::Push(ModeKind::Location);
        }
        let mut reports = Vec::new();
        loop {
            let report = advance_day(ctx, Activity::Travelling);
            let halt = report.outcome.is_some()
                || HALTING_TAGS.iter().any(|tag| report.has_tag(*tag))
                || ctx.has_notices();
            reports.push(report);
            if halt {
                break;
            }
        }
        self.absorb(&reports);
        self.next_step(ctx)
    }

    fn status_lines(&self, ctx: &SimulationContext) -> Vec<String> {
        let state = &ctx.state;
        let inventory = &state.vehicle.inventory;
        let next = match state.progress.next_location() {
            Some(loc) => format!("{} ({} miles)", loc.name, state.progress.miles_to_next),
            None => "choose a route".to_string(),
        };
        let mut lines = vec![
            format!("Date: {}", state.date),
            format!(
                "Weather: {} ({}°F)",
                state.weather.weather, state.weather.temperature_f
            ),
            format!("Health: {}", state.party.health_status().label()),
            format!("Food: {} pounds", inventory.food_lbs),
            format!("Next landmark: {next}"),
            format!("Miles traveled: {}", state.vehicle.odometer),
            format!(
                "Pace: {}   Rations: {}",
                state.vehicle.pace.label(),
                state.vehicle.rations.label()
            ),
        ];
        if !self.summary.is_empty() {
            lines.push(String::new());
            lines.extend(self.summary.iter().cloned());
        }
        lines
    }
}

impl Mode for Travel {
    fn kind(&self) -> ModeKind {
        ModeKind::Travel
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        let state = &ctx.state;
        let place = state
            .standing_at()
            .map_or("On the trail", |location| location.name);
        match self.form {
            Form::Status => Screen::new(place)
                .lines(self.status_lines(ctx))
                .blank()
                .line("You may:")
                .lines(TravelCommand::menu())
                .prompt("What is your choice?"),
            Form::Supplies => Screen::new("Your supplies")
                .lines(
                    SupplyKind::ALL
                        .into_iter()
                        .map(|kind| {
                            let amount = state.vehicle.inventory.quantity(kind);
                            format!("  {:<16}{}", kind.label(), kind.describe(amount))
                        }),
                )
                .blank()
                .lines(state.party.members.iter().map(|member| {
                    let affliction = member
                        .affliction
                        .map(|affliction| format!(", {}", affliction.kind.label()))
                        .unwrap_or_default();
                    format!("  {:<16}{}{affliction}", member.name, member.status().label())
                }))
                .prompt(PRESS_ENTER),
            Form::Map => {
                let mut screen = Screen::new("Map of the trail");
                for location in locations() {
                    let marker = if location.id == state.progress.current {
                        ">"
                    } else if state.progress.visited.contains(&location.id) {
                        "*"
                    } else {
                        " "
                    };
                    screen = screen.line(format!("  {marker} {}", location.name));
                }
                screen
                    .blank()
                    .line(format!(
                        "You have come {} miles. At this pace you make about {} miles a day.",
                        state.vehicle.odometer,
                        daily_miles(ctx)
                    ))
                    .prompt(PRESS_ENTER)
            }
            Form::Pace => Screen::new("Change pace")
                .line(format!("The current pace is {}.", state.vehicle.pace.label()))
                .blank()
                .lines(menu_lines(&Pace::ALL.map(Pace::label)))
                .prompt("What is your choice?"),
            Form::Rations => Screen::new("Change food rations")
                .line(format!(
                    "The current ration is {}.",
                    state.vehicle.rations.label()
                ))
                .blank()
                .lines(menu_lines(&Rations::ALL.map(Rations::label)))
                .prompt("What is your choice?"),
            Form::Rest => Screen::new("Stop to rest")
                .prompt(format!(
                    "How many days would you like to rest? (1-{MAX_REST_DAYS})"
                )),
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        let text = input.trimmed();
        match self.form {
            Form::Status => {}
            Form::Supplies | Form::Map => {
                self.form = Form::Status;
                return Transition::Stay;
            }
            Form::Pace => {
                if let Some(pace) = parse_choice(text, Pace::ALL.len()).map(|idx| Pace::ALL[idx]) {
                    ctx.state.vehicle.pace = pace;
                }
                self.form = Form::Status;
                return Transition::Stay;
            }
            Form::Rations => {
                if let Some(rations) =
                    parse_choice(text, Rations::ALL.len()).map(|idx| Rations::ALL[idx])
                {
                    ctx.state.vehicle.rations = rations;
                }
                self.form = Form::Status;
                return Transition::Stay;
            }
            Form::Rest => {
                self.form = Form::Status;
                let Ok(days) = text.parse::<u8>() else {
                    return Transition::Stay;
                };
                if days == 0 || days > MAX_REST_DAYS {
                    return Transition::Stay;
                }
                let reports = rest(ctx, days);
                self.absorb(&reports);
                return self.next_step(ctx);
            }
        }

        self.summary.clear();
        let Some(command) = TravelCommand::parse(text) else {
            return Transition::Stay;
        };
        match command {
            TravelCommand::Continue => self.continue_on(ctx),
            TravelCommand::CheckSupplies => {
                self.form = Form::Supplies;
                Transition::Stay
            }
            TravelCommand::LookAtMap => {
                self.form = Form::Map;
                Transition::Stay
            }
            TravelCommand::ChangePace => {
                self.form = Form::Pace;
                Transition::Stay
            }
            TravelCommand::ChangeRations => {
                self.form = Form::Rations;
                Transition::Stay
            }
            TravelCommand::StopToRest => {
                self.form = Form::Rest;
                Transition::Stay
            }
            TravelCommand::AttemptToTrade => Transition::Push(ModeKind::Trade),
            TravelCommand::HuntForFood => Transition::Push(ModeKind::Hunt),
            TravelCommand::SaveGame => {
                ctx.save_game();
                self.summary.push("Your journey has been saved.".to_string());
                Transition::Stay
            }
            TravelCommand::VisitStore => {
                if ctx.state.standing_at().is_some_and(|loc| loc.has_store()) {
                    Transition::Push(ModeKind::Store)
                } else {
                    self.summary.push("There is no store here.".to_string());
                    Transition::Stay
                }
            }
            TravelCommand::ReturnToMainMenu => Transition::Reset(ModeKind::MainMenu),
        }
    }

    fn on_focus(&mut self, ctx: &mut SimulationContext) -> Transition {
        let departing = ctx.state.days_elapsed == 0
            && ctx.state.progress.current == START_LOCATION
            && !ctx.state.party.members.is_empty();
        if departing && !self.outfitted {
            self.outfitted = true;
            return Transition::Push(ModeKind::Store);
        }
        self.next_step(ctx)
    }
}
