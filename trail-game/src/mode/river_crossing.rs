use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, Transition, menu_lines, parse_choice};
use crate::river::{CrossingMethod, RiverBed, apply_crossing, crossing_options, resolve_crossing};
use crate::rng::RngDomain;
use crate::simulation::SimulationContext;
use crate::travel::{Activity, advance_day, pass_days};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Form {
    Report,
    Outcome(Vec<String>),
}

/// The river bank: conditions, crossing methods and the result of an attempt.
#[derive(Debug)]
pub struct RiverCrossing {
    form: Form,
    waited: u32,
}

pub fn create(_ctx: &mut SimulationContext) -> Box<dyn Mode> {
    Box::new(RiverCrossing {
        form: Form::Report,
        waited: 0,
    })
}

fn methods(ctx: &SimulationContext) -> Vec<CrossingMethod> {
    ctx.state.river.map_or_else(Vec::new, |river| {
        crossing_options(&ctx.policy.river, &river, &ctx.state.vehicle.inventory).methods()
    })
}

impl RiverCrossing {
    fn cross(&mut self, ctx: &mut SimulationContext, method: CrossingMethod) -> Transition {
        let Some(river) = ctx.state.river else {
            return Transition::Pop;
        };
        let policy = &ctx.policy.river;
        let resolution = resolve_crossing(policy, &river, method, ctx.rng.stream(RngDomain::River));
        let report = apply_crossing(
            policy,
            &river,
            method,
            &resolution,
            &mut ctx.state.party,
            &mut ctx.state.vehicle.inventory,
            ctx.rng.stream(RngDomain::River),
        );
        log::debug!("crossing {} by {method:?}: {:?}", river.river, resolution.outcome);
        ctx.state.river = None;
        ctx.state.push_log(report.message.clone());

        let mut lines = vec![report.message];
        lines.extend(
            report
                .lost
                .iter()
                .map(|(kind, amount)| format!("  Lost {}", kind.describe(*amount))),
        );
        if let Some(name) = report.drowned {
            ctx.notify(format!("{name} has drowned."));
        }
        let days = pass_days(ctx, report.days.max(1), Activity::Waiting);
        if days.len() > 1 {
            lines.push(format!("The crossing took {} days.", days.len()));
        }
        self.form = Form::Outcome(lines);
        Transition::Stay
    }
}

impl Mode for RiverCrossing {
    fn kind(&self) -> ModeKind {
        ModeKind::RiverCrossing
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        if let Form::Outcome(lines) = &self.form {
            return Screen::new("River crossing")
                .lines(lines.iter().cloned())
                .prompt(PRESS_ENTER);
        }
        let Some(river) = ctx.state.river else {
            return Screen::new("River crossing")
                .line("There is no river to cross here.")
                .prompt(PRESS_ENTER);
        };
        let bed = match river.bed {
            RiverBed::Muddy => "muddy",
            RiverBed::Rocky => "rocky",
        };
        let mut labels: Vec<String> = methods(ctx)
            .into_iter()
            .map(|method| {
                let mut label = method.label().to_string();
                if let Some(first) = label.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                label
            })
            .collect();
        labels.push("Wait to see if conditions improve".to_string());
        let mut screen = Screen::new(river.river.label())
            .line(ctx.state.date.to_string())
            .line(format!("Weather: {}", ctx.state.weather.weather))
            .line(format!("River width: {:.0} feet", river.width_ft))
            .line(format!("River depth: {:.1} feet", river.depth_ft))
            .line(format!("The current is {:.1} and the bottom is {bed}.", river.swiftness));
        if self.waited > 0 {
            screen = screen.line(format!("Days waited: {}", self.waited));
        }
        screen
            .blank()
            .line("You may:")
            .lines(menu_lines(&labels))
            .prompt("What is your choice?")
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        if matches!(self.form, Form::Outcome(_)) || ctx.state.river.is_none() {
            return Transition::Pop;
        }
        let methods = methods(ctx);
        let Some(idx) = parse_choice(input.trimmed(), methods.len() + 1) else {
            return Transition::Stay;
        };
        match methods.get(idx).copied() {
            Some(method) => self.cross(ctx, method),
            None => {
                let report = advance_day(ctx, Activity::Waiting);
                self.waited = self.waited.saturating_add(1);
                if report.outcome.is_some() || ctx.has_notices() {
                    Transition::Pop
                } else {
                    Transition::Stay
                }
            }
        }
    }
}
