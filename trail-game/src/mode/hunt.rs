use super::{Input, Mode, ModeKind, PRESS_ENTER, Screen, TickKind, Transition};
use crate::hunt::{HuntBlock, HuntSession, HuntTick, ShotOutcome};
use crate::rng::RngDomain;
use crate::simulation::SimulationContext;
use crate::travel::{Activity, advance_day};

const STOP_WORD: &str = "stop";
const RECENT_LINES: usize = 6;

#[derive(Debug)]
enum Phase {
    Blocked(HuntBlock),
    Hunting(HuntSession),
    Done(String),
}

/// A hunting trip. Game ticks move the clock; typed lines are shots.
#[derive(Debug)]
pub struct Hunt {
    phase: Phase,
    recent: Vec<String>,
}

pub fn create(ctx: &mut SimulationContext) -> Box<dyn Mode> {
    let phase = match HuntSession::new(
        &ctx.policy.hunt,
        &ctx.state.vehicle.inventory,
        ctx.state.weather.weather,
        ctx.state.party.alive_count(),
        ctx.rng.stream(RngDomain::Hunt),
    ) {
        Ok(session) => Phase::Hunting(session),
        Err(block) => Phase::Blocked(block),
    };
    Box::new(Hunt {
        phase,
        recent: Vec::new(),
    })
}

impl Hunt {
    fn note(&mut self, line: String) {
        self.recent.push(line);
        if self.recent.len() > RECENT_LINES {
            self.recent.remove(0);
        }
    }

    /// Carry the meat back and spend the day.
    fn finish(&mut self, ctx: &mut SimulationContext) {
        let Phase::Hunting(session) = std::mem::replace(&mut self.phase, Phase::Done(String::new()))
        else {
            return;
        };
        let food_cap = ctx.policy.store.max_carry.food_lbs;
        let summary = session.finish(&mut ctx.state.vehicle.inventory, food_cap);
        let text = summary.describe();
        ctx.state.push_log(text.clone());
        advance_day(ctx, Activity::Waiting);
        self.phase = Phase::Done(text);
    }
}

impl Mode for Hunt {
    fn kind(&self) -> ModeKind {
        ModeKind::Hunt
    }

    fn render(&self, ctx: &SimulationContext) -> Screen {
        match &self.phase {
            Phase::Blocked(block) => Screen::new("Hunting")
                .line(block.message())
                .prompt(PRESS_ENTER),
            Phase::Done(summary) => Screen::new("Hunting")
                .line(summary.clone())
                .prompt(PRESS_ENTER),
            Phase::Hunting(session) => {
                let screen = Screen::new("Hunting")
                    .line(format!(
                        "Bullets: {}   Meat shot: {} lbs   Time left: {}",
                        ctx.state.vehicle.inventory.bullets,
                        session.food_shot_lbs(),
                        session.ticks_left()
                    ))
                    .blank()
                    .lines(self.recent.iter().cloned());
                match session.sighting() {
                    Some(sighting) => screen.prompt(format!(
                        "A {} is in sight! Type {} to shoot:",
                        sighting.kind.label(),
                        session.word()
                    )),
                    None => screen.prompt("Press ENTER to wait, or type STOP to head back:"),
                }
            }
        }
    }

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition {
        let Phase::Hunting(session) = &mut self.phase else {
            return Transition::Pop;
        };
        let text = input.trimmed();
        if text.eq_ignore_ascii_case(STOP_WORD) {
            self.finish(ctx);
            return Transition::Stay;
        }
        if text.is_empty() {
            return Transition::Stay;
        }
        let outcome = session.shoot(
            &mut ctx.state.vehicle.inventory,
            text,
            input.latency_ms,
            ctx.rng.stream(RngDomain::Hunt),
        );
        let line = match outcome {
            ShotOutcome::NoTarget => "You fire at nothing.".to_string(),
            ShotOutcome::OutOfBullets => "You are out of bullets.".to_string(),
            ShotOutcome::WrongWord => "You fumble the shot.".to_string(),
            ShotOutcome::Miss(kind) => format!("You missed the {}.", kind.label()),
            ShotOutcome::Hit { kind, lbs } => {
                format!("You shot a {} ({lbs} lbs).", kind.label())
            }
        };
        self.note(line);
        if outcome == ShotOutcome::OutOfBullets || ctx.state.vehicle.inventory.bullets == 0 {
            self.finish(ctx);
        }
        Transition::Stay
    }

    fn on_tick(&mut self, ctx: &mut SimulationContext, tick: TickKind) -> Transition {
        if tick != TickKind::Game {
            return Transition::Stay;
        }
        let Phase::Hunting(session) = &mut self.phase else {
            return Transition::Stay;
        };
        match session.tick(ctx.rng.stream(RngDomain::Hunt)) {
            HuntTick::Quiet => {}
            HuntTick::Spawned(kind) => self.note(format!("A {} appears.", kind.label())),
            HuntTick::Fled(kind) => self.note(format!("The {} got away.", kind.label())),
            HuntTick::Over => self.finish(ctx),
        }
        Transition::Stay
    }

    fn wants_game_ticks(&self) -> bool {
        matches!(self.phase, Phase::Hunting(_))
    }
}
