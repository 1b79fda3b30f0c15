//! Daily travel: one call advances the journey by a single day.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::calendar::Date;
use crate::climate::{WeatherReport, roll_weather};
use crate::director::EventOutcome;
use crate::entity::{AfflictionTick, SupplyKind, VehicleStatus};
use crate::numbers::{round_f32_to_u32, u32_to_f32};
use crate::river::derive_river_state;
use crate::rng::RngDomain;
use crate::simulation::{GameOutcome, SimulationContext};
use crate::tombstone::Tombstone;
use crate::trail::{LocationKind, route_between};

/// Floor on the speed left after sickness slows the party.
const MIN_SICK_SPEED_MULT: f32 = 0.5;

/// What the party does with the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Travelling,
    Resting,
    /// Stationary but not resting: hunting, waiting at a river.
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayTag {
    Starving,
    Freezing,
    Death,
    Recovery,
    Event,
    Delayed,
    Broken,
    NoOxen,
    AwaitingBranch,
    AwaitingCrossing,
    Arrived,
    Tombstone,
}

pub type DayTagSet = SmallVec<[DayTag; 4]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub date: Date,
    pub activity: Activity,
    pub weather: WeatherReport,
    pub miles: u32,
    pub food_eaten_lbs: u32,
    pub deaths: Vec<String>,
    pub recovered: Vec<String>,
    pub event: Option<EventOutcome>,
    pub arrived: Option<u8>,
    pub tombstones: Vec<Tombstone>,
    pub outcome: Option<GameOutcome>,
    #[serde(default)]
    pub tags: DayTagSet,
}

impl DayReport {
    fn new(ctx: &SimulationContext, activity: Activity) -> Self {
        Self {
            day: ctx.state.days_elapsed,
            date: ctx.state.date,
            activity,
            weather: ctx.state.weather,
            miles: 0,
            food_eaten_lbs: 0,
            deaths: Vec::new(),
            recovered: Vec::new(),
            event: None,
            arrived: None,
            tombstones: Vec::new(),
            outcome: ctx.state.outcome,
            tags: DayTagSet::new(),
        }
    }

    pub fn push_tag(&mut self, tag: DayTag) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: DayTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Outcome of picking a branch at a fork in the road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchChoice {
    Chosen,
    TollUnpaid { toll_cents: u32 },
    Invalid,
}

/// Pass one day. Travelling moves the wagon; every activity eats food and
/// exposes the party to the weather.
pub fn advance_day(ctx: &mut SimulationContext, activity: Activity) -> DayReport {
    if ctx.state.is_over() {
        return DayReport::new(ctx, activity);
    }
    ctx.state.date.advance_day();
    ctx.state.days_elapsed = ctx.state.days_elapsed.saturating_add(1);
    let climate = ctx.state.climate();
    let date = ctx.state.date;
    ctx.state.weather = roll_weather(climate, date, ctx.rng.stream(RngDomain::Climate));
    let mut report = DayReport::new(ctx, activity);

    eat(ctx, &mut report);
    weather_party(ctx, activity, &mut report);
    tick_afflictions(ctx, &mut report);

    if matches!(activity, Activity::Travelling) && !ctx.state.party.all_dead() {
        roll_event(ctx, &mut report);
    }
    match activity {
        Activity::Travelling => travel(ctx, &mut report),
        Activity::Resting | Activity::Waiting => {
            ctx.state.vehicle.delay_days = ctx.state.vehicle.delay_days.saturating_sub(1);
            if ctx.state.vehicle.status == VehicleStatus::Moving {
                ctx.state.vehicle.status = VehicleStatus::Stopped;
            }
            if matches!(activity, Activity::Waiting) {
                refresh_river(ctx);
            }
        }
    }

    report.outcome = check_outcome(ctx, activity);
    ctx.state.outcome = report.outcome;
    log::debug!(
        "day {} ({}): {:?} {} miles, tags {:?}",
        report.day,
        report.date,
        activity,
        report.miles,
        report.tags
    );
    report
}

/// Rest in place for up to `days` days, stopping early if the game ends.
pub fn rest(ctx: &mut SimulationContext, days: u8) -> Vec<DayReport> {
    pass_days(ctx, days, Activity::Resting)
}

pub fn pass_days(ctx: &mut SimulationContext, days: u8, activity: Activity) -> Vec<DayReport> {
    let mut reports = Vec::with_capacity(usize::from(days));
    for _ in 0..days {
        let report = advance_day(ctx, activity);
        let over = report.outcome.is_some();
        reports.push(report);
        if over {
            break;
        }
    }
    reports
}

/// Take one of the routes leaving a fork. Toll roads are paid for up front.
pub fn choose_branch(ctx: &mut SimulationContext, to: u8) -> BranchChoice {
    let state = &mut ctx.state;
    if route_between(state.progress.current, to).is_none() {
        return BranchChoice::Invalid;
    }
    let toll = crate::trail::location(to).and_then(|loc| match loc.kind {
        LocationKind::TollRoad { toll_cents } => Some(toll_cents),
        _ => None,
    });
    if let Some(toll_cents) = toll {
        if state.vehicle.inventory.cash_cents < toll_cents {
            return BranchChoice::TollUnpaid { toll_cents };
        }
        state.vehicle.inventory.take(SupplyKind::Cash, toll_cents);
    }
    if !state.progress.choose_branch(to) {
        return BranchChoice::Invalid;
    }
    BranchChoice::Chosen
}

/// Miles the wagon would cover today under current conditions.
#[must_use]
pub fn daily_miles(ctx: &SimulationContext) -> u32 {
    let travel = &ctx.policy.travel;
    let vehicle = &ctx.state.vehicle;
    if vehicle.inventory.oxen < travel.min_oxen_to_move {
        return 0;
    }
    let full = travel.oxen_for_full_speed.max(1);
    let oxen_mult = u32_to_f32(vehicle.inventory.oxen.min(full)) / u32_to_f32(full);
    let sick = f32::from(ctx.state.party.afflicted_count());
    let sick_mult = travel
        .afflicted_speed_penalty
        .mul_add(-sick, 1.0)
        .max(MIN_SICK_SPEED_MULT);
    let miles = travel.base_miles_per_day
        * ctx.policy.pace.miles_mult(vehicle.pace)
        * oxen_mult
        * ctx.state.weather.weather.travel_mult()
        * sick_mult;
    round_f32_to_u32(miles).max(1)
}

fn eat(ctx: &mut SimulationContext, report: &mut DayReport) {
    let alive = u32::from(ctx.state.party.alive_count());
    let needed = ctx
        .policy
        .rations
        .food_per_person(ctx.state.vehicle.rations)
        .saturating_mul(alive);
    let eaten = ctx.state.vehicle.inventory.take(SupplyKind::Food, needed);
    report.food_eaten_lbs = eaten;
    if eaten < needed {
        report.push_tag(DayTag::Starving);
    }
}

fn weather_party(ctx: &mut SimulationContext, activity: Activity, report: &mut DayReport) {
    let policy = &ctx.policy;
    let state = &mut ctx.state;
    let mut delta =
        policy.rations.health_delta(state.vehicle.rations) + state.weather.weather.health_delta();
    match activity {
        Activity::Travelling => delta -= policy.pace.health_penalty(state.vehicle.pace),
        Activity::Resting => delta += policy.travel.rest_recovery,
        Activity::Waiting => {}
    }
    if report.has_tag(DayTag::Starving) {
        delta -= i32::from(policy.travel.starvation_damage);
    }
    let clothed = usize::try_from(state.vehicle.inventory.clothing).unwrap_or(usize::MAX);
    let cold = state.weather.weather.is_cold();
    let cold_damage = policy.travel.cold_without_clothing_damage;
    for (idx, member) in state.party.living_mut().enumerate() {
        member.adjust(delta);
        if cold && idx >= clothed {
            member.damage(cold_damage);
            report.push_tag(DayTag::Freezing);
        }
        if !member.is_alive() {
            report.deaths.push(member.name.clone());
        }
    }
}

fn tick_afflictions(ctx: &mut SimulationContext, report: &mut DayReport) {
    let mut messages = Vec::new();
    let mut died_of_affliction = Vec::new();
    for member in ctx.state.party.living_mut() {
        match member.tick_affliction() {
            AfflictionTick::Recovered(kind) => {
                report.recovered.push(member.name.clone());
                report.push_tag(DayTag::Recovery);
                messages.push(format!("{} has recovered from {}.", member.name, kind.label()));
            }
            AfflictionTick::Suffering(kind) if !member.is_alive() => {
                messages.push(format!("{} has died of {}.", member.name, kind.label()));
                died_of_affliction.push(member.name.clone());
            }
            AfflictionTick::Suffering(_) | AfflictionTick::Healthy => {}
        }
    }
    for name in &report.deaths {
        messages.push(format!("{name} has died."));
    }
    report.deaths.extend(died_of_affliction);
    if !report.deaths.is_empty() {
        report.push_tag(DayTag::Death);
    }
    for message in messages {
        ctx.notify(message);
    }
}

fn roll_event(ctx: &mut SimulationContext, report: &mut DayReport) {
    let director = ctx.director;
    let Some(kind) = director.roll(&ctx.state, ctx.rng.stream(RngDomain::Events)) else {
        return;
    };
    let outcome = director.apply_event(&mut ctx.state, kind, ctx.rng.stream(RngDomain::Events));
    if outcome.message.is_empty() {
        return;
    }
    report.push_tag(DayTag::Event);
    ctx.notify(outcome.message.clone());
    // Targets are picked among the living, so a dead target died of this event.
    let killed = outcome
        .target
        .and_then(|idx| ctx.state.party.members.get(idx))
        .filter(|member| !member.is_alive())
        .map(|member| member.name.clone());
    if let Some(name) = killed {
        ctx.notify(format!("{name} has died."));
        report.deaths.push(name);
        report.push_tag(DayTag::Death);
    }
    report.event = Some(outcome);
}

fn travel(ctx: &mut SimulationContext, report: &mut DayReport) {
    let min_oxen = ctx.policy.travel.min_oxen_to_move;
    let vehicle = &mut ctx.state.vehicle;
    if vehicle.delay_days > 0 {
        vehicle.delay_days -= 1;
        vehicle.status = VehicleStatus::Stopped;
        report.push_tag(DayTag::Delayed);
        return;
    }
    if vehicle.is_disabled() {
        let part = vehicle.broken_part;
        if !vehicle.repair_with_spare() {
            report.push_tag(DayTag::Broken);
            return;
        }
        if let Some(part) = part {
            ctx.notify(format!("You replace the broken {} with a spare.", part.label()));
        }
    }
    let vehicle = &mut ctx.state.vehicle;
    if vehicle.inventory.oxen < min_oxen {
        vehicle.status = VehicleStatus::Stopped;
        report.push_tag(DayTag::NoOxen);
        return;
    }
    if ctx.state.awaiting_crossing() {
        report.push_tag(DayTag::AwaitingCrossing);
        return;
    }
    if ctx.state.progress.needs_branch_choice() {
        report.push_tag(DayTag::AwaitingBranch);
        return;
    }

    let miles = daily_miles(ctx);
    let before = ctx.state.vehicle.odometer;
    let advance = ctx.state.progress.advance(miles);
    let after = before.saturating_add(advance.miles);
    ctx.state.vehicle.odometer = after;
    ctx.state.vehicle.status = VehicleStatus::Moving;
    ctx.state.at_location = false;
    report.miles = advance.miles;

    let passed: Vec<Tombstone> = ctx.graveyard.passed(before, after).cloned().collect();
    for stone in &passed {
        ctx.notify(format!("You pass a grave. {}", stone.inscription()));
    }
    if !passed.is_empty() {
        report.push_tag(DayTag::Tombstone);
    }
    report.tombstones = passed;

    if let Some(id) = advance.arrived {
        arrive(ctx, id);
        report.arrived = Some(id);
        report.push_tag(DayTag::Arrived);
    }
}

fn arrive(ctx: &mut SimulationContext, id: u8) {
    ctx.state.at_location = true;
    ctx.state.vehicle.status = VehicleStatus::Stopped;
    let Some(location) = crate::trail::location(id) else {
        return;
    };
    ctx.state.push_log(format!("Arrived at {} on {}.", location.name, ctx.state.date));
    if let Some(river) = location.river() {
        let season = ctx.state.date.season();
        let river_state = derive_river_state(
            &ctx.policy.river,
            river,
            season,
            ctx.rng.stream(RngDomain::River),
        );
        ctx.state.river = Some(river_state);
    }
}

fn refresh_river(ctx: &mut SimulationContext) {
    let Some(current) = ctx.state.river else {
        return;
    };
    let season = ctx.state.date.season();
    ctx.state.river = Some(derive_river_state(
        &ctx.policy.river,
        current.river,
        season,
        ctx.rng.stream(RngDomain::River),
    ));
}

fn check_outcome(ctx: &SimulationContext, activity: Activity) -> Option<GameOutcome> {
    let state = &ctx.state;
    if state.party.all_dead() {
        return Some(GameOutcome::PartyDied);
    }
    if state.progress.has_arrived() {
        return Some(GameOutcome::Arrived);
    }
    let start_year = ctx.policy.start_year;
    if state.date.year > start_year || state.date.month > ctx.policy.travel.deadline_month {
        return Some(GameOutcome::Snowbound);
    }
    let stranded = state.vehicle.inventory.oxen < ctx.policy.travel.min_oxen_to_move
        && !state.standing_at().is_some_and(|loc| loc.has_store());
    if stranded && matches!(activity, Activity::Travelling) {
        return Some(GameOutcome::NoOxen);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Pace, Profession, Rations};
    use crate::policy::TrailPolicy;

    fn context() -> SimulationContext {
        let mut policy = TrailPolicy::default();
        policy.events.chance_per_day = 0.0;
        let mut ctx = SimulationContext::new(7, policy);
        ctx.new_game("Ezra", Profession::Farmer, ["Mary", "Jed", "Sara", "Zeke"], 4);
        let inventory = &mut ctx.state.vehicle.inventory;
        inventory.oxen = 6;
        inventory.food_lbs = 1_000;
        inventory.clothing = 10;
        ctx
    }

    #[test]
    fn travelling_eats_and_moves() {
        let mut ctx = context();
        let report = advance_day(&mut ctx, Activity::Travelling);
        assert_eq!(report.food_eaten_lbs, 15);
        assert_eq!(ctx.state.vehicle.inventory.food_lbs, 985);
        assert!(report.miles > 0);
        assert_eq!(ctx.state.vehicle.odometer, report.miles);
        assert_eq!(ctx.state.days_elapsed, 1);
        assert_eq!(ctx.state.date, Date { year: 1848, month: 4, day: 2 });
        assert!(!ctx.state.at_location);
    }

    #[test]
    fn food_never_goes_negative_and_starvation_hurts() {
        let mut ctx = context();
        ctx.state.vehicle.inventory.food_lbs = 4;
        let before: u32 = ctx.state.party.living().map(|m| u32::from(m.health)).sum();
        let report = advance_day(&mut ctx, Activity::Resting);
        assert_eq!(report.food_eaten_lbs, 4);
        assert_eq!(ctx.state.vehicle.inventory.food_lbs, 0);
        assert!(report.has_tag(DayTag::Starving));
        let rested = advance_day(&mut ctx, Activity::Waiting);
        assert!(rested.has_tag(DayTag::Starving));
        let after: u32 = ctx.state.party.living().map(|m| u32::from(m.health)).sum();
        assert!(after < before);
    }

    #[test]
    fn deaths_follow_the_member_struck_not_their_name() {
        let mut policy = TrailPolicy::default();
        policy.events.chance_per_day = 1.0;
        let mut ctx = SimulationContext::new(7, policy);
        ctx.new_game("Mary", Profession::Farmer, ["Mary", "Jed"], 4);
        let inventory = &mut ctx.state.vehicle.inventory;
        inventory.oxen = 6;
        inventory.food_lbs = 1_000;
        inventory.clothing = 10;
        ctx.state.party.members[1].damage(500);
        let mut reported = 0;
        for _ in 0..60 {
            let report = advance_day(&mut ctx, Activity::Travelling);
            reported += report.deaths.iter().filter(|name| *name == "Mary").count();
        }
        let leader_died = !ctx.state.party.members[0].is_alive();
        assert_eq!(reported, usize::from(leader_died));
    }

    #[test]
    fn grueling_pace_covers_more_ground() {
        let mut steady = context();
        steady.state.weather.weather = crate::climate::Weather::Clear;
        let base = daily_miles(&steady);
        steady.state.vehicle.pace = Pace::Grueling;
        assert!(daily_miles(&steady) > base);
        steady.state.vehicle.inventory.oxen = 3;
        steady.state.vehicle.pace = Pace::Steady;
        assert!(daily_miles(&steady) < base);
    }

    #[test]
    fn reaching_a_river_stops_the_wagon() {
        let mut ctx = context();
        let mut arrived = None;
        for _ in 0..30 {
            let report = advance_day(&mut ctx, Activity::Travelling);
            if report.arrived.is_some() {
                arrived = report.arrived;
                break;
            }
        }
        assert_eq!(arrived, Some(1));
        assert_eq!(ctx.state.vehicle.odometer, 102);
        assert!(ctx.state.awaiting_crossing());
        assert_eq!(ctx.state.vehicle.status, VehicleStatus::Stopped);
        let blocked = advance_day(&mut ctx, Activity::Travelling);
        assert!(blocked.has_tag(DayTag::AwaitingCrossing));
        assert_eq!(ctx.state.vehicle.odometer, 102);
    }

    #[test]
    fn delays_hold_the_wagon() {
        let mut ctx = context();
        ctx.state.vehicle.delay_days = 2;
        let report = advance_day(&mut ctx, Activity::Travelling);
        assert!(report.has_tag(DayTag::Delayed));
        assert_eq!(report.miles, 0);
        let rested = rest(&mut ctx, 1);
        assert_eq!(rested.len(), 1);
        assert_eq!(ctx.state.vehicle.delay_days, 0);
    }

    #[test]
    fn broken_wagons_wait_for_a_spare() {
        let mut ctx = context();
        ctx.state.vehicle.break_part(crate::entity::WagonPart::Axle);
        let stuck = advance_day(&mut ctx, Activity::Travelling);
        assert!(stuck.has_tag(DayTag::Broken));
        assert_eq!(stuck.miles, 0);

        ctx.state.vehicle.inventory.axles = 1;
        let moving = advance_day(&mut ctx, Activity::Travelling);
        assert!(!moving.has_tag(DayTag::Broken));
        assert!(moving.miles > 0);
        assert_eq!(ctx.state.vehicle.inventory.axles, 0);
        assert!(ctx.take_notices().iter().any(|n| n.contains("wagon axle")));
    }

    #[test]
    fn everyone_dying_ends_the_game() {
        let mut ctx = context();
        for member in &mut ctx.state.party.members {
            member.health = 1;
        }
        ctx.state.vehicle.inventory.food_lbs = 0;
        ctx.state.vehicle.rations = Rations::BareBones;
        let report = advance_day(&mut ctx, Activity::Travelling);
        assert_eq!(report.outcome, Some(GameOutcome::PartyDied));
        assert_eq!(report.deaths.len(), 5);
        assert!(ctx.take_notices().iter().any(|n| n == "Ezra has died."));
        let after = advance_day(&mut ctx, Activity::Travelling);
        assert_eq!(after.day, report.day, "finished games do not advance");
    }

    #[test]
    fn winter_strands_the_party() {
        let mut ctx = context();
        ctx.state.date = Date { year: 1848, month: 12, day: 31 };
        let report = advance_day(&mut ctx, Activity::Resting);
        assert_eq!(report.outcome, Some(GameOutcome::Snowbound));
    }

    #[test]
    fn losing_the_oxen_strands_the_wagon_between_stores() {
        let mut ctx = context();
        advance_day(&mut ctx, Activity::Travelling);
        ctx.state.vehicle.inventory.oxen = 0;
        let report = advance_day(&mut ctx, Activity::Travelling);
        assert!(report.has_tag(DayTag::NoOxen));
        assert_eq!(report.outcome, Some(GameOutcome::NoOxen));
    }

    #[test]
    fn toll_roads_charge_before_the_branch_is_taken() {
        let mut ctx = context();
        ctx.state.progress.current = 16;
        ctx.state.progress.next = None;
        ctx.state.vehicle.inventory.cash_cents = 500;
        assert_eq!(
            choose_branch(&mut ctx, 17),
            BranchChoice::TollUnpaid { toll_cents: 1_000 }
        );
        assert_eq!(choose_branch(&mut ctx, 3), BranchChoice::Invalid);
        ctx.state.vehicle.inventory.cash_cents = 1_500;
        assert_eq!(choose_branch(&mut ctx, 17), BranchChoice::Chosen);
        assert_eq!(ctx.state.vehicle.inventory.cash_cents, 500);
        assert_eq!(ctx.state.progress.next, Some(17));
    }

    #[test]
    fn same_seed_same_days() {
        let mut left = context();
        let mut right = context();
        for _ in 0..20 {
            assert_eq!(
                advance_day(&mut left, Activity::Travelling),
                advance_day(&mut right, Activity::Travelling)
            );
        }
        assert_eq!(left.state, right.state);
    }
}
