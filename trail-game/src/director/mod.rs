//! Random event director.
//!
//! Each travel day the director rolls against the daily event chance, then
//! draws one event from the catalog weighted by the party's circumstances.
//! Applying an event mutates the party or the wagon and yields the message
//! shown to the player.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod catalog;

pub use catalog::{EVENT_CATALOG, EventCategory, EventDef, EventFilter, EventKind, event_def};

use crate::entity::{Rations, SupplyKind, WagonPart};
use crate::policy::TrailPolicy;
use crate::simulation::GameState;

const THIEF_MIN_PCT: u32 = 10;
const THIEF_MAX_PCT: u32 = 30;
const HAIL_DAMAGE: (u16, u16) = (20, 40);
const BLIZZARD_DAMAGE: i32 = -10;
const GOOD_WATER_HEAL: i32 = 20;
const WILD_FRUIT_LBS: (u32, u32) = (20, 60);
const ABANDONED_FOOD_LBS: (u32, u32) = (10, 50);
const ABANDONED_BULLETS: (u32, u32) = (10, 40);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub kind: EventKind,
    pub message: String,
    /// Index of the party member the event struck.
    #[serde(default)]
    pub target: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventDirector {
    chance_per_day: f32,
    short_rations_illness_mult: f32,
    food_cap: u32,
}

impl EventDirector {
    #[must_use]
    pub fn new(policy: &TrailPolicy) -> Self {
        Self {
            chance_per_day: policy.events.chance_per_day.clamp(0.0, 1.0),
            short_rations_illness_mult: policy.events.short_rations_illness_mult.max(0.0),
            food_cap: policy.store.cap(SupplyKind::Food),
        }
    }

    #[must_use]
    pub const fn chance_per_day(&self) -> f32 {
        self.chance_per_day
    }

    /// Roll for today's event, if any.
    pub fn roll<R: Rng>(&self, state: &GameState, rng: &mut R) -> Option<EventKind> {
        if rng.r#gen::<f32>() >= self.chance_per_day {
            return None;
        }
        let weighted: Vec<(EventKind, f32)> = EVENT_CATALOG
            .iter()
            .filter(|def| is_eligible(def, state))
            .map(|def| (def.kind, self.weight_for(def, state)))
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        let total: f32 = weighted.iter().map(|(_, weight)| *weight).sum();
        if total <= 0.0 {
            return None;
        }
        let mut remaining = rng.r#gen::<f32>() * total;
        let mut selected = weighted.first()?.0;
        for (kind, weight) in &weighted {
            if remaining < *weight {
                selected = *kind;
                break;
            }
            remaining -= weight;
        }
        log::debug!("event director picked {}", selected.key());
        Some(selected)
    }

    fn weight_for(&self, def: &EventDef, state: &GameState) -> f32 {
        let base = crate::numbers::u32_to_f32(def.weight);
        let short_rations = !matches!(state.vehicle.rations, Rations::Filling);
        if short_rations && def.kind.category() == EventCategory::Illness {
            base * self.short_rations_illness_mult
        } else {
            base
        }
    }

    /// Apply an event to the party and wagon.
    pub fn apply_event<R: Rng>(
        &self,
        state: &mut GameState,
        kind: EventKind,
        rng: &mut R,
    ) -> EventOutcome {
        let days = event_def(kind).map_or((1, 1), |def| def.days);
        if let Some(affliction) = kind.affliction() {
            return afflict_member(state, kind, affliction, days, rng);
        }
        if let Some(part) = kind.broken_part() {
            return break_part(state, kind, part);
        }
        let inventory = &mut state.vehicle.inventory;
        let (message, target) = match kind {
            EventKind::Thief => {
                let goods = [SupplyKind::Food, SupplyKind::Ammunition, SupplyKind::Clothing];
                let held: Vec<SupplyKind> = goods
                    .into_iter()
                    .filter(|kind| inventory.quantity(*kind) > 0)
                    .collect();
                if held.is_empty() {
                    (
                        "A thief came during the night but found nothing to take.".to_string(),
                        None,
                    )
                } else {
                    let stolen_kind = held[rng.gen_range(0..held.len())];
                    let pct = rng.gen_range(THIEF_MIN_PCT..=THIEF_MAX_PCT);
                    let amount = (inventory.quantity(stolen_kind) * pct / 100).max(1);
                    let taken = inventory.take(stolen_kind, amount);
                    (
                        format!(
                            "A thief came during the night and stole {}.",
                            stolen_kind.describe(taken)
                        ),
                        None,
                    )
                }
            }
            EventKind::OxWanderedOff => {
                inventory.take(SupplyKind::Oxen, 1);
                ("One of your oxen wandered off.".to_string(), None)
            }
            EventKind::LostTrail => {
                let lost = delay(state, days, rng);
                (format!("You lost the trail. You lose {lost} days."), None)
            }
            EventKind::HeavyFog => {
                let lost = delay(state, days, rng);
                (format!("Heavy fog. You lose {lost} day."), None)
            }
            EventKind::HailStorm => {
                delay(state, days, rng);
                let hurt = state.party.random_living_index(rng, false).map(|idx| {
                    let member = &mut state.party.members[idx];
                    member.damage(rng.gen_range(HAIL_DAMAGE.0..=HAIL_DAMAGE.1));
                    (idx, member.name.clone())
                });
                match hurt {
                    Some((idx, name)) => (
                        format!("A hail storm damaged the wagon and injured {name}."),
                        Some(idx),
                    ),
                    None => ("A hail storm battered the wagon.".to_string(), None),
                }
            }
            EventKind::Blizzard => {
                let lost = delay(state, days, rng);
                state.party.adjust_all(BLIZZARD_DAMAGE);
                (format!("A blizzard. You lose {lost} days."), None)
            }
            EventKind::WildFruit => {
                let lbs = rng.gen_range(WILD_FRUIT_LBS.0..=WILD_FRUIT_LBS.1);
                let added = inventory.add_capped(SupplyKind::Food, lbs, self.food_cap);
                (format!("You found wild fruit: {added} pounds of food."), None)
            }
            EventKind::AbandonedWagon => {
                let found = match rng.gen_range(0..3_u8) {
                    0 => {
                        let part = WagonPart::ALL[rng.gen_range(0..WagonPart::ALL.len())];
                        inventory.add(part.supply_kind(), 1);
                        format!("a spare {}", part.label())
                    }
                    1 => {
                        let lbs = rng.gen_range(ABANDONED_FOOD_LBS.0..=ABANDONED_FOOD_LBS.1);
                        let added = inventory.add_capped(SupplyKind::Food, lbs, self.food_cap);
                        SupplyKind::Food.describe(added)
                    }
                    _ => {
                        let bullets = rng.gen_range(ABANDONED_BULLETS.0..=ABANDONED_BULLETS.1);
                        inventory.add(SupplyKind::Ammunition, bullets);
                        SupplyKind::Ammunition.describe(bullets)
                    }
                };
                (format!("You found an abandoned wagon with {found}."), None)
            }
            EventKind::GoodWater => {
                state.party.adjust_all(GOOD_WATER_HEAL);
                ("You found good, clean water. The party feels better.".to_string(), None)
            }
            _ => (String::new(), None),
        };
        EventOutcome {
            kind,
            message,
            target,
        }
    }
}

fn is_eligible(def: &EventDef, state: &GameState) -> bool {
    let filter_ok = match def.filter {
        EventFilter::Always => true,
        EventFilter::Seasons(seasons) => seasons.contains(&state.date.season()),
        EventFilter::ColdWeather => state.weather.weather.is_cold(),
    };
    if !filter_ok {
        return false;
    }
    let inventory = &state.vehicle.inventory;
    match def.kind.category() {
        EventCategory::Illness | EventCategory::Injury => state
            .party
            .living()
            .any(|member| !member.is_afflicted()),
        _ => match def.kind {
            EventKind::BrokenWheel | EventKind::BrokenAxle | EventKind::BrokenTongue => {
                !state.vehicle.is_disabled()
            }
            EventKind::OxWanderedOff => inventory.oxen >= 2,
            EventKind::Thief => inventory.food_lbs + inventory.bullets + inventory.clothing > 0,
            _ => true,
        },
    }
}

fn afflict_member<R: Rng>(
    state: &mut GameState,
    kind: EventKind,
    affliction: crate::entity::AfflictionKind,
    days: (u8, u8),
    rng: &mut R,
) -> EventOutcome {
    let Some(idx) = state.party.random_living_index(rng, true) else {
        return EventOutcome {
            kind,
            message: String::new(),
            target: None,
        };
    };
    let duration = rng.gen_range(days.0..=days.1.max(days.0));
    let member = &mut state.party.members[idx];
    member.afflict(affliction, duration);
    EventOutcome {
        kind,
        message: format!("{} has {}.", member.name, affliction.label()),
        target: Some(idx),
    }
}

fn break_part(state: &mut GameState, kind: EventKind, part: WagonPart) -> EventOutcome {
    state.vehicle.break_part(part);
    let message = if state.vehicle.repair_with_spare() {
        format!("A {} broke. You replaced it with a spare.", part.label())
    } else {
        format!(
            "A {} broke and you have no spare. The wagon cannot move until you find one.",
            part.label()
        )
    };
    EventOutcome {
        kind,
        message,
        target: None,
    }
}

fn delay<R: Rng>(state: &mut GameState, days: (u8, u8), rng: &mut R) -> u8 {
    let lost = rng.gen_range(days.0.max(1)..=days.1.max(days.0).max(1));
    state.vehicle.delay_days = state.vehicle.delay_days.max(lost);
    lost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::{Weather, WeatherReport};
    use crate::entity::{Party, Profession};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn state() -> GameState {
        let mut state = GameState::default();
        state.party = Party::from_names("Ezra", Profession::Farmer, ["Mary", "Jed"]);
        state.vehicle.inventory.oxen = 4;
        state.vehicle.inventory.food_lbs = 300;
        state
    }

    fn director(chance: f32) -> EventDirector {
        let mut policy = TrailPolicy::default();
        policy.events.chance_per_day = chance;
        EventDirector::new(&policy)
    }

    #[test]
    fn zero_chance_never_fires() {
        let director = director(0.0);
        let state = state();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(director.roll(&state, &mut rng).is_none());
        }
    }

    #[test]
    fn picks_respect_eligibility() {
        let director = director(1.0);
        let mut state = state();
        state.weather = WeatherReport {
            weather: Weather::Clear,
            temperature_f: 70,
        };
        state.vehicle.inventory.oxen = 1;
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..300 {
            let kind = director.roll(&state, &mut rng).expect("certain event");
            assert_ne!(kind, EventKind::Blizzard, "blizzards need cold weather");
            assert_ne!(kind, EventKind::OxWanderedOff, "the last ox stays");
        }
    }

    #[test]
    fn broken_part_uses_spare_when_held() {
        let director = director(1.0);
        let mut state = state();
        state.vehicle.inventory.wheels = 1;
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let outcome = director.apply_event(&mut state, EventKind::BrokenWheel, &mut rng);
        assert!(outcome.message.contains("spare"));
        assert!(!state.vehicle.is_disabled());
        assert_eq!(state.vehicle.inventory.wheels, 0);

        director.apply_event(&mut state, EventKind::BrokenWheel, &mut rng);
        assert!(state.vehicle.is_disabled());
        assert_eq!(state.vehicle.broken_part, Some(WagonPart::Wheel));
    }

    #[test]
    fn illness_targets_a_healthy_member() {
        let director = director(1.0);
        let mut state = state();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let outcome = director.apply_event(&mut state, EventKind::Cholera, &mut rng);
        let idx = outcome.target.expect("someone fell ill");
        assert!(outcome.message.contains("cholera"));
        assert_eq!(state.party.afflicted_count(), 1);
        assert!(state.party.members[idx].is_afflicted());
    }

    #[test]
    fn thief_and_delays_change_state() {
        let director = director(1.0);
        let mut state = state();
        state.vehicle.inventory = crate::entity::Inventory {
            food_lbs: 100,
            ..Default::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        director.apply_event(&mut state, EventKind::Thief, &mut rng);
        assert!(state.vehicle.inventory.food_lbs < 100);
        assert!(state.vehicle.inventory.food_lbs >= 70);

        director.apply_event(&mut state, EventKind::LostTrail, &mut rng);
        assert!((1..=3).contains(&state.vehicle.delay_days));
    }
}
