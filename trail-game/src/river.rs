//! River crossings: river conditions, the methods available to the party and
//! the weighted outcome of an attempt.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::Season;
use crate::entity::{Inventory, Party, SupplyKind};
use crate::numbers::{clamp_f64_to_f32, round_f64_to_u32};
use crate::policy::{CrossingOutcomeWeights, RiverPolicy, RiverProfile};

const SWIFTNESS_RISK_MULT: f32 = 0.5;
const FERRY_SWIFTNESS_RISK_MULT: f32 = 0.2;
const SHALLOW_SAFE_BONUS: f32 = 1.5;
const SWAMPED_SANK_BONUS: f32 = 2.0;
const STUCK_MUDDY_MULT: f32 = 1.5;
const TIPPED_ROCKY_MULT: f32 = 1.3;
const STUCK_EXTRA_DAYS: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiverKind {
    Kansas,
    BigBlue,
    Green,
    Snake,
    Columbia,
}

impl RiverKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kansas => "Kansas River",
            Self::BigBlue => "Big Blue River",
            Self::Green => "Green River",
            Self::Snake => "Snake River",
            Self::Columbia => "Columbia River",
        }
    }
}

impl fmt::Display for RiverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiverBed {
    Muddy,
    Rocky,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiverState {
    pub river: RiverKind,
    pub depth_ft: f32,
    pub width_ft: f32,
    pub swiftness: f32,
    pub bed: RiverBed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingMethod {
    Ford,
    CaulkFloat,
    Ferry,
    Guide,
}

impl CrossingMethod {
    pub const ALL: [Self; 4] = [Self::Ford, Self::CaulkFloat, Self::Ferry, Self::Guide];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ford => "attempt to ford the river",
            Self::CaulkFloat => "caulk the wagon and float it across",
            Self::Ferry => "take a ferry across",
            Self::Guide => "hire a guide to help you across",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingOutcome {
    Safe,
    StuckInMud,
    SuppliesWet,
    Tipped,
    Sank,
    Drowned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CrossingOptions {
    bits: u8,
}

impl CrossingOptions {
    const FORD: u8 = 1 << 0;
    const CAULK_FLOAT: u8 = 1 << 1;
    const FERRY: u8 = 1 << 2;
    const GUIDE: u8 = 1 << 3;

    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    const fn bit(method: CrossingMethod) -> u8 {
        match method {
            CrossingMethod::Ford => Self::FORD,
            CrossingMethod::CaulkFloat => Self::CAULK_FLOAT,
            CrossingMethod::Ferry => Self::FERRY,
            CrossingMethod::Guide => Self::GUIDE,
        }
    }

    #[must_use]
    pub const fn with(mut self, method: CrossingMethod) -> Self {
        self.bits |= Self::bit(method);
        self
    }

    #[must_use]
    pub const fn is_allowed(self, method: CrossingMethod) -> bool {
        self.bits & Self::bit(method) != 0
    }

    /// Allowed methods in menu order.
    #[must_use]
    pub fn methods(self) -> Vec<CrossingMethod> {
        CrossingMethod::ALL
            .into_iter()
            .filter(|method| self.is_allowed(*method))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingResolution {
    pub outcome: CrossingOutcome,
    pub crossing_days: u8,
    pub wait_days: u8,
    pub drying_days: u8,
    pub loss_ratio: f32,
}

impl CrossingResolution {
    #[must_use]
    pub const fn total_days(self) -> u8 {
        self.wait_days
            .saturating_add(self.crossing_days)
            .saturating_add(self.drying_days)
    }
}

/// What an applied crossing cost the party.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrossingReport {
    pub lost: Vec<(SupplyKind, u32)>,
    pub drowned: Option<String>,
    pub days: u8,
    pub message: String,
}

/// Sample today's conditions for a river within its profile.
pub fn derive_river_state<R: Rng>(
    policy: &RiverPolicy,
    river: RiverKind,
    season: Season,
    rng: &mut R,
) -> RiverState {
    let profile = policy.profiles.profile_for(river);
    let season_factor = policy.seasonal_depth_mult.for_season(season);
    RiverState {
        river,
        depth_ft: sample_range(profile.min_depth_ft, profile.max_depth_ft, season_factor, rng),
        width_ft: sample_range(profile.min_width_ft, profile.max_width_ft, season_factor, rng),
        swiftness: sample_range(profile.min_swiftness, profile.max_swiftness, season_factor, rng),
        bed: profile.bed,
    }
}

#[must_use]
pub fn crossing_options(
    policy: &RiverPolicy,
    state: &RiverState,
    inventory: &Inventory,
) -> CrossingOptions {
    let profile: &RiverProfile = policy.profiles.profile_for(state.river);
    let mut options = CrossingOptions::empty().with(CrossingMethod::Ford);
    if state.depth_ft >= policy.float_min_depth_ft {
        options = options.with(CrossingMethod::CaulkFloat);
    }
    if profile.ferry_available && inventory.cash_cents >= policy.ferry_cost_cents {
        options = options.with(CrossingMethod::Ferry);
    }
    if profile.guide_available && inventory.clothing >= policy.guide_cost_clothing {
        options = options.with(CrossingMethod::Guide);
    }
    options
}

#[must_use]
pub fn resolve_crossing<R: RngCore>(
    policy: &RiverPolicy,
    state: &RiverState,
    method: CrossingMethod,
    rng: &mut R,
) -> CrossingResolution {
    let weights = adjusted_weights(policy, state, method);
    let outcome = pick_outcome(&weights, rng);
    let loss_ratio = match outcome {
        CrossingOutcome::Tipped => policy.tipped_loss_ratio,
        CrossingOutcome::Sank | CrossingOutcome::Drowned => policy.sank_loss_ratio,
        _ => 0.0,
    }
    .clamp(0.0, 1.0);
    let wait_days = if matches!(method, CrossingMethod::Ferry) && policy.ferry_wait_days_max > 0 {
        u8::try_from(rng.next_u32() % (u32::from(policy.ferry_wait_days_max) + 1)).unwrap_or(0)
    } else {
        0
    };
    let drying_days = match outcome {
        CrossingOutcome::SuppliesWet => policy.drying_days,
        CrossingOutcome::StuckInMud => STUCK_EXTRA_DAYS,
        _ => 0,
    };
    CrossingResolution {
        outcome,
        crossing_days: policy.crossing_days,
        wait_days,
        drying_days,
        loss_ratio,
    }
}

/// Pay for the method and apply the outcome to the party and its supplies.
pub fn apply_crossing<R: Rng>(
    policy: &RiverPolicy,
    state: &RiverState,
    method: CrossingMethod,
    resolution: &CrossingResolution,
    party: &mut Party,
    inventory: &mut Inventory,
    rng: &mut R,
) -> CrossingReport {
    match method {
        CrossingMethod::Ferry => {
            inventory.take(SupplyKind::Cash, policy.ferry_cost_cents);
        }
        CrossingMethod::Guide => {
            inventory.take(SupplyKind::Clothing, policy.guide_cost_clothing);
        }
        CrossingMethod::Ford | CrossingMethod::CaulkFloat => {}
    }

    let mut lost = Vec::new();
    if resolution.loss_ratio > 0.0 {
        let mut kinds = vec![
            SupplyKind::Food,
            SupplyKind::Clothing,
            SupplyKind::Ammunition,
            SupplyKind::Wheel,
            SupplyKind::Axle,
            SupplyKind::Tongue,
        ];
        if matches!(
            resolution.outcome,
            CrossingOutcome::Sank | CrossingOutcome::Drowned
        ) {
            kinds.insert(0, SupplyKind::Oxen);
        }
        for kind in kinds {
            let held = inventory.quantity(kind);
            let kept = apply_loss_ratio(held, resolution.loss_ratio);
            let removed = inventory.take(kind, held - kept);
            if removed > 0 {
                lost.push((kind, removed));
            }
        }
    }

    let drowned = if matches!(resolution.outcome, CrossingOutcome::Drowned) {
        party.random_living_index(rng, false).map(|idx| {
            let member = &mut party.members[idx];
            let health = member.health;
            member.damage(health);
            member.name.clone()
        })
    } else {
        None
    };

    let message = describe_outcome(state, resolution.outcome, drowned.as_deref());
    CrossingReport {
        lost,
        drowned,
        days: resolution.total_days(),
        message,
    }
}

/// Quantity remaining after losing `ratio` of `value`, rounding the loss down.
#[must_use]
pub fn apply_loss_ratio(value: u32, ratio: f32) -> u32 {
    let ratio = ratio.clamp(0.0, 1.0);
    let kept = f64::from(value) * f64::from(1.0 - ratio);
    round_f64_to_u32(kept.ceil()).min(value)
}

fn describe_outcome(state: &RiverState, outcome: CrossingOutcome, drowned: Option<&str>) -> String {
    let river = state.river.label();
    match outcome {
        CrossingOutcome::Safe => format!("You crossed the {river} safely."),
        CrossingOutcome::StuckInMud => {
            format!("The wagon was stuck in the mud of the {river}. You lose a day.")
        }
        CrossingOutcome::SuppliesWet => {
            format!("Your supplies got wet crossing the {river}. You stop to dry them.")
        }
        CrossingOutcome::Tipped => {
            format!("The wagon tipped over while crossing the {river}. Some supplies were lost.")
        }
        CrossingOutcome::Sank => {
            format!("The wagon sank in the {river}. Many supplies were lost.")
        }
        CrossingOutcome::Drowned => match drowned {
            Some(name) => format!("The wagon was swamped in the {river}. {name} drowned."),
            None => format!("The wagon was swamped in the {river}."),
        },
    }
}

fn adjusted_weights(
    policy: &RiverPolicy,
    state: &RiverState,
    method: CrossingMethod,
) -> CrossingOutcomeWeights {
    let mut weights = policy.outcome_weights.for_method(method);
    let swiftness = state.swiftness.max(0.0);
    let mut risk = if matches!(method, CrossingMethod::Ferry) {
        swiftness.mul_add(FERRY_SWIFTNESS_RISK_MULT, 1.0)
    } else {
        swiftness.mul_add(SWIFTNESS_RISK_MULT, 1.0)
    };
    if matches!(method, CrossingMethod::Ford) && state.depth_ft > policy.ford_safe_depth_ft {
        risk *= state.depth_ft / policy.ford_safe_depth_ft.max(0.1);
    }

    weights.stuck *= risk;
    weights.wet *= risk;
    weights.tipped *= risk;
    weights.sank *= risk;
    weights.drowned *= risk;

    if state.depth_ft < policy.float_min_depth_ft {
        weights.safe *= SHALLOW_SAFE_BONUS;
    }
    if matches!(method, CrossingMethod::Ford | CrossingMethod::CaulkFloat)
        && state.depth_ft > policy.swamped_min_depth_ft
    {
        weights.sank *= SWAMPED_SANK_BONUS;
        weights.drowned *= SWAMPED_SANK_BONUS;
    }
    match state.bed {
        RiverBed::Muddy => weights.stuck *= STUCK_MUDDY_MULT,
        RiverBed::Rocky => weights.tipped *= TIPPED_ROCKY_MULT,
    }
    weights
}

fn pick_outcome<R: RngCore>(weights: &CrossingOutcomeWeights, rng: &mut R) -> CrossingOutcome {
    let total = weights.total();
    if total <= f32::EPSILON {
        return CrossingOutcome::Safe;
    }
    let draw = sample_ratio(rng.next_u32());
    let mut accum = 0.0;
    let mut select = |weight: f32| {
        accum += weight / total;
        draw <= accum
    };

    if select(weights.safe) {
        CrossingOutcome::Safe
    } else if select(weights.stuck) {
        CrossingOutcome::StuckInMud
    } else if select(weights.wet) {
        CrossingOutcome::SuppliesWet
    } else if select(weights.tipped) {
        CrossingOutcome::Tipped
    } else if select(weights.sank) {
        CrossingOutcome::Sank
    } else {
        CrossingOutcome::Drowned
    }
}

fn sample_range<R: Rng>(min: f32, max: f32, season_factor: f32, rng: &mut R) -> f32 {
    let hi = max.max(min);
    let value = min + (hi - min) * rng.r#gen::<f32>();
    (value * season_factor.max(0.0)).clamp(min, hi)
}

fn sample_ratio(sample: u32) -> f32 {
    let ratio = (f64::from(sample) + 0.5) / (f64::from(u32::MAX) + 1.0);
    clamp_f64_to_f32(ratio.clamp(0.0, 1.0))
}
