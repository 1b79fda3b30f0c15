//! Balance and tuning policy for the trail simulation.
//!
//! This module is data-only: every tunable the simulation reads lives in
//! [`TrailPolicy`], which defaults to the classic trail numbers and can be
//! overridden from a JSON document. Partial documents are accepted; missing
//! fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::Season;
use crate::entity::{HealthStatus, Pace, Profession, Rations, SupplyKind};
use crate::river::{CrossingMethod, RiverBed, RiverKind};

/// Errors raised when policy invariants are violated.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfessionSpec {
    pub profession: Profession,
    pub starting_cash_cents: u32,
    pub score_mult: f32,
}

const DEFAULT_PROFESSIONS: [ProfessionSpec; 3] = [
    ProfessionSpec {
        profession: Profession::Banker,
        starting_cash_cents: 160_000,
        score_mult: 1.0,
    },
    ProfessionSpec {
        profession: Profession::Carpenter,
        starting_cash_cents: 80_000,
        score_mult: 2.0,
    },
    ProfessionSpec {
        profession: Profession::Farmer,
        starting_cash_cents: 40_000,
        score_mult: 3.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacePolicy {
    pub miles_mult: [f32; 3],
    pub health_penalty: [i32; 3],
}

impl Default for PacePolicy {
    fn default() -> Self {
        Self {
            miles_mult: [1.0, 1.5, 2.0],
            health_penalty: [0, 4, 10],
        }
    }
}

impl PacePolicy {
    #[must_use]
    pub const fn miles_mult(&self, pace: Pace) -> f32 {
        self.miles_mult[pace.index()]
    }

    #[must_use]
    pub const fn health_penalty(&self, pace: Pace) -> i32 {
        self.health_penalty[pace.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RationsPolicy {
    pub food_lbs_per_person: [u32; 3],
    pub health_delta: [i32; 3],
}

impl Default for RationsPolicy {
    fn default() -> Self {
        Self {
            food_lbs_per_person: [3, 2, 1],
            health_delta: [6, 0, -8],
        }
    }
}

impl RationsPolicy {
    #[must_use]
    pub const fn food_per_person(&self, rations: Rations) -> u32 {
        self.food_lbs_per_person[rations.index()]
    }

    #[must_use]
    pub const fn health_delta(&self, rations: Rations) -> i32 {
        self.health_delta[rations.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPolicy {
    pub base_miles_per_day: f32,
    pub min_oxen_to_move: u32,
    pub oxen_for_full_speed: u32,
    pub afflicted_speed_penalty: f32,
    pub starvation_damage: u16,
    pub cold_without_clothing_damage: u16,
    pub rest_recovery: i32,
    /// Last month of the year in which the party may still be on the trail.
    pub deadline_month: u8,
}

impl Default for TravelPolicy {
    fn default() -> Self {
        Self {
            base_miles_per_day: 14.0,
            min_oxen_to_move: 1,
            oxen_for_full_speed: 6,
            afflicted_speed_penalty: 0.08,
            starvation_damage: 40,
            cold_without_clothing_damage: 15,
            rest_recovery: 25,
            deadline_month: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyPrices {
    pub ox: u32,
    pub food_lb: u32,
    pub clothing_set: u32,
    pub ammo_box: u32,
    pub wheel: u32,
    pub axle: u32,
    pub tongue: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyCaps {
    pub oxen: u32,
    pub food_lbs: u32,
    pub clothing: u32,
    pub bullets: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePolicy {
    pub bullets_per_box: u32,
    pub base_prices_cents: SupplyPrices,
    pub price_mult_pct_by_stage: Vec<u16>,
    pub max_carry: SupplyCaps,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            bullets_per_box: 20,
            base_prices_cents: SupplyPrices {
                ox: 2_000,
                food_lb: 20,
                clothing_set: 1_000,
                ammo_box: 200,
                wheel: 1_000,
                axle: 1_000,
                tongue: 1_000,
            },
            price_mult_pct_by_stage: vec![100, 125, 150, 175, 200, 225, 250],
            max_carry: SupplyCaps {
                oxen: 20,
                food_lbs: 2_000,
                clothing: 99,
                bullets: 2_000,
                wheels: 3,
                axles: 3,
                tongues: 3,
            },
        }
    }
}

impl StorePolicy {
    /// Carrying cap for a supply; cash is unbounded.
    #[must_use]
    pub const fn cap(&self, kind: SupplyKind) -> u32 {
        match kind {
            SupplyKind::Oxen => self.max_carry.oxen,
            SupplyKind::Food => self.max_carry.food_lbs,
            SupplyKind::Clothing => self.max_carry.clothing,
            SupplyKind::Ammunition => self.max_carry.bullets,
            SupplyKind::Wheel => self.max_carry.wheels,
            SupplyKind::Axle => self.max_carry.axles,
            SupplyKind::Tongue => self.max_carry.tongues,
            SupplyKind::Cash => u32::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiverProfile {
    pub min_depth_ft: f32,
    pub max_depth_ft: f32,
    pub min_width_ft: f32,
    pub max_width_ft: f32,
    pub min_swiftness: f32,
    pub max_swiftness: f32,
    pub bed: RiverBed,
    pub ferry_available: bool,
    pub guide_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiverProfiles {
    pub kansas: RiverProfile,
    pub big_blue: RiverProfile,
    pub green: RiverProfile,
    pub snake: RiverProfile,
    pub columbia: RiverProfile,
}

impl RiverProfiles {
    #[must_use]
    pub const fn profile_for(&self, river: RiverKind) -> &RiverProfile {
        match river {
            RiverKind::Kansas => &self.kansas,
            RiverKind::BigBlue => &self.big_blue,
            RiverKind::Green => &self.green,
            RiverKind::Snake => &self.snake,
            RiverKind::Columbia => &self.columbia,
        }
    }
}

impl Default for RiverProfiles {
    fn default() -> Self {
        Self {
            kansas: RiverProfile {
                min_depth_ft: 1.8,
                max_depth_ft: 4.5,
                min_width_ft: 180.0,
                max_width_ft: 520.0,
                min_swiftness: 0.25,
                max_swiftness: 0.85,
                bed: RiverBed::Muddy,
                ferry_available: true,
                guide_available: false,
            },
            big_blue: RiverProfile {
                min_depth_ft: 2.0,
                max_depth_ft: 5.0,
                min_width_ft: 160.0,
                max_width_ft: 480.0,
                min_swiftness: 0.3,
                max_swiftness: 0.9,
                bed: RiverBed::Muddy,
                ferry_available: false,
                guide_available: false,
            },
            green: RiverProfile {
                min_depth_ft: 2.4,
                max_depth_ft: 6.0,
                min_width_ft: 200.0,
                max_width_ft: 600.0,
                min_swiftness: 0.35,
                max_swiftness: 1.0,
                bed: RiverBed::Rocky,
                ferry_available: true,
                guide_available: false,
            },
            snake: RiverProfile {
                min_depth_ft: 2.8,
                max_depth_ft: 7.0,
                min_width_ft: 260.0,
                max_width_ft: 720.0,
                min_swiftness: 0.45,
                max_swiftness: 1.15,
                bed: RiverBed::Rocky,
                ferry_available: false,
                guide_available: true,
            },
            columbia: RiverProfile {
                min_depth_ft: 6.0,
                max_depth_ft: 12.0,
                min_width_ft: 900.0,
                max_width_ft: 1_400.0,
                min_swiftness: 0.6,
                max_swiftness: 1.3,
                bed: RiverBed::Rocky,
                ferry_available: true,
                guide_available: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingOutcomeWeights {
    pub safe: f32,
    pub stuck: f32,
    pub wet: f32,
    pub tipped: f32,
    pub sank: f32,
    pub drowned: f32,
}

impl CrossingOutcomeWeights {
    #[must_use]
    pub const fn total(&self) -> f32 {
        self.safe + self.stuck + self.wet + self.tipped + self.sank + self.drowned
    }
}

impl Default for CrossingOutcomeWeights {
    fn default() -> Self {
        Self {
            safe: 0.6,
            stuck: 0.1,
            wet: 0.15,
            tipped: 0.1,
            sank: 0.04,
            drowned: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingOutcomeWeightsByMethod {
    pub ford: CrossingOutcomeWeights,
    pub caulk_float: CrossingOutcomeWeights,
    pub ferry: CrossingOutcomeWeights,
    pub guide: CrossingOutcomeWeights,
}

impl CrossingOutcomeWeightsByMethod {
    #[must_use]
    pub const fn for_method(&self, method: CrossingMethod) -> CrossingOutcomeWeights {
        match method {
            CrossingMethod::Ford => self.ford,
            CrossingMethod::CaulkFloat => self.caulk_float,
            CrossingMethod::Ferry => self.ferry,
            CrossingMethod::Guide => self.guide,
        }
    }
}

impl Default for CrossingOutcomeWeightsByMethod {
    fn default() -> Self {
        Self {
            ford: CrossingOutcomeWeights::default(),
            caulk_float: CrossingOutcomeWeights {
                safe: 0.45,
                stuck: 0.1,
                wet: 0.15,
                tipped: 0.15,
                sank: 0.1,
                drowned: 0.05,
            },
            ferry: CrossingOutcomeWeights {
                safe: 0.85,
                stuck: 0.0,
                wet: 0.1,
                tipped: 0.03,
                sank: 0.02,
                drowned: 0.0,
            },
            guide: CrossingOutcomeWeights {
                safe: 0.8,
                stuck: 0.05,
                wet: 0.1,
                tipped: 0.04,
                sank: 0.01,
                drowned: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactors {
    pub spring: f32,
    pub summer: f32,
    pub fall: f32,
    pub winter: f32,
}

impl SeasonalFactors {
    #[must_use]
    pub const fn for_season(self, season: Season) -> f32 {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
            Season::Winter => self.winter,
        }
    }
}

impl Default for SeasonalFactors {
    fn default() -> Self {
        Self {
            spring: 1.1,
            summer: 0.85,
            fall: 0.95,
            winter: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverPolicy {
    pub profiles: RiverProfiles,
    pub outcome_weights: CrossingOutcomeWeightsByMethod,
    pub seasonal_depth_mult: SeasonalFactors,
    pub ferry_cost_cents: u32,
    pub guide_cost_clothing: u32,
    pub float_min_depth_ft: f32,
    pub ford_safe_depth_ft: f32,
    pub swamped_min_depth_ft: f32,
    pub tipped_loss_ratio: f32,
    pub sank_loss_ratio: f32,
    pub crossing_days: u8,
    pub drying_days: u8,
    pub ferry_wait_days_max: u8,
}

impl Default for RiverPolicy {
    fn default() -> Self {
        Self {
            profiles: RiverProfiles::default(),
            outcome_weights: CrossingOutcomeWeightsByMethod::default(),
            seasonal_depth_mult: SeasonalFactors::default(),
            ferry_cost_cents: 500,
            guide_cost_clothing: 3,
            float_min_depth_ft: 1.5,
            ford_safe_depth_ft: 2.5,
            swamped_min_depth_ft: 5.0,
            tipped_loss_ratio: 0.25,
            sank_loss_ratio: 0.6,
            crossing_days: 1,
            drying_days: 1,
            ferry_wait_days_max: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntPolicy {
    pub carry_cap_per_person_lbs: u32,
    pub ticks_per_hunt: u8,
    pub spawn_chance: f32,
    pub perfect_reaction_ms: u32,
    pub max_reaction_ms: u32,
}

impl Default for HuntPolicy {
    fn default() -> Self {
        Self {
            carry_cap_per_person_lbs: 100,
            ticks_per_hunt: 12,
            spawn_chance: 0.45,
            perfect_reaction_ms: 1_500,
            max_reaction_ms: 6_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPolicy {
    pub chance_per_day: f32,
    /// Weight multiplier applied to illness events when rations are short.
    pub short_rations_illness_mult: f32,
}

impl Default for EventPolicy {
    fn default() -> Self {
        Self {
            chance_per_day: 0.12,
            short_rations_illness_mult: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsByHealth {
    pub good: u32,
    pub fair: u32,
    pub poor: u32,
    pub very_poor: u32,
}

impl PointsByHealth {
    #[must_use]
    pub const fn for_status(&self, status: HealthStatus) -> u32 {
        match status {
            HealthStatus::Good => self.good,
            HealthStatus::Fair => self.fair,
            HealthStatus::Poor => self.poor,
            HealthStatus::VeryPoor => self.very_poor,
            HealthStatus::Dead => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorePolicy {
    pub points_per_person: PointsByHealth,
    pub points_wagon: u32,
    pub points_ox: u32,
    pub points_spare_part: u32,
    pub points_clothing: u32,
    pub divisor_bullets: u32,
    pub divisor_food_lbs: u32,
    pub divisor_cash_cents: u32,
    pub adventurer_min: u32,
    pub trail_guide_min: u32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            points_per_person: PointsByHealth {
                good: 500,
                fair: 400,
                poor: 300,
                very_poor: 200,
            },
            points_wagon: 50,
            points_ox: 4,
            points_spare_part: 2,
            points_clothing: 2,
            divisor_bullets: 50,
            divisor_food_lbs: 25,
            divisor_cash_cents: 500,
            adventurer_min: 1_000,
            trail_guide_min: 3_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailPolicy {
    pub party_size: u8,
    pub start_year: u16,
    pub professions: [ProfessionSpec; 3],
    pub pace: PacePolicy,
    pub rations: RationsPolicy,
    pub travel: TravelPolicy,
    pub store: StorePolicy,
    pub river: RiverPolicy,
    pub hunt: HuntPolicy,
    pub events: EventPolicy,
    pub score: ScorePolicy,
}

impl Default for TrailPolicy {
    fn default() -> Self {
        Self {
            party_size: 5,
            start_year: 1848,
            professions: DEFAULT_PROFESSIONS,
            pace: PacePolicy::default(),
            rations: RationsPolicy::default(),
            travel: TravelPolicy::default(),
            store: StorePolicy::default(),
            river: RiverPolicy::default(),
            hunt: HuntPolicy::default(),
            events: EventPolicy::default(),
            score: ScorePolicy::default(),
        }
    }
}

impl TrailPolicy {
    /// Parse and validate a policy document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a field violates its bounds.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// # Errors
    ///
    /// Returns `PolicyError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_range("events.chance_per_day", self.events.chance_per_day, 0.0, 1.0)?;
        check_range("hunt.spawn_chance", self.hunt.spawn_chance, 0.0, 1.0)?;
        check_range(
            "travel.base_miles_per_day",
            self.travel.base_miles_per_day,
            1.0,
            100.0,
        )?;
        check_range(
            "river.tipped_loss_ratio",
            self.river.tipped_loss_ratio,
            0.0,
            1.0,
        )?;
        check_range("river.sank_loss_ratio", self.river.sank_loss_ratio, 0.0, 1.0)?;
        check_range(
            "travel.deadline_month",
            f32::from(self.travel.deadline_month),
            1.0,
            12.0,
        )?;
        check_range("party_size", f32::from(self.party_size), 1.0, 8.0)?;
        if self.store.price_mult_pct_by_stage.is_empty() {
            return Err(PolicyError::Empty {
                field: "store.price_mult_pct_by_stage",
            });
        }
        if self.hunt.max_reaction_ms <= self.hunt.perfect_reaction_ms {
            return Err(PolicyError::RangeViolation {
                field: "hunt.max_reaction_ms",
                min: f32::from(u16::try_from(self.hunt.perfect_reaction_ms).unwrap_or(u16::MAX)),
                max: f32::MAX,
                value: f32::from(u16::try_from(self.hunt.max_reaction_ms).unwrap_or(u16::MAX)),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn profession(&self, profession: Profession) -> ProfessionSpec {
        self.professions
            .iter()
            .copied()
            .find(|spec| spec.profession == profession)
            .unwrap_or(DEFAULT_PROFESSIONS[0])
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), PolicyError> {
    if value.is_nan() || value < min || value > max {
        return Err(PolicyError::RangeViolation {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        TrailPolicy::default().validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let policy = TrailPolicy::from_json(r#"{ "events": { "chance_per_day": 0.5 } }"#)
            .expect("partial override");
        assert!((policy.events.chance_per_day - 0.5).abs() < f32::EPSILON);
        assert_eq!(policy.store.bullets_per_box, 20);
        assert_eq!(policy.party_size, 5);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = TrailPolicy::from_json(r#"{ "events": { "chance_per_day": 1.5 } }"#)
            .expect_err("chance above one");
        assert!(matches!(
            err,
            PolicyError::RangeViolation {
                field: "events.chance_per_day",
                ..
            }
        ));
        let err = TrailPolicy::from_json("{ not json").expect_err("bad json");
        assert!(matches!(err, PolicyError::Json(_)));
    }

    #[test]
    fn profession_lookup_matches_table() {
        let policy = TrailPolicy::default();
        let farmer = policy.profession(Profession::Farmer);
        assert_eq!(farmer.starting_cash_cents, 40_000);
        assert!((farmer.score_mult - 3.0).abs() < f32::EPSILON);
        assert_eq!(policy.store.cap(SupplyKind::Cash), u32::MAX);
    }
}
