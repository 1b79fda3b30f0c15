//! Final score for a party that reaches the end of the trail.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::{HealthStatus, Profession};
use crate::numbers::round_f64_to_u32;
use crate::policy::{ScorePolicy, TrailPolicy};
use crate::simulation::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRating {
    Greenhorn,
    Adventurer,
    TrailGuide,
}

impl ScoreRating {
    #[must_use]
    pub const fn for_points(points: u32, policy: &ScorePolicy) -> Self {
        if points >= policy.trail_guide_min {
            Self::TrailGuide
        } else if points >= policy.adventurer_min {
            Self::Adventurer
        } else {
            Self::Greenhorn
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Greenhorn => "Greenhorn",
            Self::Adventurer => "Adventurer",
            Self::TrailGuide => "Trail Guide",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub label: String,
    pub quantity: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lines: Vec<ScoreLine>,
    pub subtotal: u32,
    pub profession: Option<Profession>,
    pub multiplier: f32,
    pub total: u32,
    pub rating: ScoreRating,
}

/// Score a finished journey.
#[must_use]
pub fn compute_score(state: &GameState, policy: &TrailPolicy) -> ScoreBreakdown {
    let score = &policy.score;
    let inventory = &state.vehicle.inventory;
    let mut lines = Vec::new();

    for status in [
        HealthStatus::Good,
        HealthStatus::Fair,
        HealthStatus::Poor,
        HealthStatus::VeryPoor,
    ] {
        let count = state
            .party
            .living()
            .filter(|member| member.status() == status)
            .count();
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        if count > 0 {
            lines.push(ScoreLine {
                label: format!("people in {} health", status.label()),
                quantity: count,
                points: count.saturating_mul(score.points_per_person.for_status(status)),
            });
        }
    }

    let mut push = |label: &str, quantity: u32, points: u32| {
        if quantity > 0 {
            lines.push(ScoreLine {
                label: label.to_string(),
                quantity,
                points,
            });
        }
    };
    push("wagon", 1, score.points_wagon);
    push(
        "oxen",
        inventory.oxen,
        inventory.oxen.saturating_mul(score.points_ox),
    );
    push(
        "spare wagon parts",
        inventory.spare_parts(),
        inventory.spare_parts().saturating_mul(score.points_spare_part),
    );
    push(
        "sets of clothing",
        inventory.clothing,
        inventory.clothing.saturating_mul(score.points_clothing),
    );
    push(
        "bullets",
        inventory.bullets,
        inventory.bullets / score.divisor_bullets.max(1),
    );
    push(
        "pounds of food",
        inventory.food_lbs,
        inventory.food_lbs / score.divisor_food_lbs.max(1),
    );
    push(
        "cents in cash",
        inventory.cash_cents,
        inventory.cash_cents / score.divisor_cash_cents.max(1),
    );

    let subtotal = lines
        .iter()
        .fold(0_u32, |acc, line| acc.saturating_add(line.points));
    let profession = state.party.profession();
    let multiplier = profession
        .map_or(1.0, |profession| policy.profession(profession).score_mult)
        .max(0.0);
    let total = round_f64_to_u32(f64::from(subtotal) * f64::from(multiplier));
    ScoreBreakdown {
        lines,
        subtotal,
        profession,
        multiplier,
        total,
        rating: ScoreRating::for_points(total, score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Inventory, Party};

    fn finished_state(profession: Profession) -> GameState {
        let mut state = GameState::default();
        state.party = Party::from_names(
            profession_leader(profession),
            profession,
            ["B", "C", "D", "E"],
        );
        state.vehicle.inventory = Inventory {
            oxen: 6,
            food_lbs: 500,
            clothing: 10,
            bullets: 120,
            wheels: 1,
            axles: 1,
            tongues: 1,
            cash_cents: 1_000,
        };
        state
    }

    const fn profession_leader(profession: Profession) -> &'static str {
        match profession {
            Profession::Banker => "Hattie",
            Profession::Carpenter => "Ezra",
            Profession::Farmer => "Jed",
        }
    }

    #[test]
    fn score_matches_policy_formula() {
        let policy = TrailPolicy::default();
        let mut state = finished_state(Profession::Banker);
        state.party.members[1].health = 350;
        state.party.members[4].health = 0;
        let breakdown = compute_score(&state, &policy);
        // 3 good (1500) + 1 fair (400) + wagon 50 + oxen 24 + spares 6 + clothes 20
        // + bullets 2 + food 20 + cash 2
        assert_eq!(breakdown.subtotal, 2_024);
        assert_eq!(breakdown.total, 2_024);
        assert_eq!(breakdown.rating, ScoreRating::Adventurer);
    }

    #[test]
    fn farmers_triple_their_score() {
        let policy = TrailPolicy::default();
        let banker = compute_score(&finished_state(Profession::Banker), &policy);
        let farmer = compute_score(&finished_state(Profession::Farmer), &policy);
        assert_eq!(farmer.total, banker.total * 3);
        assert_eq!(farmer.rating, ScoreRating::TrailGuide);
    }

    #[test]
    fn ratings_follow_thresholds() {
        let policy = ScorePolicy::default();
        assert_eq!(ScoreRating::for_points(999, &policy), ScoreRating::Greenhorn);
        assert_eq!(ScoreRating::for_points(1_000, &policy), ScoreRating::Adventurer);
        assert_eq!(ScoreRating::for_points(2_999, &policy), ScoreRating::Adventurer);
        assert_eq!(ScoreRating::for_points(3_000, &policy), ScoreRating::TrailGuide);
    }
}
