//! Hunting: a timed session in which prey appears on game ticks and the
//! player shoots by typing the shooting word quickly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::climate::Weather;
use crate::entity::{Inventory, SupplyKind};
use crate::numbers::u32_to_f32;
use crate::policy::HuntPolicy;

const SHOOTING_WORDS: [&str; 6] = ["BANG", "BLAM", "POW", "WHAM", "BOOM", "ZING"];
const BEST_HIT_CHANCE: f32 = 0.95;
const WORST_HIT_CHANCE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntBlock {
    NoBullets,
    SevereWeather,
}

impl HuntBlock {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoBullets => "You have no bullets to hunt with.",
            Self::SevereWeather => "The weather is too severe to go hunting.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreyKind {
    Squirrel,
    Rabbit,
    Duck,
    Goose,
    Deer,
    Elk,
    Bear,
    Buffalo,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreySpec {
    pub kind: PreyKind,
    pub min_lbs: u32,
    pub max_lbs: u32,
    /// Ticks the prey stays in view before fleeing.
    pub flee_ticks: u8,
    pub spawn_weight: u32,
    pub hit_mult: f32,
}

const PREY_TABLE: [PreySpec; 8] = [
    prey(PreyKind::Squirrel, 1, 2, 2, 20, 0.7),
    prey(PreyKind::Rabbit, 2, 5, 2, 20, 0.75),
    prey(PreyKind::Duck, 2, 4, 2, 15, 0.8),
    prey(PreyKind::Goose, 4, 8, 2, 10, 0.85),
    prey(PreyKind::Deer, 50, 100, 3, 15, 1.0),
    prey(PreyKind::Elk, 200, 400, 3, 6, 1.0),
    prey(PreyKind::Bear, 100, 300, 3, 5, 0.9),
    prey(PreyKind::Buffalo, 350, 600, 4, 9, 1.1),
];

const fn prey(
    kind: PreyKind,
    min_lbs: u32,
    max_lbs: u32,
    flee_ticks: u8,
    spawn_weight: u32,
    hit_mult: f32,
) -> PreySpec {
    PreySpec {
        kind,
        min_lbs,
        max_lbs,
        flee_ticks,
        spawn_weight,
        hit_mult,
    }
}

impl PreyKind {
    #[must_use]
    pub fn spec(self) -> PreySpec {
        PREY_TABLE
            .iter()
            .copied()
            .find(|spec| spec.kind == self)
            .unwrap_or(PREY_TABLE[0])
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Squirrel => "squirrel",
            Self::Rabbit => "rabbit",
            Self::Duck => "duck",
            Self::Goose => "goose",
            Self::Deer => "deer",
            Self::Elk => "elk",
            Self::Bear => "bear",
            Self::Buffalo => "buffalo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    pub kind: PreyKind,
    pub ticks_left: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntTick {
    Quiet,
    Spawned(PreyKind),
    Fled(PreyKind),
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    NoTarget,
    OutOfBullets,
    WrongWord,
    Miss(PreyKind),
    Hit { kind: PreyKind, lbs: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntSummary {
    pub bullets_spent: u32,
    pub food_shot_lbs: u32,
    pub food_kept_lbs: u32,
    pub kills: Vec<PreyKind>,
}

impl HuntSummary {
    #[must_use]
    pub fn describe(&self) -> String {
        if self.kills.is_empty() {
            return format!(
                "You spent {} bullets and shot nothing.",
                self.bullets_spent
            );
        }
        let mut text = format!(
            "From the animals you shot, you got {} pounds of meat.",
            self.food_shot_lbs
        );
        if self.food_kept_lbs < self.food_shot_lbs {
            text.push_str(&format!(
                " However, you were only able to carry {} pounds back to the wagon.",
                self.food_kept_lbs
            ));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HuntSession {
    policy: HuntPolicy,
    word: &'static str,
    ticks_left: u8,
    sighting: Option<Sighting>,
    carry_cap_lbs: u32,
    bullets_spent: u32,
    food_shot_lbs: u32,
    kills: Vec<PreyKind>,
}

impl HuntSession {
    /// Start a hunt.
    ///
    /// # Errors
    ///
    /// Returns a [`HuntBlock`] when the party has no bullets or the weather
    /// forbids hunting.
    pub fn new<R: Rng>(
        policy: &HuntPolicy,
        inventory: &Inventory,
        weather: Weather,
        alive: u16,
        rng: &mut R,
    ) -> Result<Self, HuntBlock> {
        if inventory.bullets == 0 {
            return Err(HuntBlock::NoBullets);
        }
        if weather.is_severe() {
            return Err(HuntBlock::SevereWeather);
        }
        Ok(Self {
            policy: *policy,
            word: pick_word(rng),
            ticks_left: policy.ticks_per_hunt,
            sighting: None,
            carry_cap_lbs: policy.carry_cap_per_person_lbs.saturating_mul(u32::from(alive)),
            bullets_spent: 0,
            food_shot_lbs: 0,
            kills: Vec::new(),
        })
    }

    #[must_use]
    pub const fn word(&self) -> &'static str {
        self.word
    }

    #[must_use]
    pub const fn sighting(&self) -> Option<Sighting> {
        self.sighting
    }

    #[must_use]
    pub const fn ticks_left(&self) -> u8 {
        self.ticks_left
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.ticks_left == 0
    }

    #[must_use]
    pub const fn food_shot_lbs(&self) -> u32 {
        self.food_shot_lbs
    }

    /// Advance the hunt clock; prey may appear or flee.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> HuntTick {
        if self.ticks_left == 0 {
            return HuntTick::Over;
        }
        self.ticks_left -= 1;
        if let Some(mut sighting) = self.sighting {
            sighting.ticks_left = sighting.ticks_left.saturating_sub(1);
            if sighting.ticks_left == 0 {
                self.sighting = None;
                return HuntTick::Fled(sighting.kind);
            }
            self.sighting = Some(sighting);
            return HuntTick::Quiet;
        }
        if rng.r#gen::<f32>() >= self.policy.spawn_chance {
            return HuntTick::Quiet;
        }
        let spec = pick_prey(rng);
        self.word = pick_word(rng);
        self.sighting = Some(Sighting {
            kind: spec.kind,
            ticks_left: spec.flee_ticks,
        });
        HuntTick::Spawned(spec.kind)
    }

    /// Fire one bullet. `reaction_ms` is how long the player took to type.
    pub fn shoot<R: Rng>(
        &mut self,
        inventory: &mut Inventory,
        word: &str,
        reaction_ms: u32,
        rng: &mut R,
    ) -> ShotOutcome {
        if inventory.take(SupplyKind::Ammunition, 1) == 0 {
            return ShotOutcome::OutOfBullets;
        }
        self.bullets_spent = self.bullets_spent.saturating_add(1);
        let Some(sighting) = self.sighting else {
            return ShotOutcome::NoTarget;
        };
        if !word.trim().eq_ignore_ascii_case(self.word) {
            return ShotOutcome::WrongWord;
        }
        let spec = sighting.kind.spec();
        let chance = hit_chance(&self.policy, reaction_ms) * spec.hit_mult;
        if rng.r#gen::<f32>() >= chance.clamp(0.0, 1.0) {
            return ShotOutcome::Miss(sighting.kind);
        }
        let lbs = rng.gen_range(spec.min_lbs..=spec.max_lbs);
        self.sighting = None;
        self.food_shot_lbs = self.food_shot_lbs.saturating_add(lbs);
        self.kills.push(sighting.kind);
        ShotOutcome::Hit {
            kind: sighting.kind,
            lbs,
        }
    }

    /// End the hunt and carry what the party can back to the wagon.
    pub fn finish(self, inventory: &mut Inventory, food_cap: u32) -> HuntSummary {
        let kept = self.food_shot_lbs.min(self.carry_cap_lbs);
        let food_kept_lbs = inventory.add_capped(SupplyKind::Food, kept, food_cap);
        log::debug!(
            "hunt finished: {} bullets, {} lbs shot, {} kept",
            self.bullets_spent,
            self.food_shot_lbs,
            food_kept_lbs
        );
        HuntSummary {
            bullets_spent: self.bullets_spent,
            food_shot_lbs: self.food_shot_lbs,
            food_kept_lbs,
            kills: self.kills,
        }
    }
}

/// Chance of hitting for a given reaction time, before prey modifiers.
#[must_use]
pub fn hit_chance(policy: &HuntPolicy, reaction_ms: u32) -> f32 {
    if reaction_ms <= policy.perfect_reaction_ms {
        return BEST_HIT_CHANCE;
    }
    if reaction_ms >= policy.max_reaction_ms {
        return 0.0;
    }
    let span = u32_to_f32(policy.max_reaction_ms - policy.perfect_reaction_ms);
    let late = u32_to_f32(reaction_ms - policy.perfect_reaction_ms);
    let t = (late / span).clamp(0.0, 1.0);
    (WORST_HIT_CHANCE - BEST_HIT_CHANCE).mul_add(t, BEST_HIT_CHANCE)
}

fn pick_word<R: Rng>(rng: &mut R) -> &'static str {
    SHOOTING_WORDS[rng.gen_range(0..SHOOTING_WORDS.len())]
}

fn pick_prey<R: Rng>(rng: &mut R) -> PreySpec {
    let total: u32 = PREY_TABLE.iter().map(|spec| spec.spawn_weight).sum();
    let mut roll = rng.gen_range(0..total);
    for spec in PREY_TABLE {
        if roll < spec.spawn_weight {
            return spec;
        }
        roll -= spec.spawn_weight;
    }
    PREY_TABLE[0]
}
