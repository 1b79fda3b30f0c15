//! Climate tables and daily weather rolls.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::Date;

/// Half-width of the daily temperature swing around the monthly mean.
const TEMPERATURE_SWING_F: i16 = 12;
const HEAVY_PRECIP_CHANCE: f32 = 0.25;
const FREEZING_F: i16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClimateKind {
    #[default]
    Moderate,
    Continental,
    Dry,
    Polar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClimateTable {
    mean_temp_f: [i16; 12],
    precip_chance: [f32; 12],
}

const MODERATE: ClimateTable = ClimateTable {
    mean_temp_f: [30, 35, 45, 56, 65, 75, 80, 78, 70, 58, 45, 34],
    precip_chance: [
        0.25, 0.25, 0.3, 0.35, 0.38, 0.35, 0.3, 0.28, 0.26, 0.24, 0.24, 0.24,
    ],
};

const CONTINENTAL: ClimateTable = ClimateTable {
    mean_temp_f: [22, 28, 38, 50, 60, 71, 77, 75, 64, 51, 36, 26],
    precip_chance: [
        0.2, 0.2, 0.24, 0.3, 0.33, 0.3, 0.25, 0.22, 0.2, 0.18, 0.18, 0.2,
    ],
};

const DRY: ClimateTable = ClimateTable {
    mean_temp_f: [18, 24, 33, 44, 54, 66, 78, 76, 62, 47, 32, 22],
    precip_chance: [
        0.15, 0.15, 0.18, 0.2, 0.2, 0.15, 0.1, 0.1, 0.12, 0.14, 0.15, 0.16,
    ],
};

const POLAR: ClimateTable = ClimateTable {
    mean_temp_f: [8, 12, 22, 32, 42, 52, 60, 58, 48, 36, 22, 10],
    precip_chance: [
        0.3, 0.3, 0.32, 0.3, 0.28, 0.22, 0.15, 0.15, 0.2, 0.25, 0.3, 0.32,
    ],
};

impl ClimateKind {
    const fn table(self) -> &'static ClimateTable {
        match self {
            Self::Moderate => &MODERATE,
            Self::Continental => &CONTINENTAL,
            Self::Dry => &DRY,
            Self::Polar => &POLAR,
        }
    }

    #[must_use]
    pub const fn mean_temperature_f(self, month: u8) -> i16 {
        self.table().mean_temp_f[month_index(month)]
    }

    #[must_use]
    pub const fn precipitation_chance(self, month: u8) -> f32 {
        self.table().precip_chance[month_index(month)]
    }
}

const fn month_index(month: u8) -> usize {
    (month.saturating_sub(1) % 12) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Hot,
    VeryHot,
    Cold,
    VeryCold,
    Rain,
    HeavyRain,
    Snow,
    HeavySnow,
}

impl Weather {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "fair",
            Self::Hot => "hot",
            Self::VeryHot => "very hot",
            Self::Cold => "cold",
            Self::VeryCold => "very cold",
            Self::Rain => "rainy",
            Self::HeavyRain => "heavy rains",
            Self::Snow => "snowy",
            Self::HeavySnow => "heavy snow",
        }
    }

    /// Multiplier on the day's mileage.
    #[must_use]
    pub const fn travel_mult(self) -> f32 {
        match self {
            Self::Clear => 1.0,
            Self::Hot | Self::Cold => 0.9,
            Self::Rain => 0.85,
            Self::VeryHot => 0.75,
            Self::VeryCold => 0.7,
            Self::HeavyRain | Self::Snow => 0.6,
            Self::HeavySnow => 0.3,
        }
    }

    /// Health change applied to each living member for the day.
    #[must_use]
    pub const fn health_delta(self) -> i32 {
        match self {
            Self::Clear => 0,
            Self::Rain => -1,
            Self::Hot => -2,
            Self::Cold => -3,
            Self::HeavyRain | Self::Snow => -4,
            Self::VeryHot => -8,
            Self::VeryCold | Self::HeavySnow => -10,
        }
    }

    /// Conditions in which members without warm clothing suffer.
    #[must_use]
    pub const fn is_cold(self) -> bool {
        matches!(
            self,
            Self::Cold | Self::VeryCold | Self::Snow | Self::HeavySnow
        )
    }

    /// Conditions too harsh to hunt in.
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(
            self,
            Self::VeryHot | Self::VeryCold | Self::HeavyRain | Self::HeavySnow
        )
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeatherReport {
    pub weather: Weather,
    pub temperature_f: i16,
}

/// Roll today's weather for a climate and date.
pub fn roll_weather<R: Rng>(climate: ClimateKind, date: Date, rng: &mut R) -> WeatherReport {
    let mean = climate.mean_temperature_f(date.month);
    let temperature_f = mean + rng.gen_range(-TEMPERATURE_SWING_F..=TEMPERATURE_SWING_F);
    let precipitating = rng.r#gen::<f32>() < climate.precipitation_chance(date.month);
    let heavy = precipitating && rng.r#gen::<f32>() < HEAVY_PRECIP_CHANCE;
    WeatherReport {
        weather: classify(temperature_f, precipitating, heavy),
        temperature_f,
    }
}

const fn classify(temperature_f: i16, precipitating: bool, heavy: bool) -> Weather {
    if precipitating {
        return match (temperature_f <= FREEZING_F, heavy) {
            (true, true) => Weather::HeavySnow,
            (true, false) => Weather::Snow,
            (false, true) => Weather::HeavyRain,
            (false, false) => Weather::Rain,
        };
    }
    if temperature_f >= 100 {
        Weather::VeryHot
    } else if temperature_f >= 90 {
        Weather::Hot
    } else if temperature_f <= 10 {
        Weather::VeryCold
    } else if temperature_f <= FREEZING_F {
        Weather::Cold
    } else {
        Weather::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn classification_respects_temperature_bands() {
        assert_eq!(classify(105, false, false), Weather::VeryHot);
        assert_eq!(classify(91, false, false), Weather::Hot);
        assert_eq!(classify(60, false, false), Weather::Clear);
        assert_eq!(classify(20, false, false), Weather::Cold);
        assert_eq!(classify(-4, false, false), Weather::VeryCold);
        assert_eq!(classify(20, true, true), Weather::HeavySnow);
        assert_eq!(classify(50, true, false), Weather::Rain);
    }

    #[test]
    fn rolls_stay_within_swing_of_the_mean() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let date = Date::start_of(1848, 7);
        let mean = ClimateKind::Dry.mean_temperature_f(7);
        for _ in 0..200 {
            let report = roll_weather(ClimateKind::Dry, date, &mut rng);
            assert!((report.temperature_f - mean).abs() <= TEMPERATURE_SWING_F);
        }
    }

    #[test]
    fn polar_winters_are_colder_than_moderate_summers() {
        assert!(
            ClimateKind::Polar.mean_temperature_f(1) < ClimateKind::Moderate.mean_temperature_f(7)
        );
        assert!(Weather::HeavySnow.travel_mult() < Weather::Clear.travel_mult());
        assert!(Weather::HeavySnow.is_severe() && Weather::HeavySnow.is_cold());
    }
}
