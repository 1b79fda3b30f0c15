use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Months a party may choose to leave Independence in.
pub const DEPARTURE_MONTHS: [u8; 5] = [3, 4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    #[must_use]
    pub const fn from_month(month: u8) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Winter,
        }
    }
}

/// Calendar date on the trail. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// First day of `month`, clamping the month into 1..=12.
    #[must_use]
    pub const fn start_of(year: u16, month: u8) -> Self {
        let month = if month == 0 {
            1
        } else if month > 12 {
            12
        } else {
            month
        };
        Self {
            year,
            month,
            day: 1,
        }
    }

    #[must_use]
    pub const fn days_in_month(year: u16, month: u8) -> u8 {
        let idx = (month.saturating_sub(1) % 12) as usize;
        if month == 2 && is_leap_year(year) {
            29
        } else {
            DAYS_IN_MONTH[idx]
        }
    }

    pub const fn advance_day(&mut self) {
        if self.day < Self::days_in_month(self.year, self.month) {
            self.day += 1;
            return;
        }
        self.day = 1;
        if self.month == 12 {
            self.month = 1;
            self.year = self.year.saturating_add(1);
        } else {
            self.month += 1;
        }
    }

    pub const fn advance_days(&mut self, days: u32) {
        let mut remaining = days;
        while remaining > 0 {
            self.advance_day();
            remaining -= 1;
        }
    }

    #[must_use]
    pub const fn season(&self) -> Season {
        Season::from_month(self.month)
    }

    #[must_use]
    pub const fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.month_name(), self.day, self.year)
    }
}

#[must_use]
pub const fn month_name(month: u8) -> &'static str {
    MONTH_NAMES[(month.saturating_sub(1) % 12) as usize]
}

const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_rolls_over_months_and_years() {
        let mut date = Date {
            year: 1848,
            month: 2,
            day: 28,
        };
        date.advance_day();
        assert_eq!(date.day, 29, "1848 is a leap year");
        date.advance_day();
        assert_eq!((date.month, date.day), (3, 1));

        let mut eve = Date {
            year: 1848,
            month: 12,
            day: 31,
        };
        eve.advance_day();
        assert_eq!(eve, Date::start_of(1849, 1));
    }

    #[test]
    fn seasons_follow_months() {
        assert_eq!(Date::start_of(1848, 4).season(), Season::Spring);
        assert_eq!(Date::start_of(1848, 7).season(), Season::Summer);
        assert_eq!(Date::start_of(1848, 10).season(), Season::Fall);
        assert_eq!(Date::start_of(1848, 1).season(), Season::Winter);
    }

    #[test]
    fn display_is_human_readable() {
        let mut date = Date::start_of(1848, 3);
        date.advance_days(40);
        assert_eq!(date.to_string(), "April 10, 1848");
    }
}
