//! Four-year cycle classification.
//!
//! The cycle is anchored on the convention that a year divisible by four is an
//! election year. This is a modeling assumption: no calendar of historical
//! elections is consulted, so irregular or skipped elections are not detected.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::Date;

/// Position of a calendar year within the four-year cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CyclePhase {
    /// First year of the cycle (`year mod 4 == 1`).
    PostElection,
    /// Second year of the cycle (`year mod 4 == 2`).
    Midterm,
    /// Third year of the cycle (`year mod 4 == 3`).
    PreElection,
    /// Fourth year of the cycle (`year mod 4 == 0`).
    Election,
}

impl CyclePhase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [Self::PostElection, Self::Midterm, Self::PreElection, Self::Election];

    /// The phase whose excess return is under test.
    pub const TARGET: Self = Self::PreElection;

    /// Classify a calendar year.
    ///
    /// Total over all integers, including negative (proleptic) years.
    #[must_use]
    pub const fn classify(year: i64) -> Self {
        match year.rem_euclid(4) {
            0 => Self::Election,
            1 => Self::PostElection,
            2 => Self::Midterm,
            _ => Self::PreElection,
        }
    }

    /// Classify the year a date falls in.
    #[must_use]
    pub fn of_date(date: Date) -> Self {
        Self::classify(i64::from(date.year()))
    }

    /// One-based position in the cycle (post-election is year 1).
    #[must_use]
    pub const fn cycle_year(self) -> u8 {
        match self {
            Self::PostElection => 1,
            Self::Midterm => 2,
            Self::PreElection => 3,
            Self::Election => 4,
        }
    }

    /// Whether this is the phase under test.
    #[must_use]
    pub const fn is_target(self) -> bool {
        matches!(self, Self::PreElection)
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostElection => write!(f, "post-election"),
            Self::Midterm => write!(f, "midterm"),
            Self::PreElection => write!(f, "pre-election"),
            Self::Election => write!(f, "election"),
        }
    }
}

/// Classify a calendar year. Shorthand for [`CyclePhase::classify`].
#[must_use]
pub const fn classify(year: i64) -> CyclePhase {
    CyclePhase::classify(year)
}
