//! Date-ordered table of observations.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{CyclePhase, Date, FrameError, Observation};

/// An ordered, duplicate-free sequence of daily observations.
///
/// Constructed once and read-only afterwards. Derived views are either
/// borrowed slices ([`Self::window`]) or owned copies ([`Self::filter_phase`]).
/// Deserialization goes through [`Self::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeriesFrame {
    observations: Vec<Observation>,
}

impl TimeSeriesFrame {
    /// Build a frame, sorting by date.
    ///
    /// # Errors
    /// - [`FrameError::NonFinite`] if any numeric field is NaN or infinite.
    /// - [`FrameError::PhaseMismatch`] if a row's phase tags disagree with its date.
    /// - [`FrameError::DuplicateDate`] if a date repeats.
    pub fn new(mut observations: Vec<Observation>) -> Result<Self, FrameError> {
        if let Some((date, field)) =
            observations.iter().find_map(|o| o.non_finite_field().map(|f| (o.date, f)))
        {
            return Err(FrameError::NonFinite { date, field });
        }
        if let Some(o) = observations.iter().find(|o| !o.has_consistent_phase()) {
            return Err(FrameError::PhaseMismatch(o.date));
        }

        observations.sort_by_key(|o| o.date);
        if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(FrameError::DuplicateDate(pair[1].date));
        }

        Ok(Self { observations })
    }

    /// Number of observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations in date order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Iterate over observations in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Observation at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    /// First date in the frame.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.observations.first().map(|o| o.date)
    }

    /// Last date in the frame.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.observations.last().map(|o| o.date)
    }

    /// Contiguous slice of `len` observations starting at `start`.
    #[must_use]
    pub fn window(&self, start: usize, len: usize) -> Option<&[Observation]> {
        self.observations.get(start..start.checked_add(len)?)
    }

    /// Copy of the observations belonging to one cycle phase.
    #[must_use]
    pub fn filter_phase(&self, phase: CyclePhase) -> Self {
        Self {
            observations: self
                .observations
                .iter()
                .filter(|o| o.cycle_phase == phase)
                .copied()
                .collect(),
        }
    }

    /// Dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Asset returns in date order.
    #[must_use]
    pub fn asset_returns(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.asset_return).collect()
    }

    /// Asset returns in excess of the risk-free rate, in date order.
    #[must_use]
    pub fn excess_returns(&self) -> Vec<f64> {
        self.observations.iter().map(Observation::excess_return).collect()
    }

    /// Excess returns split into (target phase, all other phases).
    #[must_use]
    pub fn partition_target(&self) -> (Vec<f64>, Vec<f64>) {
        let (target, rest): (Vec<&Observation>, Vec<&Observation>) =
            self.observations.iter().partition(|o| o.is_target_phase);
        (
            target.into_iter().map(Observation::excess_return).collect(),
            rest.into_iter().map(Observation::excess_return).collect(),
        )
    }
}

impl<'a> IntoIterator for &'a TimeSeriesFrame {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl<'de> Deserialize<'de> for TimeSeriesFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            observations: Vec<Observation>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.observations).map_err(serde::de::Error::custom)
    }
}
