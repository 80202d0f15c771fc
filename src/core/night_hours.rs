use std::fmt::{Debug, Display, Formatter};

use chrono::{NaiveDateTime, Timelike};
use itertools::Itertools;

use crate::prelude::*;

/// Set of hours of day eligible for the night discount and preferred as redistribution targets.
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct NightHours(u32);

impl NightHours {
    /// 22:00–05:59.
    pub const DEFAULT: Self = Self((1 << 22) | (1 << 23) | 0b11_1111);

    pub fn try_from_iter(hours: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut bits = 0;
        for hour in hours {
            ensure!(hour < 24, "invalid hour of day: {hour}");
            bits |= 1 << hour;
        }
        Ok(Self(bits))
    }

    #[must_use]
    pub const fn contains(self, hour: u32) -> bool {
        hour < 24 && (self.0 & (1 << hour)) != 0
    }

    #[must_use]
    pub fn is_night(self, timestamp: &NaiveDateTime) -> bool {
        self.contains(timestamp.hour())
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = u32> {
        (0..24).filter(move |hour| self.contains(*hour))
    }
}

impl Default for NightHours {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for NightHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().join(", "))
    }
}

impl Debug for NightHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{self}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(NightHours::default().iter().collect_vec(), vec![0, 1, 2, 3, 4, 5, 22, 23]);
        assert!(!NightHours::default().contains(6));
        assert!(!NightHours::default().contains(21));
    }

    #[test]
    fn test_try_from_iter() -> Result {
        assert_eq!(NightHours::try_from_iter([22, 23, 0, 1, 2, 3, 4, 5])?, NightHours::DEFAULT);
        assert!(NightHours::try_from_iter([]).map(NightHours::is_empty)?);
        Ok(())
    }

    #[test]
    fn test_try_from_iter_out_of_range() {
        assert!(NightHours::try_from_iter([24]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(NightHours::try_from_iter([23, 1]).unwrap().to_string(), "1, 23");
    }
}
