//! Provider fee models.
//!
//! Every rule maps a reading onto its billable value, and the demand fee is the average of the
//! three highest billable values multiplied by the rule's rate.

mod flat;
mod night_discount;
mod peaks;
mod time_of_use;

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

pub use self::{
    flat::Flat,
    night_discount::NightDiscount,
    peaks::PeakSummary,
    time_of_use::TimeOfUse,
};
use crate::{
    core::{night_hours::NightHours, reading::Reading},
    quantity::{energy::KilowattHours, price::KilowattPrice},
};

/// Reading's usage as seen by a provider's fee model.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Constructor, serde::Serialize)]
pub struct Billable {
    pub timestamp: NaiveDateTime,
    pub value: KilowattHours,
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum BillingRule {
    NightDiscount(NightDiscount),
    Flat(Flat),
    TimeOfUse(TimeOfUse),
}

impl BillingRule {
    #[must_use]
    pub fn billable(&self, reading: &Reading) -> KilowattHours {
        match self {
            Self::NightDiscount(rule) => rule.billable(reading),
            Self::Flat(rule) => rule.billable(reading),
            Self::TimeOfUse(rule) => rule.billable(reading),
        }
    }

    #[must_use]
    pub fn apply(&self, series: &[Reading]) -> Vec<Billable> {
        series
            .iter()
            .map(|reading| Billable::new(reading.timestamp, self.billable(reading)))
            .collect()
    }

    pub const fn rate(&self) -> KilowattPrice {
        match self {
            Self::NightDiscount(rule) => rule.rate,
            Self::Flat(rule) => rule.rate,
            Self::TimeOfUse(rule) => rule.high_rate,
        }
    }

    /// Hours billed at a discount, for the night-based rules only.
    #[must_use]
    pub const fn night_hours(&self) -> Option<NightHours> {
        match self {
            Self::NightDiscount(rule) => Some(rule.night_hours),
            Self::Flat(_) | Self::TimeOfUse(_) => None,
        }
    }
}

impl BillingRule {
    /// Same rule billed at another rate, the high rate for the time-of-use rule.
    pub fn with_rate(mut self, rate: KilowattPrice) -> Self {
        match &mut self {
            Self::NightDiscount(rule) => rule.rate = rate,
            Self::Flat(rule) => rule.rate = rate,
            Self::TimeOfUse(rule) => rule.high_rate = rate,
        }
        self
    }

    /// Same rule with other discounted hours, no-op for the rules without a night discount.
    pub fn with_night_hours(mut self, night_hours: NightHours) -> Self {
        if let Self::NightDiscount(rule) = &mut self {
            rule.night_hours = night_hours;
        }
        self
    }

    /// Rule the redistribution ranks the peaks by.
    ///
    /// The night discount ranks by its own billable values, the other rules by the raw usage.
    pub fn ranking(&self) -> Self {
        match self {
            Self::NightDiscount(_) => self.clone(),
            Self::Flat(_) | Self::TimeOfUse(_) => Self::Flat(Flat::default()),
        }
    }
}

impl Display for BillingRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NightDiscount(rule) => write!(f, "Night discount ×{}", rule.night_factor),
            Self::Flat(_) => write!(f, "Flat"),
            Self::TimeOfUse(_) => write!(f, "Time of use"),
        }
    }
}

impl Default for BillingRule {
    fn default() -> Self {
        Self::NightDiscount(NightDiscount::default())
    }
}

impl From<NightDiscount> for BillingRule {
    fn from(rule: NightDiscount) -> Self {
        Self::NightDiscount(rule)
    }
}

impl From<Flat> for BillingRule {
    fn from(rule: Flat) -> Self {
        Self::Flat(rule)
    }
}

impl From<TimeOfUse> for BillingRule {
    fn from(rule: TimeOfUse) -> Self {
        Self::TimeOfUse(rule)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::series::fixtures::{at, hourly},
        prelude::*,
    };

    #[test]
    fn test_night_rule_halves_night_usage() {
        let series = vec![
            Reading::new(at(1, 23), KilowattHours(4.0)),
            Reading::new(at(1, 12), KilowattHours(4.0)),
        ];
        let billable = BillingRule::default().apply(&series);
        assert_eq!(
            billable.iter().map(|billable| billable.value).collect::<Vec<_>>(),
            vec![KilowattHours(2.0), KilowattHours(4.0)],
        );
        assert_eq!(billable[0].timestamp, at(1, 23));
    }

    #[test]
    fn test_flat_fee() {
        let rule = BillingRule::from(Flat::builder().rate(KilowattPrice(45.0)).build());
        let peaks = PeakSummary::from_rated(&rule.apply(&hourly(&[10.0, 5.0, 0.0])), rule.rate());
        assert_abs_diff_eq!(peaks.average.0, 5.0);
        assert_abs_diff_eq!(peaks.fee.0, 225.0);
    }

    #[test]
    fn test_apply_is_pure() {
        let series = hourly(&[1.0, 7.0, 3.0]);
        let rule = BillingRule::default();
        assert_eq!(rule.apply(&series), rule.apply(&series));
    }

    #[test]
    fn test_night_hours() {
        assert_eq!(BillingRule::default().night_hours(), Some(NightHours::DEFAULT));
        assert_eq!(BillingRule::from(Flat::default()).night_hours(), None);
        assert_eq!(BillingRule::from(TimeOfUse::default()).night_hours(), None);
    }

    #[test]
    fn test_with_rate() {
        assert_eq!(BillingRule::default().with_rate(KilowattPrice(81.25)).rate(), KilowattPrice(81.25));
        assert_eq!(
            BillingRule::from(TimeOfUse::default()).with_rate(KilowattPrice(100.0)).rate(),
            KilowattPrice(100.0),
        );
    }

    #[test]
    fn test_with_night_hours() -> Result {
        let night_hours = NightHours::try_from_iter([1, 2])?;
        assert_eq!(BillingRule::default().with_night_hours(night_hours).night_hours(), Some(night_hours));
        assert_eq!(BillingRule::from(Flat::default()).with_night_hours(night_hours).night_hours(), None);
        Ok(())
    }

    #[test]
    fn test_ranking() {
        let rule = BillingRule::default();
        assert_eq!(rule.ranking(), rule);
        assert_eq!(BillingRule::from(TimeOfUse::default()).ranking(), BillingRule::from(Flat::default()));
    }
}
