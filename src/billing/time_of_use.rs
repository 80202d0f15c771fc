use std::ops::Range;

use bon::Builder;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::{
    core::reading::Reading,
    quantity::{Zero, energy::KilowattHours, price::KilowattPrice},
};

/// Calendar day compared regardless of the year.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, derive_more::Constructor)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    #[must_use]
    pub fn of(timestamp: &NaiveDateTime) -> Self {
        Self::new(timestamp.month(), timestamp.day())
    }
}

/// Rate depends on the season, the day and the hour of each slot.
///
/// A slot is rated high only on a working day of the high season within the high hours.
/// Its billable value is its usage weighted by `slot_rate / high_rate`, so the fee stays
/// `average(top 3 billable) × high_rate` like for any other rule.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Builder)]
pub struct TimeOfUse {
    #[builder(default = KilowattPrice(132.0))]
    pub high_rate: KilowattPrice,

    #[builder(default = KilowattPrice(0.0))]
    pub low_rate: KilowattPrice,

    /// November through March.
    #[builder(default = vec![11, 12, 1, 2, 3])]
    pub high_season_months: Vec<u32>,

    /// Local hours, end-exclusive.
    #[builder(default = 7..20)]
    pub high_hours: Range<u32>,

    #[builder(default = vec![
        MonthDay::new(1, 1),   // New Year's Day
        MonthDay::new(1, 6),   // Epiphany
        MonthDay::new(4, 18),  // Good Friday
        MonthDay::new(4, 21),  // Easter Monday
        MonthDay::new(12, 25), // Christmas Day
        MonthDay::new(12, 26), // Boxing Day
    ])]
    pub holidays: Vec<MonthDay>,
}

impl Default for TimeOfUse {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TimeOfUse {
    #[must_use]
    pub fn is_high_season(&self, timestamp: &NaiveDateTime) -> bool {
        self.high_season_months.contains(&timestamp.month())
    }

    #[must_use]
    pub fn is_holiday_or_weekend(&self, timestamp: &NaiveDateTime) -> bool {
        matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun)
            || self.holidays.contains(&MonthDay::of(timestamp))
    }

    #[must_use]
    pub fn is_high_hour(&self, timestamp: &NaiveDateTime) -> bool {
        self.high_hours.contains(&timestamp.hour())
    }

    pub fn slot_rate(&self, timestamp: &NaiveDateTime) -> KilowattPrice {
        if self.is_high_season(timestamp)
            && !self.is_holiday_or_weekend(timestamp)
            && self.is_high_hour(timestamp)
        {
            self.high_rate
        } else {
            self.low_rate
        }
    }

    #[must_use]
    pub fn billable(&self, reading: &Reading) -> KilowattHours {
        if self.high_rate == KilowattPrice::ZERO {
            return KilowattHours::ZERO;
        }
        reading.usage * (self.slot_rate(&reading.timestamp) / self.high_rate)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::billing::{BillingRule, PeakSummary};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_high_slot() {
        // Wednesday in January:
        let timestamp = at(2025, 1, 15, 9);
        let rule = TimeOfUse::default();
        assert_eq!(rule.slot_rate(&timestamp), KilowattPrice(132.0));
        assert_eq!(rule.billable(&Reading::new(timestamp, KilowattHours(3.0))), KilowattHours(3.0));
    }

    #[test]
    fn test_hour_window_is_end_exclusive() {
        let rule = TimeOfUse::default();
        assert!(rule.is_high_hour(&at(2025, 1, 15, 7)));
        assert!(rule.is_high_hour(&at(2025, 1, 15, 19)));
        assert!(!rule.is_high_hour(&at(2025, 1, 15, 20)));
        assert!(!rule.is_high_hour(&at(2025, 1, 15, 6)));
    }

    #[test]
    fn test_low_season() {
        let rule = TimeOfUse::default();
        assert!(rule.is_high_season(&at(2025, 11, 3, 9)));
        assert!(rule.is_high_season(&at(2025, 3, 31, 9)));
        assert!(!rule.is_high_season(&at(2025, 4, 1, 9)));
        assert_eq!(rule.slot_rate(&at(2025, 6, 11, 9)), KilowattPrice(0.0));
    }

    #[test]
    fn test_weekend_and_holidays() {
        let rule = TimeOfUse::default();
        // Saturday:
        assert!(rule.is_holiday_or_weekend(&at(2025, 1, 18, 9)));
        // Epiphany, on a Monday in 2025, compared regardless of the year:
        assert!(rule.is_holiday_or_weekend(&at(2025, 1, 6, 9)));
        assert!(rule.is_holiday_or_weekend(&at(2027, 1, 6, 9)));
        assert!(!rule.is_holiday_or_weekend(&at(2025, 1, 7, 9)));
    }

    #[test]
    fn test_per_slot_rating() {
        let series = vec![
            // Weekday, high hour:
            Reading::new(at(2025, 1, 15, 9), KilowattHours(2.0)),
            // Same weekday in the evening, larger but free:
            Reading::new(at(2025, 1, 15, 21), KilowattHours(9.0)),
            // Christmas:
            Reading::new(at(2025, 12, 25, 9), KilowattHours(8.0)),
            Reading::new(at(2025, 1, 16, 10), KilowattHours(4.0)),
        ];
        let rule = BillingRule::from(TimeOfUse::default());
        let peaks = PeakSummary::from_rated(&rule.apply(&series), rule.rate());
        assert_eq!(peaks.top, [KilowattHours(4.0), KilowattHours(2.0), KilowattHours(0.0)]);
        assert_abs_diff_eq!(peaks.fee.0, 2.0 * 132.0);
    }

    #[test]
    fn test_non_zero_low_rate() {
        let rule = TimeOfUse::builder()
            .high_rate(KilowattPrice(100.0))
            .low_rate(KilowattPrice(25.0))
            .build();
        let billable = rule.billable(&Reading::new(at(2025, 7, 1, 9), KilowattHours(4.0)));
        assert_abs_diff_eq!(billable.0, 1.0);
    }

    #[test]
    fn test_zero_high_rate_bills_nothing() {
        let rule = TimeOfUse::builder().high_rate(KilowattPrice::ZERO).build();
        let billable = rule.billable(&Reading::new(at(2025, 1, 15, 9), KilowattHours(4.0)));
        assert_eq!(billable, KilowattHours::ZERO);
    }
}
