use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};

use crate::error::CoreError;
use crate::models::{Frequency, RecurrenceRule};

/// RecurrenceCalculator: pure occurrence-date arithmetic, no I/O and no
/// state.
///
/// Given an anchor date and a rule it returns the next occurrence strictly
/// after the anchor. Rules are assumed validated; the calculator itself has
/// no failure modes and always returns a valid date.
pub struct RecurrenceCalculator;

impl RecurrenceCalculator {
    /// Computes the next occurrence after `anchor` for `rule`.
    pub fn next_occurrence(anchor: DateTime<Utc>, rule: &RecurrenceRule) -> DateTime<Utc> {
        match rule.frequency {
            Frequency::Daily => anchor + Duration::days(rule.interval as i64),
            Frequency::Weekly => Self::next_weekly(anchor, rule),
            Frequency::Monthly => Self::next_monthly(anchor, rule),
        }
    }

    fn next_weekly(anchor: DateTime<Utc>, rule: &RecurrenceRule) -> DateTime<Utc> {
        if rule.days_of_week.is_empty() {
            return anchor + Duration::days(rule.interval as i64 * 7);
        }

        let mut days = rule.days_of_week.clone();
        days.sort_unstable();

        let current = anchor.weekday().num_days_from_sunday() as u8;
        let step = match days.iter().find(|&&day| day > current) {
            // A later weekday within the anchor's week.
            Some(&day) => (day - current) as i64,
            // Wrap to the earliest configured weekday of the next week.
            None => (7 - current + days[0]) as i64,
        };

        let mut next = anchor + Duration::days(step);
        // Interval skips whole weeks, applied after the weekday step.
        if rule.interval > 1 {
            next += Duration::days((rule.interval as i64 - 1) * 7);
        }
        next
    }

    fn next_monthly(anchor: DateTime<Utc>, rule: &RecurrenceRule) -> DateTime<Utc> {
        let shifted = anchor
            .checked_add_months(Months::new(rule.interval))
            .unwrap_or(anchor);

        match rule.day_of_month {
            // Calendar arithmetic already clamps (Jan 31 + 1 month = Feb 28).
            None => shifted,
            Some(day_of_month) => {
                let day = (day_of_month as u32)
                    .min(days_in_month(shifted.year(), shifted.month()));
                shifted.with_day(day).unwrap_or(shifted)
            }
        }
    }

    /// Validates a rule against the allowed wire ranges, with per-field
    /// detail in the error message.
    pub fn validate(rule: &RecurrenceRule) -> Result<(), CoreError> {
        if rule.interval < 1 || rule.interval > 365 {
            return Err(CoreError::InvalidRule(format!(
                "interval must be between 1 and 365, got {}",
                rule.interval
            )));
        }

        if let Some(day) = rule.days_of_week.iter().find(|&&d| d > 6) {
            return Err(CoreError::InvalidRule(format!(
                "daysOfWeek entries must be between 0 (Sunday) and 6, got {day}"
            )));
        }

        if !rule.days_of_week.is_empty() && rule.frequency != Frequency::Weekly {
            return Err(CoreError::InvalidRule(format!(
                "daysOfWeek only applies to WEEKLY rules, not {}",
                rule.frequency
            )));
        }

        if let Some(day) = rule.day_of_month {
            if rule.frequency != Frequency::Monthly {
                return Err(CoreError::InvalidRule(format!(
                    "dayOfMonth only applies to MONTHLY rules, not {}",
                    rule.frequency
                )));
            }
            if !(1..=31).contains(&day) {
                return Err(CoreError::InvalidRule(format!(
                    "dayOfMonth must be between 1 and 31, got {day}"
                )));
            }
        }

        Ok(())
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn daily(interval: u32) -> RecurrenceRule {
        RecurrenceRule {
            frequency: Frequency::Daily,
            interval,
            days_of_week: vec![],
            day_of_month: None,
            end_date: None,
        }
    }

    fn weekly(interval: u32, days: Vec<u8>) -> RecurrenceRule {
        RecurrenceRule {
            frequency: Frequency::Weekly,
            interval,
            days_of_week: days,
            day_of_month: None,
            end_date: None,
        }
    }

    fn monthly(interval: u32, day_of_month: Option<u8>) -> RecurrenceRule {
        RecurrenceRule {
            frequency: Frequency::Monthly,
            interval,
            days_of_week: vec![],
            day_of_month,
            end_date: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn daily_adds_exactly_interval_days() {
        let anchor = date(2025, 3, 14);
        for interval in [1u32, 2, 7, 30, 365] {
            let next = RecurrenceCalculator::next_occurrence(anchor, &daily(interval));
            assert_eq!(next - anchor, Duration::days(interval as i64));
        }
    }

    #[test]
    fn weekly_without_days_adds_interval_weeks() {
        let anchor = date(2025, 3, 14);
        let next = RecurrenceCalculator::next_occurrence(anchor, &weekly(2, vec![]));
        assert_eq!(next, anchor + Duration::days(14));
    }

    #[test]
    fn weekly_single_day_steady_state_is_seven_days() {
        // 2025-03-10 is a Monday; rule repeats on Mondays.
        let rule = weekly(1, vec![1]);
        let mut current = date(2025, 3, 10);
        for _ in 0..10 {
            let next = RecurrenceCalculator::next_occurrence(current, &rule);
            assert_eq!(next - current, Duration::days(7));
            current = next;
        }
    }

    #[test]
    fn weekly_advances_to_next_configured_day_in_week() {
        // Tuesday 2025-03-11 with Mon/Wed/Fri lands on Wednesday.
        let anchor = date(2025, 3, 11);
        let next = RecurrenceCalculator::next_occurrence(anchor, &weekly(1, vec![1, 3, 5]));
        assert_eq!(next, date(2025, 3, 12));
    }

    #[test]
    fn weekly_wraps_to_first_day_of_next_week() {
        // Friday 2025-03-14 with Mon/Wed/Fri wraps to Monday 2025-03-17.
        let anchor = date(2025, 3, 14);
        let next = RecurrenceCalculator::next_occurrence(anchor, &weekly(1, vec![1, 3, 5]));
        assert_eq!(next, date(2025, 3, 17));
    }

    #[test]
    fn weekly_interval_adds_extra_weeks_after_weekday_step() {
        // The week skip applies on top of the weekday step on every path.
        let anchor = date(2025, 3, 11); // Tuesday
        let next = RecurrenceCalculator::next_occurrence(anchor, &weekly(2, vec![1, 3, 5]));
        assert_eq!(next, date(2025, 3, 12) + Duration::days(7));

        let anchor = date(2025, 3, 14); // Friday, wrap path
        let next = RecurrenceCalculator::next_occurrence(anchor, &weekly(2, vec![1, 3, 5]));
        assert_eq!(next, date(2025, 3, 17) + Duration::days(7));
    }

    #[test]
    fn monthly_day_31_clamps_to_short_months() {
        let rule = monthly(1, Some(31));
        let from_march = RecurrenceCalculator::next_occurrence(date(2025, 3, 31), &rule);
        assert_eq!(from_march, date(2025, 4, 30));
    }

    #[test]
    fn monthly_day_31_sequence_from_january() {
        let rule = monthly(1, Some(31));
        let mut current = date(2025, 1, 31);

        current = RecurrenceCalculator::next_occurrence(current, &rule);
        assert_eq!(current, date(2025, 2, 28));
        current = RecurrenceCalculator::next_occurrence(current, &rule);
        assert_eq!(current, date(2025, 3, 31));
        current = RecurrenceCalculator::next_occurrence(current, &rule);
        assert_eq!(current, date(2025, 4, 30));
        current = RecurrenceCalculator::next_occurrence(current, &rule);
        assert_eq!(current, date(2025, 5, 31));
    }

    #[test]
    fn monthly_day_31_leap_february() {
        let rule = monthly(1, Some(31));
        let next = RecurrenceCalculator::next_occurrence(date(2024, 1, 31), &rule);
        assert_eq!(next, date(2024, 2, 29));
    }

    #[test]
    fn monthly_without_day_keeps_day_of_month() {
        let rule = monthly(1, None);
        let next = RecurrenceCalculator::next_occurrence(date(2025, 3, 14), &rule);
        assert_eq!(next, date(2025, 4, 14));
    }

    #[test]
    fn monthly_without_day_clamps_naturally() {
        let rule = monthly(1, None);
        let next = RecurrenceCalculator::next_occurrence(date(2025, 1, 31), &rule);
        assert_eq!(next, date(2025, 2, 28));
    }

    #[test]
    fn monthly_interval_spans_year_boundary() {
        let rule = monthly(3, Some(15));
        let next = RecurrenceCalculator::next_occurrence(date(2025, 11, 15), &rule);
        assert_eq!(next, date(2026, 2, 15));
    }

    #[test]
    fn validate_rejects_out_of_range_interval() {
        assert!(matches!(
            RecurrenceCalculator::validate(&daily(0)),
            Err(CoreError::InvalidRule(_))
        ));
        assert!(matches!(
            RecurrenceCalculator::validate(&daily(366)),
            Err(CoreError::InvalidRule(_))
        ));
        assert!(RecurrenceCalculator::validate(&daily(365)).is_ok());
    }

    #[test]
    fn validate_rejects_bad_weekdays() {
        assert!(matches!(
            RecurrenceCalculator::validate(&weekly(1, vec![1, 7])),
            Err(CoreError::InvalidRule(_))
        ));
        assert!(RecurrenceCalculator::validate(&weekly(1, vec![0, 6])).is_ok());
    }

    #[test]
    fn validate_rejects_mismatched_frequency_fields() {
        let mut rule = daily(1);
        rule.days_of_week = vec![1];
        assert!(matches!(
            RecurrenceCalculator::validate(&rule),
            Err(CoreError::InvalidRule(_))
        ));

        let mut rule = weekly(1, vec![]);
        rule.day_of_month = Some(10);
        assert!(matches!(
            RecurrenceCalculator::validate(&rule),
            Err(CoreError::InvalidRule(_))
        ));

        assert!(RecurrenceCalculator::validate(&monthly(1, Some(31))).is_ok());
    }

    #[test]
    fn validate_rejects_day_of_month_out_of_range() {
        assert!(matches!(
            RecurrenceCalculator::validate(&monthly(1, Some(0))),
            Err(CoreError::InvalidRule(_))
        ));
        assert!(matches!(
            RecurrenceCalculator::validate(&monthly(1, Some(32))),
            Err(CoreError::InvalidRule(_))
        ));
    }
}
