//! Pay-schedule types and the anchor-date resolver.
//!
//! A recurring payment schedule is seeded from how the member is paid:
//! weekly and bi-weekly earners anchor on the most recent payday for a
//! chosen weekday, semi-monthly earners pick two calendar days, and
//! monthly earners pick one.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};

use super::errors::{DomainError, DomainResult};

/// A weekday a paycheque can land on. Weekends are not selectable.
///
/// Numbering follows ISO-8601 (Monday = 1 .. Friday = 5), which is also
/// the scale [`recent_paydays_from`] matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayWeekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl PayWeekday {
    pub const ALL: [PayWeekday; 5] = [
        PayWeekday::Monday,
        PayWeekday::Tuesday,
        PayWeekday::Wednesday,
        PayWeekday::Thursday,
        PayWeekday::Friday,
    ];

    /// ISO weekday number, Monday = 1 through Friday = 5.
    pub fn number(self) -> u8 {
        match self {
            PayWeekday::Monday => 1,
            PayWeekday::Tuesday => 2,
            PayWeekday::Wednesday => 3,
            PayWeekday::Thursday => 4,
            PayWeekday::Friday => 5,
        }
    }

    /// Parses an ISO weekday number, rejecting weekends and out-of-range
    /// values.
    pub fn from_number(n: u8) -> DomainResult<Self> {
        match n {
            1 => Ok(PayWeekday::Monday),
            2 => Ok(PayWeekday::Tuesday),
            3 => Ok(PayWeekday::Wednesday),
            4 => Ok(PayWeekday::Thursday),
            5 => Ok(PayWeekday::Friday),
            other => Err(DomainError::InvalidWeekday(other)),
        }
    }

    /// Short chip label as shown on the pay-schedule screen.
    pub fn label(self) -> &'static str {
        match self {
            PayWeekday::Monday => "Mon",
            PayWeekday::Tuesday => "Tue",
            PayWeekday::Wednesday => "Wed",
            PayWeekday::Thursday => "Thu",
            PayWeekday::Friday => "Fri",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            PayWeekday::Monday => "Monday",
            PayWeekday::Tuesday => "Tuesday",
            PayWeekday::Wednesday => "Wednesday",
            PayWeekday::Thursday => "Thursday",
            PayWeekday::Friday => "Friday",
        }
    }

    /// Whether `date` falls on this weekday. Chrono's Sunday-first
    /// numbering is normalized through `number_from_monday`.
    pub fn matches(self, date: NaiveDate) -> bool {
        date.weekday().number_from_monday() == self.number() as u32
    }
}

impl Serialize for PayWeekday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

/// A calendar day selector 1-31, where 31 doubles as "last day of the
/// month" for months that are shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub const LAST: DayOfMonth = DayOfMonth(31);

    pub fn new(day: u8) -> DomainResult<Self> {
        if (1..=31).contains(&day) {
            Ok(DayOfMonth(day))
        } else {
            Err(DomainError::InvalidDayOfMonth(day))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_last_day(self) -> bool {
        self.0 == 31
    }

    /// Tile label: plain day number, or the combined "31 / Last day"
    /// tile for the overloaded selector.
    pub fn label(self) -> String {
        if self.is_last_day() {
            "31 / Last day".to_string()
        } else {
            self.0.to_string()
        }
    }
}

/// How often the applicant is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayFrequency {
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "Bi-weekly")]
    Biweekly,
    #[serde(rename = "Semi-monthly")]
    SemiMonthly,
    #[serde(rename = "Monthly")]
    Monthly,
}

impl PayFrequency {
    pub const ALL: [PayFrequency; 4] = [
        PayFrequency::Weekly,
        PayFrequency::Biweekly,
        PayFrequency::SemiMonthly,
        PayFrequency::Monthly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PayFrequency::Weekly => "Weekly",
            PayFrequency::Biweekly => "Bi-weekly",
            PayFrequency::SemiMonthly => "Semi-monthly",
            PayFrequency::Monthly => "Monthly",
        }
    }

    /// Helper copy shown under each frequency option.
    pub fn description(self) -> &'static str {
        match self {
            PayFrequency::Weekly => "You're paid once a week on the same weekday.",
            PayFrequency::Biweekly => "You're paid every two weeks on the same weekday.",
            PayFrequency::SemiMonthly => {
                "You're paid twice a month on fixed dates (e.g., 15th & last day)."
            }
            PayFrequency::Monthly => "You're paid once a month on a specific date.",
        }
    }

    /// Weekly and bi-weekly schedules anchor on a weekday; semi-monthly
    /// and monthly schedules anchor on calendar days instead.
    pub fn uses_weekday(self) -> bool {
        matches!(self, PayFrequency::Weekly | PayFrequency::Biweekly)
    }
}

/// A completed pay-schedule selection, one variant per frequency.
///
/// Weekly and bi-weekly variants carry the anchor payday chosen from the
/// resolver output; the anchor is guaranteed by construction to fall on
/// the selected weekday and to not be in the future.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PayScheduleSelection {
    Weekly { anchor: NaiveDate },
    Biweekly { anchor: NaiveDate },
    SemiMonthly { days: [DayOfMonth; 2] },
    Monthly { day: DayOfMonth },
}

impl PayScheduleSelection {
    pub fn weekly(weekday: PayWeekday, anchor: NaiveDate, today: NaiveDate) -> DomainResult<Self> {
        check_anchor(weekday, anchor, today)?;
        Ok(PayScheduleSelection::Weekly { anchor })
    }

    pub fn biweekly(
        weekday: PayWeekday,
        anchor: NaiveDate,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        check_anchor(weekday, anchor, today)?;
        Ok(PayScheduleSelection::Biweekly { anchor })
    }

    /// Exactly two distinct day selectors.
    pub fn semi_monthly(first: DayOfMonth, second: DayOfMonth) -> DomainResult<Self> {
        if first == second {
            return Err(DomainError::DuplicateSemiMonthlyDay(first));
        }
        Ok(PayScheduleSelection::SemiMonthly {
            days: [first, second],
        })
    }

    pub fn monthly(day: DayOfMonth) -> Self {
        PayScheduleSelection::Monthly { day }
    }
}

fn check_anchor(weekday: PayWeekday, anchor: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if !weekday.matches(anchor) {
        return Err(DomainError::AnchorWeekdayMismatch {
            expected: weekday,
            anchor,
        });
    }
    if anchor > today {
        return Err(DomainError::AnchorInFuture(anchor));
    }
    Ok(())
}

/// Collects the `count` most recent dates on or before `today` that fall
/// on `weekday`, most recent first.
///
/// Walks backward one day at a time, so today itself is included when it
/// matches, and consecutive results are exactly seven days apart. The
/// walk terminates within seven iterations per collected date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mloc::domain::{recent_paydays_from, PayWeekday};
///
/// // Wednesday 2025-10-15.
/// let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
/// let dates = recent_paydays_from(today, PayWeekday::Wednesday, 2);
/// assert_eq!(dates[0].to_string(), "2025-10-15");
/// assert_eq!(dates[1].to_string(), "2025-10-08");
///
/// let mondays = recent_paydays_from(today, PayWeekday::Monday, 2);
/// assert_eq!(mondays[0].to_string(), "2025-10-13");
/// assert_eq!(mondays[1].to_string(), "2025-10-06");
/// ```
pub fn recent_paydays_from(today: NaiveDate, weekday: PayWeekday, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut probe = today;
    while dates.len() < count {
        if weekday.matches(probe) {
            dates.push(probe);
        }
        match probe.pred_opt() {
            Some(previous) => probe = previous,
            None => break,
        }
    }
    dates
}

/// [`recent_paydays_from`] anchored on the caller's local calendar date.
pub fn recent_paydays(weekday: PayWeekday, count: usize) -> Vec<NaiveDate> {
    recent_paydays_from(Local::now().date_naive(), weekday, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolver_returns_exact_count_on_matching_weekday() {
        // 2025-10-15 is a Wednesday.
        let today = date(2025, 10, 15);
        let dates = recent_paydays_from(today, PayWeekday::Wednesday, 2);

        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0], date(2025, 10, 15));
        assert_eq!(dates[1], date(2025, 10, 8));
    }

    #[test]
    fn test_resolver_skips_today_when_weekday_differs() {
        let today = date(2025, 10, 15);
        let dates = recent_paydays_from(today, PayWeekday::Monday, 2);

        assert_eq!(dates[0], date(2025, 10, 13));
        assert_eq!(dates[1], date(2025, 10, 6));
    }

    #[test]
    fn test_resolver_properties_for_all_weekdays() {
        let today = date(2025, 10, 15);
        for weekday in PayWeekday::ALL {
            for count in 1..=5 {
                let dates = recent_paydays_from(today, weekday, count);

                assert_eq!(dates.len(), count);
                for d in &dates {
                    assert!(weekday.matches(*d));
                    assert!(*d <= today);
                }
                for pair in dates.windows(2) {
                    assert_eq!((pair[0] - pair[1]).num_days(), 7);
                }
                // First entry is today exactly when today matches.
                assert_eq!(dates[0] == today, weekday.matches(today));
            }
        }
    }

    #[test]
    fn test_resolver_is_idempotent_for_fixed_today() {
        let today = date(2025, 3, 3);
        let first = recent_paydays_from(today, PayWeekday::Friday, 4);
        let second = recent_paydays_from(today, PayWeekday::Friday, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolver_crosses_month_and_year_boundaries() {
        // 2026-01-01 is a Thursday.
        let today = date(2026, 1, 1);
        let dates = recent_paydays_from(today, PayWeekday::Thursday, 3);
        assert_eq!(dates, vec![date(2026, 1, 1), date(2025, 12, 25), date(2025, 12, 18)]);
    }

    #[test]
    fn test_weekday_numbering_round_trips() {
        for weekday in PayWeekday::ALL {
            assert_eq!(PayWeekday::from_number(weekday.number()), Ok(weekday));
        }
        assert_eq!(PayWeekday::from_number(0), Err(DomainError::InvalidWeekday(0)));
        assert_eq!(PayWeekday::from_number(6), Err(DomainError::InvalidWeekday(6)));
        assert_eq!(PayWeekday::from_number(7), Err(DomainError::InvalidWeekday(7)));
    }

    #[test]
    fn test_day_of_month_bounds_and_label() {
        assert!(DayOfMonth::new(1).is_ok());
        assert!(DayOfMonth::new(31).is_ok());
        assert_eq!(DayOfMonth::new(0), Err(DomainError::InvalidDayOfMonth(0)));
        assert_eq!(DayOfMonth::new(32), Err(DomainError::InvalidDayOfMonth(32)));

        assert_eq!(DayOfMonth::new(14).unwrap().label(), "14");
        assert_eq!(DayOfMonth::LAST.label(), "31 / Last day");
        assert!(DayOfMonth::LAST.is_last_day());
    }

    #[test]
    fn test_weekly_selection_requires_matching_past_anchor() {
        let today = date(2025, 10, 15);
        let wednesday = date(2025, 10, 8);
        let monday = date(2025, 10, 13);
        let future_wednesday = date(2025, 10, 22);

        assert!(PayScheduleSelection::weekly(PayWeekday::Wednesday, wednesday, today).is_ok());
        assert_eq!(
            PayScheduleSelection::weekly(PayWeekday::Wednesday, monday, today),
            Err(DomainError::AnchorWeekdayMismatch {
                expected: PayWeekday::Wednesday,
                anchor: monday,
            })
        );
        assert_eq!(
            PayScheduleSelection::biweekly(PayWeekday::Wednesday, future_wednesday, today),
            Err(DomainError::AnchorInFuture(future_wednesday))
        );
    }

    #[test]
    fn test_semi_monthly_selection_rejects_duplicates() {
        let fifteenth = DayOfMonth::new(15).unwrap();
        let last = DayOfMonth::LAST;

        assert!(PayScheduleSelection::semi_monthly(fifteenth, last).is_ok());
        assert_eq!(
            PayScheduleSelection::semi_monthly(fifteenth, fifteenth),
            Err(DomainError::DuplicateSemiMonthlyDay(fifteenth))
        );
    }

    #[test]
    fn test_frequency_labels_match_product_copy() {
        assert_eq!(PayFrequency::Weekly.label(), "Weekly");
        assert_eq!(PayFrequency::Biweekly.label(), "Bi-weekly");
        assert_eq!(PayFrequency::SemiMonthly.label(), "Semi-monthly");
        assert_eq!(PayFrequency::Monthly.label(), "Monthly");

        assert!(PayFrequency::Weekly.uses_weekday());
        assert!(PayFrequency::Biweekly.uses_weekday());
        assert!(!PayFrequency::SemiMonthly.uses_weekday());
        assert!(!PayFrequency::Monthly.uses_weekday());
    }

    #[test]
    fn test_schedule_serialization_shapes() {
        let schedule = PayScheduleSelection::monthly(DayOfMonth::LAST);
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, r#"{"monthly":{"day":31}}"#);

        let semi = PayScheduleSelection::semi_monthly(
            DayOfMonth::new(15).unwrap(),
            DayOfMonth::LAST,
        )
        .unwrap();
        let json = serde_json::to_string(&semi).unwrap();
        assert_eq!(json, r#"{"semiMonthly":{"days":[15,31]}}"#);

        let today = date(2025, 10, 15);
        let weekly =
            PayScheduleSelection::weekly(PayWeekday::Wednesday, today, today).unwrap();
        let json = serde_json::to_string(&weekly).unwrap();
        assert_eq!(json, r#"{"weekly":{"anchor":"2025-10-15"}}"#);
    }
}
