//! Day-of-year birthday window.
//!
//! A birthday is "upcoming" when its anniversary falls within
//! `[today, today + WINDOW_DAYS]`, whatever the birth year. A 29 February
//! birthday is observed on 28 February in non-leap years.

use chrono::{Datelike, Days, NaiveDate};

pub const WINDOW_DAYS: u64 = 7;

/// Month-day keys (`%m-%d`) of every date in the window. They match the last
/// five characters of a stored birthday, whatever width its year has.
pub fn window_keys(today: NaiveDate) -> Vec<String> {
    let mut keys = Vec::with_capacity(WINDOW_DAYS as usize + 2);
    for offset in 0..=WINDOW_DAYS {
        let Some(day) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        keys.push(day.format("%m-%d").to_string());
        if day.month() == 2 && day.day() == 28 && !is_leap_year(day.year()) {
            keys.push("02-29".to_string());
        }
    }
    keys
}

/// The first anniversary of `birthday` on or after `today`.
pub fn next_anniversary(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = anniversary_in(birthday, today.year());
    if this_year >= today {
        this_year
    } else {
        anniversary_in(birthday, today.year() + 1)
    }
}

pub fn is_upcoming(birthday: NaiveDate, today: NaiveDate) -> bool {
    let next = next_anniversary(birthday, today);
    (next - today).num_days() <= WINDOW_DAYS as i64
}

fn anniversary_in(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(birthday)
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let today = date(2026, 10, 19);
        let keys = window_keys(today);
        assert_eq!(keys.len(), 8);
        assert_eq!(keys.first().map(String::as_str), Some("10-19"));
        assert_eq!(keys.last().map(String::as_str), Some("10-26"));

        assert!(is_upcoming(date(1990, 10, 19), today));
        assert!(is_upcoming(date(1990, 10, 26), today));
        assert!(!is_upcoming(date(1990, 10, 27), today));
        assert!(!is_upcoming(date(1990, 10, 18), today));
    }

    #[test]
    fn window_wraps_across_new_year() {
        let today = date(2026, 12, 28);
        let keys = window_keys(today);
        assert!(keys.contains(&"12-31".to_string()));
        assert!(keys.contains(&"01-04".to_string()));
        assert!(!keys.contains(&"01-05".to_string()));

        assert_eq!(next_anniversary(date(1980, 1, 2), today), date(2027, 1, 2));
        assert!(is_upcoming(date(1980, 1, 2), today));
    }

    #[test]
    fn leap_day_birthdays_fall_on_feb_28_in_common_years() {
        let today = date(2027, 2, 25);
        let keys = window_keys(today);
        assert!(keys.contains(&"02-28".to_string()));
        assert!(keys.contains(&"02-29".to_string()));
        assert_eq!(next_anniversary(date(2000, 2, 29), today), date(2027, 2, 28));
        assert!(is_upcoming(date(2000, 2, 29), today));

        let leap_today = date(2028, 2, 25);
        let keys = window_keys(leap_today);
        assert_eq!(keys.iter().filter(|k| k.as_str() == "02-29").count(), 1);
        assert_eq!(next_anniversary(date(2000, 2, 29), leap_today), date(2028, 2, 29));
    }

    #[test]
    fn leap_day_not_upcoming_after_feb_28() {
        let today = date(2027, 3, 1);
        assert!(!window_keys(today).contains(&"02-29".to_string()));
        assert!(!is_upcoming(date(2000, 2, 29), today));
    }
}
