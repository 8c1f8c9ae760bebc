// Hebrew calendar arithmetic
//
// Day numbers are rata die (day 1 = 0001-01-01 proleptic Gregorian), which is
// what chrono's `num_days_from_ce` returns. Months are numbered from Nisan = 1,
// so the civil year starts at month 7 (Tishrei) and Adar II is month 13.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rata die of 1 Tishrei AM 1
const HEBREW_EPOCH: i64 = -1_373_427;

const TISHREI: u8 = 7;

const MONTH_NAMES: [&str; 13] = [
    "Nisan", "Iyar", "Sivan", "Tammuz", "Av", "Elul", "Tishrei", "Cheshvan", "Kislev", "Tevet",
    "Shevat", "Adar", "Adar II",
];

/// A day in the Hebrew calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HebrewDate {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    #[serde(with = "weekday_name")]
    pub weekday: Weekday,
}

impl HebrewDate {
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let fixed = i64::from(date.num_days_from_ce());

        // Mean-year estimate is never more than one year ahead
        let approx = (fixed - HEBREW_EPOCH) * 98_496 / 35_975_351 + 1;
        let mut year = approx - 1;
        while new_year(year + 1) <= fixed {
            year += 1;
        }

        let start = if fixed < fixed_from_hebrew(year, 1, 1) { TISHREI } else { 1 };
        let month = (start..=last_month_of_year(year))
            .chain(1..start)
            .find(|&m| fixed <= fixed_from_hebrew(year, m, last_day_of_month(m, year)))
            .unwrap_or(start);
        let day = fixed - fixed_from_hebrew(year, month, 1) + 1;

        Self {
            year,
            month,
            day: day as u8,
            weekday: date.weekday(),
        }
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn month_name(&self) -> &'static str {
        match (self.month, self.is_leap_year()) {
            (12, true) => "Adar I",
            (m, _) => MONTH_NAMES[usize::from(m.clamp(1, 13)) - 1],
        }
    }
}

impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            weekday_name::full(self.weekday),
            self.day,
            self.month_name(),
            self.year
        )
    }
}

fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

fn last_month_of_year(year: i64) -> u8 {
    if is_leap_year(year) {
        13
    } else {
        12
    }
}

fn elapsed_days(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let days = 29 * months + parts.div_euclid(25_920);
    // Rosh Hashanah never falls on Sunday, Wednesday or Friday
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

fn year_length_correction(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + year_length_correction(year)
}

fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

fn last_day_of_month(month: u8, year: i64) -> u8 {
    let length = days_in_year(year);
    let short = matches!(month, 2 | 4 | 6 | 10 | 13)
        || (month == 12 && !is_leap_year(year))
        || (month == 8 && !matches!(length, 355 | 385))
        || (month == 9 && matches!(length, 353 | 383));
    if short {
        29
    } else {
        30
    }
}

fn month_days(year: i64, months: impl Iterator<Item = u8>) -> i64 {
    months.map(|m| i64::from(last_day_of_month(m, year))).sum()
}

fn fixed_from_hebrew(year: i64, month: u8, day: u8) -> i64 {
    let preceding = if month < TISHREI {
        month_days(year, TISHREI..=last_month_of_year(year)) + month_days(year, 1..month)
    } else {
        month_days(year, TISHREI..month)
    };

    new_year(year) + i64::from(day) - 1 + preceding
}

mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn full(weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(full(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Weekday>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hebrew(y: i32, m: u32, d: u32) -> HebrewDate {
        HebrewDate::from_gregorian(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_rosh_hashanah() {
        let date = hebrew(2024, 10, 3);
        assert_eq!((date.year, date.month, date.day), (5785, 7, 1));
        assert_eq!(date.weekday, Weekday::Thu);

        let date = hebrew(2023, 9, 16);
        assert_eq!((date.year, date.month, date.day), (5784, 7, 1));
    }

    #[test]
    fn test_day_before_new_year() {
        let date = hebrew(2024, 10, 2);
        assert_eq!((date.year, date.month, date.day), (5784, 6, 29));
        assert_eq!(date.month_name(), "Elul");
    }

    #[test]
    fn test_passover() {
        let date = hebrew(2025, 4, 13);
        assert_eq!((date.year, date.month, date.day), (5785, 1, 15));
        assert_eq!(date.month_name(), "Nisan");
    }

    #[test]
    fn test_purim_in_leap_year() {
        let date = hebrew(2024, 3, 24);
        assert!(date.is_leap_year());
        assert_eq!((date.year, date.month, date.day), (5784, 13, 14));
        assert_eq!(date.month_name(), "Adar II");
    }

    #[test]
    fn test_adar_naming_in_common_year() {
        let date = hebrew(2025, 3, 14);
        assert!(!date.is_leap_year());
        assert_eq!((date.month, date.day), (12, 14));
        assert_eq!(date.month_name(), "Adar");
    }

    #[test]
    fn test_display() {
        assert_eq!(hebrew(2024, 10, 3).to_string(), "Thursday 1 Tishrei 5785");
        assert_eq!(hebrew(2024, 2, 20).to_string(), "Tuesday 11 Adar I 5784");
    }

    #[test]
    fn test_leap_cycle() {
        let leaps: Vec<i64> = (5782..5801).filter(|y| is_leap_year(*y)).collect();
        assert_eq!(leaps, vec![5782, 5784, 5787, 5790, 5793, 5795, 5798]);
    }

    #[test]
    fn test_year_lengths_are_valid() {
        for year in 5700..5900 {
            assert!(
                matches!(days_in_year(year), 353 | 354 | 355 | 383 | 384 | 385),
                "year {} has {} days",
                year,
                days_in_year(year)
            );
        }
    }

    #[test]
    fn test_serializes_weekday_name() {
        let json = serde_json::to_value(hebrew(2024, 10, 3)).unwrap();
        assert_eq!(json["weekday"], "Thursday");
        assert_eq!(json["month"], 7);
    }
}
