//! Vacation windows
//!
//! A vacation is stored as an inclusive range of civil dates. The absolute
//! instants it covers depend on the owning reviewer's timezone, so they are
//! computed on demand rather than stored.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Placeholder written in place of a real date in the rotation template
pub const PLACEHOLDER_DATE: &str = "YYYY/MM/DD";

/// On-disk date format
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Vacation effectively begins at 4pm local on the previous day
pub const VACATION_START_OFFSET_HOURS: i64 = -8;

/// Vacation effectively ends at 9am local on the following day
pub const VACATION_END_OFFSET_HOURS: i64 = 9;

/// Last second of a local day
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => panic!("23:59:59 is a valid time of day"),
};

/// An inclusive range of days a reviewer is away
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vacation {
    start: NaiveDate,
    end: NaiveDate,
}

impl Vacation {
    /// Create a vacation covering `start..=end`
    ///
    /// Returns `None` if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First day of the vacation
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the vacation
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// 00:00:00 local time on the first day
    pub fn starts_at(&self, tz: &Tz) -> DateTime<Tz> {
        resolve_local(tz, self.start.and_time(NaiveTime::MIN))
    }

    /// 23:59:59 local time on the last day
    pub fn ends_at(&self, tz: &Tz) -> DateTime<Tz> {
        resolve_local(tz, self.end.and_time(END_OF_DAY))
    }

    /// Start and end of the vacation with the travel-day padding applied
    pub fn padded_bounds(&self, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let start =
            self.starts_at(tz).with_timezone(&Utc) + Duration::hours(VACATION_START_OFFSET_HOURS);
        let end =
            self.ends_at(tz).with_timezone(&Utc) + Duration::hours(VACATION_END_OFFSET_HOURS);
        (start, end)
    }

    /// Whether `now` falls strictly inside the padded window
    pub fn covers(&self, tz: &Tz, now: DateTime<Utc>) -> bool {
        let (start, end) = self.padded_bounds(tz);
        start < now && now < end
    }
}

/// Vacation as written in the rotation document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawVacation {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl RawVacation {
    /// The `YYYY/MM/DD` sample entry kept in the template
    pub fn placeholder() -> Self {
        Self {
            start: PLACEHOLDER_DATE.to_string(),
            end: PLACEHOLDER_DATE.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.start.trim() == PLACEHOLDER_DATE && self.end.trim() == PLACEHOLDER_DATE
    }

    /// Parse into a vacation, or `None` for the placeholder
    pub fn parse(&self, reviewer: &str) -> Result<Option<Vacation>> {
        if self.is_placeholder() {
            return Ok(None);
        }

        let start = parse_date(reviewer, &self.start)?;
        let end = parse_date(reviewer, &self.end)?;

        Vacation::new(start, end)
            .map(Some)
            .ok_or_else(|| Error::InvalidVacation {
                reviewer: reviewer.to_string(),
                start: self.start.clone(),
                end: self.end.clone(),
            })
    }
}

impl From<&Vacation> for RawVacation {
    fn from(vacation: &Vacation) -> Self {
        Self {
            start: vacation.start.format(DATE_FORMAT).to_string(),
            end: vacation.end.format(DATE_FORMAT).to_string(),
        }
    }
}

fn parse_date(reviewer: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        reviewer: reviewer.to_string(),
        value: value.to_string(),
    })
}

/// Map a local wall-clock time to an instant in `tz`
///
/// Ambiguous times take the earliest instant. Times inside a DST gap move
/// forward to the first wall-clock time that exists.
fn resolve_local(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let mut candidate = local;
            // Gaps never exceed a day and a half (Samoa skipped a whole day).
            for _ in 0..(36 * 4) {
                candidate += Duration::minutes(15);
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return dt;
                }
            }
            tz.from_utc_datetime(&local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn local(tz: &Tz, y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        tz.with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_rejects_reversed_range() {
        assert!(Vacation::new(date(2025, 4, 11), date(2025, 4, 7)).is_none());
        assert!(Vacation::new(date(2025, 4, 7), date(2025, 4, 7)).is_some());
    }

    #[test]
    fn test_day_boundaries_in_reviewer_zone() {
        let tz: Tz = "Europe/London".parse().unwrap();
        let vacation = Vacation::new(date(2025, 4, 7), date(2025, 4, 11)).unwrap();

        assert_eq!(
            vacation.starts_at(&tz).naive_local(),
            date(2025, 4, 7).and_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            vacation.ends_at(&tz).naive_local(),
            date(2025, 4, 11).and_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_padding_around_window() {
        for zone in ["US/Pacific", "Asia/Tokyo", "UTC"] {
            let tz: Tz = zone.parse().unwrap();
            let vacation = Vacation::new(date(2025, 4, 7), date(2025, 4, 11)).unwrap();

            assert!(vacation.covers(&tz, local(&tz, 2025, 4, 6, 17)), "{zone}");
            assert!(!vacation.covers(&tz, local(&tz, 2025, 4, 6, 15)), "{zone}");
            assert!(vacation.covers(&tz, local(&tz, 2025, 4, 12, 8)), "{zone}");
            assert!(!vacation.covers(&tz, local(&tz, 2025, 4, 12, 10)), "{zone}");
        }
    }

    #[test]
    fn test_padded_bounds_are_exclusive() {
        let tz = chrono_tz::UTC;
        let vacation = Vacation::new(date(2025, 4, 7), date(2025, 4, 7)).unwrap();
        let (start, end) = vacation.padded_bounds(&tz);

        assert!(!vacation.covers(&tz, start));
        assert!(!vacation.covers(&tz, end));
        assert!(vacation.covers(&tz, start + Duration::seconds(1)));
    }

    #[test]
    fn test_placeholder_parses_to_nothing() {
        let raw = RawVacation::placeholder();
        assert!(raw.is_placeholder());
        assert_eq!(raw.parse("alice").unwrap(), None);
    }

    #[test]
    fn test_half_placeholder_is_an_error() {
        let raw = RawVacation {
            start: "2025/04/07".to_string(),
            end: PLACEHOLDER_DATE.to_string(),
        };
        assert!(matches!(raw.parse("alice"), Err(Error::InvalidDate { .. })));
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        let raw = RawVacation {
            start: "2025-04-07".to_string(),
            end: "2025-04-11".to_string(),
        };
        let err = raw.parse("alice").unwrap_err();
        assert!(err.to_string().contains("2025-04-07"));
    }

    #[test]
    fn test_unknown_vacation_key_is_rejected() {
        let doc = "start: 2025/04/07\nend: 2025/04/11\nreason: conference\n";
        assert!(serde_yaml::from_str::<RawVacation>(doc).is_err());
    }

    #[test]
    fn test_parse_rejects_reversed_range() {
        let raw = RawVacation {
            start: "2025/04/11".to_string(),
            end: "2025/04/07".to_string(),
        };
        assert!(matches!(
            raw.parse("alice"),
            Err(Error::InvalidVacation { .. })
        ));
    }

    #[test]
    fn test_format_matches_input() {
        let raw = RawVacation {
            start: "2025/04/07".to_string(),
            end: "2025/04/11".to_string(),
        };
        let vacation = raw.parse("alice").unwrap().unwrap();
        assert_eq!(RawVacation::from(&vacation), raw);
    }

    #[test]
    fn test_midnight_inside_dst_gap() {
        // Santiago springs forward at midnight.
        let tz: Tz = "America/Santiago".parse().unwrap();
        let vacation = Vacation::new(date(2024, 9, 8), date(2024, 9, 8)).unwrap();
        let start = vacation.starts_at(&tz);
        assert_eq!(start.date_naive(), date(2024, 9, 8));
    }
}
