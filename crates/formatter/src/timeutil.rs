//! Point-local clock arithmetic.
//!
//! Each probed point carries a fixed UTC offset and a DST-observance flag;
//! there is no tz-database lookup. When the point observes DST and the
//! target instant falls within the US DST window (second Sunday of March
//! 02:00 through first Sunday of November 02:00, local standard time), the
//! offset is incremented by one hour before rendering the ISO suffix.

use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday};

use crate::Error;

pub const HOUR: i64 = 3600;
pub const DAY: i64 = 24 * HOUR;

/// Local-time view of one forecast point.
#[derive(Debug, Clone, Copy)]
pub struct PointClock {
    pub utc_offset_hours: i32,
    pub observes_dst: bool,
}

impl PointClock {
    pub fn new(utc_offset_hours: i32, observes_dst: bool) -> Self {
        PointClock {
            utc_offset_hours,
            observes_dst,
        }
    }

    fn standard_offset(&self) -> UtcOffset {
        // The input contract bounds the offset to a sane range, so this
        // cannot actually fail; fall back to UTC rather than panic.
        UtcOffset::from_whole_seconds(self.utc_offset_hours * HOUR as i32)
            .unwrap_or(UtcOffset::UTC)
    }

    /// Whether the instant falls inside the US daylight-saving window.
    /// Always false for points that do not observe DST.
    pub fn is_dst(&self, epoch: i64) -> bool {
        if !self.observes_dst {
            return false;
        }
        let local = self.standard_local(epoch);
        let year = local.year();
        let dst_start = match nth_weekday(year, Month::March, Weekday::Sunday, 2) {
            Some(d) => d,
            None => return false,
        };
        let dst_end = match nth_weekday(year, Month::November, Weekday::Sunday, 1) {
            Some(d) => d,
            None => return false,
        };
        let start = PrimitiveDateTime::new(dst_start, Time::from_hms(2, 0, 0).unwrap());
        let end = PrimitiveDateTime::new(dst_end, Time::from_hms(2, 0, 0).unwrap());
        let wall = PrimitiveDateTime::new(local.date(), local.time());
        wall >= start && wall < end
    }

    /// The effective offset at an instant, DST-adjusted.
    pub fn offset_at(&self, epoch: i64) -> UtcOffset {
        if self.is_dst(epoch) {
            UtcOffset::from_whole_seconds((self.utc_offset_hours + 1) * HOUR as i32)
                .unwrap_or(UtcOffset::UTC)
        } else {
            self.standard_offset()
        }
    }

    fn standard_local(&self, epoch: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(epoch)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
            .to_offset(self.standard_offset())
    }

    /// Local wall-clock time at the instant, DST-adjusted.
    pub fn local(&self, epoch: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(epoch)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
            .to_offset(self.offset_at(epoch))
    }

    pub fn local_hour(&self, epoch: i64) -> u8 {
        self.local(epoch).hour()
    }

    pub fn local_date(&self, epoch: i64) -> Date {
        self.local(epoch).date()
    }

    /// Epoch of a wall-clock hour on a local date, in local *standard* time.
    pub fn epoch_at(&self, date: Date, hour: u8) -> Result<i64, Error> {
        let t = Time::from_hms(hour, 0, 0)?;
        Ok(PrimitiveDateTime::new(date, t)
            .assume_offset(self.standard_offset())
            .unix_timestamp())
    }

    /// Epoch whose *rendered* local wall clock reads the requested hour,
    /// i.e. `epoch_at` with the DST hour folded back out.
    pub fn wall_epoch(&self, date: Date, hour: u8) -> Result<i64, Error> {
        let epoch = self.epoch_at(date, hour)?;
        if self.is_dst(epoch) {
            Ok(epoch - HOUR)
        } else {
            Ok(epoch)
        }
    }

    /// Render the instant as a local ISO-8601 string with offset suffix,
    /// e.g. `2006-04-15T06:00:00-04:00`.
    pub fn iso(&self, epoch: i64) -> String {
        let local = self.local(epoch);
        let offset = local.offset();
        let total = offset.whole_minutes();
        let (sign, abs) = if total < 0 { ('-', -total) } else { ('+', total) };
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            local.year(),
            u8::from(local.month()),
            local.day(),
            local.hour(),
            local.minute(),
            local.second(),
            sign,
            abs / 60,
            abs % 60
        )
    }
}

/// The nth given weekday of a month, e.g. the second Sunday of March.
pub fn nth_weekday(year: i32, month: Month, weekday: Weekday, nth: u8) -> Option<Date> {
    let mut date = Date::from_calendar_date(year, month, 1).ok()?;
    let mut seen = 0;
    loop {
        if date.weekday() == weekday {
            seen += 1;
            if seen == nth {
                return Some(date);
            }
        }
        date = date.next_day()?;
        if date.month() != month {
            return None;
        }
    }
}

/// The last given weekday of a month, e.g. the last Monday of May.
pub fn last_weekday(year: i32, month: Month, weekday: Weekday) -> Option<Date> {
    let mut found = None;
    let mut date = Date::from_calendar_date(year, month, 1).ok()?;
    while date.month() == month {
        if date.weekday() == weekday {
            found = Some(date);
        }
        date = match date.next_day() {
            Some(d) => d,
            None => break,
        };
    }
    found
}

/// Format a UTC instant as RFC3339-like `YYYY-MM-DDThh:mm:ssZ`.
pub fn utc_iso(epoch: i64) -> String {
    let utc = OffsetDateTime::from_unix_timestamp(epoch).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        utc.year(),
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}

/// Add whole days to a date, saturating at the calendar bounds.
pub fn add_days(date: Date, days: i64) -> Date {
    date.checked_add(Duration::days(days)).unwrap_or(date)
}
