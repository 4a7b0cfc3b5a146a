//! Time-layout registry: deduplicates and names layouts by the
//! (period, row-count, first-start) triple, and synthesizes the
//! element-specific start/end valid-times and period-name labels.

use time::Date;

use crate::elements::Element;
use crate::store::Match;
use crate::timeutil::{add_days, last_weekday, nth_weekday, PointClock, HOUR};
use crate::window::Window;
use crate::Error;

/// One row of a time layout: formatted local start time, optional end
/// time, optional human period label. The raw start epoch is retained for
/// period naming; only the formatted strings reach the markup.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    pub start_epoch: i64,
    pub start_iso: String,
    pub end_iso: Option<String>,
    pub period_name: Option<String>,
}

/// One deduplicated `<time-layout>` block.
#[derive(Debug, Clone)]
pub struct TimeLayout {
    pub key: String,
    pub period_hours: i64,
    pub rows: Vec<LayoutRow>,
}

/// Insertion-ordered registry. Two layouts are identical iff all three of
/// (period, row-count, first-start) match; at most one record per triple.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    layouts: Vec<TimeLayout>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        LayoutRegistry::default()
    }

    /// Register a layout (or find the existing one) and return its key.
    pub fn register(&mut self, period_hours: i64, rows: Vec<LayoutRow>) -> String {
        let first_start = rows.first().map(|r| r.start_iso.clone()).unwrap_or_default();
        if let Some(existing) = self.layouts.iter().find(|l| {
            l.period_hours == period_hours
                && l.rows.len() == rows.len()
                && l.rows.first().map(|r| r.start_iso.as_str()) == Some(first_start.as_str())
        }) {
            return existing.key.clone();
        }
        let key = format!(
            "k-p{}h-n{}-{}",
            period_hours,
            rows.len(),
            self.layouts.len() + 1
        );
        self.layouts.push(TimeLayout {
            key: key.clone(),
            period_hours,
            rows,
        });
        key
    }

    pub fn layouts(&self) -> &[TimeLayout] {
        &self.layouts
    }

    pub fn into_layouts(self) -> Vec<TimeLayout> {
        self.layouts
    }
}

/// Synthesize the formatted start/end rows for a time-series element from
/// its in-window matches.
///
/// MaxT/MinT starts are synthetic: the standard 07:00 (rendering 08:00
/// under DST) and the fixed 20:00 wall clock, on the valid-time's local
/// date or the preceding one. PoP/QPF/Snow ends equal the valid-time with
/// the start one period back. Snapshot elements carry start only.
pub fn time_series_rows(
    element: Element,
    matches: &[Match],
    period_hours: i64,
    clock: &PointClock,
) -> Result<Vec<LayoutRow>, Error> {
    let mut rows = Vec::with_capacity(matches.len());
    for m in matches {
        rows.push(match element {
            Element::MaxT => {
                let mut date = clock.local_date(m.valid_time);
                if clock.local_hour(m.valid_time) < 7 {
                    date = add_days(date, -1);
                }
                let start = clock.epoch_at(date, 7)?;
                LayoutRow {
                    start_epoch: start,
                    start_iso: clock.iso(start),
                    end_iso: Some(clock.iso(clock.wall_epoch(date, 20)?)),
                    period_name: None,
                }
            }
            Element::MinT => {
                let mut date = clock.local_date(m.valid_time);
                if clock.local_hour(m.valid_time) < 20 {
                    date = add_days(date, -1);
                }
                let start = clock.wall_epoch(date, 20)?;
                LayoutRow {
                    start_epoch: start,
                    start_iso: clock.iso(start),
                    end_iso: Some(clock.iso(clock.epoch_at(add_days(date, 1), 7)?)),
                    period_name: None,
                }
            }
            Element::Pop12 | Element::Qpf | Element::Snow => {
                let start = m.valid_time - period_hours * HOUR;
                LayoutRow {
                    start_epoch: start,
                    start_iso: clock.iso(start),
                    end_iso: Some(clock.iso(m.valid_time)),
                    period_name: None,
                }
            }
            _ => LayoutRow {
                start_epoch: m.valid_time,
                start_iso: clock.iso(m.valid_time),
                end_iso: None,
                period_name: None,
            },
        });
    }
    Ok(rows)
}

/// The local date of the first daytime (06-18) period in a summary window.
pub fn day_base_date(window: &Window, clock: &PointClock) -> Date {
    let date = clock.local_date(window.start);
    if window.six_cycle_first {
        date
    } else {
        add_days(date, 1)
    }
}

/// Summary-profile rows for the daily max/min temperature: 06:00-18:00 for
/// MaxT and 18:00-06:00(+1d) for MinT, one row per day, synthesized out to
/// the full day count regardless of available matches.
pub fn summary_max_min_rows(
    element: Element,
    window: &Window,
    clock: &PointClock,
) -> Result<Vec<LayoutRow>, Error> {
    let mut rows = Vec::with_capacity(window.num_days as usize);
    let base = match element {
        Element::MaxT => day_base_date(window, clock),
        _ => clock.local_date(window.start),
    };
    for d in 0..window.num_days as i64 {
        let date = add_days(base, d);
        let (start, end) = match element {
            Element::MaxT => (
                clock.wall_epoch(date, 6)?,
                clock.wall_epoch(date, 18)?,
            ),
            _ => (
                clock.wall_epoch(date, 18)?,
                clock.wall_epoch(add_days(date, 1), 6)?,
            ),
        };
        rows.push(LayoutRow {
            start_epoch: start,
            start_iso: clock.iso(start),
            end_iso: Some(clock.iso(end)),
            period_name: None,
        });
    }
    Ok(rows)
}

/// Summary rows for an arbitrary period list.
pub fn period_rows(
    periods: &[(i64, i64)],
    with_end: bool,
    clock: &PointClock,
) -> Vec<LayoutRow> {
    periods
        .iter()
        .map(|&(start, end)| LayoutRow {
            start_epoch: start,
            start_iso: clock.iso(start),
            end_iso: if with_end { Some(clock.iso(end)) } else { None },
            period_name: None,
        })
        .collect()
}

/// Label a layout's rows in place from the issuance matrix.
pub fn attach_period_names(rows: &mut [LayoutRow], issuance: IssuanceType, clock: &PointClock) {
    let starts: Vec<i64> = rows.iter().map(|r| r.start_epoch).collect();
    for (row, name) in rows.iter_mut().zip(period_names(issuance, &starts, clock)) {
        row.period_name = Some(name);
    }
}

/// Issuance type used to index the fixed period-name matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceType {
    EarlyMorning,
    Morning12,
    Afternoon12,
    EarlyMorningMaxT,
    EarlyMorningMinT,
    Morning24,
    Afternoon24,
}

impl IssuanceType {
    fn table(self) -> &'static [&'static str] {
        match self {
            IssuanceType::EarlyMorning => &["Overnight", "Later Today"],
            IssuanceType::Morning12 => &["Today", "Tonight", "Tomorrow", "Tomorrow Night"],
            IssuanceType::Afternoon12 => &["Tonight", "Tomorrow", "Tomorrow Night"],
            IssuanceType::EarlyMorningMaxT => &["Later Today"],
            IssuanceType::EarlyMorningMinT => &["Overnight"],
            IssuanceType::Morning24 => &["Today", "Tomorrow"],
            IssuanceType::Afternoon24 => &["Tonight", "Tomorrow Night"],
        }
    }
}

/// Pick the issuance type from the first formatted start hour. Morning
/// covers 06-11, afternoon 12-05; the early-morning variants apply when
/// the current local hour is before 06:00.
pub fn issuance_type(
    element: Option<Element>,
    period_hours: i64,
    first_start_hour: u8,
    current_local_hour: u8,
) -> IssuanceType {
    if current_local_hour < 6 {
        return match element {
            Some(Element::MaxT) => IssuanceType::EarlyMorningMaxT,
            Some(Element::MinT) => IssuanceType::EarlyMorningMinT,
            _ => IssuanceType::EarlyMorning,
        };
    }
    let morning = (6..12).contains(&first_start_hour);
    if period_hours >= 24 {
        if morning {
            IssuanceType::Morning24
        } else {
            IssuanceType::Afternoon24
        }
    } else if morning {
        IssuanceType::Morning12
    } else {
        IssuanceType::Afternoon12
    }
}

fn is_night_start(hour: u8) -> bool {
    hour >= 18 || hour < 6
}

/// Fixed-and-floating US holiday label for a local date.
pub fn holiday_label(date: Date) -> Option<&'static str> {
    use time::Month::*;
    use time::Weekday::*;
    let (month, day) = (date.month(), date.day());
    match (month, day) {
        (January, 1) => return Some("New Year's Day"),
        (July, 4) => return Some("Independence Day"),
        (November, 11) => return Some("Veterans Day"),
        (December, 25) => return Some("Christmas"),
        _ => {}
    }
    let year = date.year();
    if Some(date) == nth_weekday(year, January, Monday, 3) {
        return Some("Martin Luther King Jr Day");
    }
    if Some(date) == nth_weekday(year, February, Monday, 3) {
        return Some("Presidents Day");
    }
    if Some(date) == last_weekday(year, May, Monday) {
        return Some("Memorial Day");
    }
    if Some(date) == nth_weekday(year, September, Monday, 1) {
        return Some("Labor Day");
    }
    if Some(date) == nth_weekday(year, October, Monday, 2) {
        return Some("Columbus Day");
    }
    if Some(date) == nth_weekday(year, November, Thursday, 4) {
        return Some("Thanksgiving Day");
    }
    None
}

/// Human labels for one layout's rows. The matrix covers the first rows;
/// beyond it the label falls back to the weekday name, suffixed " Night"
/// for 18:00-06:00 starts, with holidays replacing weekdays on daytime
/// rows only.
pub fn period_names(
    issuance: IssuanceType,
    starts: &[i64],
    clock: &PointClock,
) -> Vec<String> {
    let table = issuance.table();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            if let Some(label) = table.get(i) {
                return (*label).to_string();
            }
            let date = clock.local_date(start);
            let hour = clock.local_hour(start);
            if is_night_start(hour) {
                format!("{} Night", weekday_name(date))
            } else if let Some(holiday) = holiday_label(date) {
                holiday.to_string()
            } else {
                weekday_name(date).to_string()
            }
        })
        .collect()
}

fn weekday_name(date: Date) -> &'static str {
    match date.weekday() {
        time::Weekday::Monday => "Monday",
        time::Weekday::Tuesday => "Tuesday",
        time::Weekday::Wednesday => "Wednesday",
        time::Weekday::Thursday => "Thursday",
        time::Weekday::Friday => "Friday",
        time::Weekday::Saturday => "Saturday",
        time::Weekday::Sunday => "Sunday",
    }
}
