//! Window planner: computes the aligned first-period start and last-period
//! end for each output profile in local-standard time, honoring DST.

use crate::elements::Element;
use crate::store::MatchStore;
use crate::timeutil::{add_days, PointClock, DAY, HOUR};
use crate::Error;

/// Output profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    TimeSeries,
    Glance,
    TwelveHourly,
    TwentyFourHourly,
}

impl Profile {
    pub fn from_flag(flag: &str) -> Option<Profile> {
        match flag {
            "time-series" => Some(Profile::TimeSeries),
            "glance" => Some(Profile::Glance),
            "12-hourly" | "12 hourly" => Some(Profile::TwelveHourly),
            "24-hourly" | "24 hourly" => Some(Profile::TwentyFourHourly),
            _ => None,
        }
    }

    /// Header product name, fixed per profile.
    pub fn product_name(self) -> &'static str {
        match self {
            Profile::TimeSeries => "time-series",
            Profile::Glance => "glance",
            Profile::TwelveHourly | Profile::TwentyFourHourly => "dwmlByDay",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Profile::TimeSeries | Profile::Glance => {
                "NOAA's National Weather Service Forecast Data"
            }
            Profile::TwelveHourly => {
                "NOAA's National Weather Service Forecast by 12 Hour Period"
            }
            Profile::TwentyFourHourly => {
                "NOAA's National Weather Service Forecast by 24 Hour Period"
            }
        }
    }

    /// The summary profiles run the full derivation pipeline.
    pub fn is_summary(self) -> bool {
        matches!(self, Profile::TwelveHourly | Profile::TwentyFourHourly)
    }

    pub fn wants_period_names(self) -> bool {
        !matches!(self, Profile::TimeSeries)
    }
}

/// The planned per-point window. For the DWMLgen profiles the user bounds
/// pass through unchanged, with zero encoding "absent".
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub start: i64,
    pub end: i64,
    /// First half-day bucket is the 06-18 cycle.
    pub six_cycle_first: bool,
    /// The 24-hourly anchor advanced a day: first period begins tomorrow.
    pub first_day_is_tomorrow: bool,
    pub num_days: u32,
}

impl Window {
    pub fn unbounded_start(&self) -> bool {
        self.start == 0
    }

    pub fn unbounded_end(&self) -> bool {
        self.end == 0
    }
}

/// Plan the output window for one point.
pub fn plan_window(
    profile: Profile,
    user_start: Option<i64>,
    user_end: Option<i64>,
    num_days: u32,
    clock: &PointClock,
    store: &MatchStore,
) -> Result<Window, Error> {
    if let (Some(start), Some(end)) = (user_start, user_end) {
        if end <= start {
            return Err(Error::EndBeforeStart);
        }
    }

    let earliest = store.earliest_valid_time();
    let latest = store.latest_valid_time();

    // Stale bounds degrade to absent rather than failing.
    let user_span = match (user_start, user_end) {
        (Some(s), Some(e)) => Some(e - s),
        _ => None,
    };
    let user_start = user_start.filter(|s| earliest.map(|t| *s >= t).unwrap_or(true));
    let user_end = user_end.filter(|e| latest.map(|t| *e <= t).unwrap_or(true));

    if !profile.is_summary() {
        return Ok(Window {
            start: user_start.unwrap_or(0),
            end: user_end.unwrap_or(0),
            six_cycle_first: true,
            first_day_is_tomorrow: false,
            num_days,
        });
    }

    // Reference date: the user start if given, else the earliest match,
    // anchored at 06:00 local.
    let reference = user_start.or(earliest).unwrap_or(0);
    let mut anchor_date = clock.local_date(reference);
    let mut six_cycle_first = true;
    let mut first_day_is_tomorrow = false;

    let first_pop = store.get(Element::Pop12).first().map(|m| m.valid_time);

    if user_start.is_none() {
        match profile {
            Profile::TwelveHourly => {
                // The next half-day window terminates at 18:00: back up to
                // an 18:00 anchor on the previous day.
                if let Some(pop) = first_pop {
                    if clock.local_hour(pop) < 12 {
                        anchor_date = add_days(anchor_date, -1);
                        six_cycle_first = false;
                    }
                }
            }
            Profile::TwentyFourHourly => {
                if let (Some(pop), Some(first)) = (first_pop, earliest) {
                    if clock.local_date(pop) != clock.local_date(first) {
                        anchor_date = add_days(anchor_date, 1);
                        first_day_is_tomorrow = true;
                    }
                }
            }
            _ => unreachable!(),
        }
    }

    let anchor_hour = if six_cycle_first { 6 } else { 18 };
    let start = clock.wall_epoch(anchor_date, anchor_hour)?;

    // A user window spanning no more than half a day still emits one day.
    let num_days = match user_end {
        Some(end) => {
            let span = end - start;
            ((span + DAY - 1) / DAY).max(1) as u32
        }
        None if user_span.map(|s| s <= 12 * HOUR).unwrap_or(false) => 1,
        None => num_days.max(1),
    };

    let end = clock.wall_epoch(anchor_date, 18)? + num_days as i64 * DAY;

    Ok(Window {
        start,
        end,
        six_cycle_first,
        first_day_is_tomorrow,
        num_days,
    })
}
