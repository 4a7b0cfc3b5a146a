//! Summary-period construction and bucketizing.
//!
//! The summary profiles reduce the raw match sequence to one derived record
//! per half-day or full-day period. A match lands in a period by its
//! *midpoint*: the valid-time (period end) shifted back half the element's
//! native cadence, then located by binary search over the period starts.

use itertools::Itertools;

use crate::dominant::{select_dominant, DominantWeather};
use crate::elements::Element;
use crate::store::{Match, MatchStore};
use crate::timeutil::HOUR;
use crate::window::Window;

/// PoP sentinel meaning "no probability associated with this period".
pub const POP_NONE: f64 = -1.0;

/// Running sky-cover statistics for one period. Indices are the ordinals
/// of the sky matches within the period, so the trend analyzer can judge
/// how fast the change happened.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkyStats {
    pub sum: f64,
    pub count: u32,
    pub max: f64,
    pub min: f64,
    pub max_index: usize,
    pub min_index: usize,
}

impl SkyStats {
    pub fn observe(&mut self, value: f64, index: usize) {
        if self.count == 0 || value > self.max {
            self.max = value;
            self.max_index = index;
        }
        if self.count == 0 || value < self.min {
            self.min = value;
            self.min_index = index;
        }
        self.sum += value;
        self.count += 1;
    }

    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// One derived summary period.
#[derive(Debug, Clone, Default)]
pub struct PeriodWindow {
    pub start: i64,
    pub end: i64,
    pub daytime: bool,
    /// Highest temperature seen in the period, english units.
    pub max_temp: Option<f64>,
    pub max_wind_speed: Option<f64>,
    /// Wind direction sampled at the same valid-time as the speed maximum.
    pub wind_dir_at_max: Option<f64>,
    pub sky: SkyStats,
    /// Maximum of the half-day PoP windows overlapping the period,
    /// `POP_NONE` when none does.
    pub pop: f64,
    pub weather: DominantWeather,
}

/// Lay out the empty periods for one summary window. Half-day periods
/// alternate day/night starting from the window's first cycle; full-day
/// periods are all daytime.
pub fn build_periods(window: &Window, period_hours: i64) -> Vec<PeriodWindow> {
    let count = if period_hours >= 24 {
        window.num_days as usize
    } else {
        window.num_days as usize * 2
    };
    let span = period_hours * HOUR;
    (0..count)
        .map(|i| {
            let start = window.start + i as i64 * span;
            let daytime = if period_hours >= 24 {
                true
            } else {
                (i % 2 == 0) == window.six_cycle_first
            };
            PeriodWindow {
                start,
                end: start + span,
                daytime,
                pop: POP_NONE,
                ..PeriodWindow::default()
            }
        })
        .collect()
}

/// Locate the period holding a match, by shifted midpoint.
pub fn bucket_index(
    periods: &[PeriodWindow],
    valid_time: i64,
    element_period_secs: i64,
) -> Option<usize> {
    let shifted = valid_time - element_period_secs / 2;
    let idx = periods.partition_point(|p| p.start <= shifted);
    if idx == 0 {
        return None;
    }
    let candidate = idx - 1;
    (shifted < periods[candidate].end).then_some(candidate)
}

/// The PoP value spread onto a weather valid-time: the earliest PoP match
/// whose half-day window `(valid - 12h, valid]` covers it.
pub fn spread_pop(store: &MatchStore, weather_time: i64) -> f64 {
    store
        .get(Element::Pop12)
        .iter()
        .find(|m| {
            weather_time > m.valid_time - 12 * HOUR && weather_time <= m.valid_time
        })
        .and_then(|m| m.value.number())
        .unwrap_or(POP_NONE)
}

/// The period's gating PoP: the maximum over every half-day PoP window
/// overlapping `[start, end)`, `POP_NONE` when none does.
pub fn period_max_pop(store: &MatchStore, start: i64, end: i64) -> f64 {
    store
        .get(Element::Pop12)
        .iter()
        .filter(|m| m.valid_time - 12 * HOUR < end && m.valid_time > start)
        .filter_map(|m| m.value.number())
        .fold(POP_NONE, f64::max)
}

/// Fill the periods from the match store: temperature and wind maxima, sky
/// statistics, dominant weather and its spread PoP.
pub fn populate_periods(periods: &mut [PeriodWindow], store: &MatchStore) {
    for element in [Element::Temp, Element::MaxT] {
        let period_secs = store.period_hours(element) * HOUR;
        for m in store.get(element) {
            let Some(value) = m.value.number() else {
                continue;
            };
            if let Some(i) = bucket_index(periods, m.valid_time, period_secs) {
                let p = &mut periods[i];
                if p.max_temp.map(|t| value > t).unwrap_or(true) {
                    p.max_temp = Some(value);
                }
            }
        }
    }

    let wind_dirs = store.get(Element::WindDir);
    let speed_secs = store.period_hours(Element::WindSpeed) * HOUR;
    for m in store.get(Element::WindSpeed) {
        let Some(speed) = m.value.number() else {
            continue;
        };
        if let Some(i) = bucket_index(periods, m.valid_time, speed_secs) {
            let p = &mut periods[i];
            if p.max_wind_speed.map(|s| speed > s).unwrap_or(true) {
                p.max_wind_speed = Some(speed);
                p.wind_dir_at_max = dir_at(wind_dirs, m.valid_time);
            }
        }
    }

    let sky_secs = store.period_hours(Element::Sky) * HOUR;
    let mut per_period_ordinal = vec![0usize; periods.len()];
    for m in store.get(Element::Sky) {
        let Some(cover) = m.value.number() else {
            continue;
        };
        if let Some(i) = bucket_index(periods, m.valid_time, sky_secs) {
            periods[i].sky.observe(cover, per_period_ordinal[i]);
            per_period_ordinal[i] += 1;
        }
    }

    let wx_secs = store.period_hours(Element::Weather) * HOUR;
    let buckets = store
        .get(Element::Weather)
        .iter()
        .filter_map(|m| bucket_index(periods, m.valid_time, wx_secs).map(|i| (i, m)))
        .into_group_map();
    for (i, p) in periods.iter_mut().enumerate() {
        let bucket = buckets.get(&i).map(Vec::as_slice).unwrap_or(&[]);
        p.weather = select_dominant(bucket);
        p.pop = period_max_pop(store, p.start, p.end);
    }
}

fn dir_at(dirs: &[Match], valid_time: i64) -> Option<f64> {
    dirs.iter()
        .find(|m| m.valid_time == valid_time)
        .and_then(|m| m.value.number())
}
