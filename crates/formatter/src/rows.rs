//! Row-count allocator: per element, counts total rows and the rows
//! skipped at head and tail as the user window narrows the match list.

use crate::elements::Element;
use crate::store::MatchStore;
use crate::timeutil::{PointClock, HOUR};
use crate::window::Window;

/// Per (point, element) row accounting. The formatted row count is
/// `total - skip_beg - skip_end`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumRowsInfo {
    pub total: usize,
    pub skip_beg: usize,
    pub skip_end: usize,
    /// First and last in-window valid-times; zero when no rows remain.
    pub first_user_time: i64,
    pub last_user_time: i64,
}

impl NumRowsInfo {
    pub fn formatted_rows(&self) -> usize {
        self.total - self.skip_beg - self.skip_end
    }
}

/// Whether the local hour sits in the 20:00-to-06:00 overnight band where
/// PoP and MinT bypass the shrink so overnight values still surface.
fn in_overnight_band(clock: &PointClock, epoch: i64) -> bool {
    let hour = clock.local_hour(epoch);
    hour >= 20 || hour < 6
}

/// Shrink an element's match list from both ends using the per-element
/// effective window `[start + delta, end - delta]`, `delta = period / 4`.
pub fn allocate_rows(
    store: &MatchStore,
    element: Element,
    window: &Window,
    clock: &PointClock,
) -> NumRowsInfo {
    let matches = store.get(element);
    let total = matches.len();
    if total == 0 {
        return NumRowsInfo::default();
    }

    let period_secs = store.period_hours(element) * HOUR;
    let delta = period_secs / 4;

    // The shrink only applies once the window start has reached the 06:00
    // day cycle, and never to PoP.
    let shrink = !window.unbounded_start()
        && clock.local_hour(window.start) >= 6
        && element != Element::Pop12;

    let mut eff_start = if window.unbounded_start() {
        i64::MIN
    } else if shrink {
        window.start + delta
    } else {
        window.start
    };

    // A 24-hourly anchor that advanced a day still needs the prior PoP
    // half-window.
    if element == Element::Pop12 && window.first_day_is_tomorrow && !window.unbounded_start() {
        eff_start -= 12 * HOUR;
    }

    let eff_end = if window.unbounded_end() {
        i64::MAX
    } else if shrink {
        window.end - delta
    } else {
        window.end
    };

    let bypasses_shrink = |valid_time: i64| {
        matches!(element, Element::Pop12 | Element::MinT) && in_overnight_band(clock, valid_time)
    };

    let mut skip_beg = 0;
    for m in matches {
        let head_bound = if bypasses_shrink(m.valid_time) && !window.unbounded_start() {
            window.start
        } else {
            eff_start
        };
        if m.valid_time < head_bound {
            skip_beg += 1;
        } else {
            break;
        }
    }

    let mut skip_end = 0;
    for m in matches.iter().rev() {
        let start_instant = m.valid_time - period_secs;
        let tail_bound = if bypasses_shrink(m.valid_time) && !window.unbounded_end() {
            window.end
        } else {
            eff_end
        };
        if start_instant > tail_bound {
            skip_end += 1;
        } else {
            break;
        }
    }

    if skip_beg + skip_end >= total {
        return NumRowsInfo {
            total,
            skip_beg: skip_beg.min(total),
            skip_end: total - skip_beg.min(total),
            first_user_time: 0,
            last_user_time: 0,
        };
    }

    let first_user_time = matches[skip_beg].valid_time;
    let last_user_time = matches[total - 1 - skip_end].valid_time;

    NumRowsInfo {
        total,
        skip_beg,
        skip_end,
        first_user_time,
        last_user_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Match, MatchValue};
    use time::{Date, Month};

    fn clock() -> PointClock {
        PointClock::new(-5, true)
    }

    fn epoch(day: u8, hour: u8) -> i64 {
        clock()
            .epoch_at(
                Date::from_calendar_date(2006, Month::April, day).unwrap(),
                hour,
            )
            .unwrap()
    }

    fn temp_series(from: i64, count: usize) -> Vec<Match> {
        (0..count)
            .map(|i| Match {
                element: Element::Temp,
                valid_time: from + i as i64 * 3 * HOUR,
                value: MatchValue::Number(50.0 + i as f64),
            })
            .collect()
    }

    fn summary_window(start: i64, end: i64) -> Window {
        Window {
            start,
            end,
            six_cycle_first: true,
            first_day_is_tomorrow: false,
            num_days: 1,
        }
    }

    #[test]
    fn conserves_row_counts() {
        let store = MatchStore::new(temp_series(epoch(15, 0), 16));
        let window = summary_window(epoch(15, 7), epoch(16, 7));
        let info = allocate_rows(&store, Element::Temp, &window, &clock());
        assert!(info.total >= info.skip_beg + info.skip_end);
        assert_eq!(
            info.formatted_rows(),
            info.total - info.skip_beg - info.skip_end
        );
        assert!(info.first_user_time <= info.last_user_time);
    }

    #[test]
    fn unbounded_window_keeps_everything() {
        let store = MatchStore::new(temp_series(epoch(15, 0), 8));
        let window = Window {
            start: 0,
            end: 0,
            six_cycle_first: true,
            first_day_is_tomorrow: false,
            num_days: 7,
        };
        let info = allocate_rows(&store, Element::Temp, &window, &clock());
        assert_eq!(info.skip_beg, 0);
        assert_eq!(info.skip_end, 0);
        assert_eq!(info.formatted_rows(), 8);
    }

    #[test]
    fn overnight_pop_bypasses_shrink() {
        // A PoP row valid at 06:00 local just after the window start must
        // survive even though the 3-hour delta would have skipped it.
        let mut matches = Vec::new();
        for i in 0..4 {
            matches.push(Match {
                element: Element::Pop12,
                valid_time: epoch(15, 6) + i * 12 * HOUR,
                value: MatchValue::Number(30.0),
            });
        }
        let store = MatchStore::new(matches);
        let window = summary_window(epoch(15, 6), epoch(16, 18));
        let info = allocate_rows(&store, Element::Pop12, &window, &clock());
        assert_eq!(info.skip_beg, 0);
    }

    #[test]
    fn zero_remaining_rows() {
        let store = MatchStore::new(temp_series(epoch(15, 0), 4));
        let window = summary_window(epoch(20, 6), epoch(21, 6));
        let info = allocate_rows(&store, Element::Temp, &window, &clock());
        assert_eq!(info.formatted_rows(), 0);
    }
}
