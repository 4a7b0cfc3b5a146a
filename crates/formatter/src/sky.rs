//! Sky-cover trend analysis: bins per-period sky statistics into five
//! categories and picks a steady, increasing, decreasing or clearing
//! phrase with its matching icon.

use crate::summary::SkyStats;

/// Periods past this index always take the steady average phrase; the
/// trend wording only makes sense near the forecast front.
const TREND_HORIZON: usize = 2;

/// Sample-count gates for trend wording.
const GRADUAL_SPEED: usize = 4;
const EDGE_SAMPLES: usize = 4;

/// Category change that reads as a genuine clearing.
const CLEARING_CHANGE: i32 = 3;

/// Sky phrase and icon filename for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyReport {
    pub phrase: &'static str,
    pub icon: &'static str,
}

/// Bin a percent cover into the five-band category scale.
pub fn category(percent: f64) -> u8 {
    if percent <= 15.0 {
        0
    } else if percent <= 39.0 {
        1
    } else if percent <= 69.0 {
        2
    } else if percent <= 90.0 {
        3
    } else {
        4
    }
}

pub fn phrase_for(category: u8, daytime: bool) -> &'static str {
    if daytime {
        match category {
            0 => "Sunny",
            1 => "Mostly Sunny",
            2 => "Partly Sunny",
            3 => "Mostly Cloudy",
            _ => "Cloudy",
        }
    } else {
        match category {
            0 => "Clear",
            1 => "Mostly Clear",
            2 => "Partly Cloudy",
            3 => "Mostly Cloudy",
            _ => "Cloudy",
        }
    }
}

pub fn icon_for(category: u8, daytime: bool) -> &'static str {
    if daytime {
        match category {
            0 => "skc.jpg",
            1 => "few.jpg",
            2 => "sct.jpg",
            3 => "bkn.jpg",
            _ => "ovc.jpg",
        }
    } else {
        match category {
            0 => "nskc.jpg",
            1 => "nfew.jpg",
            2 => "nsct.jpg",
            3 => "nbkn.jpg",
            _ => "novc.jpg",
        }
    }
}

fn steady(avg_cat: u8, daytime: bool) -> SkyReport {
    SkyReport {
        phrase: phrase_for(avg_cat, daytime),
        icon: icon_for(avg_cat, daytime),
    }
}

/// Analyze one period's sky statistics. `None` when the period collected
/// no sky samples.
pub fn analyze(stats: &SkyStats, period_index: usize, daytime: bool) -> Option<SkyReport> {
    let avg = stats.average()?;
    let avg_cat = category(avg);
    let max_cat = category(stats.max);
    let min_cat = category(stats.min);
    let change = (max_cat as i32 - min_cat as i32).abs();

    // Steady cover, or too far out for trend wording to be credible.
    if change < 2 || period_index >= TREND_HORIZON {
        return Some(steady(avg_cat, daytime));
    }

    let increasing = stats.min_index < stats.max_index;
    let speed = stats.max_index.abs_diff(stats.min_index);
    // Ordinal of the sample that started the change.
    let early = if increasing {
        stats.min_index
    } else {
        stats.max_index
    };

    if increasing && max_cat == 4 {
        return Some(SkyReport {
            phrase: "Becoming Cloudy",
            icon: icon_for(max_cat, daytime),
        });
    }
    if !increasing && min_cat == 0 && daytime {
        return Some(SkyReport {
            phrase: "Becoming Sunny",
            icon: icon_for(min_cat, daytime),
        });
    }
    if !increasing && change >= CLEARING_CHANGE {
        return Some(SkyReport {
            phrase: if speed >= GRADUAL_SPEED {
                "Gradual Clearing"
            } else {
                "Clearing"
            },
            icon: icon_for(min_cat, daytime),
        });
    }

    if speed >= GRADUAL_SPEED {
        return Some(SkyReport {
            phrase: if increasing {
                "Increasing Clouds"
            } else {
                "Decreasing Clouds"
            },
            icon: icon_for(if increasing { max_cat } else { min_cat }, daytime),
        });
    }
    // A change that started near the period's front reads as the heavier
    // cover; one that settled in later reads as the average.
    if early < EDGE_SAMPLES {
        return Some(SkyReport {
            phrase: phrase_for(max_cat, daytime),
            icon: icon_for(max_cat, daytime),
        });
    }
    Some(steady(avg_cat, daytime))
}
