//! Phrase and icon composition for the summary profiles.
//!
//! One short English phrase and one icon filename per period, decided by a
//! cascading chain: PoP-gated precipitation, mixtures, obscurations, the
//! sky-cover fallback, then the unconditional temperature and wind
//! overrides.

use crate::sky;
use crate::summary::{PeriodWindow, POP_NONE};
use crate::timeutil::PointClock;
use crate::weather::{Coverage, WxGroup, WxType};

/// PoP thresholds below which precipitation wording is suppressed.
const POP_GATE_PRECIP: f64 = 20.0;
const POP_GATE_THUNDER: f64 = 10.0;

const WIND_WINDY_KT: f64 = 25.0;
const WIND_BREEZY_KT: f64 = 15.0;

const HOT_F: f64 = 95.0;
const COLD_F: f64 = 32.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseIcon {
    pub phrase: String,
    /// Icon filename relative to the icon base URL.
    pub icon: String,
}

fn day_night(day: &'static str, night: &'static str, daytime: bool) -> &'static str {
    if daytime {
        day
    } else {
        night
    }
}

/// Icon filename with the PoP suffix folded in: the probability rounded to
/// the nearest ten, appended only when it lands in [10, 100].
fn pop_icon(prefix: &str, pop: f64) -> String {
    if pop < 0.0 {
        return format!("{prefix}.jpg");
    }
    let rounded = ((pop / 10.0).round() * 10.0) as i64;
    if (10..=100).contains(&rounded) {
        format!("{prefix}{rounded}.jpg")
    } else {
        format!("{prefix}.jpg")
    }
}

fn passes_gate(wx_type: WxType, pop: f64) -> bool {
    if pop == POP_NONE {
        return false;
    }
    if wx_type == WxType::Thunderstorms {
        pop >= POP_GATE_THUNDER
    } else {
        pop >= POP_GATE_PRECIP
    }
}

fn coverage_wrap(phrase: &str, coverage: Coverage) -> String {
    match coverage {
        Coverage::Chc | Coverage::SChc => format!("Chance {phrase}"),
        Coverage::Lkly => format!("{phrase} Likely"),
        _ => phrase.to_string(),
    }
}

/// The precipitation phrase/icon for the gated group set, mixtures first.
fn precipitation(
    groups: &[WxGroup],
    pop: f64,
    avg_sky: Option<f64>,
    daytime: bool,
) -> Option<PhraseIcon> {
    let gated: Vec<&WxGroup> = groups
        .iter()
        .filter(|g| g.wx_type.is_precipitation() && passes_gate(g.wx_type, pop))
        .collect();
    if gated.is_empty() {
        return None;
    }

    let has = |pred: fn(WxType) -> bool| gated.iter().any(|g| pred(g.wx_type));
    let rainish = |t: WxType| matches!(t, WxType::Rain | WxType::RainShowers | WxType::Drizzle);
    let snowish = |t: WxType| matches!(t, WxType::Snow | WxType::SnowShowers);
    let freezing = |t: WxType| {
        matches!(
            t,
            WxType::FreezingRain | WxType::FreezingDrizzle | WxType::FreezingSpray
        )
    };
    let sleet = |t: WxType| t == WxType::IcePellets;

    // Coverage wording follows the strongest gated group.
    let lead = gated
        .iter()
        .max_by_key(|g| g.rank())
        .copied()
        .cloned()
        .unwrap_or_default();

    let cloudy = avg_sky.map(|s| s > 60.0).unwrap_or(true);

    let (phrase, prefix): (&str, &str) = if has(rainish) && has(snowish) {
        ("Rain/Snow", day_night("rasn", "nrasn", daytime))
    } else if has(freezing) && has(snowish) {
        ("Wintry Mix", day_night("mix", "nmix", daytime))
    } else if has(rainish) && has(freezing) {
        ("Rain/Freezing Rain", day_night("fzra", "nfzra", daytime))
    } else if has(rainish) && has(sleet) {
        ("Rain/Sleet", day_night("raip", "nraip", daytime))
    } else if has(snowish) && has(sleet) {
        ("Snow/Sleet", day_night("ip", "nip", daytime))
    } else {
        match lead.wx_type {
            WxType::Thunderstorms => (
                "Thunderstorms",
                if cloudy {
                    day_night("tsra", "ntsra", daytime)
                } else {
                    day_night("scttsra", "nscttsra", daytime)
                },
            ),
            WxType::RainShowers => (
                "Rain Showers",
                if cloudy {
                    day_night("shra", "nshra", daytime)
                } else {
                    day_night("hi_shwrs", "hi_nshwrs", daytime)
                },
            ),
            WxType::Rain => ("Rain", day_night("ra", "nra", daytime)),
            WxType::Drizzle => ("Drizzle", day_night("ra", "nra", daytime)),
            WxType::Snow | WxType::SnowShowers => ("Snow", day_night("sn", "nsn", daytime)),
            WxType::IcePellets => ("Sleet", day_night("ip", "nip", daytime)),
            WxType::FreezingRain | WxType::FreezingDrizzle | WxType::FreezingSpray => {
                ("Freezing Rain", day_night("fzra", "nfzra", daytime))
            }
            _ => return None,
        }
    };

    Some(PhraseIcon {
        phrase: coverage_wrap(phrase, lead.coverage),
        icon: pop_icon(prefix, pop),
    })
}

/// Obscuration phrase/icon; not PoP-gated. Fog also fires on an all-day
/// fog fraction even when the dominant group is something else.
fn obscuration(groups: &[WxGroup], fog_fraction: f64, daytime: bool) -> Option<PhraseIcon> {
    let fog_icon = day_night("fg", "nfg", daytime).to_string() + ".jpg";

    if fog_fraction >= 0.5 {
        return Some(PhraseIcon {
            phrase: "Fog".to_string(),
            icon: fog_icon,
        });
    }

    let group = groups
        .iter()
        .filter(|g| g.wx_type.is_obscuration())
        .max_by_key(|g| g.rank())?;

    let (base, icon): (&str, String) = match group.wx_type {
        WxType::Fog | WxType::IceFog | WxType::FreezingFog => ("Fog", fog_icon),
        WxType::Haze => ("Haze", "hazy.jpg".to_string()),
        WxType::Smoke => ("Smoke", "smoke.jpg".to_string()),
        WxType::BlowingDust => ("Blowing Dust", "du.jpg".to_string()),
        WxType::BlowingSand => ("Blowing Sand", "du.jpg".to_string()),
        WxType::BlowingSnow => ("Blowing Snow", "blizzard.jpg".to_string()),
        WxType::Frost => ("Frost", "cold.jpg".to_string()),
        _ => return None,
    };

    let phrase = match group.coverage {
        Coverage::Patchy => format!("Patchy {base}"),
        Coverage::Areas => format!("Areas of {base}"),
        _ => base.to_string(),
    };
    Some(PhraseIcon { phrase, icon })
}

fn in_cold_season(clock: &PointClock, epoch: i64) -> bool {
    let month = u8::from(clock.local(epoch).month());
    !(4..=9).contains(&month)
}

fn north_quadrant(dir: f64) -> bool {
    dir >= 315.0 || dir <= 45.0
}

/// Temperature and wind overrides, applied last and unconditionally.
fn extreme_override(
    period: &PeriodWindow,
    clock: &PointClock,
    current: Option<PhraseIcon>,
) -> Option<PhraseIcon> {
    let mut result = current;

    if period.daytime {
        if let Some(t) = period.max_temp {
            if t > HOT_F {
                result = Some(PhraseIcon {
                    phrase: "Hot".to_string(),
                    icon: "hot.jpg".to_string(),
                });
            } else if t < COLD_F {
                result = Some(PhraseIcon {
                    phrase: "Cold".to_string(),
                    icon: "cold.jpg".to_string(),
                });
            }
        }
    }

    if let Some(wind) = period.max_wind_speed {
        let icon = day_night("wind", "nwind", period.daytime).to_string() + ".jpg";
        if wind >= WIND_WINDY_KT {
            result = Some(PhraseIcon {
                phrase: "Windy".to_string(),
                icon,
            });
        } else if wind >= WIND_BREEZY_KT {
            let blustery = period.wind_dir_at_max.map(north_quadrant).unwrap_or(false)
                && in_cold_season(clock, period.start)
                && period.max_temp.map(|t| t < COLD_F).unwrap_or(false);
            result = Some(PhraseIcon {
                phrase: if blustery { "Blustery" } else { "Breezy" }.to_string(),
                icon,
            });
        }
    }

    result
}

/// Compose the phrase and icon for one summary period.
pub fn compose(
    period: &PeriodWindow,
    period_index: usize,
    clock: &PointClock,
) -> Option<PhraseIcon> {
    let avg_sky = period.sky.average();

    let mut result = precipitation(
        &period.weather.groups,
        period.pop,
        avg_sky,
        period.daytime,
    );
    if result.is_none() {
        result = obscuration(
            &period.weather.groups,
            period.weather.fog_fraction,
            period.daytime,
        );
    }
    if result.is_none() {
        result = sky::analyze(&period.sky, period_index, period.daytime).map(|r| PhraseIcon {
            phrase: r.phrase.to_string(),
            icon: r.icon.to_string(),
        });
    }

    extreme_override(period, clock, result)
}
