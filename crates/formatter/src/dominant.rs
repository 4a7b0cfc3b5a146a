//! Dominant-weather selection over a summary period.
//!
//! Each coded weather match is first reduced to its own strongest group by
//! the (coverage, intensity, type) lattice; the period winner is the match
//! whose strongest group outranks the rest, with a tie going to the match
//! carrying strictly more groups. The winner's *entire* group set survives,
//! so mixtures like rain/snow stay visible to the phrase composer.

use crate::store::Match;
use crate::weather::{parse_ugly, WxGroup, WxType};

/// Outcome of the per-period selection.
#[derive(Debug, Clone, Default)]
pub struct DominantWeather {
    /// Group set of the winning match, empty when no match carried weather.
    pub groups: Vec<WxGroup>,
    /// Valid-time of the winning match.
    pub valid_time: Option<i64>,
    /// Share of in-period matches whose strongest group is fog.
    pub fog_fraction: f64,
}

fn strongest(groups: &[WxGroup]) -> Option<&WxGroup> {
    groups.iter().max_by_key(|g| g.rank())
}

/// Reduce the coded weather matches falling in one period.
pub fn select_dominant(matches: &[&Match]) -> DominantWeather {
    let mut winner: Option<(Vec<WxGroup>, i64)> = None;
    let mut fog_count = 0usize;
    let mut seen = 0usize;

    for m in matches {
        let Some(ugly) = m.value.coded() else {
            continue;
        };
        seen += 1;
        let groups = parse_ugly(ugly);
        let Some(best) = strongest(&groups) else {
            continue;
        };
        if best.wx_type == WxType::Fog {
            fog_count += 1;
        }

        let supplants = match &winner {
            None => true,
            Some((current, _)) => {
                let current_best = strongest(current).cloned().unwrap_or_default();
                let candidate = best.rank();
                let incumbent = current_best.rank();
                candidate > incumbent
                    || (candidate == incumbent && groups.len() > current.len())
            }
        };
        if supplants {
            winner = Some((groups, m.valid_time));
        }
    }

    let fog_fraction = if seen == 0 {
        0.0
    } else {
        fog_count as f64 / seen as f64
    };

    match winner {
        Some((groups, valid_time)) => DominantWeather {
            groups,
            valid_time: Some(valid_time),
            fog_fraction,
        },
        None => DominantWeather {
            fog_fraction,
            ..DominantWeather::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Element;
    use crate::store::MatchValue;
    use crate::weather::Coverage;

    fn wx(valid_time: i64, ugly: &str) -> Match {
        Match {
            element: Element::Weather,
            valid_time,
            value: MatchValue::Coded(ugly.to_string()),
        }
    }

    #[test]
    fn higher_coverage_supplants() {
        let a = wx(100, "SChc:R:-::");
        let b = wx(200, "Lkly:R:-::");
        let c = wx(300, "Chc:R:-::");
        let dom = select_dominant(&[&a, &b, &c]);
        assert_eq!(dom.valid_time, Some(200));
        assert_eq!(dom.groups[0].coverage, Coverage::Lkly);
    }

    #[test]
    fn equal_rank_prefers_more_groups() {
        let a = wx(100, "Chc:R:-::");
        let b = wx(200, "Chc:R:-::^Chc:S:-::");
        let dom = select_dominant(&[&a, &b]);
        assert_eq!(dom.valid_time, Some(200));
        assert_eq!(dom.groups.len(), 2);
        // The whole group set survives, not just the strongest group.
        assert_eq!(dom.groups[1].wx_type, WxType::Snow);
    }

    #[test]
    fn equal_rank_equal_groups_keeps_first() {
        let a = wx(100, "Chc:R:-::");
        let b = wx(200, "Chc:R:-::");
        let dom = select_dominant(&[&a, &b]);
        assert_eq!(dom.valid_time, Some(100));
    }

    #[test]
    fn fog_fraction_counts_fog_dominant_matches() {
        let a = wx(100, "Patchy:F:::");
        let b = wx(200, "Areas:F:::");
        let c = wx(300, "Chc:R:-::");
        let d = wx(400, "none:none:::");
        let dom = select_dominant(&[&a, &b, &c, &d]);
        assert!((dom.fog_fraction - 0.5).abs() < 1e-9);
        // Rain outranks fog in the type lattice.
        assert_eq!(dom.groups[0].wx_type, WxType::Rain);
    }

    #[test]
    fn adding_matches_never_weakens_the_selection() {
        let a = wx(100, "Chc:R:-::");
        let b = wx(200, "SChc:S:-::");
        let mut refs = vec![&a, &b];
        let before = select_dominant(&refs);
        let before_rank = before.groups.iter().map(|g| g.rank()).max().unwrap();

        // A weaker match leaves the winner (and its rank) in place.
        let weaker = wx(300, "Iso:L:--::");
        refs.push(&weaker);
        let after = select_dominant(&refs);
        let after_rank = after.groups.iter().map(|g| g.rank()).max().unwrap();
        assert!(after_rank >= before_rank);
        assert_eq!(after.valid_time, Some(100));

        // A stronger one takes over.
        let stronger = wx(400, "Def:T:+::");
        refs.push(&stronger);
        let after = select_dominant(&refs);
        assert_eq!(after.valid_time, Some(400));
    }

    #[test]
    fn no_weather_yields_empty() {
        let dom = select_dominant(&[]);
        assert!(dom.groups.is_empty());
        assert_eq!(dom.valid_time, None);
        assert_eq!(dom.fog_fraction, 0.0);
    }
}
