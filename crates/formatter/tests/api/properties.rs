//! Structural invariants checked across whole documents.

use crate::helpers::{clock, logger, request, spring_point};
use dwmlgen::{build_document, render, Profile};

fn profiles() -> [Profile; 4] {
    [
        Profile::TimeSeries,
        Profile::Glance,
        Profile::TwelveHourly,
        Profile::TwentyFourHourly,
    ]
}

#[test]
fn layout_triples_are_unique() {
    for profile in profiles() {
        let doc = build_document(&request(profile), &[spring_point()], &logger()).unwrap();
        for (i, a) in doc.layouts.iter().enumerate() {
            for b in &doc.layouts[i + 1..] {
                let same = a.period_hours == b.period_hours
                    && a.rows.len() == b.rows.len()
                    && a.rows.first().map(|r| &r.start_iso)
                        == b.rows.first().map(|r| &r.start_iso);
                assert!(
                    !same,
                    "{profile:?}: layouts {} and {} share a triple",
                    a.key, b.key
                );
            }
        }
    }
}

#[test]
fn every_layout_reference_resolves() {
    for profile in profiles() {
        let doc = build_document(&request(profile), &[spring_point()], &logger()).unwrap();
        for point in &doc.points {
            for param in &point.parameters {
                assert!(
                    doc.layouts.iter().any(|l| l.key == param.layout_key),
                    "{profile:?}: dangling key {}",
                    param.layout_key
                );
            }
        }
    }
}

#[test]
fn start_times_strictly_increase_within_layouts() {
    for profile in profiles() {
        let doc = build_document(&request(profile), &[spring_point()], &logger()).unwrap();
        for layout in &doc.layouts {
            for pair in layout.rows.windows(2) {
                assert!(
                    pair[0].start_epoch < pair[1].start_epoch,
                    "{profile:?}: layout {} start times not increasing",
                    layout.key
                );
            }
        }
    }
}

#[test]
fn period_names_only_on_half_day_layouts() {
    for profile in profiles() {
        let doc = build_document(&request(profile), &[spring_point()], &logger()).unwrap();
        for layout in &doc.layouts {
            let named = layout.rows.iter().any(|r| r.period_name.is_some());
            if layout.period_hours < 12 || profile == Profile::TimeSeries {
                assert!(
                    !named,
                    "{profile:?}: layout {} should carry no period names",
                    layout.key
                );
            } else {
                assert!(named, "{profile:?}: layout {} missing period names", layout.key);
            }
        }
    }
}

#[test]
fn summary_periods_align_to_the_day_cycle() {
    for (profile, hours) in [(Profile::TwelveHourly, 12), (Profile::TwentyFourHourly, 24)] {
        let doc = build_document(&request(profile), &[spring_point()], &logger()).unwrap();
        let c = clock();
        let layout = doc
            .layouts
            .iter()
            .find(|l| l.period_hours == hours && l.rows.len() > 7)
            .or_else(|| doc.layouts.iter().find(|l| l.period_hours == hours))
            .expect("summary layout");
        for row in &layout.rows {
            let hour = c.local_hour(row.start_epoch);
            assert!(
                hour == 6 || hour == 18,
                "{profile:?}: period starts at {hour}:00 local"
            );
        }
    }
}

#[test]
fn rerun_with_fixed_creation_date_is_byte_identical() {
    for profile in profiles() {
        let first = render(
            &build_document(&request(profile), &[spring_point()], &logger()).unwrap(),
        );
        let second = render(
            &build_document(&request(profile), &[spring_point()], &logger()).unwrap(),
        );
        assert_eq!(first, second, "{profile:?} output not deterministic");
    }
}
