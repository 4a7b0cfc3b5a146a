//! End-to-end document builds over realistic seven-day inputs.

use crate::helpers::{
    clock, coded, epoch, logger, numeric, point_with, request, spring_point,
};
use dwmlgen::markup::ParameterBody;
use dwmlgen::timeutil::HOUR;
use dwmlgen::{build_document, render, Element, Profile};

#[test]
fn time_series_emits_every_match_at_native_cadence() {
    let point = spring_point();
    let expected: Vec<(Element, usize)> = vec![
        (Element::MaxT, 7),
        (Element::MinT, 7),
        (Element::Pop12, 14),
        (Element::Qpf, 28),
        (Element::Temp, 56),
        (Element::Weather, 56),
    ];

    let doc = build_document(&request(Profile::TimeSeries), &[point], &logger()).unwrap();
    let params = &doc.points[0].parameters;

    for (element, count) in expected {
        let (tag, type_attr) = element.xml_tag();
        let param = params
            .iter()
            .find(|p| p.tag == tag && p.type_attr == type_attr)
            .unwrap_or_else(|| panic!("missing block for {}", element.ndfd_name()));
        let rows = match &param.body {
            ParameterBody::Values(v) => v.len(),
            ParameterBody::Weather(w) => w.len(),
            other => panic!("unexpected body {other:?}"),
        };
        assert_eq!(rows, count, "row count for {}", element.ndfd_name());
    }

    // Snapshot elements at the same cadence and first instant share one
    // deduplicated layout.
    let temp_key = &params
        .iter()
        .find(|p| p.tag == "temperature" && p.type_attr == "hourly")
        .unwrap()
        .layout_key;
    let dew_key = &params
        .iter()
        .find(|p| p.tag == "temperature" && p.type_attr == "dew point")
        .unwrap()
        .layout_key;
    assert_eq!(temp_key, dew_key);
}

#[test]
fn twelve_hourly_seven_day_shape() {
    let doc =
        build_document(&request(Profile::TwelveHourly), &[spring_point()], &logger()).unwrap();
    let xml = render(&doc);

    // First period starts 06:00 local on the 15th (EDT in April).
    assert!(xml.contains("<start-valid-time period-name=\"Today\">2006-04-15T06:00:00-04:00"));

    let params = &doc.points[0].parameters;
    let rows_of = |tag: &str, type_attr: &str| -> usize {
        let p = params
            .iter()
            .find(|p| p.tag == tag && p.type_attr == type_attr)
            .unwrap_or_else(|| panic!("missing {tag}/{type_attr}"));
        match &p.body {
            ParameterBody::Values(v) => v.len(),
            ParameterBody::WeatherSummary(v) => v.len(),
            ParameterBody::Icons(v) => v.len(),
            other => panic!("unexpected body {other:?}"),
        }
    };
    assert_eq!(rows_of("weather", ""), 14);
    assert_eq!(rows_of("conditions-icon", "forecast-NWS"), 14);
    assert_eq!(rows_of("probability-of-precipitation", "12 hour"), 14);
    assert_eq!(rows_of("temperature", "maximum"), 7);
    assert_eq!(rows_of("temperature", "minimum"), 7);

    // MaxT spans 06:00 to 18:00, MinT 18:00 to 06:00 the next day.
    assert!(xml.contains("2006-04-15T06:00:00-04:00</start-valid-time>"));
    assert!(xml.contains("<end-valid-time>2006-04-15T18:00:00-04:00</end-valid-time>"));
    assert!(xml.contains("2006-04-15T18:00:00-04:00</start-valid-time>"));
    assert!(xml.contains("<end-valid-time>2006-04-16T06:00:00-04:00</end-valid-time>"));
}

#[test]
fn twenty_four_hourly_missing_first_day_renders_nil() {
    // The prober's daily extremes only begin the following day; the first
    // day window stays empty.
    let mut matches = Vec::new();
    for d in 0..6u8 {
        matches.push(numeric(Element::MaxT, epoch(16 + d, 19), 70.0));
        matches.push(numeric(Element::MinT, epoch(17 + d, 7), 50.0));
    }
    for i in 0..14i64 {
        matches.push(numeric(Element::Pop12, epoch(15, 18) + i * 12 * HOUR, 20.0));
    }
    for i in 0..56i64 {
        let t = epoch(15, 9) + i * 3 * HOUR;
        matches.push(numeric(Element::Temp, t, 60.0));
        matches.push(numeric(Element::Sky, t, 40.0));
        matches.push(coded(t, "none:none:::"));
    }
    let point = point_with(matches);

    let mut req = request(Profile::TwentyFourHourly);
    req.icons = false;
    let doc = build_document(&req, &[point], &logger()).unwrap();
    let params = &doc.points[0].parameters;
    let maxt = params
        .iter()
        .find(|p| p.tag == "temperature" && p.type_attr == "maximum")
        .unwrap();
    match &maxt.body {
        ParameterBody::Values(values) => {
            assert!(values[0].is_none(), "first day has no MaxT data");
            assert!(values[1].is_some());
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn twenty_four_hourly_weather_rides_the_overnight_layout() {
    let doc = build_document(
        &request(Profile::TwentyFourHourly),
        &[spring_point()],
        &logger(),
    )
    .unwrap();
    let params = &doc.points[0].parameters;
    let key_of = |tag: &str, type_attr: &str| -> &String {
        &params
            .iter()
            .find(|p| p.tag == tag && p.type_attr == type_attr)
            .unwrap_or_else(|| panic!("missing {tag}/{type_attr}"))
            .layout_key
    };

    let wx_key = key_of("weather", "");
    assert_eq!(wx_key, key_of("temperature", "minimum"));
    assert_ne!(wx_key, key_of("temperature", "maximum"));
    assert_eq!(wx_key, key_of("conditions-icon", "forecast-NWS"));

    // The shared layout runs 18:00 local through 06:00 the next day.
    let layout = doc.layouts.iter().find(|l| &l.key == wx_key).unwrap();
    let c = clock();
    for row in &layout.rows {
        assert_eq!(c.local_hour(row.start_epoch), 18);
        assert!(
            row.end_iso.as_deref().unwrap().contains("T06:00:00"),
            "row ends at {:?}",
            row.end_iso
        );
    }
}

#[test]
fn daily_pop_gate_uses_the_period_max() {
    // Morning PoP 60, evening PoP 15; the rain itself arrives with the
    // evening matches.
    let mut matches = Vec::new();
    for d in 0..2u8 {
        matches.push(numeric(Element::MaxT, epoch(15 + d, 19), 50.0));
        matches.push(numeric(Element::MinT, epoch(16 + d, 7), 40.0));
        matches.push(numeric(Element::Pop12, epoch(15 + d, 18), 60.0));
        matches.push(numeric(Element::Pop12, epoch(16 + d, 6), 15.0));
    }
    for i in 0..16i64 {
        let t = epoch(15, 9) + i * 3 * HOUR;
        matches.push(numeric(Element::Temp, t, 48.0));
        matches.push(numeric(Element::WindSpeed, t, 8.0));
        matches.push(numeric(Element::WindDir, t, 200.0));
        matches.push(numeric(Element::Sky, t, 90.0));
        let evening = matches!(i % 8, 3 | 4);
        matches.push(coded(t, if evening { "Lkly:R:-::" } else { "none:none:::" }));
    }

    let mut req = request(Profile::TwentyFourHourly);
    req.num_days = 2;
    let doc = build_document(&req, &[point_with(matches)], &logger()).unwrap();
    let xml = render(&doc);
    assert!(xml.contains("weather-summary=\"Rain Likely\""), "{xml}");
    assert!(xml.contains("ra60.jpg"));
}

fn summary_point(wx: &str, pop: f64, sky: f64, maxt: f64, wind: f64) -> dwmlgen::PointContext {
    let mut matches = Vec::new();
    for d in 0..2u8 {
        matches.push(numeric(Element::MaxT, epoch(15 + d, 19), maxt));
        matches.push(numeric(Element::MinT, epoch(16 + d, 7), maxt - 20.0));
    }
    for i in 0..4i64 {
        matches.push(numeric(Element::Pop12, epoch(15, 18) + i * 12 * HOUR, pop));
    }
    for i in 0..16i64 {
        let t = epoch(15, 9) + i * 3 * HOUR;
        matches.push(numeric(Element::Temp, t, maxt - 5.0));
        matches.push(numeric(Element::WindSpeed, t, wind));
        matches.push(numeric(Element::WindDir, t, 200.0));
        matches.push(numeric(Element::Sky, t, sky));
        matches.push(coded(t, wx));
    }
    point_with(matches)
}

#[test]
fn mixed_precipitation_phrase_and_icon() {
    let point = summary_point("Lkly:R:-::^Chc:S:-::", 60.0, 90.0, 40.0, 8.0);
    let mut req = request(Profile::TwelveHourly);
    req.num_days = 2;
    let doc = build_document(&req, &[point], &logger()).unwrap();
    let xml = render(&doc);
    assert!(xml.contains("weather-summary=\"Rain/Snow Likely\""), "{xml}");
    assert!(xml.contains("rasn60.jpg"));
}

#[test]
fn all_day_fog_bypasses_pop_gating() {
    let point = summary_point("Areas:F:::", 0.0, 85.0, 70.0, 5.0);
    let mut req = request(Profile::TwelveHourly);
    req.num_days = 2;
    let doc = build_document(&req, &[point], &logger()).unwrap();
    let xml = render(&doc);
    assert!(xml.contains("weather-summary=\"Fog\""), "{xml}");
    assert!(xml.contains("fcicons/fg.jpg"));
}

#[test]
fn windy_override_beats_sunny() {
    let point = summary_point("none:none:::", 0.0, 10.0, 75.0, 27.0);
    let mut req = request(Profile::TwelveHourly);
    req.num_days = 2;
    let doc = build_document(&req, &[point], &logger()).unwrap();
    let xml = render(&doc);
    assert!(xml.contains("weather-summary=\"Windy\""), "{xml}");
    assert!(xml.contains("fcicons/wind.jpg"));
    assert!(!xml.contains("weather-summary=\"Sunny\""));
}
