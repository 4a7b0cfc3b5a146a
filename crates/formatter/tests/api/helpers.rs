use dwmlgen::store::{Match, MatchStore, MatchValue};
use dwmlgen::timeutil::{PointClock, HOUR};
use dwmlgen::{Element, FormatRequest, PointContext, Profile, UnitSystem};
use slog::Logger;
use time::{Date, Month};

pub fn logger() -> Logger {
    Logger::root(slog::Discard, slog::o!())
}

/// US eastern, observing DST. April 2006 instants render with -04:00.
pub fn clock() -> PointClock {
    PointClock::new(-5, true)
}

pub fn epoch(day: u8, hour: u8) -> i64 {
    clock()
        .epoch_at(
            Date::from_calendar_date(2006, Month::April, day).unwrap(),
            hour,
        )
        .unwrap()
}

pub fn numeric(element: Element, valid_time: i64, value: f64) -> Match {
    Match {
        element,
        valid_time,
        value: MatchValue::Number(value),
    }
}

pub fn coded(valid_time: i64, ugly: &str) -> Match {
    Match {
        element: Element::Weather,
        valid_time,
        value: MatchValue::Coded(ugly.to_string()),
    }
}

pub fn point_with(matches: Vec<Match>) -> PointContext {
    PointContext {
        latitude: 38.99,
        longitude: -77.02,
        clock: clock(),
        store: MatchStore::new(matches),
    }
}

/// Seven days of a typical full element set starting the morning of
/// 2006-04-15: daily extremes, 12-hourly PoP, 3-hourly snapshots, 6-hourly
/// QPF, and benign scattered-showers weather.
pub fn spring_matches() -> Vec<Match> {
    let mut matches = Vec::new();
    for d in 0..7u8 {
        matches.push(numeric(Element::MaxT, epoch(15 + d, 19), 68.0 + d as f64));
        matches.push(numeric(Element::MinT, epoch(16 + d, 7), 46.0 + d as f64));
    }
    for i in 0..14i64 {
        matches.push(numeric(
            Element::Pop12,
            epoch(15, 18) + i * 12 * HOUR,
            30.0,
        ));
    }
    for i in 0..28i64 {
        matches.push(numeric(Element::Qpf, epoch(15, 12) + i * 6 * HOUR, 0.05));
    }
    for i in 0..56i64 {
        let t = epoch(15, 9) + i * 3 * HOUR;
        matches.push(numeric(Element::Temp, t, 58.0));
        matches.push(numeric(Element::DewPt, t, 41.0));
        matches.push(numeric(Element::WindSpeed, t, 9.0));
        matches.push(numeric(Element::WindDir, t, 200.0));
        matches.push(numeric(Element::Sky, t, 30.0));
        matches.push(coded(t, "Chc:RW:-::"));
    }
    matches
}

pub fn spring_point() -> PointContext {
    point_with(spring_matches())
}

pub fn request(profile: Profile) -> FormatRequest {
    FormatRequest {
        profile,
        units: UnitSystem::English,
        icons: true,
        start: None,
        end: None,
        num_days: 7,
        include: None,
        exclude: Vec::new(),
        creation_epoch: epoch(15, 10),
    }
}
