//! Document orchestration: plans the window per point, allocates rows,
//! registers time layouts and assembles the parameter blocks that the
//! markup emitter serializes.

use slog::{warn, Logger};

use crate::dominant::DominantWeather;
use crate::elements::{format_value, Element, UnitSystem};
use crate::layout::{
    attach_period_names, day_base_date, issuance_type, period_rows, summary_max_min_rows,
    time_series_rows, LayoutRegistry,
};
use crate::markup::{Document, Parameter, ParameterBody, PointBlock};
use crate::rows::allocate_rows;
use crate::solar;
use crate::store::{Match, MatchStore};
use crate::summary::{build_periods, populate_periods, spread_pop, PeriodWindow};
use crate::timeutil::{add_days, utc_iso, PointClock, HOUR};
use crate::weather::parse_ugly;
use crate::window::{plan_window, Profile, Window};
use crate::{phrase, Error};

/// Elements the derived-icon chain cannot do without. A document-wide icon
/// request is cleared when any of these has zero in-window rows.
const ICON_PREREQUISITES: [Element; 5] = [
    Element::Temp,
    Element::WindSpeed,
    Element::Sky,
    Element::Weather,
    Element::Pop12,
];

const GLANCE_ELEMENTS: [Element; 4] = [
    Element::MaxT,
    Element::MinT,
    Element::Sky,
    Element::Weather,
];

const SUMMARY_ELEMENTS: [Element; 4] = [
    Element::MaxT,
    Element::MinT,
    Element::Pop12,
    Element::Weather,
];

/// One forecast point with its probed matches.
#[derive(Debug)]
pub struct PointContext {
    pub latitude: f64,
    pub longitude: f64,
    pub clock: PointClock,
    pub store: MatchStore,
}

/// Everything one invocation needs to build a document.
#[derive(Debug)]
pub struct FormatRequest {
    pub profile: Profile,
    pub units: UnitSystem,
    pub icons: bool,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub num_days: u32,
    pub include: Option<Vec<Element>>,
    pub exclude: Vec<Element>,
    pub creation_epoch: i64,
}

impl FormatRequest {
    fn wants(&self, element: Element) -> bool {
        if self.exclude.contains(&element) {
            return false;
        }
        match &self.include {
            Some(list) => list.contains(&element),
            None => true,
        }
    }
}

/// Build the complete document model for all points.
pub fn build_document(
    req: &FormatRequest,
    points: &[PointContext],
    log: &Logger,
) -> Result<Document, Error> {
    if points.iter().all(|p| p.store.is_empty()) {
        return Err(Error::EmptyMatches);
    }

    let mut windows = Vec::with_capacity(points.len());
    for point in points {
        windows.push(plan_window(
            req.profile,
            req.start,
            req.end,
            req.num_days,
            &point.clock,
            &point.store,
        )?);
    }

    // Icon inclusion is a document-wide decision: any point missing an
    // icon-prerequisite element clears the flag for everyone.
    let mut icons = req.icons;
    if icons {
        'outer: for (point, window) in points.iter().zip(&windows) {
            for element in ICON_PREREQUISITES {
                let info = allocate_rows(&point.store, element, window, &point.clock);
                if info.formatted_rows() == 0 {
                    warn!(
                        log,
                        "icon generation disabled, prerequisite element has no in-window rows";
                        "element" => element.ndfd_name()
                    );
                    icons = false;
                    break 'outer;
                }
            }
        }
    }

    let mut registry = LayoutRegistry::new();
    let mut blocks = Vec::with_capacity(points.len());
    for (i, (point, window)) in points.iter().zip(&windows).enumerate() {
        let parameters = if req.profile.is_summary() {
            summary_parameters(req, point, window, icons, &mut registry)?
        } else {
            raw_parameters(req, point, window, icons, &mut registry)?
        };
        blocks.push(PointBlock {
            key: format!("point{}", i + 1),
            latitude: point.latitude,
            longitude: point.longitude,
            parameters,
        });
    }

    Ok(Document {
        profile: req.profile,
        creation_date: utc_iso(req.creation_epoch),
        layouts: registry.into_layouts(),
        points: blocks,
    })
}

fn in_window<'a>(store: &'a MatchStore, element: Element, window: &Window, clock: &PointClock) -> &'a [Match] {
    let info = allocate_rows(store, element, window, clock);
    let matches = store.get(element);
    if info.formatted_rows() == 0 {
        return &[];
    }
    &matches[info.skip_beg..info.total - info.skip_end]
}

fn parameter_for(
    element: Element,
    units: UnitSystem,
    layout_key: String,
    body: ParameterBody,
) -> Parameter {
    let (tag, type_attr) = element.xml_tag();
    Parameter {
        tag,
        type_attr,
        units: element.units(units),
        layout_key,
        display_name: element.display_name(),
        body,
    }
}

/// Time-series and glance parameters: raw values at native cadence.
fn raw_parameters(
    req: &FormatRequest,
    point: &PointContext,
    window: &Window,
    icons: bool,
    registry: &mut LayoutRegistry,
) -> Result<Vec<Parameter>, Error> {
    let elements: Vec<Element> = match req.profile {
        Profile::Glance => GLANCE_ELEMENTS
            .iter()
            .copied()
            .filter(|e| !req.exclude.contains(e))
            .collect(),
        _ => Element::ALL
            .iter()
            .copied()
            .filter(|e| req.wants(*e))
            .collect(),
    };

    let current_hour = point.clock.local_hour(req.creation_epoch);
    let mut parameters = Vec::new();
    for element in elements {
        let matches = in_window(&point.store, element, window, &point.clock);
        if matches.is_empty() {
            continue;
        }
        let period = point.store.period_hours(element);
        let mut rows = time_series_rows(element, matches, period, &point.clock)?;
        // Labels only make sense on half-day-or-longer rows.
        if req.profile.wants_period_names() && period >= 12 {
            let first_hour = point.clock.local_hour(rows[0].start_epoch);
            let issuance = issuance_type(Some(element), period, first_hour, current_hour);
            attach_period_names(&mut rows, issuance, &point.clock);
        }
        let key = registry.register(period, rows);

        let body = if element == Element::Weather {
            ParameterBody::Weather(
                matches
                    .iter()
                    .map(|m| m.value.coded().map(parse_ugly).unwrap_or_default())
                    .collect(),
            )
        } else {
            ParameterBody::Values(
                matches
                    .iter()
                    .map(|m| {
                        m.value
                            .number()
                            .map(|v| format_value(element, element.convert(v, req.units)))
                    })
                    .collect(),
            )
        };
        let param = parameter_for(element, req.units, key.clone(), body);
        parameters.push(param);

        if element == Element::Weather && icons {
            let icon_rows = matches
                .iter()
                .map(|m| raw_row_icon(point, m))
                .collect();
            parameters.push(Parameter {
                tag: "conditions-icon",
                type_attr: "forecast-NWS",
                units: None,
                layout_key: key,
                display_name: "Conditions Icons",
                body: ParameterBody::Icons(icon_rows),
            });
        }
    }
    Ok(parameters)
}

/// Icon for one raw weather row: the summary composer run on a degenerate
/// single-instant period classified day/night by solar elevation.
fn raw_row_icon(point: &PointContext, m: &Match) -> Option<String> {
    let groups = m.value.coded().map(parse_ugly).unwrap_or_default();
    let mut period = PeriodWindow {
        start: m.valid_time,
        end: m.valid_time,
        daytime: solar::is_daytime(point.latitude, point.longitude, m.valid_time),
        pop: spread_pop(&point.store, m.valid_time),
        weather: DominantWeather {
            groups,
            valid_time: Some(m.valid_time),
            fog_fraction: 0.0,
        },
        ..PeriodWindow::default()
    };
    period.max_temp = sample_at(&point.store, Element::Temp, m.valid_time);
    period.max_wind_speed = sample_at(&point.store, Element::WindSpeed, m.valid_time);
    period.wind_dir_at_max = sample_at(&point.store, Element::WindDir, m.valid_time);
    if let Some(sky) = sample_at(&point.store, Element::Sky, m.valid_time) {
        period.sky.observe(sky, 0);
    }
    phrase::compose(&period, 0, &point.clock).map(|pi| pi.icon)
}

fn sample_at(store: &MatchStore, element: Element, valid_time: i64) -> Option<f64> {
    store
        .get(element)
        .iter()
        .find(|m| m.valid_time == valid_time)
        .and_then(|m| m.value.number())
}

/// 12-hourly and 24-hourly parameters: the derivation pipeline.
fn summary_parameters(
    req: &FormatRequest,
    point: &PointContext,
    window: &Window,
    icons: bool,
    registry: &mut LayoutRegistry,
) -> Result<Vec<Parameter>, Error> {
    let clock = &point.clock;
    let store = &point.store;
    let period_hours: i64 = if req.profile == Profile::TwentyFourHourly {
        24
    } else {
        12
    };
    let current_hour = clock.local_hour(req.creation_epoch);

    let mut periods = build_periods(window, period_hours);
    populate_periods(&mut periods, store);

    // The summary element set is fixed; the variable filter only shapes
    // the raw profiles.
    let mut parameters = Vec::new();
    for element in SUMMARY_ELEMENTS {
        match element {
            Element::MaxT | Element::MinT => {
                let mut rows = summary_max_min_rows(element, window, clock)?;
                let first_hour = clock.local_hour(rows[0].start_epoch);
                let issuance = issuance_type(Some(element), 24, first_hour, current_hour);
                attach_period_names(&mut rows, issuance, clock);
                let windows = max_min_windows(element, window, clock)?;
                let key = registry.register(24, rows);
                let values = value_per_window(store, element, &windows, 24, req.units);
                parameters.push(parameter_for(element, req.units, key, ParameterBody::Values(values)));
            }
            Element::Pop12 => {
                let slots: Vec<(i64, i64)> = (0..window.num_days as i64 * 2)
                    .map(|i| {
                        let start = window.start + i * 12 * HOUR;
                        (start, start + 12 * HOUR)
                    })
                    .collect();
                let mut rows = period_rows(&slots, true, clock);
                let first_hour = clock.local_hour(rows[0].start_epoch);
                let issuance = issuance_type(None, 12, first_hour, current_hour);
                attach_period_names(&mut rows, issuance, clock);
                let key = registry.register(12, rows);
                let values = value_per_window(store, element, &slots, 12, req.units);
                parameters.push(parameter_for(element, req.units, key, ParameterBody::Values(values)));
            }
            Element::Weather => {
                // The by-day product indexes weather and icons against the
                // overnight extreme's 18:00-to-06:00 rows; the half-day
                // profile gets its own period layout.
                let mut rows = if period_hours >= 24 {
                    summary_max_min_rows(Element::MinT, window, clock)?
                } else {
                    let spans: Vec<(i64, i64)> =
                        periods.iter().map(|p| (p.start, p.end)).collect();
                    period_rows(&spans, true, clock)
                };
                let first_hour = clock.local_hour(rows[0].start_epoch);
                let issuance = issuance_type(None, period_hours, first_hour, current_hour);
                attach_period_names(&mut rows, issuance, clock);
                let key = registry.register(period_hours, rows);

                let composed: Vec<Option<phrase::PhraseIcon>> = periods
                    .iter()
                    .enumerate()
                    .map(|(i, p)| phrase::compose(p, i, clock))
                    .collect();
                parameters.push(parameter_for(
                    element,
                    req.units,
                    key.clone(),
                    ParameterBody::WeatherSummary(
                        composed
                            .iter()
                            .map(|c| c.as_ref().map(|pi| pi.phrase.clone()))
                            .collect(),
                    ),
                ));
                if icons {
                    parameters.push(Parameter {
                        tag: "conditions-icon",
                        type_attr: "forecast-NWS",
                        units: None,
                        layout_key: key,
                        display_name: "Conditions Icons",
                        body: ParameterBody::Icons(
                            composed
                                .into_iter()
                                .map(|c| c.map(|pi| pi.icon))
                                .collect(),
                        ),
                    });
                }
            }
            _ => {}
        }
    }
    Ok(parameters)
}

/// The daytime (06-18) or overnight (18-06) windows the daily extremes
/// are picked from, one per day.
fn max_min_windows(
    element: Element,
    window: &Window,
    clock: &PointClock,
) -> Result<Vec<(i64, i64)>, Error> {
    let base = match element {
        Element::MaxT => day_base_date(window, clock),
        _ => clock.local_date(window.start),
    };
    let mut windows = Vec::with_capacity(window.num_days as usize);
    for d in 0..window.num_days as i64 {
        let date = add_days(base, d);
        windows.push(match element {
            Element::MaxT => (clock.wall_epoch(date, 6)?, clock.wall_epoch(date, 18)?),
            _ => (
                clock.wall_epoch(date, 18)?,
                clock.wall_epoch(add_days(date, 1), 6)?,
            ),
        });
    }
    Ok(windows)
}

/// One formatted value per window, nil where no match lands in it. A match
/// lands by its half-period-shifted midpoint.
fn value_per_window(
    store: &MatchStore,
    element: Element,
    windows: &[(i64, i64)],
    period_hours: i64,
    units: UnitSystem,
) -> Vec<Option<String>> {
    let shift = period_hours * HOUR / 2;
    windows
        .iter()
        .map(|&(start, end)| {
            store
                .get(element)
                .iter()
                .find(|m| {
                    let midpoint = m.valid_time - shift;
                    midpoint >= start && midpoint < end
                })
                .and_then(|m| m.value.number())
                .map(|v| format_value(element, element.convert(v, units)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MatchValue;
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

    fn logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn numeric(element: Element, valid_time: i64, value: f64) -> Match {
        Match {
            element,
            valid_time,
            value: MatchValue::Number(value),
        }
    }

    fn full_point() -> PointContext {
        let mut matches = Vec::new();
        for d in 0..7u8 {
            matches.push(numeric(Element::MaxT, epoch(15 + d, 19), 70.0 + d as f64));
            matches.push(numeric(Element::MinT, epoch(16 + d, 7), 48.0 + d as f64));
        }
        for i in 0..14i64 {
            matches.push(numeric(
                Element::Pop12,
                epoch(15, 18) + i * 12 * HOUR,
                30.0,
            ));
        }
        for i in 0..56i64 {
            let t = epoch(15, 9) + i * 3 * HOUR;
            matches.push(numeric(Element::Temp, t, 60.0));
            matches.push(numeric(Element::WindSpeed, t, 8.0));
            matches.push(numeric(Element::WindDir, t, 180.0));
            matches.push(numeric(Element::Sky, t, 25.0));
            matches.push(Match {
                element: Element::Weather,
                valid_time: t,
                value: MatchValue::Coded("Chc:RW:-::".to_string()),
            });
        }
        PointContext {
            latitude: 38.99,
            longitude: -77.02,
            clock: clock(),
            store: MatchStore::new(matches),
        }
    }

    fn request(profile: Profile) -> FormatRequest {
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

    #[test]
    fn empty_store_is_rejected() {
        let point = PointContext {
            latitude: 38.99,
            longitude: -77.02,
            clock: clock(),
            store: MatchStore::new(Vec::new()),
        };
        let err = build_document(&request(Profile::TimeSeries), &[point], &logger()).unwrap_err();
        assert!(matches!(err, Error::EmptyMatches));
    }

    #[test]
    fn twelve_hourly_shapes() {
        let doc =
            build_document(&request(Profile::TwelveHourly), &[full_point()], &logger()).unwrap();
        assert_eq!(doc.points.len(), 1);
        let params = &doc.points[0].parameters;
        // MaxT, MinT, PoP, weather, icons.
        assert_eq!(params.len(), 5);

        let weather = params
            .iter()
            .find(|p| p.tag == "weather")
            .expect("weather block");
        match &weather.body {
            ParameterBody::WeatherSummary(rows) => assert_eq!(rows.len(), 14),
            other => panic!("unexpected body {other:?}"),
        }

        // Every referenced layout key was registered.
        for p in params {
            assert!(
                doc.layouts.iter().any(|l| l.key == p.layout_key),
                "dangling layout key {}",
                p.layout_key
            );
        }

        // Layout triples are unique.
        for (i, a) in doc.layouts.iter().enumerate() {
            for b in &doc.layouts[i + 1..] {
                let same = a.period_hours == b.period_hours
                    && a.rows.len() == b.rows.len()
                    && a.rows.first().map(|r| &r.start_iso) == b.rows.first().map(|r| &r.start_iso);
                assert!(!same, "duplicate layout triple {} {}", a.key, b.key);
            }
        }
    }

    #[test]
    fn max_min_value_counts_match_days() {
        let doc =
            build_document(&request(Profile::TwentyFourHourly), &[full_point()], &logger())
                .unwrap();
        let params = &doc.points[0].parameters;
        let maxt = params
            .iter()
            .find(|p| p.tag == "temperature" && p.type_attr == "maximum")
            .expect("maxt block");
        match &maxt.body {
            ParameterBody::Values(values) => {
                assert_eq!(values.len(), 7);
                assert_eq!(values[0].as_deref(), Some("70"));
            }
            other => panic!("unexpected body {other:?}"),
        }
        // 24-hourly weather emits one row per day.
        let weather = params.iter().find(|p| p.tag == "weather").unwrap();
        match &weather.body {
            ParameterBody::WeatherSummary(rows) => assert_eq!(rows.len(), 7),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn missing_prerequisite_clears_icons() {
        let mut point = full_point();
        // Strip wind speed entirely.
        let kept: Vec<Match> = Element::ALL
            .iter()
            .filter(|e| **e != Element::WindSpeed)
            .flat_map(|e| point.store.get(*e).to_vec())
            .collect();
        point.store = MatchStore::new(kept);
        let doc =
            build_document(&request(Profile::TwelveHourly), &[point], &logger()).unwrap();
        assert!(!doc.points[0]
            .parameters
            .iter()
            .any(|p| p.tag == "conditions-icon"));
    }

    #[test]
    fn time_series_emits_raw_cadence() {
        let doc =
            build_document(&request(Profile::TimeSeries), &[full_point()], &logger()).unwrap();
        let params = &doc.points[0].parameters;
        let temp = params
            .iter()
            .find(|p| p.tag == "temperature" && p.type_attr == "hourly")
            .expect("temp block");
        match &temp.body {
            ParameterBody::Values(values) => assert_eq!(values.len(), 56),
            other => panic!("unexpected body {other:?}"),
        }
        // Time-series layouts carry no period names.
        assert!(doc
            .layouts
            .iter()
            .all(|l| l.rows.iter().all(|r| r.period_name.is_none())));
        // Icons ride the weather layout.
        let weather = params.iter().find(|p| p.tag == "weather").unwrap();
        let icons = params.iter().find(|p| p.tag == "conditions-icon").unwrap();
        assert_eq!(weather.layout_key, icons.layout_key);
    }

    #[test]
    fn glance_restricts_the_element_set() {
        let doc = build_document(&request(Profile::Glance), &[full_point()], &logger()).unwrap();
        let params = &doc.points[0].parameters;
        let tags: Vec<&str> = params.iter().map(|p| p.tag).collect();
        assert!(tags.contains(&"temperature"));
        assert!(tags.contains(&"cloud-amount"));
        assert!(tags.contains(&"weather"));
        assert!(!tags.contains(&"wind-speed"));
        // Glance layouts are labelled.
        assert!(doc
            .layouts
            .iter()
            .any(|l| l.rows.iter().any(|r| r.period_name.is_some())));
    }

    #[test]
    fn element_filter_is_honored() {
        let mut req = request(Profile::TimeSeries);
        req.include = Some(vec![Element::Temp]);
        let doc = build_document(&req, &[full_point()], &logger()).unwrap();
        let params = &doc.points[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].tag, "temperature");
    }
}
