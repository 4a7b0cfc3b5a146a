//! Prober input decoding: one JSON document naming the points and their
//! probed matches, validated into per-point match stores.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use slog::{warn, Logger};

use crate::elements::Element;
use crate::product::PointContext;
use crate::store::{Match, MatchStore, MatchValue};
use crate::timeutil::PointClock;
use crate::Error;

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub points: Vec<PointInput>,
    #[serde(default)]
    pub matches: Vec<MatchInput>,
}

#[derive(Debug, Deserialize)]
pub struct PointInput {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub observes_dst: bool,
    #[serde(default = "default_in_sector")]
    pub in_sector: bool,
}

fn default_in_sector() -> bool {
    true
}

/// One probed value on the wire. `value` and `coded` are mutually
/// exclusive by convention; a row carrying neither decodes as missing.
#[derive(Debug, Deserialize)]
pub struct MatchInput {
    pub point: usize,
    pub element: Element,
    pub valid_time: i64,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub coded: Option<String>,
}

impl MatchInput {
    fn into_match(self) -> Match {
        let value = match (self.value, self.coded) {
            (Some(v), _) => MatchValue::Number(v),
            (None, Some(c)) => MatchValue::Coded(c),
            (None, None) => MatchValue::Missing,
        };
        Match {
            element: self.element,
            valid_time: self.valid_time,
            value,
        }
    }
}

/// Read and decode the input document from a file, or stdin when no path
/// is given.
pub fn load(path: Option<&Path>, log: &Logger) -> Result<Vec<PointContext>, Error> {
    let doc: InputDoc = match path {
        Some(p) => serde_json::from_reader(BufReader::new(File::open(p)?))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            serde_json::from_str(&buf)?
        }
    };
    decode(doc, log)
}

/// Validate the document into per-point contexts. Out-of-sector points are
/// skipped with a warning; a document with none left is rejected.
pub fn decode(doc: InputDoc, log: &Logger) -> Result<Vec<PointContext>, Error> {
    if doc.points.is_empty() {
        return Err(Error::Input("input document names no points".to_string()));
    }

    // Map original point indices to kept slots, dropping out-of-sector
    // points up front.
    let mut slots: Vec<Option<usize>> = Vec::with_capacity(doc.points.len());
    let mut kept: Vec<&PointInput> = Vec::new();
    for (i, point) in doc.points.iter().enumerate() {
        if !(-90.0..=90.0).contains(&point.latitude)
            || !(-180.0..=180.0).contains(&point.longitude)
        {
            return Err(Error::Input(format!(
                "point {i} has out-of-range coordinates ({}, {})",
                point.latitude, point.longitude
            )));
        }
        if !(-12..=14).contains(&point.utc_offset_hours) {
            return Err(Error::Input(format!(
                "point {i} has an impossible UTC offset of {} hours",
                point.utc_offset_hours
            )));
        }
        if point.in_sector {
            slots.push(Some(kept.len()));
            kept.push(point);
        } else {
            warn!(
                log,
                "skipping point outside every supported forecast sector";
                "latitude" => point.latitude,
                "longitude" => point.longitude
            );
            slots.push(None);
        }
    }
    if kept.is_empty() {
        return Err(Error::NoPointsInSector);
    }

    let mut per_point: Vec<Vec<Match>> = vec![Vec::new(); kept.len()];
    for m in doc.matches {
        let Some(slot) = slots.get(m.point).copied() else {
            return Err(Error::Input(format!(
                "match references unknown point index {}",
                m.point
            )));
        };
        if let Some(slot) = slot {
            per_point[slot].push(m.into_match());
        }
    }

    Ok(kept
        .into_iter()
        .zip(per_point)
        .map(|(point, matches)| PointContext {
            latitude: point.latitude,
            longitude: point.longitude,
            clock: PointClock::new(point.utc_offset_hours, point.observes_dst),
            store: MatchStore::new(matches),
        })
        .collect())
}
