//! Match store: the sorted sequence of probed values for one point, keyed
//! by (element, valid-time), plus the per-element cadence resolver.

use std::collections::BTreeMap;

use crate::elements::Element;
use crate::timeutil::HOUR;

/// Kind of one probed value.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchValue {
    Number(f64),
    Coded(String),
    Missing,
}

impl MatchValue {
    pub fn number(&self) -> Option<f64> {
        match self {
            MatchValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn coded(&self) -> Option<&str> {
        match self {
            MatchValue::Coded(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, MatchValue::Missing)
    }
}

/// One probed value. The valid-time marks the *end* of the period the
/// value covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub element: Element,
    pub valid_time: i64,
    pub value: MatchValue,
}

/// Sorted per-point store of matches; produced once per document build and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct MatchStore {
    by_element: BTreeMap<Element, Vec<Match>>,
}

impl MatchStore {
    /// Build the store, sorting element-ascending then valid-time ascending.
    pub fn new(mut matches: Vec<Match>) -> Self {
        matches.sort_by(|a, b| {
            a.element
                .cmp(&b.element)
                .then(a.valid_time.cmp(&b.valid_time))
        });
        let mut by_element: BTreeMap<Element, Vec<Match>> = BTreeMap::new();
        for m in matches {
            by_element.entry(m.element).or_default().push(m);
        }
        MatchStore { by_element }
    }

    pub fn is_empty(&self) -> bool {
        self.by_element.values().all(|v| v.is_empty())
    }

    pub fn get(&self, element: Element) -> &[Match] {
        self.by_element
            .get(&element)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.by_element.keys().copied()
    }

    pub fn earliest_valid_time(&self) -> Option<i64> {
        self.by_element
            .values()
            .filter_map(|v| v.first().map(|m| m.valid_time))
            .min()
    }

    pub fn latest_valid_time(&self) -> Option<i64> {
        self.by_element
            .values()
            .filter_map(|v| v.last().map(|m| m.valid_time))
            .max()
    }

    /// Native period of an element in hours, from two successive
    /// valid-times; falls back to the per-kind default with fewer than two
    /// rows. Period is a property of the element's cadence, not of any one
    /// value.
    pub fn period_hours(&self, element: Element) -> i64 {
        let rows = self.get(element);
        if rows.len() >= 2 {
            let delta = (rows[1].valid_time - rows[0].valid_time) / HOUR;
            if delta > 0 {
                return delta;
            }
        }
        element.default_period_hours()
    }
}
