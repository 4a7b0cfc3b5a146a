//! The closed NDFD element enumeration and its per-element attributes:
//! display names, DWML tag/type pairs, units in both unit systems, default
//! cadences and value conversions.

use serde::{Deserialize, Serialize};

/// Unit system requested by the caller. English is the NDFD native system;
/// derivation thresholds always evaluate on english values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    English,
    Metric,
}

impl UnitSystem {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "e" | "english" => Some(UnitSystem::English),
            "m" | "metric" => Some(UnitSystem::Metric),
            _ => None,
        }
    }
}

/// One NDFD forecast quantity. The set is closed; anything else in the
/// input document is a decode error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Element {
    MaxT,
    MinT,
    #[serde(rename = "PoP12", alias = "Pop12")]
    Pop12,
    Temp,
    WindDir,
    WindSpeed,
    WindGust,
    DewPt,
    Sky,
    #[serde(rename = "QPF", alias = "Qpf")]
    Qpf,
    Snow,
    Weather,
    WaveHeight,
    ApparentT,
    RelHum,
    WindIncProb34,
    WindIncProb50,
    WindIncProb64,
    WindCumProb34,
    WindCumProb50,
    WindCumProb64,
}

impl Element {
    pub const ALL: [Element; 21] = [
        Element::MaxT,
        Element::MinT,
        Element::Pop12,
        Element::Temp,
        Element::WindDir,
        Element::WindSpeed,
        Element::WindGust,
        Element::DewPt,
        Element::Sky,
        Element::Qpf,
        Element::Snow,
        Element::Weather,
        Element::WaveHeight,
        Element::ApparentT,
        Element::RelHum,
        Element::WindIncProb34,
        Element::WindIncProb50,
        Element::WindIncProb64,
        Element::WindCumProb34,
        Element::WindCumProb50,
        Element::WindCumProb64,
    ];

    /// Lowercase NDFD input name, as used on the CLI element filter.
    pub fn ndfd_name(self) -> &'static str {
        match self {
            Element::MaxT => "maxt",
            Element::MinT => "mint",
            Element::Pop12 => "pop12",
            Element::Temp => "temp",
            Element::WindDir => "wdir",
            Element::WindSpeed => "wspd",
            Element::WindGust => "wgust",
            Element::DewPt => "td",
            Element::Sky => "sky",
            Element::Qpf => "qpf",
            Element::Snow => "snow",
            Element::Weather => "wx",
            Element::WaveHeight => "waveh",
            Element::ApparentT => "appt",
            Element::RelHum => "rh",
            Element::WindIncProb34 => "incw34",
            Element::WindIncProb50 => "incw50",
            Element::WindIncProb64 => "incw64",
            Element::WindCumProb34 => "cumw34",
            Element::WindCumProb50 => "cumw50",
            Element::WindCumProb64 => "cumw64",
        }
    }

    pub fn from_ndfd_name(name: &str) -> Option<Element> {
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.ndfd_name() == name)
    }

    /// Display name placed in the parameter block's `<name>` child.
    pub fn display_name(self) -> &'static str {
        match self {
            Element::MaxT => "Daily Maximum Temperature",
            Element::MinT => "Daily Minimum Temperature",
            Element::Pop12 => "12 Hourly Probability of Precipitation",
            Element::Temp => "Temperature",
            Element::WindDir => "Wind Direction",
            Element::WindSpeed => "Wind Speed",
            Element::WindGust => "Wind Speed Gust",
            Element::DewPt => "Dew Point Temperature",
            Element::Sky => "Cloud Cover Amount",
            Element::Qpf => "Liquid Precipitation Amount",
            Element::Snow => "Snow Amount",
            Element::Weather => "Weather Type, Coverage, and Intensity",
            Element::WaveHeight => "Wave Height",
            Element::ApparentT => "Apparent Temperature",
            Element::RelHum => "Relative Humidity",
            Element::WindIncProb34 => {
                "Probability of a Tropical Cyclone Wind Speed above 34 Knots (Incremental)"
            }
            Element::WindIncProb50 => {
                "Probability of a Tropical Cyclone Wind Speed above 50 Knots (Incremental)"
            }
            Element::WindIncProb64 => {
                "Probability of a Tropical Cyclone Wind Speed above 64 Knots (Incremental)"
            }
            Element::WindCumProb34 => {
                "Probability of a Tropical Cyclone Wind Speed above 34 Knots (Cumulative)"
            }
            Element::WindCumProb50 => {
                "Probability of a Tropical Cyclone Wind Speed above 50 Knots (Cumulative)"
            }
            Element::WindCumProb64 => {
                "Probability of a Tropical Cyclone Wind Speed above 64 Knots (Cumulative)"
            }
        }
    }

    /// DWML element tag and `type` attribute.
    pub fn xml_tag(self) -> (&'static str, &'static str) {
        match self {
            Element::MaxT => ("temperature", "maximum"),
            Element::MinT => ("temperature", "minimum"),
            Element::Pop12 => ("probability-of-precipitation", "12 hour"),
            Element::Temp => ("temperature", "hourly"),
            Element::WindDir => ("direction", "wind"),
            Element::WindSpeed => ("wind-speed", "sustained"),
            Element::WindGust => ("wind-speed", "gust"),
            Element::DewPt => ("temperature", "dew point"),
            Element::Sky => ("cloud-amount", "total"),
            Element::Qpf => ("precipitation", "liquid"),
            Element::Snow => ("precipitation", "snow"),
            Element::Weather => ("weather", ""),
            Element::WaveHeight => ("waves", "significant"),
            Element::ApparentT => ("temperature", "apparent"),
            Element::RelHum => ("humidity", "relative"),
            Element::WindIncProb34 => ("wind-speed", "incremental34"),
            Element::WindIncProb50 => ("wind-speed", "incremental50"),
            Element::WindIncProb64 => ("wind-speed", "incremental64"),
            Element::WindCumProb34 => ("wind-speed", "cumulative34"),
            Element::WindCumProb50 => ("wind-speed", "cumulative50"),
            Element::WindCumProb64 => ("wind-speed", "cumulative64"),
        }
    }

    /// The `units` attribute, dependent on the requested unit system.
    /// Weather carries no units.
    pub fn units(self, units: UnitSystem) -> Option<&'static str> {
        use Element::*;
        let english = matches!(units, UnitSystem::English);
        match self {
            MaxT | MinT | Temp | DewPt | ApparentT => {
                Some(if english { "Fahrenheit" } else { "Celsius" })
            }
            WindSpeed | WindGust => Some(if english { "knots" } else { "meters/second" }),
            WindDir => Some("degrees true"),
            Sky | Pop12 | RelHum | WindIncProb34 | WindIncProb50 | WindIncProb64
            | WindCumProb34 | WindCumProb50 | WindCumProb64 => Some("percent"),
            Qpf => Some(if english { "inches" } else { "millimeters" }),
            Snow => Some(if english { "inches" } else { "centimeters" }),
            WaveHeight => Some(if english { "feet" } else { "meters" }),
            Weather => None,
        }
    }

    /// Cadence fallback when only one row exists for the element.
    pub fn default_period_hours(self) -> i64 {
        match self {
            Element::MaxT | Element::MinT => 24,
            Element::Pop12 | Element::WaveHeight => 12,
            Element::Qpf | Element::Snow => 6,
            _ => 3,
        }
    }

    /// Elements whose time layouts carry end-valid-time rows.
    pub fn has_end_time(self) -> bool {
        matches!(
            self,
            Element::MaxT | Element::MinT | Element::Pop12 | Element::Qpf | Element::Snow
        )
    }

    /// Convert a raw (english) probed value to the requested unit system.
    pub fn convert(self, value: f64, units: UnitSystem) -> f64 {
        use Element::*;
        if matches!(units, UnitSystem::English) {
            return value;
        }
        match self {
            MaxT | MinT | Temp | DewPt | ApparentT => (value - 32.0) * 5.0 / 9.0,
            WindSpeed | WindGust => value * 0.514444,
            Qpf => value * 25.4,
            Snow => value * 2.54,
            WaveHeight => value * 0.3048,
            _ => value,
        }
    }

    /// Emitted decimal places. Everything is an integer rounded away from
    /// zero except QPF.
    pub fn decimals(self) -> u32 {
        match self {
            Element::Qpf => 2,
            _ => 0,
        }
    }
}

/// Round a value for emission: away from zero for integers, else fixed
/// decimal places.
pub fn format_value(element: Element, value: f64) -> String {
    match element.decimals() {
        0 => {
            let rounded = if value >= 0.0 {
                (value + 0.5).floor()
            } else {
                (value - 0.5).ceil()
            };
            format!("{}", rounded as i64)
        }
        d => format!("{:.*}", d as usize, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_away_from_zero() {
        assert_eq!(format_value(Element::Temp, 71.5), "72");
        assert_eq!(format_value(Element::Temp, -0.5), "-1");
        assert_eq!(format_value(Element::Temp, 2.4), "2");
    }

    #[test]
    fn qpf_keeps_two_decimals() {
        assert_eq!(format_value(Element::Qpf, 0.125), "0.13");
        assert_eq!(format_value(Element::Qpf, 0.0), "0.00");
    }

    #[test]
    fn metric_conversions() {
        let c = Element::Temp.convert(32.0, UnitSystem::Metric);
        assert!(c.abs() < 1e-9);
        assert_eq!(Element::Temp.convert(70.0, UnitSystem::English), 70.0);
    }

    #[test]
    fn ndfd_names_round_trip() {
        for e in Element::ALL {
            assert_eq!(Element::from_ndfd_name(e.ndfd_name()), Some(e));
        }
    }
}
