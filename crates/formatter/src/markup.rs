//! DWML document serialization.
//!
//! The writer is a small push-down XML builder over a String buffer with
//! attribute escaping; the render pass walks a fully-computed document
//! model so no derivation happens during emission.

use std::fmt::Write as _;

use crate::tables::{
    coverage_phrase, intensity_phrase, type_phrase, visibility_phrase, ICON_BASE_URL,
};
use crate::layout::TimeLayout;
use crate::weather::{Coverage, WxGroup, WxType};
use crate::window::Profile;

const SCHEMA_LOCATION: &str =
    "http://www.nws.noaa.gov/forecasts/xml/DWMLgen/schema/DWML.xsd";
const MORE_INFORMATION: &str = "http://www.nws.noaa.gov/forecasts/xml/";
const PRODUCTION_CENTER: &str = "Meteorological Development Laboratory";
const SUB_CENTER: &str = "Product Generation Branch";

fn escape(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// Minimal indenting XML builder.
pub struct XmlWriter {
    buf: String,
    stack: Vec<&'static str>,
}

impl XmlWriter {
    pub fn new() -> Self {
        XmlWriter {
            buf: String::from("<?xml version=\"1.0\"?>\n"),
            stack: Vec::new(),
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.buf.push_str("  ");
        }
    }

    fn write_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            escape(value, &mut self.buf);
            self.buf.push('"');
        }
    }

    pub fn open(&mut self, tag: &'static str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.write_attrs(attrs);
        self.buf.push_str(">\n");
        self.stack.push(tag);
    }

    pub fn close(&mut self) {
        if let Some(tag) = self.stack.pop() {
            self.indent();
            let _ = write!(self.buf, "</{tag}>\n");
        }
    }

    /// A leaf element with text content.
    pub fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.write_attrs(attrs);
        self.buf.push('>');
        escape(text, &mut self.buf);
        let _ = write!(self.buf, "</{tag}>\n");
    }

    /// A self-closing element.
    pub fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.write_attrs(attrs);
        self.buf.push_str("/>\n");
    }

    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.close();
        }
        self.buf
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        XmlWriter::new()
    }
}

/// One parameter block's payload.
#[derive(Debug, Clone)]
pub enum ParameterBody {
    /// Formatted numeric values; `None` emits nil.
    Values(Vec<Option<String>>),
    /// Per-row group sets for the time-series weather block; an empty set
    /// emits a bare `<weather-conditions/>`.
    Weather(Vec<Vec<WxGroup>>),
    /// Per-period summary phrases; `None` emits a nil-valued row.
    WeatherSummary(Vec<Option<String>>),
    /// Per-row icon filenames, resolved against the icon base URL.
    Icons(Vec<Option<String>>),
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub tag: &'static str,
    pub type_attr: &'static str,
    pub units: Option<&'static str>,
    pub layout_key: String,
    pub display_name: &'static str,
    pub body: ParameterBody,
}

#[derive(Debug, Clone)]
pub struct PointBlock {
    pub key: String,
    pub latitude: f64,
    pub longitude: f64,
    pub parameters: Vec<Parameter>,
}

/// The fully-computed document handed to the renderer.
#[derive(Debug)]
pub struct Document {
    pub profile: Profile,
    pub creation_date: String,
    pub layouts: Vec<TimeLayout>,
    pub points: Vec<PointBlock>,
}

fn summarization(profile: Profile) -> &'static str {
    match profile {
        Profile::TimeSeries | Profile::Glance => "none",
        Profile::TwelveHourly => "12hourly",
        Profile::TwentyFourHourly => "24hourly",
    }
}

fn render_head(w: &mut XmlWriter, doc: &Document) {
    w.open("head", &[]);
    w.open(
        "product",
        &[
            ("srsName", "WGS 1984"),
            ("concise-name", doc.profile.product_name()),
            ("operational-mode", "developmental"),
        ],
    );
    w.leaf("title", &[], doc.profile.title());
    w.leaf("field", &[], "meteorological");
    w.leaf("category", &[], "forecast");
    w.leaf(
        "creation-date",
        &[("refresh-frequency", "PT1H")],
        &doc.creation_date,
    );
    w.close();
    w.open("source", &[]);
    w.leaf("more-information", &[], MORE_INFORMATION);
    // production-center is mixed content: its text runs straight into the
    // sub-center child.
    w.indent();
    let _ = write!(
        w.buf,
        "<production-center>{PRODUCTION_CENTER}<sub-center>{SUB_CENTER}</sub-center></production-center>\n"
    );
    w.close();
    w.close();
}

fn render_layouts(w: &mut XmlWriter, doc: &Document) {
    for layout in &doc.layouts {
        w.open(
            "time-layout",
            &[
                ("time-coordinate", "local"),
                ("summarization", summarization(doc.profile)),
            ],
        );
        w.leaf("layout-key", &[], &layout.key);
        for row in &layout.rows {
            match &row.period_name {
                Some(name) => w.leaf(
                    "start-valid-time",
                    &[("period-name", name.as_str())],
                    &row.start_iso,
                ),
                None => w.leaf("start-valid-time", &[], &row.start_iso),
            }
            if let Some(end) = &row.end_iso {
                w.leaf("end-valid-time", &[], end);
            }
        }
        w.close();
    }
}

fn attr_or_none(phrase: &'static str) -> &'static str {
    if phrase.is_empty() {
        "none"
    } else {
        phrase
    }
}

fn render_weather_row(w: &mut XmlWriter, groups: &[WxGroup]) {
    let carries_weather = groups
        .iter()
        .any(|g| g.wx_type != WxType::None || g.coverage != Coverage::None);
    if !carries_weather {
        w.empty("weather-conditions", &[]);
        return;
    }
    w.open("weather-conditions", &[]);
    for group in groups {
        let mut attrs: Vec<(&str, &str)> = vec![
            ("coverage", attr_or_none(coverage_phrase(group.coverage))),
            ("intensity", attr_or_none(intensity_phrase(group.intensity))),
        ];
        if group.additive_or {
            attrs.push(("additive", "or"));
        }
        attrs.push(("weather-type", attr_or_none(type_phrase(group.wx_type))));
        if !group.qualifiers.is_empty() {
            attrs.push(("qualifier", group.qualifiers.as_str()));
        } else {
            attrs.push(("qualifier", "none"));
        }

        match group
            .visibility
            .as_deref()
            .and_then(visibility_phrase)
        {
            Some(vis) => {
                w.open("value", &attrs);
                w.leaf("visibility", &[("units", "statute miles")], vis);
                w.close();
            }
            None => w.empty("value", &attrs),
        }
    }
    w.close();
}

fn render_parameter(w: &mut XmlWriter, param: &Parameter) {
    let mut attrs: Vec<(&str, &str)> = Vec::new();
    if !param.type_attr.is_empty() {
        attrs.push(("type", param.type_attr));
    }
    if let Some(units) = param.units {
        attrs.push(("units", units));
    }
    attrs.push(("time-layout", param.layout_key.as_str()));
    w.open(param.tag, &attrs);
    w.leaf("name", &[], param.display_name);

    match &param.body {
        ParameterBody::Values(values) => {
            for value in values {
                match value {
                    Some(v) => w.leaf("value", &[], v),
                    None => w.empty("value", &[("xsi:nil", "true")]),
                }
            }
        }
        ParameterBody::Weather(rows) => {
            for groups in rows {
                render_weather_row(w, groups);
            }
        }
        ParameterBody::WeatherSummary(rows) => {
            for phrase in rows {
                match phrase {
                    Some(p) => {
                        w.empty("weather-conditions", &[("weather-summary", p.as_str())])
                    }
                    None => w.empty("weather-conditions", &[("xsi:nil", "true")]),
                }
            }
        }
        ParameterBody::Icons(rows) => {
            for icon in rows {
                match icon {
                    Some(file) => {
                        let url = format!("{ICON_BASE_URL}{file}");
                        w.leaf("icon-link", &[], &url);
                    }
                    None => w.empty("icon-link", &[("xsi:nil", "true")]),
                }
            }
        }
    }
    w.close();
}

/// Serialize the whole document.
pub fn render(doc: &Document) -> String {
    let mut w = XmlWriter::new();
    w.open(
        "dwml",
        &[
            ("version", "1.0"),
            ("xmlns:xsd", "http://www.w3.org/2001/XMLSchema"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xsi:noNamespaceSchemaLocation", SCHEMA_LOCATION),
        ],
    );
    render_head(&mut w, doc);

    w.open("data", &[]);
    for point in &doc.points {
        w.open("location", &[]);
        w.leaf("location-key", &[], &point.key);
        w.empty(
            "point",
            &[
                ("latitude", &format!("{:.2}", point.latitude)),
                ("longitude", &format!("{:.2}", point.longitude)),
            ],
        );
        w.close();
    }
    render_layouts(&mut w, doc);
    for point in &doc.points {
        w.open(
            "parameters",
            &[("applicable-location", point.key.as_str())],
        );
        for param in &point.parameters {
            render_parameter(&mut w, param);
        }
        w.close();
    }
    w.close();
    w.close();
    w.finish()
}
