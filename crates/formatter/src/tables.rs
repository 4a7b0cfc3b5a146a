//! Static English translation inventories for the coded weather tokens,
//! visibility codes, qualifiers and hazards, plus the icon base URL.
//! These are bit-exact lookup tables; no sentence generation happens here.

use crate::weather::{Coverage, Intensity, WxType};

pub use dwmlgen_core::ICON_BASE_URL;

/// English expansion of a coverage token. The sentinel expands to "".
pub fn coverage_phrase(coverage: Coverage) -> &'static str {
    match coverage {
        Coverage::None => "",
        Coverage::Patchy => "patchy",
        Coverage::Areas => "areas of",
        Coverage::Brf => "brief",
        Coverage::Inter => "intermittent",
        Coverage::Pds => "periods of",
        Coverage::Ocnl => "occasional",
        Coverage::Frq => "frequent",
        Coverage::Iso => "isolated",
        Coverage::SChc => "slight chance",
        Coverage::Sct => "scattered",
        Coverage::Chc => "chance",
        Coverage::Num => "numerous",
        Coverage::Lkly => "likely",
        Coverage::Wide => "widespread",
        Coverage::Def => "definitely",
    }
}

/// English expansion of a weather type token.
pub fn type_phrase(wx_type: WxType) -> &'static str {
    match wx_type {
        WxType::None => "",
        WxType::Fog => "fog",
        WxType::BlowingSnow => "blowing snow",
        WxType::BlowingDust => "blowing dust",
        WxType::BlowingSand => "blowing sand",
        WxType::Haze => "haze",
        WxType::Smoke => "smoke",
        WxType::Frost => "frost",
        WxType::VolcanicAsh => "volcanic ash",
        WxType::Drizzle => "drizzle",
        WxType::RainShowers => "rain showers",
        WxType::Rain => "rain",
        WxType::IceCrystals => "ice crystals",
        WxType::IceFog => "ice fog",
        WxType::SnowShowers => "snow showers",
        WxType::Snow => "snow",
        WxType::IcePellets => "ice pellets",
        WxType::FreezingFog => "freezing fog",
        WxType::FreezingSpray => "freezing spray",
        WxType::FreezingDrizzle => "freezing drizzle",
        WxType::FreezingRain => "freezing rain",
        WxType::Thunderstorms => "thunderstorms",
        WxType::WaterSpouts => "water spouts",
    }
}

/// English expansion of an intensity token.
pub fn intensity_phrase(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::None => "",
        Intensity::VeryLight => "very light",
        Intensity::Light => "light",
        Intensity::Moderate => "moderate",
        Intensity::Heavy => "heavy",
    }
}

/// English expansion of a visibility code, in statute miles.
pub fn visibility_phrase(code: &str) -> Option<&'static str> {
    match code {
        "0SM" => Some("0"),
        "1/4SM" => Some("1/4"),
        "1/2SM" => Some("1/2"),
        "3/4SM" => Some("3/4"),
        "1SM" => Some("1"),
        "11/2SM" => Some("1 1/2"),
        "2SM" => Some("2"),
        "21/2SM" => Some("2 1/2"),
        "3SM" => Some("3"),
        "4SM" => Some("4"),
        "5SM" => Some("5"),
        "6SM" => Some("6"),
        "P6SM" => Some("6+"),
        _ => None,
    }
}

/// English expansion of a qualifier token. Unknown tokens pass through
/// unchanged so a new upstream code degrades visibly rather than silently.
pub fn qualifier_phrase(token: &str) -> String {
    match token {
        "Primary" => "highest ranking",
        "Mention" => "include unconditionally",
        "TOR" => "tornado",
        "Dry" => "dry",
        "MX" => "mixture",
        "GW" => "gusty winds",
        "HvyRn" => "heavy rain",
        "DmgW" => "damaging winds",
        "FL" => "frequent lightning",
        "SmA" => "small hail",
        "LgA" => "large hail",
        "OLA" => "outlying areas",
        "OBO" => "on bridges and overpasses",
        "OGA" => "on grassy areas",
        other => return other.to_string(),
    }
    .to_string()
}

/// English expansion of a hazard code.
pub fn hazard_phrase(code: &str) -> Option<&'static str> {
    match code {
        "GL" => Some("gale warning"),
        "HF" => Some("hurricane force wind warning"),
        "HI" => Some("inland hurricane wind warning"),
        "RB" => Some("small craft advisory for rough bar"),
        "SC" => Some("small craft advisory"),
        "SI" => Some("small craft advisory for winds"),
        "SW" => Some("small craft advisory for hazardous seas"),
        "TI" => Some("inland tropical storm wind warning"),
        "TR" => Some("tropical storm warning"),
        "TS" => Some("tsunami warning"),
        "DmgW" => Some("damaging winds"),
        _ => None,
    }
}

/// Marine hazard icon filename for the subset of hazards that carry one.
pub fn hazard_icon(code: &str) -> Option<&'static str> {
    match code {
        "GL" => Some("mf_gale.gif"),
        "HF" | "HI" => Some("mf_hurr.gif"),
        "RB" | "SC" | "SI" | "SW" => Some("mf_smcraft.gif"),
        "TI" | "TR" => Some("mf_storm.gif"),
        "TS" => Some("m_wave.gif"),
        _ => None,
    }
}
