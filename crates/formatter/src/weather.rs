//! Coded weather ("ugly string") parsing and the dominance lattices.
//!
//! A weather value is up to five groups separated by `^`, each group five
//! colon-separated fields: coverage, type, intensity, visibility and a
//! comma-or-space separated qualifier list (at most five, one of which may
//! be the additive marker `OR`). Absent fields read as the sentinel `none`.
//! Parsing never fails; unknown tokens degrade to the `None` variants.

use crate::tables::qualifier_phrase;

/// Coverage lattice, least to most dominant. Precedence is `<` on ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Coverage {
    #[default]
    None,
    Patchy,
    Areas,
    Brf,
    Inter,
    Pds,
    Ocnl,
    Frq,
    Iso,
    SChc,
    Sct,
    Chc,
    Num,
    Lkly,
    Wide,
    Def,
}

impl Coverage {
    pub fn from_token(token: &str) -> Coverage {
        match token {
            "Patchy" => Coverage::Patchy,
            "Areas" => Coverage::Areas,
            "Brf" => Coverage::Brf,
            "Inter" => Coverage::Inter,
            "Pds" => Coverage::Pds,
            "Ocnl" => Coverage::Ocnl,
            "Frq" => Coverage::Frq,
            "Iso" => Coverage::Iso,
            "SChc" => Coverage::SChc,
            "Sct" => Coverage::Sct,
            "Chc" => Coverage::Chc,
            "Num" => Coverage::Num,
            "Lkly" => Coverage::Lkly,
            "Wide" => Coverage::Wide,
            "Def" => Coverage::Def,
            _ => Coverage::None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Coverage::None => "none",
            Coverage::Patchy => "Patchy",
            Coverage::Areas => "Areas",
            Coverage::Brf => "Brf",
            Coverage::Inter => "Inter",
            Coverage::Pds => "Pds",
            Coverage::Ocnl => "Ocnl",
            Coverage::Frq => "Frq",
            Coverage::Iso => "Iso",
            Coverage::SChc => "SChc",
            Coverage::Sct => "Sct",
            Coverage::Chc => "Chc",
            Coverage::Num => "Num",
            Coverage::Lkly => "Lkly",
            Coverage::Wide => "Wide",
            Coverage::Def => "Def",
        }
    }
}

/// Intensity lattice: none < -- < - < m < +.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Intensity {
    #[default]
    None,
    VeryLight,
    Light,
    Moderate,
    Heavy,
}

impl Intensity {
    pub fn from_token(token: &str) -> Intensity {
        match token {
            "--" => Intensity::VeryLight,
            "-" => Intensity::Light,
            "m" | "mod" => Intensity::Moderate,
            "+" => Intensity::Heavy,
            _ => Intensity::None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Intensity::None => "none",
            Intensity::VeryLight => "--",
            Intensity::Light => "-",
            Intensity::Moderate => "m",
            Intensity::Heavy => "+",
        }
    }
}

/// Weather-type lattice, least to most dominant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WxType {
    #[default]
    None,
    Fog,
    BlowingSnow,
    BlowingDust,
    BlowingSand,
    Haze,
    Smoke,
    Frost,
    VolcanicAsh,
    Drizzle,
    RainShowers,
    Rain,
    IceCrystals,
    IceFog,
    SnowShowers,
    Snow,
    IcePellets,
    FreezingFog,
    FreezingSpray,
    FreezingDrizzle,
    FreezingRain,
    Thunderstorms,
    WaterSpouts,
}

impl WxType {
    pub fn from_token(token: &str) -> WxType {
        match token {
            "F" => WxType::Fog,
            "BS" => WxType::BlowingSnow,
            "BD" => WxType::BlowingDust,
            "BN" => WxType::BlowingSand,
            "H" => WxType::Haze,
            "K" => WxType::Smoke,
            "FR" => WxType::Frost,
            "VA" => WxType::VolcanicAsh,
            "L" => WxType::Drizzle,
            "RW" => WxType::RainShowers,
            "R" => WxType::Rain,
            "IC" => WxType::IceCrystals,
            "IF" => WxType::IceFog,
            "SW" => WxType::SnowShowers,
            "S" => WxType::Snow,
            "IP" => WxType::IcePellets,
            "ZF" => WxType::FreezingFog,
            "ZY" => WxType::FreezingSpray,
            "ZL" => WxType::FreezingDrizzle,
            "ZR" => WxType::FreezingRain,
            "T" => WxType::Thunderstorms,
            "WP" => WxType::WaterSpouts,
            _ => WxType::None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            WxType::None => "none",
            WxType::Fog => "F",
            WxType::BlowingSnow => "BS",
            WxType::BlowingDust => "BD",
            WxType::BlowingSand => "BN",
            WxType::Haze => "H",
            WxType::Smoke => "K",
            WxType::Frost => "FR",
            WxType::VolcanicAsh => "VA",
            WxType::Drizzle => "L",
            WxType::RainShowers => "RW",
            WxType::Rain => "R",
            WxType::IceCrystals => "IC",
            WxType::IceFog => "IF",
            WxType::SnowShowers => "SW",
            WxType::Snow => "S",
            WxType::IcePellets => "IP",
            WxType::FreezingFog => "ZF",
            WxType::FreezingSpray => "ZY",
            WxType::FreezingDrizzle => "ZL",
            WxType::FreezingRain => "ZR",
            WxType::Thunderstorms => "T",
            WxType::WaterSpouts => "WP",
        }
    }

    /// Liquid or frozen precipitation, gated by PoP in the phrase composer.
    pub fn is_precipitation(self) -> bool {
        matches!(
            self,
            WxType::Drizzle
                | WxType::RainShowers
                | WxType::Rain
                | WxType::SnowShowers
                | WxType::Snow
                | WxType::IcePellets
                | WxType::FreezingSpray
                | WxType::FreezingDrizzle
                | WxType::FreezingRain
                | WxType::Thunderstorms
        )
    }

    /// Obscurations bypass the PoP gate.
    pub fn is_obscuration(self) -> bool {
        matches!(
            self,
            WxType::Fog
                | WxType::Smoke
                | WxType::Haze
                | WxType::BlowingDust
                | WxType::BlowingSand
                | WxType::BlowingSnow
                | WxType::VolcanicAsh
                | WxType::Frost
                | WxType::IceCrystals
                | WxType::IceFog
                | WxType::FreezingFog
        )
    }
}

/// One parsed weather group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WxGroup {
    pub coverage: Coverage,
    pub wx_type: WxType,
    pub intensity: Intensity,
    /// Raw visibility code ("3SM", "P6SM", ...), `None` for sentinel.
    pub visibility: Option<String>,
    /// English qualifier phrase, comma separated, empty when none.
    pub qualifiers: String,
    /// The additive marker "OR" appeared in the qualifier list.
    pub additive_or: bool,
}

impl WxGroup {
    /// The (coverage, intensity, type) dominance key, compared in that
    /// order per the precedence lattice.
    pub fn rank(&self) -> (Coverage, Intensity, WxType) {
        (self.coverage, self.intensity, self.wx_type)
    }
}

const MAX_GROUPS: usize = 5;
const MAX_QUALIFIERS: usize = 5;

fn is_sentinel(field: &str) -> bool {
    field.is_empty() || field == "none" || field == "<NoCov>" || field == "<NoWx>"
}

/// Parse a coded weather string. Missing fields read as sentinel `none`;
/// this never fails, degrading gracefully to an all-`None` group.
pub fn parse_ugly(ugly: &str) -> Vec<WxGroup> {
    ugly.split('^')
        .take(MAX_GROUPS)
        .map(parse_group)
        .collect()
}

fn parse_group(group: &str) -> WxGroup {
    let mut fields = group.split(':');
    let coverage = fields.next().unwrap_or("none").trim();
    let wx_type = fields.next().unwrap_or("none").trim();
    let intensity = fields.next().unwrap_or("none").trim();
    let visibility = fields.next().unwrap_or("none").trim();
    let qualifier_list = fields.next().unwrap_or("none").trim();

    let mut qualifiers = Vec::new();
    let mut additive_or = false;
    for token in qualifier_list
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .take(MAX_QUALIFIERS)
    {
        if is_sentinel(token) {
            continue;
        }
        if token == "OR" {
            additive_or = true;
            continue;
        }
        qualifiers.push(qualifier_phrase(token));
    }

    WxGroup {
        coverage: Coverage::from_token(coverage),
        wx_type: WxType::from_token(wx_type),
        intensity: Intensity::from_token(intensity),
        visibility: if is_sentinel(visibility) {
            None
        } else {
            Some(visibility.to_string())
        },
        qualifiers: qualifiers.join(","),
        additive_or,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_group() {
        let groups = parse_ugly("Chc:R:-:3SM:DmgW");
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.coverage, Coverage::Chc);
        assert_eq!(g.wx_type, WxType::Rain);
        assert_eq!(g.intensity, Intensity::Light);
        assert_eq!(g.visibility.as_deref(), Some("3SM"));
        assert_eq!(g.qualifiers, "damaging winds");
    }

    #[test]
    fn multiple_groups_capped_at_five() {
        let ugly = "Lkly:R:-::^Chc:S:-::^Chc:ZR:-::^SChc:IP:-::^Iso:T:-::^Sct:RW:-::";
        let groups = parse_ugly(ugly);
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[0].wx_type, WxType::Rain);
        assert_eq!(groups[4].wx_type, WxType::Thunderstorms);
    }

    #[test]
    fn missing_fields_degrade_to_none() {
        let groups = parse_ugly("Chc:R");
        assert_eq!(groups[0].intensity, Intensity::None);
        assert!(groups[0].visibility.is_none());
        assert!(groups[0].qualifiers.is_empty());

        let empty = parse_ugly("");
        assert_eq!(empty[0].rank(), (Coverage::None, Intensity::None, WxType::None));
    }

    #[test]
    fn or_marker_is_additive_not_a_qualifier() {
        let groups = parse_ugly("Chc:R:-::OR,GW");
        assert!(groups[0].additive_or);
        assert_eq!(groups[0].qualifiers, "gusty winds");
    }

    #[test]
    fn lattice_orderings() {
        assert!(Coverage::SChc < Coverage::Chc);
        assert!(Coverage::Chc < Coverage::Lkly);
        assert!(Coverage::Lkly < Coverage::Def);
        assert!(Intensity::VeryLight < Intensity::Heavy);
        assert!(WxType::Fog < WxType::Rain);
        assert!(WxType::Rain < WxType::Snow);
        assert!(WxType::Snow < WxType::FreezingRain);
        assert!(WxType::FreezingRain < WxType::Thunderstorms);
    }
}
