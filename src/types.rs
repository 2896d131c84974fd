use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Row of the ZIP-to-district table (`zcta,state_abbr,cd`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZipDistrictRecord {
    pub zcta: String,
    pub state_abbr: String,
    pub cd: String,
}

/// Row of the House score sheet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HouseScoreRecord {
    /// District identifier in `ST-DD` form
    #[serde(rename = "DistrictNumber")]
    pub district_number: String,
    #[serde(rename = "RepFirst")]
    pub rep_first: String,
    #[serde(rename = "RepLast")]
    pub rep_last: String,
    /// Percentage such as `72%` or `72.5%`
    #[serde(rename = "totalScore")]
    pub total_score: String,
}

/// Row of the Senate score sheet, keyed by full state name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SenateScoreRecord {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "RepFirst")]
    pub rep_first: String,
    #[serde(rename = "RepLast")]
    pub rep_last: String,
    #[serde(rename = "totalScore")]
    pub total_score: String,
}

/// House seat identifier, rendered as `{state}-{district}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictId {
    state_abbr: String,
    district: String,
}

impl DistrictId {
    /// Build an identifier, zero-padding single-digit districts
    pub fn new(state_abbr: &str, district: &str) -> Self {
        let district = if district.len() == 1 {
            format!("0{}", district)
        } else {
            district.to_string()
        };
        Self {
            state_abbr: state_abbr.to_string(),
            district,
        }
    }

    pub fn state_abbr(&self) -> &str {
        &self.state_abbr
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.state_abbr, self.district)
    }
}

impl Serialize for DistrictId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Score tier driving the display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn color(self) -> Color {
        match self {
            Self::High => Color::Green,
            Self::Medium => Color::Amber,
            Self::Low => Color::Red,
        }
    }
}

/// Display color of a rendered entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Amber,
    Red,
}

impl Color {
    /// CSS value; `amber` is not a named CSS color
    pub fn css(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "#ffbf00",
            Self::Red => "red",
        }
    }

    pub fn ansi_code(self) -> u8 {
        match self {
            Self::Green => 32,
            Self::Amber => 33,
            Self::Red => 31,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Amber => write!(f, "amber"),
            Self::Red => write!(f, "red"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    pub fn role_label(self) -> &'static str {
        match self {
            Self::House => "House Representative",
            Self::Senate => "Senator",
        }
    }
}

/// A matched legislator with its classified score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedResult {
    /// `First, Last`
    pub display_name: String,
    pub chamber: Chamber,
    pub score_text: String,
    pub tier: Tier,
}

impl ClassifiedResult {
    /// Two-line message shown for this legislator
    pub fn message(&self) -> String {
        format!(
            "{}: {}\nTotal Score: {}",
            self.chamber.role_label(),
            self.display_name,
            self.score_text
        )
    }
}
