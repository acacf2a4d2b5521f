//! Color encoding for tweet points
//!
//! Two encodings are available, selected by [`EncodingMode`]:
//! - Sentiment: diverging red → grey → green over [-1, 1]
//! - Subjectivity: sequential grey → blue over [0, 1]
//!
//! Interpolation is piecewise linear in RGB with channels rounded to the
//! nearest integer. Values outside a scale's domain clamp to the nearest
//! endpoint and NaN maps to the neutral grey, so every record gets a color.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use tweetswarm_io::Record;

/// An opaque 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from hex string (e.g., "#E41A1C" or "e41a1c")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1]
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| {
            let v = from as f64 + (to as f64 - from as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex).ok_or_else(|| de::Error::custom(format!("invalid hex color: {}", hex)))
    }
}

/// Neutral midpoint shared by both encodings
pub const NEUTRAL: Rgb = Rgb::new(0xec, 0xec, 0xec);
/// Sentiment = -1
pub const NEGATIVE: Rgb = Rgb::new(0xe4, 0x1a, 0x1c);
/// Sentiment = 1
pub const POSITIVE: Rgb = Rgb::new(0x4d, 0xaf, 0x4a);
/// Subjectivity = 1
pub const SUBJECTIVE: Rgb = Rgb::new(0x44, 0x67, 0xc4);

const SENTIMENT_STOPS: [(f64, Rgb); 3] = [(-1.0, NEGATIVE), (0.0, NEUTRAL), (1.0, POSITIVE)];
const SUBJECTIVITY_STOPS: [(f64, Rgb); 2] = [(0.0, NEUTRAL), (1.0, SUBJECTIVE)];

/// Piecewise-linear color scale over ascending control points
#[derive(Clone, Copy, Debug)]
pub struct ColorScale {
    stops: &'static [(f64, Rgb)],
}

impl ColorScale {
    pub const SENTIMENT: ColorScale = ColorScale {
        stops: &SENTIMENT_STOPS,
    };

    pub const SUBJECTIVITY: ColorScale = ColorScale {
        stops: &SUBJECTIVITY_STOPS,
    };

    /// Domain covered by the control points
    pub fn domain(&self) -> (f64, f64) {
        let lo = self.stops.first().map(|(v, _)| *v).unwrap_or(0.0);
        let hi = self.stops.last().map(|(v, _)| *v).unwrap_or(lo);
        (lo, hi)
    }

    /// Sample the scale at a data value
    pub fn sample(&self, value: f64) -> Rgb {
        if value.is_nan() {
            return NEUTRAL;
        }

        let (lo, hi) = self.domain();
        let value = value.clamp(lo, hi);

        for pair in self.stops.windows(2) {
            let (v0, c0) = pair[0];
            let (v1, c1) = pair[1];
            if value <= v1 {
                let span = v1 - v0;
                let t = if span > 0.0 { (value - v0) / span } else { 0.0 };
                return Rgb::lerp(c0, c1, t);
            }
        }

        self.stops.last().map(|(_, c)| *c).unwrap_or(NEUTRAL)
    }
}

/// Attribute driving point fill and the legend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    #[default]
    Sentiment,
    Subjectivity,
}

impl EncodingMode {
    /// All modes in menu order
    pub const ALL: [EncodingMode; 2] = [EncodingMode::Sentiment, EncodingMode::Subjectivity];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            EncodingMode::Sentiment => "Sentiment",
            EncodingMode::Subjectivity => "Subjectivity",
        }
    }

    /// Color scale for this mode
    pub fn scale(&self) -> ColorScale {
        match self {
            EncodingMode::Sentiment => ColorScale::SENTIMENT,
            EncodingMode::Subjectivity => ColorScale::SUBJECTIVITY,
        }
    }

    /// Value domain for this mode
    pub fn domain(&self) -> (f64, f64) {
        self.scale().domain()
    }

    /// The record attribute this mode encodes
    pub fn value_of(&self, record: &Record) -> f64 {
        match self {
            EncodingMode::Sentiment => record.sentiment,
            EncodingMode::Subjectivity => record.subjectivity,
        }
    }

    /// Legend labels as (top, bottom)
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            EncodingMode::Sentiment => ("Positive", "Negative"),
            EncodingMode::Subjectivity => ("Subjective", "Objective"),
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentiment" => Ok(EncodingMode::Sentiment),
            "subjectivity" => Ok(EncodingMode::Subjectivity),
            other => Err(format!("unknown encoding mode: {}", other)),
        }
    }
}

/// Fill color of a record under the given mode
pub fn color(record: &Record, mode: EncodingMode) -> Rgb {
    mode.scale().sample(mode.value_of(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweetswarm_io::Category;

    fn tweet(sentiment: f64, subjectivity: f64) -> Record {
        Record::new("t", Category::March)
            .with_sentiment(sentiment)
            .with_subjectivity(subjectivity)
    }

    #[test]
    fn test_hex_roundtrip() {
        let c = Rgb::from_hex("#E41A1C").unwrap();
        assert_eq!(c, NEGATIVE);
        assert_eq!(c.to_hex(), "#e41a1c");
        assert!(Rgb::from_hex("#12345").is_none());
        assert!(Rgb::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn test_lerp_rounds_channels() {
        let mid = Rgb::lerp(NEUTRAL, POSITIVE, 0.5);
        // 236 + (77 - 236) * 0.5 = 156.5
        assert_eq!(mid, Rgb::new(157, 206, 155));
    }

    #[test]
    fn test_sentiment_control_points() {
        assert_eq!(color(&tweet(-1.0, 0.0), EncodingMode::Sentiment), NEGATIVE);
        assert_eq!(color(&tweet(0.0, 0.0), EncodingMode::Sentiment), NEUTRAL);
        assert_eq!(color(&tweet(1.0, 0.0), EncodingMode::Sentiment), POSITIVE);
    }

    #[test]
    fn test_subjectivity_control_points() {
        assert_eq!(color(&tweet(0.0, 0.0), EncodingMode::Subjectivity), NEUTRAL);
        assert_eq!(color(&tweet(0.0, 1.0), EncodingMode::Subjectivity), SUBJECTIVE);
    }

    #[test]
    fn test_out_of_domain_clamps() {
        assert_eq!(color(&tweet(-3.0, 0.0), EncodingMode::Sentiment), NEGATIVE);
        assert_eq!(color(&tweet(7.5, 0.0), EncodingMode::Sentiment), POSITIVE);
        assert_eq!(color(&tweet(0.0, -0.2), EncodingMode::Subjectivity), NEUTRAL);
        assert_eq!(color(&tweet(0.0, 1.4), EncodingMode::Subjectivity), SUBJECTIVE);
    }

    #[test]
    fn test_nan_is_neutral() {
        assert_eq!(color(&tweet(f64::NAN, 0.0), EncodingMode::Sentiment), NEUTRAL);
        assert_eq!(color(&tweet(0.0, f64::NAN), EncodingMode::Subjectivity), NEUTRAL);
    }

    #[test]
    fn test_mode_uses_its_own_attribute() {
        let record = tweet(1.0, 0.0);
        assert_eq!(color(&record, EncodingMode::Sentiment), POSITIVE);
        assert_eq!(color(&record, EncodingMode::Subjectivity), NEUTRAL);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Sentiment".parse::<EncodingMode>().unwrap(), EncodingMode::Sentiment);
        assert_eq!(
            "subjectivity".parse::<EncodingMode>().unwrap(),
            EncodingMode::Subjectivity
        );
        assert!("polarity".parse::<EncodingMode>().is_err());
        assert_eq!(EncodingMode::default(), EncodingMode::Sentiment);
    }

    #[test]
    fn test_rgb_serializes_as_hex() {
        let json = serde_json::to_string(&POSITIVE).unwrap();
        assert_eq!(json, "\"#4daf4a\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, POSITIVE);
    }
}
