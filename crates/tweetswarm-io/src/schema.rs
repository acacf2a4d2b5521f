//! Record schema for tweet datasets
//!
//! Records arrive as JSON objects using the column names of the upstream
//! analysis export (`RawTweet`, `Sentiment`, `Subjectivity`, `Dimension 1`,
//! `Month`). Any other keys in an object are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Month a tweet belongs to
///
/// The plot has exactly three rows, so the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    March,
    April,
    May,
}

impl Category {
    /// All categories in row order (top to bottom)
    pub const ALL: [Category; 3] = [Category::March, Category::April, Category::May];

    /// Display name, also used as the row label
    pub fn name(&self) -> &'static str {
        match self {
            Category::March => "March",
            Category::April => "April",
            Category::May => "May",
        }
    }

    /// Zero-based row index
    pub fn row(&self) -> usize {
        match self {
            Category::March => 0,
            Category::April => 1,
            Category::May => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown month: {}", s))
    }
}

/// One tweet with its derived attributes
///
/// Identity is the tweet text: two records are equal when their text matches
/// exactly, whatever their numeric attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Raw tweet text (identity key)
    #[serde(rename = "RawTweet")]
    pub text: String,

    /// Polarity in [-1, 1]
    #[serde(rename = "Sentiment")]
    pub sentiment: f64,

    /// Subjectivity in [0, 1]
    #[serde(rename = "Subjectivity")]
    pub subjectivity: f64,

    /// Scalar projection used for horizontal placement
    #[serde(rename = "Dimension 1")]
    pub projection: f64,

    /// Month the tweet was posted
    #[serde(rename = "Month")]
    pub category: Category,
}

impl Record {
    /// Create a record with neutral attributes
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            sentiment: 0.0,
            subjectivity: 0.0,
            projection: 0.0,
            category,
        }
    }

    /// Set the sentiment
    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Set the subjectivity
    pub fn with_subjectivity(mut self, subjectivity: f64) -> Self {
        self.subjectivity = subjectivity;
        self
    }

    /// Set the projection
    pub fn with_projection(mut self, projection: f64) -> Self {
        self.projection = projection;
        self
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}
