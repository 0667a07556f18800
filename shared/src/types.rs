//! Common types used across the dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display colour token used by the catalog cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    #[default]
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
    Purple,
    Gray,
}

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::Yellow => "yellow",
            ColorToken::Orange => "orange",
            ColorToken::Red => "red",
            ColorToken::Green => "green",
            ColorToken::Blue => "blue",
            ColorToken::Purple => "purple",
            ColorToken::Gray => "gray",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "yellow" => Some(ColorToken::Yellow),
            "orange" => Some(ColorToken::Orange),
            "red" => Some(ColorToken::Red),
            "green" => Some(ColorToken::Green),
            "blue" => Some(ColorToken::Blue),
            "purple" => Some(ColorToken::Purple),
            "gray" => Some(ColorToken::Gray),
            _ => None,
        }
    }
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
