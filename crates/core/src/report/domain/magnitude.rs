use serde::Serialize;

use crate::shared::math::round2;

/// Colour band for a surfaced score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeCategory {
    Green,
    Blue,
    Yellow,
    Red,
}

impl MagnitudeCategory {
    /// Thresholds: `>= 75` green, `>= 50` blue, `>= 25` yellow, otherwise red.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            MagnitudeCategory::Green
        } else if percentage >= 50.0 {
            MagnitudeCategory::Blue
        } else if percentage >= 25.0 {
            MagnitudeCategory::Yellow
        } else {
            MagnitudeCategory::Red
        }
    }
}

impl std::fmt::Display for MagnitudeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MagnitudeCategory::Green => write!(f, "green"),
            MagnitudeCategory::Blue => write!(f, "blue"),
            MagnitudeCategory::Yellow => write!(f, "yellow"),
            MagnitudeCategory::Red => write!(f, "red"),
        }
    }
}

/// A score scaled to a two-decimal percentage with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Magnitude {
    pub percentage: f64,
    pub category: MagnitudeCategory,
}

impl Magnitude {
    /// From a fractional score such as a relevance in `[0, 1]`.
    pub fn from_fraction(value: f64) -> Self {
        let percentage = round2(value * 100.0);
        Self {
            percentage,
            category: MagnitudeCategory::from_percentage(percentage),
        }
    }

    /// From a ratio already expressed per hundred.
    pub fn from_ratio(ratio: f64) -> Self {
        Self::from_fraction(ratio / 100.0)
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percentage)
    }
}
