use serde::{Deserialize, Serialize};

/// A ratio stored as a decimal: `0.25` means a quarter.
///
/// Engine inputs use this scale. It is not clamped; overhead rates above `1.0` are legitimate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(f64);

impl Fraction {
    pub const ZERO: Fraction = Fraction(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> f64 {
        self.0
    }

    pub fn to_percentage(self) -> Percentage {
        Percentage(self.0 * 100.0)
    }
}

/// A value on the 0–100 scale, used by the advice layer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> f64 {
        self.0
    }

    /// Nearest whole percent, halves rounded away from zero.
    pub fn rounded(self) -> i64 {
        self.0.round() as i64
    }
}
