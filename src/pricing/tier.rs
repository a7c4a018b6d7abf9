//! Complexity tiers, quality tiers and seasons.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How involved a project is. Scales labour cost and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Basic,
    Standard,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Basic, Complexity::Standard, Complexity::Complex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Basic => "basic",
            Complexity::Standard => "standard",
            Complexity::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "simple" => Ok(Complexity::Basic),
            "standard" | "medium" => Ok(Complexity::Standard),
            "complex" | "advanced" => Ok(Complexity::Complex),
            _ => Err(format!(
                "invalid complexity '{}', expected 'basic', 'standard', or 'complex'",
                s
            )),
        }
    }
}

/// Multipliers per complexity tier.
///
/// Must be strictly increasing from basic to complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityFactors {
    pub basic: Decimal,
    pub standard: Decimal,
    pub complex: Decimal,
}

impl ComplexityFactors {
    /// Table used when a labour item carries none, and for time estimates.
    pub const DEFAULT: ComplexityFactors = ComplexityFactors {
        basic: dec!(1.0),
        standard: dec!(1.3),
        complex: dec!(1.8),
    };

    pub fn multiplier(&self, complexity: Complexity) -> Decimal {
        match complexity {
            Complexity::Basic => self.basic,
            Complexity::Standard => self.standard,
            Complexity::Complex => self.complex,
        }
    }

    /// Check the positive, strictly increasing invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.basic <= Decimal::ZERO {
            return Err(format!("basic multiplier {} must be positive", self.basic));
        }
        if !(self.basic < self.standard && self.standard < self.complex) {
            return Err(format!(
                "complexity multipliers must strictly increase (basic {}, standard {}, complex {})",
                self.basic, self.standard, self.complex
            ));
        }
        Ok(())
    }
}

impl Default for ComplexityFactors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Material price column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Budget,
    MidRange,
    Premium,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::Budget, QualityTier::MidRange, QualityTier::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Budget => "budget",
            QualityTier::MidRange => "mid_range",
            QualityTier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "budget" | "economy" => Ok(QualityTier::Budget),
            "mid_range" | "midrange" | "mid" | "standard" => Ok(QualityTier::MidRange),
            "premium" | "luxury" => Ok(QualityTier::Premium),
            _ => Err(format!(
                "invalid quality tier '{}', expected 'budget', 'mid_range', or 'premium'",
                s
            )),
        }
    }
}

/// Time of year, for seasonal adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Meteorological season for a timestamp (northern hemisphere).
    pub fn from_date(at: DateTime<Utc>) -> Self {
        match at.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            _ => Err(format!(
                "invalid season '{}', expected 'spring', 'summer', 'autumn', or 'winter'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tier_parsing() {
        assert_eq!("Standard".parse::<Complexity>().unwrap(), Complexity::Standard);
        assert_eq!("mid-range".parse::<QualityTier>().unwrap(), QualityTier::MidRange);
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Autumn);
        assert!("extreme".parse::<Complexity>().is_err());
        assert!("gold".parse::<QualityTier>().is_err());
    }

    #[test]
    fn test_default_factors_are_increasing() {
        assert!(ComplexityFactors::DEFAULT.validate().is_ok());
        assert_eq!(ComplexityFactors::DEFAULT.multiplier(Complexity::Standard), dec!(1.3));

        let flat = ComplexityFactors {
            basic: dec!(1.0),
            standard: dec!(1.0),
            complex: dec!(1.5),
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn test_season_from_date() {
        let at = |m| Utc.with_ymd_and_hms(2026, m, 15, 12, 0, 0).unwrap();
        assert_eq!(Season::from_date(at(1)), Season::Winter);
        assert_eq!(Season::from_date(at(4)), Season::Spring);
        assert_eq!(Season::from_date(at(7)), Season::Summer);
        assert_eq!(Season::from_date(at(10)), Season::Autumn);
        assert_eq!(Season::from_date(at(12)), Season::Winter);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&QualityTier::MidRange).unwrap(), "\"mid_range\"");
        assert_eq!(serde_json::to_string(&Complexity::Complex).unwrap(), "\"complex\"");
    }
}
