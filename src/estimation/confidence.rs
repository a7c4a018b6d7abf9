//! Confidence rating and data provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How much of an estimate rests on real catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data-quality block attached to every estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub confidence: ConfidenceLevel,
    pub data_sources: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Accumulates what an estimate was built from.
///
/// ```text
///   fallback used anywhere            ──▶ low
///   template + real data everywhere   ──▶ high (medium if a tier price was missing)
///   otherwise                         ──▶ medium
/// ```
#[derive(Debug, Default)]
pub struct Provenance {
    sources: Vec<String>,
    template_found: bool,
    required_categories: usize,
    priced_categories: usize,
    fallback_used: bool,
    partial_data: bool,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_template(&mut self, source: &str) {
        self.template_found = true;
        self.push(source.to_string());
    }

    /// A category priced from real catalog items.
    pub fn record_priced(&mut self, source: &str) {
        self.required_categories += 1;
        self.priced_categories += 1;
        self.push(source.to_string());
    }

    /// A category filled with its synthetic default.
    pub fn record_fallback(&mut self, source: &str) {
        self.required_categories += 1;
        self.fallback_used = true;
        self.push(format!("{} (fallback default)", source));
    }

    /// Some catalog item lacked the data the estimate needed.
    pub fn record_partial_data(&mut self) {
        self.partial_data = true;
    }

    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        if self.fallback_used {
            return ConfidenceLevel::Low;
        }
        let complete = self.template_found && self.priced_categories == self.required_categories;
        if complete && !self.partial_data {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Medium
        }
    }

    pub fn into_data_quality(self, last_updated: DateTime<Utc>) -> DataQuality {
        DataQuality {
            confidence: self.confidence(),
            data_sources: self.sources,
            last_updated,
        }
    }

    fn push(&mut self, source: String) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Provenance::new().confidence(), ConfidenceLevel::Medium);
    }

    #[test]
    fn test_full_data_is_high() {
        let mut p = Provenance::new();
        p.record_template("project_templates");
        p.record_priced("labor_rates");
        p.record_priced("material_prices");
        p.record_priced("tool_rentals");
        assert_eq!(p.confidence(), ConfidenceLevel::High);

        p.record_partial_data();
        assert_eq!(p.confidence(), ConfidenceLevel::Medium);
    }

    #[test]
    fn test_any_fallback_is_low() {
        let mut p = Provenance::new();
        p.record_template("project_templates");
        p.record_fallback("labor_rates");
        p.record_priced("material_prices");
        assert_eq!(p.confidence(), ConfidenceLevel::Low);

        let quality = p.into_data_quality(Utc::now());
        assert_eq!(
            quality.data_sources,
            vec![
                "project_templates".to_string(),
                "labor_rates (fallback default)".to_string(),
                "material_prices".to_string(),
            ]
        );
    }

    #[test]
    fn test_level_ordering() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::Medium < ConfidenceLevel::High);
    }
}
