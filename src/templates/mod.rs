//! Project templates: typical scale, baseline hours and permit needs.

mod registry;
mod seed;

pub use registry::{InMemoryTemplateRegistry, TemplateRegistry};
pub use seed::builtin_templates;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source name recorded in estimate provenance.
pub const TEMPLATE_SOURCE: &str = "project_templates";

/// Inclusive min/max pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub min: Decimal,
    pub max: Decimal,
}

impl Range {
    pub const ZERO: Range = Range {
        min: Decimal::ZERO,
        max: Decimal::ZERO,
    };

    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> Decimal {
        (self.min + self.max) / Decimal::TWO
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Baseline description of a project type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    /// Canonical key, e.g. "bathroom renovation".
    pub project_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Typical floor area in m².
    pub typical_area: Range,
    pub diy_hours: u32,
    pub professional_hours: u32,
    /// Informational factors shown alongside the estimate.
    #[serde(default)]
    pub complexity_factors: Vec<String>,
    #[serde(default)]
    pub requires_building_control: bool,
    #[serde(default)]
    pub permit_cost: Range,
}

impl ProjectTemplate {
    /// Permit cost range, zero when building control is not needed.
    pub fn permit_range(&self) -> Range {
        if self.requires_building_control {
            self.permit_cost
        } else {
            Range::ZERO
        }
    }

    /// Check data invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.project_type.trim().is_empty() {
            return Err("project type is empty".to_string());
        }
        if !self.typical_area.is_ordered() {
            return Err(format!(
                "typical area min {} exceeds max {}",
                self.typical_area.min, self.typical_area.max
            ));
        }
        if self.typical_area.min <= Decimal::ZERO {
            return Err("typical area must be positive".to_string());
        }
        if self.diy_hours < self.professional_hours {
            return Err(format!(
                "DIY hours {} are fewer than professional hours {}",
                self.diy_hours, self.professional_hours
            ));
        }
        if !self.permit_cost.is_ordered() || self.permit_cost.min < Decimal::ZERO {
            return Err("permit cost range is not a non-negative ordered range".to_string());
        }
        if !self.requires_building_control && self.permit_cost != Range::ZERO {
            return Err("permit cost set without building control".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn template() -> ProjectTemplate {
        ProjectTemplate {
            project_type: "loft conversion".to_string(),
            description: None,
            typical_area: Range::new(dec!(20), dec!(40)),
            diy_hours: 800,
            professional_hours: 480,
            complexity_factors: vec!["structural steel".to_string()],
            requires_building_control: true,
            permit_cost: Range::new(dec!(800), dec!(1500)),
        }
    }

    #[test]
    fn test_validate() {
        assert!(template().validate().is_ok());

        let mut t = template();
        t.diy_hours = 100;
        assert!(t.validate().is_err());

        let mut t = template();
        t.typical_area = Range::new(dec!(50), dec!(40));
        assert!(t.validate().is_err());

        let mut t = template();
        t.requires_building_control = false;
        assert!(t.validate().is_err());
        t.permit_cost = Range::ZERO;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_permit_range_and_midpoint() {
        let t = template();
        assert_eq!(t.permit_range(), Range::new(dec!(800), dec!(1500)));
        assert_eq!(t.typical_area.midpoint(), dec!(30));

        let mut t = template();
        t.requires_building_control = false;
        assert_eq!(t.permit_range(), Range::ZERO);
    }
}
