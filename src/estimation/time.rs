//! Time estimation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::pricing::{Complexity, ComplexityFactors};
use crate::templates::ProjectTemplate;

/// Hours below which durations are shown in hours.
const HOURS_DISPLAY_LIMIT: u32 = 24;
/// Hours below which durations are shown in working days.
const DAYS_DISPLAY_LIMIT: u32 = 168;
const HOURS_PER_DAY: u32 = 8;
const HOURS_PER_WEEK: u32 = 40;

/// DIY and professional durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimates {
    pub diy_hours: u32,
    pub professional_hours: u32,
    pub diy_display: String,
    pub professional_display: String,
}

/// Scales template baseline hours by complexity.
///
/// Always uses the global complexity table, never a labour item's own.
pub struct TimeEstimator {
    factors: ComplexityFactors,
}

impl TimeEstimator {
    pub fn new() -> Self {
        Self {
            factors: ComplexityFactors::DEFAULT,
        }
    }

    pub fn estimate(&self, template: &ProjectTemplate, complexity: Complexity) -> TimeEstimates {
        let multiplier = self.factors.multiplier(complexity);
        let diy_hours = scale(template.diy_hours, multiplier);
        let professional_hours = scale(template.professional_hours, multiplier);
        TimeEstimates {
            diy_hours,
            professional_hours,
            diy_display: format_hours(diy_hours),
            professional_display: format_hours(professional_hours),
        }
    }
}

impl Default for TimeEstimator {
    fn default() -> Self {
        Self::new()
    }
}

fn scale(hours: u32, multiplier: Decimal) -> u32 {
    (Decimal::from(hours) * multiplier)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Human-readable duration: hours under a day, 8-hour days under a week
/// of hours, otherwise 40-hour weeks. Days and weeks round up.
pub fn format_hours(hours: u32) -> String {
    if hours < HOURS_DISPLAY_LIMIT {
        format!("{} hours", hours)
    } else if hours < DAYS_DISPLAY_LIMIT {
        format!("{} days", hours.div_ceil(HOURS_PER_DAY))
    } else {
        format!("{} weeks", hours.div_ceil(HOURS_PER_WEEK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Range;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_boundaries() {
        assert_eq!(format_hours(0), "0 hours");
        assert_eq!(format_hours(23), "23 hours");
        assert_eq!(format_hours(24), "3 days");
        assert_eq!(format_hours(25), "4 days");
        assert_eq!(format_hours(167), "21 days");
        assert_eq!(format_hours(168), "5 weeks");
        assert_eq!(format_hours(400), "10 weeks");
    }

    #[test]
    fn test_hours_scale_with_complexity() {
        let template = ProjectTemplate {
            project_type: "bathroom renovation".to_string(),
            description: None,
            typical_area: Range::new(dec!(4), dec!(8)),
            diy_hours: 120,
            professional_hours: 60,
            complexity_factors: vec![],
            requires_building_control: false,
            permit_cost: Range::ZERO,
        };
        let estimator = TimeEstimator::new();

        let basic = estimator.estimate(&template, Complexity::Basic);
        assert_eq!(basic.diy_hours, 120);
        assert_eq!(basic.diy_display, "15 days");
        assert_eq!(basic.professional_display, "8 days");

        let standard = estimator.estimate(&template, Complexity::Standard);
        assert_eq!(standard.diy_hours, 156);
        assert_eq!(standard.professional_hours, 78);

        let complex = estimator.estimate(&template, Complexity::Complex);
        assert_eq!(complex.diy_hours, 216);
        assert!(complex.professional_hours > standard.professional_hours);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(scale(5, dec!(1.3)), 7);
        assert_eq!(scale(15, dec!(1.3)), 20);
    }
}
