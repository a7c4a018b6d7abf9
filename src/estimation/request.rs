//! Estimate request and its validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EstimateError;
use crate::pricing::{Complexity, QualityTier, Season};

/// Parameters for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub project_type: String,
    /// Floor area in m². Defaults to the template's typical midpoint.
    #[serde(default)]
    pub area: Option<Decimal>,
    #[serde(default)]
    pub location: Option<String>,
    pub complexity: Complexity,
    pub quality_tier: QualityTier,
    #[serde(default = "default_include_tools")]
    pub include_tools: bool,
    /// Defaults to the season at the time of the estimate.
    #[serde(default)]
    pub season: Option<Season>,
    /// Units for `per_item` and `per_day` labour rates. Defaults to one.
    #[serde(default)]
    pub unit_quantity: Option<Decimal>,
}

fn default_include_tools() -> bool {
    true
}

impl EstimateRequest {
    pub fn new(
        project_type: impl Into<String>,
        complexity: Complexity,
        quality_tier: QualityTier,
    ) -> Self {
        Self {
            project_type: project_type.into(),
            area: None,
            location: None,
            complexity,
            quality_tier,
            include_tools: true,
            season: None,
            unit_quantity: None,
        }
    }

    pub fn with_area(mut self, area: Decimal) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_unit_quantity(mut self, quantity: Decimal) -> Self {
        self.unit_quantity = Some(quantity);
        self
    }

    pub fn without_tools(mut self) -> Self {
        self.include_tools = false;
        self
    }

    /// Reject out-of-range values before any lookup happens.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.project_type.trim().is_empty() {
            return Err(EstimateError::invalid("project_type", "must not be empty"));
        }
        if let Some(area) = self.area
            && area <= Decimal::ZERO
        {
            return Err(EstimateError::invalid(
                "area",
                format!("must be greater than zero, got {}", area),
            ));
        }
        if let Some(quantity) = self.unit_quantity
            && quantity <= Decimal::ZERO
        {
            return Err(EstimateError::invalid(
                "unit_quantity",
                format!("must be greater than zero, got {}", quantity),
            ));
        }
        Ok(())
    }
}

/// Request with enum fields still as strings, as received from an API
/// layer or the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEstimateRequest {
    pub project_type: String,
    #[serde(default)]
    pub area: Option<Decimal>,
    #[serde(default)]
    pub location: Option<String>,
    pub complexity: String,
    pub quality_tier: String,
    #[serde(default)]
    pub include_tools: Option<bool>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub unit_quantity: Option<Decimal>,
}

impl TryFrom<RawEstimateRequest> for EstimateRequest {
    type Error = EstimateError;

    fn try_from(raw: RawEstimateRequest) -> Result<Self, Self::Error> {
        let complexity = raw
            .complexity
            .parse::<Complexity>()
            .map_err(|e| EstimateError::invalid("complexity", e))?;
        let quality_tier = raw
            .quality_tier
            .parse::<QualityTier>()
            .map_err(|e| EstimateError::invalid("quality_tier", e))?;
        let season = raw
            .season
            .as_deref()
            .map(str::parse::<Season>)
            .transpose()
            .map_err(|e| EstimateError::invalid("season", e))?;

        let request = EstimateRequest {
            project_type: raw.project_type,
            area: raw.area,
            location: raw.location.filter(|l| !l.trim().is_empty()),
            complexity,
            quality_tier,
            include_tools: raw.include_tools.unwrap_or(true),
            season,
            unit_quantity: raw.unit_quantity,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw() -> RawEstimateRequest {
        RawEstimateRequest {
            project_type: "bathroom renovation".to_string(),
            complexity: "standard".to_string(),
            quality_tier: "mid_range".to_string(),
            ..RawEstimateRequest::default()
        }
    }

    #[test]
    fn test_raw_conversion() {
        let request = EstimateRequest::try_from(RawEstimateRequest {
            area: Some(dec!(5)),
            location: Some("  ".to_string()),
            season: Some("Winter".to_string()),
            ..raw()
        })
        .unwrap();
        assert_eq!(request.complexity, Complexity::Standard);
        assert_eq!(request.quality_tier, QualityTier::MidRange);
        assert_eq!(request.season, Some(Season::Winter));
        assert!(request.location.is_none());
        assert!(request.include_tools);
    }

    #[test]
    fn test_out_of_enum_values_are_invalid() {
        let err = EstimateRequest::try_from(RawEstimateRequest {
            complexity: "heroic".to_string(),
            ..raw()
        })
        .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidParameter { ref name, .. } if name == "complexity"));

        let err = EstimateRequest::try_from(RawEstimateRequest {
            quality_tier: "platinum".to_string(),
            ..raw()
        })
        .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidParameter { ref name, .. } if name == "quality_tier"));
    }

    #[test]
    fn test_area_must_be_positive() {
        let request = EstimateRequest::new("patio", Complexity::Basic, QualityTier::Budget);
        assert!(request.clone().with_area(dec!(12.5)).validate().is_ok());
        assert!(request.clone().with_area(dec!(0)).validate().is_err());
        assert!(request.with_area(dec!(-1)).validate().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{"project_type":"patio","complexity":"basic","quality_tier":"premium"}"#,
        )
        .unwrap();
        assert!(request.include_tools);
        assert!(request.area.is_none());
    }
}
