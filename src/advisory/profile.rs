//! Tool profiles: what a tool is good for and what it costs to own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How well a tool suits one kind of job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuitability {
    /// Job label, e.g. "tiling" or "patio".
    pub job_type: String,
    /// 1 (poor) to 10 (ideal).
    pub score: u8,
    pub reason: String,
    #[serde(default)]
    pub limitations: Option<String>,
}

/// Advisory data for one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub id: String,
    pub name: String,
    pub daily_rental_rate: Decimal,
    pub purchase_cost: Decimal,
    /// Hire days beyond which buying is cheaper.
    pub buy_threshold_days: u32,
    #[serde(default)]
    pub suitability: Vec<JobSuitability>,
    /// Free-text situations the tool is meant for.
    #[serde(default)]
    pub when_to_use: Vec<String>,
    #[serde(default)]
    pub limitations: Option<String>,
}

impl ToolProfile {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must not be empty".to_string());
        }
        if self.daily_rental_rate <= Decimal::ZERO {
            return Err(format!(
                "daily rental rate {} must be positive",
                self.daily_rental_rate
            ));
        }
        if self.purchase_cost < Decimal::ZERO {
            return Err(format!("purchase cost {} is negative", self.purchase_cost));
        }
        if self.buy_threshold_days == 0 {
            return Err("buy threshold must be at least one day".to_string());
        }
        if let Some(entry) = self.suitability.iter().find(|s| !(1..=10).contains(&s.score)) {
            return Err(format!(
                "suitability score {} for '{}' is outside 1-10",
                entry.score, entry.job_type
            ));
        }
        Ok(())
    }

    /// Whether `query` names this tool, by id or name.
    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        let name = self.name.to_lowercase();
        self.id.eq_ignore_ascii_case(&query) || name.contains(&query) || query.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile() -> ToolProfile {
        ToolProfile {
            id: "tile-cutter".to_string(),
            name: "Electric tile cutter".to_string(),
            daily_rental_rate: dec!(25),
            purchase_cost: dec!(180),
            buy_threshold_days: 7,
            suitability: vec![JobSuitability {
                job_type: "tiling".to_string(),
                score: 9,
                reason: "clean straight cuts".to_string(),
                limitations: None,
            }],
            when_to_use: vec![],
            limitations: None,
        }
    }

    #[test]
    fn test_validate() {
        assert!(profile().validate().is_ok());

        let mut p = profile();
        p.suitability[0].score = 11;
        assert!(p.validate().unwrap_err().contains("outside 1-10"));

        let mut p = profile();
        p.daily_rental_rate = Decimal::ZERO;
        assert!(p.validate().is_err());

        let mut p = profile();
        p.buy_threshold_days = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_matches_name() {
        let p = profile();
        assert!(p.matches_name("TILE-CUTTER"));
        assert!(p.matches_name("tile cutter"));
        assert!(p.matches_name("an electric tile cutter for the bathroom"));
        assert!(!p.matches_name("angle grinder"));
        assert!(!p.matches_name("  "));
    }
}
