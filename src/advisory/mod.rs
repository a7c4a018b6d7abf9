//! Tool advice: which tools suit a job, and whether to buy or hire.
//!
//! Independent of the estimator. Ranking works in two passes:
//!
//! 1. Match the job description against each tool's suitability table.
//! 2. If nothing scored [`STRONG_MATCH`] or better, also match the
//!    "when to use" phrases at [`PHRASE_SCORE`].
//!
//! Results are deduplicated per tool, keeping the best score.

mod profile;
mod seed;

pub use profile::{JobSuitability, ToolProfile};
pub use seed::builtin_profiles;

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::estimation::money;

/// Score at which a suitability match is good enough on its own.
pub const STRONG_MATCH: u8 = 7;

/// Score given to a "when to use" phrase match.
pub const PHRASE_SCORE: u8 = 6;

/// A ranked tool suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecommendation {
    pub tool_id: String,
    pub tool_name: String,
    pub score: u8,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitations: Option<String>,
    pub daily_rental_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Rent,
    Buy,
    Depends,
}

/// Outcome of a buy-versus-hire comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyVsRent {
    pub tool_name: String,
    pub recommendation: Recommendation,
    pub total_rental_cost: Option<Decimal>,
    pub purchase_cost: Option<Decimal>,
    /// Amount saved by following the recommendation, never negative.
    pub savings: Option<Decimal>,
    pub advice: String,
}

/// Validated set of tool profiles.
#[derive(Debug, Clone, Default)]
pub struct ToolKnowledgeBase {
    profiles: Vec<ToolProfile>,
}

impl ToolKnowledgeBase {
    pub fn new(profiles: Vec<ToolProfile>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for profile in &profiles {
            profile
                .validate()
                .map_err(|reason| CatalogError::invalid_item(&profile.id, reason))?;
            if !seen.insert(profile.id.as_str()) {
                return Err(CatalogError::invalid_item(&profile.id, "duplicate id"));
            }
        }
        Ok(Self { profiles })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_profiles())
    }

    pub fn profiles(&self) -> &[ToolProfile] {
        &self.profiles
    }

    /// Look a tool up by id or name, preferring exact matches.
    pub fn find(&self, name: &str) -> Option<&ToolProfile> {
        let wanted = name.trim();
        self.profiles
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(wanted) || p.name.eq_ignore_ascii_case(wanted))
            .or_else(|| self.profiles.iter().find(|p| p.matches_name(wanted)))
    }
}

/// Ranks tools for jobs and compares buying with hiring.
pub struct ToolAdvisor {
    knowledge: ToolKnowledgeBase,
}

impl ToolAdvisor {
    pub fn new(knowledge: ToolKnowledgeBase) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &ToolKnowledgeBase {
        &self.knowledge
    }

    /// Tools suited to the described job, best first.
    ///
    /// Ties go to the cheaper daily rate, then to the name.
    pub fn recommend_tools(&self, job_description: &str) -> Vec<ToolRecommendation> {
        let job = job_description.trim().to_lowercase();
        if job.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<ToolRecommendation> = Vec::new();
        for profile in self.knowledge.profiles() {
            for entry in &profile.suitability {
                if labels_match(&job, &entry.job_type) {
                    candidates.push(recommendation(
                        profile,
                        entry.score,
                        entry.reason.clone(),
                        entry.limitations.clone(),
                    ));
                }
            }
        }

        if !candidates.iter().any(|c| c.score >= STRONG_MATCH) {
            for profile in self.knowledge.profiles() {
                for phrase in &profile.when_to_use {
                    if labels_match(&job, phrase) {
                        candidates.push(recommendation(
                            profile,
                            PHRASE_SCORE,
                            format!("Suited to {}", phrase),
                            None,
                        ));
                    }
                }
            }
        }

        let mut best: HashMap<String, ToolRecommendation> = HashMap::new();
        for candidate in candidates {
            match best.get(&candidate.tool_id) {
                Some(existing) if existing.score >= candidate.score => {}
                _ => {
                    best.insert(candidate.tool_id.clone(), candidate);
                }
            }
        }

        let mut ranked: Vec<ToolRecommendation> = best.into_values().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.daily_rental_rate.cmp(&b.daily_rental_rate))
                .then_with(|| a.tool_name.cmp(&b.tool_name))
        });

        tracing::debug!(job = %job, matches = ranked.len(), "Ranked tools");
        ranked
    }

    /// Compare hiring a tool for `expected_usage_days` against buying it.
    ///
    /// Unknown tools get general advice rather than an error.
    pub fn buy_vs_rent(&self, tool_name: &str, expected_usage_days: u32) -> BuyVsRent {
        let Some(profile) = self.knowledge.find(tool_name) else {
            tracing::debug!(tool = tool_name, "No profile for tool, giving general advice");
            return BuyVsRent {
                tool_name: tool_name.to_string(),
                recommendation: Recommendation::Depends,
                total_rental_cost: None,
                purchase_cost: None,
                savings: None,
                advice: "No pricing data for this tool. As a rule of thumb, hire for one-off \
                         jobs and buy once total hire charges would pass about half the \
                         purchase price, or if you expect to use it on several projects."
                    .to_string(),
            };
        };

        let rental = money(profile.daily_rental_rate * Decimal::from(expected_usage_days));
        let purchase = money(profile.purchase_cost);
        let (recommendation, savings, advice) = if expected_usage_days > profile.buy_threshold_days
        {
            let savings = (rental - purchase).max(Decimal::ZERO);
            (
                Recommendation::Buy,
                savings,
                format!(
                    "Buy: {} days of hire is past the {}-day break-even for the {}.",
                    expected_usage_days, profile.buy_threshold_days, profile.name
                ),
            )
        } else {
            let savings = (purchase - rental).max(Decimal::ZERO);
            (
                Recommendation::Rent,
                savings,
                format!(
                    "Hire: {} days is within the {}-day break-even for the {}.",
                    expected_usage_days, profile.buy_threshold_days, profile.name
                ),
            )
        };

        BuyVsRent {
            tool_name: profile.name.clone(),
            recommendation,
            total_rental_cost: Some(rental),
            purchase_cost: Some(purchase),
            savings: Some(money(savings)),
            advice,
        }
    }
}

fn labels_match(job: &str, label: &str) -> bool {
    let label = label.trim().to_lowercase();
    !label.is_empty() && (job.contains(&label) || label.contains(job))
}

fn recommendation(
    profile: &ToolProfile,
    score: u8,
    reason: String,
    limitations: Option<String>,
) -> ToolRecommendation {
    ToolRecommendation {
        tool_id: profile.id.clone(),
        tool_name: profile.name.clone(),
        score,
        reason,
        limitations: limitations.or_else(|| profile.limitations.clone()),
        daily_rental_rate: profile.daily_rental_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn advisor() -> ToolAdvisor {
        ToolAdvisor::new(ToolKnowledgeBase::builtin().unwrap())
    }

    fn ids(recs: &[ToolRecommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.tool_id.as_str()).collect()
    }

    #[test]
    fn test_suitability_ranking_dedupes() {
        let recs = advisor().recommend_tools("Tiling the bathroom");
        assert_eq!(ids(&recs), vec!["tile-cutter", "manual-tile-cutter", "sds-drill"]);
        // Best of tiling (9) and bathroom (8).
        assert_eq!(recs[0].score, 9);
        assert_eq!(recs[0].reason, "clean straight and mitre cuts");
    }

    #[test]
    fn test_limitations_fall_back_to_profile() {
        let recs = advisor().recommend_tools("patio");
        assert_eq!(ids(&recs), vec!["plate-compactor", "mini-digger", "cement-mixer"]);
        assert_eq!(
            recs[1].limitations.as_deref(),
            Some("needs at least 1m access width")
        );
        assert!(recs[0].limitations.is_none());
    }

    #[test]
    fn test_phrase_matching_when_no_strong_match() {
        let recs = advisor().recommend_tools("stripping wallpaper in the hall");
        assert_eq!(ids(&recs), vec!["wallpaper-steamer"]);
        assert_eq!(recs[0].score, PHRASE_SCORE);
        assert_eq!(recs[0].reason, "Suited to stripping wallpaper");
    }

    #[test]
    fn test_ties_prefer_cheaper_then_name() {
        let tool = |id: &str, name: &str, daily| ToolProfile {
            id: id.to_string(),
            name: name.to_string(),
            daily_rental_rate: daily,
            purchase_cost: dec!(100),
            buy_threshold_days: 5,
            suitability: vec![JobSuitability {
                job_type: "decking".to_string(),
                score: 8,
                reason: "fits".to_string(),
                limitations: None,
            }],
            when_to_use: vec![],
            limitations: None,
        };
        let kb = ToolKnowledgeBase::new(vec![
            tool("mitre-saw", "Mitre saw", dec!(30)),
            tool("impact-driver", "Impact driver", dec!(15)),
            tool("circular-saw", "Circular saw", dec!(30)),
        ])
        .unwrap();
        let recs = ToolAdvisor::new(kb).recommend_tools("decking");
        assert_eq!(ids(&recs), vec!["impact-driver", "circular-saw", "mitre-saw"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(advisor().recommend_tools("spaceship repair").is_empty());
        assert!(advisor().recommend_tools("   ").is_empty());
    }

    #[test]
    fn test_buy_when_past_threshold() {
        let result = advisor().buy_vs_rent("tile cutter", 10);
        assert_eq!(result.tool_name, "Electric tile cutter");
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.total_rental_cost, Some(dec!(250)));
        assert_eq!(result.purchase_cost, Some(dec!(180)));
        assert_eq!(result.savings, Some(dec!(70)));
    }

    #[test]
    fn test_rent_within_threshold() {
        let result = advisor().buy_vs_rent("mini-digger", 3);
        assert_eq!(result.recommendation, Recommendation::Rent);
        assert_eq!(result.total_rental_cost, Some(dec!(450)));
        assert_eq!(result.savings, Some(dec!(14550)));

        // At the threshold exactly, still hire.
        let result = advisor().buy_vs_rent("Electric tile cutter", 7);
        assert_eq!(result.recommendation, Recommendation::Rent);
        assert_eq!(result.savings, Some(dec!(5)));
    }

    #[test]
    fn test_unknown_tool_depends() {
        let result = advisor().buy_vs_rent("laser level", 4);
        assert_eq!(result.recommendation, Recommendation::Depends);
        assert!(result.total_rental_cost.is_none());
        assert!(result.advice.contains("rule of thumb"));
    }

    #[test]
    fn test_knowledge_base_rejects_duplicates() {
        let mut profiles = builtin_profiles();
        profiles.push(profiles[0].clone());
        let err = ToolKnowledgeBase::new(profiles).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidItem { ref id, .. } if id == "tile-cutter"));
    }
}
