//! Regional, seasonal and market-timing price adjustments.
//!
//! Each catalog item carries a table of [`Adjustment`]s. For a given
//! [`AdjustmentContext`] at most one adjustment per dimension applies, and
//! the applicable ones compose multiplicatively in a fixed order:
//!
//! ```text
//!   base rate ──▶ × regional ──▶ × seasonal ──▶ × market-timing ──▶ adjusted rate
//! ```
//!
//! Resolution is pure: no I/O, no clock reads. `now` comes in on the context.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::tier::Season;

/// A single multiplier rule keyed by one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    #[serde(flatten)]
    pub key: AdjustmentKey,
    pub multiplier: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Dimension an adjustment is keyed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjustmentKey {
    /// Region name ("London") or postcode prefix ("SW1").
    Regional { region: String },
    Seasonal { season: Season },
    /// Dated demand window, inclusive at both ends.
    Market {
        effective_from: DateTime<Utc>,
        effective_to: DateTime<Utc>,
    },
}

impl Adjustment {
    pub fn regional(region: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            key: AdjustmentKey::Regional {
                region: region.into(),
            },
            multiplier,
            reason: None,
        }
    }

    pub fn seasonal(season: Season, multiplier: Decimal) -> Self {
        Self {
            key: AdjustmentKey::Seasonal { season },
            multiplier,
            reason: None,
        }
    }

    pub fn market(
        effective_from: DateTime<Utc>,
        effective_to: DateTime<Utc>,
        multiplier: Decimal,
    ) -> Self {
        Self {
            key: AdjustmentKey::Market {
                effective_from,
                effective_to,
            },
            multiplier,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Check the positive multiplier and ordered window invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.multiplier <= Decimal::ZERO {
            return Err(format!(
                "adjustment multiplier {} must be positive",
                self.multiplier
            ));
        }
        match &self.key {
            AdjustmentKey::Regional { region } if region.trim().is_empty() => {
                Err("regional adjustment has an empty region".to_string())
            }
            AdjustmentKey::Market {
                effective_from,
                effective_to,
            } if effective_from > effective_to => Err(format!(
                "market window starts {} after it ends {}",
                effective_from, effective_to
            )),
            _ => Ok(()),
        }
    }
}

/// Request context the adjustments are resolved against.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentContext {
    pub location: Option<String>,
    pub season: Option<Season>,
    pub now: DateTime<Utc>,
}

impl AdjustmentContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            location: None,
            season: None,
            now,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }
}

/// Outcome of resolving one item's adjustment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub regional: Decimal,
    pub seasonal: Decimal,
    pub market: Decimal,
}

impl Resolution {
    pub const NEUTRAL: Resolution = Resolution {
        regional: Decimal::ONE,
        seasonal: Decimal::ONE,
        market: Decimal::ONE,
    };

    /// Composed multiplier, regional × seasonal × market.
    pub fn multiplier(&self) -> Decimal {
        self.regional * self.seasonal * self.market
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Resolve an adjustment table against a context.
pub fn resolve(adjustments: &[Adjustment], ctx: &AdjustmentContext) -> Resolution {
    let regional = ctx
        .location
        .as_deref()
        .and_then(|location| best_regional(adjustments, location))
        .unwrap_or(Decimal::ONE);

    let seasonal = ctx
        .season
        .and_then(|season| {
            adjustments.iter().find_map(|a| match &a.key {
                AdjustmentKey::Seasonal { season: s } if *s == season => Some(a.multiplier),
                _ => None,
            })
        })
        .unwrap_or(Decimal::ONE);

    let market = active_market_window(adjustments, ctx.now)
        .map(|a| a.multiplier)
        .unwrap_or(Decimal::ONE);

    Resolution {
        regional,
        seasonal,
        market,
    }
}

/// Longest matching region key wins; ties keep table order.
fn best_regional(adjustments: &[Adjustment], location: &str) -> Option<Decimal> {
    let location_lower = location.trim().to_lowercase();
    let compact: String = location_lower.chars().filter(|c| !c.is_whitespace()).collect();

    let mut best: Option<(usize, Decimal)> = None;
    for adjustment in adjustments {
        let AdjustmentKey::Regional { region } = &adjustment.key else {
            continue;
        };
        let key = region.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let key_compact: String = key.chars().filter(|c| !c.is_whitespace()).collect();
        let matches = location_lower.contains(&key) || compact.starts_with(&key_compact);
        if !matches {
            continue;
        }
        match best {
            Some((len, _)) if len >= key.len() => {}
            _ => best = Some((key.len(), adjustment.multiplier)),
        }
    }
    best.map(|(_, multiplier)| multiplier)
}

/// Window covering `now` with the earliest start; overlaps never error.
fn active_market_window(adjustments: &[Adjustment], now: DateTime<Utc>) -> Option<&Adjustment> {
    let mut selected: Option<(&Adjustment, DateTime<Utc>)> = None;
    for adjustment in adjustments {
        let AdjustmentKey::Market {
            effective_from,
            effective_to,
        } = &adjustment.key
        else {
            continue;
        };
        if *effective_from > now || now > *effective_to {
            continue;
        }
        match selected {
            Some((_, from)) if from <= *effective_from => {}
            _ => selected = Some((adjustment, *effective_from)),
        }
    }
    if let Some((adjustment, from)) = selected {
        tracing::debug!(effective_from = %from, multiplier = %adjustment.multiplier, "Market window applied");
    }
    selected.map(|(adjustment, _)| adjustment)
}
