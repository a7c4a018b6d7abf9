//! Priced catalog items: tool hire, labour rates and materials.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::pricing::adjustment::Adjustment;
use crate::pricing::tier::{ComplexityFactors, QualityTier};

/// Common behaviour of the three catalog item kinds.
pub trait PricedItem: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Rate the catalog orders by, before adjustment.
    fn primary_rate(&self) -> Decimal;

    fn adjustments(&self) -> &[Adjustment];

    /// Lowercase-comparable fields used for text matching.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether a licence or ticket is needed to use or supply this item.
    fn license_required(&self) -> bool {
        false
    }

    /// Check data invariants.
    fn validate(&self) -> Result<(), String>;
}

/// Case-insensitive substring match in either direction.
///
/// "bathroom renovation" matches an item tagged "bathroom", and "tile"
/// matches an item named "Tile cutter".
pub fn matches_text<T: PricedItem>(item: &T, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields().into_iter().any(|field| {
        let field = field.trim().to_lowercase();
        !field.is_empty() && (field.contains(&needle) || needle.contains(&field))
    })
}

fn validate_adjustments(adjustments: &[Adjustment]) -> Result<(), String> {
    adjustments.iter().try_for_each(Adjustment::validate)
}

/// Equipment available for hire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub daily_rate: Decimal,
    #[serde(default)]
    pub weekly_rate: Option<Decimal>,
    #[serde(default)]
    pub weekend_rate: Option<Decimal>,
    #[serde(default)]
    pub monthly_rate: Option<Decimal>,
    #[serde(default)]
    pub deposit: Decimal,
    #[serde(default = "default_min_hire_days")]
    pub min_hire_days: u32,
    #[serde(default)]
    pub license_required: bool,
    #[serde(default)]
    pub training_required: bool,
    /// Project types this tool is typically hired for.
    #[serde(default)]
    pub project_types: Vec<String>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

fn default_min_hire_days() -> u32 {
    1
}

impl ToolItem {
    /// Weekly rate, or five daily rates when the supplier quotes none.
    pub fn effective_weekly_rate(&self) -> Decimal {
        self.weekly_rate.unwrap_or(self.daily_rate * dec!(5))
    }
}

impl PricedItem for ToolItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn primary_rate(&self) -> Decimal {
        self.daily_rate
    }

    fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.category.as_str()];
        fields.extend(self.project_types.iter().map(String::as_str));
        fields
    }

    fn license_required(&self) -> bool {
        self.license_required
    }

    fn validate(&self) -> Result<(), String> {
        if self.daily_rate < Decimal::ZERO {
            return Err(format!("daily rate {} is negative", self.daily_rate));
        }
        if let Some(weekly) = self.weekly_rate {
            if weekly < Decimal::ZERO {
                return Err(format!("weekly rate {} is negative", weekly));
            }
            if weekly > self.daily_rate * dec!(7) {
                return Err(format!(
                    "weekly rate {} exceeds seven daily rates ({})",
                    weekly,
                    self.daily_rate * dec!(7)
                ));
            }
        }
        if self.deposit < Decimal::ZERO {
            return Err(format!("deposit {} is negative", self.deposit));
        }
        validate_adjustments(&self.adjustments)
    }
}

/// Skilled trade supplying a labour rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    Builder,
    Plumber,
    Electrician,
    Carpenter,
    Plasterer,
    Tiler,
    Decorator,
    Roofer,
    Landscaper,
    Flooring,
    Kitchen,
    General,
}

impl Trade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trade::Builder => "builder",
            Trade::Plumber => "plumber",
            Trade::Electrician => "electrician",
            Trade::Carpenter => "carpenter",
            Trade::Plasterer => "plasterer",
            Trade::Tiler => "tiler",
            Trade::Decorator => "decorator",
            Trade::Roofer => "roofer",
            Trade::Landscaper => "landscaper",
            Trade::Flooring => "flooring",
            Trade::Kitchen => "kitchen",
            Trade::General => "general",
        }
    }
}

/// How a labour rate is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateStructure {
    PerSqm,
    PerItem,
    PerDay,
    FixedPrice,
}

/// A tradesperson's rate for a type of job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborItem {
    pub id: String,
    pub name: String,
    pub trade: Trade,
    pub job_type: String,
    pub rate_structure: RateStructure,
    pub base_rate: Decimal,
    pub unit: String,
    #[serde(default)]
    pub min_charge: Option<Decimal>,
    #[serde(default)]
    pub typical_duration_hours: Option<u32>,
    #[serde(default)]
    pub complexity_factors: Option<ComplexityFactors>,
    #[serde(default)]
    pub license_required: bool,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

impl LaborItem {
    /// The item's own complexity table, else the global default.
    pub fn factors(&self) -> ComplexityFactors {
        self.complexity_factors.unwrap_or(ComplexityFactors::DEFAULT)
    }
}

impl PricedItem for LaborItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn primary_rate(&self) -> Decimal {
        self.base_rate
    }

    fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.job_type.as_str(), self.trade.as_str()]
    }

    fn license_required(&self) -> bool {
        self.license_required
    }

    fn validate(&self) -> Result<(), String> {
        if self.base_rate < Decimal::ZERO {
            return Err(format!("base rate {} is negative", self.base_rate));
        }
        if let Some(min) = self.min_charge
            && min < Decimal::ZERO
        {
            return Err(format!("minimum charge {} is negative", min));
        }
        if let Some(factors) = &self.complexity_factors {
            factors.validate()?;
        }
        validate_adjustments(&self.adjustments)
    }
}

/// Quantity breakpoint for a bulk discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulkDiscount {
    pub min_quantity: Decimal,
    /// Fraction off the unit price, in `[0, 1)`.
    pub discount: Decimal,
}

/// A building material with budget, mid-range and premium prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub mid_range: Option<Decimal>,
    #[serde(default)]
    pub premium: Option<Decimal>,
    pub unit: String,
    #[serde(default)]
    pub waste_factor: Decimal,
    #[serde(default)]
    pub bulk_discounts: Vec<BulkDiscount>,
    /// Project types this material is used in.
    #[serde(default)]
    pub project_types: Vec<String>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

impl MaterialItem {
    /// Unadjusted unit price for a tier, if the catalog has one.
    pub fn price(&self, tier: QualityTier) -> Option<Decimal> {
        match tier {
            QualityTier::Budget => self.budget,
            QualityTier::MidRange => self.mid_range,
            QualityTier::Premium => self.premium,
        }
    }

    /// Discount fraction for the deepest breakpoint `quantity` reaches.
    pub fn discount_for(&self, quantity: Decimal) -> Decimal {
        self.bulk_discounts
            .iter()
            .take_while(|b| b.min_quantity <= quantity)
            .last()
            .map(|b| b.discount)
            .unwrap_or(Decimal::ZERO)
    }
}

impl PricedItem for MaterialItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn primary_rate(&self) -> Decimal {
        self.mid_range
            .or(self.budget)
            .or(self.premium)
            .unwrap_or(Decimal::ZERO)
    }

    fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.category.as_str()];
        fields.extend(self.project_types.iter().map(String::as_str));
        fields
    }

    fn validate(&self) -> Result<(), String> {
        let tiers: Vec<(QualityTier, Decimal)> = QualityTier::ALL
            .iter()
            .filter_map(|t| self.price(*t).map(|p| (*t, p)))
            .collect();
        if let Some((tier, price)) = tiers.iter().find(|(_, p)| *p < Decimal::ZERO) {
            return Err(format!("{} price {} is negative", tier, price));
        }
        for pair in tiers.windows(2) {
            let ((lo_tier, lo), (hi_tier, hi)) = (pair[0], pair[1]);
            if lo > hi {
                return Err(format!(
                    "{} price {} exceeds {} price {}",
                    lo_tier, lo, hi_tier, hi
                ));
            }
        }
        if self.waste_factor < Decimal::ZERO || self.waste_factor > dec!(0.5) {
            return Err(format!(
                "waste factor {} outside [0, 0.5]",
                self.waste_factor
            ));
        }
        for pair in self.bulk_discounts.windows(2) {
            if pair[1].min_quantity <= pair[0].min_quantity {
                return Err("bulk discount quantities must strictly increase".to_string());
            }
            if pair[1].discount < pair[0].discount {
                return Err("bulk discounts must not decrease with quantity".to_string());
            }
        }
        if let Some(bad) = self
            .bulk_discounts
            .iter()
            .find(|b| b.discount < Decimal::ZERO || b.discount >= Decimal::ONE)
        {
            return Err(format!("bulk discount {} outside [0, 1)", bad.discount));
        }
        validate_adjustments(&self.adjustments)
    }
}
