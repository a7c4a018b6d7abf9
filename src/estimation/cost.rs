//! Per-category cost formulas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::VarianceBand;
use crate::error::EstimateError;
use crate::pricing::{
    Complexity, LaborItem, MaterialItem, Priced, PricedItem, QualityTier, RateStructure, ToolItem,
};
use crate::templates::Range;

/// Where a line item's figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    Catalog,
    /// Placeholder substituted for an empty or unavailable catalog.
    Synthetic,
    Template,
}

/// One priced line in a category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub source: ItemSource,
    pub unit: String,
    /// Rate after regional, seasonal and market adjustments.
    pub unit_rate: Decimal,
    pub quantity: Decimal,
    /// Composed adjustment multiplier applied to the catalog rate.
    pub adjustment: Decimal,
    pub cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_discount_available: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Min/max and itemisation for one cost category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub min: Decimal,
    pub max: Decimal,
    pub items: Vec<LineItem>,
}

impl CategoryBreakdown {
    /// A category that was not requested.
    pub fn empty() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::ZERO,
            items: Vec::new(),
        }
    }

    /// Sum the lines and widen the total by a variance band.
    ///
    /// `None` when the widened total does not fit in a `Decimal`.
    pub fn banded(items: Vec<LineItem>, band: VarianceBand) -> Option<Self> {
        let total = checked_sum(items.iter().map(|i| i.cost))?;
        Some(Self {
            min: money(total.checked_mul(band.lower())?),
            max: money(total.checked_mul(band.upper())?),
            items,
        })
    }

    /// Fixed bounds, used for synthetic and template-derived categories.
    pub fn fixed(bounds: Range, items: Vec<LineItem>) -> Self {
        Self {
            min: money(bounds.min),
            max: money(bounds.max),
            items,
        }
    }

    pub fn range(&self) -> Range {
        Range::new(self.min, self.max)
    }
}

/// Round to pennies.
pub fn money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Sum that stops at the first overflow.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
}

fn too_large(name: &str) -> EstimateError {
    EstimateError::invalid(name, "too large to price")
}

/// Labour line: rate by structure, times complexity, clipped up to the
/// minimum charge.
///
/// `per_item` and `per_day` rates are multiplied by `unit_quantity`
/// (one unit unless the caller says otherwise). A cost too large to
/// represent is an `InvalidParameter` naming the quantity that drove it.
pub fn labor_line(
    priced: &Priced<LaborItem>,
    area: Decimal,
    complexity: Complexity,
    unit_quantity: Decimal,
) -> Result<LineItem, EstimateError> {
    let item = &priced.item;
    let (quantity, source) = match item.rate_structure {
        RateStructure::PerSqm => (area, "area"),
        RateStructure::FixedPrice => (Decimal::ONE, "area"),
        RateStructure::PerItem | RateStructure::PerDay => (unit_quantity, "unit_quantity"),
    };
    let factor = item.factors().multiplier(complexity);
    let mut cost = priced
        .adjusted_rate
        .checked_mul(quantity)
        .and_then(|c| c.checked_mul(factor))
        .ok_or_else(|| too_large(source))?;

    let mut notes = vec![format!("{} complexity x{}", complexity, factor.normalize())];
    if let Some(min_charge) = item.min_charge
        && cost < min_charge
    {
        cost = min_charge;
        notes.push(format!("minimum charge {} applied", min_charge.normalize()));
    }

    Ok(LineItem {
        id: item.id.clone(),
        name: item.name.clone(),
        source: ItemSource::Catalog,
        unit: item.unit.clone(),
        unit_rate: money(priced.adjusted_rate),
        quantity,
        adjustment: priced.multiplier,
        cost: money(cost),
        deposit: None,
        bulk_discount_available: None,
        notes,
    })
}

/// Material line: tier price × area × (1 + waste).
///
/// Returns `false` alongside the line when the tier has no price; the line
/// is then costed at zero.
pub fn material_line(
    priced: &Priced<MaterialItem>,
    area: Decimal,
    tier: QualityTier,
) -> Result<(LineItem, bool), EstimateError> {
    let item = &priced.item;
    let quantity = area
        .checked_mul(Decimal::ONE + item.waste_factor)
        .ok_or_else(|| too_large("area"))?;
    let tier_price = item.price(tier);
    let unit_rate = tier_price.map(|p| priced.adjust(p)).unwrap_or(Decimal::ZERO);
    let cost = unit_rate
        .checked_mul(quantity)
        .ok_or_else(|| too_large("area"))?;

    let mut notes = Vec::new();
    if tier_price.is_none() {
        notes.push(format!("no {} price listed", tier));
    }
    if !item.waste_factor.is_zero() {
        notes.push(format!(
            "includes {}% waste allowance",
            (item.waste_factor * Decimal::ONE_HUNDRED).normalize()
        ));
    }
    let discount = item.discount_for(quantity);

    let line = LineItem {
        id: item.id.clone(),
        name: item.name.clone(),
        source: ItemSource::Catalog,
        unit: item.unit.clone(),
        unit_rate: money(unit_rate),
        quantity,
        adjustment: priced.multiplier,
        cost: money(cost),
        deposit: None,
        bulk_discount_available: (!discount.is_zero()).then_some(discount),
        notes,
    };
    Ok((line, tier_price.is_some()))
}

/// Tool line: one week's hire at the adjusted weekly rate.
pub fn tool_line(priced: &Priced<ToolItem>) -> LineItem {
    let item = &priced.item;
    let weekly = priced.adjust(item.effective_weekly_rate());

    let mut notes = Vec::new();
    if item.weekly_rate.is_none() {
        notes.push("weekly rate estimated as 5 daily rates".to_string());
    }
    if item.license_required {
        notes.push("licensed operator required".to_string());
    }
    if item.min_hire_days > 1 {
        notes.push(format!("minimum hire {} days", item.min_hire_days));
    }

    LineItem {
        id: item.id().to_string(),
        name: item.name.clone(),
        source: ItemSource::Catalog,
        unit: "week".to_string(),
        unit_rate: money(weekly),
        quantity: Decimal::ONE,
        adjustment: priced.multiplier,
        cost: money(weekly),
        deposit: (!item.deposit.is_zero()).then_some(item.deposit),
        bulk_discount_available: None,
        notes,
    }
}
