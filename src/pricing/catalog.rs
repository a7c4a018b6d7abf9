//! Catalog trait and the in-memory implementation.

use std::collections::HashSet;
use std::marker::PhantomData;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CatalogError;
use crate::pricing::adjustment::{AdjustmentContext, Resolution, resolve};
use crate::pricing::item::{LaborItem, MaterialItem, PricedItem, ToolItem, matches_text};

/// Query parameters for a catalog lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Free text matched against names, categories and job types.
    pub text: Option<String>,
    /// Upper bound on the adjusted primary rate.
    pub max_rate: Option<Decimal>,
    /// Only items whose licence flag equals this value.
    pub license_required: Option<bool>,
    /// Keep at most this many of the cheapest matches.
    pub limit: Option<usize>,
}

impl CatalogFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_max_rate(mut self, max_rate: Decimal) -> Self {
        self.max_rate = Some(max_rate);
        self
    }

    pub fn with_license_required(mut self, required: bool) -> Self {
        self.license_required = Some(required);
        self
    }

    /// Stable key for caching this filter.
    pub fn cache_key(&self) -> String {
        format!(
            "text={}|max={}|licence={}|limit={}",
            self.text.as_deref().unwrap_or("").trim().to_lowercase(),
            self.max_rate.map(|d| d.normalize().to_string()).unwrap_or_default(),
            self.license_required.map(|b| b.to_string()).unwrap_or_default(),
            self.limit.map(|l| l.to_string()).unwrap_or_default(),
        )
    }
}

/// A catalog item with its adjustments resolved for one request.
///
/// The item itself is untouched; `adjusted_rate` is derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Priced<T> {
    pub item: T,
    #[serde(skip)]
    pub resolution: Resolution,
    pub multiplier: Decimal,
    pub adjusted_rate: Decimal,
}

impl<T: PricedItem> Priced<T> {
    pub fn new(item: T, ctx: &AdjustmentContext) -> Self {
        let resolution = resolve(item.adjustments(), ctx);
        let multiplier = resolution.multiplier();
        let adjusted_rate = item.primary_rate() * multiplier;
        Self {
            item,
            resolution,
            multiplier,
            adjusted_rate,
        }
    }

    /// Apply this item's composed multiplier to any of its raw amounts.
    pub fn adjust(&self, amount: Decimal) -> Decimal {
        amount * self.multiplier
    }
}

/// Read-only source of priced items.
#[async_trait]
pub trait Catalog<T: PricedItem>: Send + Sync {
    /// Name recorded in estimate provenance.
    fn name(&self) -> &str;

    /// Matching items, cheapest adjusted rate first.
    async fn query(
        &self,
        filter: &CatalogFilter,
        ctx: &AdjustmentContext,
    ) -> Result<Vec<Priced<T>>, CatalogError>;
}

pub type ToolCatalog = dyn Catalog<ToolItem>;
pub type LaborCatalog = dyn Catalog<LaborItem>;
pub type MaterialCatalog = dyn Catalog<MaterialItem>;

/// Apply a filter to a slice of items.
///
/// Shared by every catalog backend so ordering and limits behave the same.
pub fn select<T: PricedItem>(
    items: &[T],
    filter: &CatalogFilter,
    ctx: &AdjustmentContext,
) -> Vec<Priced<T>> {
    let mut matched: Vec<Priced<T>> = items
        .iter()
        .filter(|item| {
            filter
                .text
                .as_deref()
                .is_none_or(|text| matches_text(*item, text))
        })
        .filter(|item| {
            filter
                .license_required
                .is_none_or(|required| item.license_required() == required)
        })
        .map(|item| Priced::new(item.clone(), ctx))
        .filter(|priced| filter.max_rate.is_none_or(|max| priced.adjusted_rate <= max))
        .collect();

    matched.sort_by(|a, b| {
        a.adjusted_rate
            .cmp(&b.adjusted_rate)
            .then_with(|| a.item.id().cmp(b.item.id()))
    });

    if let Some(limit) = filter.limit {
        matched.truncate(limit);
    }
    matched
}

/// Check every item's invariants and reject duplicate ids.
pub fn validate_items<T: PricedItem>(items: &[T]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in items {
        item.validate()
            .map_err(|reason| CatalogError::invalid_item(item.id(), reason))?;
        if !seen.insert(item.id()) {
            return Err(CatalogError::invalid_item(item.id(), "duplicate id"));
        }
    }
    Ok(())
}

/// Catalog held entirely in memory, validated on construction.
pub struct InMemoryCatalog<T> {
    name: String,
    items: Vec<T>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: PricedItem> InMemoryCatalog<T> {
    /// Create a catalog, rejecting items that break their invariants.
    pub fn new(name: impl Into<String>, items: Vec<T>) -> Result<Self, CatalogError> {
        validate_items(&items)?;
        Ok(Self {
            name: name.into(),
            items,
            _kind: PhantomData,
        })
    }

    /// An empty catalog.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            _kind: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

#[async_trait]
impl<T: PricedItem> Catalog<T> for InMemoryCatalog<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(
        &self,
        filter: &CatalogFilter,
        ctx: &AdjustmentContext,
    ) -> Result<Vec<Priced<T>>, CatalogError> {
        Ok(select(&self.items, filter, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::adjustment::Adjustment;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn tool(id: &str, daily: Decimal, licence: bool) -> ToolItem {
        ToolItem {
            id: id.to_string(),
            name: format!("{} hire", id),
            category: "groundwork".to_string(),
            daily_rate: daily,
            weekly_rate: None,
            weekend_rate: None,
            monthly_rate: None,
            deposit: Decimal::ZERO,
            min_hire_days: 1,
            license_required: licence,
            training_required: false,
            project_types: vec!["patio".to_string()],
            adjustments: vec![],
        }
    }

    fn ctx() -> AdjustmentContext {
        AdjustmentContext::new(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_query_orders_by_adjusted_rate() {
        let mut digger = tool("digger", dec!(100), true);
        digger.adjustments = vec![Adjustment::regional("London", dec!(0.5))];
        let catalog = InMemoryCatalog::new(
            "tool_rentals",
            vec![digger, tool("compactor", dec!(60), false), tool("mixer", dec!(30), false)],
        )
        .unwrap();

        let ctx = ctx().with_location("London");
        let results = catalog.query(&CatalogFilter::text("patio"), &ctx).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|p| p.item.id.as_str()).collect();
        assert_eq!(ids, vec!["mixer", "digger", "compactor"]);

        // Raw data is never mutated.
        assert_eq!(results[1].item.daily_rate, dec!(100));
        assert_eq!(results[1].adjusted_rate, dec!(50));
    }

    #[tokio::test]
    async fn test_filters_and_limit() {
        let catalog = InMemoryCatalog::new(
            "tool_rentals",
            vec![
                tool("digger", dec!(100), true),
                tool("compactor", dec!(60), false),
                tool("mixer", dec!(30), false),
            ],
        )
        .unwrap();

        let filter = CatalogFilter::text("PATIO").with_max_rate(dec!(60));
        assert_eq!(catalog.query(&filter, &ctx()).await.unwrap().len(), 2);

        let filter = CatalogFilter::default().with_license_required(true);
        let results = catalog.query(&filter, &ctx()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item.id, "digger");

        let filter = CatalogFilter::default().with_limit(1);
        assert_eq!(catalog.query(&filter, &ctx()).await.unwrap()[0].item.id, "mixer");

        let filter = CatalogFilter::text("roofing");
        assert!(catalog.query(&filter, &ctx()).await.unwrap().is_empty());
    }

    #[test]
    fn test_construction_rejects_invalid_items() {
        let bad = tool("digger", dec!(-5), false);
        let err = InMemoryCatalog::new("tool_rentals", vec![bad]).err().unwrap();
        assert!(matches!(err, CatalogError::InvalidItem { ref id, .. } if id == "digger"));

        let dupes = vec![tool("mixer", dec!(30), false), tool("mixer", dec!(35), false)];
        assert!(InMemoryCatalog::new("tool_rentals", dupes.clone()).is_err());
        let err = validate_items(&dupes).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidItem { ref reason, .. } if reason == "duplicate id"));
    }

    #[test]
    fn test_cache_key_normalises_text() {
        let a = CatalogFilter::text(" Bathroom ").with_limit(5);
        let b = CatalogFilter::text("bathroom").with_limit(5);
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), CatalogFilter::text("bathroom").cache_key());
    }
}
