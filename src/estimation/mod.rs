//! Cost and time estimation for construction projects.
//!
//! Estimates are built from:
//! - A project template (scale, baseline hours, permits)
//! - Labour, material and tool catalogs, queried concurrently
//! - Complexity and quality tiers, plus location and season adjustments
//!
//! # Flow
//!
//! ```text
//!   request ──▶ validate ──▶ template ──┬──▶ labour catalog ───┐
//!                                       ├──▶ material catalog ─┼──▶ per-category totals
//!                                       └──▶ tool catalog ─────┘          │
//!                                                                         ▼
//!                     CostEstimate ◀── confidence ◀── time ◀── variance bands + permits
//! ```
//!
//! A catalog that errors, times out or returns nothing is replaced by a
//! synthetic default and the estimate is marked low confidence. A missing
//! template is fatal.

mod confidence;
mod cost;
mod fallback;
mod request;
mod time;

pub use confidence::{ConfidenceLevel, DataQuality, Provenance};
pub use cost::{
    CategoryBreakdown, ItemSource, LineItem, checked_sum, labor_line, material_line, money,
    tool_line,
};
pub use fallback::{FallbackCategory, synthetic};
pub use request::{EstimateRequest, RawEstimateRequest};
pub use time::{TimeEstimates, TimeEstimator, format_hours};

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::{CatalogError, EstimateError};
use crate::pricing::{
    AdjustmentContext, CachedCatalog, Catalog, CatalogFilter, LaborCatalog, LaborItem,
    MaterialCatalog, MaterialItem, Priced, PricedItem, Season, ToolCatalog, ToolItem,
};
use crate::templates::{ProjectTemplate, Range, TemplateRegistry};

/// Breakdown of an estimate by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: CategoryBreakdown,
    pub labor: CategoryBreakdown,
    pub tools: CategoryBreakdown,
    pub permits: CategoryBreakdown,
    pub total: Range,
}

/// Average regional uplift applied to the priced items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAdjustments {
    pub labor_multiplier: Decimal,
    pub tool_multiplier: Decimal,
    pub description: String,
}

/// Result of an estimate. Built fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// The request as received.
    pub request: EstimateRequest,
    /// Key of the template the request resolved to.
    pub project_type: String,
    /// Area used, after defaulting.
    pub area: Decimal,
    /// Season used for adjustments, after defaulting.
    pub season: Season,
    pub cost_breakdown: CostBreakdown,
    pub time_estimates: TimeEstimates,
    pub complexity_factors_applied: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_adjustments: Option<LocationAdjustments>,
    pub data_quality: DataQuality,
}

/// The cost aggregator.
pub struct Estimator {
    templates: Arc<dyn TemplateRegistry>,
    labor: Arc<LaborCatalog>,
    materials: Arc<MaterialCatalog>,
    tools: Arc<ToolCatalog>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    time: TimeEstimator,
}

impl Estimator {
    /// Create an estimator over the given sources.
    ///
    /// Catalogs are wrapped in a TTL cache when `config.cache_enabled`.
    pub fn new(
        templates: Arc<dyn TemplateRegistry>,
        labor: Arc<LaborCatalog>,
        materials: Arc<MaterialCatalog>,
        tools: Arc<ToolCatalog>,
        config: EngineConfig,
    ) -> Self {
        let (labor, materials, tools) = if config.cache_enabled {
            (
                cached(labor, &config),
                cached(materials, &config),
                cached(tools, &config),
            )
        } else {
            (labor, materials, tools)
        };
        Self {
            templates,
            labor,
            materials,
            tools,
            config,
            clock: Arc::new(SystemClock),
            time: TimeEstimator::new(),
        }
    }

    /// Replace the clock, e.g. with a fixed one in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce a bounded estimate for a project.
    pub async fn estimate(&self, request: &EstimateRequest) -> Result<CostEstimate, EstimateError> {
        request.validate()?;

        let template = self.templates.get(&request.project_type).await?;
        let area = request
            .area
            .unwrap_or_else(|| template.typical_area.midpoint());
        let unit_quantity = request.unit_quantity.unwrap_or(Decimal::ONE);

        let now = self.clock.now();
        let season = request.season.unwrap_or_else(|| Season::from_date(now));
        let ctx = AdjustmentContext {
            location: request.location.clone(),
            season: Some(season),
            now,
        };

        tracing::debug!(
            project_type = %template.project_type,
            %area,
            %season,
            location = ?request.location,
            "Querying pricing catalogs"
        );

        let limits = self.config.limits;
        let labor_filter = CatalogFilter::text(&template.project_type).with_limit(limits.labor);
        let material_filter =
            CatalogFilter::text(&template.project_type).with_limit(limits.materials);
        let tool_filter = CatalogFilter::text(&template.project_type).with_limit(limits.tools);

        let (labor_items, material_items, tool_items) = tokio::join!(
            self.query(self.labor.as_ref(), &labor_filter, &ctx),
            self.query(self.materials.as_ref(), &material_filter, &ctx),
            async {
                if request.include_tools {
                    Some(self.query(self.tools.as_ref(), &tool_filter, &ctx).await)
                } else {
                    None
                }
            },
        );

        let mut provenance = Provenance::new();
        provenance.record_template(self.templates.name());

        let labor = self.labor_breakdown(
            &labor_items,
            area,
            request,
            unit_quantity,
            &mut provenance,
        )?;
        let materials = self.material_breakdown(&material_items, area, request, &mut provenance)?;
        let tools = match &tool_items {
            Some(items) => self.tool_breakdown(items, &mut provenance),
            None => CategoryBreakdown::empty(),
        };
        let permits = permit_breakdown(&template);

        let categories = [&materials, &labor, &tools, &permits];
        let total = match (
            checked_sum(categories.iter().map(|c| c.min)),
            checked_sum(categories.iter().map(|c| c.max)),
        ) {
            (Some(min), Some(max)) => Range::new(min, max),
            _ => return Err(EstimateError::invalid("area", "estimate total too large to represent")),
        };

        let location_adjustments = request.location.as_deref().map(|location| {
            location_summary(location, &labor_items, tool_items.as_deref().unwrap_or(&[]))
        });

        let data_quality = provenance.into_data_quality(now);
        let estimate = CostEstimate {
            request: request.clone(),
            project_type: template.project_type.clone(),
            area,
            season,
            cost_breakdown: CostBreakdown {
                materials,
                labor,
                tools,
                permits,
                total,
            },
            time_estimates: self.time.estimate(&template, request.complexity),
            complexity_factors_applied: template.complexity_factors.clone(),
            location_adjustments,
            data_quality,
        };

        tracing::info!(
            project_type = %estimate.project_type,
            confidence = %estimate.data_quality.confidence,
            total_min = %estimate.cost_breakdown.total.min,
            total_max = %estimate.cost_breakdown.total.max,
            "Estimate complete"
        );

        Ok(estimate)
    }

    /// Query one catalog under the timeout. Failures come back empty.
    async fn query<T: PricedItem>(
        &self,
        catalog: &dyn Catalog<T>,
        filter: &CatalogFilter,
        ctx: &AdjustmentContext,
    ) -> Vec<Priced<T>> {
        let timeout = self.config.catalog_timeout;
        let result = match tokio::time::timeout(timeout, catalog.query(filter, ctx)).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout {
                catalog: catalog.name().to_string(),
                timeout,
            }),
        };

        match result {
            Ok(mut items) => {
                if let Some(limit) = filter.limit {
                    items.truncate(limit);
                }
                items
            }
            Err(e) => {
                tracing::warn!(catalog = catalog.name(), error = %e, "Catalog query failed, using fallback");
                Vec::new()
            }
        }
    }

    fn labor_breakdown(
        &self,
        items: &[Priced<LaborItem>],
        area: Decimal,
        request: &EstimateRequest,
        unit_quantity: Decimal,
        provenance: &mut Provenance,
    ) -> Result<CategoryBreakdown, EstimateError> {
        if items.is_empty() {
            provenance.record_fallback(self.labor.name());
            return Ok(synthetic(FallbackCategory::Labor));
        }
        provenance.record_priced(self.labor.name());
        let lines = items
            .iter()
            .map(|p| labor_line(p, area, request.complexity, unit_quantity))
            .collect::<Result<Vec<_>, _>>()?;
        CategoryBreakdown::banded(lines, self.config.bands.labor)
            .ok_or_else(|| EstimateError::invalid("area", "labour total too large to represent"))
    }

    fn material_breakdown(
        &self,
        items: &[Priced<MaterialItem>],
        area: Decimal,
        request: &EstimateRequest,
        provenance: &mut Provenance,
    ) -> Result<CategoryBreakdown, EstimateError> {
        if items.is_empty() {
            provenance.record_fallback(self.materials.name());
            return Ok(synthetic(FallbackCategory::Materials));
        }
        provenance.record_priced(self.materials.name());
        let mut lines = Vec::with_capacity(items.len());
        for priced in items {
            let (line, has_price) = material_line(priced, area, request.quality_tier)?;
            if !has_price {
                tracing::debug!(item = %priced.item.id, tier = %request.quality_tier, "Material tier price missing");
                provenance.record_partial_data();
            }
            lines.push(line);
        }
        CategoryBreakdown::banded(lines, self.config.bands.materials)
            .ok_or_else(|| EstimateError::invalid("area", "materials total too large to represent"))
    }

    fn tool_breakdown(
        &self,
        items: &[Priced<ToolItem>],
        provenance: &mut Provenance,
    ) -> CategoryBreakdown {
        if items.is_empty() {
            provenance.record_fallback(self.tools.name());
            return synthetic(FallbackCategory::Tools);
        }
        let lines = items.iter().map(tool_line).collect();
        match CategoryBreakdown::banded(lines, self.config.bands.tools) {
            Some(breakdown) => {
                provenance.record_priced(self.tools.name());
                breakdown
            }
            None => {
                tracing::warn!(catalog = self.tools.name(), "Tool hire total overflowed, using fallback");
                provenance.record_fallback(self.tools.name());
                synthetic(FallbackCategory::Tools)
            }
        }
    }
}

fn cached<T: PricedItem>(
    catalog: Arc<dyn Catalog<T>>,
    config: &EngineConfig,
) -> Arc<dyn Catalog<T>> {
    Arc::new(CachedCatalog::with_ttl(catalog, config.cache_ttl))
}

fn permit_breakdown(template: &ProjectTemplate) -> CategoryBreakdown {
    let range = template.permit_range();
    if !template.requires_building_control {
        return CategoryBreakdown::fixed(range, Vec::new());
    }
    let item = LineItem {
        id: "building-control".to_string(),
        name: "Building control application and inspections".to_string(),
        source: ItemSource::Template,
        unit: "application".to_string(),
        unit_rate: money(range.midpoint()),
        quantity: Decimal::ONE,
        adjustment: Decimal::ONE,
        cost: money(range.midpoint()),
        deposit: None,
        bulk_discount_available: None,
        notes: vec![format!(
            "typically {} to {}",
            range.min.normalize(),
            range.max.normalize()
        )],
    };
    CategoryBreakdown::fixed(range, vec![item])
}

fn mean_regional<T>(items: &[Priced<T>]) -> Decimal {
    if items.is_empty() {
        return Decimal::ONE;
    }
    let sum: Decimal = items.iter().map(|p| p.resolution.regional).sum();
    (sum / Decimal::from(items.len())).round_dp(2)
}

fn location_summary(
    location: &str,
    labor: &[Priced<LaborItem>],
    tools: &[Priced<ToolItem>],
) -> LocationAdjustments {
    let labor_multiplier = mean_regional(labor);
    let tool_multiplier = mean_regional(tools);
    let description = if labor_multiplier == Decimal::ONE && tool_multiplier == Decimal::ONE {
        format!("No regional price adjustment for {}", location)
    } else {
        format!(
            "Prices adjusted for {}: labour x{}, tool hire x{}",
            location,
            labor_multiplier.normalize(),
            tool_multiplier.normalize()
        )
    };
    LocationAdjustments {
        labor_multiplier,
        tool_multiplier,
        description,
    }
}
