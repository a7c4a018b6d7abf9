//! Pricing catalogs for tool hire, labour and materials.
//!
//! Catalogs are read-only from the engine's point of view:
//! - Items are validated once, when a catalog is built
//! - Each query resolves regional/seasonal/market adjustments per item
//! - Results come back cheapest first, with raw and adjusted rates side by side

pub mod adjustment;
pub mod cache;
pub mod catalog;
pub mod item;
pub mod seed;
pub mod tier;

pub use adjustment::{Adjustment, AdjustmentContext, AdjustmentKey, Resolution, resolve};
pub use cache::{CachedCatalog, QueryCache, TtlCache};
pub use catalog::{
    Catalog, CatalogFilter, InMemoryCatalog, LaborCatalog, MaterialCatalog, Priced, ToolCatalog,
};
pub use item::{BulkDiscount, LaborItem, MaterialItem, PricedItem, RateStructure, ToolItem, Trade};
pub use tier::{Complexity, ComplexityFactors, QualityTier, Season};

/// Catalog names recorded in estimate provenance.
pub const TOOL_CATALOG: &str = "tool_rentals";
pub const LABOR_CATALOG: &str = "labor_rates";
pub const MATERIAL_CATALOG: &str = "material_prices";
