//! Costwright: bounded cost and time estimates for construction projects.
//!
//! The engine combines a project template with labour, material and tool
//! hire catalogs. Catalog failures degrade an estimate's confidence instead
//! of failing it.
//!
//! ```text
//!   templates ─┐
//!   labour ────┤
//!   materials ─┼──▶ Estimator ──▶ CostEstimate
//!   tools ─────┘
//!
//!   tool profiles ──▶ ToolAdvisor ──▶ recommendations, buy vs hire
//! ```

pub mod advisory;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod estimation;
pub mod pricing;
pub mod snapshot;
pub mod templates;

pub use advisory::{BuyVsRent, Recommendation, ToolAdvisor, ToolKnowledgeBase, ToolRecommendation};
pub use config::EngineConfig;
pub use error::{CatalogError, ConfigError, EstimateError};
pub use estimation::{CostEstimate, EstimateRequest, Estimator};
pub use snapshot::{CatalogSnapshot, Sources};
