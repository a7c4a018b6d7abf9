//! Catalog snapshots: all engine data in one JSON document.
//!
//! # File Layout
//!
//! ```text
//! {
//!   "templates":     [ ProjectTemplate, ... ],
//!   "tools":         [ ToolItem, ... ],
//!   "labor":         [ LaborItem, ... ],
//!   "materials":     [ MaterialItem, ... ],
//!   "tool_profiles": [ ToolProfile, ... ]
//! }
//! ```
//!
//! Every section is optional in the file. Loading validates all items, so a
//! snapshot that loads can always be turned into [`Sources`].

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::advisory::{ToolAdvisor, ToolKnowledgeBase, ToolProfile, builtin_profiles};
use crate::config::EngineConfig;
use crate::error::CatalogError;
use crate::estimation::Estimator;
use crate::pricing::catalog::validate_items;
use crate::pricing::{
    InMemoryCatalog, LABOR_CATALOG, LaborItem, MATERIAL_CATALOG, MaterialItem, TOOL_CATALOG,
    ToolItem, seed,
};
use crate::templates::{
    InMemoryTemplateRegistry, ProjectTemplate, TEMPLATE_SOURCE, builtin_templates,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub templates: Vec<ProjectTemplate>,
    #[serde(default)]
    pub tools: Vec<ToolItem>,
    #[serde(default)]
    pub labor: Vec<LaborItem>,
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    #[serde(default)]
    pub tool_profiles: Vec<ToolProfile>,
}

impl CatalogSnapshot {
    /// The data compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
            tools: seed::tools(),
            labor: seed::labor(),
            materials: seed::materials(),
            tool_profiles: builtin_profiles(),
        }
    }

    /// Read and validate a snapshot file.
    pub async fn from_path(path: &Path) -> Result<Self, CatalogError> {
        if !path.is_file() {
            return Err(CatalogError::Snapshot {
                reason: format!("{} is not a file", path.display()),
            });
        }
        let json = fs::read_to_string(path).await?;
        let snapshot = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            templates = snapshot.templates.len(),
            tools = snapshot.tools.len(),
            labor = snapshot.labor.len(),
            materials = snapshot.materials.len(),
            tool_profiles = snapshot.tool_profiles.len(),
            "Loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Parse and validate a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.templates.is_empty() {
            return Err(CatalogError::Snapshot {
                reason: "snapshot has no project templates".to_string(),
            });
        }
        let mut keys = HashSet::new();
        for template in &self.templates {
            template
                .validate()
                .map_err(|reason| CatalogError::invalid_item(&template.project_type, reason))?;
            if !keys.insert(template.project_type.to_lowercase()) {
                return Err(CatalogError::invalid_item(
                    &template.project_type,
                    "duplicate project type",
                ));
            }
        }
        validate_items(&self.tools)?;
        validate_items(&self.labor)?;
        validate_items(&self.materials)?;
        ToolKnowledgeBase::new(self.tool_profiles.clone())?;
        Ok(())
    }

    /// Build the in-memory sources backing an estimator and an advisor.
    pub fn into_sources(self) -> Result<Sources, CatalogError> {
        Ok(Sources {
            templates: Arc::new(InMemoryTemplateRegistry::new(TEMPLATE_SOURCE, self.templates)?),
            labor: Arc::new(InMemoryCatalog::new(LABOR_CATALOG, self.labor)?),
            materials: Arc::new(InMemoryCatalog::new(MATERIAL_CATALOG, self.materials)?),
            tools: Arc::new(InMemoryCatalog::new(TOOL_CATALOG, self.tools)?),
            knowledge: ToolKnowledgeBase::new(self.tool_profiles)?,
        })
    }
}

/// Validated in-memory sources.
pub struct Sources {
    pub templates: Arc<InMemoryTemplateRegistry>,
    pub labor: Arc<InMemoryCatalog<LaborItem>>,
    pub materials: Arc<InMemoryCatalog<MaterialItem>>,
    pub tools: Arc<InMemoryCatalog<ToolItem>>,
    pub knowledge: ToolKnowledgeBase,
}

impl Sources {
    pub fn estimator(&self, config: EngineConfig) -> Estimator {
        Estimator::new(
            self.templates.clone(),
            self.labor.clone(),
            self.materials.clone(),
            self.tools.clone(),
            config,
        )
    }

    pub fn advisor(&self) -> ToolAdvisor {
        ToolAdvisor::new(self.knowledge.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::EstimateRequest;
    use crate::pricing::{Complexity, QualityTier};
    use std::io::Write;

    #[test]
    fn test_builtin_snapshot_is_valid() {
        assert!(CatalogSnapshot::builtin().validate().is_ok());
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string_pretty(&CatalogSnapshot::builtin()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = CatalogSnapshot::from_path(file.path()).await.unwrap();
        assert_eq!(loaded, CatalogSnapshot::builtin());

        let sources = loaded.into_sources().unwrap();
        let request =
            EstimateRequest::new("kitchen", Complexity::Standard, QualityTier::Budget);
        let estimate = sources
            .estimator(EngineConfig::default())
            .estimate(&request)
            .await
            .unwrap();
        assert_eq!(estimate.project_type, "kitchen renovation");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogSnapshot::from_path(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Snapshot { .. }));
    }

    #[test]
    fn test_sections_are_optional() {
        let json = r#"{
            "templates": [{
                "project_type": "shed base",
                "typical_area": {"min": "6", "max": "12"},
                "diy_hours": 16,
                "professional_hours": 8,
                "requires_building_control": false
            }]
        }"#;
        let snapshot = CatalogSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.templates.len(), 1);
        assert!(snapshot.tools.is_empty());
    }

    #[test]
    fn test_rejects_bad_data() {
        assert!(matches!(
            CatalogSnapshot::from_json("{}").unwrap_err(),
            CatalogError::Snapshot { .. }
        ));
        assert!(matches!(
            CatalogSnapshot::from_json("{not json").unwrap_err(),
            CatalogError::Json(_)
        ));

        let mut snapshot = CatalogSnapshot::builtin();
        snapshot.materials[0].waste_factor = rust_decimal_macros::dec!(0.9);
        let err = snapshot.validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidItem { ref id, .. } if id == "ceramic-tiles"));

        let mut snapshot = CatalogSnapshot::builtin();
        snapshot.templates.push(snapshot.templates[0].clone());
        assert!(snapshot.validate().is_err());
    }
}
