//! Template lookup.

use async_trait::async_trait;

use crate::error::{CatalogError, EstimateError};
use crate::templates::ProjectTemplate;

/// Lookup of project templates by project type.
#[async_trait]
pub trait TemplateRegistry: Send + Sync {
    /// Source name recorded in estimate provenance.
    fn name(&self) -> &str;

    /// First template whose key matches `project_type`.
    ///
    /// Matching is case-insensitive substring in either direction, so
    /// "Small bathroom renovation" finds "bathroom renovation".
    async fn get(&self, project_type: &str) -> Result<ProjectTemplate, EstimateError>;

    /// All templates in registry order.
    async fn list(&self) -> Vec<ProjectTemplate>;
}

/// Registry held in memory, validated on construction.
pub struct InMemoryTemplateRegistry {
    name: String,
    templates: Vec<ProjectTemplate>,
}

impl InMemoryTemplateRegistry {
    pub fn new(
        name: impl Into<String>,
        templates: Vec<ProjectTemplate>,
    ) -> Result<Self, CatalogError> {
        for template in &templates {
            template
                .validate()
                .map_err(|reason| CatalogError::invalid_item(&template.project_type, reason))?;
        }
        Ok(Self {
            name: name.into(),
            templates,
        })
    }

    fn find(&self, project_type: &str) -> Option<&ProjectTemplate> {
        let wanted = project_type.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.templates.iter().find(|t| {
            let key = t.project_type.trim().to_lowercase();
            key.contains(&wanted) || wanted.contains(&key)
        })
    }
}

#[async_trait]
impl TemplateRegistry for InMemoryTemplateRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, project_type: &str) -> Result<ProjectTemplate, EstimateError> {
        self.find(project_type)
            .cloned()
            .ok_or_else(|| EstimateError::TemplateNotFound {
                project_type: project_type.to_string(),
            })
    }

    async fn list(&self) -> Vec<ProjectTemplate> {
        self.templates.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{TEMPLATE_SOURCE, builtin_templates};

    fn registry() -> InMemoryTemplateRegistry {
        InMemoryTemplateRegistry::new(TEMPLATE_SOURCE, builtin_templates()).unwrap()
    }

    #[tokio::test]
    async fn test_case_insensitive_substring_lookup() {
        let registry = registry();
        let t = registry.get("Bathroom Renovation").await.unwrap();
        assert_eq!(t.project_type, "bathroom renovation");

        let t = registry.get("small bathroom renovation in a flat").await.unwrap();
        assert_eq!(t.project_type, "bathroom renovation");

        let t = registry.get("loft").await.unwrap();
        assert_eq!(t.project_type, "loft conversion");
    }

    #[tokio::test]
    async fn test_unknown_type_is_not_found() {
        let err = registry().get("spaceship repair").await.unwrap_err();
        assert!(matches!(err, EstimateError::TemplateNotFound { .. }));

        let err = registry().get("   ").await.unwrap_err();
        assert!(matches!(err, EstimateError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_list_preserves_order() {
        let registry = registry();
        let all = tokio_test::block_on(registry.list());
        assert_eq!(all.len(), builtin_templates().len());
        assert_eq!(all[0].project_type, builtin_templates()[0].project_type);
    }
}
