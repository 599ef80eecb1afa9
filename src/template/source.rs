//! Source trait for fetching templates and their versions

#[cfg(test)]
use mockall::automock;

use crate::template::error::SourceError;
use crate::template::types::{AppParameter, Template, TemplateVersion};

/// Trait for fetching templates from a catalog
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetches a template with all of its versions
    ///
    /// # Arguments
    /// * `project` - The project the template is allowed in
    /// * `name` - The template name
    ///
    /// # Returns
    /// * `Ok(Template)` - The template; versions keep the catalog's order
    /// * `Err(SourceError)` - If the template is unknown or the fetch fails
    async fn fetch_template(&self, project: &str, name: &str) -> Result<Template, SourceError>;

    /// Fetches all versions of a template
    async fn fetch_versions(
        &self,
        project: &str,
        name: &str,
    ) -> Result<Vec<TemplateVersion>, SourceError> {
        Ok(self.fetch_template(project, name).await?.versions)
    }

    /// Fetches the parameters of one exact template version
    async fn fetch_parameters(
        &self,
        project: &str,
        name: &str,
        version: &str,
    ) -> Result<Vec<AppParameter>, SourceError> {
        self.fetch_versions(project, name)
            .await?
            .into_iter()
            .find(|v| v.version == version)
            .map(|v| v.parameters)
            .ok_or_else(|| SourceError::VersionNotFound {
                name: name.to_string(),
                version: version.to_string(),
            })
    }
}
