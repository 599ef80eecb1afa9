//! Local catalog file source
//!
//! The catalog maps project names to the templates allowed in them:
//!
//! ```yaml
//! projects:
//!   default:
//!     - name: isolated
//!       versions:
//!         - version: 1.0.0
//!           parameters: []
//! ```
//!
//! Files ending in `.json` are parsed as JSON, anything else as YAML.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::template::error::SourceError;
use crate::template::source::TemplateSource;
use crate::template::types::Template;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Catalog {
    projects: IndexMap<String, Vec<Template>>,
}

/// Template source reading a catalog file on every fetch
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_catalog(&self) -> Result<Catalog, SourceError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| SourceError::Io {
                    path: self.path.clone(),
                    source,
                })?;

        if content.trim().is_empty() {
            return Ok(Catalog::default());
        }

        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|e| SourceError::Catalog(e.to_string()))
        } else {
            serde_yaml_ng::from_str(&content).map_err(|e| SourceError::Catalog(e.to_string()))
        }
    }
}

#[async_trait::async_trait]
impl TemplateSource for CatalogFile {
    async fn fetch_template(&self, project: &str, name: &str) -> Result<Template, SourceError> {
        debug!("Reading template {} of project {} from {:?}", name, project, self.path);

        let mut catalog = self.read_catalog().await?;

        catalog
            .projects
            .swap_remove(project)
            .and_then(|templates| templates.into_iter().find(|t| t.name == name))
            .ok_or_else(|| SourceError::NotFound {
                project: project.to_string(),
                name: name.to_string(),
            })
    }
}
