//! HTTP catalog API implementation

use std::time::Duration;

use reqwest::Url;
use tracing::warn;

use crate::template::error::SourceError;
use crate::template::source::TemplateSource;
use crate::template::types::Template;

/// Template source backed by an HTTP catalog API
///
/// `GET {base_url}/projects/{project}/templates/{name}` returns one template
/// as JSON. `project` and `name` are percent-encoded as single path segments.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a new HttpCatalog for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent("vtemplate")
            .timeout(timeout)
            .build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::Catalog(format!("invalid catalog URL {base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn template_url(&self, project: &str, name: &str) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                SourceError::Catalog(format!("catalog URL {} has no path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["projects", project, "templates", name]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl TemplateSource for HttpCatalog {
    async fn fetch_template(&self, project: &str, name: &str) -> Result<Template, SourceError> {
        let url = self.template_url(project, name)?;

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                project: project.to_string(),
                name: name.to_string(),
            });
        }

        if !status.is_success() {
            warn!("Template catalog returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse template catalog response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })
    }
}
