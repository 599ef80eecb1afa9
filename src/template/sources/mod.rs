//! Concrete template sources

mod catalog_file;
mod http;

pub use catalog_file::CatalogFile;
pub use http::HttpCatalog;

use std::time::Duration;

use crate::config::HttpConfig;
use crate::template::error::SourceError;
use crate::template::source::TemplateSource;

/// Pick a source for `location`: http(s) URLs use [`HttpCatalog`], anything
/// else is treated as a catalog file path.
pub fn source_for(
    location: &str,
    http: &HttpConfig,
) -> Result<Box<dyn TemplateSource>, SourceError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let timeout = Duration::from_millis(http.timeout_ms);
        Ok(Box::new(HttpCatalog::new(location, timeout)?))
    } else {
        Ok(Box::new(CatalogFile::new(location)))
    }
}
