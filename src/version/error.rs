use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version pattern '{pattern}': expected 3 dot-separated components, got {components}")]
    InvalidPattern { pattern: String, components: usize },
}
