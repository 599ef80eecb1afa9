//! Template version selection

use tracing::debug;

use crate::template::error::TemplateError;
use crate::template::types::{AppParameter, Template, TemplateVersion};
use crate::version::{latest_matched_version, latest_version};

/// Version request meaning "the newest version"
pub const LATEST: &str = "latest";

fn wants_latest(requested: &str) -> bool {
    requested.is_empty() || requested.eq_ignore_ascii_case(LATEST)
}

/// Select the template version for `requested`.
///
/// Returns `Ok(None)` when the template has no versions at all. An empty
/// request or `latest` picks the newest version; anything else is a version
/// pattern such as `1.2.x`.
pub fn resolve_version<'a>(
    template: &'a Template,
    requested: &str,
) -> Result<Option<&'a TemplateVersion>, TemplateError> {
    if template.versions.is_empty() {
        return Ok(None);
    }

    let selected = if wants_latest(requested) {
        latest_version(&template.versions).ok_or_else(|| TemplateError::NoVersions {
            name: template.name.clone(),
        })?
    } else {
        let result = latest_matched_version(&template.versions, requested)?;
        result.matched.ok_or_else(|| TemplateError::NoMatchingVersion {
            name: template.name.clone(),
            requested: requested.to_string(),
            latest: result.latest.map(|v| v.version.clone()),
        })?
    };

    debug!(
        "Resolved template {} version {:?} to {}",
        template.name, requested, selected.version
    );
    Ok(Some(selected))
}

/// Select the parameters for `requested`: those of the resolved version, or
/// the template's own parameters when it has no versions.
pub fn select_parameters<'a>(
    template: &'a Template,
    requested: &str,
) -> Result<&'a [AppParameter], TemplateError> {
    Ok(match resolve_version(template, requested)? {
        Some(version) => &version.parameters,
        None => &template.parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionError;
    use rstest::rstest;

    fn parameter(variable: &str) -> AppParameter {
        AppParameter {
            variable: variable.to_string(),
            ..Default::default()
        }
    }

    fn template(versions: &[(&str, &str)]) -> Template {
        Template {
            name: "isolated".to_string(),
            display_name: None,
            parameters: vec![parameter("unversioned")],
            versions: versions
                .iter()
                .map(|(version, variable)| TemplateVersion {
                    version: version.to_string(),
                    parameters: vec![parameter(variable)],
                })
                .collect(),
        }
    }

    #[rstest]
    #[case("", "v2")]
    #[case("latest", "v2")]
    #[case("LATEST", "v2")]
    #[case("1.x.x", "v1.2")]
    #[case("1.1.x", "v1.1")]
    #[case("v2.0.0", "v2")]
    fn select_parameters_returns_expected(#[case] requested: &str, #[case] expected: &str) {
        let template = template(&[
            ("1.1.0", "v1.1"),
            ("2.0.0", "v2"),
            ("1.2.0", "v1.2"),
            ("broken", "never"),
        ]);

        let parameters = select_parameters(&template, requested).unwrap();

        assert_eq!(parameters, &[parameter(expected)]);
    }

    #[test]
    fn select_parameters_without_versions_uses_template_parameters() {
        let template = template(&[]);

        let parameters = select_parameters(&template, "1.x.x").unwrap();

        assert_eq!(parameters, &[parameter("unversioned")]);
    }

    #[test]
    fn resolve_version_without_versions_is_none() {
        let template = template(&[]);

        assert!(resolve_version(&template, "").unwrap().is_none());
    }

    #[test]
    fn resolve_version_with_only_unparseable_versions_is_error() {
        let template = template(&[("garbage", "g")]);

        let err = resolve_version(&template, "latest").unwrap_err();

        assert!(matches!(err, TemplateError::NoVersions { .. }));
    }

    #[test]
    fn resolve_version_without_match_reports_latest() {
        let template = template(&[("1.0.0", "a"), ("2.1.0", "b")]);

        let err = resolve_version(&template, "3.x.x").unwrap_err();

        assert!(matches!(
            err,
            TemplateError::NoMatchingVersion { latest: Some(ref latest), .. } if latest == "2.1.0"
        ));
    }

    #[test]
    fn resolve_version_with_bad_pattern_is_error() {
        let template = template(&[("1.0.0", "a")]);

        let err = resolve_version(&template, "1.0").unwrap_err();

        assert!(matches!(
            err,
            TemplateError::Version(VersionError::InvalidPattern { .. })
        ));
    }
}
