//! Build configuration.
//!
//! A single immutable [`BuildConfig`] value is constructed at startup and
//! passed by reference through every pipeline stage. There is no config
//! file and no global singleton — the builder ships with fixed defaults,
//! and tests override individual fields through struct update syntax.

/// Immutable build configuration.
///
/// `version` and `promptcore_ver` are stamped into the README and the
/// build manifest. `domain` and `page_slug` parameterize the URLs inside
/// the JSON-LD document (the page template itself is fully literal — see
/// the module docs in [`crate::content`]). The remaining fields drive
/// validation thresholds.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Package version stamped into generated artifacts.
    pub version: String,
    /// PromptCore alignment tag stamped into generated artifacts.
    pub promptcore_ver: String,
    /// Base site URL, no trailing slash.
    pub domain: String,
    /// URL slug of the audit page, no leading slash.
    pub page_slug: String,
    /// Minimum byte length for the generated page component.
    pub min_astro_size: usize,
    /// Minimum byte length for the generated stylesheet.
    pub min_css_size: usize,
    /// `@type` values that must appear in the JSON-LD `@graph`.
    pub required_schema_types: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0-enterprise".to_string(),
            promptcore_ver: "v3.7".to_string(),
            domain: "https://www.nextara-ai-solutions.com".to_string(),
            page_slug: "digital-credibility-score-audit".to_string(),
            min_astro_size: 5000,
            min_css_size: 500,
            required_schema_types: vec![
                "WebPage".to_string(),
                "Service".to_string(),
                "FAQPage".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_schema_types() {
        let config = BuildConfig::default();
        assert_eq!(
            config.required_schema_types,
            vec!["WebPage", "Service", "FAQPage"]
        );
    }

    #[test]
    fn defaults_have_sane_thresholds() {
        let config = BuildConfig::default();
        assert!(config.min_astro_size > config.min_css_size);
        assert!(!config.domain.ends_with('/'));
        assert!(!config.page_slug.starts_with('/'));
    }
}
