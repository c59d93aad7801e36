//! CMS client configuration.
//!
//! Targets the Sanity HTTP API. Reads may go through the CDN host; writes
//! always go to the live API host. Override both with `SANITY_API_HOST`
//! for testing or when fronting the API with a proxy.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for connecting to the CMS.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct CmsConfig {
    /// Project identifier (lowercase alphanumeric and dashes).
    pub project_id: String,
    /// Dataset name. Default: `production`.
    pub dataset: String,
    /// Dated API version, without the leading `v`. Default: `2024-01-01`.
    pub api_version: String,
    /// Write token. Without one, creates are rejected by the CMS.
    pub api_token: Option<Zeroizing<String>>,
    /// Serve reads from the CDN host. Default: true.
    pub use_cdn: bool,
    /// Replaces both the API and CDN hosts when set. Always ends with `/`.
    pub api_host: Option<Url>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("use_cdn", &self.use_cdn)
            .field("api_host", &self.api_host)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SANITY_PROJECT_ID` (required; absent means the CMS is not configured)
    /// - `SANITY_DATASET` (default: `production`)
    /// - `SANITY_API_TOKEN` (optional)
    /// - `SANITY_API_VERSION` (default: `2024-01-01`)
    /// - `SANITY_USE_CDN` (default: `true`)
    /// - `SANITY_API_HOST` (optional host override)
    /// - `CMS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CmsConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(project_id) = non_empty("SANITY_PROJECT_ID") else {
            return Ok(None);
        };

        let mut config = Self::new(
            project_id,
            non_empty("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
        )?;

        if let Some(version) = non_empty("SANITY_API_VERSION") {
            config.api_version = version.trim_start_matches('v').to_string();
        }
        config.api_token = non_empty("SANITY_API_TOKEN").map(Zeroizing::new);
        config.use_cdn = non_empty("SANITY_USE_CDN")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);
        config.api_host = non_empty("SANITY_API_HOST")
            .map(|raw| parse_host("SANITY_API_HOST", &raw))
            .transpose()?;
        config.timeout_secs = non_empty("CMS_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(30);

        Ok(Some(config))
    }

    /// Configuration with defaults for everything but project and dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProjectId`] or
    /// [`ConfigError::InvalidDataset`] for malformed names.
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Result<Self, ConfigError> {
        let project_id = project_id.into();
        let dataset = dataset.into();

        if project_id.is_empty()
            || !project_id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::InvalidProjectId(project_id));
        }
        if dataset.is_empty()
            || dataset.len() > 64
            || !dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(ConfigError::InvalidDataset(dataset));
        }

        Ok(Self {
            project_id,
            dataset,
            api_version: "2024-01-01".to_string(),
            api_token: None,
            use_cdn: true,
            api_host: None,
            timeout_secs: 30,
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str, token: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::new("test-project", "test")?;
        config.api_host = Some(parse_host("local_mock", base_url)?);
        config.api_token = token.map(|t| Zeroizing::new(t.to_string()));
        config.timeout_secs = 5;
        Ok(config)
    }

    /// Base URL for reads: the CDN host when enabled.
    pub fn read_base(&self) -> Result<Url, ConfigError> {
        match &self.api_host {
            Some(host) => Ok(host.clone()),
            None if self.use_cdn => self.project_host("apicdn"),
            None => self.project_host("api"),
        }
    }

    /// Base URL for writes: always the live API host.
    pub fn write_base(&self) -> Result<Url, ConfigError> {
        match &self.api_host {
            Some(host) => Ok(host.clone()),
            None => self.project_host("api"),
        }
    }

    fn project_host(&self, sub: &str) -> Result<Url, ConfigError> {
        let raw = format!("https://{}.{sub}.sanity.io/", self.project_id);
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw, e.to_string()))
    }
}

/// Parse a host override, normalising the path to end with `/` so that
/// relative API paths append rather than replace the last segment.
fn parse_host(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid SANITY_PROJECT_ID {0:?}: expected lowercase letters, digits and dashes")]
    InvalidProjectId(String),
    #[error("invalid SANITY_DATASET {0:?}: expected up to 64 lowercase letters, digits, '_' or '-'")]
    InvalidDataset(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("SANITY_API_TOKEN contains characters not allowed in an HTTP header")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn absent_project_id_means_unconfigured() {
        assert!(CmsConfig::from_lookup(lookup(&[])).unwrap().is_none());
        assert!(CmsConfig::from_lookup(lookup(&[("SANITY_DATASET", "prod")]))
            .unwrap()
            .is_none());
    }

    #[test]
    fn defaults_apply() {
        let cfg = CmsConfig::from_lookup(lookup(&[("SANITY_PROJECT_ID", "abc123")]))
            .unwrap()
            .unwrap();
        assert_eq!(cfg.dataset, "production");
        assert_eq!(cfg.api_version, "2024-01-01");
        assert!(cfg.api_token.is_none());
        assert!(cfg.use_cdn);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.read_base().unwrap().as_str(), "https://abc123.apicdn.sanity.io/");
        assert_eq!(cfg.write_base().unwrap().as_str(), "https://abc123.api.sanity.io/");
    }

    #[test]
    fn cdn_can_be_disabled() {
        let cfg = CmsConfig::from_lookup(lookup(&[
            ("SANITY_PROJECT_ID", "abc123"),
            ("SANITY_USE_CDN", "false"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(cfg.read_base().unwrap().as_str(), "https://abc123.api.sanity.io/");
    }

    #[test]
    fn host_override_gets_trailing_slash() {
        let cfg = CmsConfig::from_lookup(lookup(&[
            ("SANITY_PROJECT_ID", "abc123"),
            ("SANITY_API_HOST", "http://127.0.0.1:9000/sanity"),
            ("SANITY_API_VERSION", "v2025-02-19"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(cfg.read_base().unwrap().as_str(), "http://127.0.0.1:9000/sanity/");
        assert_eq!(cfg.write_base().unwrap().as_str(), "http://127.0.0.1:9000/sanity/");
        assert_eq!(cfg.api_version, "2025-02-19");
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(matches!(
            CmsConfig::from_lookup(lookup(&[("SANITY_PROJECT_ID", "Bad Project")])),
            Err(ConfigError::InvalidProjectId(_))
        ));
        assert!(matches!(
            CmsConfig::from_lookup(lookup(&[
                ("SANITY_PROJECT_ID", "abc123"),
                ("SANITY_DATASET", "Prod!")
            ])),
            Err(ConfigError::InvalidDataset(_))
        ));
        assert!(matches!(
            CmsConfig::from_lookup(lookup(&[
                ("SANITY_PROJECT_ID", "abc123"),
                ("SANITY_API_HOST", "not a url")
            ])),
            Err(ConfigError::InvalidUrl(_, _))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = CmsConfig::from_lookup(lookup(&[
            ("SANITY_PROJECT_ID", "abc123"),
            ("SANITY_API_TOKEN", "sk-very-secret"),
        ]))
        .unwrap()
        .unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-very-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }
}
