//! Configuration for the tournament module.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use ft_projection::{LinkBuilder, QueryLimits};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `TOURNAMENT_MAX_PAGE_SIZE=5`.
pub const ENV_PREFIX: &str = "TOURNAMENT_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentConfig {
    /// Absolute address every hypermedia link is rooted at.
    /// Default: `http://localhost:8087/api/v1`
    pub base_url: String,
    /// Default: 8
    pub default_page_size: u32,
    /// Larger requested page sizes are clamped to this. Default: 8
    pub max_page_size: u32,
    /// Default: 8
    pub max_orderby_fields: usize,
    /// Upper bound on the length of `fields` and `orderBy`. Default: 1000
    pub max_query_length: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        let limits = QueryLimits::default();
        Self {
            base_url: "http://localhost:8087/api/v1".to_owned(),
            default_page_size: limits.default_page_size,
            max_page_size: limits.max_page_size,
            max_orderby_fields: limits.max_orderby_fields,
            max_query_length: limits.max_query_length,
        }
    }
}

impl TournamentConfig {
    /// Layered load: built-in defaults, then `path` (YAML, skipped when the
    /// file does not exist), then `TOURNAMENT_*` environment variables.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` on malformed input and
    /// `ConfigError::Invalid` when [`Self::validate`] rejects the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        tracing::debug!(?config, "tournament configuration loaded");
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` for a zero page size, a default page
    /// size above the maximum, or a base URL links cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::invalid("max_page_size", "must be at least 1"));
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::invalid(
                "default_page_size",
                "must be at least 1",
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::invalid(
                "default_page_size",
                format!(
                    "{} exceeds max_page_size {}",
                    self.default_page_size, self.max_page_size
                ),
            ));
        }
        LinkBuilder::new(&self.base_url)
            .map_err(|e| ConfigError::invalid("base_url", e.to_string()))?;
        Ok(())
    }

    #[must_use]
    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits::new()
            .with_page_sizes(self.default_page_size, self.max_page_size)
            .with_max_orderby_fields(self.max_orderby_fields)
            .with_max_query_length(self.max_query_length)
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` if `base_url` is unusable.
    pub fn link_builder(&self) -> Result<LinkBuilder, ConfigError> {
        LinkBuilder::new(&self.base_url).map_err(|e| ConfigError::invalid("base_url", e.to_string()))
    }
}
