//! Marketplace configuration.
//!
//! Layers, last wins: built-in defaults, `rescata.toml` (or an explicit path),
//! `RESCATA_*` environment variables. The result is validated before use.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use rescata_observability::{LogFormat, LoggingConfig};
use rescata_products::{LifecyclePolicy, ProductRules};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarketplaceConfig {
    pub rules: ProductRules,
    pub lifecycle: LifecyclePolicy,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl MarketplaceConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path(options.config_path.as_deref()) {
            config.apply_patch(read_patch(&path)?);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("rescata.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides(read_env)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults patched with a TOML document. No environment, validated.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let patch = toml::from_str::<ConfigPatch>(raw).map_err(|source| ConfigError::ParseFile {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        let mut config = Self::default();
        config.apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(rules) = patch.rules {
            if let Some(v) = rules.name_min {
                self.rules.name_min = v;
            }
            if let Some(v) = rules.name_max {
                self.rules.name_max = v;
            }
            if let Some(v) = rules.description_min {
                self.rules.description_min = v;
            }
            if let Some(v) = rules.description_max {
                self.rules.description_max = v;
            }
            if let Some(v) = rules.quantity_max {
                self.rules.quantity_max = v;
            }
            if let Some(v) = rules.price_max {
                self.rules.price_max = v;
            }
        }

        if let Some(lifecycle) = patch.lifecycle {
            if let Some(days) = lifecycle.expiring_soon_days {
                self.lifecycle.expiring_soon_days = days;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(size) = catalog.default_page_size {
                self.catalog.default_page_size = size;
            }
            if let Some(size) = catalog.max_page_size {
                self.catalog.max_page_size = size;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    /// Apply `RESCATA_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RESCATA_RULES_NAME_MIN") {
            self.rules.name_min = parse_env("RESCATA_RULES_NAME_MIN", &v)?;
        }
        if let Some(v) = lookup("RESCATA_RULES_NAME_MAX") {
            self.rules.name_max = parse_env("RESCATA_RULES_NAME_MAX", &v)?;
        }
        if let Some(v) = lookup("RESCATA_RULES_DESCRIPTION_MIN") {
            self.rules.description_min = parse_env("RESCATA_RULES_DESCRIPTION_MIN", &v)?;
        }
        if let Some(v) = lookup("RESCATA_RULES_DESCRIPTION_MAX") {
            self.rules.description_max = parse_env("RESCATA_RULES_DESCRIPTION_MAX", &v)?;
        }
        if let Some(v) = lookup("RESCATA_RULES_QUANTITY_MAX") {
            self.rules.quantity_max = parse_env("RESCATA_RULES_QUANTITY_MAX", &v)?;
        }
        if let Some(v) = lookup("RESCATA_RULES_PRICE_MAX") {
            self.rules.price_max = parse_env("RESCATA_RULES_PRICE_MAX", &v)?;
        }

        if let Some(v) = lookup("RESCATA_LIFECYCLE_EXPIRING_SOON_DAYS") {
            self.lifecycle.expiring_soon_days = parse_env("RESCATA_LIFECYCLE_EXPIRING_SOON_DAYS", &v)?;
        }

        if let Some(v) = lookup("RESCATA_CATALOG_DEFAULT_PAGE_SIZE") {
            self.catalog.default_page_size = parse_env("RESCATA_CATALOG_DEFAULT_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("RESCATA_CATALOG_MAX_PAGE_SIZE") {
            self.catalog.max_page_size = parse_env("RESCATA_CATALOG_MAX_PAGE_SIZE", &v)?;
        }

        if let Some(v) = lookup("RESCATA_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("RESCATA_LOG_FORMAT") {
            self.logging.format = v.parse::<LogFormat>().map_err(ConfigError::Validation)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rules(&self.rules)?;
        validate_lifecycle(&self.lifecycle)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("rescata.toml"), PathBuf::from("config/rescata.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<ConfigPatch>(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_rules(rules: &ProductRules) -> Result<(), ConfigError> {
    if rules.name_min == 0 || rules.name_min > rules.name_max {
        return Err(ConfigError::Validation(
            "rules.name_min must be at least 1 and not above rules.name_max".to_string(),
        ));
    }
    if rules.description_min > rules.description_max {
        return Err(ConfigError::Validation(
            "rules.description_min must not be above rules.description_max".to_string(),
        ));
    }
    if rules.quantity_max < 1 {
        return Err(ConfigError::Validation(
            "rules.quantity_max must be greater than zero".to_string(),
        ));
    }
    if rules.price_max < 1 {
        return Err(ConfigError::Validation(
            "rules.price_max must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_lifecycle(lifecycle: &LifecyclePolicy) -> Result<(), ConfigError> {
    if lifecycle.expiring_soon_days < 1 {
        return Err(ConfigError::Validation(
            "lifecycle.expiring_soon_days must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.default_page_size == 0 {
        return Err(ConfigError::Validation(
            "catalog.default_page_size must be greater than zero".to_string(),
        ));
    }
    if catalog.max_page_size < catalog.default_page_size {
        return Err(ConfigError::Validation(
            "catalog.max_page_size must be at least catalog.default_page_size".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    if !LoggingConfig::is_valid_level(&logging.level) {
        return Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        ));
    }
    Ok(())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    rules: Option<RulesPatch>,
    lifecycle: Option<LifecyclePatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RulesPatch {
    name_min: Option<usize>,
    name_max: Option<usize>,
    description_min: Option<usize>,
    description_max: Option<usize>,
    quantity_max: Option<i64>,
    price_max: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct LifecyclePatch {
    expiring_soon_days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    default_page_size: Option<usize>,
    max_page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
