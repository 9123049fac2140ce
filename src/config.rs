//! Tool configuration.
//!
//! Handles loading and validating `promoshot.toml`. Configuration is sparse:
//! stock defaults are overridden by whatever keys the user sets, and unknown
//! keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! base_url = "http://localhost:5000"  # Generation service address
//! # token = "..."                     # Bearer token (or PROMOSHOT_TOKEN)
//!
//! [preview]
//! quality = 90                        # JPEG quality for preview artifacts
//! suffix = "preview"                  # photo.png → photo-preview.jpg
//!
//! [generate]
//! model = "creative"                  # Generation model
//! style = "banner"                    # Marketing style
//! prompt_type = "standard"            # standard | creative | professional
//! image_size = "1024*1024"            # Output size for text generation
//!
//! [processing]
//! max_workers = 4                     # Max parallel workers (omit for auto = CPU cores)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "promoshot.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `promoshot.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Generation service address and credentials.
    pub api: ApiConfig,
    /// Offline preview settings (quality, naming).
    pub preview: PreviewSettings,
    /// Defaults for generate calls (model, style, prompt type, size).
    pub generate: GenerateSettings,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Validation("api.base_url must not be empty".into()));
        }
        if self.preview.quality == 0 || self.preview.quality > 100 {
            return Err(ConfigError::Validation(
                "preview.quality must be 1-100".into(),
            ));
        }
        if self.preview.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "preview.suffix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from an explicit path, or from `promoshot.toml` in the
/// working directory if it exists, or fall back to defaults.
///
/// An explicit path that does not exist is an error; the implicit lookup is
/// best-effort.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let contents = match path {
        Some(p) => fs::read_to_string(p)?,
        None => match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        },
    };
    let config: AppConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Generation service address and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the generation service.
    pub base_url: String,
    /// Bearer token. `PROMOSHOT_TOKEN` in the environment takes precedence.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token: None,
        }
    }
}

/// Offline preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewSettings {
    /// JPEG encoding quality for preview artifacts (1-100).
    pub quality: u32,
    /// Output name suffix: `photo.png` → `photo-{suffix}.jpg`.
    pub suffix: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            quality: 90,
            suffix: "preview".to_string(),
        }
    }
}

/// Defaults for generate calls. Each has a matching CLI flag that wins when
/// given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSettings {
    /// Generation model for image-based calls.
    pub model: String,
    /// Marketing style for image-based calls.
    pub style: String,
    /// Prompt flavor for text-based calls.
    pub prompt_type: String,
    /// Output size for text-based calls, `width*height`.
    pub image_size: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            model: "creative".to_string(),
            style: "banner".to_string(),
            prompt_type: "standard".to_string(),
            image_size: "1024*1024".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel preview workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Stock `promoshot.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = GenerateSettings::default();
    format!(
        r#"# promoshot configuration. Every option is optional; the values below
# are the defaults.

[api]
# Address of the generation service.
base_url = "http://localhost:5000"
# Bearer token for authenticated endpoints (history, chat log). The
# PROMOSHOT_TOKEN environment variable takes precedence when set.
# token = ""

[preview]
# JPEG quality for offline preview artifacts (1-100).
quality = 90
# Output name suffix: photo.png -> photo-preview.jpg
suffix = "preview"

[generate]
# Generation model for image uploads.
model = "{model}"
# Marketing style for image uploads.
style = "{style}"
# Prompt flavor for text generation: standard | creative | professional
prompt_type = "{prompt_type}"
# Output size for text generation, width*height.
image_size = "{image_size}"

[processing]
# Max parallel preview workers. Omit for auto (one per CPU core); values
# above the core count are clamped down.
# max_workers = 4
"#,
        model = defaults.model,
        style = defaults.style,
        prompt_type = defaults.prompt_type,
        image_size = defaults.image_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn sparse_config_overrides_only_named_keys() {
        let config: AppConfig = toml::from_str(
            r#"
            [preview]
            quality = 75
            "#,
        )
        .unwrap();
        assert_eq!(config.preview.quality, 75);
        assert_eq!(config.preview.suffix, "preview");
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.generate.model, "creative");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [preview]
            qualtiy = 75
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_quality_fails_validation() {
        let config: AppConfig = toml::from_str("[preview]\nquality = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_suffix_fails_validation() {
        let config: AppConfig = toml::from_str("[preview]\nsuffix = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let config: AppConfig = toml::from_str("[api]\nbase_url = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_and_matches_defaults() {
        let config: AppConfig = toml::from_str(&stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.preview.quality, AppConfig::default().preview.quality);
        assert_eq!(config.generate.image_size, "1024*1024");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load(Some(Path::new("/no/such/promoshot.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_from_explicit_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "[generate]\nmodel = \"precise\"\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.generate.model, "precise");
    }

    #[test]
    fn effective_workers_clamps_to_core_count() {
        let auto = effective_workers(&ProcessingConfig { max_workers: None });
        assert!(auto >= 1);

        let capped = effective_workers(&ProcessingConfig {
            max_workers: Some(1),
        });
        assert_eq!(capped, 1);

        let huge = effective_workers(&ProcessingConfig {
            max_workers: Some(100_000),
        });
        assert!(huge <= auto);
    }
}
