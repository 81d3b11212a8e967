use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub pipeline: Option<PipelineConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub tokenizer: Option<String>,
    pub detector: Option<String>,
    pub possible_languages: Option<Vec<String>>,
    pub filter_languages: Option<Vec<String>>,
    pub threshold: Option<f64>,
    pub keep_undetected: Option<bool>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub levels: Option<Vec<String>>,
}

/// Platform config directory path: `<config_dir>/proceedings-curation/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("proceedings-curation").join("config.toml"))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load config by cascading CWD `.curation.toml` over platform config.
/// CWD values override platform values. Missing files are skipped; a file
/// that exists but cannot be read or parsed is an error.
pub fn load_config() -> Result<ConfigFile, ConfigError> {
    let platform = match config_path() {
        Some(p) => load_from_path(&p)?,
        None => None,
    };
    let cwd = load_from_path(Path::new(".curation.toml"))?;

    Ok(match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    })
}

/// Load a config from a specific path. `Ok(None)` if the file doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_pipeline = base.pipeline.unwrap_or_default();
    let overlay_pipeline = overlay.pipeline.unwrap_or_default();
    let base_logging = base.logging.unwrap_or_default();
    let overlay_logging = overlay.logging.unwrap_or_default();

    ConfigFile {
        pipeline: Some(PipelineConfig {
            tokenizer: overlay_pipeline.tokenizer.or(base_pipeline.tokenizer),
            detector: overlay_pipeline.detector.or(base_pipeline.detector),
            possible_languages: overlay_pipeline
                .possible_languages
                .or(base_pipeline.possible_languages),
            filter_languages: overlay_pipeline
                .filter_languages
                .or(base_pipeline.filter_languages),
            threshold: overlay_pipeline.threshold.or(base_pipeline.threshold),
            keep_undetected: overlay_pipeline
                .keep_undetected
                .or(base_pipeline.keep_undetected),
            extensions: overlay_pipeline.extensions.or(base_pipeline.extensions),
        }),
        logging: Some(LoggingConfig {
            levels: overlay_logging.levels.or(base_logging.levels),
        }),
    }
}
