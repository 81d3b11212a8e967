//! Run settings, resolved as CLI flag > environment variable > config file
//! > default.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use curation_core::config_file::{self, ConfigFile, LoggingConfig, PipelineConfig};
use curation_core::{DetectorKind, DetectorOptions, FilterPolicy};
use curation_parsing::TokenizerKind;

use crate::logging::LogLevel;

const DEFAULT_TOKENIZER: &str = "sentence";
const DEFAULT_DETECTOR: &str = "whatlang";
const DEFAULT_FILTER_LANGUAGES: &[&str] = &["en"];
const DEFAULT_LEVELS: &[&str] = &["INFO", "WARNING", "DEBUG"];
const DEFAULT_EXTENSIONS: &[&str] = &["txt"];

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Folder containing the text files to curate
    pub input: PathBuf,

    /// Folder receiving the curated files and the log files
    pub output: PathBuf,

    /// Paragraph tokenizer: "simple" or "sentence"
    #[arg(long)]
    pub tokenizer: Option<String>,

    /// Languages the detector may return (default: any)
    #[arg(long, num_args = 1..)]
    pub possible_languages: Option<Vec<String>>,

    /// Languages to keep
    #[arg(long, num_args = 1..)]
    pub filter_languages: Option<Vec<String>>,

    /// Language detector
    #[arg(long)]
    pub language_detector: Option<String>,

    /// Minimum detection probability, between 0 and 1
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Keep paragraphs whose language cannot be detected
    #[arg(long)]
    pub keep_undetected: bool,

    /// Rewrite output files that already exist
    #[arg(long)]
    pub force_overwrite: bool,

    /// Log levels, one log file per level in the output folder
    #[arg(long, num_args = 1..)]
    pub logging_levels: Option<Vec<String>>,

    /// Input file extensions
    #[arg(long, num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Config file to use instead of the default locations
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub tokenizer: TokenizerKind,
    pub detector: DetectorKind,
    pub detector_options: DetectorOptions,
    pub policy: FilterPolicy,
    pub levels: Vec<LogLevel>,
    pub extensions: Vec<String>,
    pub force_overwrite: bool,
}

impl Settings {
    /// Resolve every setting. Fails on unknown names or an out-of-range
    /// threshold, before any file is touched.
    pub fn resolve(
        args: &FilterArgs,
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
    ) -> anyhow::Result<Self> {
        let pipeline = file.pipeline.unwrap_or_default();
        let logging = file.logging.unwrap_or_default();
        let PipelineConfig {
            tokenizer,
            detector,
            possible_languages,
            filter_languages,
            threshold,
            keep_undetected,
            extensions,
        } = pipeline;
        let LoggingConfig { levels } = logging;

        let tokenizer = args
            .tokenizer
            .clone()
            .or_else(|| env("CURATION_TOKENIZER"))
            .or(tokenizer)
            .unwrap_or_else(|| DEFAULT_TOKENIZER.to_string())
            .parse::<TokenizerKind>()?;

        let detector = args
            .language_detector
            .clone()
            .or(detector)
            .unwrap_or_else(|| DEFAULT_DETECTOR.to_string())
            .parse::<DetectorKind>()?;

        let env_threshold = env("CURATION_THRESHOLD")
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .with_context(|| format!("invalid CURATION_THRESHOLD: {v}"))
            })
            .transpose()?;
        let detector_options = DetectorOptions {
            candidates: args
                .possible_languages
                .clone()
                .or(possible_languages)
                .map(|langs| langs.into_iter().collect::<BTreeSet<_>>()),
            threshold: args.threshold.or(env_threshold).or(threshold),
        };
        detector_options.validate()?;

        let filter_languages = args
            .filter_languages
            .clone()
            .or_else(|| env("CURATION_FILTER_LANGUAGES").map(|v| split_list(&v)))
            .or(filter_languages)
            .unwrap_or_else(|| owned(DEFAULT_FILTER_LANGUAGES));
        let policy = FilterPolicy::new(
            filter_languages,
            args.keep_undetected || keep_undetected.unwrap_or(false),
        );

        let levels = args
            .logging_levels
            .clone()
            .or(levels)
            .unwrap_or_else(|| owned(DEFAULT_LEVELS))
            .iter()
            .map(|name| name.parse::<LogLevel>())
            .collect::<anyhow::Result<Vec<_>>>()?;

        let extensions = args
            .extensions
            .clone()
            .or(extensions)
            .unwrap_or_else(|| owned(DEFAULT_EXTENSIONS));

        Ok(Self {
            tokenizer,
            detector,
            detector_options,
            policy,
            levels,
            extensions,
            force_overwrite: args.force_overwrite,
        })
    }
}

/// The explicit `--config` file, which must exist, or the default cascade.
/// Read and parse failures are returned with their cause.
pub fn load_config_file(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    match explicit {
        Some(path) => config_file::load_from_path(path)?
            .with_context(|| format!("config file not found: {}", path.display())),
        None => Ok(config_file::load_config()?),
    }
}

/// Comma- or whitespace-separated list from an environment variable.
fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn args() -> FilterArgs {
        FilterArgs {
            input: "in".into(),
            output: "out".into(),
            ..FilterArgs::default()
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn file_with(pipeline: PipelineConfig) -> ConfigFile {
        ConfigFile {
            pipeline: Some(pipeline),
            logging: None,
        }
    }

    #[test]
    fn defaults() {
        let settings = Settings::resolve(&args(), no_env, ConfigFile::default()).unwrap();
        assert_eq!(settings.tokenizer, TokenizerKind::Sentence);
        assert_eq!(settings.detector, DetectorKind::Whatlang);
        assert_eq!(settings.detector_options, DetectorOptions::default());
        assert_eq!(settings.policy, FilterPolicy::new(["en"], false));
        let files: Vec<_> = settings.levels.iter().map(|l| l.file_name()).collect();
        assert_eq!(files, vec!["info.log", "warning.log", "debug.log"]);
        assert_eq!(settings.extensions, vec!["txt"]);
        assert!(!settings.force_overwrite);
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = file_with(PipelineConfig {
            tokenizer: Some("sentence".into()),
            threshold: Some(0.1),
            filter_languages: Some(vec!["de".into()]),
            ..PipelineConfig::default()
        });
        let env = env_from(&[
            ("CURATION_TOKENIZER", "simple"),
            ("CURATION_THRESHOLD", "0.3"),
            ("CURATION_FILTER_LANGUAGES", "fr, es"),
        ]);

        let settings = Settings::resolve(&args(), &env, file.clone()).unwrap();
        assert_eq!(settings.tokenizer, TokenizerKind::Simple);
        assert_eq!(settings.detector_options.threshold, Some(0.3));
        assert_eq!(settings.policy.languages, BTreeSet::from(["es".to_string(), "fr".to_string()]));

        let cli = FilterArgs {
            tokenizer: Some("sentence".into()),
            threshold: Some(0.9),
            filter_languages: Some(vec!["en".into()]),
            ..args()
        };
        let settings = Settings::resolve(&cli, &env, file.clone()).unwrap();
        assert_eq!(settings.tokenizer, TokenizerKind::Sentence);
        assert_eq!(settings.detector_options.threshold, Some(0.9));
        assert_eq!(settings.policy.languages, BTreeSet::from(["en".to_string()]));

        let settings = Settings::resolve(&args(), no_env, file).unwrap();
        assert_eq!(settings.detector_options.threshold, Some(0.1));
        assert_eq!(settings.policy.languages, BTreeSet::from(["de".to_string()]));
    }

    #[test]
    fn file_supplies_candidates_and_levels() {
        let file = ConfigFile {
            pipeline: Some(PipelineConfig {
                possible_languages: Some(vec!["en".into(), "es".into()]),
                keep_undetected: Some(true),
                extensions: Some(vec!["text".into()]),
                ..PipelineConfig::default()
            }),
            logging: Some(LoggingConfig {
                levels: Some(vec!["ERROR".into()]),
            }),
        };
        let settings = Settings::resolve(&args(), no_env, file).unwrap();
        assert_eq!(
            settings.detector_options.candidates,
            Some(BTreeSet::from(["en".to_string(), "es".to_string()]))
        );
        assert!(settings.policy.keep_undetected);
        assert_eq!(settings.extensions, vec!["text"]);
        assert_eq!(settings.levels.len(), 1);
        assert_eq!(settings.levels[0].file_name(), "error.log");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_tokenizer = FilterArgs {
            tokenizer: Some("words".into()),
            ..args()
        };
        assert!(Settings::resolve(&bad_tokenizer, no_env, ConfigFile::default()).is_err());

        let bad_detector = FilterArgs {
            language_detector: Some("langid".into()),
            ..args()
        };
        assert!(Settings::resolve(&bad_detector, no_env, ConfigFile::default()).is_err());

        let bad_threshold = FilterArgs {
            threshold: Some(1.5),
            ..args()
        };
        assert!(Settings::resolve(&bad_threshold, no_env, ConfigFile::default()).is_err());

        let bad_level = FilterArgs {
            logging_levels: Some(vec!["LOUD".into()]),
            ..args()
        };
        assert!(Settings::resolve(&bad_level, no_env, ConfigFile::default()).is_err());

        let env = env_from(&[("CURATION_THRESHOLD", "high")]);
        assert!(Settings::resolve(&args(), &env, ConfigFile::default()).is_err());
    }

    #[test]
    fn env_list_splitting() {
        assert_eq!(split_list("en,fr"), vec!["en", "fr"]);
        assert_eq!(split_list(" en , fr  es "), vec!["en", "fr", "es"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curation.toml");
        std::fs::write(&path, "[pipeline]\ntokenizer = \"simple\"\n").unwrap();

        let file = load_config_file(Some(&path)).unwrap();
        let settings = Settings::resolve(&args(), no_env, file).unwrap();
        assert_eq!(settings.tokenizer, TokenizerKind::Simple);
    }

    #[test]
    fn explicit_config_syntax_error_reaches_the_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curation.toml");
        std::fs::write(&path, "[pipeline]\nthreshold = = 0.5\n").unwrap();

        let err = load_config_file(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid config file"), "{message}");
        assert!(message.contains("curation.toml"), "{message}");
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = load_config_file(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config file not found"), "{err}");
    }
}
