use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use curation_core::LanguageFilter;
use curation_ingest::{BatchConfig, BatchProcessor};

mod logging;
mod output;
mod settings;

use output::ColorMode;
use settings::{FilterArgs, Settings};

/// Proceedings curation - keep the paragraphs of a document written in the
/// languages you want
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter every text file of a folder by paragraph language
    Filter(FilterArgs),

    /// Convert a folder of ALTO/HOCR files into plain text files
    ConvertOcr {
        /// Folder containing .xml/.alto/.hocr/.html files
        input: PathBuf,

        /// Folder receiving the .txt files
        output: PathBuf,

        /// Rewrite text files that already exist
        #[arg(long)]
        force_overwrite: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Filter(args) => filter(args),
        Command::ConvertOcr {
            input,
            output,
            force_overwrite,
            no_color,
        } => convert_ocr(&input, &output, force_overwrite, ColorMode(!no_color)),
    }
}

fn filter(args: FilterArgs) -> anyhow::Result<()> {
    let file = settings::load_config_file(args.config.as_deref())?;
    let settings = Settings::resolve(&args, |key| std::env::var(key).ok(), file)?;

    if !args.input.is_dir() {
        anyhow::bail!("Input folder not found: {}", args.input.display());
    }
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let _guards = logging::init(&args.output, &settings.levels)?;

    let color = ColorMode(!args.no_color);
    let mut stdout = std::io::stdout();
    output::print_configuration(&mut stdout, &args.input, &args.output, &settings, color)?;

    let detector = settings.detector.build(settings.detector_options.clone())?;
    let language_filter = LanguageFilter::new(settings.policy.clone(), detector);
    let config = BatchConfig::new(&args.input, &args.output)
        .with_extensions(settings.extensions.clone())
        .with_force_overwrite(settings.force_overwrite);
    let processor = BatchProcessor::new(config, settings.tokenizer, language_filter);

    let summary = processor.run()?;
    output::print_summary(&mut stdout, &summary, &args.output, color)?;
    Ok(())
}

fn convert_ocr(
    input: &Path,
    output: &Path,
    force_overwrite: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    logging::init_stderr()?;
    if !input.is_dir() {
        anyhow::bail!("Input folder not found: {}", input.display());
    }

    let summary = curation_ocr_xml::convert_dir(input, output, force_overwrite)
        .with_context(|| format!("failed to convert OCR files in {}", input.display()))?;
    output::print_conversion(&mut std::io::stdout(), &summary, output, color)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_filter_flags() {
        let cli = Cli::try_parse_from([
            "curation",
            "filter",
            "in",
            "out",
            "--tokenizer",
            "simple",
            "--possible-languages",
            "en",
            "es",
            "--filter-languages",
            "en",
            "--threshold",
            "0.5",
            "--keep-undetected",
            "--logging-levels",
            "INFO",
            "ERROR",
        ])
        .unwrap();
        let Command::Filter(args) = cli.command else {
            panic!("expected the filter subcommand");
        };
        assert_eq!(args.input, PathBuf::from("in"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.tokenizer.as_deref(), Some("simple"));
        assert_eq!(
            args.possible_languages,
            Some(vec!["en".to_string(), "es".to_string()])
        );
        assert_eq!(args.filter_languages, Some(vec!["en".to_string()]));
        assert_eq!(args.threshold, Some(0.5));
        assert!(args.keep_undetected);
        assert!(!args.force_overwrite);
        assert_eq!(
            args.logging_levels,
            Some(vec!["INFO".to_string(), "ERROR".to_string()])
        );
    }

    #[test]
    fn parses_convert_ocr() {
        let cli = Cli::try_parse_from(["curation", "convert-ocr", "alto", "text", "--force-overwrite"])
            .unwrap();
        match cli.command {
            Command::ConvertOcr {
                input,
                output,
                force_overwrite,
                no_color,
            } => {
                assert_eq!(input, PathBuf::from("alto"));
                assert_eq!(output, PathBuf::from("text"));
                assert!(force_overwrite);
                assert!(!no_color);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
