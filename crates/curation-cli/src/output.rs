use std::io::Write;
use std::path::Path;

use curation_ingest::{FileOutcome, RunSummary};
use curation_ocr_xml::ConversionSummary;
use owo_colors::OwoColorize;

use crate::settings::Settings;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn join(values: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Echo the resolved configuration before processing.
pub fn print_configuration(
    w: &mut dyn Write,
    input: &Path,
    output: &Path,
    settings: &Settings,
    color: ColorMode,
) -> std::io::Result<()> {
    let candidates = settings
        .detector_options
        .candidates
        .as_ref()
        .map(join)
        .unwrap_or_else(|| "any".to_string());
    let threshold = settings
        .detector_options
        .threshold
        .map(|t| t.to_string())
        .unwrap_or_else(|| "none".to_string());
    let levels = join(settings.levels.iter().map(|l| l.file_name()));

    let rows = [
        ("Input", input.display().to_string()),
        ("Output", output.display().to_string()),
        ("Tokenizer", settings.tokenizer.to_string()),
        ("Detector", settings.detector.to_string()),
        ("Possible languages", candidates),
        ("Threshold", threshold),
        ("Filter languages", join(&settings.policy.languages)),
        ("Keep undetected", settings.policy.keep_undetected.to_string()),
        ("Extensions", join(&settings.extensions)),
        ("Force overwrite", settings.force_overwrite.to_string()),
        ("Log files", levels),
    ];
    for (key, value) in rows {
        if color.enabled() {
            writeln!(w, "{:>20}: {}", key.bold(), value)?;
        } else {
            writeln!(w, "{:>20}: {}", key, value)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Per-file results followed by run totals.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &RunSummary,
    output: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    for report in &summary.files {
        match &report.outcome {
            FileOutcome::Written(stats) => {
                let pct = stats
                    .percentage_kept()
                    .map(|p| format!("{p:.2}%"))
                    .unwrap_or_else(|| "N/A".to_string());
                let line = format!(
                    "{}: kept {}/{} paragraphs ({})",
                    report.file_name, stats.kept, stats.paragraphs, pct
                );
                if color.enabled() {
                    writeln!(w, "{}", line.green())?;
                } else {
                    writeln!(w, "{}", line)?;
                }
                if stats.undetected > 0 {
                    let note = format!("  {} paragraphs with undetected language", stats.undetected);
                    if color.enabled() {
                        writeln!(w, "{}", note.yellow())?;
                    } else {
                        writeln!(w, "{}", note)?;
                    }
                }
            }
            FileOutcome::Skipped => {
                let line = format!("{}: skipped (output already exists)", report.file_name);
                if color.enabled() {
                    writeln!(w, "{}", line.dimmed())?;
                } else {
                    writeln!(w, "{}", line)?;
                }
            }
        }
    }

    let totals = summary.totals();
    writeln!(w)?;
    writeln!(
        w,
        "{} files written, {} skipped, {}/{} paragraphs kept",
        summary.written(),
        summary.skipped(),
        totals.kept,
        totals.paragraphs
    )?;
    if color.enabled() {
        writeln!(w, "Files saved in {}", output.display().bold())?;
    } else {
        writeln!(w, "Files saved in {}", output.display())?;
    }
    Ok(())
}

pub fn print_conversion(
    w: &mut dyn Write,
    summary: &ConversionSummary,
    output: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    let line = format!(
        "{} files converted, {} skipped",
        summary.converted.len(),
        summary.skipped.len()
    );
    if color.enabled() {
        writeln!(w, "{}", line.green())?;
    } else {
        writeln!(w, "{}", line)?;
    }
    writeln!(w, "Text files saved in {}", output.display())?;
    Ok(())
}
