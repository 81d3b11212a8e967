use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{OcrFormat, OcrXmlError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Convert every ALTO/HOCR file of `input` into `<stem>.txt` in `output`.
///
/// Existing outputs are skipped unless `force_overwrite` is set, so a
/// conversion can be resumed. Files of any other type are ignored.
pub fn convert_dir(
    input: &Path,
    output: &Path,
    force_overwrite: bool,
) -> Result<ConversionSummary, OcrXmlError> {
    let mut sources: Vec<(PathBuf, OcrFormat)> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter_map(|path| OcrFormat::from_path(&path).map(|format| (path, format)))
        .collect();
    sources.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));

    tracing::info!(folder = %input.display(), count = sources.len(), "converting ocr files");
    fs::create_dir_all(output)?;

    let mut summary = ConversionSummary::default();
    for (source, format) in sources {
        let Some(stem) = source.file_stem() else {
            continue;
        };
        let target = output.join(format!("{}.txt", stem.to_string_lossy()));

        if target.exists() && !force_overwrite {
            tracing::info!(file = %target.display(), "File already exists, skipping");
            summary.skipped.push(target);
            continue;
        }

        let text = format.extract(&source)?;
        if write_text(&target, &text, force_overwrite)? {
            tracing::debug!(source = %source.display(), target = %target.display(), ?format, "converted");
            summary.converted.push(target);
        } else {
            summary.skipped.push(target);
        }
    }

    tracing::info!(
        converted = summary.converted.len(),
        skipped = summary.skipped.len(),
        "ocr conversion finished"
    );
    Ok(summary)
}

fn write_text(path: &Path, text: &str, force: bool) -> Result<bool, OcrXmlError> {
    if force {
        fs::write(path, text)?;
        return Ok(true);
    }
    match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(text.as_bytes())?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}
