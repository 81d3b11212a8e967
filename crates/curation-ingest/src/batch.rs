use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use curation_core::LanguageFilter;
use curation_parsing::TokenizerKind;

use crate::IngestError;

/// Number of characters of an undetected paragraph shown in its warning.
const PREVIEW_CHARS: usize = 50;

/// Run-wide settings for a [`BatchProcessor`].
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File extensions (without the dot) treated as input, compared ASCII
    /// case-insensitively.
    pub extensions: Vec<String>,
    /// Rewrite outputs that already exist instead of skipping them.
    pub force_overwrite: bool,
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extensions: vec!["txt".to_string()],
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force_overwrite: bool) -> Self {
        self.force_overwrite = force_overwrite;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// Per-document statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub lines: usize,
    pub paragraphs: usize,
    pub kept: usize,
    pub undetected: usize,
}

impl FileStats {
    /// Share of paragraphs kept, in percent. `None` for a document without
    /// paragraphs.
    pub fn percentage_kept(&self) -> Option<f64> {
        if self.paragraphs == 0 {
            None
        } else {
            Some(self.kept as f64 / self.paragraphs as f64 * 100.0)
        }
    }

    fn percentage_display(&self) -> String {
        self.percentage_kept()
            .map(|p| format!("{p:.2}%"))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The output already existed and force-overwrite was off.
    Skipped,
    Written(FileStats),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: FileOutcome,
}

/// Outcome of a whole run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.stats().count()
    }

    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Skipped)
            .count()
    }

    /// Sum of the statistics of every written file.
    pub fn totals(&self) -> FileStats {
        self.stats().fold(FileStats::default(), |acc, s| FileStats {
            lines: acc.lines + s.lines,
            paragraphs: acc.paragraphs + s.paragraphs,
            kept: acc.kept + s.kept,
            undetected: acc.undetected + s.undetected,
        })
    }

    fn stats(&self) -> impl Iterator<Item = &FileStats> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Written(stats) => Some(stats),
            FileOutcome::Skipped => None,
        })
    }
}

/// Applies tokenizer, detector and filter to every input file of a folder.
///
/// Files are processed one at a time in file-name order. An output that
/// already exists is left untouched unless force-overwrite is set, so an
/// interrupted run can simply be restarted.
pub struct BatchProcessor {
    config: BatchConfig,
    tokenizer: TokenizerKind,
    filter: LanguageFilter,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig, tokenizer: TokenizerKind, filter: LanguageFilter) -> Self {
        Self {
            config,
            tokenizer,
            filter,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Input files with an accepted extension, sorted by file name.
    pub fn list_input_files(&self) -> Result<Vec<PathBuf>, IngestError> {
        let dir = &self.config.input_dir;
        let read_dir_err = |source| IngestError::ReadDir {
            path: dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_err)? {
            let path = entry.map_err(read_dir_err)?.path();
            if path.is_file() && self.config.accepts(&path) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    pub fn run(&self) -> Result<RunSummary, IngestError> {
        let detector = self.filter.detector();
        let policy = self.filter.policy();

        tracing::info!(folder = %self.config.input_dir.display(), "processing files");
        let files = self.list_input_files()?;
        tracing::info!(count = files.len(), "number of files");
        tracing::info!(tokenizer = self.tokenizer.name(), "using tokenizer");
        tracing::info!(
            detector = detector.name(),
            options = ?detector.options(),
            "using language detector"
        );
        tracing::info!(languages = ?policy.languages, "keeping languages");
        tracing::info!(
            keep_undetected = policy.keep_undetected,
            "keeping undetected paragraphs"
        );

        fs::create_dir_all(&self.config.output_dir).map_err(|source| IngestError::CreateDir {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let mut summary = RunSummary::default();
        for path in &files {
            summary.files.push(self.process_file(path)?);
        }

        tracing::info!(
            written = summary.written(),
            skipped = summary.skipped(),
            "Files saved in {}",
            self.config.output_dir.display()
        );
        Ok(summary)
    }

    /// Curate one input file into the output directory.
    pub fn process_file(&self, input: &Path) -> Result<FileReport, IngestError> {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.display().to_string());
        let output = self.config.output_dir.join(&file_name);

        tracing::info!(file = %file_name, "processing");
        if output.exists() && !self.config.force_overwrite {
            tracing::info!(file = %file_name, "File already exists, skipping");
            return Ok(FileReport {
                file_name,
                outcome: FileOutcome::Skipped,
            });
        }

        let text = fs::read_to_string(input).map_err(|source| IngestError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let (content, stats) = self.curate(&file_name, &text);

        if !write_output(&output, &content, self.config.force_overwrite)? {
            tracing::info!(file = %file_name, "output appeared while processing, skipping");
            return Ok(FileReport {
                file_name,
                outcome: FileOutcome::Skipped,
            });
        }

        tracing::info!(
            file = %file_name,
            lines = stats.lines,
            paragraphs = stats.paragraphs,
            kept = stats.kept,
            percentage_kept = %stats.percentage_display(),
            "paragraphs filtered"
        );
        Ok(FileReport {
            file_name,
            outcome: FileOutcome::Written(stats),
        })
    }

    /// Tokenize, detect and filter one document's text.
    ///
    /// Detection runs once per paragraph; the result feeds both the
    /// undetected-paragraph warnings and the retention decision.
    pub fn curate(&self, file_name: &str, text: &str) -> (String, FileStats) {
        let paragraphs = self.tokenizer.tokenize(text);
        let detector = self.filter.detector();

        let mut stats = FileStats {
            lines: text.lines().count(),
            paragraphs: paragraphs.len(),
            ..FileStats::default()
        };
        tracing::debug!(file = %file_name, lines = stats.lines, paragraphs = stats.paragraphs, "tokenized");

        let mut kept = Vec::new();
        for (i, paragraph) in paragraphs.iter().enumerate() {
            let detection = detector.detect(paragraph);
            tracing::debug!(
                file = %file_name,
                paragraph = i + 1,
                language = detection.as_deref().unwrap_or("undetected"),
                "detected language"
            );
            if detection.is_none() {
                stats.undetected += 1;
                let preview: String = paragraph.chars().take(PREVIEW_CHARS).collect();
                tracing::warn!(
                    file = %file_name,
                    "Unable to detect language for paragraph {}: \"{preview}\"",
                    i + 1
                );
            }
            if self.filter.retains(detection.as_deref()) {
                kept.push(paragraph.as_str());
            }
        }
        stats.kept = kept.len();

        (kept.join("\n"), stats)
    }
}

/// Write `content` to `path`. Without `force`, the file is created only if
/// it does not exist yet; returns `false` when it already did.
fn write_output(path: &Path, content: &str, force: bool) -> Result<bool, IngestError> {
    let write_err = |source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    };

    if force {
        fs::write(path, content).map_err(write_err)?;
        return Ok(true);
    }

    match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(content.as_bytes()).map_err(write_err)?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(write_err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_kept() {
        let stats = FileStats {
            lines: 4,
            paragraphs: 4,
            kept: 1,
            undetected: 0,
        };
        assert_eq!(stats.percentage_kept(), Some(25.0));
        assert_eq!(stats.percentage_display(), "25.00%");
    }

    #[test]
    fn percentage_kept_without_paragraphs() {
        let stats = FileStats::default();
        assert_eq!(stats.percentage_kept(), None);
        assert_eq!(stats.percentage_display(), "N/A");
    }

    #[test]
    fn extension_matching() {
        let config = BatchConfig::new("in", "out");
        assert!(config.accepts(Path::new("in/a.txt")));
        assert!(config.accepts(Path::new("in/B.TXT")));
        assert!(!config.accepts(Path::new("in/a.txt.bak")));
        assert!(!config.accepts(Path::new("in/README")));

        let config = config.with_extensions(vec![".text".into(), "md".into()]);
        assert!(config.accepts(Path::new("in/a.text")));
        assert!(config.accepts(Path::new("in/a.md")));
        assert!(!config.accepts(Path::new("in/a.txt")));
    }

    #[test]
    fn summary_totals() {
        let stats = FileStats {
            lines: 3,
            paragraphs: 2,
            kept: 1,
            undetected: 1,
        };
        let summary = RunSummary {
            files: vec![
                FileReport {
                    file_name: "a.txt".into(),
                    outcome: FileOutcome::Written(stats),
                },
                FileReport {
                    file_name: "b.txt".into(),
                    outcome: FileOutcome::Skipped,
                },
                FileReport {
                    file_name: "c.txt".into(),
                    outcome: FileOutcome::Written(stats),
                },
            ],
        };
        assert_eq!(summary.written(), 2);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.totals().paragraphs, 4);
        assert_eq!(summary.totals().kept, 2);
    }
}
