use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::processors::merge_store::MergeStore;
use crate::processors::year_sequencer::YearSequencer;
use crate::readers::{DatReader, ReadSummary};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, WriteSummary};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSummary {
    pub token: String,
    pub files_read: usize,
    pub files_missing: usize,
    pub blocks: usize,
    pub write: WriteSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub years: Vec<YearSummary>,
}

impl ConversionSummary {
    pub fn files_read(&self) -> usize {
        self.years.iter().map(|y| y.files_read).sum()
    }

    pub fn files_missing(&self) -> usize {
        self.years.iter().map(|y| y.files_missing).sum()
    }

    pub fn totals(&self) -> WriteSummary {
        let mut total = WriteSummary::default();
        for year in &self.years {
            total.add(&year.write);
        }
        total
    }

    pub fn summary(&self) -> String {
        let totals = self.totals();
        format!(
            "Conversion Summary:\n  Years: {}\n  Files read: {}\n  Files missing: {}\n  CSV files created: {}\n  CSV files appended: {}\n  Rows written: {}",
            self.years.len(),
            self.files_read(),
            self.files_missing(),
            totals.files_created,
            totals.files_appended,
            totals.rows
        )
    }
}

/// Runs the year-by-year conversion of a DAT directory into CSV files.
///
/// Each year gets a fresh [`MergeStore`] that is written out and dropped
/// before the next year is read.
pub struct Converter {
    settings: Settings,
    reader: DatReader,
    sequencer: YearSequencer,
    writer: CsvWriter,
}

impl Converter {
    pub fn new(settings: Settings) -> Result<Self> {
        let reader = DatReader::from_settings(&settings)?;
        let sequencer = YearSequencer::from_settings(&settings);
        let writer = CsvWriter::with_language(settings.header_language);
        Ok(Self {
            settings,
            reader,
            sequencer,
            writer,
        })
    }

    /// All `*.<extension>` files directly inside `src_dir`.
    pub fn discover(&self, src_dir: &Path) -> Result<Vec<PathBuf>> {
        let escaped = glob::Pattern::escape(&src_dir.to_string_lossy());
        let pattern = Path::new(&escaped).join(format!("*.{}", self.settings.extension));

        let mut files = Vec::new();
        for entry in glob::glob(&pattern.to_string_lossy())? {
            files.push(entry?);
        }
        Ok(files)
    }

    /// Year tokens of the DAT files in `src_dir`, in processing order.
    pub fn years(&self, src_dir: &Path) -> Result<Vec<String>> {
        let files = self.discover(src_dir)?;
        Ok(self.sequencer.year_tokens(&files))
    }

    /// Convert every year found in `src_dir` into `output_dir`.
    pub fn convert_directory(
        &self,
        src_dir: &Path,
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionSummary> {
        let tokens = self.years(src_dir)?;
        self.convert_years(src_dir, &tokens, output_dir, progress)
    }

    /// Convert the given year tokens, in order, into `output_dir`.
    pub fn convert_years(
        &self,
        src_dir: &Path,
        tokens: &[String],
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionSummary> {
        info!("{} years found in {}", tokens.len(), src_dir.display());

        let mut summary = ConversionSummary::default();
        for (index, token) in tokens.iter().enumerate() {
            if let Some(progress) = progress {
                progress.set_message(&format!("{}/{}: {}", index + 1, tokens.len(), token));
            }
            info!("{}/{}: {}", index + 1, tokens.len(), token);

            summary.years.push(self.convert_year(src_dir, token, output_dir)?);

            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        Ok(summary)
    }

    /// Read every variable file of one year token and write the merged result.
    pub fn convert_year(&self, src_dir: &Path, token: &str, output_dir: &Path) -> Result<YearSummary> {
        let mut summary = YearSummary {
            token: token.to_string(),
            ..YearSummary::default()
        };
        let mut store = MergeStore::new();

        for (key, path) in self.sequencer.files_for_year(src_dir, token)? {
            match self.read_file(&path, &mut store) {
                Ok(read) => {
                    summary.files_read += 1;
                    summary.blocks += read.blocks;
                }
                Err(e) if e.is_recoverable() => {
                    warn!("{}, skipping {}", e, key);
                    summary.files_missing += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "writing {} mesh cells ({} rows) for {}",
            store.cell_count(),
            store.row_count(),
            token
        );
        summary.write = self.writer.write_store(&store, output_dir)?;

        Ok(summary)
    }

    fn read_file(&self, path: &Path, store: &mut MergeStore) -> Result<ReadSummary> {
        if !path.exists() {
            return Err(ProcessingError::MissingFile(path.to_path_buf()));
        }
        info!("loading: {}", path.display());
        self.reader.read_into(path, store)
    }
}
