use crate::error::Result;
use crate::models::{DailyRecord, HeaderLanguage, MeshCellId, VariableKey};
use crate::processors::merge_store::{CellSeries, MergeStore};
use crate::utils::constants::{CSV_EXTENSION, DEFAULT_BUFFER_SIZE};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub cells: usize,
    pub files_created: usize,
    pub files_appended: usize,
    pub rows: usize,
}

impl WriteSummary {
    pub fn add(&mut self, other: &WriteSummary) {
        self.cells += other.cells;
        self.files_created += other.files_created;
        self.files_appended += other.files_appended;
        self.rows += other.rows;
    }
}

/// Writes merged mesh-cell series to `<output>/<parent mesh>/<mesh>.csv`.
///
/// Existing files are appended to without a header, so successive yearly
/// runs build one time series per cell.
pub struct CsvWriter {
    language: HeaderLanguage,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            language: HeaderLanguage::default(),
        }
    }

    pub fn with_language(language: HeaderLanguage) -> Self {
        Self { language }
    }

    /// Column names: the date column followed by every variable in table order.
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once(self.language.date_column())
            .chain(VariableKey::ALL.iter().map(|k| k.display_name(self.language)))
            .collect()
    }

    pub fn csv_path(output_dir: &Path, mesh: &MeshCellId) -> PathBuf {
        output_dir
            .join(mesh.parent())
            .join(format!("{}.{}", mesh, CSV_EXTENSION))
    }

    /// Write every cell of `store` below `output_dir`.
    pub fn write_store(&self, store: &MergeStore, output_dir: &Path) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();

        for (mesh, series) in store.cells() {
            let created = self.write_cell(output_dir, mesh, series)?;
            if created {
                summary.files_created += 1;
            } else {
                summary.files_appended += 1;
            }
            summary.cells += 1;
            summary.rows += series.len();
        }

        Ok(summary)
    }

    /// Write one cell's rows. Returns `true` when the file was newly created.
    fn write_cell(&self, output_dir: &Path, mesh: &MeshCellId, series: &CellSeries) -> Result<bool> {
        let path = Self::csv_path(output_dir, mesh);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let exists = path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .from_writer(file);

        if !exists {
            writer.write_record(self.header())?;
        }

        for (date, record) in series {
            let mut row = Vec::with_capacity(VariableKey::ALL.len() + 1);
            row.push(date.format("%Y-%m-%d").to_string());
            row.extend(VariableKey::ALL.iter().map(|key| format_value(*key, record)));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        debug!(
            "{} {} rows to {}",
            if exists { "Appended" } else { "Wrote" },
            series.len(),
            path.display()
        );

        Ok(!exists)
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Temperatures keep one decimal place, other variables are whole numbers.
/// Missing readings are left blank.
fn format_value(key: VariableKey, record: &DailyRecord) -> String {
    match record.get(key) {
        Some(value) if key.is_temperature() => format!("{:.1}", value),
        Some(value) => format!("{:.0}", value),
        None => String::new(),
    }
}
