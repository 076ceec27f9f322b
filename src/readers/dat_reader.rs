use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::{MeshCellId, MeshHeader, VariableKey};
use crate::processors::merge_store::{CellSeries, MergeStore};
use crate::readers::layout::{
    self, FieldSpec, BLOCK_LINES, ELEVATION, FIELD_AREA, FILE_HEADER_LINES, FOREST_AREA,
    LAND_AREA, MESH_CODE, MONTH, ORCHARD_AREA, PADDY_AREA,
};
use crate::utils::constants::{OLDEST_YEAR, TEMPERATURE_OFFSET, TEMPERATURE_THRESHOLD};
use crate::utils::filename::decode_filename;
use chrono::NaiveDate;
use encoding_rs::Encoding;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// Counts gathered while reading one DAT file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub blocks: usize,
    pub days: usize,
    pub dropped_lines: usize,
}

/// Decode a raw daily field into a reading.
///
/// Temperature fields are tenths of a degree; values above `threshold` hold
/// below-zero readings offset by 1000.
pub fn decode_value(raw: i32, key: VariableKey, threshold: i32) -> f64 {
    if !key.is_temperature() {
        return f64::from(raw);
    }
    let signed = if raw > threshold {
        raw - TEMPERATURE_OFFSET
    } else {
        raw
    };
    round_tenths(f64::from(signed) * 0.1)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct DatReader {
    encoding: &'static Encoding,
    oldest_year: i32,
    temperature_threshold: i32,
    use_mmap: bool,
}

impl DatReader {
    pub fn new() -> Self {
        Self {
            encoding: encoding_rs::SHIFT_JIS,
            oldest_year: OLDEST_YEAR,
            temperature_threshold: TEMPERATURE_THRESHOLD,
            use_mmap: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            encoding: settings.encoding()?,
            oldest_year: settings.oldest_year,
            temperature_threshold: settings.temperature_threshold,
            use_mmap: settings.use_mmap,
        })
    }

    /// Parse a DAT file and merge its readings into `store`.
    ///
    /// The variable and year come from the filename, so a filename without a
    /// known variable code fails before the file is opened.
    pub fn read_into(&self, path: &Path, store: &mut MergeStore) -> Result<ReadSummary> {
        let (key, year) = decode_filename(path, self.oldest_year)?;
        let content = self.read_text(path)?;
        let source = path.display().to_string();
        self.parse_content(&content, key, year, store, &source)
    }

    /// Mesh headers of every complete block in a DAT file.
    pub fn read_headers(&self, path: &Path) -> Result<Vec<MeshHeader>> {
        let content = self.read_text(path)?;
        let lines: Vec<&str> = content.lines().skip(FILE_HEADER_LINES).collect();

        lines
            .chunks_exact(BLOCK_LINES)
            .map(|block| parse_header_line(block[0]))
            .collect()
    }

    /// Parse decoded DAT text for variable `key` of `year` into `store`.
    pub fn parse_content(
        &self,
        content: &str,
        key: VariableKey,
        year: i32,
        store: &mut MergeStore,
        source: &str,
    ) -> Result<ReadSummary> {
        let mut summary = ReadSummary::default();
        let lines: Vec<&str> = content.lines().skip(FILE_HEADER_LINES).collect();

        let blocks = lines.chunks_exact(BLOCK_LINES);
        let remainder = blocks.remainder().len();

        for (block_index, block) in blocks.enumerate() {
            let first_line = FILE_HEADER_LINES + block_index * BLOCK_LINES + 1;
            let mesh = MeshCellId::new(MESH_CODE.slice(block[0]))
                .map_err(|e| at_line(source, first_line, e))?;

            let mut series = CellSeries::new();
            for (offset, line) in block[1..].iter().enumerate() {
                let month = offset as u32 + 1;
                let line_number = first_line + offset + 1;
                let days = self
                    .parse_month_line(line, key, year, month)
                    .map_err(|e| at_line(source, line_number, e))?;

                summary.days += days.len();
                for (date, value) in days {
                    series.entry(date).or_default().set(key, value);
                }
            }

            debug!(
                "{}: mesh {} with {} days of {}",
                source,
                mesh,
                series.len(),
                key
            );
            store.merge_block(mesh, series);
            summary.blocks += 1;
        }

        if remainder > 0 {
            warn!(
                "{}: dropping {} trailing lines that do not form a complete block",
                source, remainder
            );
            summary.dropped_lines = remainder;
        }

        Ok(summary)
    }

    /// Parse one monthly line into dated readings.
    ///
    /// The month is taken from the line's position within the block; the
    /// month column is only cross-checked.
    fn parse_month_line(
        &self,
        line: &str,
        key: VariableKey,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        let month_field = MONTH.slice(line).trim();
        if month_field.parse::<u32>().ok() != Some(month) {
            warn!(
                "Month column '{}' does not match block position {}",
                month_field, month
            );
        }

        let count = layout::day_field_count(line);
        let mut days = Vec::with_capacity(count);
        for index in 0..count {
            let field = layout::day_field(index);
            let raw = parse_int(field, line)?;
            let day = index as u32 + 1;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Day {} does not exist in {}-{:02}",
                    day, year, month
                ))
            })?;
            days.push((date, decode_value(raw, key, self.temperature_threshold)));
        }

        Ok(days)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        if self.use_mmap {
            let file = File::open(path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            Ok(self.decode_bytes(&mmap, path))
        } else {
            let bytes = std::fs::read(path)?;
            Ok(self.decode_bytes(&bytes, path))
        }
    }

    fn decode_bytes(&self, bytes: &[u8], path: &Path) -> String {
        let (text, _, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(
                "{} contains bytes that are not valid {}",
                path.display(),
                self.encoding.name()
            );
        }
        text.into_owned()
    }
}

impl Default for DatReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix a format error with `source:line`.
fn at_line(source: &str, line_number: usize, err: ProcessingError) -> ProcessingError {
    match err {
        ProcessingError::InvalidFormat(message) => {
            ProcessingError::InvalidFormat(format!("{}:{}: {}", source, line_number, message))
        }
        other => other,
    }
}

/// Parse a mesh header line.
///
/// Only the mesh code is required. Blank or unreadable area columns read as
/// `None`.
fn parse_header_line(line: &str) -> Result<MeshHeader> {
    let mesh = MeshCellId::new(MESH_CODE.slice(line))?;
    let mut header = MeshHeader::new(mesh);
    header.elevation = lenient_int(ELEVATION, line);
    header.land_area = lenient_int(LAND_AREA, line);
    header.paddy_area = lenient_int(PADDY_AREA, line);
    header.field_area = lenient_int(FIELD_AREA, line);
    header.orchard_area = lenient_int(ORCHARD_AREA, line);
    header.forest_area = lenient_int(FOREST_AREA, line);
    Ok(header)
}

fn parse_int(field: FieldSpec, line: &str) -> Result<i32> {
    let text = field.slice(line).trim();
    text.parse::<i32>().map_err(|_| {
        ProcessingError::InvalidFormat(format!(
            "Invalid {} value at column {}: '{}'",
            field.name,
            field.offset + 1,
            text
        ))
    })
}

fn lenient_int(field: FieldSpec, line: &str) -> Option<i32> {
    if field.slice(line).trim().is_empty() {
        return None;
    }
    match parse_int(field, line) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}
