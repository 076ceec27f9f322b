use crate::error::{ProcessingError, Result};
use crate::models::HeaderLanguage;
use crate::utils::constants::{
    DAT_EXTENSION, DEFAULT_ENCODING, ENV_PREFIX, FILE_PREFIX, NEWEST_YEAR, OLDEST_YEAR,
    TEMPERATURE_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::{Validate, ValidationError};

/// Conversion settings.
///
/// The year cutoffs and the temperature threshold are tied to the collection
/// window of the source data, so they are configurable rather than fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_window"))]
pub struct Settings {
    #[validate(range(min = 1900, max = 2100))]
    pub oldest_year: i32,

    #[validate(range(min = 1900, max = 2100))]
    pub newest_year: i32,

    #[validate(range(min = 1, max = 999))]
    pub temperature_threshold: i32,

    #[validate(custom(function = "validate_encoding"))]
    pub encoding: String,

    pub header_language: HeaderLanguage,

    #[validate(length(min = 1))]
    pub file_prefix: String,

    #[validate(length(min = 1), custom(function = "validate_extension"))]
    pub extension: String,

    /// Memory-map DAT files instead of reading them into a buffer.
    pub use_mmap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            oldest_year: OLDEST_YEAR,
            newest_year: NEWEST_YEAR,
            temperature_threshold: TEMPERATURE_THRESHOLD,
            encoding: DEFAULT_ENCODING.to_string(),
            header_language: HeaderLanguage::default(),
            file_prefix: FILE_PREFIX.to_string(),
            extension: DAT_EXTENSION.to_string(),
            use_mmap: false,
        }
    }
}

fn validate_year_window(settings: &Settings) -> std::result::Result<(), ValidationError> {
    let span = settings.newest_year - settings.oldest_year;
    // Two-digit suffixes can only distinguish a hundred years
    if !(0..100).contains(&span) {
        return Err(ValidationError::new("year_window"));
    }
    Ok(())
}

fn validate_encoding(label: &str) -> std::result::Result<(), ValidationError> {
    if encoding_rs::Encoding::for_label(label.as_bytes()).is_none() {
        return Err(ValidationError::new("unknown_encoding"));
    }
    Ok(())
}

fn validate_extension(extension: &str) -> std::result::Result<(), ValidationError> {
    if extension.starts_with('.') || extension.contains(['/', '\\', '*', '?']) {
        return Err(ValidationError::new("extension"));
    }
    Ok(())
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and `DAT2CSV_*`
    /// environment variables, in that order of precedence.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("oldest_year", i64::from(defaults.oldest_year))?
            .set_default("newest_year", i64::from(defaults.newest_year))?
            .set_default("temperature_threshold", i64::from(defaults.temperature_threshold))?
            .set_default("encoding", defaults.encoding)?
            .set_default("header_language", "japanese")?
            .set_default("file_prefix", defaults.file_prefix)?
            .set_default("extension", defaults.extension)?
            .set_default("use_mmap", defaults.use_mmap)?;

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!("Reading settings from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings: Settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_header_language(mut self, language: HeaderLanguage) -> Self {
        self.header_language = language;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn encoding(&self) -> Result<&'static encoding_rs::Encoding> {
        encoding_rs::Encoding::for_label(self.encoding.as_bytes()).ok_or_else(|| {
            ProcessingError::Config(format!("Unknown encoding label: {}", self.encoding))
        })
    }
}
