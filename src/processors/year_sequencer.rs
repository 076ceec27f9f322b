use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::VariableKey;
use crate::utils::constants::{DAT_EXTENSION, FILE_PREFIX, NEWEST_YEAR};
use crate::utils::filename::{dat_filename, year_token};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Orders the raw year tokens found in a source directory and lists the
/// files expected for each of them.
///
/// Tokens are the literal four characters before the extension. Years of the
/// 1900s are written with a 20 prefix (`2078` is 1978), so plain sorting puts
/// them after the 2000s; tokens above `newest_year` are rotated to the front.
pub struct YearSequencer {
    newest_year: i32,
    file_prefix: String,
    extension: String,
}

impl YearSequencer {
    pub fn new() -> Self {
        Self {
            newest_year: NEWEST_YEAR,
            file_prefix: FILE_PREFIX.to_string(),
            extension: DAT_EXTENSION.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            newest_year: settings.newest_year,
            file_prefix: settings.file_prefix.clone(),
            extension: settings.extension.clone(),
        }
    }

    /// Distinct year tokens of `paths` in chronological order.
    ///
    /// Paths without a four-digit token are reported and left out.
    pub fn year_tokens<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<String> {
        let mut tokens = BTreeSet::new();
        for path in paths {
            let path = path.as_ref();
            match year_token(path).filter(|t| is_numeric_token(t)) {
                Some(token) => {
                    tokens.insert(token.to_string());
                }
                None => warn!("No year token in {}, skipping", path.display()),
            }
        }

        let mut sorted: Vec<String> = tokens.into_iter().collect();
        let pivot = sorted
            .iter()
            .position(|t| t.parse::<i32>().is_ok_and(|year| year > self.newest_year));
        if let Some(index) = pivot {
            sorted.rotate_left(index);
        }
        sorted
    }

    /// Paths expected in `src_dir` for `token`, one per variable in table order.
    pub fn files_for_year(&self, src_dir: &Path, token: &str) -> Result<Vec<(VariableKey, PathBuf)>> {
        if !is_numeric_token(token) {
            return Err(ProcessingError::InvalidFilename(format!(
                "Invalid year token: {}",
                token
            )));
        }

        Ok(VariableKey::ALL
            .iter()
            .map(|key| {
                let name = dat_filename(&self.file_prefix, *key, token, &self.extension);
                (*key, src_dir.join(name))
            })
            .collect())
    }
}

impl Default for YearSequencer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_numeric_token(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}
