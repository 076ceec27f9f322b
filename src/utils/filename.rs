use crate::error::{ProcessingError, Result};
use crate::models::VariableKey;
use std::path::Path;

const SUFFIX_LENGTH: usize = 2;
const TOKEN_LENGTH: usize = 4;

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| ProcessingError::InvalidFilename(path.display().to_string()))
}

/// Last `width` bytes of the file name without its extension.
fn before_extension(path: &Path, width: usize) -> Option<&str> {
    path.extension()?;
    let stem = path.file_stem()?.to_str()?;
    let start = stem.len().checked_sub(width)?;
    stem.get(start..)
}

/// Variable key from a DAT filename (e.g. `MSTN2001.dat` -> min temperature).
///
/// Codes are tried in table order and the first one contained in the file
/// name wins.
pub fn variable_key_from(path: &Path) -> Result<VariableKey> {
    let name = file_name(path)?;
    VariableKey::ALL
        .into_iter()
        .find(|key| name.contains(key.code()))
        .ok_or_else(|| {
            ProcessingError::InvalidFilename(format!(
                "No variable code found in filename: {}",
                name
            ))
        })
}

/// Four-digit year from the two-digit suffix before the extension.
///
/// `19YY` is used unless it falls before `oldest_year`, in which case the
/// year belongs to the 2000s.
pub fn year_from(path: &Path, oldest_year: i32) -> Result<i32> {
    let name = file_name(path)?;
    let yy = before_extension(path, SUFFIX_LENGTH)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            ProcessingError::InvalidFilename(format!("No year suffix found in filename: {}", name))
        })?;

    let last_two: i32 = yy
        .parse()
        .map_err(|_| ProcessingError::InvalidFilename(format!("Invalid year suffix: {}", yy)))?;

    let candidate = 1900 + last_two;
    if candidate < oldest_year {
        Ok(2000 + last_two)
    } else {
        Ok(candidate)
    }
}

/// Variable key and year of a DAT file.
pub fn decode_filename(path: &Path, oldest_year: i32) -> Result<(VariableKey, i32)> {
    Ok((variable_key_from(path)?, year_from(path, oldest_year)?))
}

/// Raw four-character year token exactly as written in the filename
/// (`MSPR2078.dat` -> `2078`), without century resolution.
pub fn year_token(path: &Path) -> Option<&str> {
    before_extension(path, TOKEN_LENGTH)
}

/// Expected filename for a variable and raw year token (`MS` + `PR` + `2078` + `.dat`).
pub fn dat_filename(prefix: &str, key: VariableKey, token: &str, extension: &str) -> String {
    format!("{}{}{}.{}", prefix, key.code(), token, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{DAT_EXTENSION, FILE_PREFIX, NEWEST_YEAR, OLDEST_YEAR};

    #[test]
    fn test_variable_key_from_filename() {
        assert_eq!(
            variable_key_from(Path::new("/data/MSPR2001.dat")).unwrap(),
            VariableKey::Precipitation
        );
        assert_eq!(
            variable_key_from(Path::new("MSTX2078.dat")).unwrap(),
            VariableKey::MaxTemperature
        );
    }

    #[test]
    fn test_variable_key_ignores_directory() {
        // "PR" appears only in the directory name
        let result = variable_key_from(Path::new("/PR/MSXX2001.dat"));
        assert!(matches!(result, Err(ProcessingError::InvalidFilename(_))));
    }

    #[test]
    fn test_unknown_variable_code() {
        let result = variable_key_from(Path::new("MSQQ2001.dat"));
        assert!(matches!(result, Err(ProcessingError::InvalidFilename(_))));
    }

    #[test]
    fn test_century_boundary() {
        assert_eq!(year_from(Path::new("MSPR2078.dat"), OLDEST_YEAR).unwrap(), 1978);
        assert_eq!(year_from(Path::new("MSPR2077.dat"), OLDEST_YEAR).unwrap(), 2077);
        assert_eq!(year_from(Path::new("MSPR2000.dat"), OLDEST_YEAR).unwrap(), 2000);
        assert_eq!(year_from(Path::new("MSPR2099.dat"), OLDEST_YEAR).unwrap(), 1999);
    }

    #[test]
    fn test_every_suffix_decodes_into_window() {
        for yy in 0..100 {
            let path = format!("MSTM20{:02}.dat", yy);
            let year = year_from(Path::new(&path), OLDEST_YEAR).unwrap();
            assert!((OLDEST_YEAR..=NEWEST_YEAR).contains(&year), "{} -> {}", path, year);
            assert_eq!(year % 100, yy);
        }
    }

    #[test]
    fn test_invalid_year_suffix() {
        assert!(year_from(Path::new("MSPRxx.dat"), OLDEST_YEAR).is_err());
        assert!(year_from(Path::new(".dat"), OLDEST_YEAR).is_err());
    }

    #[test]
    fn test_decode_filename() {
        let (key, year) = decode_filename(Path::new("dat/MSSD2085.dat"), OLDEST_YEAR).unwrap();
        assert_eq!(key, VariableKey::SunshineDuration);
        assert_eq!(year, 1985);
    }

    #[test]
    fn test_year_token() {
        assert_eq!(year_token(Path::new("/data/MSPR2078.dat")), Some("2078"));
        assert_eq!(year_token(Path::new("a.dat")), None);
        assert_eq!(year_token(Path::new("MSPR2078")), None);
    }

    #[test]
    fn test_year_follows_any_extension_length() {
        assert_eq!(year_token(Path::new("MSPR2078.data")), Some("2078"));
        assert_eq!(year_token(Path::new("MSPR2001.d")), Some("2001"));
        assert_eq!(year_from(Path::new("MSTX2003.text"), OLDEST_YEAR).unwrap(), 2003);
    }

    #[test]
    fn test_dat_filename() {
        assert_eq!(
            dat_filename(FILE_PREFIX, VariableKey::SolarRadiation, "2078", DAT_EXTENSION),
            "MSSR2078.dat"
        );
    }
}
