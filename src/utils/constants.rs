/// Oldest data year; two-digit suffixes below this in the 1900s roll over to the 2000s
pub const OLDEST_YEAR: i32 = 1978;

/// Newest data year; raw year tokens above this belong to the previous century
pub const NEWEST_YEAR: i32 = 2077;

/// Raw temperature fields above this value encode below-zero readings
pub const TEMPERATURE_THRESHOLD: i32 = 500;

/// Offset subtracted from below-zero temperature fields
pub const TEMPERATURE_OFFSET: i32 = 1000;

/// Input encoding label understood by encoding_rs
pub const DEFAULT_ENCODING: &str = "shift_jis";

/// File naming
pub const FILE_PREFIX: &str = "MS";
pub const DAT_EXTENSION: &str = "dat";
pub const CSV_EXTENSION: &str = "csv";

/// Directory names
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DAT2CSV";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
