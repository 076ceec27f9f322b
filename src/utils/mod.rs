pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{decode_filename, variable_key_from, year_from, year_token};
pub use progress::ProgressReporter;
