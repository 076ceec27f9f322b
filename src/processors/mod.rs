pub mod converter;
pub mod merge_store;
pub mod year_sequencer;

pub use converter::{ConversionSummary, Converter, YearSummary};
pub use merge_store::{CellSeries, MergeStore};
pub use year_sequencer::YearSequencer;
