pub mod dat_reader;
pub mod layout;

pub use dat_reader::{decode_value, DatReader, ReadSummary};
pub use layout::FieldSpec;
