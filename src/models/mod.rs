pub mod daily;
pub mod mesh;
pub mod variable;

pub use daily::DailyRecord;
pub use mesh::{MeshCellId, MeshHeader};
pub use variable::{HeaderLanguage, VariableKey};
