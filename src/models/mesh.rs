use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

pub const MESH_CODE_LENGTH: usize = 8;
const PARENT_SUFFIX_LENGTH: usize = 2;

/// Tertiary mesh code identifying one grid cell (e.g. `53394611`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeshCellId(String);

impl MeshCellId {
    pub fn new(code: &str) -> Result<Self> {
        if code.len() != MESH_CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Invalid mesh code: '{}'. Expected {} alphanumeric characters",
                code, MESH_CODE_LENGTH
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Secondary mesh code the cell belongs to, used for output directory placement.
    pub fn parent(&self) -> &str {
        &self.0[..MESH_CODE_LENGTH - PARENT_SUFFIX_LENGTH]
    }
}

impl TryFrom<String> for MeshCellId {
    type Error = ProcessingError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<MeshCellId> for String {
    fn from(value: MeshCellId) -> Self {
        value.0
    }
}

impl std::fmt::Display for MeshCellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Header line of a mesh-cell block.
///
/// Only `mesh` takes part in conversion; elevation and land-use areas are
/// decoded for inspection and left `None` when the column is blank or unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshHeader {
    pub mesh: MeshCellId,
    pub elevation: Option<i32>,
    pub land_area: Option<i32>,
    pub paddy_area: Option<i32>,
    pub field_area: Option<i32>,
    pub orchard_area: Option<i32>,
    pub forest_area: Option<i32>,
}

impl MeshHeader {
    pub fn new(mesh: MeshCellId) -> Self {
        Self {
            mesh,
            elevation: None,
            land_area: None,
            paddy_area: None,
            field_area: None,
            orchard_area: None,
            forest_area: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_is_prefix() {
        let mesh = MeshCellId::new("53394611").unwrap();
        assert_eq!(mesh.parent(), "533946");
        assert!(mesh.as_str().starts_with(mesh.parent()));
    }

    #[test]
    fn test_invalid_mesh_codes() {
        assert!(MeshCellId::new("5339461").is_err());
        assert!(MeshCellId::new("533946111").is_err());
        assert!(MeshCellId::new("5339 611").is_err());
        assert!(MeshCellId::new("").is_err());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let mesh = MeshCellId::new("12345678").unwrap();
        let json = serde_json::to_string(&mesh).unwrap();
        assert_eq!(json, "\"12345678\"");

        let back: MeshCellId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
        assert!(serde_json::from_str::<MeshCellId>("\"123\"").is_err());
    }
}
