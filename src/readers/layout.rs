//! Fixed-width layout of DAT records.
//!
//! A file opens with one file-level header line, followed by blocks of
//! [`BLOCK_LINES`] lines: one mesh header line and twelve monthly lines.
//! Offsets and widths are in characters.

/// Lines before the first mesh-cell block.
pub const FILE_HEADER_LINES: usize = 1;

/// One header line and one line per calendar month.
pub const BLOCK_LINES: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl FieldSpec {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// Slice this field out of `line`, clipped to the line's length.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        char_slice(line, self.offset, self.width)
    }
}

pub const MESH_CODE: FieldSpec = FieldSpec::new("mesh_code", 0, 8);
pub const ELEVATION: FieldSpec = FieldSpec::new("elevation", 8, 4);
pub const LAND_AREA: FieldSpec = FieldSpec::new("land_area", 12, 4);
pub const PADDY_AREA: FieldSpec = FieldSpec::new("paddy_area", 16, 4);
pub const FIELD_AREA: FieldSpec = FieldSpec::new("field_area", 20, 4);
pub const ORCHARD_AREA: FieldSpec = FieldSpec::new("orchard_area", 24, 4);
pub const FOREST_AREA: FieldSpec = FieldSpec::new("forest_area", 28, 4);

/// Mesh header line fields in column order.
pub const HEADER_FIELDS: [FieldSpec; 7] = [
    MESH_CODE,
    ELEVATION,
    LAND_AREA,
    PADDY_AREA,
    FIELD_AREA,
    ORCHARD_AREA,
    FOREST_AREA,
];

pub const MONTH: FieldSpec = FieldSpec::new("month", 2, 2);

/// Daily values start here and repeat every [`DAY_FIELD_WIDTH`] characters.
pub const DAY_FIELDS_OFFSET: usize = 4;
pub const DAY_FIELD_WIDTH: usize = 3;

/// Number of daily fields packed into a monthly line.
pub fn day_field_count(line: &str) -> usize {
    line.chars().count().saturating_sub(DAY_FIELDS_OFFSET) / DAY_FIELD_WIDTH
}

/// Daily field `index` (zero based) of a monthly line.
pub const fn day_field(index: usize) -> FieldSpec {
    FieldSpec::new(
        "day",
        DAY_FIELDS_OFFSET + index * DAY_FIELD_WIDTH,
        DAY_FIELD_WIDTH,
    )
}

fn char_slice(line: &str, offset: usize, width: usize) -> &str {
    if line.is_ascii() {
        let start = offset.min(line.len());
        let end = (offset + width).min(line.len());
        return &line[start..end];
    }

    let mut indices = line.char_indices().map(|(i, _)| i).chain(std::iter::once(line.len()));
    let start = indices.nth(offset).unwrap_or(line.len());
    let end = if width == 0 {
        start
    } else {
        indices.nth(width - 1).unwrap_or(line.len())
    };
    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields_are_contiguous() {
        let mut expected_offset = 0;
        for field in HEADER_FIELDS {
            assert_eq!(field.offset, expected_offset, "{}", field.name);
            expected_offset += field.width;
        }
    }

    #[test]
    fn test_slice_clips_to_line() {
        let line = "53394611  12";
        assert_eq!(MESH_CODE.slice(line), "53394611");
        assert_eq!(ELEVATION.slice(line), "  12");
        assert_eq!(LAND_AREA.slice(line), "");
    }

    #[test]
    fn test_slice_counts_characters() {
        let line = "気象データ 1978";
        assert_eq!(FieldSpec::new("t", 6, 4).slice(line), "1978");
        assert_eq!(FieldSpec::new("t", 0, 2).slice(line), "気象");
        assert_eq!(FieldSpec::new("t", 20, 2).slice(line), "");
    }

    #[test]
    fn test_day_fields() {
        let line = "   1 12 34567";
        assert_eq!(day_field_count(line), 3);
        assert_eq!(MONTH.slice(line), " 1");
        assert_eq!(day_field(0).slice(line), " 12");
        assert_eq!(day_field(1).slice(line), " 34");
        assert_eq!(day_field(2).slice(line), "567");
    }

    #[test]
    fn test_short_line_has_no_days() {
        assert_eq!(day_field_count(""), 0);
        assert_eq!(day_field_count("  1"), 0);
        // A partial trailing field is not counted
        assert_eq!(day_field_count("   1 12 3"), 1);
    }
}
