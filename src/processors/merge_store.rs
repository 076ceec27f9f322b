use crate::models::{DailyRecord, MeshCellId, VariableKey};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Daily records of one mesh cell, in date order.
pub type CellSeries = BTreeMap<NaiveDate, DailyRecord>;

/// In-memory accumulation of daily readings per mesh cell.
///
/// A store is filled from every variable file of one processing unit (a
/// year) and then handed to the CSV writer. Readings are merged at
/// date + variable granularity: the first value recorded for a
/// (mesh, date, variable) triple is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeStore {
    cells: BTreeMap<MeshCellId, CellSeries>,
}

impl MergeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the records of one parsed mesh-cell block.
    pub fn merge_block(&mut self, mesh: MeshCellId, block: CellSeries) {
        let series = self.cells.entry(mesh).or_default();
        for (date, record) in block {
            match series.get_mut(&date) {
                Some(existing) => existing.merge_from(record),
                None => {
                    series.insert(date, record);
                }
            }
        }
    }

    pub fn cell(&self, mesh: &MeshCellId) -> Option<&CellSeries> {
        self.cells.get(mesh)
    }

    pub fn value(&self, mesh: &MeshCellId, date: NaiveDate, key: VariableKey) -> Option<f64> {
        self.cells.get(mesh)?.get(&date)?.get(key)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&MeshCellId, &CellSeries)> {
        self.cells.iter()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total number of (mesh, date) rows held.
    pub fn row_count(&self) -> usize {
        self.cells.values().map(|series| series.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn block(key: VariableKey, values: &[(NaiveDate, f64)]) -> CellSeries {
        values
            .iter()
            .map(|(d, v)| (*d, DailyRecord::with_value(key, *v)))
            .collect()
    }

    #[test]
    fn test_merge_new_cell() {
        let mesh = MeshCellId::new("53394611").unwrap();
        let mut store = MergeStore::new();

        store.merge_block(
            mesh.clone(),
            block(VariableKey::Precipitation, &[(date(2001, 1, 1), 3.0)]),
        );

        assert_eq!(store.cell_count(), 1);
        assert_eq!(store.row_count(), 1);
        assert_eq!(
            store.value(&mesh, date(2001, 1, 1), VariableKey::Precipitation),
            Some(3.0)
        );
    }

    #[test]
    fn test_merge_adds_variables_and_dates() {
        let mesh = MeshCellId::new("53394611").unwrap();
        let mut store = MergeStore::new();

        store.merge_block(
            mesh.clone(),
            block(VariableKey::Precipitation, &[(date(2001, 1, 1), 3.0)]),
        );
        store.merge_block(
            mesh.clone(),
            block(
                VariableKey::MinTemperature,
                &[(date(2001, 1, 1), -2.5), (date(2001, 1, 2), -1.0)],
            ),
        );

        assert_eq!(store.row_count(), 2);
        let first = &store.cell(&mesh).unwrap()[&date(2001, 1, 1)];
        assert_eq!(first.get(VariableKey::Precipitation), Some(3.0));
        assert_eq!(first.get(VariableKey::MinTemperature), Some(-2.5));
        assert_eq!(
            store.value(&mesh, date(2001, 1, 2), VariableKey::Precipitation),
            None
        );
    }

    #[test]
    fn test_merge_never_alters_existing_triples() {
        let mesh = MeshCellId::new("53394611").unwrap();
        let mut store = MergeStore::new();
        store.merge_block(
            mesh.clone(),
            block(VariableKey::MeanTemperature, &[(date(2001, 7, 1), 25.0)]),
        );
        let before = store.clone();

        store.merge_block(
            mesh.clone(),
            block(VariableKey::MeanTemperature, &[(date(2001, 7, 1), -40.0)]),
        );

        assert_eq!(store, before);
        assert_eq!(
            store.value(&mesh, date(2001, 7, 1), VariableKey::MeanTemperature),
            Some(25.0)
        );
    }

    #[test]
    fn test_cells_are_independent() {
        let a = MeshCellId::new("53394611").unwrap();
        let b = MeshCellId::new("53394612").unwrap();
        let mut store = MergeStore::new();

        store.merge_block(a.clone(), block(VariableKey::SunshineDuration, &[(date(2001, 1, 1), 5.0)]));
        store.merge_block(b.clone(), block(VariableKey::SunshineDuration, &[(date(2001, 1, 1), 7.0)]));

        assert_eq!(store.cell_count(), 2);
        assert_eq!(store.value(&a, date(2001, 1, 1), VariableKey::SunshineDuration), Some(5.0));
        assert_eq!(store.value(&b, date(2001, 1, 1), VariableKey::SunshineDuration), Some(7.0));
    }
}
