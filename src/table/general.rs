//! The general layout: two or more cells cross-indexed over ordered key sets.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::{
    builder::Comparator,
    cell::Cell,
    error::DuplicateCellError,
};

/// Per-key group: opposite key index → cell index, in canonical cell order.
pub(crate) type Group = IndexMap<u32, u32, FxBuildHasher>;

/// The N ≥ 2 representation.
///
/// Cells are stored decomposed: values in canonical order, and two
/// parallel index arrays tying each cell to its position in the distinct
/// row / column key sets (the same components the serialized form
/// carries). The per-row and per-column groups are built once here and
/// back every derived view and lookup afterwards.
#[derive(Clone, Debug)]
pub(crate) struct General<R, C, V> {
    row_keys: IndexSet<R>,
    column_keys: IndexSet<C>,
    values: Vec<V>,
    cell_rows: Box<[u32]>,
    cell_cols: Box<[u32]>,
    by_row: Box<[Group]>,
    by_column: Box<[Group]>,
}

fn key_index(index: usize) -> u32 {
    index.try_into().expect("the key count should fit in u32")
}

/// Stable-sorts a key set, returning the remap table from old positions
/// to new ones.
fn sort_key_set<K>(keys: &mut IndexSet<K>, order: &Comparator<K>) -> Vec<u32>
where K: Eq + Hash
{
    let mut entries: Vec<(u32, K)> = std::mem::take(keys)
        .into_iter()
        .enumerate()
        .map(|(index, key)| (key_index(index), key))
        .collect();
    entries.sort_by(|(_, a), (_, b)| order(a, b));
    let mut remap = vec![0_u32; entries.len()];
    for (new_index, &(old_index, _)) in entries.iter().enumerate() {
        remap[old_index as usize] = key_index(new_index);
    }
    *keys = entries.into_iter().map(|(_, key)| key).collect();
    remap
}

impl<R, C, V> General<R, C, V>
where R: Eq + Hash, C: Eq + Hash
{
    /// Builds the representation from an owned cell list.
    ///
    /// With comparators installed the cell list is first stable-sorted by
    /// them (rows, then columns; ties keep the put order) and the key
    /// sets are sorted to match; otherwise both keep first-occurrence
    /// order. Duplicate (row, column) pairs surface here, found against
    /// the group index under construction rather than by rescanning the
    /// raw list.
    pub(crate) fn from_cells(
        mut cells: Vec<Cell<R, C, V>>,
        row_order: Option<&Comparator<R>>,
        column_order: Option<&Comparator<C>>,
    ) -> Result<Self, DuplicateCellError<R, C>> {
        debug_assert!(cells.len() >= 2);
        if row_order.is_some() || column_order.is_some() {
            cells.sort_by(|a, b| {
                let rows = match row_order {
                    Some(order) => order(a.row(), b.row()),
                    None => std::cmp::Ordering::Equal,
                };
                rows.then_with(|| match column_order {
                    Some(order) => order(a.column(), b.column()),
                    None => std::cmp::Ordering::Equal,
                })
            });
        }
        let mut row_keys = IndexSet::new();
        let mut column_keys = IndexSet::new();
        let mut triples = Vec::with_capacity(cells.len());
        for cell in cells {
            let (row, column, value) = cell.into_parts();
            let (row_index, _) = row_keys.insert_full(row);
            let (column_index, _) = column_keys.insert_full(column);
            triples.push((key_index(row_index), key_index(column_index), value));
        }
        if let Some(order) = row_order {
            let remap = sort_key_set(&mut row_keys, order);
            for triple in &mut triples {
                triple.0 = remap[triple.0 as usize];
            }
        }
        if let Some(order) = column_order {
            let remap = sort_key_set(&mut column_keys, order);
            for triple in &mut triples {
                triple.1 = remap[triple.1 as usize];
            }
        }
        Self::index_cells(row_keys, column_keys, triples)
    }

    /// Rebuilds the representation from decoded serialized components.
    ///
    /// The component order is trusted (no re-sorting), but nothing else
    /// is: a malformed stream is reported, never mis-built.
    pub(crate) fn from_components(
        row_keys: Vec<R>,
        column_keys: Vec<C>,
        values: Vec<V>,
        cell_rows: Vec<u32>,
        cell_cols: Vec<u32>,
    ) -> Result<Self, &'static str> {
        let cell_count = values.len();
        if cell_count < 2 {
            return Err("a general table should hold at least two cells");
        }
        if cell_rows.len() != cell_count || cell_cols.len() != cell_count {
            return Err("cell index arrays should match the value count");
        }
        let distinct_rows = row_keys.len();
        let row_keys: IndexSet<R> = row_keys.into_iter().collect();
        if row_keys.len() != distinct_rows {
            return Err("row keys should be distinct");
        }
        let distinct_columns = column_keys.len();
        let column_keys: IndexSet<C> = column_keys.into_iter().collect();
        if column_keys.len() != distinct_columns {
            return Err("column keys should be distinct");
        }
        for (&row_index, &column_index) in cell_rows.iter().zip(&cell_cols) {
            if row_index as usize >= distinct_rows {
                return Err("cell row index should be in range");
            }
            if column_index as usize >= distinct_columns {
                return Err("cell column index should be in range");
            }
        }
        let triples = cell_rows.iter()
            .zip(&cell_cols)
            .zip(values)
            .map(|((&row_index, &column_index), value)| {
                (row_index, column_index, value)
            })
            .collect();
        let this = Self::index_cells(row_keys, column_keys, triples)
            .map_err(|_| "cells should not repeat a key pair")?;
        if this.by_row.iter().any(Group::is_empty)
            || this.by_column.iter().any(Group::is_empty)
        {
            return Err("every key should own at least one cell");
        }
        Ok(this)
    }

    fn index_cells(
        mut row_keys: IndexSet<R>,
        mut column_keys: IndexSet<C>,
        triples: Vec<(u32, u32, V)>,
    ) -> Result<Self, DuplicateCellError<R, C>> {
        let cell_count = triples.len();
        let mut values = Vec::with_capacity(cell_count);
        let mut cell_rows = Vec::with_capacity(cell_count);
        let mut cell_cols = Vec::with_capacity(cell_count);
        let mut by_row = vec![Group::default(); row_keys.len()];
        let mut by_column = vec![Group::default(); column_keys.len()];
        for (cell_index, (row_index, column_index, value)) in
            triples.into_iter().enumerate()
        {
            let cell_index = key_index(cell_index);
            let replaced = by_row[row_index as usize]
                .insert(column_index, cell_index);
            if replaced.is_some() {
                let row = row_keys.swap_remove_index(row_index as usize)
                    .expect("the row key is present");
                let column = column_keys.swap_remove_index(column_index as usize)
                    .expect("the column key is present");
                return Err(DuplicateCellError { row, column });
            }
            by_column[column_index as usize].insert(row_index, cell_index);
            values.push(value);
            cell_rows.push(row_index);
            cell_cols.push(column_index);
        }
        Ok(Self {
            row_keys,
            column_keys,
            values,
            cell_rows: cell_rows.into_boxed_slice(),
            cell_cols: cell_cols.into_boxed_slice(),
            by_row: by_row.into_boxed_slice(),
            by_column: by_column.into_boxed_slice(),
        })
    }

}

impl<R, C, V> General<R, C, V> {
    /// Cell index at (`row`, `column`), if that pair holds a cell.
    pub(crate) fn find<RQ, CQ>(&self, row: &RQ, column: &CQ) -> Option<u32>
    where
        RQ: Hash + Equivalent<R> + ?Sized,
        CQ: Hash + Equivalent<C> + ?Sized,
    {
        let row_index = self.row_keys.get_index_of(row)?;
        let column_index = key_index(self.column_keys.get_index_of(column)?);
        self.by_row[row_index].get(&column_index).copied()
    }

    /// Cell index of `column` within the row group at `row_index`.
    pub(crate) fn find_in_row<Q>(&self, row_index: usize, column: &Q) -> Option<u32>
    where Q: Hash + Equivalent<C> + ?Sized
    {
        let column_index = key_index(self.column_keys.get_index_of(column)?);
        self.by_row[row_index].get(&column_index).copied()
    }

    /// Cell index of `row` within the column group at `column_index`.
    pub(crate) fn find_in_column<Q>(&self, column_index: usize, row: &Q) -> Option<u32>
    where Q: Hash + Equivalent<R> + ?Sized
    {
        let row_index = key_index(self.row_keys.get_index_of(row)?);
        self.by_column[column_index].get(&row_index).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn row_keys(&self) -> &IndexSet<R> {
        &self.row_keys
    }

    pub(crate) fn column_keys(&self) -> &IndexSet<C> {
        &self.column_keys
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    pub(crate) fn cell_rows(&self) -> &[u32] {
        &self.cell_rows
    }

    pub(crate) fn cell_cols(&self) -> &[u32] {
        &self.cell_cols
    }

    pub(crate) fn row_key(&self, index: usize) -> &R {
        self.row_keys.get_index(index).expect("the row key index is in bounds")
    }

    pub(crate) fn column_key(&self, index: usize) -> &C {
        self.column_keys.get_index(index).expect("the column key index is in bounds")
    }

    pub(crate) fn value(&self, index: usize) -> &V {
        &self.values[index]
    }

    pub(crate) fn cell(&self, index: usize) -> (&R, &C, &V) {
        (
            self.row_key(self.cell_rows[index] as usize),
            self.column_key(self.cell_cols[index] as usize),
            &self.values[index],
        )
    }

    pub(crate) fn row_group(&self, index: usize) -> &Group {
        &self.by_row[index]
    }

    pub(crate) fn column_group(&self, index: usize) -> &Group {
        &self.by_column[index]
    }

    pub(crate) fn into_components(
        self,
    ) -> (IndexSet<R>, IndexSet<C>, Vec<V>, Box<[u32]>, Box<[u32]>) {
        (
            self.row_keys,
            self.column_keys,
            self.values,
            self.cell_rows,
            self.cell_cols,
        )
    }
}

#[cfg(test)]
mod test {

    use crate::{cell::Cell, error::DuplicateCellError};

    use super::General;

    fn cells(parts: &[(i32, char, i32)]) -> Vec<Cell<i32, char, i32>> {
        parts.iter().map(|&(r, c, v)| Cell::new(r, c, v)).collect()
    }

    #[test]
    fn test_first_occurrence_key_order() {
        let general = General::from_cells(
            cells(&[(7, 'x', 1), (3, 'y', 2), (7, 'y', 3)]),
            None,
            None,
        ).unwrap();
        let rows: Vec<_> = general.row_keys().iter().copied().collect();
        let columns: Vec<_> = general.column_keys().iter().copied().collect();
        assert_eq!(rows, [7, 3]);
        assert_eq!(columns, ['x', 'y']);
        assert_eq!(general.values(), [1, 2, 3]);
        assert_eq!(general.cell_rows(), [0, 1, 0]);
        assert_eq!(general.cell_cols(), [0, 1, 1]);
    }

    #[test]
    fn test_duplicate_is_reported_with_keys() {
        let error = General::from_cells(
            cells(&[(1, 'a', 10), (2, 'b', 20), (1, 'a', 30)]),
            None,
            None,
        ).unwrap_err();
        assert_eq!(error, DuplicateCellError { row: 1, column: 'a' });
    }

    #[test]
    fn test_find_uses_both_indices() {
        let general = General::from_cells(
            cells(&[(1, 'a', 10), (2, 'b', 20), (1, 'b', 30)]),
            None,
            None,
        ).unwrap();
        assert_eq!(general.find(&1, &'b').map(|k| *general.value(k as usize)), Some(30));
        assert_eq!(general.find(&2, &'a'), None);
    }

    #[test]
    fn test_components_round_trip_structure() {
        let general = General::from_cells(
            cells(&[(1, 'a', 10), (2, 'b', 20), (1, 'b', 30)]),
            None,
            None,
        ).unwrap();
        let (rows, columns, values, cell_rows, cell_cols) =
            general.clone().into_components();
        let rebuilt = General::from_components(
            rows.into_iter().collect(),
            columns.into_iter().collect(),
            values,
            cell_rows.into_vec(),
            cell_cols.into_vec(),
        ).unwrap();
        assert_eq!(general.cell_rows(), rebuilt.cell_rows());
        assert_eq!(general.cell_cols(), rebuilt.cell_cols());
        assert_eq!(general.values(), rebuilt.values());
    }

    #[test]
    fn test_components_validation() {
        let bad_length = General::from_components(
            vec![1, 2], vec!['a'], vec![10, 20], vec![0, 1], vec![0],
        );
        assert!(bad_length.is_err());
        let bad_index = General::from_components(
            vec![1, 2], vec!['a'], vec![10, 20], vec![0, 2], vec![0, 0],
        );
        assert!(bad_index.is_err());
        let duplicate_pair = General::from_components(
            vec![1, 2], vec!['a'], vec![10, 20], vec![0, 0], vec![0, 0],
        );
        assert!(duplicate_pair.is_err());
        let duplicate_key = General::from_components(
            vec![1, 1], vec!['a', 'b'], vec![10, 20], vec![0, 1], vec![0, 1],
        );
        assert!(duplicate_key.is_err());
        let orphan_key = General::from_components(
            vec![1, 2, 3], vec!['a', 'b'], vec![10, 20], vec![0, 1], vec![0, 1],
        );
        assert!(orphan_key.is_err());
    }
}
