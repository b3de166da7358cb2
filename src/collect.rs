//! Accumulating streams of cells into tables.
//!
//! The plain path ([`Table::try_from_cells`]) runs every cell through a
//! builder and rejects duplicate (row, column) pairs when the table is
//! built. The merging path ([`Collector`], [`Table::from_cells_merged`])
//! detects collisions while accumulating and combines the colliding
//! values with a caller-supplied merge function instead.

use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;

use crate::{
    cell::Cell,
    error::DuplicateCellError,
    table::Table,
};

/// Accumulates cells in encounter order, merging values that collide on
/// a (row key, column key) pair.
///
/// The intended use is stream reduction: feed each element through
/// [`insert`](Self::insert), then [`finish`](Self::finish). For parallel
/// reduction, give each worker its own collector and fold the partial
/// states pairwise with [`combine`](Self::combine); the receiving
/// state's cells keep their positions and the other state's cells are
/// replayed after them in its own encounter order, so the final cell
/// order is deterministic under sequential reduction and depends on the
/// combination order under parallel reduction.
pub struct Collector<R, C, V, F> {
    cells: Vec<Provisional<R, C, V>>,
    positions: HashMap<(R, C), usize>,
    merge: F,
}

// The value is only absent for the instant a merge swaps it out.
struct Provisional<R, C, V> {
    row: R,
    column: C,
    value: Option<V>,
}

impl<R, C, V> Provisional<R, C, V> {
    fn into_cell(self) -> Cell<R, C, V> {
        let value = self.value.expect("the provisional value is present");
        Cell::new(self.row, self.column, value)
    }
}

impl<R, C, V, F> Collector<R, C, V, F>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    F: FnMut(V, V) -> V,
{
    #[must_use]
    pub fn new(merge: F) -> Self {
        Self {
            cells: Vec::new(),
            positions: HashMap::new(),
            merge,
        }
    }

    /// Number of distinct (row, column) pairs seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds one cell.
    ///
    /// An unseen (row, column) pair is appended in encounter order; a
    /// seen one keeps its position and its value becomes
    /// `merge(old, new)`.
    pub fn insert(&mut self, row: R, column: C, value: V) {
        match self.positions.entry((row, column)) {
            Entry::Occupied(entry) => {
                let slot = &mut self.cells[*entry.get()].value;
                let old = slot.take().expect("the provisional value is present");
                *slot = Some((self.merge)(old, value));
            },
            Entry::Vacant(entry) => {
                let (row, column) = entry.key().clone();
                let position = self.cells.len();
                self.cells.push(Provisional { row, column, value: Some(value) });
                entry.insert(position);
            },
        }
    }

    /// Replays the other collector's cells into this one, in the other's
    /// encounter order, through the same insert/merge logic.
    pub fn combine(&mut self, other: Self) {
        for cell in other.cells {
            let value = cell.value.expect("the provisional value is present");
            self.insert(cell.row, cell.column, value);
        }
    }

    /// Builds the table from the accumulated, deduplicated cells.
    #[must_use]
    pub fn finish(self) -> Table<R, C, V> {
        let cells: Vec<Cell<R, C, V>> = self.cells.into_iter()
            .map(Provisional::into_cell)
            .collect();
        match Table::from_cell_list(cells, None, None) {
            Ok(table) => table,
            Err(_) => unreachable!("the collector deduplicates key pairs"),
        }
    }
}

impl<R, C, V> Table<R, C, V>
where R: Eq + Hash, C: Eq + Hash
{
    /// Builds a table from any stream of cells or (row, column, value)
    /// tuples, in stream order.
    ///
    /// Fails with [`DuplicateCellError`] if two cells share a
    /// (row, column) pair; no merging is attempted.
    pub fn try_from_cells<I>(cells: I) -> Result<Self, DuplicateCellError<R, C>>
    where
        I: IntoIterator,
        I::Item: Into<Cell<R, C, V>>,
    {
        Self::from_cell_list(
            cells.into_iter().map(Into::into).collect(),
            None,
            None,
        )
    }

    /// Builds a table from a stream of cells, combining values that
    /// collide on a (row, column) pair with `merge` in encounter order.
    #[must_use]
    pub fn from_cells_merged<I, F>(cells: I, merge: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cell<R, C, V>>,
        R: Clone,
        C: Clone,
        F: FnMut(V, V) -> V,
    {
        let mut state = Collector::new(merge);
        for item in cells {
            let (row, column, value) = item.into().into_parts();
            state.insert(row, column, value);
        }
        state.finish()
    }
}
