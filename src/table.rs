//! Immutable two-key tables and their read surface.

use std::hash::Hash;

use indexmap::Equivalent;

use crate::{
    builder::{Builder, Comparator},
    cell::Cell,
    error::DuplicateCellError,
};

mod general;
pub mod view;

pub(crate) use general::General;

use view::{Cells, Column, ColumnMap, IntoCells, Keys, Row, RowMap, Values};

/// An immutable mapping from (row key, column key) pairs to values.
///
/// A table is built once, through [`Table::builder`], [`Table::try_from_cells`],
/// or the merging [`Collector`](crate::Collector), and never changes
/// afterwards: no method takes `&mut self`, so every would-be mutation is
/// rejected at compile time. Reads need no synchronization; a built table
/// can be shared across threads freely whenever its keys and values can.
///
/// Internally one of three layouts is chosen by cell count when the table
/// is built: a zero-cell layout, a single-cell layout storing the one
/// triple directly, and a general layout cross-indexing N cells over
/// ordered key sets. All views (cell iteration, [`row_map`](Self::row_map),
/// [`column_map`](Self::column_map), key sets, values) read the same
/// layout and therefore always agree with each other and with the
/// iteration order fixed at build time.
#[derive(Clone)]
pub struct Table<R, C, V> {
    pub(crate) repr: Repr<R, C, V>,
}

#[derive(Clone)]
pub(crate) enum Repr<R, C, V> {
    Empty,
    Singleton(Cell<R, C, V>),
    General(General<R, C, V>),
}

impl<R, C, V> Table<R, C, V> {
    /// The empty table. Every zero-cell build compares equal to it.
    #[must_use]
    pub fn new() -> Self {
        Self { repr: Repr::Empty }
    }

    /// A table holding exactly one cell.
    #[must_use]
    pub fn singleton(row: R, column: C, value: V) -> Self {
        Self { repr: Repr::Singleton(Cell::new(row, column, value)) }
    }

    #[must_use]
    pub fn builder() -> Builder<R, C, V> {
        Builder::new()
    }

    /// Number of cells in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Empty => 0,
            Repr::Singleton(_) => 1,
            Repr::General(general) => general.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }

    /// Cells as (row key, column key, value) triples, in the iteration
    /// order fixed at build time: put order, or row-major order when the
    /// builder had comparators installed.
    #[must_use]
    pub fn cells(&self) -> Cells<'_, R, C, V> {
        Cells::new(&self.repr)
    }

    /// Values in cell iteration order.
    #[must_use]
    pub fn values(&self) -> Values<'_, V> {
        match &self.repr {
            Repr::Empty => Values::one(None),
            Repr::Singleton(cell) => Values::one(Some(cell.value())),
            Repr::General(general) => Values::many(general.values().iter()),
        }
    }

    /// Distinct row keys, in row key set order.
    #[must_use]
    pub fn row_keys(&self) -> Keys<'_, R> {
        match &self.repr {
            Repr::Empty => Keys::one(None),
            Repr::Singleton(cell) => Keys::one(Some(cell.row())),
            Repr::General(general) => Keys::many(general.row_keys().iter()),
        }
    }

    /// Distinct column keys, in column key set order.
    #[must_use]
    pub fn column_keys(&self) -> Keys<'_, C> {
        match &self.repr {
            Repr::Empty => Keys::one(None),
            Repr::Singleton(cell) => Keys::one(Some(cell.column())),
            Repr::General(general) => Keys::many(general.column_keys().iter()),
        }
    }

    /// The table grouped by row key: an ordered map from each row key to
    /// the ordered (column key → value) entries of that row.
    ///
    /// The view reads index structures computed when the table was built;
    /// calling it repeatedly allocates nothing and always describes the
    /// same grouping.
    #[must_use]
    pub fn row_map(&self) -> RowMap<'_, R, C, V> {
        RowMap::new(&self.repr)
    }

    /// The table grouped by column key; the mirror of
    /// [`row_map`](Self::row_map).
    #[must_use]
    pub fn column_map(&self) -> ColumnMap<'_, R, C, V> {
        ColumnMap::new(&self.repr)
    }
}

impl<R, C, V> Table<R, C, V> {
    /// Looks up the value at (`row`, `column`).
    ///
    /// Lookup keys may be any borrowed form of the key types, in the
    /// `indexmap` [`Equivalent`] sense: a table keyed by `String` answers
    /// `get("a", "b")`.
    #[must_use]
    pub fn get<RQ, CQ>(&self, row: &RQ, column: &CQ) -> Option<&V>
    where
        RQ: Hash + Equivalent<R> + ?Sized,
        CQ: Hash + Equivalent<C> + ?Sized,
    {
        self.get_cell(row, column).map(|(_, _, value)| value)
    }

    /// Like [`get`](Self::get), but returns the whole matching triple.
    #[must_use]
    pub fn get_cell<RQ, CQ>(&self, row: &RQ, column: &CQ) -> Option<(&R, &C, &V)>
    where
        RQ: Hash + Equivalent<R> + ?Sized,
        CQ: Hash + Equivalent<C> + ?Sized,
    {
        match &self.repr {
            Repr::Empty => None,
            Repr::Singleton(cell) => {
                (row.equivalent(cell.row()) && column.equivalent(cell.column()))
                    .then(|| cell.as_refs())
            },
            Repr::General(general) => {
                let index = general.find(row, column)?;
                Some(general.cell(index as usize))
            },
        }
    }

    #[must_use]
    pub fn contains<RQ, CQ>(&self, row: &RQ, column: &CQ) -> bool
    where
        RQ: Hash + Equivalent<R> + ?Sized,
        CQ: Hash + Equivalent<C> + ?Sized,
    {
        self.get_cell(row, column).is_some()
    }

    #[must_use]
    pub fn contains_row<Q>(&self, row: &Q) -> bool
    where Q: Hash + Equivalent<R> + ?Sized
    {
        match &self.repr {
            Repr::Empty => false,
            Repr::Singleton(cell) => row.equivalent(cell.row()),
            Repr::General(general) => general.row_keys().contains(row),
        }
    }

    #[must_use]
    pub fn contains_column<Q>(&self, column: &Q) -> bool
    where Q: Hash + Equivalent<C> + ?Sized
    {
        match &self.repr {
            Repr::Empty => false,
            Repr::Singleton(cell) => column.equivalent(cell.column()),
            Repr::General(general) => general.column_keys().contains(column),
        }
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where V: PartialEq
    {
        self.values().any(|candidate| candidate == value)
    }

    /// The (column key → value) entries of one row, in the established
    /// column order, or `None` for an unknown row key.
    #[must_use]
    pub fn row<Q>(&self, row: &Q) -> Option<Row<'_, R, C, V>>
    where Q: Hash + Equivalent<R> + ?Sized
    {
        self.row_map().get(row)
    }

    /// The (row key → value) entries of one column; the mirror of
    /// [`row`](Self::row).
    #[must_use]
    pub fn column<Q>(&self, column: &Q) -> Option<Column<'_, R, C, V>>
    where Q: Hash + Equivalent<C> + ?Sized
    {
        self.column_map().get(column)
    }
}

impl<R, C, V> Table<R, C, V>
where R: Eq + Hash, C: Eq + Hash
{
    /// Builds a table from an owned cell list, dispatching on cell count.
    pub(crate) fn from_cell_list(
        mut cells: Vec<Cell<R, C, V>>,
        row_order: Option<&Comparator<R>>,
        column_order: Option<&Comparator<C>>,
    ) -> Result<Self, DuplicateCellError<R, C>> {
        Ok(match cells.len() {
            0 => Self::new(),
            1 => {
                let cell = cells.pop().expect("one cell is present");
                Self { repr: Repr::Singleton(cell) }
            },
            _ => {
                let general = General::from_cells(cells, row_order, column_order)?;
                Self { repr: Repr::General(general) }
            },
        })
    }
}

impl<R, C, V> Default for Table<R, C, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell-set equality: two tables are equal when they hold the same
/// (row, column, value) triples, regardless of iteration order.
impl<R, C, V> PartialEq for Table<R, C, V>
where R: Eq + Hash, C: Eq + Hash, V: PartialEq
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.cells().all(|(row, column, value)| {
                other.get(row, column) == Some(value)
            })
    }
}

impl<R, C, V> Eq for Table<R, C, V>
where R: Eq + Hash, C: Eq + Hash, V: Eq
{}

impl<R, C, V> std::fmt::Debug for Table<R, C, V>
where R: std::fmt::Debug, C: std::fmt::Debug, V: std::fmt::Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut f = f.debug_map();
        f.entries(self.cells().map(|(row, column, value)| ((row, column), value)));
        f.finish()
    }
}

impl<'s, R, C, V> IntoIterator for &'s Table<R, C, V> {
    type Item = (&'s R, &'s C, &'s V);
    type IntoIter = Cells<'s, R, C, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

impl<R, C, V> IntoIterator for Table<R, C, V>
where R: Clone, C: Clone
{
    type Item = Cell<R, C, V>;
    type IntoIter = IntoCells<R, C, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoCells::new(self.repr)
    }
}
