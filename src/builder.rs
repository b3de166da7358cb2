//! Accumulation of cells ahead of table construction.

use std::cmp::Ordering;

use crate::{
    cell::Cell,
    error::DuplicateCellError,
    table::Table,
};

/// A key ordering installed on a [`Builder`].
pub(crate) type Comparator<K> = dyn Fn(&K, &K) -> Ordering + Send + Sync;

/// Accumulates cells for [`Table::builder`](crate::Table::builder).
///
/// Cells are kept in the order they were added; duplicate (row, column)
/// pairs are allowed here and only rejected by [`build`](Self::build).
/// By default the add order determines the iteration order of every view
/// of the built table. Installing [`order_rows_by`](Self::order_rows_by)
/// or [`order_columns_by`](Self::order_columns_by) sorts the key sets by
/// the given comparators instead, and reorders the cells to match.
///
/// A builder stays usable after `build`: more cells can be added and
/// `build` called again, each table being a superset of the previous one.
pub struct Builder<R, C, V> {
    cells: Vec<Cell<R, C, V>>,
    row_order: Option<Box<Comparator<R>>>,
    column_order: Option<Box<Comparator<C>>>,
}

impl<R, C, V> Builder<R, C, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            row_order: None,
            column_order: None,
        }
    }

    /// Number of cells added so far, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sorts the built table's row keys by `order`.
    ///
    /// Takes effect at the next [`build`](Self::build) call.
    pub fn order_rows_by<F>(&mut self, order: F) -> &mut Self
    where F: Fn(&R, &R) -> Ordering + Send + Sync + 'static
    {
        self.row_order = Some(Box::new(order));
        self
    }

    /// Sorts the built table's column keys by `order`.
    ///
    /// Takes effect at the next [`build`](Self::build) call.
    pub fn order_columns_by<F>(&mut self, order: F) -> &mut Self
    where F: Fn(&C, &C) -> Ordering + Send + Sync + 'static
    {
        self.column_order = Some(Box::new(order));
        self
    }

    /// Appends one cell. No duplicate check happens here.
    pub fn put(&mut self, row: R, column: C, value: V) -> &mut Self {
        self.put_cell(Cell::new(row, column, value))
    }

    /// Appends a pre-built cell, reusing it as-is.
    pub fn put_cell(&mut self, cell: Cell<R, C, V>) -> &mut Self {
        self.cells.push(cell);
        self
    }

    /// Appends every cell of `table`, in that table's cell iteration order.
    pub fn put_all(&mut self, table: &Table<R, C, V>) -> &mut Self
    where R: Clone, C: Clone, V: Clone
    {
        for (row, column, value) in table.cells() {
            self.put(row.clone(), column.clone(), value.clone());
        }
        self
    }

    /// Appends the other builder's cells after this builder's own.
    ///
    /// The other builder's comparators, if any, are discarded.
    pub fn combine(&mut self, other: Self) -> &mut Self {
        self.cells.extend(other.cells);
        self
    }

    /// Builds an immutable table from the cells added so far.
    ///
    /// The builder is not consumed; the snapshot is cloned out of it.
    /// Fails with [`DuplicateCellError`] if any two cells share a
    /// (row, column) pair, leaving the builder untouched.
    pub fn build(&self) -> Result<Table<R, C, V>, DuplicateCellError<R, C>>
    where
        R: Clone + Eq + std::hash::Hash,
        C: Clone + Eq + std::hash::Hash,
        V: Clone,
    {
        Table::from_cell_list(
            self.cells.clone(),
            self.row_order.as_deref(),
            self.column_order.as_deref(),
        )
    }
}

impl<R, C, V> Default for Builder<R, C, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, C, V> Extend<Cell<R, C, V>> for Builder<R, C, V> {
    fn extend<I>(&mut self, iter: I)
    where I: IntoIterator<Item = Cell<R, C, V>>
    {
        self.cells.extend(iter);
    }
}

impl<R, C, V> Extend<(R, C, V)> for Builder<R, C, V> {
    fn extend<I>(&mut self, iter: I)
    where I: IntoIterator<Item = (R, C, V)>
    {
        self.cells.extend(iter.into_iter().map(Cell::from));
    }
}

impl<R, C, V, T> FromIterator<T> for Builder<R, C, V>
where
    T: Into<Cell<R, C, V>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.cells.extend(iter.into_iter().map(Into::into));
        this
    }
}

impl<R, C, V> std::fmt::Debug for Builder<R, C, V>
where R: std::fmt::Debug, C: std::fmt::Debug, V: std::fmt::Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("cells", &self.cells)
            .field("row_order", &self.row_order.as_ref().map(|_| ".."))
            .field("column_order", &self.column_order.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod test {

    use crate::Table;

    use super::Builder;

    #[test]
    fn test_put_order_is_view_order() {
        let table = Table::builder()
            .put(1, 'A', "foo")
            .put(1, 'B', "bar")
            .put(2, 'A', "baz")
            .build().unwrap();
        assert_eq!(table.row_keys().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(table.column_keys().copied().collect::<Vec<_>>(), ['A', 'B']);
        assert_eq!(table.get(&1, &'A'), Some(&"foo"));
        assert_eq!(table.get(&2, &'B'), None);
    }

    #[test]
    fn test_build_is_repeatable_and_snapshots() {
        let mut builder = Builder::new();
        builder.put("r1", "c1", 1);
        let first = builder.build().unwrap();
        builder.put("r2", "c1", 2);
        let second = builder.build().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        for (row, column, value) in first.cells() {
            assert_eq!(second.get(row, column), Some(value));
        }
    }

    #[test]
    fn test_duplicate_pair_fails_at_build() {
        let mut builder = Builder::new();
        builder.put(1, 1, "a").put(2, 2, "b").put(1, 1, "c");
        let error = builder.build().unwrap_err();
        assert_eq!((error.row, error.column), (1, 1));
        // The builder survives a failed build.
        assert_eq!(builder.len(), 3);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_duplicate_needs_both_keys_equal() {
        let table = Builder::new()
            .put(1, 'A', "a")
            .put(1, 'B', "b")
            .put(2, 'A', "c")
            .build().unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_comparators_sort_keys_row_major() {
        let mut builder = Builder::new();
        builder
            .put(2, 'B', 22)
            .put(1, 'B', 12)
            .put(2, 'A', 21)
            .put(1, 'A', 11);
        builder.order_rows_by(i32::cmp);
        builder.order_columns_by(char::cmp);
        let table = builder.build().unwrap();
        assert_eq!(table.row_keys().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(table.column_keys().copied().collect::<Vec<_>>(), ['A', 'B']);
        let cells: Vec<_> = table.cells()
            .map(|(r, c, v)| (*r, *c, *v))
            .collect();
        assert_eq!(cells, [
            (1, 'A', 11), (1, 'B', 12),
            (2, 'A', 21), (2, 'B', 22),
        ]);
    }

    #[test]
    fn test_row_comparator_alone_keeps_column_insertion_order() {
        let mut builder = Builder::new();
        builder
            .put(2, 'Z', 1)
            .put(1, 'M', 2)
            .put(1, 'A', 3);
        builder.order_rows_by(i32::cmp);
        let table = builder.build().unwrap();
        let cells: Vec<_> = table.cells().map(|(r, c, v)| (*r, *c, *v)).collect();
        // Rows sorted; columns within a row keep their put order, and the
        // column key set follows first occurrence over the sorted cells.
        assert_eq!(cells, [(1, 'M', 2), (1, 'A', 3), (2, 'Z', 1)]);
        assert_eq!(table.column_keys().copied().collect::<Vec<_>>(), ['M', 'A', 'Z']);
    }

    #[test]
    fn test_combine_appends_after_own_cells() {
        let mut left = Builder::new();
        left.put(1, 1, "l");
        let mut right = Builder::new();
        right.put(2, 2, "r");
        left.combine(right);
        let table = left.build().unwrap();
        let cells: Vec<_> = table.cells().map(|(r, c, v)| (*r, *c, *v)).collect();
        assert_eq!(cells, [(1, 1, "l"), (2, 2, "r")]);
    }

    #[test]
    fn test_put_all_preserves_source_order() {
        let source = Table::builder()
            .put('b', 1, "x")
            .put('a', 2, "y")
            .build().unwrap();
        let copy = Builder::new().put_all(&source).build().unwrap();
        let from_source: Vec<_> = source.cells().map(|(r, c, v)| (*r, *c, *v)).collect();
        let from_copy: Vec<_> = copy.cells().map(|(r, c, v)| (*r, *c, *v)).collect();
        assert_eq!(from_source, from_copy);
    }

    #[test]
    fn test_collected_from_tuples() {
        let builder: Builder<_, _, _> = [(1, 'A', "x"), (2, 'B', "y")]
            .into_iter()
            .collect();
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.build().unwrap().len(), 2);
    }
}
