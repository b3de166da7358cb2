//! The serialized form of a table.
//!
//! A table serializes as five parallel component arrays: the distinct
//! row keys (row key set order), the distinct column keys (column key
//! set order), the cell values (cell iteration order), and per cell the
//! index of its row key and of its column key in those arrays. Loading
//! dispatches on the value count (zero cells rebuild the empty table,
//! one the single-cell layout, more the general layout) without ever
//! re-sorting, so every view of the reloaded table iterates exactly like
//! the original. The component order is trusted; the components
//! themselves are validated, and a malformed stream surfaces as the
//! format's own error.

use serde::{
    Deserialize, Deserializer, de,
    Serialize, Serializer, ser::SerializeStruct,
};

use std::hash::Hash;

use crate::table::{General, Repr, Table};

impl<R, C, V> Serialize for Table<R, C, V>
where R: Serialize, C: Serialize, V: Serialize
{
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {
        let row_keys: Vec<&R> = self.row_keys().collect();
        let column_keys: Vec<&C> = self.column_keys().collect();
        let values: Vec<&V> = self.values().collect();
        let (cell_rows, cell_cols): (Vec<u32>, Vec<u32>) = match &self.repr {
            Repr::Empty => (Vec::new(), Vec::new()),
            Repr::Singleton(_) => (vec![0], vec![0]),
            Repr::General(general) => (
                general.cell_rows().to_vec(),
                general.cell_cols().to_vec(),
            ),
        };
        let mut form = ser.serialize_struct("Table", 5)?;
        form.serialize_field("row_keys", &row_keys)?;
        form.serialize_field("column_keys", &column_keys)?;
        form.serialize_field("values", &values)?;
        form.serialize_field("cell_rows", &cell_rows)?;
        form.serialize_field("cell_cols", &cell_cols)?;
        form.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "Table", deny_unknown_fields)]
struct Components<R, C, V> {
    row_keys: Vec<R>,
    column_keys: Vec<C>,
    values: Vec<V>,
    cell_rows: Vec<u32>,
    cell_cols: Vec<u32>,
}

impl<'de, R, C, V> Deserialize<'de> for Table<R, C, V>
where
    R: Deserialize<'de> + Eq + Hash,
    C: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {
        let components = Components::deserialize(de)?;
        Self::from_components(components).map_err(de::Error::custom)
    }
}

impl<R, C, V> Table<R, C, V>
where R: Eq + Hash, C: Eq + Hash
{
    fn from_components(components: Components<R, C, V>) -> Result<Self, &'static str> {
        let Components { row_keys, column_keys, mut values, cell_rows, cell_cols } =
            components;
        match values.len() {
            0 => {
                if !row_keys.is_empty() || !column_keys.is_empty()
                    || !cell_rows.is_empty() || !cell_cols.is_empty()
                {
                    return Err("an empty table should have empty components");
                }
                Ok(Self::new())
            },
            1 => {
                let Ok([row]) = <[R; 1]>::try_from(row_keys) else {
                    return Err("a single-cell table should have one row key");
                };
                let Ok([column]) = <[C; 1]>::try_from(column_keys) else {
                    return Err("a single-cell table should have one column key");
                };
                if cell_rows != [0] || cell_cols != [0] {
                    return Err("a single-cell table should index its only keys");
                }
                let value = values.pop().expect("one value is present");
                Ok(Self::singleton(row, column, value))
            },
            _ => {
                let general = General::from_components(
                    row_keys, column_keys, values, cell_rows, cell_cols,
                )?;
                Ok(Self { repr: Repr::General(general) })
            },
        }
    }
}
