//! This crate provides immutable tables: read-only mappings from
//! (row key, column key) pairs to values, with row-indexed,
//! column-indexed, and cell-indexed views over one shared layout.
//!
//! A table is assembled through a [`Builder`] (or the stream entry
//! points on [`Table`]) and fixed at build time. From then on nothing
//! about it can change: there is no mutating method to reject at
//! runtime, reads never lock, and a table can be handed to any number
//! of threads at once.
//!
//! ## Ordering
//!
//! The iteration order of every view is decided when the table is
//! built. By default cells iterate in the order they were added, and
//! the row/column key sets follow the first occurrence of each key.
//! Installing comparators with [`Builder::order_rows_by`] and
//! [`Builder::order_columns_by`] switches the key sets to sorted order
//! and the cells to row-major order instead. Whatever order was
//! established, [`Table::cells`], [`Table::values`],
//! [`Table::row_map`], and [`Table::column_map`] all agree with it.
//!
//! ## Duplicates
//!
//! A table holds at most one value per (row, column) pair. The builder
//! accepts duplicates silently and reports them only when
//! [`Builder::build`] runs, as a [`DuplicateCellError`] naming the
//! colliding keys. When colliding values should be combined rather
//! than rejected, accumulate through the merging [`Collector`] (or
//! [`Table::from_cells_merged`]), which resolves collisions with a
//! caller-supplied merge function while preserving first-occurrence
//! order.
//!
//! ## Serialized form
//!
//! With `serde`, a table round-trips through an index-compressed form:
//! distinct row keys, distinct column keys, cell values, and two index
//! arrays tying each cell to its keys. Reloading rebuilds the exact
//! iteration order of every view.
//!
//! ```
//! use crosstab::Table;
//!
//! let table = Table::builder()
//!     .put(1, 'A', "foo")
//!     .put(1, 'B', "bar")
//!     .put(2, 'A', "baz")
//!     .build()?;
//! assert_eq!(table.get(&1, &'A'), Some(&"foo"));
//! assert_eq!(table.get(&2, &'B'), None);
//! assert_eq!(table.row_keys().collect::<Vec<_>>(), [&1, &2]);
//! # Ok::<(), crosstab::DuplicateCellError<i32, char>>(())
//! ```

// LINTS: useful
#![warn(unused_unsafe)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::allow_attributes_without_reason)]
#![warn(clippy::as_underscore)]
#![warn(clippy::branches_sharing_code)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::cognitive_complexity)]
#![warn(clippy::debug_assert_with_mut_call)]
#![warn(clippy::derive_partial_eq_without_eq)]
#![warn(clippy::enum_glob_use)]
#![warn(clippy::explicit_deref_methods)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::filter_map_next)]
#![warn(clippy::flat_map_option)]
#![warn(clippy::from_iter_instead_of_collect)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::implicit_hasher)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::manual_ok_or)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_bool)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::match_wild_err_arm)]
#![warn(clippy::mismatching_type_param_order)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::mut_mut)]
#![warn(clippy::needless_for_each)]
#![warn(clippy::option_option)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::partial_pub_fields)]
#![warn(clippy::range_minus_one)]
#![warn(clippy::range_plus_one)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::redundant_else)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::semicolon_inside_block)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::stable_sort_primitive)]
#![warn(clippy::trait_duplication_in_bounds)]
#![warn(clippy::type_repetition_in_bounds)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::uninlined_format_args)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::unused_self)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::use_self)]

// LINTS: harmless
#![warn(clippy::bool_to_int_with_if)]
#![warn(clippy::cast_lossless)]
#![warn(clippy::checked_conversions)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::default_trait_access)]
#![warn(clippy::empty_enum)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::iter_not_returning_iterator)]
#![warn(clippy::let_underscore_must_use)]
#![warn(clippy::manual_assert)]
#![warn(clippy::needless_continue)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_add)]
#![warn(clippy::used_underscore_binding)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::zero_sized_map_values)]

// LINTS: production
#![warn(clippy::todo)]
#![warn(clippy::unimplemented)]
#![warn(clippy::dbg_macro)]

pub mod error;

mod builder;
mod cell;
mod collect;
mod serde;
pub mod table;

pub use builder::Builder;
pub use cell::Cell;
pub use collect::Collector;
pub use error::DuplicateCellError;
pub use table::Table;
