use thiserror::Error;

/// Two cells were assigned to the same (row key, column key) pair.
///
/// Raised by [`Builder::build`](crate::Builder::build) and
/// [`Table::try_from_cells`](crate::Table::try_from_cells); the colliding
/// keys are carried in the error. The builder that produced it is left
/// untouched, but the duplicate cells cannot be taken back out of it:
/// retrying requires a fresh builder, or the merging
/// [`Collector`](crate::Collector) when colliding values should be
/// combined instead of rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Duplicate cell for row key {row:?} and column key {column:?}")]
pub struct DuplicateCellError<R, C> {
    pub row: R,
    pub column: C,
}

#[cfg(test)]
mod test {

    use super::DuplicateCellError;

    #[test]
    fn test_display_names_both_keys() {
        let error = DuplicateCellError { row: 3, column: "price" };
        let message = error.to_string();
        assert!(message.contains('3'), "{message}");
        assert!(message.contains("price"), "{message}");
    }
}
