/// Errors returned by fallible [`crate::PagingController`] operations.
///
/// Reaching a boundary of an infinite source or reloading to an empty item set are regular
/// outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PagingError {
    /// A finite data source was addressed outside `[0, count)`.
    #[error("index {index} is out of bounds (count={count})")]
    IndexOutOfBounds { index: usize, count: usize },
    /// The requested item identity does not exist in the finite data source.
    #[error("item not found in the data source")]
    ItemNotFound,
    /// Selection by index needs a data source with a known count.
    #[error("selecting by index requires a finite data source")]
    IndexedSelectionUnsupported,
}
