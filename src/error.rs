use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by heap operations that need to obtain storage.
/// Extracting from an empty heap is not an error; it returns `None`.
#[derive(Debug, Error)]
pub enum HeapError {
    /// The backing buffer could not be grown to hold `requested` elements.
    /// The heap is unchanged when this is returned.
    #[error("failed to allocate storage for {requested} heap nodes: {source}")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError
    },
    /// The requested capacity does not fit in a `usize`.
    #[error("requested heap capacity overflows usize")]
    CapacityOverflow
}
