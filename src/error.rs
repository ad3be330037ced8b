//! Crate-wide error type.

/// Errors surfaced by the collision core.
///
/// The brute-force detection path is infallible by construction and never returns an
/// `Err`; only the quadtree path and segment ingest can fail.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A segment failed validation before a world could be built from it (outside the
    /// arena at t=0, or otherwise malformed).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The quadtree failed to allocate its node structure for the current frame. The
    /// `Pipeline` catches this and falls back to the brute-force path for that frame only.
    #[error("quadtree allocation failure: {0}")]
    AllocationFailure(String),

    /// An internal invariant (e.g. a dedup flag mismatch during candidate enumeration) was
    /// violated. In debug builds this is caught earlier by a `debug_assert!`; in release
    /// builds the `Pipeline` degrades the current frame to brute-force.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CoreError>;
