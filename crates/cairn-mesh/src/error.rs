//! Mesh error types.

/// Errors raised while editing a synthesized mesh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// The triangle offset has no attribution entry.
    #[error("no block is attributed to triangle offset {offset}")]
    NotFound {
        /// The offset that was looked up.
        offset: usize,
    },

    /// Buffers and attribution tables disagree, or a block's geometry is not
    /// a single contiguous run.
    #[error("mesh invariant violated: {0}")]
    InvariantViolation(String),
}
