//! Error types for metric computation and attack runs.
//!
//! Budget anomalies (non-positive or oversized budgets) are never errors —
//! the engine clamps them silently, mirroring the leniency callers rely on.
//! Everything that *is* an error is fatal to the attack run that raised it:
//! the run returns no partial trace.

use thiserror::Error;

/// Errors surfaced by metrics and the dismantling engine.
#[derive(Debug, Error)]
pub enum FrayError {
    /// Eigenvector centrality power iteration did not converge within the
    /// iteration limit. Typical on disconnected or pathological graphs;
    /// choose a different centrality measure for such inputs.
    #[error("eigenvector centrality failed to converge after {iterations} iterations")]
    NonConvergence {
        /// Number of iterations performed before giving up.
        iterations: usize,
    },

    /// A node or edge scheduled for removal was not present in the working
    /// copy. The engine's own bookkeeping should make this impossible; if it
    /// surfaces, an internal invariant has been violated.
    #[error("element not present in the network: {0}")]
    MissingElement(String),

    /// The cooperative cancellation flag was raised between attack steps.
    #[error("attack run cancelled")]
    Cancelled,

    /// Aggregation was asked to average trials of unequal length.
    #[error("trace series length mismatch: expected {expected}, got {got}")]
    TraceLengthMismatch {
        /// Length of the first trial series.
        expected: usize,
        /// Length of the offending trial series.
        got: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrayError>;
