//! Refinement parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RefineError, RefineResult};

/// Default cap on the index array length. Refinement stops once exceeded.
pub const DEFAULT_MAX_INDICES: usize = 9_000_000;

/// Default relative slack on the edge length threshold.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// What to do when bisecting an edge fails to shorten it.
///
/// This happens when the edge endpoints are so close in `f32` that the
/// midpoint rounds onto one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvariantPolicy {
    /// Abort with [`RefineError::InvariantViolation`].
    #[default]
    Strict,

    /// Log a warning and leave the triangle unsplit.
    Warn,
}

/// Parameters for adaptive edge refinement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefineParams {
    /// Edges longer than this are bisected.
    pub max_edge_length: f64,

    /// Relative slack: an edge is split only if longer than
    /// `max_edge_length * (1 + tolerance)`.
    pub tolerance: f64,

    /// Stop refining once the index array holds more indices than this.
    ///
    /// The check runs before every triangle is examined, including the
    /// first. An input that already exceeds the cap is returned unsplit with
    /// `truncated` set and `was_modified()` false.
    pub max_indices: usize,

    /// Handling of splits that do not shorten the edge.
    pub invariant_policy: InvariantPolicy,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            max_edge_length: 1.0,
            tolerance: DEFAULT_TOLERANCE,
            max_indices: DEFAULT_MAX_INDICES,
            invariant_policy: InvariantPolicy::Strict,
        }
    }
}

impl RefineParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for a given maximum edge length.
    #[must_use]
    pub fn with_max_edge_length(max_edge_length: f64) -> Self {
        Self {
            max_edge_length,
            ..Self::default()
        }
    }

    /// Set the relative tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the index cap.
    #[must_use]
    pub const fn with_max_indices(mut self, max_indices: usize) -> Self {
        self.max_indices = max_indices;
        self
    }

    /// Set the invariant policy.
    #[must_use]
    pub const fn with_invariant_policy(mut self, policy: InvariantPolicy) -> Self {
        self.invariant_policy = policy;
        self
    }

    /// Check that the parameters can drive a refinement.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge length is not finite and positive, the
    /// tolerance is negative or not finite, or the index cap is below one
    /// triangle.
    pub fn validate(&self) -> RefineResult<()> {
        if !self.max_edge_length.is_finite() || self.max_edge_length <= 0.0 {
            return Err(RefineError::InvalidEdgeLength(self.max_edge_length));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(RefineError::InvalidTolerance(self.tolerance));
        }
        if self.max_indices < 3 {
            return Err(RefineError::InvalidIndexCap(self.max_indices));
        }
        Ok(())
    }

    /// Squared split threshold, tolerance included.
    #[must_use]
    pub fn squared_limit(&self) -> f64 {
        let limit = self.max_edge_length * (1.0 + self.tolerance);
        limit * limit
    }
}
