//! Result types for refinement operations.

// Triangle/edge counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mesh::AttributeMesh;

/// Statistics about edge lengths in a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeStatistics {
    /// Minimum edge length.
    pub min_length: f64,
    /// Maximum edge length.
    pub max_length: f64,
    /// Average edge length.
    pub avg_length: f64,
    /// Standard deviation of edge lengths.
    pub std_dev: f64,
    /// Number of unique edges.
    pub edge_count: usize,
}

impl EdgeStatistics {
    /// Summarize a list of edge lengths.
    #[must_use]
    pub fn from_lengths(lengths: &[f64]) -> Self {
        if lengths.is_empty() {
            return Self::default();
        }

        let n = lengths.len() as f64;
        let min_length = lengths.iter().copied().fold(f64::INFINITY, f64::min);
        let max_length = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg_length = lengths.iter().sum::<f64>() / n;
        let variance = lengths
            .iter()
            .map(|l| (l - avg_length).powi(2))
            .sum::<f64>()
            / n;

        Self {
            min_length,
            max_length,
            avg_length,
            std_dev: variance.sqrt(),
            edge_count: lengths.len(),
        }
    }
}

/// Counters describing one refinement run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RefinementStats {
    /// Triangles in the input mesh.
    pub original_triangles: usize,

    /// Triangles in the refined mesh.
    pub final_triangles: usize,

    /// Vertices in the input mesh.
    pub original_vertices: usize,

    /// Vertices in the refined mesh.
    pub final_vertices: usize,

    /// Edge bisections performed.
    pub splits: usize,

    /// Splits skipped under [`InvariantPolicy::Warn`](crate::InvariantPolicy::Warn).
    pub rejected_splits: usize,

    /// Refinement stopped at the index cap with work still queued.
    pub truncated: bool,

    /// Edge statistics for the input mesh.
    pub original_edge_stats: EdgeStatistics,

    /// Edge statistics for the refined mesh.
    pub final_edge_stats: EdgeStatistics,
}

impl RefinementStats {
    /// Check if any edge was split.
    #[must_use]
    pub const fn was_modified(&self) -> bool {
        self.splits > 0
    }

    /// Get the triangle multiplication factor.
    #[must_use]
    pub fn triangle_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }
}

impl std::fmt::Display for RefinementStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Refinement: {} → {} triangles ({:.1}x), {} → {} vertices, {} splits, max edge {:.4} → {:.4}",
            self.original_triangles,
            self.final_triangles,
            self.triangle_ratio(),
            self.original_vertices,
            self.final_vertices,
            self.splits,
            self.original_edge_stats.max_length,
            self.final_edge_stats.max_length,
        )?;
        if self.truncated {
            f.write_str(" (truncated at index cap)")?;
        }
        Ok(())
    }
}

/// Result of mesh refinement.
#[derive(Debug, Clone)]
pub struct RefinementResult {
    /// The refined mesh.
    pub mesh: AttributeMesh,

    /// What the run did.
    pub stats: RefinementStats,
}

impl RefinementResult {
    /// Check if any edge was split.
    #[must_use]
    pub const fn was_modified(&self) -> bool {
        self.stats.was_modified()
    }

    /// Check if refinement stopped at the index cap.
    #[must_use]
    pub const fn was_truncated(&self) -> bool {
        self.stats.truncated
    }
}
