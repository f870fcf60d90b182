//! Adaptive triangle refinement for vertex-displaced meshes.
//!
//! Shaders that displace vertices (relativistic aberration, heavy warps)
//! only move vertices, never the straight edges between them. Long edges
//! then show up as faceting and tearing. This crate bisects every edge
//! longer than a threshold until none remain:
//!
//! - **Longest-edge bisection**: each oversized triangle is split across its
//!   longest edge, longest triangles first, until all edges fit
//! - **Watertight**: triangles sharing an edge share its midpoint vertex
//! - **Attribute-agnostic**: every vertex attribute is interpolated with
//!   its declared stride
//! - **Bounded**: refinement stops at an index-count cap (9M by default)
//!
//! Meshes are exchanged as flat arrays so they round-trip cleanly through
//! a renderer's vertex and index buffers.
//!
//! # Examples
//!
//! Refine positions only:
//!
//! ```
//! use mesh_refine::{refine, AttributeMesh};
//!
//! let mesh = AttributeMesh::from_positions(
//!     vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0],
//!     vec![0, 1, 2],
//! );
//!
//! let (refined, modified) = refine(&mesh, 1.0)?;
//!
//! assert!(modified);
//! assert!(refined.edge_statistics().max_length <= 1.0 + 1e-6);
//! # Ok::<(), mesh_refine::RefineError>(())
//! ```
//!
//! Refine a mesh with normals and UVs, then restore unit normals:
//!
//! ```
//! use mesh_refine::{refine_mesh_in_place, AttributeKind, AttributeMesh, RefineParams};
//!
//! let mut mesh = AttributeMesh::from_positions(
//!     vec![0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0, 0.0],
//!     vec![0, 1, 2],
//! )
//! .with_attribute(AttributeKind::Normal, 3, vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
//! .with_attribute(AttributeKind::TexCoord(0), 2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
//!
//! let params = RefineParams::with_max_edge_length(1.0).with_max_indices(1_000_000);
//! let stats = refine_mesh_in_place(&mut mesh, &params)?;
//! assert_eq!(mesh.normalize_directions(), 1);
//!
//! assert!(stats.was_modified());
//! assert!(!stats.truncated);
//! assert!(mesh.validate().is_ok());
//! # Ok::<(), mesh_refine::RefineError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod attribute;
mod buffer;
mod error;
mod mesh;
mod params;
mod queue;
mod refine;
mod result;
mod wireframe;

pub use attribute::{AttributeKind, VertexAttribute};
pub use buffer::GrowableBuffer;
pub use error::{RefineError, RefineResult};
pub use mesh::AttributeMesh;
pub use params::{InvariantPolicy, RefineParams, DEFAULT_MAX_INDICES, DEFAULT_TOLERANCE};
pub use queue::{RefineQueue, TriangleWork};
pub use refine::{refine, refine_mesh, refine_mesh_in_place};
pub use result::{EdgeStatistics, RefinementResult, RefinementStats};
pub use wireframe::unweld_with_barycentrics;
