//! Error types for mesh refinement operations.

use thiserror::Error;

use crate::attribute::AttributeKind;

/// Errors that can occur during refinement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefineError {
    /// Maximum edge length is zero, negative or not finite.
    #[error("Invalid max edge length: {0} (must be finite and > 0)")]
    InvalidEdgeLength(f64),

    /// Comparison tolerance is negative or not finite.
    #[error("Invalid tolerance: {0} (must be finite and >= 0)")]
    InvalidTolerance(f64),

    /// Index cap of zero.
    #[error("Invalid index cap: {0} (must be >= 3)")]
    InvalidIndexCap(usize),

    /// Index array does not group into triangles.
    #[error("Index count {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),

    /// Mesh has no position attribute.
    #[error("Mesh has no position attribute")]
    MissingPosition,

    /// The same attribute kind was supplied twice.
    #[error("Duplicate vertex attribute: {0}")]
    DuplicateAttribute(AttributeKind),

    /// Attribute declared with zero components per vertex.
    #[error("Attribute {0} has stride 0")]
    ZeroStride(AttributeKind),

    /// Attribute array length disagrees with the vertex count.
    #[error(
        "Attribute {kind} has {len} values, expected {vertex_count} vertices * stride {stride}"
    )]
    AttributeLengthMismatch {
        /// Offending attribute.
        kind: AttributeKind,
        /// Actual number of scalar values.
        len: usize,
        /// Declared stride.
        stride: usize,
        /// Vertex count derived from positions.
        vertex_count: usize,
    },

    /// An index references a vertex that does not exist.
    #[error("Index {index} at offset {offset} is out of bounds ({vertex_count} vertices)")]
    IndexOutOfBounds {
        /// Offset into the index array.
        offset: usize,
        /// The referenced vertex.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Refinement would create a vertex index that does not fit in `u32`.
    #[error("Vertex count {0} exceeds the u32 index range")]
    TooManyVertices(usize),

    /// Resize request beyond the buffer's allocated capacity.
    #[error("Cannot resize buffer to {requested} elements (capacity {capacity})")]
    BufferOverrun {
        /// Requested logical length.
        requested: usize,
        /// Allocated capacity.
        capacity: usize,
    },

    /// A NaN edge length was computed.
    #[error("NaN edge length in triangle at index offset {offset}")]
    NanDistance {
        /// Offset of the triangle in the index array.
        offset: usize,
    },

    /// An infinite edge length was computed.
    #[error("Infinite edge length in triangle at index offset {offset}")]
    InfiniteDistance {
        /// Offset of the triangle in the index array.
        offset: usize,
    },

    /// Bisecting an edge did not produce two strictly shorter halves.
    #[error(
        "Split of triangle at offset {offset} did not shorten edge: \
         parent {parent}, halves {first_half} and {second_half} (squared)"
    )]
    InvariantViolation {
        /// Offset of the triangle in the index array.
        offset: usize,
        /// Squared length of the edge being split.
        parent: f64,
        /// Squared length of the first half.
        first_half: f64,
        /// Squared length of the second half.
        second_half: f64,
    },
}

/// Result type for refinement operations.
pub type RefineResult<T> = std::result::Result<T, RefineError>;
