//! Vertex attribute kinds and flat attribute arrays.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semantic meaning of a vertex attribute.
///
/// Strides are never derived from the kind; every [`VertexAttribute`]
/// carries its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeKind {
    /// Vertex position. Drives all edge length measurements.
    Position,
    /// Surface normal.
    Normal,
    /// Surface tangent.
    Tangent,
    /// Texture coordinate set `n`.
    TexCoord(u8),
    /// Vertex color.
    Color,
    /// Per-corner barycentric coordinate, used for wireframe shading.
    Barycentric,
    /// Any other named attribute.
    Custom(String),
}

impl AttributeKind {
    /// Whether the attribute stores a direction that callers usually keep
    /// at unit length.
    #[must_use]
    pub const fn is_direction(&self) -> bool {
        matches!(self, Self::Normal | Self::Tangent)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => f.write_str("position"),
            Self::Normal => f.write_str("normal"),
            Self::Tangent => f.write_str("tangent"),
            Self::TexCoord(0) => f.write_str("uv"),
            Self::TexCoord(n) => write!(f, "uv{}", u32::from(*n) + 1),
            Self::Color => f.write_str("color"),
            Self::Barycentric => f.write_str("barycentric"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// One flat per-vertex attribute array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttribute {
    /// What the values mean.
    pub kind: AttributeKind,

    /// Scalar components per vertex (3 for positions, 2 for UVs, ...).
    pub stride: usize,

    /// `vertex_count * stride` values, vertex-major.
    pub data: Vec<f32>,
}

impl VertexAttribute {
    /// Create an attribute array.
    #[must_use]
    pub const fn new(kind: AttributeKind, stride: usize, data: Vec<f32>) -> Self {
        Self { kind, stride, data }
    }

    /// Number of whole vertices stored, or `None` for a zero stride.
    #[must_use]
    pub fn element_count(&self) -> Option<usize> {
        self.data.len().checked_div(self.stride)
    }

    /// Components of vertex `index`, if present.
    #[must_use]
    pub fn element(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.stride)?;
        self.data.get(start..start + self.stride)
    }
}
