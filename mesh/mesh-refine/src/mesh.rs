//! Flat attribute mesh as handed over by a renderer.

// Vertex and edge counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeKind, VertexAttribute};
use crate::error::{RefineError, RefineResult};
use crate::result::EdgeStatistics;

/// A triangle mesh stored as flat per-vertex attribute arrays plus an
/// index buffer.
///
/// # Memory Layout
///
/// - `attributes`: one [`VertexAttribute`] per semantic, all describing the
///   same vertices. Exactly one must be [`AttributeKind::Position`].
/// - `indices`: three vertex indices per triangle.
///
/// # Example
///
/// ```
/// use mesh_refine::{AttributeKind, AttributeMesh};
///
/// let mesh = AttributeMesh::from_positions(
///     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     vec![0, 1, 2],
/// )
/// .with_attribute(AttributeKind::TexCoord(0), 2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeMesh {
    /// Per-vertex attribute arrays.
    pub attributes: Vec<VertexAttribute>,

    /// Triangle vertex indices, three per triangle.
    pub indices: Vec<u32>,
}

impl AttributeMesh {
    /// Create a mesh with indices and no attributes yet.
    #[must_use]
    pub const fn new(indices: Vec<u32>) -> Self {
        Self {
            attributes: Vec::new(),
            indices,
        }
    }

    /// Create a mesh from 3-component positions and indices.
    #[must_use]
    pub fn from_positions(positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self::new(indices).with_attribute(AttributeKind::Position, 3, positions)
    }

    /// Create a mesh from 16-bit indices, as stored by small GPU meshes.
    #[must_use]
    pub fn from_u16_indices(indices: &[u16]) -> Self {
        Self::new(indices.iter().map(|&i| u32::from(i)).collect())
    }

    /// Add an attribute array (builder form).
    #[must_use]
    pub fn with_attribute(mut self, kind: AttributeKind, stride: usize, data: Vec<f32>) -> Self {
        self.push_attribute(VertexAttribute::new(kind, stride, data));
        self
    }

    /// Add an attribute array.
    pub fn push_attribute(&mut self, attribute: VertexAttribute) {
        self.attributes.push(attribute);
    }

    /// Look up an attribute by kind.
    #[must_use]
    pub fn attribute(&self, kind: &AttributeKind) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| &a.kind == kind)
    }

    /// The position attribute, if present.
    #[must_use]
    pub fn positions(&self) -> Option<&VertexAttribute> {
        self.attribute(&AttributeKind::Position)
    }

    /// Components per position (usually 3).
    #[must_use]
    pub fn position_stride(&self) -> Option<usize> {
        self.positions().map(|p| p.stride)
    }

    /// Number of vertices, derived from the position attribute.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions()
            .and_then(VertexAttribute::element_count)
            .unwrap_or(0)
    }

    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.len() < 3
    }

    /// Vertex indices of triangle `i`.
    #[must_use]
    pub fn triangle(&self, i: usize) -> Option<[u32; 3]> {
        let start = i.checked_mul(3)?;
        match self.indices.get(start..start + 3)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Check the shape invariants the refiner relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The index count is not a multiple of 3
    /// - There is no position attribute, or an attribute kind repeats
    /// - Any stride is 0
    /// - Any attribute length is not `vertex_count * stride`
    /// - Any index is `>= vertex_count`
    pub fn validate(&self) -> RefineResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(RefineError::IndexCountNotMultipleOfThree(self.indices.len()));
        }

        let positions = self.positions().ok_or(RefineError::MissingPosition)?;
        if positions.stride == 0 {
            return Err(RefineError::ZeroStride(AttributeKind::Position));
        }
        let vertex_count = positions.data.len() / positions.stride;

        let mut seen = HashSet::with_capacity(self.attributes.len());
        for attribute in &self.attributes {
            if !seen.insert(&attribute.kind) {
                return Err(RefineError::DuplicateAttribute(attribute.kind.clone()));
            }
            if attribute.stride == 0 {
                return Err(RefineError::ZeroStride(attribute.kind.clone()));
            }
            if attribute.data.len() != vertex_count * attribute.stride {
                return Err(RefineError::AttributeLengthMismatch {
                    kind: attribute.kind.clone(),
                    len: attribute.data.len(),
                    stride: attribute.stride,
                    vertex_count,
                });
            }
        }

        if let Some((offset, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(RefineError::IndexOutOfBounds {
                offset,
                index,
                vertex_count,
            });
        }

        Ok(())
    }

    /// Rescale every element of an attribute to unit length.
    ///
    /// Refinement averages normals and tangents linearly, which shortens
    /// them; call this afterwards if the shader expects unit vectors.
    /// Zero-length elements are left untouched. Returns `false` if the
    /// attribute is absent.
    pub fn normalize_attribute(&mut self, kind: &AttributeKind) -> bool {
        let Some(attribute) = self.attributes.iter_mut().find(|a| &a.kind == kind) else {
            return false;
        };
        if attribute.stride == 0 {
            return true;
        }
        for element in attribute.data.chunks_exact_mut(attribute.stride) {
            let len = element
                .iter()
                .map(|&c| f64::from(c) * f64::from(c))
                .sum::<f64>()
                .sqrt();
            if len > 0.0 && len.is_finite() {
                for c in element.iter_mut() {
                    *c = (f64::from(*c) / len) as f32;
                }
            }
        }
        true
    }

    /// Rescale every direction attribute (normals, tangents) to unit length.
    ///
    /// Returns how many attributes were normalized.
    pub fn normalize_directions(&mut self) -> usize {
        let kinds: Vec<AttributeKind> = self
            .attributes
            .iter()
            .filter(|a| a.kind.is_direction())
            .map(|a| a.kind.clone())
            .collect();
        for kind in &kinds {
            self.normalize_attribute(kind);
        }
        kinds.len()
    }

    /// Length statistics over the unique edges of the mesh.
    ///
    /// Edges referencing missing vertices are skipped.
    #[must_use]
    pub fn edge_statistics(&self) -> EdgeStatistics {
        let Some(positions) = self.positions() else {
            return EdgeStatistics::default();
        };

        let mut lengths = Vec::with_capacity(self.indices.len());
        let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(self.indices.len());

        for tri in self.indices.chunks_exact(3) {
            for i in 0..3 {
                let (v0, v1) = (tri[i], tri[(i + 1) % 3]);
                let edge = if v0 <= v1 { (v0, v1) } else { (v1, v0) };
                if !seen.insert(edge) {
                    continue;
                }
                let (Some(p0), Some(p1)) =
                    (positions.element(v0 as usize), positions.element(v1 as usize))
                else {
                    continue;
                };
                let length = p0
                    .iter()
                    .zip(p1)
                    .map(|(&a, &b)| (f64::from(a) - f64::from(b)).powi(2))
                    .sum::<f64>()
                    .sqrt();
                lengths.push(length);
            }
        }

        EdgeStatistics::from_lengths(&lengths)
    }
}
