//! Un-welded meshes with barycentric corners for wireframe shading.

// Index counts are bounded by the u32 index range of the input
#![allow(clippy::cast_possible_truncation)]

use tracing::debug;

use crate::attribute::{AttributeKind, VertexAttribute};
use crate::error::{RefineError, RefineResult};
use crate::mesh::AttributeMesh;

/// Barycentric coordinate of each triangle corner.
const CORNERS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Expand a mesh so every triangle corner owns its vertex, and tag each
/// corner with its barycentric coordinate.
///
/// A fragment shader can then draw edges wherever any barycentric
/// component approaches zero. All existing attributes are copied per
/// corner; a [`AttributeKind::Barycentric`] attribute with stride 3 is
/// appended and the indices become `0..n`.
///
/// Run this after [`refine_mesh`](crate::refine_mesh) to visualize the
/// refined triangulation.
///
/// # Errors
///
/// Returns an error if the mesh fails [`AttributeMesh::validate`], already
/// carries barycentric coordinates, or has more corners than `u32` can index.
///
/// # Examples
///
/// ```
/// use mesh_refine::{unweld_with_barycentrics, AttributeKind, AttributeMesh};
///
/// let quad = AttributeMesh::from_positions(
///     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
///     vec![0, 1, 2, 0, 2, 3],
/// );
///
/// let wire = unweld_with_barycentrics(&quad)?;
/// assert_eq!(wire.vertex_count(), 6);
/// assert!(wire.attribute(&AttributeKind::Barycentric).is_some());
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn unweld_with_barycentrics(mesh: &AttributeMesh) -> RefineResult<AttributeMesh> {
    mesh.validate()?;
    if mesh.attribute(&AttributeKind::Barycentric).is_some() {
        return Err(RefineError::DuplicateAttribute(AttributeKind::Barycentric));
    }

    let corner_count = mesh.indices.len();
    if u32::try_from(corner_count).is_err() {
        return Err(RefineError::TooManyVertices(corner_count));
    }

    let mut attributes: Vec<VertexAttribute> = mesh
        .attributes
        .iter()
        .map(|source| {
            let mut data = Vec::with_capacity(corner_count * source.stride);
            for &index in &mesh.indices {
                let start = index as usize * source.stride;
                data.extend_from_slice(&source.data[start..start + source.stride]);
            }
            VertexAttribute::new(source.kind.clone(), source.stride, data)
        })
        .collect();

    let barycentric: Vec<f32> = CORNERS
        .iter()
        .cycle()
        .take(corner_count)
        .flatten()
        .copied()
        .collect();
    attributes.push(VertexAttribute::new(AttributeKind::Barycentric, 3, barycentric));

    debug!(
        "Unwelded {} vertices into {} corners",
        mesh.vertex_count(),
        corner_count
    );

    Ok(AttributeMesh {
        attributes,
        indices: (0..corner_count as u32).collect(),
    })
}
