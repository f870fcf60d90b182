//! Longest-edge bisection driven by a priority queue.

use hashbrown::HashMap;
use tracing::{debug, info, warn};

use crate::attribute::{AttributeKind, VertexAttribute};
use crate::buffer::GrowableBuffer;
use crate::error::{RefineError, RefineResult};
use crate::mesh::AttributeMesh;
use crate::params::{InvariantPolicy, RefineParams};
use crate::queue::{RefineQueue, TriangleWork};
use crate::result::{RefinementResult, RefinementStats};

/// Refine a mesh so that no edge exceeds `max_edge_length`.
///
/// Returns the refined mesh and whether any edge was split. Uses default
/// [`RefineParams`] otherwise; see [`refine_mesh`] for full control.
///
/// # Errors
///
/// See [`refine_mesh`].
///
/// # Examples
///
/// ```
/// use mesh_refine::{refine, AttributeMesh};
///
/// let mesh = AttributeMesh::from_positions(
///     vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0],
///     vec![0, 1, 2],
/// );
///
/// let (refined, modified) = refine(&mesh, 1.0)?;
/// assert!(modified);
/// assert!(refined.triangle_count() >= 4);
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn refine(mesh: &AttributeMesh, max_edge_length: f64) -> RefineResult<(AttributeMesh, bool)> {
    let result = refine_mesh(mesh, &RefineParams::with_max_edge_length(max_edge_length))?;
    let modified = result.was_modified();
    Ok((result.mesh, modified))
}

/// Refine a mesh by repeatedly bisecting the longest edge of any triangle
/// with an edge above the threshold.
///
/// Triangles are processed longest recorded edge first. A split triangle
/// `(a, b, c)` with long edge `(a, b)` and midpoint `m` is rewritten in place
/// as `(a, m, c)` and `(m, b, c)` is appended, so winding is preserved.
/// Midpoints are shared between all triangles referencing the same edge, and
/// every attribute is averaged component-wise at the new vertex.
///
/// Refinement stops early, without error, once the index array grows past
/// [`RefineParams::max_indices`]; the result is then flagged as truncated.
/// A mesh that starts above the cap comes back unchanged, truncated and
/// not modified.
///
/// # Errors
///
/// Returns an error if:
/// - The parameters are invalid (non-positive edge length, bad tolerance)
/// - The mesh is malformed (see [`AttributeMesh::validate`])
/// - A NaN or infinite edge length is encountered
/// - A split fails to shorten its edge under [`InvariantPolicy::Strict`]
///
/// The input mesh is never modified.
///
/// # Examples
///
/// ```
/// use mesh_refine::{refine_mesh, AttributeKind, AttributeMesh, RefineParams};
///
/// let mesh = AttributeMesh::from_positions(
///     vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0],
///     vec![0, 1, 2],
/// )
/// .with_attribute(AttributeKind::TexCoord(0), 2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
///
/// let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(1.0))?;
///
/// assert!(result.was_modified());
/// assert!(result.stats.final_edge_stats.max_length <= 1.0 + 1e-6);
/// assert!(result.mesh.validate().is_ok());
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn refine_mesh(mesh: &AttributeMesh, params: &RefineParams) -> RefineResult<RefinementResult> {
    params.validate()?;
    mesh.validate()?;

    let original_edge_stats = mesh.edge_statistics();
    let mut stats = RefinementStats {
        original_triangles: mesh.triangle_count(),
        original_vertices: mesh.vertex_count(),
        original_edge_stats,
        ..RefinementStats::default()
    };

    debug!(
        "Refining mesh: {} triangles, {} vertices, {} attributes, max edge {:.4}",
        stats.original_triangles,
        stats.original_vertices,
        mesh.attributes.len(),
        params.max_edge_length
    );

    let mut refiner = Refiner::new(mesh, params);
    refiner.run()?;

    stats.splits = refiner.splits;
    stats.rejected_splits = refiner.rejected_splits;
    stats.truncated = refiner.truncated;

    let refined = if stats.splits > 0 {
        refiner.into_mesh(mesh)
    } else {
        mesh.clone()
    };

    stats.final_triangles = refined.triangle_count();
    stats.final_vertices = refined.vertex_count();
    stats.final_edge_stats = if stats.splits > 0 {
        refined.edge_statistics()
    } else {
        original_edge_stats
    };

    if stats.was_modified() {
        info!("{}", stats);
    } else {
        debug!("Mesh already within max edge length, unchanged");
    }

    Ok(RefinementResult {
        mesh: refined,
        stats,
    })
}

/// Refine a mesh in place.
///
/// The mesh is replaced only when refinement succeeds and split at least
/// one edge; on error it is left exactly as it was.
///
/// # Errors
///
/// See [`refine_mesh`].
pub fn refine_mesh_in_place(
    mesh: &mut AttributeMesh,
    params: &RefineParams,
) -> RefineResult<RefinementStats> {
    let result = refine_mesh(mesh, params)?;
    if result.was_modified() {
        *mesh = result.mesh;
    }
    Ok(result.stats)
}

/// One attribute's working copy.
struct AttributeBuffer {
    stride: usize,
    data: GrowableBuffer<f32>,
}

/// State owned by one refinement call.
struct Refiner {
    attributes: Vec<AttributeBuffer>,
    position_slot: usize,
    indices: GrowableBuffer<u32>,
    midpoints: HashMap<(u32, u32), u32>,
    queue: RefineQueue,
    squared_limit: f64,
    max_indices: usize,
    policy: InvariantPolicy,
    splits: usize,
    rejected_splits: usize,
    truncated: bool,
}

impl Refiner {
    /// Copy a validated mesh into growable buffers and enqueue every triangle.
    fn new(mesh: &AttributeMesh, params: &RefineParams) -> Self {
        let attributes: Vec<AttributeBuffer> = mesh
            .attributes
            .iter()
            .map(|a| AttributeBuffer {
                stride: a.stride,
                data: GrowableBuffer::from(a.data.as_slice()),
            })
            .collect();
        let position_slot = mesh
            .attributes
            .iter()
            .position(|a| a.kind == AttributeKind::Position)
            .unwrap_or_default();

        let triangle_count = mesh.triangle_count();
        let mut queue = RefineQueue::with_capacity(triangle_count * 2);
        for t in 0..triangle_count {
            queue.push(TriangleWork::unmeasured(t * 3));
        }

        Self {
            attributes,
            position_slot,
            indices: GrowableBuffer::from(mesh.indices.as_slice()),
            midpoints: HashMap::new(),
            queue,
            squared_limit: params.squared_limit(),
            max_indices: params.max_indices,
            policy: params.invariant_policy,
            splits: 0,
            rejected_splits: 0,
            truncated: false,
        }
    }

    fn run(&mut self) -> RefineResult<()> {
        while let Some(work) = self.queue.pop() {
            if self.indices.len() > self.max_indices {
                warn!(
                    "Index cap {} reached after {} splits, {} triangles left unexamined",
                    self.max_indices,
                    self.splits,
                    self.queue.len() + 1
                );
                self.truncated = true;
                break;
            }
            self.process(work)?;
        }
        Ok(())
    }

    /// Examine one triangle and split its longest edge if needed.
    fn process(&mut self, work: TriangleWork) -> RefineResult<()> {
        let offset = work.offset;
        let tri = [
            self.indices.at(offset),
            self.indices.at(offset + 1),
            self.indices.at(offset + 2),
        ];
        let edges = [
            self.distance_squared(tri[0], tri[1]),
            self.distance_squared(tri[1], tri[2]),
            self.distance_squared(tri[2], tri[0]),
        ];

        if edges.iter().any(|d| d.is_nan()) {
            return Err(RefineError::NanDistance { offset });
        }
        if edges.iter().any(|d| d.is_infinite()) {
            return Err(RefineError::InfiniteDistance { offset });
        }

        // Ties go to (1,2), then (2,3), then (3,1).
        let longest = if edges[0] >= edges[1] && edges[0] >= edges[2] {
            0
        } else if edges[1] >= edges[2] {
            1
        } else {
            2
        };
        if edges[longest] <= self.squared_limit {
            return Ok(());
        }

        let a = tri[longest];
        let b = tri[(longest + 1) % 3];
        let c = tri[(longest + 2) % 3];
        let bc = edges[(longest + 1) % 3];
        let ca = edges[(longest + 2) % 3];

        let Some(m) = self.midpoint(a, b, offset, edges[longest])? else {
            self.rejected_splits += 1;
            return Ok(());
        };

        self.indices.set(offset, a);
        self.indices.set(offset + 1, m);
        self.indices.set(offset + 2, c);
        let appended = self.indices.len();
        self.indices.extend_from_slice(&[m, b, c]);

        let am = self.distance_squared(a, m);
        let mb = self.distance_squared(m, b);
        let mc = self.distance_squared(m, c);

        self.queue.push(TriangleWork {
            offset,
            edges: [am, mc, ca],
        });
        self.queue.push(TriangleWork {
            offset: appended,
            edges: [mb, bc, mc],
        });
        self.splits += 1;

        Ok(())
    }

    /// Get or create the midpoint vertex of edge `(a, b)`.
    ///
    /// Returns `None` if the split was rejected under [`InvariantPolicy::Warn`].
    fn midpoint(
        &mut self,
        a: u32,
        b: u32,
        offset: usize,
        parent: f64,
    ) -> RefineResult<Option<u32>> {
        let edge = normalize_edge(a, b);
        if let Some(&m) = self.midpoints.get(&edge) {
            return Ok(Some(m));
        }

        let positions = &self.attributes[self.position_slot];
        let stride = positions.stride;
        let (pa, pb) = (a as usize * stride, b as usize * stride);
        let mut first_half = 0.0;
        let mut second_half = 0.0;
        for k in 0..stride {
            let va = positions.data.at(pa + k);
            let vb = positions.data.at(pb + k);
            let vm = f64::from(average(va, vb));
            first_half += (vm - f64::from(va)).powi(2);
            second_half += (f64::from(vb) - vm).powi(2);
        }

        let shortened = first_half > 0.0
            && second_half > 0.0
            && first_half < parent
            && second_half < parent;
        if !shortened {
            let violation = RefineError::InvariantViolation {
                offset,
                parent,
                first_half,
                second_half,
            };
            return match self.policy {
                InvariantPolicy::Strict => Err(violation),
                InvariantPolicy::Warn => {
                    warn!("Skipping split: {}", violation);
                    Ok(None)
                }
            };
        }

        let vertex_count = positions.data.len() / stride;
        let m = u32::try_from(vertex_count).map_err(|_| RefineError::TooManyVertices(vertex_count))?;

        for attribute in &mut self.attributes {
            let s = attribute.stride;
            let (ia, ib) = (a as usize * s, b as usize * s);
            for k in 0..s {
                let value = average(attribute.data.at(ia + k), attribute.data.at(ib + k));
                attribute.data.push(value);
            }
        }

        self.midpoints.insert(edge, m);
        Ok(Some(m))
    }

    fn distance_squared(&self, i1: u32, i2: u32) -> f64 {
        let positions = &self.attributes[self.position_slot];
        let stride = positions.stride;
        let (p1, p2) = (i1 as usize * stride, i2 as usize * stride);
        (0..stride)
            .map(|k| {
                let d = f64::from(positions.data.at(p1 + k)) - f64::from(positions.data.at(p2 + k));
                d * d
            })
            .sum()
    }

    /// Move the working buffers back into a mesh with the input's layout.
    fn into_mesh(self, template: &AttributeMesh) -> AttributeMesh {
        let attributes = template
            .attributes
            .iter()
            .zip(self.attributes)
            .map(|(original, working)| {
                VertexAttribute::new(
                    original.kind.clone(),
                    working.stride,
                    working.data.into_vec(),
                )
            })
            .collect();

        AttributeMesh {
            attributes,
            indices: self.indices.into_vec(),
        }
    }
}

/// Arithmetic mean of two components, computed in `f64`.
#[allow(clippy::cast_possible_truncation)]
fn average(a: f32, b: f32) -> f32 {
    ((f64::from(a) + f64::from(b)) * 0.5) as f32
}

/// Normalize edge so smaller vertex index comes first.
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_right_triangle() -> AttributeMesh {
        AttributeMesh::from_positions(
            vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0],
            vec![0, 1, 2],
        )
    }

    /// Two triangles sharing the edge (0,0,0)-(2,0,0); every other edge is √2.
    fn make_shared_edge_pair() -> AttributeMesh {
        AttributeMesh::from_positions(
            vec![
                0.0, 0.0, 0.0, //
                2.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                1.0, -1.0, 0.0,
            ],
            vec![0, 1, 2, 0, 3, 1],
        )
    }

    fn position(mesh: &AttributeMesh, v: u32) -> [f32; 3] {
        let p = mesh.positions().unwrap().element(v as usize).unwrap();
        [p[0], p[1], p[2]]
    }

    fn max_edge(mesh: &AttributeMesh) -> f64 {
        mesh.edge_statistics().max_length
    }

    #[test]
    fn test_normalize_edge() {
        assert_eq!(normalize_edge(0, 1), (0, 1));
        assert_eq!(normalize_edge(1, 0), (0, 1));
        assert_eq!(normalize_edge(5, 3), (3, 5));
    }

    #[test]
    fn test_average() {
        assert_eq!(average(0.0, 2.0), 1.0);
        assert_eq!(average(-1.0, 1.0), 0.0);
        assert_eq!(average(f32::MAX, f32::MAX), f32::MAX);
    }

    #[test]
    fn test_refine_right_triangle() {
        let mesh = make_right_triangle();
        let (refined, modified) = refine(&mesh, 1.0).unwrap();

        assert!(modified);
        assert!(refined.triangle_count() >= 4);
        assert!(max_edge(&refined) <= 1.0 + 1e-6);
        let has_midpoint = (0..refined.vertex_count() as u32)
            .any(|v| position(&refined, v) == [1.0, 0.0, 0.0]);
        assert!(has_midpoint);
        assert!(refined.validate().is_ok());
    }

    #[test]
    fn test_original_vertices_unchanged() {
        let mesh = make_right_triangle();
        let (refined, _) = refine(&mesh, 0.5).unwrap();
        let before = &mesh.positions().unwrap().data;
        let after = &refined.positions().unwrap().data;
        assert_eq!(&after[..before.len()], before.as_slice());
    }

    #[test]
    fn test_shared_edge_gets_one_midpoint() {
        let mesh = make_shared_edge_pair();
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(1.5)).unwrap();

        assert_eq!(result.stats.final_vertices, 5);
        assert_eq!(result.stats.final_triangles, 4);
        assert_eq!(result.stats.splits, 2);
        assert_eq!(position(&result.mesh, 4), [1.0, 0.0, 0.0]);

        // Every triangle touches the single new vertex
        for t in 0..result.mesh.triangle_count() {
            assert!(result.mesh.triangle(t).unwrap().contains(&4));
        }
    }

    #[test]
    fn test_split_layout_preserves_winding() {
        let mesh = make_shared_edge_pair();
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(1.5)).unwrap();
        // First triangle (0, 1, 2) splits (0, 1): (0, m, 2) in place, (m, 1, 2) appended
        assert_eq!(result.mesh.triangle(0), Some([0, 4, 2]));
        assert_eq!(result.mesh.triangle(2), Some([4, 1, 2]));
    }

    #[test]
    fn test_tie_prefers_first_edge_over_third() {
        // Edges (2,0) and (1,2) are both √10, edge (0,1) is 2
        let mesh = AttributeMesh::from_positions(
            vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 1.0, -3.0, 0.0],
            vec![2, 0, 1],
        );
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(3.0)).unwrap();

        assert_eq!(result.stats.splits, 2);
        // (2,0) is split first, then (1,2) of the in-place child
        assert_eq!(position(&result.mesh, 3), [0.5, -1.5, 0.0]);
        assert_eq!(position(&result.mesh, 4), [1.5, -1.5, 0.0]);
        assert_eq!(result.mesh.triangle(0), Some([1, 4, 3]));
        assert_eq!(result.mesh.triangle(1), Some([3, 0, 1]));
        assert_eq!(result.mesh.triangle(2), Some([4, 2, 3]));
    }

    #[test]
    fn test_tie_prefers_first_edge_over_second() {
        // Edges (0,1) and (1,2) are both √10, edge (2,0) is 2
        let mesh = AttributeMesh::from_positions(
            vec![0.0, 0.0, 0.0, 1.0, 3.0, 0.0, 2.0, 0.0, 0.0],
            vec![0, 1, 2],
        );
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(3.0)).unwrap();

        assert_eq!(result.stats.splits, 2);
        assert_eq!(position(&result.mesh, 3), [0.5, 1.5, 0.0]);
        assert_eq!(position(&result.mesh, 4), [1.5, 1.5, 0.0]);
        assert_eq!(result.mesh.triangle(0), Some([0, 3, 2]));
        assert_eq!(result.mesh.triangle(1), Some([1, 4, 3]));
        assert_eq!(result.mesh.triangle(2), Some([4, 2, 3]));
    }

    #[test]
    fn test_tie_prefers_second_edge_over_third() {
        // Same triangle rotated: (2,0) is 2, (0,1) and (1,2) are both √10
        let mesh = AttributeMesh::from_positions(
            vec![0.0, 0.0, 0.0, 1.0, 3.0, 0.0, 2.0, 0.0, 0.0],
            vec![2, 0, 1],
        );
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(3.0)).unwrap();

        assert_eq!(position(&result.mesh, 3), [0.5, 1.5, 0.0]);
        assert_eq!(result.mesh.triangle(0), Some([0, 3, 2]));
    }

    #[test]
    fn test_attributes_interpolated() {
        let mesh = make_right_triangle()
            .with_attribute(AttributeKind::TexCoord(0), 2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
            .with_attribute(
                AttributeKind::Color,
                4,
                vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0],
            );
        // Only the hypotenuse (vertices 1 and 2) exceeds 2.5
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(2.5)).unwrap();
        assert_eq!(result.stats.splits, 1);

        let refined = &result.mesh;
        assert_eq!(refined.vertex_count(), 4);
        assert_eq!(position(refined, 3), [1.0, 1.0, 0.0]);

        let uv = refined.attribute(&AttributeKind::TexCoord(0)).unwrap();
        assert_eq!(uv.element(3), Some(&[0.5, 0.5][..]));
        let color = refined.attribute(&AttributeKind::Color).unwrap();
        assert_eq!(color.element(3), Some(&[0.0, 0.5, 0.5, 1.0][..]));
        assert_eq!(uv.data.len(), 4 * 2);
        assert_eq!(color.data.len(), 4 * 4);
    }

    #[test]
    fn test_normals_averaged_linearly() {
        let mesh = make_right_triangle().with_attribute(
            AttributeKind::Normal,
            3,
            vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        );
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(2.5)).unwrap();
        let normals = result.mesh.attribute(&AttributeKind::Normal).unwrap();
        let n = normals.element(3).unwrap();
        assert_relative_eq!(n[0], 0.5);
        assert_relative_eq!(n[1], 0.5);
        assert_relative_eq!(n[2], 0.0);
    }

    #[test]
    fn test_already_fine_mesh_unchanged() {
        let mesh = make_right_triangle();
        let (refined, modified) = refine(&mesh, 3.0).unwrap();
        assert!(!modified);
        assert_eq!(refined, mesh);
    }

    #[test]
    fn test_idempotent() {
        let mesh = make_right_triangle();
        let (once, _) = refine(&mesh, 0.3).unwrap();
        let (twice, modified) = refine(&once, 0.3).unwrap();
        assert!(!modified);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_triangles_unchanged() {
        let mesh = AttributeMesh::from_positions(vec![0.0, 0.0, 0.0], Vec::new());
        let result = refine_mesh(&mesh, &RefineParams::with_max_edge_length(1.0)).unwrap();
        assert!(!result.was_modified());
        assert_eq!(result.mesh, mesh);
        assert_eq!(result.stats.final_triangles, 0);
    }

    #[test]
    fn test_rejects_non_positive_length() {
        let mesh = make_right_triangle();
        assert!(matches!(
            refine(&mesh, 0.0),
            Err(RefineError::InvalidEdgeLength(_))
        ));
        assert!(matches!(
            refine(&mesh, -2.0),
            Err(RefineError::InvalidEdgeLength(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_mesh() {
        let mut mesh = make_right_triangle();
        mesh.indices.push(0);
        assert_eq!(
            refine(&mesh, 1.0).unwrap_err(),
            RefineError::IndexCountNotMultipleOfThree(4)
        );

        let mut mesh = make_right_triangle();
        mesh.indices[2] = 3;
        assert!(matches!(
            refine(&mesh, 1.0),
            Err(RefineError::IndexOutOfBounds { index: 3, .. })
        ));
    }

    #[test]
    fn test_nan_position_fails() {
        let mesh = AttributeMesh::from_positions(
            vec![0.0, 0.0, 0.0, f32::NAN, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        assert_eq!(
            refine(&mesh, 1.0).unwrap_err(),
            RefineError::NanDistance { offset: 0 }
        );
    }

    #[test]
    fn test_infinite_position_fails() {
        let mesh = AttributeMesh::from_positions(
            vec![0.0, 0.0, 0.0, f32::INFINITY, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        assert_eq!(
            refine(&mesh, 1.0).unwrap_err(),
            RefineError::InfiniteDistance { offset: 0 }
        );
    }

    fn make_unsplittable() -> AttributeMesh {
        // Adjacent f32 values: the midpoint rounds back onto an endpoint
        let next = f32::from_bits(1.0_f32.to_bits() + 1);
        AttributeMesh::from_positions(
            vec![1.0, 0.0, 0.0, next, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_invariant_violation_strict() {
        let params = RefineParams::with_max_edge_length(1e-9);
        let err = refine_mesh(&make_unsplittable(), &params).unwrap_err();
        assert!(matches!(err, RefineError::InvariantViolation { offset: 0, .. }));
    }

    #[test]
    fn test_invariant_violation_warn() {
        let params =
            RefineParams::with_max_edge_length(1e-9).with_invariant_policy(InvariantPolicy::Warn);
        let mesh = make_unsplittable();
        let result = refine_mesh(&mesh, &params).unwrap();
        assert!(!result.was_modified());
        assert_eq!(result.stats.rejected_splits, 1);
        assert_eq!(result.mesh, mesh);
    }

    #[test]
    fn test_index_cap_truncates() {
        let params = RefineParams::with_max_edge_length(0.01).with_max_indices(30);
        let result = refine_mesh(&make_right_triangle(), &params).unwrap();

        assert!(result.was_modified());
        assert!(result.was_truncated());
        assert!(result.mesh.indices.len() > 30);
        assert!(result.mesh.indices.len() <= 33);
        assert!(result.mesh.validate().is_ok());
    }

    #[test]
    fn test_input_above_cap_returned_unchanged() {
        let mesh = make_shared_edge_pair();
        let params = RefineParams::with_max_edge_length(0.1).with_max_indices(3);
        let result = refine_mesh(&mesh, &params).unwrap();

        assert!(result.was_truncated());
        assert!(!result.was_modified());
        assert_eq!(result.stats.splits, 0);
        assert_eq!(result.mesh, mesh);
    }

    #[test]
    fn test_in_place() {
        let mut mesh = make_right_triangle();
        let stats = refine_mesh_in_place(&mut mesh, &RefineParams::with_max_edge_length(1.0)).unwrap();
        assert!(stats.was_modified());
        assert_eq!(mesh.triangle_count(), stats.final_triangles);
        assert!(max_edge(&mesh) <= 1.0 + 1e-6);
    }

    #[test]
    fn test_in_place_untouched_on_error() {
        let mut mesh = make_unsplittable();
        let before = mesh.clone();
        assert!(refine_mesh_in_place(&mut mesh, &RefineParams::with_max_edge_length(1e-9)).is_err());
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_two_component_positions() {
        let mesh = AttributeMesh::new(vec![0, 1, 2]).with_attribute(
            AttributeKind::Position,
            2,
            vec![0.0, 0.0, 4.0, 0.0, 0.0, 4.0],
        );
        let (refined, modified) = refine(&mesh, 1.0).unwrap();
        assert!(modified);
        assert_eq!(refined.position_stride(), Some(2));
        assert!(max_edge(&refined) <= 1.0 + 1e-6);
    }
}
