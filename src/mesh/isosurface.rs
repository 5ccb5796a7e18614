//! Zero-level isosurface triangulation of a 3D scalar field.
//!
//! Each voxel cell is split into six tetrahedra sharing the main
//! diagonal; a tetrahedron contributes one or two triangles where the
//! field changes sign, with vertices placed on the sign-changing edges
//! by linear interpolation.

use super::BoundingBox;

/// A scalar field sampled over 3D space.
pub trait ScalarField3 {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Triangle mesh as a flat vertex list and triangle index list.
///
/// Vertices are not deduplicated across triangles; the OBJ output is a
/// visualization artifact, not a watertight solid.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when no triangles were produced.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    fn push_triangle(&mut self, points: [[f64; 3]; 3]) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&points);
        self.triangles.push([base, base + 1, base + 2]);
    }
}

/// Voxel corner offsets, counter-clockwise bottom then top.
const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Six tetrahedra per voxel, all sharing the 0-6 diagonal.
const TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 5, 1, 6],
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
];

/// Extract the zero-level set of `field` over `bounds` at the given
/// per-axis voxel steps.
///
/// Any zero step count yields an empty mesh.
pub fn extract_isosurface<F: ScalarField3>(
    field: &F,
    bounds: &BoundingBox,
    steps: [usize; 3],
) -> TriangleMesh {
    let [sx, sy, sz] = steps;
    let mut mesh = TriangleMesh::default();
    if sx == 0 || sy == 0 || sz == 0 {
        return mesh;
    }

    let xs = lattice(bounds.min()[0], bounds.max()[0], sx);
    let ys = lattice(bounds.min()[1], bounds.max()[1], sy);
    let zs = lattice(bounds.min()[2], bounds.max()[2], sz);

    // Sample the whole lattice once; cells then only index into it.
    let nyz = (sy + 1) * (sz + 1);
    let idx = |i: usize, j: usize, k: usize| i * nyz + j * (sz + 1) + k;
    let mut values = vec![0.0; (sx + 1) * nyz];
    for (i, &x) in xs.iter().enumerate() {
        for (j, &y) in ys.iter().enumerate() {
            for (k, &z) in zs.iter().enumerate() {
                values[idx(i, j, k)] = field.sample(x, y, z);
            }
        }
    }

    for i in 0..sx {
        for j in 0..sy {
            for k in 0..sz {
                let mut corner_pos = [[0.0; 3]; 8];
                let mut corner_val = [0.0; 8];
                for (c, offset) in CORNERS.iter().enumerate() {
                    let (ci, cj, ck) = (i + offset[0], j + offset[1], k + offset[2]);
                    corner_pos[c] = [xs[ci], ys[cj], zs[ck]];
                    corner_val[c] = values[idx(ci, cj, ck)];
                }
                for tet in &TETRAHEDRA {
                    polygonize_tetrahedron(
                        [
                            corner_pos[tet[0]],
                            corner_pos[tet[1]],
                            corner_pos[tet[2]],
                            corner_pos[tet[3]],
                        ],
                        [
                            corner_val[tet[0]],
                            corner_val[tet[1]],
                            corner_val[tet[2]],
                            corner_val[tet[3]],
                        ],
                        &mut mesh,
                    );
                }
            }
        }
    }

    mesh
}

fn lattice(min: f64, max: f64, steps: usize) -> Vec<f64> {
    (0..=steps)
        .map(|i| min + (max - min) * i as f64 / steps as f64)
        .collect()
}

/// Emit the surface crossing one tetrahedron, if any. Corners with
/// value >= 0 count as below the surface.
fn polygonize_tetrahedron(points: [[f64; 3]; 4], values: [f64; 4], mesh: &mut TriangleMesh) {
    let mut inside = [0usize; 4];
    let mut outside = [0usize; 4];
    let mut n_in = 0;
    let mut n_out = 0;
    for c in 0..4 {
        if values[c] >= 0.0 {
            inside[n_in] = c;
            n_in += 1;
        } else {
            outside[n_out] = c;
            n_out += 1;
        }
    }

    let cross = |a: usize, b: usize| edge_crossing(points[a], values[a], points[b], values[b]);

    match n_in {
        1 => {
            let a = inside[0];
            mesh.push_triangle([
                cross(a, outside[0]),
                cross(a, outside[1]),
                cross(a, outside[2]),
            ]);
        }
        3 => {
            let a = outside[0];
            mesh.push_triangle([
                cross(inside[0], a),
                cross(inside[1], a),
                cross(inside[2], a),
            ]);
        }
        2 => {
            let q0 = cross(inside[0], outside[0]);
            let q1 = cross(inside[0], outside[1]);
            let q2 = cross(inside[1], outside[1]);
            let q3 = cross(inside[1], outside[0]);
            mesh.push_triangle([q0, q1, q2]);
            mesh.push_triangle([q0, q2, q3]);
        }
        _ => {}
    }
}

/// Linear interpolation to the zero crossing on an edge with opposite
/// signs at its endpoints.
fn edge_crossing(pa: [f64; 3], va: f64, pb: [f64; 3], vb: f64) -> [f64; 3] {
    let t = va / (va - vb);
    [
        pa[0] + t * (pb[0] - pa[0]),
        pa[1] + t * (pb[1] - pa[1]),
        pa[2] + t * (pb[2] - pa[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sphere {
        radius: f64,
    }

    impl ScalarField3 for Sphere {
        fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
            self.radius - (x * x + y * y + z * z).sqrt()
        }
    }

    struct Plane;

    impl ScalarField3 for Plane {
        fn sample(&self, _x: f64, _y: f64, z: f64) -> f64 {
            -z
        }
    }

    #[test]
    fn test_zero_steps_yield_empty_mesh() {
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let mesh = extract_isosurface(&Plane, &bounds, [0, 4, 4]);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_plane_surface_lies_at_zero() {
        let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        let mesh = extract_isosurface(&Plane, &bounds, [4, 4, 8]);

        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            assert!(v[2].abs() < 1e-12, "vertex off the z=0 plane: {:?}", v);
        }
    }

    #[test]
    fn test_sphere_vertices_near_radius() {
        let bounds = BoundingBox::new([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        let sphere = Sphere { radius: 0.5 };
        let mesh = extract_isosurface(&sphere, &bounds, [16, 16, 16]);

        assert!(!mesh.is_empty());
        // Linear interpolation puts every vertex within a voxel of the
        // true surface.
        let voxel = 2.0 / 16.0;
        for v in &mesh.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.5).abs() < voxel, "vertex at radius {}", r);
        }
    }

    #[test]
    fn test_triangle_indices_reference_vertices() {
        let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        let mesh = extract_isosurface(&Plane, &bounds, [2, 2, 4]);
        for t in &mesh.triangles {
            assert!(t.iter().all(|&i| i < mesh.vertices.len()));
        }
    }
}
