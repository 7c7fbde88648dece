use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Corner selectors for each face of a box, counter-clockwise seen from
/// outside. `false` picks the min coordinate, `true` the max.
#[rustfmt::skip]
const BOX_FACES: [([f32; 3], [[bool; 3]; 4]); 6] = [
    // +Z
    ([0.0, 0.0, 1.0], [[false, false, true], [true, false, true], [true, true, true], [false, true, true]]),
    // -Z
    ([0.0, 0.0, -1.0], [[true, false, false], [false, false, false], [false, true, false], [true, true, false]]),
    // +X
    ([1.0, 0.0, 0.0], [[true, false, true], [true, false, false], [true, true, false], [true, true, true]]),
    // -X
    ([-1.0, 0.0, 0.0], [[false, false, false], [false, false, true], [false, true, true], [false, true, false]]),
    // +Y
    ([0.0, 1.0, 0.0], [[false, true, true], [true, true, true], [true, true, false], [false, true, false]]),
    // -Y
    ([0.0, -1.0, 0.0], [[false, false, false], [true, false, false], [true, false, true], [false, false, true]]),
];

/// Append an axis-aligned box as 12 triangles with flat normals.
fn push_box(out: &mut Vec<Vertex>, min: [f32; 3], max: [f32; 3]) {
    let pick = |sel: [bool; 3]| -> [f32; 3] {
        std::array::from_fn(|i| if sel[i] { max[i] } else { min[i] })
    };
    for (normal, corners) in BOX_FACES {
        for i in [0, 1, 2, 2, 3, 0] {
            out.push(Vertex {
                position: pick(corners[i]),
                normal,
            });
        }
    }
}

/// The shared test mesh: a 3D letter "F", 100 wide, 150 tall, 30 deep,
/// with its origin at the top-left front corner and +Y running down the
/// stem. Non-indexed triangle list.
pub fn letter_f_mesh() -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(3 * 36);
    // Stem
    push_box(&mut verts, [0.0, 0.0, 0.0], [30.0, 150.0, 30.0]);
    // Top rung
    push_box(&mut verts, [30.0, 0.0, 0.0], [100.0, 30.0, 30.0]);
    // Middle rung
    push_box(&mut verts, [30.0, 60.0, 0.0], [67.0, 90.0, 30.0]);
    verts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn letter_f_has_three_boxes() {
        let verts = letter_f_mesh();
        assert_eq!(verts.len(), 108);
    }

    #[test]
    fn letter_f_bounds() {
        let verts = letter_f_mesh();
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in &verts {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }
        assert_eq!(min, [0.0, 0.0, 0.0]);
        assert_eq!(max, [100.0, 150.0, 30.0]);
    }

    #[test]
    fn triangles_wind_counter_clockwise_around_their_normal() {
        let verts = letter_f_mesh();
        for tri in verts.chunks_exact(3) {
            let face = cross(
                sub(tri[1].position, tri[0].position),
                sub(tri[2].position, tri[0].position),
            );
            let n = tri[0].normal;
            let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
            assert!(dot > 0.0, "triangle {tri:?} winds against its normal");
            assert!(tri.iter().all(|v| v.normal == n));
        }
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
