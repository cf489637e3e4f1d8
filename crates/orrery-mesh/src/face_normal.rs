//! Per-face normals for flat-shaded meshes.

use glam::Vec3;

/// Cross products shorter than this are treated as degenerate.
pub const FACE_NORMAL_EPSILON: f32 = 0.000_001;

/// Unit normal of the triangle `(v1, v2, v3)`, wound counter-clockwise.
///
/// Returns [`Vec3::ZERO`] when the vertices are collinear or coincident.
pub fn compute_face_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    let edge1 = v2 - v1;
    let edge2 = v3 - v1;
    let normal = edge1.cross(edge2);

    let length = normal.length();
    if length > FACE_NORMAL_EPSILON {
        normal / length
    } else {
        Vec3::ZERO
    }
}
