//! UV-sphere tessellation for planets and moons: positions, normals, texture
//! coordinates, triangle and wireframe indices, and an interleaved GPU layout.

pub mod face_normal;
pub mod sphere;
pub mod vertex;
pub mod vertex_format;

pub use face_normal::{FACE_NORMAL_EPSILON, compute_face_normal};
pub use sphere::{
    MAX_SECTOR_COUNT, MAX_STACK_COUNT, MIN_SECTOR_COUNT, MIN_STACK_COUNT, SphereMesh, SphereParams,
};
pub use vertex::{INTERLEAVED_FLOATS, INTERLEAVED_STRIDE, SphereVertex};
pub use vertex_format::{SPHERE_VERTEX_ATTRIBUTES, SPHERE_VERTEX_LAYOUT, sphere_vertex_buffer_layout};
