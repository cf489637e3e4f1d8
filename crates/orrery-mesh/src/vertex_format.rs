//! Canonical `wgpu::VertexBufferLayout` for interleaved sphere meshes.
//!
//! ## Attribute Packing
//!
//! | Location | Offset | Format    | Field     |
//! |----------|--------|-----------|-----------|
//! | 0        | 0      | Float32x3 | position  |
//! | 1        | 12     | Float32x3 | normal    |
//! | 2        | 24     | Float32x2 | tex_coord |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::vertex::SphereVertex;

/// Vertex attributes covering all 32 bytes of [`SphereVertex`].
pub const SPHERE_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// The vertex buffer layout for [`SphereMesh::interleaved`](crate::SphereMesh::interleaved).
pub const SPHERE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<SphereVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &SPHERE_VERTEX_ATTRIBUTES,
};

/// Owned copy of [`SPHERE_VERTEX_LAYOUT`].
pub fn sphere_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    SPHERE_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<SphereVertex>() == 32,
    "SphereVertex size changed, update SPHERE_VERTEX_LAYOUT"
);
const _: () = assert!(SPHERE_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(SphereVertex, normal) as u64);
const _: () =
    assert!(SPHERE_VERTEX_ATTRIBUTES[2].offset == mem::offset_of!(SphereVertex, tex_coord) as u64);

#[cfg(test)]
mod tests {
    use super::*;

    fn format_size(format: VertexFormat) -> u64 {
        match format {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            other => panic!("unexpected vertex format {other:?}"),
        }
    }

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(SPHERE_VERTEX_LAYOUT.array_stride, 32);
    }

    #[test]
    fn test_attributes_tile_the_stride_exactly() {
        let mut expected_offset = 0;
        for attr in SPHERE_VERTEX_ATTRIBUTES {
            assert_eq!(attr.offset, expected_offset);
            expected_offset += format_size(attr.format);
        }
        assert_eq!(expected_offset, SPHERE_VERTEX_LAYOUT.array_stride);
    }

    #[test]
    fn test_shader_locations_are_sequential() {
        for (i, attr) in SPHERE_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = sphere_vertex_buffer_layout();
        assert_eq!(layout.array_stride, SPHERE_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.step_mode, VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 3);
    }
}
