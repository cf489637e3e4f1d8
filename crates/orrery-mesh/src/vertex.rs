//! Interleaved sphere vertex record.
//!
//! [`SphereVertex`] packs one vertex of every per-vertex stream into a single
//! 32-byte record so a renderer can bind one contiguous buffer.

/// Number of `f32` components in one interleaved record.
pub const INTERLEAVED_FLOATS: usize = 8;

/// Byte stride of one interleaved record.
pub const INTERLEAVED_STRIDE: usize = INTERLEAVED_FLOATS * std::mem::size_of::<f32>();

/// A single interleaved vertex.
///
/// Layout (32 bytes total):
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` tex_coord `[f32; 2]`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal, or zero for degenerate flat faces.
    pub normal: [f32; 3],
    /// Texture coordinates in `[0, 1]`.
    pub tex_coord: [f32; 2],
}

static_assertions::assert_eq_size!(SphereVertex, [u8; INTERLEAVED_STRIDE]);

impl SphereVertex {
    /// Build a record from its three components.
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }

    /// View the record as its eight raw floats.
    pub fn as_floats(&self) -> &[f32; INTERLEAVED_FLOATS] {
        bytemuck::cast_ref(self)
    }
}
