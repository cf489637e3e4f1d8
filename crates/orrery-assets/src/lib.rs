//! Texture loading for body surfaces.
//!
//! Textures are decoded on the CPU to tightly packed RGBA8. A texture that is
//! missing or fails to decode is never fatal: [`try_load_texture`] and
//! [`TextureSet`] log a warning and the body is drawn untextured.

pub mod texture;
pub mod texture_set;

pub use texture::{TextureError, TextureImage, load_texture, try_load_texture};
pub use texture_set::TextureSet;
