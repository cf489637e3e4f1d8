//! Orrery application: ties the scene, sphere meshes, and textures together
//! and drives them through a renderer one frame at a time.

pub mod frame_loop;
pub mod orrery;
pub mod renderer;

pub use frame_loop::{FrameLoop, FrameTick, MAX_FRAME_TIME};
pub use orrery::Orrery;
pub use renderer::{
    BodyDraw, FAR_PLANE, FIELD_OF_VIEW_DEG, FrameStats, HeadlessRenderer, NEAR_PLANE, Renderer,
};
