//! The drawing seam between the animation and a graphics backend.

use glam::{Mat4, Vec4};
use orrery_assets::TextureImage;
use orrery_mesh::SphereMesh;
use tracing::{debug, trace};

/// One body to draw this frame.
#[derive(Clone, Copy, Debug)]
pub struct BodyDraw<'a> {
    pub name: &'a str,
    /// Model-view matrix (the view transform is already applied).
    pub model_view: Mat4,
    pub mesh: &'a SphereMesh,
    /// `None` draws untextured.
    pub texture: Option<&'a TextureImage>,
    /// Draw `mesh.line_indices()` as lines instead of the filled triangles.
    pub wireframe: bool,
}

/// Receives one frame of draw calls.
pub trait Renderer {
    fn begin_frame(&mut self);
    fn draw_body(&mut self, draw: &BodyDraw<'_>);
    fn end_frame(&mut self);
}

/// Work submitted during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub triangles: usize,
    pub line_segments: usize,
    pub textured_draws: usize,
    /// Vertex plus index bytes that a GPU backend would bind.
    pub bytes_bound: usize,
    /// Draws whose center lands inside the view volume.
    pub visible_bodies: usize,
}

/// Vertical field of view of the default projection, in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 60.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 50.0;

/// A renderer with no window or GPU.
///
/// Tallies what would have been drawn, which lets the binary run anywhere
/// and gives tests something to observe.
#[derive(Debug)]
pub struct HeadlessRenderer {
    projection: Mat4,
    current: FrameStats,
    last_frame: FrameStats,
    frames: u64,
    in_frame: bool,
}

impl HeadlessRenderer {
    /// A renderer for a `width` x `height` viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Self {
            projection: Mat4::perspective_rh_gl(
                FIELD_OF_VIEW_DEG.to_radians(),
                aspect,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            current: FrameStats::default(),
            last_frame: FrameStats::default(),
            frames: 0,
            in_frame: false,
        }
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Whether the origin of `model_view` falls inside the clip volume.
    pub fn is_visible(&self, model_view: Mat4) -> bool {
        let clip = self.projection * model_view * Vec4::W;
        clip.w > 0.0 && clip.x.abs() <= clip.w && clip.y.abs() <= clip.w && clip.z.abs() <= clip.w
    }

    /// Stats of the most recently finished frame.
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Frames finished so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn begin_frame(&mut self) {
        self.current = FrameStats::default();
        self.in_frame = true;
    }

    fn draw_body(&mut self, draw: &BodyDraw<'_>) {
        if !self.in_frame {
            debug!("Ignoring draw of {} outside a frame", draw.name);
            return;
        }
        let mesh = draw.mesh;
        self.current.draw_calls += 1;
        if draw.wireframe {
            self.current.line_segments += mesh.line_index_count() / 2;
        } else {
            self.current.triangles += mesh.triangle_count();
        }
        if draw.texture.is_some() {
            self.current.textured_draws += 1;
        }
        self.current.bytes_bound += mesh.interleaved_bytes().len() + mesh.index_bytes().len();
        if self.is_visible(draw.model_view) {
            self.current.visible_bodies += 1;
        }

        trace!(
            "draw {} at {:?}",
            draw.name,
            draw.model_view.w_axis.truncate()
        );
    }

    fn end_frame(&mut self) {
        if !self.in_frame {
            return;
        }
        self.in_frame = false;
        self.last_frame = self.current;
        self.frames += 1;
        debug!(
            "Frame {}: {} draws ({} visible), {} triangles, {} textured",
            self.frames,
            self.last_frame.draw_calls,
            self.last_frame.visible_bodies,
            self.last_frame.triangles,
            self.last_frame.textured_draws
        );
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw<'a>(mesh: &'a SphereMesh, texture: Option<&'a TextureImage>, wireframe: bool) -> BodyDraw<'a> {
        BodyDraw {
            name: "test",
            model_view: Mat4::IDENTITY,
            mesh,
            texture,
            wireframe,
        }
    }

    #[test]
    fn test_frame_tallies_draws() {
        let mesh = SphereMesh::new(1.0, 4, 3, true);
        let texture = TextureImage {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        };
        let mut renderer = HeadlessRenderer::default();

        renderer.begin_frame();
        renderer.draw_body(&draw(&mesh, Some(&texture), false));
        renderer.draw_body(&draw(&mesh, None, false));
        renderer.end_frame();

        let stats = renderer.last_frame();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.triangles, 2 * mesh.triangle_count());
        assert_eq!(stats.textured_draws, 1);
        assert_eq!(
            stats.bytes_bound,
            2 * (mesh.vertex_count() * 32 + mesh.index_count() * 4)
        );
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_wireframe_counts_line_segments() {
        let mesh = SphereMesh::new(1.0, 4, 3, true);
        let mut renderer = HeadlessRenderer::default();

        renderer.begin_frame();
        renderer.draw_body(&draw(&mesh, None, true));
        renderer.end_frame();

        let stats = renderer.last_frame();
        assert_eq!(stats.triangles, 0);
        assert_eq!(stats.line_segments, mesh.line_index_count() / 2);
    }

    #[test]
    fn test_draw_outside_frame_is_ignored() {
        let mesh = SphereMesh::default();
        let mut renderer = HeadlessRenderer::default();
        renderer.draw_body(&draw(&mesh, None, false));
        renderer.end_frame();
        assert_eq!(renderer.frames(), 0);
        assert_eq!(renderer.last_frame(), FrameStats::default());
    }

    #[test]
    fn test_each_frame_starts_from_zero() {
        let mesh = SphereMesh::new(1.0, 3, 2, false);
        let mut renderer = HeadlessRenderer::default();
        for _ in 0..3 {
            renderer.begin_frame();
            renderer.draw_body(&draw(&mesh, None, false));
            renderer.end_frame();
        }
        assert_eq!(renderer.last_frame().draw_calls, 1);
        assert_eq!(renderer.frames(), 3);
    }

    #[test]
    fn test_visibility_follows_projection() {
        let renderer = HeadlessRenderer::new(800, 600);
        let ahead = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -20.0));
        let behind = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, 5.0));
        let too_far = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -60.0));
        let off_side = Mat4::from_translation(glam::Vec3::new(40.0, 0.0, -20.0));

        assert!(renderer.is_visible(ahead));
        assert!(!renderer.is_visible(behind));
        assert!(!renderer.is_visible(too_far));
        assert!(!renderer.is_visible(off_side));
    }

    #[test]
    fn test_identity_draw_is_not_visible() {
        // The eye sits at the origin, closer than the near plane.
        let mesh = SphereMesh::new(1.0, 3, 2, true);
        let mut renderer = HeadlessRenderer::default();
        renderer.begin_frame();
        renderer.draw_body(&draw(&mesh, None, false));
        renderer.end_frame();
        assert_eq!(renderer.last_frame().visible_bodies, 0);
    }
}
