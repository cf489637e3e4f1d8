//! The running solar system: scene state plus the meshes and textures it draws with.

use orrery_assets::TextureSet;
use orrery_config::{Config, SphereConfig};
use orrery_mesh::{SphereMesh, SphereParams};
use orrery_space::{AnimationSettings, CelestialBody, CommandOutcome, KeyCommand, SceneState};
use tracing::{debug, info};

use crate::renderer::{BodyDraw, Renderer};

/// Animation state and draw resources for one solar system.
///
/// Bodies with the same radius share a sphere mesh.
pub struct Orrery {
    scene: SceneState,
    meshes: Vec<SphereMesh>,
    /// Index into `meshes` for each body, in catalog order.
    body_meshes: Vec<usize>,
    textures: TextureSet,
    wireframe: bool,
    frames_rendered: u64,
}

impl Orrery {
    /// Build from loaded configuration.
    pub fn from_config(config: &Config, bodies: Vec<CelestialBody>, textures: TextureSet) -> Self {
        let settings = AnimationSettings {
            increment_hours: config.animation.increment_hours,
            view_angle_deg: config.animation.view_angle_deg,
            start_running: config.animation.start_running,
        };
        Self::new(bodies, settings, &config.sphere, textures, config.debug.wireframe)
    }

    pub fn new(
        bodies: Vec<CelestialBody>,
        settings: AnimationSettings,
        sphere: &SphereConfig,
        textures: TextureSet,
        wireframe: bool,
    ) -> Self {
        let mut meshes: Vec<SphereMesh> = Vec::new();
        let mut body_meshes = Vec::with_capacity(bodies.len());

        for body in &bodies {
            let index = match meshes.iter().position(|m| m.radius() == body.radius) {
                Some(index) => index,
                None => {
                    meshes.push(SphereMesh::new(
                        body.radius,
                        sphere.sector_count,
                        sphere.stack_count,
                        sphere.smooth,
                    ));
                    meshes.len() - 1
                }
            };
            body_meshes.push(index);
        }

        info!(
            "Built {} sphere meshes for {} bodies ({}x{}, {})",
            meshes.len(),
            bodies.len(),
            sphere.sector_count,
            sphere.stack_count,
            if sphere.smooth { "smooth" } else { "flat" }
        );

        Self {
            scene: SceneState::new(bodies, settings),
            meshes,
            body_meshes,
            textures,
            wireframe,
            frames_rendered: 0,
        }
    }

    /// Re-tessellate every mesh in a single rebuild each. Meshes whose clamped
    /// parameters are unchanged are left alone.
    pub fn apply_sphere_config(&mut self, sphere: &SphereConfig) {
        for mesh in &mut self.meshes {
            let target = SphereParams::new(
                mesh.radius(),
                sphere.sector_count,
                sphere.stack_count,
                sphere.smooth,
            );
            if target != mesh.params() {
                mesh.set(target.radius, target.sector_count, target.stack_count, target.smooth);
                debug!("Rebuilt sphere of radius {}", mesh.radius());
            }
        }
    }

    /// Advance the animation by one step. Returns `true` if time moved.
    pub fn update(&mut self) -> bool {
        self.scene.advance_frame()
    }

    /// Submit every body to `renderer` as one frame.
    pub fn render(&mut self, renderer: &mut impl Renderer) {
        let transforms = self.scene.body_transforms();

        renderer.begin_frame();
        for ((body, model_view), &mesh_index) in self
            .scene
            .bodies()
            .iter()
            .zip(transforms)
            .zip(&self.body_meshes)
        {
            let texture = body
                .texture
                .as_deref()
                .and_then(|name| self.textures.get(name));
            renderer.draw_body(&BodyDraw {
                name: &body.name,
                model_view,
                mesh: &self.meshes[mesh_index],
                texture,
                wireframe: self.wireframe,
            });
        }
        renderer.end_frame();
        self.frames_rendered += 1;
    }

    /// Apply a key command to the scene.
    pub fn handle_key(&mut self, command: KeyCommand) -> CommandOutcome {
        self.scene.apply(command)
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Distinct meshes, in order of first use.
    pub fn meshes(&self) -> &[SphereMesh] {
        &self.meshes
    }

    /// The mesh drawn for body `index`.
    pub fn mesh_for(&self, index: usize) -> Option<&SphereMesh> {
        self.body_meshes.get(index).map(|&m| &self.meshes[m])
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
