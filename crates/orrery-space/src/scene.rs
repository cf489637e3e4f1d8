//! Animation state and per-frame body placement.
//!
//! Each frame, while running, the clock advances by a fixed number of hours
//! and every primary orbit advances by `increment / period`. Placement then
//! composes, for each body:
//!
//! ```text
//! T(0, 0, -20) * Rx(view) * Ry(orbit angle) * T(distance, 0, 0) * Rx(tilt)
//! ```
//!
//! Satellites start from their parent's frame (before the parent's tilt).

use glam::{Mat4, Vec3};

use crate::body::{CelestialBody, Orbit};
use crate::command::{CommandOutcome, KeyCommand};
use crate::orbital::OrbitPhase;

/// Degrees added or removed by one tilt command.
pub const VIEW_ANGLE_STEP_DEG: f32 = 5.0;
/// The view never tilts past this angle in either direction.
pub const VIEW_ANGLE_LIMIT_DEG: f32 = 90.0;

const HOURS_PER_DAY: f32 = 24.0;
/// The whole system is pushed back this far in front of the viewer.
const VIEW_DISTANCE: f32 = 20.0;

/// Initial animation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    /// Hours advanced per running frame.
    pub increment_hours: f32,
    /// Initial view tilt about X, in degrees.
    pub view_angle_deg: f32,
    /// Whether frames advance time from the start.
    pub start_running: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            increment_hours: 6.0,
            view_angle_deg: 15.0,
            start_running: true,
        }
    }
}

/// Everything that changes from frame to frame.
#[derive(Clone, Debug)]
pub struct SceneState {
    bodies: Vec<CelestialBody>,
    phases: Vec<OrbitPhase>,
    hour_of_day: f32,
    increment_hours: f32,
    view_angle_deg: f32,
    spinning: bool,
    single_step: bool,
    frames_advanced: u64,
}

impl SceneState {
    pub fn new(bodies: Vec<CelestialBody>, settings: AnimationSettings) -> Self {
        let phases = vec![OrbitPhase::default(); bodies.len()];
        Self {
            bodies,
            phases,
            hour_of_day: 0.0,
            increment_hours: settings.increment_hours,
            view_angle_deg: settings
                .view_angle_deg
                .clamp(-VIEW_ANGLE_LIMIT_DEG, VIEW_ANGLE_LIMIT_DEG),
            spinning: settings.start_running,
            single_step: false,
            frames_advanced: 0,
        }
    }

    /// Run one frame of the animation. Returns `true` if time moved.
    pub fn advance_frame(&mut self) -> bool {
        let moved = self.spinning;
        if moved {
            self.hour_of_day = (self.hour_of_day + self.increment_hours).rem_euclid(HOURS_PER_DAY);
            for (body, phase) in self.bodies.iter().zip(self.phases.iter_mut()) {
                if let Orbit::Primary { period_days } = body.orbit {
                    phase.advance(self.increment_hours, period_days);
                }
            }
            self.frames_advanced += 1;
        }

        if self.single_step {
            self.spinning = false;
        }
        moved
    }

    /// Apply a key command.
    pub fn apply(&mut self, command: KeyCommand) -> CommandOutcome {
        match command {
            KeyCommand::ToggleRun => {
                if self.single_step {
                    self.single_step = false;
                    self.spinning = true;
                } else {
                    self.spinning = !self.spinning;
                }
            }
            KeyCommand::SingleStep => {
                self.single_step = true;
                self.spinning = true;
            }
            KeyCommand::TiltUp => {
                self.view_angle_deg = (self.view_angle_deg + VIEW_ANGLE_STEP_DEG).min(VIEW_ANGLE_LIMIT_DEG);
            }
            KeyCommand::TiltDown => {
                self.view_angle_deg =
                    (self.view_angle_deg - VIEW_ANGLE_STEP_DEG).max(-VIEW_ANGLE_LIMIT_DEG);
            }
            KeyCommand::SpeedUp => self.increment_hours *= 2.0,
            KeyCommand::SlowDown => self.increment_hours /= 2.0,
            KeyCommand::Quit => return CommandOutcome::Quit,
        }
        log::debug!(
            "{command:?}: running={} single_step={} increment={}h view={}deg",
            self.spinning,
            self.single_step,
            self.increment_hours,
            self.view_angle_deg
        );
        CommandOutcome::Continue
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Orbital phase of the body at `index`. Satellites report their derived phase.
    ///
    /// A satellite whose parent does not precede it in the catalog stays at phase zero.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn phase(&self, index: usize) -> OrbitPhase {
        match self.bodies[index].orbit {
            Orbit::Satellite {
                parent,
                revolutions_per_parent_orbit,
            } if parent < index => {
                OrbitPhase::at(revolutions_per_parent_orbit * self.phase(parent).fraction())
            }
            Orbit::Satellite { .. } => OrbitPhase::default(),
            _ => self.phases[index],
        }
    }

    pub fn hour_of_day(&self) -> f32 {
        self.hour_of_day
    }

    pub fn increment_hours(&self) -> f32 {
        self.increment_hours
    }

    pub fn view_angle_deg(&self) -> f32 {
        self.view_angle_deg
    }

    pub fn is_running(&self) -> bool {
        self.spinning
    }

    pub fn is_single_step(&self) -> bool {
        self.single_step
    }

    /// Frames in which time actually advanced.
    pub fn frames_advanced(&self) -> u64 {
        self.frames_advanced
    }

    /// The shared view transform applied before any body.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -VIEW_DISTANCE))
            * Mat4::from_rotation_x(self.view_angle_deg.to_radians())
    }

    /// Model-view matrix of every body, in catalog order.
    ///
    /// A satellite listed before its parent orbits the scene origin instead.
    pub fn body_transforms(&self) -> Vec<Mat4> {
        let view = self.view_matrix();
        // Orbit frames exclude the body's own tilt so satellites inherit only placement.
        let mut frames: Vec<Mat4> = Vec::with_capacity(self.bodies.len());
        let mut models = Vec::with_capacity(self.bodies.len());

        for (index, body) in self.bodies.iter().enumerate() {
            let origin = match body.orbit {
                Orbit::Stationary => view,
                Orbit::Primary { .. } => view * self.orbit_offset(index, body),
                Orbit::Satellite { parent, .. } => match frames.get(parent) {
                    Some(&frame) => frame * self.orbit_offset(index, body),
                    None => {
                        log::warn!("{} is listed before its parent {parent}", body.name);
                        view * self.orbit_offset(index, body)
                    }
                },
            };
            models.push(origin * Mat4::from_rotation_x(body.tilt_deg.to_radians()));
            frames.push(origin);
        }
        models
    }

    fn orbit_offset(&self, index: usize, body: &CelestialBody) -> Mat4 {
        Mat4::from_rotation_y(self.phase(index).angle_degrees().to_radians())
            * Mat4::from_translation(Vec3::new(body.orbit_distance, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::solar_system;

    fn scene_with_view(view_angle_deg: f32) -> SceneState {
        SceneState::new(
            solar_system(),
            AnimationSettings {
                view_angle_deg,
                ..AnimationSettings::default()
            },
        )
    }

    fn origin_of(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn test_frame_advances_phases_by_increment_over_period() {
        let mut scene = scene_with_view(0.0);
        assert!(scene.advance_frame());
        assert!((scene.phase(1).fraction() - 6.0 / 88.0).abs() < 1e-6);
        assert!((scene.phase(3).fraction() - 6.0 / 365.0).abs() < 1e-6);
        assert_eq!(scene.phase(0), OrbitPhase::default());
        assert_eq!(scene.hour_of_day(), 6.0);
    }

    #[test]
    fn test_hour_of_day_wraps() {
        let mut scene = scene_with_view(0.0);
        for _ in 0..5 {
            scene.advance_frame();
        }
        assert_eq!(scene.hour_of_day(), 6.0);
    }

    #[test]
    fn test_paused_scene_does_not_move() {
        let mut scene = scene_with_view(0.0);
        scene.apply(KeyCommand::ToggleRun);
        assert!(!scene.is_running());
        assert!(!scene.advance_frame());
        assert_eq!(scene.frames_advanced(), 0);
        assert_eq!(scene.phase(1).fraction(), 0.0);
    }

    #[test]
    fn test_single_step_moves_one_frame_then_pauses() {
        let mut scene = scene_with_view(0.0);
        scene.apply(KeyCommand::ToggleRun);
        scene.apply(KeyCommand::SingleStep);
        assert!(scene.advance_frame());
        assert!(!scene.advance_frame());
        assert_eq!(scene.frames_advanced(), 1);

        // Another step request moves exactly one more frame.
        scene.apply(KeyCommand::SingleStep);
        scene.advance_frame();
        scene.advance_frame();
        assert_eq!(scene.frames_advanced(), 2);
    }

    #[test]
    fn test_toggle_run_leaves_single_step_mode() {
        let mut scene = scene_with_view(0.0);
        scene.apply(KeyCommand::SingleStep);
        scene.advance_frame();
        scene.apply(KeyCommand::ToggleRun);
        assert!(!scene.is_single_step());
        assert!(scene.is_running());
        scene.advance_frame();
        scene.advance_frame();
        assert_eq!(scene.frames_advanced(), 3);
    }

    #[test]
    fn test_view_angle_is_clamped() {
        let mut scene = scene_with_view(80.0);
        for _ in 0..5 {
            scene.apply(KeyCommand::TiltUp);
        }
        assert_eq!(scene.view_angle_deg(), VIEW_ANGLE_LIMIT_DEG);
        for _ in 0..40 {
            scene.apply(KeyCommand::TiltDown);
        }
        assert_eq!(scene.view_angle_deg(), -VIEW_ANGLE_LIMIT_DEG);
    }

    #[test]
    fn test_speed_commands_double_and_halve() {
        let mut scene = scene_with_view(0.0);
        scene.apply(KeyCommand::SpeedUp);
        assert_eq!(scene.increment_hours(), 12.0);
        scene.apply(KeyCommand::SlowDown);
        scene.apply(KeyCommand::SlowDown);
        assert_eq!(scene.increment_hours(), 3.0);
    }

    #[test]
    fn test_quit_command() {
        let mut scene = scene_with_view(0.0);
        assert_eq!(scene.apply(KeyCommand::Quit), CommandOutcome::Quit);
        assert_eq!(scene.apply(KeyCommand::TiltUp), CommandOutcome::Continue);
    }

    #[test]
    fn test_initial_transforms_place_bodies_on_x_axis() {
        let scene = scene_with_view(0.0);
        let transforms = scene.body_transforms();
        assert_eq!(transforms.len(), scene.bodies().len());
        assert_close(origin_of(transforms[0]), Vec3::new(0.0, 0.0, -20.0));
        assert_close(origin_of(transforms[1]), Vec3::new(2.0, 0.0, -20.0));
        assert_close(origin_of(transforms[3]), Vec3::new(4.0, 0.0, -20.0));
        // Moon sits half a unit beyond Earth.
        assert_close(origin_of(transforms[4]), Vec3::new(4.5, 0.0, -20.0));
    }

    #[test]
    fn test_view_tilt_rotates_about_x() {
        let scene = scene_with_view(90.0);
        let transforms = scene.body_transforms();
        // A point on the X axis is unaffected by a rotation about X.
        assert_close(origin_of(transforms[1]), Vec3::new(2.0, 0.0, -20.0));
        // The sun's +Z axis is tipped onto -Y.
        let sun_up = transforms[0].transform_vector3(Vec3::Z);
        assert_close(sun_up, Vec3::NEG_Y);
    }

    #[test]
    fn test_quarter_orbit_moves_planet_off_axis() {
        let mut scene = scene_with_view(0.0);
        // Mercury: 88 days at 22 hours per frame makes a quarter orbit.
        scene.increment_hours = 22.0;
        scene.advance_frame();
        let mercury = origin_of(scene.body_transforms()[1]);
        // Ry(+90deg) maps +X onto -Z.
        assert_close(mercury, Vec3::new(0.0, 0.0, -22.0));
    }

    #[test]
    fn test_moon_phase_follows_earth() {
        let mut scene = scene_with_view(0.0);
        for _ in 0..7 {
            scene.advance_frame();
        }
        let expected = (12.0 * scene.phase(3).fraction()).fract();
        assert!((scene.phase(4).fraction() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_tilt_does_not_move_body_origin() {
        let scene = scene_with_view(0.0);
        let transforms = scene.body_transforms();
        // Venus is tilted 90 degrees but still sits at distance 3.
        assert_close(origin_of(transforms[2]), Vec3::new(3.0, 0.0, -20.0));
        let venus_pole = transforms[2].transform_vector3(Vec3::Z);
        assert_close(venus_pole, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_initial_view_angle_is_clamped() {
        let scene = scene_with_view(120.0);
        assert_eq!(scene.view_angle_deg(), VIEW_ANGLE_LIMIT_DEG);
    }

    fn body(name: &str, orbit_distance: f32, orbit: Orbit) -> CelestialBody {
        CelestialBody {
            name: name.to_string(),
            radius: 0.1,
            orbit_distance,
            orbit,
            tilt_deg: 0.0,
            texture: None,
        }
    }

    #[test]
    fn test_satellite_of_satellite_follows_its_parent_phase() {
        let bodies = vec![
            body("Planet", 4.0, Orbit::Primary { period_days: 100.0 }),
            body(
                "Moon",
                0.5,
                Orbit::Satellite {
                    parent: 0,
                    revolutions_per_parent_orbit: 3.0,
                },
            ),
            body(
                "Moonlet",
                0.1,
                Orbit::Satellite {
                    parent: 1,
                    revolutions_per_parent_orbit: 2.0,
                },
            ),
        ];
        let mut scene = SceneState::new(bodies, AnimationSettings::default());
        scene.advance_frame();

        // Planet at 0.06, moon at 0.18, moonlet at 0.36.
        assert!((scene.phase(1).fraction() - 0.18).abs() < 1e-5);
        assert!((scene.phase(2).fraction() - 0.36).abs() < 1e-5);
    }

    #[test]
    fn test_satellite_before_parent_does_not_panic() {
        let bodies = vec![
            body(
                "Stray",
                1.0,
                Orbit::Satellite {
                    parent: 1,
                    revolutions_per_parent_orbit: 2.0,
                },
            ),
            body("Planet", 4.0, Orbit::Primary { period_days: 100.0 }),
        ];
        let mut scene = SceneState::new(bodies, AnimationSettings::default());
        scene.advance_frame();

        assert_eq!(scene.phase(0), OrbitPhase::default());
        let transforms = scene.body_transforms();
        assert_eq!(transforms.len(), 2);
        assert_close(origin_of(transforms[0]), Vec3::new(1.0, 0.0, -20.0));
    }
}
