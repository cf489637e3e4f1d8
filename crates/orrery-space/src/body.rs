//! Celestial bodies and the built-in solar system catalog.

/// How a body moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orbit {
    /// Fixed at the origin (the sun).
    Stationary,
    /// Circles the origin once every `period_days`.
    Primary {
        /// Orbital period in days.
        period_days: f32,
    },
    /// Circles another body, completing a fixed number of revolutions per
    /// revolution of that body.
    Satellite {
        /// Index of the parent body in the catalog; must precede the satellite.
        parent: usize,
        /// Revolutions per parent revolution.
        revolutions_per_parent_orbit: f32,
    },
}

/// A drawable body of the solar system.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    /// Display radius in scene units.
    pub radius: f32,
    /// Distance from the orbit center in scene units.
    pub orbit_distance: f32,
    pub orbit: Orbit,
    /// Rotation about the local X axis applied after placement, in degrees.
    pub tilt_deg: f32,
    /// Texture file name, looked up in the configured texture directory.
    pub texture: Option<String>,
}

impl CelestialBody {
    fn new(name: &str, radius: f32, orbit_distance: f32, orbit: Orbit, tilt_deg: f32) -> Self {
        Self {
            name: name.to_string(),
            radius,
            orbit_distance,
            orbit,
            tilt_deg,
            texture: Some(format!("{}.bmp", name.to_lowercase())),
        }
    }

    fn planet(name: &str, radius: f32, orbit_distance: f32, period_days: f32, tilt_deg: f32) -> Self {
        Self::new(name, radius, orbit_distance, Orbit::Primary { period_days }, tilt_deg)
    }

    fn without_texture(mut self) -> Self {
        self.texture = None;
        self
    }
}

/// Sun, eight planets, and Earth's moon.
///
/// Sizes and distances are display units, not to scale. Orbital periods are
/// the real sidereal periods in days.
pub fn solar_system() -> Vec<CelestialBody> {
    vec![
        CelestialBody::new("Sun", 1.0, 0.0, Orbit::Stationary, 0.0),
        CelestialBody::planet("Mercury", 0.2, 2.0, 88.0, 0.0),
        CelestialBody::planet("Venus", 0.3, 3.0, 225.0, 90.0),
        CelestialBody::planet("Earth", 0.4, 4.0, 365.0, 0.0),
        CelestialBody::new(
            "Moon",
            0.1,
            0.5,
            Orbit::Satellite {
                parent: 3,
                revolutions_per_parent_orbit: 12.0,
            },
            -90.0,
        )
        .without_texture(),
        CelestialBody::planet("Mars", 0.3, 6.0, 687.0, 90.0),
        CelestialBody::planet("Jupiter", 0.9, 8.0, 4332.0, 90.0),
        CelestialBody::planet("Saturn", 0.7, 10.0, 10759.0, 90.0),
        CelestialBody::planet("Uranus", 0.6, 12.0, 30685.0, 90.0),
        CelestialBody::planet("Neptune", 0.6, 14.0, 60190.0, 90.0),
    ]
}
