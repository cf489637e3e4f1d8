//! Orbital phase accumulation.

/// Progress of a body around its orbit, in revolutions.
///
/// The fractional part is kept in `[0, 1)` and whole revolutions are counted
/// separately so precision does not degrade over long runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitPhase {
    fraction: f32,
    completed: u64,
}

impl OrbitPhase {
    /// A phase at the given fraction of a revolution (wrapped into `[0, 1)`).
    pub fn at(fraction: f32) -> Self {
        let mut phase = Self::default();
        phase.add_revolutions(fraction);
        phase
    }

    /// Advance by `increment / period`.
    ///
    /// A non-positive period or a non-finite ratio leaves the phase unchanged.
    /// The completed count saturates at `u64::MAX`.
    pub fn advance(&mut self, increment: f32, period: f32) {
        if period > 0.0 {
            self.add_revolutions(increment / period);
        }
    }

    fn add_revolutions(&mut self, revolutions: f32) {
        if !revolutions.is_finite() {
            return;
        }
        let total = self.fraction + revolutions;
        let whole = total.floor();
        self.fraction = total - whole;
        // `total - floor(total)` can round up to exactly 1.0 for tiny negatives.
        if self.fraction >= 1.0 {
            self.fraction = 0.0;
        }
        if whole > 0.0 {
            // `as` saturates for floats past `u64::MAX`.
            self.completed = self.completed.saturating_add(whole as u64);
        }
    }

    /// Fraction of the current revolution in `[0, 1)`.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Whole revolutions completed so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Rotation about the orbit axis, in degrees within `[0, 360)`.
    pub fn angle_degrees(&self) -> f32 {
        360.0 * self.fraction
    }
}
