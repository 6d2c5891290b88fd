//! Volume control
//!
//! Volume range is 0-100%, forwarded to the engine as a linear 0.0-1.0 gain.
//! Out-of-range levels are clamped, never rejected.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100, clamped)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear gain for the engine
    ///
    /// - 0%   → 0.0
    /// - 50%  → 0.5
    /// - 100% → 1.0
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(80);
        assert_eq!(vol.level(), 80);
    }

    #[test]
    fn set_volume_level() {
        let mut vol = Volume::new(50);
        assert_eq!(vol.level(), 50);

        vol.set_level(75);
        assert_eq!(vol.level(), 75);

        // Clamp to 100
        vol.set_level(150);
        assert_eq!(vol.level(), 100);
    }

    #[test]
    fn gain_endpoints_are_exact() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert_eq!(Volume::new(100).gain(), 1.0);
        assert_eq!(Volume::new(255).gain(), 1.0);
    }

    #[test]
    fn gain_is_linear() {
        assert!((Volume::new(50).gain() - 0.5).abs() < f32::EPSILON);
        assert!((Volume::new(25).gain() - 0.25).abs() < f32::EPSILON);
    }
}
