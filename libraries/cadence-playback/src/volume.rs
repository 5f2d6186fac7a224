//! Volume with fader compensation
//!
//! The host's fader is logarithmic, so the value it reports is stored after
//! a square root and squared again when applied to raw playback volume:
//!
//! ```text
//! stored  = sqrt(fader)
//! applied = stored²
//! ```

use crate::error::{PlaybackError, Result};

/// Volume controller storing the compensated level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Compensated level (0.0-1.0)
    stored: f64,

    /// Hosts whose output volume is owned by the OS (mobile) always apply 1.0
    fixed_output: bool,
}

impl Volume {
    /// Create a volume from an already-compensated stored level
    pub fn new(stored: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&stored) {
            return Err(PlaybackError::InvalidVolume(stored));
        }
        Ok(Self {
            stored,
            fixed_output: false,
        })
    }

    /// Force the applied volume to 1.0 regardless of the stored level
    pub fn with_fixed_output(mut self, fixed: bool) -> Self {
        self.fixed_output = fixed;
        self
    }

    /// Store a value reported by the host fader
    ///
    /// Out-of-range and NaN input is clamped.
    pub fn set_from_fader(&mut self, fader: f64) {
        let fader = if fader.is_nan() { 0.0 } else { fader.clamp(0.0, 1.0) };
        self.stored = fader.sqrt();
    }

    /// Compensated level, as persisted
    pub fn stored(&self) -> f64 {
        self.stored
    }

    /// Level to apply to raw playback volume
    pub fn applied(&self) -> f64 {
        if self.fixed_output {
            1.0
        } else {
            self.stored * self.stored
        }
    }

    /// Applied level in dB
    ///
    /// Useful for debugging and display
    pub fn to_db(&self) -> f64 {
        let applied = self.applied();
        if applied == 0.0 {
            f64::NEG_INFINITY
        } else {
            20.0 * applied.log10()
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            stored: 1.0,
            fixed_output: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8).unwrap();
        assert_eq!(vol.stored(), 0.8);
        assert!((vol.applied() - 0.64).abs() < 1e-12);
    }

    #[test]
    fn reject_out_of_range() {
        assert!(matches!(Volume::new(1.5), Err(PlaybackError::InvalidVolume(_))));
        assert!(Volume::new(-0.1).is_err());
        assert!(Volume::new(f64::NAN).is_err());
    }

    #[test]
    fn fader_is_square_root_compensated() {
        let mut vol = Volume::default();
        vol.set_from_fader(0.25);

        assert!((vol.stored() - 0.5).abs() < 1e-12);
        assert!((vol.applied() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn fader_input_is_clamped() {
        let mut vol = Volume::default();
        vol.set_from_fader(3.0);
        assert_eq!(vol.stored(), 1.0);

        vol.set_from_fader(-1.0);
        assert_eq!(vol.stored(), 0.0);

        vol.set_from_fader(f64::NAN);
        assert_eq!(vol.stored(), 0.0);
    }

    #[test]
    fn fixed_output_applies_unity() {
        let vol = Volume::new(0.3).unwrap().with_fixed_output(true);
        assert_eq!(vol.applied(), 1.0);
        assert_eq!(vol.stored(), 0.3);
    }

    #[test]
    fn db_conversion() {
        let vol = Volume::new(1.0).unwrap();
        assert!(vol.to_db().abs() < 1e-9);

        let vol = Volume::new(0.0).unwrap();
        assert_eq!(vol.to_db(), f64::NEG_INFINITY);
    }
}
