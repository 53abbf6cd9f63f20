//! Configuration type definitions
//!
//! Defaults reproduce the reference device: a 5 × 100 µs latch window and a
//! 50-LED power-on animation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of settle ticks after a drain
pub const DEFAULT_LATCH_TICKS: u8 = 5;

/// Default settle tick length in microseconds
pub const DEFAULT_TICK_US: u32 = 100;

/// Default mid-frame idle timeout in milliseconds
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 250;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Latch needs at least one tick
    ZeroLatchTicks,
    /// Tick duration must be non-zero
    ZeroTickDuration,
    /// An idle timeout of zero would abandon every frame
    ZeroIdleTimeout,
    /// Boot animation enabled with no pixels
    ZeroBootPixels,
}

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Settle ticks after each drain
    pub latch_ticks: u8,
    /// Length of one settle tick (µs)
    pub tick_us: u32,
    /// Abandon a partial frame after this long without a byte (ms).
    /// `None` waits forever.
    pub idle_timeout_ms: Option<u32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            latch_ticks: DEFAULT_LATCH_TICKS,
            tick_us: DEFAULT_TICK_US,
            idle_timeout_ms: Some(DEFAULT_IDLE_TIMEOUT_MS),
        }
    }
}

impl ControllerConfig {
    /// Total settle window in microseconds
    pub fn settle_us(&self) -> u32 {
        u32::from(self.latch_ticks).saturating_mul(self.tick_us)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.latch_ticks == 0 {
            return Err(ConfigError::ZeroLatchTicks);
        }
        if self.tick_us == 0 {
            return Err(ConfigError::ZeroTickDuration);
        }
        if self.idle_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroIdleTimeout);
        }
        Ok(())
    }
}

/// Power-on animation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BootAnimationConfig {
    /// Play the animation at all
    pub enabled: bool,
    /// LEDs the animation drives
    pub pixel_count: u16,
    /// Hold time per chase step (ms)
    pub chase_step_ms: u32,
    /// Hold time per fade step (ms)
    pub fade_step_ms: u32,
}

impl Default for BootAnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pixel_count: 50,
            chase_step_ms: 8,
            fade_step_ms: 1,
        }
    }
}

impl BootAnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.pixel_count == 0 {
            return Err(ConfigError::ZeroBootPixels);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
        assert_eq!(BootAnimationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_settle_window() {
        assert_eq!(ControllerConfig::default().settle_us(), 500);
    }

    #[test]
    fn test_rejects_zero_values() {
        let config = ControllerConfig {
            latch_ticks: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLatchTicks));

        let config = ControllerConfig {
            tick_us: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickDuration));

        let config = ControllerConfig {
            idle_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIdleTimeout));
    }

    #[test]
    fn test_disabled_timeout_is_valid() {
        let config = ControllerConfig {
            idle_timeout_ms: None,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_boot_pixels_only_checked_when_enabled() {
        let mut config = BootAnimationConfig {
            pixel_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBootPixels));

        config.enabled = false;
        assert_eq!(config.validate(), Ok(()));
    }
}
