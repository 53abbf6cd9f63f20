//! Power-on animation
//!
//! A short light show played once before the control loop starts: a white
//! dot runs along the strip, then the whole strip ramps up red, fades red
//! to green, green to blue, and blue out. It talks to the strip directly
//! and never touches protocol state.

use adalink_hal::{DelayUs, SpiBus};

use crate::config::BootAnimationConfig;

/// Steps per colour fade
pub const FADE_STEPS: u16 = 255;

/// Animation phases in playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPhase {
    /// Single white pixel moving along the strip
    Chase,
    /// Whole strip ramps from black to red
    RedRise,
    /// Red crossfades to green
    RedToGreen,
    /// Green crossfades to blue
    GreenToBlue,
    /// Blue fades to black
    BlueFade,
}

impl BootPhase {
    fn next(self) -> Option<Self> {
        match self {
            BootPhase::Chase => Some(BootPhase::RedRise),
            BootPhase::RedRise => Some(BootPhase::RedToGreen),
            BootPhase::RedToGreen => Some(BootPhase::GreenToBlue),
            BootPhase::GreenToBlue => Some(BootPhase::BlueFade),
            BootPhase::BlueFade => None,
        }
    }
}

/// One displayed step of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootStep {
    pub phase: BootPhase,
    pub step: u16,
    /// How long the step stays on the strip (ms)
    pub hold_ms: u32,
}

impl BootStep {
    /// Colour of LED `index` during this step
    pub fn pixel(&self, index: u16) -> [u8; 3] {
        let level = self.step.min(FADE_STEPS - 1) as u8;
        match self.phase {
            BootPhase::Chase if index == self.step => [0xFF; 3],
            BootPhase::Chase => [0x00; 3],
            BootPhase::RedRise => [level, 0, 0],
            BootPhase::RedToGreen => [255 - level, level, 0],
            BootPhase::GreenToBlue => [0, 255 - level, level],
            BootPhase::BlueFade => [0, 0, 254 - level],
        }
    }
}

/// Iterator over every step of the animation
#[derive(Debug, Clone)]
pub struct BootAnimation {
    config: BootAnimationConfig,
    phase: Option<BootPhase>,
    step: u16,
}

impl BootAnimation {
    pub fn new(config: BootAnimationConfig) -> Self {
        let phase = if config.enabled && config.pixel_count > 0 {
            Some(BootPhase::Chase)
        } else {
            None
        };
        Self {
            config,
            phase,
            step: 0,
        }
    }

    /// Number of steps in the whole animation
    pub fn total_steps(&self) -> usize {
        if !self.config.enabled || self.config.pixel_count == 0 {
            return 0;
        }
        usize::from(self.config.pixel_count) + 4 * usize::from(FADE_STEPS)
    }

    fn phase_len(&self, phase: BootPhase) -> u16 {
        match phase {
            BootPhase::Chase => self.config.pixel_count,
            _ => FADE_STEPS,
        }
    }

    /// Write every step to the strip, holding each for its duration
    pub fn play<B: SpiBus, D: DelayUs>(self, bus: &mut B, delay: &mut D) -> Result<(), B::Error> {
        let pixel_count = self.config.pixel_count;
        for step in self {
            for index in 0..pixel_count {
                bus.write(&step.pixel(index))?;
            }
            bus.flush()?;
            delay.delay_ms(step.hold_ms);
        }
        Ok(())
    }
}

impl Iterator for BootAnimation {
    type Item = BootStep;

    fn next(&mut self) -> Option<BootStep> {
        let mut phase = self.phase?;
        while self.step >= self.phase_len(phase) {
            phase = phase.next()?;
            self.phase = Some(phase);
            self.step = 0;
        }

        let hold_ms = match phase {
            BootPhase::Chase => self.config.chase_step_ms,
            _ => self.config.fade_step_ms,
        };
        let step = BootStep {
            phase,
            step: self.step,
            hold_ms,
        };
        self.step += 1;
        Some(step)
    }
}
