//! RMS energy onsets with a mean + 1.3σ adaptive threshold.

use super::{Beat, BeatKind};
use crate::audio::frames::FrameSource;
use crate::audio::window::RollingWindow;
use crate::progress::{ProgressSink, ENERGY_PASS};

/// Frames of energy history the threshold is computed over.
pub const HISTORY_SIZE: usize = 30;
/// Standard deviations above the mean an onset must clear.
pub const SENSITIVITY: f64 = 1.3;
/// Absolute energy floor; keeps near-silence from triggering.
pub const MIN_ENERGY: f64 = 0.008;

#[derive(Clone, Debug)]
pub struct EnergyOnsetDetector {
    history: RollingWindow,
}

impl Default for EnergyOnsetDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyOnsetDetector {
    pub fn new() -> Self {
        Self {
            history: RollingWindow::with_capacity(HISTORY_SIZE),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Feed one frame's energy; returns true if it is an onset.
    ///
    /// The value joins the history before the threshold is evaluated.
    pub fn push(&mut self, energy: f64) -> bool {
        self.history.push(energy);
        if !self.history.is_full() {
            return false;
        }
        let threshold = self.history.mean() + self.history.std_dev() * SENSITIVITY;
        energy > threshold && energy > MIN_ENERGY
    }

    pub fn detect(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
        progress: &mut dyn ProgressSink,
    ) -> Vec<Beat> {
        let source = FrameSource::new(samples);
        let total = source.len();
        let mut beats = Vec::new();

        for (i, frame) in source.iter().enumerate() {
            let energy = frame.rms();
            if self.push(energy) {
                beats.push(Beat::new(frame.time_ms(sample_rate), energy, BeatKind::Energy));
            }
            ENERGY_PASS.checkpoint(progress, i + 1, total);
        }

        log::debug!("Energy pass: {} frames, {} onsets", total, beats.len());
        beats
    }
}
