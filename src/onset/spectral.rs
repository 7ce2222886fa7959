//! Positive band-energy flux onsets.
//!
//! The "spectrum" here is a block-energy approximation: the frame is cut
//! into [`BANDS`] contiguous runs of samples and each run's RMS is one band.
//! No frequency transform is involved.

use super::{Beat, BeatKind};
use crate::audio::frames::{rms, FrameSource, FRAME_SIZE};
use crate::audio::window::RollingWindow;
use crate::progress::{ProgressSink, SPECTRAL_PASS};

pub const BANDS: usize = 32;
pub const HISTORY_SIZE: usize = 15;
/// Multiple of the mean flux an onset must exceed.
pub const THRESHOLD_RATIO: f64 = 1.6;
pub const MIN_FLUX: f64 = 0.005;

const SAMPLES_PER_BAND: usize = FRAME_SIZE / BANDS;

/// Per-band RMS of one frame.
pub fn coarse_spectrum(frame: &[f32]) -> [f64; BANDS] {
    let mut spectrum = [0.0; BANDS];
    for (band, chunk) in spectrum.iter_mut().zip(frame.chunks(SAMPLES_PER_BAND)) {
        *band = rms(chunk);
    }
    spectrum
}

/// Sum of per-band increases; decreases contribute nothing.
pub fn positive_flux(current: &[f64; BANDS], previous: &[f64; BANDS]) -> f64 {
    current
        .iter()
        .zip(previous.iter())
        .map(|(cur, prev)| (cur - prev).max(0.0))
        .sum()
}

#[derive(Clone, Debug)]
pub struct SpectralFluxOnsetDetector {
    previous: [f64; BANDS],
    history: RollingWindow,
}

impl Default for SpectralFluxOnsetDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralFluxOnsetDetector {
    pub fn new() -> Self {
        Self {
            previous: [0.0; BANDS],
            history: RollingWindow::with_capacity(HISTORY_SIZE),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Feed one frame; returns the flux if the frame is an onset.
    pub fn push(&mut self, frame: &[f32]) -> Option<f64> {
        let spectrum = coarse_spectrum(frame);
        let flux = positive_flux(&spectrum, &self.previous);
        self.history.push(flux);
        // Updated whether or not this frame is an onset.
        self.previous = spectrum;

        if !self.history.is_full() {
            return None;
        }
        let threshold = self.history.mean() * THRESHOLD_RATIO;
        (flux > threshold && flux > MIN_FLUX).then_some(flux)
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
            if let Some(flux) = self.push(frame.samples) {
                beats.push(Beat::new(frame.time_ms(sample_rate), flux, BeatKind::Spectral));
            }
            SPECTRAL_PASS.checkpoint(progress, i + 1, total);
        }

        log::debug!("Spectral pass: {} frames, {} onsets", total, beats.len());
        beats
    }
}
