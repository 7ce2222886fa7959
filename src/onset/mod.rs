//! Onset detection and beat post-processing.
//!
//! Two detectors run over the same frames, their beats are fused by
//! [`merge::merge_beats`] and then thinned or padded by
//! [`filter::filter_beats`].

pub mod energy;
pub mod filter;
pub mod merge;
pub mod spectral;

use serde::Serialize;

pub use energy::EnergyOnsetDetector;
pub use filter::filter_beats;
pub use merge::merge_beats;
pub use spectral::SpectralFluxOnsetDetector;

/// Where a beat came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BeatKind {
    Energy,
    Spectral,
    Fallback,
    Supplementary,
}

impl BeatKind {
    /// Synthesized by the filter rather than detected in the signal.
    pub fn is_synthetic(self) -> bool {
        matches!(self, BeatKind::Fallback | BeatKind::Supplementary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BeatKind::Energy => "energy",
            BeatKind::Spectral => "spectral",
            BeatKind::Fallback => "fallback",
            BeatKind::Supplementary => "supplementary",
        }
    }
}

impl std::fmt::Display for BeatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beat {
    pub time_ms: f64,
    pub intensity: f64,
    pub kind: BeatKind,
}

impl Beat {
    pub fn new(time_ms: f64, intensity: f64, kind: BeatKind) -> Self {
        Self {
            time_ms,
            intensity,
            kind,
        }
    }
}

/// Stable ascending sort by time.
pub(crate) fn sort_by_time(beats: &mut [Beat]) {
    beats.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
}
