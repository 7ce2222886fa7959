//! End-to-end beat detection and chart generation.

use crate::chart::{generate_notes, Chart};
use crate::onset::filter::{filter_beats_detailed, Padding};
use crate::onset::{merge_beats, EnergyOnsetDetector, SpectralFluxOnsetDetector};
use crate::progress::{self, NoProgress, ProgressSink, ENERGY_PASS, SPECTRAL_PASS};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Run both detectors at once on the rayon pool. Output is unchanged,
    /// but per-frame progress inside the passes is not reported.
    pub parallel_detectors: bool,
}

/// Stage-by-stage counts from one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    pub energy_beats: usize,
    pub spectral_beats: usize,
    pub merged_beats: usize,
    /// Detected beats that survived minimum spacing.
    pub kept_beats: usize,
    /// Beats handed to the chart generator, synthetic ones included.
    pub final_beats: usize,
    pub padding: Padding,
    pub notes: usize,
}

/// Build a chart from mono samples with default options.
///
/// `progress` receives `(percent, message)` from 30 ("Analyzing beats...")
/// through 100 ("Complete!"), never decreasing.
pub fn generate_chart(
    samples: &[f32],
    sample_rate: u32,
    duration_secs: f64,
    mut progress: impl ProgressSink,
) -> Chart {
    analyze(
        samples,
        sample_rate,
        duration_secs,
        PipelineOptions::default(),
        &mut progress,
    )
    .0
}

pub fn generate_chart_with(
    samples: &[f32],
    sample_rate: u32,
    duration_secs: f64,
    options: PipelineOptions,
    mut progress: impl ProgressSink,
) -> Chart {
    analyze(samples, sample_rate, duration_secs, options, &mut progress).0
}

/// Run the full pipeline and return the chart along with stage counts.
pub fn analyze(
    samples: &[f32],
    sample_rate: u32,
    duration_secs: f64,
    options: PipelineOptions,
    sink: &mut dyn ProgressSink,
) -> (Chart, PipelineReport) {
    let duration_ms = duration_secs * 1000.0;

    log::info!(
        "Audio info: {:.2}s, {}Hz, {} samples",
        duration_secs,
        sample_rate,
        samples.len()
    );
    progress::ANALYZING.emit(sink);

    let (energy, spectral) = if options.parallel_detectors {
        ENERGY_PASS.begin(sink);
        SPECTRAL_PASS.begin(sink);
        rayon::join(
            || EnergyOnsetDetector::new().detect(samples, sample_rate, &mut NoProgress),
            || SpectralFluxOnsetDetector::new().detect(samples, sample_rate, &mut NoProgress),
        )
    } else {
        ENERGY_PASS.begin(sink);
        let energy = EnergyOnsetDetector::new().detect(samples, sample_rate, sink);
        SPECTRAL_PASS.begin(sink);
        let spectral = SpectralFluxOnsetDetector::new().detect(samples, sample_rate, sink);
        (energy, spectral)
    };
    let energy_beats = energy.len();
    let spectral_beats = spectral.len();

    progress::COMBINING.emit(sink);
    let merged = merge_beats(energy, spectral);
    let merged_beats = merged.len();

    progress::FILTERING.emit(sink);
    log::info!(
        "Detected {} energy beats, {} spectral beats",
        energy_beats,
        spectral_beats
    );
    log::info!("Combined: {} beats", merged_beats);
    let filtered = filter_beats_detailed(merged, duration_ms);
    log::info!(
        "Filtered beats: {} (from {} raw beats)",
        filtered.beats.len(),
        merged_beats
    );

    progress::GENERATING.emit(sink);
    let chart = generate_notes(&filtered.beats, duration_ms);
    log::info!("Generated {} notes total", chart.len());
    progress::COMPLETE.emit(sink);

    let report = PipelineReport {
        energy_beats,
        spectral_beats,
        merged_beats,
        kept_beats: filtered.kept,
        final_beats: filtered.beats.len(),
        padding: filtered.padding,
        notes: chart.len(),
    };
    (chart, report)
}
