//! Spacing enforcement and synthetic beat generation.
//!
//! Detected beats are thinned to at least [`MIN_SPACING_MS`] apart. When
//! nothing survives, an evenly spaced fallback grid replaces them; when
//! only a handful survive, supplementary beats fill the gaps. The padded
//! result is re-sorted but not run through the spacing pass again.

use super::{sort_by_time, Beat, BeatKind};

pub const MIN_SPACING_MS: f64 = 150.0;
pub const MAX_BEATS: usize = 300;
/// Below this many kept beats the gaps are padded.
pub const SPARSE_THRESHOLD: usize = 10;

pub const FALLBACK_START_MS: f64 = 1000.0;
pub const FALLBACK_INTERVAL_MS: f64 = 500.0;
pub const FALLBACK_INTENSITY: f64 = 0.5;
/// Fallback beats stop this far before the end of the track.
pub const FALLBACK_TAIL_MS: f64 = 1000.0;

pub const SUPPLEMENT_START_MS: f64 = 500.0;
pub const SUPPLEMENT_TAIL_MS: f64 = 500.0;
pub const SUPPLEMENT_INTENSITY: f64 = 0.3;
/// Interval used when only one beat survived.
pub const SUPPLEMENT_DEFAULT_INTERVAL_MS: f64 = 600.0;
pub const SUPPLEMENT_MIN_INTERVAL_MS: f64 = 300.0;
pub const SUPPLEMENT_MAX_INTERVAL_MS: f64 = 800.0;
/// A grid position this close to an existing beat is skipped.
pub const SUPPLEMENT_CLEARANCE_MS: f64 = 200.0;

/// How the filter padded its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Padding {
    None,
    /// Nothing survived; the output is entirely fallback beats.
    Fallback,
    /// This many supplementary beats were added.
    Supplementary(usize),
}

#[derive(Clone, Debug)]
pub struct FilteredBeats {
    pub beats: Vec<Beat>,
    /// Detected beats that survived the spacing pass.
    pub kept: usize,
    pub padding: Padding,
}

pub fn filter_beats(beats: Vec<Beat>, duration_ms: f64) -> Vec<Beat> {
    filter_beats_detailed(beats, duration_ms).beats
}

pub fn filter_beats_detailed(mut beats: Vec<Beat>, duration_ms: f64) -> FilteredBeats {
    sort_by_time(&mut beats);

    let mut kept: Vec<Beat> = Vec::with_capacity(beats.len());
    let mut last_time = -MIN_SPACING_MS;
    for beat in beats {
        if beat.time_ms - last_time >= MIN_SPACING_MS {
            last_time = beat.time_ms;
            kept.push(beat);
        }
    }
    let kept_count = kept.len();

    let padding = if kept.is_empty() {
        log::warn!("No beats detected, generating fallback pattern");
        kept = fallback_beats(duration_ms);
        Padding::Fallback
    } else if kept.len() < SPARSE_THRESHOLD {
        log::warn!("Very few beats detected ({}), adding supplementary pattern", kept.len());
        let supplementary = supplementary_beats(&kept, duration_ms);
        let added = supplementary.len();
        kept.extend(supplementary);
        sort_by_time(&mut kept);
        Padding::Supplementary(added)
    } else {
        Padding::None
    };

    kept.truncate(MAX_BEATS);

    FilteredBeats {
        beats: kept,
        kept: kept_count,
        padding,
    }
}

/// Evenly spaced placeholder beats for tracks with no detectable onsets.
pub fn fallback_beats(duration_ms: f64) -> Vec<Beat> {
    let end = duration_ms - FALLBACK_TAIL_MS;
    let mut beats = Vec::new();
    let mut time = FALLBACK_START_MS;
    while time < end {
        beats.push(Beat::new(time, FALLBACK_INTENSITY, BeatKind::Fallback));
        time += FALLBACK_INTERVAL_MS;
    }
    log::debug!("Generated {} fallback beats", beats.len());
    beats
}

/// Grid beats at the existing beats' average spacing, skipping positions
/// that already have a beat nearby. `existing` must be time-sorted.
pub fn supplementary_beats(existing: &[Beat], duration_ms: f64) -> Vec<Beat> {
    let (first, last) = match (existing.first(), existing.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return fallback_beats(duration_ms),
    };

    let average = if existing.len() > 1 {
        (last.time_ms - first.time_ms) / (existing.len() - 1) as f64
    } else {
        SUPPLEMENT_DEFAULT_INTERVAL_MS
    };
    let interval = average.clamp(SUPPLEMENT_MIN_INTERVAL_MS, SUPPLEMENT_MAX_INTERVAL_MS);

    let end = duration_ms - SUPPLEMENT_TAIL_MS;
    let mut beats = Vec::new();
    let mut time = SUPPLEMENT_START_MS;
    while time < end {
        let occupied = existing
            .iter()
            .any(|b| (b.time_ms - time).abs() < SUPPLEMENT_CLEARANCE_MS);
        if !occupied {
            beats.push(Beat::new(time, SUPPLEMENT_INTENSITY, BeatKind::Supplementary));
        }
        time += interval;
    }
    log::debug!(
        "Generated {} supplementary beats at {:.1} ms spacing",
        beats.len(),
        interval
    );
    beats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy(time_ms: f64) -> Beat {
        Beat::new(time_ms, 0.5, BeatKind::Energy)
    }

    fn times(beats: &[Beat]) -> Vec<f64> {
        beats.iter().map(|b| b.time_ms).collect()
    }

    #[test]
    fn empty_input_falls_back() {
        let out = filter_beats_detailed(Vec::new(), 5000.0);
        assert_eq!(out.padding, Padding::Fallback);
        assert_eq!(out.kept, 0);
        assert_eq!(
            times(&out.beats),
            vec![1000.0, 1500.0, 2000.0, 2500.0, 3000.0, 3500.0]
        );
        assert!(out
            .beats
            .iter()
            .all(|b| b.kind == BeatKind::Fallback && b.intensity == FALLBACK_INTENSITY));
        assert_eq!(out.beats, fallback_beats(5000.0));
    }

    #[test]
    fn fallback_on_very_short_track_is_empty() {
        assert!(fallback_beats(1500.0).is_empty());
        assert!(fallback_beats(0.0).is_empty());
    }

    #[test]
    fn first_beat_at_zero_is_kept() {
        let beats: Vec<Beat> = (0..20).map(|i| energy(i as f64 * 200.0)).collect();
        let out = filter_beats(beats, 10_000.0);
        assert_eq!(out[0].time_ms, 0.0);
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn enforces_min_spacing() {
        let beats: Vec<Beat> = (0..100).map(|i| energy(i as f64 * 60.0)).collect();
        let out = filter_beats_detailed(beats, 10_000.0);
        assert_eq!(out.padding, Padding::None);
        assert!(out
            .beats
            .windows(2)
            .all(|w| w[1].time_ms - w[0].time_ms >= MIN_SPACING_MS));
        // 0, 180, 360, ... every third beat survives
        assert_eq!(out.beats[1].time_ms, 180.0);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let beats: Vec<Beat> = (0..12).rev().map(|i| energy(i as f64 * 300.0)).collect();
        let out = filter_beats(beats, 10_000.0);
        assert!(out.windows(2).all(|w| w[0].time_ms < w[1].time_ms));
    }

    #[test]
    fn single_beat_supplements_at_default_interval() {
        let out = filter_beats_detailed(vec![energy(1200.0)], 4000.0);
        // grid 500, 1100, 1700, 2300, 2900, 3500 (stops before 3500)
        // 1100 is within 200 ms of 1200 and is skipped.
        let supp: Vec<f64> = out
            .beats
            .iter()
            .filter(|b| b.kind == BeatKind::Supplementary)
            .map(|b| b.time_ms)
            .collect();
        assert_eq!(supp, vec![500.0, 1700.0, 2300.0, 2900.0]);
        assert_eq!(out.padding, Padding::Supplementary(4));
        assert_eq!(out.kept, 1);
        assert!(out.beats.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
    }

    #[test]
    fn supplementary_interval_is_clamped() {
        // Average spacing 2000 ms clamps to 800 ms.
        let existing = vec![energy(1000.0), energy(3000.0), energy(5000.0)];
        let supp = supplementary_beats(&existing, 6000.0);
        let t = times(&supp);
        assert_eq!(t, vec![500.0, 1300.0, 2100.0, 3700.0, 4500.0, 5300.0]);
        assert!(supp.iter().all(|b| b.intensity == SUPPLEMENT_INTENSITY));

        // Average spacing 160 ms clamps to 300 ms.
        let tight = vec![energy(0.0), energy(160.0), energy(320.0)];
        let supp = supplementary_beats(&tight, 2000.0);
        assert_eq!(times(&supp), vec![800.0, 1100.0, 1400.0]);
    }

    #[test]
    fn supplementary_beats_keep_clear_of_detected_ones() {
        let existing = vec![energy(720.0), energy(1900.0)];
        let out = filter_beats(existing, 5000.0);
        let detected: Vec<f64> = out
            .iter()
            .filter(|b| !b.kind.is_synthetic())
            .map(|b| b.time_ms)
            .collect();
        assert_eq!(detected, vec![720.0, 1900.0]);
        for b in out.iter().filter(|b| b.kind == BeatKind::Supplementary) {
            assert!(detected
                .iter()
                .all(|d| (d - b.time_ms).abs() >= SUPPLEMENT_CLEARANCE_MS));
        }
        assert_eq!(out[0].time_ms, 500.0);
    }

    #[test]
    fn caps_at_max_beats() {
        let beats: Vec<Beat> = (0..1000).map(|i| energy(i as f64 * 200.0)).collect();
        let out = filter_beats(beats, 300_000.0);
        assert_eq!(out.len(), MAX_BEATS);
        assert_eq!(out.last().map(|b| b.time_ms), Some(299.0 * 200.0));
    }
}
