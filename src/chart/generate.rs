use super::{Chart, Note, LANE_COUNT};
use crate::onset::{Beat, BeatKind};

/// How many simultaneous notes a beat becomes, always in `1..=LANE_COUNT`.
///
/// Synthetic beats are always single notes. Detected beats scale with
/// intensity, and strong spectral beats get one extra note.
pub fn note_count(beat: &Beat) -> usize {
    let base = match beat.kind {
        BeatKind::Fallback | BeatKind::Supplementary => 1,
        BeatKind::Energy | BeatKind::Spectral => {
            if beat.intensity > 0.8 {
                4
            } else if beat.intensity > 0.6 {
                3
            } else if beat.intensity > 0.4 {
                2
            } else {
                1
            }
        }
    };

    if beat.kind == BeatKind::Spectral && beat.intensity > 0.5 {
        (base + 1).min(LANE_COUNT)
    } else {
        base
    }
}

/// Distinct lanes for the `beat_index`-th beat, rotating the start lane.
pub fn select_lanes(num_notes: usize, beat_index: usize) -> Vec<u8> {
    let wanted = num_notes.min(LANE_COUNT);
    let mut lanes: Vec<u8> = Vec::with_capacity(wanted);

    for k in 0..wanted {
        let lane = ((beat_index + k) % LANE_COUNT) as u8;
        if !lanes.contains(&lane) {
            lanes.push(lane);
        }
    }

    // Unreachable with a rotating walk, kept so the lane count always holds.
    for lane in 0..LANE_COUNT as u8 {
        if lanes.len() >= wanted {
            break;
        }
        if !lanes.contains(&lane) {
            lanes.push(lane);
        }
    }

    lanes
}

/// Turn time-ordered beats into a chart.
pub fn generate_notes(beats: &[Beat], duration_ms: f64) -> Chart {
    let mut notes = Vec::with_capacity(beats.len() * 2);
    for (i, beat) in beats.iter().enumerate() {
        for lane in select_lanes(note_count(beat), i) {
            notes.push(Note {
                time_ms: beat.time_ms,
                lane,
                kind: beat.kind,
                intensity: beat.intensity,
            });
        }
    }
    log::debug!("Generated {} notes from {} beats", notes.len(), beats.len());
    Chart::new(notes, duration_ms)
}
