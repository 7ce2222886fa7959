pub mod generate;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::onset::BeatKind;

pub use generate::{generate_notes, note_count, select_lanes};

/// Playable lanes, indexed `0..LANE_COUNT`.
pub const LANE_COUNT: usize = 4;

/// One note to hit: a lane at a time, plus where it came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Note {
    pub time_ms: f64,
    pub lane: u8,
    pub kind: BeatKind,
    pub intensity: f64,
}

/// Time-ordered notes for one track.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Chart {
    pub duration_ms: f64,
    notes: Vec<Note>,
}

impl Chart {
    /// Notes must already be in ascending time order.
    pub fn new(notes: Vec<Note>, duration_ms: f64) -> Self {
        debug_assert!(notes.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
        Self { duration_ms, notes }
    }

    /// Hand-written 20-note chart used before any track is analyzed.
    pub fn demo() -> Self {
        const PATTERN: [(f64, u8); 20] = [
            (1000.0, 0),
            (1500.0, 1),
            (2000.0, 2),
            (2500.0, 3),
            (3000.0, 0),
            (3200.0, 1),
            (3400.0, 2),
            (3600.0, 3),
            (4000.0, 0),
            (4000.0, 2),
            (4500.0, 1),
            (4500.0, 3),
            (5000.0, 0),
            (5200.0, 1),
            (5400.0, 2),
            (5600.0, 3),
            (6000.0, 0),
            (6000.0, 1),
            (6000.0, 2),
            (6000.0, 3),
        ];
        let notes = PATTERN
            .iter()
            .map(|&(time_ms, lane)| Note {
                time_ms,
                lane,
                kind: BeatKind::Fallback,
                intensity: 0.5,
            })
            .collect();
        Self::new(notes, 7000.0)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Note totals per source kind.
    pub fn count_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for note in &self.notes {
            *counts.entry(note.kind.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_chart_shape() {
        let chart = Chart::demo();
        assert_eq!(chart.len(), 20);
        assert!(chart.notes().windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
        assert!(chart.notes().iter().all(|n| (n.lane as usize) < LANE_COUNT));
        let finale: Vec<u8> = chart.notes()[16..].iter().map(|n| n.lane).collect();
        assert_eq!(finale, vec![0, 1, 2, 3]);
    }

    #[test]
    fn counts_by_kind() {
        let notes = vec![
            Note {
                time_ms: 0.0,
                lane: 0,
                kind: BeatKind::Energy,
                intensity: 0.2,
            },
            Note {
                time_ms: 0.0,
                lane: 1,
                kind: BeatKind::Energy,
                intensity: 0.2,
            },
            Note {
                time_ms: 9.0,
                lane: 2,
                kind: BeatKind::Spectral,
                intensity: 0.9,
            },
        ];
        let counts = Chart::new(notes, 100.0).count_by_kind();
        assert_eq!(counts.get("energy"), Some(&2));
        assert_eq!(counts.get("spectral"), Some(&1));
        assert_eq!(counts.get("fallback"), None);
    }

    #[test]
    fn serializes_notes_with_lowercase_kind() {
        let chart = Chart::new(
            vec![Note {
                time_ms: 250.0,
                lane: 3,
                kind: BeatKind::Supplementary,
                intensity: 0.3,
            }],
            1000.0,
        );
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["notes"][0]["lane"], 3);
        assert_eq!(json["notes"][0]["kind"], "supplementary");
        assert_eq!(json["duration_ms"], 1000.0);
    }
}
