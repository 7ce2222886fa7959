//! Beat detection and note-chart generation for a four-lane rhythm game.
//!
//! Audio goes in as mono PCM, a chart of timed lane notes comes out:
//!
//! ```text
//! samples -> energy onsets  \
//!                            -> merge -> filter -> chart
//! samples -> spectral flux  /
//! ```
//!
//! ```no_run
//! let samples = vec![0.0f32; 44100 * 5];
//! let chart = beatlane::generate_chart(&samples, 44100, 5.0, |pct: f32, msg: &str| {
//!     println!("{:>5.1}% {}", pct, msg);
//! });
//! println!("{} notes", chart.len());
//! ```

pub mod audio;
pub mod chart;
pub mod onset;
pub mod pipeline;
pub mod progress;

pub use audio::decode::{decode_audio, AudioData, DecodeError};
pub use chart::{Chart, Note, LANE_COUNT};
pub use onset::{Beat, BeatKind};
pub use pipeline::{analyze, generate_chart, generate_chart_with, PipelineOptions, PipelineReport};
pub use progress::NoProgress;
