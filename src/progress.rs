//! Progress reporting shared by the pipeline and its host.
//!
//! Hosts receive `(percentage, message)` pairs in non-decreasing percentage
//! order. The fixed milestones below are what progress-bar consumers key on,
//! so their values must not move.

/// Receiver for pipeline progress.
pub trait ProgressSink {
    fn report(&mut self, percent: f32, message: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(f32, &str),
{
    fn report(&mut self, percent: f32, message: &str) {
        self(percent, message)
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: f32, _message: &str) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Milestone {
    pub percent: f32,
    pub message: &'static str,
}

impl Milestone {
    const fn new(percent: f32, message: &'static str) -> Self {
        Self { percent, message }
    }

    pub fn emit(&self, sink: &mut dyn ProgressSink) {
        sink.report(self.percent, self.message);
    }
}

pub const STARTING: Milestone = Milestone::new(0.0, "Starting...");
pub const READING_FILE: Milestone = Milestone::new(10.0, "Reading file...");
pub const DECODING: Milestone = Milestone::new(20.0, "Decoding audio...");
pub const ANALYZING: Milestone = Milestone::new(30.0, "Analyzing beats...");
pub const COMBINING: Milestone = Milestone::new(75.0, "Combining beats...");
pub const FILTERING: Milestone = Milestone::new(85.0, "Filtering beats...");
pub const GENERATING: Milestone = Milestone::new(90.0, "Generating notes...");
pub const COMPLETE: Milestone = Milestone::new(100.0, "Complete!");

/// Frames processed between two in-pass progress reports.
pub const REPORT_INTERVAL: usize = 200;

/// Percentage range covered by one detector pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSpan {
    pub start: f32,
    pub end: f32,
    pub message: &'static str,
}

pub const ENERGY_PASS: PassSpan = PassSpan {
    start: 35.0,
    end: 50.0,
    message: "Energy analysis...",
};

pub const SPECTRAL_PASS: PassSpan = PassSpan {
    start: 55.0,
    end: 70.0,
    message: "Spectral analysis...",
};

impl PassSpan {
    pub fn begin(&self, sink: &mut dyn ProgressSink) {
        sink.report(self.start, self.message);
    }

    /// Percentage after `done` of `total` frames, clamped to the span.
    pub fn at(&self, done: usize, total: usize) -> f32 {
        if total == 0 {
            return self.end;
        }
        let frac = done as f32 / total as f32;
        (self.start + frac * (self.end - self.start)).min(self.end)
    }

    /// Report if `done` falls on a reporting checkpoint.
    pub fn checkpoint(&self, sink: &mut dyn ProgressSink, done: usize, total: usize) {
        if done % REPORT_INTERVAL == 0 {
            sink.report(self.at(done, total), self.message);
        }
    }
}
