/// Analysis window length in samples.
pub const FRAME_SIZE: usize = 1024;
/// Step between consecutive windows (50% overlap).
pub const HOP_SIZE: usize = 512;

/// One analysis window, borrowed from the caller's samples.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Index of the first sample of this frame.
    pub offset: usize,
    pub samples: &'a [f32],
}

impl Frame<'_> {
    /// Start of the frame in milliseconds.
    pub fn time_ms(&self, sample_rate: u32) -> f64 {
        self.offset as f64 / sample_rate as f64 * 1000.0
    }

    /// Root-mean-square amplitude of the whole frame.
    pub fn rms(&self) -> f64 {
        rms(self.samples)
    }
}

/// Slices a mono signal into overlapping fixed-size frames.
///
/// Frames start at offset 0 and advance by [`HOP_SIZE`]; the last frame is
/// the one for which `offset + FRAME_SIZE <= samples.len()`.
#[derive(Clone, Copy, Debug)]
pub struct FrameSource<'a> {
    samples: &'a [f32],
}

impl<'a> FrameSource<'a> {
    pub fn new(samples: &'a [f32]) -> Self {
        Self { samples }
    }

    /// Number of frames the source yields.
    pub fn len(&self) -> usize {
        if self.samples.len() < FRAME_SIZE {
            0
        } else {
            (self.samples.len() - FRAME_SIZE) / HOP_SIZE + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Frames<'a> {
        Frames {
            samples: self.samples,
            offset: 0,
        }
    }
}

impl<'a> IntoIterator for FrameSource<'a> {
    type Item = Frame<'a>;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Debug)]
pub struct Frames<'a> {
    samples: &'a [f32],
    offset: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.offset + FRAME_SIZE;
        if end > self.samples.len() {
            return None;
        }
        let frame = Frame {
            offset: self.offset,
            samples: &self.samples[self.offset..end],
        };
        self.offset += HOP_SIZE;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = FrameSource::new(&self.samples[self.offset.min(self.samples.len())..]).len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

pub(crate) fn rms(samples: &[f32]) -> f64 {
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}
