/// Fixed-capacity FIFO of recent values.
///
/// Pushing into a full window evicts the oldest value in O(1). Mean and
/// variance are computed fresh over the buffer, oldest value first, so a
/// window of identical values always has exactly zero spread no matter how
/// many values have passed through it.
#[derive(Clone, Debug)]
pub struct RollingWindow {
    buf: Vec<f64>,
    capacity: usize,
    head: usize,
}

impl RollingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling window capacity must be non-zero");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.buf.len() < self.capacity {
            self.buf.push(value);
        } else {
            self.buf[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.buf.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    pub fn mean(&self) -> f64 {
        if self.buf.is_empty() {
            return 0.0;
        }
        self.iter().sum::<f64>() / self.buf.len() as f64
    }

    /// Population variance, summed around the mean.
    pub fn variance(&self) -> f64 {
        if self.buf.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        self.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / self.buf.len() as f64
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut w = RollingWindow::with_capacity(3);
        for i in 0..100 {
            w.push(i as f64);
            assert!(w.len() <= 3);
        }
        assert!(w.is_full());
    }

    #[test]
    fn evicts_oldest() {
        let mut w = RollingWindow::with_capacity(3);
        for v in [1.0, 2.0, 3.0, 10.0] {
            w.push(v);
        }
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 10.0]);
        assert_eq!(w.mean(), 5.0);
    }

    #[test]
    fn population_variance() {
        let mut w = RollingWindow::with_capacity(8);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            w.push(v);
        }
        assert_eq!(w.mean(), 5.0);
        assert_eq!(w.variance(), 4.0);
        assert_eq!(w.std_dev(), 2.0);
    }

    #[test]
    fn steady_values_after_varied_ones_have_zero_spread() {
        let mut w = RollingWindow::with_capacity(30);
        let mut state: u32 = 7;
        for _ in 0..5000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            w.push((state >> 8) as f64 / (1u32 << 24) as f64 * 0.4);
        }
        for _ in 0..30 {
            w.push(0.05);
        }
        assert!(w.variance() < 1e-30);
        // A steady value never clears its own threshold.
        assert!(w.mean() + w.std_dev() * 1.3 >= 0.05);
    }

    #[test]
    fn matches_recomputed_stats_exactly() {
        let mut w = RollingWindow::with_capacity(15);
        let values: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 / 100.0).collect();
        for (i, &v) in values.iter().enumerate() {
            w.push(v);
            let start = (i + 1).saturating_sub(15);
            let tail = &values[start..=i];
            let n = tail.len() as f64;
            let mean = tail.iter().sum::<f64>() / n;
            let var = tail.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            assert_eq!(w.mean(), mean);
            assert_eq!(w.variance(), var);
        }
    }
}
