// Rolling time-series buffer behind the activity chart
use std::collections::VecDeque;

pub const DEFAULT_SERIES_CAPACITY: usize = 20;

/// Fixed-capacity sequence of samples, oldest first.
///
/// `append` is the only way to grow it; past capacity the oldest sample is evicted.
#[derive(Debug, Clone)]
pub struct RollingSeriesBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingSeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, value: f64) {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Bulk-append `count` samples pulled from `next`
    pub fn seed(&mut self, count: usize, mut next: impl FnMut() -> f64) {
        for _ in 0..count {
            self.append(next());
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Current samples, oldest first
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollingSeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SERIES_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_below_capacity() {
        let mut buffer = RollingSeriesBuffer::new(5);
        buffer.append(1.0);
        buffer.append(2.0);

        assert_eq!(buffer.snapshot(), vec![1.0, 2.0]);
        assert_eq!(buffer.latest(), Some(2.0));
    }

    #[test]
    fn test_append_keeps_most_recent_in_order() {
        for n in [0usize, 1, 4, 5, 6, 13] {
            let mut buffer = RollingSeriesBuffer::new(5);
            for i in 0..n {
                buffer.append(i as f64);
            }

            let expected: Vec<f64> = (n.saturating_sub(5)..n).map(|i| i as f64).collect();
            assert_eq!(buffer.len(), n.min(5));
            assert_eq!(buffer.snapshot(), expected);
        }
    }

    #[test]
    fn test_seed_then_append_past_capacity() {
        let mut buffer = RollingSeriesBuffer::default();
        let mut counter = 0.0;
        buffer.seed(10, || {
            counter += 1.0;
            counter
        });
        assert_eq!(buffer.len(), 10);

        for i in 11..=25 {
            buffer.append(i as f64);
        }

        let expected: Vec<f64> = (6..=25).map(|i| i as f64).collect();
        assert_eq!(buffer.len(), 20);
        assert_eq!(buffer.snapshot(), expected);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buffer = RollingSeriesBuffer::new(3);
        buffer.clear();
        assert!(buffer.is_empty());

        buffer.append(4.0);
        buffer.clear();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 3);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut buffer = RollingSeriesBuffer::new(3);
        buffer.append(1.0);
        let mut view = buffer.snapshot();
        view.push(9.0);

        assert_eq!(buffer.snapshot(), vec![1.0]);
    }

    #[test]
    fn test_zero_capacity_keeps_newest() {
        let mut buffer = RollingSeriesBuffer::new(0);
        buffer.append(1.0);
        buffer.append(2.0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot(), vec![2.0]);
    }
}
