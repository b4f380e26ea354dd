use std::collections::VecDeque;

use super::snapshot::TickView;

const DEFAULT_CAPACITY: usize = 60;

/// Fixed-length trail of one metric, oldest first.
#[derive(Debug, Clone)]
pub struct Series {
    values: VecDeque<u64>,
    capacity: usize,
}

impl Series {
    fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, value: u64) {
        if self.capacity == 0 {
            return;
        }
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// The newest `width` values, oldest first, ready for a sparkline.
    pub fn tail(&self, width: usize) -> Vec<u64> {
        let skip = self.values.len().saturating_sub(width);
        self.values.iter().skip(skip).copied().collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

/// Sparkline history for the current run. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct SeriesHistory {
    /// Aggregate cpu percent, rounded.
    pub cpu: Series,
    /// Receive rate, bytes per second.
    pub rx: Series,
    /// Transmit rate, bytes per second.
    pub tx: Series,
}

impl SeriesHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            cpu: Series::new(capacity),
            rx: Series::new(capacity),
            tx: Series::new(capacity),
        }
    }

    pub fn record(&mut self, view: &TickView) {
        self.cpu.push(view.cpu.aggregate_percent.round() as u64);
        let (rx, tx) = view
            .network
            .map_or((0.0, 0.0), |n| (n.rx_per_sec, n.tx_per_sec));
        self.rx.push(rx.round() as u64);
        self.tx.push(tx.round() as u64);
    }
}

impl Default for SeriesHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
