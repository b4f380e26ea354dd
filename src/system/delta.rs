//! Turns consecutive counter snapshots into rates.
//!
//! Each tracker holds the previous sample and replaces it after every update,
//! whatever the outcome. A wrapped or reset counter therefore costs exactly one
//! zero reading before the next tick measures from the new baseline.

use std::time::Instant;

use tracing::debug;

use super::counters::{CpuSample, CpuTimes, NetworkSample};

/// Busy share of the interval between two cpu samples, in `[0, 100]`.
///
/// A non-positive total delta (idle interval, counter reset) yields `0.0`.
pub fn usage_percent(previous: CpuSample, current: CpuSample) -> f32 {
    let total = current.total as i128 - previous.total as i128;
    if total < 0 {
        debug!(
            previous = previous.total,
            current = current.total,
            "cpu counters went backwards"
        );
        return 0.0;
    }
    if total == 0 {
        return 0.0;
    }
    let active = current.active as i128 - previous.active as i128;
    let percent = active as f64 * 100.0 / total as f64;
    percent.clamp(0.0, 100.0) as f32
}

/// Cpu usage computed for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuUsage {
    pub aggregate: f32,
    pub per_core: Vec<f32>,
    /// Aggregate tick delta, used to scale per-process cpu time.
    pub total_delta: u64,
}

#[derive(Debug, Default)]
pub struct CpuTracker {
    aggregate: Option<CpuSample>,
    cores: Vec<Option<CpuSample>>,
}

impl CpuTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, times: &CpuTimes) -> CpuUsage {
        let (aggregate, total_delta) = match (self.aggregate, times.aggregate) {
            (Some(previous), Some(current)) => (
                usage_percent(previous, current),
                current.total.saturating_sub(previous.total),
            ),
            _ => (0.0, 0),
        };
        self.aggregate = times.aggregate;

        // the core table only grows, so a core that drops out keeps its slot.
        if self.cores.len() < times.cores.len() {
            self.cores.resize(times.cores.len(), None);
        }

        let per_core = self
            .cores
            .iter_mut()
            .enumerate()
            .map(|(id, slot)| {
                let current = times.cores.get(id).copied().flatten();
                let percent = match (*slot, current) {
                    (Some(previous), Some(current)) => usage_percent(previous, current),
                    _ => 0.0,
                };
                *slot = current;
                percent
            })
            .collect();

        CpuUsage {
            aggregate,
            per_core,
            total_delta,
        }
    }
}

/// Bytes per second in each direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Throughput {
    pub rx_per_sec: f64,
    pub tx_per_sec: f64,
}

#[derive(Debug, Default)]
pub struct NetworkRate {
    last: Option<(NetworkSample, Instant)>,
    rate: Throughput,
}

impl NetworkRate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes throughput since the previous sample.
    ///
    /// When no time has passed the previous rate is repeated rather than
    /// dividing by zero. An unavailable source resets the baseline.
    pub fn update(&mut self, sample: Option<NetworkSample>, now: Instant) -> Throughput {
        let Some(sample) = sample else {
            self.last = None;
            self.rate = Throughput::default();
            return self.rate;
        };

        if let Some((previous, at)) = self.last {
            let elapsed = now.saturating_duration_since(at).as_secs_f64();
            if elapsed > 0.0 {
                self.rate = Throughput {
                    rx_per_sec: per_second(previous.rx_bytes, sample.rx_bytes, elapsed),
                    tx_per_sec: per_second(previous.tx_bytes, sample.tx_bytes, elapsed),
                };
            } else {
                debug!("no time elapsed since last network sample, repeating rate");
            }
        } else {
            self.rate = Throughput::default();
        }

        self.last = Some((sample, now));
        self.rate
    }
}

fn per_second(previous: u64, current: u64, elapsed: f64) -> f64 {
    match current.checked_sub(previous) {
        Some(delta) => delta as f64 / elapsed,
        None => {
            debug!(previous, current, "network counter decreased");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn debug_output(run: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        let bytes = captured.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn sample(total: u64, active: u64) -> CpuSample {
        CpuSample { total, active }
    }

    fn times(aggregate: CpuSample, cores: &[Option<CpuSample>]) -> CpuTimes {
        CpuTimes {
            aggregate: Some(aggregate),
            cores: cores.to_vec(),
        }
    }

    fn net(rx: u64, tx: u64) -> NetworkSample {
        NetworkSample {
            rx_bytes: rx,
            tx_bytes: tx,
            interfaces: 1,
        }
    }

    #[test]
    fn usage_is_active_share_of_total_delta() {
        assert_eq!(usage_percent(sample(1000, 200), sample(1200, 280)), 40.0);
    }

    #[test]
    fn usage_is_zero_when_counters_go_backwards() {
        assert_eq!(usage_percent(sample(1000, 400), sample(10, 4)), 0.0);
        assert_eq!(usage_percent(sample(1000, 400), sample(1000, 400)), 0.0);
    }

    #[test]
    fn counter_anomalies_are_logged() {
        let output = debug_output(|| {
            let mut cpu = CpuTracker::new();
            cpu.update(&times(sample(1000, 400), &[]));
            assert_eq!(cpu.update(&times(sample(10, 4), &[])).aggregate, 0.0);

            let start = Instant::now();
            let mut rate = NetworkRate::new();
            rate.update(Some(net(1000, 1000)), start);
            let later = start + Duration::from_secs(1);
            rate.update(Some(net(10, 2000)), later);
            rate.update(Some(net(20, 3000)), later);
        });

        assert!(output.contains("cpu counters went backwards"), "{output}");
        assert!(output.contains("network counter decreased"), "{output}");
        assert!(output.contains("no time elapsed"), "{output}");
    }

    #[test]
    fn steady_counters_log_nothing() {
        let output = debug_output(|| {
            let mut cpu = CpuTracker::new();
            cpu.update(&times(sample(1000, 400), &[]));
            cpu.update(&times(sample(1100, 440), &[]));
        });
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn usage_is_clamped() {
        assert_eq!(usage_percent(sample(100, 0), sample(200, 500)), 100.0);
        assert_eq!(usage_percent(sample(100, 90), sample(200, 10)), 0.0);
    }

    #[test]
    fn first_tick_reports_zero_then_measures() {
        let mut tracker = CpuTracker::new();
        let first = tracker.update(&times(sample(1000, 400), &[]));
        assert_eq!(first.aggregate, 0.0);
        assert_eq!(first.total_delta, 0);

        let second = tracker.update(&times(sample(1100, 440), &[]));
        assert_eq!(second.aggregate, 40.0);
        assert_eq!(second.total_delta, 100);
    }

    #[test]
    fn reset_costs_one_zero_reading() {
        let mut tracker = CpuTracker::new();
        tracker.update(&times(sample(1000, 400), &[]));
        assert_eq!(tracker.update(&times(sample(50, 20), &[])).aggregate, 0.0);
        assert_eq!(tracker.update(&times(sample(150, 70), &[])).aggregate, 50.0);
    }

    #[test]
    fn unavailable_aggregate_reports_zero() {
        let mut tracker = CpuTracker::new();
        tracker.update(&times(sample(1000, 400), &[]));
        let usage = tracker.update(&CpuTimes::default());
        assert_eq!(usage.aggregate, 0.0);
        assert_eq!(usage.total_delta, 0);
    }

    #[test]
    fn core_table_grows_and_keeps_departed_slots() {
        let mut tracker = CpuTracker::new();
        let one = Some(sample(100, 50));
        tracker.update(&times(sample(100, 50), &[one]));

        let grown = tracker.update(&times(
            sample(200, 100),
            &[Some(sample(200, 150)), Some(sample(100, 10))],
        ));
        assert_eq!(grown.per_core, vec![100.0, 0.0]);

        let shrunk = tracker.update(&times(sample(300, 150), &[Some(sample(300, 175))]));
        assert_eq!(shrunk.per_core.len(), 2);
        assert_eq!(shrunk.per_core, vec![25.0, 0.0]);
    }

    #[test]
    fn returning_core_starts_from_a_fresh_baseline() {
        let mut tracker = CpuTracker::new();
        let both = |a: u64, b: u64| [Some(sample(a, a / 2)), Some(sample(b, b / 2))];
        tracker.update(&times(sample(0, 0), &both(100, 100)));
        tracker.update(&times(sample(0, 0), &[Some(sample(200, 100)), None]));

        let back = tracker.update(&times(sample(0, 0), &both(300, 300)));
        assert_eq!(back.per_core[1], 0.0);
        let next = tracker.update(&times(sample(0, 0), &both(400, 400)));
        assert_eq!(next.per_core[1], 50.0);
    }

    #[test]
    fn network_rate_divides_by_elapsed_seconds() {
        let start = Instant::now();
        let mut rate = NetworkRate::new();
        assert_eq!(rate.update(Some(net(1000, 500)), start), Throughput::default());

        let later = start + Duration::from_secs(2);
        let throughput = rate.update(Some(net(3000, 1500)), later);
        assert_eq!(throughput.rx_per_sec, 1000.0);
        assert_eq!(throughput.tx_per_sec, 500.0);
    }

    #[test]
    fn network_rate_repeats_previous_when_no_time_passed() {
        let start = Instant::now();
        let mut rate = NetworkRate::new();
        rate.update(Some(net(0, 0)), start);
        let later = start + Duration::from_secs(1);
        rate.update(Some(net(100, 100)), later);

        let repeated = rate.update(Some(net(900, 900)), later);
        assert_eq!(repeated.rx_per_sec, 100.0);
        assert_eq!(repeated.tx_per_sec, 100.0);
    }

    #[test]
    fn network_counter_decrease_zeroes_that_direction_only() {
        let start = Instant::now();
        let mut rate = NetworkRate::new();
        rate.update(Some(net(1000, 1000)), start);
        let throughput = rate.update(Some(net(10, 2000)), start + Duration::from_secs(1));
        assert_eq!(throughput.rx_per_sec, 0.0);
        assert_eq!(throughput.tx_per_sec, 1000.0);
    }

    #[test]
    fn unavailable_network_resets_the_baseline() {
        let start = Instant::now();
        let mut rate = NetworkRate::new();
        rate.update(Some(net(0, 0)), start);
        rate.update(Some(net(100, 100)), start + Duration::from_secs(1));

        assert_eq!(rate.update(None, start + Duration::from_secs(2)), Throughput::default());
        let after = rate.update(Some(net(5000, 5000)), start + Duration::from_secs(3));
        assert_eq!(after, Throughput::default());
    }
}
