use tracing::debug;

use super::clock::{Clock, MonotonicClock};
use super::counters::MountFilter;
use super::delta::{CpuTracker, NetworkRate};
use super::platform::{CounterSource, NativeSource};
use super::snapshot::{CpuView, MemoryView, NetworkView, TickView};
use super::tracker::{ProcessTracker, rank};

const DEFAULT_TOP_PROCESSES: usize = 10;

type MountPredicate = Box<dyn Fn(&str) -> bool + Send>;

/// Runs one sampling tick: read counters, difference them, build a view.
///
/// The collector owns every piece of previous-sample state, so a tick is a
/// single `&mut self` call and can never interleave with another.
pub struct Collector<S = NativeSource, C = MonotonicClock> {
    source: S,
    clock: C,
    include_mount: MountPredicate,
    top_processes: usize,
    cpu: CpuTracker,
    network: NetworkRate,
    processes: ProcessTracker,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Self::with_source(NativeSource::default(), MonotonicClock)
    }
}

impl<S: CounterSource, C: Clock> Collector<S, C> {
    pub fn with_source(source: S, clock: C) -> Self {
        let filter = MountFilter::standard();
        Collector {
            source,
            clock,
            include_mount: Box::new(move |mount: &str| filter.matches(mount)),
            top_processes: DEFAULT_TOP_PROCESSES,
            cpu: CpuTracker::new(),
            network: NetworkRate::new(),
            processes: ProcessTracker::new(),
        }
    }

    pub fn top_processes(mut self, limit: usize) -> Self {
        self.top_processes = limit;
        self
    }

    pub fn mount_filter(mut self, include: impl Fn(&str) -> bool + Send + 'static) -> Self {
        self.include_mount = Box::new(include);
        self
    }

    pub fn refresh(&mut self) -> TickView {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let times = self.source.cpu_times();
        let cpu = self.cpu.update(&times);

        let network_sample = self.source.network();
        let throughput = self.network.update(network_sample, self.clock.now());

        let samples = self.source.processes();
        let process_count = samples.len();
        let tracked = self
            .processes
            .update(samples, cpu.total_delta, times.core_count());
        if !tracked.departed.is_empty() {
            debug!(count = tracked.departed.len(), "processes exited");
        }

        let memory = self.source.memory();

        TickView {
            host: self.source.host(),
            cpu: CpuView {
                aggregate_percent: cpu.aggregate,
                per_core_percent: cpu.per_core,
            },
            memory: MemoryView {
                used_kib: memory.used(),
                total_kib: memory.total,
            },
            disks: self.source.disks(&*self.include_mount),
            network: network_sample.map(|sample| NetworkView {
                rx_per_sec: throughput.rx_per_sec,
                tx_per_sec: throughput.tx_per_sec,
                rx_total: sample.rx_bytes,
                tx_total: sample.tx_bytes,
                interfaces: sample.interfaces,
            }),
            battery: self.source.battery(),
            temperature_celsius: self.source.temperature(),
            processes: rank(tracked.rows, self.top_processes),
            process_count,
        }
    }
}
