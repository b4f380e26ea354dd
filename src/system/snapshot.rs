use serde::Serialize;

use super::counters::{BatteryState, DiskSample, HostInfo};
use super::tracker::ProcessRow;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CpuView {
    pub aggregate_percent: f32,
    pub per_core_percent: Vec<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MemoryView {
    pub used_kib: u64,
    pub total_kib: u64,
}

impl MemoryView {
    pub fn percent(&self) -> f64 {
        if self.total_kib == 0 {
            return 0.0;
        }
        self.used_kib as f64 * 100.0 / self.total_kib as f64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NetworkView {
    pub rx_per_sec: f64,
    pub tx_per_sec: f64,
    pub rx_total: u64,
    pub tx_total: u64,
    pub interfaces: usize,
}

/// Everything the dashboard draws for one tick. Built once, then read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickView {
    pub host: HostInfo,
    pub cpu: CpuView,
    pub memory: MemoryView,
    pub disks: Vec<DiskSample>,
    /// `None` when the interface counters could not be read.
    pub network: Option<NetworkView>,
    pub battery: Option<BatteryState>,
    pub temperature_celsius: Option<f32>,
    /// Top processes, busiest first.
    pub processes: Vec<ProcessRow>,
    /// All processes seen this tick, not just the ranked ones.
    pub process_count: usize,
}

pub fn disk_percent(disk: &DiskSample) -> f64 {
    if disk.total == 0 {
        return 0.0;
    }
    disk.used as f64 * 100.0 / disk.total as f64
}
