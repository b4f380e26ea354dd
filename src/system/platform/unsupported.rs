use super::{CounterSource, mounted_disks};
use crate::system::counters::{
    BatteryState, CpuTimes, DiskSample, HostInfo, MemorySample, NetworkSample, ProcessSample,
};

/// Source for platforms without a procfs reader.
///
/// Every kernel-backed metric reports as unavailable; disk capacity still
/// works because it goes through `sysinfo`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl CounterSource for Unsupported {
    fn cpu_times(&self) -> CpuTimes {
        CpuTimes::default()
    }

    fn memory(&self) -> MemorySample {
        MemorySample::default()
    }

    fn disks(&self, include: &dyn Fn(&str) -> bool) -> Vec<DiskSample> {
        mounted_disks(include)
    }

    fn network(&self) -> Option<NetworkSample> {
        None
    }

    fn battery(&self) -> Option<BatteryState> {
        None
    }

    fn temperature(&self) -> Option<f32> {
        None
    }

    fn processes(&self) -> Vec<ProcessSample> {
        Vec::new()
    }

    fn host(&self) -> HostInfo {
        HostInfo::default()
    }
}
