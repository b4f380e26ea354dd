use sysinfo::Disks;

use crate::system::counters::disk::select_disks;
use crate::system::counters::{
    BatteryState, CpuTimes, DiskSample, HostInfo, MemorySample, NetworkSample, ProcessSample,
};

mod procfs;
mod unsupported;

pub use procfs::ProcFs;
pub use unsupported::Unsupported;

/// A provider of raw counter snapshots.
///
/// Every method is best effort: an unreadable source yields an empty or
/// `None` value, never an error, so one missing interface cannot blank a tick.
pub trait CounterSource {
    fn cpu_times(&self) -> CpuTimes;
    fn memory(&self) -> MemorySample;
    fn disks(&self, include: &dyn Fn(&str) -> bool) -> Vec<DiskSample>;
    fn network(&self) -> Option<NetworkSample>;
    fn battery(&self) -> Option<BatteryState>;
    fn temperature(&self) -> Option<f32>;
    fn processes(&self) -> Vec<ProcessSample>;
    fn host(&self) -> HostInfo;
}

/// The counter source for the platform xtop was built for.
#[cfg(target_os = "linux")]
pub type NativeSource = ProcFs;
#[cfg(not(target_os = "linux"))]
pub type NativeSource = Unsupported;

/// Mounted filesystems with capacity, via `statvfs` under the hood.
fn mounted_disks(include: &dyn Fn(&str) -> bool) -> Vec<DiskSample> {
    let disks = Disks::new_with_refreshed_list();
    select_disks(
        disks.list().iter().map(|disk| {
            (
                disk.mount_point().to_string_lossy().into_owned(),
                disk.total_space(),
                disk.available_space(),
            )
        }),
        include,
    )
}
