use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::{CounterSource, mounted_disks};
use crate::system::counters::cpu::parse_stat;
use crate::system::counters::host::{parse_uptime, system_name};
use crate::system::counters::memory::parse_meminfo;
use crate::system::counters::network::parse_net_dev;
use crate::system::counters::process::{parse_pid_stat, parse_pid_status};
use crate::system::counters::sensors::{parse_capacity, parse_millidegrees};
use crate::system::counters::{
    BatteryState, CpuTimes, DiskSample, HostInfo, MemorySample, NetworkSample, ProcessSample,
};

/// Thermal zones probed for a cpu temperature, in order.
const THERMAL_ZONES: usize = 10;

/// Reads counters from a procfs/sysfs pair.
///
/// The roots default to `/proc` and `/sys`; [`ProcFs::at`] points them
/// elsewhere, which is how the readers are exercised against fixture trees.
#[derive(Clone, Debug)]
pub struct ProcFs {
    proc_root: PathBuf,
    sys_root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::at("/proc", "/sys")
    }
}

impl ProcFs {
    pub fn at(proc_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
        }
    }

    fn read_proc(&self, relative: &str) -> io::Result<String> {
        fs::read_to_string(self.proc_root.join(relative))
    }

    fn read_process(&self, pid: u32) -> Option<ProcessSample> {
        let dir = self.proc_root.join(pid.to_string());

        // the process may exit between the directory listing and these reads.
        let (stat, status) = match (
            fs::read_to_string(dir.join("stat")),
            fs::read_to_string(dir.join("status")),
        ) {
            (Ok(stat), Ok(status)) => (stat, status),
            (Err(error), _) | (_, Err(error)) => {
                trace!(pid, %error, "process vanished during scan");
                return None;
            }
        };

        let Some(stat) = parse_pid_stat(&stat) else {
            debug!(pid, "skipping process with malformed stat");
            return None;
        };
        let status = parse_pid_status(&status);

        Some(ProcessSample {
            pid,
            name: stat.name,
            uid: status.uid,
            state: stat.state,
            cpu_ticks: stat.cpu_ticks,
            rss_kib: status.rss_kib.unwrap_or(0),
            start_time: stat.start_time,
        })
    }
}

impl CounterSource for ProcFs {
    fn cpu_times(&self) -> CpuTimes {
        match self.read_proc("stat") {
            Ok(contents) => parse_stat(&contents),
            Err(error) => {
                warn!(%error, "cpu counters unavailable");
                CpuTimes::default()
            }
        }
    }

    fn memory(&self) -> MemorySample {
        match self.read_proc("meminfo") {
            Ok(contents) => parse_meminfo(&contents),
            Err(error) => {
                warn!(%error, "memory counters unavailable");
                MemorySample::default()
            }
        }
    }

    fn disks(&self, include: &dyn Fn(&str) -> bool) -> Vec<DiskSample> {
        mounted_disks(include)
    }

    fn network(&self) -> Option<NetworkSample> {
        match self.read_proc("net/dev") {
            Ok(contents) => Some(parse_net_dev(&contents)),
            Err(error) => {
                debug!(%error, "network counters unavailable");
                None
            }
        }
    }

    fn battery(&self) -> Option<BatteryState> {
        let entries = fs::read_dir(self.sys_root.join("class/power_supply")).ok()?;
        let mut supplies: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        supplies.sort();

        supplies.into_iter().find_map(|supply| {
            if read_trimmed(&supply.join("type")).as_deref() != Some("Battery") {
                return None;
            }
            if read_trimmed(&supply.join("present")).as_deref() == Some("0") {
                return None;
            }
            let capacity = read_trimmed(&supply.join("capacity")).and_then(|c| parse_capacity(&c))?;
            let status =
                read_trimmed(&supply.join("status")).unwrap_or_else(|| "Unknown".to_string());
            Some(BatteryState { capacity, status })
        })
    }

    fn temperature(&self) -> Option<f32> {
        (0..THERMAL_ZONES).find_map(|zone| {
            let path = self
                .sys_root
                .join(format!("class/thermal/thermal_zone{zone}/temp"));
            read_trimmed(&path).and_then(|t| parse_millidegrees(&t))
        })
    }

    fn processes(&self) -> Vec<ProcessSample> {
        let entries = match fs::read_dir(&self.proc_root) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "process list unavailable");
                return Vec::new();
            }
        };

        entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
            .filter_map(|pid| self.read_process(pid))
            .collect()
    }

    fn host(&self) -> HostInfo {
        let ostype = self.read_proc("sys/kernel/ostype").ok();
        let osrelease = self.read_proc("sys/kernel/osrelease").ok();
        HostInfo {
            system_name: system_name(ostype.as_deref(), osrelease.as_deref()),
            hostname: self
                .read_proc("sys/kernel/hostname")
                .ok()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            uptime_secs: self.read_proc("uptime").ok().and_then(|u| parse_uptime(&u)),
        }
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}
