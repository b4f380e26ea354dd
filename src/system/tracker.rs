use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::counters::ProcessSample;

/// What the tracker remembers about a pid between ticks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Baseline {
    cpu_ticks: u64,
    start_time: u64,
}

/// One process as shown in the ranked view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub uid: Option<u32>,
    pub cpu_percent: f32,
    pub memory_kib: u64,
    pub state: char,
}

/// Result of one tracker pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerUpdate {
    /// Every current process, unranked.
    pub rows: Vec<ProcessRow>,
    /// Pids tracked last tick that are gone now.
    pub departed: Vec<u32>,
}

/// Differences per-process cpu time across ticks.
///
/// A pid's baseline only survives if the pid was seen on the immediately
/// preceding tick with the same start time, so a recycled pid is always a
/// first observation.
#[derive(Debug, Default)]
pub struct ProcessTracker {
    baselines: HashMap<u32, Baseline>,
}

impl ProcessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pids with a baseline.
    pub fn tracked(&self) -> usize {
        self.baselines.len()
    }

    /// Computes cpu usage for `current` and replaces the baseline table.
    ///
    /// Usage is `delta / system_total_delta * 100 * cores`, so a process
    /// saturating two cores on a four-core machine reads 200%.
    pub fn update(
        &mut self,
        current: Vec<ProcessSample>,
        system_total_delta: u64,
        cores: usize,
    ) -> TrackerUpdate {
        let cores = cores.max(1) as f64;
        let percent = |delta: u64| {
            if system_total_delta == 0 {
                0.0
            } else {
                (delta as f64 * 100.0 * cores / system_total_delta as f64) as f32
            }
        };

        let mut next = HashMap::with_capacity(current.len());
        let rows = current
            .into_iter()
            .map(|sample| {
                let delta = match self.baselines.get(&sample.pid) {
                    Some(prior) if prior.start_time == sample.start_time => {
                        sample.cpu_ticks.checked_sub(prior.cpu_ticks).unwrap_or_else(|| {
                            debug!(pid = sample.pid, "process cpu time went backwards");
                            0
                        })
                    }
                    Some(_) => {
                        debug!(pid = sample.pid, "pid reused by a new process");
                        0
                    }
                    None => 0,
                };

                next.insert(
                    sample.pid,
                    Baseline {
                        cpu_ticks: sample.cpu_ticks,
                        start_time: sample.start_time,
                    },
                );

                ProcessRow {
                    pid: sample.pid,
                    name: sample.name,
                    uid: sample.uid,
                    cpu_percent: percent(delta),
                    memory_kib: sample.rss_kib,
                    state: sample.state,
                }
            })
            .collect();

        let previous = std::mem::replace(&mut self.baselines, next);
        let mut departed: Vec<u32> = previous
            .into_keys()
            .filter(|pid| !self.baselines.contains_key(pid))
            .collect();
        departed.sort_unstable();

        TrackerUpdate { rows, departed }
    }
}

/// Orders rows by cpu usage, busiest first, ties by ascending pid, and keeps
/// the first `limit`.
pub fn rank(mut rows: Vec<ProcessRow>, limit: usize) -> Vec<ProcessRow> {
    rows.sort_by(compare_rows);
    rows.truncate(limit);
    rows
}

fn compare_rows(a: &ProcessRow, b: &ProcessRow) -> Ordering {
    b.cpu_percent
        .total_cmp(&a.cpu_percent)
        .then_with(|| a.pid.cmp(&b.pid))
}
