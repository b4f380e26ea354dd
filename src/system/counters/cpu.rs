use tracing::debug;

/// Upper bound on a `cpuN` index; anything larger is treated as a malformed line.
const MAX_CORES: usize = 4096;

/// Tick counters for one cpu, or for the whole machine, at one instant.
///
/// Values are in the kernel's native tick unit (`USER_HZ`). They only mean
/// something when differenced against an earlier sample.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuSample {
    pub total: u64,
    pub active: u64,
}

/// One read of `/proc/stat`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CpuTimes {
    /// The `cpu` line. `None` when the source could not be read.
    pub aggregate: Option<CpuSample>,
    /// The `cpuN` lines, indexed by `N`. Gaps (offline cores) are `None`.
    pub cores: Vec<Option<CpuSample>>,
}

impl CpuSample {
    /// Builds a sample from the numeric fields of a `cpu` line, in kernel order:
    /// user, nice, system, idle, iowait, irq, softirq, steal.
    ///
    /// Guest time is already folded into user/nice by the kernel and is ignored.
    /// Older kernels omit the trailing fields; they count as zero.
    pub fn from_fields(fields: &[u64]) -> Option<Self> {
        if fields.len() < 4 {
            return None;
        }
        let field = |i: usize| fields.get(i).copied().unwrap_or(0);
        let (user, nice, system, idle) = (field(0), field(1), field(2), field(3));
        let (iowait, irq, softirq, steal) = (field(4), field(5), field(6), field(7));

        let active = [user, nice, system, irq, softirq, steal]
            .into_iter()
            .fold(0u64, u64::saturating_add);
        let total = active.saturating_add(idle).saturating_add(iowait);
        Some(Self { total, active })
    }
}

impl CpuTimes {
    /// Number of cores reported this read.
    pub fn core_count(&self) -> usize {
        self.cores.iter().flatten().count()
    }
}

/// Parses the contents of `/proc/stat`.
///
/// Lines other than `cpu`/`cpuN` are ignored. A malformed cpu line is skipped
/// on its own; the rest of the file still contributes.
pub fn parse_stat(contents: &str) -> CpuTimes {
    let mut times = CpuTimes::default();

    for line in contents.lines() {
        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            continue;
        };
        let Some(suffix) = kind.strip_prefix("cpu") else {
            continue;
        };

        let fields = match tokens.map(str::parse::<u64>).collect::<Result<Vec<_>, _>>() {
            Ok(fields) => fields,
            Err(error) => {
                debug!(line, %error, "skipping malformed cpu line");
                continue;
            }
        };
        let Some(sample) = CpuSample::from_fields(&fields) else {
            debug!(line, "skipping truncated cpu line");
            continue;
        };

        if suffix.is_empty() {
            times.aggregate = Some(sample);
            continue;
        }

        match suffix.parse::<usize>() {
            Ok(id) if id < MAX_CORES => {
                if times.cores.len() <= id {
                    times.cores.resize(id + 1, None);
                }
                times.cores[id] = Some(sample);
            }
            _ => debug!(kind, "skipping cpu line with an invalid core id"),
        }
    }

    times
}
