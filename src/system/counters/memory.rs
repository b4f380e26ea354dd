use tracing::debug;

/// Machine-wide memory counters, in KiB as reported by `/proc/meminfo`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MemorySample {
    pub total: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
}

impl MemorySample {
    /// Memory in use by applications: total minus free, buffers and page cache.
    ///
    /// Saturates at zero; the counters are read at slightly different instants
    /// and can transiently overshoot the total.
    pub fn used(&self) -> u64 {
        self.total
            .saturating_sub(self.free)
            .saturating_sub(self.buffers)
            .saturating_sub(self.cached)
    }
}

/// Parses the contents of `/proc/meminfo`.
pub fn parse_meminfo(contents: &str) -> MemorySample {
    let mut sample = MemorySample::default();

    for line in contents.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut sample.total,
            "MemFree" => &mut sample.free,
            "Buffers" => &mut sample.buffers,
            "Cached" => &mut sample.cached,
            _ => continue,
        };
        match rest.split_whitespace().next().map(str::parse::<u64>) {
            Some(Ok(kib)) => *slot = kib,
            _ => debug!(line, "skipping malformed meminfo line"),
        }
    }

    sample
}
