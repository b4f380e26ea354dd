/// One process as read from `/proc/<pid>`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// Real uid of the owner; `None` if the status file had no `Uid:` line.
    pub uid: Option<u32>,
    /// Single-letter lifecycle state (`R`, `S`, `D`, `Z`, ...).
    pub state: char,
    /// Cumulative user + system time, in clock ticks.
    pub cpu_ticks: u64,
    pub rss_kib: u64,
    /// Clock ticks after boot at which the process started.
    pub start_time: u64,
}

/// The fields xtop needs from `/proc/<pid>/stat`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PidStat {
    pub name: String,
    pub state: char,
    pub cpu_ticks: u64,
    pub start_time: u64,
}

/// The fields xtop needs from `/proc/<pid>/status`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PidStatus {
    pub uid: Option<u32>,
    pub rss_kib: Option<u64>,
}

/// Parses the single line of `/proc/<pid>/stat`.
///
/// The command name sits in parentheses and may itself contain spaces and
/// parentheses, so the fixed fields are located from the last `)`.
pub fn parse_pid_stat(line: &str) -> Option<PidStat> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    if close <= open {
        return None;
    }
    let name = line[open + 1..close].to_string();

    // fields after comm: state(0) ppid(1) pgrp(2) session(3) tty_nr(4)
    // tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
    // utime(11) stime(12) cutime(13) cstime(14) priority(15) nice(16)
    // num_threads(17) itrealvalue(18) starttime(19)
    let fields: Vec<&str> = line[close + 1..].split_whitespace().collect();
    let state = fields.first()?.chars().next()?;
    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;
    let start_time: u64 = fields.get(19)?.parse().ok()?;

    Some(PidStat {
        name,
        state,
        cpu_ticks: utime.saturating_add(stime),
        start_time,
    })
}

/// Parses `/proc/<pid>/status` for the owner and resident set size.
///
/// Kernel threads have no `VmRSS` line.
pub fn parse_pid_status(contents: &str) -> PidStatus {
    let mut status = PidStatus::default();
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Uid:") {
            // real, effective, saved, filesystem
            status.uid = rest.split_whitespace().next().and_then(|v| v.parse().ok());
        } else if let Some(rest) = line.strip_prefix("VmRSS:") {
            status.rss_kib = rest.split_whitespace().next().and_then(|v| v.parse().ok());
        }
    }
    status
}
