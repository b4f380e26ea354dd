use serde::Serialize;

/// Machine identity and uptime.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct HostInfo {
    /// Kernel name and release, e.g. `Linux 6.8.0`.
    pub system_name: Option<String>,
    pub hostname: Option<String>,
    pub uptime_secs: Option<u64>,
}

/// Joins the kernel `ostype` and `osrelease` strings.
pub fn system_name(ostype: Option<&str>, osrelease: Option<&str>) -> Option<String> {
    match (ostype.map(str::trim), osrelease.map(str::trim)) {
        (Some(os), Some(release)) if !os.is_empty() => Some(format!("{os} {release}")),
        (Some(os), _) if !os.is_empty() => Some(os.to_string()),
        _ => None,
    }
}

/// Parses `/proc/uptime`; the first field is seconds since boot.
pub fn parse_uptime(contents: &str) -> Option<u64> {
    let secs: f64 = contents.split_whitespace().next()?.parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs as u64)
}
