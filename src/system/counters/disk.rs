use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

/// Capacity of one monitored mount point, in bytes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DiskSample {
    pub mount: String,
    pub total: u64,
    pub free: u64,
    pub used: u64,
}

/// Mount points worth showing: exact paths plus whole subtrees.
///
/// Prefixes match on path components, so `/media` covers `/media/usb` but not
/// `/mediaserver`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MountFilter {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
}

impl MountFilter {
    /// The root filesystem plus user and removable media mounts.
    pub fn standard() -> Self {
        Self {
            exact: vec!["/".to_string()],
            prefixes: ["/home", "/mnt", "/media", "/run/media"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn matches(&self, mount: &str) -> bool {
        self.exact.iter().any(|m| m == mount)
            || self
                .prefixes
                .iter()
                .any(|prefix| Path::new(mount).starts_with(prefix))
    }
}

/// Turns raw `(mount, total, available)` entries into samples for the mounts
/// accepted by `include`.
///
/// A mount reported twice (bind mounts, stacked filesystems) is kept once.
/// Entries with no capacity (pseudo filesystems) are dropped.
pub fn select_disks<I>(entries: I, include: &dyn Fn(&str) -> bool) -> Vec<DiskSample>
where
    I: IntoIterator<Item = (String, u64, u64)>,
{
    let mut by_mount = BTreeMap::new();
    for (mount, total, available) in entries {
        if total == 0 || !include(&mount) {
            continue;
        }
        let free = available.min(total);
        by_mount.entry(mount.clone()).or_insert(DiskSample {
            mount,
            total,
            free,
            used: total - free,
        });
    }
    by_mount.into_values().collect()
}
