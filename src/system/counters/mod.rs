//! Typed snapshots of kernel counters and the pure parsers that build them.
//!
//! Nothing in here touches the filesystem. The [`platform`](crate::system::platform)
//! sources read the raw text and hand it to these parsers, so every format quirk
//! can be tested against literal strings.

pub mod cpu;
pub mod disk;
pub mod host;
pub mod memory;
pub mod network;
pub mod process;
pub mod sensors;

pub use cpu::{CpuSample, CpuTimes};
pub use disk::{DiskSample, MountFilter};
pub use host::HostInfo;
pub use memory::MemorySample;
pub use network::NetworkSample;
pub use process::ProcessSample;
pub use sensors::BatteryState;
