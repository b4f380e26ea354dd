pub mod clock;
pub mod collector;
pub mod counters;
pub mod delta;
pub mod history;
pub mod platform;
pub mod severity;
pub mod snapshot;
pub mod tracker;
