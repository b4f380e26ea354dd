use serde::Serialize;

/// State of the first battery found under `/sys/class/power_supply`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BatteryState {
    /// Charge level, 0 to 100.
    pub capacity: u8,
    /// Kernel status label: `Charging`, `Discharging`, `Full`, `Not charging`, `Unknown`.
    pub status: String,
}

impl BatteryState {
    pub fn is_charging(&self) -> bool {
        self.status.eq_ignore_ascii_case("charging")
    }
}

/// Parses a power-supply `capacity` file, clamping to 100.
pub fn parse_capacity(contents: &str) -> Option<u8> {
    let value: u32 = contents.trim().parse().ok()?;
    Some(value.min(100) as u8)
}

/// Parses a thermal-zone `temp` file (millidegrees Celsius) into degrees.
pub fn parse_millidegrees(contents: &str) -> Option<f32> {
    let value: i64 = contents.trim().parse().ok()?;
    Some(value as f32 / 1000.0)
}
