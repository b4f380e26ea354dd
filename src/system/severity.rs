use serde::Serialize;

/// How alarming a reading is, independent of how it gets drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum Severity {
    Good,
    Fair,
    Warning,
    Critical,
}

/// Tier for a utilisation percentage (cpu, memory, disk).
pub fn usage_severity(percent: f64) -> Severity {
    if percent < 50.0 {
        Severity::Good
    } else if percent < 75.0 {
        Severity::Fair
    } else if percent < 90.0 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

/// Tier for a remaining battery capacity.
pub fn battery_severity(capacity: u8) -> Severity {
    match capacity {
        60.. => Severity::Good,
        30..=59 => Severity::Fair,
        15..=29 => Severity::Warning,
        _ => Severity::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_tiers() {
        assert_eq!(usage_severity(0.0), Severity::Good);
        assert_eq!(usage_severity(49.9), Severity::Good);
        assert_eq!(usage_severity(50.0), Severity::Fair);
        assert_eq!(usage_severity(75.0), Severity::Warning);
        assert_eq!(usage_severity(90.0), Severity::Critical);
        assert_eq!(usage_severity(100.0), Severity::Critical);
    }

    #[test]
    fn battery_bands() {
        assert_eq!(battery_severity(100), Severity::Good);
        assert_eq!(battery_severity(60), Severity::Good);
        assert_eq!(battery_severity(59), Severity::Fair);
        assert_eq!(battery_severity(30), Severity::Fair);
        assert_eq!(battery_severity(29), Severity::Warning);
        assert_eq!(battery_severity(15), Severity::Warning);
        assert_eq!(battery_severity(14), Severity::Critical);
        assert_eq!(battery_severity(0), Severity::Critical);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Severity::Good < Severity::Critical);
    }
}
