//! Schema migration framework.

use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

/// Bring a scenario up to [`LATEST_VERSION`]. Versions above it are left
/// untouched for validation to reject.
pub fn migrate_to_latest(mut scenario: Scenario) -> Scenario {
    if scenario.version == 0 {
        scenario = migrate_v0_to_v1(scenario);
    }
    scenario
}

// v0 files predate decimation. An absent `record_every` already defaults to
// every step, which is what v0 did; an explicit value is the user's and stays.
fn migrate_v0_to_v1(mut scenario: Scenario) -> Scenario {
    scenario.version = 1;
    scenario
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v0_keeps_explicit_decimation() {
        let mut s = Scenario::new("old", "unity", 3);
        s.version = 0;
        s.record_every = 7;
        let s = migrate_to_latest(s);
        assert_eq!(s.version, LATEST_VERSION);
        assert_eq!(s.record_every, 7);
    }

    #[test]
    fn future_version_passes_through() {
        let mut s = Scenario::new("new", "unity", 3);
        s.version = LATEST_VERSION + 1;
        assert_eq!(migrate_to_latest(s).version, LATEST_VERSION + 1);
    }
}
