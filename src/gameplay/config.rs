use crate::Chips;
use serde::Serialize;

/// Immutable per-table configuration.
///
/// Invariants: `seats >= 2`, `starting_stack > 0`, `sb <= bb`. A
/// `move_time_ms` of zero disables the per-decision clock entirely; the
/// coordinator then waits on an operator skip instead.
#[derive(Debug, Clone, Serialize)]
pub struct TableConfig {
    pub variant: String,
    pub seats: usize,
    pub starting_stack: Chips,
    pub sb: Chips,
    pub bb: Chips,
    pub move_time_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            variant: "NLHE".to_string(),
            seats: 6,
            starting_stack: 10_000,
            sb: 50,
            bb: 100,
            move_time_ms: 15_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = TableConfig::default();
        assert!(config.seats >= 2);
        assert!(config.starting_stack > 0);
        assert!(config.sb <= config.bb);
    }

    #[test]
    fn serializes_wire_fields() {
        let json = serde_json::to_value(TableConfig::default()).unwrap();
        assert_eq!(json["variant"], "NLHE");
        assert_eq!(json["sb"], 50);
        assert_eq!(json["move_time_ms"], 15_000);
    }
}
