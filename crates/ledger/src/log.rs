//! Append-only usage log.

use muster_core::{AssetId, UsageLogEntry};

/// Append-only store of usage-log entries.
///
/// Entries are never edited or removed once appended. The ledger appends
/// within the same critical section as the mutation an entry describes, so
/// readers always see a log consistent with asset state.
#[derive(Debug, Default)]
pub struct UsageLog {
    entries: Vec<UsageLogEntry>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one entry.
    pub fn record(&mut self, entry: UsageLogEntry) {
        self.entries.push(entry);
    }

    /// All entries for one asset, in append order.
    ///
    /// Entries survive asset removal; querying a removed or never-known id
    /// yields whatever history the log holds for it (possibly nothing).
    pub fn for_asset(&self, asset_id: &AssetId) -> Vec<UsageLogEntry> {
        self.entries
            .iter()
            .filter(|e| &e.asset_id == asset_id)
            .cloned()
            .collect()
    }

    /// Every entry, in append order.
    pub fn entries(&self) -> &[UsageLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muster_core::TeamId;

    #[test]
    fn entries_keep_append_order_per_asset() {
        let mut log = UsageLog::new();
        let drone = AssetId::new("A001");
        let boat = AssetId::new("W001");
        let team = TeamId::new("Alpha");

        log.record(UsageLogEntry::created(drone.clone()));
        log.record(UsageLogEntry::created(boat.clone()));
        log.record(UsageLogEntry::allocated(drone.clone(), team.clone(), 2));
        log.record(UsageLogEntry::returned(drone.clone(), team, 2));

        let history = log.for_asset(&drone);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].action, muster_core::UsageAction::Created);
        assert_eq!(history[1].action, muster_core::UsageAction::Allocated);
        assert_eq!(history[2].action, muster_core::UsageAction::Returned);

        assert_eq!(log.for_asset(&boat).len(), 1);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn unknown_asset_has_empty_history() {
        let log = UsageLog::new();
        assert!(log.is_empty());
        assert!(log.for_asset(&AssetId::new("nope")).is_empty());
    }
}
