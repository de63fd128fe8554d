//! Usage-log records.
//!
//! Every asset lifecycle action appends one entry. The log is
//! append-only; nothing in the system edits or removes past entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::{AssetId, TeamId};

/// Lifecycle action captured in the usage log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageAction {
    /// Asset entered the ledger
    #[serde(rename = "create")]
    Created,
    /// Units checked out to a team
    #[serde(rename = "alloc")]
    Allocated,
    /// Units checked back in
    #[serde(rename = "return")]
    Returned,
}

impl fmt::Display for UsageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "create",
            Self::Allocated => "alloc",
            Self::Returned => "return",
        };
        write!(f, "{label}")
    }
}

/// A single usage-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLogEntry {
    pub asset_id: AssetId,
    pub action: UsageAction,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl UsageLogEntry {
    /// Entry for an asset entering the ledger.
    pub fn created(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            action: UsageAction::Created,
            timestamp: Utc::now(),
            team_id: None,
            quantity: None,
        }
    }

    /// Entry for units checked out to a team.
    pub fn allocated(asset_id: AssetId, team_id: TeamId, quantity: u32) -> Self {
        Self {
            asset_id,
            action: UsageAction::Allocated,
            timestamp: Utc::now(),
            team_id: Some(team_id),
            quantity: Some(quantity),
        }
    }

    /// Entry for units checked back in.
    pub fn returned(asset_id: AssetId, team_id: TeamId, quantity: u32) -> Self {
        Self {
            asset_id,
            action: UsageAction::Returned,
            timestamp: Utc::now(),
            team_id: Some(team_id),
            quantity: Some(quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_names() {
        assert_eq!(serde_json::to_value(UsageAction::Created).unwrap(), "create");
        assert_eq!(serde_json::to_value(UsageAction::Allocated).unwrap(), "alloc");
        assert_eq!(serde_json::to_value(UsageAction::Returned).unwrap(), "return");
    }

    #[test]
    fn created_entry_has_no_team_or_quantity() {
        let entry = UsageLogEntry::created(AssetId::new("A001"));
        assert_eq!(entry.action, UsageAction::Created);
        assert!(entry.team_id.is_none());
        assert!(entry.quantity.is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("team_id").is_none());
        assert!(json.get("quantity").is_none());
    }

    #[test]
    fn allocation_entry_captures_team_and_quantity() {
        let entry =
            UsageLogEntry::allocated(AssetId::new("G003"), TeamId::new("GroundTroop1"), 2);
        assert_eq!(entry.action, UsageAction::Allocated);
        assert_eq!(entry.team_id, Some(TeamId::new("GroundTroop1")));
        assert_eq!(entry.quantity, Some(2));
    }

    #[test]
    fn entry_serialization_roundtrip() {
        let entry = UsageLogEntry::returned(AssetId::new("G003"), TeamId::new("Alpha"), 1);
        let json = serde_json::to_string(&entry).unwrap();
        let back: UsageLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
