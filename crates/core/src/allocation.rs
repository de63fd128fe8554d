//! Allocation protocol outcomes.
//!
//! Checking units out and back in produces structured outcomes; their
//! `Display` impls are the operator-facing messages relayed verbatim in
//! responses, so the wording here is load-bearing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::asset::{AssetId, TeamId};

/// A successful checkout of units to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub asset_id: AssetId,
    pub team_id: TeamId,
    pub quantity: u32,
    /// Units left unallocated after the checkout
    pub remaining: u32,
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Asset {} allocated to team {}, {} units remaining",
            self.asset_id, self.team_id, self.remaining
        )
    }
}

/// Outcome of checking units back in.
///
/// Returning more than was checked out is not an error: the surplus is
/// folded into the asset's total quantity (field teams sometimes come
/// back with more units than they left with, e.g. recovered gear).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReturnOutcome {
    /// Some units came back; others are still in the field.
    Partial { returned: u32, still_allocated: u32 },
    /// Every checked-out unit is back; the allocation marker clears.
    Full { asset_id: AssetId },
    /// More units came back than were out; total quantity grew.
    Overflow { extra: u32, new_quantity: u32 },
}

impl ReturnOutcome {
    /// Whether this return cleared the asset's allocation marker.
    pub fn cleared_allocation(&self) -> bool {
        !matches!(self, Self::Partial { .. })
    }
}

impl fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partial { returned, still_allocated } => write!(
                f,
                "Returned {returned} units, {still_allocated} units still in use"
            ),
            Self::Full { asset_id } => write!(f, "Returned all {asset_id} units"),
            Self::Overflow { extra, .. } => {
                write!(f, "Returned {extra} extra units, updated asset quantity")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_message_wording() {
        let allocation = Allocation {
            asset_id: AssetId::new("G003"),
            team_id: TeamId::new("GroundTroop1"),
            quantity: 2,
            remaining: 4,
        };
        assert_eq!(
            allocation.to_string(),
            "Asset G003 allocated to team GroundTroop1, 4 units remaining"
        );
    }

    #[test]
    fn partial_return_message_wording() {
        let outcome = ReturnOutcome::Partial { returned: 1, still_allocated: 1 };
        assert_eq!(outcome.to_string(), "Returned 1 units, 1 units still in use");
        assert!(!outcome.cleared_allocation());
    }

    #[test]
    fn full_return_message_wording() {
        let outcome = ReturnOutcome::Full { asset_id: AssetId::new("G003") };
        assert_eq!(outcome.to_string(), "Returned all G003 units");
        assert!(outcome.cleared_allocation());
    }

    #[test]
    fn overflow_return_message_wording() {
        let outcome = ReturnOutcome::Overflow { extra: 1, new_quantity: 7 };
        assert_eq!(
            outcome.to_string(),
            "Returned 1 extra units, updated asset quantity"
        );
        assert!(outcome.cleared_allocation());
    }

    #[test]
    fn return_outcome_serializes_tagged() {
        let json = serde_json::to_value(ReturnOutcome::Partial {
            returned: 2,
            still_allocated: 3,
        })
        .unwrap();
        assert_eq!(json["kind"], "partial");
        assert_eq!(json["returned"], 2);
        assert_eq!(json["still_allocated"], 3);
    }
}
