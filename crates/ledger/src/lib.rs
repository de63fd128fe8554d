//! # Muster Ledger
//!
//! The in-memory authoritative store of SAR assets: identity indices,
//! quantity bookkeeping, the allocation protocol, and the append-only
//! usage log.
//!
//! The ledger is a plain synchronous structure with `&mut self` mutators
//! and no suspension points. An embedding host that serves concurrent
//! callers must wrap it in a lock and hold the guard across a whole
//! operation: every mutator performs its index update and log append as
//! one unit, and allocate/return are read-modify-write on
//! `unallocated_quantity`.

mod log;

pub use log::UsageLog;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use muster_core::error::LedgerError;
use muster_core::{
    Allocation, Asset, AssetId, AssetStatus, LocationUpdate, NewAsset, ReturnOutcome, TeamId,
    UsageLogEntry,
};

/// The asset registry.
///
/// Two indices cover the lookup paths: by id (primary) and by name
/// (secondary, also unique). Both are kept in step by every mutation.
#[derive(Debug, Default)]
pub struct AssetLedger {
    assets_by_id: HashMap<AssetId, Asset>,
    ids_by_name: HashMap<String, AssetId>,
    log: UsageLog,
}

impl AssetLedger {
    pub fn new() -> Self {
        Self {
            assets_by_id: HashMap::new(),
            ids_by_name: HashMap::new(),
            log: UsageLog::new(),
        }
    }

    /// Register a new asset.
    ///
    /// Requires a non-empty name and at least one type tag. The ledger is
    /// authoritative for uniqueness: a registered name or explicit id
    /// rejects the add and leaves all state untouched. A missing id gets a
    /// fresh UUID, generated per call. Insertion and the `create` log entry
    /// happen together.
    pub fn add(&mut self, new_asset: NewAsset) -> Result<Asset, LedgerError> {
        if new_asset.name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if new_asset.types.is_empty() {
            return Err(LedgerError::EmptyTypes);
        }
        if self.ids_by_name.contains_key(&new_asset.name) {
            return Err(LedgerError::DuplicateName(new_asset.name));
        }
        if let Some(id) = &new_asset.id {
            if self.assets_by_id.contains_key(id) {
                return Err(LedgerError::DuplicateId(id.clone()));
            }
        }

        let asset = Asset::new(new_asset);
        self.ids_by_name.insert(asset.name.clone(), asset.id.clone());
        self.assets_by_id.insert(asset.id.clone(), asset.clone());
        self.log.record(UsageLogEntry::created(asset.id.clone()));
        debug!(asset_id = %asset.id, name = %asset.name, quantity = asset.quantity, "asset added");
        Ok(asset)
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.assets_by_id.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Asset> {
        self.ids_by_name
            .get(name)
            .and_then(|id| self.assets_by_id.get(id))
    }

    pub fn id_by_name(&self, name: &str) -> Option<AssetId> {
        self.ids_by_name.get(name).cloned()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.assets_by_id.contains_key(id)
    }

    /// Erase an asset from both indices, returning it.
    ///
    /// Removing an absent id is a silent no-op (`None`); callers that need
    /// to report "not found" check first. Log history for the asset is
    /// retained.
    pub fn remove(&mut self, id: &AssetId) -> Option<Asset> {
        let asset = self.assets_by_id.remove(id)?;
        self.ids_by_name.remove(&asset.name);
        debug!(asset_id = %id, name = %asset.name, "asset removed");
        Some(asset)
    }

    /// Set or adjust the total quantity. `replace` sets the total to
    /// `quantity`; otherwise `quantity` is a signed delta.
    ///
    /// A result below zero is rejected and leaves state unchanged. When the
    /// new total is below the current unallocated count, the unallocated
    /// count is clamped down to it, so `unallocated_quantity <= quantity`
    /// holds on exit. Increases never raise the unallocated count.
    pub fn update_quantity(
        &mut self,
        id: &AssetId,
        quantity: i64,
        replace: bool,
    ) -> Result<u32, LedgerError> {
        let asset = self
            .assets_by_id
            .get_mut(id)
            .ok_or(LedgerError::AssetNotFound)?;
        let proposed = if replace {
            quantity
        } else {
            i64::from(asset.quantity)
                .checked_add(quantity)
                .ok_or(LedgerError::NegativeQuantity)?
        };
        let new_total = u32::try_from(proposed).map_err(|_| LedgerError::NegativeQuantity)?;
        asset.quantity = new_total;
        if asset.unallocated_quantity > new_total {
            asset.unallocated_quantity = new_total;
        }
        debug!(asset_id = %id, quantity = new_total, replace, "quantity updated");
        Ok(new_total)
    }

    /// Replace or union-merge the type tag set.
    pub fn update_types(
        &mut self,
        id: &AssetId,
        types: BTreeSet<String>,
        replace: bool,
    ) -> Result<(), LedgerError> {
        let asset = self
            .assets_by_id
            .get_mut(id)
            .ok_or(LedgerError::AssetNotFound)?;
        if replace {
            asset.types = types;
        } else {
            asset.types.extend(types);
        }
        Ok(())
    }

    /// Apply a location update. A GPS pair replaces the coordinates, a
    /// label replaces the name; the other field is left alone.
    pub fn update_location(
        &mut self,
        id: &AssetId,
        location: LocationUpdate,
    ) -> Result<(), LedgerError> {
        let asset = self
            .assets_by_id
            .get_mut(id)
            .ok_or(LedgerError::AssetNotFound)?;
        match location {
            LocationUpdate::Gps(lat, lon) => asset.location_gps = (lat, lon),
            LocationUpdate::Name(name) => asset.location_name = name,
        }
        Ok(())
    }

    /// Set the operational status. Independent of allocation: checking
    /// units out or in never touches this field.
    pub fn set_status(&mut self, id: &AssetId, status: AssetStatus) -> Result<(), LedgerError> {
        let asset = self
            .assets_by_id
            .get_mut(id)
            .ok_or(LedgerError::AssetNotFound)?;
        asset.status = status;
        Ok(())
    }

    /// Check `quantity` units out to a team.
    ///
    /// Fails without touching state when fewer units are available, and the
    /// error carries the exact remaining count. On success the team marker
    /// is overwritten whatever team held it before (the ledger tracks at
    /// most one allocating team per asset) and the `alloc` log entry is
    /// appended with the mutation.
    pub fn allocate(
        &mut self,
        id: &AssetId,
        team_id: &TeamId,
        quantity: u32,
    ) -> Result<Allocation, LedgerError> {
        let asset = self
            .assets_by_id
            .get_mut(id)
            .ok_or(LedgerError::AssetNotFound)?;
        if quantity > asset.unallocated_quantity {
            return Err(LedgerError::InsufficientQuantity {
                remaining: asset.unallocated_quantity,
            });
        }
        asset.unallocated_quantity -= quantity;
        asset.allocated = Some(team_id.clone());
        let remaining = asset.unallocated_quantity;
        self.log
            .record(UsageLogEntry::allocated(id.clone(), team_id.clone(), quantity));
        debug!(asset_id = %id, team_id = %team_id, quantity, remaining, "units allocated");
        Ok(Allocation {
            asset_id: id.clone(),
            team_id: team_id.clone(),
            quantity,
            remaining,
        })
    }

    /// Check `quantity` units back in.
    ///
    /// Zero is rejected before anything else, unknown-asset lookup
    /// included. A successful return appends its log entry and then lands
    /// on exactly one outcome against the total quantity: partial (marker
    /// kept), full (marker cleared), or overflow (total raised to match,
    /// marker cleared). The returning team is recorded in the log but never
    /// checked against the marker.
    pub fn return_units(
        &mut self,
        id: &AssetId,
        team_id: &TeamId,
        quantity: u32,
    ) -> Result<ReturnOutcome, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let asset = self
            .assets_by_id
            .get_mut(id)
            .ok_or(LedgerError::AssetNotFound)?;
        asset.unallocated_quantity = asset.unallocated_quantity.saturating_add(quantity);
        self.log
            .record(UsageLogEntry::returned(id.clone(), team_id.clone(), quantity));

        let outcome = if asset.unallocated_quantity > asset.quantity {
            let extra = asset.unallocated_quantity - asset.quantity;
            asset.quantity = asset.unallocated_quantity;
            asset.allocated = None;
            ReturnOutcome::Overflow {
                extra,
                new_quantity: asset.quantity,
            }
        } else if asset.unallocated_quantity < asset.quantity {
            ReturnOutcome::Partial {
                returned: quantity,
                still_allocated: asset.quantity - asset.unallocated_quantity,
            }
        } else {
            asset.allocated = None;
            ReturnOutcome::Full {
                asset_id: id.clone(),
            }
        };
        debug!(asset_id = %id, team_id = %team_id, quantity, ?outcome, "units returned");
        Ok(outcome)
    }

    /// Usage-log history for one asset, creation first.
    pub fn usage_log(&self, id: &AssetId) -> Vec<UsageLogEntry> {
        self.log.for_asset(id)
    }

    /// The whole log, append order.
    pub fn log(&self) -> &UsageLog {
        &self.log
    }

    /// Every asset, cloned, in no particular order.
    pub fn all(&self) -> Vec<Asset> {
        self.assets_by_id.values().cloned().collect()
    }

    /// Borrowing iteration over `(id, asset)` pairs.
    pub fn assets(&self) -> impl Iterator<Item = (&AssetId, &Asset)> {
        self.assets_by_id.iter()
    }

    /// Assets carrying the given type tag.
    pub fn by_type(&self, tag: &str) -> Vec<Asset> {
        self.assets_by_id
            .values()
            .filter(|a| a.has_type(tag))
            .cloned()
            .collect()
    }

    /// Assets with the given status. Best-effort: status is settable but
    /// not maintained by allocate/return.
    pub fn by_status(&self, status: AssetStatus) -> Vec<Asset> {
        self.assets_by_id
            .values()
            .filter(|a| a.status == status)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assets_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets_by_id.is_empty()
    }
}
