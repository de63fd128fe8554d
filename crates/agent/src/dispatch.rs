//! The asset-manager agent: request dispatch over the ledger.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use muster_core::error::{Error, RequestError};
use muster_core::event::{AssetEvent, EventBus};
use muster_core::{
    AgentResponse, Asset, AssetId, LocationUpdate, MessageType, NewAsset, Reply, TeamId,
    UpdateField,
};
use muster_ledger::AssetLedger;

use crate::extract::{optional_bool, optional_str, required_i64, required_str, required_u32};

/// The asset-manager agent.
///
/// Owns the ledger behind a lock and translates incoming request mappings
/// into ledger operations. `process_request` is total: any input produces
/// a well-formed response envelope, never a panic or a propagated error.
///
/// Each operation runs under a single guard, so target resolution, the
/// mutation, and the log append observe one consistent ledger state.
pub struct AssetManagerAgent {
    name: String,
    status: RwLock<String>,
    ledger: RwLock<AssetLedger>,
    event_bus: Arc<EventBus>,
}

impl Default for AssetManagerAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetManagerAgent {
    pub fn new() -> Self {
        Self {
            name: "asset_manager".into(),
            status: RwLock::new("active".into()),
            ledger: RwLock::new(AssetLedger::new()),
            event_bus: Arc::new(EventBus::default()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Share an event bus with other components. The agent otherwise
    /// creates its own.
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form operational status of the agent itself.
    pub fn status(&self) -> String {
        self.status.read().unwrap().clone()
    }

    pub fn set_status(&self, status: impl Into<String>) {
        let status = status.into();
        info!(agent = %self.name, status = %status, "agent status updated");
        *self.status.write().unwrap() = status;
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Snapshot of one asset by id.
    pub fn asset(&self, id: &str) -> Option<Asset> {
        self.ledger.read().unwrap().get(&AssetId::new(id)).cloned()
    }

    /// Snapshot of the whole roster, in no particular order.
    pub fn assets(&self) -> Vec<Asset> {
        self.ledger.read().unwrap().all()
    }

    /// Load a seed roster. Entries the ledger rejects (duplicate names,
    /// empty fields) are logged and skipped; returns how many loaded.
    /// No events are published for seeds.
    pub fn seed_inventory(&self, seeds: Vec<NewAsset>) -> usize {
        let mut ledger = self.ledger.write().unwrap();
        let mut loaded = 0;
        for seed in seeds {
            let name = seed.name.clone();
            match ledger.add(seed) {
                Ok(asset) => {
                    debug!(asset_id = %asset.id, name = %asset.name, "seeded asset");
                    loaded += 1;
                }
                Err(e) => warn!(name = %name, error = %e, "skipping seed entry"),
            }
        }
        info!(agent = %self.name, count = loaded, "inventory seeded");
        loaded
    }

    /// Handle one request mapping and produce the response envelope.
    pub fn process_request(&self, request: &Value) -> AgentResponse {
        match self.dispatch(request) {
            Ok(reply) => AgentResponse::ok(reply),
            Err(e) => {
                warn!(agent = %self.name, error = %e, "request failed");
                AgentResponse::error(e)
            }
        }
    }

    fn dispatch(&self, request: &Value) -> Result<Reply, Error> {
        let message_type = request
            .get("message_type")
            .and_then(Value::as_str)
            .ok_or(RequestError::MissingMessageType)?;
        let message_type = message_type.parse::<MessageType>()?;
        debug!(agent = %self.name, %message_type, "dispatching request");

        match message_type {
            MessageType::FindAssetId => self.find_asset_id(request),
            MessageType::GetAllAssets => self.get_all_assets(),
            MessageType::AddAsset => self.add_asset(request),
            MessageType::UpdateAsset => self.update_asset(request),
            MessageType::RemoveAsset => self.remove_asset(request),
            MessageType::Allocate => self.allocate(request),
            MessageType::Return => self.return_units(request),
            MessageType::GetUsageLog => self.get_usage_log(request),
        }
    }

    fn find_asset_id(&self, request: &Value) -> Result<Reply, Error> {
        let name = required_str(request, "name")?;
        let ledger = self.ledger.read().unwrap();
        let asset_id = ledger
            .id_by_name(name)
            .ok_or(RequestError::NameNotFound)?;
        Ok(Reply::AssetId { asset_id })
    }

    fn get_all_assets(&self) -> Result<Reply, Error> {
        let ledger = self.ledger.read().unwrap();
        Ok(Reply::AllAssets {
            all_assets: ledger.all(),
        })
    }

    fn add_asset(&self, request: &Value) -> Result<Reply, Error> {
        let new_asset = match request.get("asset") {
            None | Some(Value::Null) => return Err(RequestError::MissingField("asset").into()),
            Some(value) => serde_json::from_value::<NewAsset>(value.clone()).map_err(|e| {
                RequestError::InvalidField {
                    field: "asset",
                    reason: e.to_string(),
                }
            })?,
        };

        let mut ledger = self.ledger.write().unwrap();
        let asset = ledger.add(new_asset)?;
        self.event_bus.publish(AssetEvent::AssetAdded {
            asset_id: asset.id.clone(),
            name: asset.name.clone(),
            quantity: asset.quantity,
            timestamp: Utc::now(),
        });
        Ok(Reply::AssetAdded {
            asset_added: asset.id,
        })
    }

    fn update_asset(&self, request: &Value) -> Result<Reply, Error> {
        let field = required_str(request, "update_field")?.parse::<UpdateField>()?;
        let replace = optional_bool(request, "replace")?;

        let mut ledger = self.ledger.write().unwrap();
        let id = resolve_target(&ledger, request)?;

        match field {
            UpdateField::Quantity => {
                let quantity = required_i64(request, "quantity")?;
                ledger.update_quantity(&id, quantity, replace)?;
            }
            UpdateField::Types => {
                let value = match request.get("types") {
                    None | Some(Value::Null) => {
                        return Err(RequestError::MissingField("types").into());
                    }
                    Some(value) => value,
                };
                let types: BTreeSet<String> =
                    serde_json::from_value(value.clone()).map_err(|_| {
                        RequestError::InvalidField {
                            field: "types",
                            reason: "expected an array of type tags".into(),
                        }
                    })?;
                ledger.update_types(&id, types, replace)?;
            }
            UpdateField::Location => {
                let value = match request.get("location") {
                    None | Some(Value::Null) => {
                        return Err(RequestError::MissingField("location").into());
                    }
                    Some(value) => value,
                };
                let location: LocationUpdate =
                    serde_json::from_value(value.clone()).map_err(|_| {
                        RequestError::InvalidField {
                            field: "location",
                            reason: "expected a [lat, lon] pair or a location name".into(),
                        }
                    })?;
                ledger.update_location(&id, location)?;
            }
        }

        self.event_bus.publish(AssetEvent::AssetUpdated {
            asset_id: id.clone(),
            field: field.as_str().into(),
            timestamp: Utc::now(),
        });
        Ok(Reply::AssetUpdated { asset_updated: id })
    }

    fn remove_asset(&self, request: &Value) -> Result<Reply, Error> {
        let mut ledger = self.ledger.write().unwrap();
        let id = resolve_target(&ledger, request)?;
        let removed = ledger.remove(&id).ok_or(RequestError::IdNotFound)?;
        self.event_bus.publish(AssetEvent::AssetRemoved {
            asset_id: id.clone(),
            name: removed.name,
            timestamp: Utc::now(),
        });
        Ok(Reply::AssetRemoved { asset_removed: id })
    }

    fn allocate(&self, request: &Value) -> Result<Reply, Error> {
        let asset_id = AssetId::new(required_str(request, "asset_id")?);
        let team_id = TeamId::new(required_str(request, "team_id")?);
        let quantity = required_u32(request, "quantity")?;

        let mut ledger = self.ledger.write().unwrap();
        let allocation = ledger.allocate(&asset_id, &team_id, quantity)?;
        self.event_bus.publish(AssetEvent::UnitsAllocated {
            asset_id,
            team_id,
            quantity: allocation.quantity,
            remaining: allocation.remaining,
            timestamp: Utc::now(),
        });
        Ok(Reply::Message {
            message: allocation.to_string(),
        })
    }

    fn return_units(&self, request: &Value) -> Result<Reply, Error> {
        let asset_id = AssetId::new(required_str(request, "asset_id")?);
        let team_id = TeamId::new(required_str(request, "team_id")?);
        // Non-positive counts share the ledger's own wording.
        let quantity = required_i64(request, "quantity")?;
        if quantity <= 0 {
            return Err(muster_core::error::LedgerError::InvalidQuantity.into());
        }
        let quantity = u32::try_from(quantity).map_err(|_| RequestError::InvalidField {
            field: "quantity",
            reason: "exceeds the supported unit count".into(),
        })?;

        let mut ledger = self.ledger.write().unwrap();
        let outcome = ledger.return_units(&asset_id, &team_id, quantity)?;
        self.event_bus.publish(AssetEvent::UnitsReturned {
            asset_id,
            team_id,
            quantity,
            timestamp: Utc::now(),
        });
        Ok(Reply::Message {
            message: outcome.to_string(),
        })
    }

    fn get_usage_log(&self, request: &Value) -> Result<Reply, Error> {
        let ledger = self.ledger.read().unwrap();
        let id = resolve_target(&ledger, request)?;
        Ok(Reply::UsageLog {
            usage_log: ledger.usage_log(&id),
        })
    }
}

/// The shared id-or-name resolution rule.
///
/// Three distinguishable failures, in this order: neither field given;
/// a given name that resolves to nothing; a given id that is not
/// registered. Callers depend on the distinct messages.
fn resolve_target(ledger: &AssetLedger, request: &Value) -> Result<AssetId, RequestError> {
    if let Some(id) = optional_str(request, "id") {
        let id = AssetId::new(id);
        if !ledger.contains(&id) {
            return Err(RequestError::IdNotFound);
        }
        return Ok(id);
    }
    if let Some(name) = optional_str(request, "name") {
        return ledger.id_by_name(name).ok_or(RequestError::NameNotFound);
    }
    Err(RequestError::MissingIdOrName)
}
