//! Asset domain types.
//!
//! These are the core value objects that flow through the system:
//! the coordination agent sends a request → the dispatcher resolves the
//! target asset → the ledger mutates it and records the usage-log entry.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique stable identifier for an asset. Primary key in the ledger.
///
/// Operator-assigned call signs like `"A001"` pass through unchanged;
/// [`AssetId::generate`] mints a fresh UUID for assets added without one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique identifier. Called once per add, never
    /// shared across invocations.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a field team that can check units out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Operational status of an asset.
///
/// Settable via the ledger but deliberately not maintained by
/// allocate/return; status listings are best-effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    Available,
    InUse,
    InMaintenance,
}

/// A trackable SAR resource: equipment, vehicle, or supply stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique stable identifier (primary key)
    pub id: AssetId,

    /// Human-readable label, unique across the ledger
    pub name: String,

    /// Free-form type tags ("Vehicle", "Aerial", ...); duplicates collapse
    pub types: BTreeSet<String>,

    /// Total units owned
    pub quantity: u32,

    /// Units not currently checked out to a team
    pub unallocated_quantity: u32,

    /// Free-text location label
    pub location_name: String,

    /// (latitude, longitude) in decimal degrees
    #[serde(rename = "location_GPS")]
    pub location_gps: (f64, f64),

    /// Which team currently holds units, if any. A single last-writer-wins
    /// marker: the ledger does not track multiple allocating teams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated: Option<TeamId>,

    /// Operational status (best-effort, see [`AssetStatus`])
    #[serde(default)]
    pub status: AssetStatus,
}

impl Asset {
    /// Materialize an asset from add parameters. Generates an id when none
    /// was supplied; all units start unallocated.
    pub fn new(new_asset: NewAsset) -> Self {
        Self {
            id: new_asset.id.unwrap_or_else(AssetId::generate),
            name: new_asset.name,
            types: new_asset.types,
            quantity: new_asset.quantity,
            unallocated_quantity: new_asset.quantity,
            location_name: new_asset.location_name,
            location_gps: new_asset.location_gps,
            allocated: None,
            status: AssetStatus::Available,
        }
    }

    /// Units of this asset currently checked out.
    pub fn allocated_quantity(&self) -> u32 {
        self.quantity.saturating_sub(self.unallocated_quantity)
    }

    /// Whether this asset carries the given type tag.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.contains(tag)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.types.iter().map(String::as_str).collect();
        write!(
            f,
            "Asset {} ({}) [{}] at {} ({}, {}): {}/{} units available",
            self.name,
            self.id,
            tags.join(", "),
            self.location_name,
            self.location_gps.0,
            self.location_gps.1,
            self.unallocated_quantity,
            self.quantity,
        )?;
        if let Some(team) = &self.allocated {
            write!(f, ", allocated to {team}")?;
        }
        Ok(())
    }
}

/// Parameters for adding an asset.
///
/// Deserializes directly from the request's `asset` object; everything
/// except `name` and `types` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,

    pub types: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AssetId>,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub location_name: String,

    #[serde(default, rename = "location_GPS")]
    pub location_gps: (f64, f64),
}

fn default_quantity() -> u32 {
    1
}

impl NewAsset {
    pub fn new(
        name: impl Into<String>,
        types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            types: types.into_iter().map(Into::into).collect(),
            id: None,
            quantity: default_quantity(),
            location_name: String::new(),
            location_gps: (0.0, 0.0),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(AssetId::new(id));
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_location(mut self, name: impl Into<String>, gps: (f64, f64)) -> Self {
        self.location_name = name.into();
        self.location_gps = gps;
        self
    }
}

/// A location update: either a coordinate pair or a free-text label.
///
/// The two location fields on an asset are independent; applying one
/// variant never clears the other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationUpdate {
    Gps(f64, f64),
    Name(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = AssetId::generate();
        let b = AssetId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn new_asset_starts_fully_unallocated() {
        let asset = Asset::new(NewAsset::new("Drone", ["Aerial"]).with_quantity(5));
        assert_eq!(asset.quantity, 5);
        assert_eq!(asset.unallocated_quantity, 5);
        assert_eq!(asset.allocated_quantity(), 0);
        assert!(asset.allocated.is_none());
        assert_eq!(asset.status, AssetStatus::Available);
    }

    #[test]
    fn quantity_defaults_to_one() {
        let new_asset: NewAsset =
            serde_json::from_value(serde_json::json!({"name": "Rope", "types": ["Gear"]})).unwrap();
        assert_eq!(new_asset.quantity, 1);
        assert_eq!(new_asset.location_name, "");
        assert_eq!(new_asset.location_gps, (0.0, 0.0));
        assert!(new_asset.id.is_none());
    }

    #[test]
    fn type_tags_collapse_duplicates() {
        let new_asset = NewAsset::new("Flashlight", ["Tool", "Light", "Tool"]);
        assert_eq!(new_asset.types.len(), 2);
    }

    #[test]
    fn display_carries_the_roster_line() {
        let mut asset = Asset::new(
            NewAsset::new("Drone", ["Aerial", "Vehicle"])
                .with_id("A001")
                .with_quantity(5)
                .with_location("SAR Base", (39.32, -120.21)),
        );
        let line = asset.to_string();
        assert!(line.contains("Drone"));
        assert!(line.contains("A001"));
        assert!(line.contains("Aerial, Vehicle"));
        assert!(line.contains("SAR Base"));
        assert!(line.contains("5/5 units available"));
        assert!(!line.contains("allocated to"));

        asset.allocated = Some(TeamId::new("GroundTroop1"));
        assert!(asset.to_string().contains("allocated to GroundTroop1"));
    }

    #[test]
    fn gps_wire_name_is_preserved() {
        let asset = Asset::new(NewAsset::new("Boat", ["Water"]).with_id("W001"));
        let json = serde_json::to_value(&asset).unwrap();
        assert!(json.get("location_GPS").is_some());
        assert!(json.get("location_gps").is_none());
        assert_eq!(json["status"], "available");
    }

    #[test]
    fn asset_serialization_roundtrip() {
        let asset = Asset::new(
            NewAsset::new("Medical Kit", ["First Aid", "Medical"])
                .with_id("M010")
                .with_quantity(10),
        );
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, asset);
    }

    #[test]
    fn location_update_from_pair_or_string() {
        let gps: LocationUpdate =
            serde_json::from_value(serde_json::json!([39.21, -120.425])).unwrap();
        assert_eq!(gps, LocationUpdate::Gps(39.21, -120.425));

        let name: LocationUpdate =
            serde_json::from_value(serde_json::json!("Donner Pass")).unwrap();
        assert_eq!(name, LocationUpdate::Name("Donner Pass".into()));
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_value(AssetStatus::Available).unwrap(), "available");
        assert_eq!(serde_json::to_value(AssetStatus::InUse).unwrap(), "in_use");
        assert_eq!(serde_json::to_value(AssetStatus::InMaintenance).unwrap(), "in_maintenance");
    }
}
