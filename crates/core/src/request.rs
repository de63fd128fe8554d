//! Request/response envelope.
//!
//! The coordination layer hands the dispatcher a plain JSON mapping with a
//! `message_type` field and forwards the response mapping unchanged, so the
//! shapes here are the external contract: every response carries
//! `success: bool` plus exactly one payload key, or `error` on failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::asset::{Asset, AssetId};
use crate::error::RequestError;
use crate::usage::UsageLogEntry;

/// The operations a request can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    FindAssetId,
    GetAllAssets,
    AddAsset,
    UpdateAsset,
    RemoveAsset,
    Allocate,
    Return,
    GetUsageLog,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FindAssetId => "find_asset_id",
            Self::GetAllAssets => "get_all_assets",
            Self::AddAsset => "add_asset",
            Self::UpdateAsset => "update_asset",
            Self::RemoveAsset => "remove_asset",
            Self::Allocate => "allocate",
            Self::Return => "return",
            Self::GetUsageLog => "get_usage_log",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "find_asset_id" => Ok(Self::FindAssetId),
            "get_all_assets" => Ok(Self::GetAllAssets),
            "add_asset" => Ok(Self::AddAsset),
            "update_asset" => Ok(Self::UpdateAsset),
            "remove_asset" => Ok(Self::RemoveAsset),
            "allocate" => Ok(Self::Allocate),
            "return" => Ok(Self::Return),
            "get_usage_log" => Ok(Self::GetUsageLog),
            other => Err(RequestError::UnknownMessageType(other.to_string())),
        }
    }
}

/// Which asset field an `update_asset` request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateField {
    Types,
    Quantity,
    Location,
}

impl UpdateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Types => "types",
            Self::Quantity => "quantity",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UpdateField {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "types" => Ok(Self::Types),
            "quantity" => Ok(Self::Quantity),
            "location" => Ok(Self::Location),
            other => Err(RequestError::UnknownUpdateField(other.to_string())),
        }
    }
}

/// Successful-response payload. Each variant serializes as exactly one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// `find_asset_id` result
    AssetId { asset_id: AssetId },
    /// `get_all_assets` result
    AllAssets { all_assets: Vec<Asset> },
    /// `add_asset` result: id of the inserted asset
    AssetAdded { asset_added: AssetId },
    /// `update_asset` result: id of the touched asset
    AssetUpdated { asset_updated: AssetId },
    /// `remove_asset` result: id of the erased asset
    AssetRemoved { asset_removed: AssetId },
    /// `get_usage_log` result, in append order
    UsageLog { usage_log: Vec<UsageLogEntry> },
    /// Human-readable outcome (allocate/return)
    Message { message: String },
}

/// The uniform response envelope.
///
/// `success` is present on every path. The original surrounding framework
/// let unexpected failures escape as a bare `{error}` mapping; dispatch here
/// is total over `Result`, so the envelope never degrades.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentResponse {
    pub success: bool,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Reply(Reply),
    Error { error: String },
}

impl AgentResponse {
    pub fn ok(reply: Reply) -> Self {
        Self {
            success: true,
            body: ResponseBody::Reply(reply),
        }
    }

    pub fn error(reason: impl fmt::Display) -> Self {
        Self {
            success: false,
            body: ResponseBody::Error {
                error: reason.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The error string, when this is a failure response.
    pub fn error_text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Error { error } => Some(error),
            ResponseBody::Reply(_) => None,
        }
    }

    /// The `message` payload, when present.
    pub fn message_text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Reply(Reply::Message { message }) => Some(message),
            _ => None,
        }
    }

    /// Serialize to the wire mapping. Infallible for these payload types;
    /// a serializer fault still yields a well-formed error envelope.
    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "response serialization failed");
            serde_json::json!({ "success": false, "error": e.to_string() })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::NewAsset;

    #[test]
    fn message_type_parses_every_operation() {
        let cases = [
            ("find_asset_id", MessageType::FindAssetId),
            ("get_all_assets", MessageType::GetAllAssets),
            ("add_asset", MessageType::AddAsset),
            ("update_asset", MessageType::UpdateAsset),
            ("remove_asset", MessageType::RemoveAsset),
            ("allocate", MessageType::Allocate),
            ("return", MessageType::Return),
            ("get_usage_log", MessageType::GetUsageLog),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<MessageType>().unwrap(), expected);
            assert_eq!(expected.as_str(), text);
        }
    }

    #[test]
    fn unknown_message_type_keeps_the_input() {
        let err = "reticulate".parse::<MessageType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown message type: reticulate");
    }

    #[test]
    fn unknown_update_field_keeps_the_input() {
        assert_eq!("types".parse::<UpdateField>().unwrap(), UpdateField::Types);
        let err = "color".parse::<UpdateField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown update field: color");
    }

    #[test]
    fn success_envelope_has_one_payload_key() {
        let response = AgentResponse::ok(Reply::AssetId {
            asset_id: AssetId::new("A001"),
        });
        let value = response.into_value();
        assert_eq!(value["success"], true);
        assert_eq!(value["asset_id"], "A001");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn error_envelope_carries_success_false() {
        let response = AgentResponse::error("Asset not found");
        assert!(!response.is_success());
        assert_eq!(response.error_text(), Some("Asset not found"));

        let value = response.into_value();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Asset not found");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn message_reply_round_trips_the_text() {
        let response = AgentResponse::ok(Reply::Message {
            message: "Returned all G003 units".into(),
        });
        assert_eq!(response.message_text(), Some("Returned all G003 units"));
        assert_eq!(response.into_value()["message"], "Returned all G003 units");
    }

    #[test]
    fn all_assets_reply_serializes_the_roster() {
        let assets = vec![
            Asset::new(NewAsset::new("Drone", ["Aerial"]).with_id("A001")),
            Asset::new(NewAsset::new("Rescue Boat", ["Water"]).with_id("W001")),
        ];
        let value = AgentResponse::ok(Reply::AllAssets { all_assets: assets }).into_value();
        let listed = value["all_assets"].as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["name"], "Drone");
        assert_eq!(listed[1]["id"], "W001");
    }
}
