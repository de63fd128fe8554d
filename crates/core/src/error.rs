//! Error types for the Muster domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the display strings of
//! `LedgerError` and `RequestError` are part of the response contract —
//! the coordination agent matches on them, so they must not drift.

use thiserror::Error;

use crate::asset::AssetId;

/// The top-level error type for all Muster operations.
///
/// Wraps the per-context errors transparently so that the exact
/// boundary strings survive `?` conversion unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by the asset ledger itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The requested asset id is not registered.
    #[error("Asset not found")]
    AssetNotFound,

    /// An asset with this name is already registered.
    #[error("Asset name already exists: {0}")]
    DuplicateName(String),

    /// An asset with this explicit id is already registered.
    #[error("Asset ID already exists: {0}")]
    DuplicateId(AssetId),

    /// Add was called without a name.
    #[error("Asset requires a non-empty name")]
    EmptyName,

    /// Add was called without any type tags.
    #[error("Asset requires at least one type")]
    EmptyTypes,

    /// Allocation asked for more units than are currently available.
    #[error("Not enough units available, {remaining} units remaining")]
    InsufficientQuantity { remaining: u32 },

    /// A return of zero units.
    #[error("Quantity must be greater than 0")]
    InvalidQuantity,

    /// A quantity update that would drive the total below zero.
    #[error("Quantity cannot be negative")]
    NegativeQuantity,
}

/// Failures raised while validating and resolving an incoming request,
/// before the ledger is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("message_type is required")]
    MissingMessageType,

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    /// A required request field is absent.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An operation addressing an asset was given neither `id` nor `name`.
    #[error("Asset ID or Name is required")]
    MissingIdOrName,

    /// A `name` was given but is not in the name index.
    #[error("Asset not found")]
    NameNotFound,

    /// An `id` was given (or resolved) but is not registered.
    #[error("Asset ID not found")]
    IdNotFound,

    #[error("Unknown update field: {0}")]
    UnknownUpdateField(String),

    /// A field is present but its value cannot be used.
    #[error("Invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_quantity_reports_exact_remaining() {
        let err = LedgerError::InsufficientQuantity { remaining: 4 };
        assert_eq!(err.to_string(), "Not enough units available, 4 units remaining");
    }

    #[test]
    fn not_found_messages_stay_distinguishable() {
        // The dispatcher's three-way rule depends on these exact strings.
        assert_eq!(RequestError::MissingIdOrName.to_string(), "Asset ID or Name is required");
        assert_eq!(RequestError::NameNotFound.to_string(), "Asset not found");
        assert_eq!(RequestError::IdNotFound.to_string(), "Asset ID not found");
    }

    #[test]
    fn ledger_miss_matches_original_message() {
        assert_eq!(LedgerError::AssetNotFound.to_string(), "Asset not found");
    }

    #[test]
    fn invalid_return_quantity_message() {
        assert_eq!(LedgerError::InvalidQuantity.to_string(), "Quantity must be greater than 0");
    }

    #[test]
    fn transparent_wrapping_preserves_strings() {
        let err: Error = LedgerError::InsufficientQuantity { remaining: 2 }.into();
        assert_eq!(err.to_string(), "Not enough units available, 2 units remaining");

        let err: Error = RequestError::MissingField("team_id").into();
        assert_eq!(err.to_string(), "team_id is required");
    }
}
