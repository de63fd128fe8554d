//! # Muster Agent
//!
//! The request dispatcher — the asset-manager agent the coordination
//! layer talks to.
//!
//! A request is a JSON mapping with a `message_type` naming one ledger
//! operation plus that operation's fields. The agent:
//!
//! 1. **Validates** the message type and required fields
//! 2. **Resolves** the target asset (by id or by name, with three
//!    distinguishable not-found messages)
//! 3. **Calls** the ledger under a single lock guard
//! 4. **Wraps** the outcome in the uniform `{success, ...}` envelope
//! 5. **Publishes** an event on the bus after successful mutations
//!
//! Dispatch is total: malformed input produces an error envelope, never a
//! panic.

pub mod dispatch;
mod extract;

pub use dispatch::AssetManagerAgent;
