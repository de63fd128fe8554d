//! # Muster Core
//!
//! Domain types and error definitions for the Muster SAR asset ledger.
//! This crate has **zero sibling dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The ledger, dispatcher, config, and CLI crates all depend inward on
//! these types. Wire contracts (response envelope keys, usage-log action
//! names, operator-facing message wording) live here so every crate agrees
//! on them.

pub mod allocation;
pub mod asset;
pub mod error;
pub mod event;
pub mod request;
pub mod usage;

// Re-export key types at crate root for ergonomics
pub use allocation::{Allocation, ReturnOutcome};
pub use asset::{Asset, AssetId, AssetStatus, LocationUpdate, NewAsset, TeamId};
pub use error::{Error, LedgerError, RequestError, Result};
pub use event::{AssetEvent, EventBus};
pub use request::{AgentResponse, MessageType, Reply, ResponseBody, UpdateField};
pub use usage::{UsageAction, UsageLogEntry};
