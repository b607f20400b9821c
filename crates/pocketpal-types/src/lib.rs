//! Shared domain types for the Pocketpal chat relay.
//!
//! This crate contains the data shapes used across the relay: the wire
//! contract, quota records, completion request/response types, and the
//! relay configuration with its safety-critical default tables.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod quota;
