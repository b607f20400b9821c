//! Infrastructure implementations for the Pocketpal chat relay.
//!
//! Concrete backends for the ports defined in `pocketpal-core`: the
//! dashmap-backed in-memory quota store, the OpenAI-compatible completion
//! client, the environment credential lookup, and the TOML config loader.

pub mod config;
pub mod llm;
pub mod quota;
pub mod secret;
