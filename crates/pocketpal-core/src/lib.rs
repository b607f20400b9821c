//! Business logic and trait definitions for the Pocketpal chat relay.
//!
//! This crate defines the "ports" (the completion provider and quota store
//! traits) that the infrastructure layer implements, plus the pure pieces
//! of the pipeline: safety precheck, content normalizer, and the relay
//! orchestrator. It depends only on `pocketpal-types` -- never on
//! `pocketpal-infra` or any HTTP/IO crate.

pub mod llm;
pub mod normalize;
pub mod quota;
pub mod relay;
pub mod safety;
