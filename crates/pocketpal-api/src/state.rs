//! Application state wiring the relay together.
//!
//! The relay service is generic over provider/store traits, but AppState
//! pins it to the concrete infra implementations: the OpenAI client and
//! the in-memory quota store.

use std::sync::Arc;

use pocketpal_core::relay::RelayService;
use pocketpal_infra::config::{load_relay_config, resolve_data_dir};
use pocketpal_infra::llm::OpenAiProvider;
use pocketpal_infra::quota::MemoryQuotaStore;
use pocketpal_types::config::RelayConfig;

/// Concrete type alias for the relay service pinned to infra implementations.
pub type ConcreteRelayService = RelayService<OpenAiProvider, MemoryQuotaStore>;

/// Shared application state used by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelayService>,
    pub config: Arc<RelayConfig>,
    /// Whether a provider credential was found at startup. Requests still
    /// work without one -- they all take the fallback path.
    pub provider_ready: bool,
}

impl AppState {
    /// Initialize the application state: load config, wire the relay.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = Arc::new(load_relay_config(&data_dir).await);

        let provider = OpenAiProvider::from_env();
        let provider_ready = provider.has_credential();
        if !provider_ready {
            tracing::warn!(
                "no completion credential in environment; every chat will return the fallback reply"
            );
        }

        let relay = RelayService::new(provider, MemoryQuotaStore::new(), Arc::clone(&config));

        Ok(Self {
            relay: Arc::new(relay),
            config,
            provider_ready,
        })
    }
}
