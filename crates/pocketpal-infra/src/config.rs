//! Relay configuration loader.
//!
//! Reads `relay.toml` from the data directory (`~/.pocketpal/` in
//! production, `POCKETPAL_DATA_DIR` override) and deserializes it into
//! [`RelayConfig`]. Falls back to the compiled-in defaults when the file
//! is missing or malformed, so a bad config edit can never take the relay
//! down -- it just loses the overrides.

use std::path::{Path, PathBuf};

use pocketpal_types::config::RelayConfig;

/// Resolve the data directory: `POCKETPAL_DATA_DIR` if set, otherwise
/// `~/.pocketpal` (falling back to `.pocketpal` in the working directory
/// when no home directory exists).
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("POCKETPAL_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".pocketpal"))
        .unwrap_or_else(|| PathBuf::from(".pocketpal"))
}

/// Load relay configuration from `{data_dir}/relay.toml`.
///
/// - Missing file: returns [`RelayConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
/// - Valid file: returns the parsed config (unset fields keep defaults).
pub async fn load_relay_config(data_dir: &Path) -> RelayConfig {
    let config_path = data_dir.join("relay.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No relay.toml found at {}, using defaults",
                config_path.display()
            );
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RelayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_relay_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.daily_message_limit, 25);
        assert_eq!(config.max_reply_chars, 400);
    }

    #[tokio::test]
    async fn load_relay_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("relay.toml"),
            r#"
daily_message_limit = 5
limit_reply = "All done for today."

[[jargon_rules]]
pattern = "ketogenic"
replacement = "special food plan"
"#,
        )
        .await
        .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.daily_message_limit, 5);
        assert_eq!(config.limit_reply, "All done for today.");
        assert_eq!(config.jargon_rules.len(), 1);
        assert_eq!(config.jargon_rules[0].replacement, "special food plan");
        // Unset fields keep their defaults.
        assert_eq!(config.max_reply_sentences, 4);
    }

    #[tokio::test]
    async fn load_relay_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("relay.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.daily_message_limit, 25);
    }
}
