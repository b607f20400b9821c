//! `ppal ask` -- one-shot question through a running relay.

use pocketpal_types::config::RelayConfig;

use crate::client::{ChatClientError, RelayClient};

pub async fn ask(
    config: &RelayConfig,
    relay_url: &str,
    message: &str,
    identity: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let client = RelayClient::new(relay_url, config);

    match client.ask(message, identity).await {
        Ok(reply) => {
            if json {
                println!("{}", serde_json::json!({ "reply": reply }));
            } else {
                println!();
                println!("  {}", console::style(&reply).cyan());
                println!();
            }
            Ok(())
        }
        Err(err @ ChatClientError::Rejected(_)) => {
            Err(anyhow::Error::new(err).context("the relay rejected the request"))
        }
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("could not reach the relay at {relay_url}"))),
    }
}
