//! Provider credential lookup from the process environment.
//!
//! The completion credential is deployment configuration, not user data,
//! so it lives in environment variables only. `POCKETPAL_API_KEY` takes
//! priority (app-specific deployments), falling back to the conventional
//! `OPENAI_API_KEY`. Absence is not an error here: the provider is still
//! constructed and every invocation fails with a credential error, which
//! the orchestrator converts to the fixed fallback reply.

use secrecy::SecretString;

/// Environment variables checked for the provider credential, in priority
/// order.
const CREDENTIAL_VARS: [&str; 2] = ["POCKETPAL_API_KEY", "OPENAI_API_KEY"];

/// Read the completion provider credential from the environment.
///
/// Empty and non-unicode values are treated as absent.
pub fn provider_api_key() -> Option<SecretString> {
    for var in CREDENTIAL_VARS {
        match std::env::var(var) {
            Ok(val) if !val.trim().is_empty() => return Some(SecretString::from(val)),
            _ => continue,
        }
    }
    None
}
