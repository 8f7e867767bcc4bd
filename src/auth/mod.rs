pub mod storage;

pub use storage::AuthStorage;

use anyhow::{Context, Result, bail};
use storage::Credential;

/// Providers that accept a stored API key.
const SUPPORTED_PROVIDERS: &[&str] = &["gemini"];

/// Save an API key for a provider.
///
/// Shared by the CLI `moodbrew login` subcommand and the `/login` REPL
/// command.
pub fn login(db_path: &str, provider: &str, key: &str) -> Result<()> {
    if !SUPPORTED_PROVIDERS.contains(&provider) {
        bail!("unsupported provider: {provider}");
    }
    let key = key.trim();
    if key.is_empty() {
        bail!("no API key provided");
    }
    let storage = AuthStorage::open(db_path).context("failed to open auth storage")?;
    storage
        .set(
            provider,
            Credential::ApiKey {
                key: key.to_string(),
            },
        )
        .context("failed to save credentials")?;
    Ok(())
}

/// Remove stored credentials for a provider.
///
/// Shared by the CLI `moodbrew logout` subcommand and the `/logout` REPL
/// command.
pub fn logout(db_path: &str, provider: &str) -> Result<()> {
    let storage = AuthStorage::open(db_path).context("failed to open auth storage")?;
    storage
        .remove(provider)
        .context("failed to remove credentials")?;
    Ok(())
}
