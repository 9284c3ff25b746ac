//! Interactive operator prompts.

use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm, Password};

use super::markets::render_diff;
use super::output;
use crate::domain::MarketConfig;
use crate::error::{Error, Result};
use crate::infrastructure::config::Credentials;
use crate::port::outbound::approval::MarketApproval;

/// Asks the operator before each market update.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptApproval;

#[async_trait]
impl MarketApproval for PromptApproval {
    async fn approve(&self, current: &MarketConfig, proposed: &MarketConfig) -> Result<bool> {
        output::section(&format!("{} ({})", current.name(), current.symbol()));
        output::lines(&render_diff(current, proposed));

        let prompt = format!("Update {}?", current.symbol());
        // dialoguer blocks on the terminal.
        let confirmed = tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await
        .map_err(|err| Error::Prompt(err.to_string()))??;
        Ok(confirmed)
    }
}

/// Fill in missing source-venue credentials from the terminal.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read.
pub fn fill_credentials(venue: &str, credentials: &mut Credentials) -> Result<()> {
    let theme = ColorfulTheme::default();
    if credentials.api_key.as_deref().map_or(true, str::is_empty) {
        let key = Password::with_theme(&theme)
            .with_prompt(format!("{venue} API key"))
            .interact()?;
        credentials.api_key = Some(key);
    }
    if credentials.secret.as_deref().map_or(true, str::is_empty) {
        let secret = Password::with_theme(&theme)
            .with_prompt(format!("{venue} API secret"))
            .interact()?;
        credentials.secret = Some(secret);
    }
    Ok(())
}
