//! Approval port for market updates.

use async_trait::async_trait;

use crate::domain::MarketConfig;
use crate::error::Result;

/// Decides whether a drifted market gets updated.
///
/// Called sequentially, once per market whose proposed parameters differ
/// from the current ones.
#[async_trait]
pub trait MarketApproval: Send + Sync {
    /// Return `true` to apply `proposed` in place of `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the decision cannot be obtained (e.g. the prompt
    /// was interrupted). The pass aborts on error.
    async fn approve(&self, current: &MarketConfig, proposed: &MarketConfig) -> Result<bool>;

    /// True when no operator is involved.
    fn is_automatic(&self) -> bool {
        false
    }
}

/// Approves every update without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl MarketApproval for AutoApprove {
    async fn approve(&self, _current: &MarketConfig, _proposed: &MarketConfig) -> Result<bool> {
        Ok(true)
    }

    fn is_automatic(&self) -> bool {
        true
    }
}
