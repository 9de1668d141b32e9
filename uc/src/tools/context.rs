//! ToolContext - execution context for tools

use std::sync::Arc;

use tracing::debug;

use crate::rates::RateProvider;

/// Per-session context handed to every tool invocation
///
/// Tools are stateless singletons; anything session-specific or external
/// (the session id for logging, the rate provider) arrives through here.
#[derive(Clone)]
pub struct ToolContext {
    /// Session this call belongs to
    pub session_id: String,

    /// Exchange-rate source for currency conversions
    rates: Arc<dyn RateProvider>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(session_id: impl Into<String>, rates: Arc<dyn RateProvider>) -> Self {
        let session_id = session_id.into();
        debug!(%session_id, "ToolContext::new: called");
        Self { session_id, rates }
    }

    /// Rate provider for currency lookups
    pub fn rates(&self) -> &dyn RateProvider {
        self.rates.as_ref()
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").field("session_id", &self.session_id).finish()
    }
}
