//! Free-text operational advice from an external language model.
//!
//! The simulation only sees the [`Advisor`] trait. Any failure is turned
//! into [`FALLBACK_ADVICE`] by [`advise_or_fallback`], so callers never
//! handle an advisory error themselves.

#[cfg(feature = "advisory")]
pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AdvisoryConfig;
use crate::sim::{Advice, GridState, GridStats};

/// Advice shown whenever the collaborator cannot answer.
pub const FALLBACK_ADVICE: &str = "Manual override suggested.";

/// Grid summary submitted to the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    /// Total generation (MW).
    pub generation_mw: f64,
    /// Total consumption (MW).
    pub consumption_mw: f64,
    /// Net load (MW).
    pub net_load_mw: f64,
    /// Active scenario name, or `"normal"`.
    pub scenario: String,
}

impl AdvisoryRequest {
    /// Builds a request from a stats snapshot and scenario label.
    pub fn new(stats: &GridStats, scenario: impl Into<String>) -> Self {
        Self {
            generation_mw: stats.total_generation,
            consumption_mw: stats.total_consumption,
            net_load_mw: stats.net_load,
            scenario: scenario.into(),
        }
    }

    /// Snapshot of `state` at the moment of the call.
    pub fn from_state(state: &GridState) -> Self {
        Self::new(&state.stats(), state.scenario_label())
    }

    /// Renders the fixed prompt sent to the model.
    pub fn prompt(&self) -> String {
        format!(
            "You are an operator assistant for a virtual power plant. \
             Current generation: {:.1} MW. Current consumption: {:.1} MW. \
             Net load: {:.1} MW. Active scenario: {}. \
             Give one short, actionable recommendation to balance the grid.",
            self.generation_mw, self.consumption_mw, self.net_load_mw, self.scenario
        )
    }
}

/// Why the collaborator produced no advice.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// No collaborator is configured.
    #[error("advisory service unavailable")]
    Unavailable,
    /// The API key environment variable is unset or empty.
    #[error("missing API key in ${0}")]
    MissingApiKey(String),
    /// Connection, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success HTTP status.
    #[error("advisory service returned HTTP {0}")]
    Status(u16),
    /// Response body did not contain usable text.
    #[error("malformed advisory response: {0}")]
    Malformed(String),
}

/// An asynchronous one-shot advice source.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Returns advice for `request`, or why there is none.
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError>;
}

/// Advisor that never answers; every request resolves to the fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAdvisor;

#[async_trait]
impl Advisor for OfflineAdvisor {
    async fn advise(&self, _request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

/// Queries `advisor`, mapping any failure to [`FALLBACK_ADVICE`].
pub async fn advise_or_fallback(advisor: &dyn Advisor, request: &AdvisoryRequest) -> String {
    match advisor.advise(request).await {
        Ok(text) => {
            info!(scenario = %request.scenario, "advisory received");
            text
        }
        Err(err) => {
            warn!(%err, "advisory failed, using fallback");
            FALLBACK_ADVICE.to_string()
        }
    }
}

/// Picks the advisor for `cfg`.
///
/// Without the `advisory` feature, or when the API key is missing, this is
/// [`OfflineAdvisor`].
pub fn from_config(cfg: &AdvisoryConfig) -> Arc<dyn Advisor> {
    #[cfg(feature = "advisory")]
    {
        match gemini::GeminiAdvisor::from_config(cfg) {
            Ok(advisor) => return Arc::new(advisor),
            Err(err) => warn!(%err, "advisory disabled"),
        }
    }
    #[cfg(not(feature = "advisory"))]
    let _ = cfg;
    Arc::new(OfflineAdvisor)
}

/// Requests advice for `stats` taken at `requested_at_ms`.
///
/// The returned [`Advice`] carries the request-time stats even if the
/// grid has moved on while the call was in flight.
pub async fn request_advice(
    advisor: &dyn Advisor,
    request: AdvisoryRequest,
    stats: GridStats,
    requested_at_ms: u64,
) -> Advice {
    let text = advise_or_fallback(advisor, &request).await;
    Advice {
        text,
        requested_at_ms,
        stats_at_request: stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::seed::default_fleet;
    use crate::sim::Scenario;
    use crate::sim::types::SimConfig;

    struct Fixed(&'static str);

    #[async_trait]
    impl Advisor for Fixed {
        async fn advise(&self, _request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl Advisor for Failing {
        async fn advise(&self, _request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
            Err(AdvisoryError::Status(503))
        }
    }

    #[test]
    fn request_reflects_state() {
        let state =
            GridState::new(default_fleet(), SimConfig::default()).apply_scenario(Scenario::Heatwave);
        let req = AdvisoryRequest::from_state(&state);
        assert_eq!(req.scenario, "heatwave");
        assert_eq!(req.generation_mw, state.stats().total_generation);
        assert!(req.prompt().contains("Active scenario: heatwave"));
    }

    #[test]
    fn request_defaults_to_normal() {
        let state = GridState::new(default_fleet(), SimConfig::default());
        let req = AdvisoryRequest::from_state(&state);
        assert_eq!(req.scenario, "normal");
        assert!(req.prompt().contains("Net load: 6.0 MW"));
    }

    #[tokio::test]
    async fn success_passes_text_through() {
        let req = AdvisoryRequest::new(&GridStats::from_assets(&[], 50.0), "normal");
        let text = advise_or_fallback(&Fixed("Charge batteries now."), &req).await;
        assert_eq!(text, "Charge batteries now.");
    }

    #[tokio::test]
    async fn failure_yields_literal_fallback() {
        let req = AdvisoryRequest::new(&GridStats::from_assets(&[], 50.0), "storm");
        assert_eq!(advise_or_fallback(&Failing, &req).await, "Manual override suggested.");
        assert_eq!(advise_or_fallback(&OfflineAdvisor, &req).await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn request_advice_keeps_snapshot() {
        let stats = GridStats::from_assets(&default_fleet(), 50.0);
        let req = AdvisoryRequest::new(&stats, "normal");
        let advice = request_advice(&Failing, req, stats, 9000).await;
        assert_eq!(advice.text, FALLBACK_ADVICE);
        assert_eq!(advice.requested_at_ms, 9000);
        assert_eq!(advice.stats_at_request, stats);
    }
}
