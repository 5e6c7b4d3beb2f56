use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;
use crate::screening::verify::DenyList;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Outbound model call, behind a trait so tests can stub the endpoint.
    pub gateway: Arc<dyn ModelGateway>,
    /// Disqualifying-employer patterns, compiled once at startup.
    pub deny_list: Arc<DenyList>,
    pub config: Config,
}
