//! Shared world state for cascade resolution BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use switchyard::{
    cascade::domain::CascadeResponse,
    clock::ManualClock,
    config::SwitchyardSettings,
    coordinator::Coordinator,
    health::adapters::ScriptedHealthProber,
    routing::adapters::InMemoryTransport,
};

/// Coordinator type driven by the scenarios.
pub type TestCoordinator = Coordinator<InMemoryTransport, ScriptedHealthProber, ManualClock>;

/// Component queued for registration when the scenario acts.
pub struct PendingComponent {
    /// Component id.
    pub id: String,
    /// Claimed capabilities.
    pub capabilities: Vec<String>,
    /// Whether the first probe cycle should find it unreachable.
    pub unreachable: bool,
}

/// Scenario world for cascade resolution behaviour tests.
pub struct CascadeWorld {
    /// Settings the coordinator is assembled from.
    pub settings: SwitchyardSettings,
    /// Scripted forward transport shared with the coordinator.
    pub transport: Arc<InMemoryTransport>,
    /// Scripted prober shared with the coordinator.
    pub prober: Arc<ScriptedHealthProber>,
    /// Components registered when the scenario acts.
    pub pending: Vec<PendingComponent>,
    /// Coordinator, assembled on first action.
    pub coordinator: Option<TestCoordinator>,
    /// Response of the last resolution.
    pub response: Option<CascadeResponse>,
}

impl CascadeWorld {
    /// Creates a world with AI assistance disabled.
    #[must_use]
    pub fn new() -> Self {
        let mut settings = SwitchyardSettings::default();
        settings.creation.ai_enabled = false;
        Self {
            settings,
            transport: Arc::new(InMemoryTransport::new()),
            prober: Arc::new(ScriptedHealthProber::new()),
            pending: Vec::new(),
            coordinator: None,
            response: None,
        }
    }

    /// Returns the last response or an error naming the missing step.
    pub fn response(&self) -> Result<&CascadeResponse, eyre::Report> {
        self.response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no resolution has run in this scenario"))
    }

    /// Returns the assembled coordinator.
    pub fn coordinator(&self) -> Result<&TestCoordinator, eyre::Report> {
        self.coordinator
            .as_ref()
            .ok_or_else(|| eyre::eyre!("coordinator has not been assembled"))
    }
}

impl Default for CascadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CascadeWorld {
    CascadeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
