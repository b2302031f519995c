//! Shared helpers for in-memory coordinator tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::fixture;
use switchyard::{
    clock::ManualClock,
    config::SwitchyardSettings,
    coordinator::Coordinator,
    health::adapters::ScriptedHealthProber,
    registry::services::RegisterServiceRequest,
    routing::adapters::InMemoryTransport,
};

/// Coordinator type under test.
pub type TestCoordinator = Coordinator<InMemoryTransport, ScriptedHealthProber, ManualClock>;

/// A coordinator plus handles on its scripted adapters.
pub struct Stack {
    /// Coordinator under test.
    pub coordinator: TestCoordinator,
    /// Scripted transport used by the router.
    pub transport: Arc<InMemoryTransport>,
    /// Scripted prober used by the health monitor.
    pub prober: Arc<ScriptedHealthProber>,
    /// Shared manual clock.
    pub clock: ManualClock,
}

impl Stack {
    /// Registers `id` with `capabilities` at a derived endpoint.
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    pub async fn register(&self, id: &str, capabilities: &[&str]) {
        self.coordinator
            .register(
                RegisterServiceRequest::new(id, format!("http://{id}.internal"))
                    .with_capabilities(capabilities.iter().copied()),
            )
            .await
            .expect("registration should succeed");
    }
}

/// Settings with AI assistance disabled.
#[fixture]
pub fn settings() -> SwitchyardSettings {
    let mut settings = SwitchyardSettings::default();
    settings.creation.ai_enabled = false;
    settings
}

/// Builds a stack from `settings` with a clock frozen at a fixed instant.
///
/// # Panics
///
/// Panics if the settings are invalid.
#[must_use]
pub fn stack_with(settings: &SwitchyardSettings) -> Stack {
    let clock = ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    );
    let transport = Arc::new(InMemoryTransport::new());
    let prober = Arc::new(ScriptedHealthProber::new());
    let coordinator = TestCoordinator::assemble(
        settings,
        Arc::clone(&transport),
        Arc::clone(&prober),
        Arc::new(clock.clone()),
    )
    .expect("settings should be valid");
    Stack {
        coordinator,
        transport,
        prober,
        clock,
    }
}

/// Provides a stack built from default test settings.
#[fixture]
pub fn stack(settings: SwitchyardSettings) -> Stack {
    stack_with(&settings)
}
