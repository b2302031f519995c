//! Facade wiring the registry, monitor, router, cascade, and engine.

use crate::cascade::{
    domain::{CascadeRequest, CascadeResponse},
    services::CascadeController,
};
use crate::config::{ConfigError, SwitchyardSettings};
use crate::creation::{
    adapters::RoutedAiAssist,
    services::{AiProvider, CreationEngine},
};
use crate::health::{
    adapters::HttpHealthProber,
    domain::ProbeCycleReport,
    ports::HealthProber,
    services::{HealthMonitor, HealthMonitorResult},
};
use crate::registry::{
    adapters::memory::InMemoryServiceRegistry,
    domain::ServiceDescriptor,
    services::{RegisterServiceRequest, ServiceRegistryService, ServiceRegistryServiceResult},
};
use crate::routing::{
    adapters::HttpForwardTransport,
    domain::{RouteRequest, RouteResult},
    ports::ForwardTransport,
    services::RequestRouter,
};
use mockable::{Clock, DefaultClock};
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;

/// Longest request budget applied when a caller supplies no deadline.
pub const MAX_DEFAULT_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

const FALLBACK_DEADLINE: Duration = Duration::from_secs(30);

/// Errors raised while assembling a [`Coordinator`].
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Settings could not be converted into runtime configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(Arc<dyn StdError + Send + Sync>),
}

impl CoordinatorError {
    /// Wraps an HTTP client construction error.
    #[must_use]
    pub fn http_client<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::HttpClient(Arc::new(err))
    }
}

/// Router type used by a coordinator.
pub type CoordinatorRouter<T, C> = RequestRouter<InMemoryServiceRegistry, T, C>;

/// Coordinator over HTTP transports and the system clock.
pub type HttpCoordinator = Coordinator<HttpForwardTransport, HttpHealthProber, DefaultClock>;

/// Single entry point over every component.
///
/// All component-to-component traffic, including AI-assist calls made by
/// the creation engine, flows through the one router held here.
pub struct Coordinator<T, P, C>
where
    T: ForwardTransport + 'static,
    P: HealthProber + 'static,
    C: Clock + Send + Sync + 'static,
{
    registry: ServiceRegistryService<InMemoryServiceRegistry, C>,
    router: Arc<CoordinatorRouter<T, C>>,
    cascade: CascadeController<CoordinatorRouter<T, C>, C>,
    monitor: Arc<HealthMonitor<InMemoryServiceRegistry, P, C>>,
    default_deadline: Duration,
}

impl HttpCoordinator {
    /// Assembles the HTTP-backed stack from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError`] when settings are invalid or the HTTP
    /// client cannot be built.
    pub fn from_settings(settings: &SwitchyardSettings) -> Result<Self, CoordinatorError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.routing.connect_timeout())
            .build()
            .map_err(CoordinatorError::http_client)?;
        let transport = Arc::new(HttpForwardTransport::new(client.clone()));
        let prober = Arc::new(HttpHealthProber::new(
            client,
            settings.health.health_path.as_str(),
        ));
        Self::assemble(settings, transport, prober, Arc::new(DefaultClock))
    }
}

impl<T, P, C> Coordinator<T, P, C>
where
    T: ForwardTransport + 'static,
    P: HealthProber + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Assembles the stack over caller-supplied adapters.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Config`] when the health or cascade
    /// settings are invalid.
    pub fn assemble(
        settings: &SwitchyardSettings,
        transport: Arc<T>,
        prober: Arc<P>,
        clock: Arc<C>,
    ) -> Result<Self, CoordinatorError> {
        let policy = settings.health.policy()?;
        let cascade_config = Arc::new(settings.cascade.cascade_config()?);

        let registry = ServiceRegistryService::new(
            Arc::new(InMemoryServiceRegistry::new()),
            Arc::clone(&clock),
        );
        let router = Arc::new(RequestRouter::new(registry.clone(), transport));
        let monitor = Arc::new(HealthMonitor::new(registry.clone(), prober, policy));

        let mut engine = CreationEngine::new(settings.creation.engine_config(), clock);
        if let Some(target) = settings.creation.primary_ai.as_deref() {
            engine = engine.with_primary(routed_provider(&router, target));
        }
        if let Some(target) = settings.creation.secondary_ai.as_deref() {
            engine = engine.with_secondary(routed_provider(&router, target));
        }
        let cascade =
            CascadeController::new(Arc::clone(&router), Arc::new(engine), cascade_config);

        info!(
            chains_default = cascade.config().default_chain().candidates().len(),
            primary_ai = settings.creation.primary_ai.as_deref(),
            secondary_ai = settings.creation.secondary_ai.as_deref(),
            "coordinator assembled"
        );
        Ok(Self {
            registry,
            router,
            cascade,
            monitor,
            default_deadline: settings.routing.default_deadline(),
        })
    }

    /// Returns the registry service.
    #[must_use]
    pub const fn registry(&self) -> &ServiceRegistryService<InMemoryServiceRegistry, C> {
        &self.registry
    }

    /// Returns the shared router.
    #[must_use]
    pub fn router(&self) -> Arc<CoordinatorRouter<T, C>> {
        Arc::clone(&self.router)
    }

    /// Returns the deadline for a request starting now with the default
    /// budget, capped at [`MAX_DEFAULT_DEADLINE`].
    #[must_use]
    pub fn default_deadline(&self) -> Instant {
        let now = Instant::now();
        let budget = self.default_deadline.min(MAX_DEFAULT_DEADLINE);
        now.checked_add(budget)
            .or_else(|| now.checked_add(FALLBACK_DEADLINE))
            .unwrap_or(now)
    }

    /// Registers or re-registers a component.
    ///
    /// # Errors
    ///
    /// Returns the registry error for malformed input or storage failure.
    pub async fn register(
        &self,
        request: RegisterServiceRequest,
    ) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        self.registry.register(request).await
    }

    /// Records an explicit heartbeat from `id`.
    ///
    /// # Errors
    ///
    /// Returns the registry error when `id` is unknown or storage fails.
    pub async fn heartbeat(&self, id: &str) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        self.registry.heartbeat(id).await
    }

    /// Removes `id` from the registry.
    ///
    /// # Errors
    ///
    /// Returns the registry error when `id` is unknown or storage fails.
    pub async fn deregister(&self, id: &str) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        self.registry.deregister(id).await
    }

    /// Forwards one action to `target_id`, bounded by `deadline` or the
    /// default budget.
    pub async fn forward(
        &self,
        target_id: &str,
        action: &str,
        parameters: Map<String, Value>,
        deadline: Option<Instant>,
    ) -> RouteResult {
        let request = RouteRequest::new(
            target_id,
            action,
            deadline.unwrap_or_else(|| self.default_deadline()),
        )
        .with_parameters(parameters);
        self.router.route(request).await
    }

    /// Resolves `request` through the chain configured for `category`.
    pub async fn resolve(&self, category: &str, request: &CascadeRequest) -> CascadeResponse {
        self.cascade.resolve(category, request).await
    }

    /// Runs one probe cycle immediately.
    ///
    /// # Errors
    ///
    /// Returns the monitor error when the registry cannot be read or
    /// updated.
    pub async fn run_health_cycle(&self) -> HealthMonitorResult<ProbeCycleReport> {
        self.monitor.run_cycle().await
    }

    /// Starts the background health monitor.
    #[must_use]
    pub fn spawn_health_monitor(&self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        Arc::clone(&self.monitor).spawn(shutdown)
    }
}

fn routed_provider<T, C>(router: &Arc<CoordinatorRouter<T, C>>, target: &str) -> AiProvider
where
    T: ForwardTransport + 'static,
    C: Clock + Send + Sync + 'static,
{
    AiProvider::new(target, Arc::new(RoutedAiAssist::new(Arc::clone(router), target)))
}
