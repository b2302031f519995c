//! HTTP prober issuing `GET {endpoint}/{health_path}`.

use crate::health::{domain::ProbeOutcome, ports::HealthProber};
use crate::registry::domain::ServiceDescriptor;
use async_trait::async_trait;

/// Probes components over HTTP.
///
/// A 2xx answer is healthy, any other status is unhealthy, and timeouts or
/// connection failures are unreachable.
#[derive(Debug, Clone)]
pub struct HttpHealthProber {
    client: reqwest::Client,
    health_path: String,
}

impl HttpHealthProber {
    /// Creates a prober that reuses `client`.
    #[must_use]
    pub fn new(client: reqwest::Client, health_path: impl Into<String>) -> Self {
        Self {
            client,
            health_path: health_path.into(),
        }
    }
}

#[async_trait]
impl HealthProber for HttpHealthProber {
    async fn probe(&self, descriptor: &ServiceDescriptor) -> ProbeOutcome {
        let url = descriptor.endpoint().join(&self.health_path);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Healthy,
            Ok(response) => ProbeOutcome::unhealthy(format!("HTTP {}", response.status())),
            Err(err) if err.is_timeout() || err.is_connect() => {
                ProbeOutcome::unreachable(err.to_string())
            }
            Err(err) => ProbeOutcome::unhealthy(err.to_string()),
        }
    }
}
