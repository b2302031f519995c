//! Unit tests for registry domain types.

use crate::registry::domain::{
    HealthUpdate, ParseServiceStatusError, RegistryDomainError, ServiceCapabilities,
    ServiceDescriptor, ServiceEndpoint, ServiceId, ServiceRegistration, ServiceStatus,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn descriptor(at: DateTime<Utc>) -> ServiceDescriptor {
    let registration = ServiceRegistration::new(
        ServiceId::new("ocr").expect("valid id"),
        ServiceEndpoint::new("http://ocr.local:8080").expect("valid endpoint"),
        ServiceCapabilities::new(["ocr", "pdf"]).expect("valid capabilities"),
    );
    ServiceDescriptor::new(registration, at)
}

// ── ServiceId validation ───────────────────────────────────────────

#[rstest]
#[case("echo")]
#[case("ocr-backend")]
#[case("ai.primary_v2")]
#[case("A")]
fn valid_service_ids_are_accepted(#[case] input: &str) {
    let id = ServiceId::new(input).expect("id should be valid");
    assert_eq!(id.as_str(), input);
}

#[rstest]
fn service_id_is_trimmed_but_keeps_case() {
    let id = ServiceId::new("  DocStore  ").expect("id should be valid");
    assert_eq!(id.as_str(), "DocStore");
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_service_id_is_rejected(#[case] input: &str) {
    assert_eq!(ServiceId::new(input), Err(RegistryDomainError::EmptyServiceId));
}

#[rstest]
#[case("doc store")]
#[case("doc/store")]
#[case("doc:store")]
fn invalid_service_id_characters_are_rejected(#[case] input: &str) {
    assert!(matches!(
        ServiceId::new(input),
        Err(RegistryDomainError::InvalidServiceId(_))
    ));
}

#[rstest]
#[case(100, true)]
#[case(101, false)]
fn service_id_length_boundary(#[case] length: usize, #[case] expected_ok: bool) {
    let result = ServiceId::new("a".repeat(length));
    if expected_ok {
        assert!(result.is_ok(), "expected length {length} to be accepted");
    } else {
        assert!(matches!(result, Err(RegistryDomainError::ServiceIdTooLong(_))));
    }
}

// ── ServiceEndpoint validation ─────────────────────────────────────

#[rstest]
#[case("http://x", "http://x")]
#[case("https://ocr.internal:9443/", "https://ocr.internal:9443")]
#[case(" http://10.0.0.4/api// ", "http://10.0.0.4/api")]
fn valid_endpoints_are_normalised(#[case] input: &str, #[case] expected: &str) {
    let endpoint = ServiceEndpoint::new(input).expect("endpoint should be valid");
    assert_eq!(endpoint.as_str(), expected);
}

#[rstest]
#[case("ftp://files")]
#[case("localhost:8080")]
#[case("http://")]
#[case("http:///path")]
#[case("http://bad host")]
fn malformed_endpoints_are_rejected(#[case] input: &str) {
    assert!(matches!(
        ServiceEndpoint::new(input),
        Err(RegistryDomainError::InvalidEndpoint(_))
    ));
}

#[rstest]
fn blank_endpoint_is_rejected() {
    assert_eq!(
        ServiceEndpoint::new("  "),
        Err(RegistryDomainError::EmptyEndpoint)
    );
}

#[rstest]
#[case("health", "http://x/health")]
#[case("/invoke", "http://x/invoke")]
#[case("", "http://x")]
fn endpoint_join_adds_a_single_separator(#[case] path: &str, #[case] expected: &str) {
    let endpoint = ServiceEndpoint::new("http://x/").expect("endpoint should be valid");
    assert_eq!(endpoint.join(path), expected);
}

// ── ServiceCapabilities ────────────────────────────────────────────

#[rstest]
fn capabilities_are_normalised_and_deduplicated() {
    let capabilities =
        ServiceCapabilities::new([" OCR ", "ocr", "Deploy"]).expect("valid capabilities");

    assert_eq!(capabilities.iter().collect::<Vec<_>>(), vec!["deploy", "ocr"]);
    assert!(capabilities.contains("Ocr"));
    assert!(!capabilities.contains("git"));
}

#[rstest]
fn blank_capability_is_rejected() {
    assert_eq!(
        ServiceCapabilities::new(["ocr", " "]),
        Err(RegistryDomainError::EmptyCapability)
    );
}

// ── ServiceStatus ──────────────────────────────────────────────────

#[rstest]
#[case(ServiceStatus::Unknown, "unknown")]
#[case(ServiceStatus::Healthy, "healthy")]
#[case(ServiceStatus::Unhealthy, "unhealthy")]
#[case(ServiceStatus::Unreachable, "unreachable")]
fn service_status_parses_its_wire_form(#[case] status: ServiceStatus, #[case] wire: &str) {
    assert_eq!(status.as_str(), wire);
    assert_eq!(ServiceStatus::try_from(wire), Ok(status));
}

#[rstest]
fn unknown_status_string_is_rejected() {
    assert!(matches!(
        ServiceStatus::try_from("degraded"),
        Err(ParseServiceStatusError(_))
    ));
}

#[rstest]
#[case(ServiceStatus::Unknown, ServiceStatus::Healthy, true)]
#[case(ServiceStatus::Healthy, ServiceStatus::Unreachable, true)]
#[case(ServiceStatus::Unreachable, ServiceStatus::Unhealthy, true)]
#[case(ServiceStatus::Healthy, ServiceStatus::Unknown, false)]
#[case(ServiceStatus::Unreachable, ServiceStatus::Unknown, false)]
fn status_transitions_never_return_to_unknown(
    #[case] from: ServiceStatus,
    #[case] to: ServiceStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

// ── ServiceDescriptor liveness ─────────────────────────────────────

#[rstest]
fn new_descriptor_starts_unknown_with_registration_heartbeat(registered_at: DateTime<Utc>) {
    let service = descriptor(registered_at);

    assert_eq!(service.status(), ServiceStatus::Unknown);
    assert_eq!(service.last_heartbeat(), registered_at);
    assert_eq!(service.registered_at(), registered_at);
    assert!(service.last_checked_at().is_none());
}

#[rstest]
fn successful_probe_marks_healthy_and_refreshes_heartbeat(registered_at: DateTime<Utc>) {
    let mut service = descriptor(registered_at);
    let probed_at = registered_at + Duration::seconds(10);

    let change = service.apply(HealthUpdate::ProbeSucceeded { at: probed_at });

    assert!(change.changed());
    assert_eq!(change.previous, ServiceStatus::Unknown);
    assert_eq!(service.status(), ServiceStatus::Healthy);
    assert_eq!(service.last_heartbeat(), probed_at);
    assert_eq!(service.last_checked_at(), Some(probed_at));
}

#[rstest]
fn failed_probe_keeps_heartbeat_and_records_message(registered_at: DateTime<Utc>) {
    let mut service = descriptor(registered_at);
    let probed_at = registered_at + Duration::seconds(10);

    service.apply(HealthUpdate::ProbeFailed {
        at: probed_at,
        message: "HTTP 503".to_owned(),
    });

    assert_eq!(service.status(), ServiceStatus::Unhealthy);
    assert_eq!(service.status_message(), Some("HTTP 503"));
    assert_eq!(service.last_heartbeat(), registered_at);
}

#[rstest]
fn heartbeat_revives_unreachable_descriptor(registered_at: DateTime<Utc>) {
    let mut service = descriptor(registered_at);
    service.apply(HealthUpdate::ProbeUnreachable {
        at: registered_at,
        message: "connection refused".to_owned(),
    });

    service.apply(HealthUpdate::Heartbeat {
        at: registered_at + Duration::seconds(1),
    });

    assert_eq!(service.status(), ServiceStatus::Healthy);
    assert!(service.status_message().is_none());
}

#[rstest]
fn heartbeat_does_not_mask_unhealthy_probe(registered_at: DateTime<Utc>) {
    let mut service = descriptor(registered_at);
    service.apply(HealthUpdate::ProbeFailed {
        at: registered_at,
        message: "HTTP 500".to_owned(),
    });

    service.apply(HealthUpdate::Heartbeat {
        at: registered_at + Duration::seconds(1),
    });

    assert_eq!(service.status(), ServiceStatus::Unhealthy);
}

#[rstest]
#[case(Duration::seconds(31), ServiceStatus::Unreachable)]
#[case(Duration::seconds(29), ServiceStatus::Unknown)]
fn stale_update_only_applies_past_cutoff(
    registered_at: DateTime<Utc>,
    #[case] elapsed: Duration,
    #[case] expected: ServiceStatus,
) {
    let mut service = descriptor(registered_at);
    let now = registered_at + elapsed;

    service.apply(HealthUpdate::StaleSince {
        cutoff: now - Duration::seconds(30),
        at: now,
    });

    assert_eq!(service.status(), expected);
}

#[derive(Debug, Clone, Copy)]
enum PriorProbe {
    None,
    Succeeded,
    Failed,
    Unreachable,
}

fn probe_update(prior: PriorProbe, at: DateTime<Utc>) -> Option<HealthUpdate> {
    let message = "probe".to_owned();
    match prior {
        PriorProbe::None => None,
        PriorProbe::Succeeded => Some(HealthUpdate::ProbeSucceeded { at }),
        PriorProbe::Failed => Some(HealthUpdate::ProbeFailed { at, message }),
        PriorProbe::Unreachable => Some(HealthUpdate::ProbeUnreachable { at, message }),
    }
}

#[rstest]
#[case(PriorProbe::None, ServiceStatus::Unknown)]
#[case(PriorProbe::Succeeded, ServiceStatus::Healthy)]
#[case(PriorProbe::Failed, ServiceStatus::Unhealthy)]
#[case(PriorProbe::Unreachable, ServiceStatus::Healthy)]
fn refresh_replaces_endpoint_and_revives_unreachable(
    registered_at: DateTime<Utc>,
    #[case] prior: PriorProbe,
    #[case] expected: ServiceStatus,
) {
    let mut service = descriptor(registered_at);
    if let Some(update) = probe_update(prior, registered_at) {
        service.apply(update);
    }
    let later = registered_at + Duration::minutes(5);

    service.refresh(
        ServiceRegistration::new(
            ServiceId::new("ocr").expect("valid id"),
            ServiceEndpoint::new("http://ocr-2.local").expect("valid endpoint"),
            ServiceCapabilities::new(["ocr"]).expect("valid capabilities"),
        ),
        later,
    );

    assert_eq!(service.endpoint().as_str(), "http://ocr-2.local");
    assert_eq!(service.capabilities().len(), 1);
    assert_eq!(service.status(), expected);
    assert_eq!(service.registered_at(), registered_at);
    assert_eq!(service.last_heartbeat(), later);
}
