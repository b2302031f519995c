//! The creation fallback engine.

use super::quality::{content_digest, quality_warnings};
use crate::creation::{
    adapters::{LexicalIntentClassifier, TemplateGenerator},
    domain::{
        ArtifactKind, CreationMetadata, CreationRequest, CreationResult, GenerationMethod,
        QualityPolicy, SecurityPolicy,
    },
    ports::{AiAssist, AiAssistError, IntentClassifier},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Runtime configuration for [`CreationEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationEngineConfig {
    /// Whether AI-assist collaborators are consulted at all.
    pub ai_enabled: bool,
    /// Upper bound for each AI-assist attempt.
    pub generation_timeout: Duration,
    /// Non-fatal quality thresholds.
    pub quality: QualityPolicy,
    /// Input limits checked before any generation work.
    pub security: SecurityPolicy,
    /// Default artifact kind per intent category.
    pub primary_kinds: BTreeMap<String, ArtifactKind>,
}

impl Default for CreationEngineConfig {
    fn default() -> Self {
        let primary_kinds = [
            ("documentation", ArtifactKind::Document),
            ("development", ArtifactKind::Code),
            ("prototyping", ArtifactKind::Prototype),
            ("automation", ArtifactKind::Tool),
            ("analysis", ArtifactKind::Analysis),
            ("design", ArtifactKind::Design),
        ]
        .into_iter()
        .map(|(category, kind)| (category.to_owned(), kind))
        .collect();
        Self {
            ai_enabled: true,
            generation_timeout: Duration::from_secs(15),
            quality: QualityPolicy::default(),
            security: SecurityPolicy::default(),
            primary_kinds,
        }
    }
}

impl CreationEngineConfig {
    /// Returns the primary artifact kind for `category`.
    ///
    /// Unmapped categories that name an artifact kind map to it; anything
    /// else produces a document.
    #[must_use]
    pub fn primary_kind_for(&self, category: &str) -> ArtifactKind {
        let normalized = category.trim().to_lowercase();
        self.primary_kinds
            .get(&normalized)
            .copied()
            .or_else(|| ArtifactKind::try_from(normalized.as_str()).ok())
            .unwrap_or(ArtifactKind::Document)
    }
}

/// A named AI-assist collaborator.
#[derive(Clone)]
pub struct AiProvider {
    id: String,
    assist: Arc<dyn AiAssist>,
}

impl AiProvider {
    /// Wraps `assist` under the provider id recorded in metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, assist: Arc<dyn AiAssist>) -> Self {
        Self {
            id: id.into(),
            assist,
        }
    }

    /// Returns the provider id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

struct Generated {
    content: String,
    method: GenerationMethod,
    provider: Option<String>,
}

/// Terminal cascade stage that always produces an artifact.
///
/// Only the security gate can fail a request. AI-assist failures fall
/// through to the secondary provider and then to the template
/// generator; quality findings become metadata warnings.
pub struct CreationEngine<C: Clock + Send + Sync> {
    config: CreationEngineConfig,
    classifier: Arc<dyn IntentClassifier>,
    primary: Option<AiProvider>,
    secondary: Option<AiProvider>,
    templates: TemplateGenerator,
    clock: Arc<C>,
}

impl<C: Clock + Send + Sync> CreationEngine<C> {
    /// Creates an engine with the lexical classifier and no AI providers.
    #[must_use]
    pub fn new(config: CreationEngineConfig, clock: Arc<C>) -> Self {
        Self {
            config,
            classifier: Arc::new(LexicalIntentClassifier::new()),
            primary: None,
            secondary: None,
            templates: TemplateGenerator::new(),
            clock,
        }
    }

    /// Replaces the intent classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the primary AI-assist provider.
    #[must_use]
    pub fn with_primary(mut self, provider: AiProvider) -> Self {
        self.primary = Some(provider);
        self
    }

    /// Sets the secondary AI-assist provider.
    #[must_use]
    pub fn with_secondary(mut self, provider: AiProvider) -> Self {
        self.secondary = Some(provider);
        self
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &CreationEngineConfig {
        &self.config
    }

    /// Produces an artifact for `request`.
    ///
    /// AI attempts are bounded by the earlier of `deadline` and the
    /// configured generation timeout; template generation is not.
    #[instrument(skip(self, request), fields(category = request.intent_category()))]
    pub async fn create(&self, request: &CreationRequest, deadline: Instant) -> CreationResult {
        let started_at = self.clock.utc();
        if let Err(violation) = self.config.security.check(request.intent_text()) {
            warn!(%violation, "intent rejected by security gate");
            return CreationResult::rejected(violation.to_string());
        }

        let primary_kind = self.config.primary_kind_for(request.intent_category());
        let classification = self.classifier.classify(request, primary_kind);
        let kind = classification.kind;
        if classification.ambiguous {
            debug!(kind = %kind, "ambiguous intent resolved by category default");
        }

        let mut ai_failures = Vec::new();
        let generated = self
            .generate_with_ai(request, kind, deadline, &mut ai_failures)
            .await
            .unwrap_or_else(|| Generated {
                content: self.templates.render(kind, request),
                method: GenerationMethod::Template,
                provider: None,
            });

        let warnings = quality_warnings(&self.config.quality, kind, &generated.content);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "quality gate recorded warnings");
        }

        let metadata = CreationMetadata {
            generation_method: generated.method,
            provider: generated.provider,
            classification,
            ai_failures,
            quality_warnings: warnings,
            content_digest: content_digest(&generated.content),
            started_at,
            completed_at: self.clock.utc(),
        };
        info!(kind = %kind, method = ?metadata.generation_method, "artifact created");
        CreationResult::created(kind, generated.content, metadata)
    }

    async fn generate_with_ai(
        &self,
        request: &CreationRequest,
        kind: ArtifactKind,
        deadline: Instant,
        failures: &mut Vec<String>,
    ) -> Option<Generated> {
        if !self.config.ai_enabled {
            return None;
        }

        let prompt = build_prompt(request, kind);
        let attempts = [
            (GenerationMethod::AiPrimary, self.primary.as_ref()),
            (GenerationMethod::AiSecondary, self.secondary.as_ref()),
        ];
        for (method, slot) in attempts {
            let Some(provider) = slot else {
                continue;
            };
            let attempt_deadline = Instant::now()
                .checked_add(self.config.generation_timeout)
                .map_or(deadline, |limit| limit.min(deadline));
            let attempt = tokio::time::timeout_at(
                attempt_deadline,
                provider.assist.generate(&prompt, kind, attempt_deadline),
            )
            .await;

            let error = match attempt {
                Ok(Ok(content)) if !content.trim().is_empty() => {
                    return Some(Generated {
                        content,
                        method,
                        provider: Some(provider.id.clone()),
                    });
                }
                Ok(Ok(_)) => AiAssistError::EmptyContent,
                Ok(Err(failure)) => failure,
                Err(_) => AiAssistError::Timeout,
            };
            debug!(provider = provider.id(), %error, "ai generation failed");
            failures.push(format!("{}: {error}", provider.id));
        }
        None
    }
}

fn build_prompt(request: &CreationRequest, kind: ArtifactKind) -> String {
    let mut prompt = format!(
        "Create a {kind} for the '{}' category.\n\n{}\n",
        request.intent_category(),
        request.intent_text().trim()
    );
    if !request.constraints().is_empty() {
        prompt.push_str("\nConstraints:\n");
        for constraint in request.constraints() {
            let _ignored = writeln!(prompt, "- {constraint}");
        }
    }
    prompt
}
