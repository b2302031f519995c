//! Deterministic template generator used when AI assistance fails.

use crate::creation::domain::{ArtifactKind, CreationRequest};
use minijinja::Environment;
use serde_json::{Map, Value, json};
use tracing::warn;

const TITLE_LIMIT: usize = 80;
const SLUG_WORDS: usize = 4;

const DOCUMENT_TEMPLATE: &str = "# {{ title }}

## Purpose
{{ intent }}

## Outline
1. Background
2. Proposal
3. Open questions
4. Next steps
";

const ANALYSIS_TEMPLATE: &str = "# Analysis: {{ title }}

## Question
{{ intent }}

## Method
Collect the relevant {{ category }} inputs, establish a baseline, and compare against it.

## Findings
- Pending data collection.

## Recommendations
- Revisit once findings are populated.
";

const DESIGN_TEMPLATE: &str = "# Design: {{ title }}

## Goals
{{ intent }}

## Components
- Entry point
- Core logic
- Storage

## Interfaces
Describe the inputs and outputs of each component.

## Risks
- Unvalidated assumptions about {{ category }} usage.
";

const PROSE_TAIL: &str = "{% if constraints %}
## Constraints
{% for constraint in constraints %}- {{ constraint }}
{% endfor %}{% endif %}{% if context %}
## Context
{% for entry in context %}- {{ entry.key }}: {{ entry.value }}
{% endfor %}{% endif %}";

const CODE_TEMPLATE: &str = "//! {{ title }}
//!
//! Category: {{ category }}
{% for constraint in constraints %}//! Constraint: {{ constraint }}
{% endfor %}
/// Entry point for {{ slug }}.
pub fn {{ slug }}(input: &str) -> String {
    input.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn {{ slug }}_trims_input() {
        assert_eq!({{ slug }}(\"  value  \"), \"value\");
    }
}
";

const PROTOTYPE_TEMPLATE: &str = "//! Prototype: {{ title }}
//!
//! {{ summary }}

use std::io::{self, BufRead};

fn main() {
    let stdin = io::stdin();
    for line in stdin.lock().lines().map_while(Result::ok) {
        println!(\"{{ slug }}: {line}\");
    }
}
";

const TOOL_TEMPLATE: &str = "//! {{ title }}
//!
//! {{ summary }}

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!(\"usage: {{ slug }} <input>...\");
        return ExitCode::FAILURE;
    }
    for arg in &args {
        println!(\"{arg}\");
    }
    ExitCode::SUCCESS
}
";

/// Renders fixed-section artifacts from the request alone.
///
/// Rendering is pure: identical requests and kinds always yield identical
/// content. Context entries are emitted in key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders an artifact of `kind` for `request`.
    #[must_use]
    pub fn render(&self, kind: ArtifactKind, request: &CreationRequest) -> String {
        let context = template_context(kind, request);
        let environment = Environment::new();
        let rendered = match kind {
            ArtifactKind::Code => environment.render_str(CODE_TEMPLATE, &context),
            ArtifactKind::Prototype => environment.render_str(PROTOTYPE_TEMPLATE, &context),
            ArtifactKind::Tool => environment.render_str(TOOL_TEMPLATE, &context),
            ArtifactKind::Document => render_prose(&environment, DOCUMENT_TEMPLATE, &context),
            ArtifactKind::Analysis => render_prose(&environment, ANALYSIS_TEMPLATE, &context),
            ArtifactKind::Design => render_prose(&environment, DESIGN_TEMPLATE, &context),
        };

        rendered.unwrap_or_else(|error| {
            warn!(%error, kind = %kind, "template rendering failed, using plain fallback");
            plain_fallback(kind, request)
        })
    }
}

fn render_prose(
    environment: &Environment<'_>,
    body: &str,
    context: &Value,
) -> Result<String, minijinja::Error> {
    let mut rendered = environment.render_str(body, context)?;
    rendered.push_str(&environment.render_str(PROSE_TAIL, context)?);
    Ok(rendered)
}

fn template_context(kind: ArtifactKind, request: &CreationRequest) -> Value {
    let summary = collapse_whitespace(request.intent_text());
    let title = summary.chars().take(TITLE_LIMIT).collect::<String>();
    let mut entries = request.context().iter().collect::<Vec<_>>();
    entries.sort_by(|left, right| left.0.cmp(right.0));
    let context = entries
        .into_iter()
        .map(|(key, value)| {
            let mut entry = Map::new();
            entry.insert("key".to_owned(), Value::String(collapse_whitespace(key)));
            entry.insert("value".to_owned(), Value::String(display_value(value)));
            Value::Object(entry)
        })
        .collect::<Vec<_>>();
    let constraints = request
        .constraints()
        .iter()
        .map(|constraint| collapse_whitespace(constraint))
        .filter(|constraint| !constraint.is_empty())
        .collect::<Vec<_>>();

    json!({
        "title": if title.is_empty() { kind.as_str().to_owned() } else { title },
        "summary": summary,
        "intent": request.intent_text().trim(),
        "category": collapse_whitespace(request.intent_category()),
        "kind": kind.as_str(),
        "slug": identifier_slug(request.intent_text()),
        "constraints": constraints,
        "context": context,
    })
}

fn plain_fallback(kind: ArtifactKind, request: &CreationRequest) -> String {
    format!(
        "{kind}: {}\ncategory: {}\n",
        collapse_whitespace(request.intent_text()),
        request.intent_category()
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => collapse_whitespace(text),
        other => other.to_string(),
    }
}

/// Derives a snake-case Rust identifier from the first words of `text`.
fn identifier_slug(text: &str) -> String {
    let words = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .take(SLUG_WORDS)
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>();
    let slug = words.join("_");
    match slug.chars().next() {
        None => "artifact".to_owned(),
        Some(first) if first.is_ascii_digit() => format!("artifact_{slug}"),
        Some(_) => slug,
    }
}
