//! Keyword-scoring intent classifier.

use crate::creation::{
    domain::{ArtifactKind, Classification, CreationRequest},
    ports::IntentClassifier,
};

const DOCUMENT_WORDS: &[&str] = &[
    "document", "doc", "outline", "article", "guide", "readme", "essay", "presentation",
    "slides", "slide", "manual", "letter", "summary",
];
const CODE_WORDS: &[&str] = &[
    "code", "function", "script", "class", "module", "library", "implement", "program",
    "api", "algorithm", "refactor", "endpoint",
];
const PROTOTYPE_WORDS: &[&str] = &["prototype", "mvp", "demo", "mockup", "poc", "spike"];
const TOOL_WORDS: &[&str] = &["tool", "cli", "utility", "command", "automation", "automate"];
const ANALYSIS_WORDS: &[&str] = &[
    "analysis", "analyze", "analyse", "report", "evaluate", "compare", "metrics", "insight",
    "insights", "review", "audit",
];
const DESIGN_WORDS: &[&str] = &[
    "design", "architecture", "diagram", "wireframe", "layout", "blueprint", "schema",
];

/// Scores intent text against per-kind vocabularies.
///
/// Each whole-word match adds one point to its kind. The highest score
/// wins; ties go to the category's primary kind when it is among the
/// leaders. Text with no signal falls back to the primary kind.
#[derive(Debug, Clone)]
pub struct LexicalIntentClassifier {
    vocabularies: Vec<(ArtifactKind, Vec<String>)>,
}

impl Default for LexicalIntentClassifier {
    fn default() -> Self {
        let tables = [
            (ArtifactKind::Document, DOCUMENT_WORDS),
            (ArtifactKind::Code, CODE_WORDS),
            (ArtifactKind::Prototype, PROTOTYPE_WORDS),
            (ArtifactKind::Tool, TOOL_WORDS),
            (ArtifactKind::Analysis, ANALYSIS_WORDS),
            (ArtifactKind::Design, DESIGN_WORDS),
        ];
        Self {
            vocabularies: tables
                .into_iter()
                .map(|(kind, words)| (kind, words.iter().map(|word| (*word).to_owned()).collect()))
                .collect(),
        }
    }
}

impl LexicalIntentClassifier {
    /// Creates a classifier with the built-in vocabularies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds vocabulary for `kind`.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, kind: ArtifactKind, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra = keywords
            .into_iter()
            .map(|word| word.into().to_lowercase())
            .collect::<Vec<_>>();
        match self.vocabularies.iter_mut().find(|(known, _)| *known == kind) {
            Some((_, words)) => words.extend(extra),
            None => self.vocabularies.push((kind, extra)),
        }
        self
    }

    fn scores(&self, text: &str) -> Vec<(ArtifactKind, usize)> {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();
        self.vocabularies
            .iter()
            .map(|(kind, words)| {
                let score = tokens
                    .iter()
                    .filter(|token| words.iter().any(|word| word == *token))
                    .count();
                (*kind, score)
            })
            .collect()
    }
}

impl IntentClassifier for LexicalIntentClassifier {
    fn classify(&self, request: &CreationRequest, primary_kind: ArtifactKind) -> Classification {
        let scores = self.scores(request.intent_text());
        let best = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);
        if best == 0 {
            return Classification::certain(primary_kind);
        }

        let leaders = scores
            .iter()
            .filter(|(_, score)| *score == best)
            .map(|(kind, _)| *kind)
            .collect::<Vec<_>>();
        match leaders.as_slice() {
            [only] => Classification::certain(*only),
            _ if leaders.contains(&primary_kind) => Classification::ambiguous(primary_kind),
            [first, ..] => Classification::ambiguous(*first),
            [] => Classification::certain(primary_kind),
        }
    }
}
