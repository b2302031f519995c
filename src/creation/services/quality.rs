//! Non-fatal quality checks and content fingerprinting.

use crate::creation::domain::{ArtifactKind, QualityPolicy, QualityWarning};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Evaluates `content` against `policy`.
///
/// Length bounds apply to every kind. Line bounds, delimiter balance,
/// and the documentation requirement apply only to code-like kinds.
#[must_use]
pub fn quality_warnings(
    policy: &QualityPolicy,
    kind: ArtifactKind,
    content: &str,
) -> Vec<QualityWarning> {
    let mut warnings = Vec::new();
    let length = content.chars().count();
    if length < policy.min_content_length {
        warnings.push(QualityWarning::new(
            "min_content_length",
            format!("content is {length} characters, minimum is {}", policy.min_content_length),
        ));
    }
    if length > policy.max_content_length {
        warnings.push(QualityWarning::new(
            "max_content_length",
            format!("content is {length} characters, maximum is {}", policy.max_content_length),
        ));
    }

    if !kind.is_code_like() {
        return warnings;
    }

    let lines = content.lines().count();
    if lines < policy.min_lines {
        warnings.push(QualityWarning::new(
            "min_lines",
            format!("{lines} lines, minimum is {}", policy.min_lines),
        ));
    }
    if lines > policy.max_lines {
        warnings.push(QualityWarning::new(
            "max_lines",
            format!("{lines} lines, maximum is {}", policy.max_lines),
        ));
    }
    if policy.check_syntax
        && let Err(problem) = check_delimiters(content)
    {
        warnings.push(QualityWarning::new("syntax", problem));
    }
    if policy.require_documentation && !has_comment(content) {
        warnings.push(QualityWarning::new(
            "documentation",
            "code contains no comments or doc comments",
        ));
    }
    warnings
}

/// Returns the lowercase hex SHA-256 digest of `content`.
#[must_use]
pub fn content_digest(content: &str) -> String {
    Sha256::digest(content.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut hex, byte| {
            let _ignored = write!(hex, "{byte:02x}");
            hex
        })
}

/// Checks that brackets balance outside string literals and comments.
fn check_delimiters(content: &str) -> Result<(), String> {
    let mut open = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("# ") {
            continue;
        }
        let mut in_string = false;
        let mut escaped = false;
        let mut previous = None;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '\'' => {
                    if let Some(skip) = char_literal_len(chars.as_str()) {
                        chars.by_ref().take(skip).for_each(drop);
                    }
                }
                '/' if previous == Some('/') => break,
                '(' | '[' | '{' => open.push(c),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if open.pop() != Some(expected) {
                        return Err(format!("unbalanced '{c}' on line {}", number + 1));
                    }
                }
                _ => {}
            }
            previous = Some(c);
        }
    }
    open.last().map_or(Ok(()), |unclosed| Err(format!("unclosed '{unclosed}'")))
}

/// Returns how many characters after an opening `'` belong to a char
/// literal, or `None` when the quote starts a lifetime or label.
fn char_literal_len(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    if chars.next()? == '\\' {
        chars.next()?;
        let tail = chars.position(|c| c == '\'')?;
        return Some(tail + 3);
    }
    (chars.next()? == '\'').then_some(2)
}

fn has_comment(content: &str) -> bool {
    content.lines().map(str::trim_start).any(|line| {
        line.starts_with("//")
            || line.starts_with("/*")
            || line.starts_with("# ")
            || line.starts_with("\"\"\"")
    })
}
