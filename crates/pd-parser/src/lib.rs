#![forbid(unsafe_code)]

//! Line-oriented PlantUML parser.
//!
//! Implements a documented subset of the PlantUML grammar: enough of the
//! sequence, class, use-case and activity syntax to recover the diagram
//! structure. The parser is intentionally tolerant: a line that matches no
//! pattern for the active diagram type is skipped without a diagnostic.

mod activity;
mod class;
mod sequence;
mod usecase;

use pd_core::{ConvertError, DiagramModel, DiagramType};

/// Detect the diagram type from the full source text.
///
/// A document must carry `@startuml` to be recognised at all. After that,
/// the first diagram-defining keyword in line order decides:
/// `usecase` / `class` / `interface` / `participant` / `start` / `stop` /
/// `if (...)` / `:...;`. Keywords shared between types (`actor`, arrow
/// operators) only decide after the whole text has been scanned: an actor
/// or an arrow without a more specific keyword means a sequence diagram.
#[must_use]
pub fn detect_type(input: &str) -> DiagramType {
    if !input.to_ascii_lowercase().contains("@startuml") {
        return DiagramType::Unknown;
    }

    let mut saw_arrow = false;
    for line in input.lines() {
        let trimmed = line.trim();
        if is_skippable(trimmed) {
            continue;
        }
        let lower = trimmed.to_ascii_lowercase();

        if lower.contains("usecase") {
            return DiagramType::UseCase;
        }
        if lower.starts_with("class ")
            || lower.starts_with("interface ")
            || lower.starts_with("abstract class")
        {
            return DiagramType::Class;
        }
        if lower.starts_with("participant ")
            || lower.starts_with("activate ")
            || lower.starts_with("deactivate ")
        {
            return DiagramType::Sequence;
        }
        if lower == "start"
            || lower == "stop"
            || lower.starts_with("if (")
            || (lower.starts_with(':') && lower.ends_with(';'))
        {
            return DiagramType::Activity;
        }
        if trimmed.contains("->") || trimmed.contains("<-") {
            saw_arrow = true;
        }
    }

    if saw_arrow {
        return DiagramType::Sequence;
    }
    DiagramType::Unknown
}

/// Parse PlantUML source into a [`DiagramModel`].
///
/// The diagram type is decided once, before any type-specific parsing runs.
/// An unrecognised type is the only fatal condition at this stage.
pub fn parse(input: &str) -> Result<DiagramModel, ConvertError> {
    match detect_type(input) {
        DiagramType::Sequence => Ok(sequence::parse_sequence(input)),
        DiagramType::Class => Ok(class::parse_class(input)),
        DiagramType::UseCase => Ok(usecase::parse_usecase(input)),
        DiagramType::Activity => Ok(activity::parse_activity(input)),
        DiagramType::Unknown => Err(ConvertError::UnrecognizedDiagramType),
    }
}

/// Lines that carry no diagram content in any mode.
pub(crate) fn is_skippable(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('\'')
        || line.starts_with("@startuml")
        || line.starts_with("@enduml")
}

/// Trim a label fragment; empty labels collapse to `None`.
pub(crate) fn clean_label(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_matches('"').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Extract a quoted (`"Display Name"`) or bare (`Name`) identifier from the
/// start of `rest`, returning the remainder.
pub(crate) fn quoted_or_bare(rest: &str) -> Option<(String, &str)> {
    let rest = rest.trim_start();
    if let Some(tail) = rest.strip_prefix('"') {
        let end = tail.find('"')?;
        let name = tail[..end].trim();
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), &tail[end + 1..]))
    } else {
        let end = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        Some((rest[..end].to_string(), &rest[end..]))
    }
}

/// Look for an `as <alias>` clause in the remainder of a declaration line.
pub(crate) fn alias_of(remainder: &str) -> Option<String> {
    let mut words = remainder.split_whitespace();
    while let Some(word) = words.next() {
        if word == "as" {
            return words.next().map(str::to_string);
        }
    }
    None
}

/// Find the earliest operator occurrence in `statement`. At equal positions
/// the longer operator wins, so tables may hold overlapping tokens
/// (`-->` / `->`) in any order.
pub(crate) fn find_operator<'a, K: Copy>(
    statement: &str,
    operators: &'a [(&'a str, K)],
) -> Option<(usize, &'a str, K)> {
    let mut best: Option<(usize, &'a str, K)> = None;
    for (op, kind) in operators {
        if let Some(idx) = statement.find(op) {
            let better = match best {
                Some((best_idx, best_op, _)) => {
                    idx < best_idx || (idx == best_idx && op.len() > best_op.len())
                }
                None => true,
            };
            if better {
                best = Some((idx, op, *kind));
            }
        }
    }
    best
}

/// True when a token is a single bare identifier (no internal whitespace).
pub(crate) fn is_bare_token(token: &str) -> bool {
    !token.is_empty() && !token.contains(char::is_whitespace)
}
