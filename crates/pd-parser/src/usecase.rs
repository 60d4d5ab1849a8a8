//! Use-case diagram parsing: actors, use cases and their relations.

use pd_core::{DiagramModel, UseCase, UseCaseActor, UseCaseRelation, UseCaseRelationKind};

use crate::{alias_of, clean_label, find_operator, is_skippable, quoted_or_bare};

/// The boolean marks dashed operators; those classify as include/extend by
/// their label text.
const USECASE_OPERATORS: [(&str, bool); 3] = [("-->", false), ("..>", true), ("--", false)];

pub(crate) fn parse_usecase(input: &str) -> DiagramModel {
    let mut actors = Vec::new();
    let mut use_cases = Vec::new();
    let mut relations = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if is_skippable(trimmed) {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("actor ") {
            if let Some(actor) = parse_actor(rest) {
                actors.push(actor);
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("usecase ") {
            if let Some((name, remainder)) = quoted_or_bare(rest) {
                use_cases.push(UseCase {
                    name,
                    alias: alias_of(remainder),
                });
            }
            continue;
        }

        // Bare `(Use case)` form: name doubles as identity.
        if trimmed.starts_with('(') && trimmed.ends_with(')') {
            let name = trimmed[1..trimmed.len() - 1].trim();
            if !name.is_empty() {
                use_cases.push(UseCase {
                    name: name.to_string(),
                    alias: None,
                });
            }
            continue;
        }

        if let Some(relation) = parse_relation(trimmed) {
            relations.push(relation);
        }
    }

    DiagramModel::UseCase {
        actors,
        use_cases,
        relations,
    }
}

fn parse_actor(rest: &str) -> Option<UseCaseActor> {
    let (name, remainder) = quoted_or_bare(rest)?;
    let secondary = stereotype_of(remainder).is_some_and(|s| s.eq_ignore_ascii_case("secondary"));
    Some(UseCaseActor {
        name,
        alias: alias_of(remainder),
        secondary,
    })
}

/// Extract a `<<stereotype>>` marker from a declaration remainder.
fn stereotype_of(remainder: &str) -> Option<&str> {
    let start = remainder.find("<<")?;
    let tail = &remainder[start + 2..];
    let end = tail.find(">>")?;
    Some(tail[..end].trim())
}

fn parse_relation(statement: &str) -> Option<UseCaseRelation> {
    let (idx, op, dashed) = find_operator(statement, &USECASE_OPERATORS)?;
    let source = endpoint_identity(statement[..idx].trim())?;
    let right = statement[idx + op.len()..].trim();

    let (target_raw, label) = match right.split_once(':') {
        Some((target, label)) => (target.trim(), clean_label(label)),
        None => (right, None),
    };
    let target = endpoint_identity(target_raw)?;

    let kind = if dashed {
        let is_extend = label
            .as_deref()
            .is_some_and(|l| l.to_ascii_lowercase().contains("extend"));
        if is_extend {
            UseCaseRelationKind::Extend
        } else {
            UseCaseRelationKind::Include
        }
    } else {
        UseCaseRelationKind::Association
    };

    Some(UseCaseRelation {
        source,
        target,
        kind,
        label,
    })
}

/// Relation endpoints may reference a use case by its parenthesised name.
fn endpoint_identity(token: &str) -> Option<String> {
    let token = token.trim();
    let token = if token.starts_with('(') && token.ends_with(')') && token.len() >= 2 {
        token[1..token.len() - 1].trim()
    } else {
        token
    };
    if token.is_empty() || token.contains(['<', '>', '-']) {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> (Vec<UseCaseActor>, Vec<UseCase>, Vec<UseCaseRelation>) {
        match parse_usecase(input) {
            DiagramModel::UseCase {
                actors,
                use_cases,
                relations,
            } => (actors, use_cases, relations),
            other => panic!("expected usecase model, got {other:?}"),
        }
    }

    #[test]
    fn parses_actors_and_usecases() {
        let input = "@startuml\n\
            actor User\n\
            actor \"Payment Gateway\" as pay <<secondary>>\n\
            usecase \"Place Order\" as UC1\n\
            (Browse Catalog)\n\
            @enduml";
        let (actors, use_cases, _) = parsed(input);

        assert_eq!(actors.len(), 2);
        assert!(!actors[0].secondary);
        assert_eq!(actors[1].name, "Payment Gateway");
        assert_eq!(actors[1].alias.as_deref(), Some("pay"));
        assert!(actors[1].secondary);

        assert_eq!(use_cases.len(), 2);
        assert_eq!(use_cases[0].identity(), "UC1");
        assert_eq!(use_cases[1].name, "Browse Catalog");
        assert_eq!(use_cases[1].identity(), "Browse Catalog");
    }

    #[test]
    fn association_and_include_extend_relations() {
        let input = "actor User\n\
            usecase \"Login\" as UC1\n\
            usecase \"Audit\" as UC2\n\
            User --> UC1\n\
            UC1 ..> UC2 : include\n\
            UC1 ..> UC2 : extend";
        let (_, _, relations) = parsed(input);

        assert_eq!(relations.len(), 3);
        assert_eq!(relations[0].kind, UseCaseRelationKind::Association);
        assert_eq!(relations[1].kind, UseCaseRelationKind::Include);
        assert_eq!(relations[2].kind, UseCaseRelationKind::Extend);
    }

    #[test]
    fn parenthesised_endpoints_resolve_to_usecase_names() {
        let (_, _, relations) = parsed("actor User\n(Login)\nUser --> (Login)");
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].target, "Login");
    }

    #[test]
    fn dashed_relation_without_label_defaults_to_include() {
        let (_, _, relations) = parsed("usecase A\nusecase B\nA ..> B");
        assert_eq!(relations[0].kind, UseCaseRelationKind::Include);
    }
}
