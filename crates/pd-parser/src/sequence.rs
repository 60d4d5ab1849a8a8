//! Sequence diagram parsing: participant declarations and message arrows.

use pd_core::{DiagramModel, Message, MessageKind, Participant, ParticipantKind};

use crate::{alias_of, clean_label, find_operator, is_bare_token, is_skippable, quoted_or_bare};

/// Reply arrows are matched before their forward counterparts so `<--`
/// never decomposes into `<` + `--`.
const MESSAGE_OPERATORS: [(&str, MessageKind); 4] = [
    ("<--", MessageKind::Return),
    ("-->", MessageKind::Async),
    ("<-", MessageKind::Return),
    ("->", MessageKind::Sync),
];

pub(crate) fn parse_sequence(input: &str) -> DiagramModel {
    let mut participants: Vec<Participant> = Vec::new();
    let mut messages = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if is_skippable(trimmed) {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("participant ") {
            register_participant(rest, ParticipantKind::Participant, &mut participants);
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("actor ") {
            register_participant(rest, ParticipantKind::Actor, &mut participants);
            continue;
        }

        if let Some(message) = parse_message(trimmed) {
            messages.push(message);
        }
        // Anything else is outside the supported subset and skipped.
    }

    DiagramModel::Sequence {
        participants,
        messages,
    }
}

/// Register a participant unless its identity was already declared.
/// Aliases are unique within a diagram; a re-declaration is ignored.
fn register_participant(rest: &str, kind: ParticipantKind, participants: &mut Vec<Participant>) {
    let Some((name, remainder)) = quoted_or_bare(rest) else {
        return;
    };
    let participant = Participant {
        name,
        alias: alias_of(remainder),
        kind,
    };
    if participants
        .iter()
        .any(|existing| existing.identity() == participant.identity())
    {
        return;
    }
    participants.push(participant);
}

fn parse_message(statement: &str) -> Option<Message> {
    let (idx, op, kind) = find_operator(statement, &MESSAGE_OPERATORS)?;
    let source = statement[..idx].trim();
    let right = statement[idx + op.len()..].trim();

    let (target, label) = match right.split_once(':') {
        Some((target, label)) => (target.trim(), clean_label(label)),
        None => (right, None),
    };

    if !is_bare_token(source) || !is_bare_token(target) {
        return None;
    }

    Some(Message {
        source: source.to_string(),
        target: target.to_string(),
        label,
        kind,
    })
}
