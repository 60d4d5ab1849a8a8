//! Class diagram parsing: class/interface blocks, members and relations.

use pd_core::{
    ClassEntity, ClassMember, ClassStereotype, DiagramModel, Relation, RelationKind, Visibility,
};

use crate::{clean_label, find_operator, is_bare_token, is_skippable};

/// Relation operators. The boolean marks reversed operators whose endpoints
/// must swap so the edge always points child-to-parent.
const RELATION_OPERATORS: [(&str, (RelationKind, bool)); 6] = [
    ("--|>", (RelationKind::Inheritance, false)),
    ("<|--", (RelationKind::Inheritance, true)),
    ("..|>", (RelationKind::Implementation, false)),
    ("o--", (RelationKind::Aggregation, false)),
    ("*--", (RelationKind::Composition, false)),
    ("--", (RelationKind::Association, false)),
];

enum MemberSlot {
    Attribute,
    Method,
}

pub(crate) fn parse_class(input: &str) -> DiagramModel {
    let mut classes: Vec<ClassEntity> = Vec::new();
    let mut relations = Vec::new();
    let mut open_class: Option<usize> = None;

    for line in input.lines() {
        let trimmed = line.trim();
        if is_skippable(trimmed) {
            continue;
        }

        if let Some((stereotype, rest)) = class_declaration(trimmed) {
            open_class = register_class(stereotype, rest, &mut classes);
            continue;
        }

        if trimmed.starts_with('}') {
            open_class = None;
            continue;
        }

        if let Some(idx) = open_class {
            push_member(trimmed, &mut classes[idx]);
            continue;
        }

        if let Some(relation) = parse_relation(trimmed) {
            relations.push(relation);
        }
    }

    DiagramModel::Class { classes, relations }
}

fn class_declaration(line: &str) -> Option<(ClassStereotype, &str)> {
    if let Some(rest) = line.strip_prefix("abstract class ") {
        return Some((ClassStereotype::Abstract, rest));
    }
    if let Some(rest) = line.strip_prefix("class ") {
        return Some((ClassStereotype::Class, rest));
    }
    if let Some(rest) = line.strip_prefix("interface ") {
        return Some((ClassStereotype::Interface, rest));
    }
    None
}

/// Register a class and, when the declaration opens a `{` block, return its
/// index so following lines attach as members. One-line bodies
/// (`class A { +foo(): int }`) are consumed immediately.
fn register_class(
    stereotype: ClassStereotype,
    rest: &str,
    classes: &mut Vec<ClassEntity>,
) -> Option<usize> {
    let rest = rest.trim();
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == '{')
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut entity = ClassEntity {
        name: name.to_string(),
        stereotype,
        attributes: Vec::new(),
        methods: Vec::new(),
    };

    let after_name = &rest[name_end..];
    let Some(brace) = after_name.find('{') else {
        classes.push(entity);
        return None;
    };

    let body = &after_name[brace + 1..];
    match body.find('}') {
        Some(end) => {
            // Inline body, closed on the same line.
            let inline = body[..end].trim();
            if !inline.is_empty() {
                push_member(inline, &mut entity);
            }
            classes.push(entity);
            None
        }
        None => {
            classes.push(entity);
            Some(classes.len() - 1)
        }
    }
}

fn push_member(line: &str, class: &mut ClassEntity) {
    let Some((slot, member)) = parse_member(line) else {
        return;
    };
    match slot {
        MemberSlot::Attribute => class.attributes.push(member),
        MemberSlot::Method => class.methods.push(member),
    }
}

/// Lines with a signature parenthesis are methods; sigil-prefixed lines
/// without one are attributes. Everything else is outside the subset.
fn parse_member(line: &str) -> Option<(MemberSlot, ClassMember)> {
    let mut chars = line.chars();
    let (visibility, text) = match chars.next().and_then(Visibility::from_sigil) {
        Some(v) => (Some(v), chars.as_str().trim_start()),
        None => (None, line),
    };
    if text.is_empty() {
        return None;
    }

    let member = ClassMember {
        visibility,
        text: text.to_string(),
    };
    if text.contains('(') && text.contains(')') {
        Some((MemberSlot::Method, member))
    } else if visibility.is_some() {
        Some((MemberSlot::Attribute, member))
    } else {
        None
    }
}

fn parse_relation(statement: &str) -> Option<Relation> {
    let (idx, op, (kind, reversed)) = find_operator(statement, &RELATION_OPERATORS)?;
    let left = statement[..idx].trim();
    let right = statement[idx + op.len()..].trim();

    let (right, label) = match right.split_once(':') {
        Some((right, label)) => (right.trim(), clean_label(label)),
        None => (right, None),
    };

    let (source, source_multiplicity) = strip_trailing_multiplicity(left);
    let (target_multiplicity, target) = strip_leading_multiplicity(right);

    if !is_bare_token(source) || !is_bare_token(target) {
        return None;
    }

    let (source, target, source_multiplicity, target_multiplicity) = if reversed {
        (target, source, target_multiplicity, source_multiplicity)
    } else {
        (source, target, source_multiplicity, target_multiplicity)
    };

    Some(Relation {
        source: source.to_string(),
        target: target.to_string(),
        kind,
        source_multiplicity,
        target_multiplicity,
        label,
    })
}

/// `A "1"` → (`A`, Some("1"))
fn strip_trailing_multiplicity(side: &str) -> (&str, Option<String>) {
    let side = side.trim();
    if let Some(before_quote) = side.strip_suffix('"') {
        if let Some(open) = before_quote.rfind('"') {
            let multiplicity = before_quote[open + 1..].to_string();
            return (side[..open].trim(), Some(multiplicity));
        }
    }
    (side, None)
}

/// `"0..*" B` → (Some("0..*"), `B`)
fn strip_leading_multiplicity(side: &str) -> (Option<String>, &str) {
    let side = side.trim();
    if let Some(after_quote) = side.strip_prefix('"') {
        if let Some(close) = after_quote.find('"') {
            let multiplicity = after_quote[..close].to_string();
            return (Some(multiplicity), after_quote[close + 1..].trim());
        }
    }
    (None, side)
}
