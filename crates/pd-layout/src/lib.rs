#![forbid(unsafe_code)]

//! Deterministic layout and graph generation.
//!
//! Walks a [`DiagramModel`] and produces a [`GraphDocument`]: one node per
//! entity with cursor-based coordinates, one edge per message, relation or
//! derived transition. Edges whose endpoints do not resolve to a declared
//! entity are dropped with a diagnostic; everything else about generation
//! is infallible.

mod activity;
pub mod style;

use pd_core::{
    ClassEntity, DiagramModel, GraphDocument, GraphEdge, GraphNode, Message, MessageKind,
    Participant, ParticipantKind, Point, Relation, RelationKind, UseCase, UseCaseActor,
    UseCaseRelation, UseCaseRelationKind,
};
use rustc_hash::FxHashMap;
use tracing::debug;

/// A generated document together with the non-fatal issues encountered
/// while resolving edge endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub document: GraphDocument,
    pub diagnostics: Vec<String>,
}

/// Monotonic cell-id allocator, instantiated fresh per conversion. Ids 0
/// and 1 are reserved by the document skeleton, so allocation starts at 2.
#[derive(Debug)]
struct CellAllocator {
    next: u64,
}

impl CellAllocator {
    const BASE: u64 = 2;

    fn new() -> Self {
        Self { next: Self::BASE }
    }

    fn node_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("elem_{id}")
    }

    fn edge_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("arrow_{id}")
    }
}

/// Accumulates nodes, edges and diagnostics during one generation run.
struct GraphBuilder {
    alloc: CellAllocator,
    document: GraphDocument,
    diagnostics: Vec<String>,
}

impl GraphBuilder {
    fn new(title: &str) -> Self {
        Self {
            alloc: CellAllocator::new(),
            document: GraphDocument {
                title: title.to_string(),
                nodes: Vec::new(),
                edges: Vec::new(),
            },
            diagnostics: Vec::new(),
        }
    }

    fn add_node(&mut self, label: &str, style: &str, x: i64, y: i64, width: i64, height: i64) -> String {
        let id = self.alloc.node_id();
        self.document.nodes.push(GraphNode {
            id: id.clone(),
            label: label.to_string(),
            style: style.to_string(),
            x,
            y,
            width,
            height,
        });
        id
    }

    fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        arrow_style: &str,
        label: &str,
        points: Option<(Point, Point)>,
    ) -> String {
        let id = self.alloc.edge_id();
        self.document.edges.push(GraphEdge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            style: format!("{}{arrow_style}", style::EDGE_BASE),
            label: label.to_string(),
            source_point: points.map(|(s, _)| s),
            target_point: points.map(|(_, t)| t),
        });
        id
    }

    fn warn(&mut self, message: String) {
        self.diagnostics.push(message);
    }

    fn finish(self) -> Generated {
        debug!(
            nodes = self.document.nodes.len(),
            edges = self.document.edges.len(),
            diagnostics = self.diagnostics.len(),
            "generated graph document"
        );
        Generated {
            document: self.document,
            diagnostics: self.diagnostics,
        }
    }
}

/// Generate the graph document for a parsed diagram.
#[must_use]
pub fn generate(model: &DiagramModel) -> Generated {
    let mut builder = GraphBuilder::new(model.diagram_type().document_title());
    match model {
        DiagramModel::Sequence {
            participants,
            messages,
        } => generate_sequence(participants, messages, &mut builder),
        DiagramModel::Class { classes, relations } => {
            generate_class(classes, relations, &mut builder);
        }
        DiagramModel::UseCase {
            actors,
            use_cases,
            relations,
        } => generate_usecase(actors, use_cases, relations, &mut builder),
        DiagramModel::Activity { flow } => activity::generate_activity(flow, &mut builder),
    }
    builder.finish()
}

// ---------------------------------------------------------------------------
// Sequence diagrams
// ---------------------------------------------------------------------------

const SEQ_X_START: i64 = 50;
const SEQ_X_SPACING: i64 = 180;
const SEQ_Y_START: i64 = 100;
const SEQ_ROW_START: i64 = 200;
const SEQ_ROW_SPACING: i64 = 50;

fn generate_sequence(participants: &[Participant], messages: &[Message], builder: &mut GraphBuilder) {
    let declared = if participants.is_empty() {
        implied_participants(messages)
    } else {
        participants.to_vec()
    };

    let mut index: FxHashMap<String, (String, i64)> = FxHashMap::default();
    for (i, participant) in declared.iter().enumerate() {
        let x = SEQ_X_START + i as i64 * SEQ_X_SPACING;
        let (node_style, width, height) = match participant.kind {
            ParticipantKind::Actor => (style::ACTOR, 30, 60),
            ParticipantKind::Participant => (style::PARTICIPANT, 120, 40),
        };
        let id = builder.add_node(&participant.name, node_style, x, SEQ_Y_START, width, height);
        index.insert(participant.identity().to_string(), (id, x + width / 2));
    }

    // Rows advance only for emitted messages, keeping the column compact
    // when dangling messages are dropped.
    let mut row_y = SEQ_ROW_START;
    for message in messages {
        let source = index.get(&message.source);
        let target = index.get(&message.target);
        let (Some((source_id, source_x)), Some((target_id, target_x))) = (source, target) else {
            let mut unknown: Vec<&str> = Vec::new();
            if source.is_none() {
                unknown.push(&message.source);
            }
            if target.is_none() {
                unknown.push(&message.target);
            }
            builder.warn(format!(
                "dropped message '{} -> {}': unknown participant {}",
                message.source,
                message.target,
                unknown.join(", ")
            ));
            continue;
        };

        let arrow = match message.kind {
            MessageKind::Sync => style::ARROW_SYNC,
            MessageKind::Async => style::ARROW_ASYNC,
            MessageKind::Return => style::ARROW_RETURN,
        };
        let (source_id, source_x) = (source_id.clone(), *source_x);
        let (target_id, target_x) = (target_id.clone(), *target_x);
        builder.add_edge(
            &source_id,
            &target_id,
            arrow,
            message.label.as_deref().unwrap_or(""),
            Some((
                Point { x: source_x, y: row_y },
                Point { x: target_x, y: row_y },
            )),
        );
        row_y += SEQ_ROW_SPACING;
    }
}

/// When no participants are declared, derive them from message endpoints in
/// first-appearance order so the layout stays deterministic.
fn implied_participants(messages: &[Message]) -> Vec<Participant> {
    let mut seen: Vec<Participant> = Vec::new();
    for message in messages {
        for name in [&message.source, &message.target] {
            if !seen.iter().any(|p| p.identity() == name) {
                seen.push(Participant {
                    name: name.clone(),
                    alias: None,
                    kind: ParticipantKind::Participant,
                });
            }
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Class diagrams
// ---------------------------------------------------------------------------

const CLASS_X_START: i64 = 50;
const CLASS_Y_START: i64 = 50;
const CLASS_X_SPACING: i64 = 250;
const CLASS_Y_SPACING: i64 = 200;
const CLASS_WIDTH: i64 = 200;
const CLASS_COLUMNS: i64 = 3;
const CLASS_MEMBER_HEIGHT: i64 = 20;

const COMPARTMENT_SEPARATOR: &str = "─────────────";

fn generate_class(classes: &[ClassEntity], relations: &[Relation], builder: &mut GraphBuilder) {
    let mut index: FxHashMap<String, String> = FxHashMap::default();

    for (i, class) in classes.iter().enumerate() {
        let col = i as i64 % CLASS_COLUMNS;
        let row = i as i64 / CLASS_COLUMNS;
        let x = CLASS_X_START + col * CLASS_X_SPACING;
        let y = CLASS_Y_START + row * CLASS_Y_SPACING;

        let node_style = match class.stereotype {
            pd_core::ClassStereotype::Class => style::CLASS,
            _ => style::INTERFACE,
        };
        let member_count = (class.attributes.len() + class.methods.len()) as i64;
        let height = 80 + member_count * CLASS_MEMBER_HEIGHT;

        let id = builder.add_node(&class_label(class), node_style, x, y, CLASS_WIDTH, height);
        index.insert(class.name.clone(), id);
    }

    for relation in relations {
        let source = index.get(&relation.source);
        let target = index.get(&relation.target);
        let (Some(source_id), Some(target_id)) = (source, target) else {
            let unknown = if source.is_none() {
                &relation.source
            } else {
                &relation.target
            };
            builder.warn(format!(
                "dropped relation '{} -> {}': unknown class {unknown}",
                relation.source, relation.target
            ));
            continue;
        };

        let arrow = match relation.kind {
            RelationKind::Inheritance => style::ARROW_INHERITANCE,
            RelationKind::Implementation => style::ARROW_IMPLEMENTATION,
            RelationKind::Aggregation => style::ARROW_AGGREGATION,
            RelationKind::Composition => style::ARROW_COMPOSITION,
            RelationKind::Association => style::ARROW_ASSOCIATION,
        };
        let (source_id, target_id) = (source_id.clone(), target_id.clone());
        builder.add_edge(&source_id, &target_id, arrow, &relation_label(relation), None);
    }
}

/// Compartmentalised node label: name, attributes, methods, separated by a
/// horizontal rule. Methods without attributes keep an empty attribute
/// compartment so the shape still reads as a class.
fn class_label(class: &ClassEntity) -> String {
    let mut lines = vec![class.name.clone()];
    if !class.attributes.is_empty() {
        lines.push(COMPARTMENT_SEPARATOR.to_string());
        lines.extend(class.attributes.iter().map(pd_core::ClassMember::display));
    }
    if !class.methods.is_empty() {
        if class.attributes.is_empty() {
            lines.push(COMPARTMENT_SEPARATOR.to_string());
        }
        lines.push(COMPARTMENT_SEPARATOR.to_string());
        lines.extend(class.methods.iter().map(pd_core::ClassMember::display));
    }
    lines.join("\n")
}

fn relation_label(relation: &Relation) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(m) = relation.source_multiplicity.as_deref() {
        parts.push(m);
    }
    if let Some(l) = relation.label.as_deref() {
        parts.push(l);
    }
    if let Some(m) = relation.target_multiplicity.as_deref() {
        parts.push(m);
    }
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Use-case diagrams
// ---------------------------------------------------------------------------

const UC_ACTOR_X: i64 = 50;
const UC_USECASE_X: i64 = 250;
const UC_SECONDARY_X: i64 = 450;
const UC_Y_START: i64 = 100;
const UC_Y_SPACING: i64 = 120;

fn generate_usecase(
    actors: &[UseCaseActor],
    use_cases: &[UseCase],
    relations: &[UseCaseRelation],
    builder: &mut GraphBuilder,
) {
    let mut index: FxHashMap<String, String> = FxHashMap::default();

    // Primary actors on the left, external systems on the right, use cases
    // in between.
    let primary = actors.iter().filter(|a| !a.secondary);
    for (i, actor) in primary.enumerate() {
        let y = UC_Y_START + i as i64 * UC_Y_SPACING;
        let id = builder.add_node(&actor.name, style::ACTOR, UC_ACTOR_X, y, 30, 60);
        index.insert(actor.identity().to_string(), id);
    }

    let secondary = actors.iter().filter(|a| a.secondary);
    for (i, actor) in secondary.enumerate() {
        let y = UC_Y_START + i as i64 * UC_Y_SPACING;
        let label = format!("<<system>>\n{}", actor.name);
        let id = builder.add_node(&label, style::ACTOR, UC_SECONDARY_X, y, 30, 60);
        index.insert(actor.identity().to_string(), id);
    }

    for (i, use_case) in use_cases.iter().enumerate() {
        let y = UC_Y_START + i as i64 * UC_Y_SPACING;
        let id = builder.add_node(&use_case.name, style::USECASE, UC_USECASE_X, y, 140, 70);
        index.insert(use_case.identity().to_string(), id);
    }

    for relation in relations {
        let source = index.get(&relation.source);
        let target = index.get(&relation.target);
        let (Some(source_id), Some(target_id)) = (source, target) else {
            let unknown = if source.is_none() {
                &relation.source
            } else {
                &relation.target
            };
            builder.warn(format!(
                "dropped relation '{} -> {}': unknown actor or use case {unknown}",
                relation.source, relation.target
            ));
            continue;
        };

        let (arrow, label) = match relation.kind {
            UseCaseRelationKind::Include => (style::ARROW_DEPENDENCY, "<<include>>".to_string()),
            UseCaseRelationKind::Extend => (style::ARROW_DEPENDENCY, "<<extend>>".to_string()),
            UseCaseRelationKind::Association => (
                style::ARROW_ASSOCIATION,
                relation.label.clone().unwrap_or_default(),
            ),
        };
        let (source_id, target_id) = (source_id.clone(), target_id.clone());
        builder.add_edge(&source_id, &target_id, arrow, &label, None);
    }
}
