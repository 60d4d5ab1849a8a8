#![forbid(unsafe_code)]

//! Core types for the PlantUML-to-draw.io pipeline.
//!
//! Two families of types live here: the diagram model produced by
//! `pd-parser` (participants, classes, activities, ...) and the graph
//! document produced by `pd-layout` and consumed by `pd-render-drawio`
//! (positioned nodes and id-referencing edges).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagram types recognised in PlantUML source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DiagramType {
    Sequence,
    Class,
    UseCase,
    Activity,
    #[default]
    Unknown,
}

impl DiagramType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Class => "class",
            Self::UseCase => "usecase",
            Self::Activity => "activity",
            Self::Unknown => "unknown",
        }
    }

    /// Title used for the `diagram` element of the generated document.
    #[must_use]
    pub const fn document_title(self) -> &'static str {
        match self {
            Self::Sequence => "Sequence Diagram",
            Self::Class => "Class Diagram",
            Self::UseCase => "Use Case Diagram",
            Self::Activity => "Activity Diagram",
            Self::Unknown => "Diagram",
        }
    }
}

/// Fatal conversion errors. Recoverable issues travel as diagnostics
/// strings alongside the result instead.
#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unrecognized diagram type: no supported PlantUML keywords found")]
    UnrecognizedDiagramType,
}

// ---------------------------------------------------------------------------
// Sequence diagrams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ParticipantKind {
    #[default]
    Participant,
    Actor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Participant {
    pub name: String,
    pub alias: Option<String>,
    pub kind: ParticipantKind,
}

impl Participant {
    /// Identity used to resolve message endpoints: alias if present, else name.
    #[must_use]
    pub fn identity(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Message kind, classified by arrow operator shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MessageKind {
    /// `->`: solid arrow, filled head.
    #[default]
    Sync,
    /// `-->`: dashed arrow, open head.
    Async,
    /// `<-` / `<--`: reply arrow, dashed with open head.
    Return,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Message {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub kind: MessageKind,
}

// ---------------------------------------------------------------------------
// Class diagrams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ClassStereotype {
    #[default]
    Class,
    Interface,
    Abstract,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    #[must_use]
    pub const fn sigil(self) -> char {
        match self {
            Self::Public => '+',
            Self::Private => '-',
            Self::Protected => '#',
        }
    }

    #[must_use]
    pub const fn from_sigil(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Public),
            '-' => Some(Self::Private),
            '#' => Some(Self::Protected),
            _ => None,
        }
    }
}

/// One attribute or method line inside a class body. `text` holds the
/// declaration with the visibility sigil stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassMember {
    pub visibility: Option<Visibility>,
    pub text: String,
}

impl ClassMember {
    /// Reassemble the member as it appears in a compartment line.
    #[must_use]
    pub fn display(&self) -> String {
        match self.visibility {
            Some(v) => format!("{}{}", v.sigil(), self.text),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClassEntity {
    pub name: String,
    pub stereotype: ClassStereotype,
    pub attributes: Vec<ClassMember>,
    pub methods: Vec<ClassMember>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RelationKind {
    Inheritance,
    Implementation,
    #[default]
    Association,
    Aggregation,
    Composition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
    pub source_multiplicity: Option<String>,
    pub target_multiplicity: Option<String>,
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Use-case diagrams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UseCaseActor {
    pub name: String,
    pub alias: Option<String>,
    /// `<<secondary>>` stereotype: an external system, placed on the
    /// opposite side of the use cases.
    pub secondary: bool,
}

impl UseCaseActor {
    #[must_use]
    pub fn identity(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UseCase {
    pub name: String,
    pub alias: Option<String>,
}

impl UseCase {
    #[must_use]
    pub fn identity(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UseCaseRelationKind {
    #[default]
    Association,
    Include,
    Extend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UseCaseRelation {
    pub source: String,
    pub target: String,
    pub kind: UseCaseRelationKind,
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Activity diagrams
// ---------------------------------------------------------------------------

/// One step in an activity flow. Transitions between consecutive steps are
/// derived during generation, never declared in the markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Activity {
    Start,
    Stop,
    Action {
        label: String,
    },
    Decision {
        condition: String,
        then_label: Option<String>,
        else_label: Option<String>,
        then_branch: Vec<Activity>,
        else_branch: Vec<Activity>,
    },
}

// ---------------------------------------------------------------------------
// Diagram model
// ---------------------------------------------------------------------------

/// Tagged union over the per-type entity collections. Produced by the
/// parser, consumed by the generator; each variant carries everything its
/// generator needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiagramModel {
    Sequence {
        participants: Vec<Participant>,
        messages: Vec<Message>,
    },
    Class {
        classes: Vec<ClassEntity>,
        relations: Vec<Relation>,
    },
    UseCase {
        actors: Vec<UseCaseActor>,
        use_cases: Vec<UseCase>,
        relations: Vec<UseCaseRelation>,
    },
    Activity {
        flow: Vec<Activity>,
    },
}

impl DiagramModel {
    #[must_use]
    pub const fn diagram_type(&self) -> DiagramType {
        match self {
            Self::Sequence { .. } => DiagramType::Sequence,
            Self::Class { .. } => DiagramType::Class,
            Self::UseCase { .. } => DiagramType::UseCase,
            Self::Activity { .. } => DiagramType::Activity,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// A positioned shape in the output document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub style: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// A connector between two nodes. Endpoints are literal node ids already
/// resolved by the generator; the serializer never cross-references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub style: String,
    pub label: String,
    /// Explicit anchor points, used by sequence messages to pin the arrow
    /// to its lifeline row.
    pub source_point: Option<Point>,
    pub target_point: Option<Point>,
}

/// Ordered nodes-then-edges collection, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphDocument {
    pub title: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
