//! mxfile element primitives with an indented tree writer.

use std::fmt::Write;

use crate::attributes::Attributes;

/// The element vocabulary of a draw.io document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    MxFile,
    Diagram,
    MxGraphModel,
    Root,
    MxCell,
    MxGeometry,
    MxPoint,
}

impl ElementKind {
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::MxFile => "mxfile",
            Self::Diagram => "diagram",
            Self::MxGraphModel => "mxGraphModel",
            Self::Root => "root",
            Self::MxCell => "mxCell",
            Self::MxGeometry => "mxGeometry",
            Self::MxPoint => "mxPoint",
        }
    }
}

/// An XML element with attributes and children.
#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    attrs: Attributes,
    children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set a string attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs = self.attrs.set(name, value);
        self
    }

    /// Set an integer attribute.
    #[must_use]
    pub fn attr_int(mut self, name: &str, value: i64) -> Self {
        self.attrs = self.attrs.set(name, value);
        self
    }

    /// Add a child element.
    #[must_use]
    pub fn child(mut self, elem: Element) -> Self {
        self.children.push(elem);
        self
    }

    /// Add multiple child elements.
    #[must_use]
    pub fn children<I: IntoIterator<Item = Element>>(mut self, elems: I) -> Self {
        self.children.extend(elems);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Render the element tree, indented two spaces per level.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(256);
        self.write_to_string(&mut output, 0);
        output
    }

    fn write_to_string(&self, output: &mut String, depth: usize) {
        let tag = self.kind.tag_name();
        for _ in 0..depth {
            output.push_str("  ");
        }
        let _ = write!(output, "<{tag}");
        output.push_str(&self.attrs.render());

        if self.children.is_empty() {
            output.push_str(" />\n");
        } else {
            output.push_str(">\n");
            for child in &self.children {
                child.write_to_string(output, depth + 1);
            }
            for _ in 0..depth {
                output.push_str("  ");
            }
            let _ = writeln!(output, "</{tag}>");
        }
    }
}
