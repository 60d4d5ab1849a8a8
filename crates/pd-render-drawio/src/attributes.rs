//! XML attribute handling with draw.io-compatible escaping.

use std::fmt::{self, Write};

/// A single XML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

/// Value of an XML attribute.
#[derive(Debug, Clone)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", escape_xml_attr(s)),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

/// Ordered collection of XML attributes.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    attrs: Vec<Attribute>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Add an attribute. Order is preserved in the output.
    #[must_use]
    pub fn set<K: Into<String>, V: Into<AttributeValue>>(mut self, name: K, value: V) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Render the attributes as ` name="value"` pairs.
    #[must_use]
    pub fn render(&self) -> String {
        let mut result = String::new();
        for attr in &self.attrs {
            let _ = write!(result, " {}=\"{}\"", attr.name, attr.value);
        }
        result
    }
}

/// Escape special characters in XML attribute values. Newlines become the
/// `&#xa;` entity draw.io uses for multi-line labels.
fn escape_xml_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            '\n' => result.push_str("&#xa;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_attributes_in_insertion_order() {
        let attrs = Attributes::new().set("id", "elem_2").set("x", 50_i64);
        assert_eq!(attrs.render(), " id=\"elem_2\" x=\"50\"");
    }

    #[test]
    fn escapes_special_characters() {
        let attrs = Attributes::new().set("value", "A & B < C > D \"E\" 'F'");
        let rendered = attrs.render();
        assert!(rendered.contains("&amp;"));
        assert!(rendered.contains("&lt;"));
        assert!(rendered.contains("&gt;"));
        assert!(rendered.contains("&quot;"));
        assert!(rendered.contains("&#39;"));
    }

    #[test]
    fn escapes_newlines_as_drawio_entities() {
        let attrs = Attributes::new().set("value", "Order\n─────\n+total");
        assert!(attrs.render().contains("Order&#xa;"));
    }
}
