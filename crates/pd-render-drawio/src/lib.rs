#![forbid(unsafe_code)]

//! draw.io (mxfile) serialization for a [`GraphDocument`].
//!
//! Serialization is a pure function of the document: the envelope carries a
//! fixed timestamp and agent string, so equal documents always produce
//! byte-identical XML.

pub mod attributes;
pub mod element;

use pd_core::{GraphDocument, GraphEdge, GraphNode};

use crate::element::{Element, ElementKind};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

const FILE_HOST: &str = "app.diagrams.net";
const FILE_MODIFIED: &str = "2024-01-01T12:00:00.000Z";
const FILE_AGENT: &str = "PlantUML to DrawIO Converter";
const FILE_VERSION: &str = "22.0.0";

/// Serialize a graph document to a complete draw.io XML file.
#[must_use]
pub fn render(document: &GraphDocument) -> String {
    let mut root = Element::new(ElementKind::Root)
        .child(Element::new(ElementKind::MxCell).attr("id", "0"))
        .child(Element::new(ElementKind::MxCell).attr("id", "1").attr("parent", "0"));
    root = root.children(document.nodes.iter().map(node_cell));
    root = root.children(document.edges.iter().map(edge_cell));

    let model = Element::new(ElementKind::MxGraphModel)
        .attr_int("dx", 1422)
        .attr_int("dy", 794)
        .attr_int("grid", 1)
        .attr_int("gridSize", 10)
        .attr_int("guides", 1)
        .attr_int("tooltips", 1)
        .attr_int("connect", 1)
        .attr_int("arrows", 1)
        .attr_int("fold", 1)
        .attr_int("page", 1)
        .attr_int("pageScale", 1)
        .attr_int("pageWidth", 827)
        .attr_int("pageHeight", 1169)
        .attr_int("math", 0)
        .attr_int("shadow", 0)
        .child(root);

    let diagram = Element::new(ElementKind::Diagram)
        .attr("name", &document.title)
        .attr("id", "diagram1")
        .child(model);

    let file = Element::new(ElementKind::MxFile)
        .attr("host", FILE_HOST)
        .attr("modified", FILE_MODIFIED)
        .attr("agent", FILE_AGENT)
        .attr("version", FILE_VERSION)
        .attr("type", "device")
        .child(diagram);

    let mut output = String::with_capacity(1024);
    output.push_str(XML_DECLARATION);
    output.push_str(&file.render());
    output
}

fn node_cell(node: &GraphNode) -> Element {
    Element::new(ElementKind::MxCell)
        .attr("id", &node.id)
        .attr("value", &node.label)
        .attr("style", &node.style)
        .attr("vertex", "1")
        .attr("parent", "1")
        .child(
            Element::new(ElementKind::MxGeometry)
                .attr_int("x", node.x)
                .attr_int("y", node.y)
                .attr_int("width", node.width)
                .attr_int("height", node.height)
                .attr("as", "geometry"),
        )
}

fn edge_cell(edge: &GraphEdge) -> Element {
    let mut geometry = Element::new(ElementKind::MxGeometry)
        .attr("relative", "1")
        .attr("as", "geometry");
    if let Some(point) = edge.source_point {
        geometry = geometry.child(
            Element::new(ElementKind::MxPoint)
                .attr_int("x", point.x)
                .attr_int("y", point.y)
                .attr("as", "sourcePoint"),
        );
    }
    if let Some(point) = edge.target_point {
        geometry = geometry.child(
            Element::new(ElementKind::MxPoint)
                .attr_int("x", point.x)
                .attr_int("y", point.y)
                .attr("as", "targetPoint"),
        );
    }

    Element::new(ElementKind::MxCell)
        .attr("id", &edge.id)
        .attr("value", &edge.label)
        .attr("style", &edge.style)
        .attr("edge", "1")
        .attr("parent", "1")
        .attr("source", &edge.source)
        .attr("target", &edge.target)
        .child(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::Point;
    use proptest::prelude::*;

    fn sample_document() -> GraphDocument {
        GraphDocument {
            title: "Sequence Diagram".to_string(),
            nodes: vec![
                GraphNode {
                    id: "elem_2".to_string(),
                    label: "Alice".to_string(),
                    style: "rounded=0;whiteSpace=wrap;html=1;".to_string(),
                    x: 50,
                    y: 100,
                    width: 120,
                    height: 40,
                },
                GraphNode {
                    id: "elem_3".to_string(),
                    label: "Bob".to_string(),
                    style: "rounded=0;whiteSpace=wrap;html=1;".to_string(),
                    x: 230,
                    y: 100,
                    width: 120,
                    height: 40,
                },
            ],
            edges: vec![GraphEdge {
                id: "arrow_4".to_string(),
                source: "elem_2".to_string(),
                target: "elem_3".to_string(),
                style: "edgeStyle=orthogonalEdgeStyle;rounded=0;html=1;endArrow=block;endFill=1;"
                    .to_string(),
                label: "hello".to_string(),
                source_point: Some(Point { x: 110, y: 200 }),
                target_point: Some(Point { x: 290, y: 200 }),
            }],
        }
    }

    #[test]
    fn emits_fixed_envelope() {
        let xml = render(&sample_document());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("host=\"app.diagrams.net\""));
        assert!(xml.contains("modified=\"2024-01-01T12:00:00.000Z\""));
        assert!(xml.contains("<diagram name=\"Sequence Diagram\" id=\"diagram1\">"));
        assert!(xml.contains("pageWidth=\"827\""));
        assert!(xml.trim_end().ends_with("</mxfile>"));
    }

    #[test]
    fn reserves_cells_zero_and_one() {
        let xml = render(&sample_document());
        let zero = xml.find("<mxCell id=\"0\" />").expect("cell 0");
        let one = xml.find("<mxCell id=\"1\" parent=\"0\" />").expect("cell 1");
        let first_node = xml.find("elem_2").expect("first node");
        assert!(zero < one && one < first_node);
    }

    #[test]
    fn node_cells_carry_geometry() {
        let xml = render(&sample_document());
        assert!(xml.contains("vertex=\"1\""));
        assert!(xml.contains(
            "<mxGeometry x=\"50\" y=\"100\" width=\"120\" height=\"40\" as=\"geometry\" />"
        ));
    }

    #[test]
    fn edge_cells_reference_node_ids_and_waypoints() {
        let xml = render(&sample_document());
        assert!(xml.contains("edge=\"1\""));
        assert!(xml.contains("source=\"elem_2\" target=\"elem_3\""));
        assert!(xml.contains("<mxPoint x=\"110\" y=\"200\" as=\"sourcePoint\" />"));
        assert!(xml.contains("<mxPoint x=\"290\" y=\"200\" as=\"targetPoint\" />"));
    }

    #[test]
    fn multiline_labels_escape_as_entities() {
        let mut document = sample_document();
        document.nodes[0].label = "Order\n─────────────\n+total: float".to_string();
        let xml = render(&document);
        assert!(xml.contains("Order&#xa;"));
        assert!(!xml.contains("Order\n─"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let document = sample_document();
        assert_eq!(render(&document), render(&document));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_pipeline_output_is_stable(body in "[a-zA-Z :;()>+<-]{0,160}") {
            let input = format!("@startuml\nparticipant Seed\n{body}\n@enduml");
            if let Ok(model) = pd_parser::parse(&input) {
                let generated = pd_layout::generate(&model);
                prop_assert_eq!(render(&generated.document), render(&generated.document));
            }
        }
    }
}
