#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(model) = pd_parser::parse(input) else {
        return;
    };

    let generated = pd_layout::generate(&model);

    // Every edge in a generated document references nodes from the same
    // document.
    for edge in &generated.document.edges {
        assert!(generated.document.nodes.iter().any(|n| n.id == edge.source));
        assert!(generated.document.nodes.iter().any(|n| n.id == edge.target));
    }

    let xml = pd_render_drawio::render(&generated.document);
    assert!(xml.ends_with("</mxfile>\n"));
});
