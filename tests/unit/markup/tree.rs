use super::*;

fn sample() -> Element {
    let mut svg = Element::new("svg");
    svg.set_attr("viewBox", "0 0 109 109");
    let mut g = Element::new("g");
    g.set_attr("style", "fill:none;stroke:#000000;stroke-width:3");
    let mut p1 = Element::new("path");
    p1.set_attr("d", "M0,0 L10,0");
    let mut p2 = Element::new("path");
    p2.set_attr("d", "M0,0 L0,5");
    g.push_child(Node::Element(p1));
    g.push_child(Node::Element(p2));
    let mut text = Element::new("text");
    text.push_child(Node::Text("1".to_owned()));
    svg.push_child(Node::Element(g));
    svg.push_child(Node::Element(text));
    svg
}

#[test]
fn set_attr_keeps_position() {
    let mut el = Element::new("svg");
    el.set_attr("width", "109");
    el.set_attr("height", "109");
    el.set_attr("width", "300");
    let attrs: Vec<_> = el.attrs().collect();
    assert_eq!(attrs, vec![("width", "300"), ("height", "109")]);
}

#[test]
fn style_is_read_and_rewritten_in_order() {
    let mut svg = sample();
    let g = svg.nth_named_mut("g", 0).unwrap();
    assert_eq!(g.style("stroke"), Some("#000000"));
    g.set_style("stroke", "#bf0a0a");
    g.set_style("stroke-dashoffset", "12");
    assert_eq!(
        g.attr("style"),
        Some("fill:none;stroke:#bf0a0a;stroke-width:3;stroke-dashoffset:12")
    );
}

#[test]
fn class_list_add_remove_is_idempotent() {
    let mut el = Element::new("div");
    el.add_class("onlyStrokes");
    el.add_class("onlyStrokes");
    assert_eq!(el.attr("class"), Some("onlyStrokes"));
    el.add_class("hideSVG");
    assert!(el.has_class("hideSVG"));
    el.remove_class("onlyStrokes");
    assert_eq!(el.attr("class"), Some("hideSVG"));
    el.remove_class("hideSVG");
    assert_eq!(el.attr("class"), None);
}

#[test]
fn descendants_are_in_document_order() {
    let mut svg = sample();
    let ds: Vec<_> = svg
        .descendants_named("path")
        .iter()
        .map(|p| p.attr("d").unwrap().to_owned())
        .collect();
    assert_eq!(ds, vec!["M0,0 L10,0", "M0,0 L0,5"]);

    svg.nth_named_mut("path", 1)
        .unwrap()
        .set_attr("data-length", "5");
    assert_eq!(svg.descendants_named("path")[1].attr("data-length"), Some("5"));
    assert!(svg.nth_named_mut("path", 2).is_none());
}

fn nested() -> Element {
    let mut outer = Element::new("path");
    outer.set_attr("id", "a");
    let mut inner = Element::new("path");
    inner.set_attr("id", "b");
    outer.push_child(Node::Element(inner));
    let mut last = Element::new("path");
    last.set_attr("id", "c");

    let mut svg = Element::new("svg");
    svg.push_child(Node::Element(outer));
    svg.push_child(Node::Element(last));
    svg
}

#[test]
fn mutable_walks_match_read_only_order_for_nested_matches() {
    let mut svg = nested();
    let read: Vec<_> = svg
        .descendants_named("path")
        .iter()
        .map(|p| p.attr("id").unwrap().to_owned())
        .collect();
    assert_eq!(read, vec!["a", "b", "c"]);

    let mut visited = Vec::new();
    svg.visit_named_mut("path", &mut |p: &mut Element| {
        visited.push(p.attr("id").unwrap().to_owned());
    });
    assert_eq!(visited, read);

    for (i, id) in read.iter().enumerate() {
        assert_eq!(svg.nth_named_mut("path", i).unwrap().attr("id"), Some(id.as_str()));
    }
}

#[test]
fn markup_escapes_attributes_and_keeps_text() {
    let mut el = Element::new("text");
    el.set_attr("title", "a<b & \"c\"");
    el.push_child(Node::Text("1 &amp; 2".to_owned()));
    assert_eq!(
        el.to_markup(),
        r#"<text title="a&lt;b &amp; &quot;c&quot;">1 &amp; 2</text>"#
    );
    assert_eq!(Element::new("path").to_markup(), "<path/>");
}
