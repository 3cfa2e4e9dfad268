use super::*;
use crate::markup::loader::parse_markup;
use crate::stroke::view::strokes;

const SAN: &str = include_str!("../../fixtures/kanji/04e09.svg");

#[test]
fn straight_lines_measure_exactly() {
    assert_eq!(path_length("M10,20 L20,20"), Some(10.0));
    assert_eq!(stroke_length("M0,0 L3,4"), 5);
}

#[test]
fn curves_are_rounded_up() {
    // Quarter circle of radius 10 drawn as a cubic: length ~15.71.
    let len = path_length("M10,0 C10,5.523 5.523,10 0,10").unwrap();
    assert!((len - 15.71).abs() < 0.05, "{len}");
    assert_eq!(stroke_length("M10,0 C10,5.523 5.523,10 0,10"), 16);
}

#[test]
fn relative_kanjivg_style_commands_parse() {
    let len = path_length("M31.5,24.5c1.5,0.5,3.5,0.5,5,0.25c7.5-1,14.5-2,22-2.5").unwrap();
    assert!(len > 20.0);
}

#[test]
fn unparsable_data_measures_zero() {
    assert_eq!(path_length("not a path"), None);
    assert_eq!(stroke_length("not a path"), 0);
}

#[test]
fn prepare_sets_length_dasharray_and_offset() {
    let mut root = parse_markup(SAN).unwrap();
    assert_eq!(prepare_strokes(&mut root), 3);

    let view = strokes(&root);
    let lengths: Vec<_> = view.iter().map(|s| s.length().unwrap()).collect();
    assert_eq!(lengths, vec![10, 5, 20]);
    let offsets: Vec<_> = view.iter().map(|s| s.offset().unwrap()).collect();
    assert_eq!(offsets, vec![10, 5, 20]);
    assert_eq!(view[2].element().style("stroke-dasharray"), Some("20"));
}

#[test]
fn nested_paths_are_measured_in_document_order() {
    let mut root = parse_markup(
        r#"<svg><path d="M0,0 L10,0"><path d="M0,0 L5,0"/></path><path d="M0,0 L20,0"/></svg>"#,
    )
    .unwrap();
    assert_eq!(prepare_strokes(&mut root), 3);
    let lengths: Vec<_> = strokes(&root).iter().map(|s| s.length().unwrap()).collect();
    assert_eq!(lengths, vec![10, 5, 20]);
}
