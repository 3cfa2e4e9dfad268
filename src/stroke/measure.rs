use kurbo::{BezPath, ParamCurveArclen as _};

use crate::markup::tree::Element;
use crate::stroke::view::for_each_stroke_mut;

/// Attribute recording a stroke's length in whole path units.
pub const DATA_LENGTH_ATTR: &str = "data-length";

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Geometric length of SVG path data, in user units. `None` if `d` does not parse.
pub fn path_length(d: &str) -> Option<f64> {
    let path = BezPath::from_svg(d).ok()?;
    Some(
        path.segments()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .sum(),
    )
}

/// Whole-unit stroke length used for dash sizing and draw timing.
pub fn stroke_length(d: &str) -> u32 {
    path_length(d).map_or(0, |len| len.ceil().max(0.0) as u32)
}

/// Measure every stroke under `root` and hide it behind a full-length dash offset.
///
/// Sets `data-length`, `stroke-dasharray` and `stroke-dashoffset`, discarding any earlier
/// draw progress. Returns the number of strokes prepared.
pub fn prepare_strokes(root: &mut Element) -> usize {
    for_each_stroke_mut(root, |_, mut stroke| {
        let len = stroke.element().attr("d").map_or(0, stroke_length);
        stroke.set_length(len);
        stroke.element_mut().set_style("stroke-dasharray", &len.to_string());
        stroke.set_offset(len);
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/measure.rs"]
mod tests;
