//! Static stroke presentations.
//!
//! Both operations only touch stroke colors and the container's outline marker; draw
//! offsets are left alone. Stopping a running animation first is the caller's job.

use crate::color::palette::StrokePalette;
use crate::foundation::core::Rgb8;
use crate::stroke::view::for_each_stroke_mut;
use crate::viewer::container::{KanjiContainer, Marker};

/// Clear the outline marker and give stroke `i` the palette color for `i`.
/// Returns the number of strokes colored.
pub fn colorize(container: &mut KanjiContainer, palette: &StrokePalette) -> usize {
    container.remove_marker(Marker::OutlineOnly);
    let Some(root) = container.content_mut() else {
        return 0;
    };

    for_each_stroke_mut(root, |i, mut stroke| {
        stroke.set_color(&palette.color(i).to_hex());
    })
}

/// Set the outline marker and paint every stroke `color`.
/// Returns the number of strokes painted.
pub fn outline(container: &mut KanjiContainer, color: Rgb8) -> usize {
    container.add_marker(Marker::OutlineOnly);
    let Some(root) = container.content_mut() else {
        return 0;
    };

    let hex = color.to_hex();
    for_each_stroke_mut(root, |_, mut stroke| stroke.set_color(&hex))
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/presenter.rs"]
mod tests;
