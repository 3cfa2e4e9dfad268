//! Stroke views over a loaded visual tree.
//!
//! A stroke is a `path` element. Its length lives in the `data-length` attribute and its
//! remaining undrawn length in the inline `stroke-dashoffset` style; order is document order.

use crate::markup::tree::Element;
use crate::stroke::measure::DATA_LENGTH_ATTR;

const STROKE_TAG: &str = "path";

/// Read-only stroke.
#[derive(Clone, Copy, Debug)]
pub struct StrokeRef<'a>(&'a Element);

impl<'a> StrokeRef<'a> {
    /// The underlying `path` element.
    pub fn element(&self) -> &'a Element {
        self.0
    }

    /// Recorded length; `None` until measured.
    pub fn length(&self) -> Option<u32> {
        self.0.attr(DATA_LENGTH_ATTR)?.trim().parse().ok()
    }

    /// Remaining undrawn length; `None` when no offset has been applied.
    pub fn offset(&self) -> Option<u32> {
        self.0.style("stroke-dashoffset")?.trim().parse().ok()
    }

    /// Inline `stroke` color, if one was set.
    pub fn color(&self) -> Option<&'a str> {
        self.0.style("stroke")
    }
}

/// Mutable stroke.
#[derive(Debug)]
pub struct StrokeMut<'a>(&'a mut Element);

impl StrokeMut<'_> {
    /// The underlying `path` element.
    pub fn element(&self) -> &Element {
        &*self.0
    }

    /// Mutable access to the underlying `path` element.
    pub fn element_mut(&mut self) -> &mut Element {
        &mut *self.0
    }

    /// See [`StrokeRef::length`].
    pub fn length(&self) -> Option<u32> {
        StrokeRef(&*self.0).length()
    }

    /// See [`StrokeRef::offset`].
    pub fn offset(&self) -> Option<u32> {
        StrokeRef(&*self.0).offset()
    }

    /// Record the measured length.
    pub fn set_length(&mut self, len: u32) {
        self.0.set_attr(DATA_LENGTH_ATTR, len.to_string());
    }

    /// Set the remaining undrawn length (`stroke-dashoffset`).
    pub fn set_offset(&mut self, offset: u32) {
        self.0.set_style("stroke-dashoffset", &offset.to_string());
    }

    /// Set the inline `stroke` color.
    pub fn set_color(&mut self, color: &str) {
        self.0.set_style("stroke", color);
    }
}

/// Strokes under `root`, in drawing order.
pub fn strokes(root: &Element) -> Vec<StrokeRef<'_>> {
    root.descendants_named(STROKE_TAG)
        .into_iter()
        .map(StrokeRef)
        .collect()
}

/// Call `f` with each stroke under `root` and its index, in drawing order. Returns the
/// number of strokes visited.
pub fn for_each_stroke_mut(root: &mut Element, mut f: impl FnMut(usize, StrokeMut<'_>)) -> usize {
    let mut count = 0;
    root.visit_named_mut(STROKE_TAG, &mut |el: &mut Element| {
        f(count, StrokeMut(el));
        count += 1;
    });
    count
}

/// The stroke at `index`, if there is one.
pub fn stroke_mut(root: &mut Element, index: usize) -> Option<StrokeMut<'_>> {
    root.nth_named_mut(STROKE_TAG, index).map(StrokeMut)
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/view.rs"]
mod tests;
