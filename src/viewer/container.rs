use std::collections::BTreeSet;

use crate::markup::tree::Element;

/// State markers toggled on the container.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Marker {
    /// Strokes are shown in plain outline color.
    OutlineOnly,
    /// The whole container is hidden.
    Hidden,
}

impl Marker {
    /// CSS class the marker is rendered as.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::OutlineOnly => "onlyStrokes",
            Self::Hidden => "hideSVG",
        }
    }
}

/// The designated element holding at most one loaded character.
#[derive(Clone, Debug, PartialEq)]
pub struct KanjiContainer {
    id: String,
    markers: BTreeSet<Marker>,
    content: Option<Element>,
}

impl KanjiContainer {
    /// Empty container with no markers.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markers: BTreeSet::new(),
            content: None,
        }
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Loaded tree, if any.
    pub fn content(&self) -> Option<&Element> {
        self.content.as_ref()
    }

    /// Loaded tree, mutably.
    pub fn content_mut(&mut self) -> Option<&mut Element> {
        self.content.as_mut()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Remove and return the loaded tree. Markers are kept.
    pub fn clear(&mut self) -> Option<Element> {
        self.content.take()
    }

    /// Insert `root`, replacing whatever was loaded.
    pub fn insert(&mut self, root: Element) -> &mut Element {
        self.content.insert(root)
    }

    /// Whether `marker` is set.
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Set `marker`.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.insert(marker);
    }

    /// Clear `marker`.
    pub fn remove_marker(&mut self, marker: Marker) {
        self.markers.remove(&marker);
    }

    /// Flip `marker`; returns whether it is now set.
    pub fn toggle_marker(&mut self, marker: Marker) -> bool {
        if !self.markers.remove(&marker) {
            self.markers.insert(marker);
            return true;
        }
        false
    }

    /// Set markers, in declaration order.
    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/container.rs"]
mod tests;
