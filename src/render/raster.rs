//! Container snapshot → pixels.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::DisplayBox;
use crate::foundation::error::{KanjiStrokeError, KanjiStrokeResult};
use crate::markup::tree::Element;
use crate::viewer::container::{KanjiContainer, Marker};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Straight (non-premultiplied) RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Whether any pixel has non-zero alpha.
    pub fn has_ink(&self) -> bool {
        self.data.chunks_exact(4).any(|px| px[3] != 0)
    }

    /// Write as PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> KanjiStrokeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Standalone SVG text for what the container currently shows.
///
/// `None` when the container is empty or hidden. Prefixed attributes whose prefix is never
/// declared (KanjiVG's `kvg:*`) are dropped and a missing SVG namespace is added, so the
/// result is namespace-well-formed.
pub fn snapshot_markup(container: &KanjiContainer) -> Option<String> {
    if container.has_marker(Marker::Hidden) {
        return None;
    }
    let mut root = container.content()?.clone();

    let mut declared: HashSet<String> = HashSet::from(["xml".to_owned(), "xmlns".to_owned()]);
    root.visit_mut(&mut |el: &mut Element| {
        for (k, _) in el.attrs() {
            if let Some(prefix) = k.strip_prefix("xmlns:") {
                declared.insert(prefix.to_owned());
            }
        }
    });
    root.visit_mut(&mut |el: &mut Element| {
        el.retain_attrs(|k, _| match k.split_once(':') {
            Some((prefix, _)) => declared.contains(prefix),
            None => true,
        });
    });
    if root.attr("xmlns").is_none() {
        root.set_attr("xmlns", SVG_NS);
    }

    Some(root.to_markup())
}

/// Rasterizes container snapshots at a fixed display size.
pub struct Rasterizer {
    display: DisplayBox,
    options: usvg::Options<'static>,
}

impl Rasterizer {
    /// System fonts are loaded once here, for stroke-number labels.
    pub fn new(display: DisplayBox) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self {
            display,
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Output size.
    pub fn display(&self) -> DisplayBox {
        self.display
    }

    /// Render the container's current state. Empty or hidden containers give a fully
    /// transparent frame.
    pub fn rasterize(&self, container: &KanjiContainer) -> KanjiStrokeResult<FrameRgba> {
        let DisplayBox { width, height } = self.display;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| KanjiStrokeError::render("failed to allocate pixmap"))?;

        if let Some(markup) = snapshot_markup(container) {
            let tree = usvg::Tree::from_str(&markup, &self.options)
                .map_err(|e| KanjiStrokeError::render(format!("parse snapshot svg: {e}")))?;
            let size = tree.size();
            let xform = resvg::tiny_skia::Transform::from_scale(
                width as f32 / size.width(),
                height as f32 / size.height(),
            );
            resvg::render(&tree, xform, &mut pixmap.as_mut());
        }

        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        Ok(FrameRgba {
            width,
            height,
            data,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
