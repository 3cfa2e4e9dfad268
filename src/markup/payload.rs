//! SVG text → base64 payload, the inverse of [`crate::markup::loader`].

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

/// Single-line `<text>` elements; KanjiVG stroke numbers are written one per line.
static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<text.*?</text>").unwrap());

/// How [`encode_payload`] treats the source SVG.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PayloadOptions {
    /// Strip stroke-number labels before encoding.
    pub remove_numbers: bool,
}

/// Remove every `<text …>…</text>` element that fits on one line.
pub fn remove_stroke_numbers(svg: &str) -> String {
    TEXT_ELEMENT.replace_all(svg, "").into_owned()
}

/// Encode SVG text as a standard, padded base64 payload.
pub fn encode_payload(svg: &str, opts: &PayloadOptions) -> String {
    if opts.remove_numbers {
        STANDARD.encode(remove_stroke_numbers(svg))
    } else {
        STANDARD.encode(svg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/payload.rs"]
mod tests;
