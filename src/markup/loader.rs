//! Encoded payload → visual tree.
//!
//! A payload is standard base64 of SVG text, normally UTF-8. The `Option` returning entry points are
//! what the viewer uses: malformed input is logged and reported as `None`, never raised.

use base64::Engine as _;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::foundation::error::{KanjiStrokeError, KanjiStrokeResult};
use crate::markup::tree::{Element, Node};

/// Standard alphabet, padding optional on decode.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 payload into text. ASCII whitespace inside the payload is ignored and
/// bytes that are not valid UTF-8 become U+FFFD.
pub fn decode_payload(encoded: &str) -> KanjiStrokeResult<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = PAYLOAD_ENGINE
        .decode(compact.as_bytes())
        .map_err(|e| KanjiStrokeError::markup(format!("invalid base64 payload: {e}")))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::debug!(valid_up_to = e.utf8_error().valid_up_to(), "payload is not utf-8");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Parse markup text and return its first root element.
///
/// Prolog content (declaration, doctype, comments, processing instructions) and anything
/// after the first root element are ignored. Namespace prefixes are kept verbatim and never
/// resolved, so undeclared prefixes such as `kvg:` are accepted.
pub fn parse_markup(text: &str) -> KanjiStrokeResult<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(element_from(&start)?),
            Ok(Event::Empty(start)) => {
                let el = element_from(&start)?;
                if let Some(root) = attach(&mut stack, el) {
                    return Ok(root);
                }
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| KanjiStrokeError::markup("unbalanced end tag"))?;
                if let Some(root) = attach(&mut stack, el) {
                    return Ok(root);
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = std::str::from_utf8(&text)
                        .map_err(|e| KanjiStrokeError::markup(format!("text is not utf-8: {e}")))?;
                    parent.push_child(Node::Text(raw.to_owned()));
                }
            }
            Ok(Event::GeneralRef(entity)) => {
                if let Some(parent) = stack.last_mut() {
                    let name = std::str::from_utf8(&entity)
                        .map_err(|e| KanjiStrokeError::markup(format!("entity is not utf-8: {e}")))?;
                    parent.push_child(Node::Text(format!("&{name};")));
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = std::str::from_utf8(&data)
                        .map_err(|e| KanjiStrokeError::markup(format!("cdata is not utf-8: {e}")))?;
                    parent.push_child(Node::Text(format!("<![CDATA[{raw}]]>")));
                }
            }
            Ok(Event::Eof) => {
                return Err(KanjiStrokeError::markup(if stack.is_empty() {
                    "no root element"
                } else {
                    "unexpected end of markup"
                }));
            }
            Ok(_) => {}
            Err(e) => {
                return Err(KanjiStrokeError::markup(format!(
                    "parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
        }
    }
}

/// Parse markup text; `None` when it yields no usable root element.
pub fn markup_from_str(text: &str) -> Option<Element> {
    match parse_markup(text) {
        Ok(root) => Some(root),
        Err(e) => {
            tracing::warn!(error = %e, "markup has no usable root element");
            None
        }
    }
}

/// Decode a base64 payload and parse it; `None` on any failure.
pub fn markup_from_base64(encoded: &str) -> Option<Element> {
    match decode_payload(encoded) {
        Ok(text) => markup_from_str(&text),
        Err(e) => {
            tracing::warn!(error = %e, "payload could not be decoded");
            None
        }
    }
}

fn attach(stack: &mut [Element], el: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(Node::Element(el));
            None
        }
        None => Some(el),
    }
}

fn element_from(start: &BytesStart<'_>) -> KanjiStrokeResult<Element> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())
        .map_err(|e| KanjiStrokeError::markup(format!("element name is not utf-8: {e}")))?;
    let mut el = Element::new(name);

    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|e| KanjiStrokeError::markup(format!("bad attribute: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| KanjiStrokeError::markup(format!("attribute name is not utf-8: {e}")))?;
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|e| KanjiStrokeError::markup(format!("attribute value is not utf-8: {e}")))?;
        // Unknown entities stay as written.
        let value = quick_xml::escape::unescape(raw)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| raw.to_owned());
        el.set_attr(key, value);
    }

    Ok(el)
}

#[cfg(test)]
#[path = "../../tests/unit/markup/loader.rs"]
mod tests;
