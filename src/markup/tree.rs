//! Owned, mutable visual tree for one loaded character.
//!
//! Attribute values are stored unescaped; text is stored exactly as it appeared in the
//! source (still escaped) and written back verbatim.

use std::fmt::Write as _;

/// A child of an [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Raw (escaped) character data.
    Text(String),
}

/// One markup element with ordered attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Childless element with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Unescaped value of `key`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, keeping its original position when it already exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(idx).1)
    }

    /// Keep only the attributes for which `keep` returns true.
    pub fn retain_attrs(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.attrs.retain(|(k, v)| keep(k, v));
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append a child node.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Inline style property from the `style` attribute.
    pub fn style(&self, prop: &str) -> Option<&str> {
        style_decls(self.attr("style")?)
            .find(|(k, _)| *k == prop)
            .map(|(_, v)| v)
    }

    /// Set an inline style property, rewriting the `style` attribute in declaration order.
    pub fn set_style(&mut self, prop: &str, value: &str) {
        let mut decls: Vec<(String, String)> = self
            .attr("style")
            .map(|s| {
                style_decls(s)
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect()
            })
            .unwrap_or_default();

        match decls.iter_mut().find(|(k, _)| k == prop) {
            Some((_, v)) => *v = value.to_owned(),
            None => decls.push((prop.to_owned(), value.to_owned())),
        }

        let mut out = String::new();
        for (i, (k, v)) in decls.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            let _ = write!(out, "{k}:{v}");
        }
        self.set_attr("style", out);
    }

    /// Whether the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
    }

    /// Add `class` to the `class` attribute unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attr("class", joined);
    }

    /// Remove `class`; drops the attribute when nothing is left.
    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attr("class") else {
            return;
        };
        let kept = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if kept.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", kept);
        }
    }

    /// All descendant elements named `name`, in document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        fn walk<'a>(el: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
            for child in el.child_elements() {
                if child.name == name {
                    out.push(child);
                }
                walk(child, name, out);
            }
        }

        let mut out = Vec::new();
        walk(self, name, &mut out);
        out
    }

    /// Call `f` on every descendant element named `name`, in the same order as
    /// [`Element::descendants_named`]. A match's own subtree is searched after `f` returns.
    pub fn visit_named_mut(&mut self, name: &str, f: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(e) = child {
                if e.name == name {
                    f(e);
                }
                e.visit_named_mut(name, f);
            }
        }
    }

    /// The `n`th (0-based) descendant element named `name`, counted as in
    /// [`Element::descendants_named`].
    pub fn nth_named_mut(&mut self, name: &str, n: usize) -> Option<&mut Element> {
        fn walk<'a>(el: &'a mut Element, name: &str, n: &mut usize) -> Option<&'a mut Element> {
            for child in &mut el.children {
                if let Node::Element(e) = child {
                    if e.name == name {
                        if *n == 0 {
                            return Some(e);
                        }
                        *n -= 1;
                    }
                    if let Some(found) = walk(e, name, n) {
                        return Some(found);
                    }
                }
            }
            None
        }

        let mut n = n;
        walk(self, name, &mut n)
    }

    /// Visit this element and every descendant element, parents first.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.visit_mut(f);
            }
        }
    }

    /// Serialize back to markup. Childless elements are written self-closing.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {k}=\"{}\"", quick_xml::escape::escape(v.as_str()));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_markup(out),
                Node::Text(t) => out.push_str(t),
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

fn style_decls(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (k, v) = decl.split_once(':')?;
        let k = k.trim();
        (!k.is_empty()).then_some((k, v.trim()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/markup/tree.rs"]
mod tests;
