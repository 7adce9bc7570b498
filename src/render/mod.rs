//! Structured HTML construction.
//!
//! Views are built as a small element tree and serialized in one pass. Text
//! nodes and attribute values are always escaped, so values that came from
//! the service or the user can never inject markup.

pub mod category;
pub mod views;

use std::fmt::Write;

pub use category::Category;
pub use views::{alert_banner, prediction_view, statistics_view};

/// A node of an HTML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Markup produced by another view, inserted without escaping.
    Trusted(String),
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_to(out),
            Node::Text(text) => escape_into(text, false, out),
            Node::Trusted(html) => out.push_str(html),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for `<div class="...">`.
    pub fn div(class: &str) -> Self {
        Self::new("div").class(class)
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        self.attr("style", style)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Serialize to an HTML string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');
        if is_void(self.tag) {
            return;
        }
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// A sequence of sibling nodes, rendered back to back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment(pub Vec<Node>);

impl Fragment {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.write_to(&mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Element> for Fragment {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self(iter.into_iter().map(Node::from).collect())
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input" | "meta" | "link")
}

fn escape_into(text: &str, in_attr: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            '\'' if in_attr => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Format a number the way the service's JSON spelled it: integral values
/// without a fraction, others with their shortest exact representation.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements() {
        let el = Element::div("card")
            .child(Element::new("strong").text("42"))
            .text(" points");
        assert_eq!(
            el.render(),
            r#"<div class="card"><strong>42</strong> points</div>"#
        );
    }

    #[test]
    fn escapes_text_nodes() {
        let el = Element::new("span").text("<script>alert('x')</script> & co");
        assert_eq!(
            el.render(),
            "<span>&lt;script&gt;alert('x')&lt;/script&gt; &amp; co</span>"
        );
    }

    #[test]
    fn escapes_attribute_values() {
        let el = Element::new("input").attr("value", r#"" onfocus="x"#);
        assert_eq!(el.render(), r#"<input value="&quot; onfocus=&quot;x">"#);
    }

    #[test]
    fn trusted_nodes_are_not_escaped() {
        let inner = Element::new("b").text("<x>").render();
        let el = Element::div("slot").child(Node::Trusted(inner));
        assert_eq!(el.render(), r#"<div class="slot"><b>&lt;x&gt;</b></div>"#);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let el = Element::new("br").text("ignored");
        assert_eq!(el.render(), "<br>");
    }

    #[test]
    fn fragment_renders_siblings_in_order() {
        let frag: Fragment = [Element::new("i").text("a"), Element::new("b").text("b")]
            .into_iter()
            .collect();
        assert_eq!(frag.len(), 2);
        assert_eq!(frag.render(), "<i>a</i><b>b</b>");
    }

    #[test]
    fn format_number_matches_json_spelling() {
        assert_eq!(format_number(92.0), "92");
        assert_eq!(format_number(72.4), "72.4");
        assert_eq!(format_number(15.62), "15.62");
        assert_eq!(format_number(-0.0), "0");
    }
}
