//! Owned HTML markup tree.
//!
//! Components build [`Element`] trees with a small builder API and serialize
//! them with [`Node::to_html`]. Serialization is deterministic: attributes are
//! written in insertion order and all text is escaped.

use std::fmt::Write;

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),

    /// Escaped text content
    Text(String),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. A repeated name replaces the earlier value in place.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set the `class` attribute.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Set the `id` attribute.
    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    /// Set the inline `style` attribute.
    pub fn style(self, value: impl Into<String>) -> Self {
        self.attr("style", value)
    }

    /// Set the `href` attribute.
    pub fn href(self, value: impl Into<String>) -> Self {
        self.attr("href", value)
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes.
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute contains `name` as a whole word.
    pub fn has_class(&self, name: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == name))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    /// Serialize to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }

    /// All elements in this subtree, in document order (pre-order).
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_elements(self, &mut found);
        found
    }

    /// All elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.tag == tag)
            .collect()
    }

    /// Concatenated text of this subtree, whitespace runs collapsed.
    pub fn text_content(&self) -> String {
        let mut raw = String::new();
        collect_text(self, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// `href` targets of every `a` element, in document order.
    pub fn links(&self) -> Vec<&str> {
        self.find_all("a")
            .into_iter()
            .filter_map(|a| a.get_attr("href"))
            .collect()
    }
}

fn collect_elements<'a>(node: &'a Node, found: &mut Vec<&'a Element>) {
    if let Node::Element(element) = node {
        found.push(element);
        for child in &element.children {
            collect_elements(child, found);
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => {
            out.push_str(text);
            out.push(' ');
        }
        Node::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
    }
}

/// A sequence of sibling nodes supplied for a layout slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(Vec<Node>);

impl Fragment {
    /// Create a fragment from nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Serialize every node, concatenated.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.write_html(&mut out);
        }
        out
    }

    /// All elements with the given tag across the fragment.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.0.iter().flat_map(|n| n.find_all(tag)).collect()
    }

    /// All elements carrying the given class across the fragment.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.0
            .iter()
            .flat_map(|n| n.descendants())
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// `href` targets of every link across the fragment.
    pub fn links(&self) -> Vec<&str> {
        self.0.iter().flat_map(|n| n.links()).collect()
    }
}

impl From<Node> for Fragment {
    fn from(node: Node) -> Self {
        Self(vec![node])
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self(vec![Node::Element(element)])
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_attributes_in_insertion_order() {
        let node: Node = Element::new("a")
            .class("navbar-item")
            .href("/tips")
            .text("Tips")
            .into();

        assert_eq!(node.to_html(), r#"<a class="navbar-item" href="/tips">Tips</a>"#);
    }

    #[test]
    fn replaces_repeated_attribute() {
        let element = Element::new("div").class("a").id("x").class("b");

        assert_eq!(
            Node::from(element).to_html(),
            r#"<div class="b" id="x"></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = Element::new("section")
            .style(r#"background: url("/a.svg")"#)
            .text("<b> & co")
            .into();

        assert_eq!(
            node.to_html(),
            r#"<section style="background: url(&quot;/a.svg&quot;)">&lt;b&gt; &amp; co</section>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: Node = Element::new("span")
            .text("a")
            .child(Element::new("br"))
            .text("b")
            .into();

        assert_eq!(node.to_html(), "<span>a<br>b</span>");
    }

    #[test]
    fn queries_descendants_in_document_order() {
        let node: Node = Element::new("div")
            .child(Element::new("a").href("/one").child(Element::new("h1").text("One")))
            .child(Element::new("p").child(Element::new("a").href("/two")))
            .into();

        assert_eq!(node.links(), vec!["/one", "/two"]);
        assert_eq!(node.find_all("h1").len(), 1);
        assert_eq!(node.descendants().len(), 5);
    }

    #[test]
    fn collapses_whitespace_in_text_content() {
        let node: Node = Element::new("p")
            .text("Go through\n      handy tips")
            .child(Element::new("strong").text("now"))
            .into();

        assert_eq!(node.text_content(), "Go through handy tips now");
    }

    #[test]
    fn matches_whole_class_words() {
        let element = Element::new("div").class("navbar-item has-dropdown");

        assert!(element.has_class("has-dropdown"));
        assert!(!element.has_class("dropdown"));
    }
}
