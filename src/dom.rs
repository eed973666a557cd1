//! HTML parser – converts an HTML fragment into a simple, mutable DOM tree.
//!
//! Parsing is delegated to `html5ever`, so malformed markup is repaired the
//! same way a browser would repair it. The resulting `RcDom` is converted into
//! our own owned tree ([`ElementNode`] / [`DomNode`]) which the rewrite passes
//! mutate directly and which serializes back to HTML.
//!
//! Recognised vocabulary:
//! - Block: div, p, h1-h3, ul, ol, li, table, tbody, tr, td, th
//! - Inline: span, strong, b, em, i, u, a, br, img
//! - Anything else is kept as an opaque [`Tag::Unknown`] container.

use std::fmt::Write as _;

use html5ever::tendril::TendrilSink;
use html5ever::{local_name, ns, parse_document, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

/// The tag name of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    P,
    H1,
    H2,
    H3,
    Strong,
    B,
    Em,
    I,
    U,
    A,
    Ul,
    Ol,
    Li,
    Img,
    Span,
    Br,
    Table,
    Tbody,
    Tr,
    Td,
    Th,
    Body,
    Html,
    Head,
    Script,
    Style,
    /// Catch-all for unknown tags, holding the lower-cased name. They keep
    /// their children and serialize unchanged, but get no styling.
    Unknown(String),
}

impl Tag {
    pub fn from_name(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "div" => Tag::Div,
            "p" => Tag::P,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "strong" => Tag::Strong,
            "b" => Tag::B,
            "em" => Tag::Em,
            "i" => Tag::I,
            "u" => Tag::U,
            "a" => Tag::A,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "img" => Tag::Img,
            "span" => Tag::Span,
            "br" => Tag::Br,
            "table" => Tag::Table,
            "tbody" => Tag::Tbody,
            "tr" => Tag::Tr,
            "td" => Tag::Td,
            "th" => Tag::Th,
            "body" => Tag::Body,
            "html" => Tag::Html,
            "head" => Tag::Head,
            "script" => Tag::Script,
            "style" => Tag::Style,
            other => Tag::Unknown(other.to_string()),
        }
    }

    /// Lower-case tag name as written in markup.
    pub fn name(&self) -> &str {
        match self {
            Tag::Div => "div",
            Tag::P => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::Strong => "strong",
            Tag::B => "b",
            Tag::Em => "em",
            Tag::I => "i",
            Tag::U => "u",
            Tag::A => "a",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Img => "img",
            Tag::Span => "span",
            Tag::Br => "br",
            Tag::Table => "table",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Th => "th",
            Tag::Body => "body",
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Script => "script",
            Tag::Style => "style",
            Tag::Unknown(name) => name,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Tag::H1 | Tag::H2 | Tag::H3)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Tag::Ul | Tag::Ol)
    }

    /// Elements serialized without an end tag.
    pub fn is_void(&self) -> bool {
        match self {
            Tag::Img | Tag::Br => true,
            Tag::Unknown(name) => matches!(
                name.as_str(),
                "area"
                    | "base"
                    | "col"
                    | "embed"
                    | "hr"
                    | "input"
                    | "link"
                    | "meta"
                    | "source"
                    | "track"
                    | "wbr"
            ),
            _ => false,
        }
    }

    /// Elements whose text content is emitted without escaping.
    fn is_raw_text(&self) -> bool {
        matches!(self, Tag::Script | Tag::Style)
    }
}

/// Ordered attribute list. Names are lower-cased on write and compared
/// case-insensitively on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value in place if the attribute exists, append otherwise.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn style(&self) -> Option<&str> {
        self.get("style")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A node in our DOM tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(ElementNode),
    Text(String),
    Comment(String),
}

/// An element node carrying tag, attributes, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: Tag,
    pub attributes: Attributes,
    pub children: Vec<DomNode>,
}

impl ElementNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn inline_style(&self) -> Option<&str> {
        self.attributes.style()
    }

    pub fn src(&self) -> Option<&str> {
        self.attributes.get("src")
    }

    /// Child elements, skipping text and comments.
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|c| match c {
            DomNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First descendant (not self) with the given tag, in document order.
    pub fn find_descendant(&self, tag: &Tag) -> Option<&ElementNode> {
        for child in self.element_children() {
            if child.tag == *tag {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Serialized markup of the children (the `innerHTML` of this element).
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(&mut out, child, self.tag.is_raw_text());
        }
        out
    }

    /// Serialized markup of this element including its own tags.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an HTML fragment as the content of a `<body>` element.
///
/// Never fails: the HTML5 tree builder repairs anything it is given. Elements
/// that a document parse would hoist into `<head>` (`<style>`, `<title>`,
/// `<meta>`, ...) stay where the author put them. The returned root is a
/// synthetic `body` element.
pub fn parse_fragment(html: &str) -> ElementNode {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let dom: RcDom =
        html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false)
            .one(html);

    let mut body = ElementNode::new(Tag::Body);
    // The fragment lands under the `<html>` root the tree builder creates.
    for root in dom.document.children.borrow().iter() {
        for child in root.children.borrow().iter() {
            if let Some(node) = convert_node(child) {
                body.children.push(node);
            }
        }
    }
    body
}

/// Parse a complete HTML document and return its `<body>` element; the
/// head is dropped.
pub fn parse_document_body(html: &str) -> ElementNode {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    match find_body(&dom.document) {
        Some(body) => convert_element(&body),
        None => {
            log::warn!("parsed document has no <body>; returning an empty root");
            ElementNode::new(Tag::Body)
        }
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == "body" {
                return Some(child.clone());
            }
            if &*name.local == "html" {
                if let Some(body) = find_body(child) {
                    return Some(body);
                }
            }
        }
    }
    None
}

fn convert_element(handle: &Handle) -> ElementNode {
    let mut elem = match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let mut e = ElementNode::new(Tag::from_name(&name.local));
            for attr in attrs.borrow().iter() {
                e.attributes.set(&attr.name.local, attr.value.to_string());
            }
            e
        }
        _ => ElementNode::new(Tag::Body),
    };

    // <template> keeps its content in a separate fragment.
    let template = match &handle.data {
        NodeData::Element {
            template_contents, ..
        } => template_contents.borrow().clone(),
        _ => None,
    };
    let source = template.as_ref().unwrap_or(handle);

    for child in source.children.borrow().iter() {
        if let Some(node) = convert_node(child) {
            elem.children.push(node);
        }
    }
    elem
}

fn convert_node(handle: &Handle) -> Option<DomNode> {
    match &handle.data {
        NodeData::Element { .. } => Some(DomNode::Element(convert_element(handle))),
        NodeData::Text { contents } => Some(DomNode::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(DomNode::Comment(contents.to_string())),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Pre-order, read-only traversal: `visit` sees every element, parents first.
pub fn walk<F>(node: &ElementNode, visit: &mut F)
where
    F: FnMut(&ElementNode),
{
    visit(node);
    for child in node.element_children() {
        walk(child, visit);
    }
}

/// Pre-order traversal that lets `visit` rewrite each element's attributes.
///
/// The callback only receives the tag and the attribute list, never the
/// child vector, so the set of visited nodes is fixed before any mutation.
pub fn walk_mut<F>(node: &mut ElementNode, visit: &mut F)
where
    F: FnMut(&Tag, &mut Attributes),
{
    visit(&node.tag, &mut node.attributes);
    for child in node.children.iter_mut() {
        if let DomNode::Element(e) = child {
            walk_mut(e, visit);
        }
    }
}

/// Number of elements in the subtree, including `node`.
pub fn element_count(node: &ElementNode) -> usize {
    let mut count = 0;
    walk(node, &mut |_| count += 1);
    count
}

/// Tag names of the subtree in pre-order.
pub fn tag_sequence(node: &ElementNode) -> Vec<String> {
    let mut tags = Vec::new();
    walk(node, &mut |e| tags.push(e.tag.name().to_string()));
    tags
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

fn write_node(out: &mut String, node: &DomNode, raw_text: bool) {
    match node {
        DomNode::Element(e) => write_element(out, e),
        DomNode::Text(t) if raw_text => out.push_str(t),
        DomNode::Text(t) => out.push_str(&escape_text(t)),
        DomNode::Comment(c) => {
            let _ = write!(out, "<!--{c}-->");
        }
    }
}

fn write_element(out: &mut String, elem: &ElementNode) {
    let name = elem.tag.name();
    out.push('<');
    out.push_str(name);
    for (key, value) in elem.attributes.iter() {
        let _ = write!(out, " {key}=\"{}\"", escape_attr(value));
    }
    out.push('>');
    if elem.tag.is_void() {
        return;
    }
    for child in &elem.children {
        write_node(out, child, elem.tag.is_raw_text());
    }
    let _ = write!(out, "</{name}>");
}

/// Escape text content the way `innerHTML` does.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
