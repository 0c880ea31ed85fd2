// src/crawl/document.rs
// =============================================================================
// An owned, thread-safe document tree built from parsed HTML.
//
// scraper::Html is not Send, so it cannot travel between the pipeline's
// tasks. The parse stage therefore converts it into this small tree of
// element nodes (tag name + attributes + children), which is all the link
// extractor ever reads. Text and comment nodes are dropped.
//
// Rust concepts:
// - Recursive data structures: a Node owns a Vec of child Nodes
// - Iterators: depth-first traversal without recursion
// =============================================================================

use scraper::{ElementRef, Html};

// A single element in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Lower-case tag name, e.g. "a"
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    // All values of attributes named `key`
    pub fn attr_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.attrs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// A parsed page, rooted at its <html> element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    // Parses an HTML body
    //
    // html5ever recovers from any malformed markup, so this never fails;
    // a garbage body just yields a tree with no anchors.
    pub fn parse(body: &str) -> Self {
        let html = Html::parse_document(body);
        Self::new(convert(html.root_element()))
    }

    // Visits every node depth-first, parents before children
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![&self.root],
        }
    }
}

// Depth-first iterator over a Document
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is visited first
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn convert(element: ElementRef<'_>) -> Node {
    let value = element.value();
    let mut node = Node::new(value.name());
    node.attrs = value
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    node.children = element
        .children()
        .filter_map(ElementRef::wrap)
        .map(convert)
        .collect();
    node
}
