//! Structured model of the base HTML template.
//!
//! The tree only records what the generator needs to locate marker
//! elements: tag names, attributes and byte spans into the source. Text and
//! comments are kept as spans so callers can splice edits into the original
//! string without re-serializing anything.

use std::ops::Range;

use crate::error::{ErrorKind, NavError, Result};
use crate::lexer;
use crate::token::{Attribute, HtmlToken, Spanned};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose end tag may be omitted when the parent closes.
const OPTIONAL_END: &[&str] = &[
    "li", "p", "dt", "dd", "option", "optgroup", "tr", "td", "th", "thead", "tbody", "tfoot",
    "colgroup",
];

/// Elements that may be left open at the end of the document.
const IMPLIED_AT_EOF: &[&str] = &["html", "head", "body"];

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Range<usize>),
    Comment(Range<usize>),
    Doctype(Range<usize>),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub start_tag: Range<usize>,
    /// `None` for void, self-closing and implicitly closed elements.
    pub end_tag: Option<Range<usize>>,
    pub children: Vec<Node>,
    content_end: usize,
}

impl Element {
    fn open(name: String, attrs: Vec<Attribute>, start_tag: Range<usize>) -> Self {
        let content_end = start_tag.end;
        Self {
            name,
            attrs,
            start_tag,
            end_tag: None,
            children: Vec::new(),
            content_end,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    /// Whether the whitespace-separated `class` list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|list| list.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Span covering the start tag through the end tag (or last content).
    pub fn outer_span(&self) -> Range<usize> {
        let end = self
            .end_tag
            .as_ref()
            .map(|t| t.end)
            .unwrap_or(self.content_end);
        self.start_tag.start..end
    }

    /// Span between the start tag and the end tag.
    pub fn inner_span(&self) -> Range<usize> {
        let end = self
            .end_tag
            .as_ref()
            .map(|t| t.start)
            .unwrap_or(self.content_end);
        self.start_tag.end..end
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// A parsed HTML fragment.
#[derive(Debug, Clone)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// All elements in document order (pre-order).
    pub fn elements(&self) -> Elements<'_> {
        let mut stack: Vec<&Node> = self.nodes.iter().collect();
        stack.reverse();
        Elements { stack }
    }

    /// First element in document order matching `pred`.
    pub fn find_first<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.elements().find(|&e| pred(e))
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        self.elements().filter(|&e| pred(e)).count()
    }
}

/// Pre-order iterator over the elements of a [`Document`].
pub struct Elements<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Node::Element(element) = node {
                self.stack.extend(element.children.iter().rev());
                return Some(element);
            }
        }
        None
    }
}

/// Parse an HTML fragment into a [`Document`].
pub fn parse(source: &str) -> Result<Document> {
    let tokens = lexer::lex_html(source)?;
    TreeBuilder::default().build(tokens)
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn build(mut self, tokens: Vec<Spanned<HtmlToken>>) -> Result<Document> {
        for Spanned { token, span } in tokens {
            match token {
                HtmlToken::StartTag(tag) => {
                    let element = Element::open(tag.name, tag.attrs, span);
                    if tag.self_closing || element.is_void() {
                        self.attach(Node::Element(element));
                    } else {
                        self.open.push(element);
                    }
                }
                HtmlToken::EndTag(name) => self.close(&name, span)?,
                HtmlToken::Text => self.attach(Node::Text(span)),
                HtmlToken::Comment => self.attach(Node::Comment(span)),
                HtmlToken::Doctype => self.attach(Node::Doctype(span)),
            }
        }

        while let Some(element) = self.open.pop() {
            let name = element.name.as_str();
            if !IMPLIED_AT_EOF.contains(&name) && !OPTIONAL_END.contains(&name) {
                return Err(NavError::at(
                    ErrorKind::UnclosedElement(element.name.clone()),
                    element.start_tag.clone(),
                ));
            }
            self.attach(Node::Element(element));
        }

        Ok(Document { nodes: self.root })
    }

    fn attach(&mut self, node: Node) {
        let end = match &node {
            Node::Element(e) => e.outer_span().end,
            Node::Text(s) | Node::Comment(s) | Node::Doctype(s) => s.end,
        };
        match self.open.last_mut() {
            Some(parent) => {
                parent.content_end = parent.content_end.max(end);
                parent.children.push(node);
            }
            None => self.root.push(node),
        }
    }

    fn close(&mut self, name: &str, span: Range<usize>) -> Result<()> {
        let Some(depth) = self.open.iter().rposition(|e| e.name == name) else {
            return Err(NavError::at(ErrorKind::UnexpectedEndTag(name.to_string()), span));
        };

        // Anything opened after the matching element must allow an implied end.
        while self.open.len() > depth + 1 {
            let Some(inner) = self.open.pop() else { break };
            if !OPTIONAL_END.contains(&inner.name.as_str()) {
                return Err(NavError::at(
                    ErrorKind::UnclosedElement(inner.name.clone()),
                    inner.start_tag.clone(),
                ));
            }
            self.attach(Node::Element(inner));
        }

        if let Some(mut element) = self.open.pop() {
            element.content_end = span.start;
            element.end_tag = Some(span);
            self.attach(Node::Element(element));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r##"<header class="nav-header">
  <img class="profile-image" src="avatar.png" alt="Profile">
  <button class="hamburger" aria-label="Menu">&#9776;</button>
  <nav class="nav-links" aria-label="Main">
    <a href="#">Home</a>
    <a href="#">Blog</a>
  </nav>
</header>"##;

    #[test]
    fn parse_nested_structure() {
        let doc = parse(TEMPLATE).unwrap();
        let names: Vec<_> = doc.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["header", "img", "button", "nav", "a", "a"]);
    }

    #[test]
    fn spans_cover_source_text() {
        let doc = parse(TEMPLATE).unwrap();
        let img = doc.find_first(|e| e.has_class("profile-image")).unwrap();
        assert_eq!(
            &TEMPLATE[img.outer_span()],
            r#"<img class="profile-image" src="avatar.png" alt="Profile">"#
        );
        assert!(img.end_tag.is_none());

        let nav = doc.find_first(|e| e.has_class("nav-links")).unwrap();
        assert!(TEMPLATE[nav.outer_span()].starts_with("<nav class=\"nav-links\""));
        assert!(TEMPLATE[nav.outer_span()].ends_with("</nav>"));
        assert_eq!(
            TEMPLATE[nav.inner_span()].trim(),
            "<a href=\"#\">Home</a>\n    <a href=\"#\">Blog</a>"
        );
    }

    #[test]
    fn class_lists_are_tokenized() {
        let doc = parse(r#"<ul class="menu  nav-links primary"><li>x</li></ul>"#).unwrap();
        let ul = doc.find_first(|e| e.has_class("nav-links")).unwrap();
        assert_eq!(ul.name, "ul");
        assert!(!ul.has_class("nav"));
    }

    #[test]
    fn first_match_wins_in_document_order() {
        let source = r#"<div><nav class="nav-links" id="outer"><span class="nav-links" id="inner"></span></nav></div><nav class="nav-links" id="last"></nav>"#;
        let doc = parse(source).unwrap();
        let first = doc.find_first(|e| e.has_class("nav-links")).unwrap();
        assert_eq!(first.attr("id"), Some("outer"));
        assert_eq!(doc.count(|e| e.has_class("nav-links")), 3);
    }

    #[test]
    fn optional_end_tags_close_with_parent() {
        let source = "<ul class=\"nav-links\"><li>One<li>Two</ul><p>after";
        let doc = parse(source).unwrap();
        let ul = doc.find_first(|e| e.name == "ul").unwrap();
        assert_eq!(ul.children.len(), 1, "second li nests in the first");
        assert_eq!(&source[ul.inner_span()], "<li>One<li>Two");
        let p = doc.find_first(|e| e.name == "p").unwrap();
        assert_eq!(&source[p.outer_span()], "<p>after");
    }

    #[test]
    fn unexpected_end_tag_is_an_error() {
        let err = parse("<div></nav></div>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedEndTag(ref n) if n == "nav"));
        assert_eq!(err.span, Some(5..11));
    }

    #[test]
    fn unclosed_element_is_an_error() {
        let err = parse("<header><nav class=\"nav-links\"></header>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnclosedElement(ref n) if n == "nav"));

        let err = parse("<div>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnclosedElement(ref n) if n == "div"));
    }

    #[test]
    fn document_shell_may_stay_open() {
        let doc = parse("<html><body><nav class=\"nav-links\"></nav>").unwrap();
        assert!(doc.find_first(|e| e.has_class("nav-links")).is_some());
    }
}
