//! Generic markup element model and the eager XML parse
//!
//! [`Element`] is the in-memory shape of one markup element: tag name,
//! attributes, direct text content, and child elements. Documents are
//! read-only once parsed; nothing in the reader mutates an element after
//! construction.
//!
//! Two construction paths exist:
//!
//! - [`Element::parse_str`] / [`Element::from_path`] parse a whole document
//!   into a tree (the eager strategy).
//! - [`crate::semcor::stream::XmlStream`] materializes one matched subtree
//!   at a time (the lazy strategy) and reuses the same event-to-element
//!   conversion via [`element_from_start`].

use crate::semcor::error::CorpusError;
use crate::semcor::{PUNC_TAG, WORD_TAG};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// One markup element: tag, attributes, direct text, and children.
///
/// Attribute order is preserved as written in the document. `text` holds the
/// concatenation of the element's direct character data; for `wf`/`punc`
/// leaves this is the surface token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attrs: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, used by fixtures and tests.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this element is a word or punctuation leaf.
    pub fn is_leaf(&self) -> bool {
        self.tag == WORD_TAG || self.tag == PUNC_TAG
    }

    /// Parse a whole XML document into an element tree.
    pub fn parse_str(xml: &str) -> Result<Element, CorpusError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| CorpusError::Xml("unmatched closing tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&text.unescape()?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(CorpusError::Xml("unclosed element at end of document".to_string()));
        }
        root.ok_or_else(|| CorpusError::Xml("document has no root element".to_string()))
    }

    /// Parse a whole XML file into an element tree.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Element, CorpusError> {
        let xml = fs::read_to_string(path)?;
        Element::parse_str(&xml)
    }
}

/// Attach a completed element to the innermost open element, or make it the
/// document root when no element is open.
fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), CorpusError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(CorpusError::Xml("multiple root elements".to_string()))
    }
}

/// Convert an open-tag event into an element with its attributes decoded.
pub(crate) fn element_from_start(start: &BytesStart<'_>) -> Result<Element, CorpusError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attrs.push((key, value));
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaf_with_attributes() {
        let doc = Element::parse_str(r#"<wf cmd="done" pos="NN" lemma="dog" wnsn="1">dog</wf>"#)
            .unwrap();
        assert_eq!(doc.tag(), "wf");
        assert_eq!(doc.text(), "dog");
        assert_eq!(doc.attr("pos"), Some("NN"));
        assert_eq!(doc.attr("lemma"), Some("dog"));
        assert_eq!(doc.attr("wnsn"), Some("1"));
        assert_eq!(doc.attr("missing"), None);
        assert!(doc.is_leaf());
    }

    #[test]
    fn test_parse_nested_children_in_order() {
        let doc = Element::parse_str(
            r#"<s snum="1"><wf pos="DT">The</wf><wf pos="NN">dog</wf><punc>.</punc></s>"#,
        )
        .unwrap();
        assert_eq!(doc.tag(), "s");
        assert_eq!(doc.attr("snum"), Some("1"));
        let tags: Vec<&str> = doc.children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["wf", "wf", "punc"]);
        assert_eq!(doc.children()[1].text(), "dog");
    }

    #[test]
    fn test_text_is_unescaped() {
        let doc = Element::parse_str(r#"<wf lemma="AT&amp;T">AT&amp;T</wf>"#).unwrap();
        assert_eq!(doc.text(), "AT&T");
        assert_eq!(doc.attr("lemma"), Some("AT&T"));
    }

    #[test]
    fn test_self_closing_element() {
        let doc = Element::parse_str(r#"<s snum="4"><wf pos="NN"/></s>"#).unwrap();
        assert_eq!(doc.children().len(), 1);
        assert_eq!(doc.children()[0].text(), "");
    }

    #[test]
    fn test_whitespace_in_leaf_text_is_preserved() {
        let doc = Element::parse_str("<wf pos=\"NN\"> dog </wf>").unwrap();
        assert_eq!(doc.text(), " dog ");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Element::parse_str("<s><wf>dog</s>").is_err());
        assert!(matches!(
            Element::parse_str(""),
            Err(CorpusError::Xml(_))
        ));
    }

    #[test]
    fn test_builder_roundtrip() {
        let leaf = Element::new("wf").with_attr("pos", "NN").with_text("dog");
        let sent = Element::new("s").with_attr("snum", "1").with_child(leaf);
        assert_eq!(sent.children()[0].attr("pos"), Some("NN"));
        assert_eq!(sent.children()[0].text(), "dog");
    }
}
