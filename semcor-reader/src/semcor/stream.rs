//! Pull-based structural stream over an XML file
//!
//! [`XmlStream`] is the lazy counterpart of [`Element::from_path`]: instead
//! of materializing a whole document it walks the event stream and yields
//! each outermost subtree whose open-tag path matches a tag-path pattern.
//! Only the matched subtree is ever held in memory.
//!
//! A tag-path pattern is a regex over the `/`-joined names of the currently
//! open elements, anchored on both ends. The two patterns the views use:
//!
//! - [`sentence_pattern`] matches any sentence element (`.*/s`)
//! - [`sentence_leaf_pattern`] matches any leaf that is a direct child of a
//!   sentence (`.*/s/(punc|wf)`)
//!
//! Matching does not descend into matched subtrees, so nested sentences (or
//! leaves inside nested chunks, for the leaf pattern) are not re-yielded.
//! Parse errors from the XML layer are propagated unmodified and end the
//! stream.

use crate::semcor::elements::{element_from_start, Element};
use crate::semcor::error::CorpusError;
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*/s$").expect("sentence tag-path pattern"));

static SENTENCE_LEAF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*/s/(?:punc|wf)$").expect("sentence-leaf tag-path pattern"));

/// Pattern matching any sentence element.
pub fn sentence_pattern() -> &'static Regex {
    &SENTENCE_PATTERN
}

/// Pattern matching any word/punctuation leaf directly under a sentence.
pub fn sentence_leaf_pattern() -> &'static Regex {
    &SENTENCE_LEAF_PATTERN
}

/// Outcome of reading one event, with no borrow of the read buffer left.
enum Step {
    Open(Element),
    SelfClosed(Element),
    Close,
    Other,
    Eof,
}

/// Streaming matcher over one XML file.
///
/// Implements `Iterator`, yielding one matched subtree per pull. The stream
/// owns its file handle; dropping it before exhaustion is always safe.
/// After an error the stream is fused.
pub struct XmlStream {
    reader: Reader<BufReader<File>>,
    pattern: &'static Regex,
    open_tags: Vec<String>,
    buf: Vec<u8>,
    done: bool,
}

impl XmlStream {
    /// Open a fresh stream cursor over `path` with the given tag-path
    /// pattern.
    pub fn open<P: AsRef<Path>>(path: P, pattern: &'static Regex) -> Result<Self, CorpusError> {
        let file = File::open(path)?;
        let reader = Reader::from_reader(BufReader::new(file));
        Ok(XmlStream {
            reader,
            pattern,
            open_tags: Vec::new(),
            buf: Vec::new(),
            done: false,
        })
    }

    fn matches_path(&self) -> bool {
        self.pattern.is_match(&self.open_tags.join("/"))
    }

    /// Read one event and convert it to an owned [`Step`].
    fn step(&mut self) -> Result<Step, CorpusError> {
        self.buf.clear();
        let step = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(start) => Step::Open(element_from_start(&start)?),
            Event::Empty(start) => Step::SelfClosed(element_from_start(&start)?),
            Event::End(_) => Step::Close,
            Event::Eof => Step::Eof,
            _ => Step::Other,
        };
        Ok(step)
    }

    /// Materialize the subtree rooted at `root`, whose open tag has just
    /// been consumed, by reading up to and including its matching close
    /// tag.
    fn capture(&mut self, root: Element) -> Result<Element, CorpusError> {
        let mut stack: Vec<Element> = vec![root];
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.push_child(element);
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| CorpusError::Xml("unmatched closing tag".to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(element),
                        None => return Ok(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(open) = stack.last_mut() {
                        open.push_text(&text.unescape()?);
                    }
                }
                Event::Eof => {
                    return Err(CorpusError::Xml(
                        "unexpected end of file inside element".to_string(),
                    ));
                }
                _ => {}
            }
        }
    }
}

impl Iterator for XmlStream {
    type Item = Result<Element, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let step = match self.step() {
                Ok(step) => step,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            match step {
                Step::Open(element) => {
                    self.open_tags.push(element.tag().to_string());
                    if self.matches_path() {
                        let result = self.capture(element);
                        self.open_tags.pop();
                        if result.is_err() {
                            self.done = true;
                        }
                        return Some(result);
                    }
                }
                Step::SelfClosed(element) => {
                    self.open_tags.push(element.tag().to_string());
                    let matched = self.matches_path();
                    self.open_tags.pop();
                    if matched {
                        return Some(Ok(element));
                    }
                }
                Step::Close => {
                    self.open_tags.pop();
                }
                Step::Other => {}
                Step::Eof => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
