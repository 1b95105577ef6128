//! Eager and lazy view construction over documents
//!
//! A view is one granularity/tag combination over a set of corpus files.
//! Both execution strategies share the per-sentence assembly code and the
//! per-leaf [`build_item`] decision table, so they cannot diverge:
//!
//! - the eager path parses a whole document ([`Element::from_path`]),
//!   walks every sentence, and materializes the full result at view
//!   construction time;
//! - the lazy path wraps an [`XmlStream`] and builds one item (or one
//!   sentence) per pull, holding only the stream cursor and the element
//!   currently being converted.
//!
//! The two paths differ structurally in one respect: the eager
//! walk descends into nested chunk elements transparently, while the lazy
//! bracketed path fails fast on any non-leaf child of a sentence, and the
//! lazy unbracketed tag pattern only matches leaves that are direct
//! children of a sentence. Flat-sentence documents (the corpus norm)
//! produce identical output under both strategies.
//!
//! Error handling also differs in scope: eager construction discards the
//! whole view on the first failing document, while a lazy cursor yields
//! the error at the pull that hits it and then moves on to the next
//! document, so a collected lazy result can skip the remainder of a
//! failed document.

use crate::semcor::elements::Element;
use crate::semcor::error::CorpusError;
use crate::semcor::item::{build_item, collect_leaves, Item, Unit, ViewParams};
use crate::semcor::seq::LazyConcat;
use crate::semcor::stream::{sentence_leaf_pattern, sentence_pattern, XmlStream};
use crate::semcor::{SENT_NUM_ATTR, SENT_TAG};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A bracketed sentence: its declared identifier plus its items.
///
/// The identifier is the sentence's `snum` attribute, preserved verbatim;
/// it is opaque and not necessarily a contiguous integer. Both fields are
/// fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub num: String,
    pub items: Vec<Item>,
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.num)?;
        for item in &self.items {
            write!(f, " {}", item)?;
        }
        Ok(())
    }
}

/// Append one built item to a running item list.
///
/// For the word unit a leaf's sub-word list is spliced in as individual
/// tokens rather than appended as one element; every other unit appends
/// the single built item.
fn splice(items: &mut Vec<Item>, item: Item, unit: Unit) {
    match (unit, item) {
        (Unit::Word, Item::Words(words)) => {
            items.extend(words.into_iter().map(Item::Token));
        }
        (_, item) => items.push(item),
    }
}

/// All sentence elements under `doc` in document order, at any depth.
fn sentence_elements(doc: &Element) -> Vec<&Element> {
    let mut sentences = Vec::new();
    let mut stack: Vec<&Element> = doc.children().iter().rev().collect();
    while let Some(element) = stack.pop() {
        if element.tag() == SENT_TAG {
            sentences.push(element);
        }
        stack.extend(element.children().iter().rev());
    }
    sentences
}

fn sentence_num(sent: &Element) -> Result<String, CorpusError> {
    sent.attr(SENT_NUM_ATTR)
        .map(str::to_string)
        .ok_or_else(|| CorpusError::MissingAttr {
            tag: sent.tag().to_string(),
            attr: SENT_NUM_ATTR,
        })
}

/// Items of one sentence, descending into nested chunk elements (eager
/// path).
fn deep_sentence_items(sent: &Element, params: &ViewParams) -> Vec<Item> {
    let mut items = Vec::new();
    for leaf in collect_leaves(sent) {
        splice(&mut items, build_item(leaf, params), params.unit);
    }
    items
}

/// Items of one sentence from its direct children only (lazy path); any
/// non-leaf child is a structural error.
fn strict_sentence_items(sent: &Element, params: &ViewParams) -> Result<Vec<Item>, CorpusError> {
    let mut items = Vec::new();
    for child in sent.children() {
        if !child.is_leaf() {
            return Err(CorpusError::UnexpectedElement {
                tag: child.tag().to_string(),
            });
        }
        splice(&mut items, build_item(child, params), params.unit);
    }
    Ok(items)
}

fn lazy_sentence(sent: &Element, params: &ViewParams) -> Result<Sentence, CorpusError> {
    Ok(Sentence {
        num: sentence_num(sent)?,
        items: strict_sentence_items(sent, params)?,
    })
}

/// Eagerly materialize one document as a flat item sequence.
fn eager_flat(doc: &Element, params: &ViewParams) -> Vec<Item> {
    let mut items = Vec::new();
    for sent in sentence_elements(doc) {
        items.extend(deep_sentence_items(sent, params));
    }
    items
}

/// Eagerly materialize one document as bracketed sentences.
fn eager_bracketed(doc: &Element, params: &ViewParams) -> Result<Vec<Sentence>, CorpusError> {
    let mut sentences = Vec::new();
    for sent in sentence_elements(doc) {
        sentences.push(Sentence {
            num: sentence_num(sent)?,
            items: deep_sentence_items(sent, params),
        });
    }
    Ok(sentences)
}

pub(crate) fn materialize_items(
    paths: &[PathBuf],
    params: &ViewParams,
) -> Result<Vec<Item>, CorpusError> {
    let mut items = Vec::new();
    for path in paths {
        let doc = Element::from_path(path)?;
        items.extend(eager_flat(&doc, params));
    }
    Ok(items)
}

pub(crate) fn materialize_sentences(
    paths: &[PathBuf],
    params: &ViewParams,
) -> Result<Vec<Sentence>, CorpusError> {
    let mut sentences = Vec::new();
    for path in paths {
        let doc = Element::from_path(path)?;
        sentences.extend(eager_bracketed(&doc, params)?);
    }
    Ok(sentences)
}

/// Lazy adapter expanding each `Words` item into individual word tokens.
///
/// Pulls from the outer producer; when it yields a sub-word list, those
/// words are drained before the outer producer is advanced. Errors pass
/// through at the pull that hits them.
struct FlattenWords<I> {
    inner: I,
    pending: std::vec::IntoIter<String>,
}

impl<I> FlattenWords<I> {
    fn new(inner: I) -> Self {
        FlattenWords {
            inner,
            pending: Vec::new().into_iter(),
        }
    }
}

impl<I> Iterator for FlattenWords<I>
where
    I: Iterator<Item = Result<Item, CorpusError>>,
{
    type Item = Result<Item, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.pending.next() {
                return Some(Ok(Item::Token(word)));
            }
            match self.inner.next()? {
                Err(err) => return Some(Err(err)),
                Ok(Item::Words(words)) => self.pending = words.into_iter(),
                Ok(item) => return Some(Ok(item)),
            }
        }
    }
}

/// Fresh lazy item producer over one document.
fn doc_items(
    path: &Path,
    params: ViewParams,
) -> Box<dyn Iterator<Item = Result<Item, CorpusError>>> {
    let stream = match XmlStream::open(path, sentence_leaf_pattern()) {
        Ok(stream) => stream,
        Err(err) => return Box::new(std::iter::once(Err(err))),
    };
    let items = stream.map(move |leaf| leaf.map(|leaf| build_item(&leaf, &params)));
    if params.unit == Unit::Word {
        Box::new(FlattenWords::new(items))
    } else {
        Box::new(items)
    }
}

/// Fresh lazy sentence producer over one document.
fn doc_sentences(
    path: &Path,
    params: ViewParams,
) -> Box<dyn Iterator<Item = Result<Sentence, CorpusError>>> {
    let stream = match XmlStream::open(path, sentence_pattern()) {
        Ok(stream) => stream,
        Err(err) => return Box::new(std::iter::once(Err(err))),
    };
    Box::new(stream.map(move |sent| sent.and_then(|sent| lazy_sentence(&sent, &params))))
}

#[derive(Debug)]
enum Backing<T> {
    Eager(Vec<T>),
    Lazy { paths: Vec<PathBuf>, params: ViewParams },
}

/// An unbracketed view: one flat logical sequence of items across all
/// requested documents.
///
/// `iter()` starts a fresh cursor each time; a lazy view re-pulls from the
/// beginning, and abandoning iteration early is always safe.
#[derive(Debug)]
pub struct ItemView {
    backing: Backing<Item>,
}

impl ItemView {
    pub(crate) fn eager(items: Vec<Item>) -> Self {
        ItemView {
            backing: Backing::Eager(items),
        }
    }

    pub(crate) fn lazy(paths: Vec<PathBuf>, params: ViewParams) -> Self {
        ItemView {
            backing: Backing::Lazy { paths, params },
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Result<Item, CorpusError>> + '_> {
        match &self.backing {
            Backing::Eager(items) => Box::new(items.iter().cloned().map(Ok)),
            Backing::Lazy { paths, params } => {
                let params = *params;
                Box::new(LazyConcat::new(paths.clone(), move |path: PathBuf| {
                    doc_items(&path, params)
                }))
            }
        }
    }

    /// Drain the view into a vector, failing on the first error.
    pub fn materialize(&self) -> Result<Vec<Item>, CorpusError> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a ItemView {
    type Item = Result<Item, CorpusError>;
    type IntoIter = Box<dyn Iterator<Item = Result<Item, CorpusError>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A bracketed view: one logical sequence of sentences across all
/// requested documents.
#[derive(Debug)]
pub struct SentenceView {
    backing: Backing<Sentence>,
}

impl SentenceView {
    pub(crate) fn eager(sentences: Vec<Sentence>) -> Self {
        SentenceView {
            backing: Backing::Eager(sentences),
        }
    }

    pub(crate) fn lazy(paths: Vec<PathBuf>, params: ViewParams) -> Self {
        SentenceView {
            backing: Backing::Lazy { paths, params },
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Result<Sentence, CorpusError>> + '_> {
        match &self.backing {
            Backing::Eager(sentences) => Box::new(sentences.iter().cloned().map(Ok)),
            Backing::Lazy { paths, params } => {
                let params = *params;
                Box::new(LazyConcat::new(paths.clone(), move |path: PathBuf| {
                    doc_sentences(&path, params)
                }))
            }
        }
    }

    /// Drain the view into a vector, failing on the first error.
    pub fn materialize(&self) -> Result<Vec<Sentence>, CorpusError> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a SentenceView {
    type Item = Result<Sentence, CorpusError>;
    type IntoIter = Box<dyn Iterator<Item = Result<Sentence, CorpusError>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
