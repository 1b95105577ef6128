//! Main module for the SemCor reader library
//!
//! The modules mirror the data flow of a view request:
//!
//! - [`elements`] - generic markup element model and the eager XML parse
//! - [`stream`] - pull-based structural stream over an XML file (lazy parse)
//! - [`item`] - the per-leaf item builder: the decision table that maps one
//!   annotated leaf element to one output item
//! - [`tree`] - labeled tree output type for tagged chunk views
//! - [`view`] - eager and lazy view construction over whole documents
//! - [`seq`] - lazy sequence concatenation across documents
//! - [`reader`] - the corpus reader facade and file-id resolution
//! - [`error`] - error types shared by all of the above
//! - [`testing`] - corpus fixtures shared by unit and integration tests

pub mod elements;
pub mod error;
pub mod item;
pub mod reader;
pub mod seq;
pub mod stream;
pub mod testing;
pub mod tree;
pub mod view;

/// Element tag marking a word-form leaf.
pub const WORD_TAG: &str = "wf";
/// Element tag marking a punctuation leaf.
pub const PUNC_TAG: &str = "punc";
/// Element tag marking a sentence.
pub const SENT_TAG: &str = "s";
/// Sentence identifier attribute. Preserved verbatim; not necessarily a
/// contiguous integer.
pub const SENT_NUM_ATTR: &str = "snum";
