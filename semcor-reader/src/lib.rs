//! # semcor-reader
//!
//! A reader for SemCor-style annotated corpora.
//!
//! SemCor documents are XML markup trees: a root element contains sentence
//! elements (`s`), whose word-form (`wf`) and punctuation (`punc`) leaves are
//! annotated with part-of-speech, WordNet lemma, sense number, and
//! out-of-vocabulary named-entity information. Multi-word chunks keep their
//! surface words joined by underscores (`New_York`).
//!
//! The reader exposes a corpus at four granularities — raw tokens, words,
//! multi-word chunks, and bracketed sentences — optionally overlaid with POS
//! and/or semantic tags. Every view is available under two execution
//! strategies: eager (the whole document tree is parsed up front) and lazy
//! (subtrees are streamed out of the file one pull at a time). The two
//! strategies are behaviorally indistinguishable to callers.
//!
//! The main entry point is [`semcor::reader::SemcorReader`]:
//!
//! ```rust
//! use semcor_reader::semcor::reader::SemcorReader;
//!
//! let reader = SemcorReader::open("corpus/brown1")?;
//! for word in reader.words(None, true)?.iter() {
//!     println!("{}", word?);
//! }
//! # Ok::<(), semcor_reader::semcor::error::CorpusError>(())
//! ```

pub mod semcor;

pub use semcor::error::CorpusError;
pub use semcor::item::{Item, TagMode, Unit};
pub use semcor::reader::{Mode, SemcorReader};
pub use semcor::tree::Tree;
pub use semcor::view::{ItemView, Sentence, SentenceView};
