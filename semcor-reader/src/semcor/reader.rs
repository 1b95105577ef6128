//! Corpus reader facade and file-id resolution
//!
//! [`SemcorReader`] binds a corpus root directory to the view machinery.
//! On open it discovers the corpus file ids (relative paths of `*.xml`
//! files under the root, sorted); each public operation then resolves a
//! file-id selector to absolute paths and builds a view over them.
//!
//! Every operation is available under both execution strategies. The
//! default is lazy; [`SemcorReader::with_mode`] switches to eager, which
//! materializes the whole view at the call and fails up front on any
//! parse error.
//!
//! # Example
//!
//! ```rust
//! use semcor_reader::semcor::reader::SemcorReader;
//! use semcor_reader::semcor::item::TagMode;
//!
//! let reader = SemcorReader::open("corpus/brown1")?;
//!
//! // Flat word sequence over the whole corpus
//! for word in reader.words(None, true)?.iter() {
//!     println!("{}", word?);
//! }
//!
//! // Tagged chunks of one file
//! let view = reader.tagged_chunks(Some(&["br-a01.xml"]), TagMode::Both, true)?;
//! for chunk in view.iter() {
//!     println!("{}", chunk?);
//! }
//! # Ok::<(), semcor_reader::semcor::error::CorpusError>(())
//! ```

use crate::semcor::error::CorpusError;
use crate::semcor::item::{TagMode, Unit, ViewParams};
use crate::semcor::view::{
    materialize_items, materialize_sentences, ItemView, SentenceView,
};
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Execution strategy of a reader's views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Parse whole documents up front and hold the materialized view in
    /// memory. Fails at view construction on any error.
    Eager,
    /// Stream subtrees out of each file as the view is pulled. Holds only
    /// the parse cursor; errors surface during iteration.
    #[default]
    Lazy,
}

/// Reader over one corpus root directory.
pub struct SemcorReader {
    root: PathBuf,
    fileids: Vec<String>,
    mode: Mode,
}

impl SemcorReader {
    /// Open a corpus rooted at `root`, discovering its `*.xml` file ids.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CorpusError> {
        let root = root.into();
        let mut fileids = Vec::new();
        for entry in WalkBuilder::new(&root).standard_filters(false).build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(&root) {
                fileids.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        fileids.sort();
        Ok(SemcorReader {
            root,
            fileids,
            mode: Mode::default(),
        })
    }

    /// Switch the execution strategy for subsequently built views.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// The discovered corpus file ids, sorted.
    pub fn fileids(&self) -> &[String] {
        &self.fileids
    }

    /// Resolve a file-id selector to absolute paths, in selector order
    /// (or discovery order when no selector is given).
    fn abspaths(&self, fileids: Option<&[&str]>) -> Result<Vec<PathBuf>, CorpusError> {
        match fileids {
            None => Ok(self.fileids.iter().map(|id| self.root.join(id)).collect()),
            Some(ids) => ids
                .iter()
                .map(|id| {
                    if self.fileids.iter().any(|known| known == id) {
                        Ok(self.root.join(id))
                    } else {
                        Err(CorpusError::UnknownFileId(id.to_string()))
                    }
                })
                .collect(),
        }
    }

    fn item_view(
        &self,
        fileids: Option<&[&str]>,
        params: ViewParams,
    ) -> Result<ItemView, CorpusError> {
        let paths = self.abspaths(fileids)?;
        match self.mode {
            Mode::Eager => Ok(ItemView::eager(materialize_items(&paths, &params)?)),
            Mode::Lazy => Ok(ItemView::lazy(paths, params)),
        }
    }

    fn sentence_view(
        &self,
        fileids: Option<&[&str]>,
        params: ViewParams,
    ) -> Result<SentenceView, CorpusError> {
        let paths = self.abspaths(fileids)?;
        match self.mode {
            Mode::Eager => Ok(SentenceView::eager(materialize_sentences(&paths, &params)?)),
            Mode::Lazy => Ok(SentenceView::lazy(paths, params)),
        }
    }

    fn params(unit: Unit, bracket_sent: bool, tag: Option<TagMode>, strip_space: bool) -> ViewParams {
        ViewParams {
            unit,
            bracket_sent,
            pos_tag: tag.is_some_and(TagMode::includes_pos),
            sem_tag: tag.is_some_and(TagMode::includes_sem),
            strip_space,
        }
    }

    /// The given file(s) as a flat sequence of raw tokens: each leaf's
    /// surface text as written, multi-word chunks left joined.
    pub fn tokens(
        &self,
        fileids: Option<&[&str]>,
        strip_space: bool,
    ) -> Result<ItemView, CorpusError> {
        self.item_view(fileids, Self::params(Unit::Token, false, None, strip_space))
    }

    /// The given file(s) as a flat sequence of words and punctuation
    /// symbols; multi-word chunks are split into their sub-words.
    pub fn words(
        &self,
        fileids: Option<&[&str]>,
        strip_space: bool,
    ) -> Result<ItemView, CorpusError> {
        self.item_view(fileids, Self::params(Unit::Word, false, None, strip_space))
    }

    /// The given file(s) as a flat sequence of tagged tokens carrying the
    /// requested tag layers.
    pub fn tagged_words(
        &self,
        fileids: Option<&[&str]>,
        tag: TagMode,
        strip_space: bool,
    ) -> Result<ItemView, CorpusError> {
        self.item_view(
            fileids,
            Self::params(Unit::Token, false, Some(tag), strip_space),
        )
    }

    /// The given file(s) as a flat sequence of chunks, each a list of the
    /// words that form one unit.
    pub fn chunks(
        &self,
        fileids: Option<&[&str]>,
        strip_space: bool,
    ) -> Result<ItemView, CorpusError> {
        self.item_view(fileids, Self::params(Unit::Chunk, false, None, strip_space))
    }

    /// The given file(s) as a flat sequence of tagged chunks in tree form.
    pub fn tagged_chunks(
        &self,
        fileids: Option<&[&str]>,
        tag: TagMode,
        strip_space: bool,
    ) -> Result<ItemView, CorpusError> {
        self.item_view(
            fileids,
            Self::params(Unit::Chunk, false, Some(tag), strip_space),
        )
    }

    /// The given file(s) as sentences, each a list of word strings.
    pub fn sents(
        &self,
        fileids: Option<&[&str]>,
        strip_space: bool,
    ) -> Result<SentenceView, CorpusError> {
        self.sentence_view(fileids, Self::params(Unit::Word, true, None, strip_space))
    }

    /// The given file(s) as sentences, each a list of chunks.
    pub fn chunk_sents(
        &self,
        fileids: Option<&[&str]>,
        strip_space: bool,
    ) -> Result<SentenceView, CorpusError> {
        self.sentence_view(fileids, Self::params(Unit::Chunk, true, None, strip_space))
    }

    /// The given file(s) as sentences, each a list of tagged chunks.
    pub fn tagged_sents(
        &self,
        fileids: Option<&[&str]>,
        tag: TagMode,
        strip_space: bool,
    ) -> Result<SentenceView, CorpusError> {
        self.sentence_view(
            fileids,
            Self::params(Unit::Chunk, true, Some(tag), strip_space),
        )
    }
}
