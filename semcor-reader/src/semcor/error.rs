//! Error types for corpus reading

use std::fmt;

/// Errors that can occur while reading a corpus.
///
/// Parse failures from the XML layer are propagated unmodified; the reader
/// adds no retry logic. In lazy mode an error surfaces at the pull that hits
/// it, and items yielded before the error remain valid. In eager mode the
/// whole result is discarded on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CorpusError {
    /// IO error when reading a corpus file or walking the corpus root
    Io(String),
    /// Malformed XML in a corpus file
    Xml(String),
    /// A non-leaf element appeared where only `wf`/`punc` leaves are legal
    UnexpectedElement { tag: String },
    /// A required attribute is missing (e.g. a sentence without `snum`)
    MissingAttr { tag: String, attr: &'static str },
    /// A requested file id is not part of the corpus
    UnknownFileId(String),
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io(msg) => write!(f, "IO error: {}", msg),
            CorpusError::Xml(msg) => write!(f, "XML error: {}", msg),
            CorpusError::UnexpectedElement { tag } => {
                write!(f, "Unexpected element <{}> where a leaf was expected", tag)
            }
            CorpusError::MissingAttr { tag, attr } => {
                write!(f, "Element <{}> is missing the '{}' attribute", tag, attr)
            }
            CorpusError::UnknownFileId(id) => {
                write!(f, "Unknown corpus file id: {}", id)
            }
        }
    }
}

impl std::error::Error for CorpusError {}

impl From<std::io::Error> for CorpusError {
    fn from(err: std::io::Error) -> Self {
        CorpusError::Io(err.to_string())
    }
}

impl From<quick_xml::Error> for CorpusError {
    fn from(err: quick_xml::Error) -> Self {
        CorpusError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for CorpusError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        CorpusError::Xml(err.to_string())
    }
}

impl From<ignore::Error> for CorpusError {
    fn from(err: ignore::Error) -> Self {
        CorpusError::Io(err.to_string())
    }
}
