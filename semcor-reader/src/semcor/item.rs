//! Per-leaf item construction
//!
//! This module is the decision table of the reader: [`build_item`] maps one
//! annotated leaf element plus the view parameters to exactly one output
//! [`Item`]. Both the eager materializer and the lazy streaming view go
//! through this single function, so their outputs cannot drift apart.
//!
//! Leaf annotations (all optional except the surface text):
//!
//! - `lemma` - WordNet lemma, or the named-entity class; defaults to the
//!   surface text
//! - `wnsn` - WordNet sense number; numeric, or a compound string such as
//!   `"2;1"`
//! - `rdf` - presence marks a named entity without a WordNet entry
//! - `pos` - part of speech for the whole chunk; absent on punctuation

use crate::semcor::elements::Element;
use crate::semcor::tree::{Tree, TreeChild};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output granularity of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// One item per leaf, surface text as written (multi-word chunks stay
    /// joined by underscores).
    Token,
    /// One item per surface word; multi-word chunks are split apart.
    Word,
    /// One item per chunk, as a sub-word list or a tagged tree.
    Chunk,
}

/// Which tag layers a tagged view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagMode {
    /// Part-of-speech tags only.
    Pos,
    /// Semantic tags only (lemma, sense, named-entity status).
    Sem,
    /// Both layers.
    Both,
}

impl TagMode {
    pub(crate) fn includes_pos(self) -> bool {
        !matches!(self, TagMode::Sem)
    }

    pub(crate) fn includes_sem(self) -> bool {
        !matches!(self, TagMode::Pos)
    }
}

/// Parameters of one view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewParams {
    pub unit: Unit,
    pub bracket_sent: bool,
    pub pos_tag: bool,
    pub sem_tag: bool,
    pub strip_space: bool,
}

/// Semantic tag fields of a tagged token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemTag {
    /// Lemma, or named-entity class; falls back to the surface text.
    pub lemma: String,
    /// WordNet sense number as written in the corpus.
    pub sense: Option<String>,
    /// True for a named entity without a WordNet entry.
    pub is_oov_entity: bool,
}

/// A token with its requested tag layers.
///
/// `pos` is populated only when the view requested POS tags, and is still
/// `None` for punctuation (which carries no POS). `sem` is populated only
/// when the view requested semantic tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub pos: Option<String>,
    pub sem: Option<SemTag>,
}

/// One output item of a view: the closed union of the four legal shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// Plain surface string (untagged token-level output, and the spliced
    /// words of word-level output).
    Token(String),
    /// Token-level output with tag layers.
    Tagged(TaggedToken),
    /// Bare sub-word list (word/chunk-level output without tags).
    Words(Vec<String>),
    /// Labeled tree (chunk-level output with tags).
    Tree(Tree),
}

impl Item {
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Item::Token(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_words(&self) -> Option<&[String]> {
        match self {
            Item::Words(ws) => Some(ws),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Item::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tagged(&self) -> Option<&TaggedToken> {
        match self {
            Item::Tagged(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Token(s) => write!(f, "{}", s),
            Item::Tagged(t) => {
                write!(f, "{}", t.text)?;
                if let Some(pos) = &t.pos {
                    write!(f, "/{}", pos)?;
                }
                if let Some(sem) = &t.sem {
                    write!(f, " [lemma={}", sem.lemma)?;
                    if let Some(sense) = &sem.sense {
                        write!(f, " wnsn={}", sense)?;
                    }
                    if sem.is_oov_entity {
                        write!(f, " NE")?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }
            Item::Words(ws) => write!(f, "[{}]", ws.join(" ")),
            Item::Tree(t) => write!(f, "{}", t),
        }
    }
}

/// Collect the leaf elements under `element` in document order.
///
/// Leaves (`wf`/`punc`) are appended directly; any other child is descended
/// into transparently, at arbitrary nesting depth. Uses an explicit stack so
/// adversarially deep documents cannot overflow the call stack. A flat
/// sentence comes back as its direct children, unchanged and in order.
pub fn collect_leaves(element: &Element) -> Vec<&Element> {
    let mut leaves = Vec::new();
    let mut stack: Vec<&Element> = element.children().iter().rev().collect();
    while let Some(child) = stack.pop() {
        if child.is_leaf() {
            leaves.push(child);
        } else {
            stack.extend(child.children().iter().rev());
        }
    }
    leaves
}

/// Split a chunk's surface text into sub-words on the underscore join
/// marker.
///
/// Known limitation: punctuation embedded inside a multi-word expression
/// is not special-cased, so the split is purely lexical.
pub fn split_subwords(text: &str) -> Vec<String> {
    text.split('_').map(str::to_string).collect()
}

/// Synthesize the sense-key label for a tagged chunk.
///
/// A numeric sense number formats as a zero-padded two-digit suffix
/// (`dog` + `7` -> `dog.07`); a non-numeric sense string is concatenated
/// verbatim (`run` + `"2;1"` -> `run.2;1`). With no sense string at all
/// (possible on the named-entity path) the key degrades to the bare lemma.
pub fn sense_key(lemma: &str, sense: Option<&str>) -> String {
    match sense {
        Some(s) => match s.parse::<u32>() {
            Ok(n) => format!("{}.{:02}", lemma, n),
            Err(_) => format!("{}.{}", lemma, s),
        },
        None => lemma.to_string(),
    }
}

/// The chunk-level payload before sense/entity wrapping: either a
/// POS-labeled tree over the sub-words, or the bare sub-words.
enum Bottom {
    Tree(Tree),
    Words(Vec<String>),
}

impl Bottom {
    fn into_children(self) -> Vec<TreeChild> {
        match self {
            Bottom::Tree(tree) => vec![TreeChild::Subtree(tree)],
            Bottom::Words(words) => words.into_iter().map(TreeChild::Word).collect(),
        }
    }
}

/// Build exactly one [`Item`] from one leaf element.
///
/// The decision table, in order:
///
/// 1. `Unit::Token`, no tags: the plain surface text.
/// 2. `Unit::Token`, tags: a [`TaggedToken`] with only the requested
///    layers populated.
/// 3. `Unit::Word`: the bare sub-word list (callers splice it).
/// 4. `Unit::Chunk`: sub-words, wrapped in a POS tree when POS is
///    requested, then in a sense-key tree (and an `NE` tree for
///    out-of-vocabulary entities) when semantic tags are requested. A
///    chunk with neither layer applicable yields the bare sub-word list,
///    never a tree.
pub fn build_item(leaf: &Element, params: &ViewParams) -> Item {
    let text = if params.strip_space {
        leaf.text().trim().to_string()
    } else {
        leaf.text().to_string()
    };

    let lemma = leaf.attr("lemma").unwrap_or(&text).to_string();
    let sense = leaf.attr("wnsn").map(str::to_string);
    let is_oov_entity = leaf.attr("rdf").is_some();
    let pos = leaf.attr("pos").map(str::to_string);

    match params.unit {
        Unit::Token => {
            if !params.pos_tag && !params.sem_tag {
                return Item::Token(text);
            }
            Item::Tagged(TaggedToken {
                text,
                pos: if params.pos_tag { pos } else { None },
                sem: if params.sem_tag {
                    Some(SemTag {
                        lemma,
                        sense,
                        is_oov_entity,
                    })
                } else {
                    None
                },
            })
        }
        Unit::Word => Item::Words(split_subwords(&text)),
        Unit::Chunk => {
            let subwords = split_subwords(&text);
            let bottom = if params.pos_tag {
                Bottom::Tree(Tree::new(
                    pos,
                    subwords.into_iter().map(TreeChild::Word).collect(),
                ))
            } else {
                Bottom::Words(subwords)
            };

            if params.sem_tag && is_oov_entity {
                let key = sense_key(&lemma, sense.as_deref());
                let ne = Tree::labeled("NE", bottom.into_children());
                Item::Tree(Tree::labeled(key, vec![TreeChild::Subtree(ne)]))
            } else if params.sem_tag && sense.is_some() {
                let key = sense_key(&lemma, sense.as_deref());
                Item::Tree(Tree::labeled(key, bottom.into_children()))
            } else {
                match bottom {
                    Bottom::Tree(tree) => Item::Tree(tree),
                    Bottom::Words(words) => Item::Words(words),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(unit: Unit, pos_tag: bool, sem_tag: bool) -> ViewParams {
        ViewParams {
            unit,
            bracket_sent: false,
            pos_tag,
            sem_tag,
            strip_space: true,
        }
    }

    fn leaf(text: &str) -> Element {
        Element::new("wf").with_text(text)
    }

    #[test]
    fn test_sense_key_numeric_is_zero_padded() {
        assert_eq!(sense_key("dog", Some("7")), "dog.07");
        assert_eq!(sense_key("dog", Some("12")), "dog.12");
    }

    #[test]
    fn test_sense_key_compound_is_verbatim() {
        assert_eq!(sense_key("run", Some("2;1")), "run.2;1");
    }

    #[test]
    fn test_sense_key_absent_degrades_to_lemma() {
        assert_eq!(sense_key("location", None), "location");
    }

    #[test]
    fn test_plain_token_is_surface_text() {
        let item = build_item(
            &leaf(" dog ").with_attr("pos", "NN"),
            &params(Unit::Token, false, false),
        );
        assert_eq!(item, Item::Token("dog".to_string()));
    }

    #[test]
    fn test_unstripped_token_keeps_whitespace() {
        let mut p = params(Unit::Token, false, false);
        p.strip_space = false;
        let item = build_item(&leaf(" dog "), &p);
        assert_eq!(item, Item::Token(" dog ".to_string()));
    }

    #[test]
    fn test_empty_text_yields_empty_token() {
        let item = build_item(&leaf(""), &params(Unit::Token, false, false));
        assert_eq!(item, Item::Token(String::new()));
    }

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    #[case(true, true)]
    fn test_tagged_token_layers_follow_flags(#[case] pos_tag: bool, #[case] sem_tag: bool) {
        let element = leaf("dog")
            .with_attr("pos", "NN")
            .with_attr("lemma", "dog")
            .with_attr("wnsn", "1");
        let item = build_item(&element, &params(Unit::Token, pos_tag, sem_tag));
        let tagged = item.as_tagged().expect("token with tags");
        assert_eq!(tagged.text, "dog");
        assert_eq!(tagged.pos.is_some(), pos_tag);
        assert_eq!(tagged.sem.is_some(), sem_tag);
        if let Some(sem) = &tagged.sem {
            assert_eq!(sem.lemma, "dog");
            assert_eq!(sem.sense.as_deref(), Some("1"));
            assert!(!sem.is_oov_entity);
        }
    }

    #[test]
    fn test_tagged_token_lemma_defaults_to_text() {
        let item = build_item(&leaf("dogs"), &params(Unit::Token, false, true));
        let sem = item.as_tagged().unwrap().sem.as_ref().unwrap();
        assert_eq!(sem.lemma, "dogs");
        assert_eq!(sem.sense, None);
    }

    #[test]
    fn test_word_unit_splits_on_underscore() {
        let item = build_item(&leaf("New_York"), &params(Unit::Word, false, false));
        assert_eq!(
            item,
            Item::Words(vec!["New".to_string(), "York".to_string()])
        );
    }

    #[test]
    fn test_word_unit_single_word_is_singleton_list() {
        let item = build_item(&leaf("dog"), &params(Unit::Word, false, false));
        assert_eq!(item, Item::Words(vec!["dog".to_string()]));
    }

    #[test]
    fn test_untagged_chunk_is_bare_list_never_a_tree() {
        let element = leaf("New_York")
            .with_attr("pos", "NNP")
            .with_attr("lemma", "location")
            .with_attr("rdf", "location");
        // Neither layer requested: annotations are ignored entirely.
        let item = build_item(&element, &params(Unit::Chunk, false, false));
        assert_eq!(
            item,
            Item::Words(vec!["New".to_string(), "York".to_string()])
        );
    }

    #[test]
    fn test_pos_chunk_is_pos_labeled_tree() {
        let element = leaf("New_York").with_attr("pos", "NNP");
        let item = build_item(&element, &params(Unit::Chunk, true, false));
        let tree = item.as_tree().expect("POS tree");
        assert_eq!(tree.label(), Some("NNP"));
        assert_eq!(tree.leaf_words(), vec!["New", "York"]);
    }

    #[test]
    fn test_pos_chunk_on_punctuation_has_no_label() {
        let element = Element::new("punc").with_text(".");
        let item = build_item(&element, &params(Unit::Chunk, true, false));
        let tree = item.as_tree().expect("POS tree");
        assert_eq!(tree.label(), None);
        assert_eq!(tree.leaf_words(), vec!["."]);
    }

    #[test]
    fn test_sem_chunk_wraps_in_sense_key_tree() {
        let element = leaf("dog")
            .with_attr("pos", "NN")
            .with_attr("lemma", "dog")
            .with_attr("wnsn", "7");
        let item = build_item(&element, &params(Unit::Chunk, false, true));
        let tree = item.as_tree().expect("sense tree");
        assert_eq!(tree.label(), Some("dog.07"));
        // POS not requested: bare words directly under the sense key.
        assert_eq!(tree.to_string(), "(dog.07 dog)");
    }

    #[test]
    fn test_both_tags_nest_pos_inside_sense_key() {
        let element = leaf("dog")
            .with_attr("pos", "NN")
            .with_attr("lemma", "dog")
            .with_attr("wnsn", "7");
        let item = build_item(&element, &params(Unit::Chunk, true, true));
        assert_eq!(item.as_tree().unwrap().to_string(), "(dog.07 (NN dog))");
    }

    #[test]
    fn test_oov_entity_wraps_ne_inside_sense_key() {
        let element = leaf("New_York")
            .with_attr("pos", "NNP")
            .with_attr("lemma", "New_York")
            .with_attr("rdf", "location");
        let item = build_item(&element, &params(Unit::Chunk, true, true));
        let tree = item.as_tree().expect("entity tree");
        // No sense number: the key is the bare lemma.
        assert_eq!(tree.to_string(), "(New_York (NE (NNP New York)))");
    }

    #[test]
    fn test_oov_entity_with_compound_sense_gets_verbatim_key() {
        let element = leaf("New_York")
            .with_attr("lemma", "location")
            .with_attr("wnsn", "2;1")
            .with_attr("rdf", "location");
        let item = build_item(&element, &params(Unit::Chunk, false, true));
        let tree = item.as_tree().unwrap();
        assert_eq!(tree.label(), Some("location.2;1"));
        assert_eq!(tree.to_string(), "(location.2;1 (NE New York))");
    }

    #[test]
    fn test_sem_chunk_without_sense_or_entity_is_bare_list() {
        let element = leaf("the").with_attr("pos", "DT");
        let item = build_item(&element, &params(Unit::Chunk, false, true));
        assert_eq!(item, Item::Words(vec!["the".to_string()]));
    }

    #[test]
    fn test_collect_leaves_flat_sentence_is_identity() {
        let sent = Element::new("s")
            .with_child(leaf("The"))
            .with_child(leaf("dog"))
            .with_child(Element::new("punc").with_text("."));
        let leaves = collect_leaves(&sent);
        let texts: Vec<&str> = leaves.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["The", "dog", "."]);
    }

    #[test]
    fn test_collect_leaves_descends_nested_chunks() {
        let nested = Element::new("ne").with_child(
            Element::new("chunk").with_child(leaf("New_York")),
        );
        let sent = Element::new("s")
            .with_child(leaf("in"))
            .with_child(nested)
            .with_child(Element::new("punc").with_text("."));
        let texts: Vec<&str> = collect_leaves(&sent).iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["in", "New_York", "."]);
    }

    #[test]
    fn test_collect_leaves_empty_element() {
        assert!(collect_leaves(&Element::new("s")).is_empty());
    }

    #[test]
    fn test_collect_leaves_deep_nesting_does_not_recurse() {
        let mut element = leaf("deep");
        for _ in 0..10_000 {
            element = Element::new("chunk").with_child(element);
        }
        let sent = Element::new("s").with_child(element);
        let leaves = collect_leaves(&sent);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].text(), "deep");
    }
}
