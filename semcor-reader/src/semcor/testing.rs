//! Corpus fixtures shared by unit and integration tests
//!
//! The documents mirror the Brown-concordance shape of SemCor: a
//! `contextfile` root, one `context` per source file, paragraphs, numbered
//! sentences, and `wf`/`punc` leaves. [`FLAT_DOC`] is the canonical
//! flat-sentence fixture used for eager/lazy equivalence; [`NESTED_DOC`]
//! puts a leaf inside a nested chunk element to exercise the structural
//! paths that differ between the two strategies.

/// Two flat sentences with a multi-word OOV entity, a sense-tagged verb,
/// and punctuation.
pub const FLAT_DOC: &str = r#"<contextfile concordance="brown1">
<context filename="br-a01" paras="yes">
<p pnum="1">
<s snum="1">
<wf cmd="ignore" pos="DT">The</wf>
<wf cmd="done" rdf="group" pos="NN" lemma="group" wnsn="1" pn="group">Fulton_County_Grand_Jury</wf>
<wf cmd="done" pos="VB" lemma="say" wnsn="1">said</wf>
<punc>.</punc>
</s>
<s snum="2">
<wf cmd="done" pos="NN" lemma="investigation" wnsn="1">investigation</wf>
<punc>.</punc>
</s>
</p>
</context>
</contextfile>
"#;

/// One sentence whose first leaf sits inside a nested `ne` chunk element.
/// The eager walk descends into it; the lazy bracketed path treats the
/// non-leaf child as a structural error.
pub const NESTED_DOC: &str = r#"<contextfile concordance="brown1">
<context filename="br-a02" paras="yes">
<p pnum="1">
<s snum="1">
<ne><wf cmd="done" rdf="location" pos="NNP" lemma="location" pn="location">New_York</wf></ne>
<wf cmd="done" pos="VB" lemma="be" wnsn="1">is</wf>
<punc>.</punc>
</s>
</p>
</context>
</contextfile>
"#;

/// A second flat document, for multi-file ordering tests.
pub const SECOND_DOC: &str = r#"<contextfile concordance="brown1">
<context filename="br-a03" paras="yes">
<p pnum="1">
<s snum="7">
<wf cmd="done" pos="NN" lemma="dog" wnsn="7">dog</wf>
<wf cmd="done" pos="VB" lemma="run" wnsn="2;1">ran</wf>
<punc>.</punc>
</s>
</p>
</context>
</contextfile>
"#;

/// Degenerate leaves: empty text, whitespace padding, and a sentence
/// identifier that is not a contiguous integer.
pub const EDGE_DOC: &str = r#"<contextfile concordance="brown1">
<context filename="br-a04" paras="yes">
<p pnum="1">
<s snum="2;p">
<wf pos="NN"></wf>
<wf pos="NN"> padded </wf>
<punc>.</punc>
</s>
</p>
</context>
</contextfile>
"#;
