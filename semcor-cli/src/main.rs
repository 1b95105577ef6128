//! Command-line interface for semcor
//! This binary dumps corpus views as text or JSON for inspection and piping.
//!
//! Usage:
//!   semcor `<root>` --view `<view>` [--fileids `<ids>`] [--tag `<tag>`]   - Print a view of the corpus
//!   semcor `<root>` --list-fileids                                       - List the corpus file ids

use clap::{Arg, ArgAction, Command};
use semcor_reader::{Mode, SemcorReader, TagMode};

fn main() {
    let matches = Command::new("semcor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting semantically annotated corpora")
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .help("Path to the corpus root directory")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("view")
                .long("view")
                .short('v')
                .help("View to print: tokens, words, tagged-words, chunks, tagged-chunks, sents, chunk-sents, tagged-sents")
                .required_unless_present("list-fileids"),
        )
        .arg(
            Arg::new("fileids")
                .long("fileids")
                .help("Comma-separated file ids to read (default: whole corpus)"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .short('t')
                .help("Tag layers for tagged views: pos, sem, or both")
                .default_value("both"),
        )
        .arg(
            Arg::new("keep-space")
                .long("keep-space")
                .help("Keep surrounding whitespace in token text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("eager")
                .long("eager")
                .help("Parse whole files up front instead of streaming")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text or json")
                .default_value("text"),
        )
        .arg(
            Arg::new("list-fileids")
                .long("list-fileids")
                .help("List the discovered corpus file ids")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let root = matches
        .get_one::<String>("root")
        .expect("root is a required argument");
    let reader = SemcorReader::open(root).unwrap_or_else(|e| {
        eprintln!("Error opening corpus: {}", e);
        std::process::exit(1);
    });

    if matches.get_flag("list-fileids") {
        for fileid in reader.fileids() {
            println!("{}", fileid);
        }
        return;
    }

    let reader = if matches.get_flag("eager") {
        reader.with_mode(Mode::Eager)
    } else {
        reader
    };

    let view = matches
        .get_one::<String>("view")
        .expect("view is required unless listing file ids");
    let fileids: Option<Vec<&str>> = matches
        .get_one::<String>("fileids")
        .map(|s| s.split(',').collect());
    let tag = parse_tag(matches.get_one::<String>("tag").unwrap());
    let strip_space = !matches.get_flag("keep-space");
    let format = matches.get_one::<String>("format").unwrap();

    handle_view_command(&reader, view, fileids.as_deref(), tag, strip_space, format);
}

fn parse_tag(tag: &str) -> TagMode {
    match tag {
        "pos" => TagMode::Pos,
        "sem" => TagMode::Sem,
        "both" => TagMode::Both,
        other => {
            eprintln!("Unknown tag layer '{}'", other);
            eprintln!("Available tag layers: pos, sem, both");
            std::process::exit(1);
        }
    }
}

/// Resolve the view name, iterate it, and print each entry in the chosen
/// format. Unbracketed views print one item per line; bracketed views one
/// sentence per line.
fn handle_view_command(
    reader: &SemcorReader,
    view: &str,
    fileids: Option<&[&str]>,
    tag: TagMode,
    strip_space: bool,
    format: &str,
) {
    match view {
        "tokens" => print_items(reader.tokens(fileids, strip_space), format),
        "words" => print_items(reader.words(fileids, strip_space), format),
        "tagged-words" => print_items(reader.tagged_words(fileids, tag, strip_space), format),
        "chunks" => print_items(reader.chunks(fileids, strip_space), format),
        "tagged-chunks" => print_items(reader.tagged_chunks(fileids, tag, strip_space), format),
        "sents" => print_sentences(reader.sents(fileids, strip_space), format),
        "chunk-sents" => print_sentences(reader.chunk_sents(fileids, strip_space), format),
        "tagged-sents" => print_sentences(reader.tagged_sents(fileids, tag, strip_space), format),
        other => {
            eprintln!("Unknown view '{}'", other);
            eprintln!(
                "Available views: tokens, words, tagged-words, chunks, tagged-chunks, \
                 sents, chunk-sents, tagged-sents"
            );
            std::process::exit(1);
        }
    }
}

fn print_items(
    view: Result<semcor_reader::ItemView, semcor_reader::CorpusError>,
    format: &str,
) {
    let view = view.unwrap_or_else(|e| {
        eprintln!("Error building view: {}", e);
        std::process::exit(1);
    });
    for item in view.iter() {
        let item = item.unwrap_or_else(|e| {
            eprintln!("Error reading corpus: {}", e);
            std::process::exit(1);
        });
        print_entry(&item, format);
    }
}

fn print_sentences(
    view: Result<semcor_reader::SentenceView, semcor_reader::CorpusError>,
    format: &str,
) {
    let view = view.unwrap_or_else(|e| {
        eprintln!("Error building view: {}", e);
        std::process::exit(1);
    });
    for sentence in view.iter() {
        let sentence = sentence.unwrap_or_else(|e| {
            eprintln!("Error reading corpus: {}", e);
            std::process::exit(1);
        });
        print_entry(&sentence, format);
    }
}

fn print_entry<T: std::fmt::Display + serde::Serialize>(entry: &T, format: &str) {
    match format {
        "text" => println!("{}", entry),
        "json" => {
            let line = serde_json::to_string(entry).unwrap_or_else(|e| {
                eprintln!("Error formatting output: {}", e);
                std::process::exit(1);
            });
            println!("{}", line);
        }
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: text, json");
            std::process::exit(1);
        }
    }
}
