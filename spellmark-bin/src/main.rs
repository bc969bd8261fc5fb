use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use gumdrop::Options;
use serde::{Deserialize, Serialize};

use spellmark::archive::{self, DictionaryMetadata};
use spellmark::config::SpellCheckConfig;
use spellmark::mode::{
    flagged_spans, highlight, DocumentMode, FlaggedWord, MarkdownMode, Mode, ModeRegistry,
    PlainMode, SpellOverlay, Style, StyledSpan,
};
use spellmark::paths;
use spellmark::session::{HostModes, SegmentKind, SpellCheckSession};
use spellmark::speller::{DictionaryLoader, DictionaryLookup, LoadStatus};
use spellmark::tokenizer::Tokenize;

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_flagged(&mut self, source: &str, flagged: &[FlaggedWord]);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_flagged(&mut self, source: &str, flagged: &[FlaggedWord]) {
        for word in flagged {
            println!("{}:{}:{}\t{}", source, word.line + 1, word.start + 1, word.word);
        }
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct CorrectionResult {
    word: String,
    is_correct: bool,
}

#[derive(Serialize)]
struct FlaggedResult {
    source: String,
    words: Vec<FlaggedWord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonWriter {
    results: Vec<CorrectionResult>,
    flagged: Vec<FlaggedResult>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter {
            results: vec![],
            flagged: vec![],
        }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(CorrectionResult {
            word: word.to_owned(),
            is_correct,
        });
    }

    fn write_flagged(&mut self, source: &str, flagged: &[FlaggedWord]) {
        self.flagged.push(FlaggedResult {
            source: source.to_owned(),
            words: flagged.to_vec(),
        });
    }

    fn finish(&mut self) {
        match serde_json::to_string_pretty(self) {
            Ok(v) => println!("{}", v),
            Err(e) => log::error!("Failed to serialize results: {}", e),
        }
    }
}

fn writer(use_json: bool) -> Box<dyn OutputWriter> {
    if use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "check whether words are spelled correctly")]
    Check(CheckArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),

    #[options(help = "highlight a file with the spell-check overlay")]
    Highlight(HighlightArgs),

    #[options(help = "spell-check the cells of a Jupyter notebook")]
    Notebook(NotebookArgs),

    #[options(help = "print information about the dictionary in use")]
    Info(InfoArgs),
}

/// Options shared by every command that loads a dictionary.
#[derive(Debug, Default)]
struct DictionaryArgs {
    config: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    language: Option<String>,
    words: Option<PathBuf>,
}

macro_rules! dictionary_args {
    ($args:expr) => {
        DictionaryArgs {
            config: $args.config.clone(),
            dictionary: $args.dictionary.clone(),
            language: $args.language.clone(),
            words: $args.words.clone(),
        }
    };
}

#[derive(Debug, Options)]
struct CheckArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "dictionary directory, .zip or .oxt bundle")]
    dictionary: Option<PathBuf>,

    #[options(help = "language code, e.g. en_US")]
    language: Option<String>,

    #[options(help = "supplemental JSON word list")]
    words: Option<PathBuf>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct HighlightArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(
        short = "m",
        help = "base mode: text/plain, markdown or heading (default: from extension)"
    )]
    mode: Option<String>,

    #[options(no_short, help = "print every styled span instead of flagged words")]
    spans: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, required, help = "file to be highlighted")]
    input: PathBuf,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "dictionary directory, .zip or .oxt bundle")]
    dictionary: Option<PathBuf>,

    #[options(help = "language code, e.g. en_US")]
    language: Option<String>,

    #[options(help = "supplemental JSON word list")]
    words: Option<PathBuf>,
}

#[derive(Debug, Options)]
struct NotebookArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, required, help = "notebook (.ipynb) to be checked")]
    input: PathBuf,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "dictionary directory, .zip or .oxt bundle")]
    dictionary: Option<PathBuf>,

    #[options(help = "language code, e.g. en_US")]
    language: Option<String>,

    #[options(help = "supplemental JSON word list")]
    words: Option<PathBuf>,
}

#[derive(Debug, Options)]
struct InfoArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "dictionary directory, .zip or .oxt bundle")]
    dictionary: Option<PathBuf>,

    #[options(help = "language code, e.g. en_US")]
    language: Option<String>,

    #[options(help = "supplemental JSON word list")]
    words: Option<PathBuf>,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

impl DictionaryArgs {
    fn config(&self) -> anyhow::Result<SpellCheckConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                SpellCheckConfig::from_path(path)
                    .with_context(|| format!("loading {}", path.display()))?
                    .relative_to(base)
            }
            None => SpellCheckConfig::default(),
        };

        if let Some(language) = &self.language {
            config.language = language.as_str().into();
        }
        if let Some(dictionary) = &self.dictionary {
            config.dictionary_path = dictionary.clone();
        }
        if let Some(words) = &self.words {
            config.words_path = Some(words.clone());
        }

        if !config.dictionary_path.exists() {
            if let Some((path, language)) = find_installed(&config.language) {
                log::info!("Using installed dictionary at {}", path.display());
                config.dictionary_path = path;
                config.language = language.into();
            }
        }

        if let Some(words) = &config.words_path {
            if self.words.is_none() && !words.exists() {
                log::debug!("No word list at {}", words.display());
                config.words_path = None;
            }
        }

        Ok(config)
    }
}

/// A system dictionary for `language`, with the file stem actually found.
fn find_installed(language: &str) -> Option<(PathBuf, String)> {
    let tag = paths::parse_language(language)?;
    let path = paths::find_dictionary_path(&tag)?;

    let full = paths::hunspell_code(&tag);
    let code = if path.join(format!("{full}.aff")).exists() {
        full
    } else {
        tag.primary_language().to_string()
    };
    Some((path, code))
}

fn load(config: &SpellCheckConfig) -> Arc<DictionaryLookup> {
    let lookup = DictionaryLookup::new();
    DictionaryLoader::from_config(config).load(&lookup);

    if let Some(reason) = lookup.speller_failure() {
        eprintln!("Warning: {}; every word will be flagged", reason);
    }
    lookup
}

fn overlay(config: &SpellCheckConfig, lookup: Arc<DictionaryLookup>) -> SpellOverlay {
    SpellOverlay::new(lookup).with_style(Style::new(config.flag_style.clone()))
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let config = dictionary_args!(args).config()?;
    let lookup = load(&config);
    let mut writer = writer(args.use_json);

    let words = if args.inputs.is_empty() {
        read_stdin()?
            .trim()
            .split('\n')
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect()
    } else {
        args.inputs
    };

    for word in words {
        let is_correct = lookup.is_correct(&word);
        writer.write_correction(&word, is_correct);
    }

    writer.finish();
    Ok(())
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs: String = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    if args.is_words_only {
        for (index, token) in inputs.words() {
            println!("{:>4}: \"{}\"", index, token);
        }
    } else {
        for run in inputs.word_runs() {
            println!(
                "{:>4}: \"{}\"{}",
                run.index,
                run.text,
                if run.is_word { "" } else { "\t(boundary)" }
            );
        }
    }

    Ok(())
}

fn base_mode(name: Option<&str>, input: &Path) -> anyhow::Result<Arc<dyn Mode>> {
    let name = match name {
        Some(v) => v,
        None => match input.extension().and_then(|x| x.to_str()) {
            Some("md") | Some("markdown") => MarkdownMode::NAME,
            _ => PlainMode::NAME,
        },
    };

    let registry = ModeRegistry::with_builtin();
    registry
        .get(&name.into())
        .ok_or_else(|| anyhow::anyhow!("Unknown mode '{}'", name))
}

#[derive(Serialize)]
struct SpanOutput<'a> {
    #[serde(flatten)]
    span: &'a StyledSpan,
    text: &'a str,
}

fn print_spans(text: &str, spans: &[StyledSpan], use_json: bool) -> anyhow::Result<()> {
    let lines = text.lines().collect::<Vec<_>>();
    let output = spans
        .iter()
        .map(|span| SpanOutput {
            span,
            text: span.text(lines[span.line]),
        })
        .collect::<Vec<_>>();

    if use_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for item in output {
            println!(
                "{:>4}:{:<4} {:<24} \"{}\"",
                item.span.line + 1,
                item.span.start,
                item.span.style.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                item.text
            );
        }
    }
    Ok(())
}

fn highlight_file(args: HighlightArgs) -> anyhow::Result<()> {
    let config = dictionary_args!(args).config()?;
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let base = base_mode(args.mode.as_deref(), &args.input)?;
    let overlay = overlay(&config, load(&config));
    let style = overlay.style().clone();
    let mode = DocumentMode::new(base, Arc::new(overlay), true);
    let spans = highlight(&mode, &text);

    if args.spans {
        return print_spans(&text, &spans, args.use_json);
    }

    let flagged = flagged_spans(&style, &text, &spans);

    let mut writer = writer(args.use_json);
    writer.write_flagged(&args.input.to_string_lossy(), &flagged);
    writer.finish();
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl CellSource {
    fn into_string(self) -> String {
        match self {
            CellSource::Text(v) => v,
            CellSource::Lines(v) => v.concat(),
        }
    }
}

#[derive(Deserialize)]
struct Cell {
    cell_type: String,
    source: CellSource,
}

#[derive(Deserialize)]
struct Notebook {
    cells: Vec<Cell>,
}

fn notebook(args: NotebookArgs) -> anyhow::Result<()> {
    let config = dictionary_args!(args).config()?;
    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let notebook: Notebook = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let mut session = SpellCheckSession::from_config(
        ModeRegistry::with_builtin(),
        load(&config),
        HostModes::default(),
        &config,
    );

    let mut segments = notebook
        .cells
        .into_iter()
        .map(|cell| {
            let kind = match cell.cell_type.as_str() {
                "markdown" => SegmentKind::Markdown,
                "heading" => SegmentKind::Heading,
                "code" => SegmentKind::Code,
                _ => SegmentKind::Raw,
            };
            session.new_segment(kind, cell.source.into_string())
        })
        .collect::<Vec<_>>();

    if !session.is_on() {
        session.toggle(&mut segments);
    }

    let mut writer = writer(args.use_json);
    for (n, segment) in segments.iter().enumerate() {
        let flagged = session.flagged_words(segment);
        if !flagged.is_empty() {
            writer.write_flagged(&format!("cell {}", n + 1), &flagged);
        }
    }
    writer.finish();
    Ok(())
}

#[derive(Serialize)]
struct Info {
    language: String,
    dictionary_path: PathBuf,
    words_path: Option<PathBuf>,
    metadata: Option<DictionaryMetadata>,
    dictionary: String,
    words: String,
}

fn status_text(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::NotLoaded => "not loaded",
        LoadStatus::Loaded => "loaded",
        LoadStatus::Failed => "failed",
    }
}

fn info(args: InfoArgs) -> anyhow::Result<()> {
    let config = dictionary_args!(args).config()?;
    let metadata = archive::open(&config.dictionary_path, &config.language)
        .ok()
        .and_then(|a| a.metadata().cloned());
    let lookup = load(&config);
    let (dictionary, words) = lookup.status();

    let info = Info {
        language: config.language.to_string(),
        dictionary_path: config.dictionary_path.clone(),
        words_path: config.words_path.clone(),
        metadata,
        dictionary: status_text(dictionary).to_string(),
        words: status_text(words).to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Check(args)) => check(args),
        Some(Command::Tokenize(args)) => tokenize(args),
        Some(Command::Highlight(args)) => highlight_file(args),
        Some(Command::Notebook(args)) => notebook(args),
        Some(Command::Info(args)) => info(args),
    }
}
