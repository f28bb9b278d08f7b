//! CLI for bibfmt - Format BibTeX and stored entries as citations.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bibfmt::{
    filter_entries, format_bibliography_with, load_entries, merge_selection, parse_entries,
    render_html_code, render_html_document, style_names, BibliographyEntry, CitationStyle,
    EntryStore, FormatOptions, JsonFileStore, SourceFormat, StoreError,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Format bibliography entries as MLA, APA, Chicago, Harvard or Vancouver citations
#[derive(Parser)]
#[command(name = "bibfmt")]
#[command(version)]
#[command(after_help = "\
Examples:
  bibfmt format refs.bib --style APA
  bibfmt format refs.bib --style Vancouver --html -o refs.html
  cat refs.bib | bibfmt format - --style Chicago
  bibfmt store add refs.bib
  bibfmt format --from-store --query learning --style Harvard
  bibfmt styles")]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Entry store file
    #[arg(
        long,
        global = true,
        env = "BIBFMT_STORE",
        default_value = "bibfmt-store.json"
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format entries from files or the store
    #[command(after_help = "\
Examples:
  bibfmt format refs.bib --style MLA
  bibfmt format refs.bib more.json --style APA --html
  bibfmt format refs.bib --style Harvard --escape-fields --missing n.d.

Input files may be BibTeX (.bib), a JSON array, or JSONL.")]
    Format {
        /// Input files (use '-' for stdin)
        #[arg(required_unless_present = "from_store")]
        inputs: Vec<PathBuf>,

        /// Format the entries held in the store instead of input files
        #[arg(long, conflicts_with = "inputs")]
        from_store: bool,

        /// Citation style (see 'styles' command); unknown names fall back to MLA
        #[arg(short, long, default_value = "MLA")]
        style: String,

        /// Fail on an unknown style instead of falling back to MLA
        #[arg(long)]
        strict_style: bool,

        /// Only format entries whose title, author or year match
        #[arg(short, long)]
        query: Option<String>,

        /// Emit the HTML code block instead of one citation per line
        #[arg(long)]
        html: bool,

        /// HTML-escape field values
        #[arg(long)]
        escape_fields: bool,

        /// Text to print for absent fields
        #[arg(long, conflicts_with = "compat")]
        missing: Option<String>,

        /// Reproduce the original output, including 'undefined' for absent fields
        #[arg(long)]
        compat: bool,

        /// Output file (default: stdout); a .html file gets a full page
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage stored entries
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// List available citation styles
    Styles,
}

#[derive(Subcommand)]
enum StoreAction {
    /// Parse files and add their entries to the store
    Add {
        /// Input files (use '-' for stdin)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// List stored entries
    List {
        /// Only list entries whose title, author or year match
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Remove stored entries by id
    Remove {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// AppError: semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10: input file not found / unreadable / invalid
    InputFile(String),
    /// Exit 11: unknown citation style
    Style(String),
    /// Exit 12: entry store unreadable / unwritable
    Store(String),
    /// Exit 15: cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::Style(_) => 11,
            AppError::Store(_) => 12,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: inputs must be BibTeX, a JSON array of entries, or JSONL (one entry per line)",
                    msg
                )
            }
            AppError::Style(msg) => {
                let names = style_names().join(", ");
                write!(f, "{}\n  available styles: {}", msg, names)
            }
            AppError::Store(msg) => {
                write!(
                    f,
                    "{}\n  hint: pass --store or set BIBFMT_STORE to a writable JSON file",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

fn store_error(store: &Path, e: StoreError) -> AppError {
    AppError::Store(format!("'{}': {}", store.display(), e))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Format {
            inputs,
            from_store,
            style,
            strict_style,
            query,
            html,
            escape_fields,
            missing,
            compat,
            output,
        } => {
            let style = resolve_style(&style, strict_style)?;
            let mut options = if compat {
                FormatOptions::compat()
            } else {
                FormatOptions::default()
            };
            options.escape_fields = escape_fields;
            if let Some(missing) = missing {
                options.missing_field_placeholder = missing;
            }

            let entries = if from_store {
                open_store(&cli.store)?
                    .list()
                    .map_err(|e| store_error(&cli.store, e))?
            } else {
                read_inputs(&inputs)?
            };

            format_command(
                &entries,
                style,
                &options,
                query.as_deref(),
                html,
                output.as_deref(),
            )?;
        }
        Commands::Store { action } => store_command(&cli.store, action)?,
        Commands::Styles => styles_command(),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Format entries and write the citations.
fn format_command(
    entries: &[BibliographyEntry],
    style: CitationStyle,
    options: &FormatOptions,
    query: Option<&str>,
    html: bool,
    output: Option<&Path>,
) -> Result<(), AppError> {
    // 1. Narrow to the selection, keeping input order
    let selected: Vec<BibliographyEntry> = match query {
        Some(q) => filter_entries(entries, q).into_iter().cloned().collect(),
        None => entries.to_vec(),
    };

    // 2. Format
    let citations = format_bibliography_with(&selected, style, options);

    // 3. Write to file or stdout
    match output {
        Some(path) => {
            let content = if is_html_path(path) {
                render_html_document(&citations, style)
            } else {
                render_text(&citations, html)
            };
            fs::write(path, content)
                .map_err(|e| AppError::OutputFile(format!("'{}': {}", path.display(), e)))?;
            tracing::info!(
                citations = citations.len(),
                path = %path.display(),
                "wrote citations"
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{}", render_text(&citations, html))
                .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
        }
    }

    Ok(())
}

fn render_text(citations: &[String], html: bool) -> String {
    let mut text = if html {
        render_html_code(citations)
    } else {
        citations.join("\n")
    };
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

/// Add, list or remove stored entries.
fn store_command(store_path: &Path, action: StoreAction) -> Result<(), AppError> {
    let mut store = open_store(store_path)?;

    match action {
        StoreAction::Add { inputs } => {
            let entries = read_inputs(&inputs)?;
            let ids = store
                .add(entries)
                .map_err(|e| store_error(store_path, e))?;
            for id in &ids {
                println!("{}", id);
            }
            tracing::info!(added = ids.len(), store = %store.path().display(), "stored entries");
        }
        StoreAction::List { query } => {
            let entries = store.list().map_err(|e| store_error(store_path, e))?;
            for entry in filter_entries(&entries, query.as_deref().unwrap_or("")) {
                println!("{}", list_line(entry));
            }
        }
        StoreAction::Remove { ids } => {
            let removed = store.remove(&ids).map_err(|e| store_error(store_path, e))?;
            if removed < ids.len() {
                tracing::warn!(requested = ids.len(), removed, "some ids were not in the store");
            }
            println!("removed {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
        }
    }

    Ok(())
}

fn list_line(entry: &BibliographyEntry) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        entry.id.as_deref().unwrap_or("-"),
        entry.entry_type.tag().unwrap_or("-"),
        entry.year.as_deref().unwrap_or("-"),
        entry.author.as_deref().unwrap_or("-"),
        entry.title.as_deref().unwrap_or("-"),
    )
}

/// List available citation styles.
fn styles_command() {
    for name in style_names() {
        println!("{}", name);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Style names typed on the command line ignore case; unknown ones give MLA
/// unless `strict` is set.
fn resolve_style(name: &str, strict: bool) -> Result<CitationStyle, AppError> {
    match CitationStyle::from_name_ignore_case(name) {
        Ok(style) => Ok(style),
        Err(e) if strict => Err(AppError::Style(e.to_string())),
        Err(e) => {
            tracing::warn!("{}, falling back to MLA", e);
            Ok(CitationStyle::Mla)
        }
    }
}

fn open_store(path: &Path) -> Result<JsonFileStore, AppError> {
    JsonFileStore::open(path).map_err(|e| store_error(path, e))
}

/// Read every input (support '-' for stdin), merging entries with the same id.
fn read_inputs(inputs: &[PathBuf]) -> Result<Vec<BibliographyEntry>, AppError> {
    let mut entries = Vec::new();

    for input in inputs {
        let loaded = if input == Path::new("-") {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
            parse_entries(&buf, SourceFormat::Detect)
                .map_err(|e| AppError::InputFile(format!("stdin: {}", e)))?
        } else {
            load_entries(input)
                .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?
        };
        entries = merge_selection(entries, loaded);
    }

    Ok(entries)
}
