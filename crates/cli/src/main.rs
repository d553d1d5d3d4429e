use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use modal_field_mapper::{
    all_cached_mappings, cache_field_mappings, resolve, Element, FieldScanner, MapperConfig, Node,
    ScanTree, Selector,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

mod manifest;

use manifest::Manifest;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    print_stdout(&text)
}

#[derive(Parser)]
#[command(name = "modal-mapper")]
#[command(about = "Discover the input fields of editing panels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a markup file and print its field mappings
    Scan(ScanArgs),

    /// Print the elements a selector resolves to
    Resolve(ResolveArgs),

    /// Scan every activity listed in a manifest and print the whole cache
    Batch(BatchArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Well-formed markup file
    file: PathBuf,

    /// Only scan the first element matching this selector
    #[arg(long)]
    within: Option<String>,

    /// Mapper config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ResolveArgs {
    /// Well-formed markup file
    file: PathBuf,

    /// Selector in one of the generated forms
    selector: String,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// TOML manifest with an [activities] table
    manifest: PathBuf,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct ElementSummary {
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    text: String,
}

impl ElementSummary {
    fn of(node: &dyn Node) -> Self {
        Self {
            tag: node.tag().to_string(),
            id: node.attribute("id").map(ToString::to_string),
            name: node.attribute("name").map(ToString::to_string),
            text: node.text_content().split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Resolve(args) => run_resolve(args),
        Commands::Batch(args) => run_batch(args),
    }
}

fn load_markup(path: &Path) -> Result<Element> {
    Element::from_path(path).with_context(|| format!("Cannot load markup {}", path.display()))
}

fn load_scanner(config: Option<&Path>) -> Result<FieldScanner> {
    let config = match config {
        Some(path) => MapperConfig::from_path(path)
            .with_context(|| format!("Cannot load config {}", path.display()))?,
        None => MapperConfig::default(),
    };
    Ok(FieldScanner::new(config)?)
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let document = load_markup(&args.file)?;
    let scanner = load_scanner(args.config.as_deref())?;

    let fields = match &args.within {
        Some(text) => {
            let selector = Selector::parse(text)?;
            let tree = ScanTree::build(&document);
            // the document root may itself be the panel
            let panel = Some(tree.root())
                .filter(|root| selector.matches(&tree, *root))
                .or_else(|| selector.select_all(&tree).first().copied())
                .with_context(|| format!("No element matches `{text}`"))?;
            scanner.scan_with_label_scope(tree.node(panel), &document)
        }
        None => scanner.scan(&document),
    };

    log::info!("{}: {} fields", args.file.display(), fields.len());
    print_json(&fields, args.pretty)
}

fn run_resolve(args: ResolveArgs) -> Result<()> {
    let document = load_markup(&args.file)?;
    let matches: Vec<ElementSummary> = resolve(&document, &args.selector)?
        .into_iter()
        .map(ElementSummary::of)
        .collect();

    if matches.is_empty() {
        log::warn!("`{}` matched nothing in {}", args.selector, args.file.display());
    }
    print_json(&matches, args.pretty)
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let scanner = load_scanner(manifest.config.as_deref())?;

    for (activity_type, path) in &manifest.activities {
        let document = load_markup(path)?;
        let fields = scanner.scan(&document);
        log::info!("{activity_type}: {} fields from {}", fields.len(), path.display());
        cache_field_mappings(activity_type.clone(), fields);
    }

    let snapshot: BTreeMap<_, _> = all_cached_mappings().into_iter().collect();
    print_json(&snapshot, args.pretty)
}
