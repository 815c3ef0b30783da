//! docpager CLI - document pagination tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docpager::layout::markers::count_markers;
use docpager::layout::{stage_title, MAX_STAGES};
use docpager::{
    layout_document, load_file, BudgetTable, DocumentContent, DocumentKind, JsonFormat,
    LayoutOptions, PageRole, PageSelection, PaginatedDocument, RenderOptions, Stage, StageView,
};

#[derive(Parser)]
#[command(name = "docpager")]
#[command(version)]
#[command(about = "Paginate official documents into print-accurate pages", long_about = None)]
struct Cli {
    /// Budget table JSON (defaults apply to missing kinds)
    #[arg(long, global = true, value_name = "FILE", env = "DOCPAGER_BUDGETS")]
    budgets: Option<PathBuf>,

    /// Do not print page numbers
    #[arg(long, global = true)]
    hide_page_numbers: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate document content and write the pages as JSON
    Paginate {
        /// Input content JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        stage: StageArgs,
    },

    /// Preview the pages as plain text
    Preview {
        /// Input content JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Frame width in characters
        #[arg(long, default_value = "72")]
        width: usize,

        /// Print pagination statistics after the pages
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        stage: StageArgs,
    },

    /// Show a page summary
    Info {
        /// Input content JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        stage: StageArgs,
    },

    /// Print the effective budget table
    Budgets {
        /// Only this document kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Paginate many content files into a directory
    Batch {
        /// Input content JSON files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

#[derive(clap::Args)]
struct StageArgs {
    /// Dossier stage being edited (0-6)
    #[arg(long, value_name = "INDEX")]
    stage: Option<usize>,

    /// Live content of the edited stage, as Stage JSON
    #[arg(long, value_name = "FILE", requires = "stage")]
    live: Option<PathBuf>,
}

impl StageArgs {
    fn view(&self) -> Result<StageView, Box<dyn std::error::Error>> {
        let Some(index) = self.stage else {
            return Ok(StageView::none());
        };
        match &self.live {
            Some(path) => {
                let stage: Stage = serde_json::from_str(&fs::read_to_string(path)?)?;
                Ok(StageView::live(index, stage))
            }
            None => Ok(StageView::active(index)),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Generic letter
    Letter,
    /// Purchase request
    PurchaseRequest,
    /// Per-diem request
    PerDiem,
    /// Multi-stage dossier
    Dossier,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Letter => DocumentKind::Letter,
            KindArg::PurchaseRequest => DocumentKind::PurchaseRequest,
            KindArg::PerDiem => DocumentKind::PerDiem,
            KindArg::Dossier => DocumentKind::Dossier,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = layout_options(&cli).and_then(|options| match &cli.command {
        Commands::Paginate {
            input,
            output,
            compact,
            stage,
        } => cmd_paginate(input, output.as_deref(), *compact, options, stage),
        Commands::Preview {
            input,
            output,
            pages,
            width,
            stats,
            stage,
        } => cmd_preview(
            input,
            output.as_deref(),
            pages.as_deref(),
            *width,
            *stats,
            options,
            stage,
        ),
        Commands::Info { input, stage } => cmd_info(input, options, stage),
        Commands::Budgets { kind } => cmd_budgets(&options.budgets, *kind),
        Commands::Batch {
            inputs,
            output,
            compact,
        } => cmd_batch(inputs, output.as_deref(), *compact, &options),
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn layout_options(cli: &Cli) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
    let budgets = match &cli.budgets {
        Some(path) => {
            log::debug!("loading budgets from {}", path.display());
            BudgetTable::load(path)?
        }
        None => BudgetTable::default(),
    };
    Ok(LayoutOptions::new()
        .with_budgets(budgets)
        .with_hidden_page_numbers(cli.hide_page_numbers))
}

fn paginate_input(
    input: &Path,
    options: LayoutOptions,
    stage: &StageArgs,
) -> Result<(DocumentContent, PaginatedDocument), Box<dyn std::error::Error>> {
    let content = load_file(input)?;
    let options = options.with_stage_view(stage.view()?);
    let doc = layout_document(&content, &options)?;

    if doc.stats.has_degraded_output() {
        eprintln!(
            "{}: {} hard cuts, {} overflows; some pages may not print as laid out",
            "Warning".yellow().bold(),
            doc.stats.hard_cuts,
            doc.stats.overflows
        );
    }
    Ok((content, doc))
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_paginate(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: LayoutOptions,
    stage: &StageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, doc) = paginate_input(input, options, stage)?;
    let json = docpager::render::to_json(&doc, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_preview(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    width: usize,
    stats: bool,
    options: LayoutOptions,
    stage: &StageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let (content, doc) = paginate_input(input, options, stage)?;
    let render_options = RenderOptions::new()
        .with_pages(page_selection)
        .with_frame_width(width)
        .with_stats(stats);
    let text = docpager::render::to_text(&doc, &content, &render_options)?;
    write_output(output, &text)
}

fn cmd_info(
    input: &Path,
    options: LayoutOptions,
    stage: &StageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (content, doc) = paginate_input(input, options, stage)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Kind".bold(), content.kind.label());
    if let Some(ref title) = content.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref protocol) = content.protocol {
        println!("{}: {}", "Protocol".bold(), protocol);
    }
    println!("{}: {}", "Pages".bold(), doc.page_count());

    println!();
    println!("{}", "Pagination Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Blocks placed".bold(), doc.stats.blocks_placed);
    println!("{}: {}", "Splits".bold(), doc.stats.splits);
    println!("{}: {}", "Hard cuts".bold(), doc.stats.hard_cuts);
    println!("{}: {}", "Overflows".bold(), doc.stats.overflows);

    if content.kind == DocumentKind::Dossier && !content.stages.is_empty() {
        println!();
        println!("{}", "Stages".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (index, stage) in content.stages.iter().take(MAX_STAGES).enumerate() {
            let state = if stage.is_blank() { "empty" } else { "filled" };
            println!(
                "  {:<10} {:<7} {} signature markers",
                stage_title(index),
                state,
                count_markers(&stage.body)
            );
        }
    }

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for page in &doc.pages {
        let mut flags = Vec::new();
        if page.carries_signature {
            flags.push("signature");
        }
        if page.is_active_view {
            flags.push("active");
        }
        if page.role == PageRole::Stage && page.is_first_page_of_stage {
            flags.push("stage start");
        }
        println!(
            "  {:>3}  {:<14} group {}  {}/{}  {:>3} blocks  {:>5.1} lines  {}",
            page.number + 1,
            format!("{:?}", page.role),
            page.group,
            page.page_index + 1,
            page.total_pages,
            page.block_count(),
            page.lines_used,
            flags.join(", ").dimmed()
        );
    }

    Ok(())
}

fn cmd_budgets(budgets: &BudgetTable, kind: Option<KindArg>) -> Result<(), Box<dyn std::error::Error>> {
    let json = match kind {
        Some(kind) => serde_json::to_string_pretty(budgets.for_kind(kind.into()))?,
        None => serde_json::to_string_pretty(budgets)?,
    };
    println!("{}", json);
    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    options: &LayoutOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("pages"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failures = Vec::new();
    let mut total_pages = 0;
    for input in inputs {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy().to_string();
        pb.set_message(stem.clone());

        let result = load_file(input)
            .and_then(|content| layout_document(&content, options))
            .and_then(|doc| {
                total_pages += doc.page_count();
                docpager::render::to_json(&doc, json_format(compact))
            });
        match result {
            Ok(json) => fs::write(output_dir.join(format!("{}.pages.json", stem)), json)?,
            Err(e) => {
                log::warn!("{}: {}", input.display(), e);
                failures.push((input.clone(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} documents, {} pages -> {}",
        "Paginated".green().bold(),
        inputs.len() - failures.len(),
        total_pages,
        output_dir.display()
    );
    for (input, e) in &failures {
        println!("  {} {}: {}", "✗".red(), input.display(), e);
    }
    if !failures.is_empty() {
        return Err(format!("{} of {} documents failed", failures.len(), inputs.len()).into());
    }
    Ok(())
}
