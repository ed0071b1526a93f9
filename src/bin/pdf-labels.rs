use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pdf_labels::labels::{create_labels_pdf, LabelConfig};
use pdf_labels::pagesize::Paper;
use pdf_labels::wall::{create_wall_pdf, format_measurement};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pdf-labels", version, about)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out product labels from a CSV, TSV or spreadsheet file.
    Labels(LabelArgs),
    /// Draw a picture frame wall plan from JSON.
    Wall(WallArgs),
}

#[derive(Parser, Debug)]
struct LabelArgs {
    /// Input table (.csv, .txt, .tsv, .xlsx, .xls or .ods).
    input: PathBuf,

    /// Output PDF path. Defaults to the input path with a .pdf extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with label settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TrueType font for label text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// TrueType font for bracketed text, e.g. a Tamil translation.
    #[arg(long)]
    script_font: Option<PathBuf>,

    /// Starting font size in points.
    #[arg(long)]
    font_size: Option<f32>,

    /// Paper size: A3, A4, A5, Letter or Legal.
    #[arg(long)]
    page_size: Option<Paper>,

    /// Lay pages out in landscape.
    #[arg(long)]
    landscape: bool,
}

#[derive(Parser, Debug)]
struct WallArgs {
    /// Wall plan JSON.
    plan: PathBuf,

    /// Output PDF path. Defaults to the plan path with a .pdf extension.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("pdf_labels={level}"))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.cmd {
        Command::Labels(args) => cmd_labels(args),
        Command::Wall(args) => cmd_wall(args),
    }
}

fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| input.with_extension("pdf"))
}

fn load_config(args: &LabelArgs) -> anyhow::Result<LabelConfig> {
    let mut config = match &args.config {
        Some(path) => LabelConfig::from_json_file(path)
            .with_context(|| format!("read config '{}'", path.display()))?,
        None => LabelConfig::default(),
    };

    if let Some(font) = &args.font {
        config.font = Some(font.clone());
    }
    if let Some(font) = &args.script_font {
        config.script_font = Some(font.clone());
    }
    if let Some(size) = args.font_size {
        config.font_size = size;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if args.landscape {
        config.landscape = true;
    }
    Ok(config)
}

fn cmd_labels(args: LabelArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let output = output_path(&args.input, args.output.clone());
    info!("creating labels from {}", args.input.display());

    let report = create_labels_pdf(&args.input, &output, &config)
        .with_context(|| format!("create labels from '{}'", args.input.display()))?;

    println!(
        "wrote {} label(s) on {} page(s) to {}",
        report.labels,
        report.pages,
        report.output.display()
    );
    if !report.warnings.is_empty() {
        println!("{} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}

fn cmd_wall(args: WallArgs) -> anyhow::Result<()> {
    let output = output_path(&args.plan, args.output);
    let report = create_wall_pdf(&args.plan, &output)
        .with_context(|| format!("draw wall plan '{}'", args.plan.display()))?;

    println!(
        "wrote {} frame(s) to {}",
        report.frames,
        report.output.display()
    );
    for m in &report.measurements {
        println!(
            "  {:<16} top {:>10}  bottom {:>10}",
            m.id,
            format_measurement(m.from_top, None),
            format_measurement(m.from_bottom, None)
        );
    }
    if !report.warnings.is_empty() {
        println!("{} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
