use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use spendscope_core::{
    AggregatedView, CategoryChart, CategorySelection, export, month_view,
};
use spendscope_ingest::{discover_statements, load_batch};

mod config;

#[derive(Parser, Debug)]
#[command(name = "spendscope", version, about = "Personal spending dashboard pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every statement in a directory and print spending summaries
    Report {
        /// Directory of statement CSV exports
        #[arg(long)]
        dir: PathBuf,

        /// Source registry TOML (defaults to the built-in sources)
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Write the aggregated view to this file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Print the chart data the dashboard renders for one month
    Month {
        /// Month label, e.g. "July"
        month: String,

        /// Single category (default: all categories)
        #[arg(long)]
        category: Option<String>,

        /// Directory of statement CSV exports
        #[arg(long)]
        dir: PathBuf,

        /// Source registry TOML (defaults to the built-in sources)
        #[arg(long)]
        sources: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report {
            dir,
            sources,
            export,
            format,
        } => report(&dir, sources.as_deref(), export.as_deref(), format),
        Command::Month {
            month,
            category,
            dir,
            sources,
        } => month_report(&dir, sources.as_deref(), &month, category),
    }
}

fn build_view(dir: &Path, sources: Option<&Path>) -> Result<AggregatedView> {
    let registry = config::load_registry(sources)?;
    let paths =
        discover_statements(dir).with_context(|| format!("scanning {}", dir.display()))?;
    let batch = load_batch(&paths, &registry);
    if batch.is_empty() {
        warn!(dir = %dir.display(), "no statements loaded");
    }
    Ok(AggregatedView::build(batch.statements))
}

fn report(
    dir: &Path,
    sources: Option<&Path>,
    export_path: Option<&Path>,
    format: ExportFormat,
) -> Result<()> {
    let view = build_view(dir, sources)?;

    if view.is_empty() {
        println!("No spending data.");
    } else {
        println!(
            "{} transactions, ${:.2} total spend",
            view.entries.len(),
            view.total_spend()
        );

        println!("\nBy category:");
        for (category, total) in &view.category_totals {
            println!("  {category:<24} ${total:>10.2}");
        }

        println!("\nBy month:");
        for month in view.months() {
            println!("  {month:<24} ${:>10.2}", view.month_totals[&month]);
        }
    }

    if let Some(path) = export_path {
        let file =
            File::create(path).with_context(|| format!("create {}", path.display()))?;
        match format {
            ExportFormat::Csv => export::write_csv(&view, file)
                .with_context(|| format!("write {}", path.display()))?,
            ExportFormat::Json => export::write_json(&view, file)
                .with_context(|| format!("write {}", path.display()))?,
        }
        println!("\nWrote {}", path.display());
    }

    Ok(())
}

fn month_report(
    dir: &Path,
    sources: Option<&Path>,
    month: &str,
    category: Option<String>,
) -> Result<()> {
    let view = build_view(dir, sources)?;
    let selection = match category {
        Some(c) => CategorySelection::One(c),
        None => CategorySelection::All,
    };
    let charts = month_view(&view, month, &selection);

    println!("Cumulative spend for {}:", charts.month);
    if charts.cumulative.is_empty() {
        println!("  (no data)");
    }
    for point in &charts.cumulative {
        println!("  {}  ${:>10.2}", point.date, point.value);
    }

    match &charts.category {
        CategoryChart::Breakdown(totals) => {
            println!("\nBy category:");
            for (category, total) in totals {
                println!("  {category:<24} ${total:>10.2}");
            }
        }
        CategoryChart::Cumulative(points) => {
            println!("\nSelected category, cumulative:");
            for point in points {
                println!("  {}  ${:>10.2}", point.date, point.value);
            }
        }
    }

    Ok(())
}
