use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use quote_items::batch;
use quote_items::fields::detect_fields;
use quote_items::ingest::{self, load_record};
use quote_items::model::Item;
use quote_items::parse_document;
use quote_items::quotation::build_quotation;
use quote_items::settings::Settings;

#[derive(Parser)]
#[command(name = "quote_items", about = "Parse quotation text into hierarchical line items")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one extraction record (.json) or plain-text file
    Parse {
        path: PathBuf,
        /// Print an indented outline instead of JSON
        #[arg(long)]
        tree: bool,
    },
    /// Show header fields detected in a document
    Fields { path: PathBuf },
    /// Build the normalized quotation for a document
    Quotation { path: PathBuf },
    /// Parse every *_extracted.json record in a directory
    Batch {
        /// Directory of extraction records (default: QUOTE_INPUT_DIR or settings)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory for parsed output (default: QUOTE_OUTPUT_DIR or settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Max records to parse (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { path, tree } => {
            let record = load_record(&path)?;
            let parsed = parse_document(&record.filename, &record.extracted_text);
            if tree {
                println!("Filename: {}", parsed.filename);
                println!("Item Count: {}", parsed.item_count);
                println!("Hierarchy Depth: {}", parsed.hierarchy_depth);
                println!("Location Grouping: {}", parsed.has_location_grouping);
                let patterns: Vec<_> = parsed.pricing_patterns.iter().map(|f| f.as_str()).collect();
                println!("Pricing Patterns: {}", patterns.join(", "));
                println!("{}", "=".repeat(80));
                for item in &parsed.items {
                    print_item(item, 0);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            }
            Ok(())
        }
        Commands::Fields { path } => {
            let record = load_record(&path)?;
            let fields = detect_fields(&record.extracted_text);
            println!("{}", serde_json::to_string_pretty(&fields)?);
            Ok(())
        }
        Commands::Quotation { path } => {
            let record = load_record(&path)?;
            let parsed = parse_document(&record.filename, &record.extracted_text);
            let quotation = build_quotation(&record, &parsed);
            println!("{}", serde_json::to_string_pretty(&quotation)?);
            Ok(())
        }
        Commands::Batch { input, output, limit } => {
            let settings = Settings::load()?;
            let input = input.unwrap_or(settings.input_dir);
            let output = output.unwrap_or(settings.output_dir);

            let mut paths = ingest::discover(&input)
                .with_context(|| format!("listing records in {}", input.display()))?;
            if let Some(n) = limit {
                paths.truncate(n);
            }
            if paths.is_empty() {
                println!("No *_extracted.json records in {}.", input.display());
                return Ok(());
            }

            println!("Parsing {} records...", paths.len());
            let summary = batch::run_batch(&paths, &output, settings.chunk_size)?;
            println!(
                "Done: {} parsed ({} ok, {} errors, {} pages). Output in {}",
                summary.total,
                summary.ok,
                summary.errors,
                summary.pages,
                output.display()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn print_item(item: &Item, indent: usize) {
    let prefix = "  ".repeat(indent);
    let description: String = item.description.chars().take(60).collect();
    println!("{}[{}] Level {}: {}", prefix, item.label, item.depth, description);

    if let Some(primary) = item.pricing.as_ref().and_then(|p| p.primary.as_ref()) {
        if let Some(format) = primary.format {
            let detail = match (primary.unit_price, primary.amount) {
                (Some(unit), _) => format!(
                    " (₱{}/unit = ₱{})",
                    unit,
                    primary.total.map(|t| t.to_string()).unwrap_or_else(|| "?".into())
                ),
                (None, Some(amount)) => format!(" (₱{})", amount),
                (None, None) => String::new(),
            };
            println!("{}  → Pricing: {}{}", prefix, format.as_str(), detail);
        }
    }

    for child in &item.children {
        print_item(child, indent + 1);
    }
}
