//! unnotion CLI - Notion workspace export tool

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unnotion::{
    discover_page_tree, export_unit, CollectionState, ContentSource, ExportConfig, MarkdownWriter,
    NotionClient, OutputUnitPolicy,
};

#[derive(Parser)]
#[command(name = "unnotion")]
#[command(version)]
#[command(about = "Export a Notion database to Markdown files", long_about = None)]
struct Cli {
    /// API token used to authenticate against the Notion API
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    token: String,

    /// Identifier of the database whose pages are exported
    #[arg(long, env = "NOTION_DATABASE_ID")]
    database: String,

    /// Output directory for the generated Markdown files
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = unnotion::config::DEFAULT_OUTPUT_DIR
    )]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> unnotion::Result<()> {
    let config = ExportConfig::new(cli.token, cli.database).with_output_dir(cli.output);
    config.validate()?;

    let client = NotionClient::new(&config.auth_token)?;
    let writer = MarkdownWriter::new(&config.output_dir);
    let policy = OutputUnitPolicy::new();

    println!("{}", "Querying collection...".cyan());
    let roots = client.all_collection_pages(&config.collection_id)?;
    println!("{} {} root pages", "Found".green(), roots.len());

    // Build the page hierarchy and classify output units.
    let pb = progress_bar(roots.len() as u64, "Analyzing structure");
    let mut state = CollectionState::new();
    for root in &roots {
        if let Err(e) = discover_page_tree(&client, &policy, &mut state, &root.id) {
            log::warn!("failed to resolve root page {}: {e}", root.id);
        }
        if let Some(node) = state.root_pages.get(&root.id) {
            pb.set_message(node.title.clone());
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("{} pages visited", state.total_page_count));

    if state.output_units.is_empty() {
        println!("{}", "No pages selected for export".yellow());
        return Ok(());
    }

    // Assemble and write one file per output unit.
    let pb = progress_bar(state.output_units.len() as u64, "Generating files");
    let mut written = 0u32;
    let mut failed = 0u32;
    for unit in &state.output_units {
        pb.set_message(unit.title.clone());
        match export_unit(&client, &writer, unit) {
            Ok(()) => written += 1,
            Err(e) => {
                log::warn!("failed to write document '{}': {e}", unit.title);
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    println!(
        "\n{} {} documents written to {}",
        "Done!".green().bold(),
        written,
        config.output_dir.display()
    );
    if failed > 0 {
        println!("{} {} documents lost to write failures", "Warning:".yellow(), failed);
    }

    Ok(())
}

fn progress_bar(len: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb
}
