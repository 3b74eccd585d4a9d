use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use bestsellers_scrapping::config::{load_config, AppConfig, DEFAULT_SETTINGS_FILE};
use bestsellers_scrapping::crawl::{collect_listing_references, fetch_product_records};
use bestsellers_scrapping::export::compare::{
    diff_tables, difference_rows, read_csv_table, write_differences,
};
use bestsellers_scrapping::export::csv_writer::write_records;
use bestsellers_scrapping::export::table::{render_plain_table, render_product_table};
use bestsellers_scrapping::utilities::fetch_page::build_client;

enum Command {
    Crawl,
    Compare,
}

struct Args {
    command: Command,
    settings: String,
}

fn parse_args() -> Result<Args> {
    let mut command = Command::Crawl;
    let mut settings = DEFAULT_SETTINGS_FILE.to_string();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "crawl" => command = Command::Crawl,
            "compare" => command = Command::Compare,
            "--settings" => {
                settings = args.next().context("--settings expects a file path")?;
            }
            other => anyhow::bail!(
                "Unknown argument: {} (usage: bestsellers_scrapping [crawl|compare] [--settings <path>])",
                other
            ),
        }
    }

    Ok(Args { command, settings })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    // Load configuration settings
    let config = match load_config(&args.settings) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", format!("Failed to load configuration: {:#}", e).red());
            return Err(e);
        }
    };

    match args.command {
        Command::Crawl => crawl(&config).await,
        Command::Compare => compare(&config).await,
    }
}

async fn crawl(config: &AppConfig) -> Result<()> {
    let origin = config.amazon.origin_url()?;
    let client = build_client(&config.http)?;

    let references = collect_listing_references(&client, config, &origin).await;
    println!(
        "{}",
        format!("Unique products across listing pages: {}", references.len()).green()
    );

    if references.is_empty() {
        println!("{}", "No products found, nothing to export".yellow());
        return Ok(());
    }

    let outcome = fetch_product_records(&client, config, &references).await;

    let output = Path::new(&config.file.output_csv);
    write_records(output, &outcome.records)?;
    println!("{}", format!("CSV file saved: {}", output.display()).green());

    println!("\nProducts (img and link hidden):");
    println!("{}", render_product_table(&outcome.records));

    if outcome.failed_links.is_empty() {
        println!("{}", "\nAll product pages fetched successfully".green());
    } else {
        println!("{}", "\nSome product pages could not be fetched (sample):".yellow());
        for link in outcome.failed_links.iter().take(10) {
            println!(" - {}", link);
        }
    }

    Ok(())
}

async fn compare(config: &AppConfig) -> Result<()> {
    let old = read_csv_table(Path::new(&config.file.previous_csv)).await?;
    let new = read_csv_table(Path::new(&config.file.output_csv)).await?;

    let report = diff_tables(&old, &new)?;

    if report.is_empty() {
        println!("{}", "No changes found in common products".green());
    } else {
        println!("\nChanged products:");
        println!(
            "{}",
            render_plain_table(&["link", "column", "old", "new"], &difference_rows(&report))
        );
    }

    let differences = Path::new(&config.file.differences_csv);
    write_differences(differences, &report)?;
    println!("{}", format!("Differences saved: {}", differences.display()).green());

    Ok(())
}
