use std::collections::HashSet;

use colored::Colorize;
use reqwest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::extractors::amazon::extract_product_details::extract_product_details;
use crate::extractors::amazon::extract_product_references::extract_product_references;
use crate::extractors::amazon::models::{display_or_sentinel, ProductRecord, ProductReference};
use crate::utilities::fetch_page::fetch_page;
use crate::utilities::generate_random_delay::generate_random_delay;

/// Detail pages that could not be fetched are reported, not fatal.
pub struct CrawlOutcome {
    pub records: Vec<ProductRecord>,
    pub failed_links: Vec<String>,
}

/// Walks the configured listing pages one by one and returns every unique
/// product reference, in page order.
pub async fn collect_listing_references(
    client: &Client,
    config: &AppConfig,
    origin: &Url,
) -> Vec<ProductReference> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for &page in &config.amazon.pages {
        let page_url = config.amazon.listing_page_url(page);
        println!("{}", format!("Fetching listing page: {}", page_url).cyan());

        match fetch_page(client, &page_url, &config.http).await {
            Ok(raw_html) => {
                let page_references = extract_product_references(
                    &raw_html,
                    origin,
                    config.amazon.target_per_page,
                    &seen,
                );
                println!(
                    "{}",
                    format!("  Unique products on this page: {}", page_references.len()).green()
                );

                for reference in page_references {
                    if seen.insert(reference.product_id.clone()) {
                        references.push(reference);
                    }
                }
            }
            Err(e) => {
                eprintln!("{}", format!("Listing page unavailable: {:#}", e).red());
            }
        }

        generate_random_delay(config.http.delay_min_ms, config.http.delay_max_ms).await;
    }

    references
}

/// Fetches the detail page of every reference and merges both into records.
pub async fn fetch_product_records(
    client: &Client,
    config: &AppConfig,
    references: &[ProductReference],
) -> CrawlOutcome {
    let mut records = Vec::with_capacity(references.len());
    let mut failed_links = Vec::new();

    for (index, reference) in references.iter().enumerate() {
        println!(
            "Fetching ({}/{}) rank={} asin={}",
            index + 1,
            references.len(),
            display_or_sentinel(&reference.rank),
            reference.product_id
        );

        match fetch_page(client, &reference.link, &config.http).await {
            Ok(product_html) => {
                let details = extract_product_details(&product_html);
                records.push(ProductRecord::new(reference, details));
            }
            Err(e) => {
                eprintln!("{}", format!("  Product page unavailable: {:#}", e).red());
                failed_links.push(reference.link.clone());
            }
        }

        generate_random_delay(config.http.delay_min_ms, config.http.delay_max_ms).await;
    }

    CrawlOutcome {
        records,
        failed_links,
    }
}
