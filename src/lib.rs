//! Amazon bestseller scraper: extracts ranked product references from
//! listing pages, reads detail fields from product pages and exports them
//! as CSV.

pub mod config;
pub mod crawl;
pub mod export;
pub mod extractors;
pub mod utilities;

pub use extractors::amazon::extract_product_details::{
    collect_product_details, extract_product_details,
};
pub use extractors::amazon::extract_product_references::{
    collect_product_references, extract_product_references, DEFAULT_LIMIT,
};
pub use extractors::amazon::models::{ProductDetails, ProductRecord, ProductReference, SENTINEL};
