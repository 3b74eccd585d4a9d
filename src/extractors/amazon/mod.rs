pub mod extract_product_details;
pub mod extract_product_references;
pub mod models;
pub mod selectors;
