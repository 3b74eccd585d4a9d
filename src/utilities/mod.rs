pub mod decode_escaped_payload;
pub mod extract_product_id;
pub mod fetch_page;
pub mod generate_random_delay;
