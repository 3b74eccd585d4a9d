use std::fmt::Display;

use serde::{Serialize, Serializer};

/// Written wherever a field could not be determined.
pub const SENTINEL: &str = "NonePublished";

/// One product found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReference {
    /// Rank badge as displayed, `None` when the page does not show one.
    pub rank: Option<String>,
    /// Absolute product URL without query string.
    pub link: String,
    pub product_id: String,
}

/// Fields read from a product detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub title: Option<String>,
    pub price: Option<String>,
    pub rating_count: Option<u64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub screen_size: Option<String>,
    pub operating_system: Option<String>,
    pub color: Option<String>,
    pub image_url: Option<String>,
}

/// A listing reference merged with its detail fields, as exported to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(serialize_with = "or_sentinel")]
    pub rank: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub title: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub price: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub rating_count: Option<u64>,
    #[serde(serialize_with = "or_sentinel")]
    pub brand: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub model: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub screen_size: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub operating_system: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub color: Option<String>,
    pub asin: String,
    pub link: String,
    #[serde(rename = "img", serialize_with = "or_sentinel")]
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// Listing rank and ID always win over whatever the detail page says.
    pub fn new(reference: &ProductReference, details: ProductDetails) -> Self {
        Self {
            rank: reference.rank.clone(),
            title: details.title,
            price: details.price,
            rating_count: details.rating_count,
            brand: details.brand,
            model: details.model,
            screen_size: details.screen_size,
            operating_system: details.operating_system,
            color: details.color,
            asin: reference.product_id.clone(),
            link: reference.link.clone(),
            image_url: details.image_url,
        }
    }

    /// Column names and display values for the terminal table (no `img`, no `link`).
    pub fn table_row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rank", display_or_sentinel(&self.rank)),
            ("title", display_or_sentinel(&self.title)),
            ("price", display_or_sentinel(&self.price)),
            ("rating_count", display_or_sentinel(&self.rating_count)),
            ("brand", display_or_sentinel(&self.brand)),
            ("model", display_or_sentinel(&self.model)),
            ("screen_size", display_or_sentinel(&self.screen_size)),
            ("operating_system", display_or_sentinel(&self.operating_system)),
            ("color", display_or_sentinel(&self.color)),
            ("asin", self.asin.clone()),
        ]
    }
}

pub fn display_or_sentinel<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| SENTINEL.to_string(), |v| v.to_string())
}

fn or_sentinel<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_str(SENTINEL),
    }
}
