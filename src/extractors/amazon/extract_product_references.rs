use std::collections::HashSet;

use scraper::{ElementRef, Html};
use serde_json::Value;
use url::Url;

use crate::extractors::amazon::models::ProductReference;
use crate::extractors::amazon::selectors::listing;
use crate::extractors::element_text;
use crate::utilities::decode_escaped_payload::decode_escaped_payload;
use crate::utilities::extract_product_id::{extract_product_id, is_product_id, scan_product_ids};

/// One bestseller page holds 50 products.
pub const DEFAULT_LIMIT: usize = 50;

/// Everything a strategy may look at.
pub struct ListingPage<'a> {
    pub raw_html: &'a str,
    pub document: &'a Html,
    pub origin: &'a Url,
}

/// Produces candidate references from a page, in page order.
pub type Strategy = fn(&ListingPage<'_>) -> Vec<ProductReference>;

/// Strategies in priority order. Earlier strategies win on duplicate IDs.
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("listing cards", from_listing_cards as Strategy),
    ("embedded payloads", from_embedded_payloads as Strategy),
    ("raw text", from_raw_text as Strategy),
];

/// Parses `raw_html` and collects its product references.
pub fn extract_product_references(
    raw_html: &str,
    origin: &Url,
    limit: usize,
    already_seen: &HashSet<String>,
) -> Vec<ProductReference> {
    let document = Html::parse_document(raw_html);
    collect_product_references(raw_html, &document, origin, limit, already_seen)
}

/// Runs every strategy in order until `limit` references are collected.
///
/// IDs in `already_seen` (products from earlier pages) are skipped, and
/// each ID is returned at most once. Never fails: a page without products
/// yields an empty list.
pub fn collect_product_references(
    raw_html: &str,
    document: &Html,
    origin: &Url,
    limit: usize,
    already_seen: &HashSet<String>,
) -> Vec<ProductReference> {
    let page = ListingPage {
        raw_html,
        document,
        origin,
    };
    let mut collector = Collector::new(limit, already_seen);

    for (_, strategy) in STRATEGIES.iter() {
        if collector.is_full() {
            break;
        }
        for reference in strategy(&page) {
            if collector.is_full() {
                break;
            }
            collector.offer(reference);
        }
    }

    collector.references
}

struct Collector<'a> {
    limit: usize,
    already_seen: &'a HashSet<String>,
    emitted: HashSet<String>,
    references: Vec<ProductReference>,
}

impl<'a> Collector<'a> {
    fn new(limit: usize, already_seen: &'a HashSet<String>) -> Self {
        Self {
            limit,
            already_seen,
            emitted: HashSet::new(),
            references: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.references.len() >= self.limit
    }

    fn offer(&mut self, reference: ProductReference) {
        if self.already_seen.contains(&reference.product_id)
            || !self.emitted.insert(reference.product_id.clone())
        {
            return;
        }
        self.references.push(reference);
    }
}

/// Rank badge and product anchor of each grid card.
pub fn from_listing_cards(page: &ListingPage<'_>) -> Vec<ProductReference> {
    page.document
        .select(&listing::CARD)
        .filter_map(|card| reference_from_card(card, page.origin))
        .collect()
}

fn reference_from_card(card: ElementRef<'_>, origin: &Url) -> Option<ProductReference> {
    let rank = card
        .select(&listing::RANK_BADGE)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty());

    let anchor = card
        .select(&listing::PRODUCT_ANCHOR)
        .next()
        .or_else(|| card.select(&listing::ANY_ANCHOR).next())?;

    let link = normalize_link(origin, anchor.value().attr("href")?)?;
    let product_id = extract_product_id(&link)?;

    Some(ProductReference {
        rank,
        link,
        product_id,
    })
}

/// Item lists stored as escaped JSON in widget attributes.
pub fn from_embedded_payloads(page: &ListingPage<'_>) -> Vec<ProductReference> {
    let mut references = Vec::new();

    for element in page.document.select(&listing::PAYLOAD_HOLDER) {
        for attribute in listing::PAYLOAD_ATTRIBUTES {
            match element.value().attr(attribute) {
                Some(raw) if !raw.is_empty() => {
                    references.extend(references_from_payload(raw, page.origin));
                }
                _ => {}
            }
        }
    }

    references
}

/// Every product link left in the decoded page text, in document order.
pub fn from_raw_text(page: &ListingPage<'_>) -> Vec<ProductReference> {
    scan_references(&decode_escaped_payload(page.raw_html), page.origin)
}

fn references_from_payload(raw: &str, origin: &Url) -> Vec<ProductReference> {
    let decoded = decode_escaped_payload(raw);
    let items = parse_payload(&decoded).map(payload_items).unwrap_or_default();

    if items.is_empty() {
        return scan_references(&decoded, origin);
    }

    items
        .iter()
        .filter_map(|item| reference_from_item(item, origin))
        .collect()
}

/// Strict JSON first, then with single quotes swapped for double quotes.
fn parse_payload(decoded: &str) -> Option<Value> {
    serde_json::from_str(decoded)
        .ok()
        .or_else(|| serde_json::from_str(&decoded.replace('\'', "\"")).ok())
}

/// The payload itself when it is a list, else its first list-valued field.
fn payload_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(fields) => fields
            .into_iter()
            .find_map(|(_, value)| match value {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn reference_from_item(item: &Value, origin: &Url) -> Option<ProductReference> {
    let fields = item.as_object()?;

    let product_id = ["id", "asin", "ASIN"]
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find(|value| is_product_id(value))?;

    let rank = fields
        .get("metadataMap")
        .and_then(|metadata| metadata.get("render.zg.rank"))
        .and_then(rank_text)
        .or_else(|| fields.get("rank").and_then(rank_text));

    Some(ProductReference {
        rank,
        link: product_link(origin, product_id)?,
        product_id: product_id.to_string(),
    })
}

fn rank_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn scan_references(text: &str, origin: &Url) -> Vec<ProductReference> {
    scan_product_ids(text)
        .filter_map(|product_id| {
            Some(ProductReference {
                rank: None,
                link: product_link(origin, product_id)?,
                product_id: product_id.to_string(),
            })
        })
        .collect()
}

/// Resolves `href` against the site origin and drops query and fragment.
pub fn normalize_link(origin: &Url, href: &str) -> Option<String> {
    let mut url = origin.join(href.trim()).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.into())
}

fn product_link(origin: &Url, product_id: &str) -> Option<String> {
    origin
        .join(&format!("/dp/{}", product_id))
        .ok()
        .map(String::from)
}
