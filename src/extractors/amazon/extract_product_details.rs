use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::extractors::amazon::models::ProductDetails;
use crate::extractors::amazon::selectors::detail;
use crate::extractors::{element_text, visible_text};

static RATING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d.]*").unwrap());

static SCREEN_SIZE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\d{2}\.?\d?\s*(?:inç|inch|")"#).unwrap());

/// Specification fields filled from label/value rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecField {
    Brand,
    Model,
    ScreenSize,
    OperatingSystem,
    Color,
}

/// Label keywords (Turkish and English), checked in this order.
const SPEC_KEYWORDS: [(SpecField, &[&str]); 5] = [
    (SpecField::Brand, &["marka", "brand"]),
    (SpecField::Model, &["model"]),
    (SpecField::ScreenSize, &["ekran", "display", "inch"]),
    (SpecField::OperatingSystem, &["işletim", "operating"]),
    (SpecField::Color, &["renk", "colour", "color"]),
];

/// Parses a detail page and extracts its fields.
pub fn extract_product_details(html_content: &str) -> ProductDetails {
    let document = Html::parse_document(html_content);
    collect_product_details(&document)
}

/// Best-effort fill of every detail field: direct selectors first, then the
/// specification tables, then the detail bullets. A field nothing matches
/// stays `None`.
pub fn collect_product_details(document: &Html) -> ProductDetails {
    let mut details = ProductDetails {
        title: first_text(document, &detail::TITLE),
        price: first_text(document, &detail::PRICE),
        rating_count: first_text(document, &detail::RATING_COUNT)
            .and_then(|text| parse_rating_count(&text)),
        brand: first_text(document, &detail::BRAND),
        model: first_text(document, &detail::MODEL),
        screen_size: first_text(document, &detail::SCREEN_SIZE),
        operating_system: first_text(document, &detail::OPERATING_SYSTEM),
        color: first_text(document, &detail::COLOR),
        image_url: first_attr(document, &detail::IMAGE, "src"),
    };

    for (label, value) in spec_table_rows(document).chain(detail_bullet_rows(document)) {
        if let Some(field) = classify_label(&label) {
            let slot = spec_slot(&mut details, field);
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value);
            }
        }
    }

    if details.screen_size.is_none() {
        let page_text = visible_text(document.root_element());
        details.screen_size = SCREEN_SIZE_TEXT
            .find(&page_text)
            .map(|m| m.as_str().to_string());
    }

    details
}

/// Text of the first selector that yields a non-empty value.
fn first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
    })
}

fn first_attr(document: &Html, selectors: &[Selector], attribute: &str) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .and_then(|element| element.value().attr(attribute))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// "1.234 değerlendirme" -> 1234
fn parse_rating_count(text: &str) -> Option<u64> {
    RATING_NUMBER
        .find(text)
        .and_then(|m| m.as_str().replace('.', "").parse().ok())
}

fn spec_table_rows(document: &Html) -> impl Iterator<Item = (String, String)> + '_ {
    document
        .select(&detail::SPEC_TABLE)
        .flat_map(|table| table.select(&detail::TABLE_ROW))
        .filter_map(|row| {
            let label = row.select(&detail::ROW_LABEL).next()?;
            let value = row.select(&detail::ROW_VALUE).next()?;
            Some((element_text(label), element_text(value)))
        })
}

fn detail_bullet_rows(document: &Html) -> impl Iterator<Item = (String, String)> + '_ {
    document
        .select(&detail::DETAIL_BULLET)
        .filter_map(split_bullet)
}

/// Splits "Marka ‏ : ‎ Apple" into its label and value.
fn split_bullet(bullet: ElementRef<'_>) -> Option<(String, String)> {
    let text = bullet
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut parts = text
        .split([':', '\n'])
        .map(|part| {
            part.trim_matches(|c: char| c.is_whitespace() || c == '\u{200e}' || c == '\u{200f}')
        })
        .filter(|part| !part.is_empty());

    let label = parts.next()?;
    let value = parts.next()?;
    Some((label.to_string(), value.to_string()))
}

fn classify_label(label: &str) -> Option<SpecField> {
    // "İ" lowercases to "i" plus a combining dot
    let label = label.to_lowercase().replace('\u{307}', "");

    SPEC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| label.contains(keyword)))
        .map(|(field, _)| *field)
}

fn spec_slot(details: &mut ProductDetails, field: SpecField) -> &mut Option<String> {
    match field {
        SpecField::Brand => &mut details.brand,
        SpecField::Model => &mut details.model,
        SpecField::ScreenSize => &mut details.screen_size,
        SpecField::OperatingSystem => &mut details.operating_system,
        SpecField::Color => &mut details.color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_turkish_and_english_labels() {
        assert_eq!(classify_label("Markası"), Some(SpecField::Brand));
        assert_eq!(classify_label("Brand Name"), Some(SpecField::Brand));
        assert_eq!(classify_label("Model Adı"), Some(SpecField::Model));
        assert_eq!(classify_label("Ekran Boyutu"), Some(SpecField::ScreenSize));
        assert_eq!(classify_label("İşletim Sistemi"), Some(SpecField::OperatingSystem));
        assert_eq!(classify_label("Colour"), Some(SpecField::Color));
        assert_eq!(classify_label("Ürün Ağırlığı"), None);
    }

    #[test]
    fn rating_count_drops_thousands_separator() {
        assert_eq!(parse_rating_count("1.234 değerlendirme"), Some(1234));
        assert_eq!(parse_rating_count("87 ratings"), Some(87));
        assert_eq!(parse_rating_count("no ratings"), None);
    }
}
