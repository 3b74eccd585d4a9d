use std::sync::LazyLock;

use regex::Regex;

/// `/dp/<ID>` or `/gp/product/<ID>`, where the ID is 8 to 12 alphanumerics.
pub static PRODUCT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:dp|gp/product)/([A-Za-z0-9]{8,12})").unwrap());

/// Extracts the product ID (ASIN) from a product URL or path.
pub fn extract_product_id(url: &str) -> Option<String> {
    PRODUCT_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Every product ID referenced in `text`, in order of occurrence.
pub fn scan_product_ids(text: &str) -> impl Iterator<Item = &str> {
    PRODUCT_ID_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether a bare value (e.g. a payload `asin` field) is a well-formed product ID.
pub fn is_product_id(value: &str) -> bool {
    (8..=12).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_slugged_link() {
        assert_eq!(
            extract_product_id("https://www.amazon.com.tr/Apple-iPad/dp/B0ABCDEFGH/ref=zg_bs_1"),
            Some("B0ABCDEFGH".to_string())
        );
    }

    #[test]
    fn extracts_id_from_gp_product_link() {
        assert_eq!(
            extract_product_id("/gp/product/B0ABCDEFGH?psc=1"),
            Some("B0ABCDEFGH".to_string())
        );
    }

    #[test]
    fn rejects_short_ids() {
        assert_eq!(extract_product_id("/dp/B0X"), None);
        assert!(!is_product_id("B0X"));
        assert!(!is_product_id("B0ABC-DEFG"));
        assert!(is_product_id("B0ABCDEFGH"));
    }

    #[test]
    fn scans_in_document_order() {
        let text = "<a href=\"/dp/BBBBBBBBBB\"></a> ... /gp/product/AAAAAAAAAA";
        let ids: Vec<&str> = scan_product_ids(text).collect();
        assert_eq!(ids, vec!["BBBBBBBBBB", "AAAAAAAAAA"]);
    }
}
