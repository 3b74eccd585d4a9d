use crate::extractors::amazon::models::ProductRecord;

/// Renders rows as a plain, left-aligned text table with a header line.
pub fn render_plain_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line(headers.iter().copied(), &widths));
    for row in rows {
        lines.push(render_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Product table without the `img` and `link` columns.
pub fn render_product_table(records: &[ProductRecord]) -> String {
    let Some(first) = records.first() else {
        return " (no data)".to_string();
    };

    let headers: Vec<&str> = first.table_row().into_iter().map(|(name, _)| name).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| record.table_row().into_iter().map(|(_, value)| value).collect())
        .collect();

    render_plain_table(&headers, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::amazon::models::{ProductDetails, ProductReference};

    #[test]
    fn pads_columns_to_widest_cell() {
        let table = render_plain_table(
            &["rank", "asin"],
            &[
                vec!["1".to_string(), "B0AAAAAAAA".to_string()],
                vec!["10".to_string(), "B0B".to_string()],
            ],
        );
        assert_eq!(table, "rank  asin\n1     B0AAAAAAAA\n10    B0B");
    }

    #[test]
    fn product_table_hides_link_and_image() {
        let reference = ProductReference {
            rank: Some("1".to_string()),
            link: "https://www.amazon.com.tr/dp/B0AAAAAAAA".to_string(),
            product_id: "B0AAAAAAAA".to_string(),
        };
        let details = ProductDetails {
            image_url: Some("https://m.media-amazon.com/images/I/x.jpg".to_string()),
            ..ProductDetails::default()
        };
        let table = render_product_table(&[ProductRecord::new(&reference, details)]);

        assert!(table.starts_with("rank  title"));
        assert!(table.contains("NonePublished"));
        assert!(!table.contains("https://"));
    }

    #[test]
    fn empty_product_table() {
        assert_eq!(render_product_table(&[]), " (no data)");
    }
}
