use std::fs;

use bestsellers_scrapping::export::compare::{diff_tables, read_csv_table, write_differences};
use bestsellers_scrapping::export::csv_writer::write_records;
use bestsellers_scrapping::{ProductDetails, ProductRecord, ProductReference};

fn record(rank: Option<&str>, asin: &str, price: Option<&str>) -> ProductRecord {
    let reference = ProductReference {
        rank: rank.map(str::to_string),
        link: format!("https://www.amazon.com.tr/dp/{}", asin),
        product_id: asin.to_string(),
    };
    let details = ProductDetails {
        title: Some("Tablet, 64 GB".to_string()),
        price: price.map(str::to_string),
        rating_count: Some(42),
        ..ProductDetails::default()
    };
    ProductRecord::new(&reference, details)
}

#[test]
fn writes_header_bom_and_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");

    write_records(&path, &[record(None, "B0AAAAAAAA", None)]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("\u{feff}rank,title,price,rating_count,brand,model,screen_size,operating_system,color,asin,link,img")
    );
    assert_eq!(
        lines.next(),
        Some("NonePublished,\"Tablet, 64 GB\",NonePublished,42,NonePublished,NonePublished,NonePublished,NonePublished,NonePublished,B0AAAAAAAA,https://www.amazon.com.tr/dp/B0AAAAAAAA,NonePublished")
    );
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn compares_previous_and_new_exports() {
    let dir = tempfile::tempdir().unwrap();
    let previous = dir.path().join("previous.csv");
    let current = dir.path().join("current.csv");
    let differences = dir.path().join("differences.csv");

    write_records(
        &previous,
        &[
            record(Some("1"), "B0AAAAAAAA", Some("100 TL")),
            record(Some("2"), "B0BBBBBBBB", Some("200 TL")),
        ],
    )
    .unwrap();
    write_records(
        &current,
        &[
            record(Some("1"), "B0BBBBBBBB", Some("180 TL")),
            record(Some("2"), "B0AAAAAAAA", Some("100 TL")),
        ],
    )
    .unwrap();

    let old = read_csv_table(&previous).await.unwrap();
    let new = read_csv_table(&current).await.unwrap();
    assert_eq!(old.headers[0], "rank");

    let report = diff_tables(&old, &new).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].link, "https://www.amazon.com.tr/dp/B0BBBBBBBB");
    assert_eq!(report[0].differences.len(), 2);
    assert_eq!(report[1].differences.len(), 1);

    write_differences(&differences, &report).unwrap();
    let content = fs::read_to_string(&differences).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("\u{feff}link,rank_old,rank_new,price_old,price_new"));
    assert_eq!(
        lines.next(),
        Some("https://www.amazon.com.tr/dp/B0BBBBBBBB,2,1,200 TL,180 TL")
    );
    assert_eq!(lines.next(), Some("https://www.amazon.com.tr/dp/B0AAAAAAAA,1,2,,"));

    let reread = read_csv_table(&differences).await.unwrap();
    assert_eq!(reread.headers[0], "link");
}
