//! Тесты разбора HTML страниц QazPost

use address_check_rust::parser::HtmlParser;
use address_check_rust::report::NullReporter;
use address_check_rust::{AddressCheckError, Config};
use std::path::Path;
use tempfile::tempdir;

static REPORTER: NullReporter = NullReporter;

fn page(addresses: &[&str]) -> String {
    let blocks: String = addresses
        .iter()
        .map(|addr| {
            format!(
                r#"<div class="DdeCNNHT"><div class="_3w4rWaD9">{}</div></div>"#,
                addr
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", blocks)
}

#[test]
fn test_parse_directory_of_pages() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("almaty.html"),
        page(&["г. Алматы, ул. Абая, д. 150", "г. Алматы, пр. Достык, 12"]),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("shymkent.html"),
        page(&["Шымкент, ул. Туркестанская, 5"]),
    )
    .unwrap();

    let parser = HtmlParser::new(&Config::default(), &REPORTER).unwrap();
    let offices = parser.parse_html_dir(dir.path()).unwrap();

    assert_eq!(offices.len(), 3);
    // Файлы обходятся по имени
    assert_eq!(offices[0].settlement, "Алматы");
    assert_eq!(offices[2].settlement, "Шымкент");
}

/// Не-HTML файлы и битые записи пропускаются без прерывания обхода
#[test]
fn test_malformed_records_skipped() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("regions.html"),
        page(&[
            "г. Алматы, ул. Абая, д. 150",
            "какой-то текст без адреса",
            "Караганда, пр. Бухар-Жырау, 49",
        ]),
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "не html").unwrap();

    let parser = HtmlParser::new(&Config::default(), &REPORTER).unwrap();
    let offices = parser.parse_html_dir(dir.path()).unwrap();

    assert_eq!(offices.len(), 2);
    assert_eq!(offices[0].street, "ул. Абая");
    assert_eq!(offices[1].settlement, "Караганда");
}

#[test]
fn test_empty_directory_yields_no_offices() {
    let dir = tempdir().unwrap();
    let parser = HtmlParser::new(&Config::default(), &REPORTER).unwrap();
    let offices = parser.parse_html_dir(dir.path()).unwrap();
    assert!(offices.is_empty());
}

#[test]
fn test_missing_directory_is_fatal() {
    let parser = HtmlParser::new(&Config::default(), &REPORTER).unwrap();
    let result = parser.parse_html_dir(Path::new("/nonexistent/regions_html"));
    assert!(matches!(result, Err(AddressCheckError::NoReferenceData(_))));
}

/// Настраиваемые CSS классы селекторов
#[test]
fn test_custom_css_classes() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("custom.html"),
        r#"<html><body>
            <div class="office"><div class="addr">г. Алматы, ул. Абая, д. 150</div></div>
        </body></html>"#,
    )
    .unwrap();

    let config = Config {
        office_container_class: "office".into(),
        address_block_class: "addr".into(),
        ..Config::default()
    };
    let parser = HtmlParser::new(&config, &REPORTER).unwrap();
    let offices = parser.parse_html_dir(dir.path()).unwrap();

    assert_eq!(offices.len(), 1);
    assert_eq!(offices[0].house, "150");
}
