//! Сквозные тесты сопоставления адресов
//!
//! База отделений собирается напрямую, без HTML и Excel.

use address_check_rust::matcher::index::ReferenceIndex;
use address_check_rust::matcher::AddressMatcher;
use address_check_rust::report::NullReporter;
use address_check_rust::{Config, InputAddressRow, MatchStatus, OfficeRecord};

static REPORTER: NullReporter = NullReporter;

fn office(settlement: &str, street: &str, house: &str) -> OfficeRecord {
    OfficeRecord {
        full_address: format!("{}, {}, {}", settlement, street, house),
        settlement: settlement.to_string(),
        street: street.to_string(),
        house: house.to_string(),
    }
}

fn row(row_num: u32, settlement: &str, street: &str, house: &str) -> InputAddressRow {
    InputAddressRow {
        row_num,
        settlement: settlement.to_string(),
        street: street.to_string(),
        house: house.to_string(),
    }
}

fn default_matcher(offices: Vec<OfficeRecord>) -> AddressMatcher<'static> {
    let config = Config::default();
    AddressMatcher::new(ReferenceIndex::build(offices), &config, &REPORTER)
}

/// Точный адрес с маркерами типа в базе и без маркеров во входе
#[test]
fn test_exact_address_confirmed() {
    let matcher = default_matcher(vec![office("г. Алматы", "ул. Абая", "150")]);

    let result = matcher.match_address(&row(9, "Алматы", "Абая", "150"));
    assert_eq!(result.status, MatchStatus::Confirmed);
    assert!(result.details.starts_with("Найден:"));
    assert!(result.details.contains("ул. Абая"));
    assert!(result.details.contains("150"));
}

/// Поселение отсутствует в базе
#[test]
fn test_unknown_settlement_not_found() {
    let matcher = default_matcher(vec![office("Алматы", "ул. Абая", "150")]);

    let result = matcher.match_address(&row(9, "Усть-Каменогорск", "Абая", "150"));
    assert_eq!(result.status, MatchStatus::NotFound);
    assert!(result.details.contains("не найдено"));
    assert!(result.details.contains("Усть-Каменогорск"));
}

/// Поселение совпало, улица и дом существенно отличаются
#[test]
fn test_street_mismatch_needs_review() {
    let matcher = default_matcher(vec![office("Алматы", "ул. Розыбакиева", "999")]);

    let result = matcher.match_address(&row(9, "Алматы", "Абая", "150"));
    assert_eq!(result.status, MatchStatus::NeedsReview);
}

/// Дом «12» против «12А» даёт ступенчатую оценку и не мешает статусу
#[test]
fn test_house_letter_suffix_confirmed() {
    let matcher = default_matcher(vec![office("Алматы", "ул. Абая", "12")]);

    let result = matcher.match_address(&row(9, "Алматы", "Абая", "12А"));
    assert_eq!(result.status, MatchStatus::Confirmed);
    assert!(result.details.contains("дом: 0.90"));
}

/// Варианты написания поселения сливаются в один бакет
#[test]
fn test_settlement_spelling_variants_merge() {
    let matcher = default_matcher(vec![
        office("г. Алматы", "ул. Абая", "150"),
        office("Алматы", "пр. Достык", "12"),
    ]);

    assert_eq!(matcher.index().settlement_count(), 1);
    assert_eq!(matcher.index().office_count(), 2);

    let result = matcher.match_address(&row(9, "АЛМАТЫ", "Достык", "12"));
    assert_eq!(result.status, MatchStatus::Confirmed);
    assert!(result.details.contains("пр. Достык"));
}

/// Повторный прогон даёт байт-в-байт те же результаты
#[test]
fn test_rerun_is_deterministic() {
    let matcher = default_matcher(vec![
        office("Алматы", "ул. Абая", "150"),
        office("Алматы", "пр. Достык", "12"),
        office("Шымкент", "ул. Туркестанская", "5"),
        office("Караганда", "пр. Бухар-Жырау", "49"),
    ]);

    let rows = vec![
        row(9, "Алматы", "Абая", "150"),
        row(10, "Шымкент", "Байтурсынова", "7"),
        row(11, "Караганда", "Бухар-Жырау", "49А"),
        row(12, "Атырау", "Сатпаева", "1"),
    ];

    let first = matcher.match_rows(&rows);
    let second = matcher.match_rows(&rows);
    assert_eq!(first, second);

    let details_first: Vec<&str> = first.iter().map(|r| r.details.as_str()).collect();
    let details_second: Vec<&str> = second.iter().map(|r| r.details.as_str()).collect();
    assert_eq!(details_first, details_second);
}

/// Один результат на каждую входную строку, в исходном порядке
#[test]
fn test_one_result_per_row_in_order() {
    let matcher = default_matcher(vec![office("Алматы", "ул. Абая", "150")]);

    let rows: Vec<InputAddressRow> = (9..29)
        .map(|n| row(n, "Алматы", "Абая", &n.to_string()))
        .collect();

    let results = matcher.match_rows(&rows);
    assert_eq!(results.len(), rows.len());
    for (result, input) in results.iter().zip(&rows) {
        assert_eq!(result.row_num, input.row_num);
    }
}

/// Пониженный порог поселения расширяет круг кандидатов
#[test]
fn test_lower_settlement_threshold_widens_search() {
    let offices = vec![office("Алмата", "ул. Абая", "150")];

    let strict = default_matcher(offices.clone());
    let result = strict.match_address(&row(9, "Алматыя", "Абая", "150"));
    assert_eq!(result.status, MatchStatus::NotFound);

    let config = Config {
        settlement_match_threshold: 0.6,
        ..Config::default()
    };
    let relaxed = AddressMatcher::new(ReferenceIndex::build(offices), &config, &REPORTER);
    let result = relaxed.match_address(&row(9, "Алматыя", "Абая", "150"));
    assert_ne!(result.status, MatchStatus::NotFound);
}

/// Детали содержат обе компонентные оценки
#[test]
fn test_details_include_component_scores() {
    let matcher = default_matcher(vec![office("Алматы", "ул. Абая", "150")]);

    let result = matcher.match_address(&row(9, "Алматы", "Абая", "150"));
    assert!(result.details.contains("улица: 1.00"));
    assert!(result.details.contains("дом: 1.00"));
}
