//! Разбор строки адреса на компоненты
//!
//! Каскад шаблонов, применяемых по порядку: побеждает первый
//! совпавший. Порядок важен, менять его нельзя.

use lazy_static::lazy_static;
use regex::Regex;

/// Компоненты адреса, извлечённые из текста страницы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub settlement: String,
    pub street: String,
    pub house: String,
}

lazy_static! {
    /// Шаблоны адресов по убыванию приоритета:
    /// «г. Город, ул. Улица, д. Дом», «Город, ул. Улица, Дом»,
    /// «г. Город ул. Улица д. Дом» (без запятых)
    static ref ADDRESS_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:г\.\s*)?([^,]+),\s*(?:ул\.|пр\.|мкр\.)\s*([^,]+),\s*(?:д\.\s*)?(.+)")
            .unwrap(),
        Regex::new(r"(?i)([^,]+),\s*(?:ул\.|пр\.|мкр\.)\s*([^,]+),\s*(.+)").unwrap(),
        Regex::new(r"(?i)(?:г\.\s*)?([^,]+)\s+(?:ул\.|пр\.|мкр\.)\s*([^,]+)\s+(?:д\.\s*)?(.+)")
            .unwrap(),
    ];
    static ref SETTLEMENT_PREFIX_RE: Regex =
        Regex::new(r"(?i)^(?:г\.|город|с\.|село|пос\.|посёлок)\s*").unwrap();
    static ref STREET_MARKER_RE: Regex = Regex::new(r"(?i)^(?:ул\.|пр\.|мкр\.)").unwrap();
    static ref HOUSE_PREFIX_RE: Regex = Regex::new(r"(?i)^(?:д\.|дом)\s*").unwrap();
}

/// Разбирает строку адреса из HTML страницы
///
/// Возвращает `None`, если ни один шаблон не подошёл или какое-то из
/// полей после очистки оказалось пустым. Такая запись пропускается,
/// разбор остальных продолжается.
pub fn parse_address(address_text: &str) -> Option<ParsedAddress> {
    let clean_address = address_text.split_whitespace().collect::<Vec<_>>().join(" ");

    for pattern in ADDRESS_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&clean_address) {
            let settlement = clean_settlement_name(captures.get(1)?.as_str());
            let street = clean_street_name(captures.get(2)?.as_str());
            let house = clean_house_number(captures.get(3)?.as_str());

            if let (Some(settlement), Some(street), Some(house)) = (settlement, street, house) {
                return Some(ParsedAddress {
                    settlement,
                    street,
                    house,
                });
            }
        }
    }

    None
}

/// Убирает маркер типа населённого пункта
fn clean_settlement_name(settlement: &str) -> Option<String> {
    let cleaned = SETTLEMENT_PREFIX_RE
        .replace(settlement.trim(), "")
        .trim()
        .to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Добавляет стандартный маркер типа улицы, если его нет
fn clean_street_name(street: &str) -> Option<String> {
    let street = street.trim();
    if street.is_empty() {
        return None;
    }

    if STREET_MARKER_RE.is_match(street) {
        return Some(street.to_string());
    }

    let lower = street.to_lowercase();
    let marked = if lower.contains("проспект") || lower.contains("avenue") {
        format!("пр. {}", street)
    } else if lower.contains("микрорайон") || lower.contains("мкр") {
        format!("мкр. {}", street)
    } else {
        format!("ул. {}", street)
    };

    Some(marked)
}

/// Убирает маркер «д.» / «дом» перед номером
fn clean_house_number(house: &str) -> Option<String> {
    let cleaned = HOUSE_PREFIX_RE.replace(house.trim(), "").trim().to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}
