//! Нормализация текста для сравнения адресов
//!
//! Приводит свободный текст (названия поселений, улиц) к сопоставимой
//! форме: нижний регистр, схлопнутые пробелы, убранные маркеры типа
//! «г.» / «ул.», сокращённые синонимы.

use lazy_static::lazy_static;
use regex::Regex;

/// Маркеры населённых пунктов и улиц, убираемые с краёв строки
const UNIT_MARKERS: &str = r"г\.|город|с\.|село|пос\.|посёлок|ул\.|улица|пр\.|проспект|мкр\.|микрорайон";

/// Замены полных слов на сокращения (подстрочная замена, не пословная)
const SYNONYMS: &[(&str, &str)] = &[
    ("проспект", "пр"),
    ("улица", "ул"),
    ("микрорайон", "мкр"),
    ("переулок", "пер"),
    ("бульвар", "бул"),
];

lazy_static! {
    static ref LEADING_MARKER_RE: Regex =
        Regex::new(&format!(r"^(?:{})\s*", UNIT_MARKERS)).unwrap();
    static ref TRAILING_MARKER_RE: Regex =
        Regex::new(&format!(r"\s*(?:{})$", UNIT_MARKERS)).unwrap();
}

/// Нормализует текст для сравнения
///
/// Чистая функция: пустой вход даёт пустую строку, ошибок не бывает.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // Нижний регистр и схлопывание пробелов
    let mut text = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    // Маркеры типа в начале и в конце строки
    text = LEADING_MARKER_RE.replace(&text, "").into_owned();
    text = TRAILING_MARKER_RE.replace(&text, "").into_owned();

    // Синонимы
    for (full, short) in SYNONYMS {
        text = text.replace(full, short);
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_lowercase_and_whitespace() {
        assert_eq!(normalize("  АЛМАТЫ  "), "алматы");
        assert_eq!(normalize("Нур-Султан"), "нур-султан");
        assert_eq!(normalize("а  б   в"), "а б в");
    }

    #[test]
    fn test_strip_leading_settlement_marker() {
        assert_eq!(normalize("г. Алматы"), "алматы");
        assert_eq!(normalize("город Алматы"), "алматы");
        assert_eq!(normalize("с. Каскелен"), "каскелен");
        assert_eq!(normalize("пос. Отеген"), "отеген");
    }

    #[test]
    fn test_strip_leading_street_marker() {
        // «ул. Абая» и «Абая» нормализуются одинаково
        assert_eq!(normalize("ул. Абая"), normalize("Абая"));
        assert_eq!(normalize("пр. Кунаева"), "кунаева");
        assert_eq!(normalize("мкр. Самал"), "самал");
    }

    #[test]
    fn test_strip_trailing_marker() {
        assert_eq!(normalize("Абая улица"), "абая");
        assert_eq!(normalize("Самал микрорайон"), "самал");
    }

    #[test]
    fn test_synonym_contraction() {
        // Внутренние вхождения тоже заменяются
        assert_eq!(normalize("переулок Речной"), "пер речной");
        assert_eq!(normalize("Сейфуллина бульвар 5"), "сейфуллина бул 5");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("г. АЛМАТЫ");
        assert_eq!(normalize(&once), once);
    }
}
