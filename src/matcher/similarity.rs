//! Оценка сходства строк
//!
//! Коэффициент сходства в духе Рэтклиффа-Обершелпа: удвоенное число
//! совпавших символов в наилучшем выравнивании, делённое на суммарную
//! длину.
//! Работает по символам, а не по байтам, чтобы кириллица считалась
//! корректно.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGIT_RUN_RE: Regex = Regex::new(r"\d+").unwrap();
}

/// Сходство двух строк в диапазоне [0, 1]
///
/// Симметрично; пустая строка с любой другой даёт 0, равные строки — 1.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let matches = lcs_length(&a_chars, &b_chars);

    2.0 * matches as f64 / (a_chars.len() + b_chars.len()) as f64
}

/// Длина наибольшей общей подпоследовательности (две строки DP)
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let n = b.len();
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr.fill(0);
    }
    prev[n]
}

/// Сходство номеров домов
///
/// Ступенчатая схема: полное совпадение — 1.0, совпадение числовых
/// частей («12» и «12А») — 0.9, иначе обычное строковое сходство.
pub fn house_similarity(house1: &str, house2: &str) -> f64 {
    if house1.is_empty() || house2.is_empty() {
        return 0.0;
    }

    if house1.trim().to_lowercase() == house2.trim().to_lowercase() {
        return 1.0;
    }

    let num1 = extract_house_number(house1);
    let num2 = extract_house_number(house2);
    if let (Some(n1), Some(n2)) = (num1, num2) {
        if n1 == n2 {
            return 0.9;
        }
    }

    similarity_ratio(house1, house2)
}

/// Извлекает основной номер дома (первую цифровую группу)
fn extract_house_number(house: &str) -> Option<&str> {
    DIGIT_RUN_RE.find(house).map(|m| m.as_str())
}
