//! Сопоставление адресов с базой отделений QazPost
//!
//! ## Схема обработки строки
//! 1. Поиск похожих поселений в индексе
//! 2. Полный перебор отделений всех кандидатов, взвешенная оценка
//! 3. Классификация по порогам: Да / Проверить / Нет
//!
//! Сбой при обработке одной строки не прерывает пакет: строка получает
//! статус «Проверить» с текстом ошибки.

pub mod index;
pub mod similarity;
pub mod types;

use crate::config::{Config, CONFIRMED_THRESHOLD, SETTLEMENT_WEIGHT};
use crate::normalizer::normalize;
use crate::report::Reporter;
use index::ReferenceIndex;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use similarity::{house_similarity, similarity_ratio};
use types::{InputAddressRow, MatchResult, MatchStatus, OfficeRecord};

/// Лучшее найденное отделение с оценками
struct BestMatch<'a> {
    office: &'a OfficeRecord,
    total_score: f64,
    street_similarity: f64,
    house_similarity: f64,
}

/// Сопоставитель адресов
pub struct AddressMatcher<'a> {
    index: ReferenceIndex,
    settlement_match_threshold: f64,
    partial_match_threshold: f64,
    street_weight: f64,
    house_weight: f64,
    reporter: &'a dyn Reporter,
}

impl<'a> AddressMatcher<'a> {
    pub fn new(index: ReferenceIndex, config: &Config, reporter: &'a dyn Reporter) -> Self {
        Self {
            index,
            settlement_match_threshold: config.settlement_match_threshold,
            partial_match_threshold: config.partial_match_threshold,
            street_weight: config.street_weight,
            house_weight: config.house_weight,
            reporter,
        }
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Проверяет один адрес, не допуская аварийного завершения пакета
    pub fn match_address(&self, row: &InputAddressRow) -> MatchResult {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.resolve_row(row)
        }));

        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.reporter
                    .error(&format!("Ошибка при сопоставлении строки {}: {}", row.row_num, message));
                MatchResult {
                    row_num: row.row_num,
                    status: MatchStatus::NeedsReview,
                    details: format!("Ошибка при проверке: {}", message),
                }
            }
        }
    }

    /// Проверяет пакет строк
    ///
    /// Строки независимы и читают только неизменяемый индекс, поэтому
    /// обрабатываются параллельно; порядок результатов совпадает с
    /// порядком входных строк.
    pub fn match_rows(&self, rows: &[InputAddressRow]) -> Vec<MatchResult> {
        rows.par_iter().map(|row| self.match_address(row)).collect()
    }

    /// То же, что [`match_rows`], но с индикатором прогресса
    ///
    /// [`match_rows`]: Self::match_rows
    pub fn match_rows_with_progress(
        &self,
        rows: &[InputAddressRow],
        progress: &ProgressBar,
    ) -> Vec<MatchResult> {
        rows.par_iter()
            .progress_with(progress.clone())
            .map(|row| self.match_address(row))
            .collect()
    }

    fn resolve_row(&self, row: &InputAddressRow) -> MatchResult {
        self.reporter.debug(&format!(
            "Строка {}: проверяем '{}, {}, {}'",
            row.row_num, row.settlement, row.street, row.house
        ));

        // 1. Подходящие поселения
        let candidates = self
            .index
            .candidates_for(&row.settlement, self.settlement_match_threshold);

        if candidates.is_empty() {
            self.reporter
                .debug(&format!("Строка {}: поселение '{}' не найдено", row.row_num, row.settlement));
            return MatchResult {
                row_num: row.row_num,
                status: MatchStatus::NotFound,
                details: format!("Поселение '{}' не найдено в базе QazPost", row.settlement),
            };
        }

        // 2. Полный перебор отделений всех кандидатов. Обрывать раньше
        // нельзя: лучшая суммарная оценка может прийти из поселения с
        // меньшей оценкой сходства.
        let normalized_street = normalize(&row.street);
        let mut best: Option<BestMatch<'_>> = None;

        for candidate in &candidates {
            for office in candidate.offices {
                let street_sim =
                    similarity_ratio(&normalized_street, &normalize(&office.street));
                let house_sim = house_similarity(&row.house, &office.house);

                let total_score = candidate.score * SETTLEMENT_WEIGHT
                    + street_sim * self.street_weight
                    + house_sim * self.house_weight;

                // Строгое сравнение: при равенстве остаётся первое найденное
                if total_score > best.as_ref().map_or(0.0, |b| b.total_score) {
                    best = Some(BestMatch {
                        office,
                        total_score,
                        street_similarity: street_sim,
                        house_similarity: house_sim,
                    });
                }
            }
        }

        // 3. Классификация
        match best {
            Some(best) => self.classify(row, &best),
            None => MatchResult {
                row_num: row.row_num,
                status: MatchStatus::NotFound,
                details: format!(
                    "Улица '{}' не найдена в поселении '{}'",
                    row.street, row.settlement
                ),
            },
        }
    }

    fn classify(&self, row: &InputAddressRow, best: &BestMatch<'_>) -> MatchResult {
        let status = if best.total_score >= CONFIRMED_THRESHOLD {
            MatchStatus::Confirmed
        } else if best.total_score >= self.partial_match_threshold {
            MatchStatus::NeedsReview
        } else {
            MatchStatus::NotFound
        };

        self.reporter.debug(&format!(
            "Строка {}: {} (счёт: {:.2})",
            row.row_num, status, best.total_score
        ));

        MatchResult {
            row_num: row.row_num,
            status,
            details: format!(
                "Найден: {}, {}, {} (улица: {:.2}, дом: {:.2})",
                best.office.settlement,
                best.office.street,
                best.office.house,
                best.street_similarity,
                best.house_similarity
            ),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "неизвестная ошибка".to_string()
    }
}
