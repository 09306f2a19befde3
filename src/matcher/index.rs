//! Справочный индекс отделений
//!
//! Мультиотображение «нормализованное поселение → список отделений».
//! Строится один раз из распарсенных HTML страниц и после этого не
//! меняется, поэтому безопасно разделяется между потоками при
//! параллельной обработке строк.

use super::similarity::similarity_ratio;
use super::types::{OfficeRecord, SettlementCandidate};
use crate::normalizer::normalize;
use indexmap::IndexMap;

/// Индекс отделений по нормализованному названию поселения
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    buckets: IndexMap<String, Vec<OfficeRecord>>,
}

impl ReferenceIndex {
    /// Строит индекс из списка отделений
    ///
    /// Варианты написания, совпадающие после нормализации («г. Алматы»,
    /// «Алматы»), попадают в один бакет.
    pub fn build(records: Vec<OfficeRecord>) -> Self {
        let mut buckets: IndexMap<String, Vec<OfficeRecord>> = IndexMap::new();

        for record in records {
            let key = normalize(&record.settlement);
            if key.is_empty() {
                continue;
            }
            buckets.entry(key).or_default().push(record);
        }

        Self { buckets }
    }

    /// Подбирает поселения, похожие на запрос
    ///
    /// Возвращает бакеты с оценкой не ниже порога, по убыванию оценки.
    /// При равных оценках сохраняется порядок вставки в индекс.
    pub fn candidates_for(&self, query_settlement: &str, threshold: f64) -> Vec<SettlementCandidate<'_>> {
        let normalized_query = normalize(query_settlement);

        let mut matches: Vec<SettlementCandidate<'_>> = self
            .buckets
            .iter()
            .filter_map(|(name, offices)| {
                let score = similarity_ratio(&normalized_query, name);
                (score >= threshold).then_some(SettlementCandidate {
                    name: name.as_str(),
                    offices: offices.as_slice(),
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }

    pub fn settlement_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn office_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
