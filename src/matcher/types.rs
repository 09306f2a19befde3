use serde::{Deserialize, Serialize};

/// Отделение QazPost из справочной базы
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeRecord {
    pub full_address: String,
    pub settlement: String,
    pub street: String,
    pub house: String,
}

/// Адрес из строки Excel (только строки с непустым поселением)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAddressRow {
    /// Номер строки в Excel (1-based)
    pub row_num: u32,
    pub settlement: String,
    pub street: String,
    pub house: String,
}

/// Статус проверки адреса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Confirmed,
    NeedsReview,
    NotFound,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Confirmed => write!(f, "Да"),
            MatchStatus::NeedsReview => write!(f, "Проверить"),
            MatchStatus::NotFound => write!(f, "Нет"),
        }
    }
}

/// Результат проверки одной строки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub row_num: u32,
    pub status: MatchStatus,
    pub details: String,
}

/// Кандидат-поселение при поиске по индексу
#[derive(Debug, Clone)]
pub struct SettlementCandidate<'a> {
    pub name: &'a str,
    pub offices: &'a [OfficeRecord],
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(MatchStatus::Confirmed.to_string(), "Да");
        assert_eq!(MatchStatus::NeedsReview.to_string(), "Проверить");
        assert_eq!(MatchStatus::NotFound.to_string(), "Нет");
    }
}
