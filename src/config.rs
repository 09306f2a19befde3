use crate::error::{AddressCheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Вес поселения в составной оценке (фиксированный)
pub const SETTLEMENT_WEIGHT: f64 = 0.3;

/// Порог составной оценки для статуса «Да» (фиксированный)
pub const CONFIRMED_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Пути ===
    pub html_dir: PathBuf,
    pub input_excel: PathBuf,
    pub output_excel: PathBuf,
    pub backup_dir: PathBuf,

    // === Раскладка Excel ===
    /// Строка с которой начинаются данные (0-based, т.е. 8 = 9-я строка)
    pub excel_start_row: u32,
    pub settlement_col: String,
    pub street_col: String,
    pub house_col: String,
    pub result_col: String,
    pub details_col: String,

    // === Пороги сопоставления ===
    pub settlement_match_threshold: f64,
    pub partial_match_threshold: f64,

    // === Веса улицы и дома ===
    pub street_weight: f64,
    pub house_weight: f64,

    // === CSS селекторы страниц QazPost ===
    pub office_container_class: String,
    pub address_block_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            html_dir: PathBuf::from("regions_html"),
            input_excel: PathBuf::from("tables/addresses.xlsx"),
            output_excel: PathBuf::from("tables/addresses_with_results.xlsx"),
            backup_dir: PathBuf::from("backups"),
            excel_start_row: 8,
            settlement_col: "L".into(),
            street_col: "M".into(),
            house_col: "N".into(),
            result_col: "U".into(),
            details_col: "V".into(),
            settlement_match_threshold: 0.9,
            partial_match_threshold: 0.4,
            street_weight: 0.7,
            house_weight: 0.3,
            office_container_class: "DdeCNNHT".into(),
            address_block_class: "_3w4rWaD9".into(),
        }
    }
}

impl Config {
    /// Загружает конфигурацию из JSON файла, либо значения по умолчанию
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(AddressCheckError::FileNotFound(p.display().to_string()));
                }
                let content = std::fs::read_to_string(p)?;
                let config: Config = serde_json::from_str(&content)?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("settlement_match_threshold", self.settlement_match_threshold),
            ("partial_match_threshold", self.partial_match_threshold),
            ("street_weight", self.street_weight),
            ("house_weight", self.house_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AddressCheckError::Config(format!(
                    "{} должен быть в диапазоне [0, 1], получено {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Переводит буквенное обозначение колонки Excel в 0-based индекс
pub fn column_index(letter: &str) -> Result<u32> {
    let letter = letter.trim().to_uppercase();
    if letter.is_empty() || !letter.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(AddressCheckError::Config(format!(
            "Недопустимое обозначение колонки: '{}'",
            letter
        )));
    }

    let mut index: u32 = 0;
    for c in letter.chars() {
        index = index * 26 + (c as u32 - 'A' as u32 + 1);
    }
    Ok(index - 1)
}
