//! Сверка адресов из Excel с базой отделений QazPost
//!
//! Ядро — сопоставление адресов: нормализация текста, нечёткое
//! сходство строк, индекс отделений по поселениям и взвешенная
//! классификация Да / Проверить / Нет.

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod matcher;
pub mod normalizer;
pub mod parser;
pub mod report;

pub use config::Config;
pub use error::{AddressCheckError, Result};
pub use matcher::index::ReferenceIndex;
pub use matcher::types::{InputAddressRow, MatchResult, MatchStatus, OfficeRecord};
pub use matcher::AddressMatcher;
