//! Извлечение отделений из сохранённых HTML страниц QazPost

pub mod address;

use crate::config::Config;
use crate::error::{AddressCheckError, Result};
use crate::matcher::types::OfficeRecord;
use crate::report::Reporter;
use scraper::{Html, Selector};
use std::path::Path;
use walkdir::WalkDir;

/// Парсер сохранённых страниц QazPost
pub struct HtmlParser<'a> {
    container_selector: Selector,
    address_selector: Selector,
    reporter: &'a dyn Reporter,
}

impl<'a> HtmlParser<'a> {
    pub fn new(config: &Config, reporter: &'a dyn Reporter) -> Result<Self> {
        let container_selector = Selector::parse(&format!("div.{}", config.office_container_class))
            .map_err(|e| AddressCheckError::Config(format!("Селектор контейнера: {}", e)))?;
        let address_selector = Selector::parse(&format!("div.{}", config.address_block_class))
            .map_err(|e| AddressCheckError::Config(format!("Селектор адреса: {}", e)))?;

        Ok(Self {
            container_selector,
            address_selector,
            reporter,
        })
    }

    /// Разбирает все HTML файлы в папке (без рекурсии)
    ///
    /// Ошибка в одном файле пишется в лог и не прерывает обход
    /// остальных.
    pub fn parse_html_dir(&self, html_dir: &Path) -> Result<Vec<OfficeRecord>> {
        if !html_dir.exists() {
            return Err(AddressCheckError::NoReferenceData(
                html_dir.display().to_string(),
            ));
        }

        let mut html_files: Vec<_> = WalkDir::new(html_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path().is_file()
                    && e.path()
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
            })
            .collect();
        html_files.sort_by_key(|e| e.path().to_path_buf());

        if html_files.is_empty() {
            self.reporter.warn(&format!(
                "HTML файлы не найдены в папке {}",
                html_dir.display()
            ));
            return Ok(Vec::new());
        }

        self.reporter
            .info(&format!("Найдено HTML файлов: {}", html_files.len()));

        let mut offices = Vec::new();
        for entry in html_files {
            let path = entry.path();
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let file_offices = self.parse_html_content(&content);
                    self.reporter.info(&format!(
                        "Файл {}: извлечено {} офисов",
                        path.file_name().unwrap_or_default().to_string_lossy(),
                        file_offices.len()
                    ));
                    offices.extend(file_offices);
                }
                Err(e) => {
                    self.reporter
                        .error(&format!("Ошибка при чтении {}: {}", path.display(), e));
                }
            }
        }

        self.reporter
            .info(&format!("Всего извлечено офисов: {}", offices.len()));

        Ok(offices)
    }

    /// Извлекает отделения из одной HTML страницы
    pub fn parse_html_content(&self, content: &str) -> Vec<OfficeRecord> {
        let document = Html::parse_document(content);
        let mut offices = Vec::new();

        for container in document.select(&self.container_selector) {
            let Some(block) = container.select(&self.address_selector).next() else {
                continue;
            };

            let address_text = block.text().collect::<Vec<_>>().join(" ");
            let address_text = address_text.trim();
            if address_text.is_empty() {
                continue;
            }

            match address::parse_address(address_text) {
                Some(parsed) => offices.push(OfficeRecord {
                    full_address: address_text.to_string(),
                    settlement: parsed.settlement,
                    street: parsed.street,
                    house: parsed.house,
                }),
                None => {
                    self.reporter
                        .debug(&format!("Не удалось распарсить адрес: {}", address_text));
                }
            }
        }

        offices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;

    const SAMPLE_PAGE: &str = r#"
        <html><body>
            <div class="DdeCNNHT">
                <div class="_3w4rWaD9">г. Алматы, ул. Абая, д. 150</div>
            </div>
            <div class="DdeCNNHT">
                <div class="_3w4rWaD9">Астана, пр. Кунаева, 12</div>
            </div>
            <div class="DdeCNNHT">
                <div class="_3w4rWaD9">мусор без адреса</div>
            </div>
            <div class="DdeCNNHT">
                <div class="other">нет адресного блока</div>
            </div>
        </body></html>
    "#;

    fn parser(reporter: &NullReporter) -> HtmlParser<'_> {
        HtmlParser::new(&Config::default(), reporter).unwrap()
    }

    #[test]
    fn test_parse_html_content() {
        let reporter = NullReporter;
        let offices = parser(&reporter).parse_html_content(SAMPLE_PAGE);

        // Мусорный блок и контейнер без адреса пропущены
        assert_eq!(offices.len(), 2);
        assert_eq!(offices[0].settlement, "Алматы");
        assert_eq!(offices[0].street, "ул. Абая");
        assert_eq!(offices[0].house, "150");
        assert_eq!(offices[1].settlement, "Астана");
    }

    #[test]
    fn test_full_address_preserved() {
        let reporter = NullReporter;
        let offices = parser(&reporter).parse_html_content(SAMPLE_PAGE);
        assert_eq!(offices[0].full_address, "г. Алматы, ул. Абая, д. 150");
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let reporter = NullReporter;
        let result = parser(&reporter).parse_html_dir(Path::new("/nonexistent/regions_html"));
        assert!(matches!(result, Err(AddressCheckError::NoReferenceData(_))));
    }
}
