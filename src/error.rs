use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressCheckError {
    #[error("Ошибка конфигурации: {0}")]
    Config(String),

    #[error("Файл не найден: {0}. Убедитесь, что файл находится в папке tables/")]
    FileNotFound(String),

    #[error("Файл {0} открыт в другом приложении. Закройте Excel и повторите попытку")]
    FileLocked(String),

    #[error("Не найдено данных в HTML файлах. Проверьте папку {0}")]
    NoReferenceData(String),

    #[error("Ошибка при загрузке Excel файла: {0}")]
    ExcelLoad(String),

    #[error("Ошибка при сохранении результатов: {0}")]
    ExcelSave(#[from] rust_xlsxwriter::XlsxError),

    #[error("Ошибка JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AddressCheckError>;
