//! Чтение адресов из Excel и запись результатов
//!
//! Чтение через calamine, запись через rust_xlsxwriter: исходный лист
//! копируется в новый файл, результаты дописываются в отдельные
//! колонки.

use crate::config::{column_index, Config};
use crate::error::{AddressCheckError, Result};
use crate::matcher::types::{InputAddressRow, MatchResult};
use crate::report::Reporter;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Проверяет доступность входного файла до начала обработки
///
/// Отсутствующий или занятый другим приложением файл — фатальная
/// ошибка: лучше прервать запуск, чем выдать неполный результат.
pub fn check_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AddressCheckError::FileNotFound(path.display().to_string()));
    }

    match std::fs::OpenOptions::new().read(true).write(true).open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(AddressCheckError::FileLocked(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Читает адресные строки из Excel файла
///
/// Возвращает только строки с непустым населённым пунктом; остальные
/// пропускаются и результата не получают.
pub fn read_address_rows(
    path: &Path,
    config: &Config,
    reporter: &dyn Reporter,
) -> Result<Vec<InputAddressRow>> {
    check_input_file(path)?;
    reporter.info(&format!("Загружаем файл: {}", path.display()));

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| AddressCheckError::ExcelLoad(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AddressCheckError::ExcelLoad("в книге нет листов".into()))?
        .map_err(|e| AddressCheckError::ExcelLoad(e.to_string()))?;

    let settlement_col = column_index(&config.settlement_col)?;
    let street_col = column_index(&config.street_col)?;
    let house_col = column_index(&config.house_col)?;

    let max_row = range.end().map(|(r, _)| r).unwrap_or(0);

    let mut rows = Vec::new();
    for row_idx in config.excel_start_row..=max_row {
        let settlement = cell_text(&range, row_idx, settlement_col);
        let street = cell_text(&range, row_idx, street_col);
        let house = cell_text(&range, row_idx, house_col);

        if settlement.is_empty() && street.is_empty() && house.is_empty() {
            continue;
        }

        // Без населённого пункта сопоставлять нечего
        if settlement.is_empty() {
            continue;
        }

        rows.push(InputAddressRow {
            row_num: row_idx + 1,
            settlement,
            street,
            house,
        });
    }

    reporter.info(&format!("Файл загружен успешно. Строк для обработки: {}", rows.len()));
    Ok(rows)
}

/// Сохраняет результаты проверки
///
/// Исходный лист копируется в выходной файл, статусы и детали
/// записываются в настроенные колонки.
pub fn save_results(
    input_path: &Path,
    output_path: &Path,
    results: &[MatchResult],
    config: &Config,
    reporter: &dyn Reporter,
) -> Result<()> {
    create_backup(input_path, config, reporter);

    let mut source: Xlsx<_> = open_workbook(input_path)
        .map_err(|e: calamine::XlsxError| AddressCheckError::ExcelLoad(e.to_string()))?;
    let range = source
        .worksheet_range_at(0)
        .ok_or_else(|| AddressCheckError::ExcelLoad("в книге нет листов".into()))?
        .map_err(|e| AddressCheckError::ExcelLoad(e.to_string()))?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if let (Some((start_row, start_col)), Some((end_row, end_col))) = (range.start(), range.end())
    {
        for row in start_row..=end_row {
            for col in start_col..=end_col {
                match range.get_value((row, col)) {
                    Some(Data::String(s)) => {
                        worksheet.write_string(row, col as u16, s)?;
                    }
                    Some(Data::Float(f)) => {
                        worksheet.write_number(row, col as u16, *f)?;
                    }
                    Some(Data::Int(i)) => {
                        worksheet.write_number(row, col as u16, *i as f64)?;
                    }
                    Some(Data::Bool(b)) => {
                        worksheet.write_boolean(row, col as u16, *b)?;
                    }
                    Some(Data::DateTime(dt)) => {
                        worksheet.write_number(row, col as u16, dt.as_f64())?;
                    }
                    _ => {}
                }
            }
        }
    }

    let result_col = column_index(&config.result_col)? as u16;
    let details_col = column_index(&config.details_col)? as u16;

    for result in results {
        let row = result.row_num - 1;
        worksheet.write_string(row, result_col, result.status.to_string())?;
        worksheet.write_string(row, details_col, &result.details)?;
    }

    workbook.save(output_path)?;
    reporter.info(&format!("Результаты сохранены: {}", output_path.display()));
    Ok(())
}

/// Создаёт резервную копию входного файла
///
/// Неудача копирования — предупреждение, а не ошибка запуска.
fn create_backup(input_path: &Path, config: &Config, reporter: &dyn Reporter) {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let backup_name = format!("addresses_backup_{}.xlsx", timestamp);
    let backup_path = config.backup_dir.join(backup_name);

    let copy = std::fs::create_dir_all(&config.backup_dir)
        .and_then(|_| std::fs::copy(input_path, &backup_path));

    match copy {
        Ok(_) => reporter.info(&format!("Создана резервная копия: {}", backup_path.display())),
        Err(e) => reporter.warn(&format!("Не удалось создать резервную копию: {}", e)),
    }
}

/// Содержимое ячейки как обрезанная строка
///
/// Числовые ячейки без дробной части печатаются без «.0».
fn cell_text(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(d @ Data::DateTime(_)) => d.to_string(),
        _ => String::new(),
    }
}
