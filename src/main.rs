use address_check_rust::matcher::index::ReferenceIndex;
use address_check_rust::matcher::types::{MatchResult, MatchStatus};
use address_check_rust::matcher::AddressMatcher;
use address_check_rust::parser::HtmlParser;
use address_check_rust::report::{self, TracingReporter};
use address_check_rust::{cli, excel, AddressCheckError, Config, Result};
use clap::Parser;
use cli::{Cli, Commands};
use indicatif::ProgressBar;

fn main() -> Result<()> {
    let cli = Cli::parse();
    report::init_logging(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;
    let reporter = TracingReporter;

    match cli.command {
        Commands::Check {
            html_dir,
            input,
            output,
        } => {
            let config = Config {
                html_dir: html_dir.unwrap_or(config.html_dir),
                input_excel: input.unwrap_or(config.input_excel),
                output_excel: output.unwrap_or(config.output_excel),
                ..config
            };

            println!("📫 address-check - сверка адресов\n");

            // 1. Справочная база из HTML
            println!("[1/4] Разбор HTML файлов...");
            let index = build_reference_index(&config, &reporter)?;
            println!(
                "✔ База данных загружена: {} поселений, {} офисов\n",
                index.settlement_count(),
                index.office_count()
            );

            // 2. Входной Excel
            println!("[2/4] Загрузка Excel файла...");
            let rows = excel::read_address_rows(&config.input_excel, &config, &reporter)?;
            println!("✔ К обработке: {} записей\n", rows.len());

            // 3. Сопоставление
            println!("[3/4] Сопоставление адресов...");
            let matcher = AddressMatcher::new(index, &config, &reporter);
            let progress = ProgressBar::new(rows.len() as u64);
            let results = matcher.match_rows_with_progress(&rows, &progress);
            progress.finish_and_clear();
            println!("✔ Сопоставление завершено. Обработано записей: {}\n", results.len());

            // 4. Сохранение
            println!("[4/4] Сохранение результатов...");
            excel::save_results(
                &config.input_excel,
                &config.output_excel,
                &results,
                &config,
                &reporter,
            )?;

            print_statistics(&results);

            println!("\n✅ Обработка завершена!");
            println!("📄 Результаты сохранены: {}", config.output_excel.display());
        }

        Commands::Scan { html_dir } => {
            let config = Config {
                html_dir: html_dir.unwrap_or(config.html_dir),
                ..config
            };

            println!("📫 address-check - просмотр базы\n");
            let index = build_reference_index(&config, &reporter)?;

            println!("📊 База данных QazPost:");
            println!("  Поселений: {}", index.settlement_count());
            println!("  Офисов: {}", index.office_count());
        }
    }

    Ok(())
}

/// Разбирает HTML страницы и строит индекс отделений
fn build_reference_index(config: &Config, reporter: &TracingReporter) -> Result<ReferenceIndex> {
    let html_parser = HtmlParser::new(config, reporter)?;
    let offices = html_parser.parse_html_dir(&config.html_dir)?;

    if offices.is_empty() {
        return Err(AddressCheckError::NoReferenceData(
            config.html_dir.display().to_string(),
        ));
    }

    Ok(ReferenceIndex::build(offices))
}

/// Печатает статистику результатов по статусам
fn print_statistics(results: &[MatchResult]) {
    if results.is_empty() {
        println!("Нет данных для статистики");
        return;
    }

    let statuses = [
        (MatchStatus::Confirmed, "✅"),
        (MatchStatus::NeedsReview, "⚠️"),
        (MatchStatus::NotFound, "❌"),
    ];

    println!("\n{}", "=".repeat(50));
    println!("📊 СТАТИСТИКА РЕЗУЛЬТАТОВ");
    println!("{}", "=".repeat(50));

    let total = results.len();
    for (status, emoji) in statuses {
        let count = results.iter().filter(|r| r.status == status).count();
        let percentage = count as f64 / total as f64 * 100.0;
        println!("{} {}: {} ({:.1}%)", emoji, status, count, percentage);
    }

    println!("{}", "-".repeat(50));
    println!("📋 Всего обработано: {} записей", total);
}
