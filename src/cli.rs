use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "address-check")]
#[command(about = "Сверка адресов из Excel с базой отделений QazPost", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Подробный лог (debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON файл конфигурации
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Полная проверка: HTML → Excel → сопоставление → результаты
    Check {
        /// Папка с сохранёнными HTML страницами QazPost
        #[arg(long)]
        html_dir: Option<PathBuf>,

        /// Входной Excel файл с адресами
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Выходной Excel файл с результатами
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Только разбор HTML страниц и статистика базы
    Scan {
        /// Папка с сохранёнными HTML страницами QazPost
        #[arg(long)]
        html_dir: Option<PathBuf>,
    },
}
