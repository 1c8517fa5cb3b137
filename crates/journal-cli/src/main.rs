//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 거래 기록 (날짜/시각 생략 시 현재 시각)
//! journal add -i EUR/USD -s buy --entry 1.2000 --exit 1.2100 -q 10000 --commission 5 --swap 1
//!
//! # 저장하지 않고 손익 미리보기
//! journal add -i AAPL -s sell --entry 180 --exit 175 -q 10 --preview
//!
//! # 하루 요약과 월 달력
//! journal day 2024-01-15
//! journal calendar --month 2024-01
//!
//! # 통계를 JSON으로
//! journal --json stats
//!
//! # 2% 리스크 기준 포지션 크기
//! journal risk --entry 1.2000 --stop 1.1950 --take-profit 1.2100
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use journal_cli::commands::{report, risk, settings, trade};
use journal_cli::OutputFormat;
use journal_core::{init_logging, parse_date, AppConfig, LogConfig};
use journal_store::{FileStorage, TradingStore};
use tracing::debug;

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal - 거래 기록과 성과 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (없어도 됨)
    #[arg(long, global = true, default_value = "config/journal.toml")]
    config: PathBuf,

    /// 데이터 디렉토리 (설정 파일보다 우선)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON으로 출력
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 거래 기록 추가
    Add(trade::AddTradeArgs),

    /// 거래 기록 수정
    Edit(trade::EditTradeArgs),

    /// 거래 기록 삭제
    Delete {
        /// 거래 ID
        id: String,
    },

    /// 거래 목록 보기
    List {
        /// 해당 날짜만 보기 (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// 하루 거래 요약
    Day {
        /// 날짜 (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// 월 거래 달력
    Calendar {
        /// 월 (YYYY-MM, 기본: 이번 달)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// 거래 통계
    Stats,

    /// 자산 곡선과 낙폭
    Equity,

    /// 월별 성과
    Monthly,

    /// 종목별 성과
    Instruments,

    /// 계좌 설정 보기/변경
    Settings(settings::SettingsArgs),

    /// 포지션 사이징 계산
    Risk(risk::RiskArgs),

    /// 목표 달성률
    Goals,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("설정 로드 실패: {}", cli.config.display()))?;
    init_logging(LogConfig::from(&config.logging))?;

    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    debug!(data_dir = %config.storage.data_dir.display(), "저장소 경로");

    let mut store =
        TradingStore::from_config(FileStorage::new(&config.storage.data_dir), &config);
    store.initialize();

    let format = OutputFormat::from_flag(cli.json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Add(args) => {
            trade::run_add(&mut store, &args, Utc::now(), &mut out, format)?;
        }
        Commands::Edit(args) => {
            trade::run_edit(&mut store, &args, &mut out, format)?;
        }
        Commands::Delete { id } => {
            trade::run_delete(&mut store, &id, &mut out, format)?;
        }
        Commands::List { date } => {
            trade::run_list(&store, date, &mut out, format)?;
        }
        Commands::Day { date } => {
            trade::run_day(&store, date, &mut out, format)?;
        }
        Commands::Calendar { month } => {
            let (year, month) = match month {
                Some(text) => report::parse_month(&text)?,
                None => {
                    let today = Utc::now().date_naive();
                    (today.year(), today.month())
                }
            };
            report::run_calendar(&store, year, month, &mut out, format)?;
        }
        Commands::Stats => report::run_stats(&store, &mut out, format)?,
        Commands::Equity => report::run_equity(&store, &mut out, format)?,
        Commands::Monthly => report::run_monthly(&store, &mut out, format)?,
        Commands::Instruments => report::run_instruments(&store, &mut out, format)?,
        Commands::Goals => report::run_goals(&store, &mut out, format)?,
        Commands::Settings(args) => {
            settings::run_settings(&mut store, &args, &mut out, format)?;
        }
        Commands::Risk(args) => {
            risk::run_risk(&store, &args, &mut out, format)?;
        }
    }

    out.flush()?;
    debug!("명령 완료");
    Ok(())
}
