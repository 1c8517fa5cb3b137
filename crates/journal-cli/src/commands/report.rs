//! 성과 보고 명령 (통계, 자산 곡선, 월별/종목별 성과, 달력, 목표).

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use journal_analytics::{default_goals, EquityCurve};
use journal_core::{DecimalExt, JournalError, JournalResult};
use journal_store::{KeyValueStore, TradingStore};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::output::{money, pct, signed_money, trend_icon, write_json, OutputFormat};

/// `YYYY-MM` 형식의 월을 파싱합니다.
pub fn parse_month(text: &str) -> JournalResult<(i32, u32)> {
    let parsed = NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d")
        .map_err(|_| JournalError::InvalidInput(format!("잘못된 월 형식 (YYYY-MM): {}", text)))?;
    Ok((parsed.year(), parsed.month()))
}

/// 요약 통계를 출력합니다.
pub fn run_stats<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let stats = &store.snapshot().statistics;

    match format {
        OutputFormat::Json => write_json(out, stats)?,
        OutputFormat::Table => {
            writeln!(out, "📊 거래 통계")?;
            writeln!(out, "{}", "=".repeat(40))?;
            writeln!(out, "  총 거래:        {}", stats.total_trades)?;
            writeln!(
                out,
                "  승 / 패 / 무:   {} / {} / {}",
                stats.winning_trades,
                stats.losing_trades,
                stats.breakeven_trades()
            )?;
            writeln!(out, "  승률:           {}", pct(stats.win_rate))?;
            writeln!(out, "  Profit Factor:  {}", stats.profit_factor)?;
            writeln!(out, "  손익비:         {}", stats.risk_reward_ratio)?;
            writeln!(out, "  평균 수익:      {}", money(stats.avg_win))?;
            writeln!(out, "  평균 손실:      {}", money(stats.avg_loss))?;
            writeln!(out, "  총 수익:        {}", money(stats.total_profit))?;
            writeln!(out, "  총 손실:        {}", money(stats.total_loss))?;
            writeln!(out, "{}", "-".repeat(40))?;
            writeln!(out, "  초기 자본:      {}", money(stats.initial_equity))?;
            writeln!(out, "  현재 자산:      {}", money(stats.current_equity))?;
            writeln!(
                out,
                "  총 수익률:      {} {}",
                trend_icon(stats.total_return),
                pct(stats.total_return)
            )?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EquityReport<'a> {
    points: &'a [journal_analytics::EquityPoint],
    peak_equity: Decimal,
    max_drawdown: Decimal,
    current_drawdown: Decimal,
}

/// 자산 곡선과 낙폭을 출력합니다.
pub fn run_equity<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let state = store.snapshot();
    let curve = EquityCurve::from_points(state.settings.initial_capital, state.equity_data.clone());

    match format {
        OutputFormat::Json => write_json(
            out,
            &EquityReport {
                points: curve.points(),
                peak_equity: curve.peak_equity(),
                max_drawdown: curve.max_drawdown().round_half_up(2),
                current_drawdown: curve.current_drawdown().round_half_up(2),
            },
        )?,
        OutputFormat::Table => {
            writeln!(out, "📈 자산 곡선")?;
            writeln!(out, "{:>5}  {:<8}  {:>14}  {:>8}", "#", "날짜", "자산", "낙폭")?;
            for (point, (_, drawdown)) in curve.points().iter().zip(curve.drawdown_series()) {
                writeln!(
                    out,
                    "{:>5}  {:<8}  {:>14}  {:>8}",
                    point.trade_index,
                    point.date,
                    money(point.equity),
                    pct(drawdown)
                )?;
            }
            writeln!(out, "{}", "-".repeat(40))?;
            writeln!(out, "  최고 자산: {}", money(curve.peak_equity()))?;
            writeln!(out, "  최대 낙폭: {}", pct(curve.max_drawdown()))?;
            writeln!(out, "  현재 낙폭: {}", pct(curve.current_drawdown()))?;
        }
    }
    Ok(())
}

/// 월별 성과를 출력합니다.
pub fn run_monthly<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let monthly = &store.snapshot().monthly_performance;

    match format {
        OutputFormat::Json => write_json(out, monthly)?,
        OutputFormat::Table => {
            if monthly.is_empty() {
                writeln!(out, "월별 성과 데이터가 없습니다")?;
                return Ok(());
            }
            writeln!(
                out,
                "{:<10}  {:>6}  {:>12}  {:>12}  {:>12}",
                "월", "거래", "수익", "손실", "순손익"
            )?;
            for month in monthly {
                writeln!(
                    out,
                    "{:<10}  {:>6}  {:>12}  {:>12}  {:>12}",
                    month.label,
                    month.trade_count,
                    money(month.profit),
                    money(month.loss),
                    signed_money(month.net)
                )?;
            }
        }
    }
    Ok(())
}

/// 종목별 성과를 출력합니다 (손익 내림차순).
pub fn run_instruments<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let instruments = &store.snapshot().instrument_performance;

    match format {
        OutputFormat::Json => write_json(out, instruments)?,
        OutputFormat::Table => {
            if instruments.is_empty() {
                writeln!(out, "종목별 성과 데이터가 없습니다")?;
                return Ok(());
            }
            writeln!(
                out,
                "{:<12}  {:>6}  {:>12}  {:>8}  {:>14}",
                "종목", "거래", "손익", "승률", "거래량"
            )?;
            for item in instruments {
                writeln!(
                    out,
                    "{:<12}  {:>6}  {:>12}  {:>8}  {:>14}",
                    item.instrument,
                    item.trade_count,
                    signed_money(item.pnl),
                    pct(item.win_rate),
                    item.total_volume.round_dp(2)
                )?;
            }
        }
    }
    Ok(())
}

/// 월 달력을 출력합니다.
pub fn run_calendar<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    year: i32,
    month: u32,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let calendar = store.calendar_month(year, month)?;

    match format {
        OutputFormat::Json => write_json(out, &calendar)?,
        OutputFormat::Table => {
            writeln!(out, "📅 {}", calendar.title())?;
            writeln!(out, " Sun  Mon  Tue  Wed  Thu  Fri  Sat")?;

            let mut cells: Vec<String> = (0..calendar.leading_blank_days)
                .map(|_| "    ".to_string())
                .collect();
            cells.extend(calendar.days.iter().map(|day| {
                let marker = match &day.data {
                    None => ' ',
                    Some(_) if day.is_profit() => '+',
                    Some(_) => '-',
                };
                format!("{:>3}{}", day.day, marker)
            }));

            for week in cells.chunks(7) {
                writeln!(out, "{}", week.join(" "))?;
            }

            writeln!(out)?;
            writeln!(
                out,
                "거래일 {}일  월 손익 {}",
                calendar.trading_days(),
                signed_money(calendar.total_pnl())
            )?;
            for day in calendar.days.iter().filter(|d| d.has_trades()) {
                if let Some(data) = &day.data {
                    writeln!(
                        out,
                        "  {} {}  {}건  {}  {}",
                        trend_icon(data.total_percentage),
                        day.date,
                        data.trades.len(),
                        signed_money(data.total_pnl),
                        pct(data.total_percentage)
                    )?;
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalProgress {
    #[serde(flatten)]
    goal: journal_analytics::Goal,
    progress: Decimal,
    achieved: bool,
}

/// 기본 목표와 달성률을 출력합니다.
pub fn run_goals<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let stats = &store.snapshot().statistics;
    let goals: Vec<GoalProgress> = default_goals()
        .into_iter()
        .map(|goal| GoalProgress {
            progress: goal.progress(stats).round_half_up(2),
            achieved: goal.is_achieved(stats),
            goal,
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &goals)?,
        OutputFormat::Table => {
            writeln!(out, "🎯 목표")?;
            for item in &goals {
                let icon = if item.achieved { "✅" } else { "⏳" };
                writeln!(
                    out,
                    "  {} [{}] {} (목표 {})  {}",
                    icon,
                    item.goal.kind,
                    item.goal.description,
                    item.goal.target,
                    pct(item.progress)
                )?;
            }
        }
    }
    Ok(())
}
