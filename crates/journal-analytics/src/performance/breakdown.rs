//! 월별 / 종목별 성과 집계.
//!
//! 매 호출마다 전체 거래 목록을 다시 집계합니다 (O(n)). 수수료나 초기 자본과
//! 무관하므로 계좌 설정 변경 시에는 다시 계산할 필요가 없습니다.

use chrono::{Datelike, NaiveDate};
use journal_core::{DecimalExt, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 월별 성과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPerformance {
    /// 연도
    pub year: i32,
    /// 월 (1-12)
    pub month: u32,
    /// 표시용 라벨 (예: "Jan 2024")
    pub label: String,
    /// 수익 합계 (양수 손익만)
    pub profit: Decimal,
    /// 손실 합계 (0 이하 손익, 음수로 유지)
    pub loss: Decimal,
    /// 순손익
    pub net: Decimal,
    /// 거래 횟수
    pub trade_count: usize,
}

/// 종목별 성과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPerformance {
    /// 종목
    pub instrument: String,
    /// 거래 횟수
    pub trade_count: usize,
    /// 순손익 합계
    pub pnl: Decimal,
    /// 종목 내 승률 (%)
    pub win_rate: Decimal,
    /// 총 거래량 (진입 명목가치 합계)
    pub total_volume: Decimal,
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// 거래를 타임스탬프 기준 연/월로 묶어 집계합니다.
///
/// 결과는 달력 순서(오름차순)로 정렬됩니다.
pub fn monthly_performance(trades: &[Trade]) -> Vec<MonthlyPerformance> {
    let mut grouped: BTreeMap<(i32, u32), MonthlyPerformance> = BTreeMap::new();

    for trade in trades {
        let key = (trade.timestamp.year(), trade.timestamp.month());
        let entry = grouped.entry(key).or_insert_with(|| MonthlyPerformance {
            year: key.0,
            month: key.1,
            label: month_label(key.0, key.1),
            profit: Decimal::ZERO,
            loss: Decimal::ZERO,
            net: Decimal::ZERO,
            trade_count: 0,
        });

        entry.trade_count += 1;
        if trade.pnl > Decimal::ZERO {
            entry.profit = entry.profit.add_or_saturate(trade.pnl);
        } else {
            entry.loss = entry.loss.add_or_saturate(trade.pnl);
        }
        entry.net = entry.net.add_or_saturate(trade.pnl);
    }

    grouped.into_values().collect()
}

/// 거래를 종목별로 묶어 집계합니다.
///
/// 결과는 순손익 내림차순, 같으면 종목명 순으로 정렬됩니다.
pub fn instrument_performance(trades: &[Trade]) -> Vec<InstrumentPerformance> {
    #[derive(Default)]
    struct Acc {
        trade_count: usize,
        wins: usize,
        pnl: Decimal,
        volume: Decimal,
    }

    let mut grouped: BTreeMap<&str, Acc> = BTreeMap::new();
    for trade in trades {
        let acc = grouped.entry(trade.instrument()).or_default();
        acc.trade_count += 1;
        acc.pnl = acc.pnl.add_or_saturate(trade.pnl);
        acc.volume = acc.volume.add_or_saturate(trade.volume());
        if trade.is_win() {
            acc.wins += 1;
        }
    }

    let mut result: Vec<InstrumentPerformance> = grouped
        .into_iter()
        .map(|(instrument, acc)| InstrumentPerformance {
            instrument: instrument.to_string(),
            trade_count: acc.trade_count,
            pnl: acc.pnl,
            win_rate: Decimal::from(acc.wins) / Decimal::from(acc.trade_count) * dec!(100),
            total_volume: acc.volume,
        })
        .collect();

    result.sort_by(|a, b| b.pnl.cmp(&a.pnl));
    result
}
