//! 자산 곡선(Equity Curve) 데이터 모듈
//!
//! 거래 순서에 따른 계좌 자산 변화를 추적합니다.
//!
//! # 주요 기능
//!
//! - 타임스탬프 순 자산 곡선 생성 (시작점 + 거래당 1개 포인트)
//! - 고점 대비 낙폭(Drawdown) 계산

use journal_core::{AccountSettings, DecimalExt, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 시작 포인트의 날짜 라벨.
pub const START_LABEL: &str = "Start";

/// 단일 자산 곡선 데이터 포인트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    /// 표시용 날짜 라벨 (예: "Jan 5", 시작점은 "Start")
    pub date: String,

    /// 자산 가치
    pub equity: Decimal,

    /// 거래 순번 (시작점 = 0)
    pub trade_index: usize,
}

/// 거래 목록으로 자산 곡선을 생성합니다.
///
/// 거래는 타임스탬프 오름차순으로 안정 정렬되므로 같은 시각의 거래는 입력 순서를
/// 유지합니다. 각 거래마다 `pnl`에 더해 계좌 설정의 거래당 수수료
/// (`commission + swap_fee`)를 차감합니다.
///
/// 결과 길이는 항상 `trades.len() + 1`입니다.
pub fn build_equity_curve(trades: &[Trade], settings: &AccountSettings) -> Vec<EquityPoint> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.timestamp);

    let mut points = Vec::with_capacity(trades.len() + 1);
    let mut running = settings.initial_capital;

    points.push(EquityPoint {
        date: START_LABEL.to_string(),
        equity: running,
        trade_index: 0,
    });

    let fee = settings.fee_per_trade();
    for (index, trade) in sorted.into_iter().enumerate() {
        running = running.add_or_saturate(trade.pnl.sub_or_saturate(fee));
        points.push(EquityPoint {
            date: trade.timestamp.format("%b %-d").to_string(),
            equity: running,
            trade_index: index + 1,
        });
    }

    points
}

/// 자산 곡선 분석
///
/// 생성된 포인트 위에서 고점, 낙폭, 총 수익률을 계산합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityCurve {
    /// 초기 자본
    initial_capital: Decimal,

    /// 데이터 포인트 (거래 순)
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// 거래 목록으로 자산 곡선을 생성합니다.
    pub fn from_trades(trades: &[Trade], settings: &AccountSettings) -> Self {
        Self::from_points(settings.initial_capital, build_equity_curve(trades, settings))
    }

    /// 이미 계산된 포인트로 자산 곡선을 생성합니다.
    pub fn from_points(initial_capital: Decimal, points: Vec<EquityPoint>) -> Self {
        Self {
            initial_capital,
            points,
        }
    }

    /// 초기 자본을 반환합니다.
    pub fn initial_capital(&self) -> Decimal {
        self.initial_capital
    }

    /// 모든 데이터 포인트를 반환합니다.
    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    /// 현재 자산 가치를 반환합니다.
    pub fn current_equity(&self) -> Decimal {
        self.points
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_capital)
    }

    /// 고점 자산 가치를 반환합니다.
    pub fn peak_equity(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.equity)
            .fold(self.initial_capital, Decimal::max)
    }

    /// 총 수익률을 반환합니다 (%).
    pub fn total_return(&self) -> Decimal {
        self.current_equity()
            .sub_or_saturate(self.initial_capital)
            .div_or_zero(self.initial_capital)
            .mul_or_saturate(dec!(100))
    }

    /// 포인트별 고점 대비 낙폭 시계열을 반환합니다 (%).
    ///
    /// 0 이상의 값 (0 = 고점, 양수 = 하락 중)
    pub fn drawdown_series(&self) -> Vec<(String, Decimal)> {
        let mut peak = self.initial_capital;

        self.points
            .iter()
            .map(|point| {
                if point.equity > peak {
                    peak = point.equity;
                }
                let drawdown = if peak > Decimal::ZERO {
                    peak.sub_or_saturate(point.equity)
                        .div_or_zero(peak)
                        .mul_or_saturate(dec!(100))
                } else {
                    Decimal::ZERO
                };
                (point.date.clone(), drawdown)
            })
            .collect()
    }

    /// 최대 낙폭을 반환합니다 (%).
    pub fn max_drawdown(&self) -> Decimal {
        self.drawdown_series()
            .into_iter()
            .map(|(_, dd)| dd)
            .fold(Decimal::ZERO, Decimal::max)
    }

    /// 현재 낙폭을 반환합니다 (%).
    pub fn current_drawdown(&self) -> Decimal {
        self.drawdown_series()
            .last()
            .map(|(_, dd)| *dd)
            .unwrap_or(Decimal::ZERO)
    }

    /// 데이터 포인트 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 데이터가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
