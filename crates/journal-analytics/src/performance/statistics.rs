//! 요약 통계 계산.
//!
//! 승률, Profit Factor, 평균 손익 등 매매일지 전체 성과를 요약합니다.

use journal_core::{AccountSettings, DecimalExt, Ratio, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 거래 통계 스냅샷.
///
/// 거래 목록과 계좌 설정에서 완전히 파생되며 독립적인 생명주기가 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// 초기 자본 대비 수익률 (%)
    pub total_return: Decimal,
    /// 승률 (백분율, 예: 65.5 = 65.5%)
    pub win_rate: Decimal,
    /// 총 거래 횟수 (손익 0 거래 포함)
    pub total_trades: usize,
    /// Profit Factor (총수익 / 총손실)
    pub profit_factor: Ratio,
    /// 평균 수익 (수익 거래만)
    pub avg_win: Decimal,
    /// 평균 손실 (손실 거래만, 양수)
    pub avg_loss: Decimal,
    /// 손익비 (평균수익 / 평균손실)
    pub risk_reward_ratio: Ratio,
    /// 총 수익 (수익 거래만)
    pub total_profit: Decimal,
    /// 총 손실 (손실 거래만, 양수)
    pub total_loss: Decimal,
    /// 수익 거래 횟수
    pub winning_trades: usize,
    /// 손실 거래 횟수
    pub losing_trades: usize,
    /// 현재 자산
    pub current_equity: Decimal,
    /// 초기 자산
    pub initial_equity: Decimal,
}

impl Statistics {
    /// 거래가 없을 때의 통계.
    pub fn empty(settings: &AccountSettings) -> Self {
        Self {
            total_return: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            total_trades: 0,
            profit_factor: Ratio::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            risk_reward_ratio: Ratio::ZERO,
            total_profit: Decimal::ZERO,
            total_loss: Decimal::ZERO,
            winning_trades: 0,
            losing_trades: 0,
            current_equity: settings.initial_capital,
            initial_equity: settings.initial_capital,
        }
    }

    /// 순손익 (총수익 - 총손실, 전역 수수료 제외).
    pub fn net_profit(&self) -> Decimal {
        self.total_profit.sub_or_saturate(self.total_loss)
    }

    /// 손익 0 거래 횟수.
    pub fn breakeven_trades(&self) -> usize {
        self.total_trades - self.winning_trades - self.losing_trades
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::empty(&AccountSettings::default())
    }
}

/// 거래 목록으로부터 통계를 계산합니다.
///
/// 계좌 설정의 거래당 수수료(`commission + swap_fee`)는 각 거래의 `pnl`에
/// 이미 반영된 거래 수수료와 별개로 거래 수만큼 한 번 더 차감됩니다.
pub fn calculate_statistics(trades: &[Trade], settings: &AccountSettings) -> Statistics {
    if trades.is_empty() {
        return Statistics::empty(settings);
    }

    let mut total_profit = Decimal::ZERO;
    let mut total_loss = Decimal::ZERO;
    let mut winning_trades = 0usize;
    let mut losing_trades = 0usize;

    for trade in trades {
        // 손익 0 거래는 어느 쪽에도 포함되지 않음
        if trade.is_win() {
            winning_trades += 1;
            total_profit = total_profit.add_or_saturate(trade.pnl);
        } else if trade.is_loss() {
            losing_trades += 1;
            total_loss = total_loss.add_or_saturate(trade.pnl);
        }
    }
    let total_loss = total_loss.abs();

    let total_trades = trades.len();
    let total_fees = Decimal::from(total_trades).mul_or_saturate(settings.fee_per_trade());

    let initial_capital = settings.initial_capital;
    let current_equity = initial_capital
        .add_or_saturate(total_profit)
        .sub_or_saturate(total_loss)
        .sub_or_saturate(total_fees);
    // 초기 자본이 0이면 0
    let total_return = current_equity
        .sub_or_saturate(initial_capital)
        .div_or_zero(initial_capital)
        .mul_or_saturate(dec!(100));

    let win_rate = Decimal::from(winning_trades).div_or_zero(Decimal::from(total_trades)) * dec!(100);

    // 해당 거래가 없으면 0
    let avg_win = total_profit.div_or_zero(Decimal::from(winning_trades));
    let avg_loss = total_loss.div_or_zero(Decimal::from(losing_trades));

    debug!(
        total_trades,
        winning_trades,
        losing_trades,
        %current_equity,
        "통계 재계산"
    );

    Statistics {
        total_return,
        win_rate,
        total_trades,
        profit_factor: Ratio::of(total_profit, total_loss),
        avg_win,
        avg_loss,
        risk_reward_ratio: Ratio::of(avg_win, avg_loss),
        total_profit,
        total_loss,
        winning_trades,
        losing_trades,
        current_equity,
        initial_equity: initial_capital,
    }
}
