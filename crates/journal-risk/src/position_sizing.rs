//! 포지션 크기 및 손익비 계산.
//!
//! 제공 기능:
//! - 계좌 잔고와 리스크 비율 기반 허용 손실 금액 계산
//! - 손절 거리 기반 포지션 크기 계산 (고정 비율)
//! - Take-profit 기반 보상 금액과 손익비 계산
//! - 과거 승률/평균 손익 기반 Half-Kelly 리스크 비율 제안

use journal_core::{DecimalExt, JournalError, JournalResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 기본 계좌 잔고.
pub const DEFAULT_ACCOUNT_BALANCE: Decimal = dec!(10000);

/// 기본 거래당 리스크 비율 (%).
pub const DEFAULT_RISK_PERCENTAGE: Decimal = dec!(2);

/// Kelly 제안 리스크 비율 상한 (%).
pub const MAX_KELLY_RISK_PERCENTAGE: Decimal = dec!(5);

/// 리스크 계산 입력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskInput {
    /// 계좌 잔고
    pub account_balance: Decimal,
    /// 거래당 리스크 비율 (%, 예: 2 = 2%)
    pub risk_percentage: Decimal,
    /// 진입 가격
    pub entry_price: Decimal,
    /// 손절 가격
    pub stop_loss: Decimal,
    /// 익절 가격 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
}

impl Default for RiskInput {
    fn default() -> Self {
        Self {
            account_balance: DEFAULT_ACCOUNT_BALANCE,
            risk_percentage: DEFAULT_RISK_PERCENTAGE,
            entry_price: Decimal::ZERO,
            stop_loss: Decimal::ZERO,
            take_profit: None,
        }
    }
}

impl RiskInput {
    /// 새 입력을 생성합니다.
    pub fn new(
        account_balance: Decimal,
        risk_percentage: Decimal,
        entry_price: Decimal,
        stop_loss: Decimal,
    ) -> Self {
        Self {
            account_balance,
            risk_percentage,
            entry_price,
            stop_loss,
            take_profit: None,
        }
    }

    /// 익절 가격을 설정합니다.
    pub fn with_take_profit(mut self, take_profit: Decimal) -> Self {
        self.take_profit = Some(take_profit);
        self
    }

    /// 입력 값이 음수가 아닌지 검증합니다.
    pub fn validate(&self) -> JournalResult<()> {
        let mut errors = Vec::new();

        if self.account_balance < Decimal::ZERO {
            errors.push("계좌 잔고는 0 이상이어야 합니다");
        }
        if self.risk_percentage < Decimal::ZERO || self.risk_percentage > dec!(100) {
            errors.push("리스크 비율은 0에서 100 사이여야 합니다");
        }
        if self.entry_price < Decimal::ZERO {
            errors.push("진입 가격은 0 이상이어야 합니다");
        }
        if self.stop_loss < Decimal::ZERO {
            errors.push("손절 가격은 0 이상이어야 합니다");
        }
        if self.take_profit.is_some_and(|tp| tp < Decimal::ZERO) {
            errors.push("익절 가격은 0 이상이어야 합니다");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(JournalError::InvalidInput(errors.join(", ")))
        }
    }
}

/// 리스크 계산 결과.
///
/// 필수 입력 중 하나라도 0이면 모든 값이 0입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalculation {
    /// 권장 포지션 수량
    pub position_size: Decimal,
    /// 허용 손실 금액
    pub risk_amount: Decimal,
    /// 익절 시 보상 금액
    pub reward_amount: Decimal,
    /// 손익비 (보상 / 리스크)
    pub risk_reward_ratio: Decimal,
}

impl RiskCalculation {
    /// 진입 가격 기준 포지션 명목 가치.
    pub fn notional_value(&self, entry_price: Decimal) -> Decimal {
        self.position_size.mul_or_saturate(entry_price)
    }
}

/// 리스크 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskCalculator;

impl RiskCalculator {
    /// 고정 비율 방법으로 포지션 크기와 손익비를 계산합니다.
    ///
    /// # 인자
    /// * `input` - 계좌 잔고, 리스크 비율, 진입/손절/익절 가격
    ///
    /// # 반환값
    /// 잔고, 리스크 비율, 진입가, 손절가가 모두 0이 아닐 때만 값이 채워진 결과
    pub fn calculate(input: &RiskInput) -> RiskCalculation {
        if input.account_balance.is_zero()
            || input.risk_percentage.is_zero()
            || input.entry_price.is_zero()
            || input.stop_loss.is_zero()
        {
            return RiskCalculation::default();
        }

        let risk_amount = input
            .account_balance
            .mul_or_saturate(input.risk_percentage)
            .div_or_zero(dec!(100));
        let price_distance = input.entry_price.sub_or_saturate(input.stop_loss).abs();

        // 손절가가 진입가와 같으면 0, 거리가 극히 작으면 포화
        let position_size = risk_amount.div_or_zero(price_distance);

        let mut result = RiskCalculation {
            position_size,
            risk_amount,
            ..RiskCalculation::default()
        };

        if let Some(take_profit) = input.take_profit.filter(|tp| !tp.is_zero()) {
            let reward_distance = take_profit.sub_or_saturate(input.entry_price).abs();
            result.reward_amount = reward_distance.mul_or_saturate(position_size);
            result.risk_reward_ratio = if risk_amount > Decimal::ZERO {
                result.reward_amount.div_or_zero(risk_amount)
            } else {
                Decimal::ZERO
            };
        }

        debug!(
            position_size = %result.position_size,
            risk_amount = %result.risk_amount,
            risk_reward_ratio = %result.risk_reward_ratio,
            "리스크 계산"
        );

        result
    }

    /// Half-Kelly 기준 거래당 리스크 비율을 제안합니다 (%).
    ///
    /// # 인자
    /// * `win_rate` - 과거 승률 (%, 0에서 100)
    /// * `avg_win` - 평균 수익 거래 금액
    /// * `avg_loss` - 평균 손실 거래 금액 (양수)
    ///
    /// # 반환값
    /// [`MAX_KELLY_RISK_PERCENTAGE`]로 제한된 리스크 비율, 기대값이 음수이면 0
    pub fn kelly_risk_percentage(win_rate: Decimal, avg_win: Decimal, avg_loss: Decimal) -> Decimal {
        let win = win_rate / dec!(100);
        if avg_loss <= Decimal::ZERO
            || avg_win <= Decimal::ZERO
            || win <= Decimal::ZERO
            || win >= Decimal::ONE
        {
            return Decimal::ZERO;
        }

        // Kelly 공식: f = W - (1-W)/R, 여기서 W = 승률, R = 승/패 비율
        let win_loss_ratio = avg_win.div_or_zero(avg_loss);
        if win_loss_ratio.is_zero() {
            return Decimal::ZERO;
        }
        let kelly = win - (Decimal::ONE - win).div_or_zero(win_loss_ratio);

        if kelly <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        // half-Kelly (100 대신 50을 곱함)
        (kelly * dec!(50)).min(MAX_KELLY_RISK_PERCENTAGE)
    }
}
