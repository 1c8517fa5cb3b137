//! 매매 손익 계산 공통 로직.
//!
//! 거래 기록, 입력 미리보기, 통계 계산에서 공유하는 P&L 함수를 제공합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::trade::{Side, TradeDraft};
use crate::types::{DecimalExt, Price, Quantity};

/// 실현 손익 계산 (수수료 제외).
///
/// 결과가 `Decimal` 범위를 넘으면 최대/최솟값으로 포화합니다.
///
/// # Examples
///
/// ```
/// use journal_core::{realized_pnl, Side};
/// use rust_decimal_macros::dec;
///
/// // 롱: 100에 매수 → 110에 청산, 수량 10
/// assert_eq!(realized_pnl(dec!(100), dec!(110), dec!(10), Side::Buy), dec!(100));
///
/// // 숏: 110에 매도 → 100에 청산, 수량 10
/// assert_eq!(realized_pnl(dec!(110), dec!(100), dec!(10), Side::Sell), dec!(100));
/// ```
pub fn realized_pnl(entry_price: Price, exit_price: Price, quantity: Quantity, side: Side) -> Decimal {
    match side {
        // 롱 포지션: (청산가 - 진입가) × 수량
        Side::Buy => exit_price.sub_or_saturate(entry_price).mul_or_saturate(quantity),
        // 숏 포지션: (진입가 - 청산가) × 수량
        Side::Sell => entry_price.sub_or_saturate(exit_price).mul_or_saturate(quantity),
    }
}

/// 수수료 차감 후 순손익 계산.
pub fn net_pnl(gross_pnl: Decimal, fees: Decimal) -> Decimal {
    gross_pnl.sub_or_saturate(fees)
}

/// 명목 가치 계산 (가격 × 수량).
pub fn notional_value(price: Price, quantity: Quantity) -> Decimal {
    price.mul_or_saturate(quantity)
}

/// 거래의 순손익을 계산합니다.
///
/// 총손익에서 거래 자체의 수수료(`commission + swap`)를 차감합니다.
pub fn compute_pnl(
    side: Side,
    entry_price: Price,
    exit_price: Price,
    quantity: Quantity,
    commission: Decimal,
    swap: Decimal,
) -> Decimal {
    net_pnl(
        realized_pnl(entry_price, exit_price, quantity, side),
        commission.add_or_saturate(swap),
    )
}

/// 진입 명목가치 대비 수익률 (백분율, 예: 0.78 = 0.78%).
///
/// 명목가치가 0이면 0을 반환합니다. 입력 검증 단계에서 진입가와 수량은
/// 양수로 보장되므로 정상 경로에서는 발생하지 않습니다.
pub fn compute_percentage(pnl: Decimal, entry_price: Price, quantity: Quantity) -> Decimal {
    pnl.div_or_zero(notional_value(entry_price, quantity))
        .mul_or_saturate(dec!(100))
}

/// 입력 중인 거래의 손익 미리보기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlBreakdown {
    /// 수수료 차감 전 손익
    pub gross_pnl: Decimal,
    /// 거래 수수료 (commission + swap)
    pub fees: Decimal,
    /// 순손익
    pub net_pnl: Decimal,
    /// 순손익 기준 수익률 (%)
    pub percentage: Decimal,
}

impl PnlBreakdown {
    /// 초안으로부터 손익 내역을 계산합니다.
    pub fn preview(draft: &TradeDraft) -> Self {
        let gross_pnl = realized_pnl(draft.entry_price, draft.exit_price, draft.quantity, draft.side);
        let fees = draft.commission.add_or_saturate(draft.swap);
        let net = net_pnl(gross_pnl, fees);

        Self {
            gross_pnl,
            fees,
            net_pnl: net,
            percentage: compute_percentage(net, draft.entry_price, draft.quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realized_pnl_long() {
        assert_eq!(realized_pnl(dec!(100), dec!(110), dec!(10), Side::Buy), dec!(100));
    }

    #[test]
    fn test_realized_pnl_short() {
        assert_eq!(realized_pnl(dec!(110), dec!(100), dec!(10), Side::Sell), dec!(100));
        assert_eq!(realized_pnl(dec!(100), dec!(110), dec!(10), Side::Sell), dec!(-100));
    }

    #[test]
    fn test_compute_pnl_scenario() {
        // EUR/USD 1.2000 → 1.2100, 10,000 단위, 수수료 5 + 스왑 1
        let pnl = compute_pnl(
            Side::Buy,
            dec!(1.2000),
            dec!(1.2100),
            dec!(10000),
            dec!(5),
            dec!(1),
        );
        assert_eq!(pnl, dec!(94));

        let pct = compute_percentage(pnl, dec!(1.2000), dec!(10000));
        assert!((pct - dec!(0.7833)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_compute_percentage_zero_notional() {
        assert_eq!(compute_percentage(dec!(50), Decimal::ZERO, dec!(10)), Decimal::ZERO);
        assert_eq!(compute_percentage(dec!(50), dec!(100), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compute_percentage() {
        assert_eq!(compute_percentage(dec!(50), dec!(100), dec!(10)), dec!(5));
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let quantity = Decimal::from_i128_with_scale(10_i128.pow(27), 0);

        // 1 × 1e27은 범위 안, 100 × 1e27은 범위 밖
        assert_eq!(realized_pnl(dec!(100), dec!(101), quantity, Side::Buy), quantity);
        assert_eq!(notional_value(dec!(100), quantity), Decimal::MAX);
        assert_eq!(realized_pnl(dec!(100), dec!(300), quantity, Side::Sell), Decimal::MIN);

        let pnl = compute_pnl(Side::Sell, dec!(100), dec!(300), quantity, dec!(5), dec!(1));
        assert_eq!(pnl, Decimal::MIN);
        assert!(compute_percentage(pnl, dec!(100), quantity) < Decimal::ZERO);
    }
}
