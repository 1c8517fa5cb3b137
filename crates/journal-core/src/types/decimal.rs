//! 정밀한 금융 계산을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;
use tracing::warn;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 포지션 수량을 위한 타입.
pub type Quantity = Decimal;

/// 퍼센트 타입 (1 = 1%).
pub type Percentage = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 퍼센트 문자열로 변환합니다 (예: `0.78333` → "0.78%").
    fn to_percentage_string(&self) -> String;

    /// 통화 문자열로 변환합니다 (예: `-1234.5` → "-$1,234.50").
    fn to_currency_string(&self) -> String;

    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 덧셈. 범위를 넘으면 `Decimal::MAX`/`MIN`으로 포화합니다.
    fn add_or_saturate(&self, rhs: Decimal) -> Decimal;

    /// 뺄셈. 범위를 넘으면 `Decimal::MAX`/`MIN`으로 포화합니다.
    fn sub_or_saturate(&self, rhs: Decimal) -> Decimal;

    /// 곱셈. 범위를 넘으면 결과 부호에 맞춰 포화합니다.
    fn mul_or_saturate(&self, rhs: Decimal) -> Decimal;

    /// 나눗셈. 0으로 나누면 0, 범위를 넘으면 결과 부호에 맞춰 포화합니다.
    fn div_or_zero(&self, rhs: Decimal) -> Decimal;
}

fn saturate(negative: bool, op: &'static str) -> Decimal {
    warn!(op, "Decimal 범위 초과, 최대/최솟값으로 대체");
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// 합계. 범위를 넘으면 포화합니다.
pub fn sum_or_saturate<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.add_or_saturate(value))
}

impl DecimalExt for Decimal {
    fn to_percentage_string(&self) -> String {
        format!("{:.2}%", self.round_half_up(2))
    }

    fn to_currency_string(&self) -> String {
        let rounded = self.round_half_up(2).abs();
        let text = format!("{:.2}", rounded);
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}${}.{}", sign, grouped, frac_part)
    }

    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn add_or_saturate(&self, rhs: Decimal) -> Decimal {
        self.checked_add(rhs)
            .unwrap_or_else(|| saturate(rhs.is_sign_negative(), "add"))
    }

    fn sub_or_saturate(&self, rhs: Decimal) -> Decimal {
        self.checked_sub(rhs)
            .unwrap_or_else(|| saturate(self.is_sign_negative(), "sub"))
    }

    fn mul_or_saturate(&self, rhs: Decimal) -> Decimal {
        self.checked_mul(rhs).unwrap_or_else(|| {
            saturate(self.is_sign_negative() != rhs.is_sign_negative(), "mul")
        })
    }

    fn div_or_zero(&self, rhs: Decimal) -> Decimal {
        if rhs.is_zero() {
            return Decimal::ZERO;
        }
        self.checked_div(rhs).unwrap_or_else(|| {
            saturate(self.is_sign_negative() != rhs.is_sign_negative(), "div")
        })
    }
}
