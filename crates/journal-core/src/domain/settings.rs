//! 계좌 설정.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::DecimalExt;

/// 계좌 설정.
///
/// 프로세스 전체에서 하나만 활성화되며, 변경 시 통째로 교체됩니다.
/// `commission`과 `swap_fee`는 거래 자체 수수료와 별개로 통계/자산 곡선
/// 계산에서 거래마다 한 번 더 차감되는 전역 수수료입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    /// 초기 자본 (양수)
    pub initial_capital: Decimal,
    /// 거래당 전역 수수료 (0 이상)
    #[serde(default)]
    pub commission: Decimal,
    /// 거래당 전역 스왑 비용 (0 이상)
    #[serde(default)]
    pub swap_fee: Decimal,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            initial_capital: dec!(10000),
            commission: Decimal::ZERO,
            swap_fee: Decimal::ZERO,
        }
    }
}

impl AccountSettings {
    /// 거래당 전역 수수료 합계.
    pub fn fee_per_trade(&self) -> Decimal {
        self.commission.add_or_saturate(self.swap_fee)
    }

    /// 부분 변경을 병합한 새 설정을 반환합니다.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            initial_capital: patch.initial_capital.unwrap_or(self.initial_capital),
            commission: patch.commission.unwrap_or(self.commission),
            swap_fee: patch.swap_fee.unwrap_or(self.swap_fee),
        }
    }
}

/// 계좌 설정의 부분 변경.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_capital: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_fee: Option<Decimal>,
}

impl SettingsPatch {
    /// 변경 사항이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.initial_capital.is_none() && self.commission.is_none() && self.swap_fee.is_none()
    }
}

impl From<AccountSettings> for SettingsPatch {
    fn from(settings: AccountSettings) -> Self {
        Self {
            initial_capital: Some(settings.initial_capital),
            commission: Some(settings.commission),
            swap_fee: Some(settings.swap_fee),
        }
    }
}
