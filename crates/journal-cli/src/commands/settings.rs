//! 계좌 설정 명령.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use journal_core::{AccountSettings, JournalError, SettingsPatch};
use journal_store::{KeyValueStore, TradingStore};
use rust_decimal::Decimal;
use tracing::info;

use crate::output::{money, write_json, OutputFormat};

/// 설정 변경 인자. 아무 값도 없으면 현재 설정을 보여줍니다.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// 초기 자본
    #[arg(long)]
    pub initial_capital: Option<Decimal>,

    /// 거래당 수수료
    #[arg(long)]
    pub commission: Option<Decimal>,

    /// 거래당 스왑 비용
    #[arg(long)]
    pub swap_fee: Option<Decimal>,
}

impl SettingsArgs {
    /// 변경 사항으로 변환합니다.
    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            initial_capital: self.initial_capital,
            commission: self.commission,
            swap_fee: self.swap_fee,
        }
    }
}

/// 변경 사항을 검증합니다.
pub fn validate_patch(patch: &SettingsPatch) -> Result<(), JournalError> {
    if patch.initial_capital.is_some_and(|c| c <= Decimal::ZERO) {
        return Err(JournalError::InvalidInput("초기 자본은 양수여야 합니다".to_string()));
    }
    if patch.commission.is_some_and(|c| c < Decimal::ZERO) {
        return Err(JournalError::InvalidInput("수수료는 0 이상이어야 합니다".to_string()));
    }
    if patch.swap_fee.is_some_and(|s| s < Decimal::ZERO) {
        return Err(JournalError::InvalidInput("스왑 비용은 0 이상이어야 합니다".to_string()));
    }
    Ok(())
}

/// 설정을 조회하거나 변경합니다.
pub fn run_settings<S: KeyValueStore, W: Write>(
    store: &mut TradingStore<S>,
    args: &SettingsArgs,
    out: &mut W,
    format: OutputFormat,
) -> Result<AccountSettings> {
    let patch = args.to_patch();

    let settings = if patch.is_empty() {
        store.initialize();
        store.settings()
    } else {
        validate_patch(&patch)?;
        let updated = store.update_settings(patch);
        info!(
            initial_capital = %updated.initial_capital,
            commission = %updated.commission,
            swap_fee = %updated.swap_fee,
            "설정 변경 완료"
        );
        updated
    };

    match format {
        OutputFormat::Json => write_json(out, &settings)?,
        OutputFormat::Table => {
            writeln!(out, "⚙️  계좌 설정")?;
            writeln!(out, "  초기 자본:   {}", money(settings.initial_capital))?;
            writeln!(out, "  수수료:      {}", money(settings.commission))?;
            writeln!(out, "  스왑 비용:   {}", money(settings.swap_fee))?;
            writeln!(out, "  거래당 비용: {}", money(settings.fee_per_trade()))?;
        }
    }
    Ok(settings)
}
