//! 포지션 사이징 명령.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use journal_core::DecimalExt;
use journal_risk::{
    RiskCalculation, RiskCalculator, RiskInput, DEFAULT_ACCOUNT_BALANCE, DEFAULT_RISK_PERCENTAGE,
};
use journal_store::{KeyValueStore, TradingStore};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::output::{money, pct, write_json, OutputFormat};

/// 리스크 계산 인자.
#[derive(Debug, Clone, Args)]
pub struct RiskArgs {
    /// 계좌 잔고 (기본: 10000)
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// 허용 리스크 비율 % (기본: 2)
    #[arg(long)]
    pub risk: Option<Decimal>,

    /// 진입 가격
    #[arg(long)]
    pub entry: Decimal,

    /// 손절 가격
    #[arg(long)]
    pub stop: Decimal,

    /// 익절 가격
    #[arg(long)]
    pub take_profit: Option<Decimal>,

    /// 기록된 성과로 Half-Kelly 리스크 비율을 사용
    #[arg(long, conflicts_with = "risk")]
    pub kelly: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskReport {
    #[serde(flatten)]
    input: RiskInput,
    #[serde(flatten)]
    result: RiskCalculation,
    notional_value: Decimal,
}

/// 리스크 입력을 만듭니다. `--kelly`면 통계 기반 비율을 사용합니다.
pub fn build_input<S: KeyValueStore>(store: &TradingStore<S>, args: &RiskArgs) -> RiskInput {
    let risk_percentage = if args.kelly {
        let stats = &store.snapshot().statistics;
        RiskCalculator::kelly_risk_percentage(stats.win_rate, stats.avg_win, stats.avg_loss)
            .round_half_up(2)
    } else {
        args.risk.unwrap_or(DEFAULT_RISK_PERCENTAGE)
    };

    let input = RiskInput::new(
        args.balance.unwrap_or(DEFAULT_ACCOUNT_BALANCE),
        risk_percentage,
        args.entry,
        args.stop,
    );
    match args.take_profit {
        Some(tp) => input.with_take_profit(tp),
        None => input,
    }
}

/// 포지션 크기와 손익비를 계산해 출력합니다.
pub fn run_risk<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    args: &RiskArgs,
    out: &mut W,
    format: OutputFormat,
) -> Result<RiskCalculation> {
    let input = build_input(store, args);
    input.validate()?;
    let result = RiskCalculator::calculate(&input);

    match format {
        OutputFormat::Json => write_json(
            out,
            &RiskReport {
                notional_value: result.notional_value(input.entry_price),
                input: input.clone(),
                result: result.clone(),
            },
        )?,
        OutputFormat::Table => {
            writeln!(out, "🛡️  리스크 계산")?;
            writeln!(out, "  계좌 잔고:     {}", money(input.account_balance))?;
            writeln!(out, "  리스크 비율:   {}", pct(input.risk_percentage))?;
            writeln!(out, "  진입 / 손절:   {} / {}", input.entry_price, input.stop_loss)?;
            if let Some(tp) = input.take_profit {
                writeln!(out, "  익절:          {}", tp)?;
            }
            writeln!(out, "{}", "-".repeat(40))?;
            writeln!(out, "  포지션 크기:   {}", result.position_size.round_half_up(4))?;
            writeln!(
                out,
                "  명목 가치:     {}",
                money(result.notional_value(input.entry_price))
            )?;
            writeln!(out, "  리스크 금액:   {}", money(result.risk_amount))?;
            writeln!(out, "  보상 금액:     {}", money(result.reward_amount))?;
            writeln!(out, "  손익비:        1:{}", result.risk_reward_ratio.round_half_up(2))?;
        }
    }
    Ok(result)
}
