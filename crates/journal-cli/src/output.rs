//! 출력 형식과 표시용 포맷 헬퍼.

use std::io::Write;

use anyhow::Result;
use journal_core::DecimalExt;
use rust_decimal::Decimal;
use serde::Serialize;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 사람이 읽는 표 형식
    #[default]
    Table,
    /// JSON (camelCase)
    Json,
}

impl OutputFormat {
    /// `--json` 플래그로부터 형식을 결정합니다.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// 값을 들여쓰기된 JSON으로 출력합니다.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// 통화 표시 (예: "$1,234.50").
pub fn money(value: Decimal) -> String {
    value.to_currency_string()
}

/// 부호가 붙은 통화 표시 (예: "+$94.00", "-$12.00").
pub fn signed_money(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", value.to_currency_string())
    } else {
        value.to_currency_string()
    }
}

/// 퍼센트 표시 (예: "0.78%").
pub fn pct(value: Decimal) -> String {
    value.to_percentage_string()
}

/// 손익 방향 아이콘.
pub fn trend_icon(value: Decimal) -> &'static str {
    if value > Decimal::ZERO {
        "📈"
    } else if value < Decimal::ZERO {
        "📉"
    } else {
        "➖"
    }
}

/// ID 앞부분 (표 출력용).
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
