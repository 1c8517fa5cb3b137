//! 매매일지 거래 기록.
//!
//! 이 모듈은 거래 기록 관련 타입을 정의합니다:
//! - `Side` - 거래 방향 (손익 부호 결정)
//! - `TradeDraft` - 사용자가 입력한 거래 초안
//! - `Trade` - 파생 필드(손익, 수익률, 타임스탬프)가 계산된 거래 기록

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::annotations::{Mood, TradeLabel};
use super::calculations::{compute_percentage, compute_pnl, notional_value};
use crate::error::{JournalError, JournalResult};
use crate::types::{Price, Quantity};

/// 거래 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// 매수 (롱)
    Buy,
    /// 매도 (숏)
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" | "long" => Ok(Side::Buy),
            "sell" | "short" => Ok(Side::Sell),
            _ => Err(JournalError::InvalidInput(format!("알 수 없는 거래 방향: {}", s))),
        }
    }
}

/// `HH:MM` 형식 시각 직렬화. 역직렬화는 `HH:MM:SS`도 허용합니다.
mod hm_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_time(&text).map_err(serde::de::Error::custom)
    }
}

/// 선택 주석(감정, 태그) 역직렬화. 빈 값이나 알 수 없는 값은 `None`.
mod optional_tag {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};
    use tracing::warn;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let text = match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(None),
        };

        match text.parse() {
            Ok(tag) => Ok(Some(tag)),
            Err(e) => {
                warn!(value = %text, error = %e, "알 수 없는 주석 값 무시");
                Ok(None)
            }
        }
    }
}

/// `HH:MM` 또는 `HH:MM:SS` 문자열을 시각으로 변환합니다.
pub fn parse_time(text: &str) -> JournalResult<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| JournalError::InvalidInput(format!("잘못된 시각 형식: {}", text)))
}

/// `YYYY-MM-DD` 문자열을 날짜로 변환합니다.
pub fn parse_date(text: &str) -> JournalResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| JournalError::InvalidInput(format!("잘못된 날짜 형식: {}", text)))
}

/// 기록 날짜와 시각을 절대 시각으로 합칩니다.
///
/// 매매일지의 현지 시각은 시간대 변환 없이 UTC로 간주합니다.
pub fn combine_timestamp(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// 사용자가 입력한 거래 초안.
///
/// ID와 파생 필드가 없는 상태입니다. 검증은 입력을 받는 쪽의 책임이며
/// 저장소는 잘 구성된 값을 가정합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDraft {
    /// 종목 (예: "EUR/USD", "AAPL")
    pub instrument: String,
    /// 거래 방향
    #[serde(rename = "type")]
    pub side: Side,
    /// 진입 가격
    pub entry_price: Price,
    /// 청산 가격
    pub exit_price: Price,
    /// 수량
    pub quantity: Quantity,
    /// 기록 날짜
    pub date: NaiveDate,
    /// 기록 시각
    #[serde(with = "hm_time")]
    pub time: NaiveTime,
    /// 거래 수수료
    #[serde(default)]
    pub commission: Decimal,
    /// 스왑 비용
    #[serde(default)]
    pub swap: Decimal,
    /// 메모
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 감정 상태
    #[serde(
        default,
        deserialize_with = "optional_tag::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub mood: Option<Mood>,
    /// 매매 유형 태그
    #[serde(
        default,
        deserialize_with = "optional_tag::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<TradeLabel>,
}

impl TradeDraft {
    /// 필수 필드로 새 초안을 생성합니다.
    pub fn new(
        instrument: impl Into<String>,
        side: Side,
        entry_price: Price,
        exit_price: Price,
        quantity: Quantity,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            side,
            entry_price,
            exit_price,
            quantity,
            date,
            time,
            commission: Decimal::ZERO,
            swap: Decimal::ZERO,
            notes: None,
            mood: None,
            label: None,
        }
    }

    /// 수수료와 스왑 비용을 설정합니다.
    pub fn with_fees(mut self, commission: Decimal, swap: Decimal) -> Self {
        self.commission = commission;
        self.swap = swap;
        self
    }

    /// 메모를 설정합니다.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// 감정 상태를 설정합니다.
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// 매매 유형 태그를 설정합니다.
    pub fn with_label(mut self, label: TradeLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// 초안을 검증합니다.
    ///
    /// 모든 위반 사항을 모아 하나의 `InvalidInput` 에러로 반환합니다.
    pub fn validate(&self) -> JournalResult<()> {
        let mut errors = Vec::new();

        if self.instrument.trim().is_empty() {
            errors.push("종목은 필수입니다");
        }
        if self.entry_price <= Decimal::ZERO {
            errors.push("진입 가격은 양수여야 합니다");
        }
        if self.exit_price <= Decimal::ZERO {
            errors.push("청산 가격은 양수여야 합니다");
        }
        if self.quantity <= Decimal::ZERO {
            errors.push("수량은 양수여야 합니다");
        }
        if self.commission < Decimal::ZERO {
            errors.push("수수료는 0 이상이어야 합니다");
        }
        if self.swap < Decimal::ZERO {
            errors.push("스왑 비용은 0 이상이어야 합니다");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(JournalError::InvalidInput(errors.join(", ")))
        }
    }
}

/// 파생 필드가 계산된 거래 기록.
///
/// `pnl`, `percentage`, `timestamp`는 항상 나머지 필드와 일치해야 하며,
/// 필드를 바꾼 뒤에는 [`Trade::recompute`]를 호출해야 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// 거래 ID (생성 시 부여, 불변)
    pub id: String,
    /// 사용자 입력
    #[serde(flatten)]
    pub draft: TradeDraft,
    /// 순손익 (거래 수수료 차감 후)
    pub pnl: Decimal,
    /// 진입 명목가치 대비 수익률 (%)
    pub percentage: Decimal,
    /// 기록 날짜 + 시각
    pub timestamp: DateTime<Utc>,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// 초안으로부터 거래를 생성하고 파생 필드를 계산합니다.
    pub fn from_draft(id: impl Into<String>, draft: TradeDraft, created_at: DateTime<Utc>) -> Self {
        let mut trade = Self {
            id: id.into(),
            draft,
            pnl: Decimal::ZERO,
            percentage: Decimal::ZERO,
            timestamp: created_at,
            created_at,
        };
        trade.recompute();
        trade
    }

    /// 새 ID와 현재 시각으로 거래를 생성합니다.
    pub fn create(draft: TradeDraft) -> Self {
        Self::from_draft(Uuid::new_v4().to_string(), draft, Utc::now())
    }

    /// 파생 필드(손익, 수익률, 타임스탬프)를 다시 계산합니다.
    pub fn recompute(&mut self) {
        let d = &self.draft;
        self.pnl = compute_pnl(
            d.side,
            d.entry_price,
            d.exit_price,
            d.quantity,
            d.commission,
            d.swap,
        );
        self.percentage = compute_percentage(self.pnl, d.entry_price, d.quantity);
        self.timestamp = combine_timestamp(d.date, d.time);
    }

    /// 종목.
    pub fn instrument(&self) -> &str {
        &self.draft.instrument
    }

    /// 기록 날짜.
    pub fn date(&self) -> NaiveDate {
        self.draft.date
    }

    /// 진입 명목가치 (거래량).
    pub fn volume(&self) -> Decimal {
        notional_value(self.draft.entry_price, self.draft.quantity)
    }

    /// 수익 거래 여부.
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    /// 손실 거래 여부.
    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}
