//! 거래 주석 (감정, 매매 유형 태그).
//!
//! 계산에는 영향을 주지 않으며 기록과 필터링 용도로만 쓰입니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JournalError;

/// 거래 당시 감정 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// 😊
    #[serde(alias = "😊")]
    Confident,
    /// 😐
    #[serde(alias = "😐")]
    Neutral,
    /// 😰
    #[serde(alias = "😰")]
    Anxious,
    /// 😤
    #[serde(alias = "😤")]
    Frustrated,
    /// 🤔
    #[serde(alias = "🤔")]
    Uncertain,
}

impl Mood {
    /// 모든 감정 상태.
    pub const ALL: [Mood; 5] = [
        Mood::Confident,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Frustrated,
        Mood::Uncertain,
    ];

    /// 감정 이모지.
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Confident => "😊",
            Mood::Neutral => "😐",
            Mood::Anxious => "😰",
            Mood::Frustrated => "😤",
            Mood::Uncertain => "🤔",
        }
    }

    /// 표시 이름.
    pub fn name(&self) -> &'static str {
        match self {
            Mood::Confident => "Confident",
            Mood::Neutral => "Neutral",
            Mood::Anxious => "Anxious",
            Mood::Frustrated => "Frustrated",
            Mood::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.name())
    }
}

impl FromStr for Mood {
    type Err = JournalError;

    /// 이름(대소문자 무시) 또는 이모지를 받습니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.emoji() == s || mood.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| JournalError::InvalidInput(format!("알 수 없는 감정 상태: {}", s)))
    }
}

/// 매매 유형 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeLabel {
    #[serde(rename = "Scalping")]
    Scalping,
    #[serde(rename = "Day Trading")]
    DayTrading,
    #[serde(rename = "Swing Trading")]
    SwingTrading,
    #[serde(rename = "Position Trading")]
    PositionTrading,
    #[serde(rename = "Breakout")]
    Breakout,
    #[serde(rename = "Reversal")]
    Reversal,
    #[serde(rename = "Trend Following")]
    TrendFollowing,
    #[serde(rename = "Counter Trend")]
    CounterTrend,
    #[serde(rename = "News Trading")]
    NewsTrading,
    #[serde(rename = "Technical Analysis")]
    TechnicalAnalysis,
}

impl TradeLabel {
    /// 모든 태그.
    pub const ALL: [TradeLabel; 10] = [
        TradeLabel::Scalping,
        TradeLabel::DayTrading,
        TradeLabel::SwingTrading,
        TradeLabel::PositionTrading,
        TradeLabel::Breakout,
        TradeLabel::Reversal,
        TradeLabel::TrendFollowing,
        TradeLabel::CounterTrend,
        TradeLabel::NewsTrading,
        TradeLabel::TechnicalAnalysis,
    ];

    /// 표시 이름 (직렬화 값과 동일).
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeLabel::Scalping => "Scalping",
            TradeLabel::DayTrading => "Day Trading",
            TradeLabel::SwingTrading => "Swing Trading",
            TradeLabel::PositionTrading => "Position Trading",
            TradeLabel::Breakout => "Breakout",
            TradeLabel::Reversal => "Reversal",
            TradeLabel::TrendFollowing => "Trend Following",
            TradeLabel::CounterTrend => "Counter Trend",
            TradeLabel::NewsTrading => "News Trading",
            TradeLabel::TechnicalAnalysis => "Technical Analysis",
        }
    }
}

impl fmt::Display for TradeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeLabel {
    type Err = JournalError;

    /// 표시 이름을 받으며 대소문자, 공백, `-`/`_` 구분자를 무시합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |value: &str| -> String {
            value
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = normalize(s);

        TradeLabel::ALL
            .into_iter()
            .find(|label| normalize(label.as_str()) == wanted)
            .ok_or_else(|| JournalError::InvalidInput(format!("알 수 없는 태그: {}", s)))
    }
}
