//! 분모가 0일 때 무한대가 될 수 있는 비율 값.
//!
//! Profit Factor, 손익비처럼 손실이 없으면 무한대로 정의되는 지표에 사용합니다.
//! `Decimal`은 무한대를 표현할 수 없으므로 별도 변형으로 둡니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 직렬화 시 무한대를 나타내는 문자열.
pub const INFINITY_LABEL: &str = "Infinity";

/// 유한 값 또는 양의 무한대.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    /// 유한 값
    Finite(Decimal),
    /// 양의 무한대 (분모 0, 분자 양수)
    Infinite,
}

impl Ratio {
    /// 0 비율.
    pub const ZERO: Ratio = Ratio::Finite(Decimal::ZERO);

    /// `numerator / denominator`를 계산합니다.
    ///
    /// - 분모가 양수: 나눗셈 결과 (범위를 넘으면 무한대)
    /// - 분모가 0 이하이고 분자가 양수: 무한대
    /// - 그 외: 0
    pub fn of(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator > Decimal::ZERO {
            match numerator.checked_div(denominator) {
                Some(value) => Ratio::Finite(value),
                None if numerator > Decimal::ZERO => Ratio::Infinite,
                None => Ratio::ZERO,
            }
        } else if numerator > Decimal::ZERO {
            Ratio::Infinite
        } else {
            Ratio::ZERO
        }
    }

    /// 무한대인지 확인합니다.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Ratio::Infinite)
    }

    /// 유한 값을 반환합니다.
    pub fn finite(&self) -> Option<Decimal> {
        match self {
            Ratio::Finite(value) => Some(*value),
            Ratio::Infinite => None,
        }
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ZERO
    }
}

impl From<Decimal> for Ratio {
    fn from(value: Decimal) -> Self {
        Ratio::Finite(value)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Finite(value) => match f.precision() {
                Some(precision) => write!(f, "{:.*}", precision, value),
                None => write!(f, "{}", value),
            },
            Ratio::Infinite => write!(f, "∞"),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Finite(value) => Serialize::serialize(value, serializer),
            Ratio::Infinite => serializer.serialize_str(INFINITY_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) if text == INFINITY_LABEL => Ok(Ratio::Infinite),
            Raw::Text(text) => text
                .parse::<Decimal>()
                .map(Ratio::Finite)
                .map_err(serde::de::Error::custom),
            Raw::Number(value) => Ok(Ratio::Finite(value)),
        }
    }
}
