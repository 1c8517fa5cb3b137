//! 리스크 계산기.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 계좌 잔고와 허용 리스크 비율 기반 포지션 사이징 (고정 비율)
//! - Take-profit 기준 보상 금액과 손익비
//! - 과거 성과 기반 Half-Kelly 리스크 비율 제안
//!
//! # 예제
//!
//! ```rust,ignore
//! use journal_risk::{RiskCalculator, RiskInput};
//! use rust_decimal_macros::dec;
//!
//! let input = RiskInput::new(dec!(10000), dec!(2), dec!(1.2000), dec!(1.1950))
//!     .with_take_profit(dec!(1.2100));
//! let calc = RiskCalculator::calculate(&input);
//! println!("포지션 크기: {}", calc.position_size);
//! ```

pub mod position_sizing;

// 주요 타입 재내보내기
pub use position_sizing::{
    RiskCalculation, RiskCalculator, RiskInput, DEFAULT_ACCOUNT_BALANCE, DEFAULT_RISK_PERCENTAGE,
    MAX_KELLY_RISK_PERCENTAGE,
};
