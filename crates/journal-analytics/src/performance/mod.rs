//! 성과 분석 모듈
//!
//! 거래 목록의 성과를 요약하고 기간/종목별로 집계합니다.
//!
//! # 모듈 구성
//!
//! - [`statistics`]: 요약 통계 (승률, Profit Factor, 평균 손익, 현재 자산)
//! - [`breakdown`]: 월별 / 종목별 성과 집계

pub mod breakdown;
pub mod statistics;

pub use breakdown::*;
pub use statistics::*;
