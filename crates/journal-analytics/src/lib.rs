//! 매매일지 성과 분석.
//!
//! 이 크레이트는 거래 목록과 계좌 설정으로부터 파생 지표를 계산하는
//! 순수 함수를 제공합니다:
//! - 요약 통계 (승률, Profit Factor, 손익비, 현재 자산)
//! - 자산 곡선
//! - 월별 / 종목별 성과 집계
//! - 목표 달성률
//!
//! 모든 함수는 매 호출마다 전체 거래 목록을 다시 계산하며 내부 상태를 두지 않습니다.
//!
//! # Re-exports
//!
//! - [`performance`]: 요약 통계와 기간/종목별 집계
//! - [`portfolio`]: 자산 곡선
//! - [`goals`]: 목표 달성률

pub mod goals;
pub mod performance;
pub mod portfolio;

pub use goals::{default_goals, Goal, GoalKind};
pub use performance::breakdown::{
    instrument_performance, monthly_performance, InstrumentPerformance, MonthlyPerformance,
};
pub use performance::statistics::{calculate_statistics, Statistics};
pub use portfolio::equity_curve::{build_equity_curve, EquityCurve, EquityPoint, START_LABEL};
