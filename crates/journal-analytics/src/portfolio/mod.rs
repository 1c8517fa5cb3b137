//! 포트폴리오 분석 모듈
//!
//! 거래 순서에 따른 계좌 자산 변화를 분석합니다.
//!
//! # 모듈 구성
//!
//! - [`equity_curve`]: 자산 곡선 데이터 생성 및 낙폭 분석
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use journal_analytics::portfolio::EquityCurve;
//!
//! let curve = EquityCurve::from_trades(&trades, &settings);
//! println!("최대 낙폭: {}%", curve.max_drawdown());
//! ```

pub mod equity_curve;

pub use equity_curve::*;
