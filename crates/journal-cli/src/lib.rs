//! 매매일지 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 거래 기록 추가/수정/삭제/조회
//! - 통계, 자산 곡선, 월별/종목별 성과, 달력, 목표 보고
//! - 계좌 설정 관리
//! - 포지션 사이징 계산
//!
//! 모든 명령은 저장소와 출력 대상을 인자로 받아 테스트에서 메모리 저장소로 실행할 수 있습니다.

pub mod commands;
pub mod output;

pub use output::OutputFormat;
