//! CLI 명령어 구현 모듈.

pub mod report;
pub mod risk;
pub mod settings;
pub mod trade;

// 각 서브모듈 직접 사용 권장 (이름 충돌 방지)
