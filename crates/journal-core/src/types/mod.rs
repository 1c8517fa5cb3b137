//! 매매일지 전반에서 사용되는 공통 타입.

mod decimal;
mod ratio;

pub use decimal::*;
pub use ratio::*;
