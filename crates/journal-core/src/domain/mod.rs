//! 매매일지 도메인 모델.

mod annotations;
mod calculations;
mod settings;
mod trade;

pub use annotations::*;
pub use calculations::*;
pub use settings::*;
pub use trade::*;
