//! 저장소 오류 타입.

use journal_core::JournalError;
use thiserror::Error;

/// 키-값 저장소 오류.
#[derive(Debug, Error)]
pub enum StorageError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    /// 저장소를 사용할 수 없음 (잘못된 키, 쓰기 불가 등)
    #[error("저장소를 사용할 수 없음: {0}")]
    Unavailable(String),
}

/// 저장소 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for JournalError {
    fn from(err: StorageError) -> Self {
        JournalError::Storage(err.to_string())
    }
}
