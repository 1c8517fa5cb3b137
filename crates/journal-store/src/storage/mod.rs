//! 키-값 영속화 포트와 어댑터.
//!
//! - [`MemoryStorage`]: 프로세스 메모리 (테스트용)
//! - [`FileStorage`]: 데이터 디렉토리에 키마다 `<key>.json` 파일 하나

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// 문자열 키-값 저장소.
///
/// 값은 JSON 텍스트이며, 저장소는 내용을 해석하지 않습니다.
pub trait KeyValueStore {
    /// 키의 값을 읽습니다. 키가 없으면 `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 키의 값을 덮어씁니다.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
