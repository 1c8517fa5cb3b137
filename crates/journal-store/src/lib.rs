//! 매매일지 상태 관리와 영속화.
//!
//! 이 crate는 다음을 제공합니다:
//! - 거래 목록과 계좌 설정을 소유하는 [`TradingStore`]
//! - 순수 리듀서 [`JournalState::apply`]와 액션 [`JournalAction`]
//! - 키-값 저장소 포트 [`KeyValueStore`]와 메모리/파일 어댑터
//! - 월 단위 거래 달력
//!
//! # 예제
//!
//! ```rust,ignore
//! use journal_store::{FileStorage, TradingStore};
//!
//! let mut store = TradingStore::new(FileStorage::new("./data"));
//! store.initialize();
//! let trade = store.add_trade(draft);
//! println!("현재 자산: {}", store.snapshot().statistics.current_equity);
//! ```

pub mod calendar;
pub mod error;
pub mod state;
pub mod storage;
pub mod store;

pub use calendar::{CalendarDay, CalendarMonth};
pub use error::{Result, StorageError};
pub use state::{DayData, JournalAction, JournalState, LoadState};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{Listener, SubscriptionId, TradingStore};
