//! 매매일지 스토어.
//!
//! 상태를 소유하고 모든 변경을 [`TradingStore::dispatch`] 하나로 처리합니다.
//! 변경 후에는 파생 값 재계산, 저장소 기록, 구독자 알림을 순서대로 수행합니다.
//!
//! # 영속화 규칙
//!
//! - 거래 목록은 비어있지 않을 때만 기록 (빈 목록은 기존 기록을 덮어쓰지 않음)
//! - 계좌 설정은 변경될 때마다 기록
//! - 저장 실패는 `error!`로 기록하고 메모리 상태는 되돌리지 않음
//! - 초기화가 끝나기 전에는 기록하지 않음

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use journal_core::{
    journal_span, AccountSettings, AppConfig, JournalResult, SettingsPatch, Trade, TradeDraft,
    DEFAULT_SETTINGS_KEY, DEFAULT_TRADES_KEY,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::calendar::CalendarMonth;
use crate::state::{DayData, JournalAction, JournalState, LoadState};
use crate::storage::KeyValueStore;

/// 상태 변경 알림 콜백.
pub type Listener = Box<dyn FnMut(&JournalState)>;

/// 구독 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// 매매일지 상태 컨테이너.
pub struct TradingStore<S: KeyValueStore> {
    storage: S,
    state: JournalState,
    load_state: LoadState,
    trades_key: String,
    settings_key: String,
    /// 저장된 설정이 없을 때 사용할 값
    default_settings: AccountSettings,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl<S: KeyValueStore> fmt::Debug for TradingStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingStore")
            .field("load_state", &self.load_state)
            .field("trades", &self.state.trades.len())
            .field("trades_key", &self.trades_key)
            .field("settings_key", &self.settings_key)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: KeyValueStore> TradingStore<S> {
    /// 기본 키와 기본 계좌 설정으로 스토어를 생성합니다.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: JournalState::default(),
            load_state: LoadState::Uninitialized,
            trades_key: DEFAULT_TRADES_KEY.to_string(),
            settings_key: DEFAULT_SETTINGS_KEY.to_string(),
            default_settings: AccountSettings::default(),
            listeners: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    /// 애플리케이션 설정의 키와 계좌 기본값으로 스토어를 생성합니다.
    pub fn from_config(storage: S, config: &AppConfig) -> Self {
        Self::new(storage)
            .with_keys(&config.storage.trades_key, &config.storage.settings_key)
            .with_default_settings(config.account)
    }

    /// 저장 키를 변경합니다.
    pub fn with_keys(mut self, trades_key: &str, settings_key: &str) -> Self {
        self.trades_key = trades_key.to_string();
        self.settings_key = settings_key.to_string();
        self
    }

    /// 저장된 설정이 없을 때 사용할 계좌 설정을 지정합니다.
    pub fn with_default_settings(mut self, settings: AccountSettings) -> Self {
        self.default_settings = settings;
        self.state = JournalState::new(settings);
        self
    }

    /// 저장소에서 거래와 설정을 읽어 스토어를 준비합니다.
    ///
    /// 거래와 설정은 각각 독립적으로 읽으며, 키가 없거나 읽기/파싱에 실패하면
    /// 경고를 남기고 빈 목록 / 기본 설정을 사용합니다. 오류를 반환하지 않습니다.
    /// 이미 준비된 스토어에서는 아무 일도 하지 않습니다.
    pub fn initialize(&mut self) {
        if self.load_state != LoadState::Uninitialized {
            return;
        }

        let span = journal_span!("initialize");
        let _guard = span.enter();

        self.load_state = LoadState::Loading;
        self.dispatch(JournalAction::SetLoading(true));

        let mut trades: Vec<Trade> = self.load_key(&self.trades_key).unwrap_or_default();
        for trade in &mut trades {
            trade.recompute();
        }
        let settings = self
            .load_key(&self.settings_key)
            .unwrap_or(self.default_settings);

        info!(trades = trades.len(), "매매일지 로드");
        self.dispatch(JournalAction::Load { trades, settings });
        self.dispatch(JournalAction::SetLoading(false));
        self.load_state = LoadState::Ready;
    }

    /// 상태 변경을 적용합니다.
    ///
    /// 파생 값을 재계산하고, 준비된 스토어라면 바뀐 부분을 저장한 뒤
    /// 구독자에게 알립니다.
    pub fn dispatch(&mut self, action: JournalAction) {
        let name = action.name();
        let touches_trades = action.touches_trades();
        let touches_settings = action.touches_settings();

        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
        debug!(action = name, trades = self.state.trades.len(), "상태 갱신");

        if self.load_state == LoadState::Ready {
            if touches_trades {
                self.persist_trades();
            }
            if touches_settings {
                self.persist_settings();
            }
        }

        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }

    /// 새 거래를 기록합니다.
    ///
    /// 새 ID와 생성 시각을 부여하고 파생 필드를 계산합니다. 입력 검증은
    /// 호출자가 [`TradeDraft::validate`]로 먼저 수행해야 합니다.
    pub fn add_trade(&mut self, draft: TradeDraft) -> Trade {
        self.initialize();

        let trade = Trade::create(draft);
        let span = journal_span!("add_trade", trade.id, trade.instrument());
        let _guard = span.enter();

        self.dispatch(JournalAction::AddTrade(trade.clone()));
        info!(pnl = %trade.pnl, "거래 추가");
        trade
    }

    /// 같은 ID의 거래를 교체합니다.
    ///
    /// 파생 필드는 다시 계산되고 최초 생성 시각은 유지됩니다.
    /// 해당 ID가 없으면 `false`를 반환하고 아무것도 바꾸지 않습니다.
    pub fn update_trade(&mut self, trade: Trade) -> bool {
        self.initialize();

        let span = journal_span!("update_trade", trade.id);
        let _guard = span.enter();

        if self.state.trade(&trade.id).is_none() {
            warn!("수정할 거래 없음");
            return false;
        }

        self.dispatch(JournalAction::UpdateTrade(trade));
        info!("거래 수정");
        true
    }

    /// ID로 거래를 삭제합니다. 해당 ID가 없으면 `false`.
    pub fn delete_trade(&mut self, id: &str) -> bool {
        self.initialize();

        let span = journal_span!("delete_trade", id);
        let _guard = span.enter();

        if self.state.trade(id).is_none() {
            warn!("삭제할 거래 없음");
            return false;
        }

        self.dispatch(JournalAction::DeleteTrade(id.to_string()));
        info!(remaining = self.state.trades.len(), "거래 삭제");
        true
    }

    /// 계좌 설정을 부분 변경하고 새 설정을 반환합니다.
    ///
    /// 통계와 자산 곡선만 다시 계산됩니다.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> AccountSettings {
        self.initialize();

        self.dispatch(JournalAction::UpdateSettings(patch));
        info!(
            initial_capital = %self.state.settings.initial_capital,
            commission = %self.state.settings.commission,
            swap_fee = %self.state.settings.swap_fee,
            "계좌 설정 변경"
        );
        self.state.settings
    }

    /// 날짜의 거래 목록.
    pub fn trades_by_date(&self, date: NaiveDate) -> Vec<Trade> {
        self.state.trades_by_date(date)
    }

    /// 날짜의 거래 요약. 거래가 없으면 `None`.
    pub fn day_data(&self, date: NaiveDate) -> Option<DayData> {
        self.state.day_data(date)
    }

    /// 월 단위 달력.
    pub fn calendar_month(&self, year: i32, month: u32) -> JournalResult<CalendarMonth> {
        CalendarMonth::build(&self.state, year, month)
    }

    /// ID로 거래를 찾습니다.
    pub fn trade(&self, id: &str) -> Option<&Trade> {
        self.state.trade(id)
    }

    /// 현재 상태 스냅샷.
    pub fn snapshot(&self) -> &JournalState {
        &self.state
    }

    /// 현재 계좌 설정.
    pub fn settings(&self) -> AccountSettings {
        self.state.settings
    }

    /// 생명주기 단계.
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// 상태 변경 알림을 구독합니다.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&JournalState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// 구독을 해제합니다. 이미 해제된 ID면 `false`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// 저장소 참조.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 스토어를 해체하고 저장소를 돌려받습니다.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn load_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "저장된 값 없음");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "저장소 읽기 실패, 기본값 사용");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "저장된 데이터 파싱 실패, 기본값 사용");
                None
            }
        }
    }

    fn persist_trades(&mut self) {
        if self.state.trades.is_empty() {
            debug!("빈 거래 목록은 기록하지 않음");
            return;
        }
        let key = self.trades_key.clone();
        let result = serde_json::to_string(&self.state.trades);
        self.persist(&key, result);
    }

    fn persist_settings(&mut self) {
        let key = self.settings_key.clone();
        let result = serde_json::to_string(&self.state.settings);
        self.persist(&key, result);
    }

    fn persist(&mut self, key: &str, serialized: serde_json::Result<String>) {
        let json = match serialized {
            Ok(json) => json,
            Err(e) => {
                error!(key, error = %e, "직렬화 실패");
                return;
            }
        };

        if let Err(e) = self.storage.set(key, &json) {
            error!(key, error = %e, "저장 실패");
        }
    }
}
