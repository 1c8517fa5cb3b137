//! 매매일지 상태와 리듀서.
//!
//! 상태 변경은 모두 [`JournalAction`]을 통해 [`JournalState::apply`]로만
//! 이뤄집니다. `apply`는 순수 함수이며 저장소나 구독자를 알지 못합니다.

use chrono::NaiveDate;
use journal_analytics::{
    build_equity_curve, calculate_statistics, instrument_performance, monthly_performance,
    EquityPoint, InstrumentPerformance, MonthlyPerformance, Statistics,
};
use journal_core::{sum_or_saturate, AccountSettings, SettingsPatch, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 스토어 생명주기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// 생성 직후
    #[default]
    Uninitialized,
    /// 저장소에서 읽는 중
    Loading,
    /// 사용 가능
    Ready,
}

/// 상태 변경 요청.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalAction {
    /// 로딩 표시 변경
    SetLoading(bool),
    /// 저장소에서 읽은 거래와 설정으로 교체
    Load {
        trades: Vec<Trade>,
        settings: AccountSettings,
    },
    /// 거래 추가 (파생 필드 계산 완료 상태)
    AddTrade(Trade),
    /// 같은 ID의 거래 교체
    UpdateTrade(Trade),
    /// ID로 거래 삭제
    DeleteTrade(String),
    /// 계좌 설정 부분 변경
    UpdateSettings(SettingsPatch),
}

impl JournalAction {
    /// 거래 목록을 바꾸는 액션인지 확인합니다.
    pub fn touches_trades(&self) -> bool {
        matches!(
            self,
            JournalAction::Load { .. }
                | JournalAction::AddTrade(_)
                | JournalAction::UpdateTrade(_)
                | JournalAction::DeleteTrade(_)
        )
    }

    /// 계좌 설정을 바꾸는 액션인지 확인합니다.
    pub fn touches_settings(&self) -> bool {
        matches!(
            self,
            JournalAction::Load { .. } | JournalAction::UpdateSettings(_)
        )
    }

    /// 로그용 액션 이름.
    pub fn name(&self) -> &'static str {
        match self {
            JournalAction::SetLoading(_) => "set_loading",
            JournalAction::Load { .. } => "load",
            JournalAction::AddTrade(_) => "add_trade",
            JournalAction::UpdateTrade(_) => "update_trade",
            JournalAction::DeleteTrade(_) => "delete_trade",
            JournalAction::UpdateSettings(_) => "update_settings",
        }
    }
}

/// 특정 날짜의 거래 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayData {
    pub date: NaiveDate,
    pub trades: Vec<Trade>,
    /// 순손익 합계
    pub total_pnl: Decimal,
    /// 거래별 수익률의 단순 합 (가중 평균 아님)
    pub total_percentage: Decimal,
}

impl DayData {
    /// 날짜의 거래들로 요약을 만듭니다. 거래가 없으면 `None`.
    pub fn from_trades(date: NaiveDate, trades: Vec<Trade>) -> Option<Self> {
        if trades.is_empty() {
            return None;
        }

        let total_pnl = sum_or_saturate(trades.iter().map(|t| t.pnl));
        let total_percentage = sum_or_saturate(trades.iter().map(|t| t.percentage));

        Some(Self {
            date,
            trades,
            total_pnl,
            total_percentage,
        })
    }

    /// 수익 일자 여부.
    pub fn is_profit(&self) -> bool {
        self.total_percentage > Decimal::ZERO
    }
}

/// 매매일지 전체 상태 스냅샷.
///
/// `trades`와 `settings` 외의 필드는 모두 파생 값입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalState {
    /// 거래 목록 (입력 순서 유지)
    pub trades: Vec<Trade>,
    pub statistics: Statistics,
    pub equity_data: Vec<EquityPoint>,
    pub monthly_performance: Vec<MonthlyPerformance>,
    pub instrument_performance: Vec<InstrumentPerformance>,
    pub is_loading: bool,
    pub settings: AccountSettings,
}

impl Default for JournalState {
    fn default() -> Self {
        Self::new(AccountSettings::default())
    }
}

impl JournalState {
    /// 거래가 없는 초기 상태.
    ///
    /// 자산 곡선은 첫 로드 전까지 비어있습니다.
    pub fn new(settings: AccountSettings) -> Self {
        Self {
            trades: Vec::new(),
            statistics: Statistics::empty(&settings),
            equity_data: Vec::new(),
            monthly_performance: Vec::new(),
            instrument_performance: Vec::new(),
            is_loading: false,
            settings,
        }
    }

    /// 액션을 적용한 새 상태를 반환합니다.
    pub fn apply(mut self, action: JournalAction) -> Self {
        match action {
            JournalAction::SetLoading(loading) => {
                self.is_loading = loading;
            }
            JournalAction::Load { trades, settings } => {
                self.trades = trades;
                self.settings = settings;
                self.recompute_all();
            }
            JournalAction::AddTrade(mut trade) => {
                trade.recompute();
                self.trades.push(trade);
                self.recompute_all();
            }
            JournalAction::UpdateTrade(mut trade) => {
                if let Some(slot) = self.trades.iter_mut().find(|t| t.id == trade.id) {
                    trade.created_at = slot.created_at;
                    trade.recompute();
                    *slot = trade;
                    self.recompute_all();
                }
            }
            JournalAction::DeleteTrade(id) => {
                let before = self.trades.len();
                self.trades.retain(|t| t.id != id);
                if self.trades.len() != before {
                    self.recompute_all();
                }
            }
            JournalAction::UpdateSettings(patch) => {
                self.settings = self.settings.merged(&patch);
                // 월별/종목별 집계는 설정과 무관
                self.recompute_settings_views();
            }
        }
        self
    }

    /// ID로 거래를 찾습니다.
    pub fn trade(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// 날짜의 거래 목록 (입력 순서).
    pub fn trades_by_date(&self, date: NaiveDate) -> Vec<Trade> {
        self.trades
            .iter()
            .filter(|t| t.date() == date)
            .cloned()
            .collect()
    }

    /// 날짜의 거래 요약.
    pub fn day_data(&self, date: NaiveDate) -> Option<DayData> {
        DayData::from_trades(date, self.trades_by_date(date))
    }

    fn recompute_settings_views(&mut self) {
        self.statistics = calculate_statistics(&self.trades, &self.settings);
        self.equity_data = build_equity_curve(&self.trades, &self.settings);
    }

    fn recompute_all(&mut self) {
        self.recompute_settings_views();
        self.monthly_performance = monthly_performance(&self.trades);
        self.instrument_performance = instrument_performance(&self.trades);
    }
}
