//! 월 단위 거래 달력.

use chrono::{Datelike, Months, NaiveDate};
use journal_core::{sum_or_saturate, JournalError, JournalResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::state::{DayData, JournalState};

/// 달력의 하루.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// 일 (1-31)
    pub day: u32,
    pub date: NaiveDate,
    /// 거래가 있는 날만 값이 있음
    pub data: Option<DayData>,
}

impl CalendarDay {
    /// 거래가 있는 날인지 확인합니다.
    pub fn has_trades(&self) -> bool {
        self.data.is_some()
    }

    /// 수익률 합이 양수인 날인지 확인합니다.
    pub fn is_profit(&self) -> bool {
        self.data.as_ref().is_some_and(DayData::is_profit)
    }
}

/// 한 달치 달력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    /// 월 (1-12)
    pub month: u32,
    /// 1일 앞의 빈 칸 수 (일요일 = 0)
    pub leading_blank_days: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// 상태에서 해당 월의 달력을 만듭니다.
    pub fn build(state: &JournalState, year: i32, month: u32) -> JournalResult<Self> {
        let first = first_of_month(year, month)?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| JournalError::InvalidInput(format!("범위를 벗어난 월: {}", first)))?;

        let days = first
            .iter_days()
            .take_while(|d| *d < next)
            .map(|date| CalendarDay {
                day: date.day(),
                date,
                data: state.day_data(date),
            })
            .collect();

        Ok(Self {
            year,
            month,
            leading_blank_days: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    /// 표시용 제목 (예: "January 2024").
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// 이전 달 (연, 월).
    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// 다음 달 (연, 월).
    pub fn next(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }

    /// 거래가 있었던 날 수.
    pub fn trading_days(&self) -> usize {
        self.days.iter().filter(|d| d.has_trades()).count()
    }

    /// 월 순손익 합계.
    pub fn total_pnl(&self) -> Decimal {
        sum_or_saturate(
            self.days
                .iter()
                .filter_map(|d| d.data.as_ref())
                .map(|d| d.total_pnl),
        )
    }
}

fn first_of_month(year: i32, month: u32) -> JournalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| JournalError::InvalidInput(format!("잘못된 연월: {}-{:02}", year, month)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::JournalAction;
    use chrono::NaiveTime;
    use journal_core::{Side, Trade, TradeDraft};
    use rust_decimal_macros::dec;

    fn state_with(trades: &[(u32, u32, Decimal)]) -> JournalState {
        trades.iter().fold(JournalState::default(), |state, &(month, day, exit)| {
            state.apply(JournalAction::AddTrade(Trade::create(TradeDraft::new(
                "EUR/USD",
                Side::Buy,
                dec!(100),
                exit,
                dec!(1),
                NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ))))
        })
    }

    #[test]
    fn test_february_leap_year() {
        let state = state_with(&[(2, 14, dec!(103)), (2, 14, dec!(98)), (2, 20, dec!(95))]);
        let cal = CalendarMonth::build(&state, 2024, 2).unwrap();

        assert_eq!(cal.days.len(), 29);
        // 2024-02-01 은 목요일
        assert_eq!(cal.leading_blank_days, 4);
        assert_eq!(cal.title(), "February 2024");
        assert_eq!(cal.trading_days(), 2);
        assert_eq!(cal.total_pnl(), dec!(-4));

        let valentine = &cal.days[13];
        assert_eq!(valentine.day, 14);
        assert!(valentine.is_profit());
        assert!(!cal.days[19].is_profit());
        assert!(!cal.days[0].has_trades());
    }

    #[test]
    fn test_sunday_start() {
        // 2024-09-01 은 일요일
        let cal = CalendarMonth::build(&JournalState::default(), 2024, 9).unwrap();
        assert_eq!(cal.leading_blank_days, 0);
        assert_eq!(cal.days.len(), 30);
    }

    #[test]
    fn test_navigation_wraps_year() {
        let jan = CalendarMonth::build(&JournalState::default(), 2024, 1).unwrap();
        assert_eq!(jan.previous(), (2023, 12));
        assert_eq!(jan.next(), (2024, 2));

        let december = CalendarMonth::build(&JournalState::default(), 2024, 12).unwrap();
        assert_eq!(december.next(), (2025, 1));
        assert_eq!(december.days.len(), 31);
    }

    #[test]
    fn test_invalid_month() {
        let err = CalendarMonth::build(&JournalState::default(), 2024, 13).unwrap_err();
        assert!(err.is_user_error());
    }
}
