//! 스토어 + 저장소 통합 테스트

use chrono::{NaiveDate, NaiveTime};
use journal_analytics::calculate_statistics;
use journal_core::{
    AccountSettings, Mood, SettingsPatch, Side, TradeDraft, TradeLabel, DEFAULT_SETTINGS_KEY,
    DEFAULT_TRADES_KEY,
};
use journal_store::{
    FileStorage, JournalAction, KeyValueStore, LoadState, MemoryStorage, StorageError,
    TradingStore,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn draft(instrument: &str, date: (i32, u32, u32), side: Side, entry: Decimal, exit: Decimal) -> TradeDraft {
    TradeDraft::new(
        instrument,
        side,
        entry,
        exit,
        dec!(10),
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        NaiveTime::from_hms_opt(11, 15, 0).unwrap(),
    )
}

/// 읽기/쓰기가 항상 실패하는 저장소.
#[derive(Default)]
struct BrokenStorage {
    write_attempts: usize,
}

impl KeyValueStore for BrokenStorage {
    fn get(&self, _key: &str) -> journal_store::Result<Option<String>> {
        Err(StorageError::Unavailable("offline".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> journal_store::Result<()> {
        self.write_attempts += 1;
        Err(StorageError::Unavailable("offline".to_string()))
    }
}

#[test]
fn test_file_round_trip_reproduces_views() {
    let dir = tempfile::tempdir().unwrap();

    let expected = {
        let mut store = TradingStore::new(FileStorage::new(dir.path()));
        store.initialize();
        store.add_trade(
            draft("EUR/USD", (2024, 1, 10), Side::Buy, dec!(1.2000), dec!(1.2100))
                .with_fees(dec!(0.5), dec!(0.1))
                .with_mood(Mood::Confident)
                .with_label(TradeLabel::DayTrading)
                .with_notes("breakout"),
        );
        store.add_trade(draft("AAPL", (2024, 2, 3), Side::Sell, dec!(180), dec!(185)));
        store.update_settings(SettingsPatch {
            commission: Some(dec!(1.5)),
            ..SettingsPatch::default()
        });
        store.snapshot().clone()
    };

    let mut reloaded = TradingStore::new(FileStorage::new(dir.path()));
    reloaded.initialize();
    let actual = reloaded.snapshot();

    assert_eq!(actual.trades, expected.trades);
    assert_eq!(actual.settings, expected.settings);
    assert_eq!(actual.statistics, expected.statistics);
    assert_eq!(actual.equity_data, expected.equity_data);
    assert_eq!(actual.monthly_performance, expected.monthly_performance);
    assert_eq!(actual.instrument_performance, expected.instrument_performance);
}

/// 로드 후 파생 값은 저장된 설정으로 계산된다.
#[test]
fn test_load_recomputes_with_saved_settings() {
    let settings = AccountSettings {
        initial_capital: dec!(20000),
        commission: dec!(2),
        swap_fee: dec!(1),
    };
    let mut seed = TradingStore::new(MemoryStorage::new());
    seed.add_trade(draft("TSLA", (2024, 3, 1), Side::Buy, dec!(200), dec!(210)));
    seed.update_settings(settings.into());

    let mut store = TradingStore::new(seed.into_storage());
    store.initialize();
    let state = store.snapshot();

    assert_eq!(state.settings, settings);
    // 20000 + 100 - 3
    assert_eq!(state.statistics.current_equity, dec!(20097));
    assert_eq!(state.equity_data.last().unwrap().equity, dec!(20097));
}

/// 마지막 거래를 지워도 저장된 거래 목록은 갱신되지 않는다 (빈 목록 미기록).
#[test]
fn test_delete_only_trade_keeps_stale_log() {
    let mut store = TradingStore::new(MemoryStorage::new());
    let trade = store.add_trade(draft("BTC/USDT", (2024, 4, 2), Side::Buy, dec!(100), dec!(120)));

    assert!(store.delete_trade(&trade.id));
    assert_eq!(store.snapshot().statistics.total_trades, 0);
    assert_eq!(store.snapshot().statistics.current_equity, dec!(10000));

    let raw = store.storage().get(DEFAULT_TRADES_KEY).unwrap().unwrap();
    assert!(raw.contains(&trade.id));

    // 다시 로드하면 삭제한 거래가 돌아온다
    let mut reloaded = TradingStore::new(store.into_storage());
    reloaded.initialize();
    assert_eq!(reloaded.snapshot().trades.len(), 1);
}

#[test]
fn test_two_months_breakdown() {
    let mut store = TradingStore::new(MemoryStorage::new());
    store.add_trade(draft("EUR/USD", (2024, 1, 20), Side::Buy, dec!(100), dec!(120)));
    store.add_trade(draft("EUR/USD", (2024, 2, 5), Side::Buy, dec!(100), dec!(90)));

    let monthly = &store.snapshot().monthly_performance;
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].label, "Jan 2024");
    assert_eq!(monthly[0].profit, dec!(200));
    assert_eq!(monthly[0].net, dec!(200));
    assert_eq!(monthly[0].trade_count, 1);
    assert_eq!(monthly[1].label, "Feb 2024");
    assert_eq!(monthly[1].loss, dec!(-100));
    assert_eq!(monthly[1].net, dec!(-100));
}

/// 거래 수수료는 pnl에서, 설정 수수료는 통계에서 다시 차감된다.
#[test]
fn test_fees_counted_twice() {
    let mut store = TradingStore::new(MemoryStorage::new());
    store.update_settings(SettingsPatch {
        commission: Some(dec!(5)),
        swap_fee: Some(dec!(1)),
        ..SettingsPatch::default()
    });
    let trade = store.add_trade(
        draft("EUR/USD", (2024, 1, 15), Side::Buy, dec!(1.2000), dec!(1.2100))
            .with_fees(dec!(5), dec!(1)),
    );

    // 10 * 0.01 = 0.1 - 6
    assert_eq!(trade.pnl, dec!(-5.9));
    assert_eq!(store.snapshot().statistics.current_equity, dec!(9988.1));
}

#[test]
fn test_malformed_trades_fall_back_independently() {
    let storage = MemoryStorage::new()
        .with_entry(DEFAULT_TRADES_KEY, "{ not json")
        .with_entry(DEFAULT_SETTINGS_KEY, r#"{"initialCapital":"5000","commission":"1","swapFee":"0"}"#);

    let mut store = TradingStore::new(storage);
    store.initialize();

    assert_eq!(store.load_state(), LoadState::Ready);
    assert!(store.snapshot().trades.is_empty());
    assert_eq!(store.settings().initial_capital, dec!(5000));
    assert_eq!(store.snapshot().statistics.current_equity, dec!(5000));
}

#[test]
fn test_malformed_settings_fall_back_independently() {
    let mut seed = TradingStore::new(MemoryStorage::new());
    seed.add_trade(draft("AAPL", (2024, 5, 1), Side::Buy, dec!(100), dec!(101)));
    let storage = seed
        .into_storage()
        .with_entry(DEFAULT_SETTINGS_KEY, r#"{"initialCapital": true}"#);

    let mut store = TradingStore::new(storage);
    store.initialize();

    assert_eq!(store.snapshot().trades.len(), 1);
    assert_eq!(store.settings(), AccountSettings::default());
}

#[test]
fn test_storage_failures_never_surface() {
    let mut store = TradingStore::new(BrokenStorage::default());
    store.initialize();
    assert_eq!(store.load_state(), LoadState::Ready);

    let trade = store.add_trade(draft("AAPL", (2024, 5, 1), Side::Buy, dec!(100), dec!(110)));
    store.update_settings(SettingsPatch {
        initial_capital: Some(dec!(1000)),
        ..SettingsPatch::default()
    });

    // 메모리 상태는 유지
    assert!(store.trade(&trade.id).is_some());
    assert_eq!(store.snapshot().statistics.current_equity, dec!(1100));
    assert_eq!(store.storage().write_attempts, 2);
}

#[test]
fn test_dispatch_is_single_writer_path() {
    let mut store = TradingStore::new(MemoryStorage::new());
    store.initialize();

    store.dispatch(JournalAction::UpdateSettings(SettingsPatch {
        swap_fee: Some(dec!(0.25)),
        ..SettingsPatch::default()
    }));

    assert_eq!(store.settings().swap_fee, dec!(0.25));
    assert!(store.storage().contains_key(DEFAULT_SETTINGS_KEY));
}

#[test]
fn test_calendar_from_store() {
    let mut store = TradingStore::new(MemoryStorage::new());
    store.add_trade(draft("AAPL", (2024, 6, 12), Side::Buy, dec!(100), dec!(104)));

    let june = store.calendar_month(2024, 6).unwrap();
    assert_eq!(june.trading_days(), 1);
    assert!(june.days[11].is_profit());
    assert!(store.calendar_month(2024, 0).is_err());
}

#[test]
fn test_huge_quantities_saturate_instead_of_panicking() {
    let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
    let mut store = TradingStore::new(MemoryStorage::new());

    let mut small_move = draft("BTC/USD", (2024, 7, 1), Side::Buy, dec!(100), dec!(101));
    small_move.quantity = huge;
    let mut big_move = draft("BTC/USD", (2024, 7, 1), Side::Buy, dec!(100), dec!(200));
    big_move.quantity = huge;

    let first = store.add_trade(small_move);
    let second = store.add_trade(big_move);

    assert_eq!(first.pnl, huge);
    assert_eq!(second.pnl, Decimal::MAX);

    let state = store.snapshot();
    assert_eq!(state.trades.len(), 2);
    assert_eq!(state.statistics.winning_trades, 2);
    assert_eq!(state.statistics.total_profit, Decimal::MAX);
    assert_eq!(state.statistics.current_equity, Decimal::MAX);
    assert_eq!(state.instrument_performance[0].total_volume, Decimal::MAX);
    assert_eq!(state.equity_data.last().unwrap().equity, Decimal::MAX);

    let july = store.calendar_month(2024, 7).unwrap();
    assert_eq!(july.total_pnl(), Decimal::MAX);
    assert!(store.storage().contains_key(DEFAULT_TRADES_KEY));
}

#[test]
fn test_blank_annotations_do_not_drop_the_log() {
    let mut seed = TradingStore::new(MemoryStorage::new());
    seed.add_trade(draft("AAPL", (2024, 5, 1), Side::Buy, dec!(100), dec!(101)).with_mood(Mood::Neutral));
    seed.add_trade(draft("MSFT", (2024, 5, 2), Side::Buy, dec!(300), dec!(310)));

    let raw = seed.storage().get(DEFAULT_TRADES_KEY).unwrap().unwrap();
    let mut log: serde_json::Value = serde_json::from_str(&raw).unwrap();
    log[0]["mood"] = "".into();
    log[0]["label"] = "".into();
    log[1]["mood"] = "ecstatic".into();
    log[1]["label"] = "HODL".into();
    let storage = seed
        .into_storage()
        .with_entry(DEFAULT_TRADES_KEY, log.to_string());

    let mut store = TradingStore::new(storage);
    store.initialize();

    let trades = &store.snapshot().trades;
    assert_eq!(trades.len(), 2);
    assert!(trades.iter().all(|t| t.draft.mood.is_none() && t.draft.label.is_none()));
    assert_eq!(store.snapshot().statistics.total_trades, 2);
}

#[test]
fn test_subscriber_sees_loading_flag_during_initialize() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let storage = {
        let mut seed = TradingStore::new(MemoryStorage::new());
        seed.add_trade(draft("AAPL", (2024, 5, 1), Side::Buy, dec!(100), dec!(101)));
        seed.into_storage()
    };

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = TradingStore::new(storage);
    let recorder = Rc::clone(&seen);
    store.subscribe(move |state| {
        recorder.borrow_mut().push((state.is_loading, state.trades.len()));
    });

    store.initialize();

    // SetLoading(true), Load, SetLoading(false)
    assert_eq!(*seen.borrow(), vec![(true, 0), (true, 1), (false, 1)]);
    assert!(!store.snapshot().is_loading);

    // 두 번째 호출은 알림 없음
    store.initialize();
    assert_eq!(seen.borrow().len(), 3);
}

#[derive(Debug, Clone)]
enum Op {
    Add(bool, i64),
    DeleteFirst,
    Commission(i64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), 1i64..400).prop_map(|(buy, exit)| Op::Add(buy, exit)),
        Just(Op::DeleteFirst),
        (0i64..50).prop_map(Op::Commission),
    ]
}

proptest! {
    /// 어떤 변경 순서 후에도 통계는 현재 거래와 설정으로 다시 계산한 값과 같다.
    #[test]
    fn derived_views_track_state(ops in prop::collection::vec(arb_op(), 0..30)) {
        let mut store = TradingStore::new(MemoryStorage::new());
        store.initialize();

        for op in ops {
            match op {
                Op::Add(buy, exit) => {
                    let side = if buy { Side::Buy } else { Side::Sell };
                    store.add_trade(draft("EUR/USD", (2024, 7, 1), side, dec!(200), Decimal::from(exit)));
                }
                Op::DeleteFirst => {
                    if let Some(id) = store.snapshot().trades.first().map(|t| t.id.clone()) {
                        prop_assert!(store.delete_trade(&id));
                    }
                }
                Op::Commission(c) => {
                    store.update_settings(SettingsPatch {
                        commission: Some(Decimal::new(c, 1)),
                        ..SettingsPatch::default()
                    });
                }
            }

            let state = store.snapshot();
            prop_assert_eq!(
                &state.statistics,
                &calculate_statistics(&state.trades, &state.settings)
            );
            prop_assert_eq!(state.equity_data.len(), state.trades.len() + 1);
            prop_assert_eq!(
                state.equity_data.last().unwrap().equity,
                state.statistics.current_equity
            );
        }
    }
}
