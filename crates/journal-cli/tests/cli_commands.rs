//! 명령 실행 통합 테스트 (메모리 저장소)

use chrono::{NaiveDate, TimeZone, Utc};
use journal_cli::commands::{report, risk, settings, trade};
use journal_cli::OutputFormat;
use journal_core::{JournalError, Side, DEFAULT_TRADES_KEY};
use journal_store::{FileStorage, KeyValueStore, MemoryStorage, TradingStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn add_args(instrument: &str, date: NaiveDate) -> trade::AddTradeArgs {
    trade::AddTradeArgs {
        instrument: instrument.to_string(),
        side: Side::Buy,
        entry: dec!(1.2000),
        exit: dec!(1.2100),
        quantity: dec!(10000),
        date: Some(date),
        time: None,
        commission: dec!(5),
        swap: dec!(1),
        notes: None,
        mood: None,
        label: None,
        preview: false,
    }
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

/// JSON 문자열 소수를 Decimal로 읽는다 (스케일 무시 비교용).
fn num(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[test]
fn test_add_then_list_json() {
    let mut store = TradingStore::new(MemoryStorage::new());
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();

    let mut out = Vec::new();
    let trade = trade::run_add(&mut store, &add_args("EUR/USD", jan(15)), now, &mut out, OutputFormat::Table)
        .unwrap()
        .unwrap();
    assert_eq!(trade.pnl, dec!(94));
    assert!(text(out).contains("+$94.00"));

    let mut out = Vec::new();
    let count = trade::run_list(&store, None, &mut out, OutputFormat::Json).unwrap();
    assert_eq!(count, 1);

    let listed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(listed[0]["instrument"], "EUR/USD");
    assert_eq!(listed[0]["type"], "buy");
    assert_eq!(listed[0]["time"], "09:30");
}

#[test]
fn test_preview_does_not_store() {
    let mut store = TradingStore::new(MemoryStorage::new());
    let mut args = add_args("EUR/USD", jan(15));
    args.preview = true;

    let mut out = Vec::new();
    let stored = trade::run_add(&mut store, &args, Utc::now(), &mut out, OutputFormat::Json).unwrap();

    assert!(stored.is_none());
    let preview: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(num(&preview["netPnl"]), dec!(94));
    assert!(store.snapshot().trades.is_empty());
    assert!(!store.storage().contains_key(DEFAULT_TRADES_KEY));
}

#[test]
fn test_add_rejects_invalid_draft() {
    let mut store = TradingStore::new(MemoryStorage::new());
    let mut args = add_args("  ", jan(15));
    args.quantity = dec!(0);

    let err = trade::run_add(&mut store, &args, Utc::now(), &mut Vec::new(), OutputFormat::Table)
        .unwrap_err();

    let journal_err = err.downcast_ref::<JournalError>().unwrap();
    assert!(journal_err.is_user_error());
    assert!(store.snapshot().trades.is_empty());
}

#[test]
fn test_edit_recomputes_and_missing_id_fails() {
    let mut store = TradingStore::new(MemoryStorage::new());
    let added = trade::run_add(&mut store, &add_args("EUR/USD", jan(15)), Utc::now(), &mut Vec::new(), OutputFormat::Table)
        .unwrap()
        .unwrap();

    let edit = trade::EditTradeArgs {
        id: added.id.clone(),
        exit: Some(dec!(1.1900)),
        ..trade::EditTradeArgs::default()
    };
    let updated = trade::run_edit(&mut store, &edit, &mut Vec::new(), OutputFormat::Table).unwrap();

    // 10000 * -0.01 - 6
    assert_eq!(updated.pnl, dec!(-106));
    assert_eq!(updated.created_at, added.created_at);
    assert_eq!(store.snapshot().statistics.losing_trades, 1);

    let missing = trade::EditTradeArgs {
        id: "missing".to_string(),
        ..trade::EditTradeArgs::default()
    };
    let err = trade::run_edit(&mut store, &missing, &mut Vec::new(), OutputFormat::Table).unwrap_err();
    assert!(matches!(err.downcast_ref::<JournalError>(), Some(JournalError::NotFound(_))));
}

#[test]
fn test_delete_unknown_id_fails() {
    let mut store = TradingStore::new(MemoryStorage::new());
    let err = trade::run_delete(&mut store, "nope", &mut Vec::new(), OutputFormat::Table).unwrap_err();
    assert!(matches!(err.downcast_ref::<JournalError>(), Some(JournalError::NotFound(_))));
}

#[test]
fn test_day_and_calendar_reports() {
    let mut store = TradingStore::new(MemoryStorage::new());
    for day in [15, 15, 20] {
        trade::run_add(&mut store, &add_args("EUR/USD", jan(day)), Utc::now(), &mut Vec::new(), OutputFormat::Table)
            .unwrap();
    }

    let mut out = Vec::new();
    trade::run_day(&store, jan(15), &mut out, OutputFormat::Json).unwrap();
    let day: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(day["trades"].as_array().unwrap().len(), 2);
    assert_eq!(num(&day["totalPnl"]), dec!(188));

    let mut out = Vec::new();
    trade::run_day(&store, jan(16), &mut out, OutputFormat::Table).unwrap();
    assert!(text(out).contains("거래 없음"));

    let mut out = Vec::new();
    report::run_calendar(&store, 2024, 1, &mut out, OutputFormat::Table).unwrap();
    let rendered = text(out);
    assert!(rendered.contains("January 2024"));
    assert!(rendered.contains(" 15+"));
    assert!(rendered.contains("거래일 2일"));
}

#[test]
fn test_stats_and_goals_json() {
    let mut store = TradingStore::new(MemoryStorage::new());
    trade::run_add(&mut store, &add_args("EUR/USD", jan(15)), Utc::now(), &mut Vec::new(), OutputFormat::Table)
        .unwrap();

    let mut out = Vec::new();
    report::run_stats(&store, &mut out, OutputFormat::Json).unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(stats["totalTrades"], 1);
    assert_eq!(stats["profitFactor"], "Infinity");

    let mut out = Vec::new();
    report::run_goals(&store, &mut out, OutputFormat::Json).unwrap();
    let goals: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(goals.as_array().unwrap().len(), 2);
    assert_eq!(goals[1]["type"], "weekly");
    assert_eq!(num(&goals[1]["progress"]), dec!(10));
}

#[test]
fn test_settings_update_and_validation() {
    let mut store = TradingStore::new(MemoryStorage::new());

    let args = settings::SettingsArgs {
        initial_capital: Some(dec!(25000)),
        ..settings::SettingsArgs::default()
    };
    let updated = settings::run_settings(&mut store, &args, &mut Vec::new(), OutputFormat::Table).unwrap();
    assert_eq!(updated.initial_capital, dec!(25000));
    assert_eq!(store.snapshot().statistics.current_equity, dec!(25000));

    let invalid = settings::SettingsArgs {
        commission: Some(dec!(-1)),
        ..settings::SettingsArgs::default()
    };
    assert!(settings::run_settings(&mut store, &invalid, &mut Vec::new(), OutputFormat::Table).is_err());
    assert_eq!(store.settings().commission, dec!(0));
}

#[test]
fn test_risk_defaults_and_kelly() {
    let store = TradingStore::new(MemoryStorage::new());
    let args = risk::RiskArgs {
        balance: None,
        risk: None,
        entry: dec!(1.2000),
        stop: dec!(1.1950),
        take_profit: Some(dec!(1.2100)),
        kelly: false,
    };

    let result = risk::run_risk(&store, &args, &mut Vec::new(), OutputFormat::Table).unwrap();
    assert_eq!(result.risk_amount, dec!(200));
    assert_eq!(result.position_size, dec!(40000));
    assert_eq!(result.risk_reward_ratio, dec!(2));

    // 기록이 없으면 Kelly 비율은 0
    let kelly = risk::RiskArgs { kelly: true, ..args };
    assert_eq!(risk::build_input(&store, &kelly).risk_percentage, dec!(0));
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = TradingStore::new(FileStorage::new(dir.path()));
        store.initialize();
        trade::run_add(&mut store, &add_args("AAPL", jan(3)), Utc::now(), &mut Vec::new(), OutputFormat::Table)
            .unwrap();
    }

    let mut store = TradingStore::new(FileStorage::new(dir.path()));
    store.initialize();
    let mut out = Vec::new();
    trade::run_list(&store, Some(jan(3)), &mut out, OutputFormat::Table).unwrap();
    assert!(text(out).contains("AAPL"));
    assert!(store.storage().get(DEFAULT_TRADES_KEY).unwrap().is_some());
}
