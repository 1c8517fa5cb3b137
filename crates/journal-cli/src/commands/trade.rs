//! 거래 기록 명령 (추가, 수정, 삭제, 조회).

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use clap::Args;
use journal_core::{
    parse_date, parse_time, JournalError, Mood, PnlBreakdown, Side, Trade, TradeDraft, TradeLabel,
};
use journal_store::{KeyValueStore, TradingStore};
use rust_decimal::Decimal;
use tracing::info;

use crate::output::{money, pct, short_id, signed_money, trend_icon, write_json, OutputFormat};

/// 거래 추가 인자.
#[derive(Debug, Clone, Args)]
pub struct AddTradeArgs {
    /// 종목 (예: EUR/USD, AAPL)
    #[arg(short, long)]
    pub instrument: String,

    /// 거래 방향 (buy/long, sell/short)
    #[arg(short, long)]
    pub side: Side,

    /// 진입 가격
    #[arg(long)]
    pub entry: Decimal,

    /// 청산 가격
    #[arg(long)]
    pub exit: Decimal,

    /// 수량
    #[arg(short, long)]
    pub quantity: Decimal,

    /// 거래 날짜 (YYYY-MM-DD, 기본: 오늘)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// 거래 시각 (HH:MM, 기본: 현재 시각)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    /// 거래 수수료
    #[arg(long, default_value = "0")]
    pub commission: Decimal,

    /// 스왑 비용
    #[arg(long, default_value = "0")]
    pub swap: Decimal,

    /// 메모
    #[arg(long)]
    pub notes: Option<String>,

    /// 감정 상태 (confident, neutral, anxious, frustrated, uncertain)
    #[arg(long)]
    pub mood: Option<Mood>,

    /// 매매 유형 (예: "Day Trading", swing-trading)
    #[arg(long)]
    pub label: Option<TradeLabel>,

    /// 저장하지 않고 손익만 미리보기
    #[arg(long)]
    pub preview: bool,
}

impl AddTradeArgs {
    /// 인자를 거래 초안으로 변환합니다. 날짜/시각이 없으면 `now`를 사용합니다.
    pub fn to_draft(&self, now: DateTime<Utc>) -> TradeDraft {
        let date = self.date.unwrap_or_else(|| now.date_naive());
        let time = self.time.unwrap_or_else(|| {
            let t = now.time();
            NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t)
        });

        let mut draft = TradeDraft::new(
            self.instrument.trim(),
            self.side,
            self.entry,
            self.exit,
            self.quantity,
            date,
            time,
        )
        .with_fees(self.commission, self.swap);

        draft.notes = self.notes.clone().filter(|n| !n.trim().is_empty());
        draft.mood = self.mood;
        draft.label = self.label;
        draft
    }
}

/// 거래 수정 인자. 지정한 필드만 바뀝니다.
#[derive(Debug, Clone, Default, Args)]
pub struct EditTradeArgs {
    /// 거래 ID
    pub id: String,

    #[arg(short, long)]
    pub instrument: Option<String>,

    #[arg(short, long)]
    pub side: Option<Side>,

    #[arg(long)]
    pub entry: Option<Decimal>,

    #[arg(long)]
    pub exit: Option<Decimal>,

    #[arg(short, long)]
    pub quantity: Option<Decimal>,

    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    #[arg(long)]
    pub commission: Option<Decimal>,

    #[arg(long)]
    pub swap: Option<Decimal>,

    /// 메모 (빈 문자열이면 삭제)
    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub mood: Option<Mood>,

    #[arg(long)]
    pub label: Option<TradeLabel>,
}

impl EditTradeArgs {
    /// 지정된 필드를 초안에 반영합니다.
    pub fn apply_to(&self, draft: &mut TradeDraft) {
        if let Some(instrument) = &self.instrument {
            draft.instrument = instrument.trim().to_string();
        }
        if let Some(side) = self.side {
            draft.side = side;
        }
        if let Some(entry) = self.entry {
            draft.entry_price = entry;
        }
        if let Some(exit) = self.exit {
            draft.exit_price = exit;
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if let Some(time) = self.time {
            draft.time = time;
        }
        if let Some(commission) = self.commission {
            draft.commission = commission;
        }
        if let Some(swap) = self.swap {
            draft.swap = swap;
        }
        if let Some(notes) = &self.notes {
            draft.notes = Some(notes.clone()).filter(|n| !n.trim().is_empty());
        }
        if let Some(mood) = self.mood {
            draft.mood = Some(mood);
        }
        if let Some(label) = self.label {
            draft.label = Some(label);
        }
    }
}

/// 거래를 검증하고 추가합니다. `--preview`면 저장하지 않습니다.
pub fn run_add<S: KeyValueStore, W: Write>(
    store: &mut TradingStore<S>,
    args: &AddTradeArgs,
    now: DateTime<Utc>,
    out: &mut W,
    format: OutputFormat,
) -> Result<Option<Trade>> {
    let draft = args.to_draft(now);
    draft.validate()?;

    if args.preview {
        let preview = PnlBreakdown::preview(&draft);
        match format {
            OutputFormat::Json => write_json(out, &preview)?,
            OutputFormat::Table => {
                writeln!(out, "🔍 손익 미리보기 ({} {})", draft.side, draft.instrument)?;
                writeln!(out, "  총손익:   {}", signed_money(preview.gross_pnl))?;
                writeln!(out, "  수수료:   {}", money(preview.fees))?;
                writeln!(out, "  순손익:   {}", signed_money(preview.net_pnl))?;
                writeln!(out, "  수익률:   {}", pct(preview.percentage))?;
            }
        }
        return Ok(None);
    }

    let trade = store.add_trade(draft);
    info!(trade_id = %trade.id, "거래 추가 완료");

    match format {
        OutputFormat::Json => write_json(out, &trade)?,
        OutputFormat::Table => {
            writeln!(out, "✅ 거래가 기록되었습니다")?;
            write_trade_detail(out, &trade)?;
        }
    }
    Ok(Some(trade))
}

/// 기존 거래를 수정합니다.
pub fn run_edit<S: KeyValueStore, W: Write>(
    store: &mut TradingStore<S>,
    args: &EditTradeArgs,
    out: &mut W,
    format: OutputFormat,
) -> Result<Trade> {
    store.initialize();
    let mut trade = store
        .trade(&args.id)
        .cloned()
        .ok_or_else(|| JournalError::NotFound(format!("거래 {}", args.id)))?;

    args.apply_to(&mut trade.draft);
    trade.draft.validate()?;

    store.update_trade(trade);
    let updated = store
        .trade(&args.id)
        .cloned()
        .ok_or_else(|| JournalError::NotFound(format!("거래 {}", args.id)))?;

    match format {
        OutputFormat::Json => write_json(out, &updated)?,
        OutputFormat::Table => {
            writeln!(out, "✏️  거래가 수정되었습니다")?;
            write_trade_detail(out, &updated)?;
        }
    }
    Ok(updated)
}

/// 거래를 삭제합니다.
pub fn run_delete<S: KeyValueStore, W: Write>(
    store: &mut TradingStore<S>,
    id: &str,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    if !store.delete_trade(id) {
        return Err(JournalError::NotFound(format!("거래 {}", id)).into());
    }

    match format {
        OutputFormat::Json => write_json(out, &serde_json::json!({ "deleted": id }))?,
        OutputFormat::Table => writeln!(out, "🗑️  거래가 삭제되었습니다: {}", id)?,
    }
    Ok(())
}

/// 거래 목록을 출력합니다. 날짜를 지정하면 해당 날짜만 출력합니다.
pub fn run_list<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    date: Option<NaiveDate>,
    out: &mut W,
    format: OutputFormat,
) -> Result<usize> {
    let mut trades = match date {
        Some(date) => store.trades_by_date(date),
        None => store.snapshot().trades.clone(),
    };
    trades.sort_by_key(|t| t.timestamp);

    match format {
        OutputFormat::Json => write_json(out, &trades)?,
        OutputFormat::Table => {
            if trades.is_empty() {
                writeln!(out, "기록된 거래가 없습니다")?;
            } else {
                write_trade_table(out, &trades)?;
            }
        }
    }
    Ok(trades.len())
}

/// 하루치 거래 요약을 출력합니다.
pub fn run_day<S: KeyValueStore, W: Write>(
    store: &TradingStore<S>,
    date: NaiveDate,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let day = store.day_data(date);

    match format {
        OutputFormat::Json => write_json(out, &day)?,
        OutputFormat::Table => match day {
            None => writeln!(out, "{} 거래 없음", date)?,
            Some(day) => {
                writeln!(
                    out,
                    "{} {}  거래 {}건  손익 {}  수익률 {}",
                    trend_icon(day.total_pnl),
                    date,
                    day.trades.len(),
                    signed_money(day.total_pnl),
                    pct(day.total_percentage)
                )?;
                write_trade_table(out, &day.trades)?;
            }
        },
    }
    Ok(())
}

fn write_trade_table<W: Write>(out: &mut W, trades: &[Trade]) -> Result<()> {
    writeln!(
        out,
        "{:<8}  {:<10} {:<5}  {:<12} {:<4}  {:>12}  {:>12}  {:>12}  {:>12}  {:>8}",
        "ID", "날짜", "시각", "종목", "방향", "수량", "진입", "청산", "손익", "수익률"
    )?;
    for trade in trades {
        let d = &trade.draft;
        writeln!(
            out,
            "{:<8}  {:<10} {:<5}  {:<12} {:<4}  {:>12}  {:>12}  {:>12}  {:>12}  {:>8}",
            short_id(&trade.id),
            d.date,
            d.time.format("%H:%M"),
            d.instrument,
            d.side,
            d.quantity,
            d.entry_price,
            d.exit_price,
            signed_money(trade.pnl),
            pct(trade.percentage)
        )?;
    }
    Ok(())
}

fn write_trade_detail<W: Write>(out: &mut W, trade: &Trade) -> Result<()> {
    let d = &trade.draft;
    writeln!(out, "  ID:     {}", trade.id)?;
    writeln!(out, "  일시:   {} {}", d.date, d.time.format("%H:%M"))?;
    writeln!(
        out,
        "  거래:   {} {} {} @ {} → {}",
        d.side, d.quantity, d.instrument, d.entry_price, d.exit_price
    )?;
    writeln!(out, "  수수료: {} / 스왑 {}", money(d.commission), money(d.swap))?;
    writeln!(
        out,
        "  손익:   {} {} ({})",
        trend_icon(trade.pnl),
        signed_money(trade.pnl),
        pct(trade.percentage)
    )?;
    if let Some(mood) = d.mood {
        writeln!(out, "  감정:   {} {}", mood.emoji(), mood.name())?;
    }
    if let Some(label) = d.label {
        writeln!(out, "  유형:   {}", label)?;
    }
    if let Some(notes) = &d.notes {
        writeln!(out, "  메모:   {}", notes)?;
    }
    Ok(())
}
