//! # ledger — Paper-Trading Ledger
//!
//! จำลองการยิง Order โดยไม่แตะโบรกเกอร์จริง — mutate `Portfolio` ได้ผ่าน
//! `buy` / `sell` เท่านั้น
//!
//! ## State machine ต่อ symbol
//! ```text
//! NO_POSITION ──(buy)──▶ OPEN ──(sell)──▶ NO_POSITION
//! ```
//! ไม่มี partial fill, ไม่มี averaging-in, ไม่มี short — symbol คือ
//! binary: ถืออยู่หรือไม่ถือ บังคับด้วย guard "Already Holding" /
//! "Not Holding"
//!
//! ## Invariants
//! - `balance >= 0` เสมอ (buy ถูกปัดตกถ้าเงินไม่พอ)
//! - Position เปิดได้สูงสุด 1 ต่อ symbol
//! - `history` append-only

use chrono::NaiveDate;
use tracing::info;

use crate::error::StoreError;
use crate::models::{ClosedTrade, Portfolio, Position};
use crate::store::JsonStore;

// ─── Trade Outcome ────────────────────────────────────────────────────────────

/// เหตุผลที่ Order ถูกปัดตก — ไม่ใช่ error, caller ต้อง branch เอง
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// มี Position เปิดอยู่แล้ว → ห้ามเปิดซ้ำ
    AlreadyHolding,
    /// เงินสดน้อยกว่า trade notional
    InsufficientFunds,
    /// ราคาแพงเกินจนซื้อไม่ได้แม้แต่ 1 หุ้น
    PriceTooHigh,
    /// สั่งขายทั้งที่ไม่ได้ถือ
    NotHolding,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            RejectReason::AlreadyHolding => "Already Holding",
            RejectReason::InsufficientFunds => "Insufficient Funds",
            RejectReason::PriceTooHigh => "Price too high for trade size",
            RejectReason::NotHolding => "Not Holding",
        };
        write!(f, "{msg}")
    }
}

/// ผลลัพธ์ของ `buy` / `sell` ที่ persist สำเร็จแล้ว
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Bought { qty: i64, cost: f64 },
    Sold { qty: i64, revenue: f64, profit: f64 },
    Rejected(RejectReason),
}

impl TradeOutcome {
    #[allow(dead_code)]
    pub fn is_executed(&self) -> bool {
        !matches!(self, TradeOutcome::Rejected(_))
    }
}

// ─── Ledger Status ────────────────────────────────────────────────────────────

/// สรุปพอร์ต ณ ขณะนี้ — derive สดจาก Portfolio ทุกครั้ง ไม่เก็บ aggregate
#[derive(Debug, Clone)]
pub struct LedgerStatus {
    pub cash: f64,
    pub invested: f64,
    pub open_positions: Vec<(String, Position)>,
    pub trades_closed: usize,
    pub total_pnl: f64,
}

impl LedgerStatus {
    /// ข้อความรายงานพอร์ต (สำหรับ `status` mode / Telegram)
    pub fn render(&self) -> String {
        let mut holdings = String::new();
        for (symbol, pos) in &self.open_positions {
            holdings.push_str(&format!(
                "• {symbol}: {} qty @ {:.1}\n",
                pos.qty, pos.buy_price
            ));
        }
        if holdings.is_empty() {
            holdings.push_str("No active trades.");
        }

        format!(
            "💼 **GHOST LEDGER**\n\
             💰 Cash: ₹{}\n\
             📉 Invested: ₹{}\n\
             📜 History: {} Trades (P&L: ₹{})\n\n\
             🔓 **Open Positions:**\n{holdings}",
            fmt_money(self.cash),
            fmt_money(self.invested),
            self.trades_closed,
            fmt_money(self.total_pnl),
        )
    }
}

// ─── PaperLedger ──────────────────────────────────────────────────────────────

pub struct PaperLedger {
    store: JsonStore<Portfolio>,
    initial_capital: f64,
    trade_notional: f64,
}

impl PaperLedger {
    pub fn new(path: impl Into<std::path::PathBuf>, initial_capital: f64, trade_notional: f64) -> Self {
        Self {
            store: JsonStore::new(path),
            initial_capital,
            trade_notional,
        }
    }

    fn load(&self) -> Portfolio {
        let capital = self.initial_capital;
        self.store.load_or(|| Portfolio::with_capital(capital))
    }

    // ─── Buy ──────────────────────────────────────────────────────────────────

    /// ซื้อด้วย notional คงที่: `qty = floor(trade_notional / price)`
    ///
    /// `Err` = persist ล้มเหลว (trade รอบนี้ถือว่าไม่เกิด — ไฟล์เดิมอยู่ครบ)
    pub fn buy(
        &self,
        symbol: &str,
        price: f64,
        date: NaiveDate,
    ) -> Result<TradeOutcome, StoreError> {
        let mut pf = self.load();

        if pf.holdings.contains_key(symbol) {
            return Ok(TradeOutcome::Rejected(RejectReason::AlreadyHolding));
        }
        if pf.balance < self.trade_notional {
            return Ok(TradeOutcome::Rejected(RejectReason::InsufficientFunds));
        }

        let qty = if price > 0.0 {
            (self.trade_notional / price).floor() as i64
        } else {
            0
        };
        if qty == 0 {
            return Ok(TradeOutcome::Rejected(RejectReason::PriceTooHigh));
        }

        let cost = qty as f64 * price;
        pf.balance -= cost;
        pf.holdings.insert(
            symbol.to_string(),
            Position { buy_price: price, qty, buy_date: date },
        );

        self.store.save(&pf)?;

        info!(%symbol, qty, price, cost, balance = pf.balance, "🟢 paper BUY executed");
        Ok(TradeOutcome::Bought { qty, cost })
    }

    // ─── Sell ─────────────────────────────────────────────────────────────────

    /// ปิด Position ทั้งก้อน แล้วบันทึกกำไร/ขาดทุนลง history
    pub fn sell(
        &self,
        symbol: &str,
        price: f64,
        date: NaiveDate,
    ) -> Result<TradeOutcome, StoreError> {
        let mut pf = self.load();

        let position = match pf.holdings.remove(symbol) {
            Some(p) => p,
            None => return Ok(TradeOutcome::Rejected(RejectReason::NotHolding)),
        };

        let qty = position.qty;
        let revenue = qty as f64 * price;
        let profit = revenue - qty as f64 * position.buy_price;

        pf.balance += revenue;
        pf.history.push(ClosedTrade {
            ticker: symbol.to_string(),
            buy_price: position.buy_price,
            sell_price: price,
            qty,
            profit,
            buy_date: position.buy_date,
            sell_date: date,
        });

        self.store.save(&pf)?;

        info!(%symbol, qty, price, profit, balance = pf.balance, "🔴 paper SELL executed");
        Ok(TradeOutcome::Sold { qty, revenue, profit })
    }

    // ─── Status ───────────────────────────────────────────────────────────────

    /// สรุปพอร์ต — read-only, คำนวณใหม่จาก record ปัจจุบันทั้งหมด
    pub fn status(&self) -> LedgerStatus {
        let pf = self.load();

        let mut open_positions: Vec<(String, Position)> = pf
            .holdings
            .iter()
            .map(|(s, p)| (s.clone(), p.clone()))
            .collect();
        open_positions.sort_by(|a, b| a.0.cmp(&b.0));

        LedgerStatus {
            cash: pf.balance,
            invested: pf.invested(),
            open_positions,
            trades_closed: pf.history.len(),
            total_pnl: pf.total_pnl(),
        }
    }
}

// ─── Money formatting ─────────────────────────────────────────────────────────

/// Format จำนวนเงินแบบมี comma คั่นหลักพัน เช่น `1,010,000.00`
pub fn fmt_money(value: f64) -> String {
    let negative = value < 0.0;
    let raw = format!("{:.2}", value.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((&raw, "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
