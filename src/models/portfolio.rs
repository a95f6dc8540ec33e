//! # models::portfolio
//!
//! Defines structs for the **paper portfolio** — open holdings and the
//! append-only trade history.
//!
//! ## Why separate from the ledger logic?
//! `Portfolio`   = ของที่ persist ลง portfolio.json (wire format ตายตัว)
//! `PaperLedger` = logic ที่ mutate Portfolio ผ่าน buy/sell เท่านั้น
//!
//! ## Wire format (portfolio.json)
//! ```json
//! { "balance": 950000.0,
//!   "holdings": { "RELIANCE.NS": { "buy_price": 100.0, "qty": 500, "buy_date": "2026-01-05" } },
//!   "history": [ { "ticker": "RELIANCE.NS", "buy_price": 100.0, "sell_price": 120.0,
//!                  "qty": 500, "profit": 10000.0,
//!                  "buy_date": "2026-01-05", "sell_date": "2026-02-10" } ] }
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Position ─────────────────────────────────────────────────────────────────

/// Position ที่เปิดอยู่ ณ ตอนนี้ — มีได้สูงสุด 1 ต่อ symbol
///
/// ไม่มี averaging-in, ไม่มี partial fill: symbol นึงคือ "ถืออยู่" หรือ
/// "ไม่ถือ" เท่านั้น
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub buy_price: f64,
    pub qty: i64,
    pub buy_date: NaiveDate,
}

impl Position {
    /// มูลค่าตอนเข้า (ใช้คำนวณ invested รวม)
    pub fn cost(&self) -> f64 {
        self.qty as f64 * self.buy_price
    }
}

// ─── ClosedTrade ──────────────────────────────────────────────────────────────

/// บันทึกประวัติ Trade ที่ปิดแล้ว — append-only, ไม่มีวันลบ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub ticker: String,
    pub buy_price: f64,
    pub sell_price: f64,
    pub qty: i64,
    pub profit: f64,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
}

// ─── Portfolio ────────────────────────────────────────────────────────────────

/// สถานะพอร์ตทั้งหมดที่ persist ลงไฟล์
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub balance: f64,
    #[serde(default)]
    pub holdings: HashMap<String, Position>,
    #[serde(default)]
    pub history: Vec<ClosedTrade>,
}

impl Portfolio {
    /// พอร์ตเปล่าที่มีเงินสดตั้งต้น
    pub fn with_capital(initial_capital: f64) -> Self {
        Self {
            balance: initial_capital,
            holdings: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// เงินที่จมอยู่ใน Position เปิดทั้งหมด (Σ qty × buy_price)
    ///
    /// คำนวณสดทุกครั้ง — ไม่เก็บ aggregate แยกเพื่อกัน drift
    pub fn invested(&self) -> f64 {
        self.holdings.values().map(Position::cost).sum()
    }

    /// กำไร/ขาดทุนรวมของ Trade ที่ปิดแล้ว
    pub fn total_pnl(&self) -> f64 {
        self.history.iter().map(|t| t.profit).sum()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_wire_format_round_trip() {
        let mut pf = Portfolio::with_capital(950_000.0);
        pf.holdings.insert(
            "RELIANCE.NS".to_string(),
            Position {
                buy_price: 100.0,
                qty: 500,
                buy_date: date("2026-01-05"),
            },
        );
        pf.history.push(ClosedTrade {
            ticker: "TCS.NS".to_string(),
            buy_price: 3000.0,
            sell_price: 3100.0,
            qty: 16,
            profit: 1600.0,
            buy_date: date("2026-01-02"),
            sell_date: date("2026-01-20"),
        });

        let json = serde_json::to_string_pretty(&pf).unwrap();
        let back: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pf);
    }

    #[test]
    fn test_date_serializes_as_iso() {
        let pos = Position {
            buy_price: 100.0,
            qty: 1,
            buy_date: date("2026-01-05"),
        };
        let json = serde_json::to_string(&pos).unwrap();
        assert!(json.contains("\"2026-01-05\""));
    }

    #[test]
    fn test_invested_and_pnl_are_derived() {
        let mut pf = Portfolio::with_capital(100.0);
        assert_eq!(pf.invested(), 0.0);
        assert_eq!(pf.total_pnl(), 0.0);

        pf.holdings.insert(
            "A.NS".to_string(),
            Position { buy_price: 10.0, qty: 3, buy_date: date("2026-01-01") },
        );
        pf.holdings.insert(
            "B.NS".to_string(),
            Position { buy_price: 5.0, qty: 2, buy_date: date("2026-01-01") },
        );
        assert_eq!(pf.invested(), 40.0);
    }
}
