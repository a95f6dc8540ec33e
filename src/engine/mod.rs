//! # engine
//!
//! `sniper`  — decision logic ล้วนๆ (RSI + Confluence Score → Verdict)
//! `scanner` — orchestration ของ 1 รอบ scan ทั้ง watchlist

pub mod scanner;
pub mod sniper;
