//! # error
//!
//! Typed domain errors. Two failure families exist in this system:
//!
//! - [`FetchError`] — remote call ล้มเหลว (quote feed / AI / mirror).
//!   Recover ด้วย fallback value ที่จุดเรียกเสมอ ไม่เคย propagate เป็น
//!   hard failure ข้าม symbol
//! - [`StoreError`] — persist ไฟล์ JSON ล้มเหลว. Caller เลือกเองว่า
//!   จะ log-and-continue (sentiment producer) หรือ skip trade (ledger)
//!
//! Business-rule rejections ("Already Holding", "Not Holding", ...) are
//! **not** errors — they live in `ledger::TradeOutcome` and callers are
//! expected to branch on them, not crash.

use thiserror::Error;

// ─── FetchError ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint ติดต่อไม่ได้เลย (network / timeout / DNS)
    #[error("endpoint unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Server ตอบมาแต่ status ไม่ success
    #[error("HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// Response parse ไม่ได้ตาม schema ที่คาด
    #[error("bad payload: {0}")]
    BadPayload(String),
}

// ─── StoreError ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialize error: {0}")]
    Serde(#[from] serde_json::Error),
}
