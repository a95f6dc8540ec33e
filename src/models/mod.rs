//! # models
//!
//! Domain structs ที่ persist ลงไฟล์ JSON และแชร์กันทุก Loop

pub mod portfolio;
pub mod sentiment;

pub use portfolio::{ClosedTrade, Portfolio, Position};
pub use sentiment::{Sentiment, SentimentRecord, Trend};

/// แปลง symbol เป็นรูปแบบมาตรฐาน: uppercase + exchange suffix
///
/// ทุกจุดที่รับ symbol จากภายนอก (watchlist, sentiment producer, scanner)
/// ต้องผ่านฟังก์ชันนี้ก่อน — มิฉะนั้น `"RELIANCE"` กับ `"RELIANCE.NS"`
/// จะกลายเป็นคนละ key ใน holdings/sentiment map
pub fn canonical_symbol(raw: &str, suffix: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.ends_with(suffix) {
        upper
    } else {
        format!("{upper}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_appends_suffix() {
        assert_eq!(canonical_symbol("reliance", ".NS"), "RELIANCE.NS");
    }

    #[test]
    fn test_canonical_keeps_existing_suffix() {
        assert_eq!(canonical_symbol("TCS.NS", ".NS"), "TCS.NS");
    }

    #[test]
    fn test_canonical_trims_whitespace() {
        assert_eq!(canonical_symbol("  itc ", ".NS"), "ITC.NS");
    }
}
