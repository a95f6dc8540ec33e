//! # models::sentiment
//!
//! Defines [`SentimentRecord`] — the shared "market memory" that every
//! sentiment producer writes and the Sniper Loop reads on every scan.
//!
//! ## Wire format (market_memory.json)
//! ```json
//! { "global_trend": "BULLISH",
//!   "stock_sentiment": { "RELIANCE.NS": "POSITIVE" } }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ─── Trend ────────────────────────────────────────────────────────────────────

/// Global market regime ที่ Macro Brain เขียนไว้
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Trend {
    /// Parse จาก free text (case-insensitive)
    ///
    /// คืน `None` สำหรับค่าที่ไม่รู้จัก — caller ต้องเลือก default เอง
    /// แทนที่จะปล่อยให้ typo กลายเป็น NEUTRAL เงียบๆ
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BULLISH" => Some(Trend::Bullish),
            "BEARISH" => Some(Trend::Bearish),
            "NEUTRAL" => Some(Trend::Neutral),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Bullish => "🟢",
            Trend::Bearish => "🔴",
            Trend::Neutral => "⚪",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "BULLISH",
            Trend::Bearish => "BEARISH",
            Trend::Neutral => "NEUTRAL",
        }
    }
}

// ─── Sentiment ────────────────────────────────────────────────────────────────

/// Per-symbol sentiment ที่ News / Satellite Brain เขียนไว้
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Some(Sentiment::Positive),
            "NEGATIVE" => Some(Sentiment::Negative),
            "NEUTRAL" => Some(Sentiment::Neutral),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Sentiment::Positive => "🟢",
            Sentiment::Negative => "🔴",
            Sentiment::Neutral => "⚪",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

// ─── SentimentRecord ──────────────────────────────────────────────────────────

/// ภาพรวม Intelligence ทั้งหมด ณ ขณะนี้
///
/// Record นี้ถูกอ่าน-แก้-เขียนทั้งก้อนเสมอ (last-writer-wins) —
/// ไม่มี partial update, ไม่มี merge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub global_trend: Trend,
    #[serde(default)]
    pub stock_sentiment: HashMap<String, Sentiment>,
}

impl SentimentRecord {
    /// Sentiment ของ symbol — ไม่มี entry ⇒ NEUTRAL
    pub fn sentiment_for(&self, symbol: &str) -> Sentiment {
        self.stock_sentiment
            .get(symbol)
            .copied()
            .unwrap_or_default()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_parse_case_insensitive() {
        assert_eq!(Trend::parse("bullish"), Some(Trend::Bullish));
        assert_eq!(Trend::parse(" BEARISH "), Some(Trend::Bearish));
        assert_eq!(Trend::parse("sideways"), None);
    }

    #[test]
    fn test_sentiment_parse_rejects_unknown() {
        assert_eq!(Sentiment::parse("Positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("meh"), None);
    }

    #[test]
    fn test_absent_symbol_is_neutral() {
        let record = SentimentRecord::default();
        assert_eq!(record.sentiment_for("TCS.NS"), Sentiment::Neutral);
    }

    #[test]
    fn test_wire_format_round_trip() {
        let mut record = SentimentRecord {
            global_trend: Trend::Bullish,
            stock_sentiment: HashMap::new(),
        };
        record
            .stock_sentiment
            .insert("RELIANCE.NS".to_string(), Sentiment::Positive);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"BULLISH\""));
        assert!(json.contains("\"POSITIVE\""));

        let back: SentimentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_missing_stock_sentiment_field_defaults_empty() {
        let back: SentimentRecord =
            serde_json::from_str(r#"{ "global_trend": "BEARISH" }"#).unwrap();
        assert_eq!(back.global_trend, Trend::Bearish);
        assert!(back.stock_sentiment.is_empty());
    }
}
