//! # memory — Market Memory (Sentiment Store)
//!
//! สมองส่วนกลางของระบบ: Macro Brain / News Brain เขียน sentiment ลงที่นี่
//! แล้ว Sniper Loop อ่านออกไปเป็น **Confluence Score** ตอนตัดสินใจเทรด
//!
//! ## Confluence Score (0–100, additive)
//! ```text
//! score = 50                     (neutral midpoint)
//!       + 20 if BULLISH / -20 if BEARISH
//!       + 30 if POSITIVE / -30 if NEGATIVE
//! ```
//! Score เป็น heuristic บวกกันตรงๆ — ไม่ใช่ probability และไม่ clamp
//! (ถึง 0 หรือ 100 ได้ก็ต่อเมื่อทั้งสอง signal เห็นตรงกันเท่านั้น)
//!
//! ## Remote mirror
//! ถ้า config `MEMORY_MIRROR_URL` ไว้ (เช่น raw GitHub copy ของ
//! market_memory.json) → `load` จะลองอ่าน mirror ก่อน แล้ว fallback
//! มาไฟล์ local เงียบๆ ถ้า mirror ติดต่อไม่ได้ — ผู้เรียกไม่เห็น error

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::models::{canonical_symbol, Sentiment, SentimentRecord, Trend};
use crate::store::JsonStore;

// ─── Score weights ────────────────────────────────────────────────────────────

const BASE_SCORE: i32 = 50;
const TREND_WEIGHT: i32 = 20;
const SENTIMENT_WEIGHT: i32 = 30;

// ─── MarketMemory ─────────────────────────────────────────────────────────────

pub struct MarketMemory {
    store: JsonStore<SentimentRecord>,
    mirror_url: Option<String>,
    exchange_suffix: String,
}

impl MarketMemory {
    pub fn new(
        path: impl Into<std::path::PathBuf>,
        mirror_url: Option<String>,
        exchange_suffix: impl Into<String>,
    ) -> Self {
        Self {
            store: JsonStore::new(path),
            mirror_url,
            exchange_suffix: exchange_suffix.into(),
        }
    }

    // ─── Load ─────────────────────────────────────────────────────────────────

    /// อ่านจากไฟล์ local เท่านั้น (ไม่แตะ network)
    pub fn load_local(&self) -> SentimentRecord {
        self.store.load()
    }

    /// อ่าน record ล่าสุด: mirror ก่อน (ถ้ามี) → local → default
    ///
    /// Degrade ทุกทาง — ฟังก์ชันนี้ไม่มีวัน fail
    pub async fn load(&self, client: &reqwest::Client) -> SentimentRecord {
        if let Some(url) = &self.mirror_url {
            match fetch_mirror(client, url).await {
                Ok(record) => {
                    debug!("market memory loaded from mirror");
                    return record;
                }
                Err(e) => {
                    warn!(error = %e, "mirror unreachable — falling back to local memory");
                }
            }
        }
        self.load_local()
    }

    // ─── Producers ────────────────────────────────────────────────────────────

    /// Macro Brain เรียกตอนสรุป regime ได้ (BULLISH/BEARISH/NEUTRAL)
    ///
    /// เขียนแบบ best-effort: save พลาด ⇒ log แล้วไปต่อ ไม่ halt ผู้เรียก
    pub fn set_global_trend(&self, trend: Trend) {
        let mut record = self.load_local();
        record.global_trend = trend;

        match self.store.save(&record) {
            Ok(()) => info!(trend = trend.as_str(), "🌍 global trend updated"),
            Err(e) => warn!(error = %e, "market memory save failed — trend update lost"),
        }
    }

    /// News / Satellite Brain เรียกต่อ symbol (POSITIVE/NEGATIVE/NEUTRAL)
    pub fn set_stock_sentiment(&self, raw_symbol: &str, sentiment: Sentiment) {
        let symbol = canonical_symbol(raw_symbol, &self.exchange_suffix);

        let mut record = self.load_local();
        record.stock_sentiment.insert(symbol.clone(), sentiment);

        match self.store.save(&record) {
            Ok(()) => info!(%symbol, sentiment = sentiment.as_str(), "📡 stock sentiment updated"),
            Err(e) => warn!(error = %e, %symbol, "market memory save failed — sentiment update lost"),
        }
    }

    // ─── Confluence ───────────────────────────────────────────────────────────

    /// คะแนนความมั่นใจจาก record ที่โหลดมาแล้ว (pure, deterministic)
    pub fn confluence_score(record: &SentimentRecord, symbol: &str) -> i32 {
        let mut score = BASE_SCORE;

        score += match record.global_trend {
            Trend::Bullish => TREND_WEIGHT,
            Trend::Bearish => -TREND_WEIGHT,
            Trend::Neutral => 0,
        };

        score += match record.sentiment_for(symbol) {
            Sentiment::Positive => SENTIMENT_WEIGHT,
            Sentiment::Negative => -SENTIMENT_WEIGHT,
            Sentiment::Neutral => 0,
        };

        score
    }

    /// โหลด record ล่าสุด + คำนวณ score ของ symbol เดียว
    pub async fn get_confluence_score(&self, client: &reqwest::Client, raw_symbol: &str) -> i32 {
        let symbol = canonical_symbol(raw_symbol, &self.exchange_suffix);
        let record = self.load(client).await;
        Self::confluence_score(&record, &symbol)
    }

    // ─── Intel Report ─────────────────────────────────────────────────────────

    /// สรุป Intelligence ทั้งหมดเป็นข้อความ (ใช้ใน `intel` mode / Telegram)
    pub fn render_intel(record: &SentimentRecord) -> String {
        let mut msg = format!(
            "🧠 **MARKET INTELLIGENCE**\n\n🌍 **Global Regime:** {} {}\n\n📡 **Stock Sentiment:**\n",
            record.global_trend.icon(),
            record.global_trend.as_str(),
        );

        if record.stock_sentiment.is_empty() {
            msg.push_str("• No intel recorded yet.\n");
        } else {
            let mut entries: Vec<_> = record.stock_sentiment.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (symbol, sentiment) in entries {
                msg.push_str(&format!(
                    "• {symbol}: {} {}\n",
                    sentiment.icon(),
                    sentiment.as_str()
                ));
            }
        }

        msg
    }
}

// ─── Mirror fetch ─────────────────────────────────────────────────────────────

async fn fetch_mirror(client: &reqwest::Client, url: &str) -> Result<SentimentRecord, FetchError> {
    // เติมเลขสุ่มท้าย URL เพื่อ bypass CDN cache ของ raw host
    let rand_id: u32 = rand::thread_rng().gen_range(1..100_000);
    let busted = if url.contains('?') {
        format!("{url}&t={rand_id}")
    } else {
        format!("{url}?t={rand_id}")
    };

    let resp = client
        .get(&busted)
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(FetchError::BadStatus {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }

    resp.json::<SentimentRecord>()
        .await
        .map_err(|e| FetchError::BadPayload(e.to_string()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn memory(name: &str) -> MarketMemory {
        let path = std::env::temp_dir().join(format!(
            "ghostledger-memory-{}-{name}.json",
            uuid::Uuid::new_v4()
        ));
        MarketMemory::new(path, None, ".NS")
    }

    fn record(trend: Trend, symbol: &str, sentiment: Sentiment) -> SentimentRecord {
        let mut stock_sentiment = HashMap::new();
        stock_sentiment.insert(symbol.to_string(), sentiment);
        SentimentRecord { global_trend: trend, stock_sentiment }
    }

    #[test]
    fn test_score_extremes_and_midpoint() {
        let sym = "RELIANCE.NS";
        assert_eq!(
            MarketMemory::confluence_score(&record(Trend::Bullish, sym, Sentiment::Positive), sym),
            100
        );
        assert_eq!(
            MarketMemory::confluence_score(&record(Trend::Bearish, sym, Sentiment::Negative), sym),
            0
        );
        assert_eq!(
            MarketMemory::confluence_score(&SentimentRecord::default(), sym),
            50
        );
    }

    #[test]
    fn test_score_partial_signals() {
        let sym = "TCS.NS";
        assert_eq!(
            MarketMemory::confluence_score(&record(Trend::Bullish, sym, Sentiment::Neutral), sym),
            70
        );
        assert_eq!(
            MarketMemory::confluence_score(&record(Trend::Neutral, sym, Sentiment::Negative), sym),
            20
        );
        assert_eq!(
            MarketMemory::confluence_score(&record(Trend::Bearish, sym, Sentiment::Positive), sym),
            60
        );
    }

    #[test]
    fn test_score_is_deterministic_for_fixed_record() {
        let sym = "ITC.NS";
        let rec = record(Trend::Bullish, sym, Sentiment::Negative);
        let first = MarketMemory::confluence_score(&rec, sym);
        assert_eq!(first, 40);
        assert_eq!(MarketMemory::confluence_score(&rec, sym), first);
    }

    #[test]
    fn test_set_global_trend_persists() {
        let mem = memory("trend");
        mem.set_global_trend(Trend::Bearish);
        assert_eq!(mem.load_local().global_trend, Trend::Bearish);

        let _ = std::fs::remove_file(mem.store.path());
    }

    #[test]
    fn test_set_stock_sentiment_canonicalizes_symbol() {
        let mem = memory("sentiment");
        mem.set_stock_sentiment("reliance", Sentiment::Positive);

        let rec = mem.load_local();
        assert_eq!(rec.sentiment_for("RELIANCE.NS"), Sentiment::Positive);
        // update ทับ entry เดิม ไม่งอก key ใหม่
        mem.set_stock_sentiment("RELIANCE.NS", Sentiment::Negative);
        let rec = mem.load_local();
        assert_eq!(rec.stock_sentiment.len(), 1);
        assert_eq!(rec.sentiment_for("RELIANCE.NS"), Sentiment::Negative);

        let _ = std::fs::remove_file(mem.store.path());
    }

    #[test]
    fn test_intel_report_lists_symbols_sorted() {
        let mut rec = record(Trend::Bullish, "ZOMATO.NS", Sentiment::Negative);
        rec.stock_sentiment
            .insert("ADANIENT.NS".to_string(), Sentiment::Positive);

        let report = MarketMemory::render_intel(&rec);
        assert!(report.contains("BULLISH"));
        let adani = report.find("ADANIENT.NS").unwrap();
        let zomato = report.find("ZOMATO.NS").unwrap();
        assert!(adani < zomato);
    }
}
