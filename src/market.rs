//! # market — Quote Feed
//!
//! ดึงราคาปิดล่าสุด + RSI(14) ต่อ symbol
//!
//! ## Data Sources (เลือกได้)
//! 1. Quote bridge API — ถ้ามี `MARKET_URL` ใน .env
//! 2. Mock quote — สำหรับ dev/test โดยไม่ต้องมี bridge
//!
//! Fetch พลาดเป็นเรื่องปกติ (rate limit / ตลาดปิด) — caller ต้อง
//! ข้าม symbol นั้นแล้วไปต่อ ห้าม abort ทั้ง scan

use serde::Deserialize;
use tracing::warn;

use crate::config::Config;
use crate::error::FetchError;

// ─── Quote ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    /// ราคาปิดล่าสุด
    pub price: f64,
    /// RSI 14 period — bridge บางตัวไม่ส่งมา
    pub rsi_14: Option<f64>,
}

/// Response format จาก quote bridge `/api/quote`
#[derive(Debug, Deserialize)]
struct BridgeQuoteResponse {
    symbol: String,
    price: f64,
    rsi_14: Option<f64>,
}

// ─── Fetch ────────────────────────────────────────────────────────────────────

pub async fn fetch_quote(
    client: &reqwest::Client,
    config: &Config,
    symbol: &str,
) -> Result<Quote, FetchError> {
    if let Some(base_url) = &config.market_url {
        fetch_from_bridge(client, base_url, symbol).await
    } else {
        warn!(%symbol, "MARKET_URL not set — using MOCK quote");
        Ok(mock_quote(symbol))
    }
}

async fn fetch_from_bridge(
    client: &reqwest::Client,
    base_url: &str,
    symbol: &str,
) -> Result<Quote, FetchError> {
    let url = format!("{base_url}/api/quote?symbol={symbol}");

    let resp = client
        .get(&url)
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(FetchError::BadStatus {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }

    let parsed: BridgeQuoteResponse = resp
        .json()
        .await
        .map_err(|e| FetchError::BadPayload(e.to_string()))?;

    if parsed.price <= 0.0 {
        return Err(FetchError::BadPayload(format!(
            "non-positive price {} for {symbol}",
            parsed.price
        )));
    }

    Ok(Quote {
        symbol: parsed.symbol,
        price: parsed.price,
        rsi_14: parsed.rsi_14,
    })
}

/// Mock quote สำหรับ development (ไม่ต้องมี bridge)
fn mock_quote(symbol: &str) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price: 1450.0,
        rsi_14: Some(52.4),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_quote_has_indicator() {
        let q = mock_quote("RELIANCE.NS");
        assert_eq!(q.symbol, "RELIANCE.NS");
        assert!(q.price > 0.0);
        assert!(q.rsi_14.is_some());
    }

    #[test]
    fn test_bridge_response_parses() {
        let json = r#"{ "symbol": "TCS.NS", "price": 3010.5, "rsi_14": 28.3 }"#;
        let parsed: BridgeQuoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.symbol, "TCS.NS");
        assert_eq!(parsed.rsi_14, Some(28.3));
    }

    #[test]
    fn test_bridge_response_without_rsi() {
        let json = r#"{ "symbol": "TCS.NS", "price": 3010.5 }"#;
        let parsed: BridgeQuoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rsi_14, None);
    }
}
