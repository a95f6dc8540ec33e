//! # brain — AI Sentiment Producers
//!
//! Brain ทุกตัวจบที่การเขียน Market Memory:
//! - **Macro Brain** — indicator รวม → AI → `global_trend`
//! - **Headline Brain** — ข่าวต่อ symbol → AI → `stock_sentiment`
//!
//! ทุก failure (AI ล่ม / JSON พัง) degrade เป็น error ที่ log ได้ —
//! Market Memory เดิมอยู่ครบ ไม่ถูกเขียนทับด้วยข้อมูลพังๆ

pub mod ai;
pub mod prompt;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::memory::MarketMemory;
use crate::models::{Sentiment, Trend};
use crate::notify;

// ─── Macro Brain ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MacroVerdict {
    pub trend: Trend,
    pub report: String,
}

#[derive(Deserialize)]
struct AiMacroJson {
    trend: String,
    report: String,
}

/// 1 รอบของ Macro Brain: indicators → AI → global trend → แจ้งเตือน
pub async fn run_macro_cycle(
    client: &reqwest::Client,
    config: &Config,
    memory: &MarketMemory,
) -> anyhow::Result<MacroVerdict> {
    let ai_config = config
        .ai
        .as_ref()
        .context("AI_API_KEY is required for macro mode")?;

    let indicators = match fetch_macro_summary(client, config).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "macro indicator fetch failed — using placeholder summary");
            mock_macro_summary()
        }
    };

    let prompt = prompt::build_macro_prompt(&indicators);
    let raw = ai::call_ai(client, ai_config, &prompt)
        .await
        .context("macro brain AI call failed")?;

    let verdict = parse_macro_verdict(&raw)?;

    info!(trend = verdict.trend.as_str(), "🧠 macro brain verdict");
    memory.set_global_trend(verdict.trend);
    notify::send_telegram(client, config, &verdict.report).await;

    Ok(verdict)
}

/// แปลง AI response เป็น MacroVerdict — unknown trend ⇒ error ชัดๆ
/// (ไม่ปล่อยให้ typo ไหลเป็น NEUTRAL เงียบๆ)
pub fn parse_macro_verdict(raw: &str) -> anyhow::Result<MacroVerdict> {
    let cleaned = ai::strip_markdown(raw);
    let parsed: AiMacroJson = serde_json::from_str(&cleaned)
        .with_context(|| format!("AI returned invalid macro JSON: {cleaned}"))?;

    let trend = Trend::parse(&parsed.trend)
        .with_context(|| format!("Unknown trend from AI: '{}'", parsed.trend))?;

    Ok(MacroVerdict { trend, report: parsed.report })
}

// ─── Headline Brain ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AiSentimentJson {
    sentiment: String,
}

/// ตัดสิน sentiment ของ 1 headline แล้วบันทึกลง Market Memory
pub async fn run_headline_cycle(
    client: &reqwest::Client,
    config: &Config,
    memory: &MarketMemory,
    symbol: &str,
    headline: &str,
) -> anyhow::Result<Sentiment> {
    let ai_config = config
        .ai
        .as_ref()
        .context("AI_API_KEY is required for headline analysis")?;

    let prompt = prompt::build_headline_prompt(symbol, headline);
    let raw = ai::call_ai(client, ai_config, &prompt)
        .await
        .context("headline brain AI call failed")?;

    let sentiment = parse_headline_sentiment(&raw)?;
    memory.set_stock_sentiment(symbol, sentiment);

    Ok(sentiment)
}

pub fn parse_headline_sentiment(raw: &str) -> anyhow::Result<Sentiment> {
    let cleaned = ai::strip_markdown(raw);
    let parsed: AiSentimentJson = serde_json::from_str(&cleaned)
        .with_context(|| format!("AI returned invalid sentiment JSON: {cleaned}"))?;

    Sentiment::parse(&parsed.sentiment)
        .with_context(|| format!("Unknown sentiment from AI: '{}'", parsed.sentiment))
}

// ─── Macro indicator source ───────────────────────────────────────────────────

async fn fetch_macro_summary(
    client: &reqwest::Client,
    config: &Config,
) -> Result<String, FetchError> {
    let base_url = match &config.market_url {
        Some(url) => url,
        None => {
            return Err(FetchError::BadPayload("MARKET_URL not set".to_string()));
        }
    };

    let url = format!("{base_url}/api/macro/summary");
    let resp = client
        .get(&url)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(FetchError::BadStatus {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }

    resp.text()
        .await
        .map_err(|e| FetchError::BadPayload(e.to_string()))
}

/// Placeholder สำหรับ dev โดยไม่มี bridge
fn mock_macro_summary() -> String {
    "- Nifty 50: flat week\n- India VIX: 13.5 (low)\n- FII flows: mildly positive\n- USDINR: stable".to_string()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_macro_verdict_with_fences() {
        let raw = "```json\n{\"trend\": \"bullish\", \"report\": \"🌍 Risk-on\"}\n```";
        let verdict = parse_macro_verdict(raw).unwrap();
        assert_eq!(verdict.trend, Trend::Bullish);
        assert_eq!(verdict.report, "🌍 Risk-on");
    }

    #[test]
    fn test_parse_macro_verdict_rejects_unknown_trend() {
        let raw = r#"{"trend": "SIDEWAYS", "report": "..."}"#;
        assert!(parse_macro_verdict(raw).is_err());
    }

    #[test]
    fn test_parse_macro_verdict_rejects_bad_json() {
        assert!(parse_macro_verdict("not json").is_err());
    }

    #[test]
    fn test_parse_headline_sentiment() {
        let raw = r#"{"sentiment": "negative"}"#;
        assert_eq!(parse_headline_sentiment(raw).unwrap(), Sentiment::Negative);
    }

    #[test]
    fn test_parse_headline_sentiment_rejects_unknown() {
        assert!(parse_headline_sentiment(r#"{"sentiment": "meh"}"#).is_err());
    }
}
