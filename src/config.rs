//! # config — อ่าน Config จาก Environment Variables
//!
//! ค่าคงที่ทุกตัว (ทุนตั้งต้น, trade notional, path ไฟล์, endpoint)
//! override ได้ผ่าน `.env` — ตัวเลข default คือค่าดั้งเดิมของระบบ

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;

// ─── AI Provider ──────────────────────────────────────────────────────────────

/// AI Provider ที่รองรับสำหรับ Macro / News Brain
#[derive(Debug, Clone)]
pub enum AiProvider {
    Claude,
    OpenAi,
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::Claude => write!(f, "Claude 3.5 Sonnet"),
            AiProvider::OpenAi => write!(f, "GPT-4o"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub api_key: String,
}

// ─── Telegram ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

// ─── Config ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    // ── Capital ──────────────────────────────────────────────────────────────
    /// เงินสดตั้งต้นของพอร์ตกระดาษ
    pub initial_capital: f64,
    /// Notional คงที่ต่อ 1 trade
    pub trade_notional: f64,

    // ── Persisted files ──────────────────────────────────────────────────────
    pub memory_file: PathBuf,
    pub portfolio_file: PathBuf,
    pub watchlist_file: PathBuf,

    // ── Market ───────────────────────────────────────────────────────────────
    /// Suffix ตลาด เช่น ".NS" (NSE)
    pub exchange_suffix: String,
    /// Quote bridge URL — ไม่ตั้ง ⇒ ใช้ mock quote (dev mode)
    pub market_url: Option<String>,
    /// Remote mirror ของ market_memory.json (เช่น raw GitHub URL)
    pub memory_mirror_url: Option<String>,
    /// รอบเวลา Sniper Loop
    pub scan_interval: Duration,

    // ── Collaborators ────────────────────────────────────────────────────────
    /// Notification sink — ไม่ตั้ง token ⇒ ปิดเงียบๆ
    pub telegram: Option<TelegramConfig>,
    /// AI brain — จำเป็นเฉพาะ `macro` mode
    pub ai: Option<AiConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let ai = match std::env::var("AI_API_KEY") {
            Ok(api_key) => {
                let provider_str = std::env::var("AI_PROVIDER")
                    .unwrap_or_else(|_| "claude".to_string())
                    .to_lowercase();
                let provider = match provider_str.as_str() {
                    "claude" => AiProvider::Claude,
                    "openai" => AiProvider::OpenAi,
                    other => bail!("Unknown AI_PROVIDER: '{other}'. Use 'claude' or 'openai'"),
                };
                Some(AiConfig { provider, api_key })
            }
            Err(_) => None,
        };

        let telegram = match (std::env::var("TELEGRAM_TOKEN"), std::env::var("TELEGRAM_CHAT_ID")) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Ok(Self {
            initial_capital: env_f64("INITIAL_CAPITAL", 1_000_000.0),
            trade_notional: env_f64("TRADE_NOTIONAL", 50_000.0),
            memory_file: env_path("MEMORY_FILE", "market_memory.json"),
            portfolio_file: env_path("PORTFOLIO_FILE", "portfolio.json"),
            watchlist_file: env_path("WATCHLIST_FILE", "dynamic_watchlist.json"),
            exchange_suffix: std::env::var("EXCHANGE_SUFFIX").unwrap_or_else(|_| ".NS".to_string()),
            market_url: std::env::var("MARKET_URL").ok(),
            memory_mirror_url: std::env::var("MEMORY_MIRROR_URL").ok(),
            scan_interval: Duration::from_secs(env_u64("SCAN_INTERVAL_SECS", 300)),
            telegram,
            ai,
        })
    }
}

// ─── Env helpers ──────────────────────────────────────────────────────────────

pub fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub fn env_i32(key: &str, default: i32) -> i32 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}
