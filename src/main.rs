//! # Ghost Ledger — Sentiment-Weighted Paper-Trading Engine
//!
//! ```text
//! loop every N minutes (scan mode):
//!   1. Load watchlist + Market Memory (global trend / stock sentiment)
//!   2. Per symbol: fetch quote + RSI → confluence score → sniper verdict
//!   3. Paper buy/sell ผ่าน PaperLedger (portfolio.json)
//!   4. แจ้งเตือนผล trade เข้า Telegram
//! ```
//!
//! ## Run Modes (CLI arg แรก)
//!
//! | Mode                      | Description                                 |
//! |---------------------------|---------------------------------------------|
//! | `scan`                    | Sniper Loop วนตลอด (default)                |
//! | `scan-once`               | scan 1 รอบแล้วจบ (เหมาะกับ cron)            |
//! | `macro`                   | Macro Brain 1 รอบ — AI → global trend       |
//! | `headline <SYM> <TEXT>`   | Headline Brain — AI → stock sentiment       |
//! | `status`                  | สรุปพอร์ต (Ghost Ledger report)             |
//! | `intel`                   | สรุป Market Memory ทั้งหมด                  |
//! | `watch-add <SYM>`         | เพิ่ม symbol เข้า dynamic watchlist         |
//! | `watch-remove <SYM>`      | ถอด symbol ออกจาก dynamic watchlist         |

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod brain;
mod config;
mod engine;
mod error;
mod ledger;
mod market;
mod memory;
mod models;
mod notify;
mod store;
mod watchlist;

use config::Config;
use engine::scanner::Scanner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("ghostledger=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    info!(
        r#"

  ╔═══════════════════════════════════════════╗
  ║   GHOST LEDGER — Sniper & Memory          ║
  ║   Sentiment-Weighted Paper Trading        ║
  ╚═══════════════════════════════════════════╝"#
    );

    let config = Config::from_env().context("Failed to load config")?;
    let mode = std::env::args().nth(1).unwrap_or_else(|| "scan".to_string());

    info!(
        %mode,
        capital = config.initial_capital,
        notional = config.trade_notional,
        suffix = %config.exchange_suffix,
        interval = ?config.scan_interval,
        "Ghost Ledger started"
    );

    let scanner = Scanner::new(config.clone());

    match mode.as_str() {
        // ── Sniper Loop (วนตลอด) ─────────────────────────────────────────────
        "scan" => loop {
            let summary = scanner.run_cycle().await;
            info!(?summary, "💤 sleeping until next cycle...");
            tokio::time::sleep(config.scan_interval).await;
        },

        // ── Scan 1 รอบ (cron-friendly) ───────────────────────────────────────
        "scan-once" => {
            scanner.run_cycle().await;
        }

        // ── Macro Brain ──────────────────────────────────────────────────────
        "macro" => {
            match brain::run_macro_cycle(scanner.client(), &config, scanner.memory()).await {
                Ok(verdict) => {
                    info!(trend = verdict.trend.as_str(), "✅ macro cycle complete");
                }
                Err(e) => {
                    // Memory เดิมอยู่ครบ — รอรอบถัดไป
                    error!(error = %e, "❌ macro cycle failed");
                }
            }
        }

        // ── Portfolio status ─────────────────────────────────────────────────
        "status" => {
            let report = scanner.ledger().status().render();
            println!("{report}");
            notify::send_telegram(scanner.client(), &config, &report).await;
        }

        // ── Market Memory intel ──────────────────────────────────────────────
        "intel" => {
            let record = scanner.memory().load(scanner.client()).await;
            let report = memory::MarketMemory::render_intel(&record);
            println!("{report}");
            notify::send_telegram(scanner.client(), &config, &report).await;
        }

        // ── Headline Brain (1 headline ต่อ 1 symbol) ─────────────────────────
        "headline" => {
            let symbol = std::env::args()
                .nth(2)
                .context("Usage: ghostledger headline <SYMBOL> <HEADLINE>")?;
            let headline: String = std::env::args().skip(3).collect::<Vec<_>>().join(" ");
            anyhow::ensure!(!headline.is_empty(), "Usage: ghostledger headline <SYMBOL> <HEADLINE>");

            let sentiment = brain::run_headline_cycle(
                scanner.client(),
                &config,
                scanner.memory(),
                &symbol,
                &headline,
            )
            .await?;

            let score = scanner
                .memory()
                .get_confluence_score(scanner.client(), &symbol)
                .await;
            info!(
                %symbol,
                sentiment = sentiment.as_str(),
                score,
                "✅ headline recorded"
            );
        }

        // ── Watchlist maintenance ────────────────────────────────────────────
        "watch-add" => {
            let symbol = std::env::args()
                .nth(2)
                .context("Usage: ghostledger watch-add <SYMBOL>")?;
            let added = scanner.watchlist().add(&symbol)?;
            if !added {
                info!(%symbol, "already on watchlist — nothing to do");
            }
        }
        "watch-remove" => {
            let symbol = std::env::args()
                .nth(2)
                .context("Usage: ghostledger watch-remove <SYMBOL>")?;
            let removed = scanner.watchlist().remove(&symbol)?;
            if !removed {
                info!(%symbol, "not on dynamic watchlist — nothing to do");
            }
        }

        other => {
            anyhow::bail!(
                "Unknown mode: '{other}'. Use scan | scan-once | macro | headline | status | intel | watch-add | watch-remove"
            );
        }
    }

    Ok(())
}
