//! # engine::scanner
//!
//! **Sniper Loop** — 1 รอบ scan ทั้ง watchlist
//!
//! ## Flow ต่อรอบ
//! ```text
//! 1. โหลด watchlist + Market Memory (อ่านเต็มก้อน 1 ครั้ง/รอบ)
//! 2. ต่อ symbol: fetch quote → confluence score → sniper verdict
//! 3. Buy/Sell ผ่าน PaperLedger → แจ้งเตือน Telegram
//! ```
//!
//! Fetch พลาดที่ symbol ไหน ⇒ ข้าม symbol นั้น scan ต่อจนจบ
//! (continue-on-error ต่อ symbol — รอบ scan ไม่มีวันล้มทั้งรอบ)

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::engine::sniper::{self, SniperConfig, Verdict};
use crate::ledger::{fmt_money, PaperLedger, TradeOutcome};
use crate::market;
use crate::memory::MarketMemory;
use crate::notify;
use crate::watchlist::Watchlist;

// ─── Cycle Summary ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub scanned: usize,
    pub skipped: usize,
    pub bought: usize,
    pub sold: usize,
    pub vetoed: usize,
}

// ─── Scanner ──────────────────────────────────────────────────────────────────

pub struct Scanner {
    config: Config,
    sniper_config: SniperConfig,
    client: reqwest::Client,
    memory: MarketMemory,
    ledger: PaperLedger,
    watchlist: Watchlist,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        let memory = MarketMemory::new(
            config.memory_file.clone(),
            config.memory_mirror_url.clone(),
            config.exchange_suffix.clone(),
        );
        let ledger = PaperLedger::new(
            config.portfolio_file.clone(),
            config.initial_capital,
            config.trade_notional,
        );
        let watchlist = Watchlist::new(
            config.watchlist_file.clone(),
            config.exchange_suffix.clone(),
        );

        Self {
            sniper_config: SniperConfig::from_env(),
            client: reqwest::Client::new(),
            memory,
            ledger,
            watchlist,
            config,
        }
    }

    pub fn ledger(&self) -> &PaperLedger {
        &self.ledger
    }

    pub fn memory(&self) -> &MarketMemory {
        &self.memory
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    // ─── One Scan Cycle ───────────────────────────────────────────────────────

    pub async fn run_cycle(&self) -> CycleSummary {
        let cycle_id = Uuid::new_v4();
        let today = Utc::now().date_naive();
        let symbols = self.watchlist.load();

        // อ่าน Market Memory ครั้งเดียวต่อรอบ — ทุก symbol ใช้ snapshot เดียวกัน
        let record = self.memory.load(&self.client).await;

        info!(
            %cycle_id,
            watchlist = symbols.len(),
            trend = record.global_trend.as_str(),
            "🎯 Sniper scope active"
        );

        let mut summary = CycleSummary::default();

        for symbol in &symbols {
            summary.scanned += 1;

            // ── Quote (fail ⇒ ข้าม symbol นี้) ──────────────────────────────
            let quote = match market::fetch_quote(&self.client, &self.config, symbol).await {
                Ok(q) => q,
                Err(e) => {
                    warn!(%cycle_id, %symbol, error = %e, "quote fetch failed — skipping symbol");
                    summary.skipped += 1;
                    continue;
                }
            };

            let rsi = match quote.rsi_14 {
                Some(v) => v,
                None => {
                    debug!(symbol = %quote.symbol, "no RSI from feed — skipping symbol");
                    summary.skipped += 1;
                    continue;
                }
            };

            let score = MarketMemory::confluence_score(&record, symbol);
            let verdict = sniper::evaluate(rsi, score, &self.sniper_config);

            match verdict {
                // ── BUY ───────────────────────────────────────────────────────
                Verdict::Buy { rsi, threshold, score } => {
                    match self.ledger.buy(symbol, quote.price, today) {
                        Ok(TradeOutcome::Bought { qty, .. }) => {
                            summary.bought += 1;
                            let msg = format!(
                                "🟢 **SMART BUY: {symbol}**\n\
                                 Price: {:.2}\n\
                                 Qty: {qty}\n\
                                 RSI: {rsi:.2} (Limit: {threshold:.0})\n\
                                 🧠 **Intel Score:** {score}/100",
                                quote.price,
                            );
                            notify::send_telegram(&self.client, &self.config, &msg).await;
                        }
                        Ok(TradeOutcome::Rejected(reason)) => {
                            debug!(%symbol, %reason, "buy signal rejected by ledger");
                        }
                        Ok(_) => unreachable!("buy cannot return Sold"),
                        Err(e) => {
                            warn!(%symbol, error = %e, "portfolio save failed — buy skipped");
                        }
                    }
                }

                // ── SELL — sentiment ไม่ gate ทางออก ──────────────────────────
                Verdict::Sell { rsi, .. } => {
                    match self.ledger.sell(symbol, quote.price, today) {
                        Ok(TradeOutcome::Sold { profit, .. }) => {
                            summary.sold += 1;
                            let msg = format!(
                                "🔴 **SOLD: {symbol}**\n\
                                 Price: {:.2}\n\
                                 RSI: {rsi:.2}\n\
                                 Profit: ₹{}",
                                quote.price,
                                fmt_money(profit),
                            );
                            notify::send_telegram(&self.client, &self.config, &msg).await;
                        }
                        Ok(TradeOutcome::Rejected(reason)) => {
                            debug!(%symbol, %reason, "sell signal but nothing to close");
                        }
                        Ok(_) => unreachable!("sell cannot return Bought"),
                        Err(e) => {
                            warn!(%symbol, error = %e, "portfolio save failed — sell skipped");
                        }
                    }
                }

                // ── VETO ──────────────────────────────────────────────────────
                Verdict::Vetoed { rsi, score } => {
                    summary.vetoed += 1;
                    info!(
                        %symbol, rsi, score,
                        "🚫 dip skipped due to strongly negative sentiment"
                    );
                }

                Verdict::Hold => {
                    debug!(%symbol, rsi, score, "no action");
                }
            }
        }

        info!(
            %cycle_id,
            scanned = summary.scanned,
            skipped = summary.skipped,
            bought = summary.bought,
            sold = summary.sold,
            vetoed = summary.vetoed,
            "scan cycle complete"
        );

        summary
    }
}
